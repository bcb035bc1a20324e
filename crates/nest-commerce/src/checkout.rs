//! Checkout validation: shipping fields, delivery area, payment mode.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pincodes the store delivers to (Wardha district).
///
/// A closed set: exact match only, no range or prefix matching.
pub const SERVICEABLE_PINCODES: [u32; 19] = [
    442001, 442102, 442103, 442104, 442105, 442106, 442107, 442109, 442110, 442111, 442113,
    442114, 442201, 442202, 442204, 442301, 442302, 442303, 442304,
];

/// Payment methods the store accepts.
///
/// Cash on delivery is the only one; attempting any other literal is a
/// typed error rather than a silent correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMode {
    /// Cash on delivery.
    #[default]
    CashOnDelivery,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::CashOnDelivery => "COD",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMode::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Parse a payment mode literal.
    pub fn parse(s: &str) -> Result<Self, CheckoutError> {
        match s {
            "COD" => Ok(PaymentMode::CashOnDelivery),
            other => Err(CheckoutError::PaymentNotSupported(other.to_string())),
        }
    }
}

/// Shipping details collected at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ShippingDetails {
    /// Full name.
    pub name: String,
    /// Mobile number.
    pub phone: String,
    /// Full address.
    pub address: String,
    /// Delivery pincode; must be in [`SERVICEABLE_PINCODES`].
    pub pincode: String,
    /// Payment method.
    pub payment_mode: PaymentMode,
}

impl ShippingDetails {
    /// Build details with the default (and only) payment mode.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        pincode: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            pincode: pincode.into(),
            payment_mode: PaymentMode::CashOnDelivery,
        }
    }
}

/// Reasons checkout validation can fail.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CheckoutError {
    /// A required shipping field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Delivery is not available for the given pincode.
    #[error("delivery not available for pincode {0}")]
    UnserviceablePincode(String),

    /// A payment method other than cash on delivery was attempted.
    #[error("payment method not supported: {0}")]
    PaymentNotSupported(String),

    /// Checkout attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,
}

/// Check whether a pincode is in the delivery allow-list.
pub fn pincode_serviceable(pincode: &str) -> bool {
    pincode
        .trim()
        .parse::<u32>()
        .map(|pin| SERVICEABLE_PINCODES.contains(&pin))
        .unwrap_or(false)
}

/// Validate shipping details.
///
/// Checks run in order: field presence (name, phone, address, pincode),
/// then the pincode allow-list. The payment mode is typed and already
/// pinned to cash on delivery by construction.
pub fn validate_shipping(details: &ShippingDetails) -> Result<(), CheckoutError> {
    if details.name.trim().is_empty() {
        return Err(CheckoutError::MissingField("name"));
    }
    if details.phone.trim().is_empty() {
        return Err(CheckoutError::MissingField("phone"));
    }
    if details.address.trim().is_empty() {
        return Err(CheckoutError::MissingField("address"));
    }
    if details.pincode.trim().is_empty() {
        return Err(CheckoutError::MissingField("pincode"));
    }
    if !pincode_serviceable(&details.pincode) {
        return Err(CheckoutError::UnserviceablePincode(details.pincode.clone()));
    }
    Ok(())
}
