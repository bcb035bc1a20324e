//! Product and variant types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Image shown when a product has no uploaded pictures.
pub const PLACEHOLDER_IMAGE: &str = "/no-image.png";

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Human-chosen short code (unique across the catalog, e.g. `d1`).
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Top-level category (e.g. "Baby Care").
    pub category: String,
    /// Sub-category within the category (e.g. "Diapers").
    pub sub_category: String,
    /// Descriptive text (may be empty).
    pub description: String,
    /// Main image URL (may be empty; see [`Product::display_image`]).
    pub main_image: String,
    /// Gallery image URLs.
    pub images: Vec<String>,
    /// Tags for recommendations and browsing.
    pub tags: Vec<String>,
    /// Purchasable configurations. At least one is expected for price
    /// display, but nothing enforces it; see [`Product::display_price`].
    pub variants: Vec<Variant>,
}

impl Product {
    /// Create a product with no images, tags, or variants.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        sub_category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            sub_category: sub_category.into(),
            description: String::new(),
            main_image: String::new(),
            images: Vec::new(),
            tags: Vec::new(),
            variants: Vec::new(),
        }
    }

    /// Add a tag if not already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Price shown in listings: the first variant's offer price.
    ///
    /// `None` when the product has no variants (a data entry gap the
    /// admin screens allow).
    pub fn display_price(&self) -> Option<Money> {
        self.variants.first().map(|v| v.offer_price)
    }

    /// Image shown in listings: the main image, else the first gallery
    /// image, else a placeholder.
    pub fn display_image(&self) -> &str {
        if !self.main_image.is_empty() {
            return &self.main_image;
        }
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Check whether this product shares a tag with another.
    pub fn shares_tag_with(&self, other: &Product) -> bool {
        self.tags.iter().any(|tag| other.tags.contains(tag))
    }
}

/// A purchasable configuration of a product.
///
/// The size/flavour/pack descriptors are free text and may all be
/// empty. No invariant ties `offer_price` to `mrp`; an offer above the
/// list price is stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Variant {
    /// Size descriptor (e.g. "M", "500g").
    #[serde(default)]
    pub size: String,
    /// Flavour descriptor (e.g. "Vanilla").
    #[serde(default)]
    pub flavour: String,
    /// Pack descriptor (e.g. "3").
    #[serde(default)]
    pub pack_of: String,
    /// List price.
    pub mrp: Money,
    /// Selling price; snapshotted onto cart lines at add time.
    pub offer_price: Money,
    /// Stock count. Not decremented on order placement.
    #[serde(default)]
    pub stock: i64,
    /// Manual out-of-stock flag maintained by the admin screens.
    #[serde(default)]
    pub out_of_stock: bool,
}

impl Variant {
    /// Create a variant with empty descriptors.
    pub fn new(mrp: Money, offer_price: Money, stock: i64) -> Self {
        Self {
            mrp,
            offer_price,
            stock,
            ..Self::default()
        }
    }

    /// Create a size variant.
    pub fn sized(size: impl Into<String>, mrp: Money, offer_price: Money, stock: i64) -> Self {
        Self {
            size: size.into(),
            ..Self::new(mrp, offer_price, stock)
        }
    }

    /// Create a flavour variant.
    pub fn flavoured(
        flavour: impl Into<String>,
        mrp: Money,
        offer_price: Money,
        stock: i64,
    ) -> Self {
        Self {
            flavour: flavour.into(),
            ..Self::new(mrp, offer_price, stock)
        }
    }

    /// The discriminator used for cart-line identity: size if present,
    /// else flavour, else the literal `default`.
    pub fn discriminator(&self) -> &str {
        if !self.size.is_empty() {
            &self.size
        } else if !self.flavour.is_empty() {
            &self.flavour
        } else {
            "default"
        }
    }

    /// Human-readable label built from the non-empty descriptors.
    pub fn label(&self) -> String {
        let mut parts = Vec::new();
        if !self.size.is_empty() {
            parts.push(format!("Size: {}", self.size));
        }
        if !self.pack_of.is_empty() {
            parts.push(format!("Pack Of: {}", self.pack_of));
        }
        if !self.flavour.is_empty() {
            parts.push(format!("Flavour: {}", self.flavour));
        }
        parts.join(" \u{2022} ")
    }

    /// Check whether the variant can be shown as purchasable.
    pub fn is_in_stock(&self) -> bool {
        !self.out_of_stock && self.stock > 0
    }
}
