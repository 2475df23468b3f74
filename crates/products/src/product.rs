use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use stash_core::{DomainError, DomainResult, ProductId};

use crate::Category;

/// Months added to the creation time to get a new product's expiration date.
pub const DEFAULT_SHELF_LIFE_MONTHS: u32 = 6;

/// `now` plus `months` calendar months, or `None` if that overflows.
pub fn default_expiration(now: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
    now.checked_add_months(Months::new(months))
}

/// A tracked skincare product.
///
/// The name is validated when it is set through [`Product::create`] or
/// [`Product::set_name`]; records loaded from storage may still carry an empty
/// name (a product created but never named).
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    brand: Option<String>,
    price: Option<f64>,
    link: Option<String>,
    expiration_date: Option<DateTime<Utc>>,
    category: Category,
}

impl Product {
    /// A fresh, unnamed product with a new id and the default category.
    pub fn draft() -> Self {
        Self::draft_with_id(ProductId::new())
    }

    pub fn draft_with_id(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            brand: None,
            price: None,
            link: None,
            expiration_date: None,
            category: Category::default(),
        }
    }

    /// Create a named product the way the add flow does: default category and an
    /// expiration date `shelf_life_months` after `now`.
    pub fn create(
        name: &str,
        now: DateTime<Utc>,
        shelf_life_months: u32,
    ) -> DomainResult<Self> {
        let mut product = Self::draft();
        product.set_name(name)?;
        product.expiration_date = default_expiration(now, shelf_life_months);
        Ok(product)
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_date
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Set the display name. Surrounding whitespace is dropped; nothing may remain empty.
    pub fn set_name(&mut self, name: &str) -> DomainResult<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        self.name = trimmed.to_string();
        Ok(())
    }

    pub fn set_brand(&mut self, brand: Option<String>) {
        self.brand = brand;
    }

    /// `None` means "no price recorded", which is not the same as free.
    pub fn set_price(&mut self, price: Option<f64>) -> DomainResult<()> {
        if let Some(p) = price {
            if !p.is_finite() || p < 0.0 {
                return Err(DomainError::validation(format!("invalid price: {p}")));
            }
        }
        self.price = price;
        Ok(())
    }

    pub fn set_link(&mut self, link: Option<String>) {
        self.link = link;
    }

    pub fn set_expiration_date(&mut self, expiration_date: Option<DateTime<Utc>>) {
        self.expiration_date = expiration_date;
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Case-insensitive substring match on the name.
    ///
    /// `needle` must already be lowercased.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }

    /// Rebuild a product from its persisted record.
    ///
    /// Fails with [`DomainError::UnknownCategory`] when the stored category is not
    /// one of the known values.
    pub fn try_from_record(record: ProductRecord) -> DomainResult<Self> {
        let category = record.category.parse::<Category>()?;
        Ok(Self::from_record_with(record, category))
    }

    /// Rebuild a product, mapping an unknown stored category to `fallback`.
    pub fn from_record_or(record: ProductRecord, fallback: Category) -> Self {
        let category = record.category.parse::<Category>().unwrap_or(fallback);
        Self::from_record_with(record, category)
    }

    /// Rebuild a product with an already-resolved category, ignoring the stored one.
    pub fn from_record_with(record: ProductRecord, category: Category) -> Self {
        Self {
            id: record.id,
            name: record.name,
            brand: record.brand,
            price: record.price,
            link: record.link,
            expiration_date: record.expiration_date,
            category,
        }
    }

    pub fn to_record(&self) -> ProductRecord {
        ProductRecord::from(self)
    }
}

/// Persisted form of a [`Product`].
///
/// The category is kept as the raw stored string so records written with a
/// category this build does not know about still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,
    pub category: String,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price,
            link: product.link.clone(),
            expiration_date: product.expiration_date,
            category: product.category.as_str().to_string(),
        }
    }
}
