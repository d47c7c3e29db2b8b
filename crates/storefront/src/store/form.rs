//! Create/edit buffer for a single product.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use gemini_store_core::{Price, Product, ProductId};
use serde::Serialize;
use thiserror::Error;

/// Errors from form field updates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
}

/// Editable product fields, named as the form inputs are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Price,
    Category,
    ImageUrl,
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "description" => Ok(Self::Description),
            "price" => Ok(Self::Price),
            "category" => Ok(Self::Category),
            "imageUrl" => Ok(Self::ImageUrl),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// Every product field except the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub image_url: String,
}

impl ProductDraft {
    /// Blank draft with a placeholder image seeded by `now`.
    #[must_use]
    pub fn blank(now: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: Price::ZERO,
            category: String::new(),
            image_url: format!(
                "https://picsum.photos/seed/{}/400/400",
                now.timestamp_millis()
            ),
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            image_url: product.image_url.clone(),
        }
    }
}

/// Whether the form creates a new product or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

/// An open product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    mode: FormMode,
    draft: ProductDraft,
}

impl ProductForm {
    /// Open an empty form for a new product.
    #[must_use]
    pub fn create_at(now: DateTime<Utc>) -> Self {
        Self {
            mode: FormMode::Create,
            draft: ProductDraft::blank(now),
        }
    }

    /// Open a form pre-filled with `product`.
    #[must_use]
    pub fn edit(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit(product.id.clone()),
            draft: ProductDraft::from(product),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[must_use]
    pub const fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Set one field from raw input.
    ///
    /// Price input is read up to the first character that cannot continue a
    /// number; without a finite, non-negative leading number it becomes 0.
    pub fn set_field(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Name => self.draft.name = value.to_string(),
            FormField::Description => self.draft.description = value.to_string(),
            FormField::Price => self.draft.price = parse_price(value),
            FormField::Category => self.draft.category = value.to_string(),
            FormField::ImageUrl => self.draft.image_url = value.to_string(),
        }
    }

    /// Build the product this form describes.
    ///
    /// In create mode the id is empty; the caller assigns a fresh one.
    #[must_use]
    pub fn submit(&self) -> Product {
        let id = match &self.mode {
            FormMode::Create => ProductId::default(),
            FormMode::Edit(id) => id.clone(),
        };
        Product {
            id,
            name: self.draft.name.clone(),
            description: self.draft.description.clone(),
            price: self.draft.price,
            category: self.draft.category.clone(),
            image_url: self.draft.image_url.clone(),
        }
    }
}

/// Reads the longest leading number, as a browser's `parseFloat` does
/// (`"12abc"` is 12). No leading number means 0.
fn parse_price(value: &str) -> Price {
    let value = value.trim_start();
    (1..=value.len())
        .rev()
        .find_map(|end| value.get(..end)?.parse::<f64>().ok())
        .map_or(Price::ZERO, Price::from_f64_lossy)
}
