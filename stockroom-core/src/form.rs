//! Item form: raw field text, validation, and create/edit mode.

use std::path::PathBuf;

use thiserror::Error;

use crate::image::ImageError;
use crate::item::{Item, ItemId};
use crate::view::parse_date;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Name is required")]
    EmptyName,

    #[error("Quantity must be a whole number of zero or more, got {0:?}")]
    InvalidQuantity(String),

    #[error("Price must be a number of zero or more, got {0:?}")]
    InvalidPrice(String),

    #[error("Date must be YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Named form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Details,
    Quantity,
    Price,
    Date,
    Kind,
    Image,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Details,
        Field::Quantity,
        Field::Price,
        Field::Date,
        Field::Kind,
        Field::Image,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Details => "Details",
            Field::Quantity => "Quantity",
            Field::Price => "Price",
            Field::Date => "Date (YYYY-MM-DD)",
            Field::Kind => "Type",
            Field::Image => "Image file",
        }
    }

    pub fn next(self) -> Field {
        let i = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Field {
        let i = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Whether a submit creates a new item or replaces an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(Item),
}

impl FormMode {
    pub fn target_id(&self) -> Option<&ItemId> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(item) => Some(&item.id),
        }
    }

    /// Image of the item being edited, kept when no new file is chosen.
    pub fn current_image(&self) -> Option<String> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(item) => Some(item.image.clone()),
        }
    }
}

/// Field text exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub name: String,
    pub details: String,
    pub quantity: String,
    pub price: String,
    pub date: String,
    pub kind: String,
    /// Path of an image file to attach; blank for none.
    pub image: String,
}

impl ItemForm {
    /// Form pre-filled from an existing item. The image path starts blank.
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            details: item.details.clone(),
            quantity: item.quantity.to_string(),
            price: item.price.to_string(),
            date: item.date.clone(),
            kind: item.kind.clone(),
            image: String::new(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Details => &self.details,
            Field::Quantity => &self.quantity,
            Field::Price => &self.price,
            Field::Date => &self.date,
            Field::Kind => &self.kind,
            Field::Image => &self.image,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Details => &mut self.details,
            Field::Quantity => &mut self.quantity,
            Field::Price => &mut self.price,
            Field::Date => &mut self.date,
            Field::Kind => &mut self.kind,
            Field::Image => &mut self.image,
        }
    }

    pub fn validate(&self) -> Result<ItemDraft, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }

        let quantity = self
            .quantity
            .trim()
            .parse::<u32>()
            .map_err(|_| FormError::InvalidQuantity(self.quantity.clone()))?;

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| FormError::InvalidPrice(self.price.clone()))?;

        let date = self.date.trim();
        if parse_date(date).is_none() {
            return Err(FormError::InvalidDate(self.date.clone()));
        }

        let image = self.image.trim();

        Ok(ItemDraft {
            name: name.to_string(),
            details: self.details.clone(),
            quantity,
            price,
            date: date.to_string(),
            kind: self.kind.trim().to_string(),
            image_path: (!image.is_empty()).then(|| PathBuf::from(image)),
        })
    }
}

/// A validated form, waiting for its image to be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub name: String,
    pub details: String,
    pub quantity: u32,
    pub price: f64,
    pub date: String,
    pub kind: String,
    pub image_path: Option<PathBuf>,
}

impl ItemDraft {
    pub fn into_item(self, id: ItemId, image: String) -> Item {
        Item {
            id,
            name: self.name,
            details: self.details,
            quantity: f64::from(self.quantity),
            price: self.price,
            date: self.date,
            kind: self.kind,
            image,
        }
    }
}
