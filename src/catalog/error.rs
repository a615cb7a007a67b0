use thiserror::Error;

use crate::models::Field;

/// Reasons a catalog operation is refused.
///
/// Messages are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Please fill in the {0} field.")]
    MissingField(Field),

    #[error("Please enter a valid price (positive number).")]
    InvalidPrice(String),

    #[error("A plant with the name \"{common}\" ({botanical}) already exists in the catalog.")]
    DuplicatePlant { common: String, botanical: String },

    #[error("Please select a plant to {0}.")]
    NoSelection(&'static str),

    #[error("No plant at row {}", .0 + 1)]
    RowOutOfRange(usize),

    #[error("No plant ids left to assign.")]
    IdsExhausted,
}

impl CatalogError {
    /// The form field the error refers to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            CatalogError::MissingField(field) => Some(*field),
            CatalogError::InvalidPrice(_) => Some(Field::Price),
            CatalogError::DuplicatePlant { .. } => Some(Field::Common),
            _ => None,
        }
    }
}
