use thiserror::Error;

/// Reasons a point registration payload is rejected before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Field '{0}' must not be empty")]
    MissingField(&'static str),

    #[error("No {0} selected")]
    Unselected(&'static str),

    #[error("Invalid e-mail address: {0}")]
    InvalidEmail(String),

    #[error("Invalid UF '{0}': expected a two-letter state code")]
    InvalidUf(String),

    #[error("Latitude out of range: {0}")]
    LatitudeOutOfRange(f64),

    #[error("Longitude out of range: {0}")]
    LongitudeOutOfRange(f64),

    #[error("At least one item must be selected")]
    NoItems,

    #[error("Item {0} selected more than once")]
    DuplicateItem(i64),
}
