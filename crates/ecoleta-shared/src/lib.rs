//! Types shared between the Ecoleta server and its clients: the JSON wire
//! shapes, payload validation and a handful of constants.

pub mod constants;
pub mod error;
pub mod types;

pub use error::ValidationError;
pub use types::*;
