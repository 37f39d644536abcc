//! # ecoleta-client
//!
//! Client side of the Ecoleta registry: HTTP clients for the backend and the
//! IBGE geography API, and the state and async driver of the page used to
//! register a new collection point.
//!
//! The page is UI-agnostic.  A host renders [`CreatePointForm`], forwards
//! user input to it, and implements [`PageView`] for alerts and navigation.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod geolocation;
pub mod page;
pub mod request;
pub mod selection;
pub mod state;

pub use api::{EcoletaApi, GeographyApi};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use events::{PageEvent, PageView};
pub use geolocation::{FixedGeolocator, Geolocator};
pub use page::{CreatePointPage, SubmitOutcome};
pub use state::{CreatePointForm, FormData};
