use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{LATITUDE_RANGE, LONGITUDE_RANGE, UNSELECTED, UPLOADS_PATH};
use crate::error::ValidationError;

/// Build the public URL of an uploaded item image.
///
/// `endpoint` is the configured base URL of the API (no trailing slash).
pub fn item_image_url(endpoint: &str, image: &str) -> String {
    format!("{endpoint}{UPLOADS_PATH}/{image}")
}

/// A catalog item as exposed to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializedItem {
    pub id: i64,
    pub name: String,
    pub image_url: String,
}

/// Body of `POST /points`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPoint {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub city: String,
    pub uf: String,
    pub latitude: f64,
    pub longitude: f64,
    pub items: Vec<i64>,
}

impl NewPoint {
    /// Canonical form of the payload: the state code is trimmed and
    /// upper-cased so stored points match `uf` filters regardless of case.
    pub fn normalized(mut self) -> Self {
        self.uf = self.uf.trim().to_ascii_uppercase();
        self
    }

    /// Check the payload shape. Item existence is checked by the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("whatsapp", &self.whatsapp),
            ("city", &self.city),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }

        // the client sends the selector placeholder when nothing was picked
        for (field, value) in [("city", &self.city), ("uf", &self.uf)] {
            if value.trim() == UNSELECTED {
                return Err(ValidationError::Unselected(field));
            }
        }

        if !is_plausible_email(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }

        if self.uf.len() != 2 || !self.uf.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidUf(self.uf.clone()));
        }

        if !self.latitude.is_finite() || !LATITUDE_RANGE.contains(&self.latitude) {
            return Err(ValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !self.longitude.is_finite() || !LONGITUDE_RANGE.contains(&self.longitude) {
            return Err(ValidationError::LongitudeOutOfRange(self.longitude));
        }

        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }
        let mut seen = HashSet::with_capacity(self.items.len());
        for id in &self.items {
            if !seen.insert(*id) {
                return Err(ValidationError::DuplicateItem(*id));
            }
        }

        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.trim().split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

/// A registered collection point as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub city: String,
    pub uf: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Ids of the accepted items, in the order they were selected.
    pub items: Vec<i64>,
}

/// Body of `GET /points/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointDetails {
    pub point: PointResponse,
    pub items: Vec<SerializedItem>,
}

/// A Brazilian state as listed in the UF selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Uf {
    pub uf: String,
    pub name: String,
}

/// A municipality as listed in the city selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct City {
    pub name: String,
}

/// A map coordinate in degrees.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}
