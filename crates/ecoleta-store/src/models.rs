//! Domain model structs persisted in the SQLite database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ecoleta_shared::{item_image_url, PointResponse, SerializedItem};

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A recyclable-material category.  Rows are seeded by migration and only
/// ever referenced afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    /// Display title, exposed to clients as `name`.
    pub title: String,
    /// File name of the image under the uploads directory.
    pub image: String,
}

impl Item {
    /// Client-facing shape, with the image resolved against `endpoint`.
    pub fn serialize(&self, endpoint: &str) -> SerializedItem {
        SerializedItem {
            id: self.id,
            name: self.title.clone(),
            image_url: item_image_url(endpoint, &self.image),
        }
    }
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A registered collection point together with the items it accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    /// Two-letter state code.
    pub uf: String,
    /// Accepted item ids, in selection order.
    pub items: Vec<i64>,
    /// When the point was registered.
    pub created_at: DateTime<Utc>,
}

impl From<Point> for PointResponse {
    fn from(point: Point) -> Self {
        Self {
            id: point.id,
            name: point.name,
            email: point.email,
            whatsapp: point.whatsapp,
            city: point.city,
            uf: point.uf,
            latitude: point.latitude,
            longitude: point.longitude,
            items: point.items,
        }
    }
}

// ---------------------------------------------------------------------------
// Point filter
// ---------------------------------------------------------------------------

/// Criteria for [`Database::list_points`](crate::Database::list_points).
///
/// Every field is optional; an empty `items` list means "any item".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointFilter {
    pub city: Option<String>,
    pub uf: Option<String>,
    /// Match points accepting at least one of these item ids.
    pub items: Vec<i64>,
}
