//! # ecoleta-store
//!
//! Relational storage for the Ecoleta registry, backed by SQLite.
//!
//! The crate exposes a synchronous `Database` handle that wraps a
//! `rusqlite::Connection` and provides typed helpers for the item catalog and
//! for collection point registrations.

pub mod database;
pub mod items;
pub mod migrations;
pub mod models;
pub mod points;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use models::*;
