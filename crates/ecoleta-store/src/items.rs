//! Read operations for the [`Item`] catalog.

use rusqlite::{params, Connection};

use crate::database::Database;
use crate::error::Result;
use crate::models::Item;

impl Database {
    /// List the whole catalog in storage order.
    pub fn list_items(&self) -> Result<Vec<Item>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, title, image FROM items ORDER BY id ASC")?;

        let rows = stmt.query_map([], row_to_item)?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// Items accepted by a point, in the order they were selected.
    pub fn list_items_for_point(&self, point_id: i64) -> Result<Vec<Item>> {
        let mut stmt = self.conn().prepare(
            "SELECT i.id, i.title, i.image
             FROM items i
             JOIN point_items pi ON pi.item_id = i.id
             WHERE pi.point_id = ?1
             ORDER BY pi.position ASC",
        )?;

        let rows = stmt.query_map(params![point_id], row_to_item)?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }
}

/// Ids from `ids` that have no catalog entry, in input order.
pub(crate) fn missing_item_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare_cached("SELECT EXISTS(SELECT 1 FROM items WHERE id = ?1)")?;

    let mut missing = Vec::new();
    for id in ids {
        let exists: bool = stmt.query_row(params![id], |row| row.get(0))?;
        if !exists {
            missing.push(*id);
        }
    }
    Ok(missing)
}

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        title: row.get(1)?,
        image: row.get(2)?,
    })
}
