//! v001 -- Initial schema creation.
//!
//! Creates the item catalog, the collection points and the association
//! table linking them.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Items (recyclable material categories)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS items (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    image TEXT NOT NULL                       -- file name under /uploads
);

-- ----------------------------------------------------------------
-- Collection points
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS points (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    email      TEXT NOT NULL,
    whatsapp   TEXT NOT NULL,
    latitude   REAL NOT NULL,
    longitude  REAL NOT NULL,
    city       TEXT NOT NULL,
    uf         TEXT NOT NULL,                 -- two-letter state code
    created_at TEXT NOT NULL                  -- ISO-8601 / RFC-3339
);

CREATE INDEX IF NOT EXISTS idx_points_uf_city ON points(uf, city);

-- ----------------------------------------------------------------
-- Point <-> item association
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS point_items (
    point_id INTEGER NOT NULL,                -- FK -> points(id)
    item_id  INTEGER NOT NULL,                -- FK -> items(id)
    position INTEGER NOT NULL,                -- selection order

    PRIMARY KEY (point_id, item_id),
    FOREIGN KEY (point_id) REFERENCES points(id) ON DELETE CASCADE,
    FOREIGN KEY (item_id)  REFERENCES items(id)
);

CREATE INDEX IF NOT EXISTS idx_point_items_item ON point_items(item_id);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
