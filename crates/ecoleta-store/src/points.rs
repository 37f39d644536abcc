//! Registration and lookup of collection [`Point`]s.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};

use ecoleta_shared::NewPoint;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::items::missing_item_ids;
use crate::models::{Point, PointFilter};

const POINT_COLUMNS: &str =
    "p.id, p.name, p.email, p.whatsapp, p.latitude, p.longitude, p.city, p.uf, p.created_at";

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a point and its item associations in a single transaction.
    ///
    /// Every id in `new.items` must exist in the catalog; otherwise
    /// [`StoreError::UnknownItems`] is returned and nothing is written.
    pub fn create_point(&mut self, new: &NewPoint) -> Result<Point> {
        let tx = self.conn_mut().transaction()?;

        let missing = missing_item_ids(&tx, &new.items)?;
        if !missing.is_empty() {
            return Err(StoreError::UnknownItems(missing));
        }

        let now = Utc::now();

        tx.execute(
            "INSERT INTO points (name, email, whatsapp, latitude, longitude, city, uf, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                new.name,
                new.email,
                new.whatsapp,
                new.latitude,
                new.longitude,
                new.city,
                new.uf,
                now.to_rfc3339(),
            ],
        )?;
        let id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare(
                "INSERT INTO point_items (point_id, item_id, position) VALUES (?1, ?2, ?3)",
            )?;
            for (position, item_id) in new.items.iter().enumerate() {
                stmt.execute(params![id, item_id, position as i64])?;
            }
        }

        tx.commit()?;

        tracing::debug!(id, items = new.items.len(), "point registered");

        Ok(Point {
            id,
            name: new.name.clone(),
            email: new.email.clone(),
            whatsapp: new.whatsapp.clone(),
            latitude: new.latitude,
            longitude: new.longitude,
            city: new.city.clone(),
            uf: new.uf.clone(),
            items: new.items.clone(),
            created_at: now,
        })
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single point by id.
    pub fn get_point(&self, id: i64) -> Result<Point> {
        let sql = format!("SELECT {POINT_COLUMNS} FROM points p WHERE p.id = ?1");

        let mut point = self
            .conn()
            .query_row(&sql, params![id], row_to_point)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })?;

        point.items = point_item_ids(self.conn(), id)?;
        Ok(point)
    }

    /// List points matching `filter`, ordered by id.
    pub fn list_points(&self, filter: &PointFilter) -> Result<Vec<Point>> {
        let mut sql = format!("SELECT DISTINCT {POINT_COLUMNS} FROM points p");
        let mut clauses = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if !filter.items.is_empty() {
            sql.push_str(" JOIN point_items pi ON pi.point_id = p.id");
            let placeholders = vec!["?"; filter.items.len()].join(", ");
            clauses.push(format!("pi.item_id IN ({placeholders})"));
            values.extend(filter.items.iter().map(|id| Value::Integer(*id)));
        }
        if let Some(ref city) = filter.city {
            clauses.push("p.city = ?".to_string());
            values.push(Value::Text(city.clone()));
        }
        if let Some(ref uf) = filter.uf {
            clauses.push("p.uf = ?".to_string());
            values.push(Value::Text(uf.clone()));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY p.id ASC");

        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), row_to_point)?;

        let mut points = Vec::new();
        for row in rows {
            let mut point = row?;
            point.items = point_item_ids(self.conn(), point.id)?;
            points.push(point);
        }
        Ok(points)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn point_item_ids(conn: &Connection, point_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare_cached(
        "SELECT item_id FROM point_items WHERE point_id = ?1 ORDER BY position ASC",
    )?;

    let rows = stmt.query_map(params![point_id], |row| row.get::<_, i64>(0))?;

    let mut ids = Vec::new();
    for row in rows {
        ids.push(row?);
    }
    Ok(ids)
}

/// Map a `rusqlite::Row` to a [`Point`].  `items` is filled in separately.
fn row_to_point(row: &rusqlite::Row<'_>) -> rusqlite::Result<Point> {
    let created_str: String = row.get(8)?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Point {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        whatsapp: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
        city: row.get(6)?,
        uf: row.get(7)?,
        items: Vec::new(),
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_point(city: &str, uf: &str, items: Vec<i64>) -> NewPoint {
        NewPoint {
            name: "Ecoponto".into(),
            email: "eco@ponto.org".into(),
            whatsapp: "11988887777".into(),
            city: city.into(),
            uf: uf.into(),
            latitude: -23.5,
            longitude: -46.6,
            items,
        }
    }

    fn count(db: &Database, table: &str) -> i64 {
        db.conn()
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let mut db = Database::open_in_memory().unwrap();
        let created = db.create_point(&new_point("São Paulo", "SP", vec![3, 1])).unwrap();

        let fetched = db.get_point(created.id).unwrap();
        assert_eq!(fetched.name, "Ecoponto");
        assert_eq!(fetched.city, "São Paulo");
        assert_eq!(fetched.items, vec![3, 1]);
        assert_eq!(fetched.created_at.timestamp(), created.created_at.timestamp());

        let titles: Vec<String> = db
            .list_items_for_point(created.id)
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["Papéis e Papelão", "Lâmpadas"]);
    }

    #[test]
    fn test_unknown_items_write_nothing() {
        let mut db = Database::open_in_memory().unwrap();
        let err = db
            .create_point(&new_point("Recife", "PE", vec![1, 99, 100]))
            .unwrap_err();

        assert!(matches!(err, StoreError::UnknownItems(ref ids) if ids == &vec![99, 100]));
        assert_eq!(count(&db, "points"), 0);
        assert_eq!(count(&db, "point_items"), 0);
    }

    #[test]
    fn test_get_missing_point() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(db.get_point(1), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_list_points_filters() {
        let mut db = Database::open_in_memory().unwrap();
        let sp_lamps = db.create_point(&new_point("São Paulo", "SP", vec![1, 2])).unwrap();
        let sp_oil = db.create_point(&new_point("São Paulo", "SP", vec![6])).unwrap();
        let rj_lamps = db.create_point(&new_point("Rio de Janeiro", "RJ", vec![1])).unwrap();

        let all = db.list_points(&PointFilter::default()).unwrap();
        assert_eq!(all.len(), 3);

        let sp = db
            .list_points(&PointFilter {
                uf: Some("SP".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(
            sp.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![sp_lamps.id, sp_oil.id]
        );

        let lamps_in_sp = db
            .list_points(&PointFilter {
                city: Some("São Paulo".into()),
                uf: Some("SP".into()),
                items: vec![1],
            })
            .unwrap();
        assert_eq!(lamps_in_sp.len(), 1);
        assert_eq!(lamps_in_sp[0].id, sp_lamps.id);
        assert_eq!(lamps_in_sp[0].items, vec![1, 2]);

        let lamps_anywhere = db
            .list_points(&PointFilter {
                items: vec![1, 2],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(
            lamps_anywhere.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![sp_lamps.id, rj_lamps.id]
        );
    }
}
