//! Item Storage
//! Mission: Persist user-owned items with SQLite
//!
//! Every query is scoped by the owning user id.

use crate::items::models::Item;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::info;

/// Field set handed to the store on create and update
#[derive(Debug)]
pub struct ItemFields {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
}

/// Item storage with SQLite backend
pub struct ItemStore {
    db_path: String,
}

impl ItemStore {
    /// Create a new item store and initialize database
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                status TEXT NOT NULL DEFAULT 'active',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Create an item owned by the given user
    pub fn create(&self, user_id: i64, fields: ItemFields) -> Result<Item> {
        let now = Utc::now().to_rfc3339();

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO items (user_id, title, description, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user_id,
                fields.title,
                fields.description,
                fields.status,
                now,
                now,
            ],
        )
        .context("Failed to insert item")?;

        let id = conn.last_insert_rowid();

        info!("📦 Item created: {} (user {})", fields.title, user_id);

        Ok(Item {
            id,
            user_id,
            title: fields.title,
            description: fields.description,
            status: fields.status,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// List a user's items, most recently created first
    pub fn list_by_owner(&self, user_id: i64) -> Result<Vec<Item>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, user_id, title, description, status, created_at, updated_at
             FROM items WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC",
        )?;

        let items = stmt
            .query_map(params![user_id], item_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Fetch an item by id, only if owned by the given user
    pub fn get_by_owner(&self, user_id: i64, id: i64) -> Result<Option<Item>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, user_id, title, description, status, created_at, updated_at
             FROM items WHERE id = ?1 AND user_id = ?2",
        )?;

        let item = stmt.query_row(params![id, user_id], item_from_row);

        match item {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite an item's fields and bump updated_at. The ownership predicate
    /// lives in the WHERE clause. Returns false when no owned row matched.
    pub fn update(&self, user_id: i64, id: i64, fields: &ItemFields) -> Result<bool> {
        let now = Utc::now().to_rfc3339();

        let conn = Connection::open(&self.db_path)?;
        let rows = conn
            .execute(
                "UPDATE items
                 SET title = ?1, description = ?2, status = ?3, updated_at = ?4
                 WHERE id = ?5 AND user_id = ?6",
                params![
                    fields.title,
                    fields.description,
                    fields.status,
                    now,
                    id,
                    user_id,
                ],
            )
            .context("Failed to update item")?;

        Ok(rows > 0)
    }

    /// Delete a user's item. Returns false when no owned row matched.
    pub fn delete(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows = conn.execute(
            "DELETE FROM items WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        if rows > 0 {
            info!("🗑️  Item deleted: id {} (user {})", id, user_id);
        }

        Ok(rows > 0)
    }
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
