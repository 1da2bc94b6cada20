//! Hero Storage
//! Mission: Persist user-owned hero teams with SQLite
//!
//! Every query is scoped by the owning user id. The UNIQUE(user_id, name)
//! index backs the one-hero-per-name-per-team invariant at the storage
//! layer, so a create that loses the check-then-insert race fails with a
//! constraint violation instead of producing a duplicate.

use crate::heroes::models::{Hero, NewHero};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::info;

/// Hero storage with SQLite backend
pub struct HeroStore {
    db_path: String,
}

impl HeroStore {
    /// Create a new hero store and initialize database
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
            "CREATE TABLE IF NOT EXISTS heroes_team (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                ability TEXT NOT NULL,
                level INTEGER NOT NULL DEFAULT 1,
                category TEXT NOT NULL DEFAULT 'Hero',
                origin TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(user_id, name)
            )",
            [],
        )?;

        Ok(())
    }

    /// Add a hero to a user's team
    pub fn create(&self, user_id: i64, hero: NewHero) -> Result<Hero> {
        let now = Utc::now().to_rfc3339();

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO heroes_team (user_id, name, ability, level, category, origin, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                user_id,
                hero.name,
                hero.ability,
                hero.level,
                hero.category,
                hero.origin,
                now,
                now,
            ],
        )
        .context("Failed to insert hero")?;

        let id = conn.last_insert_rowid();

        info!("🦸 Hero added: {} (user {})", hero.name, user_id);

        Ok(Hero {
            id,
            user_id,
            name: hero.name,
            ability: hero.ability,
            level: hero.level,
            category: hero.category,
            origin: hero.origin,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// List a user's team, strongest first; creation order breaks level ties
    pub fn list_by_owner(&self, user_id: i64) -> Result<Vec<Hero>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, ability, level, category, origin, created_at, updated_at
             FROM heroes_team WHERE user_id = ?1
             ORDER BY level DESC, created_at ASC, id ASC",
        )?;

        let heroes = stmt
            .query_map(params![user_id], hero_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(heroes)
    }

    /// Fetch a hero by id, only if owned by the given user
    pub fn get_by_owner(&self, user_id: i64, id: i64) -> Result<Option<Hero>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, ability, level, category, origin, created_at, updated_at
             FROM heroes_team WHERE id = ?1 AND user_id = ?2",
        )?;

        let hero = stmt.query_row(params![id, user_id], hero_from_row);

        match hero {
            Ok(hero) => Ok(Some(hero)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a hero on a user's team by name
    pub fn find_by_owner_and_name(&self, user_id: i64, name: &str) -> Result<Option<Hero>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, user_id, name, ability, level, category, origin, created_at, updated_at
             FROM heroes_team WHERE user_id = ?1 AND name = ?2",
        )?;

        let hero = stmt.query_row(params![user_id, name], hero_from_row);

        match hero {
            Ok(hero) => Ok(Some(hero)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite a hero's fields and bump updated_at. The ownership predicate
    /// lives in the WHERE clause, so the mutation itself can never touch
    /// another user's record. Returns false when no owned row matched.
    pub fn update(&self, user_id: i64, id: i64, hero: &NewHero) -> Result<bool> {
        let now = Utc::now().to_rfc3339();

        let conn = Connection::open(&self.db_path)?;
        let rows = conn
            .execute(
                "UPDATE heroes_team
                 SET name = ?1, ability = ?2, level = ?3, category = ?4, origin = ?5, updated_at = ?6
                 WHERE id = ?7 AND user_id = ?8",
                params![
                    hero.name,
                    hero.ability,
                    hero.level,
                    hero.category,
                    hero.origin,
                    now,
                    id,
                    user_id,
                ],
            )
            .context("Failed to update hero")?;

        Ok(rows > 0)
    }

    /// Remove a hero from a user's team. Returns false when no owned row matched.
    pub fn delete(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows = conn.execute(
            "DELETE FROM heroes_team WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        if rows > 0 {
            info!("🗑️  Hero removed: id {} (user {})", id, user_id);
        }

        Ok(rows > 0)
    }
}

fn hero_from_row(row: &Row<'_>) -> rusqlite::Result<Hero> {
    Ok(Hero {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        ability: row.get(3)?,
        level: row.get(4)?,
        category: row.get(5)?,
        origin: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// True when a store error is a SQLite uniqueness violation, so handlers can
/// map a lost create race to a conflict instead of an internal error.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
