// src/persona/store.rs
// Persona persistence: the store seam and its SQLite implementation
// Timestamps are stored as Unix seconds, style and achievements as JSON text

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use uuid::Uuid;

use super::{NewPersona, Persona, Timeframe};

#[async_trait]
pub trait PersonaStore: Send + Sync {
    /// Insert a single persona and return the row as stored. The write is
    /// all-or-nothing.
    async fn insert(&self, persona: NewPersona) -> Result<Persona>;

    /// Cheap connectivity check for health probes.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
pub struct SqlitePersonaStore {
    pool: SqlitePool,
}

impl SqlitePersonaStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply the bundled schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run persona migrations")?;
        Ok(())
    }
}

#[async_trait]
impl PersonaStore for SqlitePersonaStore {
    async fn insert(&self, persona: NewPersona) -> Result<Persona> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().timestamp();
        let style = serde_json::to_string(&persona.communication_style)
            .context("Failed to encode communication style")?;
        let achievements = serde_json::to_string(&persona.achievements)
            .context("Failed to encode achievements")?;

        let row = sqlx::query(
            r#"
            INSERT INTO personas
                (id, user_id, timeframe, system_prompt, personality_summary,
                 communication_style, achievements, created_at, last_updated)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&persona.user_id)
        .bind(persona.timeframe.token())
        .bind(&persona.system_prompt)
        .bind(&persona.personality_summary)
        .bind(&style)
        .bind(&achievements)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert persona")?;

        persona_from_row(&row)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }
}

fn persona_from_row(row: &SqliteRow) -> Result<Persona> {
    let timeframe: String = row.try_get("timeframe")?;
    let style: String = row.try_get("communication_style")?;
    let achievements: String = row.try_get("achievements")?;

    Ok(Persona {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        timeframe: Timeframe::from(timeframe),
        system_prompt: row.try_get("system_prompt")?,
        personality_summary: row.try_get("personality_summary")?,
        communication_style: serde_json::from_str(&style)
            .context("Stored communication style is not valid JSON")?,
        achievements: serde_json::from_str(&achievements)
            .context("Stored achievements are not valid JSON")?,
        created_at: timestamp(row.try_get("created_at")?)?,
        last_updated: timestamp(row.try_get("last_updated")?)?,
    })
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).with_context(|| format!("Invalid timestamp: {secs}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::CommunicationStyle;
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_store() -> SqlitePersonaStore {
        // One connection: every in-memory connection is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let store = SqlitePersonaStore::new(pool);
        store.migrate().await.unwrap();
        store
    }

    fn new_persona(user_id: &str) -> NewPersona {
        NewPersona {
            user_id: user_id.to_string(),
            timeframe: Timeframe::from("someday"),
            system_prompt: "prompt".to_string(),
            personality_summary: "summary".to_string(),
            communication_style: CommunicationStyle(json!({ "tone": "warm", "emoji": false })),
            achievements: Vec::new(),
        }
    }

    async fn row_count(store: &SqlitePersonaStore) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM personas")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        count
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let store = test_store().await;

        let persona = store.insert(new_persona("u1")).await.unwrap();

        assert!(Uuid::parse_str(&persona.id).is_ok());
        assert_eq!(persona.user_id, "u1");
        assert_eq!(persona.timeframe.token(), "someday");
        assert_eq!(persona.communication_style.0, json!({ "tone": "warm", "emoji": false }));
        assert!(persona.achievements.is_empty());
        assert_eq!(persona.created_at, persona.last_updated);
        assert_eq!(row_count(&store).await, 1);
    }

    #[tokio::test]
    async fn test_each_insert_gets_new_id() {
        let store = test_store().await;

        let a = store.insert(new_persona("u1")).await.unwrap();
        let b = store.insert(new_persona("u1")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(row_count(&store).await, 2);
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_no_row() {
        let store = test_store().await;
        sqlx::query("DROP TABLE personas").execute(&store.pool).await.unwrap();
        sqlx::query("CREATE TABLE personas (id TEXT PRIMARY KEY, user_id TEXT NOT NULL CHECK (user_id <> 'blocked'), timeframe TEXT, system_prompt TEXT, personality_summary TEXT, communication_style TEXT, achievements TEXT, created_at INTEGER, last_updated INTEGER)")
            .execute(&store.pool)
            .await
            .unwrap();

        let err = store.insert(new_persona("blocked")).await.unwrap_err();

        assert!(format!("{err:#}").contains("Failed to insert persona"));
        assert_eq!(row_count(&store).await, 0);
    }

    #[tokio::test]
    async fn test_ping() {
        let store = test_store().await;
        assert!(store.ping().await.is_ok());
    }
}
