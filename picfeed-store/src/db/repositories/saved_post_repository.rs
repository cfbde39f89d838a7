use rusqlite::{params, OptionalExtension, Row};

use picfeed_types::{NewSavedPost, SavedPost};

use crate::db::rows::timestamp;
use crate::db::{DbPool, StoreError, StoreResult};

pub struct SavedPostRepository {
    pool: DbPool,
}

fn map_saved_post(row: &Row<'_>) -> rusqlite::Result<SavedPost> {
    Ok(SavedPost {
        id: row.get(0)?,
        user_id: row.get(1)?,
        post_id: row.get(2)?,
        created_at: timestamp(row, 3)?,
    })
}

impl SavedPostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create(&self, saved: &NewSavedPost) -> StoreResult<SavedPost> {
        let conn = self.pool.get()?;
        let saved_post = conn.query_row(
            "INSERT INTO saved_posts (user_id, post_id) VALUES (?1, ?2)
             RETURNING id, user_id, post_id, created_at",
            params![saved.user_id, saved.post_id],
            map_saved_post,
        )?;
        tracing::debug!("User {} saved post {}", saved_post.user_id, saved_post.post_id);
        Ok(saved_post)
    }

    pub fn get_by_id(&self, saved_post_id: i64) -> StoreResult<Option<SavedPost>> {
        let conn = self.pool.get()?;
        let saved_post = conn
            .query_row(
                "SELECT id, user_id, post_id, created_at FROM saved_posts WHERE id = ?",
                [saved_post_id],
                map_saved_post,
            )
            .optional()?;
        Ok(saved_post)
    }

    /// A user's saved collection, most recently saved first
    pub fn get_by_user(&self, user_id: i64) -> StoreResult<Vec<SavedPost>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, post_id, created_at
             FROM saved_posts
             WHERE user_id = ?
             ORDER BY created_at DESC, id DESC",
        )?;
        let saved = stmt
            .query_map([user_id], map_saved_post)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(saved)
    }

    pub fn get_by_post(&self, post_id: i64) -> StoreResult<Vec<SavedPost>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, post_id, created_at
             FROM saved_posts
             WHERE post_id = ?
             ORDER BY created_at DESC, id DESC",
        )?;
        let saved = stmt
            .query_map([post_id], map_saved_post)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(saved)
    }

    pub fn list_all(&self) -> StoreResult<Vec<SavedPost>> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare("SELECT id, user_id, post_id, created_at FROM saved_posts ORDER BY id")?;
        let saved = stmt
            .query_map([], map_saved_post)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(saved)
    }

    pub fn delete(&self, saved_post_id: i64) -> StoreResult<()> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM saved_posts WHERE id = ?", [saved_post_id])?;
        if rows == 0 {
            return Err(StoreError::not_found("saved post", saved_post_id));
        }
        Ok(())
    }
}
