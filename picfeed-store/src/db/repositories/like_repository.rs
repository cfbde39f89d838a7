use rusqlite::{params, OptionalExtension, Row};

use picfeed_types::{Like, NewLike};

use crate::db::rows::timestamp;
use crate::db::{DbPool, StoreError, StoreResult};

pub struct LikeRepository {
    pool: DbPool,
}

fn map_like(row: &Row<'_>) -> rusqlite::Result<Like> {
    Ok(Like {
        id: row.get(0)?,
        user_id: row.get(1)?,
        post_id: row.get(2)?,
        created_at: timestamp(row, 3)?,
    })
}

impl LikeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record a like. Liking the same post twice stores two rows.
    pub fn create(&self, new_like: &NewLike) -> StoreResult<Like> {
        let conn = self.pool.get()?;
        let like = conn.query_row(
            "INSERT INTO likes (user_id, post_id) VALUES (?1, ?2)
             RETURNING id, user_id, post_id, created_at",
            params![new_like.user_id, new_like.post_id],
            map_like,
        )?;
        tracing::debug!("User {} liked post {}", like.user_id, like.post_id);
        Ok(like)
    }

    pub fn get_by_id(&self, like_id: i64) -> StoreResult<Option<Like>> {
        let conn = self.pool.get()?;
        let like = conn
            .query_row(
                "SELECT id, user_id, post_id, created_at FROM likes WHERE id = ?",
                [like_id],
                map_like,
            )
            .optional()?;
        Ok(like)
    }

    pub fn get_by_post(&self, post_id: i64) -> StoreResult<Vec<Like>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, post_id, created_at
             FROM likes
             WHERE post_id = ?
             ORDER BY created_at DESC, id DESC",
        )?;
        let likes = stmt
            .query_map([post_id], map_like)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(likes)
    }

    pub fn get_by_user(&self, user_id: i64) -> StoreResult<Vec<Like>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, post_id, created_at
             FROM likes
             WHERE user_id = ?
             ORDER BY created_at DESC, id DESC",
        )?;
        let likes = stmt
            .query_map([user_id], map_like)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(likes)
    }

    pub fn list_all(&self) -> StoreResult<Vec<Like>> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare("SELECT id, user_id, post_id, created_at FROM likes ORDER BY id")?;
        let likes = stmt
            .query_map([], map_like)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(likes)
    }

    pub fn delete(&self, like_id: i64) -> StoreResult<()> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM likes WHERE id = ?", [like_id])?;
        if rows == 0 {
            return Err(StoreError::not_found("like", like_id));
        }
        Ok(())
    }
}
