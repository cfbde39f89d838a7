use rusqlite::{params, OptionalExtension, Row};

use picfeed_types::{Follower, NewFollower};

use crate::db::rows::timestamp;
use crate::db::{DbPool, StoreError, StoreResult};

/// Follow edges between users.
///
/// The table has no uniqueness on (user_from, user_to) and does not stop a
/// user from following themselves; `follow` always inserts a new edge.
pub struct FollowerRepository {
    pool: DbPool,
}

fn map_follower(row: &Row<'_>) -> rusqlite::Result<Follower> {
    Ok(Follower {
        id: row.get(0)?,
        user_from: row.get(1)?,
        user_to: row.get(2)?,
        created_at: timestamp(row, 3)?,
    })
}

impl FollowerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record that `user_from` follows `user_to`
    pub fn follow(&self, edge: &NewFollower) -> StoreResult<Follower> {
        let conn = self.pool.get()?;
        let follower = conn.query_row(
            "INSERT INTO followers (user_from, user_to) VALUES (?1, ?2)
             RETURNING id, user_from, user_to, created_at",
            params![edge.user_from, edge.user_to],
            map_follower,
        )?;
        tracing::debug!("User {} followed user {}", follower.user_from, follower.user_to);
        Ok(follower)
    }

    pub fn get_by_id(&self, follower_id: i64) -> StoreResult<Option<Follower>> {
        let conn = self.pool.get()?;
        let follower = conn
            .query_row(
                "SELECT id, user_from, user_to, created_at FROM followers WHERE id = ?",
                [follower_id],
                map_follower,
            )
            .optional()?;
        Ok(follower)
    }

    /// Edges pointing at this user, newest first
    pub fn followers_of(&self, user_id: i64) -> StoreResult<Vec<Follower>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_from, user_to, created_at
             FROM followers
             WHERE user_to = ?
             ORDER BY created_at DESC, id DESC",
        )?;
        let edges = stmt
            .query_map([user_id], map_follower)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(edges)
    }

    /// Edges leaving this user, newest first
    pub fn following_of(&self, user_id: i64) -> StoreResult<Vec<Follower>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_from, user_to, created_at
             FROM followers
             WHERE user_from = ?
             ORDER BY created_at DESC, id DESC",
        )?;
        let edges = stmt
            .query_map([user_id], map_follower)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(edges)
    }

    pub fn list_all(&self) -> StoreResult<Vec<Follower>> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare("SELECT id, user_from, user_to, created_at FROM followers ORDER BY id")?;
        let edges = stmt
            .query_map([], map_follower)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(edges)
    }

    /// Remove a single edge by id
    pub fn delete(&self, follower_id: i64) -> StoreResult<()> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM followers WHERE id = ?", [follower_id])?;
        if rows == 0 {
            return Err(StoreError::not_found("follower", follower_id));
        }
        Ok(())
    }
}
