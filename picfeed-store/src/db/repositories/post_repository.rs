use rusqlite::{params, Connection, OptionalExtension, Row};

use picfeed_types::{NewPost, Post};

use crate::db::rows::timestamp;
use crate::db::{DbPool, StoreError, StoreResult};

pub struct PostRepository {
    pool: DbPool,
}

fn map_post(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        caption: row.get(1)?,
        user_id: row.get(2)?,
        created_at: timestamp(row, 3)?,
        updated_at: timestamp(row, 4)?,
    })
}

fn fetch(conn: &Connection, post_id: i64) -> rusqlite::Result<Option<Post>> {
    conn.query_row(
        "SELECT id, caption, user_id, created_at, updated_at FROM posts WHERE id = ?",
        [post_id],
        map_post,
    )
    .optional()
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post. The owning user must exist.
    pub fn create(&self, new_post: &NewPost) -> StoreResult<Post> {
        let conn = self.pool.get()?;
        let post = conn.query_row(
            "INSERT INTO posts (caption, user_id) VALUES (?1, ?2)
             RETURNING id, caption, user_id, created_at, updated_at",
            params![new_post.caption, new_post.user_id],
            map_post,
        )?;
        tracing::debug!("Created post {} for user {}", post.id, post.user_id);
        Ok(post)
    }

    /// Get a single post by ID
    pub fn get_by_id(&self, post_id: i64) -> StoreResult<Option<Post>> {
        let conn = self.pool.get()?;
        Ok(fetch(&conn, post_id)?)
    }

    /// Posts owned by a user, newest first
    pub fn get_by_user(&self, user_id: i64) -> StoreResult<Vec<Post>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, caption, user_id, created_at, updated_at
             FROM posts
             WHERE user_id = ?
             ORDER BY created_at DESC, id DESC",
        )?;
        let posts = stmt
            .query_map([user_id], map_post)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    pub fn list_all(&self) -> StoreResult<Vec<Post>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, caption, user_id, created_at, updated_at FROM posts ORDER BY id",
        )?;
        let posts = stmt
            .query_map([], map_post)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    /// Replace the caption. `updated_at` is refreshed by the schema trigger.
    pub fn update_caption(&self, post_id: i64, caption: Option<&str>) -> StoreResult<Post> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "UPDATE posts SET caption = ?1 WHERE id = ?2",
            params![caption, post_id],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found("post", post_id));
        }
        fetch(&conn, post_id)?.ok_or(StoreError::not_found("post", post_id))
    }

    /// Delete a post. Rejected while media, comments, likes, or saved
    /// references still point at it.
    pub fn delete(&self, post_id: i64) -> StoreResult<()> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM posts WHERE id = ?", [post_id])?;
        if rows == 0 {
            return Err(StoreError::not_found("post", post_id));
        }
        tracing::debug!("Deleted post {}", post_id);
        Ok(())
    }
}
