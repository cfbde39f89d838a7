use rusqlite::{params, Connection, OptionalExtension, Row};

use picfeed_types::{Comment, NewComment};

use crate::db::rows::timestamp;
use crate::db::{DbPool, StoreError, StoreResult};

pub struct CommentRepository {
    pool: DbPool,
}

fn map_comment(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        content: row.get(1)?,
        user_id: row.get(2)?,
        post_id: row.get(3)?,
        created_at: timestamp(row, 4)?,
        updated_at: timestamp(row, 5)?,
    })
}

fn fetch(conn: &Connection, comment_id: i64) -> rusqlite::Result<Option<Comment>> {
    conn.query_row(
        "SELECT id, content, user_id, post_id, created_at, updated_at FROM comments WHERE id = ?",
        [comment_id],
        map_comment,
    )
    .optional()
}

impl CommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create(&self, new_comment: &NewComment) -> StoreResult<Comment> {
        let conn = self.pool.get()?;
        let comment = conn.query_row(
            "INSERT INTO comments (content, user_id, post_id) VALUES (?1, ?2, ?3)
             RETURNING id, content, user_id, post_id, created_at, updated_at",
            params![new_comment.content, new_comment.user_id, new_comment.post_id],
            map_comment,
        )?;
        tracing::debug!(
            "User {} commented on post {} (comment {})",
            comment.user_id,
            comment.post_id,
            comment.id
        );
        Ok(comment)
    }

    pub fn get_by_id(&self, comment_id: i64) -> StoreResult<Option<Comment>> {
        let conn = self.pool.get()?;
        Ok(fetch(&conn, comment_id)?)
    }

    /// Comments on a post, oldest first
    pub fn get_by_post(&self, post_id: i64) -> StoreResult<Vec<Comment>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, content, user_id, post_id, created_at, updated_at
             FROM comments
             WHERE post_id = ?
             ORDER BY created_at ASC, id ASC",
        )?;
        let comments = stmt
            .query_map([post_id], map_comment)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(comments)
    }

    /// Comments written by a user, newest first
    pub fn get_by_user(&self, user_id: i64) -> StoreResult<Vec<Comment>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, content, user_id, post_id, created_at, updated_at
             FROM comments
             WHERE user_id = ?
             ORDER BY created_at DESC, id DESC",
        )?;
        let comments = stmt
            .query_map([user_id], map_comment)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(comments)
    }

    pub fn list_all(&self) -> StoreResult<Vec<Comment>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, content, user_id, post_id, created_at, updated_at FROM comments ORDER BY id",
        )?;
        let comments = stmt
            .query_map([], map_comment)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(comments)
    }

    pub fn update_content(&self, comment_id: i64, content: &str) -> StoreResult<Comment> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "UPDATE comments SET content = ?1 WHERE id = ?2",
            params![content, comment_id],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found("comment", comment_id));
        }
        fetch(&conn, comment_id)?.ok_or(StoreError::not_found("comment", comment_id))
    }

    pub fn delete(&self, comment_id: i64) -> StoreResult<()> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM comments WHERE id = ?", [comment_id])?;
        if rows == 0 {
            return Err(StoreError::not_found("comment", comment_id));
        }
        Ok(())
    }
}
