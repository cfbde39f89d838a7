use rusqlite::{params, Connection, OptionalExtension, Row};

use picfeed_types::{Media, NewMedia};

use crate::db::rows::timestamp;
use crate::db::{DbPool, StoreError, StoreResult};

pub struct MediaRepository {
    pool: DbPool,
}

fn map_media(row: &Row<'_>) -> rusqlite::Result<Media> {
    Ok(Media {
        id: row.get(0)?,
        url: row.get(1)?,
        media_type: row.get(2)?,
        post_id: row.get(3)?,
        created_at: timestamp(row, 4)?,
        updated_at: timestamp(row, 5)?,
    })
}

fn fetch(conn: &Connection, media_id: i64) -> rusqlite::Result<Option<Media>> {
    conn.query_row(
        "SELECT id, url, type, post_id, created_at, updated_at FROM media WHERE id = ?",
        [media_id],
        map_media,
    )
    .optional()
}

impl MediaRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Attach media to a post. `media_type` is stored as given.
    pub fn create(&self, new_media: &NewMedia) -> StoreResult<Media> {
        let conn = self.pool.get()?;
        let media = conn.query_row(
            "INSERT INTO media (url, type, post_id) VALUES (?1, ?2, ?3)
             RETURNING id, url, type, post_id, created_at, updated_at",
            params![new_media.url, new_media.media_type, new_media.post_id],
            map_media,
        )?;
        tracing::debug!("Attached {} media {} to post {}", media.media_type, media.id, media.post_id);
        Ok(media)
    }

    pub fn get_by_id(&self, media_id: i64) -> StoreResult<Option<Media>> {
        let conn = self.pool.get()?;
        Ok(fetch(&conn, media_id)?)
    }

    /// Media attached to a post, in upload order
    pub fn get_by_post(&self, post_id: i64) -> StoreResult<Vec<Media>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, url, type, post_id, created_at, updated_at
             FROM media
             WHERE post_id = ?
             ORDER BY id",
        )?;
        let media = stmt
            .query_map([post_id], map_media)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(media)
    }

    pub fn list_all(&self) -> StoreResult<Vec<Media>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, url, type, post_id, created_at, updated_at FROM media ORDER BY id",
        )?;
        let media = stmt
            .query_map([], map_media)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(media)
    }

    pub fn update(&self, media_id: i64, url: &str, media_type: &str) -> StoreResult<Media> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "UPDATE media SET url = ?1, type = ?2 WHERE id = ?3",
            params![url, media_type, media_id],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found("media", media_id));
        }
        fetch(&conn, media_id)?.ok_or(StoreError::not_found("media", media_id))
    }

    pub fn delete(&self, media_id: i64) -> StoreResult<()> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM media WHERE id = ?", [media_id])?;
        if rows == 0 {
            return Err(StoreError::not_found("media", media_id));
        }
        Ok(())
    }
}
