use rusqlite::{params, Connection, OptionalExtension, Row};

use picfeed_types::{NewUser, Password, User};

use crate::db::{DbPool, StoreError, StoreResult};

pub struct UserRepository {
    pool: DbPool,
}

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password: Password::new(row.get::<_, String>(3)?),
        is_active: row.get(4)?,
    })
}

fn fetch(conn: &Connection, user_id: i64) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        "SELECT id, name, email, password, is_active FROM users WHERE id = ?",
        [user_id],
        map_user,
    )
    .optional()
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a user. Fails with `UniqueViolation` if the email is taken.
    pub fn create(&self, new_user: &NewUser) -> StoreResult<User> {
        let conn = self.pool.get()?;
        let user = conn.query_row(
            "INSERT INTO users (name, email, password, is_active)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, name, email, password, is_active",
            params![
                new_user.name,
                new_user.email,
                new_user.password.expose(),
                new_user.is_active,
            ],
            map_user,
        )?;
        tracing::debug!("Created user {}", user.id);
        Ok(user)
    }

    /// Get user by ID
    pub fn get_by_id(&self, user_id: i64) -> StoreResult<Option<User>> {
        let conn = self.pool.get()?;
        Ok(fetch(&conn, user_id)?)
    }

    /// Get user by email
    pub fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let conn = self.pool.get()?;
        let user = conn
            .query_row(
                "SELECT id, name, email, password, is_active FROM users WHERE email = ?",
                [email],
                map_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn list_all(&self) -> StoreResult<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare("SELECT id, name, email, password, is_active FROM users ORDER BY id")?;
        let users = stmt
            .query_map([], map_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Update the mutable profile fields of a user
    pub fn update(&self, user_id: i64, name: &str, email: &str, is_active: bool) -> StoreResult<User> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "UPDATE users SET name = ?1, email = ?2, is_active = ?3 WHERE id = ?4",
            params![name, email, is_active, user_id],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found("user", user_id));
        }
        fetch(&conn, user_id)?.ok_or(StoreError::not_found("user", user_id))
    }

    /// Replace the stored password. The value is written as given.
    pub fn update_password(&self, user_id: i64, password: &Password) -> StoreResult<()> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "UPDATE users SET password = ?1 WHERE id = ?2",
            params![password.expose(), user_id],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found("user", user_id));
        }
        Ok(())
    }

    /// Delete a user. Rejected while posts, comments, or edges still
    /// reference it.
    pub fn delete(&self, user_id: i64) -> StoreResult<()> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM users WHERE id = ?", [user_id])?;
        if rows == 0 {
            return Err(StoreError::not_found("user", user_id));
        }
        tracing::debug!("Deleted user {}", user_id);
        Ok(())
    }
}
