use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::Value;
use std::io::Write;

use picfeed_store::db::repositories::{
    CommentRepository, FollowerRepository, LikeRepository, MediaRepository, PostRepository,
    SavedPostRepository, UserRepository,
};
use picfeed_store::Database;
use picfeed_types::{Comment, Follower, Like, Media, Post, SavedPost, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportTable {
    Users,
    Posts,
    Media,
    Comments,
    Followers,
    Likes,
    SavedPosts,
}

/// Write the public projection of every row in `table` as JSON lines.
/// Returns the number of rows written.
pub fn export_table<W: Write>(db: &Database, table: ExportTable, out: &mut W) -> Result<usize> {
    let pool = db.pool.clone();
    let rows: Vec<Value> = match table {
        ExportTable::Users => UserRepository::new(pool)
            .list_all()?
            .iter()
            .map(User::to_json)
            .collect::<serde_json::Result<Vec<_>>>()?,
        ExportTable::Posts => PostRepository::new(pool)
            .list_all()?
            .iter()
            .map(Post::to_json)
            .collect::<serde_json::Result<Vec<_>>>()?,
        ExportTable::Media => MediaRepository::new(pool)
            .list_all()?
            .iter()
            .map(Media::to_json)
            .collect::<serde_json::Result<Vec<_>>>()?,
        ExportTable::Comments => CommentRepository::new(pool)
            .list_all()?
            .iter()
            .map(Comment::to_json)
            .collect::<serde_json::Result<Vec<_>>>()?,
        ExportTable::Followers => FollowerRepository::new(pool)
            .list_all()?
            .iter()
            .map(Follower::to_json)
            .collect::<serde_json::Result<Vec<_>>>()?,
        ExportTable::Likes => LikeRepository::new(pool)
            .list_all()?
            .iter()
            .map(Like::to_json)
            .collect::<serde_json::Result<Vec<_>>>()?,
        ExportTable::SavedPosts => SavedPostRepository::new(pool)
            .list_all()?
            .iter()
            .map(SavedPost::to_json)
            .collect::<serde_json::Result<Vec<_>>>()?,
    };

    for row in &rows {
        writeln!(out, "{}", row).context("Failed to write export row")?;
    }
    tracing::info!("Exported {} rows from {:?}", rows.len(), table);
    Ok(rows.len())
}
