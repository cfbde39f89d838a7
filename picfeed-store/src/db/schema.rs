/// SQL schema for the Picfeed database
/// Creates all tables with their foreign keys, column limits, and indexes.
///
/// Timestamps are RFC 3339 UTC text generated by SQLite. Edge tables
/// (followers, likes, saved_posts) have no uniqueness on their pair, and no
/// foreign key declares a cascade.
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL CHECK(length(name) <= 50),
    email TEXT NOT NULL UNIQUE CHECK(length(email) <= 120),
    password TEXT NOT NULL,
    is_active INTEGER NOT NULL CHECK(is_active IN (0, 1))
);

-- Posts table
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY,
    caption TEXT CHECK(caption IS NULL OR length(caption) <= 255),
    user_id INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    FOREIGN KEY (user_id) REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_posts_user_id ON posts(user_id);
CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at DESC);

-- Media attachments
CREATE TABLE IF NOT EXISTS media (
    id INTEGER PRIMARY KEY,
    url TEXT NOT NULL CHECK(length(url) <= 255),
    type TEXT NOT NULL CHECK(length(type) <= 50),
    post_id INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    FOREIGN KEY (post_id) REFERENCES posts(id)
);

CREATE INDEX IF NOT EXISTS idx_media_post_id ON media(post_id);

-- Comments table
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY,
    content TEXT NOT NULL CHECK(length(content) <= 255),
    user_id INTEGER NOT NULL,
    post_id INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (post_id) REFERENCES posts(id)
);

CREATE INDEX IF NOT EXISTS idx_comments_user_id ON comments(user_id);
CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments(post_id);

-- Follow edges (one-way, duplicates allowed)
CREATE TABLE IF NOT EXISTS followers (
    id INTEGER PRIMARY KEY,
    user_from INTEGER NOT NULL,
    user_to INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    FOREIGN KEY (user_from) REFERENCES users(id),
    FOREIGN KEY (user_to) REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_followers_user_from ON followers(user_from);
CREATE INDEX IF NOT EXISTS idx_followers_user_to ON followers(user_to);

-- Likes (duplicates allowed)
CREATE TABLE IF NOT EXISTS likes (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    post_id INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (post_id) REFERENCES posts(id)
);

CREATE INDEX IF NOT EXISTS idx_likes_user_id ON likes(user_id);
CREATE INDEX IF NOT EXISTS idx_likes_post_id ON likes(post_id);

-- Saved posts (duplicates allowed)
CREATE TABLE IF NOT EXISTS saved_posts (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    post_id INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (post_id) REFERENCES posts(id)
);

CREATE INDEX IF NOT EXISTS idx_saved_posts_user_id ON saved_posts(user_id);
CREATE INDEX IF NOT EXISTS idx_saved_posts_post_id ON saved_posts(post_id);

-- Refresh updated_at on modification. The WHEN guard keeps the trigger's own
-- UPDATE from re-firing it if recursive triggers are ever enabled.
CREATE TRIGGER IF NOT EXISTS trg_posts_updated_at
AFTER UPDATE ON posts
FOR EACH ROW WHEN NEW.updated_at = OLD.updated_at
BEGIN
    UPDATE posts SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS trg_media_updated_at
AFTER UPDATE ON media
FOR EACH ROW WHEN NEW.updated_at = OLD.updated_at
BEGIN
    UPDATE media SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS trg_comments_updated_at
AFTER UPDATE ON comments
FOR EACH ROW WHEN NEW.updated_at = OLD.updated_at
BEGIN
    UPDATE comments SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;
"#;

/// Demo data for development
/// - 3 users (ann, ben, cleo), one of them inactive
/// - posts with and without captions, each with media
/// - comments, likes, saved posts, and follow edges
pub const DEMO_DATA: &str = r#"
INSERT OR IGNORE INTO users (id, name, email, password, is_active) VALUES
    (1, 'Ann', 'ann@example.com', 'ann-password', 1),
    (2, 'Ben', 'ben@example.com', 'ben-password', 1),
    (3, 'Cleo', 'cleo@example.com', 'cleo-password', 0);

INSERT OR IGNORE INTO posts (id, caption, user_id, created_at, updated_at) VALUES
    (1, 'First light over the harbour', 1, '2024-01-10T07:30:00.000Z', '2024-01-10T07:30:00.000Z'),
    (2, NULL, 1, '2024-01-11T12:00:00.000Z', '2024-01-11T12:00:00.000Z'),
    (3, 'Street food tour, part one', 2, '2024-01-12T18:45:00.000Z', '2024-01-12T19:02:10.000Z');

INSERT OR IGNORE INTO media (id, url, type, post_id, created_at, updated_at) VALUES
    (1, 'https://cdn.example.com/u1/harbour.jpg', 'image', 1, '2024-01-10T07:30:00.000Z', '2024-01-10T07:30:00.000Z'),
    (2, 'https://cdn.example.com/u1/waves.mp4', 'video', 2, '2024-01-11T12:00:00.000Z', '2024-01-11T12:00:00.000Z'),
    (3, 'https://cdn.example.com/u2/noodles.jpg', 'image', 3, '2024-01-12T18:45:00.000Z', '2024-01-12T18:45:00.000Z');

INSERT OR IGNORE INTO comments (id, content, user_id, post_id, created_at, updated_at) VALUES
    (1, 'Gorgeous colours!', 2, 1, '2024-01-10T08:00:00.000Z', '2024-01-10T08:00:00.000Z'),
    (2, 'Where is this?', 3, 1, '2024-01-10T09:15:00.000Z', '2024-01-10T09:15:00.000Z'),
    (3, 'Need the address of that stall', 1, 3, '2024-01-12T20:00:00.000Z', '2024-01-12T20:00:00.000Z');

INSERT OR IGNORE INTO followers (id, user_from, user_to, created_at) VALUES
    (1, 2, 1, '2024-01-05T10:00:00.000Z'),
    (2, 3, 1, '2024-01-06T10:00:00.000Z'),
    (3, 1, 2, '2024-01-07T10:00:00.000Z');

INSERT OR IGNORE INTO likes (id, user_id, post_id, created_at) VALUES
    (1, 2, 1, '2024-01-10T08:01:00.000Z'),
    (2, 3, 1, '2024-01-10T09:16:00.000Z'),
    (3, 1, 3, '2024-01-12T20:01:00.000Z');

INSERT OR IGNORE INTO saved_posts (id, user_id, post_id, created_at) VALUES
    (1, 2, 1, '2024-01-10T08:02:00.000Z'),
    (2, 1, 3, '2024-01-12T20:02:00.000Z');
"#;

/// Tables in dependency order (parents first).
pub const TABLES: [&str; 7] = [
    "users",
    "posts",
    "media",
    "comments",
    "followers",
    "likes",
    "saved_posts",
];
