//! Embedded schema, applied on connect. `follows` deliberately carries no
//! uniqueness constraint on the pair; the client guards duplicates itself.

pub(crate) const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY AUTOINCREMENT,
        handle TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS sessions (
        token_hash BLOB PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users (user_id) ON DELETE CASCADE,
        created_at TEXT NOT NULL,
        expires_after_seconds INTEGER
    );

    CREATE TABLE IF NOT EXISTS "groups" (
        group_id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS posts (
        post_id INTEGER PRIMARY KEY AUTOINCREMENT,
        author_id INTEGER NOT NULL REFERENCES users (user_id) ON DELETE CASCADE,
        group_id INTEGER REFERENCES "groups" (group_id) ON DELETE SET NULL,
        text TEXT NOT NULL,
        image TEXT,
        published_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS posts_by_recency
        ON posts (published_at DESC, post_id DESC);

    CREATE TABLE IF NOT EXISTS comments (
        comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id INTEGER NOT NULL REFERENCES posts (post_id) ON DELETE CASCADE,
        author_id INTEGER NOT NULL REFERENCES users (user_id) ON DELETE CASCADE,
        text TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS follows (
        user_id INTEGER NOT NULL REFERENCES users (user_id) ON DELETE CASCADE,
        author_id INTEGER NOT NULL REFERENCES users (user_id) ON DELETE CASCADE
    );
"#;
