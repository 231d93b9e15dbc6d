// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Data access layer.
//!
//! This module handles all interactions with the SQLite database: opening
//! configured connections, creating and dropping the schema, and emptying the
//! catalogue before a re-import. Queries against the catalogue itself live in
//! [`repository::SqliteRepository`].
//!
//! # Tables
//!
//! * `users` - Registered users, unique by case-insensitive name.
//! * `artists` - Artists keyed by their catalogue id.
//! * `albums` - Albums keyed by their catalogue id.
//! * `genres` - Genres keyed by their catalogue id.
//! * `tracks` - Tracks, optionally linked to an artist and an album.
//! * `track_genres` - Many-to-many association between tracks and genres.
//! * `user_review` - Reviews of tracks, optionally linked to a user.
//!
//! # Performance
//!
//! Most queries use [`rusqlite::Connection::prepare_cached`] to reduce SQL
//! parsing overhead.

mod model;
pub(crate) mod repository;

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Tables in dependency order, parents first.
const TABLES: [&str; 7] = [
    "users",
    "artists",
    "albums",
    "genres",
    "tracks",
    "track_genres",
    "user_review",
];

/// Opens a connection to the SQLite database and configures performance settings.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging for better concurrency.
/// * **Performance Tuning**: Sets synchronous mode to `NORMAL` and increases the cache size.
/// * **Constraints**: Enforces foreign key integrity.
///
/// The schema is left untouched; see [`create_schema`] and [`reset_schema`].
///
/// # Errors
///
/// Returns an error if:
/// * The database file cannot be opened.
/// * The initial PRAGMA configurations fail.
pub(crate) fn init_db(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA cache_size = -64000; -- Use 64MB of RAM for cache
    ",
    )?;

    conn.set_prepared_statement_cache_capacity(100);

    Ok(conn)
}

/// Returns `true` if any catalogue table already exists.
pub(crate) fn has_schema(conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;
    Ok(count > 0)
}

/// Create the database schema.
///
/// Every table is created only if it does not already exist, so this is also
/// how the mapping is restored on a database that was populated by an
/// earlier run.
///
/// It also sets up:
///
/// * **Foreign Key Constraints**: tracks reference artists and albums, reviews
///   reference tracks and users.
/// * **Performance Indices**: Indices on foreign keys to optimize join operations.
/// * **Uniqueness Constraints**: User names are unique regardless of case.
///
/// This operation is wrapped in a single SQL transaction to ensure the schema
/// is updated atomically.
///
/// # Errors
///
/// Returns an error if the transaction fails, if there are permission issues
/// with the database file, or if the SQL syntax is invalid.
pub(crate) fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            user_name TEXT NOT NULL COLLATE NOCASE UNIQUE,
            password TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS artists (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS albums (
            id INTEGER PRIMARY KEY,
            title TEXT,
            year INTEGER,
            url TEXT
        );

        CREATE TABLE IF NOT EXISTS genres (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tracks (
            id INTEGER PRIMARY KEY,
            title TEXT,
            artist_id INTEGER,
            album_id INTEGER,
            duration INTEGER,
            url TEXT,
            FOREIGN KEY (artist_id) REFERENCES artists (id),
            FOREIGN KEY (album_id) REFERENCES albums (id)
        );

        CREATE INDEX IF NOT EXISTS idx_tracks_artist_id ON tracks (artist_id);
        CREATE INDEX IF NOT EXISTS idx_tracks_album_id ON tracks (album_id);

        CREATE TABLE IF NOT EXISTS track_genres (
            track_id INTEGER NOT NULL,
            genre_id INTEGER NOT NULL,
            PRIMARY KEY (track_id, genre_id),
            FOREIGN KEY (track_id) REFERENCES tracks (id) ON DELETE CASCADE,
            FOREIGN KEY (genre_id) REFERENCES genres (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_track_genres_genre_id ON track_genres (genre_id);

        CREATE TABLE IF NOT EXISTS user_review (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            review TEXT NOT NULL,
            rating INTEGER NOT NULL,
            track_id INTEGER NOT NULL,
            user_id INTEGER,
            FOREIGN KEY (track_id) REFERENCES tracks (id),
            FOREIGN KEY (user_id) REFERENCES users (id)
        );

        CREATE INDEX IF NOT EXISTS idx_user_review_track_id ON user_review (track_id);

        COMMIT;",
    )
    .context("Failed to create schema")
}

/// Drops every catalogue table and creates the schema again.
pub(crate) fn reset_schema(conn: &Connection) -> Result<()> {
    let mut sql = String::from("BEGIN;");
    for table in TABLES.iter().rev() {
        sql.push_str(&format!("DROP TABLE IF EXISTS {table};"));
    }
    sql.push_str("COMMIT;");

    conn.execute_batch(&sql).context("Failed to drop schema")?;

    create_schema(conn)
}

/// Deletes every row from every catalogue table, children first.
pub(crate) fn clear_tables(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;

    for table in TABLES.iter().rev() {
        tx.execute(&format!("DELETE FROM {table}"), [])?;
    }

    tx.execute("DELETE FROM sqlite_sequence WHERE name = 'user_review'", [])?;

    tx.commit().context("Failed to clear tables")
}
