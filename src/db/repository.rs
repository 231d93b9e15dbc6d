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

//! SQLite-backed catalogue store.
//!
//! Each repository call issues one query, or one transaction when a track is
//! added together with its artist, album and genres. Lookups that expect at
//! most one row go through [`OptionalExtension::optional`], so an absent row
//! is reported as `None` rather than [`rusqlite::Error::QueryReturnedNoRows`].
//!
//! The repository owns at most one connection at a time. A session is opened
//! with [`Repository::begin_session`] and closed with
//! [`Repository::end_session`]; queries outside a session fail.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{
    db::{self, model::TRACK_COLUMNS},
    model::{Album, Artist, Genre, Review, Track, User, user::normalise_user_name},
    repository::{Repository, distinct_reviewers},
};

pub(crate) struct SqliteRepository {
    path: PathBuf,
    conn: Option<Connection>,
}

impl SqliteRepository {
    /// Creates a repository for the database at `path` with an open session.
    ///
    /// The schema must already exist.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let mut repo = Self {
            path: path.to_path_buf(),
            conn: None,
        };
        repo.begin_session()?;
        Ok(repo)
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().context("No open database session")
    }

    fn conn_mut(&mut self) -> Result<&mut Connection> {
        self.conn.as_mut().context("No open database session")
    }

    fn track_genres(&self, track_id: i64) -> Result<Vec<Genre>> {
        let sql = "
            SELECT g.id, g.name
            FROM track_genres tg
            JOIN genres g ON tg.genre_id = g.id
            WHERE tg.track_id = ?
            ORDER BY tg.rowid
        ";

        let mut stmt = self.conn()?.prepare_cached(sql)?;
        let genres = stmt
            .query_map([track_id], Genre::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(genres)
    }

    /// Fetches every track association in one query, grouped by track id.
    fn all_track_genres(&self) -> Result<HashMap<i64, Vec<Genre>>> {
        let sql = "
            SELECT tg.track_id, g.id, g.name
            FROM track_genres tg
            JOIN genres g ON tg.genre_id = g.id
            ORDER BY tg.rowid
        ";

        let mut stmt = self.conn()?.prepare_cached(sql)?;
        let rows = stmt.query_map([], |row| {
            let track_id: i64 = row.get(0)?;
            let name: String = row.get(2)?;
            Ok((track_id, row.get::<_, i64>(1)?, name))
        })?;

        let mut genres: HashMap<i64, Vec<Genre>> = HashMap::new();
        for row in rows {
            let (track_id, genre_id, name) = row?;
            genres
                .entry(track_id)
                .or_default()
                .push(Genre::new(genre_id, &name)?);
        }
        Ok(genres)
    }

    fn user_by_id(&self, id: i64) -> Result<Option<User>> {
        let mut stmt = self
            .conn()?
            .prepare_cached("SELECT id, user_name, password FROM users WHERE id = ?")?;
        Ok(stmt.query_row([id], User::from_row).optional()?)
    }

    fn select_reviews(&self, track_id: Option<i64>) -> Result<Vec<Review>> {
        let sql = match track_id {
            Some(_) => {
                "SELECT id, review, rating, track_id, user_id FROM user_review WHERE track_id = ? ORDER BY id"
            }
            None => "SELECT id, review, rating, track_id, user_id FROM user_review ORDER BY id",
        };

        let rows = {
            let mut stmt = self.conn()?.prepare_cached(sql)?;
            match track_id {
                Some(id) => stmt.query_map([id], review_row)?.collect::<Result<Vec<_>, _>>()?,
                None => stmt.query_map([], review_row)?.collect::<Result<Vec<_>, _>>()?,
            }
        };

        let mut reviews = Vec::with_capacity(rows.len());
        for (id, text, rating, track_id, user_id) in rows {
            let track = self
                .get_track_by_id(track_id)?
                .with_context(|| format!("Review {} references missing track {}", id, track_id))?;

            let mut review = Review::new(track, &text, rating)?.with_id(id);
            if let Some(user_id) = user_id {
                if let Some(user) = self.user_by_id(user_id)? {
                    review = review.with_user(user);
                }
            }
            reviews.push(review);
        }

        Ok(reviews)
    }
}

/// Raw `user_review` columns: id, text, rating, track id, user id.
type ReviewRow = (i64, String, i64, i64, Option<i64>);

fn review_row(row: &Row) -> rusqlite::Result<ReviewRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

impl Repository for SqliteRepository {
    fn begin_session(&mut self) -> Result<()> {
        self.end_session();
        self.conn = Some(db::init_db(&self.path)?);
        Ok(())
    }

    fn end_session(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                tracing::warn!("Failed to close database session: {}", e);
            }
        }
    }

    fn add_user(&mut self, user: User) -> Result<()> {
        let mut stmt = self
            .conn()?
            .prepare_cached("INSERT INTO users (id, user_name, password) VALUES (?1, ?2, ?3)")?;
        stmt.execute(params![user.id(), user.user_name(), user.password_hash()])
            .with_context(|| format!("Failed to add user {}", user.user_name()))?;
        Ok(())
    }

    fn get_user(&self, user_name: &str) -> Result<Option<User>> {
        let mut stmt = self
            .conn()?
            .prepare_cached("SELECT id, user_name, password FROM users WHERE user_name = ?")?;
        Ok(stmt
            .query_row([normalise_user_name(user_name)], User::from_row)
            .optional()?)
    }

    fn get_number_of_users(&self) -> Result<usize> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
        Ok(usize::try_from(count)?)
    }

    fn add_artist(&mut self, artist: Artist) -> Result<()> {
        let mut stmt = self
            .conn()?
            .prepare_cached("INSERT INTO artists (id, name) VALUES (?1, ?2)")?;
        stmt.execute(params![artist.id(), artist.full_name])
            .with_context(|| format!("Failed to add artist {}", artist.id()))?;
        Ok(())
    }

    fn get_artist_by_id(&self, id: i64) -> Result<Option<Artist>> {
        let mut stmt = self
            .conn()?
            .prepare_cached("SELECT id, name FROM artists WHERE id = ?")?;
        Ok(stmt.query_row([id], Artist::from_row).optional()?)
    }

    fn get_artist_list(&self) -> Result<Vec<Artist>> {
        let mut stmt = self
            .conn()?
            .prepare_cached("SELECT id, name FROM artists ORDER BY id")?;
        let artists = stmt
            .query_map([], Artist::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(artists)
    }

    fn add_album(&mut self, album: Album) -> Result<()> {
        let mut stmt = self
            .conn()?
            .prepare_cached("INSERT INTO albums (id, title, year, url) VALUES (?1, ?2, ?3, ?4)")?;
        stmt.execute(params![album.id(), album.title, album.release_year, album.url])
            .with_context(|| format!("Failed to add album {}", album.id()))?;
        Ok(())
    }

    fn get_album_by_id(&self, id: i64) -> Result<Option<Album>> {
        let mut stmt = self
            .conn()?
            .prepare_cached("SELECT id, title, year, url FROM albums WHERE id = ?")?;
        Ok(stmt.query_row([id], Album::from_row).optional()?)
    }

    fn get_album_list(&self) -> Result<Vec<Album>> {
        let mut stmt = self
            .conn()?
            .prepare_cached("SELECT id, title, year, url FROM albums ORDER BY id")?;
        let albums = stmt
            .query_map([], Album::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(albums)
    }

    fn add_genre(&mut self, genre: Genre) -> Result<()> {
        let mut stmt = self
            .conn()?
            .prepare_cached("INSERT INTO genres (id, name) VALUES (?1, ?2)")?;
        stmt.execute(params![genre.id(), genre.name])
            .with_context(|| format!("Failed to add genre {}", genre.id()))?;
        Ok(())
    }

    fn get_genre_list(&self) -> Result<Vec<Genre>> {
        let mut stmt = self
            .conn()?
            .prepare_cached("SELECT id, name FROM genres ORDER BY id")?;
        let genres = stmt
            .query_map([], Genre::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(genres)
    }

    fn add_track(&mut self, track: Track) -> Result<()> {
        let tx = self.conn_mut()?.transaction()?;

        if let Some(artist) = track.artist() {
            tx.prepare_cached("INSERT OR IGNORE INTO artists (id, name) VALUES (?1, ?2)")?
                .execute(params![artist.id(), artist.full_name])?;
        }

        if let Some(album) = track.album() {
            tx.prepare_cached(
                "INSERT OR IGNORE INTO albums (id, title, year, url) VALUES (?1, ?2, ?3, ?4)",
            )?
            .execute(params![album.id(), album.title, album.release_year, album.url])?;
        }

        tx.prepare_cached(
            "INSERT INTO tracks (id, title, artist_id, album_id, duration, url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?
        .execute(params![
            track.id(),
            track.title(),
            track.artist().map(Artist::id),
            track.album().map(Album::id),
            track.duration(),
            track.url(),
        ])
        .with_context(|| format!("Failed to add track {}", track.id()))?;

        for genre in track.genres() {
            tx.prepare_cached("INSERT OR IGNORE INTO genres (id, name) VALUES (?1, ?2)")?
                .execute(params![genre.id(), genre.name])?;
            tx.prepare_cached("INSERT INTO track_genres (track_id, genre_id) VALUES (?1, ?2)")?
                .execute(params![track.id(), genre.id()])?;
        }

        tx.commit().context("Failed to commit track")
    }

    fn get_track_by_id(&self, id: i64) -> Result<Option<Track>> {
        let sql = format!(
            "SELECT {TRACK_COLUMNS}
             FROM tracks tr
             LEFT JOIN artists ar ON tr.artist_id = ar.id
             LEFT JOIN albums al ON tr.album_id = al.id
             WHERE tr.id = ?"
        );

        let track = {
            let mut stmt = self.conn()?.prepare_cached(&sql)?;
            stmt.query_row([id], Track::from_row).optional()?
        };

        let Some(mut track) = track else {
            return Ok(None);
        };
        for genre in self.track_genres(id)? {
            track.add_genre(genre);
        }

        Ok(Some(track))
    }

    fn get_num_tracks(&self) -> Result<usize> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM tracks", [], |r| r.get(0))?;
        Ok(usize::try_from(count)?)
    }

    fn get_track_list(&self) -> Result<Vec<Track>> {
        let sql = format!(
            "SELECT {TRACK_COLUMNS}
             FROM tracks tr
             LEFT JOIN artists ar ON tr.artist_id = ar.id
             LEFT JOIN albums al ON tr.album_id = al.id
             ORDER BY tr.id"
        );

        let mut tracks = {
            let mut stmt = self.conn()?.prepare_cached(&sql)?;
            stmt.query_map([], Track::from_row)?
                .collect::<Result<Vec<_>, _>>()?
        };
        let mut genres = self.all_track_genres()?;

        for track in &mut tracks {
            for genre in genres.remove(&track.id()).unwrap_or_default() {
                track.add_genre(genre);
            }
        }

        Ok(tracks)
    }

    fn add_review(&mut self, review: Review) -> Result<i64> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "INSERT INTO user_review (review, rating, track_id, user_id) VALUES (?1, ?2, ?3, ?4)",
        )?;
        stmt.execute(params![
            review.text(),
            review.rating(),
            review.track().id(),
            review.user().map(User::id),
        ])
        .with_context(|| format!("Failed to add review of track {}", review.track().id()))?;

        Ok(conn.last_insert_rowid())
    }

    fn get_review_list(&self) -> Result<Vec<Review>> {
        self.select_reviews(None)
    }

    fn get_reviews_by_track(&self, track_id: i64) -> Result<Vec<Review>> {
        self.select_reviews(Some(track_id))
    }

    fn get_users_by_track(&self, track_id: i64) -> Result<Vec<User>> {
        let reviews = self.select_reviews(Some(track_id))?;
        Ok(distinct_reviewers(&reviews))
    }
}

impl Drop for SqliteRepository {
    fn drop(&mut self) {
        self.end_session();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn open_repository(dir: &Path) -> SqliteRepository {
        let path = dir.join("music.db");
        let conn = db::init_db(&path).unwrap();
        db::create_schema(&conn).unwrap();
        drop(conn);
        SqliteRepository::open(&path).unwrap()
    }

    #[test]
    fn satisfies_repository_contract() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = open_repository(dir.path());
        testing::check_repository_contract(&mut repo);
    }

    #[test]
    fn duplicate_track_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = open_repository(dir.path());

        repo.add_track(testing::make_track(1)).unwrap();
        assert!(repo.add_track(testing::make_track(1)).is_err());
        assert_eq!(repo.get_num_tracks().unwrap(), 1);
    }

    #[test]
    fn duplicate_user_name_is_an_error_regardless_of_case() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = open_repository(dir.path());

        repo.add_user(User::new(1, "Andrew", "x").unwrap()).unwrap();
        assert!(repo.add_user(User::new(2, "ANDREW", "y").unwrap()).is_err());
    }

    #[test]
    fn queries_need_an_open_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = open_repository(dir.path());
        repo.add_track(testing::make_track(4)).unwrap();

        repo.end_session();
        let err = repo.get_num_tracks().unwrap_err();
        assert!(err.to_string().contains("No open database session"));

        repo.begin_session().unwrap();
        assert_eq!(repo.get_num_tracks().unwrap(), 1);
        assert!(repo.get_track_by_id(4).unwrap().is_some());
    }

    #[test]
    fn track_list_keeps_genres_per_track() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = open_repository(dir.path());

        let mut first = Track::new(1, "Food").unwrap();
        first.add_genre(Genre::new(21, "Hip-Hop").unwrap());
        let mut second = Track::new(2, "Spiritual Level").unwrap();
        second.add_genre(Genre::new(103, "Singer-Songwriter").unwrap());
        second.add_genre(Genre::new(76, "Experimental Pop").unwrap());
        repo.add_track(first).unwrap();
        repo.add_track(second).unwrap();
        repo.add_track(Track::new(3, "Silence").unwrap()).unwrap();

        let tracks = repo.get_track_list().unwrap();
        let names: Vec<Vec<&str>> = tracks
            .iter()
            .map(|t| t.genres().iter().map(|g| g.name.as_str()).collect())
            .collect();

        assert_eq!(
            names,
            vec![
                vec!["Hip-Hop"],
                vec!["Singer-Songwriter", "Experimental Pop"],
                vec![],
            ]
        );
    }
}
