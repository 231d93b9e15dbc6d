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

//! Database row mapping for domain models.
//!
//! This module provides the conversion logic between raw SQLite result rows
//! and high-level domain models, ensuring type-safe extraction of model
//! attributes from database queries.
//!
//! Values that fail domain validation surface as
//! [`rusqlite::Error::FromSqlConversionFailure`] on the offending column.

use rusqlite::{Row, types::Type};

use crate::model::{Album, Artist, Genre, ModelError, Track, User};

/// Column list matching [`Track::from_row`], joined against `artists ar` and
/// `albums al`.
pub(super) const TRACK_COLUMNS: &str = "
    tr.id, tr.title, tr.duration, tr.url,
    ar.id, ar.name,
    al.id, al.title, al.year, al.url";

fn invalid(column: usize, e: ModelError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Integer, Box::new(e))
}

impl Artist {
    pub(super) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let name: String = row.get(1)?;
        Artist::new(row.get(0)?, &name).map_err(|e| invalid(0, e))
    }
}

impl Album {
    pub(super) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        album_at(row, 0)?
            .ok_or_else(|| rusqlite::Error::InvalidColumnType(0, "id".into(), Type::Null))
    }
}

impl Genre {
    pub(super) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let name: String = row.get(1)?;
        Genre::new(row.get(0)?, &name).map_err(|e| invalid(0, e))
    }
}

impl User {
    pub(super) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let user_name: String = row.get(1)?;
        let password: String = row.get(2)?;
        User::new(row.get(0)?, &user_name, &password).map_err(|e| invalid(1, e))
    }
}

impl Track {
    /// Maps an SQLite row selected with [`TRACK_COLUMNS`] to a [`Track`].
    ///
    /// The artist and album are `None` when the left joins found nothing.
    /// Genres are not part of the row and must be attached by the caller.
    ///
    /// # Errors
    ///
    /// Returns a [`rusqlite::Error`] if:
    /// * The row does not contain enough columns.
    /// * The data in a column cannot be converted to the required Rust type.
    pub(super) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let title: Option<String> = row.get(1)?;
        let mut track = Track::new(row.get(0)?, title.as_deref().unwrap_or_default())
            .map_err(|e| invalid(0, e))?;

        if let Some(duration) = row.get::<_, Option<i64>>(2)? {
            track.set_duration(duration).map_err(|e| invalid(2, e))?;
        }

        let url: Option<String> = row.get(3)?;
        track.set_url(url.as_deref());

        let artist_id: Option<i64> = row.get(4)?;
        let artist = match artist_id {
            Some(id) => {
                let name: String = row.get(5)?;
                Some(Artist::new(id, &name).map_err(|e| invalid(4, e))?)
            }
            None => None,
        };
        track.set_artist(artist);
        track.set_album(album_at(row, 6)?);

        Ok(track)
    }
}

/// Reads `(id, title, year, url)` starting at `start`, `None` for a null id.
fn album_at(row: &Row, start: usize) -> rusqlite::Result<Option<Album>> {
    let Some(id) = row.get::<_, Option<i64>>(start)? else {
        return Ok(None);
    };

    let title: Option<String> = row.get(start + 1)?;
    let mut album = Album::new(id, title.as_deref().unwrap_or_default())
        .map_err(|e| invalid(start, e))?;
    album.release_year = row.get(start + 2)?;
    album.url = row.get(start + 3)?;

    Ok(Some(album))
}
