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

//! Raw rows of the two catalogue files.
//!
//! Every field is read as a string; interpretation happens in the importer.
//! Columns not named here are ignored and missing columns read as empty.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, de::DeserializeOwned};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawTrackRow {
    pub(crate) track_id: String,
    pub(crate) track_title: String,
    pub(crate) artist_id: String,
    pub(crate) artist_name: String,
    pub(crate) album_id: String,
    pub(crate) track_duration: String,
    pub(crate) track_url: String,
    pub(crate) track_genres: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawAlbumRow {
    pub(crate) album_id: String,
    pub(crate) album_title: String,
    pub(crate) album_url: String,
    pub(crate) album_year_released: String,
    pub(crate) album_date_released: String,
}

pub(crate) fn read_tracks_file(path: &Path) -> Result<Vec<RawTrackRow>> {
    read_rows(path)
}

pub(crate) fn read_albums_file(path: &Path) -> Result<Vec<RawAlbumRow>> {
    read_rows(path)
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open catalogue file {}", path.display()))?;

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<T>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => tracing::warn!("Skipping row {} of {}: {}", index + 1, path.display(), e),
        }
    }

    tracing::debug!("Read {} rows from {}", rows.len(), path.display());

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let (albums, tracks) = testing::write_catalogue(dir.path());

        let albums = read_albums_file(&albums).unwrap();
        let tracks = read_tracks_file(&tracks).unwrap();

        assert_eq!(albums.len(), 5);
        assert_eq!(albums[0].album_title, "AWOL - A Way Of Life");
        assert_eq!(albums[3].album_year_released, "");

        assert_eq!(tracks.len(), 8);
        assert_eq!(tracks[0].track_title, "Food");
        assert!(tracks[0].track_genres.starts_with("[{'genre_id': '21'"));
        assert_eq!(tracks[5].track_id, "1");
        assert_eq!(tracks[5].album_id, "");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_tracks_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open catalogue file"));
    }
}
