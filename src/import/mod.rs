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

//! Catalogue import.
//!
//! This module turns the raw rows of the two catalogue files into artists,
//! albums, genres and tracks and inserts them into a [`Repository`].
//!
//! The track and album files are walked in parallel, index by index, up to
//! the longer of the two. Album rows repeat the same album many times, so the
//! importer remembers which ids it has already inserted. That bookkeeping
//! belongs to a single [`CatalogImporter`], which is consumed by
//! [`CatalogImporter::import`].

pub(crate) mod genres;
pub(crate) mod source;

use std::collections::HashSet;

use anyhow::{Context, Result};

use crate::{
    model::{Album, Artist, Track, User},
    repository::Repository,
    services::auth,
};

use self::source::{RawAlbumRow, RawTrackRow};

/// Credentials of the administrative user created before every import.
#[derive(Debug, Clone)]
pub(crate) struct AdminAccount {
    pub(crate) user_name: String,
    pub(crate) password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ImportSummary {
    pub(crate) artists: usize,
    pub(crate) albums: usize,
    pub(crate) tracks: usize,
    pub(crate) skipped_rows: usize,
}

pub(crate) struct CatalogImporter {
    admin: AdminAccount,
    seen_artists: HashSet<i64>,
    seen_albums: HashSet<i64>,
    seen_tracks: HashSet<i64>,
}

impl CatalogImporter {
    pub(crate) fn new(admin: AdminAccount) -> Self {
        Self {
            admin,
            seen_artists: HashSet::new(),
            seen_albums: HashSet::new(),
            seen_tracks: HashSet::new(),
        }
    }

    /// Imports the catalogue rows into `repo`.
    ///
    /// For each index this:
    /// 1. Inserts the artist named by the track row, once per artist id.
    /// 2. Inserts the album described by the album row, once per album id.
    /// 3. Builds the track, attaching this row's artist, the already-inserted
    ///    album named by the row's `album_id` and the parsed genres, then
    ///    inserts it once per track id.
    ///
    /// A row without an artist produces a track without an artist. Rows whose
    /// track id is not a non-negative integer are skipped and counted.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository rejects an insert or a lookup fails.
    pub(crate) fn import(
        mut self,
        repo: &mut dyn Repository,
        tracks: &[RawTrackRow],
        albums: &[RawAlbumRow],
    ) -> Result<ImportSummary> {
        self.add_admin(repo)?;

        let mut summary = ImportSummary::default();

        for index in 0..tracks.len().max(albums.len()) {
            let track_row = tracks.get(index);

            let artist = track_row.and_then(artist_from_row);
            if let Some(artist) = &artist {
                if self.seen_artists.insert(artist.id()) {
                    repo.add_artist(artist.clone())?;
                    summary.artists += 1;
                }
            }

            if let Some(album) = albums.get(index).and_then(album_from_row) {
                if self.seen_albums.insert(album.id()) {
                    repo.add_album(album)?;
                    summary.albums += 1;
                }
            }

            let Some(row) = track_row else {
                continue;
            };

            let Some(mut track) = track_from_row(row) else {
                tracing::warn!("Skipping track row {} with id {:?}", index + 1, row.track_id);
                summary.skipped_rows += 1;
                continue;
            };

            if !self.seen_tracks.insert(track.id()) {
                tracing::debug!("Skipping duplicate track {}", track.id());
                continue;
            }

            track.set_artist(artist);
            let album = match parse_id(&row.album_id) {
                Some(album_id) => repo.get_album_by_id(album_id)?,
                None => None,
            };
            track.set_album(album);
            for genre in genres::parse_genres(&row.track_genres) {
                track.add_genre(genre);
            }

            repo.add_track(track)?;
            summary.tracks += 1;
        }

        tracing::info!(
            "Imported {} tracks, {} albums and {} artists ({} rows skipped)",
            summary.tracks,
            summary.albums,
            summary.artists,
            summary.skipped_rows
        );

        Ok(summary)
    }

    fn add_admin(&self, repo: &mut dyn Repository) -> Result<()> {
        if repo.get_user(&self.admin.user_name)?.is_some() {
            return Ok(());
        }

        let id = i64::try_from(repo.get_number_of_users()?)? + 1;
        let hash = auth::hash_password(&self.admin.password)?;
        let admin = User::new(id, &self.admin.user_name, &hash)
            .context("Invalid administrative user")?;

        repo.add_user(admin)
    }
}

fn parse_id(field: &str) -> Option<i64> {
    field.trim().parse::<i64>().ok().filter(|id| *id >= 0)
}

/// Parses seconds as `"168"`, `"168.4"` (rounded) or `"02:48"`.
///
/// A `MM:SS` value needs non-negative minutes and seconds below 60, and must
/// not overflow.
fn parse_duration(field: &str) -> Option<i64> {
    let field = field.trim();

    if let Some((minutes, seconds)) = field.split_once(':') {
        let minutes: i64 = minutes.trim().parse().ok().filter(|m| *m >= 0)?;
        let seconds: i64 = seconds.trim().parse().ok().filter(|s| (0..60).contains(s))?;
        return minutes.checked_mul(60)?.checked_add(seconds);
    }

    let seconds: f64 = field.parse().ok()?;
    seconds.is_finite().then(|| seconds.round() as i64)
}

fn parse_year(row: &RawAlbumRow) -> Option<i32> {
    if let Ok(year) = row.album_year_released.trim().parse() {
        return Some(year);
    }

    // Release dates look like "01/07/2009" or "2009-01-07".
    let date = row.album_date_released.trim();
    let year = if date.contains('/') {
        date.rsplit('/').next()
    } else {
        date.split('-').next()
    };
    year.and_then(|y| y.trim().parse().ok())
}

fn artist_from_row(row: &RawTrackRow) -> Option<Artist> {
    Artist::new(parse_id(&row.artist_id)?, &row.artist_name).ok()
}

fn album_from_row(row: &RawAlbumRow) -> Option<Album> {
    let mut album = Album::new(parse_id(&row.album_id)?, &row.album_title).ok()?;
    album.release_year = parse_year(row);
    album.url = crate::model::non_blank(&row.album_url);
    Some(album)
}

fn track_from_row(row: &RawTrackRow) -> Option<Track> {
    let mut track = Track::new(parse_id(&row.track_id)?, &row.track_title).ok()?;

    if let Some(seconds) = parse_duration(&row.track_duration) {
        if let Err(e) = track.set_duration(seconds) {
            tracing::warn!("Track {}: {}", track.id(), e);
        }
    }

    let url = crate::model::non_blank(&row.track_url);
    track.set_url(url.as_deref());

    Some(track)
}
