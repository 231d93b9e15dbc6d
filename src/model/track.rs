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

use std::fmt;

use crate::model::{Album, Artist, Genre, ModelError, check_id, non_blank};

/// A single catalogue track.
///
/// The id is fixed at construction. Every other attribute starts unset and is
/// filled in by the importer or a repository when the track is loaded.
#[derive(Debug, Clone)]
pub struct Track {
    id: i64,
    title: Option<String>,
    artist: Option<Artist>,
    album: Option<Album>,
    duration: Option<u32>,
    url: Option<String>,
    genres: Vec<Genre>,
}

impl Track {
    /// Creates a track with the given id and title.
    ///
    /// The title is trimmed; a blank title is stored as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NegativeId`] if `id` is negative.
    pub fn new(id: i64, title: &str) -> Result<Self, ModelError> {
        Ok(Self {
            id: check_id("track", id)?,
            title: non_blank(title),
            artist: None,
            album: None,
            duration: None,
            url: None,
            genres: Vec::new(),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = non_blank(title);
    }

    pub fn artist(&self) -> Option<&Artist> {
        self.artist.as_ref()
    }

    pub fn set_artist(&mut self, artist: Option<Artist>) {
        self.artist = artist;
    }

    pub fn album(&self) -> Option<&Album> {
        self.album.as_ref()
    }

    pub fn set_album(&mut self, album: Option<Album>) {
        self.album = album;
    }

    /// Duration in whole seconds, `None` until assigned.
    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    /// Assigns the duration in seconds.
    ///
    /// The previous duration is cleared before validation, so a rejected
    /// value leaves the track without a duration.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidDuration`] for negative values or values
    /// that do not fit in a `u32`.
    pub fn set_duration(&mut self, seconds: i64) -> Result<(), ModelError> {
        self.duration = None;
        let seconds = u32::try_from(seconds).map_err(|_| ModelError::InvalidDuration(seconds))?;
        self.duration = Some(seconds);
        Ok(())
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn set_url(&mut self, url: Option<&str>) {
        self.url = url.map(|u| u.trim().to_string());
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    /// Adds a genre unless one with the same id is already attached.
    pub fn add_genre(&mut self, genre: Genre) {
        if !self.genres.contains(&genre) {
            self.genres.push(genre);
        }
    }

    pub fn has_genre_named(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.genres.iter().any(|g| g.name.to_lowercase() == name)
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Track {}, track id = {}>",
            self.title.as_deref().unwrap_or("None"),
            self.id
        )
    }
}
