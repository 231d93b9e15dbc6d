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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the catalogue (artists,
//! albums, genres and tracks) together with the users and reviews created
//! through the service layer.
//!
//! Catalogue entities are identified by the non-negative id assigned in the
//! source files. Equality follows identity, so two values with the same id
//! compare equal even if their other attributes differ.

pub(crate) mod track;
pub(crate) mod user;

use std::hash::{Hash, Hasher};

use thiserror::Error;

pub use track::Track;
pub use user::{Review, User};

/// Validation failures raised by entity constructors and setters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{entity} id must be non-negative, got {id}")]
    NegativeId { entity: &'static str, id: i64 },

    #[error("track duration must be a non-negative number of seconds, got {0}")]
    InvalidDuration(i64),

    #[error("review rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),

    #[error("user name must not be blank")]
    BlankUserName,
}

pub(crate) fn check_id(entity: &'static str, id: i64) -> Result<i64, ModelError> {
    if id < 0 {
        return Err(ModelError::NegativeId { entity, id });
    }
    Ok(id)
}

/// Trims a string, mapping blank values to `None`.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[derive(Debug, Clone)]
pub struct Artist {
    id: i64,
    pub full_name: String,
}

impl Artist {
    pub fn new(id: i64, full_name: &str) -> Result<Self, ModelError> {
        Ok(Self {
            id: check_id("artist", id)?,
            full_name: full_name.trim().to_string(),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Artist {}

#[derive(Debug, Clone)]
pub struct Album {
    id: i64,
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub url: Option<String>,
}

impl Album {
    pub fn new(id: i64, title: &str) -> Result<Self, ModelError> {
        Ok(Self {
            id: check_id("album", id)?,
            title: non_blank(title),
            release_year: None,
            url: None,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Album {}

#[derive(Debug, Clone)]
pub struct Genre {
    id: i64,
    pub name: String,
}

impl Genre {
    pub fn new(id: i64, name: &str) -> Result<Self, ModelError> {
        Ok(Self {
            id: check_id("genre", id)?,
            name: name.trim().to_string(),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

impl PartialEq for Genre {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Genre {}

impl Hash for Genre {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_ids_are_rejected() {
        assert_eq!(
            Artist::new(-1, "Sever").unwrap_err(),
            ModelError::NegativeId { entity: "artist", id: -1 }
        );
        assert!(Album::new(-5, "Skyrim").is_err());
        assert!(Genre::new(-2, "Pop").is_err());
    }

    #[test]
    fn album_title_is_trimmed_and_blank_becomes_none() {
        let album = Album::new(1, "  Skyrim ").unwrap();
        assert_eq!(album.title.as_deref(), Some("Skyrim"));

        let untitled = Album::new(2, "   ").unwrap();
        assert_eq!(untitled.title, None);
    }

    #[test]
    fn equality_follows_identity() {
        let a = Artist::new(3, "AWOL").unwrap();
        let b = Artist::new(3, "Someone Else").unwrap();
        assert_eq!(a, b);
        assert_ne!(Genre::new(1, "Pop").unwrap(), Genre::new(2, "Pop").unwrap());
    }
}
