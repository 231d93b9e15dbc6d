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

//! Users and the reviews they attach to tracks.

use crate::model::{ModelError, Track, check_id};

const MIN_RATING: i64 = 1;
const MAX_RATING: i64 = 5;

/// A registered user.
///
/// User names are stored trimmed and lower-cased so lookups are
/// case-insensitive. Only the password hash is kept.
#[derive(Debug, Clone)]
pub struct User {
    id: i64,
    user_name: String,
    password_hash: String,
}

impl User {
    pub fn new(id: i64, user_name: &str, password_hash: &str) -> Result<Self, ModelError> {
        let user_name = normalise_user_name(user_name);
        if user_name.is_empty() {
            return Err(ModelError::BlankUserName);
        }

        Ok(Self {
            id: check_id("user", id)?,
            user_name,
            password_hash: password_hash.to_string(),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.user_name == other.user_name
    }
}

impl Eq for User {}

pub(crate) fn normalise_user_name(user_name: &str) -> String {
    user_name.trim().to_lowercase()
}

/// A rated review of a track, optionally attributed to a user.
#[derive(Debug, Clone)]
pub struct Review {
    id: Option<i64>,
    track: Track,
    user: Option<User>,
    text: String,
    rating: u8,
}

impl Review {
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidRating`] unless `rating` is within 1..=5.
    pub fn new(track: Track, text: &str, rating: i64) -> Result<Self, ModelError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ModelError::InvalidRating(rating));
        }

        Ok(Self {
            id: None,
            track,
            user: None,
            text: text.trim().to_string(),
            rating: rating as u8,
        })
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub(crate) fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Store-assigned id, `None` until the review has been added.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }
}
