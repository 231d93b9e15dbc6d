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

//! Catalogue repository abstraction.
//!
//! [`Repository`] is the data-access capability shared by the importer and
//! the service layer. Two stores implement it:
//!
//! * [`memory::MemoryRepository`] - entities held in process memory.
//! * [`crate::db::repository::SqliteRepository`] - one query per call against
//!   the SQLite database.
//!
//! Both stores must be indistinguishable to callers:
//!
//! * Single-entity lookups return `Ok(None)` when nothing matches.
//! * List queries return an empty vector when nothing matches, ordered by id.
//! * Adding a track also registers its artist, album and genres when they are
//!   not yet known.

pub(crate) mod memory;

use anyhow::Result;

use crate::model::{Album, Artist, Genre, Review, Track, User};

pub(crate) trait Repository {
    /// Starts a store session. Stores without sessions ignore this.
    fn begin_session(&mut self) -> Result<()> {
        Ok(())
    }

    /// Ends the current store session. Stores without sessions ignore this.
    fn end_session(&mut self) {}

    fn add_user(&mut self, user: User) -> Result<()>;

    /// Looks up a user by name, ignoring case.
    fn get_user(&self, user_name: &str) -> Result<Option<User>>;

    fn get_number_of_users(&self) -> Result<usize>;

    fn add_artist(&mut self, artist: Artist) -> Result<()>;

    fn get_artist_by_id(&self, id: i64) -> Result<Option<Artist>>;

    fn get_artist_list(&self) -> Result<Vec<Artist>>;

    fn add_album(&mut self, album: Album) -> Result<()>;

    fn get_album_by_id(&self, id: i64) -> Result<Option<Album>>;

    fn get_album_list(&self) -> Result<Vec<Album>>;

    fn add_genre(&mut self, genre: Genre) -> Result<()>;

    fn get_genre_list(&self) -> Result<Vec<Genre>>;

    fn add_track(&mut self, track: Track) -> Result<()>;

    fn get_track_by_id(&self, id: i64) -> Result<Option<Track>>;

    fn get_num_tracks(&self) -> Result<usize>;

    fn get_track_list(&self) -> Result<Vec<Track>>;

    /// Stores a review and returns the id assigned to it.
    ///
    /// The reviewed track, and the user if one is attached, must already be
    /// in the store.
    fn add_review(&mut self, review: Review) -> Result<i64>;

    fn get_review_list(&self) -> Result<Vec<Review>>;

    fn get_reviews_by_track(&self, track_id: i64) -> Result<Vec<Review>>;

    /// Distinct users who reviewed the track, in review order.
    fn get_users_by_track(&self, track_id: i64) -> Result<Vec<User>>;
}

/// Collects the distinct reviewers of a list of reviews, keeping review order.
pub(crate) fn distinct_reviewers(reviews: &[Review]) -> Vec<User> {
    let mut users: Vec<User> = Vec::new();
    for user in reviews.iter().filter_map(Review::user) {
        if !users.contains(user) {
            users.push(user.clone());
        }
    }
    users
}
