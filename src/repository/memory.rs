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

//! In-memory catalogue store.
//!
//! Every entity kind is indexed by id (users by normalised name) for O(1)
//! lookup. List queries sort by id so results match the SQLite store.

use std::collections::HashMap;

use anyhow::{Result, bail};

use crate::{
    model::{Album, Artist, Genre, Review, Track, User, user::normalise_user_name},
    repository::{Repository, distinct_reviewers},
};

#[derive(Debug, Default)]
pub(crate) struct MemoryRepository {
    users: HashMap<String, User>,
    artists: HashMap<i64, Artist>,
    albums: HashMap<i64, Album>,
    genres: HashMap<i64, Genre>,
    tracks: HashMap<i64, Track>,
    reviews: Vec<Review>,
    next_review_id: i64,
}

impl MemoryRepository {
    pub(crate) fn new() -> Self {
        Self {
            next_review_id: 1,
            ..Self::default()
        }
    }
}

fn sorted_by_id<T: Clone>(values: &HashMap<i64, T>) -> Vec<T> {
    let mut ids: Vec<&i64> = values.keys().collect();
    ids.sort_unstable();
    ids.into_iter().map(|id| values[id].clone()).collect()
}

impl Repository for MemoryRepository {
    fn add_user(&mut self, user: User) -> Result<()> {
        self.users.insert(user.user_name().to_string(), user);
        Ok(())
    }

    fn get_user(&self, user_name: &str) -> Result<Option<User>> {
        Ok(self.users.get(&normalise_user_name(user_name)).cloned())
    }

    fn get_number_of_users(&self) -> Result<usize> {
        Ok(self.users.len())
    }

    fn add_artist(&mut self, artist: Artist) -> Result<()> {
        self.artists.insert(artist.id(), artist);
        Ok(())
    }

    fn get_artist_by_id(&self, id: i64) -> Result<Option<Artist>> {
        Ok(self.artists.get(&id).cloned())
    }

    fn get_artist_list(&self) -> Result<Vec<Artist>> {
        Ok(sorted_by_id(&self.artists))
    }

    fn add_album(&mut self, album: Album) -> Result<()> {
        self.albums.insert(album.id(), album);
        Ok(())
    }

    fn get_album_by_id(&self, id: i64) -> Result<Option<Album>> {
        Ok(self.albums.get(&id).cloned())
    }

    fn get_album_list(&self) -> Result<Vec<Album>> {
        Ok(sorted_by_id(&self.albums))
    }

    fn add_genre(&mut self, genre: Genre) -> Result<()> {
        self.genres.insert(genre.id(), genre);
        Ok(())
    }

    fn get_genre_list(&self) -> Result<Vec<Genre>> {
        Ok(sorted_by_id(&self.genres))
    }

    fn add_track(&mut self, track: Track) -> Result<()> {
        if let Some(artist) = track.artist() {
            self.artists
                .entry(artist.id())
                .or_insert_with(|| artist.clone());
        }
        if let Some(album) = track.album() {
            self.albums.entry(album.id()).or_insert_with(|| album.clone());
        }
        for genre in track.genres() {
            self.genres.entry(genre.id()).or_insert_with(|| genre.clone());
        }

        self.tracks.insert(track.id(), track);
        Ok(())
    }

    fn get_track_by_id(&self, id: i64) -> Result<Option<Track>> {
        Ok(self.tracks.get(&id).cloned())
    }

    fn get_num_tracks(&self) -> Result<usize> {
        Ok(self.tracks.len())
    }

    fn get_track_list(&self) -> Result<Vec<Track>> {
        Ok(sorted_by_id(&self.tracks))
    }

    fn add_review(&mut self, review: Review) -> Result<i64> {
        let track_id = review.track().id();
        if !self.tracks.contains_key(&track_id) {
            bail!("Cannot review unknown track {}", track_id);
        }
        if let Some(user) = review.user() {
            if !self.users.contains_key(user.user_name()) {
                bail!("Cannot attribute review to unknown user {}", user.user_name());
            }
        }

        let id = self.next_review_id;
        self.next_review_id += 1;
        self.reviews.push(review.with_id(id));

        Ok(id)
    }

    fn get_review_list(&self) -> Result<Vec<Review>> {
        Ok(self.reviews.clone())
    }

    fn get_reviews_by_track(&self, track_id: i64) -> Result<Vec<Review>> {
        Ok(self
            .reviews
            .iter()
            .filter(|r| r.track().id() == track_id)
            .cloned()
            .collect())
    }

    fn get_users_by_track(&self, track_id: i64) -> Result<Vec<User>> {
        let reviews = self.get_reviews_by_track(track_id)?;
        Ok(distinct_reviewers(&reviews))
    }
}
