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

//! Catalogue browsing.

use anyhow::Result;
use rand::{rng, seq::IndexedRandom};

use crate::{model::Track, repository::Repository};

/// One page of the track listing. Page numbers start at 1.
#[derive(Debug, Clone)]
pub(crate) struct TrackPage {
    pub(crate) number: usize,
    pub(crate) total_pages: usize,
    pub(crate) tracks: Vec<Track>,
}

impl TrackPage {
    pub(crate) fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub(crate) fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TrackQuery {
    Id(i64),
    Artist(String),
    Title(String),
    Genre(String),
}

pub(crate) fn page_count(repo: &dyn Repository, page_size: usize) -> Result<usize> {
    let page_size = page_size.max(1);
    Ok(repo.get_num_tracks()?.div_ceil(page_size))
}

/// Returns page `number` of the tracks ordered by id.
///
/// Page 0 is treated as page 1. A page past the end has no tracks.
pub(crate) fn track_page(repo: &dyn Repository, number: usize, page_size: usize) -> Result<TrackPage> {
    let page_size = page_size.max(1);
    let number = number.max(1);

    let all = repo.get_track_list()?;
    let total_pages = all.len().div_ceil(page_size);
    let tracks = all
        .into_iter()
        .skip((number - 1) * page_size)
        .take(page_size)
        .collect();

    Ok(TrackPage {
        number,
        total_pages,
        tracks,
    })
}

/// Picks a track uniformly at random, `None` for an empty catalogue.
pub(crate) fn random_track(repo: &dyn Repository) -> Result<Option<Track>> {
    let tracks = repo.get_track_list()?;
    Ok(tracks.choose(&mut rng()).cloned())
}

/// Finds tracks matching `query`.
///
/// Text queries are trimmed and compared without regard to case.
pub(crate) fn search(repo: &dyn Repository, query: &TrackQuery) -> Result<Vec<Track>> {
    let matches = |text: Option<&str>, wanted: &str| {
        text.is_some_and(|t| t.trim().to_lowercase() == wanted.trim().to_lowercase())
    };

    let tracks = match query {
        TrackQuery::Id(id) => repo.get_track_by_id(*id)?.into_iter().collect(),
        TrackQuery::Artist(name) => repo
            .get_track_list()?
            .into_iter()
            .filter(|t| matches(t.artist().map(|a| a.full_name.as_str()), name))
            .collect(),
        TrackQuery::Title(title) => repo
            .get_track_list()?
            .into_iter()
            .filter(|t| matches(t.title(), title))
            .collect(),
        TrackQuery::Genre(genre) => repo
            .get_track_list()?
            .into_iter()
            .filter(|t| t.has_genre_named(genre.trim()))
            .collect(),
    };

    Ok(tracks)
}
