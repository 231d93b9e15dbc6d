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

//! # Music Catalogue.
//!
//! A catalogue of tracks, albums, artists and genres with registered users
//! and their track reviews.
//!
//! On start-up the catalogue is either rebuilt from the raw CSV exports or
//! restored from an existing database, see [`catalog::Catalog`]. Every request
//! made against the catalogue afterwards runs inside its own repository
//! session, see [`services::with_session`].
//!
//! ## Architecture
//!
//! * [`model`]: Domain entities and their validation rules.
//! * [`repository`]: The storage contract and its in-memory implementation.
//! * [`db`]: The SQLite implementation of the storage contract.
//! * [`import`]: Loading the raw CSV exports into a repository.
//! * [`services`]: The operations a front end performs on behalf of users.

mod catalog;
mod config;
mod db;
mod import;
mod model;
mod repository;
mod services;
mod util;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    catalog::Catalog,
    services::browse,
    util::format::format_duration,
};

/// The entry point of the application.
///
/// Loads the configuration, opens the catalogue and prints a summary of what
/// it holds.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunebase=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::load_config();

    let mut catalog = Catalog::open(&config).context("Failed to open catalogue")?;
    tracing::info!("Catalogue is {}", catalog.status());

    let page_size = config.page_size;
    services::with_session(catalog.repository_mut(), |repo| {
        println!(
            "{} tracks, {} albums, {} artists, {} genres, {} users",
            repo.get_num_tracks()?,
            repo.get_album_list()?.len(),
            repo.get_artist_list()?.len(),
            repo.get_genre_list()?.len(),
            repo.get_number_of_users()?
        );

        if let Some(track) = browse::random_track(repo)? {
            println!("Random pick: {}", track);
        }

        let page = browse::track_page(repo, 1, page_size)?;
        println!("Page {} of {}", page.number, page.total_pages);
        for track in &page.tracks {
            println!(
                "{:>6}  {}  {} - {}",
                track.id(),
                format_duration(track.duration()),
                track.artist().map_or("Unknown", |a| a.full_name.as_str()),
                track.title().unwrap_or("Untitled")
            );
        }

        Ok(())
    })
    .context("Application error occurred")
}
