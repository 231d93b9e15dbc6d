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

//! Application configuration.
//!
//! This module manages the application configuration file.

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "tunebase";

/// Which store backs the catalogue.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryMode {
    Database,
    Memory,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    pub repository: RepositoryMode,
    pub database_path: String,
    pub albums_file: String,
    pub tracks_file: String,
    /// Forces the database to be rebuilt and repopulated on every start.
    pub testing: bool,
    pub page_size: usize,
    pub admin_user_name: String,
    pub admin_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            repository: RepositoryMode::Database,
            database_path: "music.db".into(),
            albums_file: "data/raw_albums_excerpt.csv".into(),
            tracks_file: "data/raw_tracks_excerpt.csv".into(),
            testing: false,
            page_size: 10,
            admin_user_name: "Silverstream".into(),
            admin_password: "Foxdapple".into(),
        }
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_else(|e| {
        tracing::warn!("Using default configuration: {}", e);
        AppConfig::default()
    })
}
