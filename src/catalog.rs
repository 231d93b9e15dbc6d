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

//! Catalogue start-up.
//!
//! This module decides, once per process, whether the catalogue has to be
//! rebuilt from the raw CSV files or whether an existing database can be
//! served as it is, and tracks which stage of that process has been reached.

use std::{fmt, path::Path};

use anyhow::{Context, Result};

use crate::{
    config::{AppConfig, RepositoryMode},
    db::{self, repository::SqliteRepository},
    import::{AdminAccount, CatalogImporter, ImportSummary, source},
    repository::{Repository, memory::MemoryRepository},
    services,
};

/// Start-up stage of the catalogue.
///
/// A populating run goes `Uninitialized`, `SchemaCreated`, `Populated`,
/// `Serving`. A run against an existing database goes `Uninitialized`,
/// `MappingRestored`, `Serving`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CatalogStatus {
    Uninitialized,
    SchemaCreated,
    Populated,
    MappingRestored,
    Serving,
}

impl fmt::Display for CatalogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogStatus::Uninitialized => "uninitialized",
            CatalogStatus::SchemaCreated => "schema created",
            CatalogStatus::Populated => "populated",
            CatalogStatus::MappingRestored => "mapping restored",
            CatalogStatus::Serving => "serving",
        };
        f.write_str(name)
    }
}

pub(crate) struct Catalog {
    status: CatalogStatus,
    repository: Box<dyn Repository>,
    summary: Option<ImportSummary>,
}

impl Catalog {
    /// Opens the catalogue described by `config`, importing the raw files if
    /// needed.
    ///
    /// The in-memory store is always populated. The database is populated when
    /// it has no tables yet or `config.testing` is set, in which case the
    /// schema is dropped and every table emptied first.
    pub(crate) fn open(config: &AppConfig) -> Result<Self> {
        let mut catalog = match config.repository {
            RepositoryMode::Memory => Self::with_repository(Box::new(MemoryRepository::new())),
            RepositoryMode::Database => Self::open_database(config)?,
        };

        if catalog.status == CatalogStatus::SchemaCreated {
            catalog.populate(config)?;
        }
        catalog.transition(CatalogStatus::Serving);

        Ok(catalog)
    }

    fn with_repository(repository: Box<dyn Repository>) -> Self {
        let mut catalog = Self {
            status: CatalogStatus::Uninitialized,
            repository,
            summary: None,
        };
        catalog.transition(CatalogStatus::SchemaCreated);
        catalog
    }

    fn open_database(config: &AppConfig) -> Result<Self> {
        let path = Path::new(&config.database_path);

        let mut conn = db::init_db(path)?;
        let rebuild = config.testing || !db::has_schema(&conn)?;
        if rebuild {
            db::reset_schema(&conn)?;
            db::clear_tables(&mut conn)?;
        } else {
            db::create_schema(&conn)?;
        }
        conn.close()
            .map_err(|(_, e)| e)
            .context("Failed to close database after schema setup")?;

        let repository = Box::new(SqliteRepository::open(path)?);

        if rebuild {
            return Ok(Self::with_repository(repository));
        }

        let mut catalog = Self {
            status: CatalogStatus::Uninitialized,
            repository,
            summary: None,
        };
        catalog.transition(CatalogStatus::MappingRestored);
        Ok(catalog)
    }

    fn populate(&mut self, config: &AppConfig) -> Result<()> {
        let tracks = source::read_tracks_file(Path::new(&config.tracks_file))?;
        let albums = source::read_albums_file(Path::new(&config.albums_file))?;

        let importer = CatalogImporter::new(config.admin_account());
        let summary = services::with_session(self.repository.as_mut(), |repo| {
            importer.import(repo, &tracks, &albums)
        })?;

        self.summary = Some(summary);
        self.transition(CatalogStatus::Populated);
        Ok(())
    }

    fn transition(&mut self, status: CatalogStatus) {
        tracing::info!("Catalogue {} -> {}", self.status, status);
        self.status = status;
    }

    pub(crate) fn status(&self) -> CatalogStatus {
        self.status
    }

    pub(crate) fn repository_mut(&mut self) -> &mut dyn Repository {
        self.repository.as_mut()
    }

    /// Counts from this run's import, `None` if nothing was imported.
    pub(crate) fn import_summary(&self) -> Option<&ImportSummary> {
        self.summary.as_ref()
    }
}

impl AppConfig {
    pub(crate) fn admin_account(&self) -> AdminAccount {
        AdminAccount {
            user_name: self.admin_user_name.clone(),
            password: self.admin_password.clone(),
        }
    }
}
