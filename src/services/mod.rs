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

//! Application operations built on the repository.
//!
//! These are the operations a front end performs on behalf of a request:
//! browsing and searching the catalogue, registering and logging in, and
//! reviewing tracks. Each request should run inside [`with_session`].
//!
//! # Sub-modules
//!
//! * [`auth`]: Password hashing, registration and login.
//! * [`browse`]: Paging, random picks and track lookups.
//! * [`reviews`]: Review submission and listing.

pub(crate) mod auth;
pub(crate) mod browse;
pub(crate) mod reviews;

use anyhow::Result;

use crate::repository::Repository;

/// Runs one request against the repository inside a fresh session.
///
/// The session is ended after `request` returns, whether it succeeded or not.
pub(crate) fn with_session<T>(
    repo: &mut dyn Repository,
    request: impl FnOnce(&mut dyn Repository) -> Result<T>,
) -> Result<T> {
    repo.begin_session()?;
    let result = request(&mut *repo);
    repo.end_session();
    result
}
