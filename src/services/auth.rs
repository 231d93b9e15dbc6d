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

//! Registration and login.
//!
//! Passwords are stored as Argon2id hashes in PHC string format, so the
//! algorithm parameters and salt travel with the hash.

use anyhow::{Result, anyhow};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{model::User, repository::Repository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RegistrationOutcome {
    Registered(User),
    AlreadyTaken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoginOutcome {
    LoggedIn(User),
    UnknownUser,
    WrongPassword,
}

pub(crate) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Returns `Ok(false)` for a wrong password and an error for a corrupt hash.
pub(crate) fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("Invalid password hash: {}", e))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("Failed to verify password: {}", e)),
    }
}

/// Registers a new user unless the name is taken, ignoring case.
///
/// The new user's id is one more than the current number of users.
pub(crate) fn register(
    repo: &mut dyn Repository,
    user_name: &str,
    password: &str,
) -> Result<RegistrationOutcome> {
    if repo.get_user(user_name)?.is_some() {
        tracing::debug!("Registration rejected, {} is taken", user_name);
        return Ok(RegistrationOutcome::AlreadyTaken);
    }

    let id = i64::try_from(repo.get_number_of_users()?)? + 1;
    let user = User::new(id, user_name, &hash_password(password)?)?;
    repo.add_user(user.clone())?;

    tracing::info!("Registered user {}", user.user_name());

    Ok(RegistrationOutcome::Registered(user))
}

pub(crate) fn login(repo: &dyn Repository, user_name: &str, password: &str) -> Result<LoginOutcome> {
    let Some(user) = repo.get_user(user_name)? else {
        return Ok(LoginOutcome::UnknownUser);
    };

    if verify_password(password, user.password_hash())? {
        Ok(LoginOutcome::LoggedIn(user))
    } else {
        Ok(LoginOutcome::WrongPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{self, repository::SqliteRepository},
        repository::memory::MemoryRepository,
    };

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("correct-horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct-horse", &hash).unwrap());
        assert!(!verify_password("wrong-horse", &hash).unwrap());
        assert!(verify_password("anything", "not a hash").is_err());
    }

    #[test]
    fn register_then_login() {
        let mut repo = MemoryRepository::new();

        let RegistrationOutcome::Registered(user) = register(&mut repo, "Dave", "123456789").unwrap()
        else {
            panic!("registration should succeed");
        };
        assert_eq!(user.id(), 1);
        assert_eq!(user.user_name(), "dave");

        assert_eq!(
            login(&repo, "dave", "123456789").unwrap(),
            LoginOutcome::LoggedIn(user)
        );
    }

    #[test]
    fn taken_names_are_rejected_case_insensitively() {
        let mut repo = MemoryRepository::new();
        register(&mut repo, "Martin", "123456789").unwrap();

        assert_eq!(
            register(&mut repo, "MARTIN", "other-password").unwrap(),
            RegistrationOutcome::AlreadyTaken
        );
        assert_eq!(repo.get_number_of_users().unwrap(), 1);

        let RegistrationOutcome::Registered(second) = register(&mut repo, "Cindy", "1111111").unwrap()
        else {
            panic!("registration should succeed");
        };
        assert_eq!(second.id(), 2);
    }

    #[test]
    fn non_ascii_names_fold_in_both_stores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("music.db");
        let conn = db::init_db(&path).unwrap();
        db::create_schema(&conn).unwrap();
        drop(conn);

        let mut sqlite = SqliteRepository::open(&path).unwrap();
        let mut memory = MemoryRepository::new();
        let stores: [&mut dyn Repository; 2] = [&mut memory, &mut sqlite];

        for repo in stores {
            register(repo, "éric", "123456789").unwrap();
            assert_eq!(
                register(repo, "ÉRIC", "other-password").unwrap(),
                RegistrationOutcome::AlreadyTaken
            );
            assert!(matches!(
                login(repo, "ÉRIC", "123456789").unwrap(),
                LoginOutcome::LoggedIn(_)
            ));
        }
    }

    #[test]
    fn login_failures() {
        let mut repo = MemoryRepository::new();
        register(&mut repo, "Andrew", "1234567").unwrap();

        assert_eq!(
            login(&repo, "thorke", "1234567").unwrap(),
            LoginOutcome::UnknownUser
        );
        assert_eq!(
            login(&repo, "Andrew", "7654321").unwrap(),
            LoginOutcome::WrongPassword
        );
    }
}
