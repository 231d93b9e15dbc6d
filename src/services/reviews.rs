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

use anyhow::Result;

use crate::{
    model::{ModelError, Review, User},
    repository::Repository,
};

#[derive(Debug, Clone)]
pub(crate) enum ReviewOutcome {
    Added(Review),
    UnknownTrack,
    UnknownUser,
    Invalid(ModelError),
}

/// Reviews a track on behalf of a logged-in user.
pub(crate) fn submit_review(
    repo: &mut dyn Repository,
    user_name: &str,
    track_id: i64,
    text: &str,
    rating: i64,
) -> Result<ReviewOutcome> {
    let Some(user) = repo.get_user(user_name)? else {
        return Ok(ReviewOutcome::UnknownUser);
    };
    let Some(track) = repo.get_track_by_id(track_id)? else {
        return Ok(ReviewOutcome::UnknownTrack);
    };

    let review = match Review::new(track, text, rating) {
        Ok(review) => review.with_user(user),
        Err(e) => return Ok(ReviewOutcome::Invalid(e)),
    };

    let id = repo.add_review(review.clone())?;
    tracing::info!("Review {} added to track {}", id, track_id);

    Ok(ReviewOutcome::Added(review.with_id(id)))
}

/// Reviews of a track together with the distinct users who wrote them.
pub(crate) fn track_reviews(repo: &dyn Repository, track_id: i64) -> Result<(Vec<Review>, Vec<User>)> {
    Ok((
        repo.get_reviews_by_track(track_id)?,
        repo.get_users_by_track(track_id)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{repository::memory::MemoryRepository, services::auth, testing};

    fn repo_with_user_and_track() -> MemoryRepository {
        let mut repo = MemoryRepository::new();
        auth::register(&mut repo, "Andrew", "1234567").unwrap();
        repo.add_track(testing::make_track(1)).unwrap();
        repo
    }

    #[test]
    fn review_is_attributed_to_user() {
        let mut repo = repo_with_user_and_track();

        let ReviewOutcome::Added(review) =
            submit_review(&mut repo, "ANDREW", 1, "lets a go", 4).unwrap()
        else {
            panic!("review should be added");
        };
        assert_eq!(review.id(), Some(1));
        assert_eq!(review.user().map(User::user_name), Some("andrew"));

        submit_review(&mut repo, "andrew", 1, "second thoughts", 2).unwrap();

        let (reviews, users) = track_reviews(&repo, 1).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_name(), "andrew");
    }

    #[test]
    fn rejected_reviews() {
        let mut repo = repo_with_user_and_track();

        assert!(matches!(
            submit_review(&mut repo, "nobody", 1, "hi", 3).unwrap(),
            ReviewOutcome::UnknownUser
        ));
        assert!(matches!(
            submit_review(&mut repo, "andrew", 77, "hi", 3).unwrap(),
            ReviewOutcome::UnknownTrack
        ));
        assert!(matches!(
            submit_review(&mut repo, "andrew", 1, "hi", 9).unwrap(),
            ReviewOutcome::Invalid(ModelError::InvalidRating(9))
        ));
        assert!(repo.get_review_list().unwrap().is_empty());
    }
}
