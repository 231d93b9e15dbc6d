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

//! Shared test fixtures.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::{AppConfig, RepositoryMode},
    model::{Album, Artist, Genre, Review, Track, User},
    repository::Repository,
};

pub(crate) const ALBUMS_CSV: &str = "\
album_id,album_title,album_url,album_type,album_year_released
1,AWOL - A Way Of Life,http://freemusicarchive.org/music/AWOL/AWOL_-_A_Way_Of_Life/,Album,2009
1,AWOL - A Way Of Life,http://freemusicarchive.org/music/AWOL/AWOL_-_A_Way_Of_Life/,Album,2009
6,Constant Hitmaker,http://freemusicarchive.org/music/Kurt_Vile/Constant_Hitmaker/,Album,2008
4,Niris,http://freemusicarchive.org/music/Nicky_Cook/Niris/,Album,
14,Live at WFMU,http://freemusicarchive.org/music/Live_at_WFMU/,Radio Program,2010
";

pub(crate) const TRACKS_CSV: &str = "\
track_id,track_title,artist_id,artist_name,album_id,album_title,track_duration,track_url,track_genres
2,Food,1,AWOL,1,AWOL - A Way Of Life,168,http://freemusicarchive.org/music/AWOL/AWOL_-_A_Way_Of_Life/Food,\"[{'genre_id': '21', 'genre_title': 'Hip-Hop', 'genre_url': 'http://freemusicarchive.org/genre/Hip-Hop/'}]\"
3,Electric Ave,1,AWOL,1,AWOL - A Way Of Life,03:57,http://freemusicarchive.org/music/AWOL/AWOL_-_A_Way_Of_Life/Electric_Ave,\"[{'genre_id': '21', 'genre_title': 'Hip-Hop', 'genre_url': 'http://freemusicarchive.org/genre/Hip-Hop/'}]\"
5,This World,1,AWOL,1,AWOL - A Way Of Life,206.4,http://freemusicarchive.org/music/AWOL/AWOL_-_A_Way_Of_Life/This_World,\"[{'genre_id': '21', 'genre_title': 'Hip-Hop', 'genre_url': 'http://freemusicarchive.org/genre/Hip-Hop/'}]\"
10,Freeway,6,Kurt Vile,6,Constant Hitmaker,161,http://freemusicarchive.org/music/Kurt_Vile/Constant_Hitmaker/Freeway,\"[{'genre_id': '10', 'genre_title': 'Pop', 'genre_url': 'http://freemusicarchive.org/genre/Pop/'}]\"
20,Spiritual Level,4,Nicky Cook,4,Niris,311,http://freemusicarchive.org/music/Nicky_Cook/Niris/Spiritual_Level,\"[{'genre_id': '76', 'genre_title': 'Experimental Pop', 'genre_url': 'http://freemusicarchive.org/genre/Experimental_Pop/'}, {'genre_id': '103', 'genre_title': 'Singer-Songwriter', 'genre_url': 'http://freemusicarchive.org/genre/Singer-Songwriter/'}]\"
1,Gamer,,,,,5,,
2,Food,1,AWOL,1,AWOL - A Way Of Life,168,http://freemusicarchive.org/music/AWOL/AWOL_-_A_Way_Of_Life/Food,
abc,Broken,,,,,12,,not a genre list
";

pub(crate) const EXPECTED_ARTISTS: usize = 3;
pub(crate) const EXPECTED_ALBUMS: usize = 4;
pub(crate) const EXPECTED_TRACKS: usize = 6;

/// Writes the fixture catalogue into `dir`, returning `(albums, tracks)`.
pub(crate) fn write_catalogue(dir: &Path) -> (PathBuf, PathBuf) {
    let albums = dir.join("raw_albums_excerpt.csv");
    let tracks = dir.join("raw_tracks_excerpt.csv");
    fs::write(&albums, ALBUMS_CSV).unwrap();
    fs::write(&tracks, TRACKS_CSV).unwrap();
    (albums, tracks)
}

/// A configuration pointing every path into `dir`.
pub(crate) fn config_in(dir: &Path, repository: RepositoryMode) -> AppConfig {
    let (albums, tracks) = write_catalogue(dir);
    AppConfig {
        repository,
        database_path: dir.join("music.db").to_string_lossy().into_owned(),
        albums_file: albums.to_string_lossy().into_owned(),
        tracks_file: tracks.to_string_lossy().into_owned(),
        ..AppConfig::default()
    }
}

pub(crate) fn make_track(id: i64) -> Track {
    let mut track = Track::new(id, "Gamer").unwrap();
    track.set_artist(Some(Artist::new(2, "Sever").unwrap()));
    track.set_album(Some(Album::new(1, "Skyrim").unwrap()));
    track.set_duration(5).unwrap();
    track.set_url(Some("http://freemusicarchive.org/music/Sever/Skyrim/Gamer"));
    track.add_genre(Genre::new(1, "Pop").unwrap());
    track
}

/// Exercises the behaviour every [`Repository`] must share.
pub(crate) fn check_repository_contract(repo: &mut dyn Repository) {
    for id in [0, 42, 1000] {
        assert!(repo.get_track_by_id(id).unwrap().is_none());
        assert!(repo.get_album_by_id(id).unwrap().is_none());
        assert!(repo.get_artist_by_id(id).unwrap().is_none());
    }
    assert!(repo.get_user("nobody").unwrap().is_none());
    assert!(repo.get_track_list().unwrap().is_empty());
    assert!(repo.get_review_list().unwrap().is_empty());
    assert!(repo.get_users_by_track(1).unwrap().is_empty());
    assert_eq!(repo.get_num_tracks().unwrap(), 0);

    // Round trip, with the duplicate genre collapsed on the way in.
    let mut track = make_track(3);
    track.add_genre(Genre::new(1, "Pop").unwrap());
    repo.add_track(track.clone()).unwrap();

    let fetched = repo.get_track_by_id(3).unwrap().unwrap();
    assert_eq!(fetched, track);
    assert_eq!(fetched.title(), Some("Gamer"));
    assert_eq!(fetched.duration(), Some(5));
    assert_eq!(fetched.url(), track.url());
    assert_eq!(fetched.artist().map(|a| a.full_name.as_str()), Some("Sever"));
    assert_eq!(
        fetched.album().and_then(|a| a.title.as_deref()),
        Some("Skyrim")
    );
    assert_eq!(fetched.genres().len(), 1);
    assert_eq!(fetched.genres()[0].name, "Pop");

    // Related entities are registered with the track.
    assert_eq!(repo.get_artist_by_id(2).unwrap().unwrap().full_name, "Sever");
    assert!(repo.get_album_by_id(1).unwrap().is_some());
    assert_eq!(repo.get_genre_list().unwrap().len(), 1);

    let bare = Track::new(1, "Food").unwrap();
    repo.add_track(bare).unwrap();
    let fetched = repo.get_track_by_id(1).unwrap().unwrap();
    assert!(fetched.artist().is_none());
    assert!(fetched.album().is_none());
    assert_eq!(fetched.duration(), None);

    let ids: Vec<i64> = repo.get_track_list().unwrap().iter().map(Track::id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(repo.get_num_tracks().unwrap(), 2);

    repo.add_artist(Artist::new(1, "AWOL").unwrap()).unwrap();
    let names: Vec<String> = repo
        .get_artist_list()
        .unwrap()
        .into_iter()
        .map(|a| a.full_name)
        .collect();
    assert_eq!(names, vec!["AWOL", "Sever"]);

    let mut album = Album::new(5, "Niris").unwrap();
    album.release_year = Some(2009);
    repo.add_album(album).unwrap();
    assert_eq!(
        repo.get_album_by_id(5).unwrap().unwrap().release_year,
        Some(2009)
    );
    assert_eq!(repo.get_album_list().unwrap().len(), 2);

    // Users are looked up case-insensitively.
    repo.add_user(User::new(1, "Dave", "hash").unwrap()).unwrap();
    let dave = repo.get_user("DAVE").unwrap().unwrap();
    assert_eq!(dave.id(), 1);
    assert_eq!(dave.password_hash(), "hash");
    assert_eq!(repo.get_number_of_users().unwrap(), 1);

    // Case folding is not limited to ASCII.
    repo.add_user(User::new(2, "Éric", "hash").unwrap()).unwrap();
    let eric = repo.get_user(" ÉRIC ").unwrap().unwrap();
    assert_eq!(eric.id(), 2);
    assert_eq!(eric.user_name(), "éric");
    assert!(repo.get_user("eric").unwrap().is_none());
    assert_eq!(repo.get_number_of_users().unwrap(), 2);

    // Reviews.
    let first = Review::new(fetched.clone(), "lets a go", 3)
        .unwrap()
        .with_user(dave.clone());
    let second = Review::new(fetched.clone(), "again", 5)
        .unwrap()
        .with_user(dave.clone());
    let anonymous = Review::new(fetched.clone(), "anon", 1).unwrap();

    let first_id = repo.add_review(first).unwrap();
    let second_id = repo.add_review(second).unwrap();
    repo.add_review(anonymous).unwrap();
    assert!(second_id > first_id);

    let reviews = repo.get_reviews_by_track(1).unwrap();
    assert_eq!(reviews.len(), 3);
    assert_eq!(reviews[0].text(), "lets a go");
    assert_eq!(reviews[0].id(), Some(first_id));
    assert_eq!(reviews[0].track().id(), 1);
    assert_eq!(reviews[0].user().map(User::user_name), Some("dave"));
    assert!(reviews[2].user().is_none());

    assert_eq!(repo.get_users_by_track(1).unwrap(), vec![dave]);
    assert!(repo.get_reviews_by_track(3).unwrap().is_empty());
    assert_eq!(repo.get_review_list().unwrap().len(), 3);

    let orphan = Review::new(Track::new(99, "Missing").unwrap(), "?", 2).unwrap();
    assert!(repo.add_review(orphan).is_err());
}
