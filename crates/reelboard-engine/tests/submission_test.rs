use reelboard_core::clock::Clock;
use reelboard_core::types::GENRE_LABELS;
use reelboard_engine::{EngineError, SubmissionHandler};
use reelboard_store::{Catalog, RatingsLog};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}

fn setup(catalog_body: &str) -> (SubmissionHandler, Catalog, PathBuf, TempDir) {
    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("movies.csv");
    std::fs::write(&catalog_path, catalog_body).unwrap();
    let ratings_path = dir.path().join("ratings.csv");
    // Existing log content so byte-length checks are meaningful
    std::fs::write(&ratings_path, "1,5.0,100\n").unwrap();

    let catalog = Catalog::load(&catalog_path).unwrap();
    let handler = SubmissionHandler::new(
        RatingsLog::new(&ratings_path),
        Arc::new(FixedClock(1_700_000_000)),
    );
    (handler, catalog, ratings_path, dir)
}

fn all_floor() -> HashMap<String, f64> {
    GENRE_LABELS.iter().map(|&g| (g.to_string(), 1.0)).collect()
}

#[test]
fn all_sliders_at_floor_is_rejected_with_zero_mutations() {
    let (mut handler, mut catalog, ratings_path, dir) =
        setup("movie_id,title,genre\n1,Dune,Drama\n");
    let ratings_before = std::fs::metadata(&ratings_path).unwrap().len();
    let catalog_before = std::fs::metadata(dir.path().join("movies.csv")).unwrap().len();

    let result = handler.submit(&mut catalog, "Some Film", &all_floor());
    assert!(matches!(result, Err(EngineError::InvalidSubmission(_))));

    assert_eq!(std::fs::metadata(&ratings_path).unwrap().len(), ratings_before);
    assert_eq!(
        std::fs::metadata(dir.path().join("movies.csv")).unwrap().len(),
        catalog_before
    );
    assert_eq!(catalog.len(), 1);
}

#[test]
fn empty_title_is_rejected_with_zero_mutations() {
    let (mut handler, mut catalog, ratings_path, _dir) =
        setup("movie_id,title,genre\n1,Dune,Drama\n");
    let before = std::fs::metadata(&ratings_path).unwrap().len();

    let mut ratings = all_floor();
    ratings.insert("Comedy".into(), 8.0);
    let result = handler.submit(&mut catalog, "   ", &ratings);
    assert!(matches!(result, Err(EngineError::InvalidSubmission(_))));
    assert_eq!(std::fs::metadata(&ratings_path).unwrap().len(), before);
}

#[test]
fn out_of_range_rating_is_rejected() {
    let (mut handler, mut catalog, _ratings_path, _dir) =
        setup("movie_id,title,genre\n1,Dune,Drama\n");

    let mut ratings = all_floor();
    ratings.insert("Comedy".into(), 10.5);
    assert!(handler.submit(&mut catalog, "Too High", &ratings).is_err());

    let mut ratings = all_floor();
    ratings.insert("Unknown Genre".into(), 5.0);
    assert!(handler.submit(&mut catalog, "Bad Label", &ratings).is_err());
}

#[test]
fn single_genre_submission_appends_one_catalog_and_one_rating_row() {
    let (mut handler, mut catalog, ratings_path, dir) =
        setup("movie_id,title,genre\n1,Dune,Drama\n");

    let mut ratings = all_floor();
    ratings.insert("Comedy".into(), 7.5);
    let receipt = handler.submit(&mut catalog, "Test Film", &ratings).unwrap();

    assert_eq!(receipt.movie_id, 2);
    assert_eq!(receipt.title, "Test Film");
    assert_eq!(receipt.top_genre, "Comedy");
    assert_eq!(receipt.top_rating, 7.5);

    let catalog_body = std::fs::read_to_string(dir.path().join("movies.csv")).unwrap();
    assert!(catalog_body.ends_with("2,Test Film,Comedy\n"));

    let ratings_body = std::fs::read_to_string(&ratings_path).unwrap();
    assert_eq!(ratings_body, "1,5.0,100\n2,7.5,1700000000\n");
}

#[test]
fn multi_genre_submission_shares_one_timestamp_and_joins_labels() {
    let (mut handler, mut catalog, ratings_path, _dir) =
        setup("movie_id,title,genre\n1,Dune,Drama\n");

    let mut ratings = all_floor();
    ratings.insert("Horror".into(), 9.0);
    ratings.insert("Thriller".into(), 6.5);
    let receipt = handler.submit(&mut catalog, "Scary One", &ratings).unwrap();

    // Labels in fixed slider order, only the rated ones
    assert_eq!(catalog.get(2).unwrap().genre, "Horror|Thriller");
    assert_eq!(receipt.top_genre, "Horror");
    assert_eq!(receipt.top_rating, 9.0);

    let rows = RatingsLog::new(&ratings_path).read_all().unwrap();
    let new_rows: Vec<_> = rows.iter().filter(|r| r.movie_id == 2).collect();
    assert_eq!(new_rows.len(), 2);
    assert!(new_rows.iter().all(|r| r.timestamp == 1_700_000_000));
}

#[test]
fn top_genre_tie_resolves_to_earlier_slider_label() {
    let (mut handler, mut catalog, _ratings_path, _dir) =
        setup("movie_id,title,genre\n1,Dune,Drama\n");

    let mut ratings = all_floor();
    ratings.insert("Mystery".into(), 8.0);
    ratings.insert("Comedy".into(), 8.0);
    let receipt = handler.submit(&mut catalog, "Tied", &ratings).unwrap();

    // Comedy precedes Mystery on the form
    assert_eq!(receipt.top_genre, "Comedy");
}

#[test]
fn id_assignment_continues_from_max() {
    let (mut handler, mut catalog, _ratings_path, _dir) =
        setup("movie_id,title,genre\n42,Dune,Drama\n7,Up,Comedy\n");

    let mut ratings = all_floor();
    ratings.insert("Drama".into(), 6.0);
    let receipt = handler.submit(&mut catalog, "Next", &ratings).unwrap();
    assert_eq!(receipt.movie_id, 43);
}

#[test]
fn id_assignment_on_empty_catalog_starts_at_one() {
    let (mut handler, mut catalog, _ratings_path, _dir) = setup("movie_id,title,genre\n");

    let mut ratings = all_floor();
    ratings.insert("Romance".into(), 9.5);
    let receipt = handler.submit(&mut catalog, "First", &ratings).unwrap();
    assert_eq!(receipt.movie_id, 1);
}

#[test]
fn catalog_append_failure_after_rating_rows_is_a_partial_write() {
    let (mut handler, mut catalog, ratings_path, dir) =
        setup("movie_id,title,genre\n1,Dune,Drama\n");

    // Swap the catalog file for a directory so the append-mode open fails
    // after the rating rows have already gone out.
    let catalog_path = dir.path().join("movies.csv");
    std::fs::remove_file(&catalog_path).unwrap();
    std::fs::create_dir(&catalog_path).unwrap();

    let mut ratings = all_floor();
    ratings.insert("Comedy".into(), 7.5);
    let result = handler.submit(&mut catalog, "Half Written", &ratings);
    assert!(matches!(result, Err(EngineError::PartialWrite(_))));

    // Rating rows for the new id were written first and stay in the log...
    let rows = RatingsLog::new(&ratings_path).read_all().unwrap();
    assert_eq!(rows.iter().filter(|r| r.movie_id == 2).count(), 1);

    // ...but no catalog row exists, on disk or in the table, so the stray
    // ratings never join to anything.
    assert!(catalog.get(2).is_none());
    assert_eq!(catalog.len(), 1);
}

#[test]
fn submitted_movie_shows_up_in_the_next_snapshot() {
    let (mut handler, mut catalog, ratings_path, _dir) =
        setup("movie_id,title,genre\n1,Dune,Drama\n");

    let mut ratings = all_floor();
    ratings.insert("Comedy".into(), 9.9);
    handler.submit(&mut catalog, "Fresh Hit", &ratings).unwrap();

    let log = RatingsLog::new(&ratings_path);
    let snapshot =
        reelboard_engine::compute_snapshot(&log.read_all().unwrap(), &catalog, "comedy");
    match snapshot {
        reelboard_core::Snapshot::Ready { top_overall, top_genre, .. } => {
            assert_eq!(top_overall[0].title, "Fresh Hit");
            assert_eq!(top_genre.unwrap()[0].title, "Fresh Hit");
        }
        other => panic!("unexpected snapshot: {:?}", other),
    }
}
