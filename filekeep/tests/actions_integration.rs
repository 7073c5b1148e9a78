//! Integration tests for the filesystem action verbs.

mod common;

use common::{guest, user, TestEnv};
use filekeep::actions::{ActionEngine, PlaceOptions};
use filekeep::Error;

#[test]
fn rename_rejects_traversal_and_leaves_disk_untouched() {
    let mut env = TestEnv::new();
    env.grant_all("u1");
    env.write_storage_file("docs/a.txt", "body");

    let mut engine = ActionEngine::new(&env.settings, &mut env.db);
    let err = engine
        .rename(&user(), "/docs/a.txt", "../../etc/passwd")
        .unwrap_err();
    assert!(matches!(err, Error::InvalidName { .. }));
    assert!(env.storage_path("docs/a.txt").exists());
}

#[test]
fn rename_updates_file_and_metadata_together() {
    let mut env = TestEnv::new();
    env.grant_all("u1");
    env.write_storage_file("docs/a.txt", "body");
    env.db.create_star("u1", "/docs/a.txt").unwrap();

    let mut engine = ActionEngine::new(&env.settings, &mut env.db);
    let outcome = engine.rename(&user(), "/docs/a.txt", "b.txt").unwrap();
    assert_eq!(outcome.new_path.as_str(), "/docs/b.txt");

    assert!(env.storage_path("docs/b.txt").exists());
    assert_eq!(env.db.find_star_paths("u1").unwrap()[0].root_path, "/docs/b.txt");
}

#[test]
fn moving_a_directory_repoints_stars_beneath_it() {
    let mut env = TestEnv::new();
    env.grant_all("u1");
    env.write_storage_file("docs/a.txt", "a");
    env.mkdir_storage("archive");
    env.db.create_star("u1", "/docs/a.txt").unwrap();

    let mut engine = ActionEngine::new(&env.settings, &mut env.db);
    let outcome = engine.relocate(&user(), "/docs", "/archive").unwrap();
    assert_eq!(outcome.new_path.as_str(), "/archive/docs");

    assert_eq!(
        env.db.find_star_paths("u1").unwrap()[0].root_path,
        "/archive/docs/a.txt"
    );
    assert!(env.storage_path("archive/docs/a.txt").exists());
    assert!(!env.storage_path("docs").exists());
}

#[test]
fn move_fails_closed_on_conflicts_and_self_nesting() {
    let mut env = TestEnv::new();
    env.grant_all("u1");
    env.write_storage_file("docs/a.txt", "new");
    env.write_storage_file("archive/a.txt", "old");
    env.mkdir_storage("docs/inner");
    let archive_a = env.storage_path("archive/a.txt");

    let mut engine = ActionEngine::new(&env.settings, &mut env.db);

    let err = engine.relocate(&user(), "/docs/a.txt", "/archive").unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(
        std::fs::read_to_string(&archive_a).unwrap(),
        "old"
    );

    let err = engine.relocate(&user(), "/docs", "/docs/inner").unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    let err = engine.relocate(&user(), "/docs", "/docs").unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn copy_is_independent_of_the_original() {
    let mut env = TestEnv::new();
    env.grant_all("u1");
    env.write_storage_file("docs/a.txt", "body");
    env.mkdir_storage("backup");
    env.db.create_star("u1", "/docs/a.txt").unwrap();
    let docs_a = env.storage_path("docs/a.txt");

    let outcome = {
        let mut engine = ActionEngine::new(&env.settings, &mut env.db);
        engine.copy(&user(), "/docs/a.txt", "/backup").unwrap()
    };
    assert_eq!(outcome.new_path.as_str(), "/backup/a.txt");

    // Original intact, star not duplicated.
    assert!(docs_a.exists());
    let stars = env.db.find_star_paths("u1").unwrap();
    assert_eq!(stars.len(), 1);
    assert_eq!(stars[0].root_path, "/docs/a.txt");

    // Copying again fails closed on the existing destination.
    let err = {
        let mut engine = ActionEngine::new(&env.settings, &mut env.db);
        engine.copy(&user(), "/docs/a.txt", "/backup").unwrap_err()
    };
    assert!(err.is_conflict());
}

#[test]
fn place_folder_and_file_flows() {
    let mut env = TestEnv::new();
    env.grant_all("u1");

    let mut engine = ActionEngine::new(&env.settings, &mut env.db);

    let first = engine
        .place(&user(), "/projects/new", &PlaceOptions::folder())
        .unwrap();
    assert!(first.created);
    let again = engine
        .place(&user(), "/projects/new", &PlaceOptions::folder())
        .unwrap();
    assert!(!again.created);

    engine
        .place(&user(), "/projects/new/todo.txt", &PlaceOptions::file("x"))
        .unwrap();
    let err = engine
        .place(&user(), "/projects/new/todo.txt", &PlaceOptions::file("y"))
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(
        std::fs::read_to_string(env.storage_path("projects/new/todo.txt")).unwrap(),
        "x"
    );
}

#[test]
fn guests_cannot_mutate_anything() {
    let mut env = TestEnv::new();
    env.grant_all("g1");
    env.write_storage_file("docs/a.txt", "a");
    env.mkdir_storage("archive");

    let mut engine = ActionEngine::new(&env.settings, &mut env.db);
    assert!(engine.rename(&guest(), "/docs/a.txt", "b.txt").unwrap_err().is_access_denied());
    assert!(engine.relocate(&guest(), "/docs/a.txt", "/archive").unwrap_err().is_access_denied());
    assert!(engine.copy(&guest(), "/docs/a.txt", "/archive").unwrap_err().is_access_denied());
    assert!(engine
        .place(&guest(), "/new", &PlaceOptions::folder())
        .unwrap_err()
        .is_access_denied());

    assert!(env.storage_path("docs/a.txt").exists());
    assert!(!env.storage_path("archive/a.txt").exists());
}
