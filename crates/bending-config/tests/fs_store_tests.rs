// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use bending_config::{ConfigError, ConfigService, ConfigStore, FsConfigStore};

#[test]
fn fs_store_round_trips_blobs_as_json_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path().join("bending")).unwrap();
    store.save_raw("collisions", br#"{"layers":[]}"#).unwrap();

    assert!(dir.path().join("bending").join("collisions.json").exists());
    assert_eq!(store.load_raw("collisions").unwrap(), br#"{"layers":[]}"#.to_vec());
}

#[test]
fn fs_store_reports_missing_key_as_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path()).unwrap();
    assert!(matches!(store.load_raw("nope"), Err(ConfigError::NotFound)));

    let service = ConfigService::new(store);
    let value: Option<Vec<String>> = service.load("nope").unwrap();
    assert!(value.is_none());
}

#[test]
fn service_over_fs_store_persists_values() {
    let dir = tempfile::tempdir().unwrap();
    let service = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());
    let kinds = vec!["AirBlast".to_owned(), "FireBlast".to_owned()];
    service.save("kinds", &kinds).unwrap();

    let reopened = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());
    assert_eq!(reopened.load::<Vec<String>>("kinds").unwrap(), Some(kinds));
}

#[test]
fn service_rejects_keys_that_leave_the_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("bending");
    let service = ConfigService::new(FsConfigStore::at(&base).unwrap());
    let err = service.save("../collisions", &Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidKey(_)), "unexpected error: {err:?}");
    assert!(!dir.path().join("collisions.json").exists());
}
