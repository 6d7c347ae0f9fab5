use photonote_core::db::{open_db, open_db_in_memory};
use photonote_core::{
    decode_collection, encode_collection, KeyValueStore, MemoryKeyValueStore, Note, NoteStore,
    SqliteKeyValueStore, StoreError, StoreOptions, NOTES_STORAGE_KEY,
};

fn note(id: &str, title: &str, date: &str) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("about {id}"),
        image_uri: format!("img://{id}"),
        date: date.to_string(),
    }
}

fn ids(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(|n| n.id.as_str()).collect()
}

#[test]
fn list_on_fresh_store_is_empty() {
    let kv = MemoryKeyValueStore::new();
    let store = NoteStore::new(&kv);
    assert!(store.list().is_empty());
    assert!(store.try_list().unwrap().is_empty());
    assert_eq!(kv.write_count(), 0);
}

#[test]
fn created_notes_list_newest_first_with_fields_intact() {
    let kv = MemoryKeyValueStore::new();
    let store = NoteStore::new(&kv);
    let created: Vec<Note> = (1..=4)
        .map(|i| note(&i.to_string(), &format!("n{i}"), "2024-01-01T00:00:00.000Z"))
        .collect();
    for n in &created {
        store.create(n).unwrap();
    }

    let listed = store.list();
    let expected: Vec<Note> = created.into_iter().rev().collect();
    assert_eq!(listed, expected);
}

#[test]
fn get_returns_created_note_or_none() {
    let kv = MemoryKeyValueStore::new();
    let store = NoteStore::new(&kv);
    let created = note("a", "Trip", "2024-01-01T00:00:00.000Z");
    store.create(&created).unwrap();

    assert_eq!(store.get("a"), Some(created));
    assert_eq!(store.get("never"), None);
}

#[test]
fn update_replaces_only_the_matching_note() {
    let kv = MemoryKeyValueStore::new();
    let store = NoteStore::new(&kv);
    for id in ["1", "2", "3"] {
        store.create(&note(id, id, "2024-01-01T00:00:00.000Z")).unwrap();
    }
    let before = store.list();

    let changed = note("2", "changed", "2024-05-05T00:00:00.000Z");
    store.update(&changed).unwrap();

    let after = store.list();
    assert_eq!(after.len(), before.len());
    assert_eq!(after[1], changed);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
}

#[test]
fn update_replaces_first_duplicate_only() {
    let kv = MemoryKeyValueStore::new();
    let store = NoteStore::new(&kv);
    store.create(&note("dup", "older", "2024-01-01T00:00:00.000Z")).unwrap();
    store.create(&note("dup", "newer", "2024-01-02T00:00:00.000Z")).unwrap();

    store.update(&note("dup", "edited", "2024-01-03T00:00:00.000Z")).unwrap();

    let titles: Vec<String> = store.list().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["edited", "older"]);
}

#[test]
fn update_of_unknown_id_writes_unchanged_collection() {
    let kv = MemoryKeyValueStore::new();
    let store = NoteStore::new(&kv);
    store.create(&note("1", "one", "2024-01-01T00:00:00.000Z")).unwrap();
    let before = store.raw().unwrap();
    let writes = kv.write_count();

    store.update(&note("missing", "x", "2024-01-01T00:00:00.000Z")).unwrap();

    assert_eq!(store.raw().unwrap(), before);
    assert_eq!(kv.write_count(), writes + 1);
}

#[test]
fn delete_removes_all_matches_and_ignores_unknown_ids() {
    let kv = MemoryKeyValueStore::new();
    let store = NoteStore::new(&kv);
    store.create(&note("x", "first", "2024-01-01T00:00:00.000Z")).unwrap();
    store.create(&note("y", "other", "2024-01-01T00:00:00.000Z")).unwrap();
    store.create(&note("x", "second", "2024-01-01T00:00:00.000Z")).unwrap();

    store.delete("nope").unwrap();
    assert_eq!(store.list().len(), 3);

    store.delete("x").unwrap();
    assert_eq!(ids(&store.list()), vec!["y"]);
}

#[test]
fn stored_blob_is_a_json_array_of_camel_case_records() {
    let kv = MemoryKeyValueStore::new();
    let store = NoteStore::new(&kv);
    store.create(&note("1", "Trip", "2024-01-01T00:00:00.000Z")).unwrap();

    let raw = kv.get(NOTES_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &value.as_array().unwrap()[0];
    assert_eq!(record["id"], "1");
    assert_eq!(record["imageUri"], "img://1");
    assert_eq!(record["description"], "about 1");
}

#[test]
fn reading_is_idempotent_through_encode_and_decode() {
    let kv = MemoryKeyValueStore::new();
    let store = NoteStore::new(&kv);
    store.create(&note("1", "a", "2024-01-01T00:00:00.000Z")).unwrap();
    store.create(&note("2", "b", "2024-01-02T00:00:00.000Z")).unwrap();

    let listed = store.list();
    let reread = decode_collection(&encode_collection(&listed).unwrap()).unwrap();
    assert_eq!(reread, listed);
}

#[test]
fn write_failure_is_reported_and_leaves_collection_untouched() {
    let kv = MemoryKeyValueStore::new();
    let store = NoteStore::new(&kv);
    store.create(&note("1", "one", "2024-01-01T00:00:00.000Z")).unwrap();

    kv.fail_writes(true);
    let n2 = note("2", "two", "2024-01-01T00:00:00.000Z");
    assert!(matches!(store.create(&n2), Err(StoreError::Kv(_))));
    assert!(matches!(store.update(&n2), Err(StoreError::Kv(_))));
    assert!(matches!(store.delete("1"), Err(StoreError::Kv(_))));
    kv.fail_writes(false);

    assert_eq!(ids(&store.list()), vec!["1"]);
}

#[test]
fn read_failure_degrades_reads_and_fails_writes() {
    let kv = MemoryKeyValueStore::new();
    let store = NoteStore::new(&kv);
    store.create(&note("1", "one", "2024-01-01T00:00:00.000Z")).unwrap();

    kv.fail_reads(true);
    assert!(store.list().is_empty());
    assert_eq!(store.get("1"), None);
    assert!(matches!(store.try_list(), Err(StoreError::Kv(_))));
    assert!(matches!(
        store.create(&note("2", "two", "2024-01-01T00:00:00.000Z")),
        Err(StoreError::Kv(_))
    ));
    assert!(matches!(
        store.update(&note("1", "edited", "2024-02-01T00:00:00.000Z")),
        Err(StoreError::Kv(_))
    ));
    assert!(matches!(store.delete("1"), Err(StoreError::Kv(_))));
    kv.fail_reads(false);

    assert_eq!(kv.write_count(), 1);
    assert_eq!(
        store.list(),
        vec![note("1", "one", "2024-01-01T00:00:00.000Z")]
    );
}

#[test]
fn duplicate_ids_are_stored_unless_uniqueness_is_enforced() {
    let kv = MemoryKeyValueStore::new();
    let lenient = NoteStore::new(&kv);
    assert!(!lenient.options().enforce_unique_ids);
    lenient.create(&note("1", "a", "2024-01-01T00:00:00.000Z")).unwrap();
    lenient.create(&note("1", "b", "2024-01-01T00:00:00.000Z")).unwrap();
    assert_eq!(lenient.list().len(), 2);

    let strict_kv = MemoryKeyValueStore::new();
    let strict = NoteStore::with_options(
        &strict_kv,
        StoreOptions {
            enforce_unique_ids: true,
        },
    );
    assert!(strict.options().enforce_unique_ids);
    strict.create(&note("1", "a", "2024-01-01T00:00:00.000Z")).unwrap();
    let err = strict
        .create(&note("1", "b", "2024-01-01T00:00:00.000Z"))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(id) if id == "1"));
    assert_eq!(strict.list().len(), 1);
    assert_eq!(strict_kv.write_count(), 1);
}

#[test]
fn trip_scenario_on_sqlite_store() {
    let conn = open_db_in_memory().unwrap();
    let store = NoteStore::new(SqliteKeyValueStore::new(&conn));

    let note1 = Note {
        id: "1".to_string(),
        title: "Trip".to_string(),
        description: String::new(),
        image_uri: "img://a".to_string(),
        date: "2024-01-01T00:00:00.000Z".to_string(),
    };
    store.create(&note1).unwrap();
    assert_eq!(store.list(), vec![note1.clone()]);

    let note2 = Note {
        id: "2".to_string(),
        title: "Beach".to_string(),
        description: "sand".to_string(),
        image_uri: "img://b".to_string(),
        date: "2024-01-02T00:00:00.000Z".to_string(),
    };
    store.create(&note2).unwrap();
    assert_eq!(store.list(), vec![note2.clone(), note1.clone()]);

    let edited = Note {
        title: "Trip Updated".to_string(),
        ..note1.clone()
    };
    store.update(&edited).unwrap();
    assert_eq!(store.get("1").unwrap().title, "Trip Updated");
    assert_eq!(store.list().len(), 2);

    store.delete("2").unwrap();
    assert_eq!(store.list(), vec![edited]);
}

#[test]
fn notes_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = NoteStore::new(SqliteKeyValueStore::new(&conn));
        store.create(&note("1", "kept", "2024-01-01T00:00:00.000Z")).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = NoteStore::new(SqliteKeyValueStore::new(&conn));
    assert_eq!(store.get("1").unwrap().title, "kept");
}
