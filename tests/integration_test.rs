//! Integration tests for wordbank.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wordbank::core::{NewWord, WordChanges};
use wordbank::storage::{
    CategoryRepository, SqliteCategories, SqliteStorage, SqliteWords, WordRepository,
};

/// Helper to create a test storage instance.
fn create_test_storage() -> (SqliteStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let storage = SqliteStorage::open(&db_path).expect("Failed to create storage");
    storage.init().expect("Failed to init storage");
    (storage, temp_dir)
}

fn apple() -> NewWord {
    NewWord::new("apple", "jabłko", "/img/a.png", "/audio/a.mp3")
}

#[test]
fn test_storage_init_and_status() {
    let (storage, _temp) = create_test_storage();

    assert!(storage.is_initialized().expect("is_initialized failed"));

    let stats = storage.stats().expect("stats failed");
    assert_eq!(stats.category_count, 0);
    assert_eq!(stats.word_count, 0);
    assert_eq!(stats.orphaned_word_count, 0);
    assert!(stats.db_size.is_some());
}

#[test]
fn test_init_is_idempotent_and_keeps_data() {
    let (storage, _temp) = create_test_storage();
    let categories = SqliteCategories::new(&storage);
    let id = categories.create("Fruits").expect("create failed");

    storage.init().expect("second init failed");
    assert!(categories.get(&id).expect("get failed").is_some());
}

#[test]
fn test_data_survives_reopen() {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("nested").join("test.db");

    let id = {
        let storage = SqliteStorage::open(&db_path).expect("open failed");
        storage.init().expect("init failed");
        SqliteCategories::new(&storage)
            .create("Fruits")
            .expect("create failed")
    };

    let storage = SqliteStorage::open(&db_path).expect("reopen failed");
    assert!(storage.is_initialized().expect("is_initialized failed"));
    let loaded = SqliteCategories::new(&storage)
        .get(&id)
        .expect("get failed")
        .expect("category should exist");
    assert_eq!(loaded.category_name, "Fruits");
}

#[test]
fn test_category_crud() {
    let (storage, _temp) = create_test_storage();
    let categories = SqliteCategories::new(&storage);

    let id = categories.create("Fruits").expect("create failed");
    assert!(!id.is_empty());

    let loaded = categories
        .get(&id)
        .expect("get failed")
        .expect("category should exist");
    assert_eq!(loaded.category_name, "Fruits");

    assert!(categories.update(&id, "Fruit").expect("update failed"));
    let renamed = categories
        .get(&id)
        .expect("get failed")
        .expect("category should exist");
    assert_eq!(renamed.category_name, "Fruit");

    assert!(categories.delete(&id).expect("delete failed"));
    assert!(categories.get(&id).expect("get failed").is_none());
    assert!(categories.list().expect("list failed").is_empty());
}

#[test]
fn test_absent_ids_are_not_errors() {
    let (storage, _temp) = create_test_storage();
    let categories = SqliteCategories::new(&storage);
    let words = SqliteWords::new(&storage);

    assert!(categories.get("nope").expect("get failed").is_none());
    assert!(!categories.update("nope", "X").expect("update failed"));
    assert!(!categories.delete("nope").expect("delete failed"));

    assert!(words.get("nope").expect("get failed").is_none());
    assert!(words.list_by_category("nope").expect("list failed").is_empty());
    assert!(!words.update("nope", &apple()).expect("update failed"));
    assert!(!words.delete("nope").expect("delete failed"));
    assert_eq!(
        words
            .delete_all_for_category("nope")
            .expect("delete_all failed"),
        0
    );
}

#[test]
fn test_word_crud() {
    let (storage, _temp) = create_test_storage();
    let categories = SqliteCategories::new(&storage);
    let words = SqliteWords::new(&storage);

    let fruits = categories.create("Fruits").expect("create category failed");
    let id = words.create(&fruits, &apple()).expect("create word failed");

    let loaded = words
        .get(&id)
        .expect("get failed")
        .expect("word should exist");
    assert_eq!(loaded.id_category, fruits);
    assert_eq!(loaded.word, "apple");
    assert_eq!(loaded.translation, "jabłko");
    assert_eq!(loaded.image, "/img/a.png");
    assert_eq!(loaded.sound, "/audio/a.mp3");

    let changes = WordChanges {
        translation: "jabłuszko".to_string(),
        ..WordChanges::from(&loaded)
    };
    assert!(words.update(&id, &changes).expect("update failed"));
    let updated = words
        .get(&id)
        .expect("get failed")
        .expect("word should exist");
    assert_eq!(updated.translation, "jabłuszko");
    assert_eq!(updated.id_category, fruits);

    assert!(words.delete(&id).expect("delete failed"));
    assert!(words.get(&id).expect("get failed").is_none());
}

#[test]
fn test_words_listed_per_category() {
    let (storage, _temp) = create_test_storage();
    let categories = SqliteCategories::new(&storage);
    let words = SqliteWords::new(&storage);

    let fruits = categories.create("Fruits").expect("create failed");
    let animals = categories.create("Animals").expect("create failed");
    words.create(&fruits, &apple()).expect("create failed");
    words
        .create(&fruits, &NewWord::new("pear", "gruszka", "/img/p", "/audio/p"))
        .expect("create failed");
    words
        .create(&animals, &NewWord::new("dog", "pies", "/img/d", "/audio/d"))
        .expect("create failed");

    let fruit_words = words.list_by_category(&fruits).expect("list failed");
    assert_eq!(fruit_words.len(), 2);
    assert!(fruit_words.iter().all(|w| w.id_category == fruits));
    assert_eq!(words.list_by_category(&animals).expect("list failed").len(), 1);
}

#[test]
fn test_category_delete_cascades() {
    let (storage, _temp) = create_test_storage();
    let categories = SqliteCategories::new(&storage);
    let words = SqliteWords::new(&storage);

    let fruits = categories.create("Fruits").expect("create failed");
    let animals = categories.create("Animals").expect("create failed");
    let w1 = words.create(&fruits, &apple()).expect("create failed");
    let w2 = words
        .create(&fruits, &NewWord::new("pear", "gruszka", "/img/p", "/audio/p"))
        .expect("create failed");
    let dog = words
        .create(&animals, &NewWord::new("dog", "pies", "/img/d", "/audio/d"))
        .expect("create failed");

    assert!(categories.delete(&fruits).expect("delete failed"));

    assert!(categories.get(&fruits).expect("get failed").is_none());
    assert!(words.get(&w1).expect("get failed").is_none());
    assert!(words.get(&w2).expect("get failed").is_none());
    assert!(words.get(&dog).expect("get failed").is_some());
    assert_eq!(storage.stats().expect("stats failed").word_count, 1);
}

#[test]
fn test_orphan_audit() {
    let (storage, _temp) = create_test_storage();
    let categories = SqliteCategories::new(&storage);
    let words = SqliteWords::new(&storage);

    let fruits = categories.create("Fruits").expect("create failed");
    words.create(&fruits, &apple()).expect("create failed");
    // The repository trusts its caller; an unknown parent is stored as-is.
    let orphan = words.create("ghost", &apple()).expect("create failed");

    let orphans = storage.orphaned_words().expect("orphaned_words failed");
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].id, orphan);
    assert_eq!(storage.stats().expect("stats").orphaned_word_count, 1);

    assert_eq!(storage.prune_orphaned_words().expect("prune failed"), 1);
    assert!(storage.orphaned_words().expect("orphaned_words").is_empty());
    assert_eq!(storage.stats().expect("stats").word_count, 1);
}

#[test]
fn test_reset_clears_everything() {
    let (storage, _temp) = create_test_storage();
    let categories = SqliteCategories::new(&storage);
    let words = SqliteWords::new(&storage);

    let fruits = categories.create("Fruits").expect("create failed");
    words.create(&fruits, &apple()).expect("create failed");

    storage.reset().expect("reset failed");

    let stats = storage.stats().expect("stats failed");
    assert_eq!(stats.category_count, 0);
    assert_eq!(stats.word_count, 0);
    assert!(storage.is_initialized().expect("is_initialized failed"));
}

mod catalog_tests {
    use super::*;
    use wordbank::assets::FsAssetStore;
    use wordbank::catalog::{Catalog, INVALID_CATEGORY_ID, WordInput};
    use wordbank::error::Error;

    fn write_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"data").expect("write source file");
        path
    }

    fn full_input(dir: &Path) -> WordInput {
        WordInput {
            word: Some("apple".to_string()),
            translation: Some("jabłko".to_string()),
            image: Some(write_file(dir, "apple.png")),
            sound: Some(write_file(dir, "apple.mp3")),
        }
    }

    #[test]
    fn test_fruits_apple_walkthrough() {
        let (storage, temp) = create_test_storage();
        let assets = FsAssetStore::new(temp.path().join("assets"));
        let catalog = Catalog::sqlite(&storage, assets.clone());

        let fruits = catalog.create_category("Fruits").expect("create category");
        assert!(assets.root().join("img").join(&fruits.id).is_dir());
        assert!(assets.root().join("audio").join(&fruits.id).is_dir());

        let word = catalog
            .add_word(&fruits.id, &full_input(temp.path()))
            .expect("add word");
        assert_eq!(word.id_category, fruits.id);
        assert!(word.image.starts_with(&format!("/img/{}/", fruits.id)));
        assert!(word.image.ends_with(".png"));
        assert!(word.sound.starts_with(&format!("/audio/{}/", fruits.id)));
        assert!(assets.resolve(&word.image).expect("asset path").is_file());
        assert!(assets.resolve(&word.sound).expect("asset path").is_file());

        let listed = catalog.words(&fruits.id).expect("list words");
        assert_eq!(listed, vec![word.clone()]);

        let fetched = catalog.word(&fruits.id, &word.id).expect("get word");
        assert_eq!(fetched.translation, "jabłko");

        let deleted = catalog.delete_category(&fruits.id).expect("delete category");
        assert_eq!(deleted.category_name, "Fruits");
        assert!(!assets.root().join("img").join(&fruits.id).exists());
        assert!(
            SqliteWords::new(&storage)
                .get(&word.id)
                .expect("get failed")
                .is_none()
        );
    }

    #[test]
    fn test_update_word_across_categories_is_rejected() {
        let (storage, temp) = create_test_storage();
        let catalog = Catalog::sqlite(&storage, FsAssetStore::new(temp.path().join("assets")));

        let fruits = catalog.create_category("Fruits").expect("create");
        let animals = catalog.create_category("Animals").expect("create");
        let word = catalog
            .add_word(&fruits.id, &full_input(temp.path()))
            .expect("add word");

        let input = WordInput {
            translation: Some("pies".to_string()),
            ..WordInput::default()
        };
        let err = catalog
            .update_word(&animals.id, &word.id, &input)
            .expect_err("mismatched category must fail");
        assert!(matches!(err, Error::BadRequest { ref message } if message == INVALID_CATEGORY_ID));

        let err = catalog
            .update_word("missing", &word.id, &input)
            .expect_err("unknown category must fail");
        assert!(matches!(err, Error::BadRequest { .. }));

        let err = catalog
            .update_word(&fruits.id, "missing", &input)
            .expect_err("unknown word must fail");
        assert!(matches!(err, Error::NotFound { .. }));

        // Nothing was written.
        let stored = catalog.word(&fruits.id, &word.id).expect("get word");
        assert_eq!(stored.translation, "jabłko");
    }

    #[test]
    fn test_update_word_keeps_omitted_fields() {
        let (storage, temp) = create_test_storage();
        let assets = FsAssetStore::new(temp.path().join("assets"));
        let catalog = Catalog::sqlite(&storage, assets.clone());

        let fruits = catalog.create_category("Fruits").expect("create");
        let word = catalog
            .add_word(&fruits.id, &full_input(temp.path()))
            .expect("add word");

        let input = WordInput {
            sound: Some(write_file(temp.path(), "apple2.ogg")),
            ..WordInput::default()
        };
        let updated = catalog
            .update_word(&fruits.id, &word.id, &input)
            .expect("update");
        assert_eq!(updated.word, "apple");
        assert_eq!(updated.image, word.image);
        assert_ne!(updated.sound, word.sound);
        assert!(updated.sound.ends_with(".ogg"));
        assert!(!assets.resolve(&word.sound).expect("asset path").exists());

        assert_eq!(catalog.word(&fruits.id, &word.id).expect("get"), updated);
    }

    #[test]
    fn test_add_word_to_missing_category_stores_nothing() {
        let (storage, temp) = create_test_storage();
        let catalog = Catalog::sqlite(&storage, FsAssetStore::new(temp.path().join("assets")));

        let err = catalog
            .add_word("missing", &full_input(temp.path()))
            .expect_err("unknown category must fail");
        assert!(matches!(err, Error::BadRequest { .. }));
        assert_eq!(storage.stats().expect("stats").word_count, 0);
    }
}

mod property_tests {
    use proptest::prelude::*;
    use tempfile::TempDir;
    use wordbank::core::NewWord;
    use wordbank::storage::{
        CategoryRepository, SqliteCategories, SqliteStorage, SqliteWords, WordRepository,
    };

    fn memory_storage() -> SqliteStorage {
        let storage = SqliteStorage::in_memory().expect("in-memory storage");
        storage.init().expect("init");
        storage
    }

    proptest! {
        #[test]
        fn category_name_round_trips(name in "\\PC{0,40}") {
            let storage = memory_storage();
            let categories = SqliteCategories::new(&storage);

            let id = categories.create(&name).expect("create");
            let loaded = categories.get(&id).expect("get").expect("exists");
            prop_assert_eq!(loaded.category_name, name);
        }

        #[test]
        fn words_listed_match_words_created(counts in prop::collection::vec(0usize..6, 1..4)) {
            let storage = memory_storage();
            let categories = SqliteCategories::new(&storage);
            let words = SqliteWords::new(&storage);

            let ids: Vec<String> = counts
                .iter()
                .map(|_| categories.create("c").expect("create"))
                .collect();
            for (id, &count) in ids.iter().zip(&counts) {
                for i in 0..count {
                    let text = format!("w{i}");
                    words
                        .create(id, &NewWord::new(text.as_str(), "t", "/img/x", "/audio/x"))
                        .expect("create word");
                }
            }

            for (id, &count) in ids.iter().zip(&counts) {
                prop_assert_eq!(words.list_by_category(id).expect("list").len(), count);
            }

            // Deleting the first category removes exactly its words.
            categories.delete(&ids[0]).expect("delete");
            let remaining: usize = counts[1..].iter().sum();
            prop_assert_eq!(storage.stats().expect("stats").word_count, remaining);
        }

        #[test]
        fn word_text_round_trips_through_file_db(word in "\\PC{1,30}", translation in "\\PC{1,30}") {
            let temp = TempDir::new().expect("temp dir");
            let storage = SqliteStorage::open(temp.path().join("p.db")).expect("open");
            storage.init().expect("init");

            let category = SqliteCategories::new(&storage).create("c").expect("create");
            let words = SqliteWords::new(&storage);
            let id = words
                .create(&category, &NewWord::new(word.as_str(), translation.as_str(), "/img/x", "/audio/x"))
                .expect("create word");

            let loaded = words.get(&id).expect("get").expect("exists");
            prop_assert_eq!(loaded.word, word);
            prop_assert_eq!(loaded.translation, translation);
        }
    }
}

mod cli_tests {
    use std::path::PathBuf;
    use tempfile::TempDir;
    use wordbank::cli::commands::execute;
    use wordbank::cli::parser::{CategoryCommands, Cli, Commands, WordCommands, WordFields};

    /// Helper to create a CLI struct for testing.
    fn make_cli(temp: &TempDir, command: Commands) -> Cli {
        Cli {
            db_path: Some(temp.path().join("test.db")),
            asset_dir: Some(temp.path().join("assets")),
            verbose: false,
            format: "text".to_string(),
            command,
        }
    }

    /// Helper to create a CLI struct with JSON format.
    fn make_cli_json(temp: &TempDir, command: Commands) -> Cli {
        Cli {
            format: "json".to_string(),
            ..make_cli(temp, command)
        }
    }

    fn init(temp: &TempDir) {
        execute(&make_cli(temp, Commands::Init { force: false })).expect("init");
    }

    fn add_category(temp: &TempDir, name: &str) -> String {
        let out = execute(&make_cli_json(
            temp,
            Commands::Category(CategoryCommands::Add {
                name: name.to_string(),
            }),
        ))
        .expect("category add");
        let json: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        json["id"].as_str().expect("id").to_string()
    }

    fn source_file(temp: &TempDir, name: &str) -> PathBuf {
        let path = temp.path().join(name);
        std::fs::write(&path, b"bytes").expect("write source");
        path
    }

    #[test]
    fn test_cmd_init() {
        let temp = TempDir::new().expect("temp dir");
        let result = execute(&make_cli(&temp, Commands::Init { force: false }));
        assert!(result.expect("init result").contains("Initialized"));
        assert!(temp.path().join("test.db").exists());
        assert!(temp.path().join("assets").is_dir());
    }

    #[test]
    fn test_cmd_init_force() {
        let temp = TempDir::new().expect("temp dir");
        init(&temp);
        add_category(&temp, "Fruits");

        // Second init without force should fail
        assert!(execute(&make_cli(&temp, Commands::Init { force: false })).is_err());

        // With force, the data is gone
        execute(&make_cli(&temp, Commands::Init { force: true })).expect("force init");
        let out = execute(&make_cli(&temp, Commands::Category(CategoryCommands::List)))
            .expect("list");
        assert!(out.contains("No categories found."));
    }

    #[test]
    fn test_commands_require_init() {
        let temp = TempDir::new().expect("temp dir");
        let err = execute(&make_cli(&temp, Commands::Status)).expect_err("must fail");
        assert!(err.to_string().contains("not initialized"));
    }

    #[test]
    fn test_cmd_status_json() {
        let temp = TempDir::new().expect("temp dir");
        init(&temp);
        add_category(&temp, "Fruits");

        let out = execute(&make_cli_json(&temp, Commands::Status)).expect("status");
        let json: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(json["category_count"], 1);
        assert_eq!(json["word_count"], 0);
    }

    #[test]
    fn test_category_lifecycle() {
        let temp = TempDir::new().expect("temp dir");
        init(&temp);
        let id = add_category(&temp, "Fruits");

        let out = execute(&make_cli(
            &temp,
            Commands::Category(CategoryCommands::Rename {
                id: id.clone(),
                name: "Fruit".to_string(),
            }),
        ))
        .expect("rename");
        assert!(out.contains("Category: Fruit"));

        let out = execute(&make_cli(
            &temp,
            Commands::Category(CategoryCommands::Delete {
                id: id.clone(),
                yes: false,
            }),
        ));
        assert!(out.is_err());

        let out = execute(&make_cli(
            &temp,
            Commands::Category(CategoryCommands::Delete { id: id.clone(), yes: true }),
        ))
        .expect("delete");
        assert!(out.contains("Deleted category: Fruit"));

        let err = execute(&make_cli(&temp, Commands::Category(CategoryCommands::Show { id })))
            .expect_err("deleted category");
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_word_lifecycle() {
        let temp = TempDir::new().expect("temp dir");
        init(&temp);
        let category = add_category(&temp, "Fruits");

        let fields = WordFields {
            text: Some("apple".to_string()),
            translation: Some("jabłko".to_string()),
            image: Some(source_file(&temp, "apple.png")),
            sound: Some(source_file(&temp, "apple.mp3")),
        };
        let out = execute(&make_cli_json(
            &temp,
            Commands::Word(WordCommands::Add {
                category: category.clone(),
                fields,
            }),
        ))
        .expect("word add");
        let json: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        let word = json["id"].as_str().expect("id").to_string();
        assert_eq!(json["idCategory"], category.as_str());

        let out = execute(&make_cli(
            &temp,
            Commands::Word(WordCommands::Update {
                category: category.clone(),
                word: word.clone(),
                fields: WordFields {
                    translation: Some("jabłuszko".to_string()),
                    ..WordFields::default()
                },
            }),
        ))
        .expect("word update");
        assert!(out.contains("jabłuszko"));

        let out = execute(&make_cli(
            &temp,
            Commands::Word(WordCommands::List {
                category: category.clone(),
            }),
        ))
        .expect("word list");
        assert!(out.contains("apple"));

        let out = execute(&make_cli(
            &temp,
            Commands::Word(WordCommands::Delete {
                category: category.clone(),
                word,
            }),
        ))
        .expect("word delete");
        assert!(out.contains("Deleted word: apple"));

        let out = execute(&make_cli(&temp, Commands::Word(WordCommands::List { category })))
            .expect("word list");
        assert!(out.contains("No words found."));
    }

    #[test]
    fn test_word_add_missing_field() {
        let temp = TempDir::new().expect("temp dir");
        init(&temp);
        let category = add_category(&temp, "Fruits");

        let err = execute(&make_cli(
            &temp,
            Commands::Word(WordCommands::Add {
                category,
                fields: WordFields {
                    text: Some("apple".to_string()),
                    ..WordFields::default()
                },
            }),
        ))
        .expect_err("missing fields");
        assert_eq!(err.kind(), "bad_request");
    }

    #[test]
    fn test_cmd_reset_and_check() {
        let temp = TempDir::new().expect("temp dir");
        init(&temp);
        let category = add_category(&temp, "Fruits");

        let out = execute(&make_cli(&temp, Commands::Check { prune: false })).expect("check");
        assert!(out.contains("No orphaned words."));

        assert!(execute(&make_cli(&temp, Commands::Reset { yes: false })).is_err());
        let out = execute(&make_cli(&temp, Commands::Reset { yes: true })).expect("reset");
        assert!(out.contains("reset"));
        assert!(!temp.path().join("assets").join("img").join(&category).exists());

        let out = execute(&make_cli(&temp, Commands::Category(CategoryCommands::List)))
            .expect("list");
        assert!(out.contains("No categories found."));
    }
}
