/*!
 * Tests for the summary cache backends
 */

use std::sync::Arc;

use notesum::database::{DatabaseConnection, SqliteSummaryCache};
use notesum::language::LanguageTag;
use notesum::summary::{CacheKey, MemorySummaryCache, SummaryCache, SummaryEngine};

use crate::common::{self, ENGLISH_NOTE, FRENCH_NOTE};

/// Every backend must behave the same way through the trait
fn backends() -> Vec<Box<dyn SummaryCache>> {
    vec![
        Box::new(MemorySummaryCache::default()),
        Box::new(SqliteSummaryCache::new_in_memory().expect("Failed to create SQLite cache")),
    ]
}

/// Test write-once semantics across backends
#[test]
fn test_put_withExistingKey_shouldKeepFirstValueForEveryBackend() {
    for cache in backends() {
        let key = CacheKey::derive("same text", LanguageTag::En);

        cache.put(&key, "first").unwrap();
        cache.put(&key, "second").unwrap();

        assert_eq!(cache.get(&key).unwrap(), Some("first".to_string()), "backend {}", cache.name());
        assert_eq!(cache.len(), 1, "backend {}", cache.name());
    }
}

/// Test that a miss is not an error
#[test]
fn test_get_withUnknownKey_shouldMissForEveryBackend() {
    for cache in backends() {
        let key = CacheKey::derive("never stored", LanguageTag::Fr);
        assert!(cache.get(&key).unwrap().is_none(), "backend {}", cache.name());
        assert!(cache.is_empty());
    }
}

/// Test that summaries survive reopening the database
#[test]
fn test_sqliteCache_shouldPersistAcrossEngines() {
    common::init_logging();
    let temp_dir = common::create_temp_dir().unwrap();
    let db_path = temp_dir.path().join("cache").join("summaries.db");

    let first_summary = {
        let cache = SqliteSummaryCache::open(&db_path).unwrap();
        let engine = SummaryEngine::new(Arc::new(cache));
        engine.summarize(FRENCH_NOTE)
    };

    let cache = SqliteSummaryCache::open(&db_path).unwrap();
    let engine = SummaryEngine::new(Arc::new(cache.clone()));

    assert_eq!(engine.summarize(FRENCH_NOTE), first_summary);
    assert_eq!(engine.stats().hits, 1);
    assert_eq!(engine.stats().computations, 0);
    assert_eq!(cache.stats().unwrap().total_hits, 1);
}

/// Test that clearing the SQLite cache forces recomputation
#[test]
fn test_sqliteCache_clear_shouldForceRecomputation() {
    let cache = SqliteSummaryCache::new_in_memory().unwrap();
    let engine = SummaryEngine::new(Arc::new(cache.clone()));

    engine.summarize(ENGLISH_NOTE);
    engine.summarize(FRENCH_NOTE);
    assert_eq!(cache.clear().unwrap(), 2);

    engine.summarize(ENGLISH_NOTE);
    assert_eq!(engine.stats().computations, 3);
    assert_eq!(cache.len(), 1);
}

/// Test that the language is recorded alongside each entry
#[test]
fn test_sqliteCache_shouldStoreLanguageColumn() {
    let db = DatabaseConnection::new_in_memory().unwrap();
    let cache = SqliteSummaryCache::new(db.clone());
    let engine = SummaryEngine::new(Arc::new(cache));

    engine.summarize(ENGLISH_NOTE);
    engine.summarize(FRENCH_NOTE);

    let languages: Vec<String> = db
        .execute(|conn| {
            let mut stmt = conn.prepare("SELECT language FROM summary_cache ORDER BY language")?;
            let rows = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(rows)
        })
        .unwrap();

    assert_eq!(languages, vec!["en", "fr"]);
}

/// Test that the SQLite cache can be shared between threads
#[test]
fn test_sqliteCache_fromManyThreads_shouldStoreOnce() {
    let cache = SqliteSummaryCache::new_in_memory().unwrap();
    let engine = SummaryEngine::new(Arc::new(cache.clone()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.summarize(ENGLISH_NOTE))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 1);
}
