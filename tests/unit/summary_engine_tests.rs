/*!
 * Tests for the summary engine
 */

use std::sync::atomic::Ordering;
use std::sync::Arc;

use notesum::errors::SummaryError;
use notesum::language::LanguageTag;
use notesum::summary::{
    CacheKey, MemorySummaryCache, SummaryCache, SummaryEngine, SummaryStats, extractive_summarize,
};

use crate::common::{self, ENGLISH_NOTE, FRENCH_NOTE, FailingCache, ReadOnlyCache};

/// Test that a second call is served from the cache
#[test]
fn test_summarize_calledTwice_shouldComputeOnce() {
    common::init_logging();
    let cache = MemorySummaryCache::default();
    let engine = SummaryEngine::new(Arc::new(cache.clone()));

    let first = engine.summarize(ENGLISH_NOTE);
    let second = engine.summarize(ENGLISH_NOTE);

    assert_eq!(first, second);
    assert_eq!(cache.writes(), 1);
    assert_eq!(
        engine.stats(),
        SummaryStats {
            hits: 1,
            misses: 1,
            computations: 1,
            cache_errors: 0,
        }
    );
    assert!((engine.stats().hit_rate() - 0.5).abs() < f64::EPSILON);
}

/// Test that a pre-populated entry is returned verbatim
#[test]
fn test_summarize_withStoredEntry_shouldReturnItUnchanged() {
    let cache = MemorySummaryCache::default();
    let key = CacheKey::derive(ENGLISH_NOTE, LanguageTag::En);
    cache.put(&key, "stored summary").unwrap();
    let engine = SummaryEngine::new(Arc::new(cache));

    assert_eq!(engine.summarize(ENGLISH_NOTE), "stored summary");
    assert_eq!(engine.stats().computations, 0);
}

/// Test that surrounding whitespace maps to the same entry
#[test]
fn test_summarize_withPaddedText_shouldShareEntry() {
    let cache = MemorySummaryCache::default();
    let engine = SummaryEngine::new(Arc::new(cache.clone()));

    engine.summarize(ENGLISH_NOTE);
    engine.summarize(&format!("\n\t{}   ", ENGLISH_NOTE));

    assert_eq!(cache.len(), 1);
    assert_eq!(engine.stats().hits, 1);
}

/// Test that an unreachable cache only costs a recomputation
#[test]
fn test_summarize_withFailingCache_shouldStillSummarize() {
    common::init_logging();
    let cache = Arc::new(FailingCache::default());
    let engine = SummaryEngine::new(cache.clone());

    let summary = engine.summarize(FRENCH_NOTE);

    assert_eq!(summary, extractive_summarize(FRENCH_NOTE.trim()));
    assert_eq!(cache.gets.load(Ordering::SeqCst), 1);
    // The read failed, so no write is attempted
    assert_eq!(cache.puts.load(Ordering::SeqCst), 0);
    assert_eq!(engine.stats().cache_errors, 1);
}

/// Test that a failed write is swallowed
#[test]
fn test_summarize_withReadOnlyCache_shouldIgnoreWriteFailure() {
    let engine = SummaryEngine::new(Arc::new(ReadOnlyCache));

    assert_eq!(engine.summarize(ENGLISH_NOTE), engine.summarize(ENGLISH_NOTE));

    let stats = engine.stats();
    assert_eq!(stats.computations, 2);
    assert_eq!(stats.cache_errors, 2);
}

/// Test that different languages never share an entry
#[test]
fn test_summarize_withDifferentTexts_shouldCreateSeparateEntries() {
    let cache = MemorySummaryCache::default();
    let engine = SummaryEngine::new(Arc::new(cache.clone()));

    engine.summarize(ENGLISH_NOTE);
    engine.summarize(FRENCH_NOTE);

    assert_eq!(cache.len(), 2);
    assert!(cache
        .get(&CacheKey::derive(FRENCH_NOTE, LanguageTag::Fr))
        .unwrap()
        .is_some());
}

/// Test concurrent calls on the same text from several threads
#[test]
fn test_summarize_fromManyThreads_shouldAgree() {
    let cache = MemorySummaryCache::default();
    let engine = SummaryEngine::new(Arc::new(cache.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.summarize(ENGLISH_NOTE))
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.writes(), 1);
}

/// Test the asynchronous task with tokio-test
#[test]
fn test_spawn_withTokioTest_shouldDeliverSummary() {
    let engine = SummaryEngine::in_memory();

    let result = tokio_test::block_on(async { engine.spawn(ENGLISH_NOTE).await });

    assert_eq!(result.unwrap(), engine.summarize(ENGLISH_NOTE));
}

/// Test that many tasks can run at once
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_spawn_manyTasks_shouldAllComplete() {
    let engine = SummaryEngine::in_memory();
    let notes: Vec<String> = (0..16)
        .map(|i| format!("Note number {} is long enough to be summarized. It has two sentences.", i))
        .collect();

    let tasks: Vec<_> = notes.iter().map(|note| engine.spawn(note.clone())).collect();
    let summaries = futures::future::join_all(tasks).await;

    assert_eq!(summaries.len(), 16);
    for (note, summary) in notes.iter().zip(summaries) {
        assert_eq!(summary.unwrap(), extractive_summarize(note));
    }
    assert_eq!(engine.cache().len(), 16);
}

/// Test that a cancelled task reports the cancellation
#[tokio::test]
async fn test_spawn_cancelledBeforeStart_shouldReportCancelled() {
    let engine = SummaryEngine::in_memory();

    let task = engine.spawn(ENGLISH_NOTE);
    task.cancel();

    match task.await {
        Err(SummaryError::Cancelled) => {}
        // The blocking pool may have picked the job up already
        Ok(summary) => assert_eq!(summary, extractive_summarize(ENGLISH_NOTE)),
        Err(other) => panic!("unexpected error: {}", other),
    }
}
