use anyhow::{Result, anyhow};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::{CacheBackend, Config};
use crate::database::{CacheStats, SqliteSummaryCache};
use crate::file_utils::FileManager;
use crate::language::{LanguageScores, LanguageTag, detect, detect_with_scores};
use crate::summary::{
    MemorySummaryCache, SummaryCache, SummaryEngine, SummaryStats, clean_summary, fallback_summary,
};
use crate::text_utils::trim_text;

// @module: Application controller for note summarization

/// Cache the controller's engine is wired to
enum CacheHandle {
    Sqlite(SqliteSummaryCache),
    Memory(MemorySummaryCache),
}

/// Summary of one note file found by a folder scan
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScanEntry {
    /// Path of the note file
    pub path: PathBuf,
    /// Detected language
    pub language: LanguageTag,
    /// Summary of the file's content
    pub summary: String,
}

/// State of the summary cache
#[derive(Debug, Clone)]
pub struct CacheOverview {
    /// Backend in use
    pub backend: CacheBackend,
    /// Whether summaries are being cached
    pub enabled: bool,
    /// Number of cached summaries
    pub entries: usize,
    /// Database statistics, for the SQLite backend
    pub database: Option<CacheStats>,
    /// Statistics of this process' engine
    pub engine: SummaryStats,
}

impl fmt::Display for CacheOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.enabled {
            return write!(f, "Summary cache disabled");
        }

        write!(f, "{} cache: {} entries", self.backend.display_name(), self.entries)?;
        if let Some(stats) = &self.database {
            write!(f, " ({})", stats)?;
        }
        Ok(())
    }
}

/// Main application controller for note summarization
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Engine shared by every command
    engine: SummaryEngine,
    // @field: Concrete cache behind the engine
    cache: CacheHandle,
}

impl Controller {
    /// Create a controller for test purposes with an in-memory cache
    pub fn new_for_test() -> Result<Self> {
        let mut config = Config::default();
        config.cache.backend = CacheBackend::Memory;
        Self::with_config(config)
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let cache = Self::open_cache(&config);
        let engine = match &cache {
            CacheHandle::Sqlite(sqlite) => SummaryEngine::new(Arc::new(sqlite.clone())),
            CacheHandle::Memory(memory) => SummaryEngine::new(Arc::new(memory.clone())),
        };

        Ok(Self {
            config,
            engine,
            cache,
        })
    }

    fn open_cache(config: &Config) -> CacheHandle {
        if !config.cache.enabled {
            debug!("Summary cache disabled by configuration");
            return CacheHandle::Memory(MemorySummaryCache::new(false));
        }

        match config.cache.backend {
            CacheBackend::Memory => CacheHandle::Memory(MemorySummaryCache::new(true)),
            CacheBackend::Sqlite => {
                let opened = match &config.cache.database_path {
                    Some(path) => SqliteSummaryCache::open(path),
                    None => SqliteSummaryCache::open_default(),
                };

                match opened {
                    Ok(sqlite) => CacheHandle::Sqlite(sqlite),
                    Err(e) => {
                        warn!("Cannot open the summary database, caching in memory instead: {:#}", e);
                        CacheHandle::Memory(MemorySummaryCache::new(true))
                    }
                }
            }
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Engine used by every command
    pub fn engine(&self) -> &SummaryEngine {
        &self.engine
    }

    /// Backend actually serving the cache
    ///
    /// Differs from the configured one when the database could not be opened.
    pub fn cache_backend(&self) -> CacheBackend {
        match self.cache {
            CacheHandle::Sqlite(_) => CacheBackend::Sqlite,
            CacheHandle::Memory(_) => CacheBackend::Memory,
        }
    }

    /// Summarize a text for display
    ///
    /// Unless `raw` is set, the summary is cleaned when the configuration
    /// asks for it.
    pub fn summarize_text(&self, text: &str, raw: bool) -> String {
        let summary = self.engine.summarize(text);
        if !raw && self.config.summary.clean_output {
            clean_summary(&summary)
        } else {
            summary
        }
    }

    /// Summarize the content of a note file
    pub fn summarize_file<P: AsRef<Path>>(&self, path: P, raw: bool) -> Result<String> {
        let content = FileManager::read_to_string(path)?;
        Ok(self.summarize_text(&content, raw))
    }

    /// Language scores of a text
    pub fn detect(&self, text: &str) -> LanguageScores {
        detect_with_scores(text)
    }

    /// Summarize every note file below `dir`
    ///
    /// Files are summarized concurrently on the blocking pool and reported
    /// in path order. Files that cannot be read are skipped with a warning.
    pub async fn scan_folder<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<ScanEntry>> {
        let dir = dir.as_ref();
        if !FileManager::dir_exists(dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", dir));
        }

        let files = FileManager::find_files(dir, &self.config.summary.file_extensions)?;
        if files.is_empty() {
            warn!("No note files found in {:?}", dir);
            return Ok(Vec::new());
        }

        info!("Summarizing {} note files from {:?}", files.len(), dir);

        let progress_bar = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} notes ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        let concurrency = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        let results: Vec<Option<ScanEntry>> = stream::iter(files)
            .map(|path| {
                let progress_bar = progress_bar.clone();
                async move {
                    let entry = self.summarize_scanned_file(path).await;
                    progress_bar.inc(1);
                    entry
                }
            })
            .buffered(concurrency)
            .collect()
            .await;

        progress_bar.finish_and_clear();

        let entries: Vec<ScanEntry> = results.into_iter().flatten().collect();
        info!("Summarized {} note files", entries.len());
        Ok(entries)
    }

    async fn summarize_scanned_file(&self, path: PathBuf) -> Option<ScanEntry> {
        let content = match FileManager::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping {:?}: {:#}", path, e);
                return None;
            }
        };

        let summary = match self.engine.spawn(content.clone()).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summary task failed for {:?}, using the extractive fallback: {}", path, e);
                fallback_summary(&content)
            }
        };

        let summary = if self.config.summary.clean_output {
            clean_summary(&summary)
        } else {
            summary
        };

        Some(ScanEntry {
            language: detect(trim_text(&content)),
            path,
            summary,
        })
    }

    /// Current state of the summary cache
    pub fn cache_stats(&self) -> Result<CacheOverview> {
        let (entries, database) = match &self.cache {
            CacheHandle::Sqlite(sqlite) => {
                let stats = sqlite.stats()?;
                (stats.entries.max(0) as usize, Some(stats))
            }
            CacheHandle::Memory(memory) => (memory.len(), None),
        };

        Ok(CacheOverview {
            backend: self.cache_backend(),
            enabled: self.config.cache.enabled,
            entries,
            database,
            engine: self.engine.stats(),
        })
    }

    /// Remove every cached summary, returning how many were removed
    pub fn clear_cache(&self) -> Result<usize> {
        let removed = match &self.cache {
            CacheHandle::Sqlite(sqlite) => sqlite.clear()?,
            CacheHandle::Memory(memory) => {
                let count = memory.len();
                memory.clear();
                count
            }
        };

        info!("Removed {} cached summaries", removed);
        Ok(removed)
    }
}
