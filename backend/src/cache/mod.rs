//! Table cache - Memoize the cleaned dataset
//!
//! Holds one cleaned table keyed by source path, SHA-256 of the file bytes
//! and the cleaning plan. A changed key replaces the entry; nothing else
//! evicts it.

use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::api::logs::{log_info, log_success};
use crate::error::PipelineResult;
use crate::models::PlayerTable;
use crate::parser::read_source;
use crate::transform::{load_players_from_bytes, CleaningPlan};

/// Process-wide cache used by the CLI and HTTP server
pub static TABLE_CACHE: Lazy<Mutex<TableCache>> = Lazy::new(|| Mutex::new(TableCache::new()));

/// Identity of a cleaned table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub path: PathBuf,
    /// Hex SHA-256 of the raw file bytes
    pub content_hash: String,
    /// Hex SHA-256 of the serialized plan
    pub plan_hash: String,
}

impl CacheKey {
    pub fn new(path: &Path, bytes: &[u8], plan: &CleaningPlan) -> PipelineResult<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            content_hash: sha256_hex(bytes),
            plan_hash: sha256_hex(plan.to_json()?.as_bytes()),
        })
    }
}

/// Single-entry memo of the last loaded table
#[derive(Debug, Default)]
pub struct TableCache {
    entry: Option<(CacheKey, Arc<PlayerTable>)>,
    hits: u64,
    misses: u64,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table when path, bytes and plan are unchanged,
    /// otherwise load it and replace the entry.
    pub fn load(&mut self, path: &Path, plan: &CleaningPlan) -> PipelineResult<Arc<PlayerTable>> {
        let bytes = read_source(path)?;
        let key = CacheKey::new(path, &bytes, plan)?;

        if let Some((cached_key, table)) = &self.entry {
            if *cached_key == key {
                self.hits += 1;
                log_info(format!("Using cached table for {}", path.display()));
                return Ok(Arc::clone(table));
            }
        }

        self.misses += 1;
        log_info(format!("Loading {} ({})", path.display(), &key.content_hash[..12]));
        let table = Arc::new(load_players_from_bytes(&bytes, plan)?);
        self.entry = Some((key, Arc::clone(&table)));
        log_success(format!("Cached {} rows", table.len()));
        Ok(table)
    }

    /// Key of the current entry, if any
    pub fn key(&self) -> Option<&CacheKey> {
        self.entry.as_ref().map(|(key, _)| key)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Load through the process-wide cache.
pub fn load_cached(path: &Path, plan: &CleaningPlan) -> PipelineResult<Arc<PlayerTable>> {
    // the entry is only replaced after a successful load
    let mut cache = TABLE_CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    cache.load(path, plan)
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
