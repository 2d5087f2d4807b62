//! Memoization of `select` results.
//!
//! Entries are keyed by table name and resolved filter and live until the
//! table is mutated or dropped. There is no size bound and no expiry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::table::Filter;

/// Identifies one memoized query: the table plus its coerced filter, or `None`
/// for a full scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub table: String,
    pub filter: Option<Filter>,
}

impl CacheKey {
    pub fn new(table: impl Into<String>, filter: Option<Filter>) -> Self {
        Self {
            table: table.into(),
            filter,
        }
    }
}

/// Counters reported by [ResultCache::stats].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Snapshot store for query results.
#[derive(Debug)]
pub struct ResultCache<T> {
    entries: HashMap<CacheKey, Arc<T>>,
    hits: u64,
    misses: u64,
}

impl<T> Default for ResultCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<T> ResultCache<T> {
    /// Returns the snapshot stored under `key`, computing and storing it with
    /// `compute` on a miss.
    ///
    /// Nothing is stored when `compute` fails.
    ///
    /// # Example
    /// ```
    /// # use primdb::cache::{CacheKey, ResultCache};
    /// let mut cache = ResultCache::default();
    /// let key = CacheKey::new("users", None);
    ///
    /// let first = cache.get_or_insert_with(key.clone(), || Ok(vec![1, 2])).unwrap();
    /// let second = cache.get_or_insert_with(key, || Ok(vec![3])).unwrap();
    ///
    /// assert_eq!(*second, vec![1, 2]);
    /// assert_eq!(cache.stats().hits, 1);
    /// # drop(first);
    /// ```
    pub fn get_or_insert_with<F>(&mut self, key: CacheKey, compute: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            log::debug!("cache hit for {:?}", key);
            return Ok(Arc::clone(hit));
        }

        self.misses += 1;
        log::debug!("cache miss for {:?}", key);
        let value = Arc::new(compute()?);
        self.entries.insert(key, Arc::clone(&value));
        Ok(value)
    }

    /// Removes every entry that belongs to `table` and returns how many were
    /// evicted.
    pub fn invalidate(&mut self, table: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.table != table);
        let evicted = before - self.entries.len();
        if evicted > 0 {
            log::debug!("evicted {evicted} cached result(s) of table {table:?}");
        }
        evicted
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
