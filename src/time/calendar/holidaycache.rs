use std::collections::{
    BTreeMap,
    HashMap,
    VecDeque
};
use std::fmt;
use std::sync::{
    Arc,
    PoisonError,
    RwLock
};

use chrono::NaiveDate;
use chrono_tz::Tz;
use log::debug;

/// One rule hit on a date: the flags and the index of the rule in its calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolidayHit {
    pub actual: bool,
    pub observed: bool,
    pub index: usize
}

/// Every holiday hit of one year, first rule per date.
pub type YearHits = BTreeMap<NaiveDate, HolidayHit>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Number of (year, location) entries above which eviction starts.
    pub max_entries: usize,
    /// Number of entries left after an eviction.
    pub target_entries: usize
}

impl CacheConfig {
    pub fn new(max_entries: usize, target_entries: usize) -> CacheConfig {
        CacheConfig {
            max_entries: max_entries.max(1),
            target_entries: target_entries.min(max_entries)
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig::new(32, 24)
    }
}

type CacheKey = (i32, Tz);

struct CacheInner {
    map: HashMap<CacheKey, Arc<YearHits>>,
    insertion_order: VecDeque<CacheKey>
}

/// Bounded per-(year, location) store of computed holiday hits.
///
/// Entries are evicted oldest-inserted first once `max_entries` is exceeded,
/// down to `target_entries`. Computation runs outside the lock, so two threads
/// may compute the same year; the results are identical and the first insert
/// is kept.
pub struct HolidayCache {
    config: CacheConfig,
    inner: RwLock<CacheInner>
}

impl HolidayCache {
    pub fn new(config: CacheConfig) -> HolidayCache {
        HolidayCache {
            config,
            inner: RwLock::new(CacheInner {
                map: HashMap::new(),
                insertion_order: VecDeque::new()
            })
        }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.map.clear();
        inner.insertion_order.clear();
    }

    pub fn get_or_compute(
        &self,
        year: i32,
        location: Tz,
        compute: impl FnOnce() -> YearHits
    ) -> Arc<YearHits> {
        let key = (year, location);

        // poisoning leaves only derived data behind, so the guard is reused
        if let Some(hits) = self.inner.read().unwrap_or_else(PoisonError::into_inner).map.get(&key) {
            return Arc::clone(hits);
        }

        let computed = Arc::new(compute());

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(hits) = inner.map.get(&key) {
            return Arc::clone(hits);
        }

        inner.map.insert(key, Arc::clone(&computed));
        inner.insertion_order.push_back(key);

        if inner.map.len() > self.config.max_entries {
            let before = inner.map.len();
            while inner.map.len() > self.config.target_entries {
                match inner.insertion_order.pop_front() {
                    Some(oldest) => {
                        inner.map.remove(&oldest);
                    },
                    None => break
                }
            }
            debug!(
                "holiday cache evicted {} entries, {} remain",
                before - inner.map.len(),
                inner.map.len()
            );
        }

        computed
    }
}

// a cloned cache starts out empty
impl Clone for HolidayCache {
    fn clone(&self) -> Self {
        HolidayCache::new(self.config)
    }
}

impl fmt::Debug for HolidayCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HolidayCache")
            .field("config", &self.config)
            .field("len", &self.len())
            .finish()
    }
}
