use std::env;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use log::{debug, warn};

use crate::error::ParseError;
use crate::geometry::ParsedPath;
use crate::parse;

pub const DEFAULT_CAPACITY: usize = 1024;
pub const CAPACITY_ENV_VAR: &str = "SVGPATH_CACHE_CAPACITY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of resident entries. 0 disables storage.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
	CacheConfig { capacity: DEFAULT_CAPACITY }
    }
}

impl CacheConfig {
    pub fn with_capacity(capacity: usize) -> Self {
	CacheConfig { capacity }
    }

    ///Reads the capacity from `SVGPATH_CACHE_CAPACITY`, falling back to the
    ///default when unset or unreadable
    pub fn from_env() -> Self {
	CacheConfig::from_var(env::var(CAPACITY_ENV_VAR).ok())
    }

    fn from_var(val: Option<String>) -> Self {
	match val {
	    Some(val) => match val.trim().parse() {
		Ok(capacity) => CacheConfig { capacity },
		Err(err) => {
		    warn!("ignoring {}={:?}: {}", CAPACITY_ENV_VAR, val, err);
		    CacheConfig::default()
		}
	    },
	    None => CacheConfig::default(),
	}
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

#[derive(Debug)]
struct Slot {
    scale: u64,
    parsed: Arc<ParsedPath>,
    last_used: u64,
}

#[derive(Debug, Default)]
struct Inner {
    // description -> one slot per scale it was requested at
    slots: FxHashMap<String, Vec<Slot>>,
    len: usize,
    tick: u64,
    stats: CacheStats,
}

impl Inner {
    fn lookup(&mut self, description: &str, scale: u64) -> Option<Arc<ParsedPath>> {
	let tick = self.tick;
	let slot = self.slots.get_mut(description)?.iter_mut().find(|s| s.scale == scale)?;
	slot.last_used = tick;

	Some(slot.parsed.clone())
    }

    fn evict_lru(&mut self) {
	let oldest = self.slots.iter()
	    .flat_map(|(d, slots)| slots.iter().map(move |s| (s.last_used, d, s.scale)))
	    .min_by_key(|(last_used, _, _)| *last_used)
	    .map(|(_, d, scale)| (d.clone(), scale));

	if let Some((description, scale)) = oldest {
	    if let Some(slots) = self.slots.get_mut(&description) {
		slots.retain(|s| s.scale != scale);
		if slots.is_empty() {
		    self.slots.remove(&description);
		}
	    }

	    self.len -= 1;
	    self.stats.evictions += 1;
	    debug!("evicted path {:?} at scale {}", description, f64::from_bits(scale));
	}
    }
}

fn scale_key(scale: f64) -> u64 {
    // -0.0 and 0.0 scale identically
    if scale == 0.0 { 0.0f64.to_bits() } else { scale.to_bits() }
}

/// Memoizes parsed and scaled path descriptions, keyed by the verbatim
/// description text and the scale factor.
#[derive(Debug)]
pub struct PathCache {
    config: CacheConfig,
    inner: Mutex<Inner>,
}

impl Default for PathCache {
    fn default() -> Self {
	PathCache::new(CacheConfig::default())
    }
}

impl PathCache {
    pub fn new(config: CacheConfig) -> Self {
	PathCache {
	    config,
	    inner: Mutex::new(Inner::default()),
	}
    }

    pub fn config(&self) -> CacheConfig {
	self.config
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
	self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    ///Returns the shared parse of `description` at `scale`, parsing at most
    ///once per resident key. Parse errors are returned, never stored
    pub fn get_or_parse(&self, description: &str, scale: f64) -> Result<Arc<ParsedPath>, ParseError> {
	let key = scale_key(scale);
	let mut guard = self.lock();
	let inner = &mut *guard;
	inner.tick += 1;

	if let Some(parsed) = inner.lookup(description, key) {
	    inner.stats.hits += 1;
	    return Ok(parsed);
	}
	inner.stats.misses += 1;

	let elements = parse::parse_elements(description)?;
	let parsed = Arc::new(ParsedPath::from_elements(
	    elements.iter().map(|e| e.scaled(scale)).collect()
	));

	if self.config.capacity == 0 {
	    return Ok(parsed);
	}

	if inner.len >= self.config.capacity {
	    inner.evict_lru();
	}

	debug!("caching path {:?} at scale {} ({} elements)", description, scale, parsed.elements().len());
	inner.slots.entry(description.to_owned()).or_insert_with(Vec::new).push(Slot {
	    scale: key,
	    parsed: parsed.clone(),
	    last_used: inner.tick,
	});
	inner.len += 1;

	Ok(parsed)
    }

    pub fn len(&self) -> usize {
	self.lock().len
    }

    pub fn is_empty(&self) -> bool {
	self.len() == 0
    }

    pub fn clear(&self) {
	let mut inner = self.lock();
	inner.slots.clear();
	inner.len = 0;
    }

    pub fn stats(&self) -> CacheStats {
	let inner = self.lock();
	CacheStats { entries: inner.len, ..inner.stats }
    }
}

lazy_static! {
    static ref PATH_CACHE: PathCache = PathCache::new(CacheConfig::from_env());
}

/// The process-wide cache.
pub fn global() -> &'static PathCache {
    &PATH_CACHE
}

/// Looks `description` up in the process-wide cache.
pub fn get_or_parse(description: &str, scale: f64) -> Result<Arc<ParsedPath>, ParseError> {
    PATH_CACHE.get_or_parse(description, scale)
}
