//! Response selection for predicted intents.
//!
//! Selection is a lookup-with-default: an intent with no pool, or an empty
//! one, gets the fixed fallback string. Otherwise one response is drawn
//! uniformly from the pool using the caller's random source, so tests can
//! pass a seeded or mock generator and assert exact output.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

/// Reply used when no response pool is available for an intent.
pub const DEFAULT_FALLBACK: &str = "I'm sorry, I didn't understand that.";

/// Response pools keyed by intent label.
#[derive(Debug, Clone)]
pub struct ResponseTable {
    pools: HashMap<String, Vec<String>>,
    fallback: String,
}

impl ResponseTable {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            pools: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Set the pool for an intent, replacing any previous one.
    pub fn insert(&mut self, intent: impl Into<String>, responses: Vec<String>) {
        self.pools.insert(intent.into(), responses);
    }

    /// Draw a response for `intent`, or the fallback when none is configured.
    pub fn select<'a, R: Rng + ?Sized>(&'a self, intent: &str, rng: &mut R) -> &'a str {
        self.pools
            .get(intent)
            .and_then(|pool| pool.choose(rng))
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }

    /// Whether `intent` has a non-empty pool.
    pub fn has_responses(&self, intent: &str) -> bool {
        self.pools.get(intent).is_some_and(|p| !p.is_empty())
    }

    pub fn pool(&self, intent: &str) -> Option<&[String]> {
        self.pools.get(intent).map(Vec::as_slice)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn set_fallback(&mut self, fallback: impl Into<String>) {
        self.fallback = fallback.into();
    }

    /// Intents that have a pool entry (possibly empty), sorted.
    pub fn intents(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.pools.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK)
    }
}
