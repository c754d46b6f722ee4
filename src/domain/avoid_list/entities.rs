use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ingredient the user should avoid, as returned by the avoid-list
/// service. Matching must consider the canonical `item` name and every
/// alias; an item with no aliases is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvoidListItem {
    pub item: String,
    #[serde(default)]
    pub alias: Vec<String>,
    pub cause: String,
}

impl AvoidListItem {
    pub fn new(item: impl Into<String>, alias: Vec<String>, cause: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            alias,
            cause: cause.into(),
        }
    }
}

/// Personalized avoid-list snapshot. Never mutated in place; a newer
/// successful fetch replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvoidList {
    pub items: Vec<AvoidListItem>,
    pub fetched_at: DateTime<Utc>,
}

impl AvoidList {
    pub fn new(items: Vec<AvoidListItem>) -> Self {
        Self {
            items,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cached avoid-list snapshot with its write timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub list: AvoidList,
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    /// An entry is valid while younger than `ttl` relative to `now`. Stale
    /// entries remain retrievable but are last-resort, not primary.
    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        now - self.cached_at < ttl
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn entry_aged(hours: i64) -> CacheEntry {
        let now = Utc::now();
        CacheEntry {
            list: AvoidList::new(vec![]),
            cached_at: now - Duration::hours(hours),
        }
    }

    #[test]
    fn fresh_entry_is_valid() {
        let entry = entry_aged(0);
        assert!(entry.is_valid_at(Utc::now(), Duration::hours(24)));
    }

    #[test]
    fn twenty_five_hour_old_entry_is_stale() {
        let entry = entry_aged(25);
        assert!(!entry.is_valid_at(Utc::now(), Duration::hours(24)));
    }

    #[test]
    fn entry_just_inside_window_is_valid() {
        let entry = entry_aged(23);
        assert!(entry.is_valid_at(Utc::now(), Duration::hours(24)));
    }
}
