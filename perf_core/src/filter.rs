// filter.rs - Ranked city matching and a single-slot memo

use tracing::debug;

use crate::cities::{City, all_cities};

/// How well a candidate matched; higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Subsequence,
    Acronym,
    Contains,
    WordStartsWith,
    StartsWith,
    Equal,
}

fn is_word_break(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '\''
}

fn acronym(text: &str) -> String {
    text.split(is_word_break)
        .filter_map(|word| word.chars().next())
        .collect()
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut rest = haystack.chars();
    needle.chars().all(|n| rest.any(|h| h == n))
}

/// Rank `candidate` against `query`, ignoring case. `None` means no match.
pub fn rank(candidate: &str, query: &str) -> Option<Rank> {
    let candidate = candidate.to_lowercase();
    let query = query.to_lowercase();

    if candidate == query {
        return Some(Rank::Equal);
    }
    if candidate.starts_with(&query) {
        return Some(Rank::StartsWith);
    }
    if candidate
        .match_indices(&query)
        .any(|(i, _)| candidate[..i].ends_with(is_word_break))
    {
        return Some(Rank::WordStartsWith);
    }
    if candidate.contains(&query) {
        return Some(Rank::Contains);
    }
    if acronym(&candidate).contains(&query) {
        return Some(Rank::Acronym);
    }
    is_subsequence(&query, &candidate).then_some(Rank::Subsequence)
}

/// Best rank first, then alphabetical.
pub(crate) fn sort_ranked(mut ranked: Vec<(Rank, City)>) -> Vec<City> {
    ranked.sort_by(|(ra, a), (rb, b)| rb.cmp(ra).then_with(|| a.name.cmp(b.name)));
    ranked.into_iter().map(|(_, city)| city).collect()
}

/// Cities whose name matches `query`. A blank query returns the whole table
/// in table order.
pub fn filter_cities(query: &str) -> Vec<City> {
    let query = query.trim();
    if query.is_empty() {
        return all_cities().to_vec();
    }
    let ranked = all_cities()
        .iter()
        .filter_map(|city| rank(city.name, query).map(|r| (r, *city)))
        .collect();
    let result = sort_ranked(ranked);
    debug!(query, matches = result.len(), "filtered cities");
    result
}

/// Caches one derived value and recomputes it only when its key changes.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
    computes: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { slot: None, computes: 0 }
    }
}

impl<K: PartialEq + Clone, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, key: &K, compute: impl FnOnce(&K) -> V) -> &V {
        if self.slot.as_ref().is_some_and(|(cached, _)| cached != key) {
            self.slot = None;
        }
        let computes = &mut self.computes;
        let (_, value) = self.slot.get_or_insert_with(|| {
            *computes += 1;
            (key.clone(), compute(key))
        });
        value
    }

    pub fn compute_count(&self) -> u64 {
        self.computes
    }
}
