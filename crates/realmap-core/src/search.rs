// crates/realmap-core/src/search.rs
use crate::model::{Feature, FeatureId, FeatureKey, LayerKind};
use crate::text::starts_word;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Index record for one feature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Lowercased name used for matching.
    pub name: String,
    /// Name as shown to the user.
    pub display_name: String,
    pub feature_id: FeatureId,
    pub layer: LayerKind,
}

impl SearchEntry {
    pub fn key(&self) -> FeatureKey {
        FeatureKey::new(self.layer, self.feature_id)
    }
}

/// How well a name matches; lower ranks first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Prefix,
    WordPrefix,
    Substring,
}

impl MatchKind {
    /// `None` when `query` does not occur in `name` at all.
    fn classify(name: &str, query: &str) -> Option<Self> {
        if name == query {
            Some(MatchKind::Exact)
        } else if name.starts_with(query) {
            Some(MatchKind::Prefix)
        } else if starts_word(name, query) {
            Some(MatchKind::WordPrefix)
        } else if name.contains(query) {
            Some(MatchKind::Substring)
        } else {
            None
        }
    }
}

/// A ranked search result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub entry: &'a SearchEntry,
    pub rank: MatchKind,
}

/// In-memory name index over every loaded feature.
///
/// Entries are only ever added or updated during a session; re-adding a
/// feature with a known key updates its entry in place.
#[derive(Clone, Debug, Default)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
    by_key: HashMap<FeatureKey, usize>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one entry per feature, tagged with `layer`.
    pub fn add_features<'a, I>(&mut self, features: I, layer: LayerKind)
    where
        I: IntoIterator<Item = &'a Feature>,
    {
        let before = self.entries.len();
        for f in features {
            let entry = SearchEntry {
                name: f.name.to_lowercase(),
                display_name: f.name.clone(),
                feature_id: f.id,
                layer,
            };
            match self.by_key.get(&entry.key()) {
                Some(&pos) => self.entries[pos] = entry,
                None => {
                    self.by_key.insert(entry.key(), self.entries.len());
                    self.entries.push(entry);
                }
            }
        }
        debug!(
            layer = %layer,
            added = self.entries.len() - before,
            total = self.entries.len(),
            "indexed features"
        );
    }

    /// Ranked matches for `query`; see [`SearchIndex::search_ranked`].
    pub fn search(&self, query: &str) -> Vec<&SearchEntry> {
        self.search_ranked(query).into_iter().map(|h| h.entry).collect()
    }

    /// Same as [`SearchIndex::search`], truncated to `limit` results.
    pub fn search_limit(&self, query: &str, limit: usize) -> Vec<&SearchEntry> {
        let mut hits = self.search(query);
        hits.truncate(limit);
        hits
    }

    /// Case-insensitive substring search.
    ///
    /// Exact matches come first, then prefix matches, then matches at the
    /// start of a later word, then any other substring. Within a rank shorter
    /// names come first, then alphabetical, then layer and id. A blank query
    /// returns nothing.
    pub fn search_ranked(&self, query: &str) -> Vec<SearchHit<'_>> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit<'_>> = self
            .entries
            .iter()
            .filter_map(|entry| {
                MatchKind::classify(&entry.name, &q).map(|rank| SearchHit { entry, rank })
            })
            .collect();

        hits.sort_by(compare_hits);
        hits
    }

    pub fn get(&self, key: FeatureKey) -> Option<&SearchEntry> {
        self.by_key.get(&key).map(|&pos| &self.entries[pos])
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn compare_hits(a: &SearchHit<'_>, b: &SearchHit<'_>) -> Ordering {
    a.rank
        .cmp(&b.rank)
        .then_with(|| a.entry.name.chars().count().cmp(&b.entry.name.chars().count()))
        .then_with(|| a.entry.name.cmp(&b.entry.name))
        .then_with(|| a.entry.layer.cmp(&b.entry.layer))
        .then_with(|| a.entry.feature_id.cmp(&b.entry.feature_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Geometry;

    fn feature(id: u32, name: &str, kind: LayerKind) -> Feature {
        Feature {
            id,
            name: name.into(),
            kind,
            geometry: Geometry::Point([0.0, 0.0]),
            summary: String::new(),
            url: String::new(),
        }
    }

    fn index(names: &[(u32, &str)]) -> SearchIndex {
        let features: Vec<Feature> = names
            .iter()
            .map(|(id, n)| feature(*id, n, LayerKind::Location))
            .collect();
        let mut idx = SearchIndex::new();
        idx.add_features(&features, LayerKind::Location);
        idx
    }

    fn names<'a>(hits: &[&'a SearchEntry]) -> Vec<&'a str> {
        hits.iter().map(|e| e.display_name.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_nothing() {
        let idx = index(&[(1, "Winterfell"), (2, "Riverrun")]);
        assert!(idx.search("").is_empty());
        assert!(idx.search("   ").is_empty());
    }

    #[test]
    fn empty_index_returns_nothing() {
        assert!(SearchIndex::new().search("winter").is_empty());
    }

    #[test]
    fn equal_length_names_sort_alphabetically() {
        let idx = index(&[(2, "Wintertown"), (1, "Winterfell")]);
        assert_eq!(names(&idx.search("winter")), ["Winterfell", "Wintertown"]);
    }

    #[test]
    fn shorter_names_win_ties() {
        let idx = index(&[(1, "Stormlands Keep"), (2, "Storms End"), (3, "Storm")]);
        assert_eq!(
            names(&idx.search("storm")),
            ["Storm", "Storms End", "Stormlands Keep"]
        );
    }

    #[test]
    fn prefix_and_word_matches_outrank_substrings() {
        let idx = index(&[(1, "Oldtown"), (2, "The Old Wyk"), (3, "Bold Point"), (4, "Old")]);
        assert_eq!(
            names(&idx.search("old")),
            ["Old", "Oldtown", "The Old Wyk", "Bold Point"]
        );
    }

    #[test]
    fn matching_ignores_case() {
        let idx = index(&[(1, "Vaes Dothrak"), (2, "Åsshai")]);
        assert_eq!(names(&idx.search("DOTHRAK")), ["Vaes Dothrak"]);
        assert_eq!(names(&idx.search("åSSHAI")), ["Åsshai"]);
    }

    #[test]
    fn every_hit_contains_the_query_ignoring_case() {
        let idx = index(&[(1, "Åsshai"), (2, "Straße"), (3, "Asshai Gate"), (4, "Stras")]);
        for q in ["asshai", "ÅSS", "straße", "stras", "A"] {
            let lowered = q.to_lowercase();
            for hit in idx.search(q) {
                assert!(
                    hit.display_name.to_lowercase().contains(&lowered),
                    "{q:?} matched {:?}",
                    hit.display_name
                );
            }
        }
        assert_eq!(names(&idx.search("asshai")), ["Asshai Gate"]);
        assert_eq!(names(&idx.search("STRASSE")), Vec::<&str>::new());
    }

    #[test]
    fn re_adding_a_feature_updates_its_entry() {
        let mut idx = index(&[(1, "Winterfell")]);
        idx.add_features(&[feature(1, "Winterfell Castle", LayerKind::Location)], LayerKind::Location);
        assert_eq!(idx.len(), 1);
        assert_eq!(names(&idx.search("castle")), ["Winterfell Castle"]);
    }

    #[test]
    fn same_id_in_another_layer_is_another_feature() {
        let mut idx = index(&[(1, "Winterfell")]);
        idx.add_features(&[feature(1, "The North", LayerKind::Region)], LayerKind::Region);
        assert_eq!(idx.len(), 2);
        assert!(idx.get(FeatureKey::new(LayerKind::Region, 1)).is_some());
    }

    #[test]
    fn results_are_substring_matches_in_stable_order() {
        let idx = index(&[
            (1, "Castle Black"),
            (2, "Castamere"),
            (3, "Casterly Rock"),
            (4, "Pyke"),
        ]);
        let first = idx.search("cast");
        assert!(first.iter().all(|e| e.name.contains("cast")));
        assert_eq!(first.len(), 3);
        assert_eq!(first, idx.search("cast"));
        assert_eq!(idx.search_limit("cast", 2).len(), 2);
    }
}
