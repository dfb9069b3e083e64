//! In-memory dictionary provider

use crate::dictionary::entry::{DictionaryEntry, Direction};
use crate::dictionary::{DictionaryProvider, DictionaryQuery, MatchMode};
use crate::error::{AlignError, AlignResult};
use crate::mt::normalize_language;
use crate::normalize::normalize;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

type PairKey = (Direction, String, String);

/// Dictionary held entirely in memory, indexed by language pair and direction
///
/// Each entry is reachable by its lemma as written and by its normalized form.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDictionary {
    entries: Vec<DictionaryEntry>,
    exact: HashMap<PairKey, HashMap<String, Vec<usize>>>,
    folded: HashMap<PairKey, HashMap<String, Vec<usize>>>,
}

impl InMemoryDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries, keeping their order as the dictionary rank
    pub fn from_entries(entries: Vec<DictionaryEntry>) -> AlignResult<Self> {
        let mut dictionary = Self::new();
        for entry in entries {
            dictionary.insert(entry)?;
        }
        Ok(dictionary)
    }

    /// Load a JSON array of entries
    ///
    /// ```json
    /// [
    ///   {"lemma": "banco", "definition": "bank; bench", "source_language": "es", "target_language": "en"},
    ///   {"lemma": "banco", "definition": "bank", "direction": "reverse", "source_language": "es", "target_language": "en"}
    /// ]
    /// ```
    pub fn from_json_str(json: &str) -> AlignResult<Self> {
        let entries: Vec<DictionaryEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_json_file(path: &Path) -> AlignResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AlignError::DictionaryError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    pub fn insert(&mut self, entry: DictionaryEntry) -> AlignResult<()> {
        let lemma = entry.lemma.trim();
        if lemma.is_empty() || entry.definition.trim().is_empty() {
            return Err(AlignError::DictionaryError(format!(
                "Entry '{}' has an empty lemma or definition",
                entry.lemma
            )));
        }

        let key = pair_key(entry.direction, &entry.source_language, &entry.target_language)
            .map_err(|e| AlignError::DictionaryError(format!("Entry '{}': {}", lemma, e)))?;
        let index = self.entries.len();
        self.exact
            .entry(key.clone())
            .or_default()
            .entry(lemma.to_string())
            .or_default()
            .push(index);
        self.folded
            .entry(key)
            .or_default()
            .entry(normalize(lemma))
            .or_default()
            .push(index);
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn pair_key(direction: Direction, source: &str, target: &str) -> AlignResult<PairKey> {
    Ok((
        direction,
        normalize_language(source)?,
        normalize_language(target)?,
    ))
}

#[async_trait]
impl DictionaryProvider for InMemoryDictionary {
    async fn lookup(&self, query: &DictionaryQuery) -> AlignResult<Vec<DictionaryEntry>> {
        let key = pair_key(
            query.direction,
            &query.source_language,
            &query.target_language,
        )?;
        let (index, word) = match query.mode {
            MatchMode::Exact => (&self.exact, query.word.trim().to_string()),
            MatchMode::Folded => (&self.folded, normalize(&query.word)),
        };
        let found: Vec<DictionaryEntry> = index
            .get(&key)
            .and_then(|lemmas| lemmas.get(&word))
            .map(|ids| ids.iter().map(|&i| self.entries[i].clone()).collect())
            .unwrap_or_default();
        Ok(found)
    }

    fn provider_name(&self) -> &str {
        "In-memory dictionary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> InMemoryDictionary {
        InMemoryDictionary::from_entries(vec![
            DictionaryEntry::forward("banco", "bench; bank", "es", "en"),
            DictionaryEntry::forward("canción", "song", "es", "en"),
            DictionaryEntry::forward("banco", "banc", "es", "fr"),
            DictionaryEntry::reverse("correr", "run", "es", "en"),
        ])
        .unwrap()
    }

    fn query(word: &str, direction: Direction, mode: MatchMode) -> DictionaryQuery {
        DictionaryQuery {
            word: word.to_string(),
            source_language: "es".to_string(),
            target_language: "en".to_string(),
            direction,
            mode,
        }
    }

    #[tokio::test]
    async fn test_exact_lookup() {
        let d = dictionary();
        let found = d
            .lookup(&query("banco", Direction::Forward, MatchMode::Exact))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].definition, "bench; bank");
    }

    #[tokio::test]
    async fn test_exact_lookup_is_case_sensitive() {
        let d = dictionary();
        let found = d
            .lookup(&query("Canción", Direction::Forward, MatchMode::Exact))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_folded_lookup_ignores_case_and_accents() {
        let d = dictionary();
        let found = d
            .lookup(&query("CANCION", Direction::Forward, MatchMode::Folded))
            .await
            .unwrap();
        assert_eq!(found[0].lemma, "canción");
    }

    #[tokio::test]
    async fn test_direction_and_language_pair_are_respected() {
        let d = dictionary();
        let reverse = d
            .lookup(&query("correr", Direction::Reverse, MatchMode::Exact))
            .await
            .unwrap();
        assert_eq!(reverse.len(), 1);
        let forward = d
            .lookup(&query("correr", Direction::Forward, MatchMode::Exact))
            .await
            .unwrap();
        assert!(forward.is_empty());
    }

    #[tokio::test]
    async fn test_region_subtags_are_ignored() {
        let d = dictionary();
        let mut q = query("banco", Direction::Forward, MatchMode::Exact);
        q.source_language = "es-MX".to_string();
        q.target_language = "en-GB".to_string();
        assert_eq!(d.lookup(&q).await.unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_empty_entries() {
        let result =
            InMemoryDictionary::from_entries(vec![DictionaryEntry::forward(" ", "x", "es", "en")]);
        assert!(matches!(result, Err(AlignError::DictionaryError(_))));
    }

    #[test]
    fn test_rejects_invalid_language() {
        let result = InMemoryDictionary::from_entries(vec![DictionaryEntry::forward(
            "banco", "bank", "e$", "en",
        )]);
        assert!(matches!(result, Err(AlignError::DictionaryError(_))));
    }

    #[test]
    fn test_from_json_str() {
        let d = InMemoryDictionary::from_json_str(
            r#"[{"lemma":"banco","definition":"bank","source_language":"es","target_language":"en"}]"#,
        )
        .unwrap();
        assert_eq!(d.len(), 1);
        assert!(InMemoryDictionary::from_json_str("{").is_err());
    }

    #[test]
    fn test_from_missing_file() {
        let result = InMemoryDictionary::from_json_file(Path::new("/nonexistent/dict.json"));
        match result {
            Err(AlignError::DictionaryError(msg)) => assert!(msg.contains("Failed to read")),
            other => panic!("Expected DictionaryError, got {:?}", other),
        }
    }
}
