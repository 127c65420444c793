use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use serde_json::Value;

use crate::error::ArtifactResult;
use crate::sink::ReportSink;
use crate::source::ArtifactSource;

/// In-memory, HashMap-based artifact source.
///
/// Intended for tests and embedding. Documents are held already parsed
/// behind a `RwLock` and cloned on read.
pub struct InMemorySource {
    docs: RwLock<HashMap<String, Value>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(HashMap::new()),
        }
    }

    /// Store `doc` under `file_name`, replacing any previous document.
    pub fn insert(&self, file_name: impl Into<String>, doc: Value) {
        self.docs
            .write()
            .expect("lock poisoned")
            .insert(file_name.into(), doc);
    }

    pub fn len(&self) -> usize {
        self.docs.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(String, Value)> for InMemorySource {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            docs: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl ArtifactSource for InMemorySource {
    fn load(&self, file_name: &str) -> ArtifactResult<Option<Value>> {
        let docs = self.docs.read().expect("lock poisoned");
        Ok(docs.get(file_name).cloned())
    }

    fn root_exists(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("<memory: {} documents>", self.len())
    }

    fn list(&self) -> ArtifactResult<Vec<String>> {
        let docs = self.docs.read().expect("lock poisoned");
        let mut names: Vec<String> = docs.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl std::fmt::Debug for InMemorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySource")
            .field("document_count", &self.len())
            .finish()
    }
}

/// Collects report output in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    summary: RwLock<Option<String>>,
    verbose: RwLock<BTreeMap<String, String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last summary written, if any.
    pub fn summary(&self) -> Option<String> {
        self.summary.read().expect("lock poisoned").clone()
    }

    /// The verbose report written for `family`, if any.
    pub fn verbose(&self, family: &str) -> Option<String> {
        self.verbose.read().expect("lock poisoned").get(family).cloned()
    }

    /// Families with a verbose report, sorted.
    pub fn families(&self) -> Vec<String> {
        self.verbose.read().expect("lock poisoned").keys().cloned().collect()
    }
}

impl ReportSink for MemorySink {
    fn write_summary(&self, text: &str) -> ArtifactResult<()> {
        *self.summary.write().expect("lock poisoned") = Some(text.to_string());
        Ok(())
    }

    fn write_verbose(&self, family: &str, text: &str) -> ArtifactResult<()> {
        self.verbose
            .write()
            .expect("lock poisoned")
            .insert(family.to_string(), text.to_string());
        Ok(())
    }
}
