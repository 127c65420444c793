//! Key-path exclusions.
//!
//! A key-path is ignored when it contains any entry of the list as a
//! substring, compared case-insensitively. Entries are stored lower-cased.

/// Entries used for discovery documents, as historically configured.
///
/// `titleurl` is a single entry: `title` and `url` alone are not ignored.
/// Changelogs generated with this list stay identical to earlier runs.
pub const DISCOVERY_IGNORED: &[&str] = &[
    "description",
    "documentation",
    "enum",
    "etag",
    "revision",
    "titleurl",
    "rootUrl",
];

/// Same as [`DISCOVERY_IGNORED`] with `title` and `url` as separate entries.
pub const DISCOVERY_IGNORED_CORRECTED: &[&str] = &[
    "description",
    "documentation",
    "enum",
    "etag",
    "revision",
    "title",
    "url",
    "rootUrl",
];

/// Case-insensitive substring matcher over key-paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IgnoreList {
    needles: Vec<String>,
}

impl IgnoreList {
    /// Build a list from arbitrary entries. Empty entries are dropped,
    /// since they would match every key.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut needles: Vec<String> = entries
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        needles.sort();
        needles.dedup();
        Self { needles }
    }

    /// A list that ignores nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// The historical discovery list, see [`DISCOVERY_IGNORED`].
    pub fn discovery() -> Self {
        Self::new(DISCOVERY_IGNORED)
    }

    /// The discovery list with `title` and `url` split apart.
    pub fn discovery_corrected() -> Self {
        Self::new(DISCOVERY_IGNORED_CORRECTED)
    }

    /// Returns `true` if `key` contains any entry, ignoring case.
    pub fn is_ignored(&self, key: &str) -> bool {
        if self.needles.is_empty() {
            return false;
        }
        let key = key.to_lowercase();
        self.needles.iter().any(|needle| key.contains(needle.as_str()))
    }

    /// The normalized entries.
    pub fn entries(&self) -> &[String] {
        &self.needles
    }

    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_substrings_case_insensitively() {
        let list = IgnoreList::discovery();
        assert!(list.is_ignored("resources.files.methods.get.description"));
        assert!(list.is_ignored("schemas.File.properties.kind.Enum.0"));
        assert!(list.is_ignored("ETAG"));
        assert!(list.is_ignored("rootUrl"));
        assert!(list.is_ignored("ROOTURL"));
        assert!(list.is_ignored("documentationLink"));
    }

    #[test]
    fn discovery_list_keeps_merged_title_url_entry() {
        let list = IgnoreList::discovery();
        assert!(!list.is_ignored("title"));
        assert!(!list.is_ignored("baseUrl"));
        assert!(list.is_ignored("schemas.x.titleUrl"));
    }

    #[test]
    fn corrected_list_ignores_title_and_url() {
        let list = IgnoreList::discovery_corrected();
        assert!(list.is_ignored("title"));
        assert!(list.is_ignored("baseUrl"));
        assert!(list.is_ignored("servicePath.url"));
    }

    #[test]
    fn unrelated_keys_are_kept() {
        let list = IgnoreList::discovery();
        assert!(!list.is_ignored("resources.files.methods.get.parameters.fileId.required"));
        assert!(!list.is_ignored("version"));
    }

    #[test]
    fn empty_entries_are_dropped() {
        let list = IgnoreList::new(["", "Etag", "etag"]);
        assert_eq!(list.entries(), ["etag"]);
        assert!(!list.is_ignored("anything"));
    }

    #[test]
    fn none_ignores_nothing() {
        let list = IgnoreList::none();
        assert!(list.is_empty());
        assert!(!list.is_ignored("description"));
    }
}
