use super::preamble::{is_source_file, preamble};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Generated files keyed by their posix path relative to the output
/// directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMap {
    files: BTreeMap<String, String>,
}

impl FileMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a file, normalizing it to end with exactly one newline.
    /// Returns the previous content for the same path.
    pub fn insert(&mut self, path: impl Into<String>, content: impl AsRef<str>) -> Option<String> {
        let mut content = content.as_ref().trim_end().to_string();
        content.push('\n');
        self.files.insert(path.into(), content)
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.files.iter()
    }

    pub fn total_bytes(&self) -> usize {
        self.files.values().map(String::len).sum()
    }

    /// Prefixes every TypeScript file with the generated-code banner.
    pub fn add_preamble(&mut self, ts_no_check: bool) {
        let banner = preamble(ts_no_check);
        for (path, content) in self.files.iter_mut() {
            if is_source_file(path) {
                content.insert_str(0, &banner);
            }
        }
    }
}

impl<'a> IntoIterator for &'a FileMap {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_normalizes_trailing_newlines() {
        let mut map = FileMap::new();
        map.insert("enums.ts", "export {}\n\n\n");
        assert_eq!(map.get("enums.ts"), Some("export {}\n"));
    }

    #[test]
    fn test_paths_are_sorted() {
        let mut map = FileMap::new();
        map.insert("models/User.ts", "a");
        map.insert("client.ts", "b");
        map.insert("internal/class.ts", "c");
        let paths: Vec<_> = map.paths().collect();
        assert_eq!(paths, vec!["client.ts", "internal/class.ts", "models/User.ts"]);
    }

    #[test]
    fn test_preamble_only_touches_sources() {
        let mut map = FileMap::new();
        map.insert("client.ts", "export {}");
        map.insert("package.json", "{}");
        map.add_preamble(true);
        assert!(map.get("client.ts").unwrap().contains("// @ts-nocheck\nexport {}"));
        assert_eq!(map.get("package.json"), Some("{}\n"));
    }
}
