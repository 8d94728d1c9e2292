mod parser;

pub use parser::{load_catalog, parse_desktop_entry, parse_desktop_file};

use compact_str::CompactString;
use std::cmp::Ordering;

/// A launchable application
///
/// Equality and ordering are by case-insensitive display name, which is
/// also the drawer's sort order.
#[derive(Debug, Clone)]
pub struct AppEntry {
    pub name: CompactString,
    /// Command token sequence, never empty
    pub command: Vec<CompactString>,
    /// Opaque icon reference; may resolve to no icon at render time
    pub icon: CompactString,
}

impl AppEntry {
    fn sort_key(&self) -> CompactString {
        self.name.to_lowercase()
    }
}

impl PartialEq for AppEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for AppEntry {}

impl PartialOrd for AppEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AppEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> AppEntry {
        AppEntry {
            name: name.into(),
            command: vec!["true".into()],
            icon: "".into(),
        }
    }

    #[test]
    fn test_ordering_is_case_insensitive() {
        let mut apps = vec![entry("firefox"), entry("Alacritty"), entry("Thunar")];
        apps.sort();
        let names: Vec<&str> = apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Alacritty", "firefox", "Thunar"]);
        assert!(entry("alpha") < entry("Beta"));
    }

    #[test]
    fn test_equality_ignores_case() {
        assert_eq!(entry("Files"), entry("files"));
    }
}
