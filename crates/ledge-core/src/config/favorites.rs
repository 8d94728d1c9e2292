use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::path::PathBuf;

use crate::catalog::AppEntry;

/// A pinned launcher shown on the band (favorites.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub name: CompactString,
    pub command: CompactString,
    #[serde(default)]
    pub icon: CompactString,
}

impl FavoriteItem {
    /// Convert to a catalog entry; `None` if the command tokenizes to nothing.
    pub fn to_entry(&self) -> Option<AppEntry> {
        let command: Vec<CompactString> = self
            .command
            .split_whitespace()
            .map(CompactString::from)
            .collect();

        if self.name.is_empty() || command.is_empty() {
            return None;
        }

        Some(AppEntry {
            name: self.name.clone(),
            command,
            icon: self.icon.clone(),
        })
    }
}

/// Pinned launcher configuration, independent of the application catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    #[serde(default)]
    pub favorites: Vec<FavoriteItem>,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        // Stock set, matching what a fresh desktop ships with
        Self {
            favorites: vec![
                FavoriteItem {
                    name: "Settings".into(),
                    command: "xfce4-settings-manager".into(),
                    icon: "preferences-system".into(),
                },
                FavoriteItem {
                    name: "Terminal".into(),
                    command: "x-terminal-emulator".into(),
                    icon: "utilities-terminal".into(),
                },
                FavoriteItem {
                    name: "Files".into(),
                    command: "thunar".into(),
                    icon: "system-file-manager".into(),
                },
            ],
        }
    }
}

impl FavoritesConfig {
    pub fn load(path: &PathBuf) -> Self {
        std::fs::read(path)
            .ok()
            .and_then(|data| serde_json::from_slice(&data).ok())
            .unwrap_or_default()
    }

    pub fn save_to(&self, path: &PathBuf) -> anyhow::Result<()> {
        let dir = path.parent().ok_or_else(|| anyhow::anyhow!("Invalid path"))?;
        std::fs::create_dir_all(dir)?;
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Resolve the pinned slots to launchable entries, skipping malformed ones
    pub fn entries(&self) -> SmallVec<[AppEntry; 4]> {
        self.favorites.iter().filter_map(FavoriteItem::to_entry).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_favorites_resolve() {
        let config = FavoritesConfig::default();
        let entries = config.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "Settings");
        assert_eq!(entries[1].command, vec![CompactString::from("x-terminal-emulator")]);
    }

    #[test]
    fn test_empty_command_is_skipped() {
        let config = FavoritesConfig {
            favorites: vec![FavoriteItem {
                name: "Broken".into(),
                command: "   ".into(),
                icon: "".into(),
            }],
        };
        assert!(config.entries().is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let path = std::env::temp_dir().join("ledge-test-favorites/favorites.json");
        let config = FavoritesConfig {
            favorites: vec![FavoriteItem {
                name: "Browser".into(),
                command: "firefox".into(),
                icon: "firefox".into(),
            }],
        };

        config.save_to(&path).unwrap();
        let loaded = FavoritesConfig::load(&path);
        assert_eq!(loaded.favorites.len(), 1);
        assert_eq!(loaded.favorites[0].name, "Browser");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
