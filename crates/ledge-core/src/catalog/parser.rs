use ahash::AHashMap;
use compact_str::CompactString;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::AppEntry;

/// Parse the `[Desktop Entry]` section of a .desktop descriptor.
///
/// Returns `None` for descriptors that are malformed, hidden, or marked
/// `NoDisplay`; a skipped entry never fails the catalog load as a whole.
pub fn parse_desktop_entry(content: &str) -> Option<AppEntry> {
    let mut name = CompactString::default();
    let mut exec = String::new();
    let mut icon = CompactString::default();
    let mut hidden = false;

    let mut in_desktop_entry = false;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            in_desktop_entry = line == "[Desktop Entry]";
            continue;
        }

        if !in_desktop_entry {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim();

            match key {
                "Name" => name = value.into(),
                "Exec" => exec = value.to_string(),
                "Icon" => icon = value.into(),
                "NoDisplay" | "Hidden" => {
                    hidden = hidden || value.eq_ignore_ascii_case("true");
                }
                _ => {}
            }
        }
    }

    if hidden {
        return None;
    }

    // Strip field codes (%f, %u, ...) from the exec line
    let command: Vec<CompactString> = exec
        .split_whitespace()
        .filter(|s| !s.starts_with('%'))
        .map(CompactString::from)
        .collect();

    if name.is_empty() || command.is_empty() {
        return None;
    }

    Some(AppEntry { name, command, icon })
}

/// Parse a single .desktop file from disk
pub fn parse_desktop_file(path: &Path) -> Option<AppEntry> {
    let content = std::fs::read_to_string(path).ok()?;
    parse_desktop_entry(&content)
}

/// Load all applications from the standard descriptor directories,
/// sorted case-insensitively by name.
///
/// Scanned once at startup; the catalog is not watched for changes.
pub fn load_catalog() -> Vec<AppEntry> {
    let dirs = [
        PathBuf::from("/usr/share/applications"),
        PathBuf::from("/usr/local/share/applications"),
        dirs::home_dir()
            .map(|h| h.join(".local/share/applications"))
            .unwrap_or_default(),
    ];

    let mut apps = Vec::new();
    let mut seen: AHashMap<String, usize> = AHashMap::new();

    for dir in dirs {
        if !dir.exists() {
            continue;
        }

        if let Ok(entries) = std::fs::read_dir(&dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().map(|e| e == "desktop").unwrap_or(false) {
                    if let Some(app) = parse_desktop_file(&path) {
                        // Keyed by filename so a user descriptor overrides
                        // the system one
                        let filename = path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("")
                            .to_string();

                        if let Some(&idx) = seen.get(&filename) {
                            apps[idx] = app;
                        } else {
                            seen.insert(filename, apps.len());
                            apps.push(app);
                        }
                    }
                }
            }
        }
    }

    apps.sort();

    debug!("Loaded {} applications", apps.len());
    apps
}
