use std::path::PathBuf;

/// Configuration paths for the dock
pub struct ConfigPaths {
    pub panel_config: PathBuf,
    pub favorites: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Self {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));

        Self {
            panel_config: config_dir.join("ledge/panel.json"),
            favorites: config_dir.join("ledge/favorites.json"),
        }
    }
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::new()
    }
}
