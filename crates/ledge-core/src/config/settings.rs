use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which screen edge the band is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenEdge {
    Left,
    #[default]
    Right,
}

/// Screen size in pixels, captured once at startup.
///
/// The panel does not react to monitor reconfiguration; a restart picks
/// up the new geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMetrics {
    pub width: i32,
    pub height: i32,
}

impl ScreenMetrics {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Dock configuration (panel.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockConfig {
    #[serde(default)]
    pub edge: ScreenEdge,

    /// Thickness of the always-visible band strip
    #[serde(default = "default_band_width")]
    pub band_width: i32,

    // Drawer metrics
    #[serde(default = "default_drawer_height")]
    pub drawer_height: i32,
    #[serde(default = "default_drawer_y_offset")]
    pub drawer_y_offset: i32,
    /// Screen kept unobstructed beyond a fully open drawer
    #[serde(default = "default_drawer_margin")]
    pub drawer_margin: i32,
    /// Hard cap on the drawer width, on top of the margin rule
    #[serde(default = "default_drawer_max_width")]
    pub drawer_max_width: i32,

    // Power menu metrics
    #[serde(default = "default_power_menu_width")]
    pub power_menu_width: i32,
    #[serde(default = "default_power_menu_height")]
    pub power_menu_height: i32,
    #[serde(default = "default_power_menu_y_offset")]
    pub power_menu_y_offset: i32,

    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,

    /// Whether activating a drawer tile also collapses the drawer
    #[serde(default = "default_true")]
    pub close_drawer_on_launch: bool,
}

fn default_band_width() -> i32 {
    60
}

fn default_drawer_height() -> i32 {
    180
}

fn default_drawer_y_offset() -> i32 {
    120
}

fn default_drawer_margin() -> i32 {
    100
}

fn default_drawer_max_width() -> i32 {
    i32::MAX
}

fn default_power_menu_width() -> i32 {
    320
}

fn default_power_menu_height() -> i32 {
    200
}

fn default_power_menu_y_offset() -> i32 {
    60
}

fn default_animation_ms() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            edge: ScreenEdge::Right,
            band_width: default_band_width(),
            drawer_height: default_drawer_height(),
            drawer_y_offset: default_drawer_y_offset(),
            drawer_margin: default_drawer_margin(),
            drawer_max_width: default_drawer_max_width(),
            power_menu_width: default_power_menu_width(),
            power_menu_height: default_power_menu_height(),
            power_menu_y_offset: default_power_menu_y_offset(),
            animation_ms: default_animation_ms(),
            close_drawer_on_launch: default_true(),
        }
    }
}

impl DockConfig {
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
}
