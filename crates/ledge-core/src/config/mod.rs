mod favorites;
mod paths;
mod settings;

pub use favorites::{FavoriteItem, FavoritesConfig};
pub use paths::ConfigPaths;
pub use settings::{DockConfig, ScreenEdge, ScreenMetrics};
