pub mod catalog;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod launch;
pub mod messages;
pub mod reserve;
pub mod services;
pub mod utils;

pub use catalog::AppEntry;
pub use config::{ConfigPaths, DockConfig, FavoritesConfig, ScreenEdge, ScreenMetrics};
pub use controller::PanelController;
pub use geometry::{GeometryEngine, Mode, PanelGeometry, Rect, Settle, SubpanelKind};
pub use launch::{LaunchError, Launcher, ProcessLauncher};
pub use messages::{DockCommand, DockEvent};
pub use reserve::{ReservationClient, Strut, StrutSink};
pub use services::{ProcessService, ServiceHub};
