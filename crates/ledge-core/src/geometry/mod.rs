mod engine;
mod rect;

pub use engine::{GeometryEngine, Mode, PanelGeometry, Settle, SubpanelKind};
pub use rect::Rect;
