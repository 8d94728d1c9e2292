mod drawer;
mod layer;
mod panel;
mod power_menu;

pub use layer::{build_layer_window, LayerStrutSink};
pub use panel::PanelWindow;
