use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow};
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};
use tracing::debug;

use ledge_core::{ScreenEdge, Strut, StrutSink};

/// Create the panel's host window: a top-layer surface anchored to the
/// configured screen edge, spanning the full screen height.
pub fn build_layer_window(app: &Application, edge: ScreenEdge) -> ApplicationWindow {
    let window = ApplicationWindow::builder()
        .application(app)
        .title("Ledge")
        .decorated(false)
        .build();

    window.init_layer_shell();
    window.set_layer(Layer::Top);
    window.set_keyboard_mode(KeyboardMode::OnDemand);
    window.set_namespace("ledge-panel");

    window.set_anchor(Edge::Top, true);
    window.set_anchor(Edge::Bottom, true);
    match edge {
        ScreenEdge::Left => window.set_anchor(Edge::Left, true),
        ScreenEdge::Right => window.set_anchor(Edge::Right, true),
    }

    debug!(?edge, "created layer window");
    window
}

/// Area reservation backed by the layer-shell exclusive zone.
///
/// The zone is the thickness of the band strip along the anchored edge;
/// the compositor keeps that region clear of other windows.
pub struct LayerStrutSink {
    window: ApplicationWindow,
}

impl LayerStrutSink {
    pub fn new(window: ApplicationWindow) -> Self {
        Self { window }
    }
}

impl StrutSink for LayerStrutSink {
    fn announce(&self, strut: &Strut) -> anyhow::Result<()> {
        if !gtk4_layer_shell::is_supported() {
            anyhow::bail!("compositor does not support the layer-shell protocol");
        }

        self.window.set_exclusive_zone(strut.thickness());
        debug!(zone = strut.thickness(), "exclusive zone announced");
        Ok(())
    }
}
