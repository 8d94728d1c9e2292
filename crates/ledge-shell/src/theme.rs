use gtk4::gdk::Display;
use gtk4::CssProvider;
use tracing::debug;

/// CSS theme for the dock
pub const PANEL_CSS: &str = r#"
window {
    background-color: transparent;
}

/* ========== Band Styles ========== */

.band {
    background-color: rgba(30, 30, 30, 0.86);
}

.clock {
    color: white;
    font-size: 14px;
    font-weight: bold;
}

.power-button {
    background-color: #C30976;
    border-radius: 20px;
    color: white;
    font-size: 18px;
}

.drawer-button {
    background-color: transparent;
    color: white;
    border: none;
    font-size: 24px;
}

.drawer-button:hover {
    background-color: rgba(255, 255, 255, 0.12);
}

.favorite-button {
    background-color: rgba(255, 255, 255, 0.04);
    border: none;
    border-radius: 5px;
}

.favorite-button:hover {
    background-color: rgba(255, 255, 255, 0.15);
}

/* ========== Drawer Styles ========== */

.drawer {
    background-color: rgba(20, 20, 20, 0.96);
    border-left: 2px solid #C30976;
}

.tile-button {
    background-color: #C30976;
    border: none;
    color: white;
}

.tile-label {
    color: white;
    font-size: 11px;
    font-weight: bold;
}

/* ========== Power Menu Styles ========== */

.power-menu {
    background-color: rgba(20, 20, 20, 0.96);
    border-left: 2px solid #C30976;
}

.power-menu button {
    background-color: rgba(255, 255, 255, 0.06);
    color: white;
    border-radius: 6px;
}

.power-menu button:hover {
    background-color: rgba(255, 255, 255, 0.18);
}

.power-menu .destructive {
    background-color: #C30976;
}
"#;

pub fn load_css() {
    let provider = CssProvider::new();
    provider.load_from_data(PANEL_CSS);

    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
        debug!("CSS theme loaded");
    }
}
