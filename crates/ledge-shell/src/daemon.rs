use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use gtk4::gdk;
use gtk4::prelude::*;
use gtk4::Application;
use tracing::{info, warn};

use ledge_core::{
    ConfigPaths, DockConfig, FavoritesConfig, PanelController, ProcessLauncher, ScreenMetrics,
    ServiceHub,
};

use crate::ipc;
use crate::theme;
use crate::ui::{build_layer_window, LayerStrutSink, PanelWindow};

const APP_ID: &str = "org.ledge.shell";

const FALLBACK_SCREEN: ScreenMetrics = ScreenMetrics {
    width: 1920,
    height: 1080,
};

pub fn run() -> Result<()> {
    gtk4::init().context("failed to initialize GTK")?;

    let paths = ConfigPaths::new();
    let config = DockConfig::load(&paths.panel_config);
    let favorites = FavoritesConfig::load(&paths.favorites);
    info!(edge = ?config.edge, band_width = config.band_width, "panel configuration loaded");

    // First run: write the defaults out so users have a file to edit
    if !paths.panel_config.exists() {
        if let Err(e) = config.save_to(&paths.panel_config) {
            warn!("could not write default panel config: {e}");
        }
    }
    if !paths.favorites.exists() {
        if let Err(e) = favorites.save_to(&paths.favorites) {
            warn!("could not write default favorites: {e}");
        }
    }

    let hub = ServiceHub::new()?;
    hub.runtime().spawn(ipc::serve(hub.event_sender()));

    let app = Application::builder()
        .application_id(APP_ID)
        .flags(gtk4::gio::ApplicationFlags::NON_UNIQUE)
        .build();

    let event_rx = hub.event_receiver();
    let command_tx = hub.command_sender();

    app.connect_activate(move |app| {
        theme::load_css();

        let screen = primary_screen_metrics();
        info!(width = screen.width, height = screen.height, "monitor geometry");

        let window = build_layer_window(app, config.edge);
        let sink = LayerStrutSink::new(window.clone());

        let controller = Rc::new(RefCell::new(PanelController::new(
            screen,
            config.clone(),
            favorites.entries(),
            Box::new(ProcessLauncher),
            Box::new(sink),
        )));

        let panel = PanelWindow::new(window, controller, command_tx.clone());
        panel.present();

        let event_rx = event_rx.clone();
        glib::spawn_future_local(async move {
            while let Ok(event) = event_rx.recv().await {
                panel.handle_event(event);
            }
        });
    });

    // The hub's runtime must stay alive for the whole GTK main loop.
    let _guard = hub.enter_runtime();
    let status = app.run_with_args::<&str>(&[]);
    if status != glib::ExitCode::SUCCESS {
        warn!("application exited with status {:?}", status);
    }
    Ok(())
}

fn primary_screen_metrics() -> ScreenMetrics {
    let Some(display) = gdk::Display::default() else {
        warn!("no display available, assuming 1920x1080");
        return FALLBACK_SCREEN;
    };

    let monitors = display.monitors();
    let Some(monitor) = monitors
        .item(0)
        .and_then(|obj| obj.downcast::<gdk::Monitor>().ok())
    else {
        warn!("no monitor reported, assuming 1920x1080");
        return FALLBACK_SCREEN;
    };

    let geometry = monitor.geometry();
    ScreenMetrics {
        width: geometry.width(),
        height: geometry.height(),
    }
}
