use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::catalog::AppEntry;
use crate::config::{DockConfig, ScreenMetrics};
use crate::geometry::{GeometryEngine, Mode, PanelGeometry, Settle, SubpanelKind};
use crate::launch::Launcher;
use crate::reserve::{ReservationClient, Strut, StrutSink};

/// Top-level coordinator: applies user input to the geometry engine and
/// delegates the resulting actions to the launcher and the area
/// reservation client.
///
/// Single-threaded by design; every method runs on the UI event loop.
pub struct PanelController {
    engine: GeometryEngine,
    catalog: Vec<AppEntry>,
    favorites: SmallVec<[AppEntry; 4]>,
    drawer_scroll: f64,
    launcher: Box<dyn Launcher>,
    reservation: ReservationClient,
}

impl PanelController {
    pub fn new(
        screen: ScreenMetrics,
        config: DockConfig,
        favorites: SmallVec<[AppEntry; 4]>,
        launcher: Box<dyn Launcher>,
        sink: Box<dyn StrutSink>,
    ) -> Self {
        Self {
            engine: GeometryEngine::new(screen, config),
            catalog: Vec::new(),
            favorites,
            drawer_scroll: 0.0,
            launcher,
            reservation: ReservationClient::new(sink),
        }
    }

    /// Install the catalog once the startup scan delivers it
    pub fn install_catalog(&mut self, catalog: Vec<AppEntry>) {
        debug!("catalog installed: {} entries", catalog.len());
        self.catalog = catalog;
    }

    /// Announce the collapsed band reservation. Called once after the
    /// host window has first been shown.
    pub fn announce_startup(&mut self) {
        let strut = self.band_strut();
        self.reservation.announce(strut);
    }

    pub fn toggle_drawer(&mut self, now_ms: u64) {
        self.engine.toggle(SubpanelKind::Drawer, now_ms);
    }

    pub fn toggle_power_menu(&mut self, now_ms: u64) {
        self.engine.toggle(SubpanelKind::PowerMenu, now_ms);
    }

    pub fn toggle(&mut self, panel: SubpanelKind, now_ms: u64) {
        self.engine.toggle(panel, now_ms);
    }

    /// Drive the animation forward. Settling back into `Collapsed` is
    /// the only point where the reservation is re-announced.
    pub fn tick(&mut self, now_ms: u64) -> Option<Settle> {
        let settled = self.engine.tick(now_ms);

        if settled == Some(Settle::Collapsed) {
            let strut = self.band_strut();
            self.reservation.announce(strut);
        }

        settled
    }

    /// Launch the drawer tile at `index`
    pub fn activate_tile(&mut self, index: usize, now_ms: u64) {
        let Some(entry) = self.catalog.get(index).cloned() else {
            warn!(index, "tile activation out of range");
            return;
        };
        self.launch_entry(&entry, now_ms);
    }

    /// Launch the pinned favorite at `index`
    pub fn activate_favorite(&mut self, index: usize, now_ms: u64) {
        let Some(entry) = self.favorites.get(index).cloned() else {
            warn!(index, "favorite activation out of range");
            return;
        };
        self.launch_entry(&entry, now_ms);
    }

    fn launch_entry(&mut self, entry: &AppEntry, now_ms: u64) {
        match self.launcher.launch(&entry.command) {
            Ok(()) => {
                debug!(name = %entry.name, "launched");
                if self.engine.config().close_drawer_on_launch
                    && self.engine.mode() == Mode::DrawerOpen
                {
                    self.engine.toggle(SubpanelKind::Drawer, now_ms);
                }
            }
            Err(e) => {
                // Recovered locally: geometry and mode stay untouched
                warn!(name = %entry.name, "launch failed: {e}");
            }
        }
    }

    /// Vertical wheel input over the drawer becomes horizontal content
    /// scroll. Unclamped here; the presentation shell owns the viewport
    /// and clamps to content bounds.
    pub fn scroll(&mut self, delta: f64) {
        if self.engine.mode() == Mode::DrawerOpen {
            self.drawer_scroll -= delta;
        }
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn geometry(&self) -> &PanelGeometry {
        self.engine.geometry()
    }

    pub fn config(&self) -> &DockConfig {
        self.engine.config()
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }

    pub fn catalog(&self) -> &[AppEntry] {
        &self.catalog
    }

    pub fn favorites(&self) -> &[AppEntry] {
        &self.favorites
    }

    pub fn drawer_scroll(&self) -> f64 {
        self.drawer_scroll
    }

    /// The strut currently held by the window manager
    pub fn reserved(&self) -> Option<Strut> {
        self.reservation.announced()
    }

    fn band_strut(&self) -> Strut {
        Strut::for_band(self.engine.config().edge, self.engine.config().band_width)
    }
}
