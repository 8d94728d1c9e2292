use tracing::debug;

use crate::config::{DockConfig, ScreenEdge, ScreenMetrics};

use super::Rect;

/// Logical panel mode. Exactly one is active; rectangles are derived
/// from the mode, never the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Collapsed,
    DrawerOpen,
    PowerMenuOpen,
}

impl Mode {
    pub fn open_subpanel(&self) -> Option<SubpanelKind> {
        match self {
            Mode::Collapsed => None,
            Mode::DrawerOpen => Some(SubpanelKind::Drawer),
            Mode::PowerMenuOpen => Some(SubpanelKind::PowerMenu),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self, Mode::Collapsed)
    }
}

/// The two expandable sub-panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubpanelKind {
    Drawer,
    PowerMenu,
}

impl SubpanelKind {
    fn mode(self) -> Mode {
        match self {
            SubpanelKind::Drawer => Mode::DrawerOpen,
            SubpanelKind::PowerMenu => Mode::PowerMenuOpen,
        }
    }

    /// Parse from string (for IPC commands)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drawer" => Some(Self::Drawer),
            "power" | "power-menu" => Some(Self::PowerMenu),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Drawer => "drawer",
            Self::PowerMenu => "power",
        }
    }
}

/// Current rectangles of the host window and its parts.
///
/// `outer` is screen-absolute; `band` and `subpanel` are relative to
/// `outer`. Owned exclusively by the [`GeometryEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    pub outer: Rect,
    pub band: Rect,
    pub subpanel: Rect,
}

/// Notification that an animated transition committed its final state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    Collapsed,
    Open(SubpanelKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Expanding,
    Retracting,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    token: u64,
    panel: SubpanelKind,
    phase: Phase,
    started_ms: u64,
    from_w: i32,
    to_w: i32,
}

/// The panel geometry state machine.
///
/// State-pessimistic: the mode flips at transition start when opening
/// and at transition completion when closing, so the outer window is
/// always large enough to host whatever is visually on screen. The
/// animation itself is pull-based: the caller feeds monotonic
/// millisecond timestamps to [`GeometryEngine::tick`].
pub struct GeometryEngine {
    screen: ScreenMetrics,
    config: DockConfig,
    mode: Mode,
    geometry: PanelGeometry,
    transition: Option<Transition>,
    pending_open: Option<SubpanelKind>,
    /// Token of the most recently started transition. A completion
    /// commit carrying any other token is stale and must not run.
    active_token: u64,
    next_token: u64,
}

impl GeometryEngine {
    pub fn new(screen: ScreenMetrics, config: DockConfig) -> Self {
        let mut engine = Self {
            screen,
            config,
            mode: Mode::Collapsed,
            geometry: PanelGeometry {
                outer: Rect::default(),
                band: Rect::default(),
                subpanel: Rect::default(),
            },
            transition: None,
            pending_open: None,
            active_token: 0,
            next_token: 0,
        };
        engine.geometry = engine.collapsed_geometry();
        engine
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn screen(&self) -> ScreenMetrics {
        self.screen
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Toggle a sub-panel: open it if collapsed, close it if open.
    /// Toggling while it is already retracting is a no-op; toggling
    /// while the other panel is open queues this one behind its close.
    pub fn toggle(&mut self, panel: SubpanelKind, now_ms: u64) {
        match self.mode.open_subpanel() {
            None => self.start_open(panel, now_ms),
            Some(open) if open == panel => {
                if !self.is_retracting() {
                    self.start_close(now_ms);
                }
            }
            Some(_) => self.queue_behind_close(panel, now_ms),
        }
    }

    /// Explicit open request. A no-op if the panel is already open or
    /// opening; supersedes an in-flight close of the same panel.
    pub fn request_open(&mut self, panel: SubpanelKind, now_ms: u64) {
        match self.mode.open_subpanel() {
            None => self.start_open(panel, now_ms),
            Some(open) if open == panel => {
                if self.is_retracting() {
                    // The close's pending commit must never fire now.
                    self.start_open(panel, now_ms);
                }
            }
            Some(_) => self.queue_behind_close(panel, now_ms),
        }
    }

    /// Advance the animation. Returns a [`Settle`] when a transition
    /// commits its final state; a close settling with a queued open
    /// hands off directly without reporting `Collapsed`.
    pub fn tick(&mut self, now_ms: u64) -> Option<Settle> {
        let t = self.transition?;

        let progress = if self.config.animation_ms == 0 {
            1.0
        } else {
            let elapsed = now_ms.saturating_sub(t.started_ms);
            (elapsed as f64 / self.config.animation_ms as f64).min(1.0)
        };

        let eased = ease_out_cubic(progress);
        self.geometry.subpanel.w =
            t.from_w + ((t.to_w - t.from_w) as f64 * eased).round() as i32;

        if progress < 1.0 {
            return None;
        }

        self.transition = None;
        match t.phase {
            Phase::Expanding => Some(Settle::Open(t.panel)),
            Phase::Retracting => self.commit_close(t.token, now_ms),
        }
    }

    fn is_retracting(&self) -> bool {
        matches!(
            self.transition,
            Some(Transition {
                phase: Phase::Retracting,
                ..
            })
        )
    }

    fn queue_behind_close(&mut self, panel: SubpanelKind, now_ms: u64) {
        self.pending_open = Some(panel);
        if !self.is_retracting() {
            self.start_close(now_ms);
        }
    }

    fn start_open(&mut self, panel: SubpanelKind, now_ms: u64) {
        // When superseding a transition of the same panel, the subpanel
        // keeps its current width instead of snapping back to zero.
        let from_w = match self.transition {
            Some(t) if t.panel == panel => self.geometry.subpanel.w,
            _ => 0,
        };

        let (y, h, target_w) = self.subpanel_target(panel);
        let band_w = self.config.band_width;
        let outer_w = band_w + target_w;

        // The outer window grows first so the expanding subpanel is
        // never clipped; the band's absolute screen position must not
        // move while the window's opposite edge extends.
        let (outer, band_x, sub_x) = match self.config.edge {
            ScreenEdge::Right => (
                Rect::new(self.screen.width - outer_w, 0, outer_w, self.screen.height),
                target_w,
                0,
            ),
            ScreenEdge::Left => (
                Rect::new(0, 0, outer_w, self.screen.height),
                0,
                band_w,
            ),
        };

        self.geometry = PanelGeometry {
            outer,
            band: Rect::new(band_x, 0, band_w, self.screen.height),
            subpanel: Rect::new(sub_x, y, from_w, h),
        };
        self.mode = panel.mode();

        let token = self.bump_token();
        self.transition = Some(Transition {
            token,
            panel,
            phase: Phase::Expanding,
            started_ms: now_ms,
            from_w,
            to_w: target_w,
        });

        debug!(panel = panel.name(), from_w, target_w, "opening subpanel");
    }

    fn start_close(&mut self, now_ms: u64) {
        let Some(panel) = self.mode.open_subpanel() else {
            return;
        };

        let token = self.bump_token();
        self.transition = Some(Transition {
            token,
            panel,
            phase: Phase::Retracting,
            started_ms: now_ms,
            from_w: self.geometry.subpanel.w,
            to_w: 0,
        });

        debug!(panel = panel.name(), "closing subpanel");
    }

    /// Terminal step of a close. The outer window shrinks back to the
    /// band footprint only here, after the subpanel has fully
    /// retracted.
    fn commit_close(&mut self, token: u64, now_ms: u64) -> Option<Settle> {
        if token != self.active_token {
            // Superseded transition; its commit must never execute.
            return None;
        }

        self.geometry = self.collapsed_geometry();
        self.mode = Mode::Collapsed;

        if let Some(next) = self.pending_open.take() {
            self.start_open(next, now_ms);
            return None;
        }

        Some(Settle::Collapsed)
    }

    fn collapsed_geometry(&self) -> PanelGeometry {
        let band_w = self.config.band_width;
        let outer = match self.config.edge {
            ScreenEdge::Right => {
                Rect::new(self.screen.width - band_w, 0, band_w, self.screen.height)
            }
            ScreenEdge::Left => Rect::new(0, 0, band_w, self.screen.height),
        };

        PanelGeometry {
            outer,
            band: Rect::new(0, 0, band_w, self.screen.height),
            subpanel: Rect::default(),
        }
    }

    fn subpanel_target(&self, panel: SubpanelKind) -> (i32, i32, i32) {
        let available =
            (self.screen.width - self.config.band_width - self.config.drawer_margin).max(0);

        match panel {
            SubpanelKind::Drawer => (
                self.config.drawer_y_offset,
                self.config.drawer_height,
                available.min(self.config.drawer_max_width),
            ),
            SubpanelKind::PowerMenu => (
                self.config.power_menu_y_offset,
                self.config.power_menu_height,
                available.min(self.config.power_menu_width),
            ),
        }
    }

    fn bump_token(&mut self) -> u64 {
        self.next_token += 1;
        self.active_token = self.next_token;
        self.active_token
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    let u = 1.0 - t;
    1.0 - u * u * u
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_config() -> DockConfig {
        DockConfig {
            band_width: 60,
            drawer_height: 180,
            drawer_y_offset: 60,
            drawer_margin: 100,
            animation_ms: 300,
            ..DockConfig::default()
        }
    }

    fn engine() -> GeometryEngine {
        GeometryEngine::new(ScreenMetrics::new(1920, 1080), scenario_config())
    }

    fn settle(engine: &mut GeometryEngine, mut now: u64) -> (Option<Settle>, u64) {
        // Drive frames until the in-flight transition commits
        for _ in 0..100 {
            now += 16;
            if let Some(s) = engine.tick(now) {
                return (Some(s), now);
            }
        }
        (None, now)
    }

    #[test]
    fn test_initial_collapsed_geometry() {
        let engine = engine();
        assert_eq!(engine.mode(), Mode::Collapsed);
        assert_eq!(engine.geometry().outer, Rect::new(1860, 0, 60, 1080));
        assert_eq!(engine.geometry().band, Rect::new(0, 0, 60, 1080));
        assert!(engine.geometry().subpanel.is_empty());
    }

    #[test]
    fn test_drawer_open_target_rects() {
        let mut engine = engine();
        engine.toggle(SubpanelKind::Drawer, 0);

        // Mode and outer rect commit synchronously, before any frame
        assert_eq!(engine.mode(), Mode::DrawerOpen);
        assert_eq!(engine.geometry().outer, Rect::new(100, 0, 1820, 1080));
        assert_eq!(engine.geometry().band, Rect::new(1760, 0, 60, 1080));

        let (settled, _) = settle(&mut engine, 0);
        assert_eq!(settled, Some(Settle::Open(SubpanelKind::Drawer)));
        assert_eq!(engine.geometry().subpanel, Rect::new(0, 60, 1760, 180));
    }

    #[test]
    fn test_band_screen_position_is_pinned() {
        let mut engine = engine();
        let g = engine.geometry();
        let collapsed_band_x = g.outer.x + g.band.x;

        engine.toggle(SubpanelKind::Drawer, 0);
        let g = engine.geometry();
        assert_eq!(g.outer.x + g.band.x, collapsed_band_x);
    }

    #[test]
    fn test_outer_contains_parts_every_frame() {
        let mut engine = engine();
        engine.toggle(SubpanelKind::Drawer, 0);

        let mut now = 0;
        loop {
            now += 16;
            let settled = engine.tick(now);
            let g = engine.geometry();
            let parts = g.band.union(&g.subpanel);
            assert!(
                g.outer.w >= parts.w && g.outer.h >= parts.h && Rect::new(0, 0, g.outer.w, g.outer.h).contains(&parts),
                "outer {:?} does not contain {:?} at {}ms",
                g.outer,
                parts,
                now
            );
            if settled.is_some() {
                break;
            }
        }

        // Same property on the way back down
        engine.toggle(SubpanelKind::Drawer, now);
        loop {
            now += 16;
            let settled = engine.tick(now);
            let g = engine.geometry();
            let parts = g.band.union(&g.subpanel);
            assert!(Rect::new(0, 0, g.outer.w, g.outer.h).contains(&parts));
            if settled.is_some() {
                break;
            }
        }
    }

    #[test]
    fn test_toggle_roundtrip_restores_geometry() {
        let mut engine = engine();
        let initial = *engine.geometry();

        engine.toggle(SubpanelKind::Drawer, 0);
        let (_, now) = settle(&mut engine, 0);
        engine.toggle(SubpanelKind::Drawer, now);
        let (settled, _) = settle(&mut engine, now);

        assert_eq!(settled, Some(Settle::Collapsed));
        assert_eq!(engine.mode(), Mode::Collapsed);
        assert_eq!(*engine.geometry(), initial);
    }

    #[test]
    fn test_close_commits_only_at_completion() {
        let mut engine = engine();
        engine.toggle(SubpanelKind::Drawer, 0);
        let (_, now) = settle(&mut engine, 0);

        engine.toggle(SubpanelKind::Drawer, now);
        // Mid-retract: mode is still DrawerOpen and the outer window is
        // still expanded so the shrinking subpanel is not clipped
        assert!(engine.tick(now + 50).is_none());
        assert_eq!(engine.mode(), Mode::DrawerOpen);
        assert_eq!(engine.geometry().outer.w, 1820);

        let (settled, _) = settle(&mut engine, now + 50);
        assert_eq!(settled, Some(Settle::Collapsed));
        assert_eq!(engine.geometry().outer.w, 60);
    }

    #[test]
    fn test_mutual_exclusion_handoff() {
        let mut engine = engine();
        engine.toggle(SubpanelKind::Drawer, 0);
        let (_, now) = settle(&mut engine, 0);

        // Power menu requested while the drawer is open: the drawer
        // must retract fully before the menu starts expanding.
        engine.toggle(SubpanelKind::PowerMenu, now);
        assert_eq!(engine.mode(), Mode::DrawerOpen);

        let mut now = now;
        let mut saw_collapsed_settle = false;
        for _ in 0..200 {
            now += 16;
            match engine.tick(now) {
                Some(Settle::Collapsed) => saw_collapsed_settle = true,
                Some(Settle::Open(panel)) => {
                    assert_eq!(panel, SubpanelKind::PowerMenu);
                    break;
                }
                None => {}
            }
        }

        assert_eq!(engine.mode(), Mode::PowerMenuOpen);
        // The handoff never reports a settled collapse in between
        assert!(!saw_collapsed_settle);
        // Power menu target width: min(320, 1920 - 60 - 100)
        assert_eq!(engine.geometry().subpanel.w, 320);
        assert_eq!(engine.geometry().subpanel.y, 60);
    }

    #[test]
    fn test_superseded_close_never_commits() {
        let mut engine = engine();
        engine.toggle(SubpanelKind::Drawer, 0);
        let (_, now) = settle(&mut engine, 0);

        // Start closing, then re-open before the close completes
        engine.toggle(SubpanelKind::Drawer, now);
        engine.tick(now + 100);
        let mid_w = engine.geometry().subpanel.w;
        assert!(mid_w > 0 && mid_w < 1760);

        engine.request_open(SubpanelKind::Drawer, now + 100);
        // Re-opens from the current width, no snap to zero
        assert_eq!(engine.geometry().subpanel.w, mid_w);

        let (settled, end) = settle(&mut engine, now + 100);
        assert_eq!(settled, Some(Settle::Open(SubpanelKind::Drawer)));
        assert_eq!(engine.mode(), Mode::DrawerOpen);

        // Long after the superseded close's original deadline, no stale
        // "collapsed" commit may fire
        assert_eq!(engine.tick(end + 10_000), None);
        assert_eq!(engine.mode(), Mode::DrawerOpen);
        assert_eq!(engine.geometry().subpanel.w, 1760);
    }

    #[test]
    fn test_same_direction_toggle_is_noop() {
        let mut engine = engine();
        engine.toggle(SubpanelKind::Drawer, 0);
        let (_, now) = settle(&mut engine, 0);

        engine.toggle(SubpanelKind::Drawer, now);
        engine.tick(now + 100);
        let mid_w = engine.geometry().subpanel.w;

        // Second close toggle while already retracting changes nothing
        engine.toggle(SubpanelKind::Drawer, now + 100);
        engine.tick(now + 100);
        assert_eq!(engine.geometry().subpanel.w, mid_w);

        let (settled, _) = settle(&mut engine, now + 100);
        assert_eq!(settled, Some(Settle::Collapsed));
    }

    #[test]
    fn test_open_request_while_open_is_noop() {
        let mut engine = engine();
        engine.toggle(SubpanelKind::Drawer, 0);
        let (_, now) = settle(&mut engine, 0);

        engine.request_open(SubpanelKind::Drawer, now);
        assert!(!engine.is_animating());
        assert_eq!(engine.mode(), Mode::DrawerOpen);
    }

    #[test]
    fn test_zero_duration_settles_on_first_tick() {
        let config = DockConfig {
            animation_ms: 0,
            ..scenario_config()
        };
        let mut engine = GeometryEngine::new(ScreenMetrics::new(1920, 1080), config);

        engine.toggle(SubpanelKind::Drawer, 5);
        assert_eq!(engine.tick(5), Some(Settle::Open(SubpanelKind::Drawer)));
        assert_eq!(engine.geometry().subpanel.w, 1760);
    }

    #[test]
    fn test_left_edge_geometry() {
        let config = DockConfig {
            edge: ScreenEdge::Left,
            ..scenario_config()
        };
        let mut engine = GeometryEngine::new(ScreenMetrics::new(1920, 1080), config);
        assert_eq!(engine.geometry().outer, Rect::new(0, 0, 60, 1080));

        engine.toggle(SubpanelKind::Drawer, 0);
        assert_eq!(engine.geometry().outer, Rect::new(0, 0, 1820, 1080));
        assert_eq!(engine.geometry().band, Rect::new(0, 0, 60, 1080));
        assert_eq!(engine.geometry().subpanel.x, 60);
    }

    #[test]
    fn test_ease_out_cubic_bounds() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}
