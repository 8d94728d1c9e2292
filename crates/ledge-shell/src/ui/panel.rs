use gtk4::prelude::*;
use gtk4::{ApplicationWindow, Box as GtkBox, Button, Fixed, Image, Label, Orientation};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::debug;

use ledge_core::{AppEntry, DockCommand, DockEvent, Mode, PanelController, SubpanelKind};

use super::drawer::DrawerView;
use super::power_menu::PowerMenuView;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Pixels of horizontal drawer travel per wheel unit
const SCROLL_STEP: f64 = 60.0;

/// The panel's host window and widget tree.
///
/// Renders whatever rectangles the controller currently reports and
/// feeds raw input events back into it; all geometry decisions live in
/// `ledge-core`.
pub struct PanelWindow {
    window: ApplicationWindow,
    root: Fixed,
    band: GtkBox,
    clock: Label,
    drawer: DrawerView,
    power_menu: PowerMenuView,
    controller: Rc<RefCell<PanelController>>,
    frame_source: RefCell<Option<glib::SourceId>>,
    epoch: Instant,
}

impl PanelWindow {
    pub fn new(
        window: ApplicationWindow,
        controller: Rc<RefCell<PanelController>>,
        command_tx: mpsc::Sender<DockCommand>,
    ) -> Rc<Self> {
        let panel = Rc::new_cyclic(|weak: &Weak<Self>| {
            let root = Fixed::new();
            window.set_child(Some(&root));

            let (band, clock) = Self::build_band(weak, &controller);
            root.put(&band, 0.0, 0.0);

            let drawer = DrawerView::new();
            root.put(drawer.widget(), 0.0, 0.0);

            let weak_scroll = weak.clone();
            drawer.connect_scroll(move |dy| {
                if let Some(this) = weak_scroll.upgrade() {
                    this.on_scroll(dy);
                }
            });

            let weak_power = weak.clone();
            let power_menu = PowerMenuView::new(command_tx, move || {
                if let Some(this) = weak_power.upgrade() {
                    this.toggle(SubpanelKind::PowerMenu);
                }
            });
            root.put(power_menu.widget(), 0.0, 0.0);

            Self {
                window,
                root,
                band,
                clock,
                drawer,
                power_menu,
                controller,
                frame_source: RefCell::new(None),
                epoch: Instant::now(),
            }
        });

        panel.apply_geometry();
        panel
    }

    fn build_band(
        weak: &Weak<Self>,
        controller: &Rc<RefCell<PanelController>>,
    ) -> (GtkBox, Label) {
        let band = GtkBox::new(Orientation::Vertical, 10);
        band.add_css_class("band");

        let clock = Label::new(None);
        clock.add_css_class("clock");
        clock.set_margin_top(10);
        clock.set_justify(gtk4::Justification::Center);
        band.append(&clock);

        let power_button = Button::with_label("\u{23FB}");
        power_button.add_css_class("power-button");
        power_button.set_size_request(40, 40);
        power_button.set_halign(gtk4::Align::Center);
        let weak_power = weak.clone();
        power_button.connect_clicked(move |_| {
            if let Some(this) = weak_power.upgrade() {
                this.toggle(SubpanelKind::PowerMenu);
            }
        });
        band.append(&power_button);

        let drawer_button = Button::with_label("\u{2261}");
        drawer_button.add_css_class("drawer-button");
        drawer_button.set_size_request(-1, controller.borrow().config().drawer_height);
        let weak_drawer = weak.clone();
        drawer_button.connect_clicked(move |_| {
            if let Some(this) = weak_drawer.upgrade() {
                this.toggle(SubpanelKind::Drawer);
            }
        });
        band.append(&drawer_button);

        for (index, favorite) in controller.borrow().favorites().iter().enumerate() {
            let button = Self::build_favorite_button(favorite);
            let weak_favorite = weak.clone();
            button.connect_clicked(move |_| {
                if let Some(this) = weak_favorite.upgrade() {
                    this.activate_favorite(index);
                }
            });
            band.append(&button);
        }

        (band, clock)
    }

    fn build_favorite_button(favorite: &AppEntry) -> Button {
        let button = Button::new();
        button.add_css_class("favorite-button");
        button.set_size_request(40, 40);
        button.set_halign(gtk4::Align::Center);
        button.set_tooltip_text(Some(favorite.name.as_str()));

        if favorite.icon.is_empty() {
            let initial: String = favorite.name.chars().take(1).collect();
            button.set_label(&initial);
        } else {
            let image = Image::from_icon_name(favorite.icon.as_str());
            image.set_pixel_size(24);
            button.set_child(Some(&image));
        }

        button
    }

    /// Show the window and announce the startup reservation, in that
    /// order: the reservation call needs a realized surface.
    pub fn present(&self) {
        self.window.present();
        self.controller.borrow_mut().announce_startup();
    }

    pub fn handle_event(self: &Rc<Self>, event: DockEvent) {
        match event {
            DockEvent::ClockTick => {
                let now = chrono::Local::now();
                self.clock.set_text(&now.format("%H\n%M").to_string());
            }

            DockEvent::CatalogLoaded(apps) => {
                debug!("populating drawer with {} tiles", apps.len());
                let weak = Rc::downgrade(self);
                self.drawer.populate(&apps, move |index| {
                    if let Some(this) = weak.upgrade() {
                        this.activate_tile(index);
                    }
                });
                self.controller.borrow_mut().install_catalog(apps);
            }

            DockEvent::ToggleRequested(panel) => self.toggle(panel),
        }
    }

    fn toggle(self: &Rc<Self>, panel: SubpanelKind) {
        let now = self.now_ms();
        self.controller.borrow_mut().toggle(panel, now);
        self.apply_geometry();
        self.ensure_frame_timer();
    }

    fn activate_tile(self: &Rc<Self>, index: usize) {
        let now = self.now_ms();
        self.controller.borrow_mut().activate_tile(index, now);
        self.apply_geometry();
        self.ensure_frame_timer();
    }

    fn activate_favorite(self: &Rc<Self>, index: usize) {
        let now = self.now_ms();
        self.controller.borrow_mut().activate_favorite(index, now);
        self.apply_geometry();
        self.ensure_frame_timer();
    }

    fn on_scroll(&self, dy: f64) {
        let position = {
            let mut controller = self.controller.borrow_mut();
            controller.scroll(dy * SCROLL_STEP);
            controller.drawer_scroll()
        };
        self.drawer.set_scroll_position(position);
    }

    /// Push the controller's current rectangles into the widget tree
    fn apply_geometry(&self) {
        let (geometry, mode) = {
            let controller = self.controller.borrow();
            (*controller.geometry(), controller.mode())
        };

        self.window.set_default_size(geometry.outer.w, -1);
        self.root.set_size_request(geometry.outer.w, geometry.outer.h);

        self.band.set_size_request(geometry.band.w, geometry.band.h);
        self.root
            .move_(&self.band, geometry.band.x as f64, geometry.band.y as f64);

        let sub = geometry.subpanel;
        let drawer_visible = mode == Mode::DrawerOpen && sub.w > 0;
        let power_visible = mode == Mode::PowerMenuOpen && sub.w > 0;

        self.drawer.widget().set_visible(drawer_visible);
        if drawer_visible {
            self.drawer.widget().set_size_request(sub.w, sub.h);
            self.root.move_(self.drawer.widget(), sub.x as f64, sub.y as f64);
        }

        self.power_menu.widget().set_visible(power_visible);
        if power_visible {
            self.power_menu.widget().set_size_request(sub.w, sub.h);
            self.root
                .move_(self.power_menu.widget(), sub.x as f64, sub.y as f64);
        }
    }

    /// Start the frame source if a transition is in flight. The source
    /// removes itself as soon as the controller reports idle.
    fn ensure_frame_timer(self: &Rc<Self>) {
        if !self.controller.borrow().is_animating() {
            return;
        }
        if self.frame_source.borrow().is_some() {
            return;
        }

        let weak = Rc::downgrade(self);
        let id = glib::timeout_add_local(FRAME_INTERVAL, move || {
            let Some(this) = weak.upgrade() else {
                return glib::ControlFlow::Break;
            };

            let now = this.now_ms();
            this.controller.borrow_mut().tick(now);
            this.apply_geometry();

            if this.controller.borrow().is_animating() {
                glib::ControlFlow::Continue
            } else {
                this.frame_source.borrow_mut().take();
                glib::ControlFlow::Break
            }
        });

        *self.frame_source.borrow_mut() = Some(id);
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}
