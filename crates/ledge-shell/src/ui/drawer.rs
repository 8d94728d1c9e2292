use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Button, Image, Label, Orientation, PolicyType, ScrolledWindow};

use ledge_core::AppEntry;

const TILE_SIZE: i32 = 120;

/// The horizontally-scrolling application drawer content
pub struct DrawerView {
    container: ScrolledWindow,
    content: GtkBox,
}

impl DrawerView {
    pub fn new() -> Self {
        let content = GtkBox::new(Orientation::Horizontal, 25);
        content.set_margin_top(10);
        content.set_margin_bottom(10);
        content.set_margin_start(20);
        content.set_margin_end(20);

        let container = ScrolledWindow::new();
        container.add_css_class("drawer");
        container.set_policy(PolicyType::External, PolicyType::Never);
        container.set_child(Some(&content));
        container.set_visible(false);

        Self { container, content }
    }

    pub fn widget(&self) -> &ScrolledWindow {
        &self.container
    }

    /// Rebuild the tile row from the catalog
    pub fn populate<F>(&self, apps: &[AppEntry], on_activate: F)
    where
        F: Fn(usize) + Clone + 'static,
    {
        while let Some(child) = self.content.first_child() {
            self.content.remove(&child);
        }

        for (index, app) in apps.iter().enumerate() {
            let tile = GtkBox::new(Orientation::Vertical, 4);

            let button = Button::new();
            button.add_css_class("tile-button");
            button.set_size_request(TILE_SIZE, TILE_SIZE);

            if app.icon.is_empty() {
                // No icon reference: fall back to the name's initial
                let initial: String = app.name.chars().take(1).collect();
                button.set_label(&initial);
            } else {
                let image = Image::from_icon_name(app.icon.as_str());
                image.set_pixel_size(64);
                button.set_child(Some(&image));
            }

            let on_activate = on_activate.clone();
            button.connect_clicked(move |_| on_activate(index));
            tile.append(&button);

            let label = Label::new(Some(app.name.as_str()));
            label.add_css_class("tile-label");
            label.set_wrap(true);
            label.set_max_width_chars(14);
            label.set_width_request(TILE_SIZE);
            tile.append(&label);

            self.content.append(&tile);
        }
    }

    /// Route a wheel delta to the view; the handler receives the raw
    /// vertical delta in wheel units.
    pub fn connect_scroll<F>(&self, handler: F)
    where
        F: Fn(f64) + 'static,
    {
        let controller =
            gtk4::EventControllerScroll::new(gtk4::EventControllerScrollFlags::VERTICAL);
        controller.connect_scroll(move |_, _dx, dy| {
            handler(dy);
            glib::Propagation::Stop
        });
        self.container.add_controller(controller);
    }

    /// Apply the (unclamped) scroll position; the adjustment clamps it
    /// to the content bounds.
    pub fn set_scroll_position(&self, position: f64) {
        self.container.hadjustment().set_value(position);
    }
}

impl Default for DrawerView {
    fn default() -> Self {
        Self::new()
    }
}
