use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Button, Orientation};
use tokio::sync::mpsc;

use ledge_core::DockCommand;

/// The power menu sub-panel content
pub struct PowerMenuView {
    container: GtkBox,
}

impl PowerMenuView {
    /// `on_action` runs after any action button, so the menu can be
    /// collapsed through the normal close transition.
    pub fn new<F>(command_tx: mpsc::Sender<DockCommand>, on_action: F) -> Self
    where
        F: Fn() + Clone + 'static,
    {
        let container = GtkBox::new(Orientation::Vertical, 4);
        container.add_css_class("power-menu");
        container.set_margin_top(8);
        container.set_margin_bottom(8);
        container.set_margin_start(8);
        container.set_margin_end(8);
        container.set_visible(false);

        let actions = [
            ("Logout", DockCommand::Logout, false),
            ("Lock Screen", DockCommand::Lock, false),
            ("Suspend", DockCommand::Suspend, false),
            ("Reboot", DockCommand::Reboot, false),
            ("Shutdown", DockCommand::Shutdown, true),
        ];

        for (label, command, destructive) in actions {
            let button = Button::with_label(label);
            if destructive {
                button.add_css_class("destructive");
            }

            let tx = command_tx.clone();
            let on_action = on_action.clone();
            button.connect_clicked(move |_| {
                let _ = tx.blocking_send(command);
                on_action();
            });
            container.append(&button);
        }

        Self { container }
    }

    pub fn widget(&self) -> &GtkBox {
        &self.container
    }
}
