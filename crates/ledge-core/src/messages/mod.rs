mod commands;
mod events;

pub use commands::DockCommand;
pub use events::DockEvent;
