mod spawn;

pub use spawn::{spawn_detached, spawn_shell_detached};
