use crate::geometry::SubpanelKind;

/// Commands FROM the UI TO the async services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockCommand {
    // =========== Power Commands ===========

    /// End the session
    Logout,

    /// Lock the screen
    Lock,

    /// Suspend the system
    Suspend,

    /// Reboot the system
    Reboot,

    /// Shutdown the system
    Shutdown,

    // =========== Panel Commands (from IPC) ===========

    /// Toggle a sub-panel open or closed
    ToggleSubpanel(SubpanelKind),
}
