use crate::catalog::AppEntry;
use crate::geometry::SubpanelKind;

/// Events FROM the async services TO the UI
#[derive(Debug, Clone)]
pub enum DockEvent {
    /// Clock tick, once per second
    ClockTick,

    /// The one-shot startup catalog scan finished
    CatalogLoaded(Vec<AppEntry>),

    /// A sub-panel toggle was requested externally (IPC)
    ToggleRequested(SubpanelKind),
}
