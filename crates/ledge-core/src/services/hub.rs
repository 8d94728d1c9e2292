use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::catalog;
use crate::messages::{DockCommand, DockEvent};
use super::ProcessService;

/// Central hub owning the tokio runtime and the channels between the
/// GTK side and the async services.
pub struct ServiceHub {
    /// Event sender for broadcasting to the UI
    event_tx: async_channel::Sender<DockEvent>,
    /// Event receiver for UI components
    event_rx: async_channel::Receiver<DockEvent>,
    /// Command sender for the UI to use
    command_tx: mpsc::Sender<DockCommand>,
    /// Tokio runtime
    runtime: Arc<Runtime>,
}

impl ServiceHub {
    /// Create a new hub with its own tokio runtime and start the
    /// services: command routing, power actions, the clock ticker, and
    /// the one-shot catalog scan.
    pub fn new() -> anyhow::Result<Self> {
        let runtime = Arc::new(Runtime::new()?);

        let (event_tx, event_rx) = async_channel::bounded::<DockEvent>(64);
        let (command_tx, command_rx) = mpsc::channel::<DockCommand>(64);
        let (process_tx, process_rx) = mpsc::channel::<DockCommand>(64);

        runtime.spawn(Self::route_commands(
            command_rx,
            process_tx,
            event_tx.clone(),
        ));

        runtime.spawn(async move {
            let service = ProcessService::new(process_rx);
            if let Err(e) = service.run().await {
                error!("Process service error: {}", e);
            }
        });

        let event_tx_clock = event_tx.clone();
        runtime.spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            loop {
                ticker.tick().await;
                if event_tx_clock.send(DockEvent::ClockTick).await.is_err() {
                    break;
                }
            }
        });

        // Catalog scan is filesystem-bound; keep it off the UI thread
        // and deliver the result once.
        let event_tx_catalog = event_tx.clone();
        runtime.spawn(async move {
            let apps = tokio::task::spawn_blocking(catalog::load_catalog)
                .await
                .unwrap_or_default();
            let _ = event_tx_catalog.send(DockEvent::CatalogLoaded(apps)).await;
        });

        info!("ServiceHub initialized");

        Ok(Self {
            event_tx,
            event_rx,
            command_tx,
            runtime,
        })
    }

    /// Route commands to the right consumer
    async fn route_commands(
        mut rx: mpsc::Receiver<DockCommand>,
        process_tx: mpsc::Sender<DockCommand>,
        event_tx: async_channel::Sender<DockEvent>,
    ) {
        while let Some(cmd) = rx.recv().await {
            match cmd {
                DockCommand::Lock
                | DockCommand::Logout
                | DockCommand::Suspend
                | DockCommand::Reboot
                | DockCommand::Shutdown => {
                    let _ = process_tx.send(cmd).await;
                }

                // Panel toggles flow back to the UI as events
                DockCommand::ToggleSubpanel(panel) => {
                    let _ = event_tx.send(DockEvent::ToggleRequested(panel)).await;
                }
            }
        }
    }

    /// Get a clone of the event receiver for a UI component
    pub fn event_receiver(&self) -> async_channel::Receiver<DockEvent> {
        self.event_rx.clone()
    }

    /// Get a clone of the command sender for a UI component
    pub fn command_sender(&self) -> mpsc::Sender<DockCommand> {
        self.command_tx.clone()
    }

    /// Get a clone of the event sender (for the IPC listener)
    pub fn event_sender(&self) -> async_channel::Sender<DockEvent> {
        self.event_tx.clone()
    }

    /// Enter the runtime context (for GTK callbacks)
    pub fn enter_runtime(&self) -> tokio::runtime::EnterGuard<'_> {
        self.runtime.enter()
    }

    /// Get a reference to the runtime
    pub fn runtime(&self) -> &Arc<Runtime> {
        &self.runtime
    }
}
