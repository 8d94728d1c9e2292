use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::messages::DockCommand;
use crate::utils::spawn_shell_detached;

/// Service executing power commands from the power menu.
///
/// Each action tries a list of system commands in preference order and
/// gives up with a log line if none can be spawned; a dead collaborator
/// never takes the panel down with it.
pub struct ProcessService {
    command_rx: mpsc::Receiver<DockCommand>,
}

impl ProcessService {
    pub fn new(command_rx: mpsc::Receiver<DockCommand>) -> Self {
        Self { command_rx }
    }

    /// Run the process service (blocks forever)
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!("Starting process service");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                DockCommand::Lock => {
                    Self::run_with_fallbacks(
                        "lock",
                        &["swaylock", "hyprlock", "loginctl lock-session"],
                    );
                }

                DockCommand::Logout => {
                    Self::run_with_fallbacks(
                        "logout",
                        &["loginctl terminate-session \"$XDG_SESSION_ID\"", "pkill -TERM -u \"$USER\""],
                    );
                }

                DockCommand::Suspend => {
                    Self::run_with_fallbacks("suspend", &["systemctl suspend", "loginctl suspend"]);
                }

                DockCommand::Reboot => {
                    Self::run_with_fallbacks("reboot", &["systemctl reboot", "reboot"]);
                }

                DockCommand::Shutdown => {
                    Self::run_with_fallbacks("shutdown", &["systemctl poweroff", "poweroff"]);
                }

                // Panel commands are routed to the UI by the hub
                DockCommand::ToggleSubpanel(_) => {}
            }
        }

        Ok(())
    }

    /// Try each command line in preference order until one spawns.
    /// Returns whether any did.
    fn run_with_fallbacks(action: &str, commands: &[&str]) -> bool {
        info!("Power action: {}", action);

        for cmd in commands {
            if spawn_shell_detached(cmd).is_ok() {
                debug!("Initiated {} via: {}", action, cmd);
                return true;
            }
        }

        error!("No working command for power action: {}", action);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_chain_spawns_first_working_command() {
        assert!(ProcessService::run_with_fallbacks("noop", &["true"]));
    }

    #[test]
    fn test_empty_fallback_chain_reports_failure() {
        assert!(!ProcessService::run_with_fallbacks("noop", &[]));
    }
}
