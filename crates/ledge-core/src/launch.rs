use compact_str::CompactString;
use thiserror::Error;
use tracing::debug;

use crate::utils::spawn_detached;

/// Why a launch attempt did not start a process
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("empty launch command")]
    EmptyCommand,
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fire-and-forget application launching. The panel never waits on a
/// spawned process and never treats a failure as fatal.
pub trait Launcher {
    fn launch(&self, command: &[CompactString]) -> Result<(), LaunchError>;
}

/// Launcher backed by a detached OS process spawn
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, command: &[CompactString]) -> Result<(), LaunchError> {
        let Some(program) = command.first() else {
            return Err(LaunchError::EmptyCommand);
        };

        debug!(%program, "launching application");
        spawn_detached(program, &command[1..]).map_err(|source| LaunchError::Spawn {
            command: command.join(" "),
            source,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_is_rejected() {
        let launcher = ProcessLauncher;
        assert!(matches!(launcher.launch(&[]), Err(LaunchError::EmptyCommand)));
    }

    #[test]
    fn test_missing_binary_reports_spawn_error() {
        let launcher = ProcessLauncher;
        let command = [CompactString::from("ledge-test-no-such-binary")];
        assert!(matches!(
            launcher.launch(&command),
            Err(LaunchError::Spawn { .. })
        ));
    }
}
