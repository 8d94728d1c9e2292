use compact_str::CompactString;
use std::process::{Command, Stdio};
use tracing::debug;

/// Spawn a detached process with nulled stdio. The child is not waited
/// on; its exit status is nobody's business but the OS's.
pub fn spawn_detached(program: &str, args: &[CompactString]) -> std::io::Result<()> {
    Command::new(program)
        .args(args.iter().map(|a| a.as_str()))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    debug!(%program, "spawned detached process");
    Ok(())
}

/// Spawn a shell command line detached, for commands that need `sh -c`
/// semantics (power actions with fallbacks).
pub fn spawn_shell_detached(command: &str) -> std::io::Result<()> {
    Command::new("sh")
        .args(["-c", command])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    debug!(%command, "spawned detached shell command");
    Ok(())
}
