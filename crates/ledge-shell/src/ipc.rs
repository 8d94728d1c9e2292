use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use tracing::{debug, warn};

use ledge_core::{DockEvent, SubpanelKind};

/// Get the IPC socket path
pub fn socket_path() -> PathBuf {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(runtime_dir).join("ledge-shell.sock")
}

/// Send a toggle command to the daemon via IPC
pub fn send_toggle(panel: SubpanelKind) -> anyhow::Result<()> {
    let path = socket_path();

    if !path.exists() {
        return Err(anyhow::anyhow!(
            "Ledge Shell daemon is not running (socket not found at {:?})",
            path
        ));
    }

    let mut stream = UnixStream::connect(&path)?;
    stream.write_all(format!("toggle {}\n", panel.name()).as_bytes())?;
    stream.flush()?;

    let mut response = String::new();
    stream.read_to_string(&mut response)?;
    println!("{}", response.trim());
    Ok(())
}

/// Daemon-side listener translating IPC lines into toggle events for
/// the panel. Runs on the service runtime forever.
pub async fn serve(event_tx: async_channel::Sender<DockEvent>) -> anyhow::Result<()> {
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::UnixListener;

    let path = socket_path();
    // Stale socket from a previous run
    let _ = std::fs::remove_file(&path);

    let listener = UnixListener::bind(&path)?;
    debug!("IPC listening on {:?}", path);

    loop {
        let (stream, _) = listener.accept().await?;
        let event_tx = event_tx.clone();

        tokio::spawn(async move {
            let (reader, mut writer) = stream.into_split();
            let mut lines = BufReader::new(reader).lines();

            while let Ok(Some(line)) = lines.next_line().await {
                let reply = match parse_request(&line) {
                    Some(panel) => {
                        let _ = event_tx.send(DockEvent::ToggleRequested(panel)).await;
                        "ok"
                    }
                    None => {
                        warn!("Unknown IPC request: {}", line);
                        "error: unknown request"
                    }
                };

                if writer.write_all(reply.as_bytes()).await.is_err() {
                    break;
                }
                let _ = writer.write_all(b"\n").await;
            }
        });
    }
}

fn parse_request(line: &str) -> Option<SubpanelKind> {
    let mut parts = line.trim().split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("toggle"), Some(panel)) => SubpanelKind::from_str(panel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        assert_eq!(parse_request("toggle drawer"), Some(SubpanelKind::Drawer));
        assert_eq!(parse_request("  toggle power  "), Some(SubpanelKind::PowerMenu));
        assert_eq!(parse_request("toggle"), None);
        assert_eq!(parse_request("show drawer"), None);
    }
}
