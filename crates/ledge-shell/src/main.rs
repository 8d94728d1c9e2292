mod daemon;
mod ipc;
mod theme;
mod ui;

use clap::{Parser, Subcommand};
use tracing::info;

use ledge_core::SubpanelKind;

#[derive(Parser)]
#[command(name = "ledge-shell")]
#[command(about = "Edge-anchored dock panel with an expanding application drawer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run as daemon (default)
    Daemon,
    /// Toggle a sub-panel of a running daemon
    Toggle {
        /// Sub-panel name (drawer, power)
        panel: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ledge_shell=info".parse()?)
                .add_directive("ledge_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Daemon) | None => {
            info!("Starting Ledge Shell daemon");
            daemon::run()
        }
        Some(Command::Toggle { panel }) => {
            let kind = SubpanelKind::from_str(&panel)
                .ok_or_else(|| anyhow::anyhow!("Unknown sub-panel: {}", panel))?;
            ipc::send_toggle(kind)
        }
    }
}
