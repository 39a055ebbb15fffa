use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal::unix::{self, SignalKind};
use tokio_util::{
    sync::CancellationToken,
    task::TaskTracker,
};

use relayd::api;
use relayd::config::Config;
use relayd::relay::{RelayController, PRODUCT_ID, VENDOR_ID};
use relayd::tracing::{self, prelude::*};
use relayd::usb::UsbRelayBoard;

#[derive(Parser, Debug)]
#[command(name = "relayd")]
#[command(about = "HTTP control daemon for an eight-channel USB relay board")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Listen address override (e.g. 127.0.0.1:2500)
    #[arg(long, value_name = "ADDR")]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing::init_journald_or_stdout();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(listen) = args.listen {
        config.api.listen = listen;
    }

    // Without a device handle the daemon must not accept requests, so a
    // missing board is fatal here rather than a per-request error.
    let board = UsbRelayBoard::open(VENDOR_ID, PRODUCT_ID)
        .context("failed to acquire the USB relay board")?;
    let state = api::AppState::new(RelayController::new(board));

    let running = CancellationToken::new();
    let tracker = TaskTracker::new();
    tracker.spawn(api::task(config.api, state, running.clone()));
    tracker.close();
    info!("Started.");

    let mut sigint = unix::signal(SignalKind::interrupt())?;
    let mut sigterm = unix::signal(SignalKind::terminate())?;
    tokio::select! {
        _ = sigint.recv() => {},
        _ = sigterm.recv() => {},
    }

    trace!("Shutting down.");
    running.cancel();

    tracker.wait().await;
    info!("Exiting.");
    Ok(())
}
