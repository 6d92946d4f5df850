#![warn(missing_docs)]
//! # moodtrack binary
//!
//! Terminal entry point for the moodtrack client.

use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::mpsc::{self, Sender};
use std::thread;

use clap::Parser;
use moodtrack_app::{AppConfig, AppError, GatewayWorker, LoopEvent, Shell, init_tracing};
use tracing::{info, warn};

/// CLI entry point.
fn main() -> ExitCode {
    let config = AppConfig::parse();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("moodtrack: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    init_tracing(&config.log_filter)?;
    let gateway = config.build_gateway()?;
    info!(
        version = moodtrack_app::app_version(),
        base_url = %gateway.base_url(),
        timeout_secs = config.timeout_secs,
        "starting"
    );

    let (events_tx, events_rx) = mpsc::channel::<LoopEvent>();
    spawn_stdin_reader(events_tx.clone())?;

    let worker = GatewayWorker::new(gateway, events_tx);
    let mut shell = Shell::new(worker, io::stdout().lock()).with_drain_timeout(config.timeout());
    shell.run(&events_rx)
}

fn spawn_stdin_reader(events: Sender<LoopEvent>) -> Result<(), AppError> {
    thread::Builder::new()
        .name("moodtrack-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(error) => {
                        warn!(%error, "stdin read failed");
                        break;
                    }
                };
                if events.send(LoopEvent::Line(line)).is_err() {
                    return;
                }
            }
            let _ = events.send(LoopEvent::InputClosed);
        })
        .map(drop)
        .map_err(AppError::Spawn)
}
