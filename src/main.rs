use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordhint::{
    event::SubscriberError, ActionHandler, AppError, EventSubscriber, GameConfig, LobbyEvent,
    LobbyHandle, Subscription, WordBank,
};

/// Prints every lobby event as one JSON line on stdout
struct StdoutSubscriber;

#[async_trait]
impl EventSubscriber for StdoutSubscriber {
    async fn handle_event(&self, event: LobbyEvent) -> Result<(), SubscriberError> {
        let line =
            serde_json::to_string(&event).map_err(|e| SubscriberError::Output(e.to_string()))?;
        print_line(&line).map_err(|e| SubscriberError::Output(e.to_string()))
    }

    fn handler_name(&self) -> &'static str {
        "StdoutSubscriber"
    }
}

fn print_line(line: &str) -> Result<(), AppError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", line)?;
    stdout.flush()?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr, stdout carries the JSON lines
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordhint=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "Lobby driver failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = GameConfig::from_env()?;
    info!(
        round_seconds = config.round_seconds,
        hint_interval_secs = config.hint_interval.as_secs(),
        "Starting word hint lobby"
    );

    let lobby = LobbyHandle::new(config, WordBank::default(), StdRng::from_os_rng());
    let _subscription = Subscription::new(Arc::new(StdoutSubscriber), lobby.event_bus()).start();
    let handler = ActionHandler::new(lobby.clone());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                match handler.handle_text(&line).await {
                    Ok(Some(snapshot)) => print_line(&serde_json::to_string(&snapshot)?)?,
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "Rejected input line"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    lobby.shutdown();
    Ok(())
}
