//! A terminal client for the word-guessing game.
//!
//! The client talks to a remote game server through a session actor,
//! prints every snapshot the session publishes, and reads one command
//! per line from stdin.

use anyhow::{Context, Result};
use log::{info, warn};
use pico_args::Arguments;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use wg_client::{
    commands::{Command, admit, parse_command},
    render::{HELP as COMMAND_HELP, render},
};
use wordgame::{
    HttpAuthority, SessionActor, Snapshot,
    config::{ClientConfig, Overrides},
};

const HELP: &str = "\
Play the word-guessing game against a remote game server

USAGE:
  wg_client [OPTIONS]

OPTIONS:
  --server URL          Game server URL          [env: GAME_API_URL]
  --timeout SECS        Per-request timeout      [env: GAME_REQUEST_TIMEOUT_SECS]

FLAGS:
  --no-autostart        Wait for 'new' instead of starting a game
  --json                Print snapshots as JSON lines instead of text
  -h, --help            Print help information
";

struct Args {
    overrides: Overrides,
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::builder().format_target(false).init();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let no_autostart = pargs.contains("--no-autostart");
    let args = Args {
        overrides: Overrides {
            base_url: pargs.opt_value_from_str("--server")?,
            request_timeout_secs: pargs.opt_value_from_str("--timeout")?,
            autostart: no_autostart.then_some(false),
        },
        json: pargs.contains("--json"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        warn!("Ignoring unknown arguments: {:?}", remaining);
    }

    run(args).await
}

fn print_snapshot(snapshot: &Snapshot, json: bool) {
    if json {
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!("Failed to encode snapshot: {e}"),
        }
    } else {
        println!("\n{}\n", render(snapshot));
    }
}

async fn run(args: Args) -> Result<()> {
    let config = ClientConfig::from_env(args.overrides).context("Invalid configuration")?;
    let authority =
        HttpAuthority::new(&config.authority).context("Failed to build the HTTP client")?;

    info!("Using game server at {}", authority.base_url());
    if let Err(e) = authority.health().await {
        warn!("Game server health check failed: {e}");
    }

    let (actor, handle) = SessionActor::new(Arc::new(authority), config.session);
    let mut snapshots = handle.subscribe();
    let session = tokio::spawn(actor.run());

    let json = args.json;
    let printer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            print_snapshot(&snapshot, json);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let event = match parse_command(&line) {
            Ok(Command::Event(event)) => event,
            Ok(Command::Help) => {
                print!("{COMMAND_HELP}");
                continue;
            }
            Ok(Command::Quit) => break,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        let snapshot = handle.snapshot().await?;
        match admit(event, &snapshot) {
            Ok(event) => handle.dispatch(event).await?,
            Err(e) => println!("{e}"),
        }
    }

    // The actor may already be gone if stdin closed after a failure.
    let _ = handle.close().await;
    let _ = session.await;
    let _ = printer.await;
    info!("Goodbye");
    Ok(())
}
