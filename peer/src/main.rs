use clap::{Parser, Subcommand};
use log::info;
use peer::connection::{self, Role};
use peer::{console, render};
use shared::{GameEngine, Session, SessionConfig, SessionOutcome};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    mode: Mode,

    /// Board width (at most 10 over the wire)
    #[arg(long, default_value = "7", global = true)]
    cols: usize,

    /// Board height (at most 10 over the wire)
    #[arg(long, default_value = "6", global = true)]
    rows: usize,

    /// Length of one loop frame in milliseconds
    #[arg(long, default_value = "16", global = true)]
    frame_ms: u64,

    /// Longest wait for network input per frame in milliseconds
    #[arg(long, default_value = "4", global = true)]
    poll_ms: u64,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Listen for a peer and play Black
    Host {
        /// Address to listen on
        #[arg(short = 'b', long, default_value = "127.0.0.1:4000")]
        bind: String,
    },
    /// Connect to a host and play White
    Join {
        /// Host address to connect to
        #[arg(short = 's', long, default_value = "127.0.0.1:4000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let engine = GameEngine::new_game(args.cols, args.rows)?;
    let config = SessionConfig {
        frame: Duration::from_millis(args.frame_ms),
        poll_wait: Duration::from_millis(args.poll_ms),
    };

    let (stream, role) = match args.mode {
        Mode::Host { bind } => {
            let listener = connection::listen(&bind).await?;
            (connection::accept_peer(&listener).await?, Role::Host)
        }
        Mode::Join { server } => (connection::connect_peer(&server).await?, Role::Guest),
    };

    let local = role.color();
    let mut session = Session::new(stream, engine, local, config)?;

    let (cmd_sender, mut cmd_receiver) = mpsc::channel(16);
    console::spawn_console(cmd_sender);

    info!("Playing {}", local);
    println!("Enter a cell like C6 to drop a disk, or 'quit' to leave.");

    let outcome = session
        .run(&mut cmd_receiver, |engine| {
            println!("{}{}", render::render_board(engine), render::status_line(engine, local));
        })
        .await?;

    match outcome {
        SessionOutcome::Finished(result) => println!("Game over: {}", result),
        SessionOutcome::Quit => println!("Left the game"),
    }

    Ok(())
}
