//! Console move source: one cell label per line.

use log::{debug, warn};
use shared::LocalCommand;
use std::io::BufRead;
use std::thread;
use tokio::sync::mpsc;

/// Parses `C6`-style labels (column letter, 1-based row) and `quit`.
pub fn parse_command(line: &str) -> Option<LocalCommand> {
    let line = line.trim();
    if ["q", "quit", "exit"]
        .iter()
        .any(|word| line.eq_ignore_ascii_case(word))
    {
        return Some(LocalCommand::Quit);
    }

    let mut chars = line.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() {
        return None;
    }
    let row: usize = chars.as_str().trim().parse().ok()?;
    if row == 0 {
        return None;
    }

    Some(LocalCommand::Place {
        row: row - 1,
        col: (letter as u8 - b'A') as usize,
    })
}

/// Reads stdin on a plain thread so a pending read never holds up runtime
/// shutdown. The sender is dropped when stdin closes.
pub fn spawn_console(commands: mpsc::Sender<LocalCommand>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break;
                }
            };

            match parse_command(&line) {
                Some(command) => {
                    if commands.blocking_send(command).is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => warn!("Unrecognized input {:?}; enter a cell like C6 or 'quit'", line),
            }
        }
        debug!("Console input closed");
    })
}
