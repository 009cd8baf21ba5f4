//! # Peer Library
//!
//! The pieces a runnable peer needs around the shared engine and session.
//!
//! ## Module Organization
//!
//! ### Connection Module (`connection`)
//! Opens the byte stream. The host listens and plays Black, the guest
//! connects and plays White.
//!
//! ### Console Module (`console`)
//! Turns typed cell labels such as `C6` into local commands for the session.
//!
//! ### Render Module (`render`)
//! Draws the board as labelled text, marking where a disk can drop.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use peer::{connection, console, render};
//! use shared::{GameEngine, Session, SessionConfig};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let listener = connection::listen("127.0.0.1:4000").await?;
//!     let stream = connection::accept_peer(&listener).await?;
//!
//!     let role = connection::Role::Host;
//!     let engine = GameEngine::new_game(7, 6)?;
//!     let mut session = Session::new(stream, engine, role.color(), SessionConfig::default())?;
//!
//!     let (tx, mut rx) = mpsc::channel(16);
//!     console::spawn_console(tx);
//!     let outcome = session
//!         .run(&mut rx, |engine| println!("{}", render::render_board(engine)))
//!         .await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod console;
pub mod render;
