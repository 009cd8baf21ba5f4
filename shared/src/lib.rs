//! # Shared Game Library
//!
//! Everything both peers of a networked gravity-drop ("four in a row") game
//! must agree on: the board, the rules, the wire messages, and the session
//! that keeps two engines in lock-step.
//!
//! ## Module Organization
//!
//! - [`board`]: bitboard storage of the two colors plus turn and result
//! - [`validator`]: gravity-aware legality check
//! - [`win`]: four-in-a-row and draw detection
//! - [`game`]: [`GameEngine`], the only place a board is mutated
//! - [`message`]: `PLACE-<col><row>` / `ERROR` / `YOU-WIN` codec and framing
//! - [`sync`]: [`Session`], the per-peer protocol loop
//! - [`error`]: error taxonomy for the engine and the session
//!
//! ## Usage Example
//!
//! ```rust
//! use shared::{GameEngine, GameResult, GameState};
//!
//! let mut game = GameEngine::new_game(7, 6)?;
//! for &(row, col) in &[(5, 0), (4, 0), (5, 1), (4, 1), (5, 2), (4, 2), (5, 3)] {
//!     game.apply_move(row, col)?;
//! }
//! assert_eq!(game.game_state(), GameState::Finished);
//! assert_eq!(game.game_result()?, GameResult::BlackWon);
//! # Ok::<(), shared::GameError>(())
//! ```

pub mod board;
pub mod error;
pub mod game;
pub mod message;
pub mod player;
pub mod sync;
pub mod validator;
pub mod win;

pub use board::BoardState;
pub use error::{GameError, ProtocolViolation, SessionError};
pub use game::GameEngine;
pub use message::{FrameDecoder, Message};
pub use player::{Cell, GameResult, GameState, Player};
pub use sync::{LocalCommand, Session, SessionConfig, SessionOutcome, Step};
