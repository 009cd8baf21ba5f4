//! Colors, cell contents, and the turn/result markers of a game.

use std::fmt;

/// One of the two sides. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opposite(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Player::Black => 'B',
            Player::White => 'W',
        }
    }

    /// The state marker meaning "this player is to move".
    pub fn to_move(self) -> GameState {
        match self {
            Player::Black => GameState::BlackToMove,
            Player::White => GameState::WhiteToMove,
        }
    }

    /// The result recorded when this player completes a run.
    pub fn win(self) -> GameResult {
        match self {
            Player::Black => GameResult::BlackWon,
            Player::White => GameResult::WhiteWon,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Player::Black => "Black",
            Player::White => "White",
        };
        write!(f, "{}", name)
    }
}

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Black,
    White,
    Empty,
}

/// Turn marker of a game. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    BlackToMove,
    WhiteToMove,
    Finished,
}

impl GameState {
    /// The player to move, or `None` once the game is over.
    pub fn mover(self) -> Option<Player> {
        match self {
            GameState::BlackToMove => Some(Player::Black),
            GameState::WhiteToMove => Some(Player::White),
            GameState::Finished => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    BlackWon,
    WhiteWon,
    Draw,
}

impl GameResult {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::BlackWon => Some(Player::Black),
            GameResult::WhiteWon => Some(Player::White),
            GameResult::Draw => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::BlackWon => write!(f, "Black wins"),
            GameResult::WhiteWon => write!(f, "White wins"),
            GameResult::Draw => write!(f, "Draw"),
        }
    }
}
