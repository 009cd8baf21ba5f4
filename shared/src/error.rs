use crate::message::Message;

/// Errors reported by the game engine. None of them change the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid board geometry {cols}x{rows} (need cols, rows > 0 and cols * rows <= 64)")]
    InvalidGeometry { cols: usize, rows: usize },

    #[error("cell (row {row}, col {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("illegal move at (row {row}, col {col})")]
    IllegalMove { row: usize, col: usize },

    #[error("game result is not available before the game has finished")]
    ResultNotAvailable,
}

/// Ways the remote peer can break the protocol. Each one ends the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolViolation {
    #[error("malformed message {0:?}")]
    Malformed(String),

    #[error("move at (row {row}, col {col}) received out of turn")]
    OutOfTurn { row: usize, col: usize },

    #[error("remote move at (row {row}, col {col}) is not legal")]
    IllegalRemoteMove { row: usize, col: usize },

    #[error("unexpected message {0}")]
    UnexpectedMessage(Message),
}

/// Errors that terminate a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),

    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),

    #[error("peer aborted the session")]
    PeerAborted,

    #[error("board {cols}x{rows} cannot be played over the wire (at most 10 per axis)")]
    UnsupportedGeometry { cols: usize, rows: usize },
}

impl SessionError {
    /// True for errors after which the peer should be told `ERROR`.
    pub fn notifies_peer(&self) -> bool {
        matches!(self, SessionError::Protocol(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_display() {
        let err = GameError::InvalidGeometry { cols: 13, rows: 5 };
        assert_eq!(
            err.to_string(),
            "invalid board geometry 13x5 (need cols, rows > 0 and cols * rows <= 64)"
        );
        assert_eq!(
            GameError::IllegalMove { row: 0, col: 3 }.to_string(),
            "illegal move at (row 0, col 3)"
        );
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::from(ProtocolViolation::OutOfTurn { row: 5, col: 2 });
        assert_eq!(
            err.to_string(),
            "protocol violation: move at (row 5, col 2) received out of turn"
        );
        assert!(err.notifies_peer());
        assert!(!SessionError::PeerAborted.notifies_peer());
    }

    #[test]
    fn test_transport_error_does_not_notify_peer() {
        let err = SessionError::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(matches!(err, SessionError::Transport(_)));
        assert!(!err.notifies_peer());
    }
}
