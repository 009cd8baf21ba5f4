//! Wire messages exchanged between peers.
//!
//! Messages are fixed-shape ASCII tokens written back to back with no
//! delimiter:
//!
//! | Message | Bytes            |
//! |---------|------------------|
//! | Move    | `PLACE-<col><row>` (one digit each) |
//! | Error   | `ERROR`          |
//! | Loss    | `YOU-WIN`        |

use crate::error::ProtocolViolation;
use std::fmt;

/// Largest row or column index a single wire digit can carry.
pub const MAX_WIRE_INDEX: usize = 9;

/// `#` stands for one ASCII digit.
const PLACE_SHAPE: &[u8] = b"PLACE-##";
const ERROR_SHAPE: &[u8] = b"ERROR";
const YOU_WIN_SHAPE: &[u8] = b"YOU-WIN";
const SHAPES: [&[u8]; 3] = [PLACE_SHAPE, ERROR_SHAPE, YOU_WIN_SHAPE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The sender dropped a disk at `(row, col)`.
    Move { col: u8, row: u8 },
    /// The sender saw a protocol violation and is ending the session.
    Error,
    /// The sender lost; the receiver won.
    YouWin,
}

impl Message {
    /// A move message, or `None` if a coordinate does not fit in one digit.
    pub fn place(row: usize, col: usize) -> Option<Message> {
        if row > MAX_WIRE_INDEX || col > MAX_WIRE_INDEX {
            return None;
        }
        Some(Message::Move {
            col: col as u8,
            row: row as u8,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Parses exactly one complete token.
    pub fn decode(bytes: &[u8]) -> Result<Message, ProtocolViolation> {
        if bytes == ERROR_SHAPE {
            return Ok(Message::Error);
        }
        if bytes == YOU_WIN_SHAPE {
            return Ok(Message::YouWin);
        }
        if bytes.len() == PLACE_SHAPE.len() && fits_shape(PLACE_SHAPE, bytes) {
            return Ok(Message::Move {
                col: bytes[6] - b'0',
                row: bytes[7] - b'0',
            });
        }
        Err(malformed(bytes))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Move { col, row } => write!(f, "PLACE-{}{}", col, row),
            Message::Error => write!(f, "ERROR"),
            Message::YouWin => write!(f, "YOU-WIN"),
        }
    }
}

/// Splits an inbound byte stream into messages, whatever the read sizes.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Pops the next complete message.
    ///
    /// `Ok(None)` means the buffered bytes are a prefix of some message and
    /// more input is needed. Bytes that cannot start any message are an error.
    pub fn next_message(&mut self) -> Result<Option<Message>, ProtocolViolation> {
        if self.buffer.is_empty() {
            return Ok(None);
        }

        let shape = SHAPES
            .iter()
            .find(|shape| {
                let seen = self.buffer.len().min(shape.len());
                fits_shape(shape, &self.buffer[..seen])
            })
            .ok_or_else(|| malformed(&self.buffer))?;

        if self.buffer.len() < shape.len() {
            return Ok(None);
        }

        let frame: Vec<u8> = self.buffer.drain(..shape.len()).collect();
        Message::decode(&frame).map(Some)
    }
}

/// True when `bytes` matches the start of `shape`.
fn fits_shape(shape: &[u8], bytes: &[u8]) -> bool {
    bytes.len() <= shape.len()
        && shape.iter().zip(bytes).all(|(&expected, &actual)| match expected {
            b'#' => actual.is_ascii_digit(),
            _ => expected == actual,
        })
}

fn malformed(bytes: &[u8]) -> ProtocolViolation {
    let shown = &bytes[..bytes.len().min(16)];
    ProtocolViolation::Malformed(String::from_utf8_lossy(shown).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_round_trip() {
        let message = Message::decode(b"PLACE-25").unwrap();
        assert_eq!(message, Message::Move { col: 2, row: 5 });
        assert_eq!(message.encode(), b"PLACE-25");
        assert_eq!(Message::place(5, 2), Some(message));
    }

    #[test]
    fn test_control_messages() {
        assert_eq!(Message::decode(b"ERROR"), Ok(Message::Error));
        assert_eq!(Message::decode(b"YOU-WIN"), Ok(Message::YouWin));
        assert_eq!(Message::Error.encode(), b"ERROR");
        assert_eq!(Message::YouWin.encode(), b"YOU-WIN");
    }

    #[test]
    fn test_place_rejects_wide_coordinates() {
        assert_eq!(Message::place(10, 0), None);
        assert_eq!(Message::place(0, 10), None);
        assert_eq!(Message::place(9, 9), Some(Message::Move { col: 9, row: 9 }));
    }

    #[test]
    fn test_decode_rejects_unknown_tokens() {
        let cases: [&[u8]; 6] = [b"PLACE-2x", b"place-25", b"PLACE-2", b"HELLO", b"ERRORS", b""];
        for bytes in cases {
            assert!(
                matches!(Message::decode(bytes), Err(ProtocolViolation::Malformed(_))),
                "accepted {:?}",
                String::from_utf8_lossy(bytes)
            );
        }
    }

    #[test]
    fn test_decoder_waits_for_partial_frames() {
        let mut decoder = FrameDecoder::new();
        decoder.extend(b"PLA");
        assert_eq!(decoder.next_message(), Ok(None));
        decoder.extend(b"CE-3");
        assert_eq!(decoder.next_message(), Ok(None));
        decoder.extend(b"4");
        assert_eq!(
            decoder.next_message(),
            Ok(Some(Message::Move { col: 3, row: 4 }))
        );
        assert!(decoder.is_empty());
    }

    #[test]
    fn test_decoder_splits_coalesced_frames() {
        let mut decoder = FrameDecoder::new();
        decoder.extend(b"PLACE-05YOU-WINERR");

        assert_eq!(
            decoder.next_message(),
            Ok(Some(Message::Move { col: 0, row: 5 }))
        );
        assert_eq!(decoder.next_message(), Ok(Some(Message::YouWin)));
        assert_eq!(decoder.next_message(), Ok(None));

        decoder.extend(b"OR");
        assert_eq!(decoder.next_message(), Ok(Some(Message::Error)));
        assert_eq!(decoder.next_message(), Ok(None));
    }

    #[test]
    fn test_decoder_rejects_garbage_early() {
        let mut decoder = FrameDecoder::new();
        decoder.extend(b"PLAY");
        assert_eq!(
            decoder.next_message(),
            Err(ProtocolViolation::Malformed("PLAY".to_string()))
        );

        let mut decoder = FrameDecoder::new();
        decoder.extend(b"\n");
        assert!(decoder.next_message().is_err());
    }
}
