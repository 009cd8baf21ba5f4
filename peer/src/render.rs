//! Plain-text board view.

use shared::{Cell, GameEngine, GameState, Player};

const COLUMN_LABELS: &[u8] = b"ABCDEFGHIJ";

pub fn column_label(col: usize) -> char {
    COLUMN_LABELS.get(col).map_or('?', |&b| b as char)
}

/// Labelled grid: `B`/`W` disks, `+` where a disk can drop now, `.` otherwise.
pub fn render_board(engine: &GameEngine) -> String {
    let playing = engine.game_state() != GameState::Finished;
    let mut out = String::from("   ");

    for col in 0..engine.cols() {
        out.push(' ');
        out.push(column_label(col));
    }
    out.push('\n');

    for row in 0..engine.rows() {
        out.push_str(&format!("{:>3}", row + 1));
        for col in 0..engine.cols() {
            let symbol = match engine.cell_state(row, col) {
                Ok(Cell::Black) => Player::Black.to_char(),
                Ok(Cell::White) => Player::White.to_char(),
                _ if playing && engine.is_valid_move(row, col) => '+',
                _ => '.',
            };
            out.push(' ');
            out.push(symbol);
        }
        out.push('\n');
    }

    out
}

pub fn status_line(engine: &GameEngine, local: Player) -> String {
    match engine.game_state().mover() {
        Some(mover) if mover == local => format!("Your move ({})", local),
        Some(mover) => format!("Waiting for {}", mover),
        None => match engine.game_result() {
            Ok(result) if result.winner() == Some(local) => format!("{} - you won", result),
            Ok(result) if result.winner().is_some() => format!("{} - you lost", result),
            Ok(result) => result.to_string(),
            Err(e) => e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_board() {
        let engine = GameEngine::new_game(4, 3).unwrap();
        assert_eq!(
            render_board(&engine),
            "    A B C D\n  1 . . . .\n  2 . . . .\n  3 + + + +\n"
        );
    }

    #[test]
    fn test_render_disks_and_drop_targets() {
        let mut engine = GameEngine::new_game(3, 2).unwrap();
        engine.apply_move(1, 0).unwrap();
        engine.apply_move(1, 2).unwrap();

        assert_eq!(render_board(&engine), "    A B C\n  1 + . +\n  2 B + W\n");
    }

    #[test]
    fn test_finished_board_has_no_drop_targets() {
        let mut engine = GameEngine::new_game(8, 1).unwrap();
        for col in [0, 7, 1, 6, 2, 5, 3] {
            engine.apply_move(0, col).unwrap();
        }

        assert_eq!(engine.game_state(), GameState::Finished);
        assert_eq!(render_board(&engine), "    A B C D E F G H\n  1 B B B B . W W W\n");
    }

    #[test]
    fn test_status_line() {
        let mut engine = GameEngine::new_game(7, 1).unwrap();
        assert_eq!(status_line(&engine, Player::Black), "Your move (Black)");
        assert_eq!(status_line(&engine, Player::White), "Waiting for Black");

        for col in [0, 6, 1, 5, 2, 4, 3] {
            engine.apply_move(0, col).unwrap();
        }
        assert_eq!(status_line(&engine, Player::Black), "Black wins - you won");
        assert_eq!(status_line(&engine, Player::White), "Black wins - you lost");
    }

    #[test]
    fn test_column_labels() {
        assert_eq!(column_label(0), 'A');
        assert_eq!(column_label(9), 'J');
        assert_eq!(column_label(10), '?');
    }
}
