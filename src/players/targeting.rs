// Shared target selection for bots

use crate::game::{Board, Direction, Position};

/// Treat closest to `from` by Manhattan distance; the first listed wins ties
pub fn nearest_treat(from: Position, treats: &[Position]) -> Option<Position> {
    let mut closest: Option<Position> = None;
    for &treat in treats {
        match closest {
            Some(best) if from.distance(treat) >= from.distance(best) => {}
            _ => closest = Some(treat),
        }
    }
    closest
}

/// Nearest treat, or the board's floor-center when there are none
pub fn find_target(board: &Board, treats: &[Position], from: Position) -> Position {
    nearest_treat(from, treats).unwrap_or_else(|| board.center())
}

/// One step toward `to`, closing the vertical gap before the horizontal one
pub fn step_toward(from: Position, to: Position) -> Option<Direction> {
    if from.y > to.y {
        Some(Direction::Up)
    } else if from.y < to.y {
        Some(Direction::Down)
    } else if from.x > to.x {
        Some(Direction::Left)
    } else if from.x < to.x {
        Some(Direction::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_nearest_treat_picks_minimum() {
        let treats = [p(9, 9), p(2, 3), p(0, 8)];
        assert_eq!(nearest_treat(p(1, 1), &treats), Some(p(2, 3)));
    }

    #[test]
    fn test_nearest_treat_tie_keeps_first_listed() {
        // Both are distance 3 from (5, 5)
        let treats = [p(5, 8), p(2, 5)];
        assert_eq!(nearest_treat(p(5, 5), &treats), Some(p(5, 8)));

        let reversed = [p(2, 5), p(5, 8)];
        assert_eq!(nearest_treat(p(5, 5), &reversed), Some(p(2, 5)));
    }

    #[test]
    fn test_find_target_falls_back_to_center() {
        let board = Board::new(10, 6).unwrap();
        assert_eq!(find_target(&board, &[], p(0, 0)), p(5, 3));
    }

    #[test]
    fn test_step_toward_vertical_first() {
        assert_eq!(step_toward(p(5, 5), p(5, 2)), Some(Direction::Up));
        assert_eq!(step_toward(p(5, 5), p(1, 2)), Some(Direction::Up));
        assert_eq!(step_toward(p(5, 5), p(9, 7)), Some(Direction::Down));
        assert_eq!(step_toward(p(5, 5), p(8, 5)), Some(Direction::Right));
        assert_eq!(step_toward(p(5, 5), p(0, 5)), Some(Direction::Left));
        assert_eq!(step_toward(p(5, 5), p(5, 5)), None);
    }
}
