// Treat spawning: a tapering spawn probability plus a uniform cell pick

use rand::Rng;

use super::geometry::{Board, Position};

// Shape constants of the spawn curve
const X_SCALING: f64 = 2.0;
const X_OFFSET: f64 = 1.0;
const Y_SCALING: i32 = 4;

/// Probability of spawning a treat this tick given `current` treats on the board
///
/// Decreases monotonically in `current` and is exactly 0 once `current >= max`,
/// so spawn pressure tapers off instead of switching on and off.
pub fn treat_spawn_probability(current: usize, max: usize) -> f64 {
    if current >= max {
        return 0.0;
    }

    let effective_range = X_SCALING + max as f64;
    let numerator = effective_range - current as f64;
    let denominator = effective_range + X_OFFSET;

    (numerator / denominator).powi(Y_SCALING)
}

/// Roll for a new treat and pick its cell
///
/// Returns `None` when the roll fails or the board is already at `max` treats.
/// The cell is uniform over the whole board; the caller discards it if a treat
/// already sits there.
pub fn roll_treat<R: Rng + ?Sized>(
    rng: &mut R,
    board: &Board,
    current: usize,
    max: usize,
) -> Option<Position> {
    let threshold = treat_spawn_probability(current, max);
    if rng.gen::<f64>() >= threshold || current >= max {
        return None;
    }

    let x = rng.gen_range(0..board.width()) as i32;
    let y = rng.gen_range(0..board.height()) as i32;
    Some(Position::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_probability_zero_at_max() {
        assert_eq!(treat_spawn_probability(5, 5), 0.0);
        assert_eq!(treat_spawn_probability(6, 5), 0.0);
        assert_eq!(treat_spawn_probability(0, 0), 0.0);
    }

    #[test]
    fn test_probability_with_empty_board() {
        let p = treat_spawn_probability(0, 5);
        let expected = (7.0_f64 / 8.0).powi(4);
        assert!((p - expected).abs() < 1e-12);
        assert!((p - 0.586).abs() < 1e-3);
    }

    #[test]
    fn test_probability_monotonically_decreasing() {
        let max = 8;
        let mut last = f64::INFINITY;
        for current in 0..=max {
            let p = treat_spawn_probability(current, max);
            assert!(p < last, "p({}) = {} not below {}", current, p, last);
            assert!((0.0..=1.0).contains(&p));
            last = p;
        }
    }

    #[test]
    fn test_roll_never_spawns_at_max() {
        let board = Board::new(4, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(roll_treat(&mut rng, &board, 3, 3).is_none());
        }
    }

    #[test]
    fn test_rolled_cells_are_on_board() {
        let board = Board::new(3, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut spawned = 0;
        for _ in 0..500 {
            if let Some(cell) = roll_treat(&mut rng, &board, 0, 5) {
                assert!(board.contains(cell));
                spawned += 1;
            }
        }
        // p(0, 5) is about 0.59
        assert!(spawned > 200 && spawned < 400, "spawned {}", spawned);
    }
}
