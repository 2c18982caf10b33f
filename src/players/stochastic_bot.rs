// Stochastic bot - vector-in/vector-out policy with a swappable scorer

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::game::{Board, ColorToken, Direction, Position};

use super::targeting::find_target;
use super::{Controller, PlayerKind, TickView};

/// Length of the normalized input vector: own x, own y, target x, target y
pub const INPUT_LEN: usize = 4;
/// One score per entry of `Direction::ALL`
pub const OUTPUT_LEN: usize = 4;

/// Produces per-direction scores from the normalized world vector
///
/// This is the inference seam: a trained model can replace `NoiseScorer`
/// without touching target selection or decoding.
pub trait DirectionScorer {
    fn score_directions(&mut self, inputs: &[f32; INPUT_LEN]) -> [f32; OUTPUT_LEN];
}

impl<F> DirectionScorer for F
where
    F: FnMut(&[f32; INPUT_LEN]) -> [f32; OUTPUT_LEN],
{
    fn score_directions(&mut self, inputs: &[f32; INPUT_LEN]) -> [f32; OUTPUT_LEN] {
        self(inputs)
    }
}

/// Placeholder scorer: independent standard-normal logits, ignoring inputs
pub struct NoiseScorer {
    rng: StdRng,
}

impl NoiseScorer {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl DirectionScorer for NoiseScorer {
    fn score_directions(&mut self, _inputs: &[f32; INPUT_LEN]) -> [f32; OUTPUT_LEN] {
        let mut scores = [0.0; OUTPUT_LEN];
        for score in &mut scores {
            *score = self.rng.sample(StandardNormal);
        }
        scores
    }
}

/// Map `v` in `[0, dimension)` onto `[-1, 1)`
fn normalize(v: i32, dimension: u32) -> f32 {
    2.0 * (v as f32 / dimension as f32) - 1.0
}

/// Build the scorer input from the bot position and its target
pub fn encode_inputs(board: &Board, position: Position, target: Position) -> [f32; INPUT_LEN] {
    [
        normalize(position.x, board.width()),
        normalize(position.y, board.height()),
        normalize(target.x, board.width()),
        normalize(target.y, board.height()),
    ]
}

/// Argmax over `scores`, the lowest index winning ties
pub fn decode_direction(scores: &[f32; OUTPUT_LEN]) -> Direction {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }
    Direction::ALL[best]
}

pub struct StochasticBot {
    color: ColorToken,
    scorer: Box<dyn DirectionScorer>,
}

impl StochasticBot {
    pub fn new(color: ColorToken, scorer: Box<dyn DirectionScorer>) -> Self {
        Self { color, scorer }
    }

    /// Bot driven by `NoiseScorer` seeded with `seed`
    pub fn seeded(color: ColorToken, seed: u64) -> Self {
        Self::new(color, Box::new(NoiseScorer::seeded(seed)))
    }
}

impl Controller for StochasticBot {
    fn kind(&self) -> PlayerKind {
        PlayerKind::StochasticBot
    }

    fn color(&self) -> ColorToken {
        self.color
    }

    fn decide(&mut self, view: &TickView<'_>) -> Option<Direction> {
        let target = find_target(view.board, view.treats, view.position);
        let inputs = encode_inputs(view.board, view.position, target);
        let scores = self.scorer.score_directions(&inputs);
        Some(decode_direction(&scores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize(0, 10), -1.0);
        assert_eq!(normalize(5, 10), 0.0);
        assert!(normalize(9, 10) < 1.0);
    }

    #[test]
    fn test_encode_inputs_order() {
        let board = Board::new(10, 20).unwrap();
        let inputs = encode_inputs(&board, Position::new(0, 10), Position::new(5, 0));
        assert_eq!(inputs, [-1.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_decode_argmax() {
        assert_eq!(decode_direction(&[0.1, 0.9, 0.2, 0.3]), Direction::Down);
        assert_eq!(decode_direction(&[0.1, 0.2, 0.3, 0.9]), Direction::Right);
        assert_eq!(decode_direction(&[-3.0, -2.0, -1.0, -4.0]), Direction::Left);
    }

    #[test]
    fn test_decode_first_max_wins() {
        assert_eq!(decode_direction(&[1.0, 1.0, 1.0, 1.0]), Direction::Up);
        assert_eq!(decode_direction(&[0.0, 2.0, 2.0, 1.0]), Direction::Down);
    }

    #[test]
    fn test_injected_scorer_sees_target_inputs() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let scorer = move |inputs: &[f32; INPUT_LEN]| {
            log.borrow_mut().push(*inputs);
            [0.0, 0.0, 5.0, 0.0]
        };
        let mut bot = StochasticBot::new(ColorToken::STOCHASTIC, Box::new(scorer));

        let board = Board::new(10, 10).unwrap();
        let treats = [Position::new(5, 0), Position::new(9, 9)];
        let decision = bot.decide(&TickView {
            board: &board,
            position: Position::new(5, 5),
            treats: &treats,
            others: &[],
        });

        assert_eq!(decision, Some(Direction::Left));
        // Target is the nearer treat at (5, 0)
        assert_eq!(seen.borrow().as_slice(), &[[0.0, 0.0, 0.0, -1.0]]);
    }

    #[test]
    fn test_noise_scorer_always_moves() {
        let board = Board::new(4, 4).unwrap();
        let mut bot = StochasticBot::seeded(ColorToken::STOCHASTIC, 11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let decision = bot.decide(&TickView {
                board: &board,
                position: Position::new(1, 1),
                treats: &[],
                others: &[],
            });
            seen.insert(decision.expect("stochastic bot always proposes a step"));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let board = Board::new(8, 8).unwrap();
        let view = TickView {
            board: &board,
            position: Position::new(3, 3),
            treats: &[],
            others: &[],
        };
        let mut a = StochasticBot::seeded(ColorToken::STOCHASTIC, 99);
        let mut b = StochasticBot::seeded(ColorToken::STOCHASTIC, 99);
        for _ in 0..20 {
            assert_eq!(a.decide(&view), b.decide(&view));
        }
    }
}
