//! Match outcomes, outcome counters and probability triples.
//!
//! All distributions are over the same three-way outcome space, always
//! stored in W, D, L order.

use std::fmt;

/// Result of a match from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// All outcomes in canonical order.
    pub const ALL: [Outcome; 3] = [Outcome::Win, Outcome::Draw, Outcome::Loss];

    /// Parse a result code (`W`, `D` or `L`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "W" => Some(Outcome::Win),
            "D" => Some(Outcome::Draw),
            "L" => Some(Outcome::Loss),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Draw => "D",
            Outcome::Loss => "L",
        }
    }

    /// The same match seen from the other side.
    pub fn invert(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Draw => Outcome::Draw,
            Outcome::Loss => Outcome::Win,
        }
    }

    fn index(self) -> usize {
        match self {
            Outcome::Win => 0,
            Outcome::Draw => 1,
            Outcome::Loss => 2,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raw frequency of each outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    counts: [u32; 3],
}

impl OutcomeCounts {
    #[cfg(test)]
    pub fn new(win: u32, draw: u32, loss: u32) -> Self {
        Self {
            counts: [win, draw, loss],
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.counts[outcome.index()] += 1;
    }

    pub fn get(&self, outcome: Outcome) -> u32 {
        self.counts[outcome.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Probability (or weight) attached to each outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeDistribution {
    probs: [f64; 3],
}

impl OutcomeDistribution {
    pub fn new(win: f64, draw: f64, loss: f64) -> Self {
        Self {
            probs: [win, draw, loss],
        }
    }

    pub fn uniform() -> Self {
        let third = 1.0 / 3.0;
        Self::new(third, third, third)
    }

    pub fn get(&self, outcome: Outcome) -> f64 {
        self.probs[outcome.index()]
    }

    #[cfg(test)]
    pub fn sum(&self) -> f64 {
        self.probs.iter().sum()
    }
}

/// Additive (Laplace) smoothing of raw counts into probabilities.
///
/// Each outcome gets `(count + alpha) / (total + 3 * alpha)`, so with a
/// positive `alpha` every outcome is strictly positive and an all-zero
/// counter becomes the uniform distribution.
pub fn to_probability(counts: &OutcomeCounts, alpha: f64) -> OutcomeDistribution {
    let denom = counts.total() as f64 + alpha * Outcome::ALL.len() as f64;
    let p = |o: Outcome| (counts.get(o) as f64 + alpha) / denom;
    OutcomeDistribution::new(p(Outcome::Win), p(Outcome::Draw), p(Outcome::Loss))
}

/// Weighted combination of several distributions, renormalised to sum to 1.
///
/// Distributions and weights are paired positionally; extra entries on
/// either side are ignored. Falls back to uniform when the weighted mass is
/// not positive.
pub fn blend(dists: &[OutcomeDistribution], weights: &[f64]) -> OutcomeDistribution {
    let mut agg = [0.0_f64; 3];
    for (dist, w) in dists.iter().zip(weights) {
        for outcome in Outcome::ALL {
            agg[outcome.index()] += dist.get(outcome) * w;
        }
    }

    let total: f64 = agg.iter().sum();
    if total <= 0.0 {
        return OutcomeDistribution::uniform();
    }

    OutcomeDistribution::new(agg[0] / total, agg[1] / total, agg[2] / total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEIGHTS: [f64; 4] = [0.2, 0.4, 0.25, 0.15];

    #[test]
    fn test_invert() {
        assert_eq!(Outcome::Win.invert(), Outcome::Loss);
        assert_eq!(Outcome::Loss.invert(), Outcome::Win);
        assert_eq!(Outcome::Draw.invert(), Outcome::Draw);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Outcome::from_code("W"), Some(Outcome::Win));
        assert_eq!(Outcome::from_code("D"), Some(Outcome::Draw));
        assert_eq!(Outcome::from_code("L"), Some(Outcome::Loss));
        assert_eq!(Outcome::from_code("w"), None);
        assert_eq!(Outcome::from_code(""), None);
    }

    #[test]
    fn test_to_probability_zero_counts_is_uniform() {
        let probs = to_probability(&OutcomeCounts::default(), 1.0);
        for outcome in Outcome::ALL {
            assert_eq!(probs.get(outcome), 1.0 / 3.0);
        }
    }

    #[test]
    fn test_to_probability_sums_to_one_and_positive() {
        let cases = [
            OutcomeCounts::new(1, 0, 0),
            OutcomeCounts::new(10, 3, 7),
            OutcomeCounts::new(0, 0, 250),
            OutcomeCounts::new(4, 4, 4),
        ];
        for counts in cases {
            let probs = to_probability(&counts, 1.0);
            assert!((probs.sum() - 1.0).abs() < 1e-9);
            for outcome in Outcome::ALL {
                assert!(probs.get(outcome) > 0.0);
            }
        }
    }

    #[test]
    fn test_to_probability_values() {
        // W=2, D=1, L=0 with alpha=1 -> 3/6, 2/6, 1/6
        let probs = to_probability(&OutcomeCounts::new(2, 1, 0), 1.0);
        assert!((probs.get(Outcome::Win) - 0.5).abs() < 1e-9);
        assert!((probs.get(Outcome::Draw) - 1.0 / 3.0).abs() < 1e-9);
        assert!((probs.get(Outcome::Loss) - 1.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_blend_of_certain_wins_is_certain_win() {
        let certain = OutcomeDistribution::new(1.0, 0.0, 0.0);
        let blended = blend(&[certain; 4], &WEIGHTS);
        assert_eq!(blended, certain);

        let blended = blend(&[certain; 4], &[0.0, 3.0, 0.0, 1.0]);
        assert_eq!(blended, certain);
    }

    #[test]
    fn test_blend_degenerate_inputs_are_uniform() {
        let empty = OutcomeDistribution::new(0.0, 0.0, 0.0);
        let blended = blend(&[empty; 4], &WEIGHTS);
        assert_eq!(blended, OutcomeDistribution::uniform());
    }

    #[test]
    fn test_blend_zero_weights_are_uniform() {
        let certain = OutcomeDistribution::new(1.0, 0.0, 0.0);
        let blended = blend(&[certain; 4], &[0.0; 4]);
        assert_eq!(blended, OutcomeDistribution::uniform());
    }

    #[test]
    fn test_blend_renormalizes() {
        let a = OutcomeDistribution::new(0.6, 0.2, 0.2);
        let b = OutcomeDistribution::new(0.2, 0.2, 0.6);
        // Weights need not sum to one.
        let blended = blend(&[a, b], &[2.0, 2.0]);
        assert!((blended.get(Outcome::Win) - 0.4).abs() < 1e-9);
        assert!((blended.get(Outcome::Draw) - 0.2).abs() < 1e-9);
        assert!((blended.get(Outcome::Loss) - 0.4).abs() < 1e-9);
        assert!((blended.sum() - 1.0).abs() < 1e-9);
    }
}
