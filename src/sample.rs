//! Weighted selection of one candidate from a conditional probability row.

use rand::Rng;
use tracing::trace;

use crate::error::{Error, Result};

/// An ordered list of `(candidate, weight)` pairs with weights in percent.
///
/// The table cells store fractions in `[0, 1]`; [`from_fractions`] converts
/// them to the 0-100 scale the sampler draws against. Weights that do not sum
/// to 100 are renormalized before sampling so that every draw in `[0, 100]`
/// selects a candidate; a distribution with no positive weight fails loudly
/// instead of leaving the parameter unset.
///
/// [`from_fractions`]: ProbabilityDistribution::from_fractions
#[derive(Debug, Clone)]
pub struct ProbabilityDistribution {
    parameter: String,
    choices: Vec<(String, f64)>,
}

impl ProbabilityDistribution {
    /// Build from `(candidate, fraction)` pairs, scaling fractions to percent.
    pub fn from_fractions<I, S>(parameter: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            parameter: parameter.into(),
            choices: pairs
                .into_iter()
                .map(|(label, fraction)| (label.into(), fraction * 100.0))
                .collect(),
        }
    }

    pub fn choices(&self) -> &[(String, f64)] {
        &self.choices
    }

    /// Select the candidate for a single uniform draw over `[0, 100]`.
    ///
    /// Scanning in list order, the chosen candidate is the first whose
    /// running cumulative weight reaches or exceeds the draw (the boundary is
    /// inclusive on the lower candidate). Weights are renormalized to sum to
    /// exactly 100 first, so the scan cannot fall through; the final
    /// candidate also absorbs any floating-point residue.
    pub fn select(&self, draw: f64) -> Result<&str> {
        let total: f64 = self.choices.iter().map(|(_, w)| w.max(0.0)).sum();
        if total <= 0.0 {
            return Err(Error::EmptyDistribution {
                parameter: self.parameter.clone(),
            });
        }
        let scale = 100.0 / total;

        let mut cumulative = 0.0;
        for (label, weight) in &self.choices {
            cumulative += weight.max(0.0) * scale;
            if cumulative >= draw {
                trace!(parameter = %self.parameter, %label, draw, "selected candidate");
                return Ok(label);
            }
        }
        // Unreachable for draws in [0, 100] after renormalization, except via
        // accumulated rounding; the last candidate owns the top of the range.
        Ok(&self.choices.last().expect("non-empty by total > 0").0)
    }

    /// Consume one uniform draw from `rng` and select a candidate. Draws are
    /// independent across calls; use a seeded `rng` for reproducible runs.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<&str> {
        self.select(rng.random_range(0.0..=100.0))
    }
}
