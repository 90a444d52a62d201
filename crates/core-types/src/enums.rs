use serde::{Deserialize, Serialize};

/// How the main trend instrument is picked from the leading eigenvector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominanceRule {
    /// The entry with the greatest signed value wins. A uniformly negative
    /// leading eigenvector therefore selects its smallest-magnitude entry.
    #[default]
    SignedMaximum,
    /// The entry with the greatest absolute value wins.
    AbsoluteMagnitude,
}

impl DominanceRule {
    /// Returns the index of the winning entry, or `None` for an empty slice.
    /// Ties resolve to the lowest index.
    pub fn select(&self, weights: &[f64]) -> Option<usize> {
        let score = |w: f64| match self {
            DominanceRule::SignedMaximum => w,
            DominanceRule::AbsoluteMagnitude => w.abs(),
        };

        let mut best: Option<(usize, f64)> = None;
        for (index, &weight) in weights.iter().enumerate() {
            let value = score(weight);
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((index, value)),
            }
        }
        best.map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_maximum_ignores_magnitude_of_negative_entries() {
        let weights = [-0.9, -0.1, -0.4];
        assert_eq!(DominanceRule::SignedMaximum.select(&weights), Some(1));
        assert_eq!(DominanceRule::AbsoluteMagnitude.select(&weights), Some(0));
    }

    #[test]
    fn ties_resolve_to_first_index() {
        let weights = [0.5, 0.5, -0.5];
        assert_eq!(DominanceRule::SignedMaximum.select(&weights), Some(0));
        assert_eq!(DominanceRule::AbsoluteMagnitude.select(&weights), Some(0));
    }

    #[test]
    fn empty_weights_select_nothing() {
        assert_eq!(DominanceRule::default().select(&[]), None);
    }
}
