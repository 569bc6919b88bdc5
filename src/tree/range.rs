use super::action::Action;
use super::strategy::StrategyMatrix;

/// A belief distribution over `H` hole-pair keys: `range[h]` is the
/// probability the player holds hole-pair `h`, conditioned on
/// everything observed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Range(Vec<f32>);

impl Range {
    pub fn uniform(h: usize) -> Self {
        Self(vec![1.0 / h as f32; h])
    }

    pub fn zeros(h: usize) -> Self {
        Self(vec![0.0; h])
    }

    pub fn from_weights(weights: Vec<f32>) -> Self {
        let mut range = Self(weights);
        range.normalize();
        range
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, h: usize) -> f32 {
        self.0[h]
    }

    pub fn set(&mut self, h: usize, value: f32) {
        self.0[h] = value;
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }

    pub fn normalize(&mut self) {
        let total = self.sum();
        if total > 0.0 {
            for v in self.0.iter_mut() {
                *v /= total;
            }
        }
    }

    pub fn dot(&self, other: &[f32]) -> f32 {
        self.0.iter().zip(other.iter()).map(|(a, b)| a * b).sum()
    }
}

/// Bayesian range update on descent: `r'[h] = r[h] * p(a|h) / p(a)`,
/// where `p(a|h) = sigma[h, a]` and `p(a)` is the simple mean of
/// `p(a|h)` across hole pairs (each strategy row already sums to 1,
/// so this is the mean over rows rather than a range-weighted
/// marginal — see the design notes at the call site in the
/// resolver's downward pass for the weighted-marginal alternative).
pub fn bayesian_range_update(range: &Range, action: Action, sigma: &StrategyMatrix) -> Range {
    let h = range.len();
    debug_assert_eq!(h, sigma.h());

    let p_a: f32 = (0..h).map(|i| sigma.probability(i, action)).sum::<f32>() / h as f32;

    let mut updated = Range::zeros(h);
    if p_a <= 0.0 {
        return updated;
    }
    for i in 0..h {
        let p_a_given_h = sigma.probability(i, action);
        updated.set(i, range.get(i) * p_a_given_h / p_a);
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_range_sums_to_one() {
        let r = Range::uniform(1326);
        assert!((r.sum() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn update_is_identity_under_uniform_sigma() {
        let h = 10;
        let range = Range::from_weights((1..=h).map(|i| i as f32).collect());
        let sigma = StrategyMatrix::uniform(h);
        let updated = bayesian_range_update(&range, Action::Call, &sigma);
        for i in 0..h {
            assert!((updated.get(i) - range.get(i)).abs() < 1e-5);
        }
    }

    #[test]
    fn normalize_brings_sum_to_one() {
        let mut r = Range::from_weights(vec![1.0, 2.0, 3.0, 4.0]);
        r.normalize();
        assert!((r.sum() - 1.0).abs() < 1e-6);
    }
}
