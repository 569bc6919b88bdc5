use super::action::Action;

/// An `H x 3` mixed strategy: one probability distribution over
/// {fold, call, raise} per hole-pair row.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyMatrix {
    rows: Vec<[f32; 3]>,
}

impl StrategyMatrix {
    pub fn uniform(h: usize) -> Self {
        Self {
            rows: vec![[1.0 / 3.0; 3]; h],
        }
    }

    pub fn zeros(h: usize) -> Self {
        Self {
            rows: vec![[0.0; 3]; h],
        }
    }

    pub fn h(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, h: usize) -> [f32; 3] {
        self.rows[h]
    }

    pub fn set_row(&mut self, h: usize, row: [f32; 3]) {
        self.rows[h] = row;
    }

    pub fn probability(&self, h: usize, a: Action) -> f32 {
        self.rows[h][a.index()]
    }

    /// Running-mean update: `mean_t = mean_{t-1} + (sample - mean_{t-1}) / t`,
    /// applied element-wise, avoiding an ever-growing list of past
    /// strategies to average over.
    pub fn accumulate_running_mean(&mut self, sample: &StrategyMatrix, t: usize) {
        debug_assert_eq!(self.h(), sample.h());
        let t = t as f32;
        for (row, sample_row) in self.rows.iter_mut().zip(sample.rows.iter()) {
            for a in 0..3 {
                row[a] += (sample_row[a] - row[a]) / t;
            }
        }
    }
}

/// Cumulative and positive regret per hole-pair row, the running
/// state regret-matching derives a new [`StrategyMatrix`] from.
#[derive(Debug, Clone)]
pub struct RegretMatrix {
    cumulative: Vec<[f32; 3]>,
}

impl RegretMatrix {
    pub fn zeros(h: usize) -> Self {
        Self {
            cumulative: vec![[0.0; 3]; h],
        }
    }

    pub fn h(&self) -> usize {
        self.cumulative.len()
    }

    pub fn accumulate(&mut self, h: usize, a: Action, regret: f32) {
        self.cumulative[h][a.index()] += regret;
    }

    /// Regret matching with a positive-regret floor (to avoid dead
    /// rows whose entire cumulative regret is non-positive), followed
    /// by NaN repair: any row whose normalization still produced a
    /// `NaN` has the residual mass `(1 - sum_of_finite_cells)` spread
    /// evenly across its `NaN` cells.
    pub fn derive_strategy(&self, floor: f32) -> StrategyMatrix {
        let mut strategy = StrategyMatrix::zeros(self.h());
        for (h, cumulative) in self.cumulative.iter().enumerate() {
            let positive: [f32; 3] = std::array::from_fn(|a| cumulative[a].max(floor));
            let total: f32 = positive.iter().sum();
            let mut row: [f32; 3] = std::array::from_fn(|a| positive[a] / total);
            repair_nans(&mut row);
            strategy.set_row(h, row);
        }
        strategy
    }
}

fn repair_nans(row: &mut [f32; 3]) {
    let nan_count = row.iter().filter(|v| v.is_nan()).count();
    if nan_count == 0 {
        return;
    }
    let finite_sum: f32 = row.iter().filter(|v| !v.is_nan()).sum();
    let residual = (1.0 - finite_sum) / nan_count as f32;
    for v in row.iter_mut() {
        if v.is_nan() {
            *v = residual;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_rows_sum_to_one() {
        let s = StrategyMatrix::uniform(4);
        for h in 0..4 {
            let row = s.row(h);
            assert!((row.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn regret_matching_floors_nonpositive_regret() {
        let mut regret = RegretMatrix::zeros(1);
        regret.accumulate(0, Action::Fold, -5.0);
        regret.accumulate(0, Action::Call, -5.0);
        regret.accumulate(0, Action::Raise, -5.0);
        let strategy = regret.derive_strategy(0.001);
        let row = strategy.row(0);
        assert!((row.iter().sum::<f32>() - 1.0).abs() < 1e-6);
        for p in row {
            assert!(p > 0.0);
        }
    }

    #[test]
    fn running_mean_converges_to_constant_sample() {
        let mut mean = StrategyMatrix::zeros(1);
        let sample = StrategyMatrix::uniform(1);
        for t in 1..=50 {
            mean.accumulate_running_mean(&sample, t);
        }
        let row = mean.row(0);
        for p in row {
            assert!((p - 1.0 / 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn repair_nans_redistributes_residual() {
        let mut row = [0.5, f32::NAN, f32::NAN];
        repair_nans(&mut row);
        assert!((row[1] - 0.25).abs() < 1e-6);
        assert!((row[2] - 0.25).abs() < 1e-6);
    }
}
