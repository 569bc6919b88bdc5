pub mod net;
pub mod training;

use crate::cards::street::Stage;
use crate::config::GameConfig;
use net::StageNet;
use rand::Rng;
use std::collections::HashMap;

/// The three post-flop value networks (flop, turn, river), one per
/// deck kind, consulted by the resolver's downward pass once a
/// subtree is cut off before reaching showdown.
pub struct ValueNet {
    nets: HashMap<(Stage, bool), StageNet>,
}

const STAGES: [Stage; 3] = [Stage::Flop, Stage::Turn, Stage::Rive];

fn input_dim(config: &GameConfig) -> usize {
    2 * config.n_hole_pairs() + config.deck_size() + 1
}

impl ValueNet {
    /// Freshly initialized, untrained networks for both deck kinds —
    /// the starting point [`training::generate_training_example`] and
    /// [`net::StageNet::train_step`] are then run against.
    pub fn new_random<R: Rng>(rng: &mut R) -> Self {
        let mut nets = HashMap::with_capacity(STAGES.len() * 2);
        for &limited in &[false, true] {
            let config = if limited {
                GameConfig::limited()
            } else {
                GameConfig::default()
            };
            for &stage in &STAGES {
                let net = StageNet::new(input_dim(&config), config.n_hole_pairs(), rng);
                nets.insert((stage, limited), net);
            }
        }
        Self { nets }
    }

    fn net(&self, stage: Stage, limited: bool) -> &StageNet {
        self.nets
            .get(&(stage, limited))
            .unwrap_or_else(|| panic!("no value network for ({stage}, limited={limited})"))
    }

    fn net_mut(&mut self, stage: Stage, limited: bool) -> &mut StageNet {
        self.nets
            .get_mut(&(stage, limited))
            .unwrap_or_else(|| panic!("no value network for ({stage}, limited={limited})"))
    }

    /// `stage` must be [`Stage::Flop`], [`Stage::Turn`], or
    /// [`Stage::Rive`] — there is no pre-flop or showdown network.
    /// `input` is `[r1 | board | pot/max | r2]`, per
    /// [`training::TrainingRecord::input_vec`].
    pub fn predict(&self, stage: Stage, input: &[f32], limited: bool) -> (Vec<f32>, Vec<f32>, f32) {
        self.net(stage, limited).predict(input)
    }

    pub fn train_step(
        &mut self,
        stage: Stage,
        limited: bool,
        input: &[f32],
        t1: &[f32],
        t2: &[f32],
        lr: f32,
    ) -> f32 {
        self.net_mut(stage, limited).train_step(input, t1, t2, lr)
    }

    pub fn set_net(&mut self, stage: Stage, limited: bool, net: StageNet) {
        self.nets.insert((stage, limited), net);
    }

    pub fn take_net(&self, stage: Stage, limited: bool) -> &StageNet {
        self.net(stage, limited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn predict_covers_all_stage_deck_combinations() {
        let mut rng = SmallRng::seed_from_u64(2);
        let value_net = ValueNet::new_random(&mut rng);
        let config = GameConfig::limited();
        let h = config.n_hole_pairs();
        let dim = input_dim(&config);
        let mut input = vec![0.0; dim];
        let uniform = 1.0 / h as f32;
        for i in 0..h {
            input[i] = uniform;
            input[dim - h + i] = uniform;
        }
        for &stage in &STAGES {
            let (v1, v2, z) = value_net.predict(stage, &input, true);
            assert_eq!(v1.len(), h);
            assert_eq!(v2.len(), h);
            assert!(z.is_finite());
        }
    }
}
