use super::net::StageNet;
use crate::cards::board::Board;
use crate::cards::hand::Hand;
use crate::cards::street::Stage;
use crate::config::GameConfig;
use crate::oracle::keys::{all_hole_pair_keys, card_index};
use crate::oracle::matrix::utility_matrix;
use crate::oracle::rollout::undealt_cards;
use crate::Chips;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Total public cards on the board once `stage` is reached.
fn board_size(stage: Stage) -> usize {
    match stage {
        Stage::Pref => 0,
        Stage::Flop => 3,
        Stage::Turn => 4,
        Stage::Rive => 5,
        Stage::Show => 5,
    }
}

/// One example for a stage's value network: the network's own input
/// (two ranges, board encoding, relative pot) plus the exact targets
/// `t1, t2` it is trained to approximate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub r1: Vec<f32>,
    pub board: Vec<f32>,
    pub pot_relative: f32,
    pub r2: Vec<f32>,
    pub t1: Vec<f32>,
    pub t2: Vec<f32>,
}

impl TrainingRecord {
    /// The network's own input vector: `[r1 | board | pot | r2]`,
    /// matching [`StageNet::new`]'s `input_dim = 2H + D + 1`.
    pub fn input_vec(&self) -> Vec<f32> {
        let mut v = Vec::with_capacity(self.r1.len() * 2 + self.board.len() + 1);
        v.extend_from_slice(&self.r1);
        v.extend_from_slice(&self.board);
        v.push(self.pot_relative);
        v.extend_from_slice(&self.r2);
        v
    }

    /// The full persisted record: input vector followed by both
    /// targets, `[r1 | board | pot | r2 | t1 | t2]`.
    pub fn to_flat_vec(&self) -> Vec<f32> {
        let mut v = self.input_vec();
        v.extend_from_slice(&self.t1);
        v.extend_from_slice(&self.t2);
        v
    }
}

fn random_board_compatible_range<R: Rng>(config: &GameConfig, board: Hand, rng: &mut R) -> Vec<f32> {
    let keys = all_hole_pair_keys(config);
    let mut weights: Vec<f32> = keys
        .iter()
        .map(|key| {
            if key.hand().overlaps(board) {
                0.0
            } else {
                rng.random_range(0.0..1.0)
            }
        })
        .collect();
    let total: f32 = weights.iter().sum();
    if total > 0.0 {
        for w in weights.iter_mut() {
            *w /= total;
        }
    }
    weights
}

/// The "cheap method" training-data generator: a random board, two
/// random board-compatible ranges, and exact utility-matrix targets —
/// no CFR re-solve involved in producing the label.
pub fn generate_training_example<R: Rng>(
    stage: Stage,
    config: &GameConfig,
    rng: &mut R,
) -> TrainingRecord {
    let n = board_size(stage);
    let mut pool = undealt_cards(Hand::empty(), config);
    pool.shuffle(rng);
    let board = Board::empty().add(&pool[..n]);

    let r1 = random_board_compatible_range(config, board.hand(), rng);
    let r2 = random_board_compatible_range(config, board.hand(), rng);

    let (u, _keys) = utility_matrix(board.hand(), config);
    let h = r1.len();
    let t1: Vec<f32> = (0..h)
        .map(|i| (0..h).map(|j| u[i][j] as f32 * r2[j]).sum())
        .collect();
    let t2: Vec<f32> = (0..h)
        .map(|j| -(0..h).map(|i| r1[i] * u[i][j] as f32).sum::<f32>())
        .collect();

    let max_pot = config.stage_max_pot(stage);
    let pot: Chips = rng.random_range((max_pot / 4)..=max_pot);
    let pot_relative = pot as f32 / max_pot as f32;

    let mut board_encoding = vec![0.0f32; config.deck_size()];
    for card in board.cards() {
        board_encoding[card_index(card, config)] = 1.0;
    }

    TrainingRecord {
        r1,
        board: board_encoding,
        pot_relative,
        r2,
        t1,
        t2,
    }
}

/// Checkpoint file stem for a stage/deck-kind/epoch-count combination,
/// e.g. `flop_500epochs` or `flop_limited_500epochs`.
pub fn checkpoint_name(stage: Stage, limited: bool, epochs: usize) -> String {
    let limited_tag = if limited { "limited_" } else { "" };
    format!("{stage}_{limited_tag}{epochs}epochs")
}

pub fn save_checkpoint(net: &StageNet, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), net)?;
    Ok(())
}

pub fn load_checkpoint(path: &Path) -> std::io::Result<StageNet> {
    let file = File::open(path)?;
    let net = serde_json::from_reader(BufReader::new(file))?;
    Ok(net)
}

pub fn save_dataset(records: &[TrainingRecord], path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), records)?;
    Ok(())
}

pub fn load_dataset(path: &Path) -> std::io::Result<Vec<TrainingRecord>> {
    let file = File::open(path)?;
    let records = serde_json::from_reader(BufReader::new(file))?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn record_input_len_matches_2h_plus_d_plus_1() {
        let config = GameConfig::limited();
        let mut rng = SmallRng::seed_from_u64(5);
        let record = generate_training_example(Stage::Flop, &config, &mut rng);
        let h = config.n_hole_pairs();
        let d = config.deck_size();
        assert_eq!(record.input_vec().len(), 2 * h + d + 1);
        assert_eq!(record.to_flat_vec().len(), 4 * h + d + 1);
    }

    #[test]
    fn ranges_sum_to_one_and_board_encoding_matches_deck_size() {
        let config = GameConfig::limited();
        let mut rng = SmallRng::seed_from_u64(6);
        let record = generate_training_example(Stage::Turn, &config, &mut rng);
        let sum: f32 = record.r1.iter().sum();
        assert!((sum - 1.0).abs() < 1e-3);
        assert_eq!(record.board.len(), config.deck_size());
        assert_eq!(record.board.iter().filter(|&&w| w > 0.0).count(), board_size(Stage::Turn));
    }

    #[test]
    fn checkpoint_name_tags_limited_deck() {
        assert_eq!(checkpoint_name(Stage::Flop, false, 500), "flop_500epochs");
        assert_eq!(
            checkpoint_name(Stage::Rive, true, 200),
            "river_limited_200epochs"
        );
    }
}
