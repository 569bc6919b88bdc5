//! Depth-limited re-solve from the command line: builds a root state
//! from hero/board cards and a pot size, runs CFR out to the next
//! stage, and prints hero's resulting mixed strategy.

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;
use resolver::cards::board::Board;
use resolver::cards::card::Card;
use resolver::cards::street::Stage;
use resolver::oracle::keys::{all_hole_pair_keys, HolePairKey};
use resolver::resolver::Resolver;
use resolver::tree::action::Action;
use resolver::tree::manager::StateManager;
use resolver::tree::range::Range;
use resolver::valuenet::training::{checkpoint_name, load_checkpoint};
use resolver::valuenet::ValueNet;
use resolver::GameConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Re-solve a heads-up limit hold'em subgame from the command line")]
struct Args {
    /// Hero's two hole cards, e.g. "AsKh".
    #[arg(long)]
    hero: String,

    /// Community cards dealt so far (0, 3, 4, or 5 cards), e.g. "7h8s9d".
    #[arg(long, default_value = "")]
    board: String,

    /// Total chips in the pot at the point being resolved.
    #[arg(long, default_value_t = 4)]
    pot: i32,

    /// Use the 24-card limited deck instead of the full 52.
    #[arg(long)]
    limited: bool,

    /// CFR iterations to run; defaults to `GameConfig::cfr_iterations`.
    #[arg(long)]
    iterations: Option<usize>,

    /// Directory of trained value-network checkpoints
    /// (`{stage}_{limited_}{epochs}epochs`), one per post-flop stage.
    /// Falls back to freshly initialized, untrained networks when absent.
    #[arg(long)]
    checkpoints: Option<PathBuf>,

    /// Training epoch count tagging the checkpoint filenames to load.
    #[arg(long, default_value_t = 500)]
    epochs: usize,

    /// Print every hole pair's row instead of just hero's.
    #[arg(long)]
    show_all: bool,

    /// RNG seed for chance sampling and action sampling.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn parse_cards(s: &str) -> anyhow::Result<Vec<Card>> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() % 2 != 0 {
        bail!("card string {s:?} has an odd number of characters");
    }
    chars
        .chunks(2)
        .map(|pair| {
            let text: String = pair.iter().collect();
            Card::try_from(text.as_str()).map_err(|e| anyhow::anyhow!(e))
        })
        .collect()
}

fn stage_for_board(n: usize) -> anyhow::Result<Stage> {
    match n {
        0 => Ok(Stage::Pref),
        3 => Ok(Stage::Flop),
        4 => Ok(Stage::Turn),
        5 => Ok(Stage::Rive),
        n => bail!("board has {n} cards; expected 0, 3, 4, or 5"),
    }
}

fn load_value_net(config: &GameConfig, checkpoints: &Option<PathBuf>, epochs: usize, rng: &mut SmallRng) -> ValueNet {
    let mut value_net = ValueNet::new_random(rng);
    let Some(dir) = checkpoints else {
        log::warn!("no --checkpoints directory given; resolving against untrained value networks");
        return value_net;
    };
    for stage in [Stage::Flop, Stage::Turn, Stage::Rive] {
        let name = checkpoint_name(stage, config.limited, epochs);
        let path = dir.join(format!("{name}.json"));
        match load_checkpoint(&path) {
            Ok(net) => value_net.set_net(stage, config.limited, net),
            Err(e) => log::warn!("could not load {}: {e}; using an untrained {stage} network", path.display()),
        }
    }
    value_net
}

fn main() -> anyhow::Result<()> {
    resolver::init();
    let args = Args::parse();

    let config = if args.limited {
        GameConfig::limited()
    } else {
        GameConfig::default()
    };
    let h = config.n_hole_pairs();

    let hero = parse_cards(&args.hero).context("parsing --hero")?;
    if hero.len() != 2 {
        bail!("--hero must name exactly two cards, got {}", hero.len());
    }
    let board_cards = parse_cards(&args.board).context("parsing --board")?;
    let stage = stage_for_board(board_cards.len())?;
    let board = Board::empty().add(&board_cards);
    let known = hero.iter().fold(board.hand(), |acc, &c| acc.add(c));

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let value_net = load_value_net(&config, &args.checkpoints, args.epochs, &mut rng);

    let mut manager = StateManager::new(config);
    let root = manager.generate_root_state(
        0,
        [args.pot / 2, args.pot / 2],
        board,
        args.pot,
        config.raises_per_stage,
        0,
        stage,
        Vec::new(),
        0,
        h,
    );
    let end_stage = if stage == Stage::Rive { Stage::Show } else { stage.next() };
    manager.generate_subtree(root, end_stage, 0, known, &mut rng);

    let iterations = args.iterations.unwrap_or(config.cfr_iterations);
    let mut resolver = Resolver::new(&mut manager, &value_net, config);
    let strategy = resolver.resolve(
        root,
        Range::uniform(h),
        Range::uniform(h),
        end_stage,
        0,
        iterations,
    );

    let keys = all_hole_pair_keys(&config);
    let hero_key = HolePairKey::from((hero[0], hero[1]));
    let hero_index = keys
        .iter()
        .position(|k| *k == hero_key)
        .context("hero's hole pair is not representable on this deck")?;

    if args.show_all {
        for (index, key) in keys.iter().enumerate() {
            print_row(*key, strategy.row(index), index == hero_index, &mut rng);
        }
    } else {
        print_row(hero_key, strategy.row(hero_index), true, &mut rng);
    }

    Ok(())
}

fn print_row(key: HolePairKey, row: [f32; 3], sample_highlight: bool, rng: &mut SmallRng) {
    let sampled = if sample_highlight { Some(sample_action(row, rng)) } else { None };
    let cell = |action: Action, p: f32| {
        let text = format!("{action}: {:.1}%", p * 100.0);
        if sampled == Some(action) {
            text.bold().green().to_string()
        } else {
            text
        }
    };
    println!(
        "{key}  {}  {}  {}",
        cell(Action::Fold, row[Action::Fold.index()]),
        cell(Action::Call, row[Action::Call.index()]),
        cell(Action::Raise, row[Action::Raise.index()]),
    );
}

/// Ties among equal-probability actions resolve to the highest-indexed
/// action (Raise over Call over Fold), so a uniform row never reads as
/// a spurious fold. Non-tied rows fall back to weighted sampling.
fn sample_action(row: [f32; 3], rng: &mut SmallRng) -> Action {
    let max_p = row.iter().copied().fold(f32::MIN, f32::max);
    let tied = row.iter().filter(|&&p| p == max_p).count();
    if tied > 1 {
        let highest = Action::ALL
            .iter()
            .copied()
            .filter(|a| row[a.index()] == max_p)
            .next_back()
            .expect("row has at least one action tied for the max");
        return highest;
    }

    let draw: f32 = rng.random_range(0.0..1.0);
    let mut cumulative = 0.0;
    for action in Action::ALL {
        cumulative += row[action.index()];
        if draw < cumulative {
            return action;
        }
    }
    Action::Raise
}
