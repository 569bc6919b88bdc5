criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        evaluating_a_river_hand,
        dealing_a_shuffled_deck,
        building_a_flop_utility_matrix,
        rolling_out_a_preflop_equity_estimate,
        predicting_a_flop_value_network,
        resolving_a_shallow_preflop_subgame,
}

fn evaluating_a_river_hand(c: &mut criterion::Criterion) {
    let config = GameConfig::default();
    let mut rng = SmallRng::seed_from_u64(1);
    let mut deck = Deck::of(config.limited);
    deck.shuffle(&mut rng);
    let hand = Hand::from(deck.deal(7));
    c.bench_function("evaluate a 7-card river hand", |b| {
        b.iter(|| Strength::from(Evaluator::from(hand)))
    });
}

fn dealing_a_shuffled_deck(c: &mut criterion::Criterion) {
    let config = GameConfig::default();
    let mut rng = SmallRng::seed_from_u64(2);
    c.bench_function("shuffle and deal a 9-card hand", |b| {
        b.iter(|| {
            let mut deck = Deck::of(config.limited);
            deck.shuffle(&mut rng);
            deck.deal(9)
        })
    });
}

fn building_a_flop_utility_matrix(c: &mut criterion::Criterion) {
    let config = GameConfig::limited();
    let mut rng = SmallRng::seed_from_u64(3);
    let mut deck = Deck::of(config.limited);
    deck.shuffle(&mut rng);
    let board = Hand::from(deck.deal(3));
    c.bench_function("build an H x H flop utility matrix (limited deck)", |b| {
        b.iter(|| utility_matrix(board, &config))
    });
}

fn rolling_out_a_preflop_equity_estimate(c: &mut criterion::Criterion) {
    let config = GameConfig::default();
    let mut rng = SmallRng::seed_from_u64(4);
    let hero = all_hole_pair_keys(&config)[0];
    c.bench_function("Monte-Carlo rollout equity vs 1 opponent (200 trials)", |b| {
        b.iter(|| rollout_probability(hero, Hand::empty(), 1, 200, &config, &mut rng))
    });
}

fn predicting_a_flop_value_network(c: &mut criterion::Criterion) {
    let config = GameConfig::limited();
    let h = config.n_hole_pairs();
    let dim = 2 * h + config.deck_size() + 1;
    let mut rng = SmallRng::seed_from_u64(5);
    let value_net = ValueNet::new_random(&mut rng);
    let input = vec![1.0 / h as f32; dim];
    c.bench_function("query the flop value network (limited deck)", |b| {
        b.iter(|| value_net.predict(Stage::Flop, &input, true))
    });
}

fn resolving_a_shallow_preflop_subgame(c: &mut criterion::Criterion) {
    let config = GameConfig::limited();
    let h = config.n_hole_pairs();
    let mut rng = SmallRng::seed_from_u64(6);
    let mut net_rng = SmallRng::seed_from_u64(7);
    let value_net = ValueNet::new_random(&mut net_rng);

    c.bench_function("resolve a 10-iteration depth-limited preflop subgame", |b| {
        b.iter(|| {
            let mut manager = StateManager::new(config);
            let root = manager.generate_root_state(
                0,
                [config.small_blind, config.big_blind],
                Board::empty(),
                config.small_blind + config.big_blind,
                config.raises_per_stage,
                config.big_blind,
                Stage::Pref,
                Vec::new(),
                0,
                h,
            );
            manager.generate_subtree(root, Stage::Flop, 0, Hand::empty(), &mut rng);
            let mut resolver = Resolver::new(&mut manager, &value_net, config);
            resolver.resolve(root, Range::uniform(h), Range::uniform(h), Stage::Flop, 0, 10)
        })
    });
}

use rand::rngs::SmallRng;
use rand::SeedableRng;
use resolver::cards::board::Board;
use resolver::cards::deck::Deck;
use resolver::cards::evaluator::Evaluator;
use resolver::cards::hand::Hand;
use resolver::cards::street::Stage;
use resolver::cards::strength::Strength;
use resolver::oracle::keys::all_hole_pair_keys;
use resolver::oracle::matrix::utility_matrix;
use resolver::oracle::rollout::rollout_probability;
use resolver::resolver::Resolver;
use resolver::tree::manager::StateManager;
use resolver::tree::range::Range;
use resolver::valuenet::ValueNet;
use resolver::GameConfig;
