use super::keys::HolePairKey;
use super::matrix::showdown;
use crate::cards::card::Card;
use crate::cards::hand::Hand;
use crate::cards::rank::Rank;
use crate::cards::suit::Suit;
use crate::config::GameConfig;
use rand::seq::SliceRandom;
use rand::Rng;

/// Monte-Carlo estimate of `hero`'s win probability against
/// `n_opponents` uniformly random ranges, on a (possibly incomplete)
/// `public` board. Each rollout deals opponent hole cards and the
/// remaining board from the cards not already known, then counts the
/// hero as a winner only if it beats every opponent.
pub fn rollout_probability<R: Rng>(
    hero: HolePairKey,
    public: Hand,
    n_opponents: usize,
    n_rollouts: usize,
    config: &GameConfig,
    rng: &mut R,
) -> f32 {
    if n_rollouts == 0 {
        return 0.0;
    }
    let known = hero.hand().union(public);
    let remaining_needed = 5usize.saturating_sub(public.size() as usize);
    let mut wins = 0usize;

    for _ in 0..n_rollouts {
        let mut pool = undealt_cards(known, config);
        pool.shuffle(rng);

        let mut drawn = pool.drain(..(2 * n_opponents + remaining_needed));
        let opponents: Vec<HolePairKey> = (0..n_opponents)
            .map(|_| {
                let a = drawn.next().expect("deck has enough cards for opponents");
                let b = drawn.next().expect("deck has enough cards for opponents");
                HolePairKey::from((a, b))
            })
            .collect();
        let board = drawn.fold(public, |h, c| h.add(c));

        if opponents
            .iter()
            .all(|&opp| showdown(board, hero, opp) == 1)
        {
            wins += 1;
        }
    }

    wins as f32 / n_rollouts as f32
}

pub(crate) fn undealt_cards(known: Hand, config: &GameConfig) -> Vec<Card> {
    let ranks: Vec<Rank> = if config.limited {
        Rank::all_limited().to_vec()
    } else {
        Rank::all().to_vec()
    };
    let mut cards = Vec::with_capacity(ranks.len() * 4);
    for suit in Suit::all() {
        for rank in ranks.iter().copied() {
            let card = Card::from((rank, suit));
            if !known.contains(card) {
                cards.push(card);
            }
        }
    }
    cards
}
