use super::keys::{all_hole_pair_keys, HolePairKey};
use crate::cards::evaluator::Evaluator;
use crate::cards::hand::Hand;
use crate::cards::strength::Strength;
use crate::config::GameConfig;

/// Compare two hole pairs on a fixed, complete board from P1's point
/// of view: `+1` P1 wins, `-1` P2 wins, `0` tie or a blocked pair.
///
/// `board` must already hold every public card; this crate never
/// calls it against an incomplete board, so unlike a general-purpose
/// showdown evaluator there is no random completion step here.
pub fn showdown(board: Hand, h1: HolePairKey, h2: HolePairKey) -> i8 {
    if is_card_overlap(h1, h2) || h1.hand().overlaps(board) || h2.hand().overlaps(board) {
        return 0;
    }
    let s1 = Strength::from(Evaluator::from(board.union(h1.hand())));
    let s2 = Strength::from(Evaluator::from(board.union(h2.hand())));
    match s1.cmp(&s2) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
    }
}

pub fn is_card_overlap(h1: HolePairKey, h2: HolePairKey) -> bool {
    h1.hand().overlaps(h2.hand())
}

/// The `H x H` zero-sum utility matrix for a complete board: row-major,
/// `U[i][j]` is `showdown(board, keys[i], keys[j])`. Diagonal is
/// always zero (a hand can't play itself) and the matrix is
/// antisymmetric off the blocked entries, which are zero by
/// convention rather than `NaN`.
pub fn utility_matrix(board: Hand, config: &GameConfig) -> (Vec<Vec<i8>>, Vec<HolePairKey>) {
    let keys = all_hole_pair_keys(config);
    let h = keys.len();
    let mut u = vec![vec![0i8; h]; h];
    for i in 0..h {
        for j in (i + 1)..h {
            let value = showdown(board, keys[i], keys[j]);
            u[i][j] = value;
            u[j][i] = -value;
        }
    }
    (u, keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::board::Board;
    use crate::cards::card::Card;
    use crate::cards::rank::Rank;
    use crate::cards::suit::Suit;

    fn key(r1: Rank, s1: Suit, r2: Rank, s2: Suit) -> HolePairKey {
        HolePairKey::from((Card::from((r1, s1)), Card::from((r2, s2))))
    }

    #[test]
    fn diagonal_and_antisymmetry() {
        let config = GameConfig::limited();
        let board = Board::empty().add(&[
            Card::from((Rank::Two, Suit::Club)),
            Card::from((Rank::Seven, Suit::Diamond)),
            Card::from((Rank::Jack, Suit::Heart)),
            Card::from((Rank::King, Suit::Spade)),
            Card::from((Rank::Nine, Suit::Club)),
        ]);
        let (u, _keys) = utility_matrix(board.hand(), &config);
        let h = u.len();
        assert_eq!(h, 276);
        for i in 0..h {
            assert_eq!(u[i][i], 0);
        }
        for i in 0..h {
            for j in 0..h {
                assert_eq!(u[i][j], -u[j][i]);
            }
        }
    }

    #[test]
    fn higher_pair_beats_lower_pair_on_blank_board() {
        let board = Board::empty().add(&[
            Card::from((Rank::Two, Suit::Club)),
            Card::from((Rank::Seven, Suit::Diamond)),
            Card::from((Rank::Jack, Suit::Heart)),
            Card::from((Rank::Queen, Suit::Spade)),
            Card::from((Rank::Three, Suit::Club)),
        ]);
        let aces = key(Rank::Ace, Suit::Spade, Rank::Ace, Suit::Heart);
        let kings = key(Rank::King, Suit::Spade, Rank::King, Suit::Heart);
        assert_eq!(showdown(board.hand(), aces, kings), 1);
        assert_eq!(showdown(board.hand(), kings, aces), -1);
    }

    #[test]
    fn overlapping_pairs_return_zero() {
        let board = Board::empty().add(&[
            Card::from((Rank::Two, Suit::Club)),
            Card::from((Rank::Seven, Suit::Diamond)),
            Card::from((Rank::Jack, Suit::Heart)),
        ]);
        let a = key(Rank::Ace, Suit::Spade, Rank::King, Suit::Heart);
        let b = key(Rank::Ace, Suit::Spade, Rank::Queen, Suit::Diamond);
        assert_eq!(showdown(board.hand(), a, b), 0);
        assert!(is_card_overlap(a, b));
    }

    #[test]
    fn royal_flush_beats_straight_flush() {
        let board = Board::empty().add(&[
            Card::from((Rank::Ten, Suit::Diamond)),
            Card::from((Rank::Jack, Suit::Diamond)),
            Card::from((Rank::Queen, Suit::Diamond)),
            Card::from((Rank::Two, Suit::Heart)),
            Card::from((Rank::Three, Suit::Club)),
        ]);
        let hero = key(Rank::Ace, Suit::Diamond, Rank::King, Suit::Diamond);
        let villain = key(Rank::Ace, Suit::Club, Rank::King, Suit::Club);
        assert_eq!(showdown(board.hand(), hero, villain), 1);
    }

    #[test]
    fn higher_straight_beats_lower_straight() {
        let board = Board::empty().add(&[
            Card::from((Rank::Seven, Suit::Diamond)),
            Card::from((Rank::Six, Suit::Spade)),
            Card::from((Rank::Five, Suit::Club)),
            Card::from((Rank::Two, Suit::Club)),
            Card::from((Rank::Ten, Suit::Heart)),
        ]);
        // hero's 4-5-6-7-8 beats villain's 3-4-5-6-7.
        let hero = key(Rank::Eight, Suit::Spade, Rank::Four, Suit::Heart);
        let villain = key(Rank::Four, Suit::Spade, Rank::Three, Suit::Heart);
        assert_eq!(showdown(board.hand(), hero, villain), 1);
    }

    #[test]
    fn pair_blocked_by_board_returns_zero() {
        let board = Board::empty().add(&[
            Card::from((Rank::Ace, Suit::Spade)),
            Card::from((Rank::Seven, Suit::Diamond)),
            Card::from((Rank::Jack, Suit::Heart)),
        ]);
        let blocked = key(Rank::Ace, Suit::Spade, Rank::King, Suit::Heart);
        let clean = key(Rank::Queen, Suit::Club, Rank::Two, Suit::Heart);
        assert_eq!(showdown(board.hand(), blocked, clean), 0);
    }
}
