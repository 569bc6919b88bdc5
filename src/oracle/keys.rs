use crate::cards::card::Card;
use crate::cards::hand::Hand;
use crate::cards::rank::Rank;
use crate::cards::suit::Suit;
use crate::config::GameConfig;
use std::fmt::{self, Display, Formatter};

/// An unordered two-card combination, canonicalized so that e.g.
/// `{A♠,K♥}` and `{K♥,A♠}` always produce the same key: same rank
/// pairs sort by suit, different ranks sort high-then-low.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct HolePairKey(Card, Card);

impl HolePairKey {
    pub fn cards(&self) -> (Card, Card) {
        (self.0, self.1)
    }

    pub fn hand(&self) -> Hand {
        Hand::empty().add(self.0).add(self.1)
    }

    /// The cheat-sheet category this pair falls into: `"{rank}_pair"`,
    /// `"{hi}_{lo}_suited"`, or `"{hi}_{lo}_unsuited"` — coarser than
    /// `HolePairKey` itself, which keeps exact suits.
    pub fn hole_pair_type(&self) -> HolePairType {
        let (a, b) = (self.0, self.1);
        if a.rank() == b.rank() {
            HolePairType::Pair(a.rank())
        } else if a.suit() == b.suit() {
            HolePairType::Suited(a.rank(), b.rank())
        } else {
            HolePairType::Unsuited(a.rank(), b.rank())
        }
    }
}

impl From<(Card, Card)> for HolePairKey {
    fn from((a, b): (Card, Card)) -> Self {
        assert_ne!(a, b, "a hole pair cannot repeat a card");
        if a.rank() == b.rank() {
            let (lo, hi) = if a.suit() <= b.suit() { (a, b) } else { (b, a) };
            Self(hi, lo)
        } else if a.rank() > b.rank() {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

impl Display for HolePairKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum HolePairType {
    Pair(crate::cards::rank::Rank),
    Suited(crate::cards::rank::Rank, crate::cards::rank::Rank),
    Unsuited(crate::cards::rank::Rank, crate::cards::rank::Rank),
}

impl Display for HolePairType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Pair(r) => write!(f, "{r}_pair"),
            Self::Suited(hi, lo) => write!(f, "{hi}_{lo}_suited"),
            Self::Unsuited(hi, lo) => write!(f, "{hi}_{lo}_unsuited"),
        }
    }
}

/// Every distinct [`Card`] in the active deck, in the fixed order
/// (outer loop suit, inner loop rank) that [`card_index`] and
/// [`all_hole_pair_keys`] both index against.
pub fn deck_cards(config: &GameConfig) -> Vec<Card> {
    let ranks: Vec<Rank> = if config.limited {
        Rank::all_limited().to_vec()
    } else {
        Rank::all().to_vec()
    };
    let mut cards = Vec::with_capacity(ranks.len() * 4);
    for suit in Suit::all() {
        for rank in ranks.iter().copied() {
            cards.push(Card::from((rank, suit)));
        }
    }
    cards
}

/// `card`'s position in [`deck_cards`]'s order, i.e. its index into a
/// `D`-long multi-hot board encoding for the active deck.
pub fn card_index(card: Card, config: &GameConfig) -> usize {
    let n_ranks = if config.limited { 6 } else { 13 };
    let rank_value = u8::from(card.rank()) as usize;
    let rank_pos = if config.limited { rank_value - 7 } else { rank_value };
    let suit_pos = u8::from(card.suit()) as usize;
    suit_pos * n_ranks + rank_pos
}

/// Enumerate every distinct [`HolePairKey`] drawable from the active
/// deck, in a fixed, stable order; this order indexes every range,
/// strategy row, and utility-matrix row/column in the crate.
pub fn all_hole_pair_keys(config: &GameConfig) -> Vec<HolePairKey> {
    let cards = deck_cards(config);
    let mut keys = Vec::with_capacity(config.n_hole_pairs());
    for (i, &c1) in cards.iter().enumerate() {
        for &c2 in &cards[i + 1..] {
            keys.push(HolePairKey::from((c1, c2)));
        }
    }
    debug_assert_eq!(keys.len(), config.n_hole_pairs());
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::rank::Rank;
    use crate::cards::suit::Suit;

    #[test]
    fn order_invariant() {
        let a = Card::from((Rank::Ace, Suit::Spade));
        let b = Card::from((Rank::King, Suit::Heart));
        assert_eq!(HolePairKey::from((a, b)), HolePairKey::from((b, a)));
    }

    #[test]
    fn full_deck_key_count_matches_h() {
        let config = GameConfig::default();
        assert_eq!(all_hole_pair_keys(&config).len(), 1326);
    }

    #[test]
    fn limited_deck_key_count_matches_h() {
        let config = GameConfig::limited();
        assert_eq!(all_hole_pair_keys(&config).len(), 276);
    }

    #[test]
    fn card_index_is_bijective_over_the_deck() {
        for config in [GameConfig::default(), GameConfig::limited()] {
            let cards = deck_cards(&config);
            let mut seen = vec![false; cards.len()];
            for &card in &cards {
                let idx = card_index(card, &config);
                assert!(!seen[idx], "duplicate index {idx}");
                seen[idx] = true;
            }
            assert!(seen.iter().all(|&b| b));
        }
    }

    #[test]
    fn classifies_pair_suited_unsuited() {
        let pair = HolePairKey::from((
            Card::from((Rank::Ace, Suit::Spade)),
            Card::from((Rank::Ace, Suit::Heart)),
        ));
        assert!(matches!(pair.hole_pair_type(), HolePairType::Pair(Rank::Ace)));

        let suited = HolePairKey::from((
            Card::from((Rank::Ace, Suit::Spade)),
            Card::from((Rank::King, Suit::Spade)),
        ));
        assert!(matches!(
            suited.hole_pair_type(),
            HolePairType::Suited(Rank::Ace, Rank::King)
        ));

        let unsuited = HolePairKey::from((
            Card::from((Rank::Ace, Suit::Spade)),
            Card::from((Rank::King, Suit::Heart)),
        ));
        assert!(matches!(
            unsuited.hole_pair_type(),
            HolePairType::Unsuited(Rank::Ace, Rank::King)
        ));
    }
}
