use super::card::Card;
use super::hand::Hand;
use super::kickers::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

/// A lazy evaluator for a hand's strength.
///
/// Operates directly on the Hand's bit representation rather than
/// enumerating 5-card subsets: rank/suit presence masks and popcounts
/// already identify the best possible category across 5, 6, or 7
/// cards, so a 7-card river hand costs the same handful of bit
/// operations as a 5-card one.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        Self(h)
    }
}

/// The highest set bit in a rank-presence mask. A 6- or 7-card hand can
/// leave more than one bit set here (a run longer than 5, or a flush
/// suit with more than 5 cards); `Rank::from(u16)` only strips the
/// lowest, so callers comparing against the best straight or flush
/// card must narrow to this bit first.
fn highest_set_bit(bits: u16) -> u16 {
    1 << (15 - bits.leading_zeros())
}

impl Evaluator {
    pub fn find_ranking(&self) -> Ranking {
        None.or_else(|| self.find_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_2_oak())
            .or_else(|| self.find_1_oak())
            .expect("at least one card in hand")
    }

    pub fn find_kickers(&self, value: Ranking) -> Kickers {
        let n = value.n_kickers();
        if n == 0 {
            return Kickers::from(0u16);
        }
        let mask = value.mask();
        let mut bits = mask & self.rank_masks();
        while bits.count_ones() as usize > n {
            bits &= !(1 << bits.trailing_zeros());
        }
        Kickers::from(bits)
    }

    fn find_1_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(1).map(Ranking::HighCard)
    }
    fn find_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).map(Ranking::OnePair)
    }
    fn find_3_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).map(Ranking::ThreeOAK)
    }
    fn find_4_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(4).map(Ranking::FourOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).and_then(|hi| {
            self.find_rank_of_n_oak_under(2, Some(hi))
                .map(|lo| Ranking::TwoPair(hi, lo))
                .or(Some(Ranking::OnePair(hi)))
        })
    }
    fn find_3_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).and_then(|trips| {
            self.find_rank_of_n_oak_under(2, Some(trips))
                .map(|pairs| Ranking::FullHouse(trips, pairs))
        })
    }
    fn find_straight(&self) -> Option<Ranking> {
        self.find_rank_of_straight(self.rank_masks())
            .map(Ranking::Straight)
    }
    fn find_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush().and_then(|suit| {
            self.find_rank_of_straight_flush(suit)
                .map(Ranking::StraightFlush)
                .or_else(|| {
                    let bits = self.suit_masks()[suit as usize];
                    Some(Ranking::Flush(Rank::from(highest_set_bit(bits))))
                })
        })
    }

    /// A run of five consecutive set bits in a rank-presence mask.
    ///
    /// Intentionally does not special-case the wheel (A-2-3-4-5): the
    /// Ace only counts high here, matching how this evaluator's
    /// reference game engine resolves showdowns.
    fn find_rank_of_straight(&self, hand: u16) -> Option<Rank> {
        let mut bits = hand;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(highest_set_bit(bits)))
        } else {
            None
        }
    }
    fn find_rank_of_straight_flush(&self, suit: Suit) -> Option<Rank> {
        let bits = self.suit_masks()[suit as usize];
        self.find_rank_of_straight(bits)
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        self.suit_count()
            .iter()
            .position(|&n| n >= 5)
            .map(|i| Suit::from(i as u8))
    }
    fn find_rank_of_n_oak_under(&self, oak: usize, rank: Option<Rank>) -> Option<Rank> {
        let rank = rank.map(u8::from).unwrap_or(13) as u64;
        let mask = (1u64 << (4 * rank)) - 1;
        let hand = u64::from(self.0) & mask;
        let mut mask = 0b_1111_u64 << (4 * rank) >> 4;
        while mask > 0 {
            if oak <= (hand & mask).count_ones() as usize {
                let rank = mask.trailing_zeros() / 4;
                return Some(Rank::from(rank as u8));
            }
            mask >>= 4;
        }
        None
    }
    fn find_rank_of_n_oak(&self, n: usize) -> Option<Rank> {
        self.find_rank_of_n_oak_under(n, None)
    }

    /// Which ranks are present in the hand, ignoring suit.
    fn rank_masks(&self) -> u16 {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| c.rank())
            .map(u16::from)
            .fold(0, |acc, r| acc | r)
    }
    /// How many cards of each suit are in the hand, ignoring rank.
    fn suit_count(&self) -> [u8; 4] {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| c.suit())
            .map(u8::from)
            .fold([0; 4], |mut counts, s| {
                counts[s as usize] += 1;
                counts
            })
    }
    /// Which ranks are present, grouped by suit.
    fn suit_masks(&self) -> [u16; 4] {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| (c.suit(), c.rank()))
            .map(|(s, r)| (u8::from(s), u16::from(r)))
            .fold([0; 4], |mut suits, (s, r)| {
                suits[s as usize] |= r;
                suits
            })
    }
}
