use super::card::Card;
use super::hand::Hand;
use super::rank::Rank;
use super::suit::Suit;
use rand::seq::SliceRandom;
use rand::Rng;

/// A shuffleable, excludable set of remaining cards, stored as a mask
/// rather than a `Vec` so `exclude`/`contains` are single bit ops.
#[derive(Debug, Clone)]
pub struct Deck {
    remaining: Hand,
    order: Vec<Card>,
}

impl Deck {
    /// Full 52-card deck.
    pub fn new() -> Self {
        Self::build(Rank::all().to_vec())
    }

    /// Limited 24-card deck: ranks 9 through Ace.
    pub fn limited() -> Self {
        Self::build(Rank::all_limited().to_vec())
    }

    pub fn of(limited: bool) -> Self {
        if limited {
            Self::limited()
        } else {
            Self::new()
        }
    }

    fn build(ranks: Vec<Rank>) -> Self {
        let mut order = Vec::with_capacity(ranks.len() * 4);
        for suit in Suit::all() {
            for rank in ranks.iter().copied() {
                order.push(Card::from((rank, suit)));
            }
        }
        let remaining = Hand::from(order.clone());
        Self { remaining, order }
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
    }

    pub fn contains(&self, card: Card) -> bool {
        self.remaining.contains(card)
    }

    pub fn len(&self) -> usize {
        self.remaining.size() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every card in `hand` from the deck, wherever it sits in
    /// the shuffle order.
    pub fn exclude(&mut self, hand: Hand) {
        self.remaining = Hand::from(u64::from(self.remaining) & !u64::from(hand));
        self.order.retain(|c| self.remaining.contains(*c));
    }

    /// Deal `n` cards off the top of the current shuffle order.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        assert!(n <= self.order.len(), "not enough cards left in deck");
        let dealt = self.order.split_off(self.order.len() - n);
        for card in dealt.iter() {
            self.remaining = Hand::from(u64::from(self.remaining) & !u64::from(*card));
        }
        dealt
    }

    pub fn draw(&mut self) -> Option<Card> {
        let card = self.order.pop()?;
        self.remaining = Hand::from(u64::from(self.remaining) & !u64::from(card));
        Some(card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
