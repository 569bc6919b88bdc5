use super::card::Card;
use super::hand::Hand;
use std::fmt::{self, Display, Formatter};

/// The shared public cards, accreted street by street.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Board(Hand);

impl Board {
    pub const fn empty() -> Self {
        Self(Hand::empty())
    }

    pub fn add(&self, cards: &[Card]) -> Self {
        Self(cards.iter().fold(self.0, |h, &c| h.add(c)))
    }

    pub fn cards(&self) -> Vec<Card> {
        self.0.into()
    }

    pub fn hand(&self) -> Hand {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.size() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Hand> for Board {
    fn from(hand: Hand) -> Self {
        Self(hand)
    }
}
impl From<Board> for Hand {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for card in self.cards() {
            write!(f, "{card} ")?;
        }
        Ok(())
    }
}
