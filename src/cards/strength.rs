use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kickers::Kickers;
use super::ranking::Ranking;

/// A hand's showdown strength: primary category plus kickers to break
/// ties within a category. Always constructed from a [`Hand`] of 5 to
/// 7 cards via the [`Evaluator`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    pub value: Ranking,
    pub kickers: Kickers,
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Self::from(Evaluator::from(hand))
    }
}

impl From<Evaluator> for Strength {
    fn from(e: Evaluator) -> Self {
        let value = e.find_ranking();
        let kickers = e.find_kickers(value);
        Self { value, kickers }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.value, self.kickers)
    }
}
