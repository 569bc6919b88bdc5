use super::rank::Rank;

/// A poker hand's category, ordered worst (`HighCard`) to best
/// (`StraightFlush`); `MAX` is a sentinel used only for showdown
/// comparisons against a not-yet-computed value.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard(Rank),
    OnePair(Rank),
    TwoPair(Rank, Rank),
    ThreeOAK(Rank),
    Straight(Rank),
    Flush(Rank),
    FullHouse(Rank, Rank),
    FourOAK(Rank),
    StraightFlush(Rank),
    Max,
}

impl Ranking {
    pub fn n_kickers(&self) -> usize {
        match self {
            Self::HighCard(_) => 4,
            Self::OnePair(_) => 3,
            Self::ThreeOAK(_) => 2,
            Self::FourOAK(_) | Self::TwoPair(_, _) => 1,
            _ => 0,
        }
    }

    pub fn mask(&self) -> u16 {
        match *self {
            Self::TwoPair(hi, lo) => !(u16::from(hi) | u16::from(lo)),
            Self::HighCard(hi) | Self::OnePair(hi) | Self::FourOAK(hi) | Self::ThreeOAK(hi) => {
                !u16::from(hi)
            }
            Self::FullHouse(..) | Self::StraightFlush(..) | Self::Straight(..) | Self::Flush(..) => {
                u16::MAX
            }
            Self::Max => unreachable!("Max is a sentinel, not a real ranking"),
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Max => unreachable!("Max is a sentinel, not a real ranking"),
            Self::FullHouse(r1, r2) => write!(f, "full house, {r1}s over {r2}s"),
            Self::TwoPair(r1, r2) => write!(f, "two pair, {r1}s and {r2}s"),
            Self::HighCard(r) => write!(f, "high card, {r}"),
            Self::OnePair(r) => write!(f, "pair of {r}s"),
            Self::ThreeOAK(r) => write!(f, "three of a kind, {r}s"),
            Self::Straight(r) => write!(f, "straight to the {r}"),
            Self::FourOAK(r) => write!(f, "four of a kind, {r}s"),
            Self::Flush(r) => write!(f, "flush, {r} high"),
            Self::StraightFlush(r) => write!(f, "straight flush to the {r}"),
        }
    }
}
