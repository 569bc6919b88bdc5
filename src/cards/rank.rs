use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const fn all() -> [Self; 13] {
        [
            Self::Two,
            Self::Three,
            Self::Four,
            Self::Five,
            Self::Six,
            Self::Seven,
            Self::Eight,
            Self::Nine,
            Self::Ten,
            Self::Jack,
            Self::Queen,
            Self::King,
            Self::Ace,
        ]
    }

    /// Ranks present in the 24-card limited deck (9 through Ace).
    pub const fn all_limited() -> [Self; 6] {
        [
            Self::Nine,
            Self::Ten,
            Self::Jack,
            Self::Queen,
            Self::King,
            Self::Ace,
        ]
    }
}

impl From<u8> for Rank {
    fn from(n: u8) -> Self {
        match n {
            0 => Self::Two,
            1 => Self::Three,
            2 => Self::Four,
            3 => Self::Five,
            4 => Self::Six,
            5 => Self::Seven,
            6 => Self::Eight,
            7 => Self::Nine,
            8 => Self::Ten,
            9 => Self::Jack,
            10 => Self::Queen,
            11 => Self::King,
            12 => Self::Ace,
            _ => panic!("invalid rank index {n}"),
        }
    }
}
impl From<Rank> for u8 {
    fn from(r: Rank) -> u8 {
        r as u8
    }
}

/// A 13-bit mask with a single bit set, used by the evaluator when
/// extracting a rank out of a rank-presence bitmask.
impl From<Rank> for u16 {
    fn from(r: Rank) -> u16 {
        1 << (r as u16)
    }
}
/// Inverse: the single set bit in the mask becomes the Rank.
impl From<u16> for Rank {
    fn from(bits: u16) -> Self {
        Self::from(bits.trailing_zeros() as u8)
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Two => "2",
                Self::Three => "3",
                Self::Four => "4",
                Self::Five => "5",
                Self::Six => "6",
                Self::Seven => "7",
                Self::Eight => "8",
                Self::Nine => "9",
                Self::Ten => "T",
                Self::Jack => "J",
                Self::Queen => "Q",
                Self::King => "K",
                Self::Ace => "A",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        for r in Rank::all() {
            assert_eq!(r, Rank::from(u8::from(r)));
        }
    }

    #[test]
    fn mask_round_trip() {
        for r in Rank::all() {
            assert_eq!(r, Rank::from(u16::from(r)));
        }
    }
}
