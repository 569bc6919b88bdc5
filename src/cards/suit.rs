use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    Club = 0,
    Diamond = 1,
    Heart = 2,
    Spade = 3,
}

impl Suit {
    pub const fn all() -> [Self; 4] {
        [Self::Club, Self::Diamond, Self::Heart, Self::Spade]
    }

    pub const fn ascii(&self) -> char {
        match self {
            Self::Club => 'c',
            Self::Diamond => 'd',
            Self::Heart => 'h',
            Self::Spade => 's',
        }
    }
}

impl From<u8> for Suit {
    fn from(n: u8) -> Self {
        match n {
            0 => Self::Club,
            1 => Self::Diamond,
            2 => Self::Heart,
            3 => Self::Spade,
            _ => panic!("invalid suit index {n}"),
        }
    }
}
impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}

impl TryFrom<char> for Suit {
    type Error = ();
    fn try_from(c: char) -> Result<Self, ()> {
        match c.to_ascii_lowercase() {
            'c' => Ok(Self::Club),
            'd' => Ok(Self::Diamond),
            'h' => Ok(Self::Heart),
            's' => Ok(Self::Spade),
            _ => Err(()),
        }
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.ascii())
    }
}
