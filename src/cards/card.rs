use super::rank::Rank;
use super::suit::Suit;
use std::fmt::{self, Display, Formatter};

/// `rank * 4 + suit`, so the bit layout groups four suits per rank.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    pub fn rank(&self) -> Rank {
        Rank::from(self.0 / 4)
    }
    pub fn suit(&self) -> Suit {
        Suit::from(self.0 % 4)
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self(u8::from(rank) * 4 + u8::from(suit))
    }
}

impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.0
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self(n)
    }
}

impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1u64 << c.0
    }
}
impl From<u64> for Card {
    fn from(bit: u64) -> Self {
        Self(bit.trailing_zeros() as u8)
    }
}

impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, String> {
        let mut chars = s.chars();
        let rank = match chars.next() {
            Some('2') => Rank::Two,
            Some('3') => Rank::Three,
            Some('4') => Rank::Four,
            Some('5') => Rank::Five,
            Some('6') => Rank::Six,
            Some('7') => Rank::Seven,
            Some('8') => Rank::Eight,
            Some('9') => Rank::Nine,
            Some('T') | Some('t') => Rank::Ten,
            Some('J') | Some('j') => Rank::Jack,
            Some('Q') | Some('q') => Rank::Queen,
            Some('K') | Some('k') => Rank::King,
            Some('A') | Some('a') => Rank::Ace,
            _ => return Err(format!("invalid rank in card string {s:?}")),
        };
        let suit = chars
            .next()
            .and_then(|c| Suit::try_from(c).ok())
            .ok_or_else(|| format!("invalid suit in card string {s:?}"))?;
        if chars.next().is_some() {
            return Err(format!("trailing characters in card string {s:?}"));
        }
        Ok(Self::from((rank, suit)))
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        for n in 0..52u8 {
            assert_eq!(n, u8::from(Card::from(n)));
        }
    }

    #[test]
    fn parses_and_displays() {
        let card = Card::try_from("As").unwrap();
        assert_eq!(card.rank(), Rank::Ace);
        assert_eq!(card.suit(), Suit::Spade);
        assert_eq!(card.to_string(), "As");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Card::try_from("Zz").is_err());
        assert!(Card::try_from("Asx").is_err());
    }
}
