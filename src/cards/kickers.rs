/// The rank-presence bits not accounted for by a hand's primary
/// category, used to break ties between hands of the same `Ranking`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Kickers(u16);

impl From<u16> for Kickers {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}
impl From<Kickers> for u16 {
    fn from(k: Kickers) -> u16 {
        k.0
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:013b}", self.0)
    }
}
