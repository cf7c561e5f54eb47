// Residue classes modulo three.

use modthree_dfa::Ordinal;

use crate::bit::Bit;

/// A residue class modulo three.
///
/// Used as the state type of the mod-three automaton: reading the digits of a
/// binary numeral most significant first, the state after each prefix is the
/// residue of that prefix's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Residue {
    R0,
    R1,
    R2,
}

impl Residue {
    /// All residues in increasing order.
    pub const ALL: [Residue; 3] = [Residue::R0, Residue::R1, Residue::R2];

    /// The remainder this class stands for, in `0..=2`.
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            Residue::R0 => 0,
            Residue::R1 => 1,
            Residue::R2 => 2,
        }
    }

    /// Residue class of `n`.
    pub fn of(n: u64) -> Self {
        match n % 3 {
            0 => Residue::R0,
            1 => Residue::R1,
            _ => Residue::R2,
        }
    }

    /// Residue of `2 * r + d` where `r` is `self` and `d` is `bit`: the value
    /// of a numeral after appending one more binary digit.
    pub fn after_digit(self, bit: Bit) -> Self {
        Residue::of(2 * u64::from(self.value()) + u64::from(bit.value()))
    }
}

impl From<Residue> for u8 {
    fn from(residue: Residue) -> u8 {
        residue.value()
    }
}

impl std::fmt::Display for Residue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Ordinal for Residue {
    const COUNT: usize = 3;

    fn ordinal(self) -> usize {
        self.value() as usize
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Residue::ALL.get(ordinal).copied()
    }
}
