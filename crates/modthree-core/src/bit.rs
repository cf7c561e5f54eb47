// Binary digits: conversion from and to their character form.

use modthree_dfa::Ordinal;

/// One binary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bit {
    Zero,
    One,
}

/// Error returned when a character is neither `'0'` nor `'1'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0:?} is not a binary digit")]
pub struct NotABit(pub char);

impl Bit {
    /// Numeric value of the digit, 0 or 1.
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    /// The character `'0'` or `'1'`.
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl TryFrom<char> for Bit {
    type Error = NotABit;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(NotABit(other)),
        }
    }
}

impl From<Bit> for char {
    fn from(bit: Bit) -> char {
        bit.as_char()
    }
}

impl Ordinal for Bit {
    const COUNT: usize = 2;

    fn ordinal(self) -> usize {
        self.value() as usize
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        match ordinal {
            0 => Some(Bit::Zero),
            1 => Some(Bit::One),
            _ => None,
        }
    }
}
