// flags.rs -- Bit flags over enum values.
//
// An enum opts in by implementing `Flag`, mapping each variant to a bit
// mask. Masks may span several bits (e.g. a unit tagged with its system),
// in which case `is_enabled` requires all of them.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{BitAnd, BitOr, BitXor};

/// A value that can be stored in `EnumFlags`.
pub trait Flag: Copy {
    fn bits(self) -> u32;
}

/// Set of flags of type `T`, stored as a raw mask.
pub struct EnumFlags<T: Flag> {
    bits: u32,
    _marker: PhantomData<T>,
}

impl<T: Flag> EnumFlags<T> {
    /// Empty set.
    pub fn new() -> Self {
        EnumFlags::from_bits(0)
    }

    pub fn from_bits(bits: u32) -> Self {
        EnumFlags { bits, _marker: PhantomData }
    }

    /// Raw mask.
    pub fn flags(&self) -> u32 {
        self.bits
    }

    pub fn is_enabled(&self, flag: T) -> bool {
        let mask = flag.bits();
        mask != 0 && self.bits & mask == mask
    }

    pub fn is_disabled(&self, flag: T) -> bool {
        !self.is_enabled(flag)
    }

    pub fn enable(&mut self, flag: T) {
        self.bits |= flag.bits();
    }

    pub fn disable(&mut self, flag: T) {
        self.bits &= !flag.bits();
    }

    /// Enable or disable depending on `active`.
    pub fn set(&mut self, flag: T, active: bool) {
        if active {
            self.enable(flag);
        } else {
            self.disable(flag);
        }
    }

    /// Toggle the bits of `flag`.
    pub fn switch(&mut self, flag: T) {
        self.bits ^= flag.bits();
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl<T: Flag> Default for EnumFlags<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Flag> Clone for EnumFlags<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Flag> Copy for EnumFlags<T> {}

impl<T: Flag> PartialEq for EnumFlags<T> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<T: Flag> Eq for EnumFlags<T> {}

impl<T: Flag> fmt::Debug for EnumFlags<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumFlags({:#b})", self.bits)
    }
}

impl<T: Flag> From<T> for EnumFlags<T> {
    fn from(flag: T) -> Self {
        EnumFlags::from_bits(flag.bits())
    }
}

impl<T: Flag> BitOr for EnumFlags<T> {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        EnumFlags::from_bits(self.bits | rhs.bits)
    }
}

impl<T: Flag> BitAnd for EnumFlags<T> {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        EnumFlags::from_bits(self.bits & rhs.bits)
    }
}

impl<T: Flag> BitXor for EnumFlags<T> {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        EnumFlags::from_bits(self.bits ^ rhs.bits)
    }
}

impl<T: Flag> BitOr<T> for EnumFlags<T> {
    type Output = Self;
    fn bitor(self, rhs: T) -> Self {
        EnumFlags::from_bits(self.bits | rhs.bits())
    }
}
