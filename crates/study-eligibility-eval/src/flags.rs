//! Bit-packed flag sets
//!
//! Bit `i` stands for entry `i` of the matching catalog table.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet(u64);

impl FlagSet {
    pub const EMPTY: FlagSet = FlagSet(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Set bit `index`; indices past 63 are ignored
    pub fn insert(&mut self, index: u8) {
        if let Some(mask) = Self::mask(index) {
            self.0 |= mask;
        }
    }

    pub fn contains(&self, index: u8) -> bool {
        Self::mask(index).is_some_and(|mask| self.0 & mask != 0)
    }

    /// Number of set bits
    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    fn mask(index: u8) -> Option<u64> {
        1u64.checked_shl(u32::from(index))
    }
}

impl FromIterator<u8> for FlagSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = FlagSet::EMPTY;
        for index in iter {
            set.insert(index);
        }
        set
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_count() {
        let mut set = FlagSet::EMPTY;
        assert!(set.is_empty());
        set.insert(0);
        set.insert(63);
        set.insert(63);
        assert_eq!(set.len(), 2);
        assert!(set.contains(0));
        assert!(set.contains(63));
        assert!(!set.contains(1));
        assert_eq!(set.bits(), (1 << 63) | 1);
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let mut set = FlagSet::EMPTY;
        set.insert(64);
        assert!(set.is_empty());
        assert!(!set.contains(200));
    }

    #[test]
    fn test_from_iter() {
        let set: FlagSet = [1u8, 3, 4].into_iter().collect();
        assert_eq!(set.bits(), 0b11010);
    }
}
