//! Swiper identifiers and their allocator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Process-unique swiper id, rendered as `swiper_<n>`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SwiperId(pub u32);

impl fmt::Display for SwiperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swiper_{}", self.0)
    }
}

/// Monotonic allocator for SwiperId. The first id handed out is `swiper_1`.
/// Ids are never reused within one allocator.
#[derive(Default, Debug)]
pub struct IdAllocator {
    issued: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_swiper(&mut self) -> SwiperId {
        self.issued = self.issued.wrapping_add(1);
        SwiperId(self.issued)
    }

    /// Number of ids handed out so far.
    #[inline]
    pub fn issued(&self) -> u32 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic_from_one() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_swiper(), SwiperId(1));
        assert_eq!(alloc.alloc_swiper(), SwiperId(2));
        assert_eq!(alloc.issued(), 2);
    }

    #[test]
    fn display_uses_swiper_prefix() {
        assert_eq!(SwiperId(7).to_string(), "swiper_7");
    }
}
