//! Fixed-size bitset over `TokenKind`.

use std::fmt;

use crate::lexer::TokenKind;

const WORDS: usize = 4;

/// A set of token kinds, one bit per kind.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TokenSet([u64; WORDS]);

// Every token kind must have a bit.
const _: () = assert!((TokenKind::Eof as usize) < WORDS * 64);

impl TokenSet {
    /// The empty set.
    pub const EMPTY: Self = Self([0; WORDS]);

    /// Builds a set from a list of kinds.
    #[must_use]
    pub const fn new(kinds: &[TokenKind]) -> Self {
        let mut words = [0u64; WORDS];
        let mut i = 0;
        while i < kinds.len() {
            let bit = kinds[i] as usize;
            words[bit / 64] |= 1u64 << (bit % 64);
            i += 1;
        }
        Self(words)
    }

    /// Returns `true` if `kind` is in the set.
    #[must_use]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        let bit = kind as usize;
        self.0[bit / 64] & (1u64 << (bit % 64)) != 0
    }

    /// Adds `kind`, returning `true` if it was not present.
    pub fn insert(&mut self, kind: TokenKind) -> bool {
        let bit = kind as usize;
        let mask = 1u64 << (bit % 64);
        let fresh = self.0[bit / 64] & mask == 0;
        self.0[bit / 64] |= mask;
        fresh
    }

    /// Union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        let mut words = self.0;
        let mut i = 0;
        while i < WORDS {
            words[i] |= other.0[i];
            i += 1;
        }
        Self(words)
    }

    /// Returns `true` if both sets share a kind.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).any(|(a, b)| a & b != 0)
    }

    /// Returns `true` if the set has no kinds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|word| *word == 0)
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.0.iter().enumerate().flat_map(|(word_idx, word)| {
                (0..64)
                    .filter(move |bit| word & (1u64 << bit) != 0)
                    .map(move |bit| word_idx * 64 + bit)
            }))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        let mut set = TokenSet::new(&[TokenKind::KwIf, TokenKind::Eof]);
        assert!(set.contains(TokenKind::KwIf));
        assert!(set.contains(TokenKind::Eof));
        assert!(!set.contains(TokenKind::Ident));
        assert!(set.insert(TokenKind::Ident));
        assert!(!set.insert(TokenKind::Ident));
        assert!(set.intersects(&TokenSet::new(&[TokenKind::Ident])));
        assert!(!set.intersects(&TokenSet::new(&[TokenKind::Semicolon])));
        assert!(TokenSet::EMPTY.is_empty());
    }
}
