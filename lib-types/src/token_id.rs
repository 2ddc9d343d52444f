//! Split-identifier token ids.
//!
//! A [`TokenId`] is a 256-bit value (big-endian) interpreted in place:
//!
//! - Bit 255 ("NF flag"): 1 = non-fungible id space, 0 = fungible class id
//! - Bits 128-254 ("base type"): the non-fungible collection
//! - Bits 0-127 ("instance index"): zero = the base type itself (a template,
//!   not an ownable item); non-zero = one concrete uniquely-owned item
//!
//! Classification is a pure function of the bit pattern. No storage lookup,
//! no failure mode: every 256-bit value classifies as exactly one
//! [`TokenKind`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a token identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Amount-based class; units are interchangeable
    Fungible,
    /// Non-fungible collection template (instance index zero); not ownable
    NonFungibleBase,
    /// One concrete uniquely-owned item
    NonFungibleItem,
}

/// 256-bit token identifier, big-endian
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct TokenId(pub [u8; 32]);

/// NF flag as a bit of the high 128-bit word (bit 255 of the identifier)
const NF_FLAG: u128 = 1 << 127;

impl TokenId {
    /// Create a new TokenId from raw bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create a zeroed TokenId
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Get the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Build an identifier from its 128-bit halves
    pub fn from_words(high: u128, low: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&high.to_be_bytes());
        bytes[16..].copy_from_slice(&low.to_be_bytes());
        Self(bytes)
    }

    /// Fungible class id from a class number (NF flag clear)
    pub fn fungible_class(class: u128) -> Self {
        Self::from_words(0, class)
    }

    /// Non-fungible base type from a collection number.
    ///
    /// The number is masked into bits 128-254; bit 255 is forced on. The
    /// instance index is zero, so the result denotes the template itself.
    pub fn non_fungible_base(collection: u128) -> Self {
        Self::from_words(NF_FLAG | (collection & !NF_FLAG), 0)
    }

    /// Same base type, with the given instance index
    pub fn with_index(self, index: u128) -> Self {
        Self::from_words(self.high_word(), index)
    }

    /// True iff the NF flag (bit 255) is set
    pub const fn is_non_fungible(&self) -> bool {
        self.0[0] & 0x80 != 0
    }

    /// True iff the NF flag is clear
    pub const fn is_fungible(&self) -> bool {
        !self.is_non_fungible()
    }

    /// The instance index (low 128 bits). Meaningful only when
    /// [`is_non_fungible`](Self::is_non_fungible) is true.
    pub fn non_fungible_index(&self) -> u128 {
        self.low_word()
    }

    /// The identifier with its instance-index bits cleared
    pub fn non_fungible_base_type(&self) -> TokenId {
        Self::from_words(self.high_word(), 0)
    }

    /// NF flag set and instance index zero
    pub fn is_non_fungible_base_type(&self) -> bool {
        self.is_non_fungible() && self.low_word() == 0
    }

    /// NF flag set and instance index non-zero
    pub fn is_non_fungible_item(&self) -> bool {
        self.is_non_fungible() && self.low_word() != 0
    }

    /// Three-way classification. Total: holds for every 256-bit value.
    pub fn kind(&self) -> TokenKind {
        if self.is_fungible() {
            TokenKind::Fungible
        } else if self.low_word() == 0 {
            TokenKind::NonFungibleBase
        } else {
            TokenKind::NonFungibleItem
        }
    }

    fn high_word(&self) -> u128 {
        let mut word = [0u8; 16];
        word.copy_from_slice(&self.0[..16]);
        u128::from_be_bytes(word)
    }

    fn low_word(&self) -> u128 {
        let mut word = [0u8; 16];
        word.copy_from_slice(&self.0[16..]);
        u128::from_be_bytes(word)
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for TokenId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for TokenId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
