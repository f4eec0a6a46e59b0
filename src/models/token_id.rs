//! Asset token identifier layout.
//!
//! A token identifier is a 256-bit integer packing several sub-fields,
//! most-significant first:
//!
//! ```text
//! | creator (160) | isNFT (1) | reserved (8) | chainIndex (23) | packId (53) | packIndex (11) |
//! ```
//!
//! The layout mirrors the asset contract's encoding and must not drift from
//! it; all field offsets live here so assertions elsewhere stay pure bit
//! arithmetic on [`U256`]. The chain index distinguishes tokens minted by the
//! same creator on different chains.

use alloy::primitives::{Address, U256};
use std::fmt;

/// Bit offset of the creator address.
pub const CREATOR_SHIFT: usize = 96;
/// Bit position of the non-fungibility flag.
pub const IS_NFT_BIT: usize = 95;
/// Bit offset of the chain index.
pub const CHAIN_INDEX_SHIFT: usize = 64;
/// Width of the chain index field in bits.
pub const CHAIN_INDEX_BITS: usize = 23;
/// Bit offset of the per-creator pack sequence number.
pub const PACK_ID_SHIFT: usize = 11;
/// Width of the pack sequence field in bits.
pub const PACK_ID_BITS: usize = 53;
/// Width of the pack index field in bits.
pub const PACK_INDEX_BITS: usize = 11;

/// A packed asset token identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(pub U256);

fn field_mask(bits: usize) -> U256 {
    (U256::from(1u8) << bits) - U256::from(1u8)
}

impl TokenId {
    /// Packs the sub-fields into an identifier. Inputs wider than their field
    /// are truncated to the field width.
    pub fn new(
        creator: Address,
        pack_id: u64,
        pack_index: u16,
        chain_index: u32,
        is_nft: bool,
    ) -> Self {
        let mut id = U256::from_be_slice(creator.as_slice()) << CREATOR_SHIFT;
        if is_nft {
            id |= U256::from(1u8) << IS_NFT_BIT;
        }
        id |= (U256::from(chain_index) & field_mask(CHAIN_INDEX_BITS)) << CHAIN_INDEX_SHIFT;
        id |= (U256::from(pack_id) & field_mask(PACK_ID_BITS)) << PACK_ID_SHIFT;
        id |= U256::from(pack_index) & field_mask(PACK_INDEX_BITS);
        TokenId(id)
    }

    /// The address that minted the token.
    pub fn creator(&self) -> Address {
        Address::from_slice(&self.0.to_be_bytes::<32>()[..20])
    }

    /// Whether the identifier denotes a non-fungible token.
    pub fn is_nft(&self) -> bool {
        self.0.bit(IS_NFT_BIT)
    }

    /// The index of the chain the token was originally minted on.
    pub fn chain_index(&self) -> u32 {
        ((self.0 >> CHAIN_INDEX_SHIFT) & field_mask(CHAIN_INDEX_BITS)).to::<u32>()
    }

    /// The per-creator pack sequence number.
    pub fn pack_id(&self) -> u64 {
        ((self.0 >> PACK_ID_SHIFT) & field_mask(PACK_ID_BITS)).to::<u64>()
    }

    /// The position of the token inside its pack.
    pub fn pack_index(&self) -> u16 {
        (self.0 & field_mask(PACK_INDEX_BITS)).to::<u16>()
    }
}

impl From<TokenId> for U256 {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

impl From<U256> for TokenId {
    fn from(raw: U256) -> Self {
        TokenId(raw)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.to_be_bytes::<32>()))
    }
}
