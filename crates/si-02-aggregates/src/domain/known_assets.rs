//! Static token metadata.
//!
//! Metadata is never fetched from the ledger; tokens missing here keep blank
//! fields until backfilled by some other process.

use shared_types::Address;

/// Metadata for a well-known token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetMetadata {
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
}

/// 1inch governance token (0x111111111117dC0aa78b770fA6A738034120C302).
pub const ONE_INCH_TOKEN: Address = Address([
    0x11, 0x11, 0x11, 0x11, 0x11, 0x17, 0xdc, 0x0a, 0xa7, 0x8b, 0x77, 0x0f, 0xa6, 0xa7, 0x38,
    0x03, 0x41, 0x20, 0xc3, 0x02,
]);

const KNOWN_ASSETS: &[(Address, AssetMetadata)] = &[(
    ONE_INCH_TOKEN,
    AssetMetadata {
        symbol: "1INCH",
        name: "1inch Token",
        decimals: 18,
    },
)];

pub fn known_asset(address: &Address) -> Option<AssetMetadata> {
    KNOWN_ASSETS
        .iter()
        .find(|(known, _)| known == address)
        .map(|(_, meta)| *meta)
}
