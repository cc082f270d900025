//! Event builders shared by the integration tests and the benches.

use shared_types::{Address, LedgerEvent, TransferEvent, TxHash, U256};
use si_03_swap_correlation::DEFAULT_ROUTER;

/// 1INCH token; has known metadata.
pub const TOKEN: &str = "0x111111111117dc0aa78b770fa6a738034120c302";

/// 2023-11-14T22:13:20Z
pub const BASE_TS: u64 = 1_700_000_000;

pub const SECONDS_PER_DAY: u64 = 86_400;

pub fn router() -> Address {
    DEFAULT_ROUTER
}

pub fn user(n: u32) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xA0;
    bytes[16..].copy_from_slice(&n.to_be_bytes());
    Address(bytes)
}

pub fn tx(n: u64) -> TxHash {
    let mut bytes = [0u8; 32];
    bytes[0] = 0x7E;
    bytes[24..].copy_from_slice(&n.to_be_bytes());
    TxHash(bytes)
}

pub fn token() -> Address {
    TOKEN.parse().expect("fixture token address")
}

pub fn transfer(
    from: Address,
    to: Address,
    value: u64,
    tx_hash: TxHash,
    block_number: u64,
    log_index: u64,
) -> TransferEvent {
    TransferEvent {
        from,
        to,
        value: U256::from(value),
        asset: token(),
        tx_hash,
        block_number,
        timestamp: BASE_TS + block_number * 12,
        log_index,
    }
}

/// User → router → user within one transaction.
pub fn swap_pair(who: Address, amount_in: u64, amount_out: u64, n: u64, block: u64) -> [TransferEvent; 2] {
    [
        transfer(who, router(), amount_in, tx(n), block, 0),
        transfer(router(), who, amount_out, tx(n), block, 1),
    ]
}

/// One NDJSON line for a ledger event.
pub fn ndjson(event: &LedgerEvent) -> String {
    serde_json::to_string(event).expect("ledger events serialize")
}

pub fn reorg_line(from_block: u64) -> String {
    format!(r#"{{"event":"Reorg","from_block":{}}}"#, from_block)
}
