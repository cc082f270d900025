//! Monotonic update operations on aggregate rows.
//!
//! These are pure mutations; persistence is the repository's job. Additions
//! saturate at `U256::MAX` so no input can wrap a counter back down.

use shared_types::{Address, U256};

use super::{Account, Asset, DailyBucket, UniqueUsersMode};

/// Set `first_seen` once, always overwrite `last_seen`.
pub fn touch_account(account: &mut Account, timestamp: u64) {
    if account.first_seen == 0 {
        account.first_seen = timestamp;
    }
    account.last_seen = timestamp;
}

/// Swap detected by correlating the two legs of a routed trade.
pub fn record_swap_for_account(account: &mut Account, amount: U256) {
    account.total_swaps = account.total_swaps.saturating_add(U256::one());
    account.total_volume = account.total_volume.saturating_add(amount);
}

/// Swap reported directly by the router's own log.
pub fn record_reported_swap_for_account(account: &mut Account, amount: U256) {
    record_swap_for_account(account, amount);
    account.swap_count = account.swap_count.saturating_add(U256::one());
}

/// Fold a correlated swap into its day bucket.
///
/// A zero initiator is not a user: the swap counts, the user does not.
/// Otherwise `initiator` only matters in [`UniqueUsersMode::Distinct`].
pub fn record_swap_for_bucket(
    bucket: &mut DailyBucket,
    amount: U256,
    initiator: Address,
    mode: UniqueUsersMode,
) {
    record_reported_swap_for_bucket(bucket, amount);
    if initiator.is_zero() {
        return;
    }
    match mode {
        UniqueUsersMode::Approximate => {
            bucket.unique_users = bucket.unique_users.saturating_add(U256::one());
        }
        UniqueUsersMode::Distinct => {
            if bucket.seen_users.insert(initiator) {
                bucket.unique_users = U256::from(bucket.seen_users.len());
            }
        }
    }
}

/// Router-reported swap: volume and count only, no user accounting.
pub fn record_reported_swap_for_bucket(bucket: &mut DailyBucket, amount: U256) {
    bucket.total_volume = bucket.total_volume.saturating_add(amount);
    bucket.swap_count = bucket.swap_count.saturating_add(U256::one());
}

pub fn record_transfer_for_asset(asset: &mut Asset) {
    asset.transfer_count = asset.transfer_count.saturating_add(U256::one());
}

pub fn record_approval_for_asset(asset: &mut Asset) {
    asset.approval_count = asset.approval_count.saturating_add(U256::one());
}
