//! Random share generation for new packets.
//!
//! Runs off-chain: the creator splits the total, then submits the resulting
//! vector with `create_packet`. The program only checks the result.

use anchor_lang::prelude::*;
use rand::Rng;

use crate::{
    constants::{MAX_SHARES, MAX_SPLIT_PRECISION, MIN_SHARES, SPLIT_CAP_BPS},
    errors::ErrorCode,
};

/// Smallest-unit granularity a drawn share is rounded down to.
///
/// A mint with `decimals` fractional digits keeps at most `MAX_SPLIT_PRECISION`
/// of them, so 9-decimal assets draw in steps of 1_000 base units.
pub fn rounding_step(decimals: u8) -> u64 {
    let dropped = decimals.saturating_sub(decimals.min(MAX_SPLIT_PRECISION));
    10u64.saturating_pow(dropped as u32)
}

/// Splits `total_amount` into `total_count` positive shares that sum to it exactly.
///
/// Each draw takes a uniform fraction of at most `SPLIT_CAP_BPS` of what is left,
/// and the last share absorbs the remainder.
pub fn split<R: Rng + ?Sized>(
    total_amount: u64,
    total_count: usize,
    decimals: u8,
    rng: &mut R,
) -> Result<Vec<u64>> {
    require!(
        (MIN_SHARES..=MAX_SHARES).contains(&total_count),
        ErrorCode::InvalidShareCount
    );
    require!(
        total_amount >= total_count as u64,
        ErrorCode::InsufficientAmount
    );

    let step = rounding_step(decimals);
    let mut shares = Vec::with_capacity(total_count);
    let mut remaining = total_amount;

    for drawn in 0..total_count - 1 {
        // Every share after this one still needs one unit
        let reserved = (total_count - 1 - drawn) as u64;
        let ceiling: u64 = (remaining as u128 * SPLIT_CAP_BPS as u128 / 10_000)
            .try_into()
            .map_err(|_| ErrorCode::MathOverflow)?;

        let candidate = rng.random_range(0..=ceiling);
        let share = (candidate - candidate % step)
            .max(1)
            .min(remaining - reserved);

        shares.push(share);
        remaining -= share;
    }

    shares.push(remaining);

    Ok(shares)
}

/// Fresh 256-bit packet identifier. Pass a cryptographic generator so ids can't be guessed
/// ahead of publication.
pub fn new_packet_id<R: Rng + ?Sized>(rng: &mut R) -> [u8; 32] {
    let mut id = [0u8; 32];
    rng.fill(&mut id);
    id
}
