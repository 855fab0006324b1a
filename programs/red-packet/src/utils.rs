use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::spl_token_2022::state::AccountState,
    token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked},
};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    constants::{MAX_SHARES, MIN_SHARES},
    errors::ErrorCode,
};

/// Validates a caller-supplied share vector and returns its total.
pub fn validate_shares(shares: &[u64]) -> Result<u64> {
    require!(
        (MIN_SHARES..=MAX_SHARES).contains(&shares.len()),
        ErrorCode::InvariantViolation
    );
    require!(shares.iter().all(|s| *s > 0), ErrorCode::InvariantViolation);

    shares
        .iter()
        .try_fold(0u64, |acc, s| acc.checked_add(*s))
        .ok_or(error!(ErrorCode::InvariantViolation))
}

/// Picks uniformly among the share indices in `0..total_count` not yet set in `claimed_mask`.
/// Returns None when every share is taken.
pub fn select_unclaimed_index<R: Rng + ?Sized>(
    claimed_mask: u64,
    total_count: usize,
    rng: &mut R,
) -> Option<usize> {
    let total_count = total_count.min(MAX_SHARES);
    let remaining = (0..total_count)
        .filter(|i| claimed_mask & (1u64 << i) == 0)
        .count();

    if remaining == 0 {
        return None;
    }

    let pick = rng.random_range(0..remaining);

    (0..total_count)
        .filter(|i| claimed_mask & (1u64 << i) == 0)
        .nth(pick)
}

/// Seeds the per-claim index draw from the packet, the claimant and the current clock.
/// Not adversarially unpredictable; claimants cannot choose an index, only the runtime order.
pub fn claim_rng(packet: &Pubkey, claimant: &Pubkey, clock: &Clock, claimed_count: u8) -> SmallRng {
    let fold = |key: &Pubkey| {
        key.to_bytes()
            .chunks_exact(8)
            .fold(0u64, |acc, chunk| {
                let mut word = [0u8; 8];
                word.copy_from_slice(chunk);
                acc.rotate_left(17) ^ u64::from_le_bytes(word)
            })
    };

    let seed = fold(packet)
        ^ fold(claimant).rotate_left(32)
        ^ clock.slot
        ^ (clock.unix_timestamp as u64).rotate_left(48)
        ^ u64::from(claimed_count).rotate_left(56);

    SmallRng::seed_from_u64(seed)
}

/// Snapshot of what a depositor's token account can move on the creator's signature
#[derive(Clone, Copy, Debug)]
pub struct FundingSource {
    pub owner: Pubkey,
    pub delegate: Option<Pubkey>,
    pub delegated_amount: u64,
    pub balance: u64,
    pub frozen: bool,
}

impl FundingSource {
    pub fn from_token_account(account: &TokenAccount) -> Self {
        Self {
            owner: account.owner,
            delegate: account.delegate.into(),
            delegated_amount: account.delegated_amount,
            balance: account.amount,
            frozen: account.state == AccountState::Frozen,
        }
    }

    /// The signer must own the account, or hold an approval covering `amount`.
    /// The approval step happens outside this program, before create_packet.
    pub fn ensure_can_fund(&self, signer: &Pubkey, amount: u64) -> Result<()> {
        require!(!self.frozen, ErrorCode::TransferFailed);
        require!(self.balance >= amount, ErrorCode::TransferFailed);

        if self.owner == *signer {
            return Ok(());
        }

        require!(
            self.delegate == Some(*signer) && self.delegated_amount >= amount,
            ErrorCode::TransferFailed
        );

        Ok(())
    }
}

/// Moves tokens out of a packet vault, signed by the packet PDA
#[allow(clippy::too_many_arguments)]
pub fn send_from_vault<'info>(
    vault: &AccountInfo<'info>,
    destination: &InterfaceAccount<'info, TokenAccount>,
    mint: &InterfaceAccount<'info, Mint>,
    packet_info: &AccountInfo<'info>,
    token_program: &Interface<'info, TokenInterface>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let cpi_accounts = TransferChecked {
        from: vault.clone(),
        mint: mint.to_account_info(),
        to: destination.to_account_info(),
        authority: packet_info.clone(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token_interface::transfer_checked(cpi_ctx, amount, mint.decimals)?;

    Ok(())
}
