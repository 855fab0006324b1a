use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::PACKET_SEED,
    errors::ErrorCode,
    events::ShareClaimed,
    state::{Packet, PacketStatus},
    utils::{claim_rng, select_unclaimed_index, send_from_vault},
};

#[derive(Accounts)]
#[instruction(packet_id: [u8; 32])]
pub struct ClaimPacket<'info> {
    /// CHECK: Address pinned by seeds; contents validated by Packet::load_mut
    #[account(
        mut,
        seeds = [PACKET_SEED, packet_id.as_ref()],
        bump
    )]
    pub packet: UncheckedAccount<'info>,

    /// CHECK: Matched against packet.vault in the handler; may already be closed
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,

    /// Checked against packet.mint in handler
    pub mint: InterfaceAccount<'info, Mint>,

    pub claimant: Signer<'info>,

    #[account(
        mut,
        constraint = claimant_token_account.owner == claimant.key() @ ErrorCode::TransferFailed,
        constraint = claimant_token_account.mint == mint.key() @ ErrorCode::InvalidMint
    )]
    pub claimant_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Pays one randomly chosen unclaimed share to the signer.
/// The packet is write-locked for the whole transaction, so concurrent claims serialize.
pub fn handler(ctx: Context<ClaimPacket>, packet_id: [u8; 32]) -> Result<()> {
    let clock = Clock::get()?;
    let packet_info = ctx.accounts.packet.to_account_info();
    let claimant = ctx.accounts.claimant.key();

    // Phase 1: validate and record the claim, then DROP the borrow before the CPI
    let (index, amount, claimed_count, total_count, bump) = {
        let mut packet = Packet::load_mut(&packet_info)?;

        require_keys_eq!(ctx.accounts.vault.key(), packet.vault, ErrorCode::InvalidVault);
        require_keys_eq!(ctx.accounts.mint.key(), packet.mint, ErrorCode::InvalidMint);

        // Checked before status so a retry after success always reports AlreadyClaimed
        require!(
            packet.claim_index_of(&claimant).is_none(),
            ErrorCode::AlreadyClaimed
        );

        match packet.status()? {
            PacketStatus::Active => {}
            PacketStatus::Exhausted => return err!(ErrorCode::PacketExhausted),
            PacketStatus::Refunded | PacketStatus::Closed => {
                return err!(ErrorCode::PacketNotActive)
            }
        }
        require!(packet.remaining_count() > 0, ErrorCode::PacketExhausted);

        let mut rng = claim_rng(&packet_info.key(), &claimant, &clock, packet.claimed_count);
        let index = select_unclaimed_index(
            packet.claimed_mask,
            packet.total_count as usize,
            &mut rng,
        )
        .ok_or(ErrorCode::PacketExhausted)?;

        let amount = packet.record_claim(index, claimant)?;

        (
            index,
            amount,
            packet.claimed_count,
            packet.total_count,
            packet.bump,
        )
    };

    let seeds = &[PACKET_SEED, packet_id.as_ref(), &[bump]];
    let signer_seeds = &[&seeds[..]];

    // Phase 2: custody transfer; failure reverts the record above
    send_from_vault(
        &ctx.accounts.vault.to_account_info(),
        &ctx.accounts.claimant_token_account,
        &ctx.accounts.mint,
        &packet_info,
        &ctx.accounts.token_program,
        amount,
        signer_seeds,
    )?;

    #[cfg(feature = "verbose")]
    msg!(
        "Claimant {} took share {} ({} units), {}/{} claimed",
        claimant,
        index,
        amount,
        claimed_count,
        total_count
    );

    emit!(ShareClaimed {
        packet: packet_info.key(),
        claimant,
        share_index: index as u8,
        amount,
        claimed_count,
        total_count,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
