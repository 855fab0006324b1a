use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::PACKET_SEED,
    errors::ErrorCode,
    events::PacketRefunded,
    state::{Packet, PacketStatus},
    utils::send_from_vault,
};

#[derive(Accounts)]
#[instruction(packet_id: [u8; 32])]
pub struct RefundPacket<'info> {
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

    pub mint: InterfaceAccount<'info, Mint>,

    /// Receives the unclaimed remainder; must belong to packet.creator
    #[account(mut)]
    pub creator_token_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Intentionally not a Signer - refunds are permissionless once expired and
    /// funds can only flow back to the creator. Used only for event attribution.
    pub caller: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Returns every unclaimed share to the creator after expiry and marks the packet Refunded
pub fn handler(ctx: Context<RefundPacket>, packet_id: [u8; 32]) -> Result<()> {
    let clock = Clock::get()?;
    let packet_info = ctx.accounts.packet.to_account_info();

    let (creator, amount, unclaimed_shares, bump) = {
        let mut packet = Packet::load_mut(&packet_info)?;

        require_keys_eq!(ctx.accounts.vault.key(), packet.vault, ErrorCode::InvalidVault);
        require_keys_eq!(ctx.accounts.mint.key(), packet.mint, ErrorCode::InvalidMint);
        require_keys_eq!(
            ctx.accounts.creator_token_account.owner,
            packet.creator,
            ErrorCode::TransferFailed
        );
        require_keys_eq!(
            ctx.accounts.creator_token_account.mint,
            packet.mint,
            ErrorCode::InvalidMint
        );

        require!(clock.unix_timestamp >= packet.expires_at, ErrorCode::NotExpired);
        require!(
            packet.status()? == PacketStatus::Active,
            ErrorCode::PacketNotActive
        );

        let unclaimed_shares = packet.remaining_count();
        let amount = packet.record_refund()?;

        (packet.creator, amount, unclaimed_shares, packet.bump)
    };

    let seeds = &[PACKET_SEED, packet_id.as_ref(), &[bump]];
    let signer_seeds = &[&seeds[..]];

    send_from_vault(
        &ctx.accounts.vault.to_account_info(),
        &ctx.accounts.creator_token_account,
        &ctx.accounts.mint,
        &packet_info,
        &ctx.accounts.token_program,
        amount,
        signer_seeds,
    )?;

    #[cfg(feature = "verbose")]
    msg!("Refunded {} units ({} shares) to {}", amount, unclaimed_shares, creator);

    emit!(PacketRefunded {
        packet: packet_info.key(),
        creator,
        amount,
        unclaimed_shares,
        caller: ctx.accounts.caller.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
