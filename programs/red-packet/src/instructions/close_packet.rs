use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, CloseAccount, Mint, TokenAccount, TokenInterface};

use crate::{
    constants::PACKET_SEED,
    errors::ErrorCode,
    events::PacketClosed,
    state::{Packet, PacketStatus},
    utils::send_from_vault,
};

#[derive(Accounts)]
#[instruction(packet_id: [u8; 32])]
pub struct ClosePacket<'info> {
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

    /// Receives any stray vault balance; must belong to packet.creator
    #[account(mut)]
    pub creator_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Receives the vault rent
    #[account(mut)]
    pub creator: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Finalizes an Exhausted or Refunded packet: sweeps the vault to the creator,
/// closes it and marks the record Closed. The packet account itself is kept for audit.
pub fn handler(ctx: Context<ClosePacket>, packet_id: [u8; 32]) -> Result<()> {
    let packet_info = ctx.accounts.packet.to_account_info();

    let bump = {
        let mut packet = Packet::load_mut(&packet_info)?;

        require_keys_eq!(ctx.accounts.vault.key(), packet.vault, ErrorCode::InvalidVault);
        require_keys_eq!(ctx.accounts.mint.key(), packet.mint, ErrorCode::InvalidMint);
        require_keys_eq!(
            ctx.accounts.creator.key(),
            packet.creator,
            ErrorCode::Unauthorized
        );
        require_keys_eq!(
            ctx.accounts.creator_token_account.owner,
            packet.creator,
            ErrorCode::TransferFailed
        );

        match packet.status()? {
            PacketStatus::Exhausted | PacketStatus::Refunded => {}
            PacketStatus::Active => return err!(ErrorCode::PacketActive),
            PacketStatus::Closed => return err!(ErrorCode::PacketNotActive),
        }

        packet.set_status(PacketStatus::Closed);
        packet.bump
    }; // ← Borrow DROPPED before CPI

    let vault_info = ctx.accounts.vault.to_account_info();
    require_keys_eq!(
        *vault_info.owner,
        ctx.accounts.token_program.key(),
        ErrorCode::InvalidVault
    );
    let swept_amount = {
        let data = vault_info.try_borrow_data()?;
        TokenAccount::try_deserialize(&mut &data[..])?.amount
    };
    let rent_recovered = vault_info.lamports();

    let seeds = &[PACKET_SEED, packet_id.as_ref(), &[bump]];
    let signer_seeds = &[&seeds[..]];

    // Anyone can transfer into the vault; whatever is left belongs to the creator
    if swept_amount > 0 {
        send_from_vault(
            &vault_info,
            &ctx.accounts.creator_token_account,
            &ctx.accounts.mint,
            &packet_info,
            &ctx.accounts.token_program,
            swept_amount,
            signer_seeds,
        )?;
    }

    let cpi_accounts = CloseAccount {
        account: vault_info,
        destination: ctx.accounts.creator.to_account_info(),
        authority: packet_info.clone(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token_interface::close_account(cpi_ctx)?;

    #[cfg(feature = "verbose")]
    msg!("Packet {} closed, swept {} units", packet_info.key(), swept_amount);

    emit!(PacketClosed {
        packet: packet_info.key(),
        creator: ctx.accounts.creator.key(),
        swept_amount,
        rent_recovered,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
