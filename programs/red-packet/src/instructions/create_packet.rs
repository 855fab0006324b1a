use anchor_lang::{
    prelude::*,
    system_program::{self, Allocate, Assign, CreateAccount, Transfer},
};
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::{
    constants::{PACKET_SEED, PACKET_SIZE, PROTOCOL_CONFIG_SEED},
    errors::ErrorCode,
    events::PacketCreated,
    state::{Packet, PacketStatus, ProtocolConfig},
    utils::{validate_shares, FundingSource},
};

#[derive(Accounts)]
#[instruction(packet_id: [u8; 32])]
pub struct CreatePacket<'info> {
    /// CHECK: Allocated in the handler so a reused id reports DuplicatePacket; address pinned by seeds
    #[account(
        mut,
        seeds = [PACKET_SEED, packet_id.as_ref()],
        bump
    )]
    pub packet: UncheckedAccount<'info>,

    #[account(
        seeds = [PROTOCOL_CONFIG_SEED],
        bump = protocol_config.load()?.bump
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    /// Depositor; pays rent and signs the custody transfer
    #[account(mut)]
    pub creator: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// Funding token account, owned by the creator or approved to it
    #[account(
        mut,
        constraint = source.mint == mint.key() @ ErrorCode::InvalidMint
    )]
    pub source: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = mint,
        associated_token::authority = packet,
        associated_token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Registers a packet and moves its total into custody in the same transaction
pub fn handler(ctx: Context<CreatePacket>, packet_id: [u8; 32], shares: Vec<u64>) -> Result<()> {
    let packet_info = ctx.accounts.packet.to_account_info();
    let creator = ctx.accounts.creator.key();

    require!(
        packet_info.data_is_empty() && packet_info.owner == &system_program::ID,
        ErrorCode::DuplicatePacket
    );

    let total_amount = validate_shares(&shares)?;

    FundingSource::from_token_account(&ctx.accounts.source).ensure_can_fund(&creator, total_amount)?;

    let clock = Clock::get()?;
    let expiry_window = ctx.accounts.protocol_config.load()?.expiry_window;
    let expires_at = clock
        .unix_timestamp
        .checked_add(expiry_window)
        .ok_or(ErrorCode::MathOverflow)?;

    let bump = ctx.bumps.packet;
    let seeds = &[PACKET_SEED, packet_id.as_ref(), &[bump]];
    let signer_seeds = &[&seeds[..]];

    // Allocate the packet account (tolerates lamports sent to the address beforehand)
    let rent = Rent::get()?.minimum_balance(PACKET_SIZE);
    let system_program = ctx.accounts.system_program.to_account_info();
    let current_lamports = packet_info.lamports();

    if current_lamports == 0 {
        system_program::create_account(
            CpiContext::new_with_signer(
                system_program,
                CreateAccount {
                    from: ctx.accounts.creator.to_account_info(),
                    to: packet_info.clone(),
                },
                signer_seeds,
            ),
            rent,
            PACKET_SIZE as u64,
            &crate::ID,
        )?;
    } else {
        let top_up = rent.saturating_sub(current_lamports);
        if top_up > 0 {
            system_program::transfer(
                CpiContext::new(
                    system_program.clone(),
                    Transfer {
                        from: ctx.accounts.creator.to_account_info(),
                        to: packet_info.clone(),
                    },
                ),
                top_up,
            )?;
        }
        system_program::allocate(
            CpiContext::new_with_signer(
                system_program.clone(),
                Allocate {
                    account_to_allocate: packet_info.clone(),
                },
                signer_seeds,
            ),
            PACKET_SIZE as u64,
        )?;
        system_program::assign(
            CpiContext::new_with_signer(
                system_program,
                Assign {
                    account_to_assign: packet_info.clone(),
                },
                signer_seeds,
            ),
            &crate::ID,
        )?;
    }

    {
        let mut packet = Packet::load_init(&packet_info)?;

        packet.version = 1;
        packet.packet_id = packet_id;
        packet.creator = creator;
        packet.mint = ctx.accounts.mint.key();
        packet.vault = ctx.accounts.vault.key();
        packet.bump = bump;
        packet.total_amount = total_amount;
        packet.total_count = shares.len() as u8;
        packet.shares[..shares.len()].copy_from_slice(&shares);
        packet.created_at = clock.unix_timestamp;
        packet.expires_at = expires_at;
        packet.set_status(PacketStatus::Active);
    } // ← Borrow DROPPED before CPI

    // Deposit into custody; a failed transfer reverts the registration above
    let vault_before = ctx.accounts.vault.amount;
    let cpi_accounts = TransferChecked {
        from: ctx.accounts.source.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        authority: ctx.accounts.creator.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
    token_interface::transfer_checked(cpi_ctx, total_amount, ctx.accounts.mint.decimals)?;

    // Mint extensions such as transfer fees can deliver less than was sent
    ctx.accounts.vault.reload()?;
    let expected = vault_before
        .checked_add(total_amount)
        .ok_or(ErrorCode::MathOverflow)?;
    require!(
        ctx.accounts.vault.amount == expected,
        ErrorCode::TransferFailed
    );

    #[cfg(feature = "verbose")]
    msg!(
        "Packet {} created: {} units in {} shares",
        packet_info.key(),
        total_amount,
        shares.len()
    );

    emit!(PacketCreated {
        packet: packet_info.key(),
        packet_id,
        creator,
        mint: ctx.accounts.mint.key(),
        vault: ctx.accounts.vault.key(),
        total_amount,
        total_count: shares.len() as u8,
        expires_at,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
