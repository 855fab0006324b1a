use anchor_lang::prelude::*;

use crate::{
    constants::{
        DEFAULT_EXPIRY_WINDOW, MAX_EXPIRY_WINDOW, MIN_EXPIRY_WINDOW, PROTOCOL_CONFIG_SEED,
        PROTOCOL_CONFIG_SIZE,
    },
    errors::ErrorCode,
    events::ProtocolConfigCreated,
    state::ProtocolConfig,
    ID,
};

#[derive(Accounts)]
pub struct InitializeProtocol<'info> {
    #[account(
        init,
        payer = authority,
        space = PROTOCOL_CONFIG_SIZE,
        seeds = [PROTOCOL_CONFIG_SEED],
        bump
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: The program's executable data account - validated in handler
    #[account(
        constraint = program_data.owner == &anchor_lang::solana_program::bpf_loader_upgradeable::id()
            @ ErrorCode::Unauthorized
    )]
    pub program_data: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

/// Initializes the protocol configuration
/// Can only be called once by the program's upgrade authority.
/// An `expiry_window` of 0 selects DEFAULT_EXPIRY_WINDOW.
pub fn handler(ctx: Context<InitializeProtocol>, expiry_window: i64) -> Result<()> {
    let expiry_window = if expiry_window == 0 {
        DEFAULT_EXPIRY_WINDOW
    } else {
        expiry_window
    };
    require!(
        (MIN_EXPIRY_WINDOW..=MAX_EXPIRY_WINDOW).contains(&expiry_window),
        ErrorCode::InvalidExpiryWindow
    );

    // Verify program_data is the correct PDA for our program
    let (expected_program_data, _) = Pubkey::find_program_address(
        &[ID.as_ref()],
        &anchor_lang::solana_program::bpf_loader_upgradeable::id(),
    );
    require!(
        ctx.accounts.program_data.key() == expected_program_data,
        ErrorCode::Unauthorized
    );

    let data = ctx.accounts.program_data.try_borrow_data()?;
    require!(data.len() >= 45, ErrorCode::Unauthorized);

    // UpgradeableLoaderState::ProgramData layout:
    // - 4 bytes: discriminant
    // - 8 bytes: slot
    // - 1 byte: Option discriminant for upgrade_authority
    // - 32 bytes: upgrade_authority pubkey (if Some)
    require!(data[12] == 1, ErrorCode::Unauthorized); // Immutable programs have no authority

    let upgrade_authority = Pubkey::try_from(&data[13..45])
        .map_err(|_| ErrorCode::Unauthorized)?;

    require!(
        upgrade_authority == ctx.accounts.authority.key(),
        ErrorCode::Unauthorized
    );
    drop(data);

    let protocol_config = &mut ctx.accounts.protocol_config.load_init()?;

    protocol_config.authority = ctx.accounts.authority.key();
    protocol_config.pending_authority = Pubkey::default();
    protocol_config.expiry_window = expiry_window;
    protocol_config.bump = ctx.bumps.protocol_config;

    emit!(ProtocolConfigCreated {
        authority: ctx.accounts.authority.key(),
        expiry_window,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
