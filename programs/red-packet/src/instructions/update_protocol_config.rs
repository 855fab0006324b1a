use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_EXPIRY_WINDOW, MIN_EXPIRY_WINDOW, PROTOCOL_CONFIG_SEED},
    errors::ErrorCode,
    events::ProtocolConfigUpdated,
    state::ProtocolConfig,
};

#[derive(Accounts)]
pub struct UpdateProtocolConfig<'info> {
    #[account(
        mut,
        seeds = [PROTOCOL_CONFIG_SEED],
        bump = protocol_config.load()?.bump,
        constraint = protocol_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    pub authority: Signer<'info>,
}

/// Updates the expiry window applied to packets created from now on.
/// Existing packets keep the expires_at they were created with.
pub fn handler(ctx: Context<UpdateProtocolConfig>, new_expiry_window: i64) -> Result<()> {
    require!(
        (MIN_EXPIRY_WINDOW..=MAX_EXPIRY_WINDOW).contains(&new_expiry_window),
        ErrorCode::InvalidExpiryWindow
    );

    let protocol_config = &mut ctx.accounts.protocol_config.load_mut()?;
    let old_expiry_window = protocol_config.expiry_window;

    protocol_config.expiry_window = new_expiry_window;

    emit!(ProtocolConfigUpdated {
        authority: ctx.accounts.authority.key(),
        old_expiry_window,
        new_expiry_window,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
