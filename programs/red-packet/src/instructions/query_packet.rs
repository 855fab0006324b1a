use anchor_lang::prelude::*;

use crate::{
    constants::PACKET_SEED,
    state::{Packet, PacketStatus},
};

/// Read-only access to a packet; shared by every query instruction
#[derive(Accounts)]
#[instruction(packet_id: [u8; 32])]
pub struct QueryPacket<'info> {
    /// CHECK: Address pinned by seeds; contents validated by Packet::load
    #[account(
        seeds = [PACKET_SEED, packet_id.as_ref()],
        bump
    )]
    pub packet: UncheckedAccount<'info>,
}

/// Snapshot returned by get_packet_status
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PacketStatusView {
    pub creator: Pubkey,
    pub mint: Pubkey,
    pub total_amount: u64,
    pub total_count: u8,
    pub claimed_count: u8,
    pub claimed_amount: u64,
    pub refunded_amount: u64,
    pub status: PacketStatus,
    pub created_at: i64,
    pub expires_at: i64,
}

pub fn status_handler(ctx: Context<QueryPacket>, _packet_id: [u8; 32]) -> Result<PacketStatusView> {
    let packet_info = ctx.accounts.packet.to_account_info();
    let packet = Packet::load(&packet_info)?;

    Ok(PacketStatusView {
        creator: packet.creator,
        mint: packet.mint,
        total_amount: packet.total_amount,
        total_count: packet.total_count,
        claimed_count: packet.claimed_count,
        claimed_amount: packet.claimed_amount,
        refunded_amount: packet.refunded_amount,
        status: packet.status()?,
        created_at: packet.created_at,
        expires_at: packet.expires_at,
    })
}

pub fn shares_handler(ctx: Context<QueryPacket>, _packet_id: [u8; 32]) -> Result<Vec<u64>> {
    let packet_info = ctx.accounts.packet.to_account_info();
    let packet = Packet::load(&packet_info)?;

    Ok(packet.active_shares().to_vec())
}

pub fn has_claimed_handler(
    ctx: Context<QueryPacket>,
    _packet_id: [u8; 32],
    identity: Pubkey,
) -> Result<bool> {
    let packet_info = ctx.accounts.packet.to_account_info();
    let packet = Packet::load(&packet_info)?;

    Ok(packet.claim_index_of(&identity).is_some())
}
