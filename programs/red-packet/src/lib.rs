use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod split;
pub mod state;
mod utils;

use instructions::*;

declare_id!("RPKTzq4TaX9mWkLqEGhB8vUfuN3sJdC1Yr7pHnZVoMe");

// Security contact information (embedded on-chain)
#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Red Packet",
    project_url: "https://github.com/red-packet/red-packet",
    contacts: "link:https://github.com/red-packet/red-packet/security",
    policy: "https://github.com/red-packet/red-packet/blob/main/SECURITY.md",
    source_code: "https://github.com/red-packet/red-packet",
    source_release: "v0.1.0"
}

#[program]
pub mod red_packet {
    use super::*;

    /// Initializes the protocol configuration
    /// Can only be called once by the program's upgrade authority
    pub fn initialize_protocol(ctx: Context<InitializeProtocol>, expiry_window: i64) -> Result<()> {
        instructions::initialize_protocol::handler(ctx, expiry_window)
    }

    /// Updates the expiry window for packets created afterwards
    /// Only callable by current protocol authority
    pub fn update_protocol_config(
        ctx: Context<UpdateProtocolConfig>,
        new_expiry_window: i64,
    ) -> Result<()> {
        instructions::update_protocol_config::handler(ctx, new_expiry_window)
    }

    /// Proposes protocol authority transfer to a new address (two-step pattern)
    /// Only callable by current protocol authority
    /// New authority must call accept_protocol_authority to complete
    pub fn transfer_protocol_authority(
        ctx: Context<TransferProtocolAuthority>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::transfer_protocol_authority::handler(ctx, new_authority)
    }

    /// Accepts a pending protocol authority transfer
    /// Only callable by the pending authority
    pub fn accept_protocol_authority(ctx: Context<AcceptProtocolAuthority>) -> Result<()> {
        instructions::accept_protocol_authority::handler(ctx)
    }

    /// Registers a packet and deposits sum(shares) into its vault atomically
    pub fn create_packet(
        ctx: Context<CreatePacket>,
        packet_id: [u8; 32],
        shares: Vec<u64>,
    ) -> Result<()> {
        instructions::create_packet::handler(ctx, packet_id, shares)
    }

    /// Claims one unclaimed share for the signer (at most once per identity)
    pub fn claim_packet(ctx: Context<ClaimPacket>, packet_id: [u8; 32]) -> Result<()> {
        instructions::claim_packet::handler(ctx, packet_id)
    }

    /// Returns unclaimed shares to the creator after expiry
    /// Permissionless - anyone can call
    pub fn refund_packet(ctx: Context<RefundPacket>, packet_id: [u8; 32]) -> Result<()> {
        instructions::refund_packet::handler(ctx, packet_id)
    }

    /// Sweeps and closes the vault of an Exhausted or Refunded packet, marking it Closed
    /// Only callable by the creator
    pub fn close_packet(ctx: Context<ClosePacket>, packet_id: [u8; 32]) -> Result<()> {
        instructions::close_packet::handler(ctx, packet_id)
    }

    /// Returns the packet summary view through return data
    pub fn get_packet_status(
        ctx: Context<QueryPacket>,
        packet_id: [u8; 32],
    ) -> Result<PacketStatusView> {
        instructions::query_packet::status_handler(ctx, packet_id)
    }

    /// Returns the share vector in index order
    pub fn get_packet_shares(ctx: Context<QueryPacket>, packet_id: [u8; 32]) -> Result<Vec<u64>> {
        instructions::query_packet::shares_handler(ctx, packet_id)
    }

    /// Whether `identity` has already taken a share
    pub fn has_claimed(
        ctx: Context<QueryPacket>,
        packet_id: [u8; 32],
        identity: Pubkey,
    ) -> Result<bool> {
        instructions::query_packet::has_claimed_handler(ctx, packet_id, identity)
    }
}
