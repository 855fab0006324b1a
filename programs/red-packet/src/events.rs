use anchor_lang::prelude::*;

#[event]
pub struct ProtocolConfigCreated {
    pub authority: Pubkey,
    pub expiry_window: i64,
    pub timestamp: i64,
}

#[event]
pub struct ProtocolConfigUpdated {
    pub authority: Pubkey,
    pub old_expiry_window: i64,
    pub new_expiry_window: i64,
    pub timestamp: i64,
}

#[event]
pub struct ProtocolAuthorityTransferProposed {
    pub authority: Pubkey,
    pub pending_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ProtocolAuthorityTransferAccepted {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PacketCreated {
    pub packet: Pubkey,
    pub packet_id: [u8; 32],
    pub creator: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub total_amount: u64,
    pub total_count: u8,
    pub expires_at: i64,
    pub timestamp: i64,
}

#[event]
pub struct ShareClaimed {
    pub packet: Pubkey,
    pub claimant: Pubkey,
    pub share_index: u8,
    pub amount: u64,
    pub claimed_count: u8,
    pub total_count: u8,
    pub timestamp: i64,
}

#[event]
pub struct PacketRefunded {
    pub packet: Pubkey,
    pub creator: Pubkey,
    pub amount: u64,
    pub unclaimed_shares: u8,
    pub caller: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct PacketClosed {
    pub packet: Pubkey,
    pub creator: Pubkey,
    /// Stray tokens found in the vault and returned to the creator
    pub swept_amount: u64,
    pub rent_recovered: u64,
    pub timestamp: i64,
}
