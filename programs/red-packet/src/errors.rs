use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Shares must be non-empty, positive and sum without overflow")]
    InvariantViolation,

    #[msg("Share count must be between 1 and 64")]
    InvalidShareCount,

    #[msg("Total amount cannot cover one smallest unit per share")]
    InsufficientAmount,

    #[msg("Packet already exists")]
    DuplicatePacket,

    #[msg("Packet not found")]
    NotFound,

    #[msg("Identity has already claimed from this packet")]
    AlreadyClaimed,

    #[msg("All shares have been claimed")]
    PacketExhausted,

    #[msg("Packet is no longer active")]
    PacketNotActive,

    #[msg("Packet is still active")]
    PacketActive,

    #[msg("Packet has not expired yet")]
    NotExpired,

    #[msg("Nothing left to refund")]
    NothingToRefund,

    #[msg("Token transfer cannot be completed")]
    TransferFailed,

    #[msg("Invalid vault account")]
    InvalidVault,

    #[msg("Token account has wrong mint")]
    InvalidMint,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Expiry window out of bounds")]
    InvalidExpiryWindow,

    #[msg("No pending authority transfer")]
    NoPendingTransfer,
}
