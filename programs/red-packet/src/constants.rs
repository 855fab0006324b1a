// PDA seeds
pub const PROTOCOL_CONFIG_SEED: &[u8] = b"protocol_config";
pub const PACKET_SEED: &[u8] = b"red_packet";

// Share limits (claimed_mask is a u64 bitmap)
pub const MIN_SHARES: usize = 1;
pub const MAX_SHARES: usize = 64;

// Splitter tuning
pub const SPLIT_CAP_BPS: u64 = 3000;         // No drawn share exceeds 30% of what is left
pub const MAX_SPLIT_PRECISION: u8 = 6;       // Fractional digits kept when rounding a draw

// Expiry window bounds (seconds)
pub const DEFAULT_EXPIRY_WINDOW: i64 = 24 * 60 * 60;
pub const MIN_EXPIRY_WINDOW: i64 = 60;
pub const MAX_EXPIRY_WINDOW: i64 = 30 * 24 * 60 * 60;

// Account sizes for zero-copy structs
// ProtocolConfig: discriminator (8) + authority (32) + pending_authority (32)
//   + expiry_window (8) + bump (1) + reserved (7)
pub const PROTOCOL_CONFIG_SIZE: usize = 8 + 32 + 32 + 8 + 1 + 7; // 88 bytes

// Packet size calculation:
// - discriminator: 8
// - packet_id: 32
// - creator: 32
// - mint: 32
// - vault: 32
// - total_amount, claimed_amount, refunded_amount: 8 * 3
// - created_at, expires_at: 8 * 2
// - claimed_mask: 8
// - shares: [u64; 64] = 512
// - claimants: [Pubkey; 64] = 2048
// - version, status, bump, total_count, claimed_count: 5
// - reserved: 3
// Total: 8 + 128 + 24 + 16 + 8 + 512 + 2048 + 5 + 3 = 2752
pub const PACKET_SIZE: usize = 2752;
