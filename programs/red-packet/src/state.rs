use std::cell::{Ref, RefMut};

use anchor_lang::{prelude::*, Discriminator};

use crate::{
    constants::{MAX_SHARES, PACKET_SIZE},
    errors::ErrorCode,
};

/// Global protocol configuration (single instance)
#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct ProtocolConfig {
    /// Authority that can update config (initially program upgrade authority)
    pub authority: Pubkey,
    /// Pending authority for two-step transfer (default = no pending transfer)
    pub pending_authority: Pubkey,
    /// Seconds between packet creation and refund eligibility
    pub expiry_window: i64,
    /// Bump seed for PDA derivation (stored for CU optimization)
    pub bump: u8,
    pub _reserved: [u8; 7],
}

/// Lifecycle of a packet. Leaving `Active` is one-way.
/// Stored as 1..=4 so a zeroed record never decodes as a live packet.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketStatus {
    Active,
    Exhausted,
    Refunded,
    Closed,
}

impl From<PacketStatus> for u8 {
    fn from(status: PacketStatus) -> u8 {
        match status {
            PacketStatus::Active => 1,
            PacketStatus::Exhausted => 2,
            PacketStatus::Refunded => 3,
            PacketStatus::Closed => 4,
        }
    }
}

impl TryFrom<u8> for PacketStatus {
    type Error = anchor_lang::error::Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(PacketStatus::Active),
            2 => Ok(PacketStatus::Exhausted),
            3 => Ok(PacketStatus::Refunded),
            4 => Ok(PacketStatus::Closed),
            _ => err!(ErrorCode::InvariantViolation),
        }
    }
}

/// One red packet: its share vector, who claimed what, and custody pointers.
///
/// Stored at PDA `["red_packet", packet_id]`. The account is never closed so
/// the claim history stays queryable after the packet reaches a terminal status.
#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct Packet {
    /// Creator-chosen 256-bit identifier (PDA seed)
    pub packet_id: [u8; 32],
    /// Depositor; receives refunds and vault rent
    pub creator: Pubkey,
    /// Token mint of the deposited asset
    pub mint: Pubkey,
    /// Vault address (PDA-owned ATA) holding custody
    pub vault: Pubkey,
    pub total_amount: u64,
    /// Sum of shares already disbursed
    pub claimed_amount: u64,
    /// Amount returned to the creator by refund
    pub refunded_amount: u64,
    pub created_at: i64,
    pub expires_at: i64,
    /// Bit i set once share i has been disbursed
    pub claimed_mask: u64,
    /// Share amounts (use total_count to determine active entries)
    pub shares: [u64; MAX_SHARES],
    /// claimants[i] received shares[i]; only meaningful where claimed_mask has bit i
    pub claimants: [Pubkey; MAX_SHARES],
    /// Schema version for future upgrades
    pub version: u8,
    /// PacketStatus as u8
    pub status: u8,
    pub bump: u8,
    pub total_count: u8,
    pub claimed_count: u8,
    pub _reserved: [u8; 3],
}

impl Packet {
    /// Validates owner, size and discriminator. Anything else is reported as `NotFound`.
    fn check_account(info: &AccountInfo) -> Result<()> {
        require!(info.owner == &crate::ID, ErrorCode::NotFound);

        let data = info.try_borrow_data()?;
        require!(
            data.len() == PACKET_SIZE && data.starts_with(Packet::DISCRIMINATOR),
            ErrorCode::NotFound
        );

        Ok(())
    }

    pub fn load<'a>(info: &'a AccountInfo) -> Result<Ref<'a, Packet>> {
        Self::check_account(info)?;
        Ok(Ref::map(info.try_borrow_data()?, |data| {
            bytemuck::from_bytes(&data[8..PACKET_SIZE])
        }))
    }

    pub fn load_mut<'a>(info: &'a AccountInfo) -> Result<RefMut<'a, Packet>> {
        Self::check_account(info)?;
        Ok(RefMut::map(info.try_borrow_mut_data()?, |data| {
            bytemuck::from_bytes_mut(&mut data[8..PACKET_SIZE])
        }))
    }

    /// Writes the discriminator into a freshly allocated (zeroed) account
    pub fn load_init<'a>(info: &'a AccountInfo) -> Result<RefMut<'a, Packet>> {
        require!(info.owner == &crate::ID, ErrorCode::NotFound);

        let mut data = info.try_borrow_mut_data()?;
        require!(data.len() == PACKET_SIZE, ErrorCode::NotFound);
        require!(
            data[..8].iter().all(|b| *b == 0),
            ErrorCode::DuplicatePacket
        );
        data[..8].copy_from_slice(Packet::DISCRIMINATOR);

        Ok(RefMut::map(data, |data| {
            bytemuck::from_bytes_mut(&mut data[8..PACKET_SIZE])
        }))
    }

    pub fn status(&self) -> Result<PacketStatus> {
        PacketStatus::try_from(self.status)
    }

    pub fn set_status(&mut self, status: PacketStatus) {
        self.status = status.into();
    }

    pub fn active_shares(&self) -> &[u64] {
        &self.shares[..self.total_count as usize]
    }

    pub fn is_claimed(&self, index: usize) -> bool {
        index < MAX_SHARES && self.claimed_mask & (1u64 << index) != 0
    }

    pub fn remaining_count(&self) -> u8 {
        self.total_count.saturating_sub(self.claimed_count)
    }

    /// Share index already paid to `identity`, if any
    pub fn claim_index_of(&self, identity: &Pubkey) -> Option<usize> {
        (0..self.total_count as usize)
            .find(|&i| self.is_claimed(i) && self.claimants[i] == *identity)
    }

    /// Marks share `index` as paid to `claimant` and returns its amount.
    /// Moves the packet to `Exhausted` when the last share goes.
    pub fn record_claim(&mut self, index: usize, claimant: Pubkey) -> Result<u64> {
        require!(
            index < self.total_count as usize && !self.is_claimed(index),
            ErrorCode::InvariantViolation
        );

        let amount = self.shares[index];

        self.claimed_mask |= 1u64 << index;
        self.claimants[index] = claimant;
        self.claimed_count = self
            .claimed_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        self.claimed_amount = self
            .claimed_amount
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;

        require!(
            self.claimed_amount <= self.total_amount,
            ErrorCode::InvariantViolation
        );

        if self.claimed_count == self.total_count {
            self.set_status(PacketStatus::Exhausted);
        }

        Ok(amount)
    }

    /// Sum of the shares nobody has claimed yet
    pub fn unclaimed_amount(&self) -> Result<u64> {
        self.active_shares()
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_claimed(*i))
            .try_fold(0u64, |acc, (_, share)| acc.checked_add(*share))
            .ok_or(error!(ErrorCode::MathOverflow))
    }

    /// Moves the packet to `Refunded` and returns the amount owed to the creator
    pub fn record_refund(&mut self) -> Result<u64> {
        let unclaimed = self.unclaimed_amount()?;
        require!(unclaimed > 0, ErrorCode::NothingToRefund);

        // Cross-check against the running total; both views must agree
        let expected = self
            .total_amount
            .checked_sub(self.claimed_amount)
            .ok_or(ErrorCode::MathUnderflow)?;
        require!(unclaimed == expected, ErrorCode::InvariantViolation);

        self.refunded_amount = unclaimed;
        self.set_status(PacketStatus::Refunded);

        Ok(unclaimed)
    }
}

// Compile-time size assertions to catch accidental struct changes
const _: () = assert!(std::mem::size_of::<ProtocolConfig>() == 80); // 88 - 8 (discriminator added by Anchor)

// Packet: See constants.rs for full breakdown = 2752
const _: () = assert!(std::mem::size_of::<Packet>() == 2744); // 2752 - 8 (discriminator added by Anchor)
