//! Account creation helpers for Mollusk tests
//!
//! NOTE: This is written for mollusk-svm 0.5.1 with solana-sdk 2.2
//! In 0.5.1, all imports come from solana_sdk::* (not modular crates like solana_pubkey)
//! Token accounts MUST have owner explicitly set to spl_token::id()

use {
    mollusk_svm::Mollusk,
    // 0.5.1: All types from solana_sdk, not modular crates
    solana_sdk::{
        account::Account, bpf_loader_upgradeable, program_pack::Pack, pubkey::Pubkey, rent::Rent,
        system_program,
    },
    spl_associated_token_account::{
        get_associated_token_address, get_associated_token_address_with_program_id,
    },
    spl_token::state::{Account as TokenAccount, AccountState, Mint},
};

/// Create a system-owned account with given lamports
pub fn system_account(lamports: u64) -> Account {
    Account {
        lamports,
        data: vec![],
        owner: system_program::id(),
        executable: false,
        rent_epoch: 0,
    }
}

/// Create an uninitialized account (for init)
pub fn uninitialized_account() -> Account {
    system_account(0)
}

/// Create a program-owned account with data
pub fn program_account(lamports: u64, data: Vec<u8>, owner: Pubkey) -> Account {
    Account {
        lamports,
        data,
        owner,
        executable: false,
        rent_epoch: 0,
    }
}

/// Create a mock program_data account for BPF upgradeable loader
/// This simulates the UpgradeableLoaderState::ProgramData layout
pub fn program_data_account(upgrade_authority: Pubkey) -> Account {
    // UpgradeableLoaderState::ProgramData layout:
    // - 4 bytes: discriminant (3 for ProgramData)
    // - 8 bytes: slot
    // - 1 byte: Option discriminant for upgrade_authority (1 = Some)
    // - 32 bytes: upgrade_authority pubkey
    let mut data = vec![0u8; 45];
    data[0] = 3; // ProgramData discriminant
    data[12] = 1; // Some(upgrade_authority)
    data[13..45].copy_from_slice(&upgrade_authority.to_bytes());

    Account {
        lamports: 1_000_000,
        data,
        owner: bpf_loader_upgradeable::id(),
        executable: false,
        rent_epoch: 0,
    }
}

/// Create a mint account
///
/// NOTE (0.5.1): Must explicitly set owner to spl_token::id()
pub fn mint_account(
    mint_authority: Option<Pubkey>,
    decimals: u8,
    supply: u64,
    rent: &Rent,
) -> Account {
    let mut data = vec![0u8; Mint::LEN];
    Mint::pack(
        Mint {
            mint_authority: mint_authority.into(),
            supply,
            decimals,
            is_initialized: true,
            freeze_authority: None.into(),
        },
        &mut data,
    )
    .unwrap();

    Account {
        lamports: rent.minimum_balance(Mint::LEN),
        data,
        owner: spl_token::id(),
        executable: false,
        rent_epoch: 0,
    }
}

fn pack_token_account(state: TokenAccount, rent: &Rent) -> Account {
    let mut data = vec![0u8; TokenAccount::LEN];
    TokenAccount::pack(state, &mut data).unwrap();

    Account {
        lamports: rent.minimum_balance(TokenAccount::LEN),
        data,
        // 0.5.1: MUST explicitly set owner to Token program
        owner: spl_token::id(),
        executable: false,
        rent_epoch: 0,
    }
}

/// Create a token account
pub fn token_account(mint: Pubkey, token_owner: Pubkey, amount: u64, rent: &Rent) -> Account {
    pack_token_account(
        TokenAccount {
            mint,
            owner: token_owner,
            amount,
            delegate: None.into(),
            state: AccountState::Initialized,
            is_native: None.into(),
            delegated_amount: 0,
            close_authority: None.into(),
        },
        rent,
    )
}

/// Create a token account that has approved `delegate` to move `allowance`
pub fn delegated_token_account(
    mint: Pubkey,
    token_owner: Pubkey,
    amount: u64,
    delegate: Pubkey,
    allowance: u64,
    rent: &Rent,
) -> Account {
    pack_token_account(
        TokenAccount {
            mint,
            owner: token_owner,
            amount,
            delegate: Some(delegate).into(),
            state: AccountState::Initialized,
            is_native: None.into(),
            delegated_amount: allowance,
            close_authority: None.into(),
        },
        rent,
    )
}

/// Create a frozen token account
pub fn frozen_token_account(mint: Pubkey, token_owner: Pubkey, amount: u64, rent: &Rent) -> Account {
    let mut account = token_account(mint, token_owner, amount, rent);
    let mut state = TokenAccount::unpack(&account.data).unwrap();
    state.state = AccountState::Frozen;
    TokenAccount::pack(state, &mut account.data).unwrap();
    account
}

/// Read the token balance out of a token account (extension data is ignored)
pub fn token_balance(account: &Account) -> u64 {
    TokenAccount::unpack(&account.data[..TokenAccount::LEN])
        .unwrap()
        .amount
}

pub const TOKEN_2022_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");

// Token-2022 extension layout: the base state padded to the token account
// length, one AccountType byte, then (u16 type, u16 length, value) entries
const ACCOUNT_TYPE_MINT: u8 = 1;
const ACCOUNT_TYPE_ACCOUNT: u8 = 2;
const EXTENSION_TRANSFER_FEE_CONFIG: u16 = 1;
const EXTENSION_TRANSFER_FEE_AMOUNT: u16 = 2;

fn push_extension(data: &mut Vec<u8>, extension_type: u16, value: &[u8]) {
    data.extend_from_slice(&extension_type.to_le_bytes());
    data.extend_from_slice(&(value.len() as u16).to_le_bytes());
    data.extend_from_slice(value);
}

/// Create a Token-2022 mint carrying a TransferFeeConfig extension.
///
/// The same fee applies to the older and newer epoch slots, so the
/// current epoch does not matter.
pub fn transfer_fee_mint_account(
    mint_authority: Option<Pubkey>,
    decimals: u8,
    supply: u64,
    transfer_fee_bps: u16,
    maximum_fee: u64,
    rent: &Rent,
) -> Account {
    let mut data = vec![0u8; Mint::LEN];
    Mint::pack(
        Mint {
            mint_authority: mint_authority.into(),
            supply,
            decimals,
            is_initialized: true,
            freeze_authority: None.into(),
        },
        &mut data,
    )
    .unwrap();
    data.resize(TokenAccount::LEN, 0);
    data.push(ACCOUNT_TYPE_MINT);

    // TransferFeeConfig: two authorities (None), withheld_amount,
    // then older and newer TransferFee { epoch, maximum_fee, basis_points }
    let mut config = Vec::with_capacity(108);
    config.extend_from_slice(&[0u8; 64]);
    config.extend_from_slice(&0u64.to_le_bytes());
    for _ in 0..2 {
        config.extend_from_slice(&0u64.to_le_bytes());
        config.extend_from_slice(&maximum_fee.to_le_bytes());
        config.extend_from_slice(&transfer_fee_bps.to_le_bytes());
    }
    push_extension(&mut data, EXTENSION_TRANSFER_FEE_CONFIG, &config);

    Account {
        lamports: rent.minimum_balance(data.len()),
        data,
        owner: TOKEN_2022_PROGRAM_ID,
        executable: false,
        rent_epoch: 0,
    }
}

/// Create a Token-2022 token account for a transfer-fee mint
pub fn transfer_fee_token_account(
    mint: Pubkey,
    token_owner: Pubkey,
    amount: u64,
    rent: &Rent,
) -> Account {
    let mut account = token_account(mint, token_owner, amount, rent);
    account.data.push(ACCOUNT_TYPE_ACCOUNT);
    push_extension(
        &mut account.data,
        EXTENSION_TRANSFER_FEE_AMOUNT,
        &0u64.to_le_bytes(),
    );
    account.lamports = rent.minimum_balance(account.data.len());
    account.owner = TOKEN_2022_PROGRAM_ID;
    account
}

/// Derive ATA address
pub fn derive_ata(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(wallet, mint)
}

/// Derive ATA address under a specific token program
pub fn derive_ata_with_program(wallet: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(wallet, mint, token_program)
}

/// Get rent from Mollusk
pub fn get_rent(mollusk: &Mollusk) -> Rent {
    mollusk.sysvars.rent.clone()
}

/// Create a system program account tuple for test setup
pub fn system_program_account() -> (Pubkey, Account) {
    (
        system_program::id(),
        Account {
            lamports: 1,
            data: vec![],
            owner: solana_sdk::native_loader::id(),
            executable: true,
            rent_epoch: 0,
        },
    )
}
