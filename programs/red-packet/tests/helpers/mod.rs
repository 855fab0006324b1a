//! Test helpers for Red Packet Mollusk tests
//!
//! NOTE: This module is written for mollusk-svm 0.5.1 with solana-sdk 2.2
//! Key differences from 0.7.x:
//! - All imports from solana_sdk::* (not modular crates like solana_pubkey)
//! - Token accounts MUST have owner explicitly set to spl_token::id()

#![allow(dead_code)]

pub mod accounts;

pub use accounts::*;
pub use errors::*;
pub use fixtures::*;
pub use instructions::*;
pub use serialization::*;

use {
    mollusk_svm::{
        result::{InstructionResult, ProgramResult},
        Mollusk,
    },
    mollusk_svm_programs_token::{associated_token, token, token2022},
    solana_sdk::{account::Account, instruction::Instruction, pubkey::Pubkey},
    std::collections::HashMap,
};

/// Setup Mollusk for testing (without Token program)
///
/// Uses SBF_OUT_DIR to tell Mollusk where to find the program binary.
/// For Anchor workspace: tests are in programs/red-packet/tests,
/// binary is at workspace_root/target/deploy/
pub fn setup_mollusk() -> Mollusk {
    // From programs/red-packet/, go up 2 levels to workspace root
    let deploy_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent() // programs/
        .unwrap()
        .parent() // workspace root
        .unwrap()
        .join("target/deploy");

    std::env::set_var("SBF_OUT_DIR", deploy_dir);

    Mollusk::new(&instructions::PROGRAM_ID, "red_packet")
}

/// Setup Mollusk with Token and Associated Token programs for testing
///
/// This loads both SPL Token and ATA programs, enabling:
/// - Custody transfers (create_packet, claim_packet, refund_packet)
/// - Vault creation and closing (create_packet, close_packet)
pub fn setup_mollusk_with_token() -> Mollusk {
    let mut mollusk = setup_mollusk();
    token::add_program(&mut mollusk);
    associated_token::add_program(&mut mollusk);
    mollusk
}

/// Setup Mollusk with Token, Token-2022 and Associated Token programs
pub fn setup_mollusk_with_token_2022() -> Mollusk {
    let mut mollusk = setup_mollusk_with_token();
    token2022::add_program(&mut mollusk);
    mollusk
}

/// Sets the clock Mollusk hands to the program
pub fn set_unix_timestamp(mollusk: &mut Mollusk, unix_timestamp: i64) {
    mollusk.sysvars.clock.unix_timestamp = unix_timestamp;
}

/// Keyed account state carried across a sequence of instructions.
///
/// Mollusk runs one instruction at a time; the ledger tests chain
/// claims and refunds, so each result is written back here.
#[derive(Default)]
pub struct AccountStore {
    accounts: HashMap<Pubkey, Account>,
}

impl AccountStore {
    pub fn new(accounts: Vec<(Pubkey, Account)>) -> Self {
        Self {
            accounts: accounts.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, key: Pubkey, account: Account) {
        self.accounts.insert(key, account);
    }

    pub fn get(&self, key: &Pubkey) -> &Account {
        self.accounts
            .get(key)
            .unwrap_or_else(|| panic!("account {key} missing from store"))
    }

    /// Accounts referenced by `instruction`, in meta order, without duplicates
    pub fn accounts_for(&self, instruction: &Instruction) -> Vec<(Pubkey, Account)> {
        let mut keyed: Vec<(Pubkey, Account)> = Vec::new();
        for meta in &instruction.accounts {
            if keyed.iter().any(|(key, _)| *key == meta.pubkey) {
                continue;
            }
            keyed.push((meta.pubkey, self.get(&meta.pubkey).clone()));
        }
        keyed
    }

    /// Runs `instruction` and commits the resulting accounts only when it succeeded
    pub fn process(&mut self, mollusk: &Mollusk, instruction: &Instruction) -> InstructionResult {
        let accounts = self.accounts_for(instruction);
        let result = mollusk.process_instruction(instruction, &accounts);

        if matches!(result.program_result, ProgramResult::Success) {
            for (key, account) in &result.resulting_accounts {
                self.accounts.insert(*key, account.clone());
            }
        }

        result
    }
}

/// Panics unless the instruction succeeded
pub fn assert_success(result: &InstructionResult) {
    assert!(
        matches!(result.program_result, ProgramResult::Success),
        "expected success, got {:?}",
        result.program_result
    );
}

/// Panics unless the instruction failed with the program's custom `code`
pub fn assert_error(result: &InstructionResult, code: ErrorCode) {
    let expected = program_error(code);
    assert!(
        matches!(&result.program_result, ProgramResult::Failure(err) if *err == expected),
        "expected {:?}, got {:?}",
        expected,
        result.program_result
    );
}
