// ledger.rs
use std::collections::BTreeMap;

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use tracing::{debug, warn};

use crate::account::{AccountStore, LedgerAccount};
use crate::address::{ED25519_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::context::InstructionContext;
use crate::ed25519;
use crate::error::LedgerError;
use crate::token;

/// A program the ledger can execute.
pub trait Program {
    fn id(&self) -> Pubkey;

    fn process(&self, ctx: &mut InstructionContext<'_>, data: &[u8]) -> Result<()>;
}

/// Ordered instructions plus the keys that signed them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transaction {
    pub instructions: Vec<Instruction>,
    pub signers: Vec<Pubkey>,
}

impl Transaction {
    pub fn new(instructions: Vec<Instruction>, signers: &[Pubkey]) -> Self {
        Self {
            instructions,
            signers: signers.to_vec(),
        }
    }
}

/// Account store, slot clock and program registry.
pub struct Ledger {
    store: AccountStore,
    programs: BTreeMap<Pubkey, Box<dyn Program>>,
    slot: u64,
    rent: Rent,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            store: AccountStore::new(),
            programs: BTreeMap::new(),
            slot: 0,
            rent: Rent::default(),
        }
    }

    pub fn with_program<P: Program + 'static>(mut self, program: P) -> Self {
        self.register(program);
        self
    }

    pub fn register<P: Program + 'static>(&mut self, program: P) {
        debug!(program_id = %program.id(), "program registered");
        self.programs.insert(program.id(), Box::new(program));
    }

    pub fn slot(&self) -> u64 {
        self.slot
    }

    pub fn rent(&self) -> &Rent {
        &self.rent
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    pub fn account(&self, key: &Pubkey) -> Option<&LedgerAccount> {
        self.store.get(key)
    }

    pub fn balance(&self, key: &Pubkey) -> u64 {
        self.store.lamports(key)
    }

    /// Deserialize an account the way a client fetches it.
    pub fn load<T: AccountDeserialize>(&self, key: &Pubkey) -> Result<T> {
        let account = self
            .store
            .get(key)
            .ok_or_else(|| error!(ErrorCode::AccountNotInitialized))?;
        T::try_deserialize(&mut account.data.as_slice())
    }

    /// Credit lamports to a wallet outside of any transaction.
    pub fn fund(&mut self, key: &Pubkey, lamports: u64) -> Result<()> {
        self.store.credit(key, lamports)
    }

    // ------------------------------------------------------------------
    // SPL tokens
    // ------------------------------------------------------------------

    pub fn create_mint(&mut self, mint: &Pubkey, mint_authority: &Pubkey, decimals: u8) -> Result<()> {
        require!(!self.store.contains(mint), LedgerError::AccountAlreadyInUse);
        let data = token::mint_data(mint_authority, 0, decimals)?;
        let lamports = self.rent.minimum_balance(data.len());
        self.store.insert(
            *mint,
            LedgerAccount {
                lamports,
                owner: TOKEN_PROGRAM_ID,
                data,
            },
        );
        Ok(())
    }

    /// Mint into `owner`'s associated token account, creating it if needed.
    pub fn mint_to(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u64) -> Result<Pubkey> {
        let mint_account = self
            .store
            .get_mut(mint)
            .ok_or(LedgerError::InvalidMint)?;
        let mut mint_state = token::unpack_mint(&mint_account.data)?;
        mint_state.supply = mint_state
            .supply
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        mint_account.data = token::pack_mint(mint_state)?;

        let address = token::get_associated_token_address(owner, mint);
        let balance = self.token_balance(owner, mint).unwrap_or(0);
        let new_balance = balance.checked_add(amount).ok_or(LedgerError::MathOverflow)?;
        let data = token::token_account_data(mint, owner, new_balance)?;
        let lamports = self.rent.minimum_balance(data.len());
        self.store.insert(
            address,
            LedgerAccount {
                lamports,
                owner: TOKEN_PROGRAM_ID,
                data,
            },
        );
        Ok(address)
    }

    /// Balance of `owner`'s associated token account for `mint`.
    pub fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Option<u64> {
        let address = token::get_associated_token_address(owner, mint);
        let account = self.store.get(&address)?;
        token::unpack_token_account(&account.data)
            .ok()
            .map(|state| state.amount)
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Execute every instruction of `tx` in order and commit the result, or
    /// commit nothing if any instruction fails.
    pub fn process_transaction(&mut self, tx: &Transaction) -> Result<()> {
        self.slot += 1;
        require!(!tx.instructions.is_empty(), LedgerError::EmptyTransaction);

        match self.execute(tx) {
            Ok(store) => {
                self.store = store;
                debug!(slot = self.slot, instructions = tx.instructions.len(), "transaction committed");
                Ok(())
            }
            Err(err) => {
                warn!(slot = self.slot, error = %err, "transaction rejected");
                Err(err)
            }
        }
    }

    fn execute(&self, tx: &Transaction) -> Result<AccountStore> {
        // Precompiles are checked before any program runs.
        for (index, ix) in tx.instructions.iter().enumerate() {
            if ix.program_id == ED25519_PROGRAM_ID {
                ed25519::verify(&tx.instructions, index)?;
            }
        }

        let mut working = self.store.clone();
        for (index, ix) in tx.instructions.iter().enumerate() {
            if ix.program_id == ED25519_PROGRAM_ID {
                continue;
            }
            let program = self
                .programs
                .get(&ix.program_id)
                .ok_or(LedgerError::UnknownProgram)?;

            let mut ctx = InstructionContext::new(tx, index, &mut working, self.slot, self.rent.clone())?;
            program.process(&mut ctx, &ix.data).map_err(|err| {
                debug!(index, program_id = %ix.program_id, "instruction failed");
                err
            })?;
        }

        Ok(working)
    }
}
