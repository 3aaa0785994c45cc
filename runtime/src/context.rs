// context.rs
use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};

use crate::account::{AccountStore, LedgerAccount};
use crate::address::{derive_address, is_program_address, SYSTEM_PROGRAM_ID};
use crate::error::LedgerError;
use crate::ledger::Transaction;

/// What a program sees while one of its instructions executes.
///
/// Account access is limited to the keys the instruction declares, with the
/// signer and writable flags it declares. Writes go to the transaction's
/// working copy of the store.
pub struct InstructionContext<'a> {
    program_id: Pubkey,
    index: usize,
    transaction: &'a Transaction,
    store: &'a mut AccountStore,
    slot: u64,
    rent: Rent,
}

impl<'a> InstructionContext<'a> {
    pub fn new(
        transaction: &'a Transaction,
        index: usize,
        store: &'a mut AccountStore,
        slot: u64,
        rent: Rent,
    ) -> Result<Self> {
        let instruction = transaction
            .instructions
            .get(index)
            .ok_or(LedgerError::InstructionIndexOutOfBounds)?;
        Ok(Self {
            program_id: instruction.program_id,
            index,
            transaction,
            store,
            slot,
            rent,
        })
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn slot(&self) -> u64 {
        self.slot
    }

    pub fn rent(&self) -> &Rent {
        &self.rent
    }

    pub fn instruction_index(&self) -> usize {
        self.index
    }

    pub fn instruction(&self) -> &Instruction {
        &self.transaction.instructions[self.index]
    }

    /// Sibling instruction of the same transaction, like the instructions sysvar.
    pub fn load_instruction_at(&self, index: usize) -> Result<&Instruction> {
        self.transaction
            .instructions
            .get(index)
            .ok_or_else(|| error!(LedgerError::InstructionIndexOutOfBounds))
    }

    // ------------------------------------------------------------------
    // Declared accounts
    // ------------------------------------------------------------------

    /// Key of the `position`-th declared account
    pub fn account_key(&self, position: usize) -> Result<Pubkey> {
        self.instruction()
            .accounts
            .get(position)
            .map(|meta| meta.pubkey)
            .ok_or_else(|| error!(ErrorCode::AccountNotEnoughKeys))
    }

    fn meta(&self, key: &Pubkey) -> Result<&AccountMeta> {
        self.instruction()
            .accounts
            .iter()
            .find(|meta| meta.pubkey == *key)
            .ok_or_else(|| error!(LedgerError::AccountNotDeclared))
    }

    pub fn is_signer(&self, key: &Pubkey) -> bool {
        self.meta(key).map_or(false, |meta| meta.is_signer)
            && self.transaction.signers.contains(key)
    }

    pub fn require_signer(&self, key: &Pubkey) -> Result<()> {
        require!(self.is_signer(key), ErrorCode::AccountNotSigner);
        Ok(())
    }

    pub fn require_writable(&self, key: &Pubkey) -> Result<()> {
        require!(self.meta(key)?.is_writable, ErrorCode::AccountNotMutable);
        Ok(())
    }

    pub fn exists(&self, key: &Pubkey) -> Result<bool> {
        self.meta(key)?;
        Ok(self.store.contains(key))
    }

    pub fn lamports(&self, key: &Pubkey) -> Result<u64> {
        self.meta(key)?;
        Ok(self.store.lamports(key))
    }

    pub fn account(&self, key: &Pubkey) -> Result<&LedgerAccount> {
        self.meta(key)?;
        self.store
            .get(key)
            .ok_or_else(|| error!(ErrorCode::AccountNotInitialized))
    }

    /// Deserialize a declared account, checking its owner first.
    pub fn load<T: AccountDeserialize + Owner>(&self, key: &Pubkey) -> Result<T> {
        let account = self.account(key)?;
        require_keys_eq!(account.owner, T::owner(), ErrorCode::AccountOwnedByWrongProgram);
        T::try_deserialize(&mut account.data.as_slice())
    }

    /// Serialize `value` into an account owned by the executing program.
    pub fn store_account<T: AccountSerialize>(&mut self, key: &Pubkey, value: &T) -> Result<()> {
        self.require_writable(key)?;
        let program_id = self.program_id;

        let mut serialized = Vec::new();
        value.try_serialize(&mut serialized)?;

        let account = self
            .store
            .get_mut(key)
            .ok_or_else(|| error!(ErrorCode::AccountNotInitialized))?;
        require_keys_eq!(account.owner, program_id, LedgerError::ExternalAccountDataModified);
        require!(
            serialized.len() <= account.data.len(),
            ErrorCode::AccountDidNotSerialize
        );

        account.data[..serialized.len()].copy_from_slice(&serialized);
        account.data[serialized.len()..].fill(0);
        Ok(())
    }

    // ------------------------------------------------------------------
    // System program
    // ------------------------------------------------------------------

    /// Allocate a rent-exempt PDA of `space` bytes owned by the executing
    /// program. `seeds` exclude the bump; the canonical bump is returned.
    pub fn create_pda_account(
        &mut self,
        payer: &Pubkey,
        address: &Pubkey,
        seeds: &[&[u8]],
        space: usize,
    ) -> Result<u8> {
        let program_id = self.program_id;
        let (expected, bump) = derive_address(seeds, &program_id)?;
        require_keys_eq!(expected, *address, ErrorCode::ConstraintSeeds);
        self.require_signer(payer)?;
        self.require_writable(payer)?;
        self.require_writable(address)?;

        let existing = self.store.get(address).cloned();
        if let Some(account) = &existing {
            require!(account.is_system_wallet(), LedgerError::AccountAlreadyInUse);
        }

        let prefunded = existing.map_or(0, |account| account.lamports);
        let rent_exempt = self.rent.minimum_balance(space);
        let top_up = rent_exempt.saturating_sub(prefunded);
        if top_up > 0 {
            self.store.debit(payer, top_up)?;
        }

        let lamports = prefunded
            .checked_add(top_up)
            .ok_or(LedgerError::MathOverflow)?;
        self.store
            .insert(*address, LedgerAccount::new(lamports, space, program_id));
        Ok(bump)
    }

    /// Close a program account, sending every lamport to `receiver`.
    pub fn close_account(&mut self, key: &Pubkey, receiver: &Pubkey) -> Result<()> {
        self.require_writable(key)?;
        self.require_writable(receiver)?;
        let program_id = self.program_id;

        let account = self
            .store
            .remove(key)
            .ok_or_else(|| error!(ErrorCode::AccountNotInitialized))?;
        require_keys_eq!(account.owner, program_id, LedgerError::ExternalAccountDataModified);
        self.store.credit(receiver, account.lamports)
    }

    /// System transfer signed by `from`.
    pub fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        self.require_signer(from)?;
        self.system_transfer(from, to, amount)
    }

    /// System transfer out of a PDA of the executing program. `signer_seeds`
    /// include the bump.
    pub fn transfer_signed(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
        signer_seeds: &[&[u8]],
    ) -> Result<()> {
        require!(
            is_program_address(from, signer_seeds, &self.program_id),
            ErrorCode::ConstraintSeeds
        );
        self.system_transfer(from, to, amount)
    }

    fn system_transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        self.require_writable(from)?;
        self.require_writable(to)?;
        if let Some(account) = self.store.get(from) {
            require_keys_eq!(account.owner, SYSTEM_PROGRAM_ID, LedgerError::InvalidTransferSource);
            require!(account.data.is_empty(), LedgerError::InvalidTransferSource);
        }
        self.store.move_lamports(from, to, amount)
    }
}
