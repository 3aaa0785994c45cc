// account.rs
use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::address::SYSTEM_PROGRAM_ID;
use crate::error::LedgerError;

/// Lamports, owner and raw data of one address.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerAccount {
    pub lamports: u64,
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

impl LedgerAccount {
    /// Plain wallet account owned by the system program
    pub fn system(lamports: u64) -> Self {
        Self {
            lamports,
            owner: SYSTEM_PROGRAM_ID,
            data: Vec::new(),
        }
    }

    /// Zeroed data account of `space` bytes
    pub fn new(lamports: u64, space: usize, owner: Pubkey) -> Self {
        Self {
            lamports,
            owner,
            data: vec![0; space],
        }
    }

    pub fn is_system_wallet(&self) -> bool {
        self.owner == SYSTEM_PROGRAM_ID && self.data.is_empty()
    }
}

/// Every account on the ledger, keyed by address.
#[derive(Clone, Debug, Default)]
pub struct AccountStore {
    accounts: BTreeMap<Pubkey, LedgerAccount>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &Pubkey) -> Option<&LedgerAccount> {
        self.accounts.get(key)
    }

    pub fn get_mut(&mut self, key: &Pubkey) -> Option<&mut LedgerAccount> {
        self.accounts.get_mut(key)
    }

    pub fn contains(&self, key: &Pubkey) -> bool {
        self.accounts.contains_key(key)
    }

    pub fn insert(&mut self, key: Pubkey, account: LedgerAccount) -> Option<LedgerAccount> {
        self.accounts.insert(key, account)
    }

    pub fn remove(&mut self, key: &Pubkey) -> Option<LedgerAccount> {
        self.accounts.remove(key)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Pubkey, &LedgerAccount)> {
        self.accounts.iter()
    }

    /// Lamports held at `key`; missing accounts hold nothing.
    pub fn lamports(&self, key: &Pubkey) -> u64 {
        self.accounts.get(key).map_or(0, |account| account.lamports)
    }

    /// Add lamports, creating a system wallet if the address is empty.
    pub fn credit(&mut self, key: &Pubkey, amount: u64) -> Result<()> {
        let account = self
            .accounts
            .entry(*key)
            .or_insert_with(|| LedgerAccount::system(0));
        account.lamports = account
            .lamports
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        Ok(())
    }

    /// Remove lamports. A system wallet drained to zero stops existing.
    pub fn debit(&mut self, key: &Pubkey, amount: u64) -> Result<()> {
        let account = self
            .accounts
            .get_mut(key)
            .ok_or(LedgerError::InsufficientFunds)?;
        account.lamports = account
            .lamports
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds)?;

        if account.lamports == 0 && account.is_system_wallet() {
            self.accounts.remove(key);
        }
        Ok(())
    }

    /// Move lamports between two addresses.
    pub fn move_lamports(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        if from == to {
            require!(self.lamports(from) >= amount, LedgerError::InsufficientFunds);
            return Ok(());
        }
        self.debit(from, amount)?;
        self.credit(to, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_creates_system_wallet() {
        let mut store = AccountStore::new();
        let key = Pubkey::new_unique();

        store.credit(&key, 500).unwrap();

        let account = store.get(&key).unwrap();
        assert_eq!(account.lamports, 500);
        assert!(account.is_system_wallet());
    }

    #[test]
    fn drained_wallet_is_removed() {
        let mut store = AccountStore::new();
        let key = Pubkey::new_unique();
        store.credit(&key, 10).unwrap();

        store.debit(&key, 10).unwrap();

        assert!(!store.contains(&key));
        assert_eq!(store.lamports(&key), 0);
    }

    #[test]
    fn drained_data_account_survives() {
        let mut store = AccountStore::new();
        let key = Pubkey::new_unique();
        store.insert(key, LedgerAccount::new(10, 16, Pubkey::new_unique()));

        store.debit(&key, 10).unwrap();

        assert!(store.contains(&key));
    }

    #[test]
    fn overdraft_is_rejected() {
        let mut store = AccountStore::new();
        let from = Pubkey::new_unique();
        let to = Pubkey::new_unique();
        store.credit(&from, 5).unwrap();

        assert!(store.move_lamports(&from, &to, 6).is_err());
        assert_eq!(store.lamports(&from), 5);
        assert_eq!(store.lamports(&to), 0);
    }
}
