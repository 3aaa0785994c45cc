// token.rs
//! SPL token mints and accounts in their packed on-chain layout, so programs
//! can read them with `anchor_spl::token::{Mint, TokenAccount}`.

use anchor_lang::prelude::*;
use anchor_spl::token::spl_token;
use anchor_lang::solana_program::program_option::COption;
use anchor_lang::solana_program::program_pack::Pack;
use spl_token::state::{Account as SplTokenAccount, AccountState, Mint as SplMint};

use crate::error::LedgerError;

pub use anchor_spl::associated_token::get_associated_token_address;

pub fn mint_data(mint_authority: &Pubkey, supply: u64, decimals: u8) -> Result<Vec<u8>> {
    let mint = SplMint {
        mint_authority: COption::Some(*mint_authority),
        supply,
        decimals,
        is_initialized: true,
        freeze_authority: COption::None,
    };
    pack_mint(mint)
}

pub fn pack_mint(mint: SplMint) -> Result<Vec<u8>> {
    let mut data = vec![0; SplMint::LEN];
    SplMint::pack(mint, &mut data)?;
    Ok(data)
}

pub fn token_account_data(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Result<Vec<u8>> {
    let account = SplTokenAccount {
        mint: *mint,
        owner: *owner,
        amount,
        delegate: COption::None,
        state: AccountState::Initialized,
        is_native: COption::None,
        delegated_amount: 0,
        close_authority: COption::None,
    };
    let mut data = vec![0; SplTokenAccount::LEN];
    SplTokenAccount::pack(account, &mut data)?;
    Ok(data)
}

pub fn unpack_mint(data: &[u8]) -> Result<SplMint> {
    SplMint::unpack(data).map_err(|_| error!(LedgerError::InvalidMint))
}

pub fn unpack_token_account(data: &[u8]) -> Result<SplTokenAccount> {
    Ok(SplTokenAccount::unpack(data)?)
}
