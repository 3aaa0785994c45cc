// instructions/resolve_bet.rs
use anchor_instruction_sysvar::Ed25519InstructionSignatures;
use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use ledger_runtime::{
    InstructionContext, ED25519_PROGRAM_ID, INSTRUCTIONS_SYSVAR_ID, SYSTEM_PROGRAM_ID,
};

use crate::constants::*;
use crate::error::*;
use crate::events::BetResolved;
use crate::state::*;
use crate::utils::*;
use crate::DiceInstruction;

/// Settle a bet with the house's ed25519 signature over the bet data.
///
/// The transaction's first instruction must be the native ed25519 verify
/// instruction carrying that same signature.
pub fn handler(
    ctx: &mut InstructionContext<'_>,
    sig: [u8; 64],
    roll_source: &dyn RollSource,
) -> Result<()> {
    let accounts = ResolveBet::try_accounts(ctx)?;

    let mut house: House = ctx.load(&accounts.house_state)?;
    require_keys_eq!(house.authority, accounts.house, DiceError::UnauthorizedHouse);

    let bet: Bet = ctx.load(&accounts.bet)?;
    require_keys_eq!(bet.player, accounts.player, DiceError::InvalidPlayer);
    let (expected_bet, _) = Bet::address(&accounts.vault, bet.seed)?;
    require_keys_eq!(expected_bet, accounts.bet, ErrorCode::ConstraintSeeds);

    verify_ed25519_signature(ctx, &accounts.house, &bet, &sig)?;

    let roll_result = roll_source.roll(&sig);
    let payout = if is_winning_roll(roll_result, bet.roll) {
        bet.potential_payout
    } else {
        0
    };

    if payout > 0 {
        let vault_bump = [house.vault_bump];
        let signer_seeds: &[&[u8]] = &[VAULT_SEED, accounts.house.as_ref(), &vault_bump];
        ctx.transfer_signed(&accounts.vault, &accounts.player, payout, signer_seeds)?;
        house.record_payout(payout)?;
    }

    house.release_bet(bet.potential_payout)?;
    ctx.store_account(&accounts.house_state, &house)?;

    ctx.close_account(&accounts.bet, &accounts.player)?;

    emit!(BetResolved {
        player: bet.player,
        seed: bet.seed,
        roll: bet.roll,
        roll_result,
        payout,
    });

    msg!("Bet {} resolved: rolled {} against {}", bet.seed, roll_result, bet.roll);
    if payout > 0 {
        msg!("Player {} won {} lamports", bet.player, payout);
    } else {
        msg!("House keeps {} lamports", bet.amount);
    }

    Ok(())
}

/// Check the verify instruction at index 0 covers this bet and this house.
pub fn verify_ed25519_signature(
    ctx: &InstructionContext<'_>,
    house: &Pubkey,
    bet: &Bet,
    sig: &[u8; 64],
) -> Result<()> {
    let ix = ctx
        .load_instruction_at(0)
        .map_err(|_| DiceError::Ed25519Program)?;

    require_keys_eq!(ix.program_id, ED25519_PROGRAM_ID, DiceError::Ed25519Program);
    require_eq!(ix.accounts.len(), 0, DiceError::Ed25519Accounts);

    let signatures = Ed25519InstructionSignatures::unpack(&ix.data)
        .map_err(|_| DiceError::Ed25519Signature)?
        .0;
    require_eq!(signatures.len(), 1, DiceError::Ed25519SignatureCount);

    let signature = &signatures[0];
    require!(signature.is_verifiable, DiceError::Ed25519Header);

    let signer = signature
        .public_key
        .as_ref()
        .ok_or(DiceError::Ed25519Pubkey)?;
    require_keys_eq!(
        Pubkey::new_from_array(signer.to_bytes()),
        *house,
        DiceError::Ed25519Pubkey
    );

    let signed = signature
        .signature
        .as_ref()
        .ok_or(DiceError::Ed25519Signature)?;
    require!(signed[..] == sig[..], DiceError::Ed25519Signature);

    let message = signature
        .message
        .as_deref()
        .ok_or(DiceError::Ed25519Message)?;
    require!(message == bet.to_slice()?.as_slice(), DiceError::Ed25519Message);

    Ok(())
}

/// Accounts, in instruction order
pub struct ResolveBet {
    pub house: Pubkey,
    /// Receives the payout and the bet's rent
    pub player: Pubkey,
    pub house_state: Pubkey,
    pub vault: Pubkey,
    pub bet: Pubkey,
}

impl ResolveBet {
    pub fn new(house: Pubkey, player: Pubkey, seed: u128) -> Result<Self> {
        let vault = House::vault_address(&house)?.0;
        Ok(Self {
            house,
            player,
            house_state: House::address(&house)?.0,
            vault,
            bet: Bet::address(&vault, seed)?.0,
        })
    }

    pub fn try_accounts(ctx: &InstructionContext<'_>) -> Result<Self> {
        let accounts = Self {
            house: ctx.account_key(0)?,
            player: ctx.account_key(1)?,
            house_state: ctx.account_key(2)?,
            vault: ctx.account_key(3)?,
            bet: ctx.account_key(4)?,
        };
        require_keys_eq!(ctx.account_key(5)?, INSTRUCTIONS_SYSVAR_ID, ErrorCode::ConstraintAddress);
        require_keys_eq!(ctx.account_key(6)?, SYSTEM_PROGRAM_ID, ErrorCode::InvalidProgramId);
        ctx.require_signer(&accounts.house)?;

        let (house_state, _) = House::address(&accounts.house)?;
        require_keys_eq!(house_state, accounts.house_state, ErrorCode::ConstraintSeeds);
        let (vault, _) = House::vault_address(&accounts.house)?;
        require_keys_eq!(vault, accounts.vault, ErrorCode::ConstraintSeeds);
        Ok(accounts)
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.house, true),
            AccountMeta::new(self.player, false),
            AccountMeta::new(self.house_state, false),
            AccountMeta::new(self.vault, false),
            AccountMeta::new(self.bet, false),
            AccountMeta::new_readonly(INSTRUCTIONS_SYSVAR_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ]
    }

    pub fn instruction(house: Pubkey, player: Pubkey, seed: u128, sig: [u8; 64]) -> Result<Instruction> {
        Ok(Instruction {
            program_id: crate::ID,
            accounts: Self::new(house, player, seed)?.to_account_metas(),
            data: DiceInstruction::ResolveBet { sig }.data()?,
        })
    }
}
