// ed25519.rs
//! Native ed25519 signature verification instruction.
//!
//! Data layout matches the Solana precompile: a signature count, one padding
//! byte, one 14-byte offsets record per signature, then the referenced bytes.
//! An instruction index of `u16::MAX` means "this instruction's own data".

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};

use crate::address::ED25519_PROGRAM_ID;
use crate::error::LedgerError;

pub const PUBKEY_SERIALIZED_SIZE: usize = 32;
pub const SIGNATURE_SERIALIZED_SIZE: usize = 64;
pub const SIGNATURE_OFFSETS_SERIALIZED_SIZE: usize = 14;
pub const SIGNATURE_OFFSETS_START: usize = 2;
pub const DATA_START: usize = SIGNATURE_OFFSETS_SERIALIZED_SIZE + SIGNATURE_OFFSETS_START;

/// Refers to the data of the instruction carrying the offsets
pub const CURRENT_INSTRUCTION: u16 = u16::MAX;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ed25519SignatureOffsets {
    pub signature_offset: u16,
    pub signature_instruction_index: u16,
    pub public_key_offset: u16,
    pub public_key_instruction_index: u16,
    pub message_data_offset: u16,
    pub message_data_size: u16,
    pub message_instruction_index: u16,
}

impl Ed25519SignatureOffsets {
    pub fn unpack(bytes: &[u8]) -> Option<Self> {
        let field = |i: usize| -> Option<u16> {
            bytes
                .get(i * 2..i * 2 + 2)
                .map(|b| u16::from_le_bytes([b[0], b[1]]))
        };
        Some(Self {
            signature_offset: field(0)?,
            signature_instruction_index: field(1)?,
            public_key_offset: field(2)?,
            public_key_instruction_index: field(3)?,
            message_data_offset: field(4)?,
            message_data_size: field(5)?,
            message_instruction_index: field(6)?,
        })
    }

    pub fn pack_into(&self, out: &mut Vec<u8>) {
        for value in [
            self.signature_offset,
            self.signature_instruction_index,
            self.public_key_offset,
            self.public_key_instruction_index,
            self.message_data_offset,
            self.message_data_size,
            self.message_instruction_index,
        ] {
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}

/// Build a verify instruction carrying one inline signature of `message`.
pub fn new_ed25519_instruction(signing_key: &SigningKey, message: &[u8]) -> Result<Instruction> {
    let signature = signing_key.sign(message).to_bytes();
    let public_key = signing_key.verifying_key().to_bytes();
    new_ed25519_instruction_with_signature(&public_key, &signature, message)
}

/// Build a verify instruction from an already computed signature.
pub fn new_ed25519_instruction_with_signature(
    public_key: &[u8; PUBKEY_SERIALIZED_SIZE],
    signature: &[u8; SIGNATURE_SERIALIZED_SIZE],
    message: &[u8],
) -> Result<Instruction> {
    let public_key_offset = DATA_START;
    let signature_offset = public_key_offset + PUBKEY_SERIALIZED_SIZE;
    let message_data_offset = signature_offset + SIGNATURE_SERIALIZED_SIZE;

    let to_u16 = |value: usize| u16::try_from(value).map_err(|_| LedgerError::InvalidEd25519Instruction);
    let offsets = Ed25519SignatureOffsets {
        signature_offset: to_u16(signature_offset)?,
        signature_instruction_index: CURRENT_INSTRUCTION,
        public_key_offset: to_u16(public_key_offset)?,
        public_key_instruction_index: CURRENT_INSTRUCTION,
        message_data_offset: to_u16(message_data_offset)?,
        message_data_size: to_u16(message.len())?,
        message_instruction_index: CURRENT_INSTRUCTION,
    };

    let mut data = Vec::with_capacity(message_data_offset + message.len());
    data.push(1);
    data.push(0);
    offsets.pack_into(&mut data);
    data.extend_from_slice(public_key);
    data.extend_from_slice(signature);
    data.extend_from_slice(message);

    Ok(Instruction {
        program_id: ED25519_PROGRAM_ID,
        accounts: Vec::new(),
        data,
    })
}

/// Run the precompile for the verify instruction at `current_index`.
pub fn verify(instructions: &[Instruction], current_index: usize) -> Result<()> {
    let data = instructions
        .get(current_index)
        .map(|ix| ix.data.as_slice())
        .ok_or(LedgerError::InstructionIndexOutOfBounds)?;

    let count = offsets_count(data)?;
    if count == 0 && data.len() > SIGNATURE_OFFSETS_START {
        return err!(LedgerError::InvalidEd25519Instruction);
    }

    for offsets in read_offsets(data, count)? {
        let source = |index: u16| instruction_data(instructions, data, index);

        let signature = slice_at(
            source(offsets.signature_instruction_index)?,
            offsets.signature_offset,
            SIGNATURE_SERIALIZED_SIZE,
        )?;
        let public_key = slice_at(
            source(offsets.public_key_instruction_index)?,
            offsets.public_key_offset,
            PUBKEY_SERIALIZED_SIZE,
        )?;
        let message = slice_at(
            source(offsets.message_instruction_index)?,
            offsets.message_data_offset,
            offsets.message_data_size as usize,
        )?;

        let signature = Signature::from_slice(signature)
            .map_err(|_| LedgerError::InvalidEd25519Instruction)?;
        let public_key = <[u8; PUBKEY_SERIALIZED_SIZE]>::try_from(public_key)
            .map_err(|_| LedgerError::InvalidEd25519Instruction)?;
        let verifying_key = VerifyingKey::from_bytes(&public_key)
            .map_err(|_| LedgerError::Ed25519VerificationFailed)?;

        verifying_key
            .verify_strict(message, &signature)
            .map_err(|_| LedgerError::Ed25519VerificationFailed)?;
    }

    Ok(())
}

fn instruction_data<'a>(
    instructions: &'a [Instruction],
    current: &'a [u8],
    index: u16,
) -> Result<&'a [u8]> {
    if index == CURRENT_INSTRUCTION {
        return Ok(current);
    }
    instructions
        .get(index as usize)
        .map(|ix| ix.data.as_slice())
        .ok_or_else(|| error!(LedgerError::InvalidEd25519Instruction))
}

fn offsets_count(data: &[u8]) -> Result<usize> {
    require!(
        data.len() >= SIGNATURE_OFFSETS_START,
        LedgerError::InvalidEd25519Instruction
    );
    Ok(data[0] as usize)
}

fn read_offsets(data: &[u8], count: usize) -> Result<Vec<Ed25519SignatureOffsets>> {
    let end = count
        .checked_mul(SIGNATURE_OFFSETS_SERIALIZED_SIZE)
        .and_then(|len| len.checked_add(SIGNATURE_OFFSETS_START))
        .ok_or(LedgerError::InvalidEd25519Instruction)?;
    require!(data.len() >= end, LedgerError::InvalidEd25519Instruction);

    data[SIGNATURE_OFFSETS_START..end]
        .chunks_exact(SIGNATURE_OFFSETS_SERIALIZED_SIZE)
        .map(|chunk| {
            Ed25519SignatureOffsets::unpack(chunk)
                .ok_or_else(|| error!(LedgerError::InvalidEd25519Instruction))
        })
        .collect()
}

fn slice_at(data: &[u8], offset: u16, len: usize) -> Result<&[u8]> {
    let start = offset as usize;
    start
        .checked_add(len)
        .and_then(|end| data.get(start..end))
        .ok_or_else(|| error!(LedgerError::InvalidEd25519Instruction))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    #[test]
    fn inline_layout_matches_native_offsets() {
        let key = house_key();
        let ix = new_ed25519_instruction(&key, b"bet data").unwrap();

        assert_eq!(ix.program_id, ED25519_PROGRAM_ID);
        assert!(ix.accounts.is_empty());
        assert_eq!(ix.data[0], 1);
        assert_eq!(&ix.data[16..48], key.verifying_key().as_bytes());
        assert_eq!(&ix.data[112..], b"bet data");
    }

    #[test]
    fn valid_signature_verifies() {
        let ix = new_ed25519_instruction(&house_key(), b"message").unwrap();

        assert!(verify(&[ix], 0).is_ok());
    }

    #[test]
    fn tampered_message_fails_verification() {
        let mut ix = new_ed25519_instruction(&house_key(), b"message").unwrap();
        let last = ix.data.len() - 1;
        ix.data[last] ^= 0xff;

        assert!(verify(&[ix], 0).is_err());
    }

    #[test]
    fn truncated_data_is_malformed() {
        let mut ix = new_ed25519_instruction(&house_key(), b"message").unwrap();
        ix.data.truncate(40);

        assert!(verify(&[ix], 0).is_err());
    }

    #[test]
    fn signature_may_live_in_a_sibling_instruction() {
        let key = house_key();
        let carrier = new_ed25519_instruction(&key, b"message").unwrap();
        let mut ix = carrier.clone();
        // read the signature from instruction 0 instead of inline
        ix.data[4..6].copy_from_slice(&0u16.to_le_bytes());

        assert!(verify(&[carrier, ix.clone()], 1).is_ok());

        ix.data[4..6].copy_from_slice(&7u16.to_le_bytes());
        assert!(verify(&[ix], 0).is_err());
    }
}
