use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::QuadraticFundingError;

/// Validate DAO name length
pub fn validate_dao_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > MAX_DAO_NAME_LEN {
        return Err(QuadraticFundingError::InvalidDaoName.into());
    }
    Ok(())
}

pub fn validate_metadata(metadata: &str) -> Result<()> {
    if metadata.len() > MAX_METADATA_LEN {
        return Err(QuadraticFundingError::MetadataTooLong.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dao_name_limits_are_in_bytes() {
        assert!(validate_dao_name("").is_err());
        assert!(validate_dao_name("a").is_ok());
        assert!(validate_dao_name(&"a".repeat(32)).is_ok());
        assert!(validate_dao_name(&"a".repeat(33)).is_err());
        // 11 three-byte characters
        assert!(validate_dao_name(&"€".repeat(11)).is_err());
    }

    #[test]
    fn metadata_may_be_empty_but_not_long() {
        assert!(validate_metadata("").is_ok());
        assert!(validate_metadata(&"x".repeat(200)).is_ok());
        assert!(validate_metadata(&"x".repeat(201)).is_err());
    }
}
