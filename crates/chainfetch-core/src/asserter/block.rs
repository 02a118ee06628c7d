use crate::error::AssertionError;
use crate::types::BlockIdentifier;

/// Block index must be non-negative and the hash non-empty.
pub fn block_identifier(block: Option<&BlockIdentifier>) -> Result<(), AssertionError> {
    let block = block.ok_or(AssertionError::IdentifierNil("BlockIdentifier"))?;

    if block.index < 0 {
        return Err(AssertionError::NegativeBlockIndex);
    }
    if block.hash.is_empty() {
        return Err(AssertionError::FieldMissing("BlockIdentifier.Hash"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_block() {
        assert_eq!(block_identifier(Some(&BlockIdentifier::new(0, "genesis"))), Ok(()));
    }

    #[test]
    fn nil_block() {
        assert_eq!(block_identifier(None), Err(AssertionError::IdentifierNil("BlockIdentifier")));
    }

    #[test]
    fn negative_index_checked_before_hash() {
        assert_eq!(
            block_identifier(Some(&BlockIdentifier::new(-1, ""))),
            Err(AssertionError::NegativeBlockIndex)
        );
    }

    #[test]
    fn missing_hash() {
        assert_eq!(
            block_identifier(Some(&BlockIdentifier::new(1, ""))),
            Err(AssertionError::FieldMissing("BlockIdentifier.Hash"))
        );
    }
}
