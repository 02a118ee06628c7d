use std::collections::HashSet;

use crate::error::AssertionError;
use crate::types::NodeError;

/// A node error needs a non-negative code and a message.
pub fn error(err: Option<&NodeError>) -> Result<(), AssertionError> {
    let err = err.ok_or(AssertionError::IdentifierNil("Error"))?;

    if err.code < 0 {
        return Err(AssertionError::NegativeCode);
    }
    if err.message.is_empty() {
        return Err(AssertionError::FieldMissing("Error.Message"));
    }
    Ok(())
}

/// Checks every entry of an error catalog; codes must be unique.
///
/// Duplicates are reported for the first repeated code in input order.
pub fn errors(errs: &[NodeError]) -> Result<(), AssertionError> {
    let mut seen = HashSet::with_capacity(errs.len());
    for err in errs {
        error(Some(err))?;
        if !seen.insert(err.code) {
            return Err(AssertionError::DuplicateErrorCode(err.code));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_cases() {
        let cases: Vec<(&str, Option<NodeError>, Result<(), AssertionError>)> = vec![
            ("valid error", Some(NodeError::new(12, "signature invalid")), Ok(())),
            ("nil error", None, Err(AssertionError::IdentifierNil("Error"))),
            (
                "negative code",
                Some(NodeError::new(-1, "signature invalid")),
                Err(AssertionError::NegativeCode),
            ),
            (
                "empty message",
                Some(NodeError::new(0, "")),
                Err(AssertionError::FieldMissing("Error.Message")),
            ),
        ];

        for (name, input, expected) in cases {
            assert_eq!(error(input.as_ref()), expected, "case: {name}");
        }
    }

    #[test]
    fn distinct_codes_pass() {
        let errs = vec![NodeError::new(0, "error 1"), NodeError::new(1, "error 2")];
        assert_eq!(errors(&errs), Ok(()));
    }

    #[test]
    fn duplicate_codes_fail() {
        let errs = vec![NodeError::new(0, "error 1"), NodeError::new(0, "error 2")];
        assert_eq!(errors(&errs), Err(AssertionError::DuplicateErrorCode(0)));
    }

    #[test]
    fn first_duplicate_in_input_order_wins() {
        let errs = vec![
            NodeError::new(3, "a"),
            NodeError::new(1, "b"),
            NodeError::new(1, "c"),
            NodeError::new(3, "d"),
        ];
        assert_eq!(errors(&errs), Err(AssertionError::DuplicateErrorCode(1)));
    }

    #[test]
    fn invalid_entry_in_catalog() {
        let errs = vec![NodeError::new(0, "ok"), NodeError::new(1, "")];
        assert_eq!(errors(&errs), Err(AssertionError::FieldMissing("Error.Message")));
    }

    #[test]
    fn empty_catalog_passes() {
        assert_eq!(errors(&[]), Ok(()));
    }
}
