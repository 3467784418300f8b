use std::ffi::CString;

use thiserror::Error;

/// Ways an object name (ring, mempool, hash table) can be invalid.
///
/// Names become memzone names inside the library; the library prefixes
/// them internally, so the usable length is shorter than the memzone
/// limit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidName {
    /// The name is empty.
    #[error("object name is empty")]
    Empty,
    /// The name is too long to fit a memzone name with the internal prefix.
    #[error("object name too long ({0} > {MAX_NAME_LEN} characters)")]
    TooLong(usize),
    /// The name contains non-ASCII characters.
    #[error("object name is not valid ASCII: {0}")]
    NotAscii(String),
    /// The name contains an interior NUL byte.
    #[error("object name contains a NUL byte")]
    NulByte,
}

/// Usable name length, leaving room for the library's internal prefixes.
pub(crate) const MAX_NAME_LEN: usize = 24;

pub(crate) fn validate(name: &str) -> Result<CString, InvalidName> {
    if name.is_empty() {
        return Err(InvalidName::Empty);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(InvalidName::TooLong(name.len()));
    }
    if !name.is_ascii() {
        return Err(InvalidName::NotAscii(name.to_string()));
    }
    CString::new(name).map_err(|_| InvalidName::NulByte)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert!(validate("rx_ring_0").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(validate(""), Err(InvalidName::Empty));
    }

    #[test]
    fn rejects_too_long() {
        let name = "a".repeat(MAX_NAME_LEN + 1);
        assert_eq!(validate(&name), Err(InvalidName::TooLong(25)));
    }

    #[test]
    fn accepts_max_length() {
        let name = "a".repeat(MAX_NAME_LEN);
        assert!(validate(&name).is_ok());
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(matches!(validate("ring_ø"), Err(InvalidName::NotAscii(_))));
    }

    #[test]
    fn rejects_interior_nul() {
        assert_eq!(validate("ring\0x"), Err(InvalidName::NulByte));
    }
}
