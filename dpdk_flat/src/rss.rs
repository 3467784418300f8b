use thiserror::Error;

use dpdk_flat_sys as sys;

/// Length in bytes of a Toeplitz RSS key.
pub const RSS_KEY_LEN: usize = sys::RTE_THASH_KEY_LEN;

/// The conventional 40-byte Toeplitz key, for deployments without a key
/// of their own.
pub const DEFAULT_RSS_KEY: [u8; RSS_KEY_LEN] = sys::DEFAULT_RSS_KEY;

/// Errors from the software RSS wrappers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RssError {
    /// The key is not exactly [`RSS_KEY_LEN`] bytes.
    #[error("RSS key is {0} bytes, expected {RSS_KEY_LEN}")]
    BadKeyLength(usize),
}

/// Toeplitz hash of a flow tuple in host byte order.
///
/// `tuple` is the flow fields (addresses, ports) packed as 32-bit words,
/// exactly as the native API takes them.
pub fn softrss(tuple: &[u32], key: &[u8]) -> Result<u32, RssError> {
    if key.len() != RSS_KEY_LEN {
        return Err(RssError::BadKeyLength(key.len()));
    }
    // the native prototype is historically non-const; hand it a copy
    let mut tuple = tuple.to_vec();
    Ok(unsafe { sys::dpf_softrss(tuple.as_mut_ptr(), tuple.len() as u32, key.as_ptr()) })
}

/// Toeplitz hash of a flow tuple already in network byte order, with a
/// byte-swapped key (the form NIC RSS uses on the wire).
pub fn softrss_be(tuple: &[u32], key: &[u8]) -> Result<u32, RssError> {
    if key.len() != RSS_KEY_LEN {
        return Err(RssError::BadKeyLength(key.len()));
    }
    let mut tuple = tuple.to_vec();
    Ok(unsafe { sys::dpf_softrss_be(tuple.as_mut_ptr(), tuple.len() as u32, key.as_ptr()) })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_key_is_full_length() {
        assert_eq!(DEFAULT_RSS_KEY.len(), RSS_KEY_LEN);
    }

    #[test]
    fn short_key_rejected() {
        assert_eq!(
            softrss(&[0x0a000001], &[0u8; 16]),
            Err(RssError::BadKeyLength(16))
        );
    }
}
