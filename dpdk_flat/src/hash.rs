use std::os::raw::c_void;
use std::ptr::NonNull;

use log::info;
use thiserror::Error;

use dpdk_flat_sys as sys;

use crate::errno::{last_error, RteError};
use crate::names::{self, InvalidName};

/// Parameters for a cuckoo hash table.
#[derive(Debug, Copy, Clone)]
pub struct HashConfig {
    /// Maximum number of keys the table will hold.
    pub entries: u32,
    /// Fixed length in bytes of every key.
    pub key_len: u32,
    /// Writers may run concurrently.
    pub multi_writer: bool,
    /// Readers and writers may run concurrently (internal RW lock).
    pub rw_concurrency: bool,
    /// Lock-free reader/writer concurrency; pair the table with an RCU
    /// tracker to reclaim deleted entries.
    pub rw_concurrency_lf: bool,
}

impl HashConfig {
    /// A table with `entries` slots for `key_len`-byte keys and no
    /// concurrency extras.
    pub fn new(entries: u32, key_len: u32) -> HashConfig {
        HashConfig {
            entries,
            key_len,
            multi_writer: false,
            rw_concurrency: false,
            rw_concurrency_lf: false,
        }
    }

    pub(crate) fn extra_flag(&self) -> u8 {
        let mut flag = 0;
        if self.multi_writer {
            flag |= sys::RTE_HASH_EXTRA_FLAGS_MULTI_WRITER_ADD;
        }
        if self.rw_concurrency {
            flag |= sys::RTE_HASH_EXTRA_FLAGS_RW_CONCURRENCY;
        }
        if self.rw_concurrency_lf {
            flag |= sys::RTE_HASH_EXTRA_FLAGS_RW_CONCURRENCY_LF;
        }
        flag
    }
}

/// Errors from hash table operations.
#[derive(Debug, Error)]
pub enum HashError {
    /// The requested name was rejected before reaching the library.
    #[error(transparent)]
    InvalidName(#[from] InvalidName),
    /// A key of the wrong length was handed to a fixed-key-length table.
    #[error("key is {got} bytes, table keys are {expected} bytes")]
    KeyLength {
        /// The table's fixed key length.
        expected: u32,
        /// The length actually supplied.
        got: u32,
    },
    /// The library reported an error.
    #[error(transparent)]
    Native(#[from] RteError),
}

pub(crate) fn check_key_len(expected: u32, got: usize) -> Result<(), HashError> {
    if got as u32 == expected {
        Ok(())
    } else {
        Err(HashError::KeyLength {
            expected,
            got: got as u32,
        })
    }
}

/// A cuckoo hash table mapping fixed-length byte keys to small integer
/// positions, owned by the native library.
///
/// The table stores keys only; callers use the returned position to
/// index their own value array, which is how the native API is meant to
/// be used.
pub struct HashTable {
    h: NonNull<sys::rte_hash>,
    key_len: u32,
}

unsafe impl Send for HashTable {}
unsafe impl Sync for HashTable {}

impl HashTable {
    /// Create a table on any NUMA socket with the library's default
    /// hash function.
    pub fn create(name: &str, config: HashConfig) -> Result<HashTable, HashError> {
        let cname = names::validate(name)?;
        let params = sys::rte_hash_parameters {
            name: cname.as_ptr(),
            entries: config.entries,
            reserved: 0,
            key_len: config.key_len,
            hash_func: None,
            hash_func_init_val: 0,
            socket_id: -1, // SOCKET_ID_ANY
            extra_flag: config.extra_flag(),
        };
        let h = unsafe { sys::rte_hash_create(&params) };
        match NonNull::new(h) {
            Some(h) => {
                info!("created hash table {name} ({} entries)", config.entries);
                Ok(HashTable {
                    h,
                    key_len: config.key_len,
                })
            }
            None => Err(HashError::Native(last_error())),
        }
    }

    /// Insert a key, returning its position.
    pub fn add(&mut self, key: &[u8]) -> Result<i32, HashError> {
        check_key_len(self.key_len, key.len())?;
        let ret = unsafe { sys::rte_hash_add_key(self.h.as_ptr(), key.as_ptr() as *const c_void) };
        if ret < 0 {
            Err(HashError::Native(RteError(-ret)))
        } else {
            Ok(ret)
        }
    }

    /// Look a key up; `None` when it is not in the table.
    pub fn lookup(&self, key: &[u8]) -> Result<Option<i32>, HashError> {
        check_key_len(self.key_len, key.len())?;
        let ret = unsafe { sys::rte_hash_lookup(self.h.as_ptr(), key.as_ptr() as *const c_void) };
        if ret >= 0 {
            Ok(Some(ret))
        } else if ret == -nix::libc::ENOENT {
            Ok(None)
        } else {
            Err(HashError::Native(RteError(-ret)))
        }
    }

    /// Remove a key, returning the position it held, or `None` when it
    /// was not in the table.
    pub fn delete(&mut self, key: &[u8]) -> Result<Option<i32>, HashError> {
        check_key_len(self.key_len, key.len())?;
        let ret = unsafe { sys::rte_hash_del_key(self.h.as_ptr(), key.as_ptr() as *const c_void) };
        if ret >= 0 {
            Ok(Some(ret))
        } else if ret == -nix::libc::ENOENT {
            Ok(None)
        } else {
            Err(HashError::Native(RteError(-ret)))
        }
    }

    /// Keys currently stored.
    pub fn count(&self) -> u32 {
        let ret = unsafe { sys::rte_hash_count(self.h.as_ptr()) };
        // only -EINVAL on a NULL handle, which this type rules out
        ret.max(0) as u32
    }

    /// Drop every key.
    pub fn reset(&mut self) {
        unsafe { sys::rte_hash_reset(self.h.as_ptr()) }
    }

    /// Compute the table's hash signature for a key without touching the
    /// table contents.
    pub fn hash(&self, key: &[u8]) -> Result<u32, HashError> {
        check_key_len(self.key_len, key.len())?;
        Ok(unsafe { sys::rte_hash_hash(self.h.as_ptr(), key.as_ptr() as *const c_void) })
    }
}

impl Drop for HashTable {
    fn drop(&mut self) {
        unsafe { sys::rte_hash_free(self.h.as_ptr()) }
    }
}

/// CRC32-C of `data`, seeded with `init_val` (hardware-accelerated where
/// the CPU allows).
pub fn crc32(data: &[u8], init_val: u32) -> u32 {
    unsafe { sys::dpf_hash_crc(data.as_ptr() as *const c_void, data.len() as u32, init_val) }
}

/// CRC32-C of a single byte.
pub fn crc32_u8(data: u8, init_val: u32) -> u32 {
    unsafe { sys::dpf_hash_crc_1byte(data, init_val) }
}

/// CRC32-C of two bytes.
pub fn crc32_u16(data: u16, init_val: u32) -> u32 {
    unsafe { sys::dpf_hash_crc_2byte(data, init_val) }
}

/// CRC32-C of four bytes.
pub fn crc32_u32(data: u32, init_val: u32) -> u32 {
    unsafe { sys::dpf_hash_crc_4byte(data, init_val) }
}

/// CRC32-C of eight bytes.
pub fn crc32_u64(data: u64, init_val: u32) -> u32 {
    unsafe { sys::dpf_hash_crc_8byte(data, init_val) }
}

/// Jenkins hash of an arbitrary byte string.
pub fn jhash(data: &[u8], initval: u32) -> u32 {
    unsafe { sys::dpf_jhash(data.as_ptr() as *const c_void, data.len() as u32, initval) }
}

/// Jenkins hash of a word array (faster than [`jhash`] on aligned data).
pub fn jhash_words(words: &[u32], initval: u32) -> u32 {
    unsafe { sys::dpf_jhash_32b(words.as_ptr(), words.len() as u32, initval) }
}

/// Jenkins hash of one word.
pub fn jhash_1word(a: u32, initval: u32) -> u32 {
    unsafe { sys::dpf_jhash_1word(a, initval) }
}

/// Jenkins hash of two words.
pub fn jhash_2words(a: u32, b: u32, initval: u32) -> u32 {
    unsafe { sys::dpf_jhash_2words(a, b, initval) }
}

/// Jenkins hash of three words.
pub fn jhash_3words(a: u32, b: u32, c: u32, initval: u32) -> u32 {
    unsafe { sys::dpf_jhash_3words(a, b, c, initval) }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn key_length_enforced() {
        assert!(check_key_len(16, 16).is_ok());
        let err = check_key_len(16, 4).unwrap_err();
        assert!(matches!(
            err,
            HashError::KeyLength {
                expected: 16,
                got: 4
            }
        ));
    }

    #[test]
    fn extra_flags_match_native_values() {
        let mut config = HashConfig::new(1024, 16);
        assert_eq!(config.extra_flag(), 0);
        config.multi_writer = true;
        config.rw_concurrency = true;
        assert_eq!(config.extra_flag(), 0x02 | 0x04);
        config.rw_concurrency = false;
        config.rw_concurrency_lf = true;
        assert_eq!(config.extra_flag(), 0x02 | 0x20);
    }
}
