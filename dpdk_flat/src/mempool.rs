use std::os::raw::c_void;
use std::ptr::{null_mut, NonNull};

use log::info;
use thiserror::Error;

use dpdk_flat_sys as sys;

use crate::errno::{last_error, RteError};
use crate::names::{self, InvalidName};

/// Sizing and access-mode parameters for a raw object pool.
#[derive(Debug, Copy, Clone)]
pub struct MempoolConfig {
    /// Number of elements. The optimum is a power of two minus one.
    pub size: u32,
    /// Size in bytes of each element.
    pub elt_size: u32,
    /// Size of the per-core object cache; 0 disables caching.
    pub cache_size: u32,
    /// Only one thread returns objects at a time.
    pub single_producer: bool,
    /// Only one thread takes objects at a time.
    pub single_consumer: bool,
}

impl MempoolConfig {
    pub(crate) fn flags(&self) -> u32 {
        let mut flags = 0;
        if self.single_producer {
            flags |= sys::RTE_MEMPOOL_F_SP_PUT;
        }
        if self.single_consumer {
            flags |= sys::RTE_MEMPOOL_F_SC_GET;
        }
        flags
    }
}

/// Errors from mempool creation.
#[derive(Debug, Error)]
pub enum MempoolError {
    /// The requested name was rejected before reaching the library.
    #[error(transparent)]
    InvalidName(#[from] InvalidName),
    /// The library refused the pool.
    #[error("unable to create mempool: {0}")]
    Native(#[from] RteError),
}

/// A pre-allocated, per-core-cached pool of fixed-size objects, owned by
/// the native library.
pub struct Mempool {
    mp: NonNull<sys::rte_mempool>,
    owned: bool,
}

unsafe impl Send for Mempool {}
unsafe impl Sync for Mempool {}

impl Mempool {
    /// Create a pool of `config.size` raw objects on any NUMA socket.
    pub fn create(name: &str, config: MempoolConfig) -> Result<Mempool, MempoolError> {
        let cname = names::validate(name)?;
        let mp = unsafe {
            sys::rte_mempool_create(
                cname.as_ptr(),
                config.size,
                config.elt_size,
                config.cache_size,
                0,
                None,
                null_mut(),
                None,
                null_mut(),
                -1, // SOCKET_ID_ANY
                config.flags(),
            )
        };
        match NonNull::new(mp) {
            Some(mp) => {
                info!("created mempool {name} ({} x {} bytes)", config.size, config.elt_size);
                Ok(Mempool { mp, owned: true })
            }
            None => Err(MempoolError::Native(last_error())),
        }
    }

    /// Find an existing pool by name. The returned handle does not own
    /// the pool and will not free it on drop.
    pub fn lookup(name: &str) -> Result<Option<Mempool>, InvalidName> {
        let cname = names::validate(name)?;
        let mp = unsafe { sys::rte_mempool_lookup(cname.as_ptr()) };
        Ok(NonNull::new(mp).map(|mp| Mempool { mp, owned: false }))
    }

    /// Take one object. Fails with `ENOENT` when the pool is exhausted.
    pub fn get(&self) -> Result<*mut c_void, RteError> {
        let mut obj: *mut c_void = null_mut();
        crate::errno::check(unsafe { sys::dpf_mempool_get(self.mp.as_ptr(), &mut obj) })?;
        Ok(obj)
    }

    /// Fill `objs` completely, or take nothing.
    pub fn get_bulk(&self, objs: &mut [*mut c_void]) -> Result<(), RteError> {
        crate::errno::check(unsafe {
            sys::dpf_mempool_get_bulk(self.mp.as_ptr(), objs.as_mut_ptr(), objs.len() as u32)
        })
    }

    /// Return one object to the pool.
    ///
    /// The pointer must have come from this pool; the library does not
    /// check and neither does this wrapper.
    pub fn put(&self, obj: *mut c_void) {
        unsafe { sys::dpf_mempool_put(self.mp.as_ptr(), obj) }
    }

    /// Return a batch of objects to the pool.
    pub fn put_bulk(&self, objs: &[*mut c_void]) {
        unsafe { sys::dpf_mempool_put_bulk(self.mp.as_ptr(), objs.as_ptr(), objs.len() as u32) }
    }

    /// Objects currently available. Slow; not for the data path.
    pub fn avail_count(&self) -> u32 {
        unsafe { sys::rte_mempool_avail_count(self.mp.as_ptr()) }
    }

    /// Objects currently taken. Slow; not for the data path.
    pub fn in_use_count(&self) -> u32 {
        unsafe { sys::rte_mempool_in_use_count(self.mp.as_ptr()) }
    }

    /// True when every object is back in the pool.
    pub fn is_full(&self) -> bool {
        unsafe { sys::dpf_mempool_full(self.mp.as_ptr()) != 0 }
    }

    /// True when nothing is left to take.
    pub fn is_empty(&self) -> bool {
        unsafe { sys::dpf_mempool_empty(self.mp.as_ptr()) != 0 }
    }
}

impl Drop for Mempool {
    fn drop(&mut self) {
        if self.owned {
            info!("freeing mempool");
            unsafe { sys::rte_mempool_free(self.mp.as_ptr()) }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_flags_are_mpmc() {
        let config = MempoolConfig {
            size: 1023,
            elt_size: 64,
            cache_size: 32,
            single_producer: false,
            single_consumer: false,
        };
        assert_eq!(config.flags(), 0);
    }

    #[test]
    fn flag_bits_match_native_values() {
        let config = MempoolConfig {
            size: 1023,
            elt_size: 64,
            cache_size: 32,
            single_producer: true,
            single_consumer: true,
        };
        assert_eq!(config.flags(), 0x4 | 0x8);
    }
}
