use std::os::raw::{c_int, c_void};
use std::ptr::NonNull;

use log::info;
use thiserror::Error;

use dpdk_flat_sys as sys;

use crate::errno::{last_error, RteError};
use crate::names::{self, InvalidName};

/// Producer/consumer access modes and sizing behavior for a new ring.
///
/// The defaults give a multi-producer/multi-consumer ring, matching the
/// native default.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RingFlags {
    /// Only one thread enqueues at a time.
    pub single_producer: bool,
    /// Only one thread dequeues at a time.
    pub single_consumer: bool,
    /// Usable capacity is exactly the requested count instead of the
    /// next power of two minus one.
    pub exact_size: bool,
}

impl RingFlags {
    pub(crate) fn bits(self) -> u32 {
        let mut flags = 0;
        if self.single_producer {
            flags |= sys::RING_F_SP_ENQ;
        }
        if self.single_consumer {
            flags |= sys::RING_F_SC_DEQ;
        }
        if self.exact_size {
            flags |= sys::RING_F_EXACT_SZ;
        }
        flags
    }
}

/// Errors from ring creation.
#[derive(Debug, Error)]
pub enum RingError {
    /// The requested name was rejected before reaching the library.
    #[error(transparent)]
    InvalidName(#[from] InvalidName),
    /// The library refused the ring (bad count, duplicate name, no memory).
    #[error("unable to create ring: {0}")]
    Native(#[from] RteError),
}

/// A lock-free fixed-capacity circular queue of raw pointers, owned by
/// the native library.
///
/// The multi-producer/multi-consumer algorithm, and every thread-safety
/// property that comes with it, is the library's; this type only manages
/// the object's lifetime and forwards operations.
pub struct Ring {
    ring: NonNull<sys::rte_ring>,
    owned: bool,
}

unsafe impl Send for Ring {}
unsafe impl Sync for Ring {}

impl Ring {
    /// Create a ring on any NUMA socket. `count` must be a power of two
    /// unless `exact_size` is set; the library enforces this.
    pub fn create(name: &str, count: u32, flags: RingFlags) -> Result<Ring, RingError> {
        let cname = names::validate(name)?;
        let ring = unsafe {
            sys::rte_ring_create(
                cname.as_ptr(),
                count,
                -1, // SOCKET_ID_ANY
                flags.bits(),
            )
        };
        match NonNull::new(ring) {
            Some(ring) => {
                info!("created ring {name} (count {count})");
                Ok(Ring { ring, owned: true })
            }
            None => Err(RingError::Native(last_error())),
        }
    }

    /// Find an existing ring by name. The returned handle does not own
    /// the ring and will not free it on drop.
    pub fn lookup(name: &str) -> Result<Option<Ring>, InvalidName> {
        let cname = names::validate(name)?;
        let ring = unsafe { sys::rte_ring_lookup(cname.as_ptr()) };
        Ok(NonNull::new(ring).map(|ring| Ring { ring, owned: false }))
    }

    /// Enqueue one pointer. Fails with `ENOBUFS` when the ring is full.
    pub fn enqueue(&self, obj: *mut c_void) -> Result<(), RteError> {
        crate::errno::check(unsafe { sys::dpf_ring_enqueue(self.ring.as_ptr(), obj) })
    }

    /// Dequeue one pointer, or `None` when the ring is empty.
    pub fn dequeue(&self) -> Option<*mut c_void> {
        let mut obj: *mut c_void = std::ptr::null_mut();
        let ret = unsafe { sys::dpf_ring_dequeue(self.ring.as_ptr(), &mut obj) };
        if ret == 0 {
            Some(obj)
        } else {
            None
        }
    }

    /// Enqueue all of `objs`, or none of them. Returns the remaining
    /// free space on success.
    pub fn enqueue_bulk(&self, objs: &[*mut c_void]) -> Result<u32, RteError> {
        let mut free_space = 0;
        let n = unsafe {
            sys::dpf_ring_enqueue_bulk(
                self.ring.as_ptr(),
                objs.as_ptr(),
                objs.len() as u32,
                &mut free_space,
            )
        };
        if n == objs.len() as u32 {
            Ok(free_space)
        } else {
            Err(RteError(nix::libc::ENOBUFS))
        }
    }

    /// Enqueue as many of `objs` as fit; returns how many were taken.
    pub fn enqueue_burst(&self, objs: &[*mut c_void]) -> u32 {
        unsafe {
            sys::dpf_ring_enqueue_burst(
                self.ring.as_ptr(),
                objs.as_ptr(),
                objs.len() as u32,
                std::ptr::null_mut(),
            )
        }
    }

    /// Fill `objs` completely, or take nothing. Returns the number of
    /// entries still available on success.
    pub fn dequeue_bulk(&self, objs: &mut [*mut c_void]) -> Result<u32, RteError> {
        let mut available = 0;
        let n = unsafe {
            sys::dpf_ring_dequeue_bulk(
                self.ring.as_ptr(),
                objs.as_mut_ptr(),
                objs.len() as u32,
                &mut available,
            )
        };
        if n == objs.len() as u32 {
            Ok(available)
        } else {
            Err(RteError(nix::libc::ENOENT))
        }
    }

    /// Dequeue up to `objs.len()` pointers; returns how many landed in
    /// the front of `objs`.
    pub fn dequeue_burst(&self, objs: &mut [*mut c_void]) -> u32 {
        unsafe {
            sys::dpf_ring_dequeue_burst(
                self.ring.as_ptr(),
                objs.as_mut_ptr(),
                objs.len() as u32,
                std::ptr::null_mut(),
            )
        }
    }

    /// Entries currently queued.
    pub fn count(&self) -> u32 {
        unsafe { sys::dpf_ring_count(self.ring.as_ptr()) }
    }

    /// Free entries remaining.
    pub fn free_count(&self) -> u32 {
        unsafe { sys::dpf_ring_free_count(self.ring.as_ptr()) }
    }

    /// True when no more entries fit.
    pub fn is_full(&self) -> bool {
        unsafe { sys::dpf_ring_full(self.ring.as_ptr()) != 0 }
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        unsafe { sys::dpf_ring_empty(self.ring.as_ptr()) != 0 }
    }

    /// Size of the internal storage (a power of two).
    pub fn size(&self) -> u32 {
        unsafe { sys::dpf_ring_get_size(self.ring.as_ptr()) }
    }

    /// Usable capacity.
    pub fn capacity(&self) -> u32 {
        unsafe { sys::dpf_ring_get_capacity(self.ring.as_ptr()) }
    }

    /// Drop all queued entries. Not safe to run concurrently with
    /// producers or consumers; the library documents the same caveat.
    pub fn reset(&self) {
        unsafe { sys::rte_ring_reset(self.ring.as_ptr()) }
    }

    /// Bytes the library would allocate for a ring of `count` entries,
    /// or the native error for an invalid count.
    pub fn memsize(count: u32) -> Result<usize, RteError> {
        let ret = unsafe { sys::rte_ring_get_memsize(count as std::os::raw::c_uint) };
        if ret < 0 {
            Err(RteError(-(ret as c_int)))
        } else {
            Ok(ret as usize)
        }
    }
}

impl Drop for Ring {
    fn drop(&mut self) {
        if self.owned {
            unsafe { sys::rte_ring_free(self.ring.as_ptr()) }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_flags_are_mpmc() {
        assert_eq!(RingFlags::default().bits(), 0);
    }

    #[test]
    fn flag_bits_match_native_values() {
        let flags = RingFlags {
            single_producer: true,
            single_consumer: true,
            exact_size: true,
        };
        assert_eq!(flags.bits(), 0x1 | 0x2 | 0x4);
    }

    #[test]
    fn sp_only() {
        let flags = RingFlags {
            single_producer: true,
            ..Default::default()
        };
        assert_eq!(flags.bits(), 0x1);
    }
}
