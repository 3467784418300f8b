use std::os::raw::c_void;
use std::ptr::{null, NonNull};

use dpdk_flat_sys as sys;

use crate::errno::RteError;

const CACHE_LINE: u32 = 64;

/// A hierarchical two-level bitmap, owned by the native library and
/// backed by hugepage memory.
///
/// `scan` walks set bits in slab-sized chunks with an internal cursor,
/// which is what makes this type useful for schedulers polling many
/// queues.
pub struct Bitmap {
    bmp: NonNull<sys::rte_bitmap>,
    mem: *mut c_void,
    n_bits: u32,
}

unsafe impl Send for Bitmap {}

impl Bitmap {
    /// Allocate a bitmap of `n_bits` bits, all clear. The library
    /// requires a non-zero multiple of 512 bits and rejects anything
    /// else with `EINVAL`.
    pub fn new(n_bits: u32) -> Result<Bitmap, RteError> {
        let footprint = unsafe { sys::dpf_bitmap_get_memory_footprint(n_bits) };
        if footprint == 0 {
            return Err(RteError(nix::libc::EINVAL));
        }
        let mem = unsafe { sys::rte_zmalloc(null(), footprint as usize, CACHE_LINE) };
        if mem.is_null() {
            return Err(RteError(nix::libc::ENOMEM));
        }
        let bmp = unsafe { sys::dpf_bitmap_init(n_bits, mem as *mut u8, footprint) };
        match NonNull::new(bmp) {
            Some(bmp) => Ok(Bitmap { bmp, mem, n_bits }),
            None => {
                unsafe { sys::rte_free(mem) };
                Err(RteError(nix::libc::EINVAL))
            }
        }
    }

    /// Number of bits in the map.
    pub fn len(&self) -> u32 {
        self.n_bits
    }

    /// True when the map holds zero bits (never, for a created map).
    pub fn is_empty(&self) -> bool {
        self.n_bits == 0
    }

    /// Set one bit.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is out of range; the native call does not
    /// bounds-check.
    pub fn set(&mut self, pos: u32) {
        assert!(pos < self.n_bits, "bit {pos} out of range");
        unsafe { sys::dpf_bitmap_set(self.bmp.as_ptr(), pos) }
    }

    /// Clear one bit.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is out of range.
    pub fn clear(&mut self, pos: u32) {
        assert!(pos < self.n_bits, "bit {pos} out of range");
        unsafe { sys::dpf_bitmap_clear(self.bmp.as_ptr(), pos) }
    }

    /// Test one bit.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is out of range.
    pub fn test(&self, pos: u32) -> bool {
        assert!(pos < self.n_bits, "bit {pos} out of range");
        unsafe { sys::dpf_bitmap_get(self.bmp.as_ptr(), pos) != 0 }
    }

    /// Advance the internal cursor to the next slab with a set bit and
    /// return its starting bit position and the 64-bit slab, or `None`
    /// when the whole map is clear.
    pub fn scan(&mut self) -> Option<(u32, u64)> {
        let mut pos = 0u32;
        let mut slab = 0u64;
        let found = unsafe { sys::dpf_bitmap_scan(self.bmp.as_ptr(), &mut pos, &mut slab) };
        if found != 0 {
            Some((pos, slab))
        } else {
            None
        }
    }

    /// Clear every bit and rewind the scan cursor.
    pub fn reset(&mut self) {
        unsafe { sys::dpf_bitmap_reset(self.bmp.as_ptr()) }
    }
}

impl Drop for Bitmap {
    fn drop(&mut self) {
        unsafe {
            sys::dpf_bitmap_free(self.bmp.as_ptr());
            sys::rte_free(self.mem);
        }
    }
}
