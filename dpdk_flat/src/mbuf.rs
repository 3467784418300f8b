use std::os::raw::c_void;
use std::ptr::NonNull;
use std::slice;

use log::info;
use thiserror::Error;

use dpdk_flat_sys as sys;

use crate::errno::{last_error, RteError};
use crate::names::{self, InvalidName};

/// Errors from mbuf manipulation. Each variant maps one native sentinel
/// (NULL or a negative return); no extra checking happens on this side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MbufError {
    /// The headroom cannot absorb the requested prepend.
    #[error("not enough headroom in packet buffer")]
    NotEnoughHeadroom,
    /// The tailroom cannot absorb the requested append.
    #[error("not enough tailroom in packet buffer")]
    NotEnoughTailroom,
    /// The buffer holds fewer data bytes than the requested cut.
    #[error("packet buffer not long enough")]
    NotLongEnough,
    /// Chaining would exceed the maximum segment count.
    #[error("chain would exceed the segment limit")]
    TooManySegments,
    /// A return code the library does not document.
    #[error("undocumented mbuf error: {0}")]
    Unknown(i32),
}

/// Errors from pktmbuf pool creation.
#[derive(Debug, Error)]
pub enum PktmbufPoolError {
    /// The requested name was rejected before reaching the library.
    #[error(transparent)]
    InvalidName(#[from] InvalidName),
    /// The library refused the pool.
    #[error("unable to create pktmbuf pool: {0}")]
    Native(#[from] RteError),
}

/// A mempool specialized for packet buffers.
pub struct PktmbufPool {
    mp: NonNull<sys::rte_mempool>,
}

unsafe impl Send for PktmbufPool {}
unsafe impl Sync for PktmbufPool {}

impl PktmbufPool {
    /// Create a pool of `n` packet buffers on any NUMA socket, each with
    /// `data_room` bytes of buffer space (headroom included). Pass
    /// [`sys::RTE_MBUF_DEFAULT_BUF_SIZE`] unless you know better.
    pub fn create(
        name: &str,
        n: u32,
        cache_size: u32,
        data_room: u16,
    ) -> Result<PktmbufPool, PktmbufPoolError> {
        let cname = names::validate(name)?;
        let mp = unsafe {
            sys::rte_pktmbuf_pool_create(
                cname.as_ptr(),
                n,
                cache_size,
                0,
                data_room,
                -1, // SOCKET_ID_ANY
            )
        };
        match NonNull::new(mp) {
            Some(mp) => {
                info!("created pktmbuf pool {name} ({n} mbufs)");
                Ok(PktmbufPool { mp })
            }
            None => Err(PktmbufPoolError::Native(last_error())),
        }
    }

    /// Allocate one packet buffer, reset and ready for data.
    /// Fails with `ENOENT` when the pool is exhausted.
    pub fn alloc(&self) -> Result<Mbuf, RteError> {
        let m = unsafe { sys::dpf_pktmbuf_alloc(self.mp.as_ptr()) };
        match NonNull::new(m) {
            Some(raw) => Ok(Mbuf { raw }),
            None => Err(RteError(nix::libc::ENOENT)),
        }
    }

    /// Allocate a batch of packet buffers, all or nothing.
    pub fn alloc_bulk(&self, count: u32) -> Result<Vec<Mbuf>, RteError> {
        let mut raw: Vec<*mut sys::rte_mbuf> = vec![std::ptr::null_mut(); count as usize];
        let ret = unsafe { sys::dpf_pktmbuf_alloc_bulk(self.mp.as_ptr(), raw.as_mut_ptr(), count) };
        crate::errno::check(ret)?;
        // all pointers are valid once the bulk call reports success
        Ok(raw
            .into_iter()
            .map(|m| Mbuf {
                raw: unsafe { NonNull::new_unchecked(m) },
            })
            .collect())
    }

    /// Buffer space per mbuf, headroom included.
    pub fn data_room_size(&self) -> u16 {
        unsafe { sys::dpf_pktmbuf_data_room_size(self.mp.as_ptr()) }
    }

    /// Application-private bytes reserved per mbuf.
    pub fn priv_size(&self) -> u16 {
        unsafe { sys::dpf_pktmbuf_priv_size(self.mp.as_ptr()) }
    }

    /// Mbufs currently back in the pool. Slow; not for the data path.
    pub fn avail_count(&self) -> u32 {
        unsafe { sys::rte_mempool_avail_count(self.mp.as_ptr()) }
    }
}

impl Drop for PktmbufPool {
    fn drop(&mut self) {
        info!("freeing pktmbuf pool");
        unsafe { sys::rte_mempool_free(self.mp.as_ptr()) }
    }
}

/// An owned, possibly chained, reference-counted packet buffer.
///
/// Dropping it returns every segment to its pool (honoring the
/// reference counts); passing ownership to native code that frees it
/// must go through [`Mbuf::into_raw`] to avoid a double free.
pub struct Mbuf {
    raw: NonNull<sys::rte_mbuf>,
}

unsafe impl Send for Mbuf {}

impl Mbuf {
    /// Take ownership of a raw mbuf pointer.
    ///
    /// # Safety
    ///
    /// `raw` must point to a valid mbuf this code is allowed to own; the
    /// buffer will be freed on drop.
    pub unsafe fn from_raw(raw: *mut sys::rte_mbuf) -> Option<Mbuf> {
        NonNull::new(raw).map(|raw| Mbuf { raw })
    }

    /// Give up ownership and return the raw pointer, e.g. to hand the
    /// buffer to a transmit path that frees it natively.
    pub fn into_raw(self) -> *mut sys::rte_mbuf {
        let ptr = self.raw.as_ptr();
        std::mem::forget(self);
        ptr
    }

    /// Total bytes across all segments.
    pub fn pkt_len(&self) -> u32 {
        unsafe { sys::dpf_pktmbuf_pkt_len(self.raw.as_ptr()) }
    }

    /// Bytes in the first segment.
    pub fn data_len(&self) -> u16 {
        unsafe { sys::dpf_pktmbuf_data_len(self.raw.as_ptr()) }
    }

    /// Unused bytes before the data in the first segment.
    pub fn headroom(&self) -> u16 {
        unsafe { sys::dpf_pktmbuf_headroom(self.raw.as_ptr()) }
    }

    /// Unused bytes after the data in the last segment.
    pub fn tailroom(&self) -> u16 {
        unsafe { sys::dpf_pktmbuf_tailroom(self.raw.as_ptr()) }
    }

    /// Data of the first segment.
    pub fn data(&self) -> &[u8] {
        unsafe {
            let ptr = sys::dpf_pktmbuf_mtod(self.raw.as_ptr()) as *const u8;
            slice::from_raw_parts(ptr, self.data_len() as usize)
        }
    }

    /// Mutable data of the first segment.
    pub fn data_mut(&mut self) -> &mut [u8] {
        unsafe {
            let ptr = sys::dpf_pktmbuf_mtod(self.raw.as_ptr()) as *mut u8;
            slice::from_raw_parts_mut(ptr, self.data_len() as usize)
        }
    }

    /// Grow the data area into the headroom and return the new front.
    pub fn prepend(&mut self, len: u16) -> Result<&mut [u8], MbufError> {
        let ret = unsafe { sys::dpf_pktmbuf_prepend(self.raw.as_ptr(), len) };
        if ret.is_null() {
            Err(MbufError::NotEnoughHeadroom)
        } else {
            Ok(self.data_mut())
        }
    }

    /// Grow the data area into the tailroom and return the whole data
    /// slice of the first segment.
    pub fn append(&mut self, len: u16) -> Result<&mut [u8], MbufError> {
        let ret = unsafe { sys::dpf_pktmbuf_append(self.raw.as_ptr(), len) };
        if ret.is_null() {
            Err(MbufError::NotEnoughTailroom)
        } else {
            Ok(self.data_mut())
        }
    }

    /// Cut `len` bytes from the front of the data area.
    pub fn trim_front(&mut self, len: u16) -> Result<(), MbufError> {
        let ret = unsafe { sys::dpf_pktmbuf_adj(self.raw.as_ptr(), len) };
        if ret.is_null() {
            Err(MbufError::NotLongEnough)
        } else {
            Ok(())
        }
    }

    /// Cut `len` bytes from the end of the data area.
    pub fn trim(&mut self, len: u16) -> Result<(), MbufError> {
        match unsafe { sys::dpf_pktmbuf_trim(self.raw.as_ptr(), len) } {
            0 => Ok(()),
            -1 => Err(MbufError::NotLongEnough),
            ret => Err(MbufError::Unknown(ret)),
        }
    }

    /// Attach `tail` after this buffer's last segment. On success the
    /// chain owns the tail; on failure the tail is handed back.
    pub fn chain(&mut self, tail: Mbuf) -> Result<(), (MbufError, Mbuf)> {
        match unsafe { sys::dpf_pktmbuf_chain(self.raw.as_ptr(), tail.raw.as_ptr()) } {
            0 => {
                std::mem::forget(tail);
                Ok(())
            }
            ret if ret == -nix::libc::EOVERFLOW => Err((MbufError::TooManySegments, tail)),
            ret => Err((MbufError::Unknown(ret), tail)),
        }
    }

    /// True when all data sits in the first segment.
    pub fn is_contiguous(&self) -> bool {
        unsafe { sys::dpf_pktmbuf_is_contiguous(self.raw.as_ptr()) != 0 }
    }

    /// Coalesce a chained packet into its first segment.
    pub fn linearize(&mut self) -> Result<(), MbufError> {
        match unsafe { sys::dpf_pktmbuf_linearize(self.raw.as_ptr()) } {
            0 => Ok(()),
            -1 => Err(MbufError::NotEnoughTailroom),
            ret => Err(MbufError::Unknown(ret)),
        }
    }

    /// Copy `buf.len()` bytes starting at `offset` into `buf`, following
    /// segment boundaries. Returns `None` when the packet is shorter
    /// than `offset + buf.len()`.
    pub fn read_into(&self, offset: u32, buf: &mut [u8]) -> Option<()> {
        let len = buf.len() as u32;
        let ret = unsafe {
            sys::dpf_pktmbuf_read(
                self.raw.as_ptr(),
                offset,
                len,
                buf.as_mut_ptr() as *mut c_void,
            )
        };
        if ret.is_null() {
            return None;
        }
        // When the range is contiguous the library hands back an internal
        // pointer instead of filling the caller's buffer.
        if ret != buf.as_ptr() as *const c_void {
            unsafe {
                std::ptr::copy_nonoverlapping(ret as *const u8, buf.as_mut_ptr(), buf.len());
            }
        }
        Some(())
    }

    /// Current reference count of the first segment.
    pub fn refcnt(&self) -> u16 {
        unsafe { sys::dpf_mbuf_refcnt_read(self.raw.as_ptr()) }
    }

    /// Add `delta` to the reference count and return the new value.
    pub fn refcnt_update(&mut self, delta: i16) -> u16 {
        unsafe { sys::dpf_mbuf_refcnt_update(self.raw.as_ptr(), delta) }
    }

    /// Reset lengths, offsets and flags as a freshly allocated buffer.
    pub fn reset(&mut self) {
        unsafe { sys::dpf_pktmbuf_reset(self.raw.as_ptr()) }
    }
}

impl Drop for Mbuf {
    fn drop(&mut self) {
        unsafe { sys::dpf_pktmbuf_free(self.raw.as_ptr()) }
    }
}

impl AsRef<[u8]> for Mbuf {
    fn as_ref(&self) -> &[u8] {
        self.data()
    }
}

impl AsMut<[u8]> for Mbuf {
    fn as_mut(&mut self) -> &mut [u8] {
        self.data_mut()
    }
}
