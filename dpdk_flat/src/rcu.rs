use std::os::raw::c_void;
use std::ptr::{null, NonNull};

use log::info;

use dpdk_flat_sys as sys;

use crate::errno::{check, last_error, RteError};

const CACHE_LINE: u32 = 64;

/// A grace-period token returned by [`Qsbr::start`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token(u64);

/// A quiescent-state-based reclamation tracker, owned by the native
/// library and backed by hugepage memory.
///
/// Writers retire an object, call [`Qsbr::start`], and free it once
/// [`Qsbr::check`] reports that every registered reader passed a
/// quiescent point — or use [`Qsbr::synchronize`] to block until then.
/// The reader-tracking algorithm itself is entirely the library's.
pub struct Qsbr {
    v: NonNull<sys::rte_rcu_qsbr>,
}

unsafe impl Send for Qsbr {}
unsafe impl Sync for Qsbr {}

impl Qsbr {
    /// Allocate and initialize a tracker for up to `max_threads`
    /// registered reader threads.
    pub fn new(max_threads: u32) -> Result<Qsbr, RteError> {
        let memsize = unsafe { sys::rte_rcu_qsbr_get_memsize(max_threads) };
        if memsize == 1 {
            // the documented error return, rte_errno holds the cause
            return Err(last_error());
        }
        let mem = unsafe { sys::rte_zmalloc(null(), memsize, CACHE_LINE) };
        let v = match NonNull::new(mem as *mut sys::rte_rcu_qsbr) {
            Some(v) => v,
            None => return Err(RteError(nix::libc::ENOMEM)),
        };
        if let Err(e) = check(unsafe { sys::rte_rcu_qsbr_init(v.as_ptr(), max_threads) }) {
            unsafe { sys::rte_free(v.as_ptr() as *mut c_void) };
            return Err(e);
        }
        info!("created QSBR tracker for {max_threads} readers");
        Ok(Qsbr { v })
    }

    /// Register a reader thread id. Ids are dense, `0..max_threads`.
    pub fn register(&self, thread_id: u32) -> Result<(), RteError> {
        check(unsafe { sys::rte_rcu_qsbr_thread_register(self.v.as_ptr(), thread_id) })
    }

    /// Remove a reader thread from tracking.
    pub fn unregister(&self, thread_id: u32) -> Result<(), RteError> {
        check(unsafe { sys::rte_rcu_qsbr_thread_unregister(self.v.as_ptr(), thread_id) })
    }

    /// Mark a registered reader as actively reading. Must precede the
    /// reader's first critical section after registration or offline.
    pub fn online(&self, thread_id: u32) {
        unsafe { sys::dpf_rcu_qsbr_thread_online(self.v.as_ptr(), thread_id) }
    }

    /// Mark a registered reader as not reading; writers stop waiting on
    /// it until it comes back online.
    pub fn offline(&self, thread_id: u32) {
        unsafe { sys::dpf_rcu_qsbr_thread_offline(self.v.as_ptr(), thread_id) }
    }

    /// Report a quiescent checkpoint for a reader: no references to
    /// shared objects are held across this call.
    pub fn quiescent(&self, thread_id: u32) {
        unsafe { sys::dpf_rcu_qsbr_quiescent(self.v.as_ptr(), thread_id) }
    }

    /// Begin a grace period after retiring an object.
    pub fn start(&self) -> Token {
        Token(unsafe { sys::dpf_rcu_qsbr_start(self.v.as_ptr()) })
    }

    /// True once every online reader has passed a quiescent point since
    /// `token` was issued. With `wait`, blocks until that happens.
    pub fn check(&self, token: Token, wait: bool) -> bool {
        unsafe { sys::dpf_rcu_qsbr_check(self.v.as_ptr(), token.0, wait as i32) != 0 }
    }

    /// Block until all online readers pass a quiescent point. Pass the
    /// calling reader's id when the caller is itself a registered
    /// reader, `None` otherwise.
    pub fn synchronize(&self, thread_id: Option<u32>) {
        let thread_id = thread_id.unwrap_or(sys::RTE_QSBR_THRID_INVALID);
        unsafe { sys::rte_rcu_qsbr_synchronize(self.v.as_ptr(), thread_id) }
    }
}

impl Drop for Qsbr {
    fn drop(&mut self) {
        unsafe { sys::rte_free(self.v.as_ptr() as *mut c_void) }
    }
}
