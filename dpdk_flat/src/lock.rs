//! Framework locks, for state shared with native threads.
//!
//! Pure-Rust state belongs behind `std::sync` or `parking_lot`; these
//! exist so both sides of the FFI boundary spin on the same lock words
//! with the same algorithms.

use std::cell::UnsafeCell;

use dpdk_flat_sys as sys;

/// Test-and-set spinlock.
pub struct RteSpinlock {
    inner: UnsafeCell<sys::rte_spinlock_t>,
}

unsafe impl Send for RteSpinlock {}
unsafe impl Sync for RteSpinlock {}

impl RteSpinlock {
    /// An unlocked spinlock.
    pub fn new() -> RteSpinlock {
        let lock = RteSpinlock {
            inner: UnsafeCell::new(sys::rte_spinlock_t::default()),
        };
        unsafe { sys::dpf_spinlock_init(lock.inner.get()) };
        lock
    }

    /// Spin until the lock is held; release by dropping the guard.
    pub fn lock(&self) -> SpinlockGuard<'_> {
        unsafe { sys::dpf_spinlock_lock(self.inner.get()) };
        SpinlockGuard { lock: self }
    }

    /// Take the lock if it is free.
    pub fn try_lock(&self) -> Option<SpinlockGuard<'_>> {
        if unsafe { sys::dpf_spinlock_trylock(self.inner.get()) } != 0 {
            Some(SpinlockGuard { lock: self })
        } else {
            None
        }
    }

    /// True while any thread holds the lock.
    pub fn is_locked(&self) -> bool {
        unsafe { sys::dpf_spinlock_is_locked(self.inner.get()) != 0 }
    }

    /// Pointer for handing the lock to native code.
    pub fn as_ptr(&self) -> *mut sys::rte_spinlock_t {
        self.inner.get()
    }
}

impl Default for RteSpinlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds an [`RteSpinlock`] until dropped.
pub struct SpinlockGuard<'a> {
    lock: &'a RteSpinlock,
}

impl Drop for SpinlockGuard<'_> {
    fn drop(&mut self) {
        unsafe { sys::dpf_spinlock_unlock(self.lock.inner.get()) }
    }
}

/// FIFO ticket lock: contending threads acquire in arrival order.
pub struct RteTicketlock {
    inner: UnsafeCell<sys::rte_ticketlock_t>,
}

unsafe impl Send for RteTicketlock {}
unsafe impl Sync for RteTicketlock {}

impl RteTicketlock {
    /// An unlocked ticket lock.
    pub fn new() -> RteTicketlock {
        let lock = RteTicketlock {
            inner: UnsafeCell::new(sys::rte_ticketlock_t::default()),
        };
        unsafe { sys::dpf_ticketlock_init(lock.inner.get()) };
        lock
    }

    /// Take a ticket and spin until it is served.
    pub fn lock(&self) -> TicketlockGuard<'_> {
        unsafe { sys::dpf_ticketlock_lock(self.inner.get()) };
        TicketlockGuard { lock: self }
    }

    /// Take the lock if nobody is waiting.
    pub fn try_lock(&self) -> Option<TicketlockGuard<'_>> {
        if unsafe { sys::dpf_ticketlock_trylock(self.inner.get()) } != 0 {
            Some(TicketlockGuard { lock: self })
        } else {
            None
        }
    }

    /// True while any thread holds the lock.
    pub fn is_locked(&self) -> bool {
        unsafe { sys::dpf_ticketlock_is_locked(self.inner.get()) != 0 }
    }

    /// Pointer for handing the lock to native code.
    pub fn as_ptr(&self) -> *mut sys::rte_ticketlock_t {
        self.inner.get()
    }
}

impl Default for RteTicketlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds an [`RteTicketlock`] until dropped.
pub struct TicketlockGuard<'a> {
    lock: &'a RteTicketlock,
}

impl Drop for TicketlockGuard<'_> {
    fn drop(&mut self) {
        unsafe { sys::dpf_ticketlock_unlock(self.lock.inner.get()) }
    }
}

/// Reader-writer spinlock.
pub struct RteRwLock {
    inner: UnsafeCell<sys::rte_rwlock_t>,
}

unsafe impl Send for RteRwLock {}
unsafe impl Sync for RteRwLock {}

impl RteRwLock {
    /// An unlocked reader-writer lock.
    pub fn new() -> RteRwLock {
        let lock = RteRwLock {
            inner: UnsafeCell::new(sys::rte_rwlock_t::default()),
        };
        unsafe { sys::dpf_rwlock_init(lock.inner.get()) };
        lock
    }

    /// Take a shared read lock.
    pub fn read(&self) -> RwLockReadGuard<'_> {
        unsafe { sys::dpf_rwlock_read_lock(self.inner.get()) };
        RwLockReadGuard { lock: self }
    }

    /// Take a shared read lock if no writer holds or wants the lock.
    pub fn try_read(&self) -> Option<RwLockReadGuard<'_>> {
        if unsafe { sys::dpf_rwlock_read_trylock(self.inner.get()) } == 0 {
            Some(RwLockReadGuard { lock: self })
        } else {
            None
        }
    }

    /// Take the exclusive write lock.
    pub fn write(&self) -> RwLockWriteGuard<'_> {
        unsafe { sys::dpf_rwlock_write_lock(self.inner.get()) };
        RwLockWriteGuard { lock: self }
    }

    /// Take the exclusive write lock if the lock is free.
    pub fn try_write(&self) -> Option<RwLockWriteGuard<'_>> {
        if unsafe { sys::dpf_rwlock_write_trylock(self.inner.get()) } == 0 {
            Some(RwLockWriteGuard { lock: self })
        } else {
            None
        }
    }

    /// Pointer for handing the lock to native code.
    pub fn as_ptr(&self) -> *mut sys::rte_rwlock_t {
        self.inner.get()
    }
}

impl Default for RteRwLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds a shared read lock until dropped.
pub struct RwLockReadGuard<'a> {
    lock: &'a RteRwLock,
}

impl Drop for RwLockReadGuard<'_> {
    fn drop(&mut self) {
        unsafe { sys::dpf_rwlock_read_unlock(self.lock.inner.get()) }
    }
}

/// Holds the exclusive write lock until dropped.
pub struct RwLockWriteGuard<'a> {
    lock: &'a RteRwLock,
}

impl Drop for RwLockWriteGuard<'_> {
    fn drop(&mut self) {
        unsafe { sys::dpf_rwlock_write_unlock(self.lock.inner.get()) }
    }
}

/// Sequence lock protecting data kept elsewhere: writers are serialized
/// by an internal spinlock, readers never block but must retry when a
/// write overlapped their read.
pub struct Seqlock {
    inner: UnsafeCell<sys::rte_seqlock_t>,
}

unsafe impl Send for Seqlock {}
unsafe impl Sync for Seqlock {}

impl Seqlock {
    /// A fresh sequence lock.
    pub fn new() -> Seqlock {
        let lock = Seqlock {
            inner: UnsafeCell::new(sys::rte_seqlock_t::default()),
        };
        unsafe { sys::dpf_seqlock_init(lock.inner.get()) };
        lock
    }

    /// Begin an optimistic read; pass the returned sequence number to
    /// [`Seqlock::read_retry`] after reading the protected data.
    pub fn read_begin(&self) -> u32 {
        unsafe { sys::dpf_seqlock_read_begin(self.inner.get()) }
    }

    /// True when a write overlapped the read section and the read must
    /// be retried.
    pub fn read_retry(&self, begin_sn: u32) -> bool {
        unsafe { sys::dpf_seqlock_read_retry(self.inner.get(), begin_sn) != 0 }
    }

    /// Serialize with other writers and mark the write section; release
    /// by dropping the guard.
    pub fn write_lock(&self) -> SeqlockWriteGuard<'_> {
        unsafe { sys::dpf_seqlock_write_lock(self.inner.get()) };
        SeqlockWriteGuard { lock: self }
    }

    /// Pointer for handing the lock to native code.
    pub fn as_ptr(&self) -> *mut sys::rte_seqlock_t {
        self.inner.get()
    }
}

impl Default for Seqlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the seqlock write side until dropped.
pub struct SeqlockWriteGuard<'a> {
    lock: &'a Seqlock,
}

impl Drop for SeqlockWriteGuard<'_> {
    fn drop(&mut self) {
        unsafe { sys::dpf_seqlock_write_unlock(self.lock.inner.get()) }
    }
}
