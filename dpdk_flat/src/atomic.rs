use std::cell::UnsafeCell;

use dpdk_flat_sys as sys;

/// A 32-bit counter with the framework's atomic operation set.
///
/// [`std::sync::atomic`] is the right tool for pure-Rust state; this
/// type exists for counters that native code also touches, where both
/// sides must agree on the operation set.
pub struct RteAtomic32 {
    inner: UnsafeCell<sys::rte_atomic32_t>,
}

unsafe impl Send for RteAtomic32 {}
unsafe impl Sync for RteAtomic32 {}

impl RteAtomic32 {
    /// A counter starting at `value`.
    pub fn new(value: i32) -> RteAtomic32 {
        let v = RteAtomic32 {
            inner: UnsafeCell::new(sys::rte_atomic32_t::default()),
        };
        unsafe {
            sys::dpf_atomic32_init(v.inner.get());
            sys::dpf_atomic32_set(v.inner.get(), value);
        }
        v
    }

    /// Pointer for handing the counter to native code.
    pub fn as_ptr(&self) -> *mut sys::rte_atomic32_t {
        self.inner.get()
    }

    /// Atomic read.
    pub fn read(&self) -> i32 {
        unsafe { sys::dpf_atomic32_read(self.inner.get()) }
    }

    /// Atomic write.
    pub fn set(&self, value: i32) {
        unsafe { sys::dpf_atomic32_set(self.inner.get(), value) }
    }

    /// Atomic add.
    pub fn add(&self, inc: i32) {
        unsafe { sys::dpf_atomic32_add(self.inner.get(), inc) }
    }

    /// Atomic subtract.
    pub fn sub(&self, dec: i32) {
        unsafe { sys::dpf_atomic32_sub(self.inner.get(), dec) }
    }

    /// Atomic increment.
    pub fn inc(&self) {
        unsafe { sys::dpf_atomic32_inc(self.inner.get()) }
    }

    /// Atomic decrement.
    pub fn dec(&self) {
        unsafe { sys::dpf_atomic32_dec(self.inner.get()) }
    }

    /// Atomic add returning the new value.
    pub fn add_return(&self, inc: i32) -> i32 {
        unsafe { sys::dpf_atomic32_add_return(self.inner.get(), inc) }
    }

    /// Atomic subtract returning the new value.
    pub fn sub_return(&self, dec: i32) -> i32 {
        unsafe { sys::dpf_atomic32_sub_return(self.inner.get(), dec) }
    }

    /// Increment and report whether the counter reached zero.
    pub fn inc_and_test(&self) -> bool {
        unsafe { sys::dpf_atomic32_inc_and_test(self.inner.get()) != 0 }
    }

    /// Decrement and report whether the counter reached zero.
    pub fn dec_and_test(&self) -> bool {
        unsafe { sys::dpf_atomic32_dec_and_test(self.inner.get()) != 0 }
    }

    /// Set to 1 if currently 0; true on success.
    pub fn test_and_set(&self) -> bool {
        unsafe { sys::dpf_atomic32_test_and_set(self.inner.get()) != 0 }
    }

    /// Reset to 0.
    pub fn clear(&self) {
        unsafe { sys::dpf_atomic32_clear(self.inner.get()) }
    }
}

/// A 64-bit counter with the framework's atomic operation set.
pub struct RteAtomic64 {
    inner: UnsafeCell<sys::rte_atomic64_t>,
}

unsafe impl Send for RteAtomic64 {}
unsafe impl Sync for RteAtomic64 {}

impl RteAtomic64 {
    /// A counter starting at `value`.
    pub fn new(value: i64) -> RteAtomic64 {
        let v = RteAtomic64 {
            inner: UnsafeCell::new(sys::rte_atomic64_t::default()),
        };
        unsafe {
            sys::dpf_atomic64_init(v.inner.get());
            sys::dpf_atomic64_set(v.inner.get(), value);
        }
        v
    }

    /// Pointer for handing the counter to native code.
    pub fn as_ptr(&self) -> *mut sys::rte_atomic64_t {
        self.inner.get()
    }

    /// Atomic read.
    pub fn read(&self) -> i64 {
        unsafe { sys::dpf_atomic64_read(self.inner.get()) }
    }

    /// Atomic write.
    pub fn set(&self, value: i64) {
        unsafe { sys::dpf_atomic64_set(self.inner.get(), value) }
    }

    /// Atomic add.
    pub fn add(&self, inc: i64) {
        unsafe { sys::dpf_atomic64_add(self.inner.get(), inc) }
    }

    /// Atomic subtract.
    pub fn sub(&self, dec: i64) {
        unsafe { sys::dpf_atomic64_sub(self.inner.get(), dec) }
    }

    /// Atomic increment.
    pub fn inc(&self) {
        unsafe { sys::dpf_atomic64_inc(self.inner.get()) }
    }

    /// Atomic decrement.
    pub fn dec(&self) {
        unsafe { sys::dpf_atomic64_dec(self.inner.get()) }
    }

    /// Atomic add returning the new value.
    pub fn add_return(&self, inc: i64) -> i64 {
        unsafe { sys::dpf_atomic64_add_return(self.inner.get(), inc) }
    }

    /// Atomic subtract returning the new value.
    pub fn sub_return(&self, dec: i64) -> i64 {
        unsafe { sys::dpf_atomic64_sub_return(self.inner.get(), dec) }
    }

    /// Increment and report whether the counter reached zero.
    pub fn inc_and_test(&self) -> bool {
        unsafe { sys::dpf_atomic64_inc_and_test(self.inner.get()) != 0 }
    }

    /// Decrement and report whether the counter reached zero.
    pub fn dec_and_test(&self) -> bool {
        unsafe { sys::dpf_atomic64_dec_and_test(self.inner.get()) != 0 }
    }

    /// Set to 1 if currently 0; true on success.
    pub fn test_and_set(&self) -> bool {
        unsafe { sys::dpf_atomic64_test_and_set(self.inner.get()) != 0 }
    }

    /// Reset to 0.
    pub fn clear(&self) {
        unsafe { sys::dpf_atomic64_clear(self.inner.get()) }
    }
}

/// Full memory barrier between lcores.
pub fn mb() {
    unsafe { sys::dpf_smp_mb() }
}

/// Read memory barrier between lcores.
pub fn rmb() {
    unsafe { sys::dpf_smp_rmb() }
}

/// Write memory barrier between lcores.
pub fn wmb() {
    unsafe { sys::dpf_smp_wmb() }
}
