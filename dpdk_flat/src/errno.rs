use std::ffi::CStr;
use std::fmt;

/// An error reported by the native library, carrying its errno value.
///
/// The value is whatever the underlying primitive reported: either the
/// thread-local `rte_errno`, or the absolute value of a negative return
/// code. No reinterpretation happens on this side.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct RteError(
    /// The positive errno value.
    pub i32,
);

impl RteError {
    /// Format the errno through the library's own string table.
    pub fn message(&self) -> String {
        let msg = unsafe { CStr::from_ptr(dpdk_flat_sys::rte_strerror(self.0)) };
        msg.to_string_lossy().into_owned()
    }
}

impl fmt::Display for RteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (errno {})", self.message(), self.0)
    }
}

impl fmt::Debug for RteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RteError({}, {})", self.0, self.message())
    }
}

impl std::error::Error for RteError {}

/// Read the calling thread's `rte_errno`.
pub fn last_error() -> RteError {
    RteError(unsafe { dpdk_flat_sys::dpf_errno() })
}

/// Map a 0-or-negative-errno return to a `Result`.
pub(crate) fn check(ret: i32) -> Result<(), RteError> {
    if ret == 0 {
        Ok(())
    } else {
        Err(RteError(-ret))
    }
}
