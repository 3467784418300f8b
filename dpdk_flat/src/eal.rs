use std::ffi::CString;
use std::os::raw::c_char;

use anyhow::{Error, Result};
use log::{error, info};
use nix::libc::geteuid;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::errno::last_error;

/// The EAL can only be brought up once per process; track that here.
static EAL_RUNNING: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(false));

/// You need to be root (or have equivalent capabilities) to map
/// hugepages and touch the device subsystem.
pub fn check_root() -> Result<()> {
    unsafe {
        if geteuid() == 0 {
            Ok(())
        } else {
            Err(Error::msg("You need to be root to do this."))
        }
    }
}

/// Owns the process's Environment Abstraction Layer session.
///
/// Construct it once with [`Eal::init`]; every other type in this crate
/// assumes the EAL is up. Dropping it calls the native cleanup, which
/// releases hugepages and internal worker threads.
pub struct Eal {
    _priv: (),
}

impl Eal {
    /// Initialize the EAL with the given arguments (without the leading
    /// program name; one is inserted for you).
    ///
    /// Typical arguments: `["--in-memory", "--no-pci", "-l", "0-3"]`.
    ///
    /// Fails if the caller is not root, if the EAL is already running in
    /// this process, or if the native initialization rejects the
    /// arguments (the error carries `rte_errno`).
    pub fn init(args: &[&str]) -> Result<Eal> {
        check_root()?;
        let mut running = EAL_RUNNING.lock();
        if *running {
            return Err(Error::msg("The EAL is already running"));
        }

        // The native side keeps referring to argv after init returns, so
        // the marshalled strings are deliberately leaked.
        let mut argv: Vec<*mut c_char> = Vec::with_capacity(args.len() + 1);
        let arg0 = CString::new("dpdk_flat")?;
        argv.push(arg0.into_raw());
        for arg in args {
            argv.push(CString::new(*arg)?.into_raw());
        }
        let argc = argv.len() as i32;
        let argv = Vec::leak(argv);

        let ret = unsafe { dpdk_flat_sys::rte_eal_init(argc, argv.as_mut_ptr()) };
        if ret < 0 {
            return Err(Error::new(last_error()).context("EAL initialization failed"));
        }
        info!("EAL up ({} lcores)", lcore_count());
        *running = true;
        Ok(Eal { _priv: () })
    }
}

impl Drop for Eal {
    fn drop(&mut self) {
        unsafe {
            dpdk_flat_sys::rte_eal_mp_wait_lcore();
            let ret = dpdk_flat_sys::rte_eal_cleanup();
            if ret != 0 {
                error!("EAL cleanup failed ({ret})");
            }
        }
        *EAL_RUNNING.lock() = false;
    }
}

/// The calling thread's logical core id, `u32::MAX` from a non-EAL thread.
pub fn lcore_id() -> u32 {
    unsafe { dpdk_flat_sys::dpf_lcore_id() }
}

/// Number of logical cores the EAL is running on.
pub fn lcore_count() -> u32 {
    unsafe { dpdk_flat_sys::rte_lcore_count() }
}

/// NUMA socket of the calling thread.
pub fn socket_id() -> u32 {
    unsafe { dpdk_flat_sys::rte_socket_id() }
}

/// TSC frequency in Hz. Meter timestamps are expressed in these cycles.
pub fn tsc_hz() -> u64 {
    unsafe { dpdk_flat_sys::rte_get_tsc_hz() }
}

/// Current TSC cycle count.
pub fn rdtsc() -> u64 {
    unsafe { dpdk_flat_sys::dpf_rdtsc() }
}

/// Current TSC cycle count with a full barrier before the read.
pub fn rdtsc_precise() -> u64 {
    unsafe { dpdk_flat_sys::dpf_rdtsc_precise() }
}

/// Busy-wait for at least `us` microseconds.
pub fn delay_us(us: u32) {
    unsafe { dpdk_flat_sys::dpf_delay_us(us) }
}

/// CPU pause hint for spin loops.
pub fn pause() {
    unsafe { dpdk_flat_sys::dpf_pause() }
}
