//! Hand-maintained declarations for the linkable part of the curated
//! DPDK surface: opaque object types, the small caller-allocated value
//! types whose layout is part of the documented ABI, compile-time
//! constants the C headers only provide as macros, and `extern "C"`
//! declarations for the native functions that already exist as real
//! symbols (creation, destruction, lookup, registration, profile
//! configuration).
//!
//! Declarations are maintained by hand instead of generated at build
//! time; keep them in sync with the installed DPDK when bumping the
//! supported release.

use std::os::raw::{c_char, c_int, c_uint, c_void};

/* ── opaque, externally owned objects ─────────────────────────────── */

macro_rules! opaque {
    ($($(#[$doc:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[repr(C)]
            pub struct $name {
                _private: [u8; 0],
            }
        )+
    };
}

opaque! {
    /// Lock-free fixed-capacity circular queue.
    rte_ring,
    /// Pre-allocated, per-core-cached pool of fixed-size objects.
    rte_mempool,
    /// Chained, reference-counted packet buffer descriptor.
    rte_mbuf,
    /// Cuckoo hash table.
    rte_hash,
    /// Quiescent-state-based reclamation tracker.
    rte_rcu_qsbr,
    /// Hierarchical two-level bitmap.
    rte_bitmap,
    /// IPv4 header, only ever addressed through a pointer.
    rte_ipv4_hdr,
    /// IPv6 header, only ever addressed through a pointer.
    rte_ipv6_hdr,
}

/* ── caller-allocated value types (documented ABI) ────────────────── */

/// srTCM meter configuration: committed rate plus the two burst sizes,
/// all in bytes (rate in bytes per second).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct rte_meter_srtcm_params {
    pub cir: u64,
    pub cbs: u64,
    pub ebs: u64,
}

/// trTCM meter configuration (RFC 2698).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct rte_meter_trtcm_params {
    pub cir: u64,
    pub pir: u64,
    pub cbs: u64,
    pub pbs: u64,
}

/// trTCM meter configuration (RFC 4115).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct rte_meter_trtcm_rfc4115_params {
    pub cir: u64,
    pub eir: u64,
    pub cbs: u64,
    pub ebs: u64,
}

/// Pre-computed srTCM profile. Contents are the library's business;
/// only the size and alignment matter on this side.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct rte_meter_srtcm_profile {
    opaque: [u64; 4],
}

/// srTCM run-time state (token buckets and last-update time).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct rte_meter_srtcm {
    opaque: [u64; 3],
}

/// Pre-computed trTCM (RFC 2698) profile.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct rte_meter_trtcm_profile {
    opaque: [u64; 6],
}

/// trTCM (RFC 2698) run-time state.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct rte_meter_trtcm {
    opaque: [u64; 4],
}

/// Pre-computed trTCM (RFC 4115) profile.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct rte_meter_trtcm_rfc4115_profile {
    opaque: [u64; 6],
}

/// trTCM (RFC 4115) run-time state.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct rte_meter_trtcm_rfc4115 {
    opaque: [u64; 4],
}

/// Framework 32-bit atomic counter.
#[repr(C)]
#[derive(Debug, Default)]
pub struct rte_atomic32_t {
    pub cnt: i32,
}

/// Framework 64-bit atomic counter.
#[repr(C)]
#[derive(Debug, Default)]
pub struct rte_atomic64_t {
    pub cnt: i64,
}

/// Spinlock; zero means unlocked.
#[repr(C)]
#[derive(Debug, Default)]
pub struct rte_spinlock_t {
    pub locked: c_int,
}

/// Ticket lock; low half is the currently-served ticket, high half the
/// next ticket to hand out.
#[repr(C)]
#[derive(Debug, Default)]
pub struct rte_ticketlock_t {
    pub tickets: u32,
}

/// Reader-writer lock; the counter encodes readers and the writer bit.
#[repr(C)]
#[derive(Debug, Default)]
pub struct rte_rwlock_t {
    pub cnt: i32,
}

/// Sequence counter half of the seqlock.
#[repr(C)]
#[derive(Debug, Default)]
pub struct rte_seqcount_t {
    pub sn: u32,
}

/// Sequence lock: a sequence counter plus a writer spinlock.
#[repr(C)]
#[derive(Debug, Default)]
pub struct rte_seqlock_t {
    pub count: rte_seqcount_t,
    pub lock: rte_spinlock_t,
}

/// Hash function signature accepted by `rte_hash_create`.
pub type rte_hash_function =
    Option<unsafe extern "C" fn(key: *const c_void, key_len: u32, init_val: u32) -> u32>;

/// Parameters for `rte_hash_create`.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct rte_hash_parameters {
    pub name: *const c_char,
    pub entries: u32,
    pub reserved: u32,
    pub key_len: u32,
    pub hash_func: rte_hash_function,
    pub hash_func_init_val: u32,
    pub socket_id: c_int,
    pub extra_flag: u8,
}

/// Mempool constructor callback (`rte_mempool_create`).
pub type rte_mempool_ctor_t =
    Option<unsafe extern "C" fn(mp: *mut rte_mempool, arg: *mut c_void)>;

/// Per-object constructor callback (`rte_mempool_create`).
pub type rte_mempool_obj_cb_t = Option<
    unsafe extern "C" fn(mp: *mut rte_mempool, arg: *mut c_void, obj: *mut c_void, obj_idx: c_uint),
>;

/* ── compile-time constants the headers only provide as macros ────── */

/// Ring is single-producer.
pub const RING_F_SP_ENQ: c_uint = 0x0001;
/// Ring is single-consumer.
pub const RING_F_SC_DEQ: c_uint = 0x0002;
/// Usable ring capacity is exactly the requested count (rounded-up
/// power-of-two storage is hidden).
pub const RING_F_EXACT_SZ: c_uint = 0x0004;

/// Mempool puts are single-producer.
pub const RTE_MEMPOOL_F_SP_PUT: c_uint = 0x0004;
/// Mempool gets are single-consumer.
pub const RTE_MEMPOOL_F_SC_GET: c_uint = 0x0008;

/// Bytes reserved before the data area of every new pktmbuf.
pub const RTE_PKTMBUF_HEADROOM: u16 = 128;
/// Default mbuf data-room size, headroom excluded.
pub const RTE_MBUF_DEFAULT_DATAROOM: u16 = 2048;
/// Default mbuf buffer size: data room plus headroom.
pub const RTE_MBUF_DEFAULT_BUF_SIZE: u16 = RTE_MBUF_DEFAULT_DATAROOM + RTE_PKTMBUF_HEADROOM;

/// Hash table relies on hardware transactional memory.
pub const RTE_HASH_EXTRA_FLAGS_TRANS_MEM_SUPPORT: u8 = 0x01;
/// Hash table supports concurrent writers.
pub const RTE_HASH_EXTRA_FLAGS_MULTI_WRITER_ADD: u8 = 0x02;
/// Hash table takes a reader-writer lock internally.
pub const RTE_HASH_EXTRA_FLAGS_RW_CONCURRENCY: u8 = 0x04;
/// Hash table may extend buckets past the configured size.
pub const RTE_HASH_EXTRA_FLAGS_EXT_TABLE: u8 = 0x08;
/// Deleted keys are recycled by the caller, not the table.
pub const RTE_HASH_EXTRA_FLAGS_NO_FREE_ON_DEL: u8 = 0x10;
/// Lock-free reader/writer concurrency.
pub const RTE_HASH_EXTRA_FLAGS_RW_CONCURRENCY_LF: u8 = 0x20;

/// Thread id passed to `rte_rcu_qsbr_synchronize` by a caller that is
/// not itself a registered reader.
pub const RTE_QSBR_THRID_INVALID: c_uint = 0xffff_ffff;

/// Length in bytes of a Toeplitz RSS key.
pub const RTE_THASH_KEY_LEN: usize = 40;

/// The conventional 40-byte Toeplitz key used when a deployment does not
/// supply its own.
pub const DEFAULT_RSS_KEY: [u8; RTE_THASH_KEY_LEN] = [
    0x6d, 0x5a, 0x56, 0xda, 0x25, 0x5b, 0x0e, 0xc2, 0x41, 0x67, 0x25, 0x3d, 0x43, 0xa3, 0x8f,
    0xb0, 0xd0, 0xca, 0x2b, 0xcb, 0xae, 0x7b, 0x30, 0xb4, 0x77, 0xcb, 0x2d, 0xa3, 0x80, 0x30,
    0xf2, 0x0c, 0x6a, 0x42, 0xb7, 0x3b, 0xbe, 0xac, 0x01, 0xfa,
];

/* ── linkable native entry points ─────────────────────────────────── */

extern "C" {
    /* eal */
    pub fn rte_eal_init(argc: c_int, argv: *mut *mut c_char) -> c_int;
    pub fn rte_eal_cleanup() -> c_int;
    pub fn rte_eal_mp_wait_lcore();
    pub fn rte_lcore_count() -> c_uint;
    pub fn rte_socket_id() -> c_uint;
    pub fn rte_get_tsc_hz() -> u64;
    pub fn rte_strerror(errnum: c_int) -> *const c_char;

    /* rte_malloc heap (hugepage-backed) */
    pub fn rte_malloc(type_: *const c_char, size: usize, align: c_uint) -> *mut c_void;
    pub fn rte_zmalloc(type_: *const c_char, size: usize, align: c_uint) -> *mut c_void;
    pub fn rte_zmalloc_socket(
        type_: *const c_char,
        size: usize,
        align: c_uint,
        socket: c_int,
    ) -> *mut c_void;
    pub fn rte_free(ptr: *mut c_void);

    /* ring */
    pub fn rte_ring_create(
        name: *const c_char,
        count: c_uint,
        socket_id: c_int,
        flags: c_uint,
    ) -> *mut rte_ring;
    pub fn rte_ring_free(r: *mut rte_ring);
    pub fn rte_ring_lookup(name: *const c_char) -> *mut rte_ring;
    pub fn rte_ring_reset(r: *mut rte_ring);
    pub fn rte_ring_get_memsize(count: c_uint) -> isize;

    /* mempool */
    pub fn rte_mempool_create(
        name: *const c_char,
        n: c_uint,
        elt_size: c_uint,
        cache_size: c_uint,
        private_data_size: c_uint,
        mp_init: rte_mempool_ctor_t,
        mp_init_arg: *mut c_void,
        obj_init: rte_mempool_obj_cb_t,
        obj_init_arg: *mut c_void,
        socket_id: c_int,
        flags: c_uint,
    ) -> *mut rte_mempool;
    pub fn rte_mempool_free(mp: *mut rte_mempool);
    pub fn rte_mempool_lookup(name: *const c_char) -> *mut rte_mempool;
    pub fn rte_mempool_avail_count(mp: *const rte_mempool) -> c_uint;
    pub fn rte_mempool_in_use_count(mp: *const rte_mempool) -> c_uint;

    /* mbuf pool */
    pub fn rte_pktmbuf_pool_create(
        name: *const c_char,
        n: c_uint,
        cache_size: c_uint,
        priv_size: u16,
        data_room_size: u16,
        socket_id: c_int,
    ) -> *mut rte_mempool;

    /* hash */
    pub fn rte_hash_create(params: *const rte_hash_parameters) -> *mut rte_hash;
    pub fn rte_hash_free(h: *mut rte_hash);
    pub fn rte_hash_add_key(h: *mut rte_hash, key: *const c_void) -> i32;
    pub fn rte_hash_lookup(h: *const rte_hash, key: *const c_void) -> i32;
    pub fn rte_hash_del_key(h: *mut rte_hash, key: *const c_void) -> i32;
    pub fn rte_hash_count(h: *const rte_hash) -> i32;
    pub fn rte_hash_reset(h: *mut rte_hash);
    pub fn rte_hash_hash(h: *const rte_hash, key: *const c_void) -> u32;

    /* meter */
    pub fn rte_meter_srtcm_profile_config(
        p: *mut rte_meter_srtcm_profile,
        params: *mut rte_meter_srtcm_params,
    ) -> c_int;
    pub fn rte_meter_srtcm_config(
        m: *mut rte_meter_srtcm,
        p: *mut rte_meter_srtcm_profile,
    ) -> c_int;
    pub fn rte_meter_trtcm_profile_config(
        p: *mut rte_meter_trtcm_profile,
        params: *mut rte_meter_trtcm_params,
    ) -> c_int;
    pub fn rte_meter_trtcm_config(
        m: *mut rte_meter_trtcm,
        p: *mut rte_meter_trtcm_profile,
    ) -> c_int;
    pub fn rte_meter_trtcm_rfc4115_profile_config(
        p: *mut rte_meter_trtcm_rfc4115_profile,
        params: *mut rte_meter_trtcm_rfc4115_params,
    ) -> c_int;
    pub fn rte_meter_trtcm_rfc4115_config(
        m: *mut rte_meter_trtcm_rfc4115,
        p: *mut rte_meter_trtcm_rfc4115_profile,
    ) -> c_int;

    /* rcu */
    pub fn rte_rcu_qsbr_get_memsize(max_threads: u32) -> usize;
    pub fn rte_rcu_qsbr_init(v: *mut rte_rcu_qsbr, max_threads: u32) -> c_int;
    pub fn rte_rcu_qsbr_thread_register(v: *mut rte_rcu_qsbr, thread_id: c_uint) -> c_int;
    pub fn rte_rcu_qsbr_thread_unregister(v: *mut rte_rcu_qsbr, thread_id: c_uint) -> c_int;
    pub fn rte_rcu_qsbr_synchronize(v: *mut rte_rcu_qsbr, thread_id: c_uint);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mbuf_buf_size_includes_headroom() {
        assert_eq!(RTE_MBUF_DEFAULT_BUF_SIZE, 2048 + 128);
    }

    #[test]
    fn meter_value_type_layout() {
        // The documented ABI of the caller-allocated meter types.
        assert_eq!(std::mem::size_of::<rte_meter_srtcm_profile>(), 32);
        assert_eq!(std::mem::size_of::<rte_meter_srtcm>(), 24);
        assert_eq!(std::mem::size_of::<rte_meter_trtcm_profile>(), 48);
        assert_eq!(std::mem::size_of::<rte_meter_trtcm>(), 32);
        assert_eq!(std::mem::size_of::<rte_meter_trtcm_rfc4115_profile>(), 48);
        assert_eq!(std::mem::size_of::<rte_meter_trtcm_rfc4115>(), 32);
    }

    #[test]
    fn lock_value_type_layout() {
        assert_eq!(std::mem::size_of::<rte_spinlock_t>(), 4);
        assert_eq!(std::mem::size_of::<rte_ticketlock_t>(), 4);
        assert_eq!(std::mem::size_of::<rte_rwlock_t>(), 4);
        assert_eq!(std::mem::size_of::<rte_seqlock_t>(), 8);
    }

    #[test]
    fn default_rss_key_length() {
        assert_eq!(DEFAULT_RSS_KEY.len(), RTE_THASH_KEY_LEN);
    }
}
