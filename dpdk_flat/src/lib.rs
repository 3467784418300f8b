#![warn(missing_docs)]

//! `dpdk_flat` wraps the flat forwarding surface of `dpdk_flat_sys` in
//! safe Rust types.
//!
//! Each type owns exactly one externally-managed DPDK object (a ring, a
//! mempool, a packet buffer, a hash table, an RCU tracker, …), releases
//! it on drop, and maps the native sentinel returns to `Result`/`Option`
//! per the native convention. The algorithms behind these types — the
//! lock-free ring, the per-core mempool cache, the mbuf model, the meter
//! state machines, the quiescent-state tracking — live entirely in
//! libdpdk; nothing in this crate reimplements or alters them.

mod atomic;
mod bitmap;
mod cksum;
mod eal;
mod errno;
mod hash;
mod lock;
mod mbuf;
mod mempool;
mod meter;
mod names;
mod rcu;
mod ring;
mod rss;

pub use atomic::{mb, rmb, wmb, RteAtomic32, RteAtomic64};
pub use bitmap::Bitmap;
pub use cksum::{
    ipv4_cksum, ipv4_phdr_cksum, ipv4_udptcp_cksum, ipv4_udptcp_cksum_verify, ipv6_phdr_cksum,
    ipv6_udptcp_cksum, ipv6_udptcp_cksum_verify, raw_cksum, CksumError,
};
pub use eal::{
    check_root, delay_us, lcore_count, lcore_id, pause, rdtsc, rdtsc_precise, socket_id, tsc_hz,
    Eal,
};
pub use errno::{last_error, RteError};
pub use hash::{
    crc32, crc32_u16, crc32_u32, crc32_u64, crc32_u8, jhash, jhash_1word, jhash_2words,
    jhash_3words, jhash_words, HashConfig, HashError, HashTable,
};
pub use lock::{
    RteRwLock, RteSpinlock, RteTicketlock, RwLockReadGuard, RwLockWriteGuard, Seqlock,
    SeqlockWriteGuard, SpinlockGuard, TicketlockGuard,
};
pub use mbuf::{Mbuf, MbufError, PktmbufPool, PktmbufPoolError};
pub use mempool::{Mempool, MempoolConfig, MempoolError};
pub use meter::{
    Color, Rfc4115Params, Rfc4115Profile, Rfc4115Trtcm, Srtcm, SrtcmParams, SrtcmProfile, Trtcm,
    TrtcmParams, TrtcmProfile,
};
pub use names::InvalidName;
pub use rcu::{Qsbr, Token};
pub use ring::{Ring, RingError, RingFlags};
pub use rss::{softrss, softrss_be, RssError, DEFAULT_RSS_KEY, RSS_KEY_LEN};
