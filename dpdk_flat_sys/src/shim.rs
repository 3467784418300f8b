//! `extern "C"` declarations for the forwarders compiled from
//! `src/shim.c`. One declaration per wrapped inline/macro primitive;
//! signatures use fixed-width integer and pointer types only, matching
//! the header exactly.

use std::os::raw::{c_char, c_void};

use crate::bindings::{
    rte_atomic32_t, rte_atomic64_t, rte_bitmap, rte_ipv4_hdr, rte_ipv6_hdr, rte_mbuf,
    rte_mempool, rte_meter_srtcm, rte_meter_srtcm_profile, rte_meter_trtcm,
    rte_meter_trtcm_profile, rte_meter_trtcm_rfc4115, rte_meter_trtcm_rfc4115_profile,
    rte_rcu_qsbr, rte_ring, rte_rwlock_t, rte_seqlock_t, rte_spinlock_t, rte_ticketlock_t,
};

extern "C" {
    /* errno / eal */
    pub fn dpf_errno() -> i32;
    pub fn dpf_lcore_id() -> u32;
    pub fn dpf_rdtsc() -> u64;
    pub fn dpf_rdtsc_precise() -> u64;
    pub fn dpf_delay_us(us: u32);
    pub fn dpf_pause();

    /* ring */
    pub fn dpf_ring_enqueue(r: *mut rte_ring, obj: *mut c_void) -> i32;
    pub fn dpf_ring_sp_enqueue(r: *mut rte_ring, obj: *mut c_void) -> i32;
    pub fn dpf_ring_mp_enqueue(r: *mut rte_ring, obj: *mut c_void) -> i32;
    pub fn dpf_ring_dequeue(r: *mut rte_ring, obj_p: *mut *mut c_void) -> i32;
    pub fn dpf_ring_sc_dequeue(r: *mut rte_ring, obj_p: *mut *mut c_void) -> i32;
    pub fn dpf_ring_mc_dequeue(r: *mut rte_ring, obj_p: *mut *mut c_void) -> i32;
    pub fn dpf_ring_enqueue_bulk(
        r: *mut rte_ring,
        obj_table: *const *mut c_void,
        n: u32,
        free_space: *mut u32,
    ) -> u32;
    pub fn dpf_ring_sp_enqueue_bulk(
        r: *mut rte_ring,
        obj_table: *const *mut c_void,
        n: u32,
        free_space: *mut u32,
    ) -> u32;
    pub fn dpf_ring_mp_enqueue_bulk(
        r: *mut rte_ring,
        obj_table: *const *mut c_void,
        n: u32,
        free_space: *mut u32,
    ) -> u32;
    pub fn dpf_ring_dequeue_bulk(
        r: *mut rte_ring,
        obj_table: *mut *mut c_void,
        n: u32,
        available: *mut u32,
    ) -> u32;
    pub fn dpf_ring_sc_dequeue_bulk(
        r: *mut rte_ring,
        obj_table: *mut *mut c_void,
        n: u32,
        available: *mut u32,
    ) -> u32;
    pub fn dpf_ring_mc_dequeue_bulk(
        r: *mut rte_ring,
        obj_table: *mut *mut c_void,
        n: u32,
        available: *mut u32,
    ) -> u32;
    pub fn dpf_ring_enqueue_burst(
        r: *mut rte_ring,
        obj_table: *const *mut c_void,
        n: u32,
        free_space: *mut u32,
    ) -> u32;
    pub fn dpf_ring_sp_enqueue_burst(
        r: *mut rte_ring,
        obj_table: *const *mut c_void,
        n: u32,
        free_space: *mut u32,
    ) -> u32;
    pub fn dpf_ring_mp_enqueue_burst(
        r: *mut rte_ring,
        obj_table: *const *mut c_void,
        n: u32,
        free_space: *mut u32,
    ) -> u32;
    pub fn dpf_ring_dequeue_burst(
        r: *mut rte_ring,
        obj_table: *mut *mut c_void,
        n: u32,
        available: *mut u32,
    ) -> u32;
    pub fn dpf_ring_sc_dequeue_burst(
        r: *mut rte_ring,
        obj_table: *mut *mut c_void,
        n: u32,
        available: *mut u32,
    ) -> u32;
    pub fn dpf_ring_mc_dequeue_burst(
        r: *mut rte_ring,
        obj_table: *mut *mut c_void,
        n: u32,
        available: *mut u32,
    ) -> u32;
    pub fn dpf_ring_count(r: *const rte_ring) -> u32;
    pub fn dpf_ring_free_count(r: *const rte_ring) -> u32;
    pub fn dpf_ring_full(r: *const rte_ring) -> i32;
    pub fn dpf_ring_empty(r: *const rte_ring) -> i32;
    pub fn dpf_ring_get_size(r: *const rte_ring) -> u32;
    pub fn dpf_ring_get_capacity(r: *const rte_ring) -> u32;

    /* mempool */
    pub fn dpf_mempool_get(mp: *mut rte_mempool, obj_p: *mut *mut c_void) -> i32;
    pub fn dpf_mempool_get_bulk(mp: *mut rte_mempool, obj_table: *mut *mut c_void, n: u32) -> i32;
    pub fn dpf_mempool_put(mp: *mut rte_mempool, obj: *mut c_void);
    pub fn dpf_mempool_put_bulk(mp: *mut rte_mempool, obj_table: *const *mut c_void, n: u32);
    pub fn dpf_mempool_full(mp: *const rte_mempool) -> i32;
    pub fn dpf_mempool_empty(mp: *const rte_mempool) -> i32;

    /* mbuf */
    pub fn dpf_pktmbuf_alloc(mp: *mut rte_mempool) -> *mut rte_mbuf;
    pub fn dpf_pktmbuf_alloc_bulk(
        mp: *mut rte_mempool,
        mbufs: *mut *mut rte_mbuf,
        count: u32,
    ) -> i32;
    pub fn dpf_pktmbuf_free(m: *mut rte_mbuf);
    pub fn dpf_pktmbuf_free_seg(m: *mut rte_mbuf);
    pub fn dpf_mbuf_refcnt_read(m: *const rte_mbuf) -> u16;
    pub fn dpf_mbuf_refcnt_set(m: *mut rte_mbuf, new_value: u16);
    pub fn dpf_mbuf_refcnt_update(m: *mut rte_mbuf, value: i16) -> u16;
    pub fn dpf_pktmbuf_headroom(m: *const rte_mbuf) -> u16;
    pub fn dpf_pktmbuf_tailroom(m: *const rte_mbuf) -> u16;
    pub fn dpf_pktmbuf_prepend(m: *mut rte_mbuf, len: u16) -> *mut c_char;
    pub fn dpf_pktmbuf_append(m: *mut rte_mbuf, len: u16) -> *mut c_char;
    pub fn dpf_pktmbuf_adj(m: *mut rte_mbuf, len: u16) -> *mut c_char;
    pub fn dpf_pktmbuf_trim(m: *mut rte_mbuf, len: u16) -> i32;
    pub fn dpf_pktmbuf_chain(head: *mut rte_mbuf, tail: *mut rte_mbuf) -> i32;
    pub fn dpf_pktmbuf_lastseg(m: *mut rte_mbuf) -> *mut rte_mbuf;
    pub fn dpf_pktmbuf_is_contiguous(m: *const rte_mbuf) -> i32;
    pub fn dpf_pktmbuf_linearize(m: *mut rte_mbuf) -> i32;
    pub fn dpf_pktmbuf_read(
        m: *const rte_mbuf,
        off: u32,
        len: u32,
        buf: *mut c_void,
    ) -> *const c_void;
    pub fn dpf_pktmbuf_reset(m: *mut rte_mbuf);
    pub fn dpf_pktmbuf_pkt_len(m: *const rte_mbuf) -> u32;
    pub fn dpf_pktmbuf_data_len(m: *const rte_mbuf) -> u16;
    pub fn dpf_pktmbuf_mtod(m: *mut rte_mbuf) -> *mut c_void;
    pub fn dpf_pktmbuf_data_room_size(mp: *mut rte_mempool) -> u16;
    pub fn dpf_pktmbuf_priv_size(mp: *mut rte_mempool) -> u16;

    /* hash */
    pub fn dpf_hash_crc(data: *const c_void, data_len: u32, init_val: u32) -> u32;
    pub fn dpf_hash_crc_1byte(data: u8, init_val: u32) -> u32;
    pub fn dpf_hash_crc_2byte(data: u16, init_val: u32) -> u32;
    pub fn dpf_hash_crc_4byte(data: u32, init_val: u32) -> u32;
    pub fn dpf_hash_crc_8byte(data: u64, init_val: u32) -> u32;
    pub fn dpf_jhash(key: *const c_void, length: u32, initval: u32) -> u32;
    pub fn dpf_jhash_32b(k: *const u32, length: u32, initval: u32) -> u32;
    pub fn dpf_jhash_1word(a: u32, initval: u32) -> u32;
    pub fn dpf_jhash_2words(a: u32, b: u32, initval: u32) -> u32;
    pub fn dpf_jhash_3words(a: u32, b: u32, c: u32, initval: u32) -> u32;

    /* rss */
    pub fn dpf_softrss(input_tuple: *mut u32, input_len: u32, rss_key: *const u8) -> u32;
    pub fn dpf_softrss_be(input_tuple: *mut u32, input_len: u32, rss_key: *const u8) -> u32;

    /* cksum */
    pub fn dpf_raw_cksum(buf: *const c_void, len: usize) -> u16;
    pub fn dpf_ipv4_cksum(ipv4_hdr: *const rte_ipv4_hdr) -> u16;
    pub fn dpf_ipv4_phdr_cksum(ipv4_hdr: *const rte_ipv4_hdr, ol_flags: u64) -> u16;
    pub fn dpf_ipv4_udptcp_cksum(ipv4_hdr: *const rte_ipv4_hdr, l4_hdr: *const c_void) -> u16;
    pub fn dpf_ipv4_udptcp_cksum_verify(
        ipv4_hdr: *const rte_ipv4_hdr,
        l4_hdr: *const c_void,
    ) -> i32;
    pub fn dpf_ipv6_phdr_cksum(ipv6_hdr: *const rte_ipv6_hdr, ol_flags: u64) -> u16;
    pub fn dpf_ipv6_udptcp_cksum(ipv6_hdr: *const rte_ipv6_hdr, l4_hdr: *const c_void) -> u16;
    pub fn dpf_ipv6_udptcp_cksum_verify(
        ipv6_hdr: *const rte_ipv6_hdr,
        l4_hdr: *const c_void,
    ) -> i32;

    /* meter */
    pub fn dpf_meter_srtcm_color_blind_check(
        m: *mut rte_meter_srtcm,
        p: *mut rte_meter_srtcm_profile,
        time: u64,
        pkt_len: u32,
    ) -> u32;
    pub fn dpf_meter_srtcm_color_aware_check(
        m: *mut rte_meter_srtcm,
        p: *mut rte_meter_srtcm_profile,
        time: u64,
        pkt_len: u32,
        pkt_color: u32,
    ) -> u32;
    pub fn dpf_meter_trtcm_color_blind_check(
        m: *mut rte_meter_trtcm,
        p: *mut rte_meter_trtcm_profile,
        time: u64,
        pkt_len: u32,
    ) -> u32;
    pub fn dpf_meter_trtcm_color_aware_check(
        m: *mut rte_meter_trtcm,
        p: *mut rte_meter_trtcm_profile,
        time: u64,
        pkt_len: u32,
        pkt_color: u32,
    ) -> u32;
    pub fn dpf_meter_trtcm_rfc4115_color_blind_check(
        m: *mut rte_meter_trtcm_rfc4115,
        p: *mut rte_meter_trtcm_rfc4115_profile,
        time: u64,
        pkt_len: u32,
    ) -> u32;
    pub fn dpf_meter_trtcm_rfc4115_color_aware_check(
        m: *mut rte_meter_trtcm_rfc4115,
        p: *mut rte_meter_trtcm_rfc4115_profile,
        time: u64,
        pkt_len: u32,
        pkt_color: u32,
    ) -> u32;

    /* rcu */
    pub fn dpf_rcu_qsbr_thread_online(v: *mut rte_rcu_qsbr, thread_id: u32);
    pub fn dpf_rcu_qsbr_thread_offline(v: *mut rte_rcu_qsbr, thread_id: u32);
    pub fn dpf_rcu_qsbr_quiescent(v: *mut rte_rcu_qsbr, thread_id: u32);
    pub fn dpf_rcu_qsbr_start(v: *mut rte_rcu_qsbr) -> u64;
    pub fn dpf_rcu_qsbr_check(v: *mut rte_rcu_qsbr, t: u64, wait: i32) -> i32;

    /* bitmap */
    pub fn dpf_bitmap_get_memory_footprint(n_bits: u32) -> u32;
    pub fn dpf_bitmap_init(n_bits: u32, mem: *mut u8, mem_size: u32) -> *mut rte_bitmap;
    pub fn dpf_bitmap_free(bmp: *mut rte_bitmap) -> i32;
    pub fn dpf_bitmap_set(bmp: *mut rte_bitmap, pos: u32);
    pub fn dpf_bitmap_clear(bmp: *mut rte_bitmap, pos: u32);
    pub fn dpf_bitmap_get(bmp: *mut rte_bitmap, pos: u32) -> u64;
    pub fn dpf_bitmap_scan(bmp: *mut rte_bitmap, pos: *mut u32, slab: *mut u64) -> i32;
    pub fn dpf_bitmap_reset(bmp: *mut rte_bitmap);

    /* atomic */
    pub fn dpf_atomic32_init(v: *mut rte_atomic32_t);
    pub fn dpf_atomic32_read(v: *mut rte_atomic32_t) -> i32;
    pub fn dpf_atomic32_set(v: *mut rte_atomic32_t, new_value: i32);
    pub fn dpf_atomic32_add(v: *mut rte_atomic32_t, inc: i32);
    pub fn dpf_atomic32_sub(v: *mut rte_atomic32_t, dec: i32);
    pub fn dpf_atomic32_inc(v: *mut rte_atomic32_t);
    pub fn dpf_atomic32_dec(v: *mut rte_atomic32_t);
    pub fn dpf_atomic32_add_return(v: *mut rte_atomic32_t, inc: i32) -> i32;
    pub fn dpf_atomic32_sub_return(v: *mut rte_atomic32_t, dec: i32) -> i32;
    pub fn dpf_atomic32_inc_and_test(v: *mut rte_atomic32_t) -> i32;
    pub fn dpf_atomic32_dec_and_test(v: *mut rte_atomic32_t) -> i32;
    pub fn dpf_atomic32_test_and_set(v: *mut rte_atomic32_t) -> i32;
    pub fn dpf_atomic32_clear(v: *mut rte_atomic32_t);
    pub fn dpf_atomic32_cmpset(dst: *mut u32, exp: u32, src: u32) -> i32;
    pub fn dpf_atomic32_exchange(dst: *mut u32, val: u32) -> u32;
    pub fn dpf_atomic64_init(v: *mut rte_atomic64_t);
    pub fn dpf_atomic64_read(v: *mut rte_atomic64_t) -> i64;
    pub fn dpf_atomic64_set(v: *mut rte_atomic64_t, new_value: i64);
    pub fn dpf_atomic64_add(v: *mut rte_atomic64_t, inc: i64);
    pub fn dpf_atomic64_sub(v: *mut rte_atomic64_t, dec: i64);
    pub fn dpf_atomic64_inc(v: *mut rte_atomic64_t);
    pub fn dpf_atomic64_dec(v: *mut rte_atomic64_t);
    pub fn dpf_atomic64_add_return(v: *mut rte_atomic64_t, inc: i64) -> i64;
    pub fn dpf_atomic64_sub_return(v: *mut rte_atomic64_t, dec: i64) -> i64;
    pub fn dpf_atomic64_inc_and_test(v: *mut rte_atomic64_t) -> i32;
    pub fn dpf_atomic64_dec_and_test(v: *mut rte_atomic64_t) -> i32;
    pub fn dpf_atomic64_test_and_set(v: *mut rte_atomic64_t) -> i32;
    pub fn dpf_atomic64_clear(v: *mut rte_atomic64_t);
    pub fn dpf_atomic64_cmpset(dst: *mut u64, exp: u64, src: u64) -> i32;
    pub fn dpf_atomic64_exchange(dst: *mut u64, val: u64) -> u64;
    pub fn dpf_smp_mb();
    pub fn dpf_smp_rmb();
    pub fn dpf_smp_wmb();

    /* lock */
    pub fn dpf_spinlock_init(sl: *mut rte_spinlock_t);
    pub fn dpf_spinlock_lock(sl: *mut rte_spinlock_t);
    pub fn dpf_spinlock_unlock(sl: *mut rte_spinlock_t);
    pub fn dpf_spinlock_trylock(sl: *mut rte_spinlock_t) -> i32;
    pub fn dpf_spinlock_is_locked(sl: *mut rte_spinlock_t) -> i32;
    pub fn dpf_ticketlock_init(tl: *mut rte_ticketlock_t);
    pub fn dpf_ticketlock_lock(tl: *mut rte_ticketlock_t);
    pub fn dpf_ticketlock_unlock(tl: *mut rte_ticketlock_t);
    pub fn dpf_ticketlock_trylock(tl: *mut rte_ticketlock_t) -> i32;
    pub fn dpf_ticketlock_is_locked(tl: *mut rte_ticketlock_t) -> i32;
    pub fn dpf_rwlock_init(rwl: *mut rte_rwlock_t);
    pub fn dpf_rwlock_read_lock(rwl: *mut rte_rwlock_t);
    pub fn dpf_rwlock_read_unlock(rwl: *mut rte_rwlock_t);
    pub fn dpf_rwlock_read_trylock(rwl: *mut rte_rwlock_t) -> i32;
    pub fn dpf_rwlock_write_lock(rwl: *mut rte_rwlock_t);
    pub fn dpf_rwlock_write_unlock(rwl: *mut rte_rwlock_t);
    pub fn dpf_rwlock_write_trylock(rwl: *mut rte_rwlock_t) -> i32;
    pub fn dpf_seqlock_init(seqlock: *mut rte_seqlock_t);
    pub fn dpf_seqlock_read_begin(seqlock: *const rte_seqlock_t) -> u32;
    pub fn dpf_seqlock_read_retry(seqlock: *const rte_seqlock_t, begin_sn: u32) -> i32;
    pub fn dpf_seqlock_write_lock(seqlock: *mut rte_seqlock_t);
    pub fn dpf_seqlock_write_unlock(seqlock: *mut rte_seqlock_t);
}
