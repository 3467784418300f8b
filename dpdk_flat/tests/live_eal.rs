//! End-to-end exercise of the wrapped primitives against a live EAL.
//!
//! The EAL can only be initialized once per process, so everything runs
//! inside one test, sequentially. Run with:
//!
//! `sudo -E cargo test -p dpdk_flat --test live_eal -- --ignored`

use std::os::raw::c_void;

use dpdk_flat::*;

fn rings() {
    let ring = Ring::create("t_ring", 1024, RingFlags::default()).unwrap();
    assert!(ring.is_empty());
    assert_eq!(ring.capacity(), 1023);

    ring.enqueue(1 as *mut c_void).unwrap();
    ring.enqueue(2 as *mut c_void).unwrap();
    assert_eq!(ring.count(), 2);
    assert_eq!(ring.dequeue(), Some(1 as *mut c_void));

    let batch: Vec<*mut c_void> = (10..18).map(|v| v as *mut c_void).collect();
    ring.enqueue_bulk(&batch).unwrap();
    let mut out = vec![std::ptr::null_mut(); 9];
    ring.dequeue_bulk(&mut out).unwrap();
    assert_eq!(out[0], 2 as *mut c_void);
    assert_eq!(out[8], 17 as *mut c_void);
    assert!(ring.dequeue().is_none());

    // bulk is all-or-nothing
    let too_many: Vec<*mut c_void> = (0..2048).map(|v| (v + 1) as *mut c_void).collect();
    assert!(ring.enqueue_bulk(&too_many).is_err());
    assert!(ring.is_empty());

    // burst takes what fits
    assert_eq!(ring.enqueue_burst(&batch), 8);
    let mut out = vec![std::ptr::null_mut(); 32];
    assert_eq!(ring.dequeue_burst(&mut out), 8);

    assert!(Ring::lookup("t_ring").unwrap().is_some());
    assert!(Ring::lookup("no_such_ring").unwrap().is_none());

    // exact-size single-producer/single-consumer ring
    let spsc = Ring::create(
        "t_ring_spsc",
        100,
        RingFlags {
            single_producer: true,
            single_consumer: true,
            exact_size: true,
        },
    )
    .unwrap();
    assert_eq!(spsc.capacity(), 100);
}

fn mempools() {
    let pool = Mempool::create(
        "t_pool",
        MempoolConfig {
            size: 1023,
            elt_size: 64,
            cache_size: 32,
            single_producer: false,
            single_consumer: false,
        },
    )
    .unwrap();
    assert!(pool.is_full());
    assert_eq!(pool.avail_count(), 1023);

    let obj = pool.get().unwrap();
    assert_eq!(pool.in_use_count(), 1);
    pool.put(obj);
    assert!(pool.is_full());

    let mut objs = vec![std::ptr::null_mut(); 16];
    pool.get_bulk(&mut objs).unwrap();
    assert_eq!(pool.in_use_count(), 16);
    pool.put_bulk(&objs);
    assert_eq!(pool.in_use_count(), 0);

    assert!(Mempool::lookup("t_pool").unwrap().is_some());
}

fn mbufs() {
    let pool = PktmbufPool::create(
        "t_mbuf_pool",
        1023,
        32,
        dpdk_flat_sys::RTE_MBUF_DEFAULT_BUF_SIZE,
    )
    .unwrap();
    assert_eq!(
        pool.data_room_size(),
        dpdk_flat_sys::RTE_MBUF_DEFAULT_BUF_SIZE
    );

    let mut m = pool.alloc().unwrap();
    assert_eq!(m.pkt_len(), 0);
    assert_eq!(m.headroom(), dpdk_flat_sys::RTE_PKTMBUF_HEADROOM);
    assert_eq!(m.refcnt(), 1);

    m.append(64).unwrap().fill(0xab);
    assert_eq!(m.data_len(), 64);
    m.prepend(14).unwrap();
    assert_eq!(m.pkt_len(), 78);
    m.trim_front(14).unwrap();
    m.trim(32).unwrap();
    assert_eq!(m.pkt_len(), 32);
    assert_eq!(m.data()[0], 0xab);

    // more than the remaining tailroom must be refused
    assert!(m.append(u16::MAX).is_err());
    // more than the data length must be refused
    assert_eq!(m.trim(33), Err(MbufError::NotLongEnough));

    // chain a second buffer and read across the segment boundary
    let mut tail = pool.alloc().unwrap();
    tail.append(16).unwrap().fill(0xcd);
    m.chain(tail).map_err(|(e, _)| e).unwrap();
    assert_eq!(m.pkt_len(), 48);
    assert!(!m.is_contiguous());

    let mut buf = [0u8; 48];
    m.read_into(0, &mut buf).unwrap();
    assert_eq!(buf[31], 0xab);
    assert_eq!(buf[32], 0xcd);
    assert!(m.read_into(40, &mut buf).is_none());

    m.linearize().unwrap();
    assert!(m.is_contiguous());
    assert_eq!(m.data_len(), 48);

    drop(m);
    assert_eq!(pool.avail_count(), 1023);

    // bulk allocation hands back every buffer on drop too
    let batch = pool.alloc_bulk(64).unwrap();
    assert_eq!(batch.len(), 64);
    drop(batch);
    assert_eq!(pool.avail_count(), 1023);
}

fn hashes() {
    let mut table = HashTable::create("t_hash", HashConfig::new(1024, 16)).unwrap();
    let key_a = [0x11u8; 16];
    let key_b = [0x22u8; 16];

    let pos_a = table.add(&key_a).unwrap();
    assert_eq!(table.lookup(&key_a).unwrap(), Some(pos_a));
    assert_eq!(table.lookup(&key_b).unwrap(), None);
    assert_eq!(table.count(), 1);

    // wrong-length keys never reach the library
    assert!(matches!(
        table.lookup(&[0u8; 4]),
        Err(HashError::KeyLength { .. })
    ));

    table.add(&key_b).unwrap();
    assert_eq!(table.delete(&key_a).unwrap(), Some(pos_a));
    assert_eq!(table.delete(&key_a).unwrap(), None);
    table.reset();
    assert_eq!(table.count(), 0);

    // free functions: stable for equal input, seed-sensitive
    let data = b"the quick brown fox";
    assert_eq!(crc32(data, 0), crc32(data, 0));
    assert_ne!(crc32(data, 0), crc32(data, 1));
    assert_eq!(jhash(data, 7), jhash(data, 7));
    assert_ne!(jhash(data, 7), jhash(data, 8));
    assert_eq!(jhash_words(&[1, 2, 3], 0), jhash_words(&[1, 2, 3], 0));
    assert_eq!(jhash_2words(1, 2, 0), jhash_2words(1, 2, 0));
    let _ = (crc32_u8(1, 0), crc32_u16(1, 0), crc32_u32(1, 0), crc32_u64(1, 0));
    let _ = (jhash_1word(1, 0), jhash_3words(1, 2, 3, 0));
}

fn rss() {
    // 2-tuple of a v4 flow: src, dst
    let tuple = [0xc0a8_0001u32, 0xc0a8_0002u32];
    let h1 = softrss(&tuple, &DEFAULT_RSS_KEY).unwrap();
    let h2 = softrss(&tuple, &DEFAULT_RSS_KEY).unwrap();
    assert_eq!(h1, h2);

    let mut other_key = DEFAULT_RSS_KEY;
    other_key[0] ^= 0xff;
    assert_ne!(h1, softrss(&tuple, &other_key).unwrap());

    let _ = softrss_be(&tuple, &DEFAULT_RSS_KEY).unwrap();
}

fn cksums() {
    // a well-formed 20-byte IPv4 header, checksum field zero
    let mut hdr = [0u8; 20];
    hdr[0] = 0x45; // version 4, ihl 5
    hdr[2] = 0x00;
    hdr[3] = 0x1c; // total length 28
    hdr[8] = 64; // ttl
    hdr[9] = 17; // udp
    hdr[12..16].copy_from_slice(&[192, 168, 0, 1]);
    hdr[16..20].copy_from_slice(&[192, 168, 0, 2]);

    let cksum = ipv4_cksum(&hdr).unwrap();
    assert_ne!(cksum, 0);
    // writing the checksum back makes the header checksum to zero
    hdr[10..12].copy_from_slice(&cksum.to_ne_bytes());
    assert_eq!(ipv4_cksum(&hdr).unwrap(), 0);

    // udp datagram of 8 bytes header, no payload
    let mut l4 = [0u8; 8];
    l4[5] = 8; // length
    let full = ipv4_udptcp_cksum(&hdr, &l4).unwrap();
    l4[6..8].copy_from_slice(&full.to_ne_bytes());
    assert!(ipv4_udptcp_cksum_verify(&hdr, &l4).unwrap());
    l4[0] ^= 0xff;
    assert!(!ipv4_udptcp_cksum_verify(&hdr, &l4).unwrap());

    let raw = raw_cksum(&hdr);
    assert_eq!(raw, raw_cksum(&hdr));

    let v6 = [0u8; 40];
    let _ = ipv6_phdr_cksum(&v6, 0).unwrap();
}

fn meters() {
    let profile = SrtcmProfile::new(SrtcmParams {
        cir: 1_000_000,
        cbs: 2048,
        ebs: 2048,
    })
    .unwrap();
    let mut meter = Srtcm::new(&profile).unwrap();

    // buckets start full: a small first packet is committed traffic
    assert_eq!(
        meter.color_blind_check(&profile, rdtsc(), 64),
        Color::Green
    );
    // nothing can refill enough tokens for this one
    assert_eq!(
        meter.color_blind_check(&profile, rdtsc(), 1_000_000),
        Color::Red
    );
    // color-aware never improves the color
    assert_eq!(
        meter.color_aware_check(&profile, rdtsc(), 64, Color::Red),
        Color::Red
    );

    let profile = TrtcmProfile::new(TrtcmParams {
        cir: 1_000_000,
        pir: 2_000_000,
        cbs: 2048,
        pbs: 4096,
    })
    .unwrap();
    let mut meter = Trtcm::new(&profile).unwrap();
    assert_eq!(
        meter.color_blind_check(&profile, rdtsc(), 64),
        Color::Green
    );
    assert_eq!(
        meter.color_blind_check(&profile, rdtsc(), 1_000_000),
        Color::Red
    );

    let profile = Rfc4115Profile::new(Rfc4115Params {
        cir: 1_000_000,
        eir: 1_000_000,
        cbs: 2048,
        ebs: 2048,
    })
    .unwrap();
    let mut meter = Rfc4115Trtcm::new(&profile).unwrap();
    assert_eq!(
        meter.color_blind_check(&profile, rdtsc(), 64),
        Color::Green
    );

    // the library rejects a zero committed rate
    assert!(SrtcmProfile::new(SrtcmParams {
        cir: 0,
        cbs: 2048,
        ebs: 2048,
    })
    .is_err());
}

fn rcu() {
    let qsbr = Qsbr::new(4).unwrap();
    qsbr.register(0).unwrap();
    qsbr.online(0);

    let token = qsbr.start();
    // the only online reader reports a checkpoint, so the grace period ends
    qsbr.quiescent(0);
    assert!(qsbr.check(token, false));

    qsbr.offline(0);
    // no online readers left: synchronize returns immediately
    qsbr.synchronize(None);
    qsbr.unregister(0).unwrap();
}

fn bitmaps() {
    let mut bmp = Bitmap::new(4096).unwrap();
    assert_eq!(bmp.len(), 4096);
    assert!(!bmp.test(77));

    bmp.set(77);
    bmp.set(2049);
    assert!(bmp.test(77));

    let (pos, slab) = bmp.scan().unwrap();
    assert_eq!(pos, 64); // slab containing bit 77
    assert_ne!(slab, 0);

    bmp.clear(77);
    assert!(!bmp.test(77));

    bmp.reset();
    assert!(!bmp.test(2049));
    assert!(bmp.scan().is_none());
}

fn atomics_and_locks() {
    let counter = RteAtomic32::new(5);
    counter.add(3);
    assert_eq!(counter.read(), 8);
    assert_eq!(counter.sub_return(8), 0);
    counter.set(-1);
    assert!(counter.inc_and_test());
    counter.set(1);
    assert!(counter.dec_and_test());
    counter.clear();
    assert!(counter.test_and_set());
    assert!(!counter.test_and_set());

    let big = RteAtomic64::new(i64::from(u32::MAX) + 1);
    big.inc();
    assert_eq!(big.read(), i64::from(u32::MAX) + 2);

    mb();
    rmb();
    wmb();

    let lock = RteSpinlock::new();
    {
        let _guard = lock.lock();
        assert!(lock.is_locked());
        assert!(lock.try_lock().is_none());
    }
    assert!(!lock.is_locked());

    let ticket = RteTicketlock::new();
    {
        let _guard = ticket.try_lock().unwrap();
        assert!(ticket.is_locked());
    }
    assert!(!ticket.is_locked());

    let rw = RteRwLock::new();
    {
        let _r1 = rw.read();
        let _r2 = rw.try_read().unwrap();
        assert!(rw.try_write().is_none());
    }
    {
        let _w = rw.write();
        assert!(rw.try_read().is_none());
    }

    let seq = Seqlock::new();
    let sn = seq.read_begin();
    assert!(!seq.read_retry(sn));
    {
        let _w = seq.write_lock();
    }
    let sn2 = seq.read_begin();
    assert!(!seq.read_retry(sn2));
    assert_ne!(sn, sn2);
}

#[test]
#[ignore = "requires root, hugepages and an installed libdpdk"]
fn live_eal_round_trip() {
    let _eal = Eal::init(&["--in-memory", "--no-pci", "-l", "0"]).unwrap();
    assert!(lcore_count() >= 1);
    assert!(tsc_hz() > 0);
    assert!(rdtsc_precise() >= rdtsc() || rdtsc() > 0);
    delay_us(1);
    pause();

    rings();
    mempools();
    mbufs();
    hashes();
    rss();
    cksums();
    meters();
    rcu();
    bitmaps();
    atomics_and_locks();
}
