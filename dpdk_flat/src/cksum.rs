use std::os::raw::c_void;

use thiserror::Error;

use dpdk_flat_sys as sys;

const IPV4_HDR_MIN_LEN: usize = 20;
const IPV6_HDR_LEN: usize = 40;

/// Errors from the checksum wrappers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CksumError {
    /// The slice is shorter than the fixed header it is supposed to hold.
    #[error("header slice is {got} bytes, need at least {need}")]
    HeaderTooShort {
        /// Bytes required for the header.
        need: usize,
        /// Bytes actually supplied.
        got: usize,
    },
    /// The L4 slice is empty.
    #[error("empty L4 header slice")]
    EmptyL4,
}

fn ipv4_hdr(hdr: &[u8]) -> Result<*const sys::rte_ipv4_hdr, CksumError> {
    if hdr.len() < IPV4_HDR_MIN_LEN {
        return Err(CksumError::HeaderTooShort {
            need: IPV4_HDR_MIN_LEN,
            got: hdr.len(),
        });
    }
    Ok(hdr.as_ptr() as *const sys::rte_ipv4_hdr)
}

fn ipv6_hdr(hdr: &[u8]) -> Result<*const sys::rte_ipv6_hdr, CksumError> {
    if hdr.len() < IPV6_HDR_LEN {
        return Err(CksumError::HeaderTooShort {
            need: IPV6_HDR_LEN,
            got: hdr.len(),
        });
    }
    Ok(hdr.as_ptr() as *const sys::rte_ipv6_hdr)
}

fn l4_ptr(l4: &[u8]) -> Result<*const c_void, CksumError> {
    if l4.is_empty() {
        return Err(CksumError::EmptyL4);
    }
    Ok(l4.as_ptr() as *const c_void)
}

/// Ones-complement sum of an arbitrary buffer, not folded or inverted.
pub fn raw_cksum(data: &[u8]) -> u16 {
    unsafe { sys::dpf_raw_cksum(data.as_ptr() as *const c_void, data.len()) }
}

/// IPv4 header checksum. The slice must hold the full header, options
/// included, and the checksum field is expected to be zero.
pub fn ipv4_cksum(hdr: &[u8]) -> Result<u16, CksumError> {
    Ok(unsafe { sys::dpf_ipv4_cksum(ipv4_hdr(hdr)?) })
}

/// IPv4 pseudo-header checksum for checksum offload, honoring the TSO
/// flag in `ol_flags`.
pub fn ipv4_phdr_cksum(hdr: &[u8], ol_flags: u64) -> Result<u16, CksumError> {
    Ok(unsafe { sys::dpf_ipv4_phdr_cksum(ipv4_hdr(hdr)?, ol_flags) })
}

/// Full UDP/TCP checksum over an IPv4 packet. `l4` must hold the L4
/// header and payload; the datagram length comes from the IPv4 header.
pub fn ipv4_udptcp_cksum(hdr: &[u8], l4: &[u8]) -> Result<u16, CksumError> {
    Ok(unsafe { sys::dpf_ipv4_udptcp_cksum(ipv4_hdr(hdr)?, l4_ptr(l4)?) })
}

/// Verify the UDP/TCP checksum of an IPv4 packet.
pub fn ipv4_udptcp_cksum_verify(hdr: &[u8], l4: &[u8]) -> Result<bool, CksumError> {
    let ret = unsafe { sys::dpf_ipv4_udptcp_cksum_verify(ipv4_hdr(hdr)?, l4_ptr(l4)?) };
    Ok(ret == 0)
}

/// IPv6 pseudo-header checksum for checksum offload.
pub fn ipv6_phdr_cksum(hdr: &[u8], ol_flags: u64) -> Result<u16, CksumError> {
    Ok(unsafe { sys::dpf_ipv6_phdr_cksum(ipv6_hdr(hdr)?, ol_flags) })
}

/// Full UDP/TCP checksum over an IPv6 packet.
pub fn ipv6_udptcp_cksum(hdr: &[u8], l4: &[u8]) -> Result<u16, CksumError> {
    Ok(unsafe { sys::dpf_ipv6_udptcp_cksum(ipv6_hdr(hdr)?, l4_ptr(l4)?) })
}

/// Verify the UDP/TCP checksum of an IPv6 packet.
pub fn ipv6_udptcp_cksum_verify(hdr: &[u8], l4: &[u8]) -> Result<bool, CksumError> {
    let ret = unsafe { sys::dpf_ipv6_udptcp_cksum_verify(ipv6_hdr(hdr)?, l4_ptr(l4)?) };
    Ok(ret == 0)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_ipv4_header_rejected() {
        let err = ipv4_cksum(&[0u8; 19]).unwrap_err();
        assert_eq!(err, CksumError::HeaderTooShort { need: 20, got: 19 });
    }

    #[test]
    fn short_ipv6_header_rejected() {
        let err = ipv6_phdr_cksum(&[0u8; 39], 0).unwrap_err();
        assert_eq!(err, CksumError::HeaderTooShort { need: 40, got: 39 });
    }

    #[test]
    fn empty_l4_rejected() {
        let hdr = [0u8; 20];
        assert_eq!(ipv4_udptcp_cksum(&hdr, &[]), Err(CksumError::EmptyL4));
    }
}
