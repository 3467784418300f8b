use dpdk_flat_sys as sys;

use crate::errno::{check, RteError};

/// Classification color assigned to a packet by a meter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Color {
    /// Within the committed rate.
    Green,
    /// Over the committed rate but within the excess/peak allowance.
    Yellow,
    /// Over everything; usually dropped.
    Red,
}

impl Color {
    pub(crate) fn from_raw(raw: u32) -> Color {
        match raw {
            0 => Color::Green,
            1 => Color::Yellow,
            _ => Color::Red,
        }
    }

    pub(crate) fn to_raw(self) -> u32 {
        match self {
            Color::Green => 0,
            Color::Yellow => 1,
            Color::Red => 2,
        }
    }
}

/// srTCM (RFC 2697) configuration: committed information rate in bytes
/// per second, committed and excess burst sizes in bytes.
#[derive(Debug, Copy, Clone)]
pub struct SrtcmParams {
    /// Committed information rate, bytes per second.
    pub cir: u64,
    /// Committed burst size, bytes.
    pub cbs: u64,
    /// Excess burst size, bytes.
    pub ebs: u64,
}

/// Pre-computed srTCM profile, shared by any number of meters.
pub struct SrtcmProfile {
    raw: sys::rte_meter_srtcm_profile,
}

impl SrtcmProfile {
    /// Build a profile. The library rejects zero rates and zero burst
    /// sizes with `EINVAL`.
    pub fn new(params: SrtcmParams) -> Result<SrtcmProfile, RteError> {
        let mut raw = sys::rte_meter_srtcm_profile::default();
        let mut native = sys::rte_meter_srtcm_params {
            cir: params.cir,
            cbs: params.cbs,
            ebs: params.ebs,
        };
        check(unsafe { sys::rte_meter_srtcm_profile_config(&mut raw, &mut native) })?;
        Ok(SrtcmProfile { raw })
    }
}

/// Run-time state of one srTCM meter.
pub struct Srtcm {
    raw: sys::rte_meter_srtcm,
}

impl Srtcm {
    /// Start a meter with full token buckets.
    pub fn new(profile: &SrtcmProfile) -> Result<Srtcm, RteError> {
        let mut raw = sys::rte_meter_srtcm::default();
        check(unsafe {
            sys::rte_meter_srtcm_config(
                &mut raw,
                &profile.raw as *const _ as *mut sys::rte_meter_srtcm_profile,
            )
        })?;
        Ok(Srtcm { raw })
    }

    /// Classify a packet of `pkt_len` bytes arriving at TSC time `time`.
    pub fn color_blind_check(
        &mut self,
        profile: &SrtcmProfile,
        time: u64,
        pkt_len: u32,
    ) -> Color {
        Color::from_raw(unsafe {
            sys::dpf_meter_srtcm_color_blind_check(
                &mut self.raw,
                &profile.raw as *const _ as *mut sys::rte_meter_srtcm_profile,
                time,
                pkt_len,
            )
        })
    }

    /// Classify a packet that already carries a color from an upstream
    /// meter; the result can only get worse.
    pub fn color_aware_check(
        &mut self,
        profile: &SrtcmProfile,
        time: u64,
        pkt_len: u32,
        pkt_color: Color,
    ) -> Color {
        Color::from_raw(unsafe {
            sys::dpf_meter_srtcm_color_aware_check(
                &mut self.raw,
                &profile.raw as *const _ as *mut sys::rte_meter_srtcm_profile,
                time,
                pkt_len,
                pkt_color.to_raw(),
            )
        })
    }
}

/// trTCM (RFC 2698) configuration: committed and peak rates in bytes per
/// second with their burst sizes in bytes.
#[derive(Debug, Copy, Clone)]
pub struct TrtcmParams {
    /// Committed information rate, bytes per second.
    pub cir: u64,
    /// Peak information rate, bytes per second.
    pub pir: u64,
    /// Committed burst size, bytes.
    pub cbs: u64,
    /// Peak burst size, bytes.
    pub pbs: u64,
}

/// Pre-computed trTCM profile.
pub struct TrtcmProfile {
    raw: sys::rte_meter_trtcm_profile,
}

impl TrtcmProfile {
    /// Build a profile; `EINVAL` on zero rates or burst sizes, or when
    /// the peak rate is below the committed rate.
    pub fn new(params: TrtcmParams) -> Result<TrtcmProfile, RteError> {
        let mut raw = sys::rte_meter_trtcm_profile::default();
        let mut native = sys::rte_meter_trtcm_params {
            cir: params.cir,
            pir: params.pir,
            cbs: params.cbs,
            pbs: params.pbs,
        };
        check(unsafe { sys::rte_meter_trtcm_profile_config(&mut raw, &mut native) })?;
        Ok(TrtcmProfile { raw })
    }
}

/// Run-time state of one trTCM meter.
pub struct Trtcm {
    raw: sys::rte_meter_trtcm,
}

impl Trtcm {
    /// Start a meter with full token buckets.
    pub fn new(profile: &TrtcmProfile) -> Result<Trtcm, RteError> {
        let mut raw = sys::rte_meter_trtcm::default();
        check(unsafe {
            sys::rte_meter_trtcm_config(
                &mut raw,
                &profile.raw as *const _ as *mut sys::rte_meter_trtcm_profile,
            )
        })?;
        Ok(Trtcm { raw })
    }

    /// Classify a packet of `pkt_len` bytes arriving at TSC time `time`.
    pub fn color_blind_check(
        &mut self,
        profile: &TrtcmProfile,
        time: u64,
        pkt_len: u32,
    ) -> Color {
        Color::from_raw(unsafe {
            sys::dpf_meter_trtcm_color_blind_check(
                &mut self.raw,
                &profile.raw as *const _ as *mut sys::rte_meter_trtcm_profile,
                time,
                pkt_len,
            )
        })
    }

    /// Classify a pre-colored packet.
    pub fn color_aware_check(
        &mut self,
        profile: &TrtcmProfile,
        time: u64,
        pkt_len: u32,
        pkt_color: Color,
    ) -> Color {
        Color::from_raw(unsafe {
            sys::dpf_meter_trtcm_color_aware_check(
                &mut self.raw,
                &profile.raw as *const _ as *mut sys::rte_meter_trtcm_profile,
                time,
                pkt_len,
                pkt_color.to_raw(),
            )
        })
    }
}

/// trTCM (RFC 4115) configuration: committed and excess rates in bytes
/// per second with their burst sizes in bytes.
#[derive(Debug, Copy, Clone)]
pub struct Rfc4115Params {
    /// Committed information rate, bytes per second.
    pub cir: u64,
    /// Excess information rate, bytes per second.
    pub eir: u64,
    /// Committed burst size, bytes.
    pub cbs: u64,
    /// Excess burst size, bytes.
    pub ebs: u64,
}

/// Pre-computed RFC 4115 trTCM profile.
pub struct Rfc4115Profile {
    raw: sys::rte_meter_trtcm_rfc4115_profile,
}

impl Rfc4115Profile {
    /// Build a profile; `EINVAL` on inconsistent parameters.
    pub fn new(params: Rfc4115Params) -> Result<Rfc4115Profile, RteError> {
        let mut raw = sys::rte_meter_trtcm_rfc4115_profile::default();
        let mut native = sys::rte_meter_trtcm_rfc4115_params {
            cir: params.cir,
            eir: params.eir,
            cbs: params.cbs,
            ebs: params.ebs,
        };
        check(unsafe { sys::rte_meter_trtcm_rfc4115_profile_config(&mut raw, &mut native) })?;
        Ok(Rfc4115Profile { raw })
    }
}

/// Run-time state of one RFC 4115 trTCM meter.
pub struct Rfc4115Trtcm {
    raw: sys::rte_meter_trtcm_rfc4115,
}

impl Rfc4115Trtcm {
    /// Start a meter with full token buckets.
    pub fn new(profile: &Rfc4115Profile) -> Result<Rfc4115Trtcm, RteError> {
        let mut raw = sys::rte_meter_trtcm_rfc4115::default();
        check(unsafe {
            sys::rte_meter_trtcm_rfc4115_config(
                &mut raw,
                &profile.raw as *const _ as *mut sys::rte_meter_trtcm_rfc4115_profile,
            )
        })?;
        Ok(Rfc4115Trtcm { raw })
    }

    /// Classify a packet of `pkt_len` bytes arriving at TSC time `time`.
    pub fn color_blind_check(
        &mut self,
        profile: &Rfc4115Profile,
        time: u64,
        pkt_len: u32,
    ) -> Color {
        Color::from_raw(unsafe {
            sys::dpf_meter_trtcm_rfc4115_color_blind_check(
                &mut self.raw,
                &profile.raw as *const _ as *mut sys::rte_meter_trtcm_rfc4115_profile,
                time,
                pkt_len,
            )
        })
    }

    /// Classify a pre-colored packet.
    pub fn color_aware_check(
        &mut self,
        profile: &Rfc4115Profile,
        time: u64,
        pkt_len: u32,
        pkt_color: Color,
    ) -> Color {
        Color::from_raw(unsafe {
            sys::dpf_meter_trtcm_rfc4115_color_aware_check(
                &mut self.raw,
                &profile.raw as *const _ as *mut sys::rte_meter_trtcm_rfc4115_profile,
                time,
                pkt_len,
                pkt_color.to_raw(),
            )
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn color_round_trip() {
        for color in [Color::Green, Color::Yellow, Color::Red] {
            assert_eq!(Color::from_raw(color.to_raw()), color);
        }
    }

    #[test]
    fn unknown_raw_color_degrades_to_red() {
        assert_eq!(Color::from_raw(3), Color::Red);
    }
}
