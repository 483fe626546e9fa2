// HDR status derivation
//
// Two sources: ADVANCED_COLOR_INFO_2 (reports the active color mode) and the
// older ADVANCED_COLOR_INFO. The first v2 failure switches the whole probe to
// v1 for the rest of its lifetime.

use std::cell::Cell;

use log::{debug, info};

use super::{DisplayIdentity, HdrStatus};
use crate::error::Result;
use crate::platform::{AdvancedColorInfo, AdvancedColorInfo2, ColorMode, DisplayService};

/// Status probe shared by every display of one registry.
///
/// Holds the "prefer v2" flag. The flag only ever goes from `true` to `false`.
/// `Cell` keeps it `!Sync`; sharing across threads would need an atomic.
#[derive(Debug)]
pub struct StatusProbe {
    prefer_v2: Cell<bool>,
}

impl Default for StatusProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusProbe {
    pub fn new() -> Self {
        Self {
            prefer_v2: Cell::new(true),
        }
    }

    /// Probe that never tries v2.
    pub fn v1_only() -> Self {
        Self {
            prefer_v2: Cell::new(false),
        }
    }

    pub fn prefers_v2(&self) -> bool {
        self.prefer_v2.get()
    }

    /// Derive the current HDR status of `identity`.
    ///
    /// v2 errors are swallowed and trigger the fallback; v1 errors propagate.
    pub fn derive<S: DisplayService + ?Sized>(
        &self,
        service: &S,
        identity: &DisplayIdentity,
    ) -> Result<HdrStatus> {
        if self.prefer_v2.get() {
            debug!(
                "Calling GetAdvancedColorInfo2(_, {})",
                identity.target_id
            );
            match service.advanced_color_info2(identity.adapter_id, identity.target_id) {
                Ok(info) => {
                    debug!("  highDynamicRangeSupported: {}", info.hdr_supported);
                    debug!("  activeColorMode: {:?}", info.active_color_mode);
                    return Ok(status_from_v2(&info));
                }
                Err(e) => {
                    debug!("GetAdvancedColorInfo2 returned an error. {}", e);
                    info!("advanced color info v2 unavailable, using v1 from now on");
                    self.prefer_v2.set(false);
                }
            }
        }

        debug!("Calling GetAdvancedColorInfo(_, {})", identity.target_id);
        let info = service.advanced_color_info(identity.adapter_id, identity.target_id)?;
        debug!("  advancedColorSupported: {}", info.supported);
        debug!("  advancedColorEnabled: {}", info.enabled);

        Ok(status_from_v1(&info))
    }
}

/// v1 has no "unknown" outcome.
pub fn status_from_v1(info: &AdvancedColorInfo) -> HdrStatus {
    if !info.supported {
        HdrStatus::NotSupported
    } else if info.enabled {
        HdrStatus::Enabled
    } else {
        HdrStatus::Disabled
    }
}

pub fn status_from_v2(info: &AdvancedColorInfo2) -> HdrStatus {
    if !info.hdr_supported {
        return HdrStatus::NotSupported;
    }
    match info.active_color_mode {
        ColorMode::Sdr | ColorMode::Wcg => HdrStatus::Disabled,
        ColorMode::Hdr => HdrStatus::Enabled,
        ColorMode::Other(_) => HdrStatus::Unknown,
    }
}
