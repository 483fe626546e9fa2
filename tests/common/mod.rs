// Scripted DisplayService double shared by the integration tests
#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use hdrswitch::platform::{
    AdapterId, AdvancedColorInfo, AdvancedColorInfo2, ColorMode, DisplayPath, DisplayService,
    PathEndpoint, TargetName,
};
use hdrswitch::{HdrError, Result};

/// ERROR_NOT_SUPPORTED
pub const NOT_SUPPORTED: u32 = 50;
/// ERROR_INVALID_PARAMETER
pub const INVALID_PARAMETER: u32 = 87;

pub const ADAPTER: AdapterId = AdapterId {
    low_part: 0x1a2b,
    high_part: 0,
};

pub struct FakeMonitor {
    pub target_id: u32,
    /// `None` = no EDID friendly name
    pub name: Option<String>,
    pub supported: bool,
    pub enabled: Cell<bool>,
    /// Forces the v2 active color mode instead of deriving it from `enabled`
    pub mode: Option<ColorMode>,
}

/// Supported, HDR off.
pub fn monitor(target_id: u32, name: &str) -> FakeMonitor {
    FakeMonitor {
        target_id,
        name: Some(name.to_string()),
        supported: true,
        enabled: Cell::new(false),
        mode: None,
    }
}

impl FakeMonitor {
    pub fn hdr_on(self) -> Self {
        self.enabled.set(true);
        self
    }

    pub fn unsupported(mut self) -> Self {
        self.supported = false;
        self
    }

    pub fn no_edid(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn mode(mut self, mode: ColorMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// Applies set requests like a real OS would and counts every call.
#[derive(Default)]
pub struct FakeDisplayService {
    pub monitors: Vec<FakeMonitor>,
    pub v2_available: bool,
    pub v1_calls: Cell<usize>,
    pub v2_calls: Cell<usize>,
    pub sets: RefCell<Vec<(u32, bool)>>,
}

impl FakeDisplayService {
    pub fn new() -> Self {
        Self {
            v2_available: true,
            ..Default::default()
        }
    }

    pub fn with(mut self, monitor: FakeMonitor) -> Self {
        self.monitors.push(monitor);
        self
    }

    /// Behave like an OS without ADVANCED_COLOR_INFO_2.
    pub fn without_v2(mut self) -> Self {
        self.v2_available = false;
        self
    }

    pub fn named(names: &[&str]) -> Self {
        names
            .iter()
            .enumerate()
            .fold(Self::new(), |service, (i, name)| {
                service.with(monitor(100 + i as u32, name))
            })
    }

    pub fn probe_calls(&self) -> usize {
        self.v1_calls.get() + self.v2_calls.get()
    }

    pub fn set_count(&self) -> usize {
        self.sets.borrow().len()
    }

    fn find(&self, adapter_id: AdapterId, target_id: u32) -> Result<&FakeMonitor> {
        self.monitors
            .iter()
            .find(|m| adapter_id == ADAPTER && m.target_id == target_id)
            .ok_or(HdrError::Platform {
                api: "DisplayConfigGetDeviceInfo",
                code: INVALID_PARAMETER,
            })
    }
}

impl DisplayService for FakeDisplayService {
    fn query_active_paths(&self) -> Result<Vec<DisplayPath>> {
        Ok(self
            .monitors
            .iter()
            .enumerate()
            .map(|(i, m)| DisplayPath {
                source: PathEndpoint {
                    adapter_id: ADAPTER,
                    id: i as u32,
                },
                target: PathEndpoint {
                    adapter_id: ADAPTER,
                    id: m.target_id,
                },
            })
            .collect())
    }

    fn target_name(&self, adapter_id: AdapterId, target_id: u32) -> Result<TargetName> {
        let m = self.find(adapter_id, target_id)?;
        Ok(TargetName {
            friendly_name: m.name.clone().unwrap_or_default(),
            from_edid: m.name.is_some(),
            device_path: format!(r"\\?\DISPLAY#FAKE#{}", target_id),
        })
    }

    fn adapter_name(&self, adapter_id: AdapterId) -> Result<String> {
        Ok(format!(r"\\?\PCI#VEN_{:04X}", adapter_id.low_part))
    }

    fn advanced_color_info(
        &self,
        adapter_id: AdapterId,
        target_id: u32,
    ) -> Result<AdvancedColorInfo> {
        self.v1_calls.set(self.v1_calls.get() + 1);
        let m = self.find(adapter_id, target_id)?;
        Ok(AdvancedColorInfo {
            supported: m.supported,
            enabled: m.supported && m.enabled.get(),
            ..Default::default()
        })
    }

    fn advanced_color_info2(
        &self,
        adapter_id: AdapterId,
        target_id: u32,
    ) -> Result<AdvancedColorInfo2> {
        self.v2_calls.set(self.v2_calls.get() + 1);
        if !self.v2_available {
            return Err(HdrError::Platform {
                api: "DisplayConfigGetDeviceInfo(ADVANCED_COLOR_INFO_2)",
                code: NOT_SUPPORTED,
            });
        }
        let m = self.find(adapter_id, target_id)?;
        let derived = if m.supported && m.enabled.get() {
            ColorMode::Hdr
        } else {
            ColorMode::Sdr
        };
        Ok(AdvancedColorInfo2 {
            advanced_color_supported: m.supported,
            advanced_color_active: m.enabled.get(),
            hdr_supported: m.supported,
            hdr_user_enabled: m.enabled.get(),
            active_color_mode: m.mode.unwrap_or(derived),
            ..Default::default()
        })
    }

    fn set_advanced_color_state(
        &self,
        adapter_id: AdapterId,
        target_id: u32,
        enabled: bool,
    ) -> Result<()> {
        self.sets.borrow_mut().push((target_id, enabled));
        let m = self.find(adapter_id, target_id)?;
        if !m.supported {
            return Err(HdrError::Platform {
                api: "DisplayConfigSetDeviceInfo(SET_ADVANCED_COLOR_STATE)",
                code: INVALID_PARAMETER,
            });
        }
        m.enabled.set(enabled);
        Ok(())
    }
}
