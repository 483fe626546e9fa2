// OS display-configuration boundary.
//
// The core only talks to `DisplayService`; `win32` is the real backend,
// tests plug in a scripted double.

#[cfg(windows)]
pub mod win32;

#[cfg(windows)]
pub use win32::Win32DisplayService;

use std::fmt;

use crate::error::Result;

/// Locally-unique adapter identifier (Win32 `LUID`).
///
/// Only valid for the current display topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AdapterId {
    pub low_part: u32,
    pub high_part: i32,
}

impl AdapterId {
    pub fn new(low_part: u32, high_part: i32) -> Self {
        Self {
            low_part,
            high_part,
        }
    }
}

impl fmt::Display for AdapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}-{:08x}", self.high_part, self.low_part)
    }
}

/// One side (source or target) of a display path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathEndpoint {
    pub adapter_id: AdapterId,
    pub id: u32,
}

/// An active display path as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayPath {
    /// Adapter output (video source)
    pub source: PathEndpoint,
    /// Connected monitor
    pub target: PathEndpoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetName {
    pub friendly_name: String,
    /// Friendly name was read from the monitor's EDID
    pub from_edid: bool,
    pub device_path: String,
}

/// Advanced color info, first revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvancedColorInfo {
    pub supported: bool,
    pub enabled: bool,
    pub wide_color_enforced: bool,
    pub force_disabled: bool,
}

/// Active color mode reported by the second revision of advanced color info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Sdr,
    /// Wide color gamut
    Wcg,
    Hdr,
    /// Anything the OS added after this was written
    Other(i32),
}

impl ColorMode {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Sdr,
            1 => Self::Wcg,
            2 => Self::Hdr,
            other => Self::Other(other),
        }
    }
}

/// Advanced color info, second revision (Windows 11 24H2+).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvancedColorInfo2 {
    pub advanced_color_supported: bool,
    pub advanced_color_active: bool,
    pub limited_by_policy: bool,
    pub hdr_supported: bool,
    pub hdr_user_enabled: bool,
    pub wide_color_supported: bool,
    pub wide_color_user_enabled: bool,
    pub active_color_mode: ColorMode,
}

/// Blocking access to the OS display configuration.
///
/// Every call is a full round trip and may fail with [`HdrError::Platform`].
///
/// [`HdrError::Platform`]: crate::error::HdrError::Platform
pub trait DisplayService {
    /// Active display paths in OS order.
    fn query_active_paths(&self) -> Result<Vec<DisplayPath>>;

    fn target_name(&self, adapter_id: AdapterId, target_id: u32) -> Result<TargetName>;

    /// Device path of the adapter (e.g. `\\?\PCI#VEN_10DE...`).
    fn adapter_name(&self, adapter_id: AdapterId) -> Result<String>;

    fn advanced_color_info(&self, adapter_id: AdapterId, target_id: u32)
        -> Result<AdvancedColorInfo>;

    /// Fails on OS versions that predate the second revision.
    fn advanced_color_info2(
        &self,
        adapter_id: AdapterId,
        target_id: u32,
    ) -> Result<AdvancedColorInfo2>;

    fn set_advanced_color_state(
        &self,
        adapter_id: AdapterId,
        target_id: u32,
        enabled: bool,
    ) -> Result<()>;
}

impl<S: DisplayService + ?Sized> DisplayService for &S {
    fn query_active_paths(&self) -> Result<Vec<DisplayPath>> {
        (**self).query_active_paths()
    }

    fn target_name(&self, adapter_id: AdapterId, target_id: u32) -> Result<TargetName> {
        (**self).target_name(adapter_id, target_id)
    }

    fn adapter_name(&self, adapter_id: AdapterId) -> Result<String> {
        (**self).adapter_name(adapter_id)
    }

    fn advanced_color_info(
        &self,
        adapter_id: AdapterId,
        target_id: u32,
    ) -> Result<AdvancedColorInfo> {
        (**self).advanced_color_info(adapter_id, target_id)
    }

    fn advanced_color_info2(
        &self,
        adapter_id: AdapterId,
        target_id: u32,
    ) -> Result<AdvancedColorInfo2> {
        (**self).advanced_color_info2(adapter_id, target_id)
    }

    fn set_advanced_color_state(
        &self,
        adapter_id: AdapterId,
        target_id: u32,
        enabled: bool,
    ) -> Result<()> {
        (**self).set_advanced_color_state(adapter_id, target_id, enabled)
    }
}
