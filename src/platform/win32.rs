// DisplayConfig backend
//
// QueryDisplayConfig enumerates active paths; DisplayConfigGetDeviceInfo /
// DisplayConfigSetDeviceInfo read names and advanced color state and issue
// the set request.

use log::trace;
use windows::Win32::Devices::Display::{
    DisplayConfigGetDeviceInfo, DisplayConfigSetDeviceInfo, GetDisplayConfigBufferSizes,
    QueryDisplayConfig, DISPLAYCONFIG_ADAPTER_NAME, DISPLAYCONFIG_DEVICE_INFO_GET_ADAPTER_NAME,
    DISPLAYCONFIG_DEVICE_INFO_GET_ADVANCED_COLOR_INFO, DISPLAYCONFIG_DEVICE_INFO_GET_TARGET_NAME,
    DISPLAYCONFIG_DEVICE_INFO_HEADER, DISPLAYCONFIG_DEVICE_INFO_SET_ADVANCED_COLOR_STATE,
    DISPLAYCONFIG_DEVICE_INFO_TYPE, DISPLAYCONFIG_MODE_INFO, DISPLAYCONFIG_PATH_INFO,
    DISPLAYCONFIG_TARGET_DEVICE_NAME, QDC_ONLY_ACTIVE_PATHS, QDC_VIRTUAL_MODE_AWARE,
    QUERY_DISPLAY_CONFIG_FLAGS,
};
use windows::Win32::Foundation::{ERROR_INSUFFICIENT_BUFFER, LUID, WIN32_ERROR};

use super::{
    AdapterId, AdvancedColorInfo, AdvancedColorInfo2, ColorMode, DisplayPath, DisplayService,
    PathEndpoint, TargetName,
};
use crate::error::{HdrError, Result};

/// `DISPLAYCONFIG_DEVICE_INFO_GET_ADVANCED_COLOR_INFO_2`, not exposed by every
/// windows-rs release.
const DEVICE_INFO_GET_ADVANCED_COLOR_INFO_2: DISPLAYCONFIG_DEVICE_INFO_TYPE =
    DISPLAYCONFIG_DEVICE_INFO_TYPE(15);

// ---------------------------------------------------------------------------
// Win32 helpers
// ---------------------------------------------------------------------------

/// Convert a WIN32_ERROR into a Result
fn check_win32(result: WIN32_ERROR, api: &'static str) -> Result<()> {
    if result.0 == 0 {
        // ERROR_SUCCESS
        Ok(())
    } else {
        Err(HdrError::Platform {
            api,
            code: result.0,
        })
    }
}

/// DisplayConfig{Get,Set}DeviceInfo return a plain LONG
fn check_device_info(result: i32, api: &'static str) -> Result<()> {
    check_win32(WIN32_ERROR(result as u32), api)
}

fn adapter_id(luid: LUID) -> AdapterId {
    AdapterId::new(luid.LowPart, luid.HighPart)
}

fn luid(adapter_id: AdapterId) -> LUID {
    LUID {
        LowPart: adapter_id.low_part,
        HighPart: adapter_id.high_part,
    }
}

/// NUL-terminated UTF-16 buffer to String
fn wide_to_string(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

fn header<T>(
    r#type: DISPLAYCONFIG_DEVICE_INFO_TYPE,
    adapter_id: AdapterId,
    id: u32,
) -> DISPLAYCONFIG_DEVICE_INFO_HEADER {
    DISPLAYCONFIG_DEVICE_INFO_HEADER {
        r#type,
        size: std::mem::size_of::<T>() as u32,
        adapterId: luid(adapter_id),
        id,
    }
}

// Raw layouts. windows-rs wraps the bitfield unions differently across
// releases, so these packets are declared by hand:
//   DISPLAYCONFIG_DEVICE_INFO_HEADER  header;   // 20 bytes
//   union { struct { u32 bits }; u32 value; };   // 4 bytes
//   ...

/// DISPLAYCONFIG_GET_ADVANCED_COLOR_INFO
///
/// bit 0: advancedColorSupported, bit 1: advancedColorEnabled,
/// bit 2: wideColorEnforced, bit 3: advancedColorForceDisabled
#[repr(C)]
struct RawAdvancedColorInfo {
    header: DISPLAYCONFIG_DEVICE_INFO_HEADER,
    value: u32,
    color_encoding: u32,
    bits_per_color_channel: u32,
}

/// DISPLAYCONFIG_GET_ADVANCED_COLOR_INFO_2
///
/// bit 0: advancedColorSupported, bit 1: advancedColorActive, bit 3: advancedColorLimitedByPolicy,
/// bit 4: highDynamicRangeSupported, bit 5: highDynamicRangeUserEnabled,
/// bit 6: wideColorSupported, bit 7: wideColorUserEnabled
#[repr(C)]
struct RawAdvancedColorInfo2 {
    header: DISPLAYCONFIG_DEVICE_INFO_HEADER,
    value: u32,
    color_encoding: u32,
    bits_per_color_channel: u32,
    active_color_mode: i32,
}

/// DISPLAYCONFIG_SET_ADVANCED_COLOR_STATE
///
/// bit 0: enableAdvancedColor
#[repr(C)]
struct RawSetAdvancedColorState {
    header: DISPLAYCONFIG_DEVICE_INFO_HEADER,
    value: u32,
}

fn bit(value: u32, index: u32) -> bool {
    (value >> index) & 1 == 1
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// [`DisplayService`] backed by the Windows DisplayConfig API.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32DisplayService;

impl Win32DisplayService {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayService for Win32DisplayService {
    fn query_active_paths(&self) -> Result<Vec<DisplayPath>> {
        let flags =
            QUERY_DISPLAY_CONFIG_FLAGS(QDC_ONLY_ACTIVE_PATHS.0 | QDC_VIRTUAL_MODE_AWARE.0);

        loop {
            let mut path_count = 0u32;
            let mut mode_count = 0u32;

            // SAFETY: both out-pointers refer to live locals.
            let ret =
                unsafe { GetDisplayConfigBufferSizes(flags, &mut path_count, &mut mode_count) };
            check_win32(ret, "GetDisplayConfigBufferSizes")?;

            let mut paths = vec![DISPLAYCONFIG_PATH_INFO::default(); path_count as usize];
            let mut modes = vec![DISPLAYCONFIG_MODE_INFO::default(); mode_count as usize];

            // SAFETY: buffers are sized from the counts passed alongside them.
            let ret = unsafe {
                QueryDisplayConfig(
                    flags,
                    &mut path_count,
                    paths.as_mut_ptr(),
                    &mut mode_count,
                    modes.as_mut_ptr(),
                    None,
                )
            };

            // Topology changed between the two calls; size again.
            if ret == ERROR_INSUFFICIENT_BUFFER {
                trace!("QueryDisplayConfig: buffer too small, retrying");
                continue;
            }
            check_win32(ret, "QueryDisplayConfig")?;

            // May return fewer paths than estimated
            paths.truncate(path_count as usize);
            trace!("QueryDisplayConfig returned {} active path(s)", paths.len());

            return Ok(paths
                .iter()
                .map(|path| DisplayPath {
                    source: PathEndpoint {
                        adapter_id: adapter_id(path.sourceInfo.adapterId),
                        id: path.sourceInfo.id,
                    },
                    target: PathEndpoint {
                        adapter_id: adapter_id(path.targetInfo.adapterId),
                        id: path.targetInfo.id,
                    },
                })
                .collect());
        }
    }

    fn target_name(&self, adapter_id: AdapterId, target_id: u32) -> Result<TargetName> {
        let mut name = DISPLAYCONFIG_TARGET_DEVICE_NAME {
            header: header::<DISPLAYCONFIG_TARGET_DEVICE_NAME>(
                DISPLAYCONFIG_DEVICE_INFO_GET_TARGET_NAME,
                adapter_id,
                target_id,
            ),
            ..Default::default()
        };

        // SAFETY: header.size matches the struct the header is embedded in;
        // reading the flags union as a plain u32 is always valid.
        unsafe {
            let ret = DisplayConfigGetDeviceInfo(&mut name.header);
            check_device_info(ret, "DisplayConfigGetDeviceInfo(TARGET_NAME)")?;

            Ok(TargetName {
                friendly_name: wide_to_string(&name.monitorFriendlyDeviceName),
                // bit 0 = friendlyNameFromEdid
                from_edid: bit(name.flags.Anonymous.value, 0),
                device_path: wide_to_string(&name.monitorDevicePath),
            })
        }
    }

    fn adapter_name(&self, adapter_id: AdapterId) -> Result<String> {
        let mut name = DISPLAYCONFIG_ADAPTER_NAME {
            header: header::<DISPLAYCONFIG_ADAPTER_NAME>(
                DISPLAYCONFIG_DEVICE_INFO_GET_ADAPTER_NAME,
                adapter_id,
                0,
            ),
            ..Default::default()
        };

        // SAFETY: header.size matches DISPLAYCONFIG_ADAPTER_NAME.
        let ret = unsafe { DisplayConfigGetDeviceInfo(&mut name.header) };
        check_device_info(ret, "DisplayConfigGetDeviceInfo(ADAPTER_NAME)")?;

        Ok(wide_to_string(&name.adapterDevicePath))
    }

    fn advanced_color_info(
        &self,
        adapter_id: AdapterId,
        target_id: u32,
    ) -> Result<AdvancedColorInfo> {
        let mut info = RawAdvancedColorInfo {
            header: header::<RawAdvancedColorInfo>(
                DISPLAYCONFIG_DEVICE_INFO_GET_ADVANCED_COLOR_INFO,
                adapter_id,
                target_id,
            ),
            value: 0,
            color_encoding: 0,
            bits_per_color_channel: 0,
        };

        // SAFETY: RawAdvancedColorInfo is repr(C) and starts with the header.
        let ret = unsafe { DisplayConfigGetDeviceInfo(&mut info.header) };
        check_device_info(ret, "DisplayConfigGetDeviceInfo(ADVANCED_COLOR_INFO)")?;

        trace!(
            "ADVANCED_COLOR_INFO raw=0x{:x} encoding={} bpc={}",
            info.value,
            info.color_encoding,
            info.bits_per_color_channel
        );

        Ok(AdvancedColorInfo {
            supported: bit(info.value, 0),
            enabled: bit(info.value, 1),
            wide_color_enforced: bit(info.value, 2),
            force_disabled: bit(info.value, 3),
        })
    }

    fn advanced_color_info2(
        &self,
        adapter_id: AdapterId,
        target_id: u32,
    ) -> Result<AdvancedColorInfo2> {
        let mut info = RawAdvancedColorInfo2 {
            header: header::<RawAdvancedColorInfo2>(
                DEVICE_INFO_GET_ADVANCED_COLOR_INFO_2,
                adapter_id,
                target_id,
            ),
            value: 0,
            color_encoding: 0,
            bits_per_color_channel: 0,
            active_color_mode: 0,
        };

        // SAFETY: RawAdvancedColorInfo2 is repr(C) and starts with the header.
        let ret = unsafe { DisplayConfigGetDeviceInfo(&mut info.header) };
        check_device_info(ret, "DisplayConfigGetDeviceInfo(ADVANCED_COLOR_INFO_2)")?;

        trace!(
            "ADVANCED_COLOR_INFO_2 raw=0x{:x} encoding={} bpc={} mode={}",
            info.value,
            info.color_encoding,
            info.bits_per_color_channel,
            info.active_color_mode
        );

        Ok(AdvancedColorInfo2 {
            advanced_color_supported: bit(info.value, 0),
            advanced_color_active: bit(info.value, 1),
            limited_by_policy: bit(info.value, 3),
            hdr_supported: bit(info.value, 4),
            hdr_user_enabled: bit(info.value, 5),
            wide_color_supported: bit(info.value, 6),
            wide_color_user_enabled: bit(info.value, 7),
            active_color_mode: ColorMode::from_raw(info.active_color_mode),
        })
    }

    fn set_advanced_color_state(
        &self,
        adapter_id: AdapterId,
        target_id: u32,
        enabled: bool,
    ) -> Result<()> {
        let packet = RawSetAdvancedColorState {
            header: header::<RawSetAdvancedColorState>(
                DISPLAYCONFIG_DEVICE_INFO_SET_ADVANCED_COLOR_STATE,
                adapter_id,
                target_id,
            ),
            value: u32::from(enabled),
        };

        // SAFETY: RawSetAdvancedColorState is repr(C) and starts with the header.
        let ret = unsafe { DisplayConfigSetDeviceInfo(&packet.header) };
        check_device_info(ret, "DisplayConfigSetDeviceInfo(SET_ADVANCED_COLOR_STATE)")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
