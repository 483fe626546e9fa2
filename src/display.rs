// Display entity: one active display path with its resolved name and HDR status

pub mod probe;

use std::fmt;

use log::debug;

use crate::error::{HdrError, Result};
use crate::platform::{AdapterId, DisplayPath, DisplayService};
use crate::registry::DisplayRegistry;

pub use probe::StatusProbe;

/// Name used when the OS has no EDID-derived friendly name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// HDR (advanced color) state of a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HdrStatus {
    /// Display cannot do advanced color
    NotSupported,
    Enabled,
    /// Supported but currently off
    Disabled,
    /// Supported, but the active color mode is not one we know
    Unknown,
}

impl fmt::Display for HdrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            HdrStatus::NotSupported => "SDR (HDR not supported)",
            HdrStatus::Enabled => "HDR",
            HdrStatus::Disabled => "SDR",
            HdrStatus::Unknown => "Unknown",
        };
        f.write_str(text)
    }
}

/// Adapter + target pair. Invalidated by any topology change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayIdentity {
    pub adapter_id: AdapterId,
    pub target_id: u32,
}

impl From<&DisplayPath> for DisplayIdentity {
    fn from(path: &DisplayPath) -> Self {
        Self {
            adapter_id: path.source.adapter_id,
            target_id: path.target.id,
        }
    }
}

/// One active display.
///
/// Built by [`DisplayRegistry`]; `status` always reflects the last state read
/// back from the OS, never a locally assumed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    identity: DisplayIdentity,
    name: String,
    status: HdrStatus,
}

impl Display {
    /// Resolve name and status of a reported path.
    pub(crate) fn from_path<S: DisplayService + ?Sized>(
        path: &DisplayPath,
        service: &S,
        probe: &StatusProbe,
    ) -> Result<Self> {
        let identity = DisplayIdentity::from(path);
        let status = probe.derive(service, &identity)?;

        let target = service.target_name(identity.adapter_id, identity.target_id)?;
        let name = if target.from_edid {
            target.friendly_name
        } else {
            UNKNOWN_NAME.to_string()
        };

        Ok(Self {
            identity,
            name,
            status,
        })
    }

    pub fn identity(&self) -> DisplayIdentity {
        self.identity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_id(&self) -> u32 {
        self.identity.target_id
    }

    pub fn adapter_id(&self) -> AdapterId {
        self.identity.adapter_id
    }

    pub fn status(&self) -> HdrStatus {
        self.status
    }

    pub fn is_hdr_enabled(&self) -> bool {
        self.status == HdrStatus::Enabled
    }

    pub fn is_hdr_supported(&self) -> bool {
        self.status != HdrStatus::NotSupported
    }

    /// Request HDR on, then read the status back.
    ///
    /// No precondition: on an unsupported display the OS call is expected to fail.
    pub fn enable_hdr<S: DisplayService>(&mut self, registry: &DisplayRegistry<S>) -> Result<()> {
        self.set_hdr(registry, true)
    }

    /// Request HDR off, then read the status back.
    pub fn disable_hdr<S: DisplayService>(&mut self, registry: &DisplayRegistry<S>) -> Result<()> {
        self.set_hdr(registry, false)
    }

    /// Flip HDR. Fails with [`HdrError::HdrNotSupported`] before touching the OS
    /// if the display cannot do HDR; `Unknown` counts as "not enabled".
    pub fn toggle_hdr<S: DisplayService>(&mut self, registry: &DisplayRegistry<S>) -> Result<()> {
        if !self.is_hdr_supported() {
            return Err(HdrError::HdrNotSupported);
        }
        let enable = !self.is_hdr_enabled();
        self.set_hdr(registry, enable)
    }

    /// Re-read the status through the registry's probe.
    pub fn refresh_status<S: DisplayService>(
        &mut self,
        registry: &DisplayRegistry<S>,
    ) -> Result<HdrStatus> {
        self.status = registry
            .probe()
            .derive(registry.service(), &self.identity)?;
        Ok(self.status)
    }

    fn set_hdr<S: DisplayService>(
        &mut self,
        registry: &DisplayRegistry<S>,
        enabled: bool,
    ) -> Result<()> {
        debug!(
            "Setting advanced color {} on target {}",
            if enabled { "on" } else { "off" },
            self.identity.target_id
        );
        registry.service().set_advanced_color_state(
            self.identity.adapter_id,
            self.identity.target_id,
            enabled,
        )?;
        self.refresh_status(registry)?;
        Ok(())
    }
}
