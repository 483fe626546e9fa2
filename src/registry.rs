// Display registry: active paths → Display entities

use log::trace;

use crate::display::{Display, StatusProbe};
use crate::error::Result;
use crate::platform::DisplayService;

/// Owns the platform service and the status probe shared by all displays it creates.
///
/// Nothing is cached: every [`query_all_displays`](Self::query_all_displays)
/// re-enumerates. Displays from an earlier call stay usable only while the
/// topology is unchanged.
pub struct DisplayRegistry<S: DisplayService> {
    service: S,
    probe: StatusProbe,
}

impl<S: DisplayService> DisplayRegistry<S> {
    pub fn new(service: S) -> Self {
        Self::with_probe(service, StatusProbe::new())
    }

    pub fn with_probe(service: S, probe: StatusProbe) -> Self {
        Self { service, probe }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn probe(&self) -> &StatusProbe {
        &self.probe
    }

    /// Enumerate active displays in OS order.
    ///
    /// The order is only stable within one process run.
    pub fn query_all_displays(&self) -> Result<Vec<Display>> {
        let paths = self.service.query_active_paths()?;
        trace!("Resolving {} display path(s)", paths.len());

        paths
            .iter()
            .map(|path| Display::from_path(path, &self.service, &self.probe))
            .collect()
    }
}

#[cfg(windows)]
impl DisplayRegistry<crate::platform::Win32DisplayService> {
    /// Registry over the live Windows display configuration.
    pub fn win32() -> Self {
        Self::new(crate::platform::Win32DisplayService::new())
    }
}
