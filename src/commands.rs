// Command layer: registry + selector + display operations, rendered as text
//
// Output goes to any `io::Write` so the binary prints to stdout and tests capture it.

use std::io::Write;

use anyhow::{Context, Result};

use crate::display::Display;
use crate::platform::DisplayService;
use crate::registry::DisplayRegistry;
use crate::selector::Selector;

/// State change requested by `enable` / `disable` / `toggle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Enable,
    Disable,
    Toggle,
}

impl Operation {
    fn apply<S: DisplayService>(
        self,
        display: &mut Display,
        registry: &DisplayRegistry<S>,
    ) -> crate::Result<()> {
        match self {
            Operation::Enable => display.enable_hdr(registry),
            Operation::Disable => display.disable_hdr(registry),
            Operation::Toggle => display.toggle_hdr(registry),
        }
    }
}

fn print_display_info<S: DisplayService>(
    out: &mut impl Write,
    registry: &DisplayRegistry<S>,
    display: &Display,
) -> Result<()> {
    let adapter_path = registry
        .service()
        .adapter_name(display.adapter_id())
        .with_context(|| format!("Failed to resolve adapter of target {}", display.target_id()))?;

    writeln!(out, "Target ID     : {}", display.target_id())?;
    writeln!(out, "Target name   : {}", display.name())?;
    writeln!(out, "Adapter ID    : {}", display.adapter_id())?;
    writeln!(out, "Adapter path  : {}", adapter_path)?;
    writeln!(out, "HDR status    : {}", display.status())?;
    Ok(())
}

/// `list`: every active display with its identifiers and HDR status.
pub fn list_displays<S: DisplayService>(
    out: &mut impl Write,
    registry: &DisplayRegistry<S>,
) -> Result<()> {
    let displays = registry
        .query_all_displays()
        .context("Failed to enumerate displays")?;

    for display in &displays {
        print_display_info(out, registry, display)?;
        writeln!(out)?;
    }
    Ok(())
}

/// `status`: `HDR` or `SDR` for each selected display, one per line.
pub fn print_status<S: DisplayService>(
    out: &mut impl Write,
    registry: &DisplayRegistry<S>,
    selector: &Selector,
) -> Result<()> {
    let displays = selector.apply(registry.query_all_displays()?)?;

    for display in &displays {
        writeln!(out, "{}", if display.is_hdr_enabled() { "HDR" } else { "SDR" })?;
    }
    Ok(())
}

/// `enable` / `disable` / `toggle` on each selected display, in registry order.
///
/// Stops at the first failure; displays already changed stay changed.
pub fn change_hdr<S: DisplayService>(
    out: &mut impl Write,
    registry: &DisplayRegistry<S>,
    selector: &Selector,
    operation: Operation,
) -> Result<()> {
    let displays = selector.apply(registry.query_all_displays()?)?;

    for mut display in displays {
        print_display_info(out, registry, &display)?;

        operation.apply(&mut display, registry)?;

        writeln!(out, "New status    : {}", display.status())?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
