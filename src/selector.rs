// Display selection: narrow the enumerated displays to the ones a command acts on

use crate::display::Display;
use crate::error::{HdrError, Result};

/// Which displays a command applies to.
///
/// - `All`: every active display, in registry order.
/// - `ByIndex(n)`: the n-th display in registry order (0-based).
/// - `ById(id)`: the first display with that target id.
/// - `ByName(text)`: every display whose name equals `text`, ignoring case. If no
///   name is equal, every display whose name contains `text`, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    ByIndex(usize),
    ById(u32),
    ByName(String),
}

impl Default for Selector {
    fn default() -> Self {
        Self::ByIndex(0)
    }
}

impl Selector {
    /// Narrow `displays` to the selected subset, keeping registry order.
    ///
    /// Pure: no display is touched or re-queried.
    pub fn apply(&self, displays: Vec<Display>) -> Result<Vec<Display>> {
        match self {
            Selector::All => Ok(displays),

            Selector::ByIndex(index) => {
                let count = displays.len();
                displays
                    .into_iter()
                    .nth(*index)
                    .map(|display| vec![display])
                    .ok_or(HdrError::IndexOutOfRange {
                        index: *index,
                        count,
                    })
            }

            Selector::ById(target_id) => displays
                .into_iter()
                .find(|display| display.target_id() == *target_id)
                .map(|display| vec![display])
                .ok_or(HdrError::IdNotFound(*target_id)),

            Selector::ByName(name) => {
                let matched = match_name(displays, name);
                if matched.is_empty() {
                    Err(HdrError::NameNotFound(name.clone()))
                } else {
                    Ok(matched)
                }
            }
        }
    }
}

/// Case-insensitive name match, exact names first, then names containing `text`.
fn match_name(displays: Vec<Display>, text: &str) -> Vec<Display> {
    let wanted = text.to_uppercase();
    let (exact, rest): (Vec<Display>, Vec<Display>) = displays
        .into_iter()
        .partition(|display| display.name().to_uppercase() == wanted);

    // an empty query would otherwise be contained in every name
    if !exact.is_empty() || wanted.is_empty() {
        return exact;
    }
    rest.into_iter()
        .filter(|display| display.name().to_uppercase().contains(&wanted))
        .collect()
}
