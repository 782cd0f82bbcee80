//! Resolves abstract selectors against a device roster

use tracing::warn;

use crate::config::{Selector, SelectorType};
use crate::device::{Device, Serial};

/// Returns the addresses selected by `selector`, in roster order
///
/// Attribute matches are exact and case-sensitive. A serial selector yields
/// its address whether or not the roster knows it. No match is an empty
/// result, not an error.
pub fn resolve(selector: &Selector, roster: &[Device]) -> Vec<Serial> {
    match &selector.kind {
        SelectorType::All => collect(roster, |_| true),
        SelectorType::Label => collect(roster, |d| d.label == selector.value),
        SelectorType::Group => collect(roster, |d| d.group == selector.value),
        SelectorType::Location => collect(roster, |d| d.location == selector.value),
        SelectorType::Serial => match selector.serial.or_else(|| selector.value.parse().ok()) {
            Some(serial) => vec![serial],
            None => {
                warn!(value = %selector.value, "Serial selector has no valid address");
                Vec::new()
            }
        },
        SelectorType::Unknown(kind) => {
            warn!(%kind, "Unknown selector type matches no device");
            Vec::new()
        }
    }
}

/// Addresses of matching devices, first occurrence wins
fn collect(roster: &[Device], matches: impl Fn(&Device) -> bool) -> Vec<Serial> {
    let mut serials = Vec::new();
    for device in roster.iter().filter(|d| matches(d)) {
        if !serials.contains(&device.serial) {
            serials.push(device.serial);
        }
    }
    serials
}
