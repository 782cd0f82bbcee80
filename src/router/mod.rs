//! Event routing
//!
//! Turns each hand-tracking event into at most one command per hand:
//!
//! ```text
//! Event ─ index hands by label
//!           │
//!           ├─ compound rule matches and is bound? ─ dispatch, done
//!           │
//!           └─ for each hand, in event order:
//!                gesture bound?  ─ dispatch
//!                pattern bound?  ─ dispatch
//!                otherwise       ─ unmatched (warning)
//! ```
//!
//! Gestures win over finger patterns, and two-hand gestures win over
//! single-hand ones. Events are handled one at a time and every dispatch
//! completes before the call returns.

mod compound;
mod event;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{FingerPattern, Gesture};
use crate::device::{LightController, Serial};
use crate::registry::{BindingRegistry, Dispatch, SharedRegistry};

pub use compound::{CompoundRule, default_rules, detect};
pub use event::{Event, Hand, HandIndex, HandLabel};

/// A send that failed part-way through a dispatch
#[derive(Debug, thiserror::Error)]
#[error("failed to send {command} to {serial} ({sent} of {targets} sent)")]
pub struct DispatchError {
    pub serial: Serial,
    pub command: &'static str,
    /// Devices commanded before the failure
    pub sent: usize,
    pub targets: usize,
    #[source]
    pub source: anyhow::Error,
}

/// Sends a dispatch to each of its targets in order, stopping at the first
/// failure
///
/// Returns the number of devices commanded. Devices already commanded when
/// a send fails are not rolled back.
pub fn dispatch<C>(controller: &C, dispatch: &Dispatch) -> Result<usize, DispatchError>
where
    C: LightController + ?Sized,
{
    let Some(command) = &dispatch.command else {
        return Ok(0);
    };

    for (sent, &serial) in dispatch.targets.iter().enumerate() {
        controller
            .send(serial, command)
            .map_err(|source| DispatchError {
                serial,
                command: command.name(),
                sent,
                targets: dispatch.targets.len(),
                source,
            })?;
    }
    Ok(dispatch.targets.len())
}

/// What the router did with (part of) an event
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    /// A two-hand gesture consumed the whole event
    Compound(Gesture),
    /// A hand's gesture was bound
    Gesture { hand: HandLabel, gesture: Gesture },
    /// A hand's finger pattern was bound
    Pattern {
        hand: HandLabel,
        pattern: FingerPattern,
    },
    /// Nothing was bound for this hand
    Unmatched { hand: HandLabel },
}

/// Routes events to the lights through the current binding registry
pub struct EventRouter<C> {
    controller: C,
    registry: Arc<SharedRegistry>,
    rules: Vec<CompoundRule>,
}

impl<C: LightController> EventRouter<C> {
    /// Creates a router using the built-in compound gestures
    pub fn new(controller: C, registry: Arc<SharedRegistry>) -> Self {
        Self::with_rules(controller, registry, default_rules())
    }

    pub fn with_rules(controller: C, registry: Arc<SharedRegistry>, rules: Vec<CompoundRule>) -> Self {
        Self {
            controller,
            registry,
            rules,
        }
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn registry(&self) -> &Arc<SharedRegistry> {
        &self.registry
    }

    /// Handles one event against a consistent snapshot of the registry
    ///
    /// Send failures are logged and never stop routing.
    pub fn handle_event(&self, event: &Event) -> Vec<Routed> {
        let registry = self.registry.snapshot();
        let hands = event.by_label();

        if let Some(rule) = detect(&self.rules, &hands) {
            match registry.gesture(&rule.gesture) {
                Some(entry) => {
                    self.send(entry, &rule.gesture);
                    return vec![Routed::Compound(rule.gesture.clone())];
                }
                None => {
                    warn!(gesture = %rule.gesture, "No binding for compound gesture, falling back to single hands");
                }
            }
        }

        event
            .hands
            .iter()
            .map(|hand| self.route_hand(&registry, hand))
            .collect()
    }

    fn route_hand(&self, registry: &BindingRegistry, hand: &Hand) -> Routed {
        if let Some(gesture) = &hand.gesture {
            if let Some(entry) = registry.gesture(gesture) {
                self.send(entry, gesture);
                return Routed::Gesture {
                    hand: hand.label,
                    gesture: gesture.clone(),
                };
            }
            warn!(hand = %hand.label, %gesture, "No binding for gesture");
        }

        if let Some(pattern) = &hand.fingers {
            if let Some(entry) = registry.pattern(pattern) {
                self.send(entry, pattern);
                return Routed::Pattern {
                    hand: hand.label,
                    pattern: *pattern,
                };
            }
            warn!(hand = %hand.label, %pattern, "No binding for finger pattern");
        }

        Routed::Unmatched { hand: hand.label }
    }

    fn send(&self, entry: &Dispatch, trigger: &dyn std::fmt::Display) {
        match dispatch(&self.controller, entry) {
            Ok(sent) => debug!(%trigger, sent, "Dispatched"),
            Err(e) => warn!(%trigger, error = %e, cause = %e.source, "Dispatch failed"),
        }
    }
}
