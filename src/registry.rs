//! Compiled binding tables
//!
//! The registry turns the ordered binding list into two lookup tables, one
//! keyed by gesture and one by finger pattern. Each entry is a [`Dispatch`]:
//! the resolved target addresses plus the command to send them.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{Action, Binding, Config, FingerPattern, Gesture};
use crate::device::{Command, Device, Serial};
use crate::selector;

/// Resolved command for one binding
///
/// A dispatch with no targets, or without a command, is still a registered
/// binding; sending it does nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub targets: Vec<Serial>,
    pub command: Option<Command>,
}

impl Dispatch {
    /// Returns true if sending this dispatch reaches no device
    pub fn is_noop(&self) -> bool {
        self.targets.is_empty() || self.command.is_none()
    }
}

/// Immutable lookup tables built from a configuration and a roster
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingRegistry {
    gestures: HashMap<Gesture, Dispatch>,
    patterns: HashMap<FingerPattern, Dispatch>,
}

impl BindingRegistry {
    /// Compiles `config.bindings` against `roster`
    ///
    /// Bindings are applied in declaration order, so a later binding for the
    /// same gesture or pattern replaces an earlier one.
    pub fn build(config: &Config, roster: &[Device]) -> Self {
        let transition = Duration::from_millis(u64::try_from(config.general.transition_ms).unwrap_or(0));
        let mut registry = Self::default();

        for (index, binding) in config.bindings.iter().enumerate() {
            let dispatch = Dispatch {
                targets: selector::resolve(&binding.selector, roster),
                command: build_command(binding, transition),
            };

            if dispatch.targets.is_empty() {
                warn!(index, selector = ?binding.selector, "Binding matches no device");
            }

            match (&binding.gesture, &binding.pattern) {
                (Some(gesture), _) => {
                    if registry.gestures.insert(gesture.clone(), dispatch).is_some() {
                        debug!(index, %gesture, "Binding overrides an earlier gesture binding");
                    }
                }
                (None, Some(pattern)) => {
                    if registry.patterns.insert(*pattern, dispatch).is_some() {
                        debug!(index, %pattern, "Binding overrides an earlier pattern binding");
                    }
                }
                (None, None) => warn!(index, "Binding has neither gesture nor pattern"),
            }
        }

        debug!(
            gestures = registry.gestures.len(),
            patterns = registry.patterns.len(),
            devices = roster.len(),
            "Binding registry built"
        );
        registry
    }

    /// Looks up the dispatch bound to `gesture`
    pub fn gesture(&self, gesture: &Gesture) -> Option<&Dispatch> {
        self.gestures.get(gesture)
    }

    /// Looks up the dispatch bound to `pattern`
    pub fn pattern(&self, pattern: &FingerPattern) -> Option<&Dispatch> {
        self.patterns.get(pattern)
    }

    pub fn gesture_count(&self) -> usize {
        self.gestures.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty() && self.patterns.is_empty()
    }
}

fn build_command(binding: &Binding, transition: Duration) -> Option<Command> {
    match binding.action.as_ref()? {
        Action::PowerOn => Some(Command::power_on()),
        Action::PowerOff => Some(Command::power_off()),
        Action::SetColor => Some(Command::SetColor {
            hsbk: binding.hsbk.unwrap_or_default(),
            duration: transition,
        }),
        Action::Unknown(action) => {
            warn!(%action, "Unrecognised action, binding will do nothing");
            None
        }
    }
}

/// Registry snapshot shared between the router and whoever rebuilds it
///
/// Readers take an `Arc` to the current tables and keep using it for the
/// whole event; a rebuild swaps in a new registry without touching the one
/// being read.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    current: RwLock<Arc<BindingRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: BindingRegistry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// Current tables
    pub fn snapshot(&self) -> Arc<BindingRegistry> {
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Replaces the tables wholesale
    pub fn replace(&self, registry: BindingRegistry) {
        let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(registry);
    }

    /// Rebuilds the tables from `config` and a fresh roster
    pub fn rebuild(&self, config: &Config, roster: &[Device]) {
        self.replace(BindingRegistry::build(config, roster));
    }
}
