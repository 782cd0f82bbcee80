//! Two-hand gestures derived from the primitive gestures of both hands

use crate::config::Gesture;

use super::event::HandIndex;

/// A compound gesture and the primitive each hand must report
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundRule {
    pub gesture: Gesture,
    pub left: Gesture,
    pub right: Gesture,
}

impl CompoundRule {
    pub fn new(gesture: Gesture, left: Gesture, right: Gesture) -> Self {
        Self {
            gesture,
            left,
            right,
        }
    }

    /// Returns true when both hands report this rule's primitives
    pub fn matches(&self, hands: &HandIndex<'_>) -> bool {
        hands.left_gesture() == Some(&self.left) && hands.right_gesture() == Some(&self.right)
    }
}

/// Built-in compound gestures, in evaluation order
///
/// No two rules share a primitive pair, so at most one matches an event.
pub fn default_rules() -> Vec<CompoundRule> {
    vec![
        CompoundRule::new(Gesture::Expand, Gesture::SwipeLeft, Gesture::SwipeRight),
        CompoundRule::new(Gesture::Contract, Gesture::SwipeRight, Gesture::SwipeLeft),
        CompoundRule::new(Gesture::PullUp, Gesture::SwipeUp, Gesture::SwipeUp),
        CompoundRule::new(Gesture::PushDown, Gesture::SwipeDown, Gesture::SwipeDown),
    ]
}

/// First rule matching `hands`
pub fn detect<'r>(rules: &'r [CompoundRule], hands: &HandIndex<'_>) -> Option<&'r CompoundRule> {
    rules.iter().find(|rule| rule.matches(hands))
}
