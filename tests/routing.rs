//! End-to-end routing: configuration to light commands

use std::sync::{Arc, Mutex};
use std::time::Duration;

use gesture_lights::config::{Action, Binding, Config, FingerPattern, Gesture, Hsbk, Selector, SelectorType};
use gesture_lights::device::{Command, Device, LightController, Serial};
use gesture_lights::registry::{BindingRegistry, SharedRegistry};
use gesture_lights::router::{Event, EventRouter, Hand, HandLabel, Routed};
use gesture_lights::selector;

/// Controller that records every send
#[derive(Default)]
struct Recorder {
    roster: Vec<Device>,
    sent: Mutex<Vec<(Serial, Command)>>,
}

impl LightController for Recorder {
    fn devices(&self) -> Vec<Device> {
        self.roster.clone()
    }

    fn send(&self, serial: Serial, command: &Command) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push((serial, command.clone()));
        Ok(())
    }
}

fn s(last: u8) -> Serial {
    Serial::new([0xd0, 0x73, 0xd5, 0x00, 0x00, last])
}

fn roster() -> Vec<Device> {
    vec![
        Device::new(s(0), "label0", "group0", "locA"),
        Device::new(s(1), "label1", "group1", "locB"),
    ]
}

fn router(bindings: Vec<Binding>) -> EventRouter<Arc<Recorder>> {
    let recorder = Arc::new(Recorder {
        roster: roster(),
        ..Recorder::default()
    });
    let registry = BindingRegistry::build(&Config::with_bindings(bindings), &recorder.devices());
    EventRouter::new(recorder, Arc::new(SharedRegistry::new(registry)))
}

fn sent(router: &EventRouter<Arc<Recorder>>) -> Vec<(Serial, Command)> {
    router.controller().sent.lock().unwrap().clone()
}

fn two_hands(left: Gesture, right: Gesture) -> Event {
    Event::new(vec![
        Hand::new(HandLabel::Left).with_gesture(left),
        Hand::new(HandLabel::Right).with_gesture(right),
    ])
}

#[test]
fn test_gesture_beats_finger_pattern() {
    let router = router(vec![
        Binding::gesture(Gesture::SwipeLeft, Action::PowerOff, Selector::serial(s(0))),
        Binding::pattern(FingerPattern::OPEN, Action::PowerOn, Selector::serial(s(0))),
    ]);

    let event = Event::parse_line(
        r#"{"hands":[{"label":"right","fingers":[1,1,1,1,1],"gesture":"swipe_left"}]}"#,
    )
    .unwrap();
    let routed = router.handle_event(&event);

    assert_eq!(
        routed,
        vec![Routed::Gesture {
            hand: HandLabel::Right,
            gesture: Gesture::SwipeLeft,
        }]
    );
    assert_eq!(sent(&router), vec![(s(0), Command::power_off())]);
}

#[test]
fn test_compound_takes_precedence() {
    let router = router(vec![
        Binding::gesture(Gesture::SwipeLeft, Action::PowerOff, Selector::all()),
        Binding::gesture(Gesture::SwipeRight, Action::PowerOff, Selector::all()),
        Binding::gesture(Gesture::Expand, Action::PowerOn, Selector::serial(s(1))),
    ]);

    let routed = router.handle_event(&two_hands(Gesture::SwipeLeft, Gesture::SwipeRight));

    assert_eq!(routed, vec![Routed::Compound(Gesture::Expand)]);
    assert_eq!(sent(&router), vec![(s(1), Command::power_on())]);
}

#[test]
fn test_unbound_compound_falls_back_to_each_hand() {
    let router = router(vec![
        Binding::gesture(Gesture::SwipeUp, Action::PowerOn, Selector::new(SelectorType::Label, "label0")),
    ]);

    let routed = router.handle_event(&two_hands(Gesture::SwipeUp, Gesture::SwipeUp));

    assert_eq!(routed.len(), 2);
    assert_eq!(
        sent(&router),
        vec![(s(0), Command::power_on()), (s(0), Command::power_on())]
    );
}

#[test]
fn test_no_bindings_no_dispatch() {
    let router = router(Vec::new());

    router.handle_event(&two_hands(Gesture::SwipeLeft, Gesture::SwipeRight));
    router.handle_event(&Event::new(vec![
        Hand::new(HandLabel::Left).with_fingers(FingerPattern::OPEN),
    ]));

    assert!(sent(&router).is_empty());
}

#[test]
fn test_last_binding_wins() {
    let router = router(vec![
        Binding::gesture(Gesture::SwipeDown, Action::PowerOn, Selector::all()),
        Binding::gesture(Gesture::SwipeDown, Action::PowerOff, Selector::serial(s(1))),
    ]);

    router.handle_event(&Event::new(vec![
        Hand::new(HandLabel::Left).with_gesture(Gesture::SwipeDown),
    ]));

    assert_eq!(sent(&router), vec![(s(1), Command::power_off())]);
}

#[test]
fn test_set_color_carries_transition() {
    let hsbk = Hsbk {
        hue: Some(120.0),
        saturation: Some(100.0),
        brightness: Some(50.0),
        kelvin: None,
    };
    let mut config = Config::with_bindings(vec![
        Binding::pattern(FingerPattern([0, 1, 1, 0, 0]), Action::SetColor, Selector::new(SelectorType::Location, "locB"))
            .with_hsbk(hsbk),
    ]);
    config.general.transition_ms = 250;

    let recorder = Arc::new(Recorder {
        roster: roster(),
        ..Recorder::default()
    });
    let registry = BindingRegistry::build(&config, &recorder.devices());
    let router = EventRouter::new(recorder, Arc::new(SharedRegistry::new(registry)));

    router.handle_event(&Event::new(vec![
        Hand::new(HandLabel::Left).with_fingers(FingerPattern([0, 1, 1, 0, 0])),
    ]));

    assert_eq!(
        sent(&router),
        vec![(
            s(1),
            Command::SetColor {
                hsbk,
                duration: Duration::from_millis(250),
            }
        )]
    );
}

#[test]
fn test_selector_resolution() {
    let roster = roster();

    assert_eq!(
        selector::resolve(&Selector::new(SelectorType::Group, "group0"), &roster),
        vec![s(0)]
    );
    assert_eq!(selector::resolve(&Selector::all(), &roster), vec![s(0), s(1)]);
    assert_eq!(selector::resolve(&Selector::serial(s(1)), &roster), vec![s(1)]);
    assert_eq!(selector::resolve(&Selector::serial(s(1)), &[]), vec![s(1)]);
}

#[test]
fn test_registry_build_is_idempotent() {
    let config = Config::with_bindings(vec![
        Binding::gesture(Gesture::PushDown, Action::PowerOff, Selector::all()),
        Binding::pattern(FingerPattern::CLOSED, Action::PowerOff, Selector::new(SelectorType::Label, "label1")),
        Binding::pattern(FingerPattern::OPEN, Action::PowerOn, Selector::new(SelectorType::Group, "nowhere")),
    ]);
    let roster = roster();

    let first = BindingRegistry::build(&config, &roster);
    let second = BindingRegistry::build(&config, &roster);

    assert_eq!(first.gesture(&Gesture::PushDown), second.gesture(&Gesture::PushDown));
    for pattern in [FingerPattern::OPEN, FingerPattern::CLOSED, FingerPattern([1, 0, 0, 0, 0])] {
        assert_eq!(first.pattern(&pattern), second.pattern(&pattern));
    }
}

#[test]
fn test_rebuild_changes_routing() {
    let router = router(vec![Binding::gesture(Gesture::SwipeLeft, Action::PowerOn, Selector::all())]);
    let event = Event::new(vec![Hand::new(HandLabel::Left).with_gesture(Gesture::SwipeLeft)]);

    router.handle_event(&event);
    assert_eq!(sent(&router).len(), 2);

    router.registry().rebuild(&Config::default(), &roster());
    router.handle_event(&event);
    assert_eq!(sent(&router).len(), 2);
}
