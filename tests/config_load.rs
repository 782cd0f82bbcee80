//! Loading user configuration files from disk

use std::fs;

use gesture_lights::config::{Config, ConfigError, Gesture, LogLevel, read_overlay};

#[test]
fn test_empty_file_yields_defaults_and_is_completed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config, Config::default());

    let overlay = read_overlay(&path).unwrap();
    assert!(overlay.general.is_some());
    assert!(overlay.logging.is_some());
    assert!(overlay.tracking.is_some());
}

#[test]
fn test_user_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[logging]
level = "warn"

[tracking]
frame_skip = 2
gesture_threshold = 0.5

[[bindings]]
gesture = "expand"
action = "power_on"
selector = { type = "location", value = "Home" }
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.logging.level, LogLevel::Warn);
    assert_eq!(config.tracking.frame_skip, 2);
    assert_eq!(config.tracking.buffer_size, 5);
    assert_eq!(config.tracking.gesture_threshold, 0.5);
    assert_eq!(config.general, Config::default().general);
    assert_eq!(config.bindings[0].gesture, Some(Gesture::Expand));
}

#[test]
fn test_validation_errors_name_the_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let cases = [
        ("[general]\ntransition_ms = 0\n", "general.transition_ms: must be > 0"),
        ("[general]\ntransition_ms = -5\n", "general.transition_ms: must be > 0"),
        ("[tracking]\nbuffer_size = -1\n", "tracking.buffer_size: must be > 0"),
        ("[tracking]\ngesture_threshold = 0.0\n", "tracking.gesture_threshold: must be > 0.0"),
        ("[tracking]\ngesture_threshold = 1.2\n", "tracking.gesture_threshold: must be <= 1.0"),
        (
            "[[bindings]]\ngesture = \"wave\"\naction = \"power_on\"\nselector = { type = \"all\" }\n",
            "bindings[0].gesture: invalid gesture: wave",
        ),
        (
            "[[bindings]]\npattern = [1, 2, 0, 0, 0]\naction = \"power_on\"\nselector = { type = \"all\" }\n",
            "bindings[0].pattern: pattern should only contain 0s & 1s",
        ),
        (
            "[[bindings]]\ngesture = \"swipe_up\"\naction = \"set_color\"\nselector = { type = \"all\" }\nhsbk = { kelvin = 70000 }\n",
            "bindings[0].hsbk: invalid value for kelvin [70000], must be 1500-9000",
        ),
    ];

    for (text, expected) in cases {
        fs::write(&path, text).unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }), "{text}");
        assert_eq!(err.to_string(), expected);
        // Rejected files are left as written
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }
}
