use std::{fs, time::Duration};

use config::{Config, Error, Shortcut, load_from_path, parse_str};
use tempfile::TempDir;
use win_keycode::KeyTokens;

#[test]
fn first_run_writes_the_sample() {
    let dir = TempDir::new().expect("tmp");
    let path = dir.path().join("nested").join("config.json");

    let err = load_from_path(&path).expect_err("first run");
    assert!(matches!(&err, Error::CreatedDefault { path: p } if p == &path));

    let loaded = load_from_path(&path).expect("second run");
    assert_eq!(loaded, Config::sample());
    assert_eq!(loaded.shortcuts.len(), 4);
    assert_eq!(loaded.shortcuts[3].launch_path, "finduwp:WindowsTerminal");

    let text = fs::read_to_string(&path).expect("read");
    assert!(text.contains("\"processName\": \"Code\""));
    assert!(text.contains(r#"C:\\Program Files\\Microsoft VS Code\\Code.exe"#));
}

#[test]
fn camel_and_pascal_case_fields() {
    let camel = r#"{ "shortcuts": [ { "hotkey": "Alt+F9", "processName": "Code", "launchPath": "path:code" } ] }"#;
    let pascal = r#"{ "Shortcuts": [ { "Hotkey": "Alt+F9", "ProcessName": "Code", "LaunchPath": "path:code" } ] }"#;
    let a = parse_str(camel, None).expect("camel");
    let b = parse_str(pascal, None).expect("pascal");
    assert_eq!(a, b);
    assert_eq!(
        a.shortcuts,
        vec![Shortcut {
            hotkey: "Alt+F9".into(),
            process_name: "Code".into(),
            launch_path: "path:code".into(),
        }]
    );
}

#[test]
fn optional_settings() {
    let src = r#"{
        "shortcuts": [ { "hotkey": "Alt+1", "processName": "a", "launchPath": "a.exe" } ],
        "reloadHotkey": "Ctrl+Alt+R",
        "lookupTimeoutSecs": 3,
        "strictHotkeys": true
    }"#;
    let c = parse_str(src, None).expect("parse");
    assert_eq!(c.reload_hotkey.as_deref(), Some("Ctrl+Alt+R"));
    assert_eq!(c.lookup_timeout(), Duration::from_secs(3));
    assert_eq!(c.key_tokens(), KeyTokens::Single);

    let c = Config::sample();
    assert_eq!(c.lookup_timeout(), Duration::from_secs(10));
    assert_eq!(c.key_tokens(), KeyTokens::LastWins);
}

#[test]
fn empty_shortcut_list_is_invalid() {
    for src in [r#"{ "shortcuts": [] }"#, "{}"] {
        let err = parse_str(src, None).expect_err("invalid");
        assert!(matches!(err, Error::Validation { .. }), "{src}");
        assert!(err.pretty().contains("No shortcuts defined"));
    }
}

#[test]
fn zero_timeout_is_invalid() {
    let src = r#"{ "shortcuts": [ { "hotkey": "Alt+1", "processName": "a", "launchPath": "a" } ], "lookupTimeoutSecs": 0 }"#;
    assert!(matches!(parse_str(src, None), Err(Error::Validation { .. })));
}

#[test]
fn syntax_errors_have_location_and_hints() {
    let dir = TempDir::new().expect("tmp");
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        "{\n  \"shortcuts\": [\n    { \"hotkey\": \"Alt+1\" \"processName\": \"a\", \"launchPath\": \"a\" }\n  ]\n}\n",
    )
    .expect("write");

    let err = load_from_path(&path).expect_err("syntax");
    let Error::Parse { line, message, .. } = &err else {
        panic!("unexpected {err:?}");
    };
    assert_eq!(*line, 3);
    assert!(!message.contains("at line"));
    let pretty = err.pretty();
    assert!(pretty.contains("Common issues"));
    assert!(pretty.contains("    3 |"));
}

#[test]
fn single_backslash_is_a_parse_error() {
    let src = r#"{ "shortcuts": [ { "hotkey": "Alt+1", "processName": "a", "launchPath": "C:\Apps\a.exe" } ] }"#;
    assert!(matches!(parse_str(src, None), Err(Error::Parse { .. })));
}
