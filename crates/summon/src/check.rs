//! Offline subcommands: validate a config and resolve a single expression.

use std::{path::Path, process::ExitCode};

use config::Config;
use launch::Resolver;
use tokio::runtime;
use win_keycode::Chord;

/// Print one line per shortcut with its parsed chord and launch target.
/// Returns whether every entry is usable.
pub fn report(cfg: &Config) -> bool {
    let policy = cfg.key_tokens();
    let resolver = Resolver::default();
    let mut ok = true;
    for (id, s) in cfg.shortcuts.iter().enumerate() {
        let chord = match Chord::parse_with(&s.hotkey, policy) {
            Ok(c) => c.to_string(),
            Err(e) => {
                ok = false;
                format!("error: {e}")
            }
        };
        let target = match resolver.classify(&s.launch_path) {
            Ok(t) => t.to_string(),
            Err(e) => {
                ok = false;
                format!("error: {e}")
            }
        };
        println!("{id:>3}  {chord:<24} {:<20} {target}", s.process_name);
    }
    if let Some(hotkey) = &cfg.reload_hotkey {
        match Chord::parse_with(hotkey, policy) {
            Ok(c) => println!("reload  {c}"),
            Err(e) => {
                ok = false;
                println!("reload  error: {e}");
            }
        }
    }
    ok
}

/// `summon check`: load `path` and report on every entry without binding.
pub fn check(path: &Path, dump: bool) -> ExitCode {
    if !path.exists() {
        eprintln!("Config file not found: {}", path.display());
        return ExitCode::FAILURE;
    }
    let cfg = match config::load_from_path(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e.pretty());
            return ExitCode::FAILURE;
        }
    };
    if dump {
        match serde_json::to_string_pretty(&cfg) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize config: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }
    if report(&cfg) {
        println!("OK");
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// `summon resolve`: run the launch resolver on one expression.
pub fn resolve(expr: &str) -> ExitCode {
    let rt = match runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolver = Resolver::default();
    match rt.block_on(resolver.resolve(expr)) {
        Ok(r) => {
            println!("{r}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
