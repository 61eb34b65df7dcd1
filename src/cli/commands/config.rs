//! Config command handler

use crate::args::ConfigSubcommand;
use prehealth_tracker::config::Config;
use std::io::{self, Write};

/// Show the stored config, or edit one key of it
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => {
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => fail(&format!("Unknown config key: '{key}'")),
            }
        }
        Some(ConfigSubcommand::Set { key, value }) => {
            config.set(&key, &value).unwrap_or_else(|e| fail(&e));
            save(config);
            // Track names are stored in canonical form
            let stored = config.get(&key).unwrap_or(value);
            println!("✓ Set {key} = {stored}");
        }
        Some(ConfigSubcommand::Unset { key }) => {
            config.unset(&key, defaults).unwrap_or_else(|e| fail(&e));
            save(config);
            println!("✓ Reset {key} to default");
        }
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

fn reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }
    if !confirm("Reset the stored config to defaults?") {
        println!("✗ Reset cancelled");
        return;
    }
    if let Err(e) = Config::reset() {
        fail(&format!("Failed to remove config file: {e}"));
    }
    println!("✓ Config reset to defaults");
}

fn confirm(question: &str) -> bool {
    print!("{question} (y/n): ");
    io::stdout().flush().ok();
    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn save(config: &Config) {
    if let Err(e) = config.save() {
        fail(&format!("Failed to save config: {e}"));
    }
}

fn fail(message: &str) -> ! {
    eprintln!("✗ {message}");
    std::process::exit(1);
}
