//! User settings commands.

use clap::Subcommand;
use studypro_core::Settings;

use crate::common::{open_kv, print_json, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print all settings as JSON
    Show,
    /// Get one value by dot-separated key (e.g. preferences.timezone)
    Get {
        /// Settings key
        key: String,
    },
    /// Set one value by dot-separated key
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// Restore defaults
    Reset,
}

pub fn run(action: SettingsAction) -> CliResult {
    let kv = open_kv()?;
    let mut settings = Settings::load(&kv)?;

    match action {
        SettingsAction::Show => print_json(&settings)?,
        SettingsAction::Get { key } => match settings.get(&key) {
            Some(value) => println!("{value}"),
            None => println!("Unknown settings key: {key}"),
        },
        SettingsAction::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(&kv)?;
            println!("{key} = {value}");
        }
        SettingsAction::Reset => {
            let defaults = Settings::default();
            defaults.save(&kv)?;
            println!("Settings restored to defaults");
        }
    }
    Ok(())
}
