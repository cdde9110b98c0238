use anyhow::Result;

use crate::config::{self, Config};

/// Show the effective configuration after file, environment and CLI layers.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let path = config::config_file_path();
    println!("Config file: {}", path.display());
    let exists = path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  data_dir: {}", config.data_dir().display());
    println!("  format: {}", config.format);
    println!("  log_level: {}", config.log_level);

    println!("\nDocuments:");
    println!("  songs: {}", config.document_path::<songbook_core::Song>().display());
    println!("  artists: {}", config.document_path::<songbook_core::Artist>().display());

    println!("\nPriority: CLI args > ENV vars (SONGBOOK_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", path.display());
        println!("\nEdit this file to configure songbook.");
    } else {
        println!("Config file already exists: {}", path.display());
    }

    Ok(())
}
