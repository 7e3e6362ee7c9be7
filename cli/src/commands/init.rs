//! Configuration template writer.

use crate::error::CliError;
use taskchain_core::config;

const CONFIG_TEMPLATE: &str = r#"# taskchain configuration
#
# owner_id scopes every operation to one user's chain. Leave it empty and
# the CLI refuses to touch the remote store.
owner_id = ""

[backend]
base_url = "https://YOUR-PROJECT.supabase.co"
anon_key = "YOUR-ANON-KEY"
table = "tasks"
timeout_ms = 10000

[logging]
enabled = true
console = true
file = false
level = "info"
"#;

pub fn handle_init() -> Result<(), CliError> {
    let dir = config::get_data_dir().map_err(|e| CliError::Config(e.to_string()))?;
    let config_path = dir.join("config.toml");

    if config_path.exists() {
        println!(
            "Configuration file already exists at: {}",
            config_path.display()
        );
        println!("To reconfigure, edit the file directly or delete it and run init again.");
        return Ok(());
    }

    std::fs::create_dir_all(&dir)
        .map_err(|e| CliError::Command(format!("Failed to create data directory: {}", e)))?;
    std::fs::write(&config_path, CONFIG_TEMPLATE)
        .map_err(|e| CliError::Command(format!("Failed to write configuration: {}", e)))?;

    println!("Wrote configuration template to: {}", config_path.display());
    println!("Fill in base_url, anon_key, and owner_id before running commands.");
    Ok(())
}
