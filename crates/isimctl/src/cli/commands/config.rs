use anyhow::Result;
use isimctl_common::CliConfig;
use std::path::PathBuf;

use crate::cli::ConfigCommands;
use crate::config::{generate_default_config, load_config, resolve_config_path, save_config};

/// Run config management commands
pub async fn run(command: ConfigCommands, path: &Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => init_config(path, force),
        ConfigCommands::Show => show_config(path),
        ConfigCommands::Set { key, value } => set_config(path, &key, &value),
    }
}

fn init_config(path: &Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = resolve_config_path(path);

    if config_path.exists() && !force {
        println!("Config file already exists at: {:?}", config_path);
        println!("Use --force to overwrite.");
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&config_path, generate_default_config())?;

    println!("Created config file: {:?}", config_path);

    Ok(())
}

fn show_config(path: &Option<PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(path);

    if config_path.exists() {
        println!("Config file: {:?}\n", config_path);
    } else {
        println!("No config file found at: {:?} (showing defaults)", config_path);
        println!("Run 'isimctl config init' to create one.\n");
    }

    let config = load_config(path)?;
    println!("{}", render_config(&config));

    Ok(())
}

fn render_config(config: &CliConfig) -> String {
    [
        "[xcrun]".to_string(),
        format!("  program = {:?}", config.xcrun.program),
        String::new(),
        "[simulator]".to_string(),
        format!("  open_program = {:?}", config.simulator.open_program),
        format!("  app_name = {:?}", config.simulator.app_name),
        String::new(),
        "[ui]".to_string(),
        format!("  color = {}", config.ui.color),
    ]
    .join("\n")
}

fn set_config(path: &Option<PathBuf>, key: &str, value: &str) -> Result<()> {
    let mut config = load_config(path)?;
    apply_setting(&mut config, key, value)?;
    save_config(&config, path)?;
    println!("Set {} = {}", key, value);

    Ok(())
}

fn apply_setting(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let Some((section, name)) = key.split_once('.') else {
        anyhow::bail!("Invalid key format. Use 'section.key' (e.g., 'xcrun.program')");
    };

    match (section, name) {
        ("xcrun", "program") => config.xcrun.program = non_empty(key, value)?,
        ("simulator", "open_program") => config.simulator.open_program = non_empty(key, value)?,
        ("simulator", "app_name") => config.simulator.app_name = non_empty(key, value)?,
        ("ui", "color") => config.ui.color = value.parse()?,
        _ => anyhow::bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        anyhow::bail!("{} must not be empty", key);
    }
    Ok(value.to_string())
}
