//! Configuration management commands.

use std::path::PathBuf;

use anyhow::{bail, Result};
use loja_observability::{LogFormat, LogLevel};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Path => show_path(ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.config.storage.dir);
    ctx.output.kv("resolved", &ctx.storage_dir().display().to_string());

    ctx.output.info("[catalog]");
    ctx.output.kv("source", &ctx.config.catalog.source);

    ctx.output.info("[rates]");
    ctx.output.kv("enabled", &ctx.config.rates.enabled.to_string());
    ctx.output.kv("url", &ctx.config.rates.url);
    ctx.output.kv("ttl_hours", &ctx.config.rates.ttl_hours.to_string());

    ctx.output.info("[logging]");
    ctx.output
        .kv("level", ctx.config.logging.level.as_directive());
    ctx.output.kv(
        "format",
        match ctx.config.logging.format {
            LogFormat::Json => "json",
            LogFormat::Human => "human",
        },
    );

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = ctx.config_path.clone() else {
        bail!("No config file found. Run `loja config init` to create one.");
    };

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    let path: Option<PathBuf> = ctx.config_path.clone();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "path": path }));
    } else {
        match path {
            Some(path) => println!("{}", path.display()),
            None => ctx.output.info("No config file in use; defaults apply"),
        }
    }

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.validate();
    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    bail!("Configuration has {} error(s)", errors.len());
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["storage", "dir"] => Ok(config.storage.dir.clone()),
        ["catalog", "source"] => Ok(config.catalog.source.clone()),
        ["rates", "enabled"] => Ok(config.rates.enabled.to_string()),
        ["rates", "url"] => Ok(config.rates.url.clone()),
        ["rates", "ttl_hours"] => Ok(config.rates.ttl_hours.to_string()),
        ["logging", "level"] => Ok(config.logging.level.as_directive().to_string()),
        ["logging", "format"] => Ok(match config.logging.format {
            LogFormat::Json => "json".to_string(),
            LogFormat::Human => "human".to_string(),
        }),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["storage", "dir"] => config.storage.dir = value.to_string(),
        ["catalog", "source"] => config.catalog.source = value.to_string(),
        ["rates", "enabled"] => config.rates.enabled = value.parse()?,
        ["rates", "url"] => config.rates.url = value.to_string(),
        ["rates", "ttl_hours"] => config.rates.ttl_hours = value.parse()?,
        ["logging", "level"] => config.logging.level = value.parse::<LogLevel>()?,
        ["logging", "format"] => {
            config.logging.format = match value {
                "json" => LogFormat::Json,
                "human" => LogFormat::Human,
                other => bail!("Unknown log format: {}. Available: human, json", other),
            }
        }
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}
