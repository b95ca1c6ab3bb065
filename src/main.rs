// SPDX-License-Identifier: Apache-2.0 OR MIT
use anyhow::{Context, Result};
use clap::Parser;
use log_channels::logging::{
    JsonFormatter, LineFormatter, NullHandler, PidProcessor, StreamHandler,
};
use log_channels::{Factory, Manager, ManagerConfig, ServiceMap, Severity};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug, PartialEq)]
enum Command {
    /// Parse and validate a channel configuration file
    Check {
        #[arg(long)]
        config: PathBuf,
    },
    /// Log one message through a configured channel
    Emit {
        #[arg(long)]
        config: PathBuf,
        /// Channel name (default channel if omitted)
        #[arg(long)]
        channel: Option<String>,
        #[arg(long, default_value = "info")]
        level: Severity,
        /// Context pair, repeatable
        #[arg(long = "kv", value_parser = parse_kv)]
        kvs: Vec<(String, String)>,
        message: String,
    },
}

fn parse_kv(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

/// Services configuration files can reference by key
fn builtin_services() -> ServiceMap {
    ServiceMap::new()
        .with_handler("handler.stderr", Arc::new(StreamHandler::stderr(Severity::Debug)))
        .with_handler("handler.stdout", Arc::new(StreamHandler::stdout(Severity::Debug)))
        .with_handler("handler.null", Arc::new(NullHandler::default()))
        .with_processor("processor.pid", Arc::new(PidProcessor))
        .with_formatter("formatter.line", Arc::new(LineFormatter))
        .with_formatter("formatter.json", Arc::new(JsonFormatter))
}

fn load(path: &Path) -> Result<ManagerConfig> {
    let config = ManagerConfig::load_from_file(path)?;
    config
        .validate()
        .with_context(|| format!("invalid config '{}'", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Check { config } => {
            let config = load(&config)?;
            let manager = Manager::from_config(&config, Factory::new());
            for name in manager.channel_names() {
                println!("{}", name);
            }
            match manager.get_default_channel() {
                Some(name) => println!("default: {}", name),
                None => println!("default: (none)"),
            }
        }
        Command::Emit {
            config,
            channel,
            level,
            kvs,
            message,
        } => {
            let config = load(&config)?;
            let factory = Factory::with_locator(Arc::new(builtin_services()));
            let manager = Manager::from_config(&config, factory);
            let logger = manager.channel(channel.as_deref())?;

            let context: Vec<(&str, &str)> = kvs
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .collect();
            logger.log(level, &message, &context);
        }
    }

    Ok(())
}
