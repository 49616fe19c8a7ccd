use anyhow::Context;
use chile_rut::utils::{logger, validation::Validate};
use chile_rut::{run_command, CliConfig, RutConfig};
use clap::Parser;

fn load_config(path: Option<&str>) -> anyhow::Result<RutConfig> {
    let config = match path {
        Some(path) => RutConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => RutConfig::default(),
    };
    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn main() {
    let cli = CliConfig::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(2);
        }
    };

    let level = config.effective_log_level(cli.verbose);
    if config.json_logs() {
        logger::init_json_logger(&level);
    } else {
        logger::init_cli_logger(&level);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run_command(cli.command, &config, &mut out) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            eprintln!("❌ {:#}", e);
            std::process::exit(2);
        }
    }
}
