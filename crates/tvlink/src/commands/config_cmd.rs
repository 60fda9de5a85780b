//! Config subcommand handlers.

use serde::Serialize;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Paths {
    config: String,
    session: String,
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { force } => {
            let path = config::config_file(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let cfg = config::resolve(global)?;
            match global.config {
                Some(ref explicit) => tvlink_config::save_config_to(&cfg, explicit)?,
                None => tvlink_config::save_config(&cfg)?,
            }
            tracing::info!(path = %path.display(), "config written");
            output::print_output(
                &format!("Config written to {}", path.display()),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::resolve(global)?;
            let out = match global.output {
                OutputFormat::Json => output::render_json(&cfg)?,
                OutputFormat::Plain => {
                    toml::to_string_pretty(&cfg).map_err(tvlink_config::ConfigError::from)?
                }
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            let cfg = config::resolve(global)?;
            let paths = Paths {
                config: config::config_file(global).display().to_string(),
                session: cfg.state_path().display().to_string(),
            };
            let out = match global.output {
                OutputFormat::Json => output::render_json(&paths)?,
                OutputFormat::Plain => {
                    format!("config:  {}\nsession: {}", paths.config, paths.session)
                }
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
