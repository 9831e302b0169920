//! Config command handlers: path, show, init.

use scrapedeck_config::{Config, config_path, load_config_or_default, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let config = load_config_or_default();
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| CliError::Config(Box::new(e)))?;
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { api_url } => {
            let api_url = match api_url.or_else(|| global.api_url.clone()) {
                Some(url) => url,
                None => dialoguer::Input::new()
                    .with_prompt("Scraping service base URL")
                    .interact_text()
                    .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
            };

            let config = Config {
                api_url: Some(api_url),
                ..load_config_or_default()
            };
            // Validate before persisting a broken URL.
            config.api_url()?;

            let path = save_config(&config)?;
            if !global.quiet {
                eprintln!("Wrote {}", path.display());
            }
            Ok(())
        }
    }
}
