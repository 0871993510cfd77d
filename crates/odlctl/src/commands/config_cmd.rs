//! Config subcommand handlers.

use secrecy::{ExposeSecret, SecretString};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Map an interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::resolve(global)?;
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => cfg.to_toml_masked()?,
                _ => {
                    let mut masked = cfg;
                    if masked.password.is_some() {
                        masked.password = Some("****".into());
                    }
                    output::render_single(&global.output, &masked, |_| String::new(), |_| {
                        String::new()
                    })
                }
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        ConfigCommand::SetPassword => {
            let cfg = config::resolve(global)?;
            let password = SecretString::from(
                rpassword::prompt_password(format!("Password for {}: ", cfg.keyring_account()))
                    .map_err(prompt_err)?,
            );
            if password.expose_secret().is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }

            let account = config::store_password(&cfg, password.expose_secret())?;
            if !global.quiet {
                eprintln!("Password for {account} stored in system keyring");
            }
            Ok(())
        }
    }
}
