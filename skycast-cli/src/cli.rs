use std::{io, process::ExitCode, sync::Arc};

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, Password, Text, required};
use skycast_core::{
    Config, ControllerSettings, DisplayUnit, LocationQuery, LookupState, ProviderConfig,
    ProviderId, WeatherLookupController, provider::provider_from_config,
};
use tracing::debug;

use crate::{form, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "SkyCast weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where lookups are sent.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Provider short name: "proxy" or "openweather". Defaults to the configured one.
    #[arg(long)]
    pub provider: Option<String>,

    /// Override the provider base URL.
    #[arg(long, env = "SKYCAST_BASE_URL")]
    pub base_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure a provider (API key or proxy address).
    Configure {
        /// Provider short name, e.g. "proxy" or "openweather".
        provider: String,
    },

    /// Look up the current weather for a city.
    Show {
        #[arg(long)]
        city: String,

        /// Country name or code; not validated.
        #[arg(long)]
        country: String,

        /// Temperature unit: c or f. Defaults to the configured unit.
        #[arg(long)]
        unit: Option<DisplayUnit>,

        /// Print the view model as JSON.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Prompt for locations repeatedly, with a unit toggle.
    Interactive {
        #[command(flatten)]
        source: SourceArgs,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure { provider } => {
                configure(&provider)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show {
                city,
                country,
                unit,
                json,
                source,
            } => {
                let mut controller = build_controller(&source)?;
                apply_unit(&mut controller, unit);
                show(&mut controller, LocationQuery::new(city, country), json).await
            }
            Command::Interactive { source } => {
                form::run(build_controller(&source)?).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn build_controller(source: &SourceArgs) -> anyhow::Result<WeatherLookupController> {
    let config = Config::load()?;

    let id = match (&source.provider, &config.default_provider) {
        (Some(name), _) => ProviderId::try_from(name.as_str())?,
        (None, Some(_)) => config.default_provider_id()?,
        (None, None) => {
            debug!("no provider configured, using the proxy");
            ProviderId::Proxy
        }
    };

    let provider = provider_from_config(id, &config, source.base_url.as_deref())?;
    debug!(?provider, "provider ready");

    Ok(WeatherLookupController::new(
        Arc::from(provider),
        ControllerSettings::from(&config),
    ))
}

/// Bring the controller to the requested unit; `None` keeps the configured one.
fn apply_unit(controller: &mut WeatherLookupController, unit: Option<DisplayUnit>) {
    if unit.is_some_and(|unit| unit != controller.display_unit()) {
        controller.toggle_display_unit();
    }
}

async fn show(
    controller: &mut WeatherLookupController,
    query: LocationQuery,
    json: bool,
) -> anyhow::Result<ExitCode> {
    controller
        .submit(query)
        .map_err(|err| anyhow!("Invalid location: {err}"))?;

    if !json {
        render::write_view(&mut io::stdout().lock(), &controller.render())?;
    }

    controller.settle().await;
    let view = controller.render();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to encode view")?
        );
    } else {
        render::write_view(&mut io::stdout().lock(), &view)?;
    }

    Ok(match controller.state() {
        LookupState::Failure(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;
    let existing = config.provider_config(id).cloned().unwrap_or_default();

    let entry = match id {
        ProviderId::OpenWeather => {
            let key = Password::new("OpenWeather API key:")
                .without_confirmation()
                .with_validator(required!("An API key is required"))
                .prompt()?;
            ProviderConfig {
                api_key: Some(key.trim().to_string()),
                ..existing
            }
        }
        ProviderId::Proxy => {
            let current = existing
                .base_url
                .clone()
                .unwrap_or_else(|| id.default_base_url().to_string());
            let url = Text::new("Proxy base URL:")
                .with_default(&current)
                .with_validator(required!("A base URL is required"))
                .prompt()?;
            ProviderConfig {
                base_url: Some(url.trim().to_string()),
                ..existing
            }
        }
    };

    config.upsert_provider(id, entry);

    if config.default_provider_id().ok() != Some(id) {
        let make_default = Confirm::new(&format!("Make '{id}' the default provider?"))
            .with_default(true)
            .prompt()?;
        if make_default {
            config.set_default_provider(id);
        }
    }

    let path = config.save()?;
    println!("Saved {id} settings to {}", path.display());
    Ok(())
}
