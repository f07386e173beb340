mod cli;
mod error_mapping;
mod render;
mod settings;

use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use usweather_core::{AppError, Config};
use usweather_forecast::{
    presentation, FailurePolicy, ResolvedResult, Resolver, SearchSession, ViewPhase,
};

use crate::cli::Cli;
use crate::settings::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = usweather_core::init(cli.verbose) {
        eprintln!("{}", e);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let mut config = Config::load_at(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    let (config, validation) = config.validated()?;
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }
    let settings = Settings::resolve(&config);

    tracing::debug!(
        "Using {} / {} (min query {}, debounce {:?})",
        settings.client.geocode_base_url,
        settings.client.weather_base_url,
        settings.profile.min_query_len,
        settings.debounce
    );

    let resolver =
        Resolver::new(&settings.client, &settings.profile).map_err(error_mapping::app_error)?;

    if cli.interactive {
        run_interactive(resolver, &settings, &cli).await?;
        Ok(ExitCode::SUCCESS)
    } else {
        let query = cli.query.clone().unwrap_or_else(|| settings.default_query.clone());
        Ok(run_once(&resolver, &settings, &query, cli.json).await)
    }
}

async fn run_once(resolver: &Resolver, settings: &Settings, query: &str, json: bool) -> ExitCode {
    let options = settings.profile.presentation();

    match resolver.try_resolve(query).await {
        Ok(resolved) => {
            let result = ResolvedResult::Forecast(resolved);
            print!("{}", render::render_model(&presentation::build(Some(&result), options), json));
            ExitCode::SUCCESS
        }
        Err(e) => {
            let app_err = error_mapping::app_error(e.clone());
            tracing::warn!("{}", app_err);
            if settings.profile.failure == FailurePolicy::ShowBanner || e.is_input_error() {
                let result = ResolvedResult::Error(e.user_message().to_string());
                print!(
                    "{}",
                    render::render_model(&presentation::build(Some(&result), options), json)
                );
            } else {
                print!("{}", render::render_model(&presentation::build(None, options), json));
            }
            ExitCode::FAILURE
        }
    }
}

async fn run_interactive(resolver: Resolver, settings: &Settings, cli: &Cli) -> Result<(), AppError> {
    let options = settings.profile.presentation();
    let json = cli.json;
    let session = SearchSession::new(resolver, settings.debounce, settings.profile.failure);

    let mut rx = session.subscribe();
    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            if let Some(banner) = render::phase_banner(&snapshot) {
                println!("{}", banner);
                continue;
            }
            if snapshot.phase == ViewPhase::Idle {
                continue;
            }
            let model = presentation::build(snapshot.result.as_ref(), options);
            print!("{}", render::render_model(&model, json));
        }
    });

    // The page loads with a query already in the box.
    session.input(
        cli.query
            .clone()
            .unwrap_or_else(|| settings.default_query.clone()),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(text) => session.input(text),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::debug!("Input closed; tearing down search session");
    session.shutdown().await;
    if let Err(e) = printer.await {
        tracing::warn!("Output task ended abnormally: {}", e);
    }
    Ok(())
}
