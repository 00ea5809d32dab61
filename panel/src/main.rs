use clap::Parser;
use std::process::ExitCode;
use theme_panel::app::PanelApp;
use theme_panel::bridge::HostBridge;
use theme_panel::cli::Cli;
use theme_panel::config::{self, ConfigLoadResult, PanelConfig};
use theme_panel::error::{AppError, AppResult};
use theme_panel::logger;
use tokio::io::{BufReader, stdin, stdout};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_validated_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logger::setup_logger(config.logging(), cli.log_level.as_deref()) {
        eprintln!("Failed to initialize logger: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_validated_config(cli: &Cli) -> AppResult<PanelConfig> {
    let config = match config::load_config(cli.config.as_deref()) {
        ConfigLoadResult::Success(config) => *config,
        ConfigLoadResult::LoadError(e) | ConfigLoadResult::DeserializeError(e) => {
            return Err(AppError::Config(e));
        }
    };

    if let Err(errors) = config.validate() {
        let messages: Vec<String> = errors.iter().map(|e| e.user_message()).collect();
        return Err(AppError::Config(messages.join("\n\n")));
    }
    Ok(config)
}

async fn run(cli: &Cli, config: &PanelConfig) -> AppResult<()> {
    let mut bridge = HostBridge::new(config.engine().to_patch())?;
    let report = bridge.receive_options_file(&cli.options)?;
    eprintln!(
        "Loaded {} theme(s), active theme '{}'. Type 'help' for commands.",
        report.theme_count, report.active
    );

    let mut app = PanelApp::new(bridge, config.tick_interval());
    app.run(BufReader::new(stdin()), stdout()).await?;

    log::info!("Theme panel closed");
    Ok(())
}
