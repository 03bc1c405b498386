use clap::Parser;
use grounded_cli::{Cli, Settings, app, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    telemetry::init_telemetry(cli.log_json)?;

    tracing::debug!(?settings, "loaded settings");
    app::run(&cli, &settings).await
}
