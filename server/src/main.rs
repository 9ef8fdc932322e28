use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use platform_backend::Backend;
use platform_obs::{ObsConfig, init_tracing};
use tracing::{info, warn};
use workforce_hr::{Area, HrModule, RecordFilter};
use workforce_server::{
    AppConfig, AppState, ServeConfig,
    config::backend_config,
    master::check_backend,
};

#[derive(Parser, Debug)]
#[command(name = "workforce-server", version, about = "Workforce suite server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Print one fixture tab as JSON.
    Fixtures(FixturesCommand),
    /// List every master-data resource through the backend.
    #[command(name = "backend:check")]
    BackendCheck,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[derive(Args, Debug)]
struct FixturesCommand {
    /// attendance, leave, schedule, security or organization
    area: Area,
    #[arg(long)]
    tab: Option<String>,
    #[arg(long, help = "Case-insensitive name filter")]
    q: Option<String>,
    #[arg(long)]
    department: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::from_env("workforce-server"))?;
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(cmd) => run_server(cmd).await,
        Command::Fixtures(cmd) => print_fixtures(cmd),
        Command::BackendCheck => check().await,
    }
}

async fn run_server(cmd: ServeCommand) -> Result<()> {
    let config = AppConfig::load()?;
    info!(
        backend = %config.backend.base_url,
        i18n = config.i18n.enabled,
        "configuration loaded"
    );
    let state = AppState::new(config)?;
    workforce_server::serve(cmd.into(), state).await
}

fn print_fixtures(cmd: FixturesCommand) -> Result<()> {
    let filter = RecordFilter {
        q: cmd.q,
        department: cmd.department,
    };
    let view = HrModule::with_fixtures().view(cmd.area, cmd.tab.as_deref(), &filter)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

async fn check() -> Result<()> {
    let config = backend_config(&|key: &str| std::env::var(key).ok())?;
    let backend = Backend::connect(&config)?;
    let mut failures = 0;
    for (kind, outcome) in check_backend(&backend).await {
        match outcome {
            Ok(count) => info!(%kind, count, "resource reachable"),
            Err(err) => {
                failures += 1;
                warn!(%kind, error = %err, "resource check failed");
            }
        }
    }
    if failures > 0 {
        bail!("{failures} master data resource(s) failed against {}", config.base_url);
    }
    info!("backend check passed");
    Ok(())
}
