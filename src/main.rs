use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use orgchart::export::{self, Format};
use orgchart::github::{self, GithubOrg};
use orgchart::{routes, storage, AppState, Config, RecordStore};

fn print_rows<T: serde::Serialize>(rows: &[T], format: Format) -> anyhow::Result<()> {
    export::write_rows(rows, format, std::io::stdout().lock())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "-help" || arg == "--help") {
        println!("Usage: orgchart [OPTIONS]");
        println!("Options:");
        println!("  -config <path>    Path to configuration file (default: ./etc/orgchart.toml)");
        println!("  -export <kind>    Print employees, teams or vacancies as JSON lines and exit");
        println!("  -csv              With -export, print CSV with a header row instead");
        println!("  -github-plan      Print the GitHub teams, members and maintainers the chart implies and exit");
        println!("  -github-prefix <prefix>  GitHub team name prefix (default: org-)");
        println!("  -github-org <path>       With -github-plan, report the changes against this organisation listing");
        println!("  -skip-members     With -github-org, leave team membership out of the report");
        println!("  -help, --help     Print this help message");
        return Ok(());
    }

    let flag_value = |flag: &str| {
        args.iter()
            .skip_while(|arg| arg.as_str() != flag)
            .nth(1)
            .map(|s| s.to_string())
    };

    let config_path = flag_value("-config").unwrap_or_else(|| "./etc/orgchart.toml".to_string());
    let export_kind = flag_value("-export");
    let has_flag = |flag: &str| args.iter().any(|arg| arg == flag);
    let format = if has_flag("-csv") { Format::Csv } else { Format::JsonLines };

    // Load configuration first (before logging init)
    let config = Config::load(&config_path).unwrap_or_else(|e| {
        eprintln!("Could not load config file: {}, using defaults", e);
        Config::default()
    });

    // Initialize logging
    // Priority: RUST_LOG env var > config file > default "info"
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    // exports own stdout, so logs go to stderr
    fmt::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Loading configuration from: {}", config_path);

    let source = storage::open(&config.storage.url)?;
    let snapshot = source.load().await.map_err(|e| {
        tracing::error!("Loading chart from {} failed: {}", source.describe(), e);
        anyhow::anyhow!("Loading chart failed: {}", e)
    })?;
    let store = RecordStore::from_snapshot(snapshot, &config.storage.root_employee)?;

    if let Some(kind) = export_kind {
        return match kind.as_str() {
            "employees" => print_rows(&export::employee_exports(&store)?, format),
            "teams" => print_rows(&export::team_exports(&store), format),
            "vacancies" => print_rows(&export::vacancy_exports(&store), format),
            other => Err(anyhow::anyhow!(
                "unknown export {}, expected employees, teams or vacancies",
                other
            )),
        };
    }

    if has_flag("-github-plan") {
        let prefix = flag_value("-github-prefix")
            .unwrap_or_else(|| github::DEFAULT_TEAM_PREFIX.to_string());
        let plan = github::plan(&store, &prefix);

        let rendered = match flag_value("-github-org") {
            Some(path) => {
                info!("Reconciling against organisation listing {}", path);
                let org: GithubOrg = serde_json::from_str(&tokio::fs::read_to_string(&path).await?)?;
                let report = github::reconcile(&store, &plan, &org, &prefix, has_flag("-skip-members"));
                serde_json::to_string_pretty(&report)?
            }
            None => serde_json::to_string_pretty(&plan)?,
        };
        println!("{}", rendered);
        return Ok(());
    }

    info!("Starting Orgchart server...");

    // Create application state
    let state = AppState::new(store, source, config.clone());

    // Create router
    let app = routes::create_router(state);

    // Parse address
    let addr: SocketAddr = config.addr.parse().or_else(|_| {
        tracing::warn!("Invalid address '{}', using default 0.0.0.0:8080", config.addr);
        "0.0.0.0:8080".parse()
    })?;

    info!("Server listening on {}", addr);

    // Start server
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
