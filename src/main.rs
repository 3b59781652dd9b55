use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use nomnom_wheel::cli::{self, Cli, Command, CliError};
use nomnom_wheel::config::{LogFormat, LoggingSettings, Settings};
use nomnom_wheel::core::{Catalog, ThreadRandom};
use nomnom_wheel::routes::{self, AppState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.log_format() {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}

async fn serve(settings: Settings) -> std::io::Result<()> {
    let app_state = AppState {
        catalog: Catalog::seeded(),
    };

    info!("Catalog loaded with {} restaurants", app_state.catalog.len());

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
            .default_service(web::to(routes::not_found))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

fn run_command(command: Command, settings: &Settings) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Serve => Ok(()),
        Command::Spin(args) => cli::run_spin(&args, settings, &mut ThreadRandom, &mut out),
        Command::Lists(profile) => cli::run_lists(&profile, settings, &mut out),
        Command::Unfavorite { id, profile } => cli::run_unfavorite(&id, &profile, settings, &mut out),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging);
    info!("Configuration loaded successfully");

    match cli.command {
        None | Some(Command::Serve) => serve(settings).await,
        Some(command) => run_command(command, &settings).map_err(|e| {
            error!("{}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        }),
    }
}
