use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AchievementService, AppServices, AuthService, Catalog, Clock, CourseFlowService,
    ProfileService,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    certificates_dir: PathBuf,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<Catalog> {
        self.services.catalog()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn flow(&self) -> Arc<CourseFlowService> {
        self.services.flow()
    }

    fn profiles(&self) -> Arc<ProfileService> {
        self.services.profiles()
    }

    fn achievements(&self) -> Arc<AchievementService> {
        self.services.achievements()
    }

    fn certificates_dir(&self) -> PathBuf {
        self.certificates_dir.clone()
    }
}

struct Args {
    db_url: String,
    catalog_path: Option<PathBuf>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--db <sqlite_url>] [--catalog <path>]");
    eprintln!("  cargo run -p app -- check [--catalog <path>]");
    eprintln!();
    eprintln!("Defaults for ui:");
    eprintln!("  --db sqlite:academy.sqlite3");
    eprintln!("  --catalog (builtin catalog)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ACADEMY_DB_URL, ACADEMY_CATALOG, ACADEMY_AUTH_URL, ACADEMY_AUTH_KEY");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("ACADEMY_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://academy.sqlite3".into(), normalize_sqlite_url);
        let mut catalog_path = std::env::var("ACADEMY_CATALOG").ok().map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--catalog" => {
                    let value = require_value(args, "--catalog")?;
                    catalog_path = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            catalog_path,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn load_catalog(catalog_path: Option<&PathBuf>) -> Result<Catalog, services::CatalogError> {
    match catalog_path {
        Some(path) => {
            log::info!("loading catalog from {}", path.display());
            Catalog::from_path(path)
        }
        None => Catalog::builtin(),
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if matches!(cmd, Command::Ui | Command::Check) && !argv.is_empty() && !argv[0].starts_with("--")
    {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    match cmd {
        Command::Check => {
            // Catalog validation as a command, so broken data fails a build
            // step instead of a child's afternoon.
            let catalog = load_catalog(parsed.catalog_path.as_ref())?;
            let lessons: usize = catalog
                .courses()
                .iter()
                .map(|course| course.lesson_count())
                .sum();
            let questions: usize = catalog
                .courses()
                .iter()
                .map(|course| course.quiz().question_count())
                .sum();
            println!(
                "catalog OK: {} courses, {lessons} lessons, {questions} questions",
                catalog.len()
            );
            Ok(())
        }
        Command::Ui => {
            let catalog = load_catalog(parsed.catalog_path.as_ref())?;

            // Open + migrate SQLite at startup. Keep this in the binary glue
            // so core/services stay pure.
            prepare_sqlite_file(&parsed.db_url)?;
            let clock = Clock::default_clock();
            let services = AppServices::new_sqlite(&parsed.db_url, catalog, clock).await?;
            log::info!("services ready, database at {}", parsed.db_url);

            let certificates_dir = certificates_dir_for(&parsed.db_url);
            let app = DesktopApp {
                services,
                certificates_dir,
            };
            let context = build_app_context(&(Arc::new(app) as Arc<dyn UiApp>));

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Oilfield Academy")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
    }
}

/// Certificates land next to the database file, under `certificates/`.
fn certificates_dir_for(db_url: &str) -> PathBuf {
    db_url
        .strip_prefix("sqlite://")
        .map(std::path::Path::new)
        .and_then(std::path::Path::parent)
        .map_or_else(|| PathBuf::from("certificates"), |dir| dir.join("certificates"))
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
