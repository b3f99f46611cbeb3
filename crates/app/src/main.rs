use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use interview_core::model::ResultId;
use services::{AppServices, Clock, RandomPerLevel, ResultQuery, ResultSort};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod interview;
mod report;

const DEFAULT_PER_LEVEL: usize = 2;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingResume,
    MissingResultId,
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidPerLevel { raw: String },
    InvalidSort { raw: String },
    InvalidResultId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingResume => write!(f, "interview requires --resume <path>"),
            ArgsError::MissingResultId => write!(f, "show requires a result id"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidPerLevel { raw } => write!(f, "invalid --per-level value: {raw}"),
            ArgsError::InvalidSort { raw } => write!(f, "invalid --sort value: {raw}"),
            ArgsError::InvalidResultId { raw } => write!(f, "invalid result id: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app interview --resume <path> [--db <sqlite_url>] [--questions <json>] [--per-level <n>]");
    eprintln!("  app results   [--db <sqlite_url>] [--search <term>] [--sort high|low|name|email] [--email <email>]");
    eprintln!("  app show <id> [--db <sqlite_url>] [--json]");
    eprintln!("  app clear     [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://interviews.sqlite3");
    eprintln!("  --per-level {DEFAULT_PER_LEVEL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  INTERVIEW_DB_URL, INTERVIEW_QUESTIONS, INTERVIEW_PER_LEVEL, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Interview,
    Results,
    Show,
    Clear,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "interview" => Some(Self::Interview),
            "results" => Some(Self::Results),
            "show" => Some(Self::Show),
            "clear" => Some(Self::Clear),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    questions: Option<PathBuf>,
    per_level: usize,
    resume: Option<PathBuf>,
    query: ResultQuery,
    result_id: Option<ResultId>,
    json: bool,
}

impl Args {
    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("INTERVIEW_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://interviews.sqlite3".into(), normalize_sqlite_url);
        let mut questions = std::env::var("INTERVIEW_QUESTIONS").ok().map(PathBuf::from);
        let mut per_level = std::env::var("INTERVIEW_PER_LEVEL")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(DEFAULT_PER_LEVEL);
        let mut resume = None;
        let mut query = ResultQuery::default();
        let mut result_id = None;
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--questions" => questions = Some(require_value(args, "--questions")?.into()),
                "--per-level" => {
                    let value = require_value(args, "--per-level")?;
                    per_level = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidPerLevel { raw: value.clone() })?;
                }
                "--resume" => resume = Some(require_value(args, "--resume")?.into()),
                "--search" => query.search = Some(require_value(args, "--search")?),
                "--sort" => {
                    let value = require_value(args, "--sort")?;
                    query.sort = value
                        .parse::<ResultSort>()
                        .map_err(|_| ArgsError::InvalidSort { raw: value.clone() })?;
                }
                "--email" => query.only_email = Some(require_value(args, "--email")?),
                "--json" => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                raw if cmd == Command::Show && result_id.is_none() && !raw.starts_with("--") => {
                    let id = raw
                        .parse::<ResultId>()
                        .map_err(|_| ArgsError::InvalidResultId { raw: arg.clone() })?;
                    result_id = Some(id);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        match cmd {
            Command::Interview if resume.is_none() => return Err(ArgsError::MissingResume),
            Command::Show if result_id.is_none() => return Err(ArgsError::MissingResultId),
            _ => {}
        }

        Ok(Self {
            db_url,
            questions,
            per_level,
            resume,
            query,
            result_id,
            json,
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

fn init_tracing() {
    // stdout carries the interview transcript; logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None | Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    let mut iter = argv.into_iter().skip(1);
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let bank = AppServices::load_bank(parsed.questions.as_deref()).await?;
    info!(questions = bank.len(), db = %parsed.db_url, "starting");

    let sampler = Arc::new(RandomPerLevel::uniform(parsed.per_level));
    let app = AppServices::new_sqlite(&parsed.db_url, Clock::default(), bank, sampler).await?;

    match cmd {
        Command::Interview => {
            let resume = parsed.resume.ok_or(ArgsError::MissingResume)?;
            interview::run_interview(&app, &resume).await
        }
        Command::Results => {
            let records = app.results().browse(&parsed.query).await?;
            report::print_results(&records);
            Ok(())
        }
        Command::Show => {
            let id = parsed.result_id.ok_or(ArgsError::MissingResultId)?;
            let record = app.results().get(id).await?;
            report::print_detail(&record, parsed.json)
        }
        Command::Clear => {
            let removed = app.results().clear().await?;
            println!("Removed {removed} result(s).");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(cmd: Command, args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(cmd, &mut iter)
    }

    #[test]
    fn results_flags_build_a_query() {
        let args = parse(
            Command::Results,
            &["--search", "ann", "--sort", "high", "--email", "a@b.com"],
        )
        .unwrap();
        assert_eq!(args.query.search.as_deref(), Some("ann"));
        assert_eq!(args.query.sort, ResultSort::ScoreHigh);
        assert_eq!(args.query.only_email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn interview_needs_a_resume() {
        assert!(matches!(
            parse(Command::Interview, &[]),
            Err(ArgsError::MissingResume)
        ));
        let args = parse(Command::Interview, &["--resume", "cv.txt", "--per-level", "3"]).unwrap();
        assert_eq!(args.per_level, 3);
        assert_eq!(args.resume, Some(PathBuf::from("cv.txt")));
    }

    #[test]
    fn show_takes_a_positional_id() {
        let args = parse(Command::Show, &["12", "--json"]).unwrap();
        assert_eq!(args.result_id, Some(ResultId::new(12)));
        assert!(args.json);
        assert!(matches!(
            parse(Command::Show, &["twelve"]),
            Err(ArgsError::InvalidResultId { .. })
        ));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            parse(Command::Results, &["--sort", "fastest"]),
            Err(ArgsError::InvalidSort { .. })
        ));
        assert!(matches!(
            parse(Command::Interview, &["--resume"]),
            Err(ArgsError::MissingValue { flag: "--resume" })
        ));
        assert!(matches!(
            parse(Command::Clear, &["extra"]),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[test]
    fn sqlite_urls_become_absolute() {
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/x.db".into()),
            "sqlite:///tmp/x.db"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite:/tmp/x.db".into()),
            "sqlite:///tmp/x.db"
        );
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }
}
