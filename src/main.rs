// SPDX-License-Identifier: MIT

mod settings;

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use colored::Colorize;
use itertools::Itertools;
use settings::Settings;
use todoist_fetcher_core::{Error, client::Client, filter, folders, pipeline, report};
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;

const APP_NAME: &str = "todoist-fetcher";
const KEEP_LOG_FILES_COUNT: usize = 5;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(value_name("API_KEY"), help("Todoist API token"))]
    api_key: Option<String>,

    #[arg(value_name("OUTPUT_PATH"), help("file to write the tasks to"))]
    output_path: Option<PathBuf>,

    #[arg(value_name("FILTER"), help("Todoist filter expression [default: #Inbox]"))]
    filter: Option<String>,

    #[arg(short, long, value_name("PATH_TO_CONFIG_FILE"), help("/path/to/settings.toml"))]
    settings_file: Option<String>,
}

fn clear_old_logs(path: &Path, file_name_pattern: &str) -> std::io::Result<()> {
    let mut files = std::fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_str().is_some_and(|s| s.starts_with(file_name_pattern)))
        .map(|e| e.path())
        .sorted()
        .collect::<Vec<PathBuf>>();
    if files.len() <= KEEP_LOG_FILES_COUNT {
        return Ok(());
    }

    files.truncate(files.len() - KEEP_LOG_FILES_COUNT);
    for f in files {
        std::fs::remove_file(f)?;
    }

    Ok(())
}

// Logging goes to a file only, the console is reserved for the run summary.
fn init_logging() {
    let Ok(log_path) = folders::log_folder(APP_NAME) else {
        return;
    };
    let log_file_pattern = format!("{APP_NAME}.log");

    let Ok(file_appender) = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&log_file_pattern)
        .build(&log_path)
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_max_level(Level::DEBUG)
        .init();
    if let Err(e) = clear_old_logs(&log_path, log_file_pattern.as_str()) {
        tracing::error!(target: "main", error=?e, "Clear old files");
    }
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(|a| a.to_string_lossy().into_owned())
        .unwrap_or_else(|| APP_NAME.to_string())
}

fn print_usage() {
    let program = program_name();
    eprintln!("Usage: {program} [--settings-file PATH_TO_CONFIG_FILE] <API_KEY> <OUTPUT_PATH> [FILTER]");
    eprintln!("Example: {program} your_api_token output/tasks.txt \"#Inbox\"");
}

fn print_error(e: &Error) {
    eprintln!("{} {e}", "Error:".red());
    if let Error::Usage(_) = e {
        print_usage();
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    let cfg = match &cli.settings_file {
        Some(p) => Settings::new(p.as_str())?,
        None => Settings::default(),
    };
    let params = settings::resolve(cli.api_key, cli.output_path, cli.filter, cfg)?;
    let client = Client::new(&params.api_key)?;

    println!("Fetching tasks from Todoist...");

    let today = filter::today();
    let tasks = pipeline::due_tasks(&client, &params.filter, &today).await?;

    if tasks.is_empty() {
        println!("No tasks found matching criteria.");
    } else {
        println!("Found {} task(s).", tasks.len());
    }

    report::write_to_file(&params.output_path, &tasks)?;
    println!("Tasks written to: {}", params.output_path.display());

    Ok(())
}

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

/// Parses the arguments, on failure returns the exit code to stop with.
fn parse_args<I, T>(args: I) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| {
        let _ = e.print();
        if !e.use_stderr() {
            // --help and --version
            return EXIT_SUCCESS;
        }
        tracing::error!(target: "main", error=%e, "Parse arguments");
        print_usage();
        EXIT_FAILURE
    })
}

fn exit_code(r: &Result<(), Error>) -> u8 {
    match r {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!(target: "main", error=?e, "Run");
            print_error(e);
            EXIT_FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    tracing::info!("Start application");

    let code = match parse_args(std::env::args_os()) {
        Ok(cli) => exit_code(&run(cli).await),
        Err(code) => code,
    };

    tracing::info!("End application");
    ExitCode::from(code)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cli_positionals() {
        let cli = Cli::try_parse_from(["todoist-fetcher", "token", "out/tasks.txt", "#Work"]).unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("token"));
        assert_eq!(cli.output_path, Some(PathBuf::from("out/tasks.txt")));
        assert_eq!(cli.filter.as_deref(), Some("#Work"));
        assert_eq!(cli.settings_file, None);
    }

    #[test]
    fn cli_settings_file() {
        let cli = Cli::try_parse_from(["todoist-fetcher", "-s", "/etc/settings.toml"]).unwrap();
        assert_eq!(cli.settings_file.as_deref(), Some("/etc/settings.toml"));
        assert_eq!(cli.api_key, None);
    }

    #[test]
    fn cli_too_many_arguments() {
        assert_eq!(parse_args(["todoist-fetcher", "a", "b", "c", "d"]).unwrap_err(), EXIT_FAILURE);
    }

    #[test]
    fn cli_unknown_flag() {
        assert_eq!(parse_args(["todoist-fetcher", "--verbose"]).unwrap_err(), EXIT_FAILURE);
    }

    #[test]
    fn cli_version() {
        assert_eq!(parse_args(["todoist-fetcher", "--version"]).unwrap_err(), EXIT_SUCCESS);
    }

    #[tokio::test]
    async fn no_arguments_is_usage_error() {
        let cli = parse_args(["todoist-fetcher"]).unwrap();
        let r = run(cli).await;
        assert!(matches!(r, Err(Error::Usage(_))));
        assert_eq!(exit_code(&r), EXIT_FAILURE);
    }

    #[test]
    fn every_error_exits_with_failure() {
        let errors = vec![
            Error::Usage("API_KEY is required".to_string()),
            Error::Config {
                path: "settings.toml".to_string(),
                message: "not found".to_string(),
            },
            Error::Fetch { status: 401 },
            Error::Parse(serde_json::from_str::<Vec<u8>>("[").unwrap_err()),
            Error::Write {
                path: PathBuf::from("/no/such/folder/tasks.txt"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
        ];

        for e in errors {
            let r: Result<(), Error> = Err(e);
            assert_eq!(exit_code(&r), EXIT_FAILURE, "{r:?}");
        }
    }

    #[test]
    fn program_name_is_known() {
        assert!(!program_name().is_empty());
    }

    #[test]
    fn success_exits_with_zero() {
        assert_eq!(exit_code(&Ok(())), EXIT_SUCCESS);
    }

    #[tokio::test]
    async fn missing_settings_file() {
        let temp_dir = tempfile::tempdir().expect("Can't create a temp dir");
        let settings = temp_dir.path().join("absent.toml");
        let output = temp_dir.path().join("tasks.txt");

        let cli = parse_args([
            "todoist-fetcher",
            "-s",
            settings.to_str().unwrap(),
            "token",
            output.to_str().unwrap(),
        ])
        .unwrap();
        let r = run(cli).await;
        assert!(matches!(r, Err(Error::Config { .. })));
        assert_eq!(exit_code(&r), EXIT_FAILURE);
        assert!(!output.exists());
    }

    #[test]
    fn old_logs_are_removed() {
        let temp_dir = tempfile::tempdir().expect("Can't create a temp dir");
        for day in 1..=8 {
            std::fs::write(temp_dir.path().join(format!("{APP_NAME}.log.2024-01-0{day}")), "").unwrap();
        }
        std::fs::write(temp_dir.path().join("other.txt"), "").unwrap();

        clear_old_logs(temp_dir.path(), &format!("{APP_NAME}.log")).unwrap();

        let names = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_str().unwrap().to_string())
            .sorted()
            .collect::<Vec<String>>();
        assert_eq!(
            names,
            vec![
                format!("{APP_NAME}.log.2024-01-04"),
                format!("{APP_NAME}.log.2024-01-05"),
                format!("{APP_NAME}.log.2024-01-06"),
                format!("{APP_NAME}.log.2024-01-07"),
                format!("{APP_NAME}.log.2024-01-08"),
                "other.txt".to_string(),
            ]
        );
    }

    #[test]
    fn few_logs_are_kept() {
        let temp_dir = tempfile::tempdir().expect("Can't create a temp dir");
        for day in 1..=3 {
            std::fs::write(temp_dir.path().join(format!("{APP_NAME}.log.2024-01-0{day}")), "").unwrap();
        }

        clear_old_logs(temp_dir.path(), &format!("{APP_NAME}.log")).unwrap();

        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 3);
    }
}
