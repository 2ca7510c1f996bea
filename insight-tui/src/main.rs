mod app;
mod error;
mod event_loop;
mod paths;
mod settings;
mod snapshot;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use insight_ui::{Lang, SilentEngine, SpeechEngine, SummaryData};
use log::{error, info};
use simplelog::{Config, WriteLogger};

use app::Options;
use error::AppError;
use settings::Settings;
use snapshot::FrameSize;

const SAMPLE_DATA: &str = include_str!("../data/sample.json");

#[derive(Parser, Debug)]
#[command(name = "nrega-insight")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse MGNREGA district summaries in the terminal")]
struct Cli {
    /// JSON array of district summaries (default: bundled sample)
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Narration language: en, hi or as
    #[arg(long)]
    lang: Option<Lang>,

    /// Skip open and close animations
    #[arg(long)]
    reduced_motion: bool,

    /// Never start the speech program
    #[arg(long)]
    no_speech: bool,

    /// Print one frame with the summary of this district open, then exit
    #[arg(long, value_name = "INDEX")]
    snapshot: Option<usize>,

    /// Frame size for --snapshot
    #[arg(long, value_name = "WxH", default_value = "100x36")]
    size: FrameSize,

    /// Log file (default: latest.log in the cache directory, rotated)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load_default() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(cli.log_file.as_deref(), &settings);

    match run(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, settings: Settings) -> Result<(), AppError> {
    let districts = load_districts(cli.data.as_deref())?;
    info!("Loaded {} districts", districts.len());

    let lang = cli.lang.unwrap_or(settings.lang);

    if let Some(index) = cli.snapshot {
        let frame = snapshot::render(districts, index, cli.size, lang)?;
        println!("{frame}");
        return Ok(());
    }

    let engine: Arc<dyn SpeechEngine> = if cli.no_speech || !settings.speech.enabled {
        info!("Speech disabled");
        Arc::new(SilentEngine)
    } else {
        Arc::new(settings.speech.engine())
    };
    let options = Options {
        lang,
        reduced_motion: cli.reduced_motion || settings.reduced_motion,
    };

    event_loop::run(districts, engine, options).await
}

fn load_districts(path: Option<&Path>) -> Result<Vec<SummaryData>, AppError> {
    let (text, origin) = match path {
        Some(path) => (fs::read_to_string(path)?, path.to_path_buf()),
        None => (SAMPLE_DATA.to_string(), PathBuf::from("<bundled sample>")),
    };
    serde_json::from_str(&text).map_err(|source| AppError::Json {
        path: origin,
        source,
    })
}

/// Log to `path`, or to a fresh `latest.log` in the cache directory.
/// Runs without a logger when no file can be created.
fn init_logging(path: Option<&Path>, settings: &Settings) {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            paths::rotate_logs();
            paths::log_file()
        }
    };
    let Some(path) = path else { return };

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(settings.level_filter(), Config::default(), file) {
                eprintln!("Warning: logger not installed: {e}");
            }
        }
        Err(e) => eprintln!("Warning: cannot create log file {}: {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_sample_parses() {
        let districts = load_districts(None).unwrap();
        assert_eq!(districts.len(), 7);
        assert_eq!(districts[0].heading(), "Kamrup, Assam");
        // Sparse records keep their missing figures as None.
        let tinsukia = districts.iter().find(|d| d.name == "Tinsukia").unwrap();
        assert_eq!(tinsukia.approved_labour_budget, None);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "nrega-insight",
            "--lang",
            "hi",
            "--snapshot",
            "2",
            "--size",
            "80x30",
            "--no-speech",
        ])
        .unwrap();

        assert_eq!(cli.lang, Some(Lang::Hi));
        assert_eq!(cli.snapshot, Some(2));
        assert_eq!(
            cli.size,
            FrameSize {
                width: 80,
                height: 30
            }
        );
        assert!(cli.no_speech);
        assert!(!cli.reduced_motion);
    }

    #[test]
    fn test_cli_rejects_bad_size() {
        assert!(Cli::try_parse_from(["nrega-insight", "--size", "big"]).is_err());
        assert!(Cli::try_parse_from(["nrega-insight", "--lang", "fr"]).is_err());
    }
}
