use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use dotenv::dotenv;
use log::{error, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use gradebook::grades::{assemble_detailed, GradesLocator};
use gradebook::portal::{frame_context, school_info};
use gradebook::snapshot::{SchoolInfo, Snapshot};
use gradebook::{DocumentContext, ExtractorConfig};

const USAGE: &str = "Usage: gradebook [--dashboard <page.html>] [--url <dashboard-url>] [<frame-url>=]<frame.html>...";

struct Args {
    dashboard: Option<PathBuf>,
    url: String,
    /// Frame locator and the saved HTML of that frame.
    frames: Vec<(String, PathBuf)>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args { dashboard: None, url: String::new(), frames: Vec::new() };

    let mut argv = std::env::args().skip(1);
    while let Some(a) = argv.next() {
        match a.as_str() {
            "--dashboard" => args.dashboard = Some(PathBuf::from(argv.next().context("Missing value for --dashboard")?)),
            "--url" => args.url = argv.next().context("Missing value for --url")?,
            "-h" | "--help" => {
                eprintln!("{USAGE}");
                std::process::exit(0);
            }
            _ if a.starts_with('-') => return Err(anyhow!("Unknown arg: {}", a)),
            // A bare path doubles as its own locator.
            _ => match a.split_once('=') {
                Some((locator, path)) => args.frames.push((locator.to_string(), PathBuf::from(path))),
                None => args.frames.push((a.clone(), PathBuf::from(&a))),
            },
        }
    }

    if args.frames.is_empty() {
        return Err(anyhow!("No frame files given\n{USAGE}"));
    }
    Ok(args)
}

fn load_frames(frames: &[(String, PathBuf)]) -> Result<Vec<DocumentContext>> {
    frames
        .iter()
        .map(|(locator, path)| {
            let html = fs::read_to_string(path).with_context(|| format!("Failed to read frame {}", path.display()))?;
            Ok(frame_context(locator, &html))
        })
        .collect()
}

fn run() -> Result<ExitCode> {
    // Reads the frame list and the extraction settings.
    let args = parse_args()?;
    let config = ExtractorConfig::from_env().context("Invalid extractor configuration")?;
    let locator = GradesLocator::from_config(&config).context("Invalid frame pattern")?;

    // Parses each saved frame into its text lines and tables.
    let contexts = load_frames(&args.frames)?;
    info!("Loaded {} frame(s)", contexts.len());

    // Extracts a course from every grades frame; nothing found means no report.
    let (report, stats) = assemble_detailed(&contexts, |l| locator.matches(l), &config);
    let Some(courses) = report else {
        if stats.matched == 0 {
            error!("No grades frames among {} frame(s)", stats.contexts);
        } else {
            error!("No grades data found in {} grades frame(s)", stats.matched);
        }
        return Ok(ExitCode::from(2));
    };
    info!("Extracted {} course(s) from {} grades frame(s)", stats.extracted, stats.matched);

    // Reads the school banner off the dashboard, when one was saved.
    let school = match &args.dashboard {
        Some(path) => {
            let html = fs::read_to_string(path).with_context(|| format!("Failed to read dashboard {}", path.display()))?;
            school_info(&html)
        }
        None => SchoolInfo::default(),
    };

    // Wraps the courses with provenance and prints them as JSON.
    let snapshot = Snapshot::new(school, courses, args.url);
    println!("{}", snapshot.to_json_pretty().context("Failed to serialize grades")?);
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    // Loads environment variables from a `.env` file, if present.
    dotenv().ok();

    // Picks the log level from GRADES_LOG, falling back to info.
    let level = std::env::var("GRADES_LOG")
        .ok()
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    // Logs go to stderr so stdout carries only the JSON.
    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    // Runs the extraction and maps the outcome to an exit code.
    match run() {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
