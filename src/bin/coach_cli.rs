use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rep_coach::camera::StubCamera;
use rep_coach::coaching::TimedSpeech;
use rep_coach::feedback::{AnalysisClient, GeminiClient};
use rep_coach::fixtures::{load_fixture, synthetic, FixtureExpectations};
use rep_coach::session::SessionDeps;
use rep_coach::{
    AppConfig, EventBus, ExerciseKind, PoseFrame, SessionEvent, SessionOptions, SessionReport,
    TrainerSession,
};
use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Parser, Debug)]
#[command(
    name = "coach_cli",
    about = "Deterministic pose replay harness for Rep Coach"
)]
struct Cli {
    /// Configuration file (defaults to assets/coach_config.json)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for tip and encouragement selection
    #[arg(long)]
    seed: Option<u64>,
    /// Speaking rate of the simulated voice; 0 finishes every line instantly
    #[arg(long, default_value_t = 150)]
    voice_wpm: u32,
    /// Start with voice output off
    #[arg(long)]
    mute: bool,
    /// Request AI analysis (needs an API key)
    #[arg(long)]
    analysis: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON pose fixture and print session events
    Replay {
        #[arg(long)]
        fixture: PathBuf,
    },
    /// Generate clean synthetic repetitions and print session events
    Simulate {
        #[arg(long, value_parser = parse_exercise)]
        exercise: ExerciseKind,
        #[arg(long, default_value_t = 5)]
        reps: u32,
        #[arg(long, default_value_t = 33)]
        frame_interval_ms: u64,
    },
    /// Print the effective configuration
    DumpConfig,
}

fn parse_exercise(value: &str) -> std::result::Result<ExerciseKind, String> {
    ExerciseKind::parse(value).ok_or_else(|| {
        let names: Vec<&str> = ExerciseKind::ALL.iter().map(|kind| kind.as_str()).collect();
        format!("unknown exercise '{}', expected one of {}", value, names.join(", "))
    })
}

fn main() -> ExitCode {
    rep_coach::init_logging();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load(),
    };

    match &cli.command {
        Commands::Replay { fixture } => {
            let data = load_fixture(fixture)?;
            let frames = data.to_frames();
            let report = run_session(&cli, config, data.exercise, frames)?;
            verify(data.expect.as_ref(), &report)
        }
        Commands::Simulate {
            exercise,
            reps,
            frame_interval_ms,
        } => {
            let thresholds = config.exercises.get(*exercise);
            let frames =
                synthetic::rep_sequence(*exercise, thresholds, *reps, 0, *frame_interval_ms);
            run_session(&cli, config, *exercise, frames)?;
            Ok(ExitCode::from(0))
        }
        Commands::DumpConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(ExitCode::from(0))
        }
    }
}

fn run_session(
    cli: &Cli,
    config: AppConfig,
    exercise: ExerciseKind,
    frames: Vec<PoseFrame>,
) -> Result<SessionReport> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    let client: Option<Arc<dyn AnalysisClient>> = if cli.analysis {
        let client = GeminiClient::from_config(&config.feedback);
        if client.is_none() {
            eprintln!("AI analysis requested but no API key is configured");
        }
        client.map(|client| Arc::new(client) as Arc<dyn AnalysisClient>)
    } else {
        None
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let events = EventBus::new(1024);
    let mut rx = events.subscribe();
    let deps = SessionDeps {
        speech: Box::new(TimedSpeech::new(cli.voice_wpm)),
        client,
        rng,
        events,
    };
    let options = SessionOptions {
        exercise,
        voice_enabled: !cli.mute,
        analysis_enabled: cli.analysis,
    };
    let start_ms = frames.first().map(|frame| frame.timestamp_ms).unwrap_or(0);
    let end_ms = frames.last().map(|frame| frame.timestamp_ms).unwrap_or(start_ms);

    runtime.block_on(async move {
        let mut session = TrainerSession::start(
            config,
            options,
            deps,
            Box::new(StubCamera::new()),
            start_ms,
        )
        .context("starting session")?;
        print_events(&mut rx)?;

        for frame in frames {
            session.process_frame(frame);
            print_events(&mut rx)?;
        }
        if session.wait_for_analysis().await.is_some() {
            print_events(&mut rx)?;
        }

        let report = session.stop(end_ms);
        print_events(&mut rx)?;
        println!("{}", serde_json::to_string(&ReportLine { report: &report })?);
        Ok::<_, anyhow::Error>(report)
    })
}

fn print_events(rx: &mut broadcast::Receiver<SessionEvent>) -> Result<()> {
    loop {
        match rx.try_recv() {
            Ok(event) => println!("{}", serde_json::to_string(&event)?),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                eprintln!("skipped {} events", skipped);
            }
            Err(_) => return Ok(()),
        }
    }
}

fn verify(expect: Option<&FixtureExpectations>, report: &SessionReport) -> Result<ExitCode> {
    match expect.map(|expect| expect.verify(report.total_reps)) {
        Some(Err(diff)) => {
            eprintln!("{}", serde_json::json!({ "mismatch": diff }));
            Ok(ExitCode::from(2))
        }
        _ => Ok(ExitCode::from(0)),
    }
}

#[derive(Serialize)]
struct ReportLine<'a> {
    report: &'a SessionReport,
}
