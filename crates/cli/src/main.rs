//! AquaTrack CLI - swimming times, workouts and goal predictions.

use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use aquatrack_core::{
    format_date, format_time, parse_time, Date, Distance, Goal, GoalId, PerformanceRecord,
    RecordId, Stroke, Workout, WorkoutId, WorkoutType,
};
use aquatrack_storage::{
    export_bundle, import_bundle, times_csv, workouts_csv, ExportBundle, JsonStorage, Storage,
};
use aquatrack_progress::{
    best_improvement, motivational_message, personal_bests, share_goal_achieved, share_progress,
    share_text, share_time, share_url, share_workout, summarize, GoalTracker, PredictionConfig,
    PredictionEngine, SharePlatform, ShareableResult,
};

#[derive(Parser)]
#[command(name = "aquatrack")]
#[command(about = "Personal swimming performance tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Storage directory for AquaTrack data
    #[arg(short, long, default_value = ".aquatrack", global = true)]
    storage: PathBuf,

    /// JSON file with prediction settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a swim time
    AddTime {
        /// Stroke (freestyle, backstroke, breaststroke, butterfly)
        stroke: Stroke,
        /// Distance in meters
        distance: Distance,
        /// Time as SS.cc or MM:SS.cc
        #[arg(value_parser = parse_time)]
        time: f64,
        /// Date of the swim (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<Date>,
        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Log a workout
    AddWorkout {
        /// Workout type (technique, endurance, speed, recovery, mixed)
        workout_type: WorkoutType,
        /// Duration in minutes
        duration: u32,
        /// Distance in meters
        distance: u32,
        /// Date of the workout (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<Date>,
        /// Number of sets
        #[arg(long)]
        sets: Option<u32>,
        /// Rest interval
        #[arg(long)]
        rest: Option<String>,
        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Set a goal time
    AddGoal {
        /// Stroke
        stroke: Stroke,
        /// Distance in meters
        distance: Distance,
        /// Target time as SS.cc or MM:SS.cc
        #[arg(value_parser = parse_time)]
        target: f64,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<Date>,
        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List logged data
    List {
        /// What to list
        #[arg(value_enum)]
        kind: ListKind,
    },
    /// Delete a swim time
    DeleteTime {
        /// Swim time ID
        id: RecordId,
    },
    /// Delete a workout
    DeleteWorkout {
        /// Workout ID
        id: WorkoutId,
    },
    /// Delete a goal
    DeleteGoal {
        /// Goal ID
        id: GoalId,
    },
    /// Mark a goal achieved
    Achieve {
        /// Goal ID
        id: GoalId,
    },
    /// Predict goal achievement (all active goals when no ID is given)
    Predict {
        /// Goal ID
        id: Option<GoalId>,
    },
    /// Show personal bests
    Bests,
    /// Show training summary
    Stats,
    /// Export data
    Export {
        /// Output format
        #[arg(value_enum, default_value = "json")]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Import a JSON backup, merging with existing data
    Import {
        /// Backup file
        file: PathBuf,
    },
    /// Build a share link for a swim time
    Share {
        /// Swim time ID
        id: RecordId,
        /// Platform (twitter, facebook, whatsapp, copy)
        #[arg(long, default_value = "copy")]
        platform: SharePlatform,
    },
    /// Build a share link for a workout
    ShareWorkout {
        /// Workout ID
        id: WorkoutId,
        /// Platform (twitter, facebook, whatsapp, copy)
        #[arg(long, default_value = "copy")]
        platform: SharePlatform,
    },
    /// Build a share link for the best improvement in one event
    ShareProgress {
        /// Stroke
        stroke: Stroke,
        /// Distance in meters
        distance: Distance,
        /// Platform (twitter, facebook, whatsapp, copy)
        #[arg(long, default_value = "copy")]
        platform: SharePlatform,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ListKind {
    Times,
    Workouts,
    Goals,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    TimesCsv,
    WorkoutsCsv,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<PredictionConfig> {
    let Some(path) = path else {
        return Ok(PredictionConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: PredictionConfig = serde_json::from_str(&json)
        .with_context(|| format!("parsing config {}", path.display()))?;
    debug!(?config, "Loaded prediction config");
    Ok(config)
}

fn today() -> Date {
    chrono::Utc::now().date_naive()
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let mut storage = JsonStorage::new(&cli.storage).await?;

    match cli.command {
        Commands::AddTime { stroke, distance, time, date, notes } => {
            let mut record = PerformanceRecord::new(stroke, distance, time, date.unwrap_or_else(today));
            record.notes = notes;
            storage.save_time(&record).await?;
            println!("Added time: {} - {} {} in {}", record.id, distance, stroke, format_time(time));
        }
        Commands::AddWorkout { workout_type, duration, distance, date, sets, rest, notes } => {
            let mut workout = Workout::new(date.unwrap_or_else(today), workout_type, duration, distance);
            workout.sets = sets;
            workout.rest_interval = rest;
            workout.notes = notes;
            storage.save_workout(&workout).await?;
            println!("Added workout: {} - {} {}m in {} min", workout.id, workout_type, distance, duration);
        }
        Commands::AddGoal { stroke, distance, target, deadline, notes } => {
            let times = storage.list_times().await?;
            let mut goal = Goal::new(stroke, distance, target);
            goal.current_best = aquatrack_progress::personal_best(&times, stroke, distance).map(|r| r.time);
            goal.deadline = deadline;
            goal.notes = notes;
            storage.save_goal(&goal).await?;
            println!("Added goal: {} - {} {} in {}", goal.id, distance, stroke, format_time(target));
        }
        Commands::List { kind } => list(&storage, kind).await?,
        Commands::DeleteTime { id } => {
            storage.delete_time(id).await?;
            println!("Deleted time {}", id);
        }
        Commands::DeleteWorkout { id } => {
            storage.delete_workout(id).await?;
            println!("Deleted workout {}", id);
        }
        Commands::DeleteGoal { id } => {
            storage.delete_goal(id).await?;
            println!("Deleted goal {}", id);
        }
        Commands::Achieve { id } => {
            let tracker = GoalTracker::new(storage);
            let goal = tracker.mark_achieved(id, chrono::Utc::now()).await?;
            println!("Goal achieved: {} {} in {} 🎉", goal.distance, goal.stroke, format_time(goal.target_time));

            let times = tracker.storage().lock().await.list_times().await?;
            if let Some(result) = share_goal_achieved(&goal, &times) {
                println!();
                println!("{}", share_text(&result));
            }
        }
        Commands::Predict { id } => {
            let tracker = GoalTracker::new(storage).with_engine(PredictionEngine::with_config(config));
            predict(&tracker, id).await?;
        }
        Commands::Bests => {
            let times = storage.list_times().await?;
            let bests = personal_bests(&times);
            println!("Personal bests ({})", bests.len());
            for pb in bests {
                println!("  {:>5} {:<12} {}  ({})",
                    pb.distance.to_string(),
                    pb.stroke.as_str(),
                    format_time(pb.record.time),
                    format_date(pb.record.date),
                );
            }
        }
        Commands::Stats => {
            let times = storage.list_times().await?;
            let workouts = storage.list_workouts().await?;
            let summary = summarize(&times, &workouts, today());

            println!("AquaTrack Summary");
            println!("  Swim times: {}", summary.total_times);
            println!("  Workouts: {}", summary.total_workouts);
            println!("  Personal bests: {}", summary.personal_best_count);
            println!("  Current streak: {} days", summary.current_streak);
            println!("  Total distance: {:.1}km", summary.total_distance_km);
            match summary.best_improvement {
                Some((stroke, distance, drop)) => {
                    println!("  Best improvement: -{} ({} {})", format_time(drop), distance, stroke)
                }
                None => println!("  Best improvement: --"),
            }
        }
        Commands::Export { format, out } => {
            let content = match format {
                ExportFormat::Json => export_bundle(&storage, chrono::Utc::now()).await?.to_json()?,
                ExportFormat::TimesCsv => times_csv(&storage.list_times().await?),
                ExportFormat::WorkoutsCsv => workouts_csv(&storage.list_workouts().await?),
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "Exported data");
                }
                None => println!("{}", content),
            }
        }
        Commands::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let bundle = ExportBundle::from_json(&json)
                .map_err(|e| anyhow!("{} is not an AquaTrack backup: {}", file.display(), e))?;
            let summary = import_bundle(&mut storage, &bundle).await?;
            println!(
                "Imported {} times, {} workouts, {} goals ({} skipped, {} invalid)",
                summary.times, summary.workouts, summary.goals, summary.skipped, summary.invalid
            );
        }
        Commands::Share { id, platform } => {
            let Some(record) = storage.load_time(id).await? else {
                println!("Swim time not found");
                return Ok(());
            };
            print_share(&share_time(&record), platform);
        }
        Commands::ShareWorkout { id, platform } => {
            let Some(workout) = storage.load_workout(id).await? else {
                println!("Workout not found");
                return Ok(());
            };
            print_share(&share_workout(&workout), platform);
        }
        Commands::ShareProgress { stroke, distance, platform } => {
            let times = storage.list_times().await?;
            let Some(drop) = best_improvement(&times, stroke, distance) else {
                println!("No improvement logged for {} {} yet", distance, stroke);
                return Ok(());
            };
            print_share(&share_progress(stroke, distance, drop), platform);
        }
    }

    Ok(())
}

async fn list(storage: &JsonStorage, kind: ListKind) -> Result<()> {
    match kind {
        ListKind::Times => {
            let mut times = storage.list_times().await?;
            times.sort_by(|a, b| b.date.cmp(&a.date));
            println!("Swim times ({})", times.len());
            for t in times {
                println!("  {} | {} | {:>5} {:<12} | {}",
                    t.id,
                    format_date(t.date),
                    t.distance.to_string(),
                    t.stroke.as_str(),
                    format_time(t.time),
                );
            }
        }
        ListKind::Workouts => {
            let mut workouts = storage.list_workouts().await?;
            workouts.sort_by(|a, b| b.date.cmp(&a.date));
            println!("Workouts ({})", workouts.len());
            for w in workouts {
                println!("  {} | {} | {:<9} | {}m in {} min",
                    w.id,
                    format_date(w.date),
                    w.workout_type.as_str(),
                    w.distance_meters,
                    w.duration_minutes,
                );
            }
        }
        ListKind::Goals => {
            let goals = storage.list_goals().await?;
            println!("Goals ({})", goals.len());
            for g in goals {
                let status = if g.is_active { "ACTIVE" } else { "ACHIEVED" };
                println!("  {} | {} | {} {} in {}",
                    g.id,
                    status,
                    g.distance,
                    g.stroke,
                    format_time(g.target_time),
                );
            }
        }
    }
    Ok(())
}

async fn predict(tracker: &GoalTracker<JsonStorage>, id: Option<GoalId>) -> Result<()> {
    let today = today();

    if let Some(id) = id {
        let Some(prediction) = tracker.predict_goal(id, today).await? else {
            println!("Goal not found");
            return Ok(());
        };
        print_prediction(&prediction);
        return Ok(());
    }

    let reports = tracker.active_reports(today).await?;
    if reports.is_empty() {
        println!("No active goals");
    }
    for report in reports {
        let goal = &report.goal;
        println!("{} {} → {} ({})", goal.distance, goal.stroke, format_time(goal.target_time), goal.id);
        match report.current_best {
            Some(best) => println!("  Current best: {} ({} to go, {:.0}% gap)",
                format_time(best),
                format_time((best - goal.target_time).max(0.0)),
                report.gap_percent,
            ),
            None => println!("  No times logged for this event yet"),
        }
        if let Some(days) = goal.days_until_deadline(today) {
            println!("  Deadline: {} days", days);
        }
        print_prediction(&report.prediction);
        if report.can_mark_achieved() {
            println!("  Target reached! Run `aquatrack achieve {}` 🎉", goal.id);
        }
    }
    Ok(())
}

fn print_share(result: &ShareableResult, platform: SharePlatform) {
    println!("{}", share_url(result, platform, "https://aquatrack.app/"));
}

fn print_prediction(prediction: &aquatrack_core::PredictionResult) {
    if let Some(date) = prediction.predicted_date {
        println!("  Predicted achievement: {}", format_date(date));
        println!(
            "  Confidence: {:.0}% • Trend: {}",
            prediction.confidence, prediction.current_trend
        );
    } else {
        println!("  Trend: {}", prediction.current_trend);
    }
    println!("  Improvement rate: {:+.3} s/day", prediction.improvement_rate);
    println!("  {}", motivational_message(prediction));
}
