use super::logging::init_logging;
use super::render;
use super::setup::{
    Cli, Commands, GoalArgs, GoalCommands, WellnessArgs, WellnessCommands, WorkoutArgs,
    WorkoutCommands,
};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::Parser;
use fitdashapp::api::FitdashApi;
use fitdashapp::commands::CmdResult;
use fitdashapp::config::FitdashConfig;
use fitdashapp::metrics::{DerivedMetrics, WeekBucket};
use fitdashapp::model::{NewGoal, NewWellnessEntry, NewWorkout};
use fitdashapp::store::{FsBackend, SnapshotStore, StoreOptions};
use serde::Serialize;
use std::path::PathBuf;

pub struct AppContext {
    pub api: FitdashApi<FsBackend>,
    pub config: FitdashConfig,
    pub json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Workout(cmd)) => match cmd {
            WorkoutCommands::Add(args) => handle_workout_add(&ctx, args),
            WorkoutCommands::List => handle_workout_list(&ctx),
            WorkoutCommands::Toggle { id } => {
                let result = ctx.api.toggle_workout(&id)?;
                print_result(&ctx, &result)
            }
            WorkoutCommands::Remove { id } => {
                let result = ctx.api.remove_workout(&id)?;
                print_result(&ctx, &result)
            }
        },
        Some(Commands::Wellness(cmd)) => match cmd {
            WellnessCommands::Log(args) => handle_wellness_log(&ctx, args),
            WellnessCommands::List => handle_wellness_list(&ctx),
        },
        Some(Commands::Goal(cmd)) => match cmd {
            GoalCommands::Add(args) => handle_goal_add(&ctx, args),
            GoalCommands::List => handle_goal_list(&ctx),
            GoalCommands::Progress { id, value } => {
                let result = ctx.api.update_goal_progress(&id, value)?;
                print_result(&ctx, &result)
            }
            GoalCommands::Remove { id } => {
                let result = ctx.api.remove_goal(&id)?;
                print_result(&ctx, &result)
            }
        },
        Some(Commands::Stats) | None => handle_stats(&ctx),
        Some(Commands::Reset { yes }) => handle_reset(&ctx, yes),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = FitdashConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    let data_dir: PathBuf = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => config.data_dir()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), policy = ?config.write_policy, "opening store");

    let store = SnapshotStore::load_with(
        FsBackend::new(&data_dir),
        StoreOptions {
            write_policy: config.write_policy,
            ..StoreOptions::default()
        },
    );
    let api = FitdashApi::new(store, config.metrics_options());

    Ok(AppContext {
        api,
        config,
        json: cli.json,
    })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn handle_workout_add(ctx: &AppContext, args: WorkoutArgs) -> Result<()> {
    let draft = NewWorkout {
        name: args.name.join(" "),
        date: args.date.unwrap_or_else(today),
        category: args.category,
        intensity: args.intensity,
        duration_minutes: args.minutes,
        calories: args.calories,
        notes: args.notes,
    };
    let result = ctx.api.add_workout(draft)?;
    print_result(ctx, &result)
}

fn handle_workout_list(ctx: &AppContext) -> Result<()> {
    let snapshot = ctx.api.snapshot();
    if ctx.json {
        return print_json(&snapshot.workouts);
    }
    print!("{}", render::render_workouts(&snapshot.workouts));
    Ok(())
}

fn handle_wellness_log(ctx: &AppContext, args: WellnessArgs) -> Result<()> {
    let draft = NewWellnessEntry {
        date: args.date.unwrap_or_else(today),
        sleep_hours: args.sleep,
        water_liters: args.water,
        mood: args.mood,
        energy_level: args.energy,
    };
    let result = ctx.api.log_wellness(draft)?;
    print_result(ctx, &result)
}

fn handle_wellness_list(ctx: &AppContext) -> Result<()> {
    let snapshot = ctx.api.snapshot();
    if ctx.json {
        return print_json(&snapshot.wellness);
    }
    print!("{}", render::render_wellness(&snapshot.wellness));
    Ok(())
}

fn handle_goal_add(ctx: &AppContext, args: GoalArgs) -> Result<()> {
    let draft = NewGoal {
        title: args.title.join(" "),
        unit: args.unit,
        target_value: args.target,
        target_date: args.by,
    };
    let result = ctx.api.add_goal(draft)?;
    print_result(ctx, &result)
}

fn handle_goal_list(ctx: &AppContext) -> Result<()> {
    let metrics = ctx.api.metrics();
    if ctx.json {
        return print_json(&metrics.goals);
    }
    print!("{}", render::render_goals(&metrics.goals));
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsView<'a> {
    last_updated: DateTime<Utc>,
    recent_weeks: &'a [WeekBucket],
    #[serde(flatten)]
    metrics: &'a DerivedMetrics,
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let snapshot = ctx.api.snapshot();
    let metrics = DerivedMetrics::compute_with(&snapshot, &ctx.config.metrics_options());

    if ctx.json {
        return print_json(&StatsView {
            last_updated: snapshot.last_updated,
            recent_weeks: metrics.recent_weeks(ctx.config.recent_weeks),
            metrics: &metrics,
        });
    }

    print!(
        "{}",
        render::render_stats(
            &metrics,
            ctx.config.recent_weeks,
            ctx.config.hydration_threshold_liters,
            snapshot.last_updated,
        )
    );
    Ok(())
}

fn handle_reset(ctx: &AppContext, yes: bool) -> Result<()> {
    if !yes {
        bail!("Reset clears all data; pass --yes to confirm");
    }
    let result = ctx.api.reset()?;
    print_result(ctx, &result)
}

fn print_result(ctx: &AppContext, result: &CmdResult) -> Result<()> {
    if ctx.json {
        return print_json(result);
    }
    print!("{}", render::render_messages(&result.messages));
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode JSON")?;
    println!("{json}");
    Ok(())
}
