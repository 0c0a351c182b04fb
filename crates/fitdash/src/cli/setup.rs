use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use fitdashapp::model::{Category, GoalUnit, Intensity, Mood};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fitdash",
    bin_name = "fitdash",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Log workouts, wellness and goals; see how the week is going", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding snapshot.json (overrides config)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Config file to read instead of the default fitdash.toml
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of styled text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log and manage workouts
    #[command(subcommand, alias = "w", display_order = 1)]
    Workout(WorkoutCommands),

    /// Log daily sleep, water, mood and energy
    #[command(subcommand, display_order = 2)]
    Wellness(WellnessCommands),

    /// Track goals
    #[command(subcommand, alias = "g", display_order = 3)]
    Goal(GoalCommands),

    /// Show the dashboard figures
    #[command(alias = "s", display_order = 4)]
    Stats,

    /// Clear every workout, wellness entry and goal
    #[command(display_order = 5)]
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkoutCommands {
    /// Log a workout
    #[command(alias = "a")]
    Add(WorkoutArgs),

    /// List workouts, newest first
    #[command(alias = "ls")]
    List,

    /// Flip a workout between completed and not completed
    Toggle {
        /// Workout id or id prefix
        id: String,
    },

    /// Remove a workout
    #[command(alias = "rm")]
    Remove {
        /// Workout id or id prefix
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct WorkoutArgs {
    /// Workout name (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,

    /// strength, cardio, mobility, sports or other
    #[arg(long, short = 'c')]
    pub category: Category,

    /// light, moderate or intense
    #[arg(long, short = 'i', default_value = "moderate")]
    pub intensity: Intensity,

    /// Duration in minutes
    #[arg(long, short = 'm')]
    pub minutes: u32,

    /// Calories burned
    #[arg(long, short = 'k', default_value_t = 0)]
    pub calories: u32,

    /// Day of the workout (YYYY-MM-DD, defaults to today)
    #[arg(long, short = 'd')]
    pub date: Option<NaiveDate>,

    /// Free-form notes
    #[arg(long, short = 'n')]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum WellnessCommands {
    /// Log (or replace) the entry for a day
    Log(WellnessArgs),

    /// List wellness entries, newest first
    #[command(alias = "ls")]
    List,
}

#[derive(Args, Debug)]
pub struct WellnessArgs {
    /// Hours slept
    #[arg(long)]
    pub sleep: f64,

    /// Liters of water
    #[arg(long)]
    pub water: f64,

    /// low, balanced or energized
    #[arg(long, default_value = "balanced")]
    pub mood: Mood,

    /// Energy level from 1 to 10
    #[arg(long)]
    pub energy: u8,

    /// Day of the entry (YYYY-MM-DD, defaults to today)
    #[arg(long, short = 'd')]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Add a goal
    #[command(alias = "a")]
    Add(GoalArgs),

    /// List goals with progress
    #[command(alias = "ls")]
    List,

    /// Set the current value of a goal
    Progress {
        /// Goal id or id prefix
        id: String,

        /// New current value
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Remove a goal
    #[command(alias = "rm")]
    Remove {
        /// Goal id or id prefix
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct GoalArgs {
    /// Goal title (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,

    /// Value to reach
    #[arg(long, short = 't')]
    pub target: f64,

    /// workouts, minutes or calories
    #[arg(long, short = 'u', default_value = "workouts")]
    pub unit: GoalUnit,

    /// Target date (YYYY-MM-DD)
    #[arg(long)]
    pub by: NaiveDate,
}
