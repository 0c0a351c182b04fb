//! # Domain Model
//!
//! This module defines the records fitdash keeps: [`Workout`], [`WellnessEntry`],
//! [`Goal`], and the aggregate root that holds them, [`Snapshot`].
//!
//! ## Persisted Shape
//!
//! The snapshot is stored as a single JSON document. Field names are camelCase and
//! enum values lowercase:
//!
//! ```text
//! {
//!   "workouts":    [{ "id", "name", "date", "category", "intensity",
//!                     "durationMinutes", "calories", "notes"?, "completed" }],
//!   "wellness":    [{ "id", "date", "sleepHours", "waterLiters", "mood", "energyLevel" }],
//!   "goals":       [{ "id", "title", "unit", "targetValue", "currentValue",
//!                     "targetDate", "createdAt" }],
//!   "lastUpdated": "2024-05-12T08:30:00Z"
//! }
//! ```
//!
//! Dates are calendar days (`YYYY-MM-DD`), timestamps are RFC 3339 in UTC.
//! Missing collections deserialize as empty so older or hand-edited documents still load.
//!
//! ## Ordering
//!
//! A published snapshot always has:
//! - workouts sorted by date, newest first
//! - wellness entries sorted by date, newest first, one entry per date
//! - goals sorted by target date, soonest first
//!
//! The model does not enforce these itself; [`crate::commands::normalize`] does, and the
//! store never publishes a snapshot that has not been through it.
//!
//! ## Drafts
//!
//! Creation goes through draft types ([`NewWorkout`], [`NewWellnessEntry`], [`NewGoal`])
//! that carry only the caller-supplied fields. Identifiers, timestamps and defaults
//! (`completed = true`, `current_value = 0`) are assigned by the command layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{FitdashError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Strength,
    Cardio,
    Mobility,
    Sports,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Strength,
        Category::Cardio,
        Category::Mobility,
        Category::Sports,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Strength => "strength",
            Category::Cardio => "cardio",
            Category::Mobility => "mobility",
            Category::Sports => "sports",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unsupported workout category: {value}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    Moderate,
    Intense,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Light => "light",
            Intensity::Moderate => "moderate",
            Intensity::Intense => "intense",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Intensity::Light),
            "moderate" => Ok(Intensity::Moderate),
            "intense" => Ok(Intensity::Intense),
            _ => Err(format!("unsupported intensity: {value}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Low,
    Balanced,
    Energized,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Low => "low",
            Mood::Balanced => "balanced",
            Mood::Energized => "energized",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Mood::Low),
            "balanced" => Ok(Mood::Balanced),
            "energized" => Ok(Mood::Energized),
            _ => Err(format!("unsupported mood: {value}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalUnit {
    Workouts,
    Minutes,
    Calories,
}

impl GoalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalUnit::Workouts => "workouts",
            GoalUnit::Minutes => "minutes",
            GoalUnit::Calories => "calories",
        }
    }

    /// Short label used after a quantity ("12 / 20 sessions").
    pub fn suffix(&self) -> &'static str {
        match self {
            GoalUnit::Workouts => "sessions",
            GoalUnit::Minutes => "minutes",
            GoalUnit::Calories => "kcal",
        }
    }
}

impl fmt::Display for GoalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalUnit {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "workouts" => Ok(GoalUnit::Workouts),
            "minutes" => Ok(GoalUnit::Minutes),
            "calories" => Ok(GoalUnit::Calories),
            _ => Err(format!("unsupported goal unit: {value}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub category: Category,
    pub intensity: Intensity,
    pub duration_minutes: u32,
    pub calories: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub sleep_hours: f64,
    pub water_liters: f64,
    pub mood: Mood,
    pub energy_level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub unit: GoalUnit,
    pub target_value: f64,
    pub current_value: f64,
    pub target_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// The complete persisted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub workouts: Vec<Workout>,
    pub wellness: Vec<WellnessEntry>,
    pub goals: Vec<Goal>,
    pub last_updated: DateTime<Utc>,
}

impl Snapshot {
    pub fn empty(last_updated: DateTime<Utc>) -> Self {
        Self {
            last_updated,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty() && self.wellness.is_empty() && self.goals.is_empty()
    }

    pub fn workout(&self, id: &Uuid) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == *id)
    }

    pub fn goal(&self, id: &Uuid) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == *id)
    }

    pub fn wellness_on(&self, date: NaiveDate) -> Option<&WellnessEntry> {
        self.wellness.iter().find(|e| e.date == date)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub name: String,
    pub date: NaiveDate,
    pub category: Category,
    pub intensity: Intensity,
    pub duration_minutes: u32,
    pub calories: u32,
    pub notes: Option<String>,
}

impl NewWorkout {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FitdashError::Validation(
                "Workout name cannot be empty".to_string(),
            ));
        }
        if self.duration_minutes == 0 {
            return Err(FitdashError::Validation(
                "Workout duration must be at least one minute".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_workout(self, id: Uuid) -> Workout {
        Workout {
            id,
            name: self.name.trim().to_string(),
            date: self.date,
            category: self.category,
            intensity: self.intensity,
            duration_minutes: self.duration_minutes,
            calories: self.calories,
            // Blank notes are the same as no notes
            notes: self
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            completed: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWellnessEntry {
    pub date: NaiveDate,
    pub sleep_hours: f64,
    pub water_liters: f64,
    pub mood: Mood,
    pub energy_level: u8,
}

impl NewWellnessEntry {
    pub fn validate(&self) -> Result<()> {
        if !(self.sleep_hours.is_finite() && self.sleep_hours >= 0.0) {
            return Err(FitdashError::Validation(format!(
                "Sleep hours must be zero or more, got {}",
                self.sleep_hours
            )));
        }
        if !(self.water_liters.is_finite() && self.water_liters >= 0.0) {
            return Err(FitdashError::Validation(format!(
                "Water intake must be zero or more liters, got {}",
                self.water_liters
            )));
        }
        if !(1..=10).contains(&self.energy_level) {
            return Err(FitdashError::Validation(format!(
                "Energy level must be between 1 and 10, got {}",
                self.energy_level
            )));
        }
        Ok(())
    }

    pub(crate) fn into_entry(self, id: Uuid) -> WellnessEntry {
        WellnessEntry {
            id,
            date: self.date,
            sleep_hours: self.sleep_hours,
            water_liters: self.water_liters,
            mood: self.mood,
            energy_level: self.energy_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub title: String,
    pub unit: GoalUnit,
    pub target_value: f64,
    pub target_date: NaiveDate,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(FitdashError::Validation(
                "Goal title cannot be empty".to_string(),
            ));
        }
        if !(self.target_value.is_finite() && self.target_value > 0.0) {
            return Err(FitdashError::Validation(format!(
                "Goal target must be greater than zero, got {}",
                self.target_value
            )));
        }
        Ok(())
    }

    pub(crate) fn into_goal(self, id: Uuid, created_at: DateTime<Utc>) -> Goal {
        Goal {
            id,
            title: self.title.trim().to_string(),
            unit: self.unit,
            target_value: self.target_value,
            current_value: 0.0,
            target_date: self.target_date,
            created_at,
        }
    }
}
