//! Terminal rendering.
//!
//! Every function here turns library values into a `String`; printing happens in
//! `commands.rs`. Styling goes through `console`, which drops ANSI codes when the
//! output is not a terminal.

use super::styles;
use chrono::{DateTime, Utc};
use fitdashapp::api::short_id;
use fitdashapp::commands::{CmdMessage, MessageLevel};
use fitdashapp::metrics::{DerivedMetrics, GoalProgress};
use fitdashapp::model::{WellnessEntry, Workout};
use std::fmt::Write;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 28;
const TITLE_WIDTH: usize = 32;
const BAR_WIDTH: usize = 20;
const DONE_MARKER: &str = "✓";
const OPEN_MARKER: &str = "·";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &*styles::DIM,
            MessageLevel::Success => &*styles::SUCCESS,
            MessageLevel::Warning => &*styles::WARNING,
            MessageLevel::Error => &*styles::ERROR,
        };
        let _ = writeln!(out, "{}", style.apply_to(&message.content));
    }
    out
}

pub fn render_workouts(workouts: &[Workout]) -> String {
    if workouts.is_empty() {
        return "No workouts logged.\n".to_string();
    }

    let mut out = String::new();
    for workout in workouts {
        let marker = if workout.completed {
            styles::DONE.apply_to(DONE_MARKER).to_string()
        } else {
            styles::DIM.apply_to(OPEN_MARKER).to_string()
        };
        let _ = writeln!(
            out,
            "{} {}  {}  {}  {:<8} {:<8} {:>4} min {:>5} kcal",
            marker,
            styles::ID.apply_to(short_id(&workout.id)),
            workout.date,
            styles::TITLE.apply_to(pad_to_width(&workout.name, NAME_WIDTH)),
            workout.category.as_str(),
            workout.intensity.as_str(),
            workout.duration_minutes,
            workout.calories,
        );
        if let Some(notes) = &workout.notes {
            let _ = writeln!(out, "             {}", styles::DIM.apply_to(notes));
        }
    }
    out
}

pub fn render_wellness(entries: &[WellnessEntry]) -> String {
    if entries.is_empty() {
        return "No wellness entries logged.\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{}  sleep {:>4.1} h  water {:>4.1} L  {:<9}  energy {:>2}/10",
            entry.date,
            entry.sleep_hours,
            entry.water_liters,
            entry.mood.as_str(),
            entry.energy_level,
        );
    }
    out
}

pub fn render_goals(goals: &[GoalProgress]) -> String {
    if goals.is_empty() {
        return "No goals set.\n".to_string();
    }

    let mut out = String::new();
    for goal in goals {
        let _ = writeln!(out, "{}", goal_line(goal));
    }
    out
}

fn goal_line(goal: &GoalProgress) -> String {
    let status = if goal.is_complete {
        styles::DONE.apply_to("done".to_string()).to_string()
    } else {
        format!(
            "{} to go, by {}",
            format_number(goal.remaining),
            goal.target_date
        )
    };
    format!(
        "{}  {}  {}/{} {}  {}  {:>3}%  {}",
        styles::ID.apply_to(short_id(&goal.id)),
        pad_to_width(&goal.title, TITLE_WIDTH),
        format_number(goal.current_value),
        format_number(goal.target_value),
        goal.unit.suffix(),
        bar(u64::from(goal.percent), 100),
        goal.percent,
        status,
    )
}

pub fn render_stats(
    metrics: &DerivedMetrics,
    recent_weeks: usize,
    hydration_threshold_liters: f64,
    last_updated: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", styles::HEADING.apply_to("Totals"));
    let _ = writeln!(
        out,
        "  {} workouts · {} minutes · {} kcal",
        metrics.totals.workouts, metrics.totals.minutes, metrics.totals.calories
    );

    let _ = writeln!(out, "\n{}", styles::HEADING.apply_to("Hydration streak"));
    let days = if metrics.hydration_streak == 1 { "day" } else { "days" };
    let _ = writeln!(
        out,
        "  {} {} at {} L or more",
        metrics.hydration_streak,
        days,
        format_number(hydration_threshold_liters)
    );

    let _ = writeln!(out, "\n{}", styles::HEADING.apply_to("Recent weeks"));
    let weeks = metrics.recent_weeks(recent_weeks);
    if weeks.is_empty() {
        let _ = writeln!(out, "  {}", styles::DIM.apply_to("No workouts yet"));
    }
    let busiest = weeks.iter().map(|w| w.minutes).max().unwrap_or(0);
    for week in weeks {
        let _ = writeln!(
            out,
            "  {}  {}  {:>4} min {:>5} kcal  {} sessions",
            week.week_start,
            bar(week.minutes, busiest),
            week.minutes,
            week.calories,
            week.sessions
        );
    }

    let _ = writeln!(out, "\n{}", styles::HEADING.apply_to("Categories"));
    if metrics.categories.is_empty() {
        let _ = writeln!(out, "  {}", styles::DIM.apply_to("No workouts yet"));
    }
    for (category, count) in &metrics.categories {
        let share = metrics.category_shares.get(category).copied().unwrap_or(0);
        let _ = writeln!(out, "  {:<9} {:>3}  {:>3}%", category.as_str(), count, share);
    }

    let _ = writeln!(out, "\n{}", styles::HEADING.apply_to("Wellness"));
    let wellness = &metrics.wellness;
    let _ = writeln!(
        out,
        "  Average sleep {:.1} h over {} entries",
        wellness.average_sleep_hours, wellness.entries
    );
    if let Some(latest) = &wellness.latest {
        let _ = writeln!(
            out,
            "  Latest {}: sleep {:.1} h, water {:.1} L, {}, energy {}/10",
            latest.date,
            latest.sleep_hours,
            latest.water_liters,
            latest.mood.as_str(),
            latest.energy_level
        );
    }

    let _ = writeln!(out, "\n{}", styles::HEADING.apply_to("Goals"));
    if metrics.goals.is_empty() {
        let _ = writeln!(out, "  {}", styles::DIM.apply_to("No goals set"));
    }
    for goal in &metrics.goals {
        let _ = writeln!(out, "  {}", goal_line(goal));
    }

    let _ = writeln!(
        out,
        "\n{}",
        styles::DIM.apply_to(format!("Last updated {}", format_time_ago(last_updated)))
    );
    out
}

/// A horizontal bar of `value` relative to `max`.
fn bar(value: u64, max: u64) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((value.min(max) * BAR_WIDTH as u64) / max) as usize
    };
    format!(
        "{}{}",
        styles::BAR.apply_to("█".repeat(filled)),
        " ".repeat(BAR_WIDTH - filled)
    )
}

/// Whole numbers print without a fraction.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
