//! Plain-text rendering of a prediction: six labeled figures and a bar
//! chart per time scale.

use itertools::Itertools;
use std::fmt::Write;

use crate::domain::{DailyPrediction, Money, Target, WeeklyPrediction};

/// Width of the longest bar in characters.
pub const CHART_WIDTH: usize = 40;

/// Render a horizontal bar chart comparing the three figures.
///
/// Bars scale to the largest magnitude; negative values are drawn with `-`.
pub fn bar_chart(title: &str, figures: &[(Target, f64)]) -> String {
    let max = figures
        .iter()
        .map(|(_, v)| v.abs())
        .fold(0.0_f64, f64::max);

    let rows = figures
        .iter()
        .map(|(target, value)| {
            let len = if max > 0.0 {
                ((value.abs() / max) * CHART_WIDTH as f64).round() as usize
            } else {
                0
            };
            let glyph = if *value < 0.0 { "-" } else { "#" };
            format!(
                "  {:<8}|{} {}",
                target.label(),
                glyph.repeat(len),
                Money(*value)
            )
        })
        .join("\n");

    format!("{title}\n{rows}")
}

pub fn render(
    calls: u64,
    daily: &DailyPrediction,
    weekly: &WeeklyPrediction,
    workdays_per_week: f64,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Revenue Prediction");
    let _ = writeln!(out, "Billable calls: {calls}");
    let _ = writeln!(out);

    let _ = writeln!(out, "Daily");
    for (target, value) in daily.figures() {
        let _ = writeln!(out, "  Predicted {:<8} {}", target.label(), Money(value));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Weekly ({workdays_per_week} workdays)");
    for (target, value) in weekly.figures() {
        let _ = writeln!(out, "  Predicted {:<8} {}", target.label(), Money(value));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", bar_chart("Daily comparison", &daily.figures()));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", bar_chart("Weekly comparison", &weekly.figures()));
    out
}
