use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use skill_journal_schemas::SkillId;
use tracing::debug;

use crate::database::Database;
use crate::error::Result;

/// Number of Monday-aligned weeks covered by the dashboard window.
const NUM_WEEKS: usize = 5;

/// One week bucket on the dashboard chart
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyCount {
    pub label: String,
    pub count: usize,
}

/// Aggregates backing the dashboard view
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub overall_count: usize,
    pub weekly_counts: Vec<WeeklyCount>,
    pub average_rating: Option<f64>,
}

/// Reflection counts for the current week and the four before it, oldest
/// first. Scoped to one skill when given; unscoped counts both the
/// structured and the free-text stream.
pub fn weekly_counts(db: &Database, skill_id: Option<&SkillId>) -> Result<Vec<WeeklyCount>> {
    let today = Utc::now().date_naive();
    let starts = week_starts(today);

    let since = starts[0].format("%Y-%m-%d").to_string();
    let timestamps = db.reflection_timestamps_since(skill_id, &since)?;

    let mut counts = vec![0usize; NUM_WEEKS];
    for raw in &timestamps {
        let date = match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts.with_timezone(&Utc).date_naive(),
            Err(_) => {
                debug!("Skipping unparseable timestamp '{}'", raw);
                continue;
            }
        };
        if let Some(i) = bucket_index(&starts, date) {
            counts[i] += 1;
        }
    }

    Ok(starts
        .iter()
        .zip(counts)
        .map(|(start, count)| WeeklyCount {
            label: format!("Wk {}", start.format("%b %d")),
            count,
        })
        .collect())
}

/// Total reflections of both kinds, unwindowed.
pub fn overall_count(db: &Database) -> Result<usize> {
    Ok(db.count_skill_reflections()? + db.count_generic_reflections()?)
}

/// Mean of the active "Rating" field's recorded values, if any exist.
pub fn average_rating(db: &Database, skill_id: Option<&SkillId>) -> Result<Option<f64>> {
    db.rating_average(skill_id)
}

/// The full dashboard payload in one call.
pub fn summary(db: &Database, skill_id: Option<&SkillId>) -> Result<DashboardSummary> {
    Ok(DashboardSummary {
        overall_count: overall_count(db)?,
        weekly_counts: weekly_counts(db, skill_id)?,
        average_rating: average_rating(db, skill_id)?,
    })
}

/// Monday starts of the window: four weeks back through the current week.
fn week_starts(today: NaiveDate) -> Vec<NaiveDate> {
    let offset = today.weekday().num_days_from_monday() as i64;
    let first = today - Duration::days(offset + (NUM_WEEKS as i64 - 1) * 7);
    (0..NUM_WEEKS as i64)
        .map(|week| first + Duration::weeks(week))
        .collect()
}

/// Bucket containing `date`: week start inclusive, start + 7 days exclusive.
fn bucket_index(starts: &[NaiveDate], date: NaiveDate) -> Option<usize> {
    starts
        .iter()
        .position(|start| *start <= date && date < *start + Duration::days(7))
}
