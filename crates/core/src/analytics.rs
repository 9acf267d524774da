//! Pure arithmetic behind the dashboard metrics and charts.
//!
//! Everything here works on plain counts and statuses; the application layer
//! gathers those from container snapshots and calls in.

use chrono::{Duration, NaiveDate};

use crate::status::WorkflowStatus;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const METRIC_ACTIVE_PROJECTS: &str = "active-projects";
pub const METRIC_TASK_COMPLETION: &str = "task-completion";
pub const METRIC_EMPLOYEE_UTILIZATION: &str = "employee-utilization";
pub const METRIC_PROJECT_EFFICIENCY: &str = "project-efficiency";

/// Placeholder trend values. These are not computed deltas.
pub const TREND_ACTIVE_PROJECTS: f64 = 0.0;
pub const TREND_TASK_COMPLETION: f64 = 5.0;
pub const TREND_EMPLOYEE_UTILIZATION: f64 = 2.0;
pub const TREND_PROJECT_EFFICIENCY: f64 = 3.0;

/// Number of daily points in the task-progress chart (today included).
pub const TASK_PROGRESS_DAYS: usize = 7;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

define_name_enum! {
    /// Reporting window a metric is labelled with.
    MetricPeriod {
        Day = "day",
        Week = "week",
        Month = "month",
        Quarter = "quarter",
        Year = "year",
    }
}

define_name_enum! {
    MetricKind {
        Count = "count",
        Percentage = "percentage",
    }
}

define_name_enum! {
    /// Slice of the project-status pie chart.
    ProjectBucket {
        InProgress = "in_progress",
        Completed = "completed",
        UnderReview = "review",
    }
}

impl ProjectBucket {
    /// Chart slice order.
    pub const CHART_ORDER: [ProjectBucket; 3] = [
        ProjectBucket::InProgress,
        ProjectBucket::Completed,
        ProjectBucket::UnderReview,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectBucket::InProgress => "In progress",
            ProjectBucket::Completed => "Completed",
            ProjectBucket::UnderReview => "Under review",
        }
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// Percentage of completed tasks. Zero when there are no tasks.
pub fn completion_rate(completed: usize, total: usize) -> f64 {
    percent(completed, total)
}

/// Percentage of employees in field roles. Zero when there are no employees.
pub fn utilization_percent(field_staff: usize, total: usize) -> f64 {
    percent(field_staff, total)
}

/// Composite efficiency: completion rate scaled by the utilization fraction.
pub fn efficiency(completion_rate: f64, utilization_percent: f64) -> f64 {
    completion_rate * (utilization_percent / 100.0)
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// A project is active while neither workflow phase is completed.
pub fn is_active(design: WorkflowStatus, installation: WorkflowStatus) -> bool {
    design != WorkflowStatus::Completed && installation != WorkflowStatus::Completed
}

/// Place a project into exactly one chart bucket, or none.
///
/// Precedence: both phases completed, then either phase in review, then either
/// phase in progress. A project matching none of these is not charted.
pub fn classify_project(
    design: WorkflowStatus,
    installation: WorkflowStatus,
) -> Option<ProjectBucket> {
    use WorkflowStatus::{Completed, InProgress, Review};

    if design == Completed && installation == Completed {
        Some(ProjectBucket::Completed)
    } else if design == Review || installation == Review {
        Some(ProjectBucket::UnderReview)
    } else if design == InProgress || installation == InProgress {
        Some(ProjectBucket::InProgress)
    } else {
        None
    }
}

/// The `days` calendar dates ending at `today`, oldest first.
pub fn trailing_days(today: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .map(|back| today - Duration::days(back as i64))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use WorkflowStatus::*;

    #[test]
    fn completion_rate_is_zero_without_tasks() {
        assert_eq!(completion_rate(0, 0), 0.0);
    }

    #[test]
    fn completion_rate_is_percentage_of_total() {
        assert_eq!(completion_rate(1, 4), 25.0);
        assert_eq!(completion_rate(3, 3), 100.0);
    }

    #[test]
    fn efficiency_scales_by_utilization_fraction() {
        assert_eq!(efficiency(50.0, 50.0), 25.0);
        assert_eq!(efficiency(80.0, 0.0), 0.0);
    }

    #[test]
    fn active_requires_neither_phase_completed() {
        assert!(is_active(InProgress, NotStarted));
        assert!(!is_active(Completed, InProgress));
        assert!(!is_active(Approved, Completed));
    }

    #[test]
    fn buckets_are_mutually_exclusive() {
        // Would match both "review" and "in progress" under overlapping predicates.
        assert_eq!(
            classify_project(Review, InProgress),
            Some(ProjectBucket::UnderReview)
        );
        assert_eq!(
            classify_project(Completed, Completed),
            Some(ProjectBucket::Completed)
        );
        assert_eq!(
            classify_project(Approved, InProgress),
            Some(ProjectBucket::InProgress)
        );
        assert_eq!(classify_project(NotStarted, NotStarted), None);
        assert_eq!(classify_project(Completed, Approved), None);
    }

    #[test]
    fn trailing_days_span_a_week_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let days = trailing_days(today, TASK_PROGRESS_DAYS);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert_eq!(days[6], today);
    }

    #[test]
    fn period_parses_from_wire_name() {
        assert_eq!(MetricPeriod::from_name("month").unwrap(), MetricPeriod::Month);
    }
}
