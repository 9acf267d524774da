use chrono::NaiveDate;
use fibertrack_core::analytics::{classify_project, trailing_days, ProjectBucket, TASK_PROGRESS_DAYS};
use fibertrack_core::error::CoreError;
use fibertrack_core::status::TaskStatus;
use fibertrack_db::models::project::Project;
use fibertrack_db::models::task::Task;

use super::{ChartData, ChartKind, ChartPoint, ChartSeries};

pub const CHART_PROJECT_STATUS: &str = "project-status";
pub const CHART_TASK_PROGRESS: &str = "task-progress";

/// Build the chart named `chart_id` from the given snapshots.
///
/// `today` anchors the task-progress window.
pub fn build_chart(
    chart_id: &str,
    projects: &[Project],
    tasks: &[Task],
    today: NaiveDate,
) -> Result<ChartData, CoreError> {
    match chart_id {
        CHART_PROJECT_STATUS => Ok(project_status(projects)),
        CHART_TASK_PROGRESS => Ok(task_progress(tasks, today)),
        other => Err(CoreError::NotFound {
            entity: "chart",
            id: other.to_string(),
        }),
    }
}

/// Pie chart of projects per status bucket. Each project lands in at most
/// one bucket.
pub fn project_status(projects: &[Project]) -> ChartData {
    let mut counts = [0usize; 3];
    for project in projects {
        if let Some(bucket) = classify_project(project.design_status, project.installation_status) {
            counts[bucket_index(bucket)] += 1;
        }
    }

    let data = ProjectBucket::CHART_ORDER
        .iter()
        .map(|&bucket| ChartPoint::Slice {
            name: bucket.label().to_string(),
            value: counts[bucket_index(bucket)],
        })
        .collect();

    ChartData {
        id: CHART_PROJECT_STATUS.to_string(),
        kind: ChartKind::Pie,
        title: "Project status".to_string(),
        data,
        series: vec![series("Projects", "value")],
    }
}

/// Line chart of completed and in-progress tasks created on each of the
/// last seven UTC calendar days, oldest first.
pub fn task_progress(tasks: &[Task], today: NaiveDate) -> ChartData {
    let data = trailing_days(today, TASK_PROGRESS_DAYS)
        .into_iter()
        .map(|date| {
            let (mut completed, mut in_progress) = (0, 0);
            for task in tasks.iter().filter(|t| t.created_at.date_naive() == date) {
                match task.status {
                    TaskStatus::Completed => completed += 1,
                    TaskStatus::InProgress => in_progress += 1,
                    _ => {}
                }
            }
            ChartPoint::Day {
                date: date.format("%Y-%m-%d").to_string(),
                completed,
                in_progress,
            }
        })
        .collect();

    ChartData {
        id: CHART_TASK_PROGRESS.to_string(),
        kind: ChartKind::Line,
        title: "Task progress".to_string(),
        data,
        series: vec![
            series("Completed", "completed"),
            series("In progress", "in_progress"),
        ],
    }
}

fn bucket_index(bucket: ProjectBucket) -> usize {
    match bucket {
        ProjectBucket::InProgress => 0,
        ProjectBucket::Completed => 1,
        ProjectBucket::UnderReview => 2,
    }
}

fn series(name: &str, key: &str) -> ChartSeries {
    ChartSeries {
        name: name.to_string(),
        key: key.to_string(),
    }
}
