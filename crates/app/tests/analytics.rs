mod common;

use assert_matches::assert_matches;
use chrono::Utc;
use fibertrack_app::analytics::{ChartPoint, CHART_PROJECT_STATUS, CHART_TASK_PROGRESS};
use fibertrack_app::config::AppConfig;
use fibertrack_app::error::AppError;
use fibertrack_app::handlers::{analytics, projects, tasks};
use fibertrack_app::state::AppState;
use fibertrack_core::analytics::{MetricPeriod, METRIC_ACTIVE_PROJECTS, METRIC_TASK_COMPLETION};
use fibertrack_core::error::CoreError;
use fibertrack_core::status::TaskStatus;
use serde_json::json;

use common::{date, empty_state, project_input, signed_in};

fn metric(metrics: &[fibertrack_app::analytics::Metric], id: &str) -> f64 {
    metrics.iter().find(|m| m.id == id).unwrap().value
}

#[tokio::test]
async fn completion_rate_tracks_task_statuses() {
    let state = empty_state();
    let metrics = analytics::get_metrics(&state, MetricPeriod::Month).await;
    assert_eq!(metric(&metrics, METRIC_TASK_COMPLETION), 0.0);

    let session = signed_in(&state).await;
    projects::create_project(&state, &session, project_input("A-1")).await.unwrap();
    projects::create_project(&state, &session, project_input("B-1")).await.unwrap();
    let all = tasks::list_tasks(&state).await;
    tasks::set_task_status(&state, &session, &all[0].id, TaskStatus::Completed)
        .await
        .unwrap();

    let metrics = analytics::get_metrics(&state, MetricPeriod::Week).await;
    assert_eq!(metric(&metrics, METRIC_TASK_COMPLETION), 25.0);
    assert_eq!(metric(&metrics, METRIC_ACTIVE_PROJECTS), 2.0);
}

#[tokio::test]
async fn task_progress_always_has_seven_days() {
    let state = empty_state();
    let chart = analytics::get_chart_data_at(
        &state,
        CHART_TASK_PROGRESS,
        MetricPeriod::Month,
        date(2024, 3, 7),
    )
    .await
    .unwrap();
    assert_eq!(chart.data.len(), 7);
    assert_matches!(&chart.data[0], ChartPoint::Day { date, .. } if date == "2024-03-01");
    assert_matches!(&chart.data[6], ChartPoint::Day { date, .. } if date == "2024-03-07");
}

#[tokio::test]
async fn new_tasks_show_up_in_todays_bucket() {
    let state = empty_state();
    let session = signed_in(&state).await;
    projects::create_project(&state, &session, project_input("A-1")).await.unwrap();
    let id = tasks::list_tasks(&state).await[0].id.clone();
    tasks::set_task_status(&state, &session, &id, TaskStatus::InProgress)
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let chart = analytics::get_chart_data_at(&state, CHART_TASK_PROGRESS, MetricPeriod::Day, today)
        .await
        .unwrap();
    assert_matches!(
        &chart.data[6],
        ChartPoint::Day { in_progress: 1, completed: 0, .. }
    );
}

#[tokio::test]
async fn refresh_stores_metrics_and_replaces_charts() {
    let state = AppState::bootstrap(AppConfig::default()).await.unwrap();

    analytics::update_metrics(&state).await;
    analytics::update_chart_data(&state, CHART_PROJECT_STATUS).await.unwrap();
    analytics::update_chart_data(&state, CHART_PROJECT_STATUS).await.unwrap();
    analytics::update_chart_data(&state, CHART_TASK_PROGRESS).await.unwrap();

    let snapshot = analytics::snapshot(&state).await;
    assert_eq!(snapshot.metrics.len(), 4);
    assert!(snapshot.metrics.iter().all(|m| m.period == MetricPeriod::Month));
    assert_eq!(snapshot.charts.len(), 2);
    assert!(!snapshot.is_loading);
    assert!(snapshot.error.is_none());

    // Seed: one project in progress on installation, one in progress on design.
    let pie = snapshot.charts.iter().find(|c| c.id == CHART_PROJECT_STATUS).unwrap();
    assert_matches!(&pie.data[0], ChartPoint::Slice { value: 2, .. });
}

#[tokio::test]
async fn unknown_chart_is_stored_as_error() {
    let state = empty_state();
    let result = analytics::update_chart_data(&state, "burn-down").await;
    assert_matches!(result, Err(AppError::Core(CoreError::NotFound { .. })));

    let snapshot = analytics::snapshot(&state).await;
    assert!(!snapshot.is_loading);
    assert!(snapshot.error.as_deref().unwrap().contains("burn-down"));
    assert!(snapshot.charts.is_empty());

    analytics::update_metrics(&state).await;
    assert!(analytics::snapshot(&state).await.error.is_none());
}

#[tokio::test]
async fn reports_are_placeholder_records() {
    let state = empty_state();
    let url = analytics::generate_report(&state, "projects", json!({"period": "month"}))
        .await
        .unwrap();
    assert_eq!(url, "#");

    let reports = analytics::reports(&state).await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].format, "pdf");

    assert!(analytics::delete_report(&state, &reports[0].id).await.is_some());
    assert!(analytics::delete_report(&state, &reports[0].id).await.is_none());
    assert!(analytics::reports(&state).await.is_empty());
}

#[tokio::test]
async fn bad_report_parameters_are_stored_as_error() {
    let state = empty_state();
    let result = analytics::generate_report(&state, "projects", json!("not an object")).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Validation(_))));

    let snapshot = analytics::snapshot(&state).await;
    assert!(!snapshot.is_loading);
    assert!(snapshot.error.is_some());
    assert!(snapshot.reports.is_empty());
}
