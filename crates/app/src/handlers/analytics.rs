//! Analytics reads and refresh commands.
//!
//! Reads recompute from the current container snapshots. Refresh commands
//! store their result in [`AnalyticsState`]; a failure is stored as the
//! error string with the loading flag cleared, and is not retried.

use chrono::{NaiveDate, Utc};
use fibertrack_core::analytics::MetricPeriod;
use fibertrack_events::{types as event_types, ChangeEvent, EntityKind};

use crate::analytics::{charts, metrics, reports, AnalyticsState, ChartData, Metric, Report};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub async fn get_metrics(state: &AppState, period: MetricPeriod) -> Vec<Metric> {
    let projects = state.projects.read().await.list();
    let tasks = state.tasks.read().await.list();
    let employees = state.employees.read().await.list();
    metrics::compute_metrics(&projects, &tasks, &employees, period)
}

pub async fn get_chart_data(
    state: &AppState,
    chart_id: &str,
    period: MetricPeriod,
) -> AppResult<ChartData> {
    get_chart_data_at(state, chart_id, period, Utc::now().date_naive()).await
}

/// Like [`get_chart_data`] with an explicit `today` for the trailing window.
///
/// `period` is accepted for symmetry with metrics; the built-in charts do
/// not depend on it.
pub async fn get_chart_data_at(
    state: &AppState,
    chart_id: &str,
    period: MetricPeriod,
    today: NaiveDate,
) -> AppResult<ChartData> {
    let projects = state.projects.read().await.list();
    let tasks = state.tasks.read().await.list();
    tracing::debug!(chart_id, %period, %today, "Building chart");
    Ok(charts::build_chart(chart_id, &projects, &tasks, today)?)
}

/// Recompute the stored metrics for the `month` period.
pub async fn update_metrics(state: &AppState) {
    state.analytics.write().await.begin();
    let computed = get_metrics(state, MetricPeriod::Month).await;
    state.analytics.write().await.set_metrics(computed);
    state
        .event_bus
        .publish(ChangeEvent::global(event_types::METRICS_UPDATED));
}

/// Recompute one chart and replace the stored chart with the same id.
pub async fn update_chart_data(state: &AppState, chart_id: &str) -> AppResult<ChartData> {
    state.analytics.write().await.begin();
    match get_chart_data(state, chart_id, MetricPeriod::Month).await {
        Ok(chart) => {
            state.analytics.write().await.set_chart(chart.clone());
            state.event_bus.publish(
                ChangeEvent::entity(event_types::CHART_UPDATED, EntityKind::Chart, chart_id),
            );
            Ok(chart)
        }
        Err(e) => Err(record_failure(state, "Failed to update chart data", e).await),
    }
}

/// Create a placeholder report record and return its link.
pub async fn generate_report(
    state: &AppState,
    report_type: &str,
    parameters: serde_json::Value,
) -> AppResult<String> {
    state.analytics.write().await.begin();
    match reports::new_report(report_type, parameters) {
        Ok(report) => {
            let url = report.url.clone();
            tracing::info!(report_id = %report.id, report_type, "Report generated");
            state.event_bus.publish(
                ChangeEvent::entity(
                    event_types::REPORT_GENERATED,
                    EntityKind::Report,
                    report.id.clone(),
                ),
            );
            state.analytics.write().await.push_report(report);
            Ok(url)
        }
        Err(e) => Err(record_failure(state, "Failed to generate report", e.into()).await),
    }
}

pub async fn reports(state: &AppState) -> Vec<Report> {
    state.analytics.read().await.reports.clone()
}

pub async fn delete_report(state: &AppState, id: &str) -> Option<Report> {
    let removed = state.analytics.write().await.remove_report(id);
    if removed.is_some() {
        state
            .event_bus
            .publish(ChangeEvent::entity(event_types::REPORT_REMOVED, EntityKind::Report, id));
    }
    removed
}

/// Copy of the stored analytics state.
pub async fn snapshot(state: &AppState) -> AnalyticsState {
    state.analytics.read().await.clone()
}

async fn record_failure(state: &AppState, context: &str, err: AppError) -> AppError {
    tracing::error!(error = %err, "{context}");
    state
        .analytics
        .write()
        .await
        .fail(format!("{context}: {}", err.user_message()));
    err
}
