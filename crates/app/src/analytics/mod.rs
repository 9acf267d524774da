//! Dashboard analytics: metrics, charts and report records.
//!
//! Every read recomputes from the container snapshots it is given. The
//! stored [`AnalyticsState`] only remembers the last refresh for display.

pub mod charts;
pub mod metrics;
pub mod reports;

#[cfg(test)]
pub(crate) mod tests_support;

use fibertrack_core::analytics::{MetricKind, MetricPeriod};
use fibertrack_core::types::{EntityId, Timestamp};
use serde::Serialize;

pub use charts::{CHART_PROJECT_STATUS, CHART_TASK_PROGRESS};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub id: String,
    pub name: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: MetricKind,
    pub period: MetricPeriod,
    pub trend: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Line,
}

/// One named value column of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartPoint {
    Slice { name: String, value: usize },
    Day { date: String, completed: usize, in_progress: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub data: Vec<ChartPoint>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: EntityId,
    pub title: String,
    #[serde(rename = "type")]
    pub report_type: String,
    pub format: String,
    pub generated_at: Timestamp,
    pub url: String,
    pub parameters: serde_json::Value,
}

/// What the dashboard last computed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsState {
    pub metrics: Vec<Metric>,
    pub charts: Vec<ChartData>,
    pub reports: Vec<Report>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AnalyticsState {
    pub fn begin(&mut self) {
        self.is_loading = true;
    }

    /// Record a failed refresh. Previously stored results are kept.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.is_loading = false;
    }

    pub fn set_metrics(&mut self, metrics: Vec<Metric>) {
        self.metrics = metrics;
        self.finish();
    }

    /// Store `chart`, replacing any chart with the same id.
    pub fn set_chart(&mut self, chart: ChartData) {
        self.charts.retain(|c| c.id != chart.id);
        self.charts.push(chart);
        self.finish();
    }

    pub fn push_report(&mut self, report: Report) {
        self.reports.push(report);
        self.finish();
    }

    pub fn remove_report(&mut self, id: &str) -> Option<Report> {
        let pos = self.reports.iter().position(|r| r.id == id)?;
        Some(self.reports.remove(pos))
    }

    pub fn chart(&self, id: &str) -> Option<&ChartData> {
        self.charts.iter().find(|c| c.id == id)
    }

    fn finish(&mut self) {
        self.error = None;
        self.is_loading = false;
    }
}
