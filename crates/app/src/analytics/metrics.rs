use fibertrack_core::analytics::{
    completion_rate, efficiency, is_active, utilization_percent, MetricKind, MetricPeriod,
    METRIC_ACTIVE_PROJECTS, METRIC_EMPLOYEE_UTILIZATION, METRIC_PROJECT_EFFICIENCY,
    METRIC_TASK_COMPLETION, TREND_ACTIVE_PROJECTS, TREND_EMPLOYEE_UTILIZATION,
    TREND_PROJECT_EFFICIENCY, TREND_TASK_COMPLETION,
};
use fibertrack_core::status::TaskStatus;
use fibertrack_db::models::employee::Employee;
use fibertrack_db::models::project::Project;
use fibertrack_db::models::task::Task;

use super::Metric;

/// The four dashboard metrics, in display order.
pub fn compute_metrics(
    projects: &[Project],
    tasks: &[Task],
    employees: &[Employee],
    period: MetricPeriod,
) -> Vec<Metric> {
    let active = projects
        .iter()
        .filter(|p| is_active(p.design_status, p.installation_status))
        .count();

    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    let task_rate = completion_rate(completed, tasks.len());

    let field_staff = employees.iter().filter(|e| e.role.is_field_role()).count();
    let utilization = utilization_percent(field_staff, employees.len());

    tracing::debug!(
        active_projects = active,
        task_rate,
        utilization,
        "Metrics recomputed"
    );

    vec![
        metric(
            METRIC_ACTIVE_PROJECTS,
            "Active projects",
            active as f64,
            MetricKind::Count,
            period,
            TREND_ACTIVE_PROJECTS,
        ),
        metric(
            METRIC_TASK_COMPLETION,
            "Task completion",
            task_rate,
            MetricKind::Percentage,
            period,
            TREND_TASK_COMPLETION,
        ),
        metric(
            METRIC_EMPLOYEE_UTILIZATION,
            "Staff utilization",
            utilization,
            MetricKind::Percentage,
            period,
            TREND_EMPLOYEE_UTILIZATION,
        ),
        metric(
            METRIC_PROJECT_EFFICIENCY,
            "Efficiency",
            efficiency(task_rate, utilization),
            MetricKind::Percentage,
            period,
            TREND_PROJECT_EFFICIENCY,
        ),
    ]
}

fn metric(
    id: &str,
    name: &str,
    value: f64,
    kind: MetricKind,
    period: MetricPeriod,
    trend: f64,
) -> Metric {
    Metric {
        id: id.to_string(),
        name: name.to_string(),
        value,
        kind,
        period,
        trend,
    }
}
