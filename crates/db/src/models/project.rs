//! Project entity model and DTOs.

use chrono::NaiveDate;
use fibertrack_core::error::CoreError;
use fibertrack_core::status::{Priority, ProjectType, WorkflowPhase, WorkflowStatus};
use fibertrack_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{merge, merge_opt};

/// A construction stage owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStage {
    pub id: EntityId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: WorkflowStatus,
    #[validate(range(max = 100))]
    pub completion_percentage: u8,
}

/// A fiber-optic construction project.
///
/// Design-review (`rdStatus`) and installation (`idStatus`) progress are
/// tracked independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub customer: String,
    pub name: String,
    pub deadline: NaiveDate,
    pub priority: Priority,
    pub survey_act: bool,
    /// Human-facing project cipher, e.g. `MSK-KZN-001`.
    pub code: String,
    pub assignee: String,
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub stages: Vec<ProjectStage>,
    #[serde(rename = "rdStatus")]
    pub design_status: WorkflowStatus,
    #[serde(rename = "rdReviewDate")]
    pub design_review_date: Option<NaiveDate>,
    #[serde(rename = "rdApprovalDate")]
    pub design_approval_date: Option<NaiveDate>,
    #[serde(rename = "rdComments")]
    pub design_comments: Option<String>,
    #[serde(rename = "idStatus")]
    pub installation_status: WorkflowStatus,
    #[serde(rename = "idStartDate")]
    pub installation_start_date: Option<NaiveDate>,
    /// Technical-conditions approval note (free text).
    #[serde(rename = "toStatus", default)]
    pub technical_conditions_status: String,
    /// Chief project engineer sign-off note (free text).
    #[serde(rename = "gipStatus", default)]
    pub chief_engineer_status: String,
    #[serde(default)]
    pub approval_status: String,
    pub customer_delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub created_at: Timestamp,
}

impl_record!(Project, "project");

impl Project {
    /// Status of one workflow phase.
    pub fn status(&self, phase: WorkflowPhase) -> WorkflowStatus {
        match phase {
            WorkflowPhase::DesignReview => self.design_status,
            WorkflowPhase::Installation => self.installation_status,
        }
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    /// Defaults to `b2b` if omitted.
    #[serde(rename = "type", default)]
    pub project_type: Option<ProjectType>,
    #[validate(length(min = 1))]
    pub customer: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub deadline: NaiveDate,
    pub priority: Priority,
    #[serde(default)]
    pub survey_act: bool,
    #[validate(length(min = 1))]
    pub code: String,
    #[serde(default)]
    pub assignee: String,
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub stages: Vec<ProjectStage>,
    /// Defaults to `not_started` if omitted.
    #[serde(rename = "rdStatus", default)]
    pub design_status: Option<WorkflowStatus>,
    /// Defaults to `not_started` if omitted.
    #[serde(rename = "idStatus", default)]
    pub installation_status: Option<WorkflowStatus>,
    #[serde(rename = "toStatus", default)]
    pub technical_conditions_status: String,
    #[serde(rename = "gipStatus", default)]
    pub chief_engineer_status: String,
    #[serde(default)]
    pub approval_status: String,
    pub customer_delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl CreateProject {
    /// Minimal valid input; remaining fields take their defaults.
    pub fn new(
        code: impl Into<String>,
        customer: impl Into<String>,
        name: impl Into<String>,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            project_type: None,
            customer: customer.into(),
            name: name.into(),
            deadline,
            priority: Priority::Medium,
            survey_act: false,
            code: code.into(),
            assignee: String::new(),
            start_date: None,
            stages: Vec::new(),
            design_status: None,
            installation_status: None,
            technical_conditions_status: String::new(),
            chief_engineer_status: String::new(),
            approval_status: String::new(),
            customer_delivery_date: None,
            notes: String::new(),
        }
    }

    /// Validate field constraints and every stage.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        validate_stages(&self.stages)
    }

    /// Build the stored record with a fresh id and creation time.
    pub fn into_project(self, id: EntityId, created_at: Timestamp) -> Project {
        Project {
            id,
            project_type: self.project_type.unwrap_or(ProjectType::B2b),
            customer: self.customer,
            name: self.name,
            deadline: self.deadline,
            priority: self.priority,
            survey_act: self.survey_act,
            code: self.code,
            assignee: self.assignee,
            start_date: self.start_date,
            stages: self.stages,
            design_status: self.design_status.unwrap_or(WorkflowStatus::NotStarted),
            design_review_date: None,
            design_approval_date: None,
            design_comments: None,
            installation_status: self
                .installation_status
                .unwrap_or(WorkflowStatus::NotStarted),
            installation_start_date: None,
            technical_conditions_status: self.technical_conditions_status,
            chief_engineer_status: self.chief_engineer_status,
            approval_status: self.approval_status,
            customer_delivery_date: self.customer_delivery_date,
            notes: self.notes,
            created_at,
        }
    }
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    #[serde(rename = "type")]
    pub project_type: Option<ProjectType>,
    pub customer: Option<String>,
    pub name: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub survey_act: Option<bool>,
    pub code: Option<String>,
    pub assignee: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub stages: Option<Vec<ProjectStage>>,
    #[serde(rename = "rdStatus")]
    pub design_status: Option<WorkflowStatus>,
    #[serde(rename = "rdReviewDate")]
    pub design_review_date: Option<NaiveDate>,
    #[serde(rename = "rdApprovalDate")]
    pub design_approval_date: Option<NaiveDate>,
    #[serde(rename = "rdComments")]
    pub design_comments: Option<String>,
    #[serde(rename = "idStatus")]
    pub installation_status: Option<WorkflowStatus>,
    #[serde(rename = "idStartDate")]
    pub installation_start_date: Option<NaiveDate>,
    #[serde(rename = "toStatus")]
    pub technical_conditions_status: Option<String>,
    #[serde(rename = "gipStatus")]
    pub chief_engineer_status: Option<String>,
    pub approval_status: Option<String>,
    pub customer_delivery_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl UpdateProject {
    pub fn check(&self) -> Result<(), CoreError> {
        if let Some(stages) = &self.stages {
            validate_stages(stages)?;
        }
        for (field, value) in [
            ("customer", &self.customer),
            ("name", &self.name),
            ("code", &self.code),
        ] {
            if value.as_deref() == Some("") {
                return Err(CoreError::Validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }

    /// Shallow-merge this patch into `project`.
    pub fn apply(self, project: &mut Project) {
        merge(&mut project.project_type, self.project_type);
        merge(&mut project.customer, self.customer);
        merge(&mut project.name, self.name);
        merge(&mut project.deadline, self.deadline);
        merge(&mut project.priority, self.priority);
        merge(&mut project.survey_act, self.survey_act);
        merge(&mut project.code, self.code);
        merge(&mut project.assignee, self.assignee);
        merge_opt(&mut project.start_date, self.start_date);
        merge(&mut project.stages, self.stages);
        merge(&mut project.design_status, self.design_status);
        merge_opt(&mut project.design_review_date, self.design_review_date);
        merge_opt(&mut project.design_approval_date, self.design_approval_date);
        merge_opt(&mut project.design_comments, self.design_comments);
        merge(&mut project.installation_status, self.installation_status);
        merge_opt(
            &mut project.installation_start_date,
            self.installation_start_date,
        );
        merge(
            &mut project.technical_conditions_status,
            self.technical_conditions_status,
        );
        merge(&mut project.chief_engineer_status, self.chief_engineer_status);
        merge(&mut project.approval_status, self.approval_status);
        merge_opt(
            &mut project.customer_delivery_date,
            self.customer_delivery_date,
        );
        merge(&mut project.notes, self.notes);
    }
}

fn validate_stages(stages: &[ProjectStage]) -> Result<(), CoreError> {
    for stage in stages {
        stage.validate().map_err(|e| {
            CoreError::Validation(format!("stage '{}': {e}", stage.name))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stage(pct: u8) -> ProjectStage {
        ProjectStage {
            id: "stage-001".into(),
            name: "Design".into(),
            start_date: date(2024, 1, 15),
            end_date: date(2024, 2, 15),
            status: WorkflowStatus::InProgress,
            completion_percentage: pct,
        }
    }

    #[test]
    fn create_defaults_statuses_and_type() {
        let input = CreateProject::new("TEST-001", "Customer", "Line", date(2024, 12, 31));
        input.check().unwrap();
        let project = input.into_project("p1".into(), chrono::Utc::now());
        assert_eq!(project.project_type, ProjectType::B2b);
        assert_eq!(project.design_status, WorkflowStatus::NotStarted);
        assert_eq!(project.status(WorkflowPhase::Installation), WorkflowStatus::NotStarted);
    }

    #[test]
    fn stage_percentage_above_hundred_rejected() {
        let mut input = CreateProject::new("TEST-001", "Customer", "Line", date(2024, 12, 31));
        input.stages = vec![stage(100)];
        assert!(input.check().is_ok());
        input.stages = vec![stage(101)];
        assert!(input.check().is_err());
    }

    #[test]
    fn empty_code_rejected() {
        let input = CreateProject::new("", "Customer", "Line", date(2024, 12, 31));
        assert!(input.check().is_err());
    }

    #[test]
    fn update_merges_only_present_fields() {
        let mut project = CreateProject::new("A-1", "Customer", "Line", date(2024, 12, 31))
            .into_project("p1".into(), chrono::Utc::now());
        let patch = UpdateProject {
            design_status: Some(WorkflowStatus::Review),
            notes: Some("checked".into()),
            ..Default::default()
        };
        patch.apply(&mut project);
        assert_eq!(project.design_status, WorkflowStatus::Review);
        assert_eq!(project.notes, "checked");
        assert_eq!(project.code, "A-1");
        assert_eq!(project.installation_status, WorkflowStatus::NotStarted);
    }

    #[test]
    fn update_rejects_blank_required_fields() {
        let patch = UpdateProject {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.check().is_err());
    }

    #[test]
    fn project_json_uses_legacy_field_names() {
        let project = CreateProject::new("A-1", "Customer", "Line", date(2024, 12, 31))
            .into_project("p1".into(), chrono::Utc::now());
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["rdStatus"], "not_started");
        assert_eq!(json["idStatus"], "not_started");
        assert_eq!(json["type"], "b2b");
        assert_eq!(json["deadline"], "2024-12-31");
    }
}
