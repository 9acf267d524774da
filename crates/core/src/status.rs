//! Status and category enumerations shared by every container.

define_name_enum! {
    /// Progress of one workflow phase (design review or installation) or of a project stage.
    WorkflowStatus {
        NotStarted = "not_started",
        InProgress = "in_progress",
        Review = "review",
        Approved = "approved",
        Completed = "completed",
    }
}

define_name_enum! {
    /// The two independently tracked phases of a project.
    WorkflowPhase {
        /// Working (design) documentation review.
        DesignReview = "rd",
        /// Installation (as-built) documentation.
        Installation = "id",
    }
}

define_name_enum! {
    /// Task lifecycle.
    TaskStatus {
        New = "new",
        InProgress = "in_progress",
        Review = "review",
        Completed = "completed",
    }
}

define_name_enum! {
    /// Category tag of a task.
    TaskType {
        Rd = "rd",
        Id = "id",
        Other = "other",
    }
}

define_name_enum! {
    Priority {
        Low = "low",
        Medium = "medium",
        High = "high",
    }
}

define_name_enum! {
    /// Customer segment of a project.
    ProjectType {
        B2b = "b2b",
        B2c = "b2c",
        Government = "government",
    }
}

define_name_enum! {
    DocumentType {
        Rd = "RD",
        Id = "ID",
    }
}

define_name_enum! {
    DocumentStatus {
        Draft = "draft",
        Review = "review",
        Approved = "approved",
        Rejected = "rejected",
    }
}

define_name_enum! {
    /// Kind of warehouse stock.
    StockItemType {
        Cable = "cable",
        Equipment = "equipment",
        Consumable = "consumable",
        Tool = "tool",
    }
}

define_name_enum! {
    StockStatus {
        Available = "available",
        Reserved = "reserved",
        OutOfStock = "out_of_stock",
    }
}

define_name_enum! {
    /// Kind of periodic check recorded against a piece of equipment.
    VerificationType {
        Calibration = "calibration",
        Maintenance = "maintenance",
        Inspection = "inspection",
    }
}

impl WorkflowPhase {
    /// Task category created for this phase when a project is set up.
    pub fn task_type(self) -> TaskType {
        match self {
            WorkflowPhase::DesignReview => TaskType::Rd,
            WorkflowPhase::Installation => TaskType::Id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_status_wire_names() {
        assert_eq!(WorkflowStatus::NotStarted.as_str(), "not_started");
        assert_eq!(WorkflowStatus::InProgress.to_string(), "in_progress");
        assert_eq!(
            "completed".parse::<WorkflowStatus>().unwrap(),
            WorkflowStatus::Completed
        );
    }

    #[test]
    fn document_types_are_upper_case() {
        assert_eq!(
            serde_json::to_string(&DocumentType::Rd).unwrap(),
            "\"RD\""
        );
        assert!(DocumentType::from_name("rd").is_err());
    }

    #[test]
    fn phases_map_to_task_types() {
        assert_eq!(WorkflowPhase::DesignReview.task_type(), TaskType::Rd);
        assert_eq!(WorkflowPhase::Installation.task_type(), TaskType::Id);
    }

    #[test]
    fn all_lists_every_variant_once() {
        assert_eq!(TaskStatus::ALL.len(), 4);
        assert_eq!(StockStatus::ALL.len(), 3);
        assert_eq!(Priority::ALL, &[Priority::Low, Priority::Medium, Priority::High]);
    }
}
