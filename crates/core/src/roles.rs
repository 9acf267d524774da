//! User roles, access levels and departments.

define_name_enum! {
    /// Job role of a user or employee.
    UserRole {
        Director = "director",
        Manager = "manager",
        Engineer = "engineer",
        Installer = "installer",
    }
}

impl UserRole {
    /// Roles that count towards field-staff utilization.
    pub fn is_field_role(self) -> bool {
        matches!(self, UserRole::Engineer | UserRole::Installer)
    }
}

define_name_enum! {
    /// Permission tier of an application user.
    AccessLevel {
        Admin = "admin",
        Manager = "manager",
        User = "user",
    }
}

define_name_enum! {
    /// Organisational unit.
    Department {
        Management = "management",
        Engineering = "engineering",
        Installation = "installation",
        Warehouse = "warehouse",
    }
}
