//! Backend endpoints and frontend routes

/// Backend endpoints, relative to the versioned API prefix
pub mod endpoints {
    pub mod auth {
        pub const LOGIN: &str = "/auth/login";
        pub const REGISTER: &str = "/auth/register";
        pub const LOGOUT: &str = "/auth/logout";
        pub const REFRESH: &str = "/auth/refresh";
        pub const ME: &str = "/auth/me";
    }

    pub mod employees {
        pub const LIST: &str = "/employees";
        pub const CREATE: &str = "/employees";

        pub fn detail(id: &str) -> String {
            format!("/employees/{}", id)
        }
    }
}

/// Frontend routes
pub mod routes {
    pub const LOGIN: &str = "/login";
    pub const FORGOT_PASSWORD: &str = "/forgot-password";
    pub const DASHBOARD: &str = "/dashboard";
    /// Landing route after a successful login
    pub const EMPLOYEE: &str = "/agents";
    pub const SETTINGS: &str = "/settings";
    pub const NO_ACCESS: &str = "/no-access";

    pub const EMPLOYEES: &str = "/employees";
    pub const EMPLOYEE_CREATE: &str = "/employees/create";

    pub fn employee_detail(id: &str) -> String {
        format!("{}/{}", EMPLOYEES, id)
    }

    pub mod legacy {
        pub const FORM_TEMPLATE: &str = "/digital-forms";
        pub const FORM_ASSIGNMENT: &str = "/digital-forms/assignment";
    }

    pub mod digital_forms {
        pub const LIST: &str = "/settings/task-operations/forms";
        pub const CREATE: &str = "/settings/task-operations/forms/create";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_detail_path() {
        assert_eq!(endpoints::employees::detail("42"), "/employees/42");
    }

    #[test]
    fn test_employee_routes() {
        assert_eq!(routes::EMPLOYEES, "/employees");
        assert_eq!(routes::EMPLOYEE_CREATE, "/employees/create");
        assert_eq!(routes::employee_detail("e-7"), "/employees/e-7");
    }

    #[test]
    fn test_form_routes_nest_under_settings() {
        assert!(routes::digital_forms::CREATE.starts_with(routes::digital_forms::LIST));
        assert!(routes::digital_forms::LIST.starts_with(routes::SETTINGS));
    }
}
