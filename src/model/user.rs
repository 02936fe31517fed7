use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee record. Assets reference users through `assets.user_id`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 7,
        "emp_id": "E-1042",
        "emp_code": "EMP-1042",
        "name": "Jane Smith",
        "email": "jane.smith@company.com",
        "role": "Employee",
        "department": "IT",
        "division": "Corporate",
        "join_date": "2022-03-15",
        "status": "Active",
        "location": "Head Office",
        "phone_number": "+8801712345678",
        "designation": "Engineer",
        "reporting_manager": "John Doe"
    })
)]
pub struct User {
    #[schema(example = 7)]
    pub id: u64,

    #[schema(example = "E-1042")]
    pub emp_id: String,

    #[schema(example = "EMP-1042")]
    pub emp_code: String,

    #[schema(example = "Jane Smith")]
    pub name: String,

    #[schema(example = "jane.smith@company.com")]
    pub email: String,

    #[schema(example = "Employee")]
    pub role: String,

    #[schema(example = "IT", nullable = true)]
    pub department: Option<String>,

    #[schema(example = "Corporate", nullable = true)]
    pub division: Option<String>,

    #[schema(example = "2022-03-15", value_type = String, format = "date", nullable = true)]
    pub join_date: Option<NaiveDate>,

    #[schema(example = "Active", nullable = true)]
    pub status: Option<String>,

    #[schema(example = "Head Office", nullable = true)]
    pub location: Option<String>,

    #[schema(example = "+8801712345678", nullable = true)]
    pub phone_number: Option<String>,

    #[schema(example = "Engineer", nullable = true)]
    pub designation: Option<String>,

    #[schema(example = "John Doe", nullable = true)]
    pub reporting_manager: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    Employee,
    Admin,
    Manager,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Employee => "Employee",
            UserRole::Admin => "Admin",
            UserRole::Manager => "Manager",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserStatus {
    Active,
    Inactive,
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::OnLeave => "On Leave",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_as_str() {
        assert_eq!(UserRole::Employee.as_str(), "Employee");
        assert_eq!(UserRole::Manager.as_str(), "Manager");
    }

    #[test]
    fn test_user_status_serde_rename() {
        let json = serde_json::to_string(&UserStatus::OnLeave).unwrap();
        assert_eq!(json, "\"On Leave\"");
    }
}
