use crate::auth::auth::AuthAccount;
use crate::model::user::{User, UserRole, UserStatus};
use actix_web::{error::ErrorInternalServerError, web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

/// Payload for both POST and PUT. PUT resupplies every field, mirroring the
/// asset endpoints.
#[derive(Deserialize, ToSchema)]
pub struct UserPayload {
    #[schema(example = "E-1042")]
    pub emp_id: String,
    #[schema(example = "EMP-1042")]
    pub emp_code: String,
    #[schema(example = "Jane Smith")]
    pub name: String,
    #[schema(example = "jane.smith@company.com", format = "email", value_type = String)]
    pub email: String,
    /// Defaults to Employee when omitted
    pub role: Option<UserRole>,
    #[schema(example = "IT", nullable = true)]
    pub department: Option<String>,
    #[schema(example = "Corporate", nullable = true)]
    pub division: Option<String>,
    #[schema(example = "2022-03-15", format = "date", value_type = String, nullable = true)]
    pub join_date: Option<NaiveDate>,
    pub status: Option<UserStatus>,
    #[schema(example = "Head Office", nullable = true)]
    pub location: Option<String>,
    #[schema(example = "+8801712345678", nullable = true)]
    pub phone_number: Option<String>,
    #[schema(example = "Engineer", nullable = true)]
    pub designation: Option<String>,
    #[schema(example = "John Doe", nullable = true)]
    pub reporting_manager: Option<String>,
}

fn validate(payload: &UserPayload) -> Result<(), &'static str> {
    if payload.emp_id.trim().is_empty() {
        return Err("emp_id must not be empty");
    }
    if payload.emp_code.trim().is_empty() {
        return Err("emp_code must not be empty");
    }
    if payload.name.trim().is_empty() {
        return Err("name must not be empty");
    }
    if payload.email.trim().is_empty() {
        return Err("email must not be empty");
    }
    Ok(())
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 500, description = "Internal server error")
    ),
    tag = "User",
    security(("bearer_auth" = []))
)]
pub async fn list_users(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch users");
            ErrorInternalServerError("Database error")
        })?;

    Ok(HttpResponse::Ok().json(users))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id", Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = Object, example = json!({
            "error": "User not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "User",
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let user_id = path.into_inner();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, user_id, "Failed to fetch user");
            ErrorInternalServerError("Database error")
        })?;

    match user {
        Some(found) => Ok(HttpResponse::Ok().json(found)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "error": "User not found"
        }))),
    }
}

/// Create user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = Object, example = json!({
            "message": "User added successfully",
            "id": 7
        })),
        (status = 400, description = "Validation failure"),
        (status = 403, description = "Manager/Admin only"),
        (status = 409, description = "Duplicate emp_id, emp_code or email"),
        (status = 500, description = "Internal server error")
    ),
    tag = "User",
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    auth: AuthAccount,
    pool: web::Data<MySqlPool>,
    payload: web::Json<UserPayload>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;

    if let Err(reason) = validate(&payload) {
        return Ok(HttpResponse::BadRequest().json(json!({ "error": reason })));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO users
            (emp_id, emp_code, name, email, role, department, division,
             join_date, status, location, phone_number, designation,
             reporting_manager)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.emp_id.trim())
    .bind(payload.emp_code.trim())
    .bind(payload.name.trim())
    .bind(payload.email.trim())
    .bind(payload.role.unwrap_or(UserRole::Employee).as_str())
    .bind(&payload.department)
    .bind(&payload.division)
    .bind(payload.join_date)
    .bind(payload.status.map(|s| s.as_str()))
    .bind(&payload.location)
    .bind(&payload.phone_number)
    .bind(&payload.designation)
    .bind(&payload.reporting_manager)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(done) => Ok(HttpResponse::Created().json(json!({
            "message": "User added successfully",
            "id": done.last_insert_id()
        }))),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "error": "Duplicate emp_id, emp_code or email"
                    })));
                }
            }

            error!(error = %e, "Failed to create user");
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to add user"
            })))
        }
    }
}

/// Update user (full-record replacement)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id", Path, description = "User ID")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = Object, example = json!({
            "message": "User updated successfully"
        })),
        (status = 400, description = "Validation failure"),
        (status = 403, description = "Manager/Admin only"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Duplicate emp_id, emp_code or email"),
        (status = 500, description = "Internal server error")
    ),
    tag = "User",
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    auth: AuthAccount,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UserPayload>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager_or_admin()?;

    let user_id = path.into_inner();

    if let Err(reason) = validate(&payload) {
        return Ok(HttpResponse::BadRequest().json(json!({ "error": reason })));
    }

    let exists = match sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)",
    )
    .bind(user_id)
    .fetch_one(pool.get_ref())
    .await
    {
        Ok(found) => found,
        Err(e) => {
            error!(error = %e, user_id, "Failed to fetch user for update");
            return Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Database error"
            })));
        }
    };

    if !exists {
        return Ok(HttpResponse::NotFound().json(json!({
            "error": "User not found"
        })));
    }

    let result = sqlx::query(
        r#"
        UPDATE users SET
            emp_id = ?, emp_code = ?, name = ?, email = ?, role = ?,
            department = ?, division = ?, join_date = ?, status = ?,
            location = ?, phone_number = ?, designation = ?,
            reporting_manager = ?
        WHERE id = ?
        "#,
    )
    .bind(payload.emp_id.trim())
    .bind(payload.emp_code.trim())
    .bind(payload.name.trim())
    .bind(payload.email.trim())
    .bind(payload.role.unwrap_or(UserRole::Employee).as_str())
    .bind(&payload.department)
    .bind(&payload.division)
    .bind(payload.join_date)
    .bind(payload.status.map(|s| s.as_str()))
    .bind(&payload.location)
    .bind(&payload.phone_number)
    .bind(&payload.designation)
    .bind(&payload.reporting_manager)
    .bind(user_id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(json!({
            "message": "User updated successfully"
        }))),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "error": "Duplicate emp_id, emp_code or email"
                    })));
                }
            }

            error!(error = %e, user_id, "Failed to update user");
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to update user"
            })))
        }
    }
}

/// Delete user. Assets assigned to the user are left unassigned.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id", Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = Object, example = json!({
            "message": "User deleted successfully"
        })),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "User",
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    auth: AuthAccount,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let user_id = path.into_inner();

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(res) => {
            if res.rows_affected() == 0 {
                return Ok(HttpResponse::NotFound().json(json!({
                    "error": "User not found"
                })));
            }

            Ok(HttpResponse::Ok().json(json!({
                "message": "User deleted successfully"
            })))
        }
        Err(e) => {
            error!(error = %e, user_id, "Failed to delete user");
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to delete user"
            })))
        }
    }
}
