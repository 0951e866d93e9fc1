use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct SignupRequest { pub username: String, pub email: String, pub password: String }

/// Either `username` or `email` identifies the account.
#[derive(ToSchema)]
pub struct LoginRequest { pub username: Option<String>, pub email: Option<String>, pub password: String }

#[derive(ToSchema)]
pub struct TokenDoc { pub token: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct AccountDoc {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// Create requires every field except `gender` and `employee_photo`; update accepts any subset.
#[derive(ToSchema)]
pub struct EmployeeInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    /// Number or numeric string, at least 1000.
    pub salary: Option<f64>,
    /// `YYYY-MM-DD`
    pub date_of_joining: Option<String>,
    /// Image URL or data URI, uploaded to the image host.
    pub employee_photo: Option<String>,
}

#[derive(ToSchema)]
pub struct EmployeeDoc {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Option<String>,
    pub designation: String,
    pub department: String,
    pub salary: f64,
    pub date_of_joining: String,
    pub photo_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::signup,
        crate::routes::auth::login,
        crate::routes::employees::list,
        crate::routes::employees::search,
        crate::routes::employees::get_by_id,
        crate::routes::employees::create,
        crate::routes::employees::update,
        crate::routes::employees::delete,
    ),
    components(
        schemas(
            HealthResponse,
            SignupRequest,
            LoginRequest,
            TokenDoc,
            MessageDoc,
            AccountDoc,
            EmployeeInput,
            EmployeeDoc,
            crate::errors::ErrorBody,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "employees")
    )
)]
pub struct ApiDoc;
