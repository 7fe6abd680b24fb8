pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod metrics;
pub mod routes;
pub mod state;

pub use api::{
    admin::{
        admin_user_dto::AdminUserDto,
        create_user_request::CreateUserRequest,
        list_users_query::ListUsersQuery,
        status::{AdminStatusResponse, admin_status},
        update_disabled_request::UpdateDisabledRequest,
        update_role_request::UpdateRoleRequest,
        user_list_response::UserListResponse,
        users::{create_user, delete_user, list_users, set_disabled, update_role},
    },
    auth::{
        auth::{
            create_session, login, logout, password_reset, password_reset_confirm, signup,
            verify_session,
        },
        auth_response::AuthResponse,
        create_session_request::CreateSessionRequest,
        login_request::LoginRequest,
        password_reset_confirm_request::PasswordResetConfirmRequest,
        password_reset_request::PasswordResetRequest,
        session_info_response::SessionInfoResponse,
        signup_request::SignupRequest,
        user_dto::UserDto,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::session_user::{AdminUser, SessionUser},
    me::me::get_me,
    oauth::{
        callback_query::OAuthCallbackQuery,
        oauth::{oauth_authorize, oauth_callback},
    },
    success_response::SuccessResponse,
    user_response::UserResponse,
};

pub use crate::metrics::Metrics;
pub use crate::routes::build_router;
pub use crate::state::AppState;
