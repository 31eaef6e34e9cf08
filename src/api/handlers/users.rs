use axum::{Json, extract::State, http::StatusCode};

use crate::{
    action_router::{ActionRouterInput, ActionRouterOutput},
    api::{error::ApiError, extractors::JsonBody, response::ApiResponse},
    users::{
        db_types::PublicUserAccount,
        processor_enums::{LoginInputArgs, SignupInputArgs, UsersProcessorInput, UsersProcessorOutput},
    },
    utils::app_config::AppConfig,
};

/// POST /signup
pub async fn signup(
    State(app_config): State<AppConfig>,
    JsonBody(args): JsonBody<SignupInputArgs>,
) -> Result<(StatusCode, Json<ApiResponse<PublicUserAccount>>), ApiError> {
    let action = ActionRouterInput::Users(UsersProcessorInput::Signup(args));

    match action.process(app_config).await? {
        ActionRouterOutput::Users(UsersProcessorOutput::Signup(account)) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success("User created successfully", account)),
        )),
        _ => Err(ApiError::internal_error("Unexpected response type")),
    }
}

/// POST /login
pub async fn login(
    State(app_config): State<AppConfig>,
    JsonBody(args): JsonBody<LoginInputArgs>,
) -> Result<(StatusCode, Json<ApiResponse<PublicUserAccount>>), ApiError> {
    let action = ActionRouterInput::Users(UsersProcessorInput::Login(args));

    match action.process(app_config).await? {
        ActionRouterOutput::Users(UsersProcessorOutput::Login(account)) => Ok((
            StatusCode::OK,
            Json(ApiResponse::success("Login successful", account)),
        )),
        _ => Err(ApiError::internal_error("Unexpected response type")),
    }
}

/// GET /users - diagnostic listing, guarded by the admin token when configured
pub async fn get_users(
    State(app_config): State<AppConfig>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<PublicUserAccount>>>), ApiError> {
    let action = ActionRouterInput::Users(UsersProcessorInput::GetUsers);

    match action.process(app_config).await? {
        ActionRouterOutput::Users(UsersProcessorOutput::GetUsers(accounts)) => Ok((
            StatusCode::OK,
            Json(ApiResponse::success("Users retrieved successfully", accounts)),
        )),
        _ => Err(ApiError::internal_error("Unexpected response type")),
    }
}
