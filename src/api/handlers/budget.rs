use axum::{Json, extract::State, http::StatusCode};

use crate::{
    action_router::{ActionRouterInput, ActionRouterOutput},
    api::{
        error::ApiError,
        extractors::JsonBody,
        response::{ApiResponse, BudgetListResponse},
    },
    budget::{
        db_types::BudgetEntryRecord,
        processor_enums::{BudgetProcessorInput, BudgetProcessorOutput, CreateBudgetInputArgs},
    },
    utils::app_config::AppConfig,
};

/// GET /budget - all budget items, oldest first
pub async fn get_budget(
    State(app_config): State<AppConfig>,
) -> Result<(StatusCode, Json<BudgetListResponse>), ApiError> {
    let action = ActionRouterInput::Budget(BudgetProcessorInput::GetBudgets);

    match action.process(app_config).await? {
        ActionRouterOutput::Budget(BudgetProcessorOutput::GetBudgets(records)) => Ok((
            StatusCode::OK,
            Json(BudgetListResponse { my_budget: records }),
        )),
        _ => Err(ApiError::internal_error("Unexpected response type")),
    }
}

/// POST /budget - create a budget item
pub async fn create_budget(
    State(app_config): State<AppConfig>,
    JsonBody(args): JsonBody<CreateBudgetInputArgs>,
) -> Result<(StatusCode, Json<ApiResponse<BudgetEntryRecord>>), ApiError> {
    let action = ActionRouterInput::Budget(BudgetProcessorInput::CreateBudget(args));

    match action.process(app_config).await? {
        ActionRouterOutput::Budget(BudgetProcessorOutput::CreateBudget(record)) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success("Budget item created successfully", record)),
        )),
        _ => Err(ApiError::internal_error("Unexpected response type")),
    }
}
