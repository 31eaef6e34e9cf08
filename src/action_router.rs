use crate::budget::config::BudgetProcessorConfig;
use crate::budget::processor_enums::{BudgetProcessorInput, BudgetProcessorOutput};
use crate::error::AppResult;
use crate::users::config::UsersProcessorConfig;
use crate::users::processor_enums::{UsersProcessorInput, UsersProcessorOutput};
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;

#[derive(Debug, Clone)]
pub enum ActionRouterInput {
    Budget(BudgetProcessorInput),
    Users(UsersProcessorInput),
}

#[derive(Debug, Clone)]
pub enum ActionRouterOutput {
    Budget(BudgetProcessorOutput),
    Users(UsersProcessorOutput),
}

impl ActionRouterInput {
    pub async fn process(&self, app_config: AppConfig) -> AppResult<ActionRouterOutput> {
        match self {
            ActionRouterInput::Budget(processor) => {
                let config = BudgetProcessorConfig {};

                let res = processor.process(&app_config, &config).await?;
                Ok(ActionRouterOutput::Budget(res))
            }
            ActionRouterInput::Users(processor) => {
                let config = UsersProcessorConfig {
                    password: app_config.password,
                };

                let res = processor.process(&app_config, &config).await?;
                Ok(ActionRouterOutput::Users(res))
            }
        }
    }
}
