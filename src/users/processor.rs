use crate::error::AppResult;
use crate::users::config::UsersProcessorConfig;
use crate::users::operations::{list_user_accounts, login_user, signup_user};
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;
use super::processor_enums::*;

impl ActionProcessor<UsersProcessorConfig, UsersProcessorOutput> for UsersProcessorInput {
    async fn process(&self, app_config: &AppConfig, local_config: &UsersProcessorConfig) -> AppResult<UsersProcessorOutput> {
        match self {
            UsersProcessorInput::Signup(args) => {
                let account = signup_user(app_config, local_config, args).await?;
                Ok(UsersProcessorOutput::Signup(account))
            }
            UsersProcessorInput::Login(args) => {
                let account = login_user(app_config, local_config, args).await?;
                Ok(UsersProcessorOutput::Login(account))
            }
            UsersProcessorInput::GetUsers => {
                let accounts = list_user_accounts(app_config).await?;
                Ok(UsersProcessorOutput::GetUsers(accounts))
            }
        }
    }
}
