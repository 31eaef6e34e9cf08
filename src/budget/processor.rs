use crate::budget::config::BudgetProcessorConfig;
use crate::budget::operations::{create_budget_entry, list_budget_entries, seed_default_budget};
use crate::error::AppResult;
use crate::utils::app_config::AppConfig;
use crate::utils::traits::ActionProcessor;
use super::processor_enums::*;

impl ActionProcessor<BudgetProcessorConfig, BudgetProcessorOutput> for BudgetProcessorInput {
    async fn process(&self, app_config: &AppConfig, _local_config: &BudgetProcessorConfig) -> AppResult<BudgetProcessorOutput> {
        match self {
            BudgetProcessorInput::CreateBudget(args) => {
                let record = create_budget_entry(app_config, args).await?;
                Ok(BudgetProcessorOutput::CreateBudget(record))
            }
            BudgetProcessorInput::GetBudgets => {
                let records = list_budget_entries(app_config).await?;
                Ok(BudgetProcessorOutput::GetBudgets(records))
            }
            BudgetProcessorInput::SeedDefaults => {
                let records = seed_default_budget(app_config).await?;
                Ok(BudgetProcessorOutput::SeedDefaults(records))
            }
        }
    }
}
