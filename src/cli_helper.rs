use anyhow::Result;

use crate::action_router::{ActionRouterInput, ActionRouterOutput};
use crate::cli_utils::{
    confirm,
    formatting::{Tone, print_status},
};
use crate::error::AppError;
use crate::store::StoreError;
use crate::utils::app_config::AppConfig;

/// Initialize AppConfig for CLI operations
pub async fn initialize_app_config() -> Result<AppConfig> {
    AppConfig::from_env().await
}

/// Store outages are worth another attempt. Rejected input and conflicts
/// would fail the same way again.
pub fn is_retryable(err: &AppError) -> bool {
    matches!(
        err,
        AppError::Store(StoreError::Timeout(_) | StoreError::Unavailable(_))
    )
}

/// Run an action through the ActionRouter, offering a retry while the store is unreachable
pub async fn dispatch(app_config: &AppConfig, input: ActionRouterInput) -> Result<ActionRouterOutput> {
    loop {
        match input.process(app_config.clone()).await {
            Ok(output) => return Ok(output),
            Err(e) if is_retryable(&e) => {
                tracing::debug!(?input, "store call failed: {}", e);
                print_status(Tone::Failure, &e.to_string());

                if !confirm("The store did not answer. Retry?")? {
                    return Err(e.into());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConflictReason;
    use std::time::Duration;

    #[test]
    fn test_only_store_outages_are_retryable() {
        assert!(is_retryable(&AppError::Store(StoreError::Timeout(Duration::from_secs(5)))));
        assert!(is_retryable(&AppError::Store(StoreError::Unavailable("pool".to_string()))));

        assert!(!is_retryable(&AppError::Store(StoreError::Corrupt("bad".to_string()))));
        assert!(!is_retryable(&AppError::missing("title")));
        assert!(!is_retryable(&AppError::conflict(ConflictReason::DuplicateTitle)));
    }
}
