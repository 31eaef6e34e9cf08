// Public library interface for budget-back-end
pub mod action_router;
pub mod api;
pub mod budget;
pub mod cli_helper;
pub mod cli_utils;
pub mod error;
pub mod schema;
pub mod store;
pub mod users;
pub mod utils;
