pub mod budget;
pub mod health;
pub mod info;
pub mod users;
