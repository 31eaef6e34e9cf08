use serde::{Deserialize, Serialize};

use crate::users::db_types::PublicUserAccount;

/// Raw `POST /signup` body.
#[derive(Deserialize, Clone, Default)]
pub struct SignupInputArgs {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(alias = "lastName")]
    pub last_name: Option<String>,
}

impl std::fmt::Debug for SignupInputArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupInputArgs")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// Raw `POST /login` body.
#[derive(Deserialize, Clone, Default)]
pub struct LoginInputArgs {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for LoginInputArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginInputArgs")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum UsersProcessorInput {
    Signup(SignupInputArgs),
    Login(LoginInputArgs),
    GetUsers,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum UsersProcessorOutput {
    Signup(PublicUserAccount),
    Login(PublicUserAccount),
    GetUsers(Vec<PublicUserAccount>),
}
