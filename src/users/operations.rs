use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng};
use argon2::Argon2;
use once_cell::sync::Lazy;
use regex::Regex;
use zeroize::Zeroizing;

use crate::error::{AppError, AppResult, ConflictReason, ValidationReason};
use crate::store::{UserLookup, timed};
use crate::users::config::{PasswordSettings, UsersProcessorConfig};
use crate::users::db_types::{CreateUserAccount, PublicUserAccount};
use crate::users::processor_enums::{LoginInputArgs, SignupInputArgs};
use crate::utils::app_config::AppConfig;
use crate::utils::validation::{optional_trimmed, required_trimmed, validate_char_len};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const NAME_LEN_RANGE: (usize, usize) = (2, 50);

/// Signup input after validation and trimming. The password is kept as
/// entered and wiped from memory on drop.
#[cfg_attr(test, derive(Debug))]
pub struct ValidatedSignup {
    pub username: String,
    pub password: Zeroizing<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

fn required_password(value: Option<&str>) -> AppResult<Zeroizing<String>> {
    match value {
        Some(p) if !p.is_empty() => Ok(Zeroizing::new(p.to_string())),
        _ => Err(AppError::missing("password")),
    }
}

fn validate_name(value: Option<&str>, label: &str) -> AppResult<Option<String>> {
    let name = optional_trimmed(value);
    if let Some(name) = &name {
        validate_char_len(
            name,
            NAME_LEN_RANGE.0,
            Some(NAME_LEN_RANGE.1),
            ValidationReason::InvalidName,
            &format!(
                "{} must be between {} and {} characters",
                label, NAME_LEN_RANGE.0, NAME_LEN_RANGE.1
            ),
        )?;
    }
    Ok(name)
}

/// Checks run in a fixed order and stop at the first failure.
pub fn validate_signup(args: &SignupInputArgs) -> AppResult<ValidatedSignup> {
    let username = required_trimmed(args.username.as_deref(), "username")?;
    validate_char_len(
        &username,
        MIN_USERNAME_LEN,
        None,
        ValidationReason::InvalidUsername,
        "Username must be at least 3 characters long",
    )?;

    let password = required_password(args.password.as_deref())?;
    validate_char_len(
        password.as_str(),
        MIN_PASSWORD_LEN,
        None,
        ValidationReason::InvalidPassword,
        "Password must be at least 6 characters long",
    )?;

    let email = optional_trimmed(args.email.as_deref());
    if let Some(email) = &email {
        if !EMAIL_PATTERN.is_match(email) {
            return Err(AppError::validation(
                ValidationReason::InvalidEmail,
                "Please provide a valid email address",
            ));
        }
    }

    let first_name = validate_name(args.first_name.as_deref(), "First name")?;
    let last_name = validate_name(args.last_name.as_deref(), "Last name")?;

    Ok(ValidatedSignup {
        username,
        password,
        email,
        first_name,
        last_name,
    })
}

/// Argon2id PHC string with a fresh random salt.
pub fn hash_password(settings: &PasswordSettings, password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    settings
        .hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Hashing(e.to_string()))
}

/// Verification reads its cost parameters from the stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Hashing(format!("stored hash is malformed: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Hashing(e.to_string())),
    }
}

// Hashing is CPU-bound for tens of milliseconds; keep it off the async workers.
async fn run_hashing<T, F>(op: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| AppError::Hashing(format!("hashing task failed: {}", e)))?
}

pub async fn signup_user(
    app_config: &AppConfig,
    local_config: &UsersProcessorConfig,
    args: &SignupInputArgs,
) -> AppResult<PublicUserAccount> {
    let signup = validate_signup(args)?;
    let store = app_config.store.clone();

    if timed(app_config.store_timeout, store.find_user(UserLookup::Username(&signup.username)))
        .await?
        .is_some()
    {
        return Err(AppError::conflict(ConflictReason::DuplicateUsername));
    }

    if let Some(email) = &signup.email {
        if timed(app_config.store_timeout, store.find_user(UserLookup::Email(email)))
            .await?
            .is_some()
        {
            return Err(AppError::conflict(ConflictReason::DuplicateEmail));
        }
    }

    let settings = local_config.password;
    let password = signup.password;
    let password_hash = run_hashing(move || hash_password(&settings, &password)).await?;

    let record = timed(
        app_config.store_timeout,
        store.insert_user(CreateUserAccount {
            username: signup.username,
            password_hash,
            email: signup.email,
            first_name: signup.first_name,
            last_name: signup.last_name,
        }),
    )
    .await?;

    tracing::info!(id = %record.id, username = %record.username, "user account created");
    Ok(record.into())
}

/// Unknown usernames and wrong passwords fail with the same error, after a
/// comparable amount of hashing work.
pub async fn login_user(
    app_config: &AppConfig,
    local_config: &UsersProcessorConfig,
    args: &LoginInputArgs,
) -> AppResult<PublicUserAccount> {
    let settings = local_config.password;
    let username = optional_trimmed(args.username.as_deref());
    let password = Zeroizing::new(args.password.clone().unwrap_or_default());

    // Missing fields fail like any other bad credential.
    let record = match username.as_deref() {
        Some(username) if !password.is_empty() => {
            timed(
                app_config.store_timeout,
                app_config.store.find_user(UserLookup::Username(username)),
            )
            .await?
        }
        _ => None,
    };

    let Some(record) = record else {
        let _ = run_hashing(move || hash_password(&settings, &password)).await;
        tracing::debug!("login rejected: unknown username or missing credentials");
        return Err(AppError::InvalidCredentials);
    };

    let stored_hash = record.password_hash.clone();
    let matches = run_hashing(move || verify_password(&password, &stored_hash)).await?;

    if !matches {
        tracing::debug!(id = %record.id, "login rejected: password mismatch");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(id = %record.id, "user logged in");
    Ok(record.into())
}

pub async fn list_user_accounts(app_config: &AppConfig) -> AppResult<Vec<PublicUserAccount>> {
    let records = timed(app_config.store_timeout, app_config.store.list_users()).await?;
    Ok(records.into_iter().map(PublicUserAccount::from).collect())
}
