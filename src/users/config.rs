use argon2::{Algorithm, Argon2, Params, Version};
use clap::Args;

use crate::error::{AppError, AppResult};

/// Argon2id cost parameters used for new password hashes.
///
/// The defaults are the argon2 crate's recommended parameters (19 MiB,
/// 2 passes, 1 lane). Verification always uses the parameters embedded in
/// the stored hash, so these can be raised without invalidating accounts.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordSettings {
    #[clap(long, env, default_value_t = Params::DEFAULT_M_COST)]
    pub argon2_memory_kib: u32,

    #[clap(long, env, default_value_t = Params::DEFAULT_T_COST)]
    pub argon2_iterations: u32,

    #[clap(long, env, default_value_t = Params::DEFAULT_P_COST)]
    pub argon2_parallelism: u32,
}

impl Default for PasswordSettings {
    fn default() -> Self {
        Self {
            argon2_memory_kib: Params::DEFAULT_M_COST,
            argon2_iterations: Params::DEFAULT_T_COST,
            argon2_parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordSettings {
    pub fn hasher(&self) -> AppResult<Argon2<'static>> {
        let params = Params::new(
            self.argon2_memory_kib,
            self.argon2_iterations,
            self.argon2_parallelism,
            None,
        )
        .map_err(|e| AppError::Hashing(format!("invalid argon2 parameters: {}", e)))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[derive(Clone, Debug)]
pub struct UsersProcessorConfig {
    pub password: PasswordSettings,
}
