use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::schema::user_accounts as UserAccountsTable;

/// Stored account row. Only ever leaves the crate as a [`PublicUserAccount`].
#[derive(Serialize, Deserialize, Queryable, Identifiable, Clone, PartialEq)]
#[diesel(table_name = UserAccountsTable)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserAccountRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for UserAccountRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAccountRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[derive(Serialize, Deserialize, Insertable, Clone)]
#[diesel(table_name = UserAccountsTable)]
pub struct CreateUserAccount {
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserAccount {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserAccountRecord> for PublicUserAccount {
    fn from(record: UserAccountRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            created_at: record.created_at,
        }
    }
}
