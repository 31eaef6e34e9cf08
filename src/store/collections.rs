use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::budget::db_types::{BudgetEntryRecord, CreateBudgetEntry};
use crate::users::db_types::{CreateUserAccount, UserAccountRecord};

use super::{StoreError, StoreResult, UniqueField, UserLookup};

/// Record collections backing the in-process stores.
///
/// Serializes as `{"myBudget": [...], "users": [...]}`, which is also the
/// on-disk layout of the JSON file store. Vectors keep insertion order, so
/// listings come back oldest first.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Collections {
    #[serde(rename = "myBudget", default)]
    pub my_budget: Vec<BudgetEntryRecord>,
    #[serde(default)]
    pub users: Vec<UserAccountRecord>,
}

impl Collections {
    pub fn insert_budget(&mut self, entry: CreateBudgetEntry) -> StoreResult<BudgetEntryRecord> {
        if self.my_budget.iter().any(|existing| existing.title == entry.title) {
            return Err(StoreError::Duplicate(UniqueField::BudgetTitle));
        }

        let now = Utc::now();
        let record = BudgetEntryRecord {
            id: Uuid::new_v4(),
            title: entry.title,
            amount: entry.amount,
            color: entry.color,
            created_at: now,
            updated_at: now,
        };

        self.my_budget.push(record.clone());
        Ok(record)
    }

    pub fn find_budget_by_title(&self, title: &str) -> Option<BudgetEntryRecord> {
        self.my_budget.iter().find(|e| e.title == title).cloned()
    }

    pub fn insert_user(&mut self, user: CreateUserAccount) -> StoreResult<UserAccountRecord> {
        if self.find_user(UserLookup::Username(&user.username)).is_some() {
            return Err(StoreError::Duplicate(UniqueField::Username));
        }

        if let Some(email) = &user.email {
            if self.find_user(UserLookup::Email(email)).is_some() {
                return Err(StoreError::Duplicate(UniqueField::Email));
            }
        }

        let record = UserAccountRecord {
            id: Uuid::new_v4(),
            username: user.username,
            password_hash: user.password_hash,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: Utc::now(),
        };

        self.users.push(record.clone());
        Ok(record)
    }

    pub fn find_user(&self, lookup: UserLookup<'_>) -> Option<UserAccountRecord> {
        self.users
            .iter()
            .find(|u| match lookup {
                UserLookup::Username(username) => u.username == username,
                UserLookup::Email(email) => u.email.as_deref() == Some(email),
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> CreateBudgetEntry {
        CreateBudgetEntry {
            title: title.to_string(),
            amount: 10.0,
            color: "#AABBCC".to_string(),
        }
    }

    fn user(username: &str, email: Option<&str>) -> CreateUserAccount {
        CreateUserAccount {
            username: username.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            email: email.map(String::from),
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn test_budget_titles_are_unique() {
        let mut collections = Collections::default();
        collections.insert_budget(entry("Rent")).unwrap();

        let err = collections.insert_budget(entry("Rent")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(UniqueField::BudgetTitle)));
        assert_eq!(collections.my_budget.len(), 1);
    }

    #[test]
    fn test_title_comparison_is_case_sensitive() {
        let mut collections = Collections::default();
        collections.insert_budget(entry("Rent")).unwrap();
        assert!(collections.insert_budget(entry("rent")).is_ok());
    }

    #[test]
    fn test_user_uniqueness_checks_username_then_email() {
        let mut collections = Collections::default();
        collections.insert_user(user("ann", Some("ann@example.com"))).unwrap();

        let err = collections.insert_user(user("ann", Some("other@example.com"))).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(UniqueField::Username)));

        let err = collections.insert_user(user("bob", Some("ann@example.com"))).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(UniqueField::Email)));
    }

    #[test]
    fn test_missing_emails_never_collide() {
        let mut collections = Collections::default();
        collections.insert_user(user("ann", None)).unwrap();
        collections.insert_user(user("bob", None)).unwrap();
        assert_eq!(collections.users.len(), 2);
    }

    #[test]
    fn test_document_layout() {
        let mut collections = Collections::default();
        collections.insert_budget(entry("Rent")).unwrap();

        let json = serde_json::to_value(&collections).unwrap();
        assert_eq!(json["myBudget"][0]["title"], "Rent");
        assert_eq!(json["myBudget"][0]["budget"], 10.0);
        assert!(json["users"].as_array().unwrap().is_empty());
    }
}
