use serde::Serialize;

/// Login account. Usernames are unique across the store.
#[derive(Debug, Clone, Serialize)]
pub struct UserAccount {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}
