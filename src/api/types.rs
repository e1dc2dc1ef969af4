use serde::Deserialize;

/// One user row as returned by the users API. Extra fields in the
/// response are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawUser {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

/// Response envelope; only `data` is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersPage {
    pub data: Vec<RawUser>,
}
