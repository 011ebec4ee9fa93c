//! Storage key constants.

/// Storage keys used by the client
pub struct StorageKeys;

impl StorageKeys {
    /// Credential record: `{"accessToken": "..."}`
    pub const ACCESS_TOKEN: &'static str = "@flashmemo:token";

    /// User record: the raw user object returned at sign-in
    pub const USER: &'static str = "@flashmemo:user";
}
