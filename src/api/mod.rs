//! Server API abstraction
//!
//! Provides a trait for the user endpoints so the mutation flow can run
//! against the real HTTP backend or an in-process stub in tests.

mod http;

pub use http::HttpUserApi;

use crate::error::UserlinkResult;
use crate::model::User;
use crate::session::AuthToken;
use async_trait::async_trait;

/// Abstract user service interface
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Send the difference between `original` and `candidate` to the server
    /// and return the server's canonical updated record.
    async fn patch_user(
        &self,
        token: &AuthToken,
        original: &User,
        candidate: &User,
    ) -> UserlinkResult<User>;
}
