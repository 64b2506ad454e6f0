use crate::error::ProtocolError;
use crate::models::user::{User, UserId};
use crate::protocol::Protocol;
use async_trait::async_trait;

/// The uniform CRUD and search capability set exposed by every protocol adapter.
///
/// Every method either returns the decoded result or fails with a [`ProtocolError`],
/// no partially decoded state is ever returned.
#[async_trait]
pub trait UserClient: Sync + Send {
    /// The protocol spoken by this client.
    fn protocol(&self) -> Protocol;

    /// Get a page of users, starting at `skip` and returning at most `limit` entries.
    async fn get_users(&self, skip: u32, limit: u32) -> Result<Vec<User>, ProtocolError>;

    /// Get a user by its ID, `None` when the user does not exist.
    async fn get_user(&self, user_id: UserId) -> Result<Option<User>, ProtocolError>;

    /// Create a new user and return it with the ID assigned by the server.
    async fn create_user(&self, name: &str, email: &str) -> Result<User, ProtocolError>;

    /// Update the name and/or email of an existing user and return the updated user.
    async fn update_user(
        &self,
        user_id: UserId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, ProtocolError>;

    /// Delete a user, `false` when the user does not exist.
    async fn delete_user(&self, user_id: UserId) -> Result<bool, ProtocolError>;

    /// Search users by a case-insensitive substring of the name or email.
    async fn search_users(&self, query: &str) -> Result<Vec<User>, ProtocolError>;

    /// Release any connection held by the client.
    async fn disconnect(&self) -> Result<(), ProtocolError> {
        Ok(())
    }
}
