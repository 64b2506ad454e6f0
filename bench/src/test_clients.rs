use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use users_sdk::client::UserClient;
use users_sdk::error::ProtocolError;
use users_sdk::models::user::{User, UserId};
use users_sdk::protocol::Protocol;

/// Adapter backed by a local map, mimics a healthy server.
#[derive(Debug)]
pub struct InMemoryClient {
    protocol: Protocol,
    users: Mutex<BTreeMap<UserId, User>>,
}

impl InMemoryClient {
    pub fn seeded(protocol: Protocol, users: &[User]) -> Self {
        Self {
            protocol,
            users: Mutex::new(users.iter().map(|user| (user.id, user.clone())).collect()),
        }
    }
}

#[async_trait]
impl UserClient for InMemoryClient {
    fn protocol(&self) -> Protocol {
        self.protocol
    }

    async fn get_users(&self, skip: u32, limit: u32) -> Result<Vec<User>, ProtocolError> {
        let users = self.users.lock().await;
        Ok(users
            .values()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<User>, ProtocolError> {
        Ok(self.users.lock().await.get(&user_id).cloned())
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<User, ProtocolError> {
        let mut users = self.users.lock().await;
        let id = users.keys().next_back().map_or(1, |id| id + 1);
        let user = User::new(id, name, email);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn update_user(
        &self,
        user_id: UserId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, ProtocolError> {
        let mut users = self.users.lock().await;
        let user = users
            .get_mut(&user_id)
            .ok_or(ProtocolError::NotFound(user_id))?;
        if let Some(name) = name {
            user.name = name.to_string();
        }
        if let Some(email) = email {
            user.email = email.to_string();
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, user_id: UserId) -> Result<bool, ProtocolError> {
        Ok(self.users.lock().await.remove(&user_id).is_some())
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>, ProtocolError> {
        let users = self.users.lock().await;
        Ok(users.values().filter(|user| user.matches(query)).cloned().collect())
    }
}

/// Adapter whose every call fails with a transport error.
pub struct UnreachableClient;

#[async_trait]
impl UserClient for UnreachableClient {
    fn protocol(&self) -> Protocol {
        Protocol::Soap
    }

    async fn get_users(&self, _: u32, _: u32) -> Result<Vec<User>, ProtocolError> {
        Err(refused())
    }

    async fn get_user(&self, _: UserId) -> Result<Option<User>, ProtocolError> {
        Err(refused())
    }

    async fn create_user(&self, _: &str, _: &str) -> Result<User, ProtocolError> {
        Err(refused())
    }

    async fn update_user(
        &self,
        _: UserId,
        _: Option<&str>,
        _: Option<&str>,
    ) -> Result<User, ProtocolError> {
        Err(refused())
    }

    async fn delete_user(&self, _: UserId) -> Result<bool, ProtocolError> {
        Err(refused())
    }

    async fn search_users(&self, _: &str) -> Result<Vec<User>, ProtocolError> {
        Err(refused())
    }
}

pub fn refused() -> ProtocolError {
    ProtocolError::Transport("connection refused".to_string())
}
