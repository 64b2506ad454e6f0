use crate::client::UserClient;
use crate::error::ProtocolError;
use crate::grpc::config::GrpcClientConfig;
use crate::grpc::proto::user_service_client::UserServiceClient;
use crate::grpc::proto::{
    CreateUserRequest, DeleteUserRequest, GetUserRequest, GetUsersRequest, SearchUsersRequest,
    UpdateUserRequest,
};
use crate::models::user::{User, UserId};
use crate::protocol::Protocol;
use async_trait::async_trait;
use std::future::Future;
use tokio::sync::Mutex;
use tonic::transport::{Channel, Endpoint};
use tracing::{info, warn};

/// gRPC adapter over a persistent HTTP/2 channel.
///
/// The channel is established on first use and dropped after a transport
/// failure, so the next call reconnects.
#[derive(Debug)]
pub struct GrpcClient {
    config: GrpcClientConfig,
    client: Mutex<Option<UserServiceClient<Channel>>>,
}

impl GrpcClient {
    pub fn new(server_address: &str) -> Self {
        Self::create(GrpcClientConfig {
            server_address: server_address.to_string(),
            ..Default::default()
        })
    }

    pub fn create(config: GrpcClientConfig) -> Self {
        Self {
            config,
            client: Mutex::new(None),
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.client.lock().await.is_some()
    }

    async fn connected_client(&self) -> Result<UserServiceClient<Channel>, ProtocolError> {
        let mut client = self.client.lock().await;
        if let Some(client) = client.as_ref() {
            return Ok(client.clone());
        }

        info!(
            "Connecting to gRPC server at: {}...",
            self.config.server_address
        );
        let endpoint = Endpoint::from_shared(format!("http://{}", self.config.server_address))?
            .connect_timeout(self.config.connect_timeout)
            .timeout(self.config.timeout);
        let channel = endpoint.connect().await?;
        let connected = UserServiceClient::new(channel);
        *client = Some(connected.clone());
        info!("Connected to gRPC server at: {}", self.config.server_address);
        Ok(connected)
    }

    async fn call<T, F, Fut>(&self, request: F) -> Result<T, ProtocolError>
    where
        F: FnOnce(UserServiceClient<Channel>) -> Fut,
        Fut: Future<Output = Result<tonic::Response<T>, tonic::Status>>,
    {
        let client = self.connected_client().await?;
        match request(client).await {
            Ok(response) => Ok(response.into_inner()),
            Err(status) => {
                let error = ProtocolError::from(status);
                if error.is_transport() {
                    warn!(
                        "gRPC channel to: {} failed, it will be re-established on next call.",
                        self.config.server_address
                    );
                    self.client.lock().await.take();
                }
                Err(error)
            }
        }
    }
}

#[async_trait]
impl UserClient for GrpcClient {
    fn protocol(&self) -> Protocol {
        Protocol::Grpc
    }

    async fn get_users(&self, skip: u32, limit: u32) -> Result<Vec<User>, ProtocolError> {
        let request = GetUsersRequest {
            skip: skip as i32,
            limit: limit as i32,
        };
        let response = self
            .call(|mut client| async move { client.get_users(request).await })
            .await?;
        Ok(response.users.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<User>, ProtocolError> {
        let request = GetUserRequest {
            user_id: user_id as i64,
        };
        let response = self
            .call(|mut client| async move { client.get_user(request).await })
            .await?;
        if !response.found {
            return Ok(None);
        }

        response
            .user
            .map(|user| Some(user.into()))
            .ok_or_else(|| ProtocolError::InvalidResponse("found user without payload".to_string()))
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<User, ProtocolError> {
        let request = CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
        };
        let response = self
            .call(|mut client| async move { client.create_user(request).await })
            .await?;
        match (response.success, response.user) {
            (true, Some(user)) => Ok(user.into()),
            _ => Err(ProtocolError::OperationFailed(
                "user was not created".to_string(),
            )),
        }
    }

    async fn update_user(
        &self,
        user_id: UserId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, ProtocolError> {
        let request = UpdateUserRequest {
            user_id: user_id as i64,
            name: name.unwrap_or_default().to_string(),
            email: email.unwrap_or_default().to_string(),
        };
        let response = self
            .call(|mut client| async move { client.update_user(request).await })
            .await?;
        match (response.success, response.user) {
            (true, Some(user)) => Ok(user.into()),
            _ => Err(ProtocolError::NotFound(user_id)),
        }
    }

    async fn delete_user(&self, user_id: UserId) -> Result<bool, ProtocolError> {
        let request = DeleteUserRequest {
            user_id: user_id as i64,
        };
        let response = self
            .call(|mut client| async move { client.delete_user(request).await })
            .await?;
        Ok(response.success)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>, ProtocolError> {
        let request = SearchUsersRequest {
            query: query.to_string(),
        };
        let response = self
            .call(|mut client| async move { client.search_users(request).await })
            .await?;
        Ok(response.users.into_iter().map(User::from).collect())
    }

    async fn disconnect(&self) -> Result<(), ProtocolError> {
        if self.client.lock().await.take().is_some() {
            info!(
                "Disconnected from gRPC server at: {}",
                self.config.server_address
            );
        }
        Ok(())
    }
}
