use crate::server_error::ServerError;
use crate::shutdown::shutdown_signal;
use crate::store::{SharedStore, DEFAULT_PAGE_LIMIT};
use std::net::SocketAddr;
use tonic::transport::Server;
use tonic::{Request, Response, Status};
use tracing::info;
use users_sdk::grpc::proto::user_service_server::{UserService, UserServiceServer};
use users_sdk::grpc::proto::{
    CreateUserRequest, CreateUserResponse, DeleteUserRequest, DeleteUserResponse, GetUserRequest,
    GetUserResponse, GetUsersRequest, GetUsersResponse, SearchUsersRequest, SearchUsersResponse,
    UpdateUserRequest, UpdateUserResponse, User,
};
use users_sdk::models::user::{UserId, UserUpdate};

#[derive(Debug)]
pub struct UserServiceImpl {
    store: SharedStore,
}

impl UserServiceImpl {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

fn user_id(value: i64) -> Result<UserId, Status> {
    UserId::try_from(value)
        .map_err(|_| Status::invalid_argument(format!("Invalid user ID: {value}")))
}

#[tonic::async_trait]
impl UserService for UserServiceImpl {
    async fn get_users(
        &self,
        request: Request<GetUsersRequest>,
    ) -> Result<Response<GetUsersResponse>, Status> {
        let request = request.into_inner();
        let skip = request.skip.max(0) as usize;
        let limit = match request.limit {
            limit if limit > 0 => limit as usize,
            _ => DEFAULT_PAGE_LIMIT,
        };
        let store = self.store.read().await;
        let users = store.list(skip, limit).into_iter().map(User::from).collect();
        Ok(Response::new(GetUsersResponse { users }))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        let user_id = user_id(request.into_inner().user_id)?;
        let store = self.store.read().await;
        let user = store.get(user_id).map(User::from);
        Ok(Response::new(GetUserResponse {
            found: user.is_some(),
            user,
        }))
    }

    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let request = request.into_inner();
        let mut store = self.store.write().await;
        let user = store.create(&request.name, &request.email);
        Ok(Response::new(CreateUserResponse {
            user: Some(user.into()),
            success: true,
        }))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        let request = request.into_inner();
        let user_id = user_id(request.user_id)?;
        let update = UserUpdate::new(Some(&request.name), Some(&request.email));
        let mut store = self.store.write().await;
        let user = store.update(user_id, &update).map(User::from);
        Ok(Response::new(UpdateUserResponse {
            success: user.is_some(),
            user,
        }))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let user_id = user_id(request.into_inner().user_id)?;
        let mut store = self.store.write().await;
        let success = store.delete(user_id);
        let message = if success {
            "User deleted successfully".to_string()
        } else {
            format!("User with ID: {user_id} was not found")
        };
        Ok(Response::new(DeleteUserResponse { success, message }))
    }

    async fn search_users(
        &self,
        request: Request<SearchUsersRequest>,
    ) -> Result<Response<SearchUsersResponse>, Status> {
        let query = request.into_inner().query;
        let store = self.store.read().await;
        let users = store.search(&query).into_iter().map(User::from).collect();
        Ok(Response::new(SearchUsersResponse { users }))
    }
}

pub async fn start(address: &str, store: SharedStore) -> Result<(), ServerError> {
    let address: SocketAddr = address
        .parse()
        .map_err(|_| ServerError::InvalidAddress(address.to_string()))?;
    info!("Started gRPC API on: {address:?}");
    Server::builder()
        .add_service(UserServiceServer::new(UserServiceImpl::new(store)))
        .serve_with_shutdown(address, shutdown_signal())
        .await?;
    info!("gRPC API has stopped.");
    Ok(())
}
