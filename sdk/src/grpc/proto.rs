//! Messages of the `users.UserService` gRPC service.
//!
//! Messages are declared with prost derives; the service stubs
//! (`user_service_client` and `user_service_server`) are generated by the build script.

use crate::models::user::User as UserModel;

#[derive(Clone, PartialEq, prost::Message)]
pub struct User {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub email: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetUsersRequest {
    #[prost(int32, tag = "1")]
    pub skip: i32,
    #[prost(int32, tag = "2")]
    pub limit: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetUsersResponse {
    #[prost(message, repeated, tag = "1")]
    pub users: Vec<User>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetUserRequest {
    #[prost(int64, tag = "1")]
    pub user_id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetUserResponse {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
    #[prost(bool, tag = "2")]
    pub found: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateUserRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub email: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateUserResponse {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
    #[prost(bool, tag = "2")]
    pub success: bool,
}

/// Empty `name` or `email` leaves the field untouched.
#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateUserRequest {
    #[prost(int64, tag = "1")]
    pub user_id: i64,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub email: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateUserResponse {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
    #[prost(bool, tag = "2")]
    pub success: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteUserRequest {
    #[prost(int64, tag = "1")]
    pub user_id: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteUserResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SearchUsersRequest {
    #[prost(string, tag = "1")]
    pub query: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SearchUsersResponse {
    #[prost(message, repeated, tag = "1")]
    pub users: Vec<User>,
}

include!(concat!(env!("OUT_DIR"), "/users.UserService.rs"));

impl From<User> for UserModel {
    fn from(user: User) -> Self {
        UserModel {
            id: user.id as u64,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<&UserModel> for User {
    fn from(user: &UserModel) -> Self {
        User {
            id: user.id as i64,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<UserModel> for User {
    fn from(user: UserModel) -> Self {
        User {
            id: user.id as i64,
            name: user.name,
            email: user.email,
        }
    }
}
