use crate::server_error::ServerError;
use crate::shutdown::shutdown_signal;
use crate::store::{SharedStore, DEFAULT_PAGE_LIMIT};
use async_graphql::{Context, EmptySubscription, InputObject, Object, Schema, SimpleObject};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::info;
use users_sdk::models::user::{User, UserId, UserUpdate};

pub type UserSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(Debug, SimpleObject)]
#[graphql(name = "User")]
pub struct UserObject {
    id: UserId,
    name: String,
    email: String,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct UserInput {
    name: String,
    email: String,
}

#[derive(Debug, InputObject)]
pub struct UserUpdateInput {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, SimpleObject)]
pub struct CreateUserResult {
    user: Option<UserObject>,
    success: bool,
}

#[derive(Debug, SimpleObject)]
pub struct UpdateUserResult {
    user: Option<UserObject>,
    success: bool,
}

#[derive(Debug, SimpleObject)]
pub struct DeleteUserResult {
    success: bool,
    message: String,
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn users(
        &self,
        ctx: &Context<'_>,
        skip: Option<i32>,
        limit: Option<i32>,
    ) -> async_graphql::Result<Vec<UserObject>> {
        let skip = skip.unwrap_or(0).max(0) as usize;
        let limit = limit
            .filter(|limit| *limit > 0)
            .map_or(DEFAULT_PAGE_LIMIT, |limit| limit as usize);
        let store = ctx.data::<SharedStore>()?.read().await;
        Ok(store.list(skip, limit).into_iter().map(UserObject::from).collect())
    }

    async fn user(
        &self,
        ctx: &Context<'_>,
        user_id: UserId,
    ) -> async_graphql::Result<Option<UserObject>> {
        let store = ctx.data::<SharedStore>()?.read().await;
        Ok(store.get(user_id).map(UserObject::from))
    }

    async fn search_users(
        &self,
        ctx: &Context<'_>,
        query: String,
    ) -> async_graphql::Result<Vec<UserObject>> {
        let store = ctx.data::<SharedStore>()?.read().await;
        Ok(store.search(&query).into_iter().map(UserObject::from).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        user_data: UserInput,
    ) -> async_graphql::Result<CreateUserResult> {
        let mut store = ctx.data::<SharedStore>()?.write().await;
        let user = store.create(&user_data.name, &user_data.email);
        Ok(CreateUserResult {
            user: Some(user.into()),
            success: true,
        })
    }

    async fn update_user(
        &self,
        ctx: &Context<'_>,
        user_id: UserId,
        user_data: UserUpdateInput,
    ) -> async_graphql::Result<UpdateUserResult> {
        let update = UserUpdate {
            name: user_data.name,
            email: user_data.email,
        };
        let mut store = ctx.data::<SharedStore>()?.write().await;
        let user = store.update(user_id, &update);
        Ok(UpdateUserResult {
            success: user.is_some(),
            user: user.map(UserObject::from),
        })
    }

    async fn delete_user(
        &self,
        ctx: &Context<'_>,
        user_id: UserId,
    ) -> async_graphql::Result<DeleteUserResult> {
        let mut store = ctx.data::<SharedStore>()?.write().await;
        let success = store.delete(user_id);
        let message = if success {
            "User deleted successfully".to_string()
        } else {
            format!("User with ID: {user_id} was not found")
        };
        Ok(DeleteUserResult { success, message })
    }
}

pub fn schema(store: SharedStore) -> UserSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

pub async fn start(address: &str, store: SharedStore) -> Result<(), ServerError> {
    let listener = TcpListener::bind(address).await?;
    info!("Started GraphQL API on: {:?}", listener.local_addr()?);
    axum::serve(listener, router(schema(store)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("GraphQL API has stopped.");
    Ok(())
}

pub fn router(schema: UserSchema) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/graphql", post(execute))
        .with_state(schema)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "User Management GraphQL API", "endpoint": "/graphql" }))
}

async fn execute(
    State(schema): State<UserSchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(schema.execute(request).await)
}
