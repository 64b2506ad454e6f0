use crate::runner::BenchmarkRunner;
use api_bench_report::benchmark_result::BenchmarkResult;
use rand::seq::SliceRandom;
use tokio::sync::Mutex;
use tracing::info;
use users_sdk::client::UserClient;
use users_sdk::error::ProtocolError;
use users_sdk::models::user::{User, UserId};
use uuid::Uuid;

pub const GET_ALL_USERS: &str = "get_all_users";
pub const GET_USER_BY_ID: &str = "get_user_by_id";
pub const CREATE_USER: &str = "create_user";
pub const UPDATE_USER: &str = "update_user";
pub const SEARCH_USERS: &str = "search_users";
pub const DELETE_USER: &str = "delete_user";

/// Number of records loaded from the data source and used as test users.
pub const TEST_USERS: usize = 50;

const PAGE_SIZE: u32 = 20;
const SEARCH_TERMS: [&str; 8] = [
    "Nguyễn", "Trần", "Phạm", "Lê", "Hoàng", "Vũ", "Đỗ", "gmail",
];

/// The fixed sequence of operations executed against a single protocol.
///
/// `delete_user` removes the users created by `create_user`, so the order matters.
pub struct OperationSuite<'a> {
    client: &'a dyn UserClient,
    test_users: &'a [User],
    requests: u32,
}

impl<'a> OperationSuite<'a> {
    pub fn new(client: &'a dyn UserClient, test_users: &'a [User], requests: u32) -> Self {
        Self {
            client,
            test_users,
            requests,
        }
    }

    pub async fn run(&self) -> Vec<BenchmarkResult> {
        let protocol = self.client.protocol();
        info!("Running the operation suite for {protocol}...");
        let runner = BenchmarkRunner::new(protocol);
        let client = self.client;
        let test_users = self.test_users;
        let requests = self.requests;
        let created_ids = Mutex::new(Vec::<UserId>::new());
        let mut results = Vec::with_capacity(6);

        results.push(
            runner
                .run(GET_ALL_USERS, requests, move || async move {
                    client
                        .get_users(0, PAGE_SIZE)
                        .await
                        .map(|users| !users.is_empty())
                })
                .await,
        );

        results.push(
            runner
                .run(GET_USER_BY_ID, requests, move || {
                    let user_id = random_user(test_users).map(|user| user.id);
                    async move { get_user_by_id(client, user_id).await }
                })
                .await,
        );

        let created = &created_ids;
        results.push(
            runner
                .run(CREATE_USER, requests, move || async move {
                    let suffix = unique_suffix();
                    let user = client
                        .create_user(
                            &format!("Test User {suffix}"),
                            &format!("test.{suffix}@benchmark.com"),
                        )
                        .await?;
                    created.lock().await.push(user.id);
                    Ok::<_, ProtocolError>(true)
                })
                .await,
        );

        results.push(
            runner
                .run(UPDATE_USER, requests, move || {
                    let user = random_user(test_users).cloned();
                    async move { rename_user(client, user).await }
                })
                .await,
        );

        results.push(
            runner
                .run(SEARCH_USERS, requests, move || {
                    let term = random_search_term();
                    async move { client.search_users(term).await.map(|_| true) }
                })
                .await,
        );

        let mut created_ids = created_ids.into_inner();
        let deletions = requests.min(created_ids.len() as u32);
        results.push(
            runner
                .run(DELETE_USER, deletions, move || {
                    let user_id = created_ids.pop();
                    async move {
                        match user_id {
                            Some(user_id) => client.delete_user(user_id).await,
                            None => Ok(false),
                        }
                    }
                })
                .await,
        );

        results
    }
}

async fn get_user_by_id(
    client: &dyn UserClient,
    user_id: Option<UserId>,
) -> Result<bool, ProtocolError> {
    let Some(user_id) = user_id else {
        return Ok(false);
    };
    let user = client.get_user(user_id).await?;
    Ok(user.is_some_and(|user| user.id == user_id))
}

async fn rename_user(client: &dyn UserClient, user: Option<User>) -> Result<bool, ProtocolError> {
    let Some(user) = user else {
        return Ok(false);
    };
    let name = format!("Updated {}", user.name);
    let updated = client.update_user(user.id, Some(&name), None).await?;
    Ok(updated.name == name)
}

fn random_user(users: &[User]) -> Option<&User> {
    users.choose(&mut rand::thread_rng())
}

fn random_search_term() -> &'static str {
    SEARCH_TERMS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("gmail")
}

fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
