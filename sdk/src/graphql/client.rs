use crate::client::UserClient;
use crate::error::ProtocolError;
use crate::graphql::config::GraphQlClientConfig;
use crate::graphql::queries;
use crate::models::user::{User, UserCreate, UserId, UserUpdate};
use crate::protocol::Protocol;
use async_trait::async_trait;
use graphql_client::{QueryBody, Response as GraphQlResponse};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// GraphQL adapter: every operation is a document POSTed to a single endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    pub endpoint_url: Url,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UsersData {
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchUsersData {
    search_users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct UserMutationResult {
    user: Option<User>,
    success: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserData {
    create_user: UserMutationResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateUserData {
    update_user: UserMutationResult,
}

#[derive(Debug, Deserialize)]
struct DeleteUserResult {
    success: bool,
    #[allow(dead_code)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteUserData {
    delete_user: DeleteUserResult,
}

impl GraphQlClient {
    pub fn new(api_url: &str) -> Result<Self, ProtocolError> {
        Self::create(GraphQlClientConfig {
            api_url: api_url.to_string(),
            ..Default::default()
        })
    }

    pub fn create(config: GraphQlClientConfig) -> Result<Self, ProtocolError> {
        let endpoint_url = Url::parse(&config.api_url)
            .and_then(|url| url.join(&config.endpoint))
            .map_err(|_| ProtocolError::CannotParseUrl)?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            endpoint_url,
            client,
        })
    }

    async fn execute<V: Serialize, D: DeserializeOwned>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        variables: V,
    ) -> Result<D, ProtocolError> {
        let body = QueryBody {
            variables,
            query,
            operation_name,
        };
        let response = self
            .client
            .post(self.endpoint_url.clone())
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let payload = response
            .bytes()
            .await
            .map_err(|error| ProtocolError::InvalidResponse(error.to_string()))?;
        match serde_json::from_slice::<GraphQlResponse<D>>(&payload) {
            Ok(response) => extract_data(response),
            Err(_) if !status.is_success() => Err(ProtocolError::UnexpectedStatus(status.as_u16())),
            Err(error) => Err(ProtocolError::InvalidResponse(error.to_string())),
        }
    }
}

fn extract_data<D>(response: GraphQlResponse<D>) -> Result<D, ProtocolError> {
    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        let messages = errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ProtocolError::GraphQl(messages));
    }

    response
        .data
        .ok_or_else(|| ProtocolError::InvalidResponse("missing data".to_string()))
}

fn mutation_user(
    result: UserMutationResult,
    user_id: Option<UserId>,
) -> Result<User, ProtocolError> {
    match (result.success, result.user, user_id) {
        (true, Some(user), _) => Ok(user),
        (_, _, Some(user_id)) => Err(ProtocolError::NotFound(user_id)),
        _ => Err(ProtocolError::OperationFailed(
            "mutation reported failure".to_string(),
        )),
    }
}

#[async_trait]
impl UserClient for GraphQlClient {
    fn protocol(&self) -> Protocol {
        Protocol::GraphQl
    }

    async fn get_users(&self, skip: u32, limit: u32) -> Result<Vec<User>, ProtocolError> {
        let data: UsersData = self
            .execute(
                "GetUsers",
                queries::GET_USERS,
                json!({ "skip": skip, "limit": limit }),
            )
            .await?;
        Ok(data.users)
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<User>, ProtocolError> {
        let data: UserData = self
            .execute("GetUser", queries::GET_USER, json!({ "userId": user_id }))
            .await?;
        Ok(data.user)
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<User, ProtocolError> {
        let user_data = UserCreate {
            name: name.to_string(),
            email: email.to_string(),
        };
        let data: CreateUserData = self
            .execute(
                "CreateUser",
                queries::CREATE_USER,
                json!({ "userData": user_data }),
            )
            .await?;
        mutation_user(data.create_user, None)
    }

    async fn update_user(
        &self,
        user_id: UserId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, ProtocolError> {
        let user_data = UserUpdate::new(name, email);
        let data: UpdateUserData = self
            .execute(
                "UpdateUser",
                queries::UPDATE_USER,
                json!({ "userId": user_id, "userData": user_data }),
            )
            .await?;
        mutation_user(data.update_user, Some(user_id))
    }

    async fn delete_user(&self, user_id: UserId) -> Result<bool, ProtocolError> {
        let data: DeleteUserData = self
            .execute(
                "DeleteUser",
                queries::DELETE_USER,
                json!({ "userId": user_id }),
            )
            .await?;
        Ok(data.delete_user.success)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>, ProtocolError> {
        let data: SearchUsersData = self
            .execute(
                "SearchUsers",
                queries::SEARCH_USERS,
                json!({ "query": query }),
            )
            .await?;
        Ok(data.search_users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_should_be_joined_with_api_url() {
        let client = GraphQlClient::new("http://localhost:8001").unwrap();
        assert_eq!(client.endpoint_url.as_str(), "http://localhost:8001/graphql");
    }

    #[test]
    fn errors_should_take_precedence_over_data() {
        let response: GraphQlResponse<UserData> = serde_json::from_str(
            r#"{"data": null, "errors": [{"message": "first"}, {"message": "second"}]}"#,
        )
        .unwrap();
        let error = extract_data(response).unwrap_err();
        assert!(matches!(error, ProtocolError::GraphQl(message) if message == "first; second"));
    }

    #[test]
    fn search_payload_should_be_decoded() {
        let response: GraphQlResponse<SearchUsersData> = serde_json::from_str(
            r#"{"data": {"searchUsers": [{"id": 3, "name": "Lê Văn C", "email": "c@gmail.com"}]}}"#,
        )
        .unwrap();
        let data = extract_data(response).unwrap();
        assert_eq!(data.search_users, vec![User::new(3, "Lê Văn C", "c@gmail.com")]);
    }

    #[test]
    fn failed_update_should_map_to_not_found() {
        let result = UserMutationResult {
            user: None,
            success: false,
        };
        assert!(matches!(
            mutation_user(result, Some(9)),
            Err(ProtocolError::NotFound(9))
        ));
    }
}
