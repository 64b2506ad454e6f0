use crate::client::UserClient;
use crate::error::ProtocolError;
use crate::models::user::{User, UserCreate, UserId, UserUpdate};
use crate::protocol::Protocol;
use crate::rest::config::RestClientConfig;
use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};
use serde::Serialize;

const PATH: &str = "/users";

/// REST adapter: HTTP verbs with JSON bodies over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct RestClient {
    pub api_url: Url,
    client: reqwest::Client,
}

impl RestClient {
    pub fn new(api_url: &str) -> Result<Self, ProtocolError> {
        Self::create(RestClientConfig {
            api_url: api_url.to_string(),
            ..Default::default()
        })
    }

    pub fn create(config: RestClientConfig) -> Result<Self, ProtocolError> {
        let api_url = Url::parse(&config.api_url).map_err(|_| ProtocolError::CannotParseUrl)?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { api_url, client })
    }

    async fn get(&self, url: Url) -> Result<Response, ProtocolError> {
        Ok(self.client.get(url).send().await?)
    }

    async fn get_with_query<T: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &T,
    ) -> Result<Response, ProtocolError> {
        let url = self.get_url(path)?;
        Ok(self.client.get(url).query(query).send().await?)
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, ProtocolError> {
        let url = self.get_url(path)?;
        Ok(self.client.post(url).json(payload).send().await?)
    }

    async fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, ProtocolError> {
        let url = self.get_url(path)?;
        Ok(self.client.put(url).json(payload).send().await?)
    }

    async fn delete(&self, path: &str) -> Result<Response, ProtocolError> {
        let url = self.get_url(path)?;
        Ok(self.client.delete(url).send().await?)
    }

    pub fn get_url(&self, path: &str) -> Result<Url, ProtocolError> {
        self.api_url
            .join(path)
            .map_err(|_| ProtocolError::CannotParseUrl)
    }

    /// Builds `/users/search/{query}` with the query percent-encoded as one path segment.
    pub fn search_url(&self, query: &str) -> Result<Url, ProtocolError> {
        let mut url = self.get_url(PATH)?;
        url.path_segments_mut()
            .map_err(|_| ProtocolError::CannotParseUrl)?
            .push("search")
            .push(query);
        Ok(url)
    }
}

async fn handle_response(response: Response) -> Result<Response, ProtocolError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(ProtocolError::UnexpectedStatus(status.as_u16()))
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ProtocolError> {
    let response = handle_response(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|error| ProtocolError::InvalidResponse(error.to_string()))
}

#[async_trait]
impl UserClient for RestClient {
    fn protocol(&self) -> Protocol {
        Protocol::Rest
    }

    async fn get_users(&self, skip: u32, limit: u32) -> Result<Vec<User>, ProtocolError> {
        let response = self
            .get_with_query(PATH, &[("skip", skip), ("limit", limit)])
            .await?;
        read_json(response).await
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<User>, ProtocolError> {
        let response = self.get(self.get_url(&format!("{PATH}/{user_id}"))?).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        read_json(response).await.map(Some)
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<User, ProtocolError> {
        let payload = UserCreate {
            name: name.to_string(),
            email: email.to_string(),
        };
        let response = self.post(PATH, &payload).await?;
        read_json(response).await
    }

    async fn update_user(
        &self,
        user_id: UserId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, ProtocolError> {
        let payload = UserUpdate::new(name, email);
        let response = self.put(&format!("{PATH}/{user_id}"), &payload).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProtocolError::NotFound(user_id));
        }

        read_json(response).await
    }

    async fn delete_user(&self, user_id: UserId) -> Result<bool, ProtocolError> {
        let response = self.delete(&format!("{PATH}/{user_id}")).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        handle_response(response).await?;
        Ok(true)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>, ProtocolError> {
        let response = self.get(self.search_url(query)?).await?;
        read_json(response).await
    }
}
