use crate::client::UserClient;
use crate::error::ProtocolError;
use crate::models::user::{User, UserId};
use crate::protocol::Protocol;
use crate::soap::config::SoapClientConfig;
use crate::soap::envelope::{
    self, CONTENT_TYPE, CREATE_USER, DELETE_USER, GET_USER, GET_USERS, SEARCH_USERS,
    SOAP_ACTION_HEADER, UPDATE_USER,
};
use crate::soap::wsdl::{self, WsdlBinding};
use crate::soap::xml::XmlElement;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE as CONTENT_TYPE_HEADER;
use reqwest::Url;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// SOAP adapter: XML envelopes POSTed to the address advertised by the service WSDL.
///
/// The WSDL is fetched on first use and the resolved binding is reused until a
/// transport failure resets it.
#[derive(Debug)]
pub struct SoapClient {
    pub service_url: Url,
    client: reqwest::Client,
    binding: Mutex<Option<WsdlBinding>>,
}

impl SoapClient {
    pub fn new(service_url: &str) -> Result<Self, ProtocolError> {
        Self::create(SoapClientConfig {
            service_url: service_url.to_string(),
            ..Default::default()
        })
    }

    pub fn create(config: SoapClientConfig) -> Result<Self, ProtocolError> {
        let service_url =
            Url::parse(&config.service_url).map_err(|_| ProtocolError::CannotParseUrl)?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            service_url,
            client,
            binding: Mutex::new(None),
        })
    }

    pub async fn is_bound(&self) -> bool {
        self.binding.lock().await.is_some()
    }

    pub fn wsdl_url(&self) -> Url {
        let mut url = self.service_url.clone();
        url.set_query(Some("wsdl"));
        url
    }

    async fn binding(&self) -> Result<WsdlBinding, ProtocolError> {
        let mut binding = self.binding.lock().await;
        if let Some(binding) = binding.as_ref() {
            return Ok(binding.clone());
        }

        let wsdl_url = self.wsdl_url();
        info!("Fetching SOAP service description from: {wsdl_url}...");
        let response = self.client.get(wsdl_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::UnexpectedStatus(status.as_u16()));
        }

        let document = response
            .text()
            .await
            .map_err(|error| ProtocolError::InvalidResponse(error.to_string()))?;
        let resolved = wsdl::parse(&document)?;
        info!("Bound SOAP client to: {}", resolved.location);
        *binding = Some(resolved.clone());
        Ok(resolved)
    }

    async fn invoke(
        &self,
        operation: &'static str,
        fields: &[(&str, String)],
    ) -> Result<XmlElement, ProtocolError> {
        let binding = self.binding().await?;
        let result = self.send(&binding, operation, fields).await;
        if let Err(error) = &result {
            if error.is_transport() {
                warn!(
                    "SOAP call: {operation} to: {} failed, the service description will be fetched again.",
                    binding.location
                );
                self.binding.lock().await.take();
            }
        }
        result
    }

    async fn send(
        &self,
        binding: &WsdlBinding,
        operation: &'static str,
        fields: &[(&str, String)],
    ) -> Result<XmlElement, ProtocolError> {
        let response = self
            .client
            .post(&binding.location)
            .header(CONTENT_TYPE_HEADER, CONTENT_TYPE)
            .header(SOAP_ACTION_HEADER, binding.soap_action(operation))
            .body(envelope::operation_envelope(operation, fields))
            .send()
            .await?;
        let status = response.status();
        let document = response
            .text()
            .await
            .map_err(|error| ProtocolError::InvalidResponse(error.to_string()))?;
        match envelope::parse_body(&document) {
            Ok(body) if status.is_success() => Ok(body),
            Ok(_) => Err(ProtocolError::UnexpectedStatus(status.as_u16())),
            Err(ProtocolError::InvalidResponse(_)) | Err(ProtocolError::Xml(_))
                if !status.is_success() =>
            {
                Err(ProtocolError::UnexpectedStatus(status.as_u16()))
            }
            Err(error) => Err(error),
        }
    }
}

fn required_user(body: &XmlElement) -> Result<User, ProtocolError> {
    body.child("user")
        .ok_or_else(|| ProtocolError::InvalidResponse("response without user".to_string()))
        .and_then(envelope::parse_user)
}

#[async_trait]
impl UserClient for SoapClient {
    fn protocol(&self) -> Protocol {
        Protocol::Soap
    }

    async fn get_users(&self, skip: u32, limit: u32) -> Result<Vec<User>, ProtocolError> {
        let body = self
            .invoke(
                GET_USERS,
                &[("skip", skip.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        envelope::parse_users(&body)
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<User>, ProtocolError> {
        let body = self
            .invoke(GET_USER, &[("user_id", user_id.to_string())])
            .await?;
        body.child("user").map(envelope::parse_user).transpose()
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<User, ProtocolError> {
        let body = self
            .invoke(
                CREATE_USER,
                &[("name", name.to_string()), ("email", email.to_string())],
            )
            .await?;
        required_user(&body)
    }

    async fn update_user(
        &self,
        user_id: UserId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, ProtocolError> {
        let mut fields = vec![("user_id", user_id.to_string())];
        if let Some(name) = name.filter(|name| !name.is_empty()) {
            fields.push(("name", name.to_string()));
        }
        if let Some(email) = email.filter(|email| !email.is_empty()) {
            fields.push(("email", email.to_string()));
        }
        let body = self.invoke(UPDATE_USER, &fields).await?;
        required_user(&body)
    }

    async fn delete_user(&self, user_id: UserId) -> Result<bool, ProtocolError> {
        let body = self
            .invoke(DELETE_USER, &[("user_id", user_id.to_string())])
            .await?;
        Ok(body.child_text("success") == Some("true"))
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>, ProtocolError> {
        let body = self
            .invoke(SEARCH_USERS, &[("query", query.to_string())])
            .await?;
        envelope::parse_users(&body)
    }

    async fn disconnect(&self) -> Result<(), ProtocolError> {
        self.binding.lock().await.take();
        Ok(())
    }
}
