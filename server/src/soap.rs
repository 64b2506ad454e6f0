use crate::server_error::ServerError;
use crate::shutdown::shutdown_signal;
use crate::store::{SharedStore, DEFAULT_PAGE_LIMIT};
use axum::extract::{RawQuery, State};
use axum::http::header::{CONTENT_TYPE, HOST};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::str::FromStr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use users_sdk::models::user::{UserId, UserUpdate};
use users_sdk::soap::envelope::{
    self, CREATE_USER, DELETE_USER, GET_USER, GET_USERS, SEARCH_USERS, UPDATE_USER,
};
use users_sdk::soap::wsdl;
use users_sdk::soap::xml::XmlElement;

#[derive(Debug, Clone)]
struct SoapState {
    store: SharedStore,
    address: String,
}

#[derive(Debug)]
struct Fault {
    code: &'static str,
    message: String,
}

impl Fault {
    fn client(message: impl Into<String>) -> Self {
        Self {
            code: "Client",
            message: message.into(),
        }
    }
}

pub async fn start(address: &str, store: SharedStore) -> Result<(), ServerError> {
    let listener = TcpListener::bind(address).await?;
    let local_address = listener.local_addr()?;
    info!("Started SOAP API on: {local_address:?}, WSDL available at: http://{local_address}/?wsdl");
    let state = SoapState {
        store,
        address: local_address.to_string(),
    };
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("SOAP API has stopped.");
    Ok(())
}

fn router(state: SoapState) -> Router {
    Router::new()
        .route("/", get(describe).post(dispatch))
        .with_state(state)
}

async fn describe(
    State(state): State<SoapState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if !query.is_some_and(|query| query.eq_ignore_ascii_case("wsdl")) {
        return "User Management SOAP API, the service description is available at /?wsdl"
            .into_response();
    }

    let host = headers
        .get(HOST)
        .and_then(|host| host.to_str().ok())
        .unwrap_or(state.address.as_str());
    let location = format!("http://{host}/");
    xml_response(StatusCode::OK, wsdl::render(&location))
}

async fn dispatch(State(state): State<SoapState>, body: String) -> Response {
    match handle(&state.store, &body).await {
        Ok(xml) => xml_response(StatusCode::OK, xml),
        Err(fault) => {
            warn!("SOAP fault: {}", fault.message);
            xml_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                envelope::fault_envelope(fault.code, &fault.message),
            )
        }
    }
}

fn xml_response(status: StatusCode, xml: String) -> Response {
    (status, [(CONTENT_TYPE, envelope::CONTENT_TYPE)], xml).into_response()
}

fn field<T: FromStr>(request: &XmlElement, name: &str) -> Result<Option<T>, Fault> {
    match request.child_text(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Fault::client(format!("Invalid value of: {name}"))),
    }
}

fn required<T: FromStr>(request: &XmlElement, name: &str) -> Result<T, Fault> {
    field(request, name)?.ok_or_else(|| missing(name))
}

/// Text content taken verbatim.
fn required_text<'a>(request: &'a XmlElement, name: &str) -> Result<&'a str, Fault> {
    request.child_text(name).ok_or_else(|| missing(name))
}

fn missing(name: &str) -> Fault {
    Fault::client(format!("Missing element: {name}"))
}

/// Executes the operation carried by the envelope and returns the response envelope.
async fn handle(store: &SharedStore, document: &str) -> Result<String, Fault> {
    let request = envelope::parse_body(document).map_err(|error| Fault::client(error.to_string()))?;
    let operation = request.name.as_str();
    debug!("Handling SOAP operation: {operation}");
    let payload = match operation {
        GET_USERS => {
            let skip = field::<usize>(&request, "skip")?.unwrap_or(0);
            let limit = field::<usize>(&request, "limit")?
                .filter(|limit| *limit > 0)
                .unwrap_or(DEFAULT_PAGE_LIMIT);
            let store = store.read().await;
            envelope::users_element(&store.list(skip, limit))
        }
        GET_USER => {
            let user_id: UserId = required(&request, "user_id")?;
            let store = store.read().await;
            store
                .get(user_id)
                .map(|user| envelope::user_element(&user))
                .unwrap_or_default()
        }
        CREATE_USER => {
            let name = required_text(&request, "name")?;
            let email = required_text(&request, "email")?;
            let mut store = store.write().await;
            envelope::user_element(&store.create(name, email))
        }
        UPDATE_USER => {
            let user_id: UserId = required(&request, "user_id")?;
            let update = UserUpdate::new(
                request.child_text("name"),
                request.child_text("email"),
            );
            let mut store = store.write().await;
            let user = store
                .update(user_id, &update)
                .ok_or_else(|| Fault::client(format!("User with ID: {user_id} was not found")))?;
            envelope::user_element(&user)
        }
        DELETE_USER => {
            let user_id: UserId = required(&request, "user_id")?;
            let mut store = store.write().await;
            let success = store.delete(user_id);
            let message = if success {
                "User deleted successfully".to_string()
            } else {
                format!("User with ID: {user_id} was not found")
            };
            format!(
                "{}{}",
                envelope::text_element("success", &success.to_string()),
                envelope::text_element("message", &message)
            )
        }
        SEARCH_USERS => {
            let query = request.child_text("query").unwrap_or_default();
            let store = store.read().await;
            envelope::users_element(&store.search(query))
        }
        _ => return Err(Fault::client(format!("Unknown operation: {operation}"))),
    };

    Ok(envelope::response_envelope(operation, &payload))
}
