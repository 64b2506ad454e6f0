use crate::error::ProtocolError;
use crate::models::user::User;
use crate::soap::xml::{parse_document, XmlElement};
use quick_xml::escape::escape;
use std::fmt::Write;

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const TARGET_NAMESPACE: &str = "urn:users-benchmark:soap";
pub const SOAP_ACTION_HEADER: &str = "SOAPAction";
pub const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

pub const GET_USERS: &str = "GetUsers";
pub const GET_USER: &str = "GetUser";
pub const CREATE_USER: &str = "CreateUser";
pub const UPDATE_USER: &str = "UpdateUser";
pub const DELETE_USER: &str = "DeleteUser";
pub const SEARCH_USERS: &str = "SearchUsers";

pub const OPERATIONS: [&str; 6] = [
    GET_USERS,
    GET_USER,
    CREATE_USER,
    UPDATE_USER,
    DELETE_USER,
    SEARCH_USERS,
];

/// Wraps the body content into a SOAP 1.1 envelope.
pub fn envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><soap:Envelope xmlns:soap="{SOAP_ENVELOPE_NS}" xmlns:tns="{TARGET_NAMESPACE}"><soap:Body>{body}</soap:Body></soap:Envelope>"#
    )
}

/// Builds a full envelope holding the `tns:{operation}` element with the given fields.
pub fn operation_envelope(operation: &str, fields: &[(&str, String)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&text_element(name, value));
    }
    envelope(&format!("<tns:{operation}>{body}</tns:{operation}>"))
}

/// Builds a response envelope, the payload is already serialized XML.
pub fn response_envelope(operation: &str, payload: &str) -> String {
    envelope(&format!(
        "<tns:{operation}Response>{payload}</tns:{operation}Response>"
    ))
}

pub fn fault_envelope(code: &str, message: &str) -> String {
    envelope(&format!(
        "<soap:Fault><faultcode>soap:{code}</faultcode><faultstring>{}</faultstring></soap:Fault>",
        escape(message)
    ))
}

pub fn text_element(name: &str, value: &str) -> String {
    format!("<{name}>{}</{name}>", escape(value))
}

pub fn user_element(user: &User) -> String {
    format!(
        "<user>{}{}{}</user>",
        text_element("id", &user.id.to_string()),
        text_element("name", &user.name),
        text_element("email", &user.email)
    )
}

pub fn users_element(users: &[User]) -> String {
    let mut xml = String::from("<users>");
    for user in users {
        let _ = write!(xml, "{}", user_element(user));
    }
    xml.push_str("</users>");
    xml
}

/// Returns the first element inside `Body`.
///
/// A `Fault` body is turned into [`ProtocolError::SoapFault`] carrying the fault string.
pub fn parse_body(xml: &str) -> Result<XmlElement, ProtocolError> {
    let root = parse_document(xml)?;
    if root.name != "Envelope" {
        return Err(ProtocolError::InvalidResponse(format!(
            "expected SOAP envelope, found: {}",
            root.name
        )));
    }

    let content = root
        .child("Body")
        .and_then(|body| body.children.first())
        .ok_or_else(|| ProtocolError::InvalidResponse("empty SOAP body".to_string()))?;
    if content.name == "Fault" {
        let message = content
            .child_text("faultstring")
            .unwrap_or("unknown fault")
            .to_string();
        return Err(ProtocolError::SoapFault(message));
    }

    Ok(content.clone())
}

pub fn parse_user(element: &XmlElement) -> Result<User, ProtocolError> {
    let field = |name: &str| {
        element
            .child_text(name)
            .ok_or_else(|| ProtocolError::InvalidResponse(format!("user without {name}")))
    };
    let id = field("id")?
        .trim()
        .parse()
        .map_err(|_| ProtocolError::InvalidResponse("invalid user id".to_string()))?;
    Ok(User::new(id, field("name")?, field("email")?))
}

pub fn parse_users(element: &XmlElement) -> Result<Vec<User>, ProtocolError> {
    match element.child("users") {
        Some(users) => users.children_named("user").map(parse_user).collect(),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_envelope_should_escape_field_values() {
        let xml = operation_envelope(SEARCH_USERS, &[("query", "<Lê & co>".to_string())]);
        let body = parse_body(&xml).unwrap();
        assert_eq!(body.name, SEARCH_USERS);
        assert_eq!(body.child_text("query"), Some("<Lê & co>"));
    }

    #[test]
    fn fault_should_be_reported_with_its_message() {
        let xml = fault_envelope("Client", "User with ID: 99 was not found");
        let error = parse_body(&xml).unwrap_err();
        assert!(
            matches!(error, ProtocolError::SoapFault(message) if message == "User with ID: 99 was not found")
        );
    }

    #[test]
    fn users_payload_should_be_decoded() {
        let users = vec![
            User::new(1, "Nguyễn Văn A", "a@gmail.com"),
            User::new(2, "Trần Thị B", "b@example.com"),
        ];
        let xml = response_envelope(GET_USERS, &users_element(&users));
        let body = parse_body(&xml).unwrap();
        assert_eq!(body.name, "GetUsersResponse");
        assert_eq!(parse_users(&body).unwrap(), users);
    }

    #[test]
    fn surrounding_whitespace_in_user_fields_should_survive_decoding() {
        let user = User::new(7, "  Ann ", " ann@x.com");
        let xml = response_envelope(GET_USER, &user_element(&user));
        let body = parse_body(&xml).unwrap();
        assert_eq!(parse_user(body.child("user").unwrap()).unwrap(), user);
    }

    #[test]
    fn non_envelope_document_should_be_rejected() {
        assert!(parse_body("<html><body>oops</body></html>").is_err());
    }
}
