use crate::error::ProtocolError;
use crate::soap::envelope::{OPERATIONS, SOAP_ENVELOPE_NS, TARGET_NAMESPACE};
use crate::soap::xml::parse_document;
use quick_xml::escape::escape;
use std::fmt::Write;

pub const SERVICE_NAME: &str = "UserService";

/// Endpoint information resolved from a WSDL document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsdlBinding {
    pub location: String,
    pub target_namespace: String,
}

impl WsdlBinding {
    pub fn soap_action(&self, operation: &str) -> String {
        format!("\"{}/{operation}\"", self.target_namespace)
    }
}

/// Renders the service description, `location` is the address clients POST envelopes to.
pub fn render(location: &str) -> String {
    let mut messages = String::new();
    let mut port_operations = String::new();
    let mut binding_operations = String::new();
    for operation in OPERATIONS {
        let _ = write!(
            messages,
            r#"<wsdl:message name="{operation}Request"><wsdl:part name="parameters" element="tns:{operation}"/></wsdl:message><wsdl:message name="{operation}Response"><wsdl:part name="parameters" element="tns:{operation}Response"/></wsdl:message>"#
        );
        let _ = write!(
            port_operations,
            r#"<wsdl:operation name="{operation}"><wsdl:input message="tns:{operation}Request"/><wsdl:output message="tns:{operation}Response"/></wsdl:operation>"#
        );
        let _ = write!(
            binding_operations,
            r#"<wsdl:operation name="{operation}"><soap:operation soapAction="{TARGET_NAMESPACE}/{operation}"/><wsdl:input><soap:body use="literal"/></wsdl:input><wsdl:output><soap:body use="literal"/></wsdl:output></wsdl:operation>"#
        );
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><wsdl:definitions name="{SERVICE_NAME}" targetNamespace="{TARGET_NAMESPACE}" xmlns:tns="{TARGET_NAMESPACE}" xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/" xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/" xmlns:soapenv="{SOAP_ENVELOPE_NS}">{messages}<wsdl:portType name="{SERVICE_NAME}PortType">{port_operations}</wsdl:portType><wsdl:binding name="{SERVICE_NAME}Binding" type="tns:{SERVICE_NAME}PortType"><soap:binding style="document" transport="http://schemas.xmlsoap.org/soap/http"/>{binding_operations}</wsdl:binding><wsdl:service name="{SERVICE_NAME}"><wsdl:port name="{SERVICE_NAME}Port" binding="tns:{SERVICE_NAME}Binding"><soap:address location="{}"/></wsdl:port></wsdl:service></wsdl:definitions>"#,
        escape(location)
    )
}

pub fn parse(xml: &str) -> Result<WsdlBinding, ProtocolError> {
    let root = parse_document(xml)?;
    if root.name != "definitions" {
        return Err(ProtocolError::InvalidResponse(format!(
            "expected WSDL definitions, found: {}",
            root.name
        )));
    }

    let target_namespace = root
        .attribute("targetNamespace")
        .unwrap_or(TARGET_NAMESPACE)
        .to_string();
    let location = root
        .find("address")
        .and_then(|address| address.attribute("location"))
        .ok_or_else(|| ProtocolError::InvalidResponse("WSDL without service address".to_string()))?
        .to_string();
    Ok(WsdlBinding {
        location,
        target_namespace,
    })
}
