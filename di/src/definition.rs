//! Declarative service definitions and the argument specs they carry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A placeholder resolved by fetching (or building) the named service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceReference {
  #[serde(rename = "service")]
  name: String,
}

impl ServiceReference {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }

  pub fn name(&self) -> &str {
    &self.name
  }
}

/// A placeholder resolved by a dotted lookup in the parameter tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterReference {
  #[serde(rename = "parameter")]
  name: String,
}

impl ParameterReference {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }

  pub fn name(&self) -> &str {
    &self.name
  }
}

/// One positional argument of a constructor or method call.
///
/// In serialized form `{"service": "id"}` and `{"parameter": "a.b"}` are
/// references; every other value is taken literally. A literal object with
/// exactly one `service` or `parameter` string key therefore reads back as a
/// reference; wrap such data in another object or array to keep it literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
  Service(ServiceReference),
  Parameter(ParameterReference),
  Value(Value),
}

impl Argument {
  pub fn service(name: impl Into<String>) -> Self {
    Argument::Service(ServiceReference::new(name))
  }

  pub fn parameter(name: impl Into<String>) -> Self {
    Argument::Parameter(ParameterReference::new(name))
  }

  pub fn value(value: impl Into<Value>) -> Self {
    Argument::Value(value.into())
  }
}

impl From<ServiceReference> for Argument {
  fn from(reference: ServiceReference) -> Self {
    Argument::Service(reference)
  }
}

impl From<ParameterReference> for Argument {
  fn from(reference: ParameterReference) -> Self {
    Argument::Parameter(reference)
  }
}

impl From<Value> for Argument {
  fn from(value: Value) -> Self {
    Argument::Value(value)
  }
}

/// A method invoked on a freshly built service before it is cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
  #[serde(default)]
  pub method: Option<String>,
  #[serde(default)]
  pub arguments: Vec<Argument>,
}

impl MethodCall {
  pub fn new(method: impl Into<String>, arguments: Vec<Argument>) -> Self {
    Self {
      method: Some(method.into()),
      arguments,
    }
  }
}

/// How to build one service: its class, constructor arguments and setup calls.
///
/// `class` is optional at the type level so definitions deserialized from
/// external data can be checked when the service is first built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
  #[serde(default)]
  pub class: Option<String>,
  #[serde(default)]
  pub arguments: Vec<Argument>,
  #[serde(default)]
  pub calls: Vec<MethodCall>,
}

impl ServiceDefinition {
  pub fn new(class: impl Into<String>) -> Self {
    Self {
      class: Some(class.into()),
      ..Self::default()
    }
  }

  pub fn argument(mut self, argument: impl Into<Argument>) -> Self {
    self.arguments.push(argument.into());
    self
  }

  pub fn call(mut self, method: impl Into<String>, arguments: Vec<Argument>) -> Self {
    self.calls.push(MethodCall::new(method, arguments));
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use serde_json::json;

  #[test]
  fn deserializes_references_and_literals() {
    let def: ServiceDefinition = serde_json::from_value(json!({
      "class": "Mailer",
      "arguments": [{ "service": "transport" }, { "parameter": "mailer.from" }, 3, { "other": 1 }],
      "calls": [{ "method": "set_logger", "arguments": [{ "service": "logger" }] }],
    }))
    .unwrap();

    let expected = ServiceDefinition::new("Mailer")
      .argument(Argument::service("transport"))
      .argument(Argument::parameter("mailer.from"))
      .argument(Argument::value(3))
      .argument(json!({ "other": 1 }))
      .call("set_logger", vec![Argument::service("logger")]);

    assert_eq!(def, expected);
  }

  #[test]
  fn missing_fields_default_to_empty() {
    let def: ServiceDefinition = serde_json::from_value(json!({})).unwrap();
    assert_eq!(def.class, None);
    assert!(def.arguments.is_empty());
    assert!(def.calls.is_empty());

    let call: MethodCall = serde_json::from_value(json!({ "arguments": [1] })).unwrap();
    assert_eq!(call.method, None);
  }

  #[test]
  fn reference_shaped_literal_reads_back_as_reference() {
    let literal = Argument::value(json!({ "service": "db" }));
    let encoded = serde_json::to_value(&literal).unwrap();

    let decoded: Argument = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, Argument::service("db"));

    let wrapped: Argument = serde_json::from_value(json!({ "service": "db", "port": 5432 })).unwrap();
    assert_eq!(wrapped, Argument::value(json!({ "service": "db", "port": 5432 })));
  }

  #[test]
  fn serializes_back_to_reference_maps() {
    let def = ServiceDefinition::new("Logger").argument(Argument::parameter("log.level"));
    assert_eq!(
      serde_json::to_value(&def).unwrap(),
      json!({ "class": "Logger", "arguments": [{ "parameter": "log.level" }], "calls": [] })
    );
  }
}
