//! Error types for container operations and argument handling.

use thiserror::Error;

/// The main error type returned by container operations.
#[derive(Debug, Error)]
pub enum Error {
  /// The requested service id has no definition.
  #[error("Service not found: {0}")]
  NotFound(String),

  /// The dotted parameter path could not be fully resolved. Carries the full path.
  #[error("Parameter not found: {0}")]
  ParameterNotFound(String),

  #[error(transparent)]
  Container(#[from] ContainerError),
}

/// Problems found while building a service from its definition.
#[derive(Debug, Error)]
pub enum ContainerError {
  #[error("{id} service entry must contain a 'class' key")]
  MissingClass { id: String },

  #[error("{id} service class does not exist: {class}")]
  UnknownClass { id: String, class: String },

  #[error("{id} service contains a circular reference")]
  CircularReference { id: String },

  #[error("{id} service calls must contain a 'method' key")]
  MissingMethod { id: String },

  #[error("{id} service asks for call to uncallable method: {method}")]
  UncallableMethod { id: String, method: String },

  #[error("{id} service could not be constructed: {source}")]
  Construction {
    id: String,
    #[source]
    source: ArgumentError,
  },

  #[error("{id} service call to '{method}' failed: {source}")]
  CallFailed {
    id: String,
    method: String,
    #[source]
    source: ArgumentError,
  },

  #[error("{id} service is not of the requested type {expected}")]
  TypeMismatch { id: String, expected: &'static str },
}

/// Raised by constructors and methods when their positional arguments don't fit.
#[derive(Debug, Error)]
pub enum ArgumentError {
  #[error("missing argument at position {index}")]
  Missing { index: usize },

  #[error("argument at position {index} must be a service reference")]
  NotAService { index: usize },

  #[error("argument at position {index} must be a literal or parameter value")]
  NotAValue { index: usize },

  #[error("service passed at position {index} is not a {expected}")]
  WrongService { index: usize, expected: &'static str },

  #[error("argument at position {index} is invalid: {source}")]
  InvalidValue {
    index: usize,
    #[source]
    source: serde_json::Error,
  },

  #[error("{0}")]
  Custom(String),
}

impl ArgumentError {
  /// Convenience constructor for errors raised by user code.
  pub fn custom(message: impl Into<String>) -> Self {
    ArgumentError::Custom(message.into())
  }
}

/// A specialized `Result` type for `fibre_di` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
