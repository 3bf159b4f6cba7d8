//! # Fibre DI
//!
//! A definition-driven dependency injection container for Rust.
//!
//! Services are described declaratively: a class identifier, a list of
//! constructor arguments and an optional list of method calls to run after
//! construction. Arguments are literals, references to other services, or
//! dotted references into a nested parameter tree. The container builds each
//! service the first time it is requested and hands out the same shared
//! instance from then on.
//!
//! ## Core Concepts
//!
//! - **ClassRegistry**: maps the `class` identifiers used in definitions to
//!   Rust constructors and to the methods definitions may call.
//! - **ServiceDefinition**: how to build one service. Definitions implement
//!   `serde::Deserialize`, so they can come from any configuration format.
//! - **ParameterTree**: nested configuration values, addressed like `"db.primary.host"`.
//! - **Container**: resolves services lazily, detects circular references and
//!   caches one instance per service id.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_di::{Argument, ClassRegistry, Container, ServiceDefinition};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! struct Transport {
//!   host: String,
//! }
//!
//! struct Mailer {
//!   transport: Arc<Transport>,
//!   sender: Option<String>,
//! }
//!
//! let mut classes = ClassRegistry::new();
//! classes.register("Transport", |args| Ok(Transport { host: args.value(0)? }));
//! classes
//!   .register("Mailer", |args| {
//!     Ok(Mailer { transport: args.service(0)?, sender: None })
//!   })
//!   .method("set_sender", |mailer: &mut Mailer, args| {
//!     mailer.sender = Some(args.value(0)?);
//!     Ok(())
//!   });
//!
//! let container = Container::builder()
//!   .classes(classes)
//!   .service("transport", ServiceDefinition::new("Transport").argument(Argument::parameter("mail.host")))
//!   .service(
//!     "mailer",
//!     ServiceDefinition::new("Mailer")
//!       .argument(Argument::service("transport"))
//!       .call("set_sender", vec![Argument::value("noreply@example.com")]),
//!   )
//!   .parameters(json!({ "mail": { "host": "smtp.example.com" } }))
//!   .build();
//!
//! let mailer = container.get_as::<Mailer>("mailer").unwrap();
//! assert_eq!(mailer.transport.host, "smtp.example.com");
//! assert_eq!(mailer.sender.as_deref(), Some("noreply@example.com"));
//! ```

mod builder;
mod container;
mod core;
mod definition;
pub mod error;
mod macros;
mod parameters;
mod registry;

pub use builder::ContainerBuilder;
pub use container::Container;
pub use crate::core::{Arguments, Instance, Resolved};
pub use definition::{Argument, MethodCall, ParameterReference, ServiceDefinition, ServiceReference};
pub use error::{ArgumentError, ContainerError, Error, Result};
pub use parameters::ParameterTree;
pub use registry::{ClassBuilder, ClassRegistry};
