//! Builder-style configuration for `Container`.

use crate::container::Container;
use crate::definition::ServiceDefinition;
use crate::parameters::ParameterTree;
use crate::registry::ClassRegistry;

use serde_json::Value;
use std::collections::HashMap;

/// A builder for creating `Container` instances.
///
/// Every part defaults to empty, so `ContainerBuilder::new().build()` yields a
/// container that defines nothing.
#[derive(Debug, Default)]
pub struct ContainerBuilder {
  classes: ClassRegistry,
  services: HashMap<String, ServiceDefinition>,
  parameters: ParameterTree,
}

impl ContainerBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the registry used to turn `class` identifiers into instances.
  pub fn classes(mut self, classes: ClassRegistry) -> Self {
    self.classes = classes;
    self
  }

  /// Defines a service. A later definition with the same id replaces the earlier one.
  pub fn service(mut self, id: impl Into<String>, definition: ServiceDefinition) -> Self {
    self.services.insert(id.into(), definition);
    self
  }

  /// Defines several services at once, e.g. a map deserialized from configuration.
  pub fn services<I, K>(mut self, services: I) -> Self
  where
    I: IntoIterator<Item = (K, ServiceDefinition)>,
    K: Into<String>,
  {
    self
      .services
      .extend(services.into_iter().map(|(id, definition)| (id.into(), definition)));
    self
  }

  /// Sets the parameter tree. The root should be an object.
  pub fn parameters(mut self, parameters: Value) -> Self {
    self.parameters = ParameterTree::new(parameters);
    self
  }

  pub fn build(self) -> Container {
    Container::new(self.classes, self.services, self.parameters)
  }
}
