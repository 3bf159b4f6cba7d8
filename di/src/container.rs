//! The main `Container` struct and its associated methods.

use crate::builder::ContainerBuilder;
use crate::core::{Arguments, BuildGuard, Instance, Resolved};
use crate::definition::{Argument, ServiceDefinition};
use crate::error::{ContainerError, Error, Result};
use crate::parameters::ParameterTree;
use crate::registry::ClassRegistry;
use once_cell::sync::OnceCell;
use parking_lot::ReentrantMutex;
use serde_json::Value;
use std::any::{type_name, Any};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

// A definition together with the slot its instance is cached in.
struct ServiceEntry {
  definition: ServiceDefinition,
  instance: OnceCell<Instance>,
}

/// A dependency injection container driven by service definitions.
///
/// Services are built lazily on the first [`get`](Container::get) and cached
/// for the lifetime of the container. Constructor and method arguments may be
/// literals, references to other services, or dotted references into the
/// parameter tree.
///
/// The container is thread-safe. Builds are serialized by a reentrant lock so
/// that a build may resolve its own dependencies on the same thread, while
/// cached instances are read without locking.
#[derive(Default)]
pub struct Container {
  classes: ClassRegistry,
  services: HashMap<String, ServiceEntry>,
  parameters: ParameterTree,
  // Ids whose build is in progress on the thread holding the lock.
  building: ReentrantMutex<RefCell<HashSet<String>>>,
}

impl Container {
  /// Creates a container from a class registry, definitions and parameters.
  pub fn new(
    classes: ClassRegistry,
    services: HashMap<String, ServiceDefinition>,
    parameters: impl Into<ParameterTree>,
  ) -> Self {
    let services = services
      .into_iter()
      .map(|(id, definition)| {
        let entry = ServiceEntry {
          definition,
          instance: OnceCell::new(),
        };
        (id, entry)
      })
      .collect();

    Self {
      classes,
      services,
      parameters: parameters.into(),
      building: ReentrantMutex::new(RefCell::new(HashSet::new())),
    }
  }

  pub fn builder() -> ContainerBuilder {
    ContainerBuilder::new()
  }

  /// Returns `true` if a service is defined under `id`, built or not.
  pub fn has(&self, id: &str) -> bool {
    self.services.contains_key(id)
  }

  /// Returns the definition registered under `id`.
  pub fn definition(&self, id: &str) -> Option<&ServiceDefinition> {
    self.services.get(id).map(|entry| &entry.definition)
  }

  /// Looks up a parameter by its dotted path, e.g. `"database.primary.host"`.
  pub fn get_parameter(&self, id: &str) -> Result<&Value> {
    self.parameters.get(id)
  }

  /// Resolves a service, building it and its dependencies on first use.
  ///
  /// Every call for the same id returns the same shared instance.
  pub fn get(&self, id: &str) -> Result<Instance> {
    let entry = self
      .services
      .get(id)
      .ok_or_else(|| Error::NotFound(id.to_owned()))?;

    if let Some(instance) = entry.instance.get() {
      trace!(service = id, "returning cached service");
      return Ok(instance.clone());
    }

    let building = self.building.lock();

    // Another thread may have finished the build while we waited.
    if let Some(instance) = entry.instance.get() {
      return Ok(instance.clone());
    }

    let instance = self.create_service(id, &entry.definition, &building)?;
    Ok(entry.instance.get_or_init(|| instance).clone())
  }

  /// Resolves a service and downcasts it to `T`.
  pub fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
    self.get(id)?.downcast::<T>().map_err(|_| {
      Error::from(ContainerError::TypeMismatch {
        id: id.to_owned(),
        expected: type_name::<T>(),
      })
    })
  }

  /// Turns argument specs into concrete positional arguments, keeping their order.
  ///
  /// Service references are resolved through [`get`](Container::get), which
  /// builds them if needed; parameter references through
  /// [`get_parameter`](Container::get_parameter). `owner` is the id of the
  /// service the arguments are for and is only used for diagnostics.
  pub fn resolve_arguments(&self, owner: &str, specs: &[Argument]) -> Result<Arguments> {
    trace!(service = owner, count = specs.len(), "resolving arguments");

    specs
      .iter()
      .map(|spec| match spec {
        Argument::Service(reference) => self.get(reference.name()).map(Resolved::Service),
        Argument::Parameter(reference) => self
          .get_parameter(reference.name())
          .map(|value| Resolved::Value(value.clone())),
        Argument::Value(value) => Ok(Resolved::Value(value.clone())),
      })
      .collect::<Result<Vec<_>>>()
      .map(Arguments::new)
  }

  fn create_service(
    &self,
    id: &str,
    definition: &ServiceDefinition,
    building: &RefCell<HashSet<String>>,
  ) -> Result<Instance> {
    let class_name = definition
      .class
      .as_deref()
      .ok_or_else(|| ContainerError::MissingClass { id: id.to_owned() })?;

    let class = self
      .classes
      .get(class_name)
      .ok_or_else(|| ContainerError::UnknownClass {
        id: id.to_owned(),
        class: class_name.to_owned(),
      })?;

    let _guard = BuildGuard::acquire(building, id).map_err(|err| {
      warn!(service = id, "circular reference detected");
      err
    })?;

    debug!(service = id, class = class_name, "building service");

    let arguments = self.resolve_arguments(id, &definition.arguments)?;
    let mut instance = class
      .construct(arguments)
      .map_err(|source| ContainerError::Construction {
        id: id.to_owned(),
        source,
      })?;

    for call in &definition.calls {
      let method_name = call
        .method
        .as_deref()
        .ok_or_else(|| ContainerError::MissingMethod { id: id.to_owned() })?;

      let method = class
        .method(method_name)
        .ok_or_else(|| ContainerError::UncallableMethod {
          id: id.to_owned(),
          method: method_name.to_owned(),
        })?;

      let arguments = self.resolve_arguments(id, &call.arguments)?;
      trace!(service = id, method = method_name, "invoking method");
      method(&mut *instance, arguments).map_err(|source| ContainerError::CallFailed {
        id: id.to_owned(),
        method: method_name.to_owned(),
        source,
      })?;
    }

    debug!(service = id, type_name = class.type_name(), "service built");
    Ok(Instance::from(instance))
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let built = self
      .services
      .values()
      .filter(|entry| entry.instance.get().is_some())
      .count();
    f.debug_struct("Container")
      .field("classes", &self.classes)
      .field("services", &self.services.len())
      .field("built", &built)
      .field("parameters", self.parameters.root())
      .finish_non_exhaustive()
  }
}
