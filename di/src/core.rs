//! Core data structures shared by the container and the class registry.

use crate::error::{ArgumentError, ContainerError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::{type_name, Any};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A built service, shared by every caller that resolves it.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// An RAII guard marking a service as being built.
///
/// Acquiring it fails if the id is already marked, which only happens when a
/// chain of service references loops back on itself. The mark is removed when
/// the guard drops, whether the build succeeded or not.
pub(crate) struct BuildGuard<'a> {
  building: &'a RefCell<HashSet<String>>,
  id: String,
}

impl<'a> BuildGuard<'a> {
  pub(crate) fn acquire(
    building: &'a RefCell<HashSet<String>>,
    id: &str,
  ) -> Result<Self, ContainerError> {
    // `insert` returns `false` if the id was already present.
    if !building.borrow_mut().insert(id.to_owned()) {
      return Err(ContainerError::CircularReference { id: id.to_owned() });
    }
    Ok(Self {
      building,
      id: id.to_owned(),
    })
  }
}

impl Drop for BuildGuard<'_> {
  fn drop(&mut self) {
    self.building.borrow_mut().remove(&self.id);
  }
}

/// A concrete argument after references have been resolved.
#[derive(Clone)]
pub enum Resolved {
  Value(Value),
  Service(Instance),
}

impl fmt::Debug for Resolved {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Resolved::Value(value) => f.debug_tuple("Value").field(value).finish(),
      Resolved::Service(_) => f.write_str("Service(..)"),
    }
  }
}

/// Positional arguments handed to a constructor or method.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
  values: Vec<Resolved>,
}

impl Arguments {
  pub fn new(values: Vec<Resolved>) -> Self {
    Self { values }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn raw(&self, index: usize) -> Option<&Resolved> {
    self.values.get(index)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Resolved> {
    self.values.iter()
  }

  /// Returns the service at `index`, downcast to `T`.
  pub fn service<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>, ArgumentError> {
    match self.raw(index) {
      Some(Resolved::Service(instance)) => instance
        .clone()
        .downcast::<T>()
        .map_err(|_| ArgumentError::WrongService {
          index,
          expected: type_name::<T>(),
        }),
      Some(Resolved::Value(_)) => Err(ArgumentError::NotAService { index }),
      None => Err(ArgumentError::Missing { index }),
    }
  }

  /// Returns the literal or parameter value at `index` without conversion.
  pub fn json(&self, index: usize) -> Result<&Value, ArgumentError> {
    match self.raw(index) {
      Some(Resolved::Value(value)) => Ok(value),
      Some(Resolved::Service(_)) => Err(ArgumentError::NotAValue { index }),
      None => Err(ArgumentError::Missing { index }),
    }
  }

  /// Deserializes the literal or parameter value at `index` into `T`.
  pub fn value<T: DeserializeOwned>(&self, index: usize) -> Result<T, ArgumentError> {
    let value = self.json(index)?;
    T::deserialize(value).map_err(|source| ArgumentError::InvalidValue { index, source })
  }
}

impl From<Vec<Resolved>> for Arguments {
  fn from(values: Vec<Resolved>) -> Self {
    Self::new(values)
  }
}
