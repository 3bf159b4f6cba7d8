//! The class registry: string identifiers mapped to constructors and methods.

use crate::core::Arguments;
use crate::error::ArgumentError;
use std::any::{type_name, Any};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

type Constructor =
  Box<dyn Fn(Arguments) -> Result<Box<dyn Any + Send + Sync>, ArgumentError> + Send + Sync>;

type Method =
  Box<dyn Fn(&mut (dyn Any + Send + Sync), Arguments) -> Result<(), ArgumentError> + Send + Sync>;

/// A registered class: how to construct it and which methods definitions may call.
pub(crate) struct Class {
  type_name: &'static str,
  constructor: Constructor,
  methods: HashMap<String, Method>,
}

impl Class {
  pub(crate) fn construct(&self, args: Arguments) -> Result<Box<dyn Any + Send + Sync>, ArgumentError> {
    (self.constructor)(args)
  }

  pub(crate) fn method(&self, name: &str) -> Option<&Method> {
    self.methods.get(name)
  }

  pub(crate) fn type_name(&self) -> &'static str {
    self.type_name
  }
}

/// Maps class identifiers used in service definitions to concrete Rust types.
///
/// Every class referenced by a definition's `class` key must be registered
/// here before the container can build it.
///
/// # Examples
///
/// ```
/// use fibre_di::ClassRegistry;
///
/// struct Greeter {
///   greeting: String,
///   name: Option<String>,
/// }
///
/// let mut classes = ClassRegistry::new();
/// classes
///   .register("Greeter", |args| {
///     Ok(Greeter { greeting: args.value(0)?, name: None })
///   })
///   .method("set_name", |greeter: &mut Greeter, args| {
///     greeter.name = Some(args.value(0)?);
///     Ok(())
///   });
///
/// assert!(classes.contains("Greeter"));
/// ```
#[derive(Default)]
pub struct ClassRegistry {
  classes: HashMap<String, Class>,
}

impl ClassRegistry {
  /// Creates a new, empty `ClassRegistry`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `T` under `class`, replacing any earlier registration.
  ///
  /// The constructor receives the resolved constructor arguments in the
  /// order they were declared.
  pub fn register<T, F>(&mut self, class: &str, constructor: F) -> ClassBuilder<'_, T>
  where
    T: Any + Send + Sync,
    F: Fn(Arguments) -> Result<T, ArgumentError> + Send + Sync + 'static,
  {
    let entry = Class {
      type_name: type_name::<T>(),
      constructor: Box::new(move |args: Arguments| {
        constructor(args).map(|instance| Box::new(instance) as Box<dyn Any + Send + Sync>)
      }),
      methods: HashMap::new(),
    };
    let slot = match self.classes.entry(class.to_owned()) {
      Entry::Occupied(mut occupied) => {
        occupied.insert(entry);
        occupied.into_mut()
      }
      Entry::Vacant(vacant) => vacant.insert(entry),
    };

    ClassBuilder {
      class: slot,
      _marker: PhantomData,
    }
  }

  pub fn contains(&self, class: &str) -> bool {
    self.classes.contains_key(class)
  }

  pub(crate) fn get(&self, class: &str) -> Option<&Class> {
    self.classes.get(class)
  }
}

impl fmt::Debug for ClassRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut map = f.debug_map();
    for (name, class) in &self.classes {
      map.entry(name, &class.type_name);
    }
    map.finish()
  }
}

/// Adds callable methods to a class just registered with [`ClassRegistry::register`].
pub struct ClassBuilder<'a, T> {
  class: &'a mut Class,
  _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ClassBuilder<'_, T> {
  /// Makes `name` callable from a definition's `calls` list.
  pub fn method<F>(self, name: &str, method: F) -> Self
  where
    F: Fn(&mut T, Arguments) -> Result<(), ArgumentError> + Send + Sync + 'static,
  {
    let erased: Method = Box::new(move |instance: &mut (dyn Any + Send + Sync), args: Arguments| {
      let target = instance.downcast_mut::<T>().ok_or_else(|| {
        ArgumentError::custom(format!("receiver is not a {}", type_name::<T>()))
      })?;
      method(target, args)
    });
    self.class.methods.insert(name.to_owned(), erased);
    self
  }
}
