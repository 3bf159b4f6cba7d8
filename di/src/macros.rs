//! Public macros for ergonomic service resolution.

/// Resolves a typed service from a container, panicking on failure.
///
/// Use this where a missing or misconfigured service is a programming error.
/// For a non-panicking version, call `container.get_as::<T>(id)` directly.
///
/// # Panics
///
/// Panics with the container's error message if the service is undefined,
/// cannot be built, or is not of type `T`.
///
/// # Examples
///
/// ```
/// use fibre_di::{resolve, ClassRegistry, Container, ServiceDefinition};
///
/// let mut classes = ClassRegistry::new();
/// classes.register("Counter", |args| Ok(args.value::<u32>(0)?));
///
/// let container = Container::builder()
///   .classes(classes)
///   .service("counter", ServiceDefinition::new("Counter").argument(serde_json::json!(5)))
///   .build();
///
/// let counter = resolve!(container, u32, "counter");
/// assert_eq!(*counter, 5);
/// ```
#[macro_export]
macro_rules! resolve {
  ($container:expr, $type:ty, $id:expr) => {
    match $container.get_as::<$type>($id) {
      Ok(service) => service,
      Err(err) => panic!(
        "Failed to resolve required service '{}' as {}: {}",
        $id,
        std::any::type_name::<$type>(),
        err
      ),
    }
  };
}
