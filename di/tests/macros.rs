// di/tests/macros.rs

//! Tests for the `resolve!` macro.

use fibre_di::{resolve, ClassRegistry, Container, ServiceDefinition};
use serde_json::json;
use std::sync::Arc;

// --- Test Fixtures ---

struct MacroTestService {
  value: i32,
}

fn container() -> Container {
  let mut classes = ClassRegistry::new();
  classes.register("MacroTestService", |args| Ok(MacroTestService { value: args.value(0)? }));

  Container::builder()
    .classes(classes)
    .service("service", ServiceDefinition::new("MacroTestService").argument(json!(42)))
    .service("broken", ServiceDefinition::new("Unregistered"))
    .build()
}

#[test]
fn test_resolve_returns_typed_singleton() {
  let container = container();

  let r1 = resolve!(container, MacroTestService, "service");
  let r2 = resolve!(container, MacroTestService, "service");

  assert_eq!(r1.value, 42);
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
#[should_panic(expected = "Failed to resolve required service 'missing'")]
fn test_resolve_panics_on_missing_service() {
  let container = container();
  resolve!(container, MacroTestService, "missing");
}

#[test]
#[should_panic(expected = "service class does not exist: Unregistered")]
fn test_resolve_panics_with_build_error() {
  let container = container();
  resolve!(container, MacroTestService, "broken");
}

#[test]
#[should_panic(expected = "service service is not of the requested type")]
fn test_resolve_panics_on_wrong_type() {
  let container = container();
  resolve!(container, String, "service");
}
