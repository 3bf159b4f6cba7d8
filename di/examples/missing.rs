use fibre_di::{resolve, Argument, ClassRegistry, Container, Error, ServiceDefinition};
use std::panic;
use std::sync::Arc;

struct Node {
  _next: Arc<Node>,
}

fn main() {
  let mut classes = ClassRegistry::new();
  classes.register("Node", |args| Ok(Node { _next: args.service(0)? }));

  let container = Container::builder()
    .classes(classes)
    .service("ping", ServiceDefinition::new("Node").argument(Argument::service("pong")))
    .service("pong", ServiceDefinition::new("Node").argument(Argument::service("ping")))
    .build();

  // --- Using the fallible `get()` method ---
  match container.get("unregistered") {
    Err(Error::NotFound(id)) => println!("Correctly received NotFound for '{}'.", id),
    other => panic!("Unexpected result: {:?}", other.map(|_| ())),
  }

  match container.get("ping") {
    Err(err) => println!("Building 'ping' failed as expected: {}", err),
    Ok(_) => panic!("A circular definition should not build!"),
  }

  // --- Using the panicking `resolve!` macro ---
  println!("\nNow resolving a missing service with resolve!...");
  // The container holds locks and cells, so assert unwind safety explicitly.
  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    let _node = resolve!(container, Node, "unregistered");
  }));
  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");
}
