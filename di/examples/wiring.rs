use fibre_di::{Argument, ClassRegistry, Container, ServiceDefinition};
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// --- Services ---
struct Transport {
  host: String,
  port: u16,
}

struct Mailer {
  transport: Arc<Transport>,
  sender: String,
  footer: Option<String>,
}

impl Mailer {
  fn send(&self, to: &str, body: &str) -> String {
    let footer = self.footer.as_deref().unwrap_or("");
    format!(
      "{} -> {} via {}:{}: '{}'{}",
      self.sender, to, self.transport.host, self.transport.port, body, footer
    )
  }
}

fn main() {
  // Run with RUST_LOG=fibre_di=trace to watch services being built.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  // --- Registration ---
  let mut classes = ClassRegistry::new();
  classes.register("Transport", |args| {
    Ok(Transport {
      host: args.value(0)?,
      port: args.value(1)?,
    })
  });
  classes
    .register("Mailer", |args| {
      Ok(Mailer {
        transport: args.service(0)?,
        sender: args.value(1)?,
        footer: None,
      })
    })
    .method("set_footer", |mailer: &mut Mailer, args| {
      mailer.footer = Some(args.value(0)?);
      Ok(())
    });

  let container = Container::builder()
    .classes(classes)
    .service(
      "transport",
      ServiceDefinition::new("Transport")
        .argument(Argument::parameter("mail.host"))
        .argument(Argument::parameter("mail.port")),
    )
    .service(
      "mailer",
      ServiceDefinition::new("Mailer")
        .argument(Argument::service("transport"))
        .argument(Argument::value("noreply@example.com"))
        .call("set_footer", vec![Argument::value("\n-- sent by fibre")]),
    )
    .parameters(json!({ "mail": { "host": "smtp.example.com", "port": 587 } }))
    .build();

  // --- Resolution ---
  let mailer = match container.get_as::<Mailer>("mailer") {
    Ok(mailer) => mailer,
    Err(err) => {
      eprintln!("Failed to build mailer: {}", err);
      return;
    }
  };
  println!("{}", mailer.send("ops@example.com", "Hello from Fibre!"));

  // The transport was built once, for the mailer, and is shared.
  let transport = container.get_as::<Transport>("transport").ok();
  assert!(transport.is_some_and(|t| Arc::ptr_eq(&t, &mailer.transport)));
}
