//! The nested parameter tree and dotted-path lookup.

use crate::error::{Error, Result};
use serde_json::Value;

/// An immutable tree of configuration values addressed by dotted paths.
///
/// Objects are the mappings that paths descend through, and arrays are
/// addressed by their numeric indexes (`"mailer.ports.0"`). Any other value is
/// a leaf. A `null` is treated as an absent entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterTree {
  root: Value,
}

impl ParameterTree {
  pub fn new(root: Value) -> Self {
    Self { root }
  }

  /// Looks up `id` by splitting it on `.` and descending one token at a time.
  ///
  /// The value found after the last token is returned as-is, so a path may
  /// point at a whole nested mapping. On failure the full `id` is reported,
  /// not the partial path that was walked.
  pub fn get(&self, id: &str) -> Result<&Value> {
    let mut context = &self.root;

    for token in id.split('.') {
      let next = match context {
        Value::Array(items) => token.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => context.get(token),
      };
      context = match next {
        Some(Value::Null) | None => return Err(Error::ParameterNotFound(id.to_owned())),
        Some(value) => value,
      };
    }

    Ok(context)
  }

  pub fn root(&self) -> &Value {
    &self.root
  }
}

impl From<Value> for ParameterTree {
  fn from(root: Value) -> Self {
    Self::new(root)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn tree() -> ParameterTree {
    ParameterTree::new(json!({
      "a": { "b": { "c": 42 } },
      "mailer": { "host": "smtp.local", "ports": [25, 587], "auth": null },
      "flat": "value",
    }))
  }

  #[test]
  fn resolves_nested_path() {
    assert_eq!(tree().get("a.b.c").unwrap(), &json!(42));
    assert_eq!(tree().get("flat").unwrap(), &json!("value"));
  }

  #[test]
  fn returns_mappings_as_is() {
    assert_eq!(tree().get("a.b").unwrap(), &json!({ "c": 42 }));
    assert_eq!(tree().get("mailer.ports").unwrap(), &json!([25, 587]));
  }

  #[test]
  fn indexes_into_arrays() {
    assert_eq!(tree().get("mailer.ports.0").unwrap(), &json!(25));
    assert_eq!(tree().get("mailer.ports.1").unwrap(), &json!(587));
  }

  #[test]
  fn bad_array_index_reports_full_path() {
    let err = tree().get("mailer.ports.2").unwrap_err();
    assert!(matches!(&err, Error::ParameterNotFound(id) if id == "mailer.ports.2"));

    let err = tree().get("mailer.ports.first").unwrap_err();
    assert!(matches!(&err, Error::ParameterNotFound(id) if id == "mailer.ports.first"));
  }

  #[test]
  fn reports_full_path_when_missing() {
    let err = tree().get("a.b.x").unwrap_err();
    assert!(matches!(&err, Error::ParameterNotFound(id) if id == "a.b.x"));
    assert_eq!(err.to_string(), "Parameter not found: a.b.x");
  }

  #[test]
  fn fails_when_descending_through_a_leaf() {
    let err = tree().get("flat.deeper").unwrap_err();
    assert!(matches!(err, Error::ParameterNotFound(id) if id == "flat.deeper"));
  }

  #[test]
  fn null_counts_as_absent() {
    assert!(tree().get("mailer.auth").is_err());
  }

  #[test]
  fn empty_tree_has_nothing() {
    let empty = ParameterTree::default();
    assert!(empty.get("anything").is_err());
    assert!(empty.get("").is_err());
  }
}
