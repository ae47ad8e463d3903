use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps passenger contact data so logs only ever see a redacted form.
///
/// Emails keep their first character and domain (`j***@example.com`), anything
/// else is fully starred. Serialization still yields the real value.
#[derive(Clone, Deserialize)]
pub struct Masked<T>(pub T);

fn redact(raw: &str) -> String {
    match raw.split_once('@') {
        Some((local, domain)) => {
            let initial: String = local.chars().take(1).collect();
            format!("{}***@{}", initial, domain)
        }
        None => "********".to_string(),
    }
}

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(&self.0.to_string()))
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(&self.0.to_string()))
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}
