//! Server registry lookups
//!
//! Servers come from `[[servers]]` in `sonar-jdt.toml`; callers receive the
//! registry as a `&dyn ServerLookup` instead of reaching for global state.

use crate::core::config::{JdtConfig, ServerDescriptor};

/// Read-only server-id → descriptor lookup.
pub trait ServerLookup {
  fn server(&self, id: &str) -> Option<&ServerDescriptor>;
}

impl ServerLookup for JdtConfig {
  fn server(&self, id: &str) -> Option<&ServerDescriptor> {
    self.servers.iter().find(|s| s.id == id)
  }
}
