//! Project analysis settings
//!
//! - **binding**: per-project server binding (`org.sonarlint.eclipse.prefs`) and its page view
//! - **servers**: server registry lookups

pub mod binding;
pub mod servers;

pub use binding::{ProjectBinding, PropertiesView};
