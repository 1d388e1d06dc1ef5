//! Application-level configuration.
//!
//! - [`SessionParams`]: defaults for live sessions (speaker time, overtime grace, save debounce)

pub mod session_params;

pub use session_params::SessionParams;
