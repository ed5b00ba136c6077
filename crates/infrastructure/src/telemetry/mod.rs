//! Logging initialisation
//!
//! Console logging through `tracing-subscriber`, in text or JSON.

mod logging;

pub use logging::{LogFormat, LogOutput, LoggingError, init_logging};
