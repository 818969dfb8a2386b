//! Resolution engine: where a service keeps its configuration, what that
//! configuration declares, and whether the service is running.

pub mod dialect;
pub mod extractor;
pub mod include;
pub mod locator;
pub mod paths;
pub mod status;

pub use dialect::{Dialect, Directive, ValueSelector};
pub use extractor::extract;
pub use include::resolve_includes;
pub use locator::{convention_paths, ConfigLocator};
pub use paths::first_existing;
pub use status::{strategy_for, ServiceNames, StatusStrategy};
