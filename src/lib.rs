/// Parameter Resolver
///
/// Converts plugin request parameter values between their plain form and
/// backing-store references, walking each value tree together with the
/// parameter definitions that describe it.
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod store;
pub mod wire;

pub use engine::{Direction, Parameter, ParameterMap, Registry, Resolver, Strategy, Value};
pub use error::{Error, Result};
pub use store::BackingStore;
