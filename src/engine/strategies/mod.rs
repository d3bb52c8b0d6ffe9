// Resolver strategies for payload-shaped parameter values.
//
// Each strategy claims one family of leaves and moves them in and out of the
// backing store. The registry consults strategies in registration order, so
// the default order below is part of the public contract:
// 1. File  - local or inline files <-> `file` references
// 2. Bytes - raw byte payloads <-> `bytes` references

pub mod bytes;
pub mod file;

pub use bytes::BytesStrategy;
pub use file::FileStrategy;

use crate::engine::definition::Parameter;

/// `true` when the definition is absent or satisfies `accepts`.
pub(crate) fn definition_allows(
    definition: Option<&Parameter>,
    accepts: impl FnOnce(&Parameter) -> bool,
) -> bool {
    definition.map_or(true, accepts)
}
