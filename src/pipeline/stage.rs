//! The stage contract shared by every link in the chain.

use crate::pipeline::types::Item;

/// One link in the processing chain.
///
/// A stage takes ownership of the working item and hands back the item
/// that should continue downstream. Passthrough stages return their input;
/// substituting stages return a freshly built value. Stages may log or bump
/// counters along the way, so anything stateful must use interior
/// mutability that is safe to share across threads.
pub trait Stage: Send + Sync {
    /// Stage name for logging (e.g. "observer", "auditor").
    fn name(&self) -> &'static str;

    /// Process one item, returning the item to pass on.
    fn process(&self, item: Item) -> Item;
}
