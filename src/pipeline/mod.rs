//! Mail processing pipeline.
//!
//! Every item handed to the post flows through:
//! 1. `Observer` — reads correspondence, flags watchlisted parties
//! 2. `Interceptor` — swaps valuable packages for stones
//! 3. `Auditor` — inspects package labels and reports policy faults
//! 4. `RealDelivery` — the terminal step that actually delivers
//!
//! **Each stage receives the previous stage's output**, so a substitution
//! made upstream is what the auditor and delivery see.

pub mod auditor;
pub mod delivery;
pub mod interceptor;
pub mod observer;
pub mod processor;
pub mod sink;
pub mod stage;
pub mod types;

pub use auditor::Auditor;
pub use delivery::RealDelivery;
pub use interceptor::Interceptor;
pub use observer::Observer;
pub use processor::Pipeline;
pub use stage::Stage;
pub use types::{Content, Item};
