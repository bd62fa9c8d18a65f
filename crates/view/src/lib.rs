//! Incremental view controller.
//!
//! Each live view owns exactly one [`DecorationSet`]. The host reports
//! changes as [`ViewUpdate`] values on its UI thread; the controller decides
//! whether they invalidate the set and, if so, rebuilds it in full before
//! returning. Readers therefore only ever see a complete set.
//!
//! [`DecorationSet`]: veil_decoration::DecorationSet

mod controller;
mod host;
mod registry;
mod update;

pub use controller::{Lifecycle, Outcome, ViewController, ViewState};
pub use host::{Snapshot, ViewHost};
pub use registry::{ViewEvent, ViewId, ViewRegistry};
pub use update::{UpdatePolicy, ViewUpdate};
