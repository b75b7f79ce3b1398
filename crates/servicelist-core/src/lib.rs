//! Core plumbing for the service list engine.
//!
//! - **Signals**: direct-invocation change notifications ([`Signal`])
//! - **Logging**: tracing targets, span names and [`PerfSpan`]
//!
//! # Example
//!
//! ```
//! use servicelist_core::Signal;
//!
//! let entry_removed = Signal::<usize>::new();
//! entry_removed.connect(|row| println!("row {row} removed"));
//! entry_removed.emit(0);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
