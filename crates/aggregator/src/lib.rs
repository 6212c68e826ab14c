//! Debounced batching of documentation changes
//!
//! The [`ChangeAggregator`] receives file change notifications, keeps the ones
//! that touch documentation, and once no qualifying change has arrived for the
//! quiet period it drains the batch into a single summarization request on the
//! session server.
//!
//! ```text
//! notification -> filter -> pending set -> (re)arm timer
//!                                               |
//!                              expiry -> flush -> toast, resolve session, prompt
//! ```

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod aggregator;
mod filter;
mod payload;
mod pending;
pub mod scheduler;

pub use aggregator::{AggregatorConfig, ChangeAggregator, FlushOutcome, DEFAULT_QUIET_PERIOD};
pub use filter::{AcceptReason, IgnoreReason, PathFilter, Verdict};
pub use payload::{session_title, FlushPayload, DEFAULT_SESSION_LABEL};
pub use pending::PendingSet;
pub use scheduler::{Scheduler, TaskHandle, TokioScheduler};
