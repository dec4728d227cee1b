//! Observability helpers for refresh invocations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `lwa_token_refresher.refresh` with the
//!   `stage` (call site) and `request_id` fields.
//! - Enable `metrics` to increment the `lwa_token_refresher_refresh_total` counter for every
//!   attempt/success/failure, labeled by `outcome`.
//!
//! The [`DiagnosticSink`] is independent of both flags: it is how the refresher reports the
//! value it returns, and callers inject it explicitly.

mod diagnostic;
mod metrics;
mod tracing;

pub use diagnostic::*;
pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefreshOutcome {
	/// Entry to [`TokenRefresher::refresh`](crate::refresher::TokenRefresher::refresh).
	Attempt,
	/// The token endpoint answered (any status).
	Success,
	/// An error was propagated back to the caller.
	Failure,
}
impl RefreshOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RefreshOutcome::Attempt => "attempt",
			RefreshOutcome::Success => "success",
			RefreshOutcome::Failure => "failure",
		}
	}
}
impl Display for RefreshOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
