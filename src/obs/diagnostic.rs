// self
use crate::_prelude::*;

/// Destination for the per-invocation diagnostic line.
///
/// The refresher writes exactly one message per successful refresh. Hosts that capture stdout
/// (AWS Lambda, for instance) get it through [`TracingDiagnostics`]; tests inject
/// [`MemoryDiagnostics`] and assert on the captured lines.
pub trait DiagnosticSink
where
	Self: Send + Sync,
{
	/// Emits one diagnostic message.
	fn emit(&self, message: &str);
}

/// Default sink: an `info` event on the `lwa_token_refresher::diagnostic` target, or stdout when
/// the `tracing` feature is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;
impl DiagnosticSink for TracingDiagnostics {
	fn emit(&self, message: &str) {
		#[cfg(feature = "tracing")]
		{
			tracing::info!(target: "lwa_token_refresher::diagnostic", "{message}");
		}
		#[cfg(not(feature = "tracing"))]
		{
			println!("{message}");
		}
	}
}

/// Sink that keeps every message in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryDiagnostics(Arc<Mutex<Vec<String>>>);
impl MemoryDiagnostics {
	/// Returns the messages emitted so far, oldest first.
	pub fn messages(&self) -> Vec<String> {
		self.0.lock().clone()
	}
}
impl DiagnosticSink for MemoryDiagnostics {
	fn emit(&self, message: &str) {
		self.0.lock().push(message.to_owned());
	}
}
