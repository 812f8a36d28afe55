//! Progress-driven motion: smoothing of the external scroll signal and
//! transport of the rolling body along the curve.

mod progress;
mod transport;

pub use progress::{DEFAULT_SMOOTHING, ProgressTracker, smoothing_for_settle};
pub use transport::{BodyState, BodyTransporter};
