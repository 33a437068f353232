//! Submission plumbing shared by every remote action
//!
//! Handles what happens around a single backend call:
//! 1. Packaging - load and type-check the file to upload
//! 2. Lifecycle - one in-flight call per action, idle again afterwards
//! 3. Progress - time-based estimate while a slow call is pending

mod lifecycle;
mod progress;
mod upload;

pub use lifecycle::{ActionSlot, InFlight, SubmissionState};
pub use progress::{EstimatedProgress, NoopProgress, ProgressSchedule, ProgressSink};
pub use upload::FileUpload;
