//! Application services for deployment orchestration.

mod completion;
mod dispatch;
mod tracker;

pub use completion::{
    CompletionError, CompletionOutcome, CompletionResult, DeploymentCompletionService,
};
pub use dispatch::{
    DEFAULT_DISPATCH_TIMEOUT, DeploymentDispatcher, DeploymentHandle, DispatchError,
    DispatchResult,
};
pub use tracker::{
    DEFAULT_SWEEP_INTERVAL, DeploymentStatusTracker, SweepReport, TrackerError, TrackerResult,
};
