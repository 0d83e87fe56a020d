use shared::{ActivityId, UserId};

pub mod admin;
pub mod submissions;
pub mod users;
pub mod workflow;

#[cfg(test)]
mod tests;

pub use admin::AdminDataStore;
pub use submissions::ActivitySubmissionsStore;
pub use users::UserDataStore;
pub use workflow::{Workflow, WorkflowError, WorkflowSummary};

/// Composite key of a submission: one record at most per pair.
pub type SubmissionKey = (ActivityId, UserId);
