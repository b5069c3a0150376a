//! Asynchronous analysis jobs: creation, background execution and queries.

pub mod handlers;
pub mod orchestrator;
pub mod runner;
pub mod scheduler;
pub mod store;

pub use orchestrator::{JobError, Orchestrator};
pub use runner::JobRunner;
pub use scheduler::{AnalysisTask, Scheduler, TokioScheduler};
pub use store::{JobStore, PgJobStore};
