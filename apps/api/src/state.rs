use std::sync::Arc;

use crate::auth::IdentityVerifier;
use crate::config::Config;
use crate::cv::{BlobStorage, CvStore, LinkStore};
use crate::jobs::Orchestrator;
use crate::parser::DocumentParser;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every external collaborator sits behind a trait so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityVerifier>,
    pub orchestrator: Arc<Orchestrator>,
    pub cvs: Arc<dyn CvStore>,
    pub blobs: Arc<dyn BlobStorage>,
    /// Short download codes (Redis in production).
    pub links: Arc<dyn LinkStore>,
    pub parser: DocumentParser,
    pub config: Config,
}
