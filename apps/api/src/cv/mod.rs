//! Uploaded CVs: parsing on upload, blob storage, and short-lived download links.

pub mod handlers;
pub mod links;
pub mod storage;
pub mod store;

pub use links::{LinkStore, RedisLinkStore};
pub use storage::{BlobStorage, S3BlobStorage};
pub use store::{CvStore, PgCvStore};
