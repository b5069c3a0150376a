pub mod invoker;
pub mod prompts;
pub mod schema;

pub use invoker::{AnalysisError, AnalysisInvoker, Analyzer};
pub use schema::StructuredAnalysis;
