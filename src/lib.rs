pub mod cli;
pub mod ctx;
pub mod error;
pub mod expr;
pub mod geneset;
pub mod io;
pub mod math;
pub mod pipeline;
pub mod plots;
pub mod schema;
pub mod scores;

pub use error::PipelineError;
