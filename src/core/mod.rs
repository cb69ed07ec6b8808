pub mod balance_sheet;
pub mod classify;
pub mod columns;
pub mod engine;
pub mod ingest;
pub mod normalize;
pub mod pnl;
pub mod segregate;
pub mod split;

pub use crate::domain::model::{ColumnMap, StatementBundle};
pub use crate::domain::ports::{ArtifactSink, TextCompletion};
pub use crate::utils::error::Result;
pub use engine::{Stage, StatementEngine};
