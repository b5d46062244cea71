//! High-level operations that correspond to CLI commands
//!
//! These functions own the coordinator-level state flow: scope comes in as
//! an already-resolved record id list, the field-id -> name mapping is a
//! point-in-time snapshot passed by parameter, and the undo stack is owned
//! by the caller. The pure engine modules stay free of host concerns.

pub mod apply;
pub mod plan;
pub mod reorder;
pub mod undo;

pub use apply::apply_operation;
pub use plan::plan_operation;
pub use reorder::reorder_operation;
pub use undo::undo_operation;
