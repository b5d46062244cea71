#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod attachment;
pub mod batch;
pub mod cell_value;
pub mod collision;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod operations;
pub mod output;
pub mod preview;
pub mod sequence;
pub mod template;
pub mod undo;

pub use attachment::{Attachment, RecordData, RecordSnapshot, RecordUpdate};
pub use batch::{BatchProcessor, Progress, RecordStore, RunOutcome, RunReport, BATCH_SIZE};
pub use cell_value::{build_field_values, stringify_cell, FieldValueMap};
pub use collision::ensure_unique;
pub use config::Config;
pub use diff::{diff, DiffParts};
pub use engine::{
    rename_attachments, reorder, split_file_name, AppendPosition, RenameConfig, RenameMode,
    RenameOutcome,
};
pub use error::StoreError;
pub use operations::{apply_operation, plan_operation, reorder_operation, undo_operation};
pub use output::{
    ApplyResult, OutputFormat, OutputFormatter, PlanResult, ReorderResult, UndoResult,
};
pub use preview::{build_plan, PreviewGeneration, RenamePlan, RenamePlanItem, PREVIEW_LIMIT};
pub use sequence::sequence_for;
pub use template::{render, SEQ_TOKEN, SEQ_VAR};
pub use undo::{restore_snapshot, UndoSnapshot, UndoStack, UNDO_DEPTH};
