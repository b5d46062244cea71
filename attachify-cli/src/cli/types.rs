use attachify_core::{AppendPosition, OutputFormat, RenameMode};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// The template replaces the base name entirely
    Replace,
    /// Rendered text is spliced into the existing base name
    Append,
}

impl From<ModeArg> for RenameMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Replace => Self::Replace,
            ModeArg::Append => Self::Append,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PositionArg {
    /// Before the base name
    Prepend,
    /// After the base name
    Append,
    /// At --insert-index characters into the base name
    Insert,
}

impl From<PositionArg> for AppendPosition {
    fn from(value: PositionArg) -> Self {
        match value {
            PositionArg::Prepend => Self::Prepend,
            PositionArg::Append => Self::Append,
            PositionArg::Insert => Self::Insert,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Human-readable summary
    Summary,
    /// Machine-readable JSON
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Summary => Self::Summary,
            OutputFormatArg::Json => Self::Json,
        }
    }
}
