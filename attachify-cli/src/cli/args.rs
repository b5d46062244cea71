use super::types::{ModeArg, OutputFormatArg, PositionArg};
use attachify_core::config::DefaultsConfig;
use attachify_core::RenameConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "attachify",
    version,
    about = "Bulk-rename file attachments stored in table records"
)]
pub struct Cli {
    /// Path to the JSON table file
    #[arg(long, global = true, default_value = "table.json")]
    pub table: PathBuf,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Preview the rename without writing anything
    Plan {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        rule: RuleArgs,

        /// Maximum records to include in the preview
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormatArg::Summary)]
        output: OutputFormatArg,
    },

    /// Apply the rename across the scope
    Apply {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        rule: RuleArgs,

        /// Ask whether to keep the result; answering no restores the
        /// pre-apply attachment lists
        #[arg(long)]
        confirm: bool,

        #[arg(long, value_enum, default_value_t = OutputFormatArg::Summary)]
        output: OutputFormatArg,
    },

    /// Move one attachment to a new position within its record
    Reorder {
        /// Attachment field (display name or field id)
        #[arg(long)]
        field: String,

        /// Record to modify
        #[arg(long)]
        record: String,

        /// Current zero-based index of the attachment
        #[arg(long)]
        from: usize,

        /// Target zero-based index
        #[arg(long)]
        to: usize,

        #[arg(long, value_enum, default_value_t = OutputFormatArg::Summary)]
        output: OutputFormatArg,
    },
}

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Attachment field to rename (display name or field id)
    #[arg(long)]
    pub field: String,

    /// Restrict the scope to these record ids (defaults to every record in
    /// the table)
    #[arg(long, value_delimiter = ',')]
    pub records: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RuleArgs {
    #[arg(long, value_enum, default_value_t = ModeArg::Replace)]
    pub mode: ModeArg,

    /// Replace mode: template for the new base name ({{seq}} and
    /// {{Field Name}} variables)
    #[arg(long, default_value = "")]
    pub template: String,

    /// Append mode: where the inserted text lands
    #[arg(long, value_enum, default_value_t = PositionArg::Append)]
    pub position: PositionArg,

    /// Append mode with --position insert: character offset into the base
    /// name
    #[arg(long, default_value_t = 0)]
    pub insert_index: i64,

    /// Append mode: template rendered before the sequence number
    #[arg(long, default_value = "")]
    pub front: String,

    /// Append mode: template rendered after the sequence number
    #[arg(long, default_value = "")]
    pub back: String,

    /// First sequence value within each record
    #[arg(long)]
    pub seq_start: Option<i64>,

    /// Zero-pad sequence numbers to this many digits
    #[arg(long)]
    pub seq_pad: Option<i64>,
}

impl RuleArgs {
    /// Combine the command line with config-file defaults into the engine's
    /// rule object.
    pub fn to_config(&self, defaults: &DefaultsConfig) -> RenameConfig {
        RenameConfig {
            mode: self.mode.into(),
            template: self.template.clone(),
            position: self.position.into(),
            insert_index: self.insert_index,
            front_template: self.front.clone(),
            back_template: self.back.clone(),
            sequence_start: self.seq_start.unwrap_or(defaults.sequence_start),
            sequence_pad: self.seq_pad.unwrap_or(defaults.sequence_pad),
        }
    }
}
