pub mod args;
pub mod types;

pub use args::{Cli, Commands, RuleArgs, TargetArgs};
pub use types::{ModeArg, OutputFormatArg, PositionArg};
