use clap::{Parser, ValueEnum};

/// CLI arguments for the `bt` binary.
#[derive(Parser, Debug)]
#[command(name = "bt", version, about = "Translate a MongoDB shell expression into Python or Java source")]
pub struct CliArgs {
    /// The shell expression to translate. Reads from stdin when omitted.
    pub expression: Option<String>,

    /// Target language to emit.
    #[arg(short = 't', long, value_enum, default_value_t = Target::Python, ignore_case = true)]
    pub target: Target,

    /// Increase log verbosity (pass twice for trace-level output).
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Target {
    Python,
    Java,
}

impl From<Target> for bt_emit::Target {
    fn from(t: Target) -> Self {
        match t {
            Target::Python => bt_emit::Target::Python,
            Target::Java => bt_emit::Target::Java,
        }
    }
}
