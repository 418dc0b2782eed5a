//! Error handling for rename_regex

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Unparseable command line (e.g. `--dir` without a value).
    #[error("{0}")]
    Usage(#[from] clap::Error),

    #[error("expected 3 or 4 arguments, got {0}")]
    ArgumentCount(usize),

    #[error("`{0}` argument must not be empty")]
    EmptyArgument(&'static str),

    /// Glob matched nothing in the target directory.
    #[error("No files match!")]
    NoMatch,

    #[error("invalid search regex: {0}")]
    Regex(#[from] regex::Error),

    /// e.g. `$1abc` is read as the group named `1abc`, not `$1` followed by `abc`
    #[error("capture reference `{reference}` is being read as `{read_as}`; use `${{_}}` syntax (e.g. `${{1}}abc`) if that is not intended")]
    AmbiguousReplacement { reference: String, read_as: String },

    #[error("invalid file-match glob: {0}")]
    Glob(#[from] globset::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Errors that should be answered with the usage text.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_) | Error::ArgumentCount(_) | Error::EmptyArgument(_))
    }
}
