//! CLI interface to rename a batch of files via regex search & replace on their names.
//! Files are selected with a filename glob in a single directory (no recursion).

pub mod enumerate;
pub mod error;
pub mod logging;
pub mod rename;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use error::{Error, Result};
use regex::{Regex, RegexBuilder};
use rename::RenameSummary;

/// Token that turns on pretend mode when given as the 4th argument.
pub const PRETEND_TOKEN: &str = "/p";

/// Rename files matching a glob via (Rust flavor) regex search & replace.
///
/// Each matching filename has every case-insensitive match of SEARCH replaced with REPLACE.
/// Files are only renamed if `/p` is *not* given as the last argument.
/// A rename whose target already exists is skipped with a warning; the exit code stays 0.
///
/// clap's own help/version flags are off: any 0/1/2-argument call, `-h` included, gets the usage text.
#[derive(Parser, Debug)]
#[command(name = "rr", about, long_about, disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Directory to rename files in. [default: current directory]
    /// Must come before the positionals.
    #[arg(short = 'C', long = "dir")]
    dir: Option<PathBuf>,

    /// `file-match search replace [/p]`, taken verbatim (a leading `-` is part of the pattern).
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    positionals: Vec<String>,
}

/// Validated invocation, independent of how it was parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationArgs {
    pub file_match: String,
    pub name_search: String,
    pub name_replace: String,
    pub pretend: bool,
    /// `None` means the current working directory.
    pub dir: Option<PathBuf>,
}

impl TryFrom<Args> for InvocationArgs {
    type Error = Error;

    fn try_from(args: Args) -> Result<Self> {
        let count = args.positionals.len();
        let mut positionals = args.positionals.into_iter();
        let (Some(file_match), Some(search), Some(replace), pretend_flag, None) =
            (positionals.next(), positionals.next(), positionals.next(), positionals.next(), positionals.next())
        else {
            return Err(Error::ArgumentCount(count));
        };
        if file_match.is_empty() {
            return Err(Error::EmptyArgument("file-match"));
        }
        if search.is_empty() {
            return Err(Error::EmptyArgument("search"));
        }
        let pretend = match pretend_flag.as_deref() {
            Some(token) if token.eq_ignore_ascii_case(PRETEND_TOKEN) => true,
            Some(token) => {
                tracing::warn!("Ignoring unrecognized argument `{}`; only `{}` enables pretend mode", token, PRETEND_TOKEN);
                false
            }
            None => false,
        };
        Ok(Self { file_match,
                  name_search: search,
                  name_replace: replace,
                  pretend,
                  dir: args.dir })
    }
}

/// Parse a full argv (program name first).  No side effects beyond a warning log.
pub fn parse_args<I, T>(argv: I) -> Result<InvocationArgs>
    where I: IntoIterator<Item = T>,
          T: Into<OsString> + Clone
{
    let args = Args::try_parse_from(argv)?;
    InvocationArgs::try_from(args)
}

/// Usage text printed on argument errors.
pub fn usage() -> String {
    format!("Rename Regex (rr) v{}\n\n\
             Usage: rr [-C <DIR>] file-match search replace [/p]\n        \
             /p: pretend (show what will be renamed)\n\n\
             Replacements use `$1`, `${{1}}` or `${{name}}` to reference capture groups.",
            env!("CARGO_PKG_VERSION"))
}

/// Application code.  (main in lib.rs)
#[tracing::instrument]
pub fn app(args: &InvocationArgs) -> Result<RenameSummary> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let files = enumerate::matching_files(&dir, &args.file_match)?;
    // Guard: nothing to do
    if files.is_empty() {
        return Err(Error::NoMatch);
    }
    let re = build_regex(&args.name_search)?;
    check_for_common_syntax_error(&args.name_replace)?;
    Ok(rename::execute(&files, &re, &args.name_replace, args.pretend))
}

/// Case-insensitive regex from the search argument.
pub fn build_regex(search: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(search).case_insensitive(true).build()?)
}

/// Guard: Flagging unintended syntax
///
/// Checks replacement string for capture references making a common syntax error:
/// A bare reference number followed by name chars (`[_0-9A-Za-z]`) that would be combined with it and read as a name
///
/// e.g. `$1abc` will be parsed as ($1abc) NOT ($1)(abc) -- `${1}abc` is proper syntax
/// `$1.jpg` and `$2-$1` are fine: `.` and `-` end the reference
#[tracing::instrument]
fn check_for_common_syntax_error(rep_arg: &str) -> Result<()> {
    const RE_SYNTAX_WARN: &str = r"(\$\d+)[A-Za-z_][0-9A-Za-z_]*";

    let re_check = Regex::new(RE_SYNTAX_WARN)?;
    // `$$` is an escaped literal dollar, not a reference
    let unescaped = rep_arg.replace("$$", "");
    if let Some(cap) = re_check.captures(&unescaped) {
        tracing::debug!("Ambiguous capture reference in {:?}: {:?}", rep_arg, &cap[0]);
        return Err(Error::AmbiguousReplacement { reference: cap[1].to_string(), read_as: cap[0].to_string() });
    }
    Ok(())
}
