//! Rename execution: compute each new name, report it, and (unless pretending) move the file.

use std::borrow::Cow;
use std::io;
use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use regex::Regex;

use crate::enumerate::FileEntry;

/// Before/after names for a single file whose name changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan<'a> {
    pub before: &'a str,
    pub after: Cow<'a, str>,
}

/// Tally of one batch.  `failed` does not affect the exit code.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenameSummary {
    pub renamed: u64,
    pub pretended: u64,
    pub unchanged: u64,
    pub failed: u64,
}

/// Replace every match of `re` in `file_name`.  `None` when the name would not change.
pub fn plan_rename<'a>(re: &Regex, replacement: &str, file_name: &'a str) -> Option<RenamePlan<'a>> {
    let after = re.replace_all(file_name, replacement);
    if after == file_name {
        return None;
    }
    Some(RenamePlan { before: file_name, after })
}

/// Process every file independently; a failure on one never stops the rest.
#[tracing::instrument(skip(files))]
pub fn execute(files: &[FileEntry], re: &Regex, replacement: &str, pretend: bool) -> RenameSummary {
    let mut summary = RenameSummary::default();

    for file in files {
        // Guard: no change
        let Some(plan) = plan_rename(re, replacement, &file.file_name) else {
            tracing::trace!("Name unchanged: {:?}", file.file_name);
            summary.unchanged += 1;
            continue;
        };
        print_change(&plan, pretend);
        // Guard: pretend
        if pretend {
            summary.pretended += 1;
            continue;
        }
        match move_file(&file.directory, &plan) {
            Ok(()) => summary.renamed += 1,
            Err(e) => {
                tracing::debug!("Move of {:?} failed: {}", file.full_path, e);
                println!("{} Could not move {} to {}",
                         "WARNING:".if_supports_color(Stream::Stdout, |t| t.yellow()),
                         plan.before,
                         plan.after);
                summary.failed += 1;
            }
        }
    }
    tracing::info!(?summary, "batch complete");
    summary
}

fn print_change(plan: &RenamePlan, pretend: bool) {
    println!("{} -> {}{}",
             plan.before.if_supports_color(Stream::Stdout, |t| t.green()),
             plan.after.if_supports_color(Stream::Stdout, |t| t.cyan()),
             if pretend { " (pretend)" } else { "" });
}

/// Move `dir/before` to `dir/after`, refusing to overwrite an existing file.
pub fn move_file(dir: &Path, plan: &RenamePlan) -> io::Result<()> {
    let after: &str = plan.after.as_ref();
    if after.is_empty() || after.contains(std::path::is_separator) {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("`{after}` is not a plain file name")));
    }
    let from = dir.join(plan.before);
    let to = dir.join(after);
    if to.symlink_metadata().is_ok() && !same_file(&from, &to) {
        return Err(io::Error::new(io::ErrorKind::AlreadyExists, format!("{} already exists", to.display())));
    }
    std::fs::rename(&from, &to)
}

/// Case-only renames on case-insensitive filesystems see the target as already present.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (a.metadata(), b.metadata()) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.file_name().and_then(|n| n.to_str()), b.file_name().and_then(|n| n.to_str())) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use predicates::prelude::*;
    use regex::RegexBuilder;
    use test_log::test;

    use super::*;
    use crate::enumerate::matching_files;

    fn re(search: &str) -> Regex {
        RegexBuilder::new(search).case_insensitive(true).build().unwrap()
    }

    #[test]
    fn plan_is_case_insensitive() {
        let plan = plan_rename(&re("PHOTO"), "image", "photo1.JPG").unwrap();
        assert_eq!(plan.before, "photo1.JPG");
        assert_eq!(plan.after, "image1.JPG");
    }

    #[test]
    fn plan_resolves_capture_groups() {
        let plan = plan_rename(&re(r"^(\w+)-(\d+)"), "${2}_$1", "track-07.mp3").unwrap();
        assert_eq!(plan.after, "07_track.mp3");

        let plan = plan_rename(&re(r"(?P<stem>.+)\.jpeg$"), "$stem.jpg", "cat.jpeg").unwrap();
        assert_eq!(plan.after, "cat.jpg");
    }

    #[test]
    fn plan_replaces_every_match() {
        let plan = plan_rename(&re(" "), "_", "my holiday photo.png").unwrap();
        assert_eq!(plan.after, "my_holiday_photo.png");
    }

    #[test]
    fn no_op_transform_has_no_plan() {
        assert_eq!(plan_rename(&re("zzz"), "yyy", "photo1.JPG"), None);
        // matches, but the replacement reproduces the original text
        assert_eq!(plan_rename(&re("(photo)"), "$1", "photo1.JPG"), None);
    }

    #[test]
    fn execute_renames_and_counts() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("photo1.JPG").touch().unwrap();
        dir.child("photo2.JPG").touch().unwrap();
        dir.child("other.JPG").touch().unwrap();

        let files = matching_files(dir.path(), "*.JPG").unwrap();
        let summary = execute(&files, &re("photo"), "image", false);

        assert_eq!(summary, RenameSummary { renamed: 2, pretended: 0, unchanged: 1, failed: 0 });
        dir.child("image1.JPG").assert(predicate::path::exists());
        dir.child("image2.JPG").assert(predicate::path::exists());
        dir.child("photo1.JPG").assert(predicate::path::missing());
        dir.child("other.JPG").assert(predicate::path::exists());
    }

    #[test]
    fn execute_pretend_leaves_files_alone() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("photo1.JPG").touch().unwrap();

        let files = matching_files(dir.path(), "*.JPG").unwrap();
        let summary = execute(&files, &re("photo"), "image", true);

        assert_eq!(summary, RenameSummary { renamed: 0, pretended: 1, unchanged: 0, failed: 0 });
        dir.child("photo1.JPG").assert(predicate::path::exists());
        dir.child("image1.JPG").assert(predicate::path::missing());
    }

    #[test]
    fn existing_target_fails_without_stopping_batch() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("photo1.JPG").write_str("source").unwrap();
        dir.child("image1.JPG").write_str("already here").unwrap();
        dir.child("photo2.JPG").touch().unwrap();

        let files = matching_files(dir.path(), "photo*").unwrap();
        let summary = execute(&files, &re("photo"), "image", false);

        assert_eq!(summary, RenameSummary { renamed: 1, pretended: 0, unchanged: 0, failed: 1 });
        dir.child("photo1.JPG").assert("source");
        dir.child("image1.JPG").assert("already here");
        dir.child("image2.JPG").assert(predicate::path::exists());
    }

    #[test]
    fn move_rejects_separators_in_new_name() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("a_b.txt").touch().unwrap();

        let plan = plan_rename(&re("_"), "/", "a_b.txt").unwrap();
        let err = move_file(dir.path(), &plan).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        dir.child("a_b.txt").assert(predicate::path::exists());
    }

    #[test]
    fn move_allows_case_only_rename() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("readme.md").touch().unwrap();

        let plan = plan_rename(&re("readme"), "README", "readme.md").unwrap();
        move_file(dir.path(), &plan).unwrap();
        dir.child("README.md").assert(predicate::path::exists());
    }
}
