//! Human-readable commit references

use crate::types::Commit;

/// Length of an abbreviated commit hash
pub const SHORT_SHA_LEN: usize = 7;

/// First seven characters of a commit hash
pub fn short_sha(sha: &str) -> &str {
    sha.char_indices()
        .nth(SHORT_SHA_LEN)
        .map_or(sha, |(idx, _)| &sha[..idx])
}

/// `#<pull number>` when the originating PR is known, else the short sha.
///
/// Used in status lines and pull request bodies.
pub fn long_reference(commit: &Commit) -> String {
    commit
        .pull_number
        .map_or_else(|| short_sha(&commit.sha).to_string(), |n| format!("#{n}"))
}

/// `pr-<pull number>` or `commit-<short sha>`.
///
/// Safe to embed in a ref name: never contains `#`.
pub fn short_reference(commit: &Commit) -> String {
    commit.pull_number.map_or_else(
        || format!("commit-{}", short_sha(&commit.sha)),
        |n| format!("pr-{n}"),
    )
}
