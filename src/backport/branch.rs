//! Feature branch naming

use crate::backport::reference::short_reference;
use crate::types::Commit;

/// Maximum length of the references segment of a feature branch name
pub const MAX_REFERENCES_LEN: usize = 200;

/// Derive the feature branch name for backporting `commits` onto `base_branch`.
///
/// The name is `backport/<base>/<refs>` where `<refs>` is the commits' short
/// references joined with `_` and cut to [`MAX_REFERENCES_LEN`] characters.
/// Two commit sets whose joined references share the first 200 characters
/// map to the same name; no attempt is made to detect that.
pub fn feature_branch_name(base_branch: &str, commits: &[Commit]) -> String {
    let references: String = commits
        .iter()
        .map(short_reference)
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(MAX_REFERENCES_LEN)
        .collect();

    format!("backport/{base_branch}/{references}")
}
