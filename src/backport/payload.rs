//! Pull request title, body and refs

use crate::backport::branch::feature_branch_name;
use crate::backport::reference::long_reference;
use crate::types::{BackportRequest, Commit, PullRequestPayload};

/// Maximum length of the joined commit messages substituted into a title
pub const MAX_COMMIT_MESSAGES_LEN: usize = 200;

/// Default title template
pub const DEFAULT_PR_TITLE: &str = "[{baseBranch}] {commitMessages}";

/// Render a title template.
///
/// `{baseBranch}` and `{commitMessages}` are replaced (first occurrence
/// each); any other placeholder is left untouched.
pub fn pr_title(template: &str, base_branch: &str, commits: &[Commit]) -> String {
    let commit_messages: String = commits
        .iter()
        .map(|c| c.message.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
        .chars()
        .take(MAX_COMMIT_MESSAGES_LEN)
        .collect();

    template
        .replacen("{baseBranch}", base_branch, 1)
        .replacen("{commitMessages}", &commit_messages, 1)
}

/// Render the pull request body listing every backported commit
pub fn pr_body(base_branch: &str, commits: &[Commit], description: Option<&str>) -> String {
    let commit_refs = commits
        .iter()
        .map(|commit| {
            let reference = long_reference(commit);
            let message = commit.message.replacen(&format!("({reference})"), "", 1);
            format!(" - {message} ({reference})")
        })
        .collect::<Vec<_>>()
        .join("\n");

    let suffix = description
        .filter(|d| !d.is_empty())
        .map(|d| format!("\n\n{d}"))
        .unwrap_or_default();

    format!("Backports the following commits to {base_branch}:\n{commit_refs}{suffix}")
}

/// Build the payload for the pull request of one backport request
pub fn build_payload(request: &BackportRequest) -> PullRequestPayload {
    let feature_branch = feature_branch_name(&request.base_branch, &request.commits);

    PullRequestPayload {
        title: pr_title(&request.pr_title, &request.base_branch, &request.commits),
        body: pr_body(
            &request.base_branch,
            &request.commits,
            request.pr_description.as_deref(),
        ),
        head: format!("{}:{feature_branch}", request.username),
        base: request.base_branch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(commits: Vec<Commit>) -> BackportRequest {
        BackportRequest {
            owner: "elastic".to_string(),
            repo_name: "kibana".to_string(),
            commits,
            base_branch: "7.x".to_string(),
            username: "alice".to_string(),
            labels: vec![],
            pr_title: DEFAULT_PR_TITLE.to_string(),
            pr_description: None,
        }
    }

    #[test]
    fn test_title_substitutes_base_branch() {
        assert_eq!(pr_title("Backport {baseBranch}", "7.x", &[]), "Backport 7.x");
    }

    #[test]
    fn test_title_leaves_unknown_placeholder() {
        assert_eq!(
            pr_title("{foo} to {baseBranch}", "7.x", &[]),
            "{foo} to 7.x"
        );
    }

    #[test]
    fn test_title_joins_commit_messages() {
        let commits = vec![
            Commit::new("a", "First", None),
            Commit::new("b", "Second", None),
        ];
        assert_eq!(
            pr_title(DEFAULT_PR_TITLE, "6.x", &commits),
            "[6.x] First | Second"
        );
    }

    #[test]
    fn test_title_truncates_commit_messages() {
        let long = "x".repeat(150);
        let commits = vec![Commit::new("a", &long, None), Commit::new("b", &long, None)];
        let title = pr_title("{commitMessages}", "6.x", &commits);
        assert_eq!(title.chars().count(), MAX_COMMIT_MESSAGES_LEN);
    }

    #[test]
    fn test_body_strips_own_reference() {
        let commits = vec![Commit::new("abc1234ffff", "Fix bug (#42)", Some(42))];
        let body = pr_body("7.x", &commits, None);
        assert_eq!(body, "Backports the following commits to 7.x:\n - Fix bug  (#42)");
    }

    #[test]
    fn test_body_appends_description() {
        let commits = vec![Commit::new("abc1234ffff", "Fix bug", None)];
        let body = pr_body("7.x", &commits, Some("Please review"));
        assert!(body.ends_with(" - Fix bug (abc1234)\n\nPlease review"));
    }

    #[test]
    fn test_payload_head_and_base() {
        let payload = build_payload(&request(vec![Commit::new(
            "abc1234ffff",
            "Fix bug (#42)",
            Some(42),
        )]));
        assert_eq!(payload.head, "alice:backport/7.x/pr-42");
        assert_eq!(payload.base, "7.x");
        assert_eq!(payload.title, "[7.x] Fix bug (#42)");
    }

    #[test]
    fn test_payload_is_deterministic() {
        let req = request(vec![
            Commit::new("abc1234ffff", "Fix bug (#42)", Some(42)),
            Commit::new("def5678aaaa", "Tweak docs", None),
        ]);
        assert_eq!(build_payload(&req), build_payload(&req));
    }

    #[test]
    fn test_body_snapshot() {
        let req = BackportRequest {
            pr_description: Some("Closes #7".to_string()),
            ..request(vec![
                Commit::new("abc1234ffff", "Fix bug (#42)", Some(42)),
                Commit::new("def5678aaaa", "Tweak docs", None),
            ])
        };
        insta::assert_snapshot!(build_payload(&req).body, @r"
        Backports the following commits to 7.x:
         - Fix bug  (#42)
         - Tweak docs (def5678)

        Closes #7
        ");
    }
}
