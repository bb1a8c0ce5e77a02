//! Interactive prompts using dialoguer

use backport::backport::{Prompter, long_reference};
use backport::error::{Error, Result};
use backport::types::Commit;
use dialoguer::{Confirm, MultiSelect, Select};

/// [`Prompter`] reading answers from the terminal
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()
            .map_err(|e| Error::Unexpected(format!("Failed to read confirmation: {e}")))
    }
}

/// Let the operator pick one or more commits
pub fn select_commits(commits: Vec<Commit>, multiple: bool) -> Result<Vec<Commit>> {
    let items: Vec<String> = commits
        .iter()
        .map(|c| format!("{} ({})", c.message, long_reference(c)))
        .collect();

    let indices = pick(&items, "Select commit to backport", multiple)?;
    if indices.is_empty() {
        return Err(Error::InvalidArgument("No commit selected".to_string()));
    }

    // Listed newest first; cherry-pick the oldest first
    let mut selected: Vec<Commit> = commits
        .into_iter()
        .enumerate()
        .filter(|(i, _)| indices.contains(i))
        .map(|(_, c)| c)
        .collect();
    selected.reverse();
    Ok(selected)
}

/// Let the operator pick one or more target branches
pub fn select_branches(branches: &[String], multiple: bool) -> Result<Vec<String>> {
    let indices = pick(branches, "Select branch to backport to", multiple)?;
    if indices.is_empty() {
        return Err(Error::InvalidArgument("No branch selected".to_string()));
    }
    Ok(indices.into_iter().map(|i| branches[i].clone()).collect())
}

fn pick(items: &[String], prompt: &str, multiple: bool) -> Result<Vec<usize>> {
    if multiple {
        MultiSelect::new()
            .with_prompt(format!("{prompt} (space to toggle, enter to confirm)"))
            .items(items)
            .interact()
            .map_err(|e| Error::Unexpected(format!("Failed to read selection: {e}")))
    } else {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map(|i| vec![i])
            .map_err(|e| Error::Unexpected(format!("Failed to read selection: {e}")))
    }
}
