//! Operator interaction

use crate::error::Result;

/// Blocking yes/no questions answered by the human running the backport
pub trait Prompter: Send + Sync {
    /// Ask the operator to confirm; `false` means they declined
    fn confirm(&self, prompt: &str) -> Result<bool>;
}
