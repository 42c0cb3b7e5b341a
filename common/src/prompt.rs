/// Seam between the pipeline and the operator's terminal, so the pipeline
/// itself stays non-interactive and testable.
pub trait OperatorPrompt {
    /// Ask whether to continue past a soft warning. Implementations are
    /// expected to default to `true` after a bounded wait.
    fn confirm_continue(&self, question: &str) -> bool;
}

/// Prompt that always continues, used wherever no operator is present.
pub struct AlwaysContinue;

impl OperatorPrompt for AlwaysContinue {
    fn confirm_continue(&self, _question: &str) -> bool {
        true
    }
}
