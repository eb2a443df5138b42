//! Synchronous yes/no confirmation, asked before destructive actions.

pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}

/// Answers every question the same way. Used when the answer was collected
/// up front, e.g. as a request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}
