//! A single sitting of a multiple-choice quiz.
//!
//! The session collects one answer per question and scores them locally once
//! every question is answered. A score of at least half the questions passes
//! and fires the caller's completion callback; a perfect score also fires a
//! confetti burst. After submission the answers are locked until [`retry`].
//!
//! [`retry`]: QuizSession::retry

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::QuizError;
use crate::model::quiz_question::QuizQuestion;
use crate::notify::Notifier;

pub const INCOMPLETE_MESSAGE: &str = "Please answer all questions!";
pub const PERFECT_MESSAGE: &str = "Perfect! All correct!";
pub const PASSED_MESSAGE: &str = "Quiz passed!";
pub const FAILED_MESSAGE: &str = "Not quite there. Try again.";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Confetti {
    pub particle_count: u32,
    pub spread: u32,
    pub origin_y: f32,
}

pub const PERFECT_SCORE_CONFETTI: Confetti = Confetti {
    particle_count: 100,
    spread: 70,
    origin_y: 0.6,
};

/// Visual effect played on a perfect score.
pub trait Celebration {
    fn celebrate(&mut self, burst: Confetti);
}

/// Remembers the last burst instead of drawing it.
impl Celebration for Option<Confetti> {
    fn celebrate(&mut self, burst: Confetti) {
        *self = Some(burst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizOutcome {
    Perfect,
    Passed,
    Failed,
}

impl QuizOutcome {
    pub fn classify(score: usize, total: usize) -> Self {
        if score == total {
            QuizOutcome::Perfect
        } else if passes(score, total) {
            QuizOutcome::Passed
        } else {
            QuizOutcome::Failed
        }
    }

    /// Whether the result counts towards completing the lesson.
    pub fn qualifies(self) -> bool {
        !matches!(self, QuizOutcome::Failed)
    }
}

/// `score >= total / 2`, kept in integers.
fn passes(score: usize, total: usize) -> bool {
    score * 2 >= total
}

/// How an option should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionState {
    /// Not chosen, answers still open.
    Idle,
    /// Chosen, answers still open.
    Selected,
    /// The right answer, after submission.
    Correct,
    /// Chosen and wrong, after submission.
    Incorrect,
    /// Neither chosen nor right, after submission.
    Unselected,
}

pub struct QuizSession<F> {
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<usize>>,
    submitted: bool,
    score: usize,
    on_complete: F,
}

impl<F: FnMut()> QuizSession<F> {
    /// Starts an unanswered session. `on_complete` runs once for every
    /// submission that passes.
    pub fn new(questions: Vec<QuizQuestion>, on_complete: F) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }

        if let Some(q) = questions
            .iter()
            .find(|q| q.correct_index >= q.options.len())
        {
            return Err(QuizError::InvalidQuestion {
                id: q.id.clone(),
                correct_index: q.correct_index,
            });
        }

        Ok(Self {
            answers: vec![None; questions.len()],
            questions,
            submitted: false,
            score: 0,
            on_complete,
        })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Zero until a submission succeeds.
    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn outcome(&self) -> Option<QuizOutcome> {
        self.submitted
            .then(|| QuizOutcome::classify(self.score, self.total()))
    }

    /// Picks `option` for `question`, replacing any earlier pick.
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        if self.submitted {
            return Err(QuizError::Locked);
        }

        let Some(q) = self.questions.get(question) else {
            return Err(QuizError::QuestionOutOfRange(question));
        };

        if option >= q.options.len() {
            return Err(QuizError::OptionOutOfRange { question, option });
        }

        self.answers[question] = Some(option);
        Ok(())
    }

    /// Scores the answers.
    ///
    /// With any question unanswered this only warns through `notifier` and
    /// leaves the session as it was.
    pub fn submit(
        &mut self,
        notifier: &mut impl Notifier,
        celebration: &mut impl Celebration,
    ) -> Result<QuizOutcome, QuizError> {
        if self.submitted {
            return Err(QuizError::Locked);
        }

        let unanswered = self.answers.iter().filter(|a| a.is_none()).count();
        if unanswered > 0 {
            warn!("Quiz submitted with {unanswered} unanswered question(s)");
            notifier.error(INCOMPLETE_MESSAGE);
            return Err(QuizError::Incomplete { unanswered });
        }

        let score = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| a.is_some_and(|a| q.is_correct(a)))
            .count();

        self.score = score;
        self.submitted = true;

        let outcome = QuizOutcome::classify(score, self.total());
        info!("Quiz scored {}/{}: {:?}", score, self.total(), outcome);

        match outcome {
            QuizOutcome::Perfect => {
                celebration.celebrate(PERFECT_SCORE_CONFETTI);
                notifier.success(PERFECT_MESSAGE);
            }
            QuizOutcome::Passed => notifier.success(PASSED_MESSAGE),
            QuizOutcome::Failed => notifier.error(FAILED_MESSAGE),
        }

        if outcome.qualifies() {
            (self.on_complete)();
        }

        Ok(outcome)
    }

    /// Clears every answer and unlocks the session.
    pub fn retry(&mut self) {
        self.answers.fill(None);
        self.submitted = false;
        self.score = 0;
    }

    pub fn option_state(&self, question: usize, option: usize) -> Option<OptionState> {
        let q = self.questions.get(question)?;
        if option >= q.options.len() {
            return None;
        }

        let chosen = self.answers[question] == Some(option);

        let state = match (self.submitted, chosen) {
            (false, true) => OptionState::Selected,
            (false, false) => OptionState::Idle,
            (true, _) if q.is_correct(option) => OptionState::Correct,
            (true, true) => OptionState::Incorrect,
            (true, false) => OptionState::Unselected,
        };

        Some(state)
    }

    /// Every option's state, grouped by question.
    pub fn option_states(&self) -> Vec<Vec<OptionState>> {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                (0..q.options.len())
                    .filter_map(|o| self.option_state(i, o))
                    .collect()
            })
            .collect()
    }
}
