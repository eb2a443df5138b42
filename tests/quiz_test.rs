use classroom::error::QuizError;
use classroom::model::quiz_question::QuizQuestion;
use classroom::notify::{Notification, NotificationLog};
use classroom::quiz::{Confetti, QuizOutcome, QuizSession};

fn quiz(correct: &[usize]) -> Vec<QuizQuestion> {
    correct
        .iter()
        .enumerate()
        .map(|(i, &c)| QuizQuestion::new(format!("q{i}"), format!("Question {i}?"), ["A", "B", "C", "D"], c))
        .collect()
}

/// Every answer set over four options for three questions.
fn all_answer_sets() -> Vec<[usize; 3]> {
    let mut sets = Vec::new();
    for a in 0..4 {
        for b in 0..4 {
            for c in 0..4 {
                sets.push([a, b, c]);
            }
        }
    }
    sets
}

#[test]
fn scores_and_completion_over_every_answer_set() {
    let correct = [1, 3, 0];

    for answers in all_answer_sets() {
        let expected = answers.iter().zip(&correct).filter(|(a, c)| a == c).count();

        let mut completions = 0;
        let mut session = QuizSession::new(quiz(&correct), || completions += 1).unwrap();
        for (q, &o) in answers.iter().enumerate() {
            session.select(q, o).unwrap();
        }

        let mut log = NotificationLog::default();
        let mut confetti: Option<Confetti> = None;
        let outcome = session.submit(&mut log, &mut confetti).unwrap();

        assert_eq!(session.score(), expected, "answers {answers:?}");
        assert_eq!(confetti.is_some(), expected == 3, "answers {answers:?}");
        assert_eq!(log.entries().len(), 1);
        match outcome {
            QuizOutcome::Perfect | QuizOutcome::Passed => {
                assert!(matches!(log.entries()[0], Notification::Success(_)))
            }
            QuizOutcome::Failed => assert!(matches!(log.entries()[0], Notification::Error(_))),
        }

        drop(session);
        // ceil(3 / 2) == 2
        assert_eq!(completions, usize::from(expected >= 2), "answers {answers:?}");
    }
}

#[test]
fn any_unanswered_question_blocks_submission() {
    let correct = [0, 0, 0];

    // every non-full subset of answered questions
    for mask in 0..0b111 {
        let mut completions = 0;
        let mut session = QuizSession::new(quiz(&correct), || completions += 1).unwrap();
        for q in 0..3 {
            if mask & (1 << q) != 0 {
                session.select(q, 0).unwrap();
            }
        }

        let result = session.submit(&mut NotificationLog::default(), &mut None::<Confetti>);

        assert!(matches!(result, Err(QuizError::Incomplete { .. })));
        assert!(!session.is_submitted());
        drop(session);
        assert_eq!(completions, 0);
    }
}

#[test]
fn retry_allows_a_second_attempt() {
    let mut completions = 0;
    let mut session = QuizSession::new(quiz(&[2, 2]), || completions += 1).unwrap();

    session.select(0, 0).unwrap();
    session.select(1, 0).unwrap();
    let first = session
        .submit(&mut NotificationLog::default(), &mut None::<Confetti>)
        .unwrap();
    assert_eq!(first, QuizOutcome::Failed);

    session.retry();
    assert_eq!(session.answers(), &[None, None]);

    session.select(0, 2).unwrap();
    session.select(1, 2).unwrap();
    let second = session
        .submit(&mut NotificationLog::default(), &mut None::<Confetti>)
        .unwrap();
    assert_eq!(second, QuizOutcome::Perfect);

    drop(session);
    assert_eq!(completions, 1);
}
