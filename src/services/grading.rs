use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{Question, QuestionType, Test};

/// A learner's answers for one test, keyed by question id. Ephemeral: built
/// from the submit request, consumed by `grade`, never persisted.
#[derive(Clone, Debug)]
pub struct Submission {
    pub test_id: String,
    pub user_id: String,
    pub answers: HashMap<String, Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionGrade {
    pub question_id: String,
    pub earned: i16,
    pub possible: i16,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GradeReport {
    pub score: i16,
    pub max_score: i16,
    pub is_passed: bool,
    pub per_question: Vec<QuestionGrade>,
}

/// Grade a submission against a test. Pure and synchronous: no I/O happens
/// here, and a validation failure returns before any question is scored.
pub fn grade(test: &Test, submission: &Submission) -> AppResult<GradeReport> {
    if submission.test_id != test.id {
        return Err(AppError::ValidationError(format!(
            "Submission targets test '{}' but was graded against test '{}'",
            submission.test_id, test.id
        )));
    }

    let missing: Vec<&str> = test
        .questions
        .iter()
        .filter(|q| !submission.answers.contains_key(&q.id))
        .map(|q| q.id.as_str())
        .collect();

    if !missing.is_empty() {
        return Err(AppError::ValidationError(format!(
            "Submission is missing answers for question(s): {}",
            missing.join(", ")
        )));
    }

    let mut questions: Vec<&Question> = test.questions.iter().collect();
    questions.sort_by_key(|q| q.question_order);

    let mut score: i16 = 0;
    let mut max_score: i16 = 0;
    let mut per_question = Vec::with_capacity(questions.len());

    for question in questions {
        let submitted = submission
            .answers
            .get(&question.id)
            .map(|a| a.as_slice())
            .unwrap_or_default();

        let is_correct = is_answer_correct(question, submitted);
        let earned = if is_correct { question.points } else { 0 };

        score += earned;
        max_score += question.points;

        per_question.push(QuestionGrade {
            question_id: question.id.clone(),
            earned,
            possible: question.points,
            is_correct,
        });
    }

    // Exact integer compare keeps the threshold inclusive: score/max >= pct/100
    // becomes score * 100 >= pct * max with no float rounding. A test with no
    // points can never be passed.
    let is_passed = max_score > 0
        && (score as i32) * 100 >= (test.min_pass_percentage as i32) * (max_score as i32);

    Ok(GradeReport {
        score,
        max_score,
        is_passed,
        per_question,
    })
}

/// Per-type answer equivalence. All comparisons are verbatim string equality
/// against the stored option or reference text: case-sensitive, no trimming.
fn is_answer_correct(question: &Question, submitted: &[String]) -> bool {
    match question.question_type {
        QuestionType::SingleChoice | QuestionType::Boolean | QuestionType::TextMatch => {
            submitted.len() == 1
                && question
                    .correct_answers
                    .first()
                    .is_some_and(|correct| &submitted[0] == correct)
        }
        QuestionType::MultipleChoice => {
            // Duplicates collapse and order is irrelevant; the distinct
            // submitted values must equal the answer key exactly. No partial
            // credit.
            let submitted_set: BTreeSet<&str> = submitted.iter().map(String::as_str).collect();
            let correct_set: BTreeSet<&str> = question
                .correct_answers
                .iter()
                .map(String::as_str)
                .collect();
            !correct_set.is_empty() && submitted_set == correct_set
        }
    }
}
