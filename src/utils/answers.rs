use std::collections::HashSet;

use crate::models::assessment::{Answer, AnswerValue, Question, QuestionType, Section};
use crate::utils::visibility::{answer_map, evaluate};

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerIssue {
    pub question_id: String,
    pub message: String,
}

impl AnswerIssue {
    fn new(question_id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: question_id.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AnswerIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.question_id, self.message)
    }
}

/// Checks a submission against the form and returns the answers worth
/// storing, in document order.
///
/// Answers to questions hidden by their gate are dropped rather than
/// rejected. Numeric answers sent as text are normalised to numbers.
pub fn check_submission(
    sections: &[Section],
    answers: &[Answer],
) -> Result<Vec<Answer>, Vec<AnswerIssue>> {
    let mut issues = Vec::new();

    let known: HashSet<&str> = sections
        .iter()
        .flat_map(|s| s.questions.iter())
        .map(|q| q.id.as_str())
        .collect();
    for answer in answers {
        if !known.contains(answer.question_id.as_str()) {
            issues.push(AnswerIssue::new(&answer.question_id, "unknown question"));
        }
    }

    let visibility = evaluate(sections, answers);
    let given = answer_map(answers);
    let mut kept = Vec::new();

    for question in sections.iter().flat_map(|s| s.questions.iter()) {
        if !visibility.shows(&question.id) {
            continue;
        }
        match given.get(question.id.as_str()).filter(|value| !value.is_blank()) {
            None if question.required => {
                issues.push(AnswerIssue::new(&question.id, "answer is required"));
            }
            None => {}
            Some(value) => match check_value(question, value) {
                Ok(value) => kept.push(Answer {
                    question_id: question.id.clone(),
                    value: Some(value),
                }),
                Err(message) => issues.push(AnswerIssue::new(&question.id, message)),
            },
        }
    }

    if issues.is_empty() {
        Ok(kept)
    } else {
        Err(issues)
    }
}

fn check_value(question: &Question, value: &AnswerValue) -> Result<AnswerValue, String> {
    let options = question.options.as_deref().unwrap_or_default();
    match (question.question_type, value) {
        (QuestionType::SingleChoice, AnswerValue::Text(choice)) => {
            if options.contains(choice) {
                Ok(value.clone())
            } else {
                Err(format!("'{}' is not one of the options", choice))
            }
        }
        (QuestionType::MultiChoice, AnswerValue::Choices(choices)) => {
            match choices.iter().find(|choice| !options.contains(choice)) {
                Some(bad) => Err(format!("'{}' is not one of the options", bad)),
                None => Ok(value.clone()),
            }
        }
        (QuestionType::ShortText | QuestionType::LongText, AnswerValue::Text(text)) => {
            let len = text.chars().count();
            match question.max_length {
                Some(max) if len > max => {
                    Err(format!("answer is {} characters, limit is {}", len, max))
                }
                _ => Ok(value.clone()),
            }
        }
        (QuestionType::Numeric, AnswerValue::Number(n)) => check_range(question, *n),
        (QuestionType::Numeric, AnswerValue::Text(raw)) => match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => check_range(question, n),
            _ => Err(format!("'{}' is not a number", raw)),
        },
        (QuestionType::FileUpload, AnswerValue::Text(_)) => Ok(value.clone()),
        (question_type, _) => Err(format!(
            "answer shape does not fit a {} question",
            type_label(question_type)
        )),
    }
}

fn check_range(question: &Question, n: f64) -> Result<AnswerValue, String> {
    if let Some(min) = question.min_value {
        if n < min {
            return Err(format!("{} is below the minimum of {}", n, min));
        }
    }
    if let Some(max) = question.max_value {
        if n > max {
            return Err(format!("{} is above the maximum of {}", n, max));
        }
    }
    Ok(AnswerValue::Number(n))
}

fn type_label(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::SingleChoice => "single-choice",
        QuestionType::MultiChoice => "multi-choice",
        QuestionType::ShortText => "short-text",
        QuestionType::LongText => "long-text",
        QuestionType::Numeric => "numeric",
        QuestionType::FileUpload => "file-upload",
    }
}
