use std::collections::HashMap;

use crate::models::assessment::{Answer, AnswerValue, Question, Section};

/// Visible question and section ids, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    pub questions: Vec<String>,
    pub sections: Vec<String>,
}

impl Visibility {
    pub fn shows(&self, question_id: &str) -> bool {
        self.questions.iter().any(|id| id == question_id)
    }
}

/// Answers keyed by question id. A later answer for the same question
/// replaces an earlier one and a null value counts as unanswered.
pub fn answer_map(answers: &[Answer]) -> HashMap<&str, &AnswerValue> {
    let mut map = HashMap::new();
    for answer in answers {
        match &answer.value {
            Some(value) => {
                map.insert(answer.question_id.as_str(), value);
            }
            None => {
                map.remove(answer.question_id.as_str());
            }
        }
    }
    map
}

/// Decides visibility for one question given the answers that count.
///
/// The gate is exact, case-sensitive string equality; lists and numbers
/// never satisfy it.
pub fn is_visible(question: &Question, answers: &HashMap<&str, &AnswerValue>) -> bool {
    let Some(gate) = question.conditional_on.as_deref().filter(|gate| !gate.trim().is_empty()) else {
        return true;
    };
    let Some(expected) = question.conditional_value.as_deref() else {
        return false;
    };
    answers
        .get(gate)
        .and_then(|value| value.as_text())
        .is_some_and(|given| given == expected)
}

/// Evaluates every question from scratch against the recorded `answers`.
///
/// Each gate reads the recorded answer of the question it references,
/// whether or not that question is itself shown. A section is hidden only
/// when it has questions and none of them is visible.
pub fn evaluate(sections: &[Section], answers: &[Answer]) -> Visibility {
    let recorded = answer_map(answers);
    let mut hidden = 0usize;
    let mut visibility = Visibility::default();

    for section in sections {
        let mut shown_in_section = 0usize;
        for question in &section.questions {
            if is_visible(question, &recorded) {
                shown_in_section += 1;
                visibility.questions.push(question.id.clone());
            } else {
                hidden += 1;
            }
        }
        if section.questions.is_empty() || shown_in_section > 0 {
            visibility.sections.push(section.id.clone());
        }
    }

    tracing::trace!(
        visible = visibility.questions.len(),
        hidden,
        "evaluated question visibility"
    );
    visibility
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::QuestionType;

    fn question(id: &str, gate: Option<(&str, &str)>) -> Question {
        Question {
            id: id.to_string(),
            question_type: QuestionType::SingleChoice,
            text: format!("Question {id}"),
            description: None,
            required: false,
            options: Some(vec!["Yes".into(), "No".into()]),
            min_value: None,
            max_value: None,
            max_length: None,
            conditional_on: gate.map(|(on, _)| on.to_string()),
            conditional_value: gate.map(|(_, value)| value.to_string()),
        }
    }

    fn section(id: &str, questions: Vec<Question>) -> Section {
        Section {
            id: id.to_string(),
            title: id.to_string(),
            description: None,
            questions,
        }
    }

    fn text(question_id: &str, value: &str) -> Answer {
        Answer {
            question_id: question_id.to_string(),
            value: Some(AnswerValue::Text(value.to_string())),
        }
    }

    #[test]
    fn unconditional_questions_always_show() {
        let sections = vec![section("s1", vec![question("q1", None)])];
        assert!(evaluate(&sections, &[]).shows("q1"));
    }

    #[test]
    fn gate_requires_exact_match() {
        let sections = vec![section(
            "s1",
            vec![question("q1", None), question("q2", Some(("q1", "Yes")))],
        )];

        assert!(!evaluate(&sections, &[]).shows("q2"));
        assert!(evaluate(&sections, &[text("q1", "Yes")]).shows("q2"));
        assert!(!evaluate(&sections, &[text("q1", "yes")]).shows("q2"));
        assert!(!evaluate(&sections, &[text("q1", "Yes please")]).shows("q2"));
    }

    #[test]
    fn changing_the_answer_hides_again() {
        let sections = vec![section(
            "s1",
            vec![question("q1", None), question("q2", Some(("q1", "Yes")))],
        )];
        let mut answers = vec![text("q1", "Yes")];
        assert!(evaluate(&sections, &answers).shows("q2"));

        answers[0] = text("q1", "No");
        assert!(!evaluate(&sections, &answers).shows("q2"));
    }

    #[test]
    fn non_text_answers_never_open_a_gate() {
        let sections = vec![section(
            "s1",
            vec![question("q1", None), question("q2", Some(("q1", "3")))],
        )];
        let number = Answer {
            question_id: "q1".into(),
            value: Some(AnswerValue::Number(3.0)),
        };
        let list = Answer {
            question_id: "q1".into(),
            value: Some(AnswerValue::Choices(vec!["3".into()])),
        };
        assert!(!evaluate(&sections, &[number]).shows("q2"));
        assert!(!evaluate(&sections, &[list]).shows("q2"));
    }

    #[test]
    fn gates_read_recorded_answers_even_of_hidden_questions() {
        let sections = vec![section(
            "s1",
            vec![
                question("q1", None),
                question("q2", Some(("q1", "Yes"))),
                question("q3", Some(("q2", "Yes"))),
            ],
        )];
        let recorded = [text("q1", "No"), text("q2", "Yes")];
        let visibility = evaluate(&sections, &recorded);
        assert_eq!(visibility.questions, vec!["q1".to_string(), "q3".to_string()]);

        let visibility = evaluate(&sections, &[text("q1", "No"), text("q2", "No")]);
        assert_eq!(visibility.questions, vec!["q1".to_string()]);
    }

    #[test]
    fn empty_gate_reference_is_unconditional() {
        let mut follow = question("q2", None);
        follow.conditional_on = Some(String::new());
        let sections = vec![section("s1", vec![question("q1", None), follow])];
        assert!(evaluate(&sections, &[]).shows("q2"));
    }

    #[test]
    fn section_with_only_hidden_questions_is_hidden() {
        let sections = vec![
            section("s1", vec![question("q1", None)]),
            section("s2", vec![question("q2", Some(("q1", "Yes")))]),
            section("s3", vec![]),
        ];
        let visibility = evaluate(&sections, &[text("q1", "No")]);
        assert_eq!(visibility.sections, vec!["s1".to_string(), "s3".to_string()]);

        let visibility = evaluate(&sections, &[text("q1", "Yes")]);
        assert_eq!(visibility.sections.len(), 3);
    }

    #[test]
    fn null_answer_clears_an_earlier_one() {
        let sections = vec![section(
            "s1",
            vec![question("q1", None), question("q2", Some(("q1", "Yes")))],
        )];
        let cleared = Answer {
            question_id: "q1".into(),
            value: None,
        };
        assert!(!evaluate(&sections, &[text("q1", "Yes"), cleared]).shows("q2"));
    }
}
