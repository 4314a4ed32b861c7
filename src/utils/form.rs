use std::collections::HashSet;

use uuid::Uuid;

use crate::models::assessment::Section;

/// Fills in missing section and question ids, clears empty gate references
/// and checks that the form is well formed. A gate must point at a question that comes earlier in the
/// form, which rules out cycles.
pub fn normalize_sections(mut sections: Vec<Section>) -> Result<Vec<Section>, Vec<String>> {
    let mut problems = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for section in &mut sections {
        if section.id.trim().is_empty() {
            section.id = Uuid::new_v4().to_string();
        }
        if section.title.trim().is_empty() {
            problems.push(format!("section {} needs a title", section.id));
        }

        for question in &mut section.questions {
            if question.id.trim().is_empty() {
                question.id = Uuid::new_v4().to_string();
            }
            let id = question.id.clone();
            if question.conditional_on.as_deref().is_some_and(|gate| gate.trim().is_empty()) {
                question.conditional_on = None;
            }

            if question.text.trim().is_empty() {
                problems.push(format!("question {} needs text", id));
            }
            if question.question_type.is_choice()
                && question.options.as_ref().map_or(true, |o| o.is_empty())
            {
                problems.push(format!("question {} needs at least one option", id));
            }
            if let (Some(min), Some(max)) = (question.min_value, question.max_value) {
                if min > max {
                    problems.push(format!("question {} has minValue above maxValue", id));
                }
            }
            if question.max_length == Some(0) {
                problems.push(format!("question {} has a zero maxLength", id));
            }

            match question.conditional_on.as_deref() {
                Some(gate) if gate == id => {
                    problems.push(format!("question {} cannot depend on itself", id));
                }
                Some(gate) if !seen.contains(gate) => {
                    problems.push(format!(
                        "question {} depends on {}, which is not an earlier question",
                        id, gate
                    ));
                }
                Some(_) if question.conditional_value.is_none() => {
                    problems.push(format!("question {} needs a conditionalValue", id));
                }
                _ => {}
            }

            if !seen.insert(id.clone()) {
                problems.push(format!("question id {} is used more than once", id));
            }
        }
    }

    if problems.is_empty() {
        Ok(sections)
    } else {
        Err(problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::{Question, QuestionType};

    fn q(id: &str, question_type: QuestionType) -> Question {
        Question {
            id: id.to_string(),
            question_type,
            text: format!("text {id}"),
            description: None,
            required: false,
            options: question_type.is_choice().then(|| vec!["Yes".into(), "No".into()]),
            min_value: None,
            max_value: None,
            max_length: None,
            conditional_on: None,
            conditional_value: None,
        }
    }

    fn one_section(questions: Vec<Question>) -> Vec<Section> {
        vec![Section {
            id: "s1".into(),
            title: "Basics".into(),
            description: None,
            questions,
        }]
    }

    #[test]
    fn missing_ids_are_generated() {
        let mut sections = one_section(vec![q("", QuestionType::ShortText)]);
        sections[0].id = String::new();

        let normalized = normalize_sections(sections).unwrap();
        assert!(!normalized[0].id.is_empty());
        assert!(Uuid::parse_str(&normalized[0].questions[0].id).is_ok());
    }

    #[test]
    fn gate_must_point_backwards() {
        let mut early = q("q1", QuestionType::ShortText);
        early.conditional_on = Some("q2".into());
        early.conditional_value = Some("Yes".into());
        let late = q("q2", QuestionType::SingleChoice);
        assert!(normalize_sections(one_section(vec![early, late])).is_err());

        let gate = q("q1", QuestionType::SingleChoice);
        let mut follow = q("q2", QuestionType::ShortText);
        follow.conditional_on = Some("q1".into());
        follow.conditional_value = Some("Yes".into());
        assert!(normalize_sections(one_section(vec![gate, follow])).is_ok());
    }

    #[test]
    fn empty_gate_reference_is_cleared() {
        let mut open = q("q1", QuestionType::ShortText);
        open.conditional_on = Some(String::new());
        open.conditional_value = Some(String::new());

        let normalized = normalize_sections(one_section(vec![open])).unwrap();
        assert_eq!(normalized[0].questions[0].conditional_on, None);
    }

    #[test]
    fn gate_needs_a_value() {
        let gate = q("q1", QuestionType::SingleChoice);
        let mut follow = q("q2", QuestionType::ShortText);
        follow.conditional_on = Some("q1".into());
        let problems = normalize_sections(one_section(vec![gate, follow])).unwrap_err();
        assert_eq!(problems.len(), 1);
    }

    #[test]
    fn structural_problems_are_all_reported() {
        let mut choice = q("q1", QuestionType::MultiChoice);
        choice.options = Some(vec![]);
        let mut number = q("q2", QuestionType::Numeric);
        number.min_value = Some(10.0);
        number.max_value = Some(1.0);
        let duplicate = q("q1", QuestionType::ShortText);

        let problems = normalize_sections(one_section(vec![choice, number, duplicate])).unwrap_err();
        assert_eq!(problems.len(), 3);
    }
}
