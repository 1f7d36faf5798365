// src/engine/scoring.rs

use std::collections::HashMap;

use crate::models::{category::CategoryMarks, question::Question};

/// Scores an answer sheet against the exam's questions.
///
/// A question counts when the selected answer for its id is exactly
/// (case-sensitive) its stored answer. Missing or empty selections never count,
/// so a question whose key is empty can never be scored.
pub fn score_answers(questions: &[Question], answers: &HashMap<String, String>) -> CategoryMarks {
    let mut marks = CategoryMarks::default();

    for question in questions {
        let Some(selected) = answers.get(&question.id) else {
            continue;
        };
        if !selected.is_empty() && selected == &question.answer {
            *marks.get_mut(question.category) += 1;
        }
    }

    marks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::Category;

    fn question(category: Category, answer: &str) -> Question {
        Question {
            options: vec!["Paris".into(), "London".into(), "4".into()],
            answer: answer.to_string(),
            ..Question::new(category, "q")
        }
    }

    #[test]
    fn all_correct_scores_full_category() {
        let questions: Vec<_> = (0..3).map(|_| question(Category::Math, "4")).collect();
        let answers: HashMap<_, _> =
            questions.iter().map(|q| (q.id.clone(), "4".to_string())).collect();

        let marks = score_answers(&questions, &answers);

        assert_eq!(marks.math, 3);
        assert_eq!(marks.total(), 3);
    }

    #[test]
    fn unanswered_scores_zero() {
        let questions = vec![question(Category::Coding, "4")];
        let marks = score_answers(&questions, &HashMap::new());
        assert_eq!(marks, CategoryMarks::default());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let q = question(Category::Aptitude, "Paris");
        let answers = HashMap::from([(q.id.clone(), "paris".to_string())]);

        assert_eq!(score_answers(&[q], &answers).aptitude, 0);
    }

    #[test]
    fn empty_selection_never_matches_empty_key() {
        let q = question(Category::Communication, "");
        let answers = HashMap::from([(q.id.clone(), String::new())]);

        assert_eq!(score_answers(&[q], &answers).communication, 0);
    }

    #[test]
    fn marks_split_by_category() {
        let coding = question(Category::Coding, "Paris");
        let math = question(Category::Math, "4");
        let answers = HashMap::from([
            (coding.id.clone(), "Paris".to_string()),
            (math.id.clone(), "London".to_string()),
            ("unknown-id".to_string(), "4".to_string()),
        ]);

        let marks = score_answers(&[coding, math], &answers);

        assert_eq!(marks.coding, 1);
        assert_eq!(marks.math, 0);
        assert_eq!(marks.total(), 1);
    }
}
