// src/lifecycle.rs

use std::{cmp::Reverse, collections::HashMap};

use chrono::Utc;
use thiserror::Error;

use crate::{
    config::{EXAM_DURATION_SECONDS, LINK_PREFIX},
    engine::{
        parser::{parse_document_with_report, ParseWarning},
        ranking,
        scoring::score_answers,
    },
    models::{
        category::{Category, CategoryMarks, PerCategory},
        exam::{CreatedExam, Exam, ExamStatus, PublicExam},
        exam_result::ExamResult,
        question::Question,
        rank::RankData,
        student::Student,
    },
    store::ExamStore,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExamError {
    #[error("Exam '{0}' not found")]
    NotFound(String),

    #[error("Cannot {action} exam '{exam_id}' while it is {from}")]
    InvalidTransition {
        exam_id: String,
        from: ExamStatus,
        action: &'static str,
    },

    #[error("Exam '{0}' is not accepting submissions")]
    ExamNotActive(String),
}

/// Owns the store and drives exams through their lifecycle:
///
/// ```text
/// pending --activate--> active --deactivate--> completed --reopen--> active
/// ```
///
/// `activate` on an active exam returns its existing link, `deactivate` on a
/// completed exam does nothing. Every other transition is rejected.
#[derive(Debug, Default)]
pub struct ExamService {
    store: ExamStore,
}

impl ExamService {
    pub fn new(store: ExamStore) -> Self {
        Self { store }
    }

    /// Parses one document per category, using the category as the parse hint,
    /// and stores the concatenated questions as a new pending exam.
    pub fn create_exam(
        &mut self,
        year: &str,
        semester: &str,
        documents: &PerCategory<String>,
    ) -> CreatedExam {
        let mut questions = Vec::new();
        let mut warnings: Vec<ParseWarning> = Vec::new();

        for category in Category::ALL {
            let report = parse_document_with_report(documents.get(category), Some(category));
            for warning in &report.warnings {
                tracing::warn!("{} document: {}", category, warning);
            }
            questions.extend(report.questions);
            warnings.extend(report.warnings);
        }

        let exam = Exam::new(year, semester, questions);
        tracing::info!(
            "Created exam {} ({}) with {} questions",
            exam.name,
            exam.id,
            exam.questions.len()
        );
        self.store.insert_exam(exam.clone());

        CreatedExam { exam, warnings }
    }

    /// All exams, newest first.
    pub fn list_exams(&self) -> Vec<Exam> {
        let mut exams = self.store.exams().to_vec();
        exams.sort_by_key(|e| Reverse(e.created_at));
        exams
    }

    pub fn get_exam(&self, id: &str) -> Result<&Exam, ExamError> {
        self.store
            .exam(id)
            .ok_or_else(|| ExamError::NotFound(id.to_string()))
    }

    /// Replaces the question list wholesale.
    ///
    /// Answers outside a question's options are accepted and only logged.
    pub fn update_exam_questions(
        &mut self,
        id: &str,
        questions: Vec<Question>,
    ) -> Result<Exam, ExamError> {
        let exam = self.exam_mut(id)?;

        for q in questions.iter().filter(|q| !q.answer_in_options()) {
            tracing::warn!(
                "Question '{}' in exam {} has answer '{}' outside its options",
                q.text,
                id,
                q.answer
            );
        }

        exam.questions = questions;
        tracing::info!("Replaced questions of exam {} ({} total)", id, exam.questions.len());
        Ok(exam.clone())
    }

    /// Opens a pending exam and returns its access link.
    pub fn activate(&mut self, id: &str) -> Result<String, ExamError> {
        let exam = self.exam_mut(id)?;
        match exam.status {
            ExamStatus::Pending => Ok(open(exam)),
            ExamStatus::Active => Ok(exam.link.clone().unwrap_or_else(|| open(exam))),
            from => Err(ExamError::InvalidTransition {
                exam_id: id.to_string(),
                from,
                action: "activate",
            }),
        }
    }

    pub fn deactivate(&mut self, id: &str) -> Result<(), ExamError> {
        let exam = self.exam_mut(id)?;
        match exam.status {
            ExamStatus::Active => {
                exam.status = ExamStatus::Completed;
                tracing::info!("Exam {} completed", id);
                Ok(())
            }
            ExamStatus::Completed => Ok(()),
            from => Err(ExamError::InvalidTransition {
                exam_id: id.to_string(),
                from,
                action: "deactivate",
            }),
        }
    }

    /// Accepts submissions for a completed exam again.
    pub fn reopen(&mut self, id: &str) -> Result<String, ExamError> {
        let exam = self.exam_mut(id)?;
        match exam.status {
            ExamStatus::Completed => Ok(open(exam)),
            from => Err(ExamError::InvalidTransition {
                exam_id: id.to_string(),
                from,
                action: "reopen",
            }),
        }
    }

    /// False for unknown exams.
    pub fn is_active(&self, id: &str) -> bool {
        self.store
            .exam(id)
            .is_some_and(|e| e.status == ExamStatus::Active)
    }

    /// The paper handed to students. Only available while the exam is active.
    pub fn public_paper(&self, id: &str) -> Result<PublicExam, ExamError> {
        let exam = self.get_exam(id)?;
        if exam.status != ExamStatus::Active {
            return Err(ExamError::ExamNotActive(id.to_string()));
        }
        Ok(PublicExam::from_exam(exam, EXAM_DURATION_SECONDS))
    }

    /// Records already computed marks. Does not check the exam's status and
    /// does not reject repeat submissions.
    pub fn submit_result(
        &mut self,
        exam_id: &str,
        mut student: Student,
        marks: CategoryMarks,
    ) -> Result<ExamResult, ExamError> {
        let exam_name = self.get_exam(exam_id)?.name.clone();

        if student.id.trim().is_empty() {
            student.id = uuid::Uuid::new_v4().to_string();
        }

        let result = ExamResult {
            id: uuid::Uuid::new_v4().to_string(),
            exam_id: exam_id.to_string(),
            exam_name,
            student_id: student.id.clone(),
            student,
            total_marks: marks.total(),
            coding_marks: marks.coding,
            math_marks: marks.math,
            aptitude_marks: marks.aptitude,
            communication_marks: marks.communication,
            completed_at: Utc::now(),
        };

        tracing::info!(
            "Result submitted for exam {} by {}: {} marks",
            exam_id,
            result.student.roll_no,
            result.total_marks
        );
        self.store.push_result(result.clone());
        Ok(result)
    }

    /// Scores an answer sheet and records it. The exam must be active.
    pub fn submit_answers(
        &mut self,
        exam_id: &str,
        student: Student,
        answers: &HashMap<String, String>,
    ) -> Result<ExamResult, ExamError> {
        let exam = self.get_exam(exam_id)?;
        if exam.status != ExamStatus::Active {
            return Err(ExamError::ExamNotActive(exam_id.to_string()));
        }
        let marks = score_answers(&exam.questions, answers);
        self.submit_result(exam_id, student, marks)
    }

    /// Results of one exam, highest total first. Empty for unknown exams.
    pub fn get_results(&self, exam_id: &str) -> Vec<ExamResult> {
        let results = self.store.results_for_exam(exam_id);
        ranking::rank_by_total(&results).into_iter().cloned().collect()
    }

    /// A student's results across exams, most recent first.
    pub fn get_student_results(&self, roll_no: &str) -> Vec<ExamResult> {
        let mut results = self.store.results_for_roll_no(roll_no);
        results.sort_by_key(|r| Reverse(r.completed_at));
        results
    }

    pub fn get_rank(&self, exam_id: &str, roll_no: &str) -> Option<RankData> {
        ranking::compute_rank(&self.store.results_for_exam(exam_id), roll_no)
    }

    pub fn get_top_performers(&self, exam_id: &str, limit: usize) -> Vec<ExamResult> {
        let results = self.store.results_for_exam(exam_id);
        ranking::top_performers(&results, limit)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get_top_performers_by_category(
        &self,
        exam_id: &str,
        category: Category,
        limit: usize,
    ) -> Vec<ExamResult> {
        let results = self.store.results_for_exam(exam_id);
        ranking::top_performers_by_category(&results, category, limit)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Adds a completed demo exam with three results. No-op unless the store is empty.
    pub fn seed_sample_data(&mut self) -> Result<(), ExamError> {
        if !self.store.exams().is_empty() {
            return Ok(());
        }

        let sample = [
            (
                Category::Aptitude,
                "What is the capital of France?",
                ["London", "Paris", "Berlin", "Madrid"],
                "Paris",
            ),
            (
                Category::Coding,
                "What is the main use of CSS?",
                ["Styling", "Logic", "Database", "Authentication"],
                "Styling",
            ),
            (
                Category::Coding,
                "What does HTML stand for?",
                [
                    "Hyper Text Markup Language",
                    "High Tech Multi Language",
                    "Hyper Transfer Markup Language",
                    "None of the above",
                ],
                "Hyper Text Markup Language",
            ),
            (Category::Math, "What is 2 + 2?", ["3", "4", "5", "6"], "4"),
            (
                Category::Communication,
                "Which of the following is NOT a communication channel?",
                ["Email", "Face-to-face", "Telepathy", "Video call"],
                "Telepathy",
            ),
        ];
        let questions = sample
            .into_iter()
            .map(|(category, text, options, answer)| Question {
                options: options.into_iter().map(String::from).collect(),
                answer: answer.to_string(),
                ..Question::new(category, text)
            })
            .collect();

        let exam = Exam::new("2023", "Fall", questions);
        let exam_id = exam.id.clone();
        self.store.insert_exam(exam);

        let students = [
            ("John Doe", "2023001", "CSE", "A", [85, 90, 75, 80]),
            ("Jane Smith", "2023002", "CSE", "A", [90, 85, 80, 85]),
            ("Bob Johnson", "2023003", "ECE", "B", [70, 95, 85, 75]),
        ];
        for (name, roll_no, branch, section, [coding, math, aptitude, communication]) in students {
            let student = Student {
                id: String::new(),
                name: name.to_string(),
                roll_no: roll_no.to_string(),
                year: "2023".to_string(),
                branch: branch.to_string(),
                section: section.to_string(),
            };
            let marks = CategoryMarks { coding, math, aptitude, communication };
            self.submit_result(&exam_id, student, marks)?;
        }

        self.exam_mut(&exam_id)?.status = ExamStatus::Completed;
        tracing::info!("Seeded sample exam {}", exam_id);
        Ok(())
    }

    fn exam_mut(&mut self, id: &str) -> Result<&mut Exam, ExamError> {
        self.store
            .exam_mut(id)
            .ok_or_else(|| ExamError::NotFound(id.to_string()))
    }
}

fn open(exam: &mut Exam) -> String {
    let link = format!("{}{}", LINK_PREFIX, exam.id);
    exam.status = ExamStatus::Active;
    exam.link = Some(link.clone());
    tracing::info!("Exam {} active at {}", exam.id, link);
    link
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;

    fn student(roll_no: &str, year: &str) -> Student {
        Student {
            id: String::new(),
            name: format!("Student {}", roll_no),
            roll_no: roll_no.to_string(),
            year: year.to_string(),
            branch: "CSE".to_string(),
            section: "A".to_string(),
        }
    }

    fn math_doc() -> PerCategory<String> {
        PerCategory {
            math: "Category: math\nQuestion: 2+2?\nA) 3 B) 4 C) 5 D) 6\nAnswer: 4".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn create_concatenates_category_documents() {
        let mut service = ExamService::default();
        let documents = PerCategory {
            coding: "Question: CSS?\nA) Styling B) Logic\nAnswer: Styling".to_string(),
            math: "Question: 2+2?\nA) 3 B) 4\nAnswer: 4".to_string(),
            aptitude: String::new(),
            communication: "Question: Channel?\nA) Email B) Telepathy\nAnswer: Telepathy".to_string(),
        };

        let created = service.create_exam("2024", "Spring", &documents);

        assert!(created.warnings.is_empty());
        let exam = &created.exam;
        assert_eq!(exam.name, "2024_Spring");
        assert_eq!(exam.status, ExamStatus::Pending);
        let cats: Vec<_> = exam.questions.iter().map(|q| q.category).collect();
        assert_eq!(cats, vec![Category::Coding, Category::Math, Category::Communication]);
        assert_eq!(service.get_exam(&exam.id).unwrap().questions.len(), 3);
    }

    #[test]
    fn lifecycle_transitions() {
        let mut service = ExamService::default();
        let id = service.create_exam("2023", "Fall", &math_doc()).exam.id;

        assert!(!service.is_active(&id));
        assert!(matches!(
            service.deactivate(&id),
            Err(ExamError::InvalidTransition { action: "deactivate", .. })
        ));

        let link = service.activate(&id).unwrap();
        assert_eq!(link, format!("exam/{}", id));
        assert!(service.is_active(&id));
        assert_eq!(service.activate(&id).unwrap(), link);

        service.deactivate(&id).unwrap();
        assert!(!service.is_active(&id));
        assert_eq!(service.get_exam(&id).unwrap().status, ExamStatus::Completed);
        service.deactivate(&id).unwrap();

        assert_eq!(
            service.activate(&id),
            Err(ExamError::InvalidTransition {
                exam_id: id.clone(),
                from: ExamStatus::Completed,
                action: "activate",
            })
        );
        assert_eq!(service.reopen(&id).unwrap(), link);
        assert!(service.is_active(&id));
        assert!(service.reopen(&id).is_err());
    }

    #[test]
    fn unknown_exam_is_not_found() {
        let mut service = ExamService::default();

        assert_eq!(service.activate("nope"), Err(ExamError::NotFound("nope".to_string())));
        assert!(matches!(service.deactivate("nope"), Err(ExamError::NotFound(_))));
        assert!(matches!(service.update_exam_questions("nope", vec![]), Err(ExamError::NotFound(_))));
        assert!(matches!(
            service.submit_result("nope", student("1", "2023"), CategoryMarks::default()),
            Err(ExamError::NotFound(_))
        ));
        assert!(!service.is_active("nope"));
        assert!(service.get_results("nope").is_empty());
    }

    #[test]
    fn end_to_end_single_student() {
        let mut service = ExamService::default();
        let exam = service.create_exam("2023", "Fall", &math_doc()).exam;
        assert_eq!(exam.questions[0].options, vec!["3", "4", "5", "6"]);

        let marks = CategoryMarks { math: 1, ..Default::default() };
        let result = service.submit_result(&exam.id, student("42", "2023"), marks).unwrap();
        assert_eq!(result.total_marks, 1);
        assert_eq!(result.exam_name, "2023_Fall");
        assert!(!result.student_id.is_empty());
        assert_eq!(result.student.id, result.student_id);

        let results = service.get_results(&exam.id);
        assert_eq!(results, vec![result]);
        assert_eq!(service.get_rank(&exam.id, "42").unwrap().overall, 1);
        assert_eq!(service.get_rank(&exam.id, "43"), None);
    }

    #[test]
    fn submit_answers_scores_and_requires_active_exam() {
        let mut service = ExamService::default();
        let exam = service.create_exam("2023", "Fall", &math_doc()).exam;
        let answers = HashMap::from([(exam.questions[0].id.clone(), "4".to_string())]);

        assert_eq!(
            service.submit_answers(&exam.id, student("1", "2023"), &answers),
            Err(ExamError::ExamNotActive(exam.id.clone()))
        );

        service.activate(&exam.id).unwrap();
        let result = service.submit_answers(&exam.id, student("1", "2023"), &answers).unwrap();
        assert_eq!(result.math_marks, 1);
        assert_eq!(result.total_marks, 1);
    }

    #[test]
    fn results_are_ordered() {
        let mut service = ExamService::default();
        let first = service.create_exam("2023", "Fall", &math_doc()).exam.id;
        let second = service.create_exam("2024", "Fall", &math_doc()).exam.id;

        let low = CategoryMarks { math: 1, ..Default::default() };
        let high = CategoryMarks { coding: 3, math: 1, ..Default::default() };
        service.submit_result(&first, student("1", "2023"), low).unwrap();
        thread::sleep(Duration::from_millis(2));
        service.submit_result(&first, student("2", "2023"), high).unwrap();
        thread::sleep(Duration::from_millis(2));
        service.submit_result(&second, student("1", "2023"), high).unwrap();

        let totals: Vec<_> = service.get_results(&first).iter().map(|r| r.total_marks).collect();
        assert_eq!(totals, vec![4, 1]);

        let exams: Vec<_> = service
            .get_student_results("1")
            .iter()
            .map(|r| r.exam_id.clone())
            .collect();
        assert_eq!(exams, vec![second.clone(), first.clone()]);

        let top = service.get_top_performers_by_category(&first, Category::Coding, 1);
        assert_eq!(top[0].student.roll_no, "2");
        assert_eq!(service.get_top_performers(&first, 10).len(), 2);
    }

    #[test]
    fn total_holds_maximal_category_marks() {
        let mut service = ExamService::default();
        let id = service.create_exam("2023", "Fall", &math_doc()).exam.id;

        let marks = CategoryMarks { coding: u32::MAX, math: 1, ..Default::default() };
        let result = service.submit_result(&id, student("1", "2023"), marks).unwrap();

        assert_eq!(result.total_marks, u64::from(u32::MAX) + 1);
        let sum: u64 = Category::ALL.iter().map(|&c| u64::from(result.marks(c))).sum();
        assert_eq!(result.total_marks, sum);
    }

    #[test]
    fn update_replaces_questions() {
        let mut service = ExamService::default();
        let id = service.create_exam("2023", "Fall", &math_doc()).exam.id;

        let replacement = vec![Question {
            options: vec!["Yes".into(), "No".into()],
            answer: "Maybe".into(),
            ..Question::new(Category::Communication, "Ready?")
        }];
        let exam = service.update_exam_questions(&id, replacement.clone()).unwrap();

        assert_eq!(exam.questions, replacement);
        assert_eq!(service.get_exam(&id).unwrap().questions, replacement);
    }

    #[test]
    fn public_paper_hides_answers_and_groups_by_category() {
        let mut service = ExamService::default();
        let id = service.create_exam("2023", "Fall", &math_doc()).exam.id;
        assert!(matches!(service.public_paper(&id), Err(ExamError::ExamNotActive(_))));

        service.activate(&id).unwrap();
        let paper = service.public_paper(&id).unwrap();
        assert_eq!(paper.duration_seconds, EXAM_DURATION_SECONDS);
        assert_eq!(paper.sections.len(), 1);
        assert_eq!(paper.sections[0].category, Category::Math);
        let json = serde_json::to_value(&paper).unwrap();
        assert!(json["sections"][0]["questions"][0].get("answer").is_none());
    }

    #[test]
    fn seeds_sample_data_once() {
        let mut service = ExamService::default();
        service.seed_sample_data().unwrap();
        service.seed_sample_data().unwrap();

        let exams = service.list_exams();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0].status, ExamStatus::Completed);
        assert_eq!(exams[0].questions.len(), 5);

        let rank = service.get_rank(&exams[0].id, "2023001").unwrap();
        assert_eq!(rank.overall, 2);
        assert_eq!(rank.section, 2);
        assert_eq!(rank.branch, 2);
    }

    #[test]
    fn list_is_newest_first() {
        let mut service = ExamService::default();
        let older = service.create_exam("2023", "Fall", &math_doc()).exam.id;
        thread::sleep(Duration::from_millis(2));
        let newer = service.create_exam("2024", "Fall", &math_doc()).exam.id;

        let ids: Vec<_> = service.list_exams().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![newer, older]);
    }
}
