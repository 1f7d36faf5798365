// src/store.rs

use crate::models::{exam::Exam, exam_result::ExamResult};

/// In-memory exam and result records, kept in insertion order.
///
/// Not synchronized: the owner serializes access (see `state::SharedExamService`).
#[derive(Debug, Default)]
pub struct ExamStore {
    exams: Vec<Exam>,
    results: Vec<ExamResult>,
}

impl ExamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_exam(&mut self, exam: Exam) {
        self.exams.push(exam);
    }

    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    pub fn exam(&self, id: &str) -> Option<&Exam> {
        self.exams.iter().find(|e| e.id == id)
    }

    pub fn exam_mut(&mut self, id: &str) -> Option<&mut Exam> {
        self.exams.iter_mut().find(|e| e.id == id)
    }

    /// Results are append-only.
    pub fn push_result(&mut self, result: ExamResult) {
        self.results.push(result);
    }

    /// Results of one exam in submission order.
    pub fn results_for_exam(&self, exam_id: &str) -> Vec<ExamResult> {
        self.results
            .iter()
            .filter(|r| r.exam_id == exam_id)
            .cloned()
            .collect()
    }

    /// Results of one student across exams, in submission order.
    pub fn results_for_roll_no(&self, roll_no: &str) -> Vec<ExamResult> {
        self.results
            .iter()
            .filter(|r| r.student.roll_no == roll_no)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_exams_by_id() {
        let mut store = ExamStore::new();
        let exam = Exam::new("2023", "Fall", Vec::new());
        let id = exam.id.clone();
        store.insert_exam(exam);

        assert_eq!(store.exam(&id).map(|e| e.name.as_str()), Some("2023_Fall"));
        assert!(store.exam("missing").is_none());

        store.exam_mut(&id).unwrap().semester = "Spring".to_string();
        assert_eq!(store.exams()[0].semester, "Spring");
    }
}
