// src/engine/ranking.rs

//! Rank and leaderboard computation over one exam's results.
//!
//! Every ordering is a stable sort on marks descending, so ties keep the order
//! in which results were submitted. Ranks are 1-based positions.

use std::cmp::Reverse;

use crate::models::{
    category::{Category, PerCategory},
    exam_result::ExamResult,
    rank::RankData,
};

/// Results ordered by total marks, highest first.
pub fn rank_by_total(results: &[ExamResult]) -> Vec<&ExamResult> {
    let mut sorted: Vec<&ExamResult> = results.iter().collect();
    sorted.sort_by_key(|r| Reverse(r.total_marks));
    sorted
}

/// Results ordered by one category's marks, highest first.
/// Independent of the total ordering: ties fall back to submission order.
pub fn rank_by_category(results: &[ExamResult], category: Category) -> Vec<&ExamResult> {
    let mut sorted: Vec<&ExamResult> = results.iter().collect();
    sorted.sort_by_key(|r| Reverse(r.marks(category)));
    sorted
}

/// Rank card of the student with `roll_no`, or `None` if they have no result.
///
/// Every rank is the position of the first result carrying `roll_no` in the
/// relevant ordering, so a student with several submissions is ranked by
/// whichever of them places best in each dimension. Scopes are taken from the
/// submission that places best overall.
pub fn compute_rank(results: &[ExamResult], roll_no: &str) -> Option<RankData> {
    let overall = rank_by_total(results);
    let target = *overall.iter().find(|r| r.student.roll_no == roll_no)?;
    let student = &target.student;

    let overall_rank = position(overall.iter().copied(), roll_no)?;

    let year_rank = position(
        overall.iter().copied().filter(|r| r.student.year == student.year),
        roll_no,
    )?;

    let branch_rank = position(
        overall.iter().copied().filter(|r| r.student.branch == student.branch),
        roll_no,
    )?;

    let section_rank = position(
        overall.iter().copied().filter(|r| {
            r.student.section == student.section
                && r.student.branch == student.branch
                && r.student.year == student.year
        }),
        roll_no,
    )?;

    let mut category = PerCategory::<usize>::default();
    for c in Category::ALL {
        *category.get_mut(c) = position(rank_by_category(results, c), roll_no)?;
    }

    Some(RankData {
        overall: overall_rank,
        year: year_rank,
        branch: branch_rank,
        section: section_rank,
        category,
    })
}

/// First `limit` results by total marks. `limit` may exceed the result count.
pub fn top_performers(results: &[ExamResult], limit: usize) -> Vec<&ExamResult> {
    let mut sorted = rank_by_total(results);
    sorted.truncate(limit);
    sorted
}

pub fn top_performers_by_category(
    results: &[ExamResult],
    category: Category,
    limit: usize,
) -> Vec<&ExamResult> {
    let mut sorted = rank_by_category(results, category);
    sorted.truncate(limit);
    sorted
}

fn position<'a>(
    sorted: impl IntoIterator<Item = &'a ExamResult>,
    roll_no: &str,
) -> Option<usize> {
    sorted
        .into_iter()
        .position(|r| r.student.roll_no == roll_no)
        .map(|idx| idx + 1)
}
