use protos::ag::{grading_criterion::Grade, Assignment, Review, Submission, User};
use std::convert::TryFrom;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ReviewError {
    #[error("all {reviewers} reviews already created for submission {submission_id} to assignment {assignment}")]
    AllReviewsCreated {
        submission_id: u64,
        assignment: String,
        reviewers: u32,
    },
    #[error("cannot update review with empty id")]
    MissingId,
}

/// Score of a manual review.
///
/// When the criteria carry points the score is the sum of points of the
/// passed criteria, otherwise it is the percentage of passed criteria,
/// rounded up.
pub fn compute_score(review: &Review) -> u32 {
    let criteria = review
        .grading_benchmarks
        .iter()
        .flat_map(|bm| bm.criteria.iter());
    let (mut total, mut passed, mut points, mut passed_points) = (0u64, 0u64, 0u64, 0u64);
    for c in criteria {
        total += 1;
        points += c.points;
        if c.grade() == Grade::Passed {
            passed += 1;
            passed_points += c.points;
        }
    }
    if total == 0 {
        return 0;
    }
    if points > 0 {
        return u32::try_from(passed_points).unwrap_or(u32::MAX);
    }
    ((passed * 100 + total - 1) / total) as u32
}

/// Reviewers whose review is marked ready, as users with only the id set.
pub fn ready_reviewers(reviews: &[Review]) -> Vec<User> {
    reviews
        .iter()
        .filter(|r| r.ready)
        .map(|r| User {
            id: r.reviewer_id,
            ..Default::default()
        })
        .collect()
}

pub fn check_new_review(submission: &Submission, assignment: &Assignment) -> Result<(), ReviewError> {
    if submission.reviews.len() >= assignment.reviewers as usize {
        return Err(ReviewError::AllReviewsCreated {
            submission_id: submission.id,
            assignment: assignment.name.clone(),
            reviewers: assignment.reviewers,
        });
    }
    Ok(())
}

pub fn check_review_update(review: &Review) -> Result<(), ReviewError> {
    if review.id == 0 {
        return Err(ReviewError::MissingId);
    }
    Ok(())
}
