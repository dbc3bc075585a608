use ordered_float::NotNan;
use protos::ag::Score;
use serde::Serialize;

/// One line of the test score table.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TestRow {
    pub test_name: String,
    pub task_name: String,
    pub score: i32,
    pub max_score: i32,
    pub weight: i32,
    /// share of the total score earned by this test, in percent
    pub percent: u32,
}

fn total_weight(scores: &[Score]) -> f64 {
    scores.iter().map(|s| f64::from(s.weight.max(0))).sum()
}

// None for tests that cannot be scored, i.e. max_score == 0
fn contribution(s: &Score, total_weight: f64) -> Option<NotNan<f64>> {
    if total_weight <= 0.0 {
        return None;
    }
    let score = f64::from(s.score.min(s.max_score));
    let max = f64::from(s.max_score);
    let weight = f64::from(s.weight.max(0));
    NotNan::new(score / max * weight / total_weight)
        .ok()
        .filter(|c| c.is_finite())
        .map(|c| c.max(NotNan::default()))
}

fn to_percent(x: f64) -> u32 {
    (x * 100.0).round() as u32
}

/// Weighted percentage earned over all tests.
///
/// Every test contributes `min(score, max_score) / max_score` scaled by its
/// share of the total weight.
pub fn weighted_score(scores: &[Score]) -> u32 {
    let total_weight = total_weight(scores);
    let total: NotNan<f64> = scores
        .iter()
        .filter_map(|s| contribution(s, total_weight))
        .sum();
    to_percent(total.into_inner())
}

pub fn test_rows(scores: &[Score]) -> Vec<TestRow> {
    let total_weight = total_weight(scores);
    scores
        .iter()
        .map(|s| TestRow {
            test_name: s.test_name.clone(),
            task_name: s.task_name.clone(),
            score: s.score,
            max_score: s.max_score,
            weight: s.weight,
            percent: contribution(s, total_weight)
                .map(|c| to_percent(c.into_inner()))
                .unwrap_or(0),
        })
        .collect()
}

/// Whether `score` reaches the assignment's score limit.
pub fn passed(score: u32, score_limit: u32) -> bool {
    score >= score_limit
}
