use protos::ag::UsedSlipDays;

pub fn used(used: &[UsedSlipDays]) -> u32 {
    used.iter().map(|u| u.used_slip_days).sum()
}

pub fn used_for_assignment(used: &[UsedSlipDays], assignment_id: u64) -> u32 {
    used.iter()
        .filter(|u| u.assignment_id == assignment_id)
        .map(|u| u.used_slip_days)
        .sum()
}

/// Slip days left of the course allowance, never below zero.
pub fn remaining(course_slip_days: u32, used_days: &[UsedSlipDays]) -> u32 {
    course_slip_days.saturating_sub(used(used_days))
}
