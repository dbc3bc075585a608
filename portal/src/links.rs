use super::lab_result::SubmissionLink;
use protos::ag::{Assignment, Submission};

/// Submissions made by a student or a group, and the name to show as author.
#[derive(Debug, Clone, Default)]
pub struct Submitter {
    pub name: String,
    pub submissions: Vec<Submission>,
}

impl Submitter {
    /// Newest submission for `assignment_id`.
    fn current(&self, assignment_id: u64) -> Option<&Submission> {
        self.submissions
            .iter()
            .filter(|s| s.assignment_id == assignment_id)
            .max_by_key(|s| s.id)
    }
}

/// Pairs every assignment with the current submission of its author: the
/// group for group labs, the student otherwise.
pub fn link_submissions(
    assignments: Vec<Assignment>,
    student: &Submitter,
    group: Option<&Submitter>,
) -> Vec<SubmissionLink> {
    let mut links: Vec<SubmissionLink> = assignments
        .into_iter()
        .map(|assignment| {
            let author = match group {
                Some(group) if assignment.is_group_lab => group,
                _ => student,
            };
            SubmissionLink {
                submission: author.current(assignment.id).cloned(),
                author_name: author.name.clone(),
                assignment,
            }
        })
        .collect();
    links.sort_by_key(|l| l.assignment.order);
    links
}

pub fn find_link(links: Vec<SubmissionLink>, assignment_id: u64) -> Option<SubmissionLink> {
    links
        .into_iter()
        .find(|l| l.assignment.id == assignment_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(id: u64, order: u32, is_group_lab: bool) -> Assignment {
        Assignment {
            id,
            order,
            is_group_lab,
            ..Default::default()
        }
    }

    fn submission(id: u64, assignment_id: u64) -> Submission {
        Submission {
            id,
            assignment_id,
            ..Default::default()
        }
    }

    #[test]
    fn links_newest_submission_per_assignment() {
        let student = Submitter {
            name: String::from("student"),
            submissions: vec![submission(1, 10), submission(5, 10), submission(3, 10)],
        };
        let links = link_submissions(
            vec![assignment(10, 1, false), assignment(11, 2, false)],
            &student,
            None,
        );
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].submission.as_ref().map(|s| s.id), Some(5));
        assert!(links[1].submission.is_none());
        assert_eq!(links[1].author_name, "student");
    }

    #[test]
    fn group_labs_use_group_submissions() {
        let student = Submitter {
            name: String::from("student"),
            submissions: vec![submission(1, 10), submission(2, 11)],
        };
        let group = Submitter {
            name: String::from("team rocket"),
            submissions: vec![submission(7, 11)],
        };
        let links = link_submissions(
            vec![assignment(11, 2, true), assignment(10, 1, false)],
            &student,
            Some(&group),
        );
        // sorted by assignment order
        assert_eq!(links[0].assignment.id, 10);
        assert_eq!(links[0].author_name, "student");
        assert_eq!(links[1].submission.as_ref().map(|s| s.id), Some(7));
        assert_eq!(links[1].author_name, "team rocket");
    }

    #[test]
    fn group_lab_without_group_falls_back_to_student() {
        let student = Submitter {
            name: String::from("student"),
            submissions: vec![submission(2, 11)],
        };
        let links = link_submissions(vec![assignment(11, 1, true)], &student, None);
        let link = find_link(links, 11).unwrap();
        assert_eq!(link.submission.map(|s| s.id), Some(2));
    }
}
