use db::Student;

/// Delimiter that must follow a student name in an event title.
pub const NAME_DELIMITER: &str = " and";

/// Seam between calendar events and student records. Scheduling has no
/// structured student reference, so production matching is a substring
/// heuristic; an explicit event-id mapping can replace it behind this trait.
pub trait MatchStudents {
    fn matches(&self, event_title: &str, student: &Student) -> bool;

    fn matched<'a>(&self, event_title: &str, students: &'a [Student]) -> Vec<&'a Student> {
        students
            .iter()
            .filter(|student| self.matches(event_title, student))
            .collect()
    }
}

/// Matches when the title contains the student's display name immediately
/// followed by [`NAME_DELIMITER`], as in "Jane Doe and Tutor Bob - session".
/// Plain substring search: a student whose name ends another student's name
/// still false-positives, which is kept for parity with how sessions are
/// actually titled.
#[derive(Debug, Clone, Default)]
pub struct NameDelimiterMatcher;

impl MatchStudents for NameDelimiterMatcher {
    fn matches(&self, event_title: &str, student: &Student) -> bool {
        let pattern = format!("{}{NAME_DELIMITER}", student.display_name());
        event_title.contains(&pattern)
    }
}
