use super::models::UserAvailability;
use std::collections::HashSet;

/// Combine calendar data with the classroom list.
///
/// Classrooms missing from the calendar data get an empty column. Repeated
/// identifiers keep their first occurrence. The result is ordered by
/// identifier so columns keep a stable position between polls.
pub fn merge_classrooms(
    availability: Vec<UserAvailability>,
    classrooms: Vec<String>,
) -> Vec<UserAvailability> {
    let mut seen = HashSet::new();

    let mut merged: Vec<UserAvailability> = availability
        .into_iter()
        .filter(|user| seen.insert(user.user_email.clone()))
        .collect();

    for classroom in classrooms {
        if seen.insert(classroom.clone()) {
            merged.push(UserAvailability::empty(classroom));
        }
    }

    merged.sort_by(|a, b| a.user_email.cmp(&b.user_email));
    merged
}
