//! Family → course grouping, with prefix inference for unlinked courses.

use qw_core::{Course, CourseFamily, infer_family};
use serde::Serialize;

/// Bucket for courses that neither declare nor prefix-match a family.
pub const UNASSIGNED: &str = "unassigned";

/// How a course came to sit under its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyLink {
    Declared,
    Inferred,
    Unassigned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedCourse {
    pub course: Course,
    pub link: FamilyLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyGroup {
    pub family_id: String,
    pub name: String,
    pub courses: Vec<PlacedCourse>,
}

/// Group `courses` under `families`. Families come out in id order with the
/// unassigned bucket last; courses keep id order within a family. Families
/// without courses are omitted.
#[must_use]
pub fn group_courses(families: &[CourseFamily], courses: Vec<Course>) -> Vec<FamilyGroup> {
    let mut groups: Vec<FamilyGroup> = Vec::new();
    let mut unassigned = Vec::new();

    for course in courses {
        let (family_id, name, link) = match &course.family_id {
            Some(id) => {
                let name = families
                    .iter()
                    .find(|f| &f.id == id)
                    .map_or_else(|| id.clone(), |f| f.name.clone());
                (id.clone(), name, FamilyLink::Declared)
            }
            None => match infer_family(&course.id, families) {
                Some(f) => (f.id.clone(), f.name.clone(), FamilyLink::Inferred),
                None => {
                    unassigned.push(PlacedCourse {
                        course,
                        link: FamilyLink::Unassigned,
                    });
                    continue;
                }
            },
        };
        let placed = PlacedCourse { course, link };
        match groups.iter_mut().find(|g| g.family_id == family_id) {
            Some(group) => group.courses.push(placed),
            None => groups.push(FamilyGroup {
                family_id,
                name,
                courses: vec![placed],
            }),
        }
    }

    groups.sort_by(|a, b| a.family_id.cmp(&b.family_id));
    if !unassigned.is_empty() {
        groups.push(FamilyGroup {
            family_id: UNASSIGNED.into(),
            name: "Unassigned".into(),
            courses: unassigned,
        });
    }
    for group in &mut groups {
        group.courses.sort_by(|a, b| a.course.id.cmp(&b.course.id));
    }
    groups
}
