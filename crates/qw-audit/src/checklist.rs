//! Markdown remediation checklist rendered from an [`AuditReport`].

use std::fmt::Write;

use crate::finding::{LessonFinding, LessonState, QuestionSample};
use crate::hierarchy::FamilyLink;
use crate::report::{AuditReport, CourseReport};

/// One unchecked item per lesson that needs attention, grouped by family and
/// course. Families and courses with nothing to do are left out.
#[must_use]
pub fn render_checklist(report: &AuditReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Quiz remediation checklist\n");
    let _ = writeln!(
        out,
        "Generated {} with oracle `{}`. {} of {} lesson(s) need attention.",
        report.generated_at.to_rfc3339(),
        report.oracle_version,
        report.totals.attention(),
        report.totals.lessons
    );

    if report.totals.attention() == 0 {
        let _ = writeln!(out, "\nNothing to do.");
        return out;
    }

    for family in report.families.iter().filter(|f| f.totals.attention() > 0) {
        let _ = writeln!(out, "\n## {} (`{}`)", family.name, family.family_id);
        for course in family.courses.iter().filter(|c| c.needs_attention()) {
            render_course(&mut out, course);
        }
    }
    out
}

fn render_course(out: &mut String, course: &CourseReport) {
    let link = match course.link {
        FamilyLink::Declared => "",
        FamilyLink::Inferred => ", family inferred",
        FamilyLink::Unassigned => ", no family",
    };
    let _ = writeln!(
        out,
        "\n### {} (`{}`, {}{link})\n",
        course.title, course.course_id, course.language
    );
    for lesson in course.lessons.iter().filter(|l| l.state.needs_attention()) {
        render_lesson(out, &course.course_id, lesson);
    }
}

fn render_lesson(out: &mut String, course_id: &str, lesson: &LessonFinding) {
    let codes: Vec<String> = lesson.codes.iter().map(|c| format!("`{c}`")).collect();
    let _ = writeln!(
        out,
        "- [ ] Day {}: {} (`{}`): {}",
        lesson.day_number,
        lesson.title,
        lesson.lesson_id,
        codes.join(", ")
    );
    let c = &lesson.counts;
    let _ = writeln!(
        out,
        "  - Counts: {} active, {} valid ({} application, {} critical thinking), {} invalid, {} duplicate, {} recall",
        c.active,
        c.valid,
        c.valid_types.application,
        c.valid_types.critical_thinking,
        c.invalid,
        c.duplicates,
        c.recall
    );
    if let Some(error) = &lesson.first_error {
        let _ = writeln!(out, "  - First error: {error}");
    }
    if let Some(detail) = lesson.language_check.as_ref().and_then(|v| v.detail.as_ref()) {
        let _ = writeln!(out, "  - Language: {detail}");
    }
    if let Some(content) = lesson.content.as_ref().filter(|_| lesson.needs_content_work()) {
        let _ = writeln!(
            out,
            "  - Content score {}: {}",
            content.score,
            content.notes.join("; ")
        );
    }
    samples(out, "Invalid", &lesson.invalid_samples);
    samples(out, "Duplicate", &lesson.duplicate_samples);
    if let Some(capacity) = lesson.capacity.filter(|c| !c.sufficient) {
        let _ = writeln!(
            out,
            "  - Generator projection: {} of {} candidates usable, {} application / {} critical thinking after repair",
            capacity.acceptable,
            capacity.generated,
            capacity.projected.application,
            capacity.projected.critical_thinking
        );
    }
    let _ = writeln!(out, "  - Next: {}", next_step(course_id, lesson));
}

fn samples(out: &mut String, label: &str, samples: &[QuestionSample]) {
    for sample in samples {
        let _ = writeln!(
            out,
            "  - {label} #{}: \"{}\" ({})",
            sample.id, sample.text, sample.detail
        );
    }
}

/// Suggested follow-up for a lesson. `qw repair` only loads active lessons,
/// so inactive ones must be reactivated first.
#[must_use]
pub fn next_step(course_id: &str, lesson: &LessonFinding) -> String {
    if lesson.state == LessonState::Fatal {
        return "fix the stored lesson record, then re-run `qw audit`".into();
    }
    let repair = format!("`qw repair {course_id} --day {}`", lesson.day_number);
    let mut first = Vec::new();
    if lesson.needs_content_work() {
        first.push("revise the lesson body".to_string());
    }
    if !lesson.active {
        first.push(format!("reactivate lesson `{}`", lesson.lesson_id));
    }
    if first.is_empty() {
        repair
    } else {
        format!("{}, then run {repair}", first.join(", "))
    }
}
