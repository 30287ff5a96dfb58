//! Read-only traversal that turns the catalog into an [`AuditReport`].

use chrono::Utc;
use qw_core::{CourseFamily, FindingCode, LessonContent, QuestionType, QuotaTarget};
use qw_generate::{CandidateSource, GenerationRequest};
use qw_oracle::{
    ContentQualityOracle, HeuristicContentScorer, LanguageIntegrityOracle, LessonContext,
    QualityOracle, ScriptIntegrityOracle,
};
use qw_repair::seed::capacity_seed;
use qw_repair::{AcceptedSet, Classification, RetryPolicy, accept_batch, classify};
use qw_store::{CatalogReader, LessonScope, QuestionFilter, QuestionGateway, StoreError};

use crate::error::AuditError;
use crate::finding::{CapacityProjection, LessonCounts, LessonFinding, LessonState, QuestionSample};
use crate::hierarchy::{FamilyGroup, PlacedCourse, UNASSIGNED, group_courses};
use crate::report::{AuditReport, AuditSettings, CourseReport, FamilyReport, Rollup};

/// Audits every lesson reachable from the catalog without writing anything.
pub struct Auditor<'a, S, G: ?Sized, O: ?Sized> {
    store: &'a S,
    generator: &'a G,
    oracle: &'a O,
    language: Box<dyn LanguageIntegrityOracle + 'a>,
    content: Box<dyn ContentQualityOracle + 'a>,
    policy: RetryPolicy,
    quota: QuotaTarget,
    settings: AuditSettings,
}

impl<'a, S, G, O> Auditor<'a, S, G, O>
where
    S: QuestionGateway + CatalogReader,
    G: CandidateSource + ?Sized,
    O: QualityOracle + ?Sized,
{
    #[must_use]
    pub fn new(store: &'a S, generator: &'a G, oracle: &'a O) -> Self {
        Self {
            store,
            generator,
            oracle,
            language: Box::new(ScriptIntegrityOracle::default()),
            content: Box::new(HeuristicContentScorer::default()),
            policy: RetryPolicy::default(),
            quota: QuotaTarget::default(),
            settings: AuditSettings::default(),
        }
    }

    #[must_use]
    pub fn with_language_oracle(mut self, oracle: impl LanguageIntegrityOracle + 'a) -> Self {
        self.language = Box::new(oracle);
        self
    }

    #[must_use]
    pub fn with_content_oracle(mut self, oracle: impl ContentQualityOracle + 'a) -> Self {
        self.content = Box::new(oracle);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_quota(mut self, quota: QuotaTarget) -> Self {
        self.quota = quota;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: AuditSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Walk family → course → lesson and collect findings.
    ///
    /// Malformed lesson records and unreadable question rows become
    /// `FATAL_STORAGE_OR_INPUT_ERROR` findings; the walk continues so the
    /// report names every broken record.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::UnknownFamily` for a family filter matching
    /// nothing, and `AuditError::Store` when the catalog cannot be read.
    pub async fn run(&self) -> Result<AuditReport, AuditError> {
        let families = self.store.families().await?;
        let courses = self.store.courses(self.settings.include_inactive).await?;
        let mut groups = group_courses(&families, courses);

        if let Some(filter) = &self.settings.family {
            let known = filter == UNASSIGNED
                || families.iter().any(|f| &f.id == filter)
                || groups.iter().any(|g| &g.family_id == filter);
            if !known {
                return Err(AuditError::UnknownFamily(filter.clone()));
            }
            groups.retain(|g| &g.family_id == filter);
        }

        tracing::info!(
            families = groups.len(),
            include_inactive = self.settings.include_inactive,
            oracle = self.oracle.version(),
            "audit started"
        );

        let mut report = AuditReport {
            generated_at: Utc::now(),
            oracle_version: self.oracle.version().to_string(),
            settings: self.settings.clone(),
            totals: Rollup::default(),
            families: Vec::with_capacity(groups.len()),
        };
        for group in groups {
            let family = self.audit_family(group, &families).await?;
            report.totals.merge(&family.totals);
            report.families.push(family);
        }

        tracing::info!(
            lessons = report.totals.lessons,
            attention = report.totals.attention(),
            fatal = report.totals.fatal,
            "audit finished"
        );
        Ok(report)
    }

    async fn audit_family(
        &self,
        group: FamilyGroup,
        families: &[CourseFamily],
    ) -> Result<FamilyReport, AuditError> {
        let mut family = FamilyReport {
            family_id: group.family_id,
            name: group.name,
            totals: Rollup::default(),
            courses: Vec::with_capacity(group.courses.len()),
        };
        for placed in group.courses {
            let course = self.audit_course(placed, families).await?;
            family.totals.merge(&course.totals);
            family.courses.push(course);
        }
        Ok(family)
    }

    async fn audit_course(
        &self,
        placed: PlacedCourse,
        families: &[CourseFamily],
    ) -> Result<CourseReport, AuditError> {
        let PlacedCourse { course, link } = placed;
        // Same family resolution as `qw repair`, so the capacity check
        // projects what a repair run would actually generate.
        let generation_family = course.generation_family(families);
        let lessons = self
            .store
            .lessons(&course.id, self.settings.include_inactive)
            .await?;

        let mut report = CourseReport {
            course_id: course.id,
            title: course.title,
            language: course.language,
            active: course.active,
            link,
            totals: Rollup::default(),
            lessons: Vec::with_capacity(lessons.len()),
        };
        for lesson in &lessons {
            let finding = self.audit_lesson(lesson, &generation_family).await?;
            tracing::debug!(
                course = %report.course_id,
                lesson = %lesson.id,
                day = lesson.day_number,
                state = ?finding.state,
                codes = ?finding.codes,
                "lesson audited"
            );
            report.totals.add(&finding);
            report.lessons.push(finding);
        }
        Ok(report)
    }

    /// Findings for one lesson.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::Store` for storage failures other than
    /// unreadable question rows.
    pub async fn audit_lesson(
        &self,
        lesson: &LessonContent,
        course_family: &str,
    ) -> Result<LessonFinding, AuditError> {
        if let Err(e) = lesson.check_well_formed() {
            return Ok(fatal_finding(lesson, e.to_string()));
        }
        let scope = LessonScope::for_lesson(lesson);
        let active = match self.store.find(&scope, QuestionFilter::Active).await {
            Ok(active) => active,
            Err(StoreError::InvalidState(detail)) => {
                tracing::warn!(lesson = %lesson.id, %detail, "unreadable question rows");
                return Ok(fatal_finding(lesson, detail));
            }
            Err(e) => return Err(e.into()),
        };

        let context = LessonContext::from(lesson);
        let classification = classify(&active, self.oracle, &context);
        let recall = active
            .iter()
            .filter(|q| q.question_type == QuestionType::Recall)
            .count();
        let counts = LessonCounts::from_classification(&classification, recall);
        let language = self.language.check(lesson);
        let content = self.content.score(lesson);

        let mut codes = Vec::new();
        if !language.ok {
            codes.push(FindingCode::LanguageIntegrityFailure);
        }
        if content.score < self.settings.min_lesson_score {
            codes.push(FindingCode::QualityBelowThreshold);
        }
        if recall > self.quota.recall_max {
            codes.push(FindingCode::RecallPresent);
        }
        let deficits = self.quota.deficits(&counts.valid_types);
        if deficits.total > 0 {
            codes.push(FindingCode::TooFewValidQuestions);
        }
        if deficits.application > 0 {
            codes.push(FindingCode::TooFewApplicationQuestions);
        }
        if !classification.invalid.is_empty() {
            codes.push(FindingCode::InvalidQuestionsPresent);
        }
        if !classification.duplicates.is_empty() {
            codes.push(FindingCode::DuplicateQuestionsPresent);
        }

        let capacity = (!deficits.is_zero())
            .then(|| self.project_capacity(lesson, course_family, &context, &classification));
        if capacity.is_some_and(|c| !c.sufficient) {
            codes.push(FindingCode::GeneratorInsufficientForMinimums);
        }
        codes.sort();

        Ok(LessonFinding {
            lesson_id: lesson.id.clone(),
            day_number: lesson.day_number,
            title: lesson.title.clone(),
            language: lesson.language.clone(),
            active: lesson.active,
            state: LessonState::from_codes(&codes),
            codes,
            counts,
            first_error: classification.first_error().map(String::from),
            duplicate_samples: QuestionSample::duplicates(&classification),
            invalid_samples: QuestionSample::invalid(&classification),
            language_check: Some(language),
            content: Some(content),
            capacity,
        })
    }

    /// One generator call, filtered the way repair filters candidates.
    fn project_capacity(
        &self,
        lesson: &LessonContent,
        course_family: &str,
        context: &LessonContext<'_>,
        classification: &Classification,
    ) -> CapacityProjection {
        let accepted = AcceptedSet::from_questions(&classification.valid);
        let valid_counts = accepted.counts();
        let request = GenerationRequest::for_lesson(lesson, course_family);
        let seed = capacity_seed(&lesson.id);
        let requested = self.policy.batch_size;
        let batch = self
            .generator
            .generate(&request, accepted.keys(), requested, seed);
        let after = accept_batch(&batch, self.oracle, context, accepted);
        let projected = after.counts();

        CapacityProjection {
            seed,
            requested,
            generated: batch.len(),
            acceptable: projected.total() - valid_counts.total(),
            deficits: self.quota.deficits(&valid_counts),
            projected,
            sufficient: self.quota.is_satisfied(&projected),
        }
    }
}

fn fatal_finding(lesson: &LessonContent, detail: String) -> LessonFinding {
    let codes = vec![FindingCode::FatalStorageOrInputError];
    LessonFinding {
        lesson_id: lesson.id.clone(),
        day_number: lesson.day_number,
        title: lesson.title.clone(),
        language: lesson.language.clone(),
        active: lesson.active,
        state: LessonState::from_codes(&codes),
        codes,
        counts: LessonCounts::default(),
        first_error: Some(detail),
        duplicate_samples: Vec::new(),
        invalid_samples: Vec::new(),
        language_check: None,
        content: None,
        capacity: None,
    }
}
