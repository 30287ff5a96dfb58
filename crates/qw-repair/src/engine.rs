//! Per-lesson repair state machine.
//!
//! snapshot → classify → shortcut | (replace → fill) → final batch check → commit
//!
//! All decisions are made against in-memory state and collected in a
//! [`MutationPlan`]; the gateway sees a single `replace` call at the end, and
//! none at all in dry-run mode.

use qw_core::{FindingCode, LessonContent, PersistedQuestion, QuotaTarget, TypeCounts};
use qw_generate::{CandidateSource, GenerationRequest};
use qw_oracle::{BatchVerdict, LessonContext, QualityOracle, QuestionView};
use qw_store::{CatalogReader, LessonScope, NewQuestion, QuestionFilter, QuestionGateway};

use crate::accepted::AcceptedSet;
use crate::backup::{BackupArtifact, BackupWriter};
use crate::classify::{Classification, classify};
use crate::error::RepairError;
use crate::outcome::{LessonOutcome, LessonStatus, RunSummary};
use crate::plan::{MutationPlan, RemovalReason};
use crate::policy::RetryPolicy;
use crate::seed::{fill_seed, round_seed};
use crate::select::first_acceptable;

/// Run-wide switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairOptions {
    /// Decide everything, write backups, but skip gateway writes.
    pub dry_run: bool,
    /// Replace every active question, starting from an empty accepted set.
    pub force_rewrite: bool,
}

/// Drives lessons toward quota with a generator and an oracle.
pub struct RepairEngine<'a, S, G: ?Sized, O: ?Sized> {
    store: &'a S,
    generator: &'a G,
    oracle: &'a O,
    backups: BackupWriter,
    policy: RetryPolicy,
    quota: QuotaTarget,
    options: RepairOptions,
}

/// Working state threaded through the phases of one lesson.
struct LessonRun<'l> {
    lesson: &'l LessonContent,
    request: GenerationRequest<'l>,
    context: LessonContext<'l>,
    plan: MutationPlan,
    generator_calls: usize,
}

impl<'a, S, G, O> RepairEngine<'a, S, G, O>
where
    S: QuestionGateway + CatalogReader,
    G: CandidateSource + ?Sized,
    O: QualityOracle + ?Sized,
{
    #[must_use]
    pub fn new(store: &'a S, generator: &'a G, oracle: &'a O, backups: BackupWriter) -> Self {
        Self {
            store,
            generator,
            oracle,
            backups,
            policy: RetryPolicy::default(),
            quota: QuotaTarget::default(),
            options: RepairOptions::default(),
        }
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
    pub fn with_options(mut self, options: RepairOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Repair every active lesson of a course in day order, or only `day`.
    ///
    /// # Errors
    ///
    /// Returns `RepairError` on storage failures, malformed lessons, backup
    /// failures, or when there is nothing to repair. Non-compliant lessons are
    /// reported in the summary instead.
    pub async fn repair_course(
        &self,
        course_id: &str,
        day: Option<u32>,
    ) -> Result<RunSummary, RepairError> {
        let course = self.store.course(course_id).await?;
        let families = self.store.families().await?;
        let family = course.generation_family(&families);
        let lessons: Vec<LessonContent> = self
            .store
            .lessons(course_id, false)
            .await?
            .into_iter()
            .filter(|l| day.is_none_or(|d| l.day_number == d))
            .collect();
        if lessons.is_empty() {
            return Err(RepairError::NoLessons {
                course_id: course_id.to_string(),
                day,
            });
        }

        tracing::info!(
            course = course_id,
            family = %family,
            lessons = lessons.len(),
            dry_run = self.options.dry_run,
            "repairing course"
        );
        let mut outcomes = Vec::with_capacity(lessons.len());
        for lesson in &lessons {
            outcomes.push(self.repair_lesson(lesson, &family).await?);
        }
        Ok(RunSummary {
            course_id: course_id.to_string(),
            dry_run: self.options.dry_run,
            lessons: outcomes,
        })
    }

    /// Repair one lesson.
    ///
    /// # Errors
    ///
    /// Returns `RepairError` for malformed lessons and storage or backup failures.
    pub async fn repair_lesson(
        &self,
        lesson: &LessonContent,
        course_family: &str,
    ) -> Result<LessonOutcome, RepairError> {
        lesson.check_well_formed()?;
        let scope = LessonScope::for_lesson(lesson);
        let active = self.store.find(&scope, QuestionFilter::Active).await?;

        let backup = self.backups.write(&BackupArtifact::new(
            &scope,
            lesson.day_number,
            active.clone(),
            self.options.dry_run,
        ))?;

        let mut run = LessonRun {
            lesson,
            request: GenerationRequest::for_lesson(lesson, course_family),
            context: LessonContext::from(lesson),
            plan: MutationPlan::default(),
            generator_calls: 0,
        };
        let classification = classify(&active, self.oracle, &run.context);
        let before = TypeCounts::tally(active.iter().map(|q| q.question_type));
        let shortcut =
            !self.options.force_rewrite && self.quota.is_satisfied(&classification.valid_counts());

        tracing::debug!(
            course = %lesson.course_id,
            lesson = %lesson.id,
            day = lesson.day_number,
            valid = classification.valid.len(),
            invalid = classification.invalid.len(),
            duplicates = classification.duplicates.len(),
            shortcut,
            "lesson classified"
        );

        let mut fill_deficit = 0;
        let kept: Vec<PersistedQuestion> = if shortcut {
            for rejected in &classification.invalid {
                run.plan.remove(&rejected.question, RemovalReason::Invalid);
            }
            remove_duplicates(&classification, &mut run.plan);
            classification.valid.clone()
        } else {
            let (targets, kept) = if self.options.force_rewrite {
                let mut all = active.clone();
                all.sort_by_key(|q| (q.display_order, q.id));
                (all, Vec::new())
            } else {
                remove_duplicates(&classification, &mut run.plan);
                let invalid = classification
                    .invalid
                    .iter()
                    .map(|r| r.question.clone())
                    .collect();
                (invalid, classification.valid.clone())
            };
            let accepted =
                self.replace_phase(&mut run, &targets, AcceptedSet::from_questions(&kept));
            let next_order = active.iter().map(|q| q.display_order).max().unwrap_or(0) + 1;
            fill_deficit = self.quota.deficits(&accepted.counts()).total;
            self.fill_phase(&mut run, accepted, next_order);
            kept
        };

        let (batch, after) = self.final_check(&run, &kept);
        let codes = self.outcome_codes(&batch, &after);
        let status = if batch.valid && codes.is_empty() {
            LessonStatus::Compliant
        } else {
            LessonStatus::NonCompliant
        };

        let committed = if self.options.dry_run || run.plan.is_empty() {
            false
        } else {
            self.store
                .replace(&scope, &run.plan.delete_ids(), &run.plan.new_items())
                .await?;
            true
        };

        tracing::info!(
            course = %lesson.course_id,
            lesson = %lesson.id,
            day = lesson.day_number,
            status = ?status,
            removed = run.plan.removals.len(),
            inserted = run.plan.insertions.len(),
            generator_calls = run.generator_calls,
            committed,
            "lesson repaired"
        );

        Ok(LessonOutcome {
            course_id: lesson.course_id.clone(),
            lesson_id: lesson.id.clone(),
            day_number: lesson.day_number,
            status,
            codes,
            shortcut,
            force_rewrite: self.options.force_rewrite,
            before,
            after,
            kept: kept.len(),
            generator_calls: run.generator_calls,
            fill_deficit,
            batch,
            plan: run.plan,
            dry_run: self.options.dry_run,
            committed,
            backup,
        })
    }

    /// Replace each target in its display slot, or drop it after the round limit.
    fn replace_phase(
        &self,
        run: &mut LessonRun<'_>,
        targets: &[PersistedQuestion],
        mut accepted: AcceptedSet,
    ) -> AcceptedSet {
        for (slot, target) in targets.iter().enumerate() {
            let mut attempts = self.policy.replace_attempts();
            let mut replacement = None;
            while let Some(round) = attempts.advance() {
                let seed = round_seed(&run.lesson.id, slot, round);
                let batch = self.generator.generate(
                    &run.request,
                    accepted.keys(),
                    self.policy.batch_size,
                    seed,
                );
                run.generator_calls += 1;
                replacement = first_acceptable(batch, self.oracle, &run.context, &accepted, None);
                if replacement.is_some() {
                    break;
                }
            }

            match replacement {
                Some(candidate) => {
                    tracing::debug!(
                        lesson = %run.lesson.id,
                        slot = target.display_order,
                        round = attempts.used(),
                        replaced = target.id,
                        "replacement accepted"
                    );
                    accepted = accepted.with(&candidate.text, candidate.question_type);
                    run.plan.replace(
                        target,
                        NewQuestion::from_candidate(&candidate, target.display_order),
                        &candidate.metadata.strategy,
                    );
                }
                None => {
                    tracing::warn!(
                        lesson = %run.lesson.id,
                        slot = target.display_order,
                        id = target.id,
                        rounds = attempts.used(),
                        "no replacement found, dropping question"
                    );
                    run.plan.remove(target, RemovalReason::ReplacementExhausted);
                }
            }
        }
        accepted
    }

    /// Append questions of the most urgent type until the quota is met or the
    /// fill budget runs out.
    fn fill_phase(
        &self,
        run: &mut LessonRun<'_>,
        mut accepted: AcceptedSet,
        mut next_order: u32,
    ) {
        let deficits = self.quota.deficits(&accepted.counts());
        let mut attempts = self.policy.fill_attempts(deficits.total);
        while let Some(need) = self.quota.deficits(&accepted.counts()).most_urgent() {
            let Some(iteration) = attempts.advance() else {
                tracing::warn!(
                    lesson = %run.lesson.id,
                    iterations = attempts.used(),
                    need = %need,
                    "fill budget exhausted"
                );
                break;
            };
            let seed = fill_seed(&run.lesson.id, iteration);
            let batch = self.generator.generate(
                &run.request,
                accepted.keys(),
                self.policy.batch_size,
                seed,
            );
            run.generator_calls += 1;
            if let Some(candidate) =
                first_acceptable(batch, self.oracle, &run.context, &accepted, Some(need))
            {
                accepted = accepted.with(&candidate.text, candidate.question_type);
                run.plan.append(
                    NewQuestion::from_candidate(&candidate, next_order),
                    &candidate.metadata.strategy,
                );
                next_order += 1;
            }
        }
    }

    /// Batch verdict and type counts over the pool the plan would leave behind.
    fn final_check(
        &self,
        run: &LessonRun<'_>,
        kept: &[PersistedQuestion],
    ) -> (BatchVerdict, TypeCounts) {
        let mut views: Vec<(u32, QuestionView<'_>)> = kept
            .iter()
            .map(|q| (q.display_order, QuestionView::from(q)))
            .collect();
        views.extend(
            run.plan
                .insertions
                .iter()
                .map(|i| (i.question.display_order, view_of_new(&i.question))),
        );
        views.sort_by_key(|(order, _)| *order);
        let views: Vec<QuestionView<'_>> = views.into_iter().map(|(_, v)| v).collect();

        let counts = TypeCounts::tally(views.iter().map(|v| v.question_type));
        let verdict = self
            .oracle
            .validate_batch(&views, &run.lesson.language, &run.lesson.title);
        (verdict, counts)
    }

    fn outcome_codes(&self, batch: &BatchVerdict, after: &TypeCounts) -> Vec<FindingCode> {
        let mut codes = Vec::new();
        let deficits = self.quota.deficits(after);
        if after.recall > self.quota.recall_max {
            codes.push(FindingCode::RecallPresent);
        }
        if deficits.application > 0 {
            codes.push(FindingCode::TooFewApplicationQuestions);
        }
        if deficits.total > 0 {
            codes.push(FindingCode::TooFewValidQuestions);
        }
        if !deficits.is_zero() {
            codes.push(FindingCode::GeneratorInsufficientForMinimums);
        }
        if !batch.valid && codes.is_empty() {
            codes.push(FindingCode::InvalidQuestionsPresent);
        }
        codes.sort();
        codes
    }
}

fn remove_duplicates(classification: &Classification, plan: &mut MutationPlan) {
    for duplicate in &classification.duplicates {
        plan.remove(&duplicate.question, RemovalReason::Duplicate);
    }
}

fn view_of_new(question: &NewQuestion) -> QuestionView<'_> {
    QuestionView {
        text: &question.text,
        options: &question.options,
        correct_index: question.correct_index,
        question_type: question.question_type,
        difficulty: question.difficulty,
    }
}
