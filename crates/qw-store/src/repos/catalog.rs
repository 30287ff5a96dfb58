//! Catalog repository: families, courses, lessons, and seed import.

use std::collections::HashMap;

use qw_core::{Course, CourseFamily, LessonContent};

use crate::QuizDb;
use crate::error::StoreError;
use crate::gateway::{CatalogReader, CatalogWriter, ImportSummary};
use crate::helpers::{get_flag, get_opt_string, get_unsigned};
use crate::repos::question::insert_in;
use crate::seed::CatalogSeed;

fn row_to_course(row: &libsql::Row) -> Result<Course, StoreError> {
    Ok(Course {
        id: row.get::<String>(0)?,
        family_id: get_opt_string(row, 1)?,
        language: row.get::<String>(2)?,
        title: row.get::<String>(3)?,
        active: get_flag(row, 4)?,
    })
}

fn row_to_lesson(row: &libsql::Row) -> Result<LessonContent, StoreError> {
    Ok(LessonContent {
        id: row.get::<String>(0)?,
        course_id: row.get::<String>(1)?,
        day_number: get_unsigned(row, 2, "day_number")?,
        title: row.get::<String>(3)?,
        body: row.get::<String>(4)?,
        language: row.get::<String>(5)?,
        active: get_flag(row, 6)?,
    })
}

impl QuizDb {
    async fn course_languages(&self) -> Result<HashMap<String, String>, StoreError> {
        let mut rows = self.conn.query("SELECT id, language FROM courses", ()).await?;
        let mut languages = HashMap::new();
        while let Some(row) = rows.next().await? {
            languages.insert(row.get::<String>(0)?, row.get::<String>(1)?);
        }
        Ok(languages)
    }
}

impl CatalogReader for QuizDb {
    async fn families(&self) -> Result<Vec<CourseFamily>, StoreError> {
        let mut rows = self
            .conn
            .query("SELECT id, name FROM course_families ORDER BY id", ())
            .await?;
        let mut families = Vec::new();
        while let Some(row) = rows.next().await? {
            families.push(CourseFamily {
                id: row.get::<String>(0)?,
                name: row.get::<String>(1)?,
            });
        }
        Ok(families)
    }

    async fn courses(&self, include_inactive: bool) -> Result<Vec<Course>, StoreError> {
        let sql = if include_inactive {
            "SELECT id, family_id, language, title, active FROM courses ORDER BY id"
        } else {
            "SELECT id, family_id, language, title, active FROM courses WHERE active = 1 ORDER BY id"
        };
        let mut rows = self.conn.query(sql, ()).await?;
        let mut courses = Vec::new();
        while let Some(row) = rows.next().await? {
            courses.push(row_to_course(&row)?);
        }
        Ok(courses)
    }

    async fn course(&self, course_id: &str) -> Result<Course, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, family_id, language, title, active FROM courses WHERE id = ?1",
                [course_id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| StoreError::NotFound {
            entity: "course",
            id: course_id.to_string(),
        })?;
        row_to_course(&row)
    }

    async fn lessons(
        &self,
        course_id: &str,
        include_inactive: bool,
    ) -> Result<Vec<LessonContent>, StoreError> {
        let active_clause = if include_inactive { "" } else { " AND active = 1" };
        let sql = format!(
            "SELECT id, course_id, day_number, title, body, language, active FROM lessons \
             WHERE course_id = ?1{active_clause} ORDER BY day_number, id"
        );
        let mut rows = self.conn.query(&sql, [course_id]).await?;
        let mut lessons = Vec::new();
        while let Some(row) = rows.next().await? {
            lessons.push(row_to_lesson(&row)?);
        }
        Ok(lessons)
    }
}

impl CatalogWriter for QuizDb {
    async fn import_catalog(&self, seed: &CatalogSeed) -> Result<ImportSummary, StoreError> {
        let lessons = seed.lesson_entities(&self.course_languages().await?)?;
        let courses = seed.course_entities();
        let mut summary = ImportSummary::default();

        let tx = self.conn.transaction().await?;
        for family in &seed.families {
            tx.execute(
                "INSERT INTO course_families (id, name) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name",
                libsql::params![family.id.as_str(), family.name.as_str()],
            )
            .await?;
            summary.families += 1;
        }
        for course in &courses {
            tx.execute(
                "INSERT INTO courses (id, family_id, language, title, active)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET family_id = excluded.family_id,
                     language = excluded.language, title = excluded.title,
                     active = excluded.active",
                libsql::params![
                    course.id.as_str(),
                    course.family_id.as_deref(),
                    course.language.as_str(),
                    course.title.as_str(),
                    i64::from(course.active)
                ],
            )
            .await?;
            summary.courses += 1;
        }
        for lesson in &lessons {
            tx.execute(
                "INSERT INTO lessons (id, course_id, day_number, title, body, language, active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO UPDATE SET course_id = excluded.course_id,
                     day_number = excluded.day_number, title = excluded.title,
                     body = excluded.body, language = excluded.language,
                     active = excluded.active",
                libsql::params![
                    lesson.id.as_str(),
                    lesson.course_id.as_str(),
                    i64::from(lesson.day_number),
                    lesson.title.as_str(),
                    lesson.body.as_str(),
                    lesson.language.as_str(),
                    i64::from(lesson.active)
                ],
            )
            .await?;
            summary.lessons += 1;
        }
        for (scope, items) in seed.question_groups() {
            summary.questions += insert_in(&tx, &scope, &items).await?.len();
        }
        tx.commit().await?;

        tracing::info!(
            families = summary.families,
            courses = summary.courses,
            lessons = summary.lessons,
            questions = summary.questions,
            "catalog imported"
        );
        Ok(summary)
    }
}
