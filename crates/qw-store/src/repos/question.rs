//! Question repository: lesson-scoped find / delete / insert.

use chrono::Utc;
use qw_core::PersistedQuestion;

use crate::QuizDb;
use crate::error::StoreError;
use crate::gateway::{LessonScope, NewQuestion, QuestionFilter, QuestionGateway};
use crate::helpers::{get_flag, get_unsigned, parse_datetime, parse_enum, parse_json, to_sql_int};

const SELECT_COLUMNS: &str = "SELECT id, course_id, lesson_id, course_specific, text, options, \
     correct_index, difficulty, question_type, hashtags, display_order, active, \
     shown, answered, correct, created_at FROM questions";

fn row_to_question(row: &libsql::Row) -> Result<PersistedQuestion, StoreError> {
    let id = row.get::<i64>(0)?;
    let options: [String; 4] = parse_json(&row.get::<String>(5)?, "options")
        .map_err(|e| StoreError::InvalidState(format!("question {id}: {e}")))?;
    Ok(PersistedQuestion {
        id,
        course_id: row.get::<String>(1)?,
        lesson_id: row.get::<String>(2)?,
        course_specific: get_flag(row, 3)?,
        text: row.get::<String>(4)?,
        options,
        correct_index: get_unsigned(row, 6, "correct_index")?,
        difficulty: parse_enum(&row.get::<String>(7)?)?,
        question_type: parse_enum(&row.get::<String>(8)?)?,
        hashtags: parse_json(&row.get::<String>(9)?, "hashtags")?,
        display_order: get_unsigned(row, 10, "display_order")?,
        active: get_flag(row, 11)?,
        usage: qw_core::UsageCounters {
            shown: get_unsigned(row, 12, "shown")?,
            answered: get_unsigned(row, 13, "answered")?,
            correct: get_unsigned(row, 14, "correct")?,
        },
        created_at: parse_datetime(&row.get::<String>(15)?)?,
    })
}

fn encode_json<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Other(e.into()))
}

pub(crate) async fn find_in(
    conn: &libsql::Connection,
    scope: &LessonScope,
    filter: QuestionFilter,
) -> Result<Vec<PersistedQuestion>, StoreError> {
    let active_clause = match filter {
        QuestionFilter::Active => " AND active = 1",
        QuestionFilter::All => "",
    };
    let sql = format!(
        "{SELECT_COLUMNS} WHERE course_id = ?1 AND lesson_id = ?2 AND course_specific = ?3\
         {active_clause} ORDER BY display_order, id"
    );
    let mut rows = conn
        .query(
            &sql,
            libsql::params![
                scope.course_id.as_str(),
                scope.lesson_id.as_str(),
                i64::from(scope.course_specific)
            ],
        )
        .await?;
    let mut questions = Vec::new();
    while let Some(row) = rows.next().await? {
        questions.push(row_to_question(&row)?);
    }
    Ok(questions)
}

pub(crate) async fn delete_in(
    conn: &libsql::Connection,
    scope: &LessonScope,
    ids: &[i64],
) -> Result<usize, StoreError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let placeholders: Vec<String> = (0..ids.len()).map(|i| format!("?{}", i + 4)).collect();
    let sql = format!(
        "DELETE FROM questions WHERE course_id = ?1 AND lesson_id = ?2 AND course_specific = ?3 \
         AND id IN ({})",
        placeholders.join(", ")
    );
    let mut params: Vec<libsql::Value> = vec![
        scope.course_id.as_str().into(),
        scope.lesson_id.as_str().into(),
        i64::from(scope.course_specific).into(),
    ];
    params.extend(ids.iter().map(|id| libsql::Value::from(*id)));

    let deleted = conn.execute(&sql, libsql::params_from_iter(params)).await?;
    Ok(usize::try_from(deleted).unwrap_or(usize::MAX))
}

pub(crate) async fn insert_in(
    conn: &libsql::Connection,
    scope: &LessonScope,
    items: &[NewQuestion],
) -> Result<Vec<PersistedQuestion>, StoreError> {
    let mut inserted = Vec::with_capacity(items.len());
    for item in items {
        let now = Utc::now();
        conn.execute(
            "INSERT INTO questions (course_id, lesson_id, course_specific, text, options, \
             correct_index, difficulty, question_type, hashtags, display_order, active, \
             shown, answered, correct, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            libsql::params![
                scope.course_id.as_str(),
                scope.lesson_id.as_str(),
                i64::from(scope.course_specific),
                item.text.as_str(),
                encode_json(&item.options)?,
                i64::from(item.correct_index),
                item.difficulty.as_str(),
                item.question_type.as_str(),
                encode_json(&item.hashtags)?,
                i64::from(item.display_order),
                i64::from(item.active),
                to_sql_int(item.usage.shown),
                to_sql_int(item.usage.answered),
                to_sql_int(item.usage.correct),
                now.to_rfc3339()
            ],
        )
        .await?;
        inserted.push(PersistedQuestion {
            id: conn.last_insert_rowid(),
            course_id: scope.course_id.clone(),
            lesson_id: scope.lesson_id.clone(),
            course_specific: scope.course_specific,
            text: item.text.clone(),
            options: item.options.clone(),
            correct_index: item.correct_index,
            difficulty: item.difficulty,
            question_type: item.question_type,
            hashtags: item.hashtags.clone(),
            display_order: item.display_order,
            active: item.active,
            usage: item.usage,
            created_at: now,
        });
    }
    Ok(inserted)
}

impl QuestionGateway for QuizDb {
    async fn find(
        &self,
        scope: &LessonScope,
        filter: QuestionFilter,
    ) -> Result<Vec<PersistedQuestion>, StoreError> {
        find_in(&self.conn, scope, filter).await
    }

    async fn delete(&self, scope: &LessonScope, ids: &[i64]) -> Result<usize, StoreError> {
        let deleted = delete_in(&self.conn, scope, ids).await?;
        tracing::debug!(scope = %scope, deleted, "questions deleted");
        Ok(deleted)
    }

    async fn insert(
        &self,
        scope: &LessonScope,
        items: &[NewQuestion],
    ) -> Result<Vec<PersistedQuestion>, StoreError> {
        let inserted = insert_in(&self.conn, scope, items).await?;
        tracing::debug!(scope = %scope, inserted = inserted.len(), "questions inserted");
        Ok(inserted)
    }

    async fn replace(
        &self,
        scope: &LessonScope,
        delete_ids: &[i64],
        items: &[NewQuestion],
    ) -> Result<(usize, Vec<PersistedQuestion>), StoreError> {
        let tx = self.conn.transaction().await?;
        let deleted = delete_in(&tx, scope, delete_ids).await?;
        let inserted = insert_in(&tx, scope, items).await?;
        tx.commit().await?;
        tracing::debug!(
            scope = %scope,
            deleted,
            inserted = inserted.len(),
            "question pool replaced"
        );
        Ok((deleted, inserted))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use qw_core::{Difficulty, QuestionType, UsageCounters};

    use super::*;
    use crate::CatalogWriter;
    use crate::seed::CatalogSeed;

    async fn test_db() -> QuizDb {
        let db = QuizDb::open_local(":memory:").await.unwrap();
        let seed = CatalogSeed::from_toml_str(
            r#"
[[courses]]
id = "c1"
language = "en"
title = "Course"

[[lessons]]
id = "l1"
course_id = "c1"
day_number = 1
title = "Lesson"
"#,
            std::path::Path::new("seed.toml"),
        )
        .unwrap();
        db.import_catalog(&seed).await.unwrap();
        db
    }

    fn item(text: &str, order: u32) -> NewQuestion {
        NewQuestion {
            text: text.into(),
            options: ["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index: 1,
            difficulty: Difficulty::Easy,
            question_type: QuestionType::Application,
            hashtags: vec!["#day-1".into(), "#lang-en".into()],
            display_order: order,
            active: true,
            usage: UsageCounters::default(),
        }
    }

    #[tokio::test]
    async fn insert_then_find_round_trips_fields() {
        let db = test_db().await;
        let scope = LessonScope::new("c1", "l1");
        let inserted = db
            .insert(&scope, &[item("Second?", 2), item("First?", 1)])
            .await
            .unwrap();
        assert!(inserted[1].id > inserted[0].id);

        let found = db.find(&scope, QuestionFilter::Active).await.unwrap();
        let texts: Vec<&str> = found.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["First?", "Second?"]);
        assert_eq!(found[0].hashtags, vec!["#day-1", "#lang-en"]);
        assert_eq!(found[0].correct_index, 1);
    }

    #[tokio::test]
    async fn find_respects_scope_and_active_filter() {
        let db = test_db().await;
        let scope = LessonScope::new("c1", "l1");
        let shared = LessonScope {
            course_specific: false,
            ..scope.clone()
        };
        let mut retired = item("Retired?", 3);
        retired.active = false;
        db.insert(&scope, &[item("Kept?", 1), retired]).await.unwrap();
        db.insert(&shared, &[item("Shared?", 1)]).await.unwrap();

        assert_eq!(db.find(&scope, QuestionFilter::Active).await.unwrap().len(), 1);
        assert_eq!(db.find(&scope, QuestionFilter::All).await.unwrap().len(), 2);
        assert_eq!(db.find(&shared, QuestionFilter::All).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_ignores_ids_outside_scope() {
        let db = test_db().await;
        let scope = LessonScope::new("c1", "l1");
        let other = LessonScope::new("c1", "l2");
        let mine = db.insert(&scope, &[item("Mine?", 1)]).await.unwrap();
        let theirs = db.insert(&other, &[item("Theirs?", 1)]).await.unwrap();

        let deleted = db
            .delete(&scope, &[mine[0].id, theirs[0].id])
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(db.find(&other, QuestionFilter::All).await.unwrap().len(), 1);
        assert_eq!(db.delete(&scope, &[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn replace_deletes_and_inserts_together() {
        let db = test_db().await;
        let scope = LessonScope::new("c1", "l1");
        let old = db.insert(&scope, &[item("Old?", 1), item("Stays?", 2)]).await.unwrap();

        let (deleted, inserted) = db
            .replace(&scope, &[old[0].id], &[item("New?", 1)])
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(inserted.len(), 1);

        let texts: Vec<String> = db
            .find(&scope, QuestionFilter::Active)
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.text)
            .collect();
        assert_eq!(texts, vec!["New?".to_string(), "Stays?".to_string()]);
    }

    #[tokio::test]
    async fn malformed_options_are_reported() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO questions (course_id, lesson_id, course_specific, text, options, \
                 correct_index, difficulty, question_type, hashtags, display_order, created_at)
                 VALUES ('c1', 'l1', 1, 'Broken?', '[\"only\",\"three\",\"options\"]', 0, \
                 'easy', 'application', '[]', 1, datetime('now'))",
                (),
            )
            .await
            .unwrap();
        let err = db
            .find(&LessonScope::new("c1", "l1"), QuestionFilter::Active)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidState(_)));
    }
}
