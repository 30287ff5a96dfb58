//! `QuizDb` and `MemoryStore` must behave identically behind the gateway traits.

use std::path::Path;

use pretty_assertions::assert_eq;
use qw_core::{Difficulty, QuestionType, UsageCounters};
use qw_store::{
    CatalogReader, CatalogSeed, CatalogWriter, LessonScope, MemoryStore, NewQuestion,
    QuestionFilter, QuestionGateway, QuizDb,
};

const SEED: &str = r#"
[[families]]
id = "prompt-craft"
name = "Prompt Craft"

[[courses]]
id = "prompt-craft-ru"
family_id = "prompt-craft"
language = "ru"
title = "Промпты"

[[lessons]]
id = "pc-ru-01"
course_id = "prompt-craft-ru"
day_number = 1
title = "Ясные запросы"
body = "Формулируйте цель запроса."

[[questions]]
course_id = "prompt-craft-ru"
lesson_id = "pc-ru-01"
text = "Что такое промпт?"
options = ["Запрос", "Ответ", "Модель", "Токен"]
correct_index = 0
difficulty = "easy"
type = "recall"
usage = { shown = 40, answered = 30, correct = 12 }

[[questions]]
course_id = "prompt-craft-ru"
lesson_id = "pc-ru-01"
text = "Как уточнить расплывчатый запрос?"
options = ["Назвать цель", "Повторить", "Сократить", "Убрать контекст"]
correct_index = 0
difficulty = "medium"
type = "application"
"#;

fn replacement() -> NewQuestion {
    NewQuestion {
        text: "Какой запрос лучше подходит для краткого отчёта?".into(),
        options: [
            "Указать аудиторию и формат".into(),
            "Попросить больше слов".into(),
            "Сменить инструмент".into(),
            "Повторить запрос".into(),
        ],
        correct_index: 0,
        difficulty: Difficulty::Medium,
        question_type: QuestionType::Application,
        hashtags: vec!["#day-1".into(), "#lang-ru".into()],
        display_order: 1,
        active: true,
        usage: UsageCounters::default(),
    }
}

/// Runs the same scripted session and returns what a caller observes.
async fn scripted<S>(store: &S) -> (Vec<String>, Vec<u32>, u64)
where
    S: QuestionGateway + CatalogReader + CatalogWriter,
{
    let seed = CatalogSeed::from_toml_str(SEED, Path::new("seed.toml")).unwrap();
    store.import_catalog(&seed).await.unwrap();

    let lesson = store
        .lessons("prompt-craft-ru", false)
        .await
        .unwrap()
        .remove(0);
    let scope = LessonScope::for_lesson(&lesson);
    let before = store.find(&scope, QuestionFilter::Active).await.unwrap();
    let recall_usage = before[0].usage.shown;

    let recall: Vec<i64> = before
        .iter()
        .filter(|q| q.question_type == QuestionType::Recall)
        .map(|q| q.id)
        .collect();
    store
        .replace(&scope, &recall, &[replacement()])
        .await
        .unwrap();

    let after = store.find(&scope, QuestionFilter::All).await.unwrap();
    (
        after.iter().map(|q| q.text.clone()).collect(),
        after.iter().map(|q| q.display_order).collect(),
        recall_usage,
    )
}

#[tokio::test]
async fn libsql_and_memory_agree() {
    let db = QuizDb::open_local(":memory:").await.unwrap();
    let memory = MemoryStore::new();

    let from_db = scripted(&db).await;
    let from_memory = scripted(&memory).await;

    assert_eq!(from_db, from_memory);
    assert_eq!(from_db.1, vec![1, 2]);
    assert_eq!(from_db.2, 40);
    assert_eq!(db.course("prompt-craft-ru").await.unwrap().language, "ru");
}
