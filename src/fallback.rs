//! fallback — встроенный набор данных по умолчанию.
//!
//! Используется, когда backing-файл отсутствует или не разбирается:
//! движок продолжает отдавать чтения из этого документа, а мутации живут
//! только в памяти процесса (деградация, не ошибка).
//!
//! Форма идентична документу на диске: корневой объект
//! имя коллекции → массив записей.

use serde_json::json;

use crate::dataset::Dataset;

// Имена коллекций, которые несёт встроенный документ.
pub const COL_BLOG: &str = "Blog";
pub const COL_PROJECT: &str = "Project";
pub const COL_CASE_STUDY: &str = "CaseStudy";
pub const COL_TESTIMONIAL: &str = "Testimonial";
pub const COL_TEAM_MEMBER: &str = "TeamMember";
pub const COL_CAREER: &str = "Career";
pub const COL_LEAD: &str = "Lead";
pub const COL_MEDIA: &str = "Media";

/// Все имена коллекций встроенного документа (порядок фиксирован).
pub const DEFAULT_COLLECTIONS: &[&str] = &[
    COL_BLOG,
    COL_PROJECT,
    COL_CASE_STUDY,
    COL_TESTIMONIAL,
    COL_TEAM_MEMBER,
    COL_CAREER,
    COL_LEAD,
    COL_MEDIA,
];

/// Построить встроенный набор данных.
///
/// Несколько записей-заготовок, чтобы свежая установка (или read-only
/// окружение без файла) показывала живой контент, а не пустые страницы.
pub fn default_dataset() -> Dataset {
    let doc = json!({
        COL_BLOG: [
            {
                "id": "fb0000000000000000000001",
                "slug": "hello-world",
                "title": "Hello, world",
                "excerpt": "A first post to prove the pipeline works end to end.",
                "body": "This install is serving its built-in content.",
                "tags": ["announcement"],
                "published": true,
                "createdAt": "2024-01-15T09:00:00.000Z",
                "updatedAt": "2024-01-15T09:00:00.000Z"
            },
            {
                "id": "fb0000000000000000000002",
                "slug": "writing-with-satchel",
                "title": "Writing with Satchel",
                "excerpt": "How content lands in a single JSON file.",
                "body": "Every collection lives under one root object.",
                "tags": ["docs", "technology"],
                "published": true,
                "createdAt": "2024-02-01T10:30:00.000Z",
                "updatedAt": "2024-02-03T08:15:00.000Z"
            }
        ],
        COL_PROJECT: [
            {
                "id": "fb0000000000000000000003",
                "slug": "sample-project",
                "name": "Sample project",
                "summary": "Placeholder portfolio entry.",
                "featured": false,
                "createdAt": "2024-01-20T12:00:00.000Z",
                "updatedAt": "2024-01-20T12:00:00.000Z"
            }
        ],
        COL_CASE_STUDY: [],
        COL_TESTIMONIAL: [
            {
                "id": "fb0000000000000000000004",
                "author": "A. Client",
                "quote": "Shipped on time, every time.",
                "createdAt": "2024-03-05T16:45:00.000Z",
                "updatedAt": "2024-03-05T16:45:00.000Z"
            }
        ],
        COL_TEAM_MEMBER: [],
        COL_CAREER: [],
        COL_LEAD: [],
        COL_MEDIA: []
    });

    // Некорректный сид вырождается в пустой набор.
    serde_json::from_value(doc).unwrap_or_default()
}
