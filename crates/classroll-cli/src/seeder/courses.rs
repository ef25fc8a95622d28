//! Course seeding.

use classroll_models::CourseId;
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{CourseSeed, SEED_CODE_PREFIX};

const SUBJECTS: &[&str] = &[
    "Algebra",
    "Biology",
    "Chemistry",
    "Computer Science",
    "Economics",
    "English Literature",
    "Geography",
    "History",
    "Music",
    "Physics",
    "Statistics",
    "Visual Arts",
];

fn abbreviation(subject: &str) -> String {
    subject
        .split_whitespace()
        .flat_map(|word| word.chars().take(if subject.contains(' ') { 2 } else { 3 }))
        .collect::<String>()
        .to_uppercase()
}

/// Generates `count` courses, cycling through the subject list and adding a
/// level suffix once every subject is used.
pub fn generate_courses(count: usize) -> Vec<CourseSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let subject = SUBJECTS[i % SUBJECTS.len()];
            let level = i / SUBJECTS.len() + 1;
            let name = if level == 1 {
                subject.to_string()
            } else {
                format!("{} {}", subject, level)
            };
            let slug = name.to_lowercase().replace(' ', "-");

            CourseSeed {
                code: format!("{}{}-{:03}", SEED_CODE_PREFIX, abbreviation(subject), i + 1),
                description: Some(Sentence(6..12).fake()),
                avatar: format!("/avatars/courses/{}.png", slug),
                name,
            }
        })
        .collect()
}

pub async fn seed_courses(
    db: &PgPool,
    count: usize,
) -> Result<Vec<CourseId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📚 Seeding {} courses...", count);

    let courses = generate_courses(count);
    let mut tx = db.begin().await?;
    let ids = insert_courses_chunk(&mut tx, &courses).await?;
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} courses in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

async fn insert_courses_chunk(
    tx: &mut Transaction<'_, Postgres>,
    courses: &[CourseSeed],
) -> Result<Vec<CourseId>, Box<dyn std::error::Error>> {
    if courses.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO courses (name, code, description, avatar) VALUES ");
    for i in 0..courses.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 4;
        query.push_str(&format!("(${}, ${}, ${}, ${})", p + 1, p + 2, p + 3, p + 4));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for course in courses {
        q = q
            .bind(&course.name)
            .bind(&course.code)
            .bind(&course.description)
            .bind(&course.avatar);
    }

    let ids = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Deletes seeded courses nobody is enrolled in anymore.
///
/// Run after seeded students are cleared. A seeded course that a registered
/// student still attends is kept, so no student is left without courses.
pub async fn clear_courses(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded courses...");

    let pattern = format!("{}%", SEED_CODE_PREFIX);
    let result = sqlx::query(
        r#"
        DELETE FROM courses c
        WHERE c.code LIKE $1
          AND NOT EXISTS (SELECT 1 FROM student_courses sc WHERE sc.course_id = c.id)
        "#,
    )
    .bind(&pattern)
    .execute(db)
    .await?
    .rows_affected();

    let kept: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE code LIKE $1")
        .bind(&pattern)
        .fetch_one(db)
        .await?;

    println!(
        "   ✓ Deleted {} courses in {:?}",
        result,
        start_time.elapsed()
    );
    if kept > 0 {
        println!("   ↪ Kept {} seeded courses with registered students", kept);
    }

    Ok(result)
}
