//! Student seeding, including course enrollments.

use chrono::{DateTime, Duration, Utc};
use classroll_models::{CourseId, StudentId, StudentStatus};
use fake::Fake;
use fake::faker::chrono::en::DateTimeBetween;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{SEED_EMAIL_DOMAIN, StudentSeed};

const BATCH_SIZE: usize = 1000;

/// Lowercased ASCII alphanumerics of `value`, for building emails.
fn email_part(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Mostly active students, with a tail of the other statuses.
fn weighted_status(roll: u8) -> StudentStatus {
    match roll {
        0..=6 => StudentStatus::Active,
        7 => StudentStatus::Inactive,
        8 => StudentStatus::Suspended,
        _ => StudentStatus::Graduated,
    }
}

/// `count` distinct indexes into a list of `len` items, starting at `start`.
fn course_window(start: usize, count: usize, len: usize) -> Vec<usize> {
    (0..count.min(len)).map(|j| (start + j) % len).collect()
}

/// Generates students in parallel; each is enrolled in between one and
/// `max_courses` of the `num_courses` seeded courses.
pub fn generate_students(count: usize, num_courses: usize, max_courses: usize) -> Vec<StudentSeed> {
    let now = Utc::now();
    let earliest = now - Duration::days(4 * 365);

    (0..count)
        .into_par_iter()
        .map(|i| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let date_joined: DateTime<Utc> = DateTimeBetween(earliest, now).fake();
            let last_login: Option<DateTime<Utc>> =
                ((0..10).fake::<u8>() < 7).then(|| DateTimeBetween(date_joined, now).fake());

            let course_indexes = if num_courses == 0 {
                Vec::new()
            } else {
                let wanted = (1..max_courses.clamp(1, num_courses) + 1).fake::<usize>();
                course_window((0..num_courses).fake(), wanted, num_courses)
            };

            StudentSeed {
                email: format!(
                    "{}.{}+{}@{}",
                    email_part(&first_name),
                    email_part(&last_name),
                    i,
                    SEED_EMAIL_DOMAIN
                ),
                name: format!("{} {}", first_name, last_name),
                cohort: (2021..2026).fake::<u16>().to_string(),
                status: weighted_status((0..10).fake()),
                date_joined,
                last_login,
                course_indexes,
            }
        })
        .collect()
}

pub async fn seed_students(
    db: &PgPool,
    count: usize,
    course_ids: &[CourseId],
    max_courses: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let students = generate_students(count, course_ids.len(), max_courses);
    println!("   ✓ Generated {} students in {:?}", students.len(), start_time.elapsed());

    let insert_start = Instant::now();
    let enrollments = insert_students_batch(db, &students, course_ids).await?;

    println!(
        "   ✓ Inserted {} students with {} enrollments in {:?}",
        students.len(),
        enrollments,
        insert_start.elapsed()
    );

    Ok(students.len())
}

/// Inserts students and their enrollments in one transaction, returning the
/// number of enrollments written.
pub async fn insert_students_batch(
    db: &PgPool,
    students: &[StudentSeed],
    course_ids: &[CourseId],
) -> Result<u64, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;
    let mut enrollments = 0;

    for chunk in students.chunks(BATCH_SIZE) {
        let ids = insert_students_chunk(&mut tx, chunk).await?;
        enrollments += enroll_chunk(&mut tx, &ids, chunk, course_ids).await?;
    }

    tx.commit().await?;
    Ok(enrollments)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> Result<Vec<StudentId>, Box<dyn std::error::Error>> {
    if students.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from(
        "INSERT INTO students (name, email, cohort, status, date_joined, last_login) VALUES ",
    );
    for i in 0..students.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 6;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6
        ));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for student in students {
        q = q
            .bind(&student.name)
            .bind(&student.email)
            .bind(&student.cohort)
            .bind(student.status)
            .bind(student.date_joined)
            .bind(student.last_login);
    }

    let ids = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

async fn enroll_chunk(
    tx: &mut Transaction<'_, Postgres>,
    student_ids: &[StudentId],
    students: &[StudentSeed],
    course_ids: &[CourseId],
) -> Result<u64, Box<dyn std::error::Error>> {
    let (enrolled, courses): (Vec<StudentId>, Vec<CourseId>) = student_ids
        .iter()
        .zip(students)
        .flat_map(|(id, student)| {
            student
                .course_indexes
                .iter()
                .filter_map(|&idx| course_ids.get(idx))
                .map(move |course_id| (*id, *course_id))
        })
        .unzip();

    if enrolled.is_empty() {
        return Ok(0);
    }

    let result = sqlx::query(
        "INSERT INTO student_courses (student_id, course_id)
         SELECT * FROM UNNEST($1::uuid[], $2::uuid[])
         ON CONFLICT DO NOTHING",
    )
    .bind(&enrolled)
    .bind(&courses)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Deletes seeded students; enrollments cascade.
pub async fn clear_students(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded students...");

    let result = sqlx::query("DELETE FROM students WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} students in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_student_has_a_course() {
        let students = generate_students(50, 4, 3);
        assert_eq!(students.len(), 50);
        for student in &students {
            assert!(!student.course_indexes.is_empty());
            assert!(student.course_indexes.len() <= 3);
            assert!(student.course_indexes.iter().all(|&i| i < 4));
        }
    }

    #[test]
    fn test_emails_are_unique_and_seeded() {
        let students = generate_students(200, 2, 1);
        let mut emails: Vec<_> = students.iter().map(|s| s.email.clone()).collect();
        assert!(emails.iter().all(|e| e.ends_with("@seed.classroll.dev")));
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), 200);
    }

    #[test]
    fn test_no_courses_means_no_enrollments() {
        let students = generate_students(5, 0, 3);
        assert!(students.iter().all(|s| s.course_indexes.is_empty()));
    }

    #[test]
    fn test_course_window_is_distinct() {
        assert_eq!(course_window(3, 3, 4), vec![3, 0, 1]);
        assert_eq!(course_window(0, 9, 2), vec![0, 1]);
    }

    #[test]
    fn test_weighted_status() {
        assert_eq!(weighted_status(0), StudentStatus::Active);
        assert_eq!(weighted_status(7), StudentStatus::Inactive);
        assert_eq!(weighted_status(8), StudentStatus::Suspended);
        assert_eq!(weighted_status(9), StudentStatus::Graduated);
    }
}
