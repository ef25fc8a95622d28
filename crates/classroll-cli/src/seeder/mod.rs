//! Demo data seeding.
//!
//! Generation runs in parallel on Rayon; inserts are batched inside one
//! transaction per entity type.

pub mod courses;
pub mod models;
pub mod students;
pub mod users;

pub use models::SeedConfig;

use sqlx::PgPool;
use std::time::Instant;

/// Seeds courses, then students enrolled in them, then dashboard users.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Courses: {}", config.courses);
    println!(
        "   - Students: {} (up to {} courses each)",
        config.students, config.max_courses_per_student
    );
    println!("   - Users: {}", config.users);

    if config.students > 0 && config.courses == 0 {
        return Err("students need at least one course to enroll in".into());
    }

    println!();
    let course_ids = courses::seed_courses(db, config.courses).await?;
    students::seed_students(db, config.students, &course_ids, config.max_courses_per_student)
        .await?;
    users::seed_users(db, config.users).await?;

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    Ok(())
}

/// Removes every seeded row, leaving data created through the API alone.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🧹 Clearing seeded data...");

    students::clear_students(db).await?;
    courses::clear_courses(db).await?;
    users::clear_users(db).await?;

    println!("\n✅ Cleared seeded data in {:?}", start_time.elapsed());
    Ok(())
}
