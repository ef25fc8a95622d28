//! Dashboard user seeding.

use classroll_models::{Theme, UserId};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use super::models::{SEED_EMAIL_DOMAIN, UserSeed};

pub fn generate_users(count: usize) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            UserSeed {
                email: format!("user{}@{}", i + 1, SEED_EMAIL_DOMAIN),
                avatar: Some(format!("/avatars/users/{}.png", i + 1)),
                theme: if i % 2 == 0 { Theme::Light } else { Theme::Dark },
                first_name,
                last_name,
            }
        })
        .collect()
}

pub async fn seed_users(
    db: &PgPool,
    count: usize,
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} users...", count);

    let users = generate_users(count);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(users.len());

    for user in &users {
        let id: UserId = sqlx::query_scalar(
            "INSERT INTO users (email, first_name, last_name, avatar, theme)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (email) DO UPDATE SET first_name = EXCLUDED.first_name
             RETURNING id",
        )
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.avatar)
        .bind(user.theme)
        .fetch_one(&mut *tx)
        .await?;
        ids.push(id);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

pub async fn clear_users(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
