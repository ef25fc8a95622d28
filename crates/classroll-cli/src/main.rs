use classroll_cli::seeder::{self, SeedConfig};
use classroll_config::DatabaseConfig;
use classroll_db::{PgPool, init_db_pool, run_migrations};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "classroll-cli")]
#[command(about = "Classroll CLI - Demo data tools for the Classroll API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the database with fake courses, students, and users
    Seed {
        /// Number of courses to create
        #[arg(short = 'c', long, default_value = "8")]
        courses: usize,

        /// Number of students to create
        #[arg(short = 's', long, default_value = "100")]
        students: usize,

        /// Number of dashboard users to create
        #[arg(short = 'u', long, default_value = "3")]
        users: usize,

        /// Maximum courses each student is enrolled in
        #[arg(long, default_value = "3")]
        max_courses: usize,
    },
    /// Seed only dashboard users
    SeedUsers {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "3")]
        users: usize,
    },
    /// Clear all seeded data (keeps rows created through the API)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to prepare database: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Seed {
            courses,
            students,
            users,
            max_courses,
        } => {
            let config = SeedConfig::new(courses)
                .with_students(students)
                .with_users(users)
                .with_max_courses_per_student(max_courses);
            seeder::seed_all(&pool, config).await
        }
        Commands::SeedUsers { users } => seeder::users::seed_users(&pool, users)
            .await
            .map(|ids| println!("✅ Created {} users", ids.len())),
        Commands::ClearSeed => seeder::clear_all(&pool).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
