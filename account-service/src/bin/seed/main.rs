use account_service::config::Config;
use account_service::domain::user::models::DisplayName;
use account_service::domain::user::models::EmailAddress;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::domain::user::ports::UserRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use auth::PasswordHasher;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Accounts inserted by a seed run. Existing emails are left untouched.
const SEED_USERS: [(&str, &str); 5] = [
    ("ada.lovelace@example.com", "Ada Lovelace"),
    ("grace.hopper@example.com", "Grace Hopper"),
    ("alan.turing@example.com", "Alan Turing"),
    ("margaret.hamilton@example.com", "Margaret Hamilton"),
    ("katherine.johnson@example.com", "Katherine Johnson"),
];

/// Password assigned to every seeded account. Development use only.
const DEFAULT_PASSWORD: &str = "changeme123";

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=info,seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    let repository = PostgresUserRepository::new(pg_pool);
    let hasher = PasswordHasher::new();

    tracing::warn!("Seeded accounts use the default development password");

    let mut created = 0;
    let mut skipped = 0;

    for (email, name) in SEED_USERS {
        let email = EmailAddress::new(email.to_string())?;
        let name = DisplayName::new(name.to_string())?;

        if repository.find_by_email(&email).await?.is_some() {
            tracing::info!(email = %email, "Seed user already exists, skipping");
            skipped += 1;
            continue;
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: email.clone(),
            name,
            password_hash: hasher.hash(DEFAULT_PASSWORD)?,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        repository.create(user).await?;
        tracing::info!(email = %email, "Seed user created");
        created += 1;
    }

    tracing::info!(created, skipped, "Seeding complete");

    Ok(())
}
