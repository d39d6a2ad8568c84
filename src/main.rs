//! VolunteerHub operations binary
//!
//! Maintenance commands for a VolunteerHub deployment: apply migrations,
//! provision demo data, list upcoming events, and print aggregate
//! statistics.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use volunteerhub::config::Settings;
use volunteerhub::database::connection::{create_pool, run_migrations, DatabasePool, PoolConfig};
use volunteerhub::database::repositories::{EventRepository, RegistrationRepository, UserRepository};
use volunteerhub::models::event::CreateEventRequest;
use volunteerhub::models::user::{CreateUserRequest, Role, User};
use volunteerhub::services::auth::Identity;
use volunteerhub::services::{EventService, RegistrationLedger, ServiceFactory};
use volunteerhub::utils::helpers::current_date;
use volunteerhub::utils::logging;

#[derive(Parser, Debug)]
#[command(
    name = "volunteerhub",
    about = "Maintenance commands for a VolunteerHub deployment",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending database migrations
    Migrate,
    /// Provision demo users, events, and registrations (idempotent)
    Seed,
    /// Print one page of upcoming events as JSON, soonest first
    Upcoming {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Override the configured page size
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Print aggregate counts for users, events, and registrations as JSON
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    let _guard = logging::init_logging(&settings.logging)?;

    let pool = create_pool(&PoolConfig::from(&settings.database))
        .await
        .context("failed to connect to the database")?;

    match cli.command {
        Command::Migrate => {
            run_migrations(&pool).await?;
        }
        Command::Seed => {
            run_migrations(&pool).await?;
            seed(&pool).await?;
        }
        Command::Upcoming { page, per_page } => {
            let events = EventService::new(EventRepository::new(pool.clone()));
            let listing = events
                .upcoming(page, per_page.unwrap_or(settings.pagination.per_page))
                .await?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Command::Stats => {
            let services = ServiceFactory::new(
                UserRepository::new(pool.clone()),
                EventRepository::new(pool.clone()),
                RegistrationRepository::new(pool.clone()),
            );
            let overview = services.overview().await?;
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
    }

    Ok(())
}

/// Provision a small demo data set
///
/// Users are matched by login and events are only seeded into an empty
/// catalogue, so re-running the command changes nothing.
async fn seed(pool: &DatabasePool) -> anyhow::Result<()> {
    let user_repository = UserRepository::new(pool.clone());
    let event_repository = EventRepository::new(pool.clone());
    let registration_repository = RegistrationRepository::new(pool.clone());

    let admin = ensure_user(
        &user_repository,
        "admin",
        "Иванов",
        "Алексей",
        Role::Administrator,
    )
    .await?;
    let _moderator = ensure_user(
        &user_repository,
        "moderator",
        "Петрова",
        "Мария",
        Role::Moderator,
    )
    .await?;
    let volunteer = ensure_user(
        &user_repository,
        "volunteer",
        "Сидоров",
        "Иван",
        Role::Volunteer,
    )
    .await?;
    info!("Demo users ready: admin, moderator, volunteer");

    if event_repository.count().await? > 0 {
        info!("Events already present, skipping demo events");
        return Ok(());
    }

    let event_service = EventService::new(event_repository.clone());
    let cleanup_day = event_service
        .create_event(CreateEventRequest {
            title: "Городской субботник".to_string(),
            description: "Уборка парка и набережной, инвентарь выдаем на месте.".to_string(),
            event_date: current_date() + chrono::Duration::days(14),
            location: "Центральный парк".to_string(),
            required_volunteers: 10,
            image_filename: None,
            organizer_id: admin.id,
        })
        .await?;
    event_service
        .create_event(CreateEventRequest {
            title: "Марафон добрых дел".to_string(),
            description: "Помощь приюту для животных: корм, прогулки, уборка.".to_string(),
            event_date: current_date() + chrono::Duration::days(30),
            location: "Приют «Верный друг»".to_string(),
            required_volunteers: 25,
            image_filename: None,
            organizer_id: admin.id,
        })
        .await?;
    info!("Demo events created");

    let ledger = RegistrationLedger::new(registration_repository.clone());
    if ledger
        .registration_for(cleanup_day.id, volunteer.id)
        .await?
        .is_none()
    {
        let identity = Identity::from_user(&volunteer);
        ledger
            .submit_registration(&identity, cleanup_day.id, "+7 900 123-45-67".to_string())
            .await?;
        info!("Demo registration submitted");
    }

    Ok(())
}

async fn ensure_user(
    repository: &UserRepository,
    login: &str,
    last_name: &str,
    first_name: &str,
    role: Role,
) -> anyhow::Result<User> {
    if let Some(user) = repository.find_by_login(login).await? {
        return Ok(user);
    }

    let user = repository
        .create(CreateUserRequest {
            login: login.to_string(),
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            middle_name: None,
            role,
        })
        .await?;
    Ok(user)
}
