//! Administrative account creation, the only way to obtain a superuser.

use clap::Parser;
use hospital_backend::accounts::create_superuser;
use hospital_backend::config::AppConfig;
use hospital_backend::db::service::DbService;
use hospital_backend::utils::password::Argon2Hasher;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "create-superuser", about = "Create a staff + superuser account")]
struct Args {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long, default_value = "")]
    name: String,
}

#[actix_web::main]
async fn main() -> ExitCode {
    hospital_backend::init_tracing();
    let args = Args::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let db = match DbService::new(&config.db).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "could not connect to database");
            return ExitCode::FAILURE;
        }
    };

    match create_superuser(&db, &Argon2Hasher::default(), &args.email, &args.password, &args.name).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "superuser created");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "could not create superuser");
            ExitCode::FAILURE
        }
    }
}
