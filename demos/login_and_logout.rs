//! Logs a user in, reads a few things back, and logs out again.
//!
//! Run with:
//! ```bash
//! USERAPP_APP_ID=your-app-id \
//! USERAPP_LOGIN=jdoe81 \
//! USERAPP_PASSWORD=secret \
//! cargo run --example login_and_logout
//! ```

use std::env;
use userapp::{Api, Error};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let app_id = match env::var("USERAPP_APP_ID") {
        Ok(app_id) => app_id,
        Err(_) => {
            eprintln!("Set USERAPP_APP_ID to the application id of your UserApp account.");
            return Ok(());
        }
    };
    let login = env::var("USERAPP_LOGIN").unwrap_or_else(|_| "jdoe81".to_string());
    let password = env::var("USERAPP_PASSWORD").unwrap_or_else(|_| "secret".to_string());

    let api = Api::builder(app_id).debug(true).build()?;

    match run(&api, &login, &password).await {
        Ok(()) => Ok(()),
        Err(Error::Service { message, code }) => {
            println!("The API reported an error: {message} ({code}).");
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

async fn run(api: &Api, login: &str, password: &str) -> userapp::Result<()> {
    let user = api.resolve("user");

    let session = user
        .resolve("login")
        .invoke(serde_json::json!({ "login": login, "password": password }))
        .await?;
    println!(
        "Logged in. token={}, user_id={}, lock_type={}",
        session.get("token")?.as_str().unwrap_or_default(),
        session.get("user_id")?.as_str().unwrap_or_default(),
        session.get("lock_type")?,
    );

    // user.get with no filters returns the authenticated user
    let results = user.resolve("get").invoke(()).await?;
    if let Some(current) = results.at(0) {
        println!(
            "Authenticated as {} ({} {}), email {}.",
            current.get("login")?.as_str().unwrap_or_default(),
            current.get("first_name")?.as_str().unwrap_or_default(),
            current.get("last_name")?.as_str().unwrap_or_default(),
            current.get("email")?.as_str().unwrap_or_default(),
        );
    }

    let count = user.resolve("count").invoke(()).await?;
    println!(
        "The application has {} user(s).",
        count.get("value")?.as_i64().unwrap_or_default()
    );

    user.resolve("logout").invoke(()).await?;
    println!("Logged out; the session token is cleared.");

    Ok(())
}
