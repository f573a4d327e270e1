//! Creates a user with `user.save`.
//!
//! Run with:
//! ```bash
//! USERAPP_APP_ID=your-app-id cargo run --example signup
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

    let api = Api::builder(app_id).build()?;

    let saved = api
        .resolve("user")
        .resolve("save")
        .invoke(serde_json::json!({
            "login": "erik79",
            "email": "erik79@example.com",
            "password": "hello123",
            "first_name": "Erik",
        }))
        .await;

    match saved {
        Ok(user) => println!(
            "Created user {} with user_id={}.",
            user.get("login")?.as_str().unwrap_or_default(),
            user.get("user_id")?.as_str().unwrap_or_default(),
        ),
        Err(Error::Service { message, code }) => {
            println!("The API reported an error: {message} ({code}).");
        }
        Err(other) => return Err(other.into()),
    }

    Ok(())
}
