use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dialoguer::{Input, Password};
use tracing::info;

use video_console::app::App;
use video_console::auth;
use video_console::client::VideoApi;
use video_console::config::Config;
use video_console::logging;

#[derive(Parser)]
#[command(name = "video-console")]
#[command(about = "Terminal client for browsing a remote video catalog")]
#[command(version)]
struct Cli {
    /// Override the API base URL from the config file and environment
    #[arg(long)]
    base_url: Option<String>,

    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Browse without logging in (hides the "My videos" entry)
    #[arg(long)]
    anonymous: bool,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let base_url = cli
        .base_url
        .or_else(|| std::env::var("VIDEO_CONSOLE_BASE_URL").ok())
        .unwrap_or_else(|| config.api.base_url.clone());

    let http = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.api.timeout_seconds))
        .build()
        .context("failed to build HTTP client")?;

    let key = if cli.anonymous {
        None
    } else {
        let username: String = Input::new().with_prompt("Username").interact_text()?;
        let password = Password::new().with_prompt("Password").interact()?;
        match auth::login(&http, &base_url, &username, &password)? {
            Some(key) => Some(key),
            None => {
                println!("Wrong credentials!");
                std::process::exit(1);
            }
        }
    };

    info!("connecting to {base_url}");
    let api = VideoApi::with_client(http, base_url);
    App::new(api, key).run()?;
    Ok(())
}
