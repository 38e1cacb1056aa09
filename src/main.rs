//! songrec - client for a hybrid song recommendation service
//!
//! Log in, browse popular songs, ask for recommendations by artist, song and
//! genre, and rate what comes back. Every command maps to one user event; the
//! logged-in username is kept in the config directory between runs.

mod api;
mod client;
mod config;
mod core;
mod models;
mod stores;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::config::{ClientConfig, Paths};
use crate::core::form::parse_genre;
use crate::core::{App, ResultsView, Screen};
use crate::models::Credentials;
use crate::stores::SessionStore;

/// Environment variable read when `--password` is not given
const PASSWORD_ENV: &str = "SONGREC_PASSWORD";

/// songrec - song recommendation client
#[derive(Parser, Debug)]
#[command(name = "songrec")]
#[command(version)]
#[command(about = "Client for a hybrid song recommendation service")]
struct Args {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Path to config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides settings and SONGREC_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and remember the username
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the logged-in user
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List catalog songs, optionally only those by one artist
    Songs {
        #[arg(long)]
        artist: Option<String>,
    },
    /// List the artists of the catalog
    Artists,
    /// Show your stored ratings
    Ratings,
    /// Ask for recommendations based on a song
    Recommend {
        #[arg(long)]
        artist: String,
        #[arg(long)]
        song: String,
        /// One of: classical, edm, hiphop, jazz, indie, latin, kpop, pop, rnb, rock, ipop
        #[arg(long)]
        genre: String,
        /// Number of results (1-20)
        #[arg(long)]
        top_n: Option<u32>,
    },
    /// Rate a song by its "title - artist" key
    Rate {
        #[arg(long)]
        song: String,
        /// Stars, 1-5
        #[arg(long)]
        rating: u8,
    },
    /// Show the popular songs panel
    Popular,
    /// Serve the client state over HTTP for a browser page
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("{},hyper=warn,reqwest=warn", log_level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let paths = Paths::init(args.config)?;
    let config = ClientConfig::load()?.with_api_url_override(args.api_url);
    info!("Using backend {}", config.api_url);

    let client = ApiClient::new(&config.api_url)
        .with_context(|| format!("Invalid backend URL {:?}", config.api_url))?;
    let sessions = SessionStore::new(paths.session_path());
    let mut app = App::restore(Arc::new(client), sessions);

    match args.command {
        Command::Login { username, password } => {
            if let Some(user) = app.username() {
                bail!("Already logged in as {}; log out first", user);
            }
            let password = resolve_password(password)?;
            app.login(Credentials::new(username, password)).await?;
            match app.screen() {
                Screen::Main => println!("Logged in as {}", app.username().unwrap_or_default()),
                _ => bail!("{}", app.login_error().unwrap_or("Login failed")),
            }
        }
        Command::Register { username, password } => {
            if app.username().is_some() {
                bail!("Log out before registering a new account");
            }
            let password = resolve_password(password)?;
            app.show_register();
            app.register(Credentials::new(username, password)).await;
            if let Some(error) = app.register_error() {
                bail!("{}", error);
            }
            println!("{}", app.notice().unwrap_or_default());
        }
        Command::Logout => {
            app.logout()?;
            println!("Logged out");
        }
        Command::Whoami => match app.username() {
            Some(user) => println!("{}", user),
            None => println!("Not logged in"),
        },
        Command::Songs { artist } => {
            require_login(&app)?;
            app.start_session().await;
            match artist {
                Some(artist) => {
                    app.select_artist(Some(artist));
                    for song in app.song_options() {
                        println!("{}", song.title);
                    }
                }
                None => {
                    for song in app.catalog().songs() {
                        println!("{}", song.key());
                    }
                }
            }
        }
        Command::Artists => {
            require_login(&app)?;
            app.start_session().await;
            for artist in app.catalog().artists() {
                println!("{}", artist);
            }
        }
        Command::Ratings => {
            require_login(&app)?;
            app.start_session().await;
            if app.ratings().is_empty() {
                println!("No ratings yet");
            }
            for (key, rating) in app.ratings().sorted() {
                println!("{}  {}", rating.get(), key);
            }
        }
        Command::Recommend {
            artist,
            song,
            genre,
            top_n,
        } => {
            require_login(&app)?;
            app.start_session().await;
            if app.catalog().is_empty() {
                warn!("Song catalog is empty; the song cannot be validated");
            }

            app.select_artist(Some(artist));
            app.select_song(Some(song))?;
            app.select_genre(Some(parse_genre(&genre)?));
            if let Some(n) = top_n {
                app.set_top_n(n)?;
            }

            app.submit_recommendation().await?;
            if let Some(error) = app.error() {
                bail!("{}", error);
            }
            print_results(&app.results_view());
        }
        Command::Rate { song, rating } => {
            require_login(&app)?;
            if app.rate(&song, rating).await? {
                println!("Rated {} with {} stars", song, rating);
            }
        }
        Command::Popular => {
            require_login(&app)?;
            app.load_popular().await;
            for (i, song) in app.popular().visible().iter().enumerate() {
                println!("{:>2}. {} – {}", i + 1, song.name, song.artists_label());
                if let Some(url) = &song.spotify_url {
                    println!("    {}", url);
                }
            }
        }
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.serve_host.clone());
            let port = port.unwrap_or(config.serve_port);
            serve(app, &paths, host, port).await?;
        }
    }

    Ok(())
}

fn require_login(app: &App) -> Result<&str> {
    match app.username() {
        Some(user) => Ok(user),
        None => bail!("Not logged in; run `songrec login` first"),
    }
}

fn resolve_password(password: Option<String>) -> Result<String> {
    match password.or_else(|| std::env::var(PASSWORD_ENV).ok()) {
        Some(p) if !p.is_empty() => Ok(p),
        _ => bail!("No password given; pass --password or set {}", PASSWORD_ENV),
    }
}

fn print_results(view: &ResultsView) {
    if view.items.is_empty() {
        println!("No recommendations");
        return;
    }

    println!("Recommendations:");
    for row in &view.items {
        println!(
            "  {}  {}  score {}",
            row.stars(),
            row.song_key,
            row.score_label.as_deref().unwrap_or("-")
        );
        if let Some(url) = &row.spotify_url {
            println!("      {}", url);
        }
    }
}

/// Run the local web surface until interrupted
async fn serve(mut app: App, paths: &Paths, host: String, port: u16) -> Result<()> {
    use actix_cors::Cors;
    use actix_web::{middleware, web, App as HttpApp, HttpServer};

    // a restored session loads the main screen data up front
    app.activate().await;

    let state = web::Data::new(api::SharedApp::new(app));
    let client_dir = paths.client_dir();
    if client_dir.is_dir() {
        info!("Serving web client from {:?}", client_dir);
    }

    let addr = format!("{}:{}", host, port);
    info!("Listening on http://{}", addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let http_app = HttpApp::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(api::configure);

        if client_dir.is_dir() {
            http_app.service(
                actix_files::Files::new("/", client_dir.clone()).index_file("index.html"),
            )
        } else {
            http_app
        }
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
