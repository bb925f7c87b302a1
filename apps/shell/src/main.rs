mod config;
mod errors;
mod models;
mod privacy;
mod router;
mod session;
mod startup;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::models::session::{Role, Session};
use crate::router::{Intent, Shell, Surface, View};
use crate::session::SessionManager;
use crate::storage::{FileStore, KeyValueStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV builder shell v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the key-value store backing session persistence
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage_path));
    info!("Storage ready at {}", config.storage_path.display());

    // Select the quota capability for this host
    let quota = config.quota_probe.into_probe();
    info!("Quota capability: {:?}", config.quota_probe);

    let sessions = SessionManager::new(storage.clone());
    let mut shell = Shell::new(sessions.clone());

    // A host would draw the loading surface while this join is pending.
    draw(&shell);
    let (session, privacy) = startup::run_startup(
        &sessions,
        storage.as_ref(),
        quota.as_deref(),
        config.probe_timeout(),
    )
    .await;
    info!(
        "Startup complete: privacy={privacy:?}, session={}",
        session.as_ref().map(|s| s.email.as_str()).unwrap_or("none")
    );
    shell.complete_startup(session, privacy);

    run_loop(&mut shell).await
}

/// Interactive terminal host. Each line becomes an intent; the shell is
/// redrawn after every one.
async fn run_loop(shell: &mut Shell) -> Result<()> {
    draw(shell);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }
        match parse_command(line) {
            Some(intent) => shell.apply(intent),
            None => print_help(),
        }
        draw(shell);
    }
    Ok(())
}

fn parse_command(line: &str) -> Option<Intent> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["home"] => Some(Intent::Navigate(View::Main)),
        ["user-login"] => Some(Intent::Navigate(View::UserLogin)),
        ["admin-login"] => Some(Intent::Navigate(View::AdminLogin)),
        ["admin"] => Some(Intent::Navigate(View::Admin)),
        ["login", email, role] => {
            let role: Role = role.parse().ok()?;
            Some(Intent::LoginSucceeded(Session {
                email: (*email).to_string(),
                role,
                created_at: Utc::now(),
                expires_at: None,
                usage_count: None,
            }))
        }
        ["logout"] => Some(Intent::Logout),
        ["upgrade"] => Some(Intent::OpenUsageModal { upgrade: true }),
        ["limit"] => Some(Intent::OpenUsageModal { upgrade: false }),
        ["close"] => Some(Intent::CloseUsageModal),
        _ => None,
    }
}

fn draw(shell: &Shell) {
    match shell.render() {
        Some(Surface::Loading) => println!("(initializing...)"),
        Some(Surface::Main) => match shell.session() {
            Some(s) => println!("[main] CV builder, logged in as {} ({:?})", s.email, s.role),
            None => println!("[main] CV builder, anonymous"),
        },
        Some(Surface::UserLogin) => println!("[user-login] try: login <email> <pro|onetime>"),
        Some(Surface::AdminLogin) => println!("[admin-login] try: login <email> superadmin"),
        Some(Surface::Admin) => {
            if let Some(s) = shell.session() {
                println!("[admin] panel for {}", s.email);
            }
        }
        Some(Surface::Blocked) => {
            println!("[blocked] private browsing detected; log in or type 'upgrade'");
        }
        None => {}
    }
    if shell.modal().open {
        let flow = if shell.modal().is_upgrade_flow {
            "upgrade"
        } else {
            "usage-limit"
        };
        println!("[modal] {flow} ('close' to dismiss)");
    }
}

fn print_help() {
    println!(
        "commands: home | user-login | admin-login | admin | login <email> <role> | \
         logout | upgrade | limit | close | quit"
    );
}
