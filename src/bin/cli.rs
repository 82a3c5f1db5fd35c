//! Voice Agent Admin CLI
//!
//! Terminal front end for the admin client:
//! - Sign in and out
//! - Render any page
//! - Edit settings and booking rules
//! - Manage the knowledge base and services

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use voiceagent_admin::views::{forms, BookingRulesForm, BusinessForm};
use voiceagent_admin::{
    ActiveView, ApiClient, Config, FileSessionStore, LoggingConfig, Navigation, Notice, Route,
    ServiceUpdate, SessionContext, Shell,
};

#[derive(Parser)]
#[command(name = "voiceagent-admin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Administer a voice-agent business from the terminal")]
#[command(long_about = "Voice Agent Admin manages the business profile, knowledge base, services and booking rules\nbehind a voice booking agent, and shows its call logs.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, then ./voiceagent-admin.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend API URL, overrides config and environment
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "VOICEAGENT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in business
    Whoami,

    /// Render the page at a path, e.g. `/` or `/call-logs`
    Open { path: String },

    /// Call, booking and service counts
    Dashboard,

    /// Show or edit the business profile
    Settings(SettingsArgs),

    /// Knowledge base documents
    Kb {
        #[command(subcommand)]
        command: KbCommand,
    },

    /// Services catalogue
    Services {
        #[command(subcommand)]
        command: ServicesCommand,
    },

    /// Show or edit booking rules
    BookingRules(BookingRulesArgs),

    /// Recent calls handled by the agent
    CallLogs,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct SettingsArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub timezone: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub policies: Option<String>,
}

impl SettingsArgs {
    fn apply(self, form: &mut BusinessForm) -> bool {
        let mut changed = false;
        for (value, field) in [
            (self.name, &mut form.name),
            (self.phone, &mut form.phone),
            (self.timezone, &mut form.timezone),
            (self.location, &mut form.location),
            (self.policies, &mut form.policies),
        ] {
            if let Some(value) = value {
                *field = value;
                changed = true;
            }
        }
        changed
    }
}

#[derive(Args)]
pub struct BookingRulesArgs {
    #[arg(long)]
    pub advance_notice_hours: Option<String>,
    #[arg(long)]
    pub max_advance_days: Option<String>,
    #[arg(long)]
    pub cancellation_hours: Option<String>,
}

impl BookingRulesArgs {
    fn apply(self, form: &mut BookingRulesForm) -> bool {
        let mut changed = false;
        for (value, field) in [
            (self.advance_notice_hours, &mut form.advance_notice_hours),
            (self.max_advance_days, &mut form.max_advance_days),
            (self.cancellation_hours, &mut form.cancellation_hours),
        ] {
            if let Some(value) = value {
                *field = value;
                changed = true;
            }
        }
        changed
    }
}

#[derive(Subcommand)]
pub enum KbCommand {
    /// List documents
    List,
    /// Add a document
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        content: String,
    },
    /// Delete a document
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ServicesCommand {
    /// List services
    List,
    /// Add a service
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Duration in minutes
        #[arg(long, default_value = "30")]
        duration: String,
        /// Price; omit for none
        #[arg(short, long)]
        price: Option<String>,
    },
    /// Update fields of a service
    Update {
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        /// Pass "" to clear
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        duration: Option<String>,
        /// Pass "" to clear
        #[arg(short, long)]
        price: Option<String>,
    },
    /// Delete a service
    Delete { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let command = match cli.command {
        Commands::Config { output } => {
            write_default_config(output.as_ref())?;
            return Ok(ExitCode::SUCCESS);
        }
        command => command,
    };

    let (mut config, report) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => {
            let (config, report) = Config::locate_default();
            (config, Some(report))
        }
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    init_logging(&config.logging);
    if let Some(report) = report {
        report.log();
    }

    let session_path = config.session.resolved_path();
    let session = SessionContext::new(Arc::new(FileSessionStore::new(session_path)));
    session.init_or_discard();

    let client = ApiClient::new(&config.api, session).context("Failed to create API client")?;
    let mut shell = Shell::new(client);
    let format = cli.format;

    match command {
        Commands::Login { email, password } => {
            shell.navigate(Route::Login.path()).await?;
            let Some(ActiveView::Login(view)) = shell.active_view_mut() else {
                anyhow::bail!("Login page unavailable");
            };
            view.email = email;
            view.password = password;

            match view.submit().await {
                Ok(next) => {
                    let business_id = shell.session().business_id().unwrap_or_default();
                    match format {
                        OutputFormat::Json => println!(
                            "{}",
                            serde_json::to_string_pretty(&json!({ "business_id": business_id }))?
                        ),
                        OutputFormat::Table => println!("Signed in to business {business_id}"),
                    }
                    shell.navigate(next.path()).await?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(_) => emit(&shell, &Navigation::Rendered(Route::Login), format),
            }
        }

        Commands::Logout => {
            shell.logout().await?;
            println!("Signed out");
            Ok(ExitCode::SUCCESS)
        }

        Commands::Whoami => whoami(&shell, format),

        Commands::Open { path } => {
            let nav = shell.navigate(&path).await?;
            emit(&shell, &nav, format)
        }

        Commands::Dashboard => {
            let nav = shell.navigate(Route::Dashboard.path()).await?;
            emit(&shell, &nav, format)
        }

        Commands::CallLogs => {
            let nav = shell.navigate(Route::CallLogs.path()).await?;
            emit(&shell, &nav, format)
        }

        Commands::Settings(args) => {
            let nav = shell.navigate(Route::Settings.path()).await?;
            if ready(&shell, &nav) {
                if let Some(ActiveView::Settings(view)) = shell.active_view_mut() {
                    if args.apply(&mut view.form) {
                        // Failures surface as the view's notice
                        let _ = view.save().await;
                    }
                }
            }
            emit(&shell, &nav, format)
        }

        Commands::BookingRules(args) => {
            let nav = shell.navigate(Route::BookingRules.path()).await?;
            if ready(&shell, &nav) {
                if let Some(ActiveView::BookingRules(view)) = shell.active_view_mut() {
                    if args.apply(&mut view.form) {
                        let _ = view.save().await;
                    }
                }
            }
            emit(&shell, &nav, format)
        }

        Commands::Kb { command } => {
            let nav = shell.navigate(Route::KnowledgeBase.path()).await?;
            if ready(&shell, &nav) {
                if let Some(ActiveView::KnowledgeBase(view)) = shell.active_view_mut() {
                    match command {
                        KbCommand::List => {}
                        KbCommand::Add { title, content } => {
                            view.draft.title = title;
                            view.draft.content = content;
                            let _ = view.add().await;
                        }
                        KbCommand::Delete { id } => {
                            let _ = view.delete(&id).await;
                        }
                    }
                }
            }
            emit(&shell, &nav, format)
        }

        Commands::Services { command } => {
            let nav = shell.navigate(Route::Services.path()).await?;
            if ready(&shell, &nav) {
                if let Some(ActiveView::Services(view)) = shell.active_view_mut() {
                    match command {
                        ServicesCommand::List => {}
                        ServicesCommand::Add {
                            name,
                            description,
                            duration,
                            price,
                        } => {
                            view.draft.name = name;
                            view.draft.description = description.unwrap_or_default();
                            view.draft.duration_minutes = duration;
                            view.draft.price = price.unwrap_or_default();
                            let _ = view.add().await;
                        }
                        ServicesCommand::Update {
                            id,
                            name,
                            description,
                            duration,
                            price,
                        } => {
                            let update = ServiceUpdate {
                                name: name
                                    .map(|n| forms::required("name", &n).map(str::to_string))
                                    .transpose()?,
                                duration_minutes: duration
                                    .map(|d| forms::parse_count("duration", &d))
                                    .transpose()?,
                                price: price.map(|p| forms::parse_price(&p)).transpose()?,
                                description: description.map(|d| forms::optional_text(&d)),
                            };
                            let _ = view.update(&id, &update).await;
                        }
                        ServicesCommand::Delete { id } => {
                            let _ = view.delete(&id).await;
                        }
                    }
                }
            }
            emit(&shell, &nav, format)
        }

        Commands::Config { .. } => Ok(ExitCode::SUCCESS),
    }
}

/// The page mounted cleanly and can take an action
fn ready(shell: &Shell, nav: &Navigation) -> bool {
    matches!(nav, Navigation::Rendered(_)) && !shell.notice().is_some_and(Notice::is_error)
}

/// Print the page and turn its outcome into an exit status
fn emit(shell: &Shell, nav: &Navigation, format: OutputFormat) -> anyhow::Result<ExitCode> {
    match format {
        OutputFormat::Table => print!("{}", shell.render()),
        OutputFormat::Json => {
            let snapshot = match (nav, shell.active_view()) {
                (Navigation::NotFound(path), _) => json!({ "not_found": path }),
                (_, Some(view)) => view.as_view().snapshot(),
                (_, None) => json!(null),
            };
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    if let Navigation::Redirected { from, to } = nav {
        eprintln!("{from} requires signing in; showing {to}. Run `voiceagent-admin login` first.");
    }

    let failed = !matches!(nav, Navigation::Rendered(_))
        || shell.notice().is_some_and(Notice::is_error);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn whoami(shell: &Shell, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let Some(session) = shell.session().get() else {
        eprintln!("Not signed in");
        return Ok(ExitCode::FAILURE);
    };

    let claims = session.claims();
    let subject = claims.as_ref().and_then(|c| c.sub.clone());
    let expires_at = claims.as_ref().and_then(|c| c.expires_at());
    let expired = expires_at.is_some_and(|at| at <= chrono::Utc::now());

    match format {
        OutputFormat::Json => {
            let out = json!({
                "business_id": session.business_id,
                "subject": subject,
                "expires_at": expires_at.map(|at| at.to_rfc3339()),
                "expired": expired,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            println!("Business: {}", session.business_id);
            if let Some(subject) = subject {
                println!("User:     {subject}");
            }
            match expires_at {
                Some(at) => println!(
                    "Expires:  {}{}",
                    at.format("%Y-%m-%d %H:%M UTC"),
                    if expired { " (expired)" } else { "" }
                ),
                None => println!("Expires:  -"),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = voiceagent_admin::config::generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,voiceagent_admin={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries command output
    if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
