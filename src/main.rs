//! Admin shell tooling.
//!
//! Loads a shell configuration, compiles its route table and answers
//! questions about it without a browser:
//!
//! ```text
//! admin-shell check                 validate routes and meta keys
//! admin-shell routes                print the flattened route table
//! admin-shell resolve <target|url>  navigate and print the result
//! admin-shell build                 print environment-resolved build settings
//! ```

use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use url::Url;

use admin_shell::config::{load_config, Environment};
use admin_shell::navigation::{IconResolver, NavigationOutcome, PageTitle, Sidebar, TabStrip};
use admin_shell::observability::logging::init_logging;
use admin_shell::routing::{MetaConsumer, RouteTable};
use admin_shell::views::ViewRegistry;
use admin_shell::Shell;

#[derive(Parser)]
#[command(name = "admin-shell")]
#[command(about = "Inspect and exercise an admin shell route table", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "shell.toml")]
    config: PathBuf,

    /// Override the configured environment.
    #[arg(short, long, value_enum)]
    env: Option<Environment>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration, route table and route meta
    Check,
    /// Print the flattened route table
    Routes,
    /// Navigate to a path or full browser URL and print the result
    Resolve { target: String },
    /// Print build settings for the selected environment
    Build,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(env) = cli.env {
        config.app.environment = env;
    }
    let environment = config.app.environment;
    init_logging(&config.observability, environment)?;

    tracing::info!(
        config = %cli.config.display(),
        environment = ?environment,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    let registry = ViewRegistry::placeholders(&config.routes);

    match cli.command {
        Commands::Check => {
            let table = RouteTable::from_config(&config.routes, &registry)?;

            let icons = IconResolver::new(&config.icons);
            let title = PageTitle::new(config.app.title.clone());
            let sidebar = Sidebar::new(icons.clone());
            let tabs = TabStrip::new(&table);
            let consumers: [&dyn MetaConsumer; 4] = [&title, &sidebar, &tabs, &icons];

            let issues = table.audit_meta(&consumers);
            for issue in &issues {
                eprintln!("meta: {}", issue);
            }
            println!("{} routes, {} meta issues", table.len(), issues.len());
            if !issues.is_empty() {
                std::process::exit(1);
            }
        }
        Commands::Routes => {
            let table = RouteTable::from_config(&config.routes, &registry)?;
            let routes: Vec<_> = table
                .flatten()
                .into_iter()
                .map(|record| {
                    json!({
                        "id": record.id,
                        "pattern": record.pattern.to_string(),
                        "name": record.name,
                        "component": record.component.is_some(),
                        "redirect": record.redirect,
                        "meta": record.meta,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Commands::Resolve { target } => {
            let shell = Shell::builder(config, registry).mount().await?;
            let build = shell.build();

            let target = match Url::parse(&target) {
                Ok(url) if url.scheme() == "http" || url.scheme() == "https" => shell
                    .config()
                    .app
                    .history
                    .target_from_url(&url, &build.public_path)
                    .ok_or_else(|| format!("{} is outside {}", url, build.public_path))?,
                _ => target,
            };

            let outcome = shell.router().navigate(&target).await?;
            let title = PageTitle::new(shell.config().app.title.clone());
            match &outcome {
                NavigationOutcome::Committed(nav) | NavigationOutcome::NotFound(nav) => {
                    let label = if nav.is_not_found() { "not_found" } else { "committed" };
                    let output = json!({
                        "outcome": label,
                        "title": title.for_navigation(nav),
                        "navigation": nav.as_ref(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                NavigationOutcome::Superseded { target } => {
                    eprintln!("navigation to {} was superseded", target);
                }
            }
        }
        Commands::Build => {
            let build = config.build.resolve(environment);
            println!("{}", serde_json::to_string_pretty(&build)?);
        }
    }

    Ok(())
}
