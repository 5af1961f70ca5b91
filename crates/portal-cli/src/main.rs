//! Interactive terminal client for the Order Portal.
//!
//! Wires configuration, durable storage, the session holder, and the
//! order store together, then drives them from a line-oriented command
//! loop. This binary is presentation only; every state change goes
//! through the store and the session holder.

use clap::Parser;
use portal_api::implementations::http::HttpBackend;
use portal_api::{AuthApi, OrderApi};
use portal_config::{Config, StorageConfig};
use portal_session::SessionService;
use portal_storage::implementations::file::create_storage as create_file_storage;
use portal_storage::implementations::memory::create_storage as create_memory_storage;
use portal_storage::{StorageFactory, StorageService};
use portal_store::OrderStore;
use portal_types::{Credentials, Order};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

mod commands;

use commands::Command;

/// Command-line arguments for the portal client.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "portal.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "warn")]
	log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).init();

	// Configuration problems are fatal; everything later is absorbed.
	let config = Config::from_file(args.config.to_str().unwrap()).await?;
	tracing::info!("loaded configuration [{}]", config.portal.base_url);

	let storage = Arc::new(build_storage(&config.storage)?);
	let session = SessionService::new(storage);
	let backend = Arc::new(HttpBackend::new(config.portal.base_url.clone()));
	let api: Arc<dyn OrderApi> = backend.clone();
	let store = OrderStore::new(api);

	run(session, store, backend).await
}

/// Builds the configured storage backend through the factory map.
fn build_storage(config: &StorageConfig) -> Result<StorageService, Box<dyn std::error::Error>> {
	let mut factories: HashMap<&str, StorageFactory> = HashMap::new();
	factories.insert("file", create_file_storage);
	factories.insert("memory", create_memory_storage);

	let factory = factories
		.get(config.primary.as_str())
		.ok_or_else(|| format!("unknown storage implementation '{}'", config.primary))?;
	let section = config
		.implementations
		.get(&config.primary)
		.cloned()
		.unwrap_or(toml::Value::Table(toml::map::Map::new()));

	let backend = factory(&section)?;
	backend.config_schema().validate(&section)?;
	Ok(StorageService::new(backend))
}

/// Runs the interactive command loop until quit or end of input.
async fn run(
	session: SessionService,
	store: OrderStore,
	backend: Arc<HttpBackend>,
) -> Result<(), Box<dyn std::error::Error>> {
	// A token persisted by a previous run logs the user straight in.
	let mut context = session.hydrate().await;
	match &context {
		Some(ctx) => {
			store.load(ctx).await;
			println!("Restored previous session.");
		}
		None => println!("Not logged in. Try 'login <username> <password>' or 'help'."),
	}

	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	prompt().await?;

	while let Some(line) = lines.next_line().await? {
		let command = match Command::parse(&line) {
			Ok(Some(command)) => command,
			Ok(None) => {
				prompt().await?;
				continue;
			}
			Err(usage) => {
				println!("{}", usage);
				prompt().await?;
				continue;
			}
		};

		match command {
			Command::Quit => break,
			Command::Help => println!("{}", commands::HELP),
			Command::Login { username, password } => {
				match backend.login(&Credentials { username, password }).await {
					Ok(token) => {
						let ctx = session.set(token).await;
						store.load(&ctx).await;
						context = Some(ctx);
						println!("Logged in.");
					}
					Err(err) => {
						tracing::warn!("login failed: {}", err);
						println!("Login failed.");
					}
				}
			}
			Command::Signup { username, password } => {
				match backend.signup(&Credentials { username, password }).await {
					Ok(token) => {
						let ctx = session.set(token).await;
						store.load(&ctx).await;
						context = Some(ctx);
						println!("Account created, logged in.");
					}
					Err(err) => {
						tracing::warn!("signup failed: {}", err);
						println!("Signup failed.");
					}
				}
			}
			Command::Logout => {
				session.clear().await;
				store.clear().await;
				context = None;
				println!("Logged out.");
			}
			Command::List => match &context {
				Some(_) => render_orders(&store.orders().await),
				None => println!("Not logged in."),
			},
			Command::Add {
				product_name,
				quantity,
				priority,
				message,
			} => match &context {
				Some(ctx) => {
					store
						.create(ctx, &product_name, quantity, priority, &message)
						.await;
					render_orders(&store.orders().await);
				}
				None => println!("Not logged in."),
			},
			Command::Remove { id } => match &context {
				Some(ctx) => {
					store.delete(ctx, &id).await;
					render_orders(&store.orders().await);
				}
				None => println!("Not logged in."),
			},
			Command::SetPriority { id, priority } => match &context {
				Some(ctx) => {
					store.begin_priority_edit(&id).await;
					store.set_priority_draft(priority).await;
					store.save_priority_edit(ctx).await;
					render_orders(&store.orders().await);
				}
				None => println!("Not logged in."),
			},
			Command::SetMessage { id, message } => match &context {
				Some(ctx) => {
					store.begin_message_edit(&id).await;
					store.set_message_draft(message).await;
					store.save_message_edit(ctx).await;
					render_orders(&store.orders().await);
				}
				None => println!("Not logged in."),
			},
		}
		prompt().await?;
	}

	Ok(())
}

/// Prints the prompt without a trailing newline.
async fn prompt() -> Result<(), std::io::Error> {
	let mut stdout = tokio::io::stdout();
	stdout.write_all(b"> ").await?;
	stdout.flush().await
}

/// Renders the order collection, one line per order.
fn render_orders(orders: &[Order]) {
	if orders.is_empty() {
		println!("No orders yet.");
		return;
	}
	for order in orders {
		let message = if order.message.is_empty() {
			"-"
		} else {
			order.message.as_str()
		};
		println!(
			"{}  {} ({})  priority: {}  message: {}",
			order.id, order.product_name, order.quantity, order.priority, message
		);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use portal_config::Config;

	#[test]
	fn test_args_default_values() {
		let args = Args {
			config: PathBuf::from("portal.toml"),
			log_level: "warn".to_string(),
		};

		assert_eq!(args.config, PathBuf::from("portal.toml"));
		assert_eq!(args.log_level, "warn");
	}

	#[test]
	fn test_build_storage_with_memory_backend() {
		let config: Config = r#"
[portal]
base_url = "https://portal.example.com"

[storage]
primary = "memory"

[storage.implementations.memory]
"#
		.parse()
		.unwrap();

		assert!(build_storage(&config.storage).is_ok());
	}

	#[test]
	fn test_build_storage_rejects_unknown_backend() {
		let config: Config = r#"
[portal]
base_url = "https://portal.example.com"

[storage]
primary = "redis"

[storage.implementations.redis]
"#
		.parse()
		.unwrap();

		assert!(build_storage(&config.storage).is_err());
	}
}
