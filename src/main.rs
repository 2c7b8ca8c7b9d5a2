mod classpath;
mod commands;
mod core;
mod graph;
mod model;
mod settings;

use clap::{Parser, Subcommand};
use core::error::{JdtError, print_error};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configure SonarLint analysis of Eclipse JDT workspaces
#[derive(Parser)]
#[command(name = "sonar-jdt")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Workspace root (defaults to the current directory)
  #[arg(long, global = true)]
  workspace: Option<PathBuf>,

  /// Log level (error, warn, info, debug, trace)
  #[arg(long, global = true, default_value = "warn")]
  log_level: String,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Write a starter sonar-jdt.toml in the workspace root
  Init {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },

  /// List the projects of the workspace
  Projects {
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show the resolved source, binary and library paths of a project
  Classpath {
    /// Name of the project to resolve
    project: String,
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show the full analysis properties of a project
  Configure {
    /// Name of the project to configure
    project: String,
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show or update a project's SonarLint binding
  Properties {
    /// Name of the project
    project: String,
    /// Enable or disable automatic analysis
    #[arg(long, value_enum)]
    auto_run: Option<commands::properties::Switch>,
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show project references and reference cycles
  Graph {
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))))
}

fn init_logging(level: &str) {
  let filter = EnvFilter::try_from_default_env()
    .or_else(|_| EnvFilter::try_new(level))
    .unwrap_or_else(|_| EnvFilter::new("warn"));

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(&cli.log_level);

  let workspace_root = match cli.workspace {
    Some(dir) => dir,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => {
        eprintln!("Error: Failed to get current directory: {}", e);
        std::process::exit(1);
      }
    },
  };

  // init runs before any configuration exists
  if let Commands::Init { force } = cli.command {
    if let Err(err) = commands::run_init(&workspace_root, force) {
      handle_error(err);
    }
    return;
  }

  let ctx = match core::context::WorkspaceContext::build(&workspace_root) {
    Ok(ctx) => ctx,
    Err(err) => handle_error(err),
  };

  let result = match cli.command {
    Commands::Init { .. } => Ok(()),
    Commands::Projects { json } => commands::run_projects(&ctx, json),
    Commands::Classpath { project, json } => commands::run_classpath(&ctx, &project, json),
    Commands::Configure { project, json } => commands::run_configure(&ctx, &project, json),
    Commands::Properties { project, auto_run, json } => commands::run_properties(&ctx, &project, auto_run, json),
    Commands::Graph { json } => commands::run_graph(&ctx, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: JdtError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
