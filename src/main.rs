//! `gh-assistant` command-line entry point.
//!
//! Parses arguments with `clap`, loads configuration from the environment
//! (and `.env`), and runs one assistant workflow. Errors bubble up to
//! `main` and are reported once.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use github_assistant::{config, Assistant, Config, GitHubApi, GitHubClient};

#[derive(Debug, Parser)]
#[command(
    name = "gh-assistant",
    version,
    about = "Create, inspect, and push to GitHub repositories"
)]
struct Cli {
    /// REST API root, e.g. https://ghe.example.com/api/v3 (overrides GITHUB_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Branch pull requests merge into (overrides GITHUB_BASE_BRANCH)
    #[arg(long, global = true)]
    base_branch: Option<String>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find one of your repositories, creating it (public) if missing
    EnsureRepo {
        /// Repository name
        name: String,

        /// Description used if the repository is created
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Summarize a repository: stars, forks, issues, languages, branches, contributors
    Analyze {
        /// `owner/name`, or a name owned by you
        repo: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Add a file through a new branch and open a pull request
    Push(PushArgs),

    /// Ensure a repository exists, then push a local file to it
    Publish(PublishArgs),
}

#[derive(Debug, Args)]
struct PushArgs {
    /// `owner/name`, or a name owned by you
    repo: String,

    /// Path of the new file inside the repository
    dest_path: String,

    #[command(flatten)]
    source: ContentSource,

    /// Commit message, also used as the pull request body
    #[arg(short, long)]
    message: String,

    /// Branch to create instead of update_<timestamp>
    #[arg(long)]
    branch: Option<String>,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct ContentSource {
    /// Read the file content from a local file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Use this text as the file content
    #[arg(long)]
    content: Option<String>,
}

#[derive(Debug, Args)]
struct PublishArgs {
    /// Repository name
    name: String,

    /// Local file to push
    #[arg(long)]
    file: PathBuf,

    /// Destination path (default: the local file's name)
    #[arg(long)]
    dest: Option<String>,

    /// Description used if the repository is created
    #[arg(short, long)]
    description: Option<String>,

    /// Commit message (default: "Initial commit: <file name>")
    #[arg(short, long)]
    message: Option<String>,
}

impl ContentSource {
    fn read(&self) -> Result<Vec<u8>> {
        match (&self.file, &self.content) {
            (Some(path), _) => read_file(path),
            (None, Some(text)) => Ok(text.clone().into_bytes()),
            (None, None) => anyhow::bail!("either --file or --content is required"),
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .with_context(|| format!("{} has no usable file name", path.display()))
}

impl Command {
    async fn run<A: GitHubApi>(self, assistant: &Assistant<A>) -> Result<()> {
        match self {
            Self::EnsureRepo { name, description } => {
                let ensured = assistant.ensure_repo(&name, description.as_deref()).await?;
                if ensured.created {
                    println!("Created new repository: {}", ensured.repository.html_url);
                } else {
                    println!(
                        "Repository {} already exists at {}",
                        ensured.repository.full_name, ensured.repository.html_url
                    );
                }
            }
            Self::Analyze { repo, json } => {
                let analysis = assistant
                    .analyze_repo(&repo)
                    .await
                    .with_context(|| format!("failed to analyze {repo}"))?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&analysis)?);
                } else {
                    println!("{analysis}");
                }
            }
            Self::Push(args) => {
                let content = args.source.read()?;
                let outcome = match &args.branch {
                    Some(branch) => {
                        assistant
                            .push_file_via(&args.repo, branch, &args.dest_path, &content, &args.message)
                            .await
                    }
                    None => {
                        assistant
                            .push_file(&args.repo, &args.dest_path, &content, &args.message)
                            .await
                    }
                }
                .with_context(|| format!("failed to push {} to {}", args.dest_path, args.repo))?;

                println!("Branch:       {}", outcome.branch);
                println!("Pull request: {}", outcome.pull_request.html_url);
            }
            Self::Publish(args) => {
                let content = read_file(&args.file)?;
                let dest = match args.dest {
                    Some(dest) => dest,
                    None => file_name(&args.file)?,
                };
                let message = args
                    .message
                    .unwrap_or_else(|| format!("Initial commit: {dest}"));

                let ensured = assistant
                    .ensure_repo(&args.name, args.description.as_deref())
                    .await?;
                println!(
                    "{} repository: {}",
                    if ensured.created { "Created" } else { "Using" },
                    ensured.repository.html_url
                );

                let outcome = assistant
                    .push_file(&args.name, &dest, &content, &message)
                    .await
                    .with_context(|| format!("failed to push {dest} to {}", args.name))?;
                println!("Pull request: {}", outcome.pull_request.html_url);
            }
        }
        Ok(())
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn,github_assistant=info,gh_assistant=info",
        1 => "info,github_assistant=debug,gh_assistant=debug",
        _ => "debug,github_assistant=trace,gh_assistant=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(path) = dotenv {
        debug!(path = %path.display(), "loaded environment file");
    }

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(base_branch) = cli.base_branch {
        config.base_branch = base_branch;
    }

    let client = GitHubClient::from_config(&config).context("failed to create GitHub client")?;
    let assistant = Assistant::new(client).with_base_branch(config.base_branch.clone());

    cli.command.run(&assistant).await
}
