use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tattle")]
#[command(about = "Tattle — Slack moderation-report relay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the configuration directory and a default config file. Credentials
    /// are usually injected via SLACK_BOT_TOKEN and MOD_CHANNEL_ID instead of the file.
    Init {
        /// Config file path (default: TATTLE_CONFIG_PATH or ~/.tattle/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,
    },

    /// Run the gateway (slash-command webhook + health probe). Requires a
    /// resolvable bot token and moderation channel id.
    Serve {
        /// Config file path (default: TATTLE_CONFIG_PATH or ~/.tattle/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,

        /// HTTP port (default from config or 15252)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Verify the configured Slack credentials via auth.test without posting
    /// to the moderation channel.
    Check {
        /// Config file path (default: TATTLE_CONFIG_PATH or ~/.tattle/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("tattle {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Init { config }) => {
            if let Err(e) = run_init(config) {
                log::error!("init failed: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Serve { config, port }) => {
            if let Err(e) = run_serve(config, port).await {
                log::error!("serve failed: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Check { config }) => {
            if let Err(e) = run_check(config).await {
                log::error!("check failed: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

fn run_init(config_path: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(lib::config::default_config_path);
    let dir = lib::init::init_config_dir(&path)?;
    println!("initialized configuration at {}", dir.display());
    Ok(())
}

async fn run_serve(
    config_path: Option<std::path::PathBuf>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let (mut config, _path) = lib::config::load_config(config_path)?;
    if let Some(p) = port {
        config.gateway.port = p;
    }
    log::info!("starting gateway on {}:{}", config.gateway.bind, config.gateway.port);
    lib::gateway::run_gateway(config).await
}

async fn run_check(config_path: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let (config, _path) = lib::config::load_config(config_path)?;
    let token = lib::config::resolve_bot_token(&config).ok_or_else(|| {
        anyhow::anyhow!("no bot token configured (set SLACK_BOT_TOKEN or slack.botToken)")
    })?;
    let client = lib::slack::SlackClient::new(token, lib::config::resolve_api_base(&config));
    let identity = client.auth_test().await?;

    let team = identity.get("team").and_then(|v| v.as_str()).unwrap_or("?");
    let user = identity.get("user").and_then(|v| v.as_str()).unwrap_or("?");
    println!("token ok: authed as {} in team {}", user, team);

    match lib::config::resolve_mod_channel(&config) {
        Some(channel) => println!("moderation channel: {}", channel),
        None => println!("warning: no moderation channel configured (set MOD_CHANNEL_ID or slack.modChannelId)"),
    }
    Ok(())
}
