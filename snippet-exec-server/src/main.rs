use clap::Parser;
use snippet_exec::ExecutorConfig;
use snippet_exec_server::{create_app, run_server};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to listen on
    #[arg(short, long, default_value = "0.0.0.0:5000")]
    addr: SocketAddr,

    /// TOML file with executor settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for per-execution source files and binaries
    #[arg(long)]
    scratch_dir: Option<PathBuf>,

    /// Run timeout in seconds
    #[arg(long)]
    run_timeout: Option<u64>,

    /// Compile timeout in seconds, applied to each compiler invocation
    #[arg(long)]
    compile_timeout: Option<u64>,
}

impl Args {
    fn executor_config(&self) -> anyhow::Result<ExecutorConfig> {
        let mut config = match &self.config {
            Some(path) => ExecutorConfig::load(path)?,
            None => ExecutorConfig::default(),
        };

        if let Some(dir) = &self.scratch_dir {
            config = config.with_scratch_dir(dir);
        }
        if let Some(secs) = self.run_timeout {
            config = config.with_run_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.compile_timeout {
            config = config.with_compile_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = args.executor_config()?;
    tracing::info!(
        "Scratch directory {}, run timeout {}s, compile timeout {}s",
        config.scratch_dir.display(),
        config.run_timeout.as_secs(),
        config.compile_timeout.as_secs()
    );

    let app = create_app(config).await?;
    run_server(app, args.addr).await?;

    Ok(())
}
