use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use podphase_classify::classify;
use podphase_k8s::KubeClient;

mod config;
mod report;

use config::FileConfig;
use report::OutputFormat;

/// Podphase - Count Kubernetes pods by lifecycle phase
#[derive(Parser, Debug)]
#[command(name = "podphase")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the kubeconfig file (defaults to $KUBECONFIG or ~/.kube/config)
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// Kubernetes context name (defaults to the current context)
    #[arg(long, value_name = "CONTEXT")]
    context: Option<String>,

    /// Only list pods in this namespace (defaults to all namespaces)
    #[arg(short, long, value_name = "NAMESPACE")]
    namespace: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Seconds to wait for the pod list before giving up (0 waits forever)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Only print totals, not one line per pod
    #[arg(short, long)]
    quiet: bool,

    /// Config file (defaults to ~/.config/podphase/config.toml if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> FileConfig {
        FileConfig {
            kubeconfig: self.kubeconfig.clone(),
            context: self.context.clone(),
            namespace: self.namespace.clone(),
            output: self.output,
            timeout_secs: self.timeout,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    for directive in log_directives(args.verbose) {
        if let Ok(directive) = directive.parse::<tracing_subscriber::filter::Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Debug directives for our own crates only; dependencies stay at WARN
fn log_directives(verbose: bool) -> Vec<String> {
    if !verbose {
        return Vec::new();
    }
    ["podphase", "podphase_k8s", "podphase_classify"]
        .iter()
        .map(|target| format!("{}=debug", target))
        .collect()
}

async fn run(args: Args) -> Result<()> {
    let settings = FileConfig::load(args.config.as_deref())?
        .overlay(args.overrides())
        .into_settings(args.quiet);
    tracing::debug!(?settings, "resolved settings");

    let kube_client = KubeClient::load(settings.kubeconfig.as_deref())?;
    let client = kube_client.connect(settings.context.as_deref()).await?;
    let pods = kube_client
        .list_pods(&client, settings.namespace.as_deref(), settings.timeout)
        .await?;

    let result = classify(pods);
    let output = report::render(&result, settings.output, settings.quiet)
        .context("Failed to render report")?;
    print!("{}", output);

    Ok(())
}
