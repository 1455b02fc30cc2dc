//! vcport CLI entrypoint
//! Parses command-line arguments and dispatches to the portfile renderer.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vcport::core::{
    config::{PackageConfig, SourceConfig},
    metadata::release_tag,
    port::PortManifest,
    provider::Provider,
    render::ManifestRenderer,
    runtime::PathRuntimeProbe,
    templates::{TemplateKind, load_registry},
};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vcport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render the portfile of a released package
    Render(RenderArgs),
    /// Inspect the available portfile templates
    Templates {
        #[command(subcommand)]
        action: TemplateActions,
    },
    /// Print the release tag of a package version
    Tag {
        /// Package name
        #[arg(long)]
        name: String,
        /// Package version
        #[arg(long)]
        version: String,
        /// Release increment
        #[arg(long, default_value_t = 1)]
        inc: u32,
        /// Target distribution
        #[arg(long)]
        distro: String,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum TemplateActions {
    /// List registered template kinds
    List {
        /// Custom template directory
        #[arg(long)]
        template_dir: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Package description file (TOML, YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Source hosting provider: github, gitlab or bitbucket
    #[arg(long)]
    provider: Option<String>,
    /// Repository owner or organization
    #[arg(long)]
    owner: Option<String>,
    /// Repository name
    #[arg(long)]
    repo: Option<String>,
    /// Release repository URL, used instead of provider/owner/repo
    #[arg(long, conflicts_with_all = ["provider", "owner", "repo"])]
    release_url: Option<String>,
    /// Tag or ref to fetch
    #[arg(long)]
    tag: Option<String>,
    /// Target distribution, the install prefix path segment
    #[arg(long)]
    distro: Option<String>,
    /// Template kind to render
    #[arg(long)]
    template: Option<String>,
    /// Custom template directory
    #[arg(long)]
    template_dir: Option<PathBuf>,
    /// Write portfile.cmake (and vcpkg.json) here instead of printing
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with default level INFO, on stderr so stdout stays the portfile
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => render_port(args).await?,
        Commands::Templates { action } => match action {
            TemplateActions::List { template_dir } => list_templates(template_dir.as_deref())?,
        },
        Commands::Tag {
            name,
            version,
            inc,
            distro,
        } => println!("{}", release_tag(&name, &version, inc, &distro)),
    }
    Ok(())
}

/// Render a portfile from a description file and/or command line values
async fn render_port(args: RenderArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => PackageConfig::load(path)
            .await
            .with_context(|| format!("Failed to load package description {}", path.display()))?,
        None => PackageConfig::default(),
    };

    let provider = args
        .provider
        .as_deref()
        .map(str::parse::<Provider>)
        .transpose()
        .context("Invalid --provider")?;
    let template = args
        .template
        .as_deref()
        .map(str::parse::<TemplateKind>)
        .transpose()
        .context("Invalid --template")?;

    let overrides = SourceConfig {
        provider,
        owner_name: args.owner,
        repo_name: args.repo,
        release_url: args.release_url,
        ref_tag: args.tag,
        target_distro: args.distro,
    };
    let resolved = config
        .resolve(overrides, template)
        .context("Incomplete package source")?;

    let registry = load_registry(args.template_dir.as_deref())
        .context("Failed to load portfile templates")?;
    let renderer = ManifestRenderer::new(registry, Arc::new(PathRuntimeProbe::new()));

    info!(
        provider = %resolved.source.provider,
        template = %resolved.kind,
        "Rendering portfile"
    );
    let manifest = renderer
        .render(&resolved.source, resolved.kind)
        .inspect_err(|e| error!(error = %e, "Failed to render portfile"))
        .context("Failed to render portfile")?;

    let Some(output_dir) = args.output_dir else {
        print!("{}", manifest.text);
        return Ok(());
    };

    write_file(&output_dir, "portfile.cmake", &manifest.text).await?;
    if let Some(metadata) = &resolved.metadata {
        let port_manifest = PortManifest::from_metadata(metadata)
            .to_json()
            .context("Failed to serialize vcpkg.json")?;
        write_file(&output_dir, "vcpkg.json", &port_manifest).await?;
    }

    info!(
        output_path = %output_dir.display(),
        "Successfully generated port"
    );
    Ok(())
}

async fn write_file(dir: &Path, name: &str, content: &str) -> anyhow::Result<()> {
    if !dir.exists() {
        info!(path = %dir.display(), "Creating output directory");
        tokio::fs::create_dir_all(dir)
            .await
            .inspect_err(|e| {
                error!(path = %dir.display(), error = %e, "Failed to create output directory")
            })
            .context("Failed to create output directory")?;
    }
    let path = dir.join(name);
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn list_templates(template_dir: Option<&Path>) -> anyhow::Result<()> {
    let registry = load_registry(template_dir).context("Failed to load portfile templates")?;

    println!("Available templates:");
    for kind in registry.kinds() {
        println!("  {:<16} {}", kind.as_str(), kind.description());
    }
    Ok(())
}
