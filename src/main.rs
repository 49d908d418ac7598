//! `livegrid` CLI - drive the listing, expansion, and resolution pipeline

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use livegrid::{expand, Channel, ChannelResolver, ListingSource, DEFAULT_ROOT};

#[derive(Parser)]
#[command(name = "livegrid")]
#[command(about = "Live-TV channel grid scraper and HLS stream resolver")]
#[command(version)]
struct Cli {
    /// Site root to scrape (overrides the built-in default)
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the 24/7 channel grid
    Channels,

    /// List the event schedule
    Schedule,

    /// Search the channel grid (case-sensitive substring)
    Search {
        /// Text to match against card titles
        query: String,
    },

    /// Expand a listing payload into playable entries
    Expand {
        /// Serialized listing payload (JSON)
        payload: String,
    },

    /// Resolve channels to playlist URLs
    Resolve {
        /// Channel ids or absolute stream-page URLs
        ids: Vec<String>,

        /// Resolve a serialized channel-list payload instead of ids
        #[arg(long, conflicts_with = "ids")]
        payload: Option<String>,
    },

    /// Print the site root after following listing-page redirects
    Root,
}

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let resolver = ChannelResolver::with_root(cli.root)?;

    match cli.command {
        Commands::Channels => cmd_listing(&resolver, ListingSource::Grid).await?,
        Commands::Schedule => cmd_listing(&resolver, ListingSource::Schedule).await?,
        Commands::Search { query } => cmd_search(&resolver, &query).await?,
        Commands::Expand { payload } => cmd_expand(&payload)?,
        Commands::Resolve { ids, payload } => cmd_resolve(&resolver, ids, payload).await?,
        Commands::Root => {
            println!("{}", resolver.discover_root().await?);
        }
    }

    Ok(())
}

async fn cmd_listing(resolver: &ChannelResolver, source: ListingSource) -> Result<()> {
    let groups = resolver.channel_groups(source).await?;
    for group in &groups {
        println!("{} ({} entries)", group.header, group.entries.len());
        for entry in &group.entries {
            println!("  {}\t{}", entry.title, entry.payload);
        }
    }
    eprintln!("📋 {} group(s)", groups.len());
    Ok(())
}

async fn cmd_search(resolver: &ChannelResolver, query: &str) -> Result<()> {
    let entries = resolver.search(query).await?;
    for entry in &entries {
        println!("{}\t{}", entry.title, entry.payload);
    }
    eprintln!("🔍 {} match(es) for {query:?}", entries.len());
    Ok(())
}

fn cmd_expand(payload: &str) -> Result<()> {
    let entries = expand(payload)?;
    for entry in &entries {
        let name = entry.name.as_deref().unwrap_or("(unnamed)");
        match entry.description.as_deref() {
            Some(desc) => println!("{name} [{desc}]\t{}", entry.payload),
            None => println!("{name}\t{}", entry.payload),
        }
    }
    eprintln!("📺 {} playable entr(ies)", entries.len());
    Ok(())
}

async fn cmd_resolve(
    resolver: &ChannelResolver,
    ids: Vec<String>,
    payload: Option<String>,
) -> Result<()> {
    let streams = match payload {
        Some(payload) => resolver.resolve_payload(&payload).await?,
        None => {
            if ids.is_empty() {
                anyhow::bail!("pass channel ids or --payload");
            }
            let channels: Vec<Channel> =
                ids.iter().map(|id| Channel::new(id.clone(), id.clone())).collect();
            resolver.resolve_channels(&channels).await?
        }
    };

    for stream in &streams {
        println!("{}\t{}\treferer={}", stream.label, stream.media_url, stream.referer);
    }
    eprintln!("🎬 {} stream(s) resolved", streams.len());
    Ok(())
}
