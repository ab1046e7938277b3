use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use uniprot_feature_search::client::DEFAULT_NAMESPACE;
use uniprot_feature_search::{
    DescriptionPattern, FeatureFilter, FeatureQuery, LengthBound, SearchClient,
};

/// Query UniProtKB for entries with a feature satisfying type, description
/// and length conditions all at the same time.
#[derive(Parser, Debug)]
#[command(name = "uniprot-feature-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find UniProtKB entries by feature type, description and length", long_about = None)]
struct Cli {
    /// Feature type to match, e.g. "motif" or "region"
    #[arg(long)]
    ft_type: String,

    /// Feature description to match; "*" accepts any description
    #[arg(long, default_value = "*")]
    ft_description: String,

    /// Minimum feature length, or "*" for no lower bound
    #[arg(long, default_value = "*")]
    ft_min_length: LengthBound,

    /// Maximum feature length, or "*" for no upper bound
    #[arg(long, default_value = "*")]
    ft_max_length: LengthBound,

    /// Extra query clause ANDed to the feature clause, e.g. "(organism_id:9606)"
    #[arg(long)]
    and_query: Option<String>,

    /// Results per page
    #[arg(long, default_value_t = 50)]
    size: usize,

    /// Output file, one accession per line
    #[arg(long, default_value = "results.list")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut query = FeatureQuery::new(&cli.ft_type)
        .description(&cli.ft_description)
        .min_length(cli.ft_min_length)
        .max_length(cli.ft_max_length);
    if let Some(clause) = &cli.and_query {
        query = query.and(clause);
    }
    let query = query.build();

    let pattern = DescriptionPattern::compile(&cli.ft_description)
        .context("invalid feature description")?;
    let filter = FeatureFilter::new(&cli.ft_type, pattern, cli.ft_min_length, cli.ft_max_length);

    let client = SearchClient::new()?;
    let mut pages = client.paginate(&query, cli.size, DEFAULT_NAMESPACE)?;

    let file = File::create(&cli.out)
        .with_context(|| format!("cannot create output file {}", cli.out.display()))?;
    let mut out = BufWriter::new(file);

    let mut n_results = 0usize;
    while let Some(batch) = pages.next_batch().await? {
        for entry in batch.iter().filter(|entry| filter.matches(entry)) {
            writeln!(out, "{}", entry.primary_accession)?;
            n_results += 1;
        }
    }
    out.flush()?;

    println!("{} results saved in file {}", n_results, cli.out.display());
    Ok(())
}
