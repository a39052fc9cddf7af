use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use wiki_search::config::CONFIG_FILENAME;
use wiki_search::query::highlight_segments;
use wiki_search::{
    search_with_config, Article, ArticleSource, FallbackSource, JsonIndexFile, Result,
    SearchConfig, SearchIndexCache, SearchOutcome, WikiSearchError,
};

/// Search a wiki article index
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search query, e.g. `(React OR Vue) hooks -class "state management"`
    query: String,

    /// Config file (defaults to ./wiki-search.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search index file (JSON array of articles)
    #[arg(long)]
    index: Option<PathBuf>,

    /// Index file used when the primary index cannot be read
    #[arg(long)]
    fallback_index: Option<PathBuf>,

    /// Maximum number of results to print
    #[arg(long)]
    limit: Option<usize>,

    /// Print results as JSON
    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultPayload<'a> {
    query: &'a str,
    count: usize,
    truncated: bool,
    highlight_terms: &'a [String],
    articles: &'a [&'a Article],
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("wiki-search: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = resolve_config(&args)?;
    let index_path = config.index_path.clone().ok_or_else(|| {
        WikiSearchError::Config("no index configured (use --index or WIKI_SEARCH_INDEX)".to_string())
    })?;

    let primary = JsonIndexFile::new(index_path);
    let source: Box<dyn ArticleSource> = match config.fallback_index_path.clone() {
        Some(fallback) => Box::new(FallbackSource::new(
            primary.require_existing(),
            JsonIndexFile::new(fallback),
        )),
        None => Box::new(primary),
    };

    let cache = SearchIndexCache::new();
    let articles = cache.ensure_loaded(source.as_ref()).await?;
    let outcome = search_with_config(&args.query, &articles, &config);

    if args.json {
        print_json(&args.query, &outcome)?;
    } else {
        print_text(&outcome);
    }
    Ok(())
}

fn resolve_config(args: &Args) -> Result<SearchConfig> {
    let config = match &args.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::load_or_default(&PathBuf::from(CONFIG_FILENAME))?,
    };
    let mut config = config.apply_env()?;

    if let Some(index) = &args.index {
        config.index_path = Some(index.clone());
    }
    if let Some(fallback) = &args.fallback_index {
        config.fallback_index_path = Some(fallback.clone());
    }
    if let Some(limit) = args.limit {
        config.max_results = Some(limit);
    }
    Ok(config)
}

fn print_json(raw_query: &str, outcome: &SearchOutcome<'_>) -> Result<()> {
    let payload = SearchResultPayload {
        query: raw_query,
        count: outcome.count(),
        truncated: outcome.truncated,
        highlight_terms: outcome.highlight_terms(),
        articles: &outcome.articles,
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn print_text(outcome: &SearchOutcome<'_>) {
    let terms = outcome.highlight_terms();
    for article in &outcome.articles {
        let mut line = marked(article.leaf_title(), terms);
        if article.is_nested() {
            line.push_str("  (");
            line.push_str(&marked(&article.title, terms));
            line.push(')');
        }
        println!("{line}");
    }

    let suffix = if outcome.truncated { ", truncated" } else { "" };
    println!("{} result(s){suffix}", outcome.count());
}

fn marked(text: &str, terms: &[String]) -> String {
    highlight_segments(text, terms)
        .into_iter()
        .map(|segment| {
            if segment.highlighted {
                format!("[{}]", segment.text)
            } else {
                segment.text.to_string()
            }
        })
        .collect()
}
