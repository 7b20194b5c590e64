// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Run the search (or the single-page link listing) and print the result
// 4. Exit with proper code (0 = chain found, 1 = no chain, 2 = error)
//
// Rust concepts used:
// - async/await: Because the search makes many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands and outcomes
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod search; // src/search/ - the concurrent BFS over the link graph
mod wiki; // src/wiki/ - article URL handling and page fetching

// Import items we need from our modules
use clap::Parser; // Parser trait enables the parse() method
use cli::{Cli, Commands};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;
use serde::Serialize;

use search::SearchOutcome;
use wiki::{LinkSource, Namespace};

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = chain found (or `links` listed successfully)
//   Ok(1) = no chain found
//   Err = error (malformed URLs, different wikis, ...)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Match on which subcommand was used
    match cli.command {
        Commands::Find {
            start_url,
            target_url,
            max_connections,
            max_depth,
            json,
        } => handle_find(&start_url, &target_url, max_connections, max_depth, json).await,
        Commands::Links { article_url, json } => handle_links(&article_url, json).await,
    }
}

// Handles the 'find' subcommand
//
// Parameters:
//   start_url / target_url: the two article URLs to connect
//   max_connections: concurrency cap for page fetches
//   max_depth: optional bound on search rounds
//   json: whether to output JSON format
async fn handle_find(
    start_url: &str,
    target_url: &str,
    max_connections: usize,
    max_depth: Option<usize>,
    json: bool,
) -> Result<i32> {
    println!("🔍 Searching for a chain of links");
    println!("   from: {}", start_url);
    println!("   to:   {}", target_url);
    println!("📊 Concurrency limit: {}", max_connections);

    let outcome =
        search::find_shortest_path(start_url, target_url, max_connections, max_depth).await?;

    // The namespace is needed again to print the chain as full article URLs
    let (namespace, _) = wiki::parse_entry(start_url)?;

    print_outcome(&outcome, &namespace, json)?;

    match outcome {
        SearchOutcome::Found { .. } => Ok(0), // Exit code 0 = chain found
        _ => Ok(1),                           // Exit code 1 = no chain
    }
}

// Handles the 'links' subcommand
//
// Fetches a single article and lists the articles it links to - handy for
// seeing exactly what the search sees on one page.
async fn handle_links(article_url: &str, json: bool) -> Result<i32> {
    let (namespace, article) = wiki::parse_entry(article_url)?;

    println!("🔍 Fetching links from: {}", article_url);

    let client = wiki::WikiClient::new(namespace)?;
    let links = client.fetch_links(&article).await?;

    // Sort for stable, readable output (sets have no order)
    let mut links: Vec<String> = links.into_iter().collect();
    links.sort();

    if json {
        println!("{}", serde_json::to_string_pretty(&links)?);
    } else {
        println!("📄 {} article(s) linked from {}:\n", links.len(), article);
        for link in &links {
            println!("   {}", link);
        }
    }

    Ok(0)
}

// What the --json mode of 'find' prints: the outcome plus the chain rendered
// as full article URLs
#[derive(Serialize)]
struct ChainReport<'a> {
    #[serde(flatten)] // This merges the SearchOutcome fields into ChainReport
    outcome: &'a SearchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    urls: Option<Vec<String>>,
}

// Prints the search outcome either as text or JSON
//
// Parameters:
//   outcome: how the search ended
//   namespace: the wiki both articles live on (to rebuild full URLs)
//   json: whether to output JSON format
fn print_outcome(outcome: &SearchOutcome, namespace: &Namespace, json: bool) -> Result<()> {
    if json {
        let report = ChainReport {
            outcome,
            links: outcome.path().map(|path| path.len() - 1),
            urls: outcome.path().map(|path| article_urls(path, namespace)),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    match outcome {
        SearchOutcome::Found { path } => {
            println!("✅ Found a chain with {} link(s):", path.len() - 1);
            println!("   {}", article_urls(path, namespace).join(" => "));
        }
        SearchOutcome::Exhausted => {
            println!("❌ No chain of links connects the two articles");
        }
        SearchOutcome::DepthLimited { rounds } => {
            println!(
                "⏱️  No chain found within {} round(s) - a longer one may still exist",
                rounds
            );
        }
    }

    Ok(())
}

// Renders a chain of article titles as full URLs on the given wiki
fn article_urls(path: &[String], namespace: &Namespace) -> Vec<String> {
    path.iter()
        .map(|title| namespace.article_url(title))
        .collect()
}
