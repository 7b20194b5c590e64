// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "wiki-pathfinder",
    version = "0.1.0",
    about = "A CLI tool to find the shortest chain of links between two Wikipedia articles",
    long_about = "wiki-pathfinder crawls outward from a starting article with a concurrent \
                  breadth-first search until it reaches the target article, then prints the \
                  shortest chain of links connecting the two."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (find, links)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the shortest chain of links between two articles
    ///
    /// Example: wiki-pathfinder find https://en.wikipedia.org/wiki/Six_degrees_of_separation
    ///          https://en.wikipedia.org/wiki/American_Broadcasting_Company
    Find {
        /// Starting article URL (e.g., https://en.wikipedia.org/wiki/Rust)
        ///
        /// This is a positional argument (required, no flag needed)
        start_url: String,

        /// Target article URL (must be on the same wiki as the start)
        ///
        /// This is a positional argument (required)
        target_url: String,

        /// How many pages may be fetched at the same time
        ///
        /// Higher values finish rounds faster but hit the site harder
        #[arg(long, default_value_t = 10)]
        max_connections: usize,

        /// Stop after this many search rounds (unbounded when omitted)
        ///
        /// Each round expands all articles at one link-distance from the
        /// start, so a bound of N can discover chains of at most N-1 links
        #[arg(long)]
        max_depth: Option<usize>,

        /// Output the result in JSON format instead of text
        ///
        /// This is an optional flag: --json
        #[arg(long)]
        json: bool,
    },

    /// List the articles a single article links to
    ///
    /// Example: wiki-pathfinder links https://en.wikipedia.org/wiki/Rust
    Links {
        /// Article URL to inspect
        ///
        /// This is a positional argument (required)
        article_url: String,

        /// Output the list in JSON format instead of text
        #[arg(long)]
        json: bool,
    },
}
