use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

mod app;
mod config;
mod library;
mod logging;
mod models;
mod playlist;


use crate::app::Outcome;
use crate::config::load_config;
use crate::library::JsonLibrary;
use crate::playlist::{BlockResult, PlaylistRequest};

#[derive(Parser)]
#[command(name = "blockmix")]
#[command(about = "Builds segmented, genre-weighted playlists from a library snapshot")]
#[command(version)]
struct Args {
    /// Path to the playlist request JSON file
    #[arg(short = 'r', long = "request", default_value = "playlist.json")]
    request_file: String,

    /// Path to the library snapshot JSON file (overrides BLOCKMIX_LIBRARY)
    #[arg(short = 'l', long = "library")]
    library_file: Option<String>,

    /// Regenerate only the block at this index, ignoring tracks used by other blocks
    #[arg(long = "remix", value_name = "INDEX")]
    remix: Option<usize>,

    /// Seed the random source for a reproducible result
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Write the generated result as JSON to this file
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// List the library's genres with track counts and exit
    #[arg(long = "genres")]
    genres: bool,

    /// Search the library for tracks whose title contains this term and exit
    #[arg(long = "search", value_name = "TERM")]
    search: Option<String>,

    /// Only list tracks whose artist credit contains this name (with --search or alone)
    #[arg(long = "artist", value_name = "NAME")]
    artist: Option<String>,

    /// Maximum number of search results
    #[arg(long = "limit", default_value_t = 20)]
    limit: usize,

    /// Enable debug mode - print every pick and engine diagnostics
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Quiet mode - reduce output verbosity
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.debug, args.quiet);

    let config = load_config()?;
    let library_path = args
        .library_file
        .clone()
        .unwrap_or_else(|| config.library_path.clone());
    let library = JsonLibrary::new(&library_path);

    if args.genres {
        let genres = app::list_genres(&library)?;
        println!("Genres in '{library_path}':");
        for (name, count) in &genres {
            println!("  {name} ({count})");
        }
        return Ok(());
    }

    if args.search.is_some() || args.artist.is_some() {
        let found = app::search_tracks(
            &library,
            args.search.as_deref(),
            args.artist.as_deref(),
            args.limit,
        )?;
        println!("Found {} tracks:", found.len());
        for pick in &found {
            println!(
                "  {} | \"{}\" by {} {} | {}",
                pick.id,
                pick.name,
                pick.artist,
                pick.duration_display(),
                pick.genre
            );
        }
        return Ok(());
    }

    // Validate that the request file exists before proceeding
    if !std::path::Path::new(&args.request_file).exists() {
        eprintln!(
            "Error: Playlist request file '{}' not found.",
            args.request_file
        );
        eprintln!("Please ensure the file exists or specify a different file with --request.");
        return Err(anyhow::anyhow!(
            "Request file '{}' not found",
            args.request_file
        ));
    }

    let request = PlaylistRequest::load_from_file(&args.request_file)?;
    if !args.quiet {
        println!("Loaded request '{}' from {}", request.name, args.request_file);
        println!("Reading library from {library_path}");
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let outcome = match app::run_request(&request, &config, &library, args.remix, &mut rng) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("✗ Generation failed: {e:#}");
            return Err(e);
        }
    };

    match &outcome {
        Outcome::Playlist(playlist) => {
            println!("\n{}", playlist.name);
            println!("{}", "=".repeat(playlist.name.len()));
            println!(
                "Blocks: {} | Tracks: {} | Duration: {}",
                playlist.blocks.len(),
                playlist.total_tracks(),
                playlist.duration_display()
            );
            for block in &playlist.blocks {
                print_block(block, args.debug, args.quiet);
            }
            if args.debug {
                println!("\nTrack order: {}", playlist.track_ids().join(", "));
            }
        }
        Outcome::Remix { index, block } => {
            println!("\nRemixed block {}:", index + 1);
            print_block(block, args.debug, args.quiet);
        }
    }

    if let Some(path) = &args.output {
        match app::write_outcome(&outcome, path) {
            Ok(()) => println!("\n✓ Wrote result to {path}"),
            Err(e) => {
                eprintln!("\n✗ Failed to write result: {e:#}");
                return Err(e);
            }
        }
    }

    Ok(())
}

fn print_block(block: &BlockResult, debug: bool, quiet: bool) {
    let weights: Vec<String> = block
        .genre_weights
        .iter()
        .map(|(genre, weight)| format!("{genre} {weight}"))
        .collect();
    println!(
        "\n{} [{}] - {} tracks, {}",
        block.name,
        weights.join(", "),
        block.tracks.len(),
        block.duration_display()
    );
    if quiet {
        return;
    }

    if block.tracks.is_empty() {
        println!("   No tracks available for this block.");
        return;
    }

    for (i, pick) in block.tracks.iter().enumerate() {
        let year_display = pick.year.map(|y| format!(" [{y}]")).unwrap_or_default();
        let must_have = if pick.is_must_have { " ⭐" } else { "" };
        println!(
            "   {}. \"{}\"{} by {} {}{} | {}",
            i + 1,
            pick.name,
            must_have,
            pick.artist,
            pick.duration_display(),
            year_display,
            pick.genre
        );
        if debug {
            println!(
                "        Album: {} | Artist key: {} | ID: {}",
                pick.album, pick.artist_key, pick.id
            );
        }
    }
}
