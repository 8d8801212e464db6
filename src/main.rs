//! Wordlist Merger - Weave-merge wordlists with streaming deduplication
//!
//! Main entry point for the command-line application.

use bytesize::ByteSize;
use clap::Parser;
use std::process;

use wordlist_merger::cli::Args;
use wordlist_merger::expand::expand_patterns;
use wordlist_merger::merge::{estimated_input_bytes, MergeConfig, Merger};
use wordlist_merger::progress::{
    print_banner, print_bullet, print_error, print_header, print_info, print_success,
    print_warning, ConsoleReporter,
};

/// Above this many simultaneously open files, warn about OS descriptor limits.
const FD_WARN_THRESHOLD: usize = 100;

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    let config = MergeConfig::from_args(&args)?;

    if !args.quiet && args.verbose {
        print_config(&args, &config);
    }

    let mut reporter = ConsoleReporter::new(args.quiet);

    if !args.quiet {
        print_header("Expanding file patterns...");
    }
    let files = expand_patterns(&args.patterns, &reporter)?;

    let total_bytes = estimated_input_bytes(&files);
    if !args.quiet {
        print_info(&format!(
            "Resolved {} files ({} total)",
            files.len(),
            ByteSize(total_bytes)
        ));
    }

    // The merger opens one handle per file; past the threshold that can run
    // into OS descriptor limits.
    if files.len() > FD_WARN_THRESHOLD {
        print_warning(&format!("Opening {} files simultaneously.", files.len()));
        print_warning("If you encounter errors, your OS may have file descriptor limits.");
    }

    if !args.quiet {
        print_header("Weave-merging...");
        print_info(&format!("Output: {}", args.output.display()));
    }

    reporter.begin_merge(total_bytes);
    let merger = Merger::new(config);
    let result = merger.merge(&files, &reporter);
    reporter.finish();
    let stats = result?;

    if !args.quiet {
        stats.print_summary();
        print_success(&format!("Output written to: {}", args.output.display()));
    }

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &MergeConfig) {
    print_header("Configuration");

    for pattern in &args.patterns {
        print_bullet(pattern);
    }
    print_info(&format!("Output:          {}", config.output.display()));
    print_info(&format!("Dedup strategy:  {:?}", config.strategy));
    print_info(&format!(
        "Read buffers:    {} per file",
        ByteSize(config.buffer_size as u64)
    ));
    print_info(&format!(
        "Output buffer:   {}",
        ByteSize(config.output_buffer_size as u64)
    ));
}
