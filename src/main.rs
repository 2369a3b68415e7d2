use clap::Parser;
use lora_survey::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments; usage errors exit with clap's code
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run_until_interrupted(command)) {
        Ok(_stats) => {
            // Stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("LoRaWAN Survey Converter");
    println!("========================");
    println!();
    println!("Move LoRaWAN radio-survey measurements between collector JSON,");
    println!("delimited survey tables and heat-map survey documents.");
    println!();
    println!("USAGE:");
    println!("    lora-survey <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    export      Export collector JSON measurements to a survey table");
    println!("    import      Import a completed survey table into a survey document");
    println!("    thresholds  Compute colour-scale thresholds across survey documents");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Export measurements to survey.csv:");
    println!("    lora-survey export --data measurements.json");
    println!();
    println!("    # Import a completed table with a custom title and bounds:");
    println!("    lora-survey import --data survey.csv --title \"Level 2\" \\");
    println!("                       --locations \"[0,0,120,80]\" --output data/level2.json");
    println!();
    println!("    # Shared colour scale for two surveys:");
    println!("    lora-survey thresholds data/level1.json data/level2.json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    lora-survey <COMMAND> --help");
}
