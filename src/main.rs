mod engine;
mod error;
mod format;
mod loader;
mod session;
mod types;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use rust_decimal::Decimal;

use types::{Dataset, QueryDescriptor, Report};

const DEFAULT_DATA_FILE: &str = "renewable-electricity.xml";
const DEFAULT_SESSION_FILE: &str = "settings.xml";

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() > 3 {
        eprintln!("Usage: {} [dataset.xml] [settings.xml]", args[0]);
        process::exit(1);
    }
    let data_path = PathBuf::from(args.get(1).map_or(DEFAULT_DATA_FILE, String::as_str));
    let session_path = PathBuf::from(args.get(2).map_or(DEFAULT_SESSION_FILE, String::as_str));

    let dataset = loader::load_dataset(&data_path).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {}", data_path.display(), e);
        process::exit(1);
    });

    println!("Renewable Electricity Report Generator\n");
    println!("Renewable Electricity Production in {}", dataset.year);
    println!("========================================");

    // Replay the previous visit's query, if one decodes and still
    // matches the dataset.
    if let Some(query) = session::load(&session_path) {
        if let Ok(report) = engine::run_query(&dataset, &query) {
            println!();
            println!("Here is the final report you requested the last time you were here...");
            print_report(&report);
        }
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        let command = match prompt(
            &mut input,
            "\nEnter 'C' to select a country, 'S' to select a specific source, 'P' to select\na % range of renewables production, or 'X' to quit: ",
        ) {
            Some(line) => line.to_uppercase(),
            None => break,
        };

        let query = match command.as_str() {
            "C" => pick_country(&dataset, &mut input),
            "S" => pick_source_type(&dataset, &mut input),
            "P" => pick_percent_range(&mut input),
            "X" => {
                println!("\nShutting down program...");
                break;
            }
            _ => {
                println!("Invalid Command Error: Please enter a valid command...");
                continue;
            }
        };
        let Some(query) = query else { continue };

        match engine::run_query(&dataset, &query) {
            Ok(report) => {
                print_report(&report);
                if let Err(e) = session::save(&session_path, &query) {
                    eprintln!("Warning: could not save the session: {e}");
                }
            }
            Err(e) => println!("{e}"),
        }
    }
}

fn print_report(report: &Report) {
    println!();
    for line in format::format(report) {
        println!("{line}");
    }
}

// Print a label without a newline and read one trimmed input line.
// Returns None at end of input.
fn prompt(input: &mut impl BufRead, label: &str) -> Option<String> {
    print!("{label}");
    io::stdout().flush().ok()?;
    let mut line = String::new();
    if input.read_line(&mut line).ok()? == 0 {
        return None;
    }
    Some(line.trim().to_string())
}

fn pick_country(dataset: &Dataset, input: &mut impl BufRead) -> Option<QueryDescriptor> {
    print_country_menu(dataset);
    loop {
        let line = prompt(input, "Enter a country #: ")?;
        match line.parse::<usize>() {
            Ok(index) if index >= 1 && index <= dataset.countries.len() => {
                return Some(QueryDescriptor::ByCountry {
                    country: dataset.countries[index - 1].name.clone(),
                });
            }
            _ => println!("Invalid Country Error: Please enter a valid country number..."),
        }
    }
}

// Numbered menu of every country, three per line, in dataset order.
fn print_country_menu(dataset: &Dataset) {
    println!();
    for (i, country) in dataset.countries.iter().enumerate() {
        if i % 3 == 0 && i != 0 {
            println!();
        }
        print!("{:>3}. {:<30}", i + 1, format::truncate_name(&country.name, 27));
    }
    println!();
    println!();
}

fn pick_source_type(dataset: &Dataset, input: &mut impl BufRead) -> Option<QueryDescriptor> {
    let source_types = engine::unique_source_types(dataset);
    if source_types.is_empty() {
        println!("No renewable energy types found in the data.");
        return None;
    }

    println!("\nSelect a renewable by number as shown below...");
    for (i, name) in source_types.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }
    println!();

    loop {
        let line = prompt(input, "Enter a renewable #: ")?;
        match line.parse::<usize>() {
            Ok(index) if index >= 1 && index <= source_types.len() => {
                return Some(QueryDescriptor::BySourceType {
                    source_type: source_types[index - 1].clone(),
                });
            }
            _ => println!("Invalid Renewable Error: Please enter a valid renewable number..."),
        }
    }
}

fn pick_percent_range(input: &mut impl BufRead) -> Option<QueryDescriptor> {
    loop {
        println!();
        let min_str = prompt(
            input,
            "Enter the minimum % of renewables produced or press enter for no minimum: ",
        )?;
        let max_str = prompt(
            input,
            "Enter the maximum % of renewables produced or press enter for no maximum: ",
        )?;

        let min = match parse_bound(&min_str, "minimum") {
            Ok(bound) => bound,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        let max = match parse_bound(&max_str, "maximum") {
            Ok(bound) => bound,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        if let Err(e) = engine::validate_range(min, max) {
            println!("{e}");
            continue;
        }
        return Some(QueryDescriptor::ByPercentRange { min, max });
    }
}

// Empty input means "no bound".
fn parse_bound(text: &str, which: &str) -> Result<Option<Decimal>, String> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<Decimal>().map(Some).map_err(|_| {
        format!("Invalid Range Error: Please enter a valid number for the {which} value...")
    })
}
