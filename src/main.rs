use std::fs;
use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use regex::Regex;

use minbool::agent_api::{solve_request, SolveRequest, SolveResponse};
use minbool::truth;
use minbool::{DEFAULT_COMPLEXITY, DEFAULT_TABLE};

fn main() {
    let matches = cli().get_matches();

    let result = match matches.subcommand() {
        Some(("solve", sub_matches)) => handle_solve(sub_matches),
        Some(("interactive", _)) => handle_interactive(),
        Some(("examples", _)) => handle_examples(),
        _ => {
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("minbool")
        .version("0.1.0")
        .about("Brute-force minimal Boolean term enumerator over partial truth tables")
        .subcommand(
            Command::new("solve")
                .about("Find every minimal-complexity term realising a truth table")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .help("Table text, a JSON file path, inline JSON, or natural language")
                        .default_value(DEFAULT_TABLE),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .help("Output format")
                        .value_parser(["human", "json", "table"])
                        .default_value("human"),
                )
                .arg(
                    Arg::new("complexity")
                        .short('c')
                        .long("complexity")
                        .help("Maximum complexity considered (overrides the request's own value)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .help("Print one line per explored complexity level to stderr")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("interactive").about("Interactive REPL for repeated queries"))
        .subcommand(Command::new("examples").about("Show usage examples"))
}

fn handle_solve(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .expect("input has a default value");
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default value");
    let complexity_override = matches.get_one::<usize>("complexity").copied();
    let verbose = matches.get_flag("verbose");

    let mut request = parse_input(input)?;
    if let Some(c) = complexity_override {
        request.complexity = Some(c);
    }

    let response = if verbose {
        solve_request_verbose(&request)?
    } else {
        solve_request(&request).map_err(|e| anyhow!("invalid truth table: {e}"))?
    };

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&response)?),
        "human" => print_human(&response),
        "table" => print_table(&response)?,
        other => return Err(anyhow!("unknown format: {other}")),
    }

    if response.solutions.is_empty() {
        return Err(anyhow!(
            "no solution found within complexity {}",
            response.complexity
        ));
    }
    Ok(())
}

/// Runs the solver with a per-level trace on stderr, then delegates to
/// [`solve_request`]'s own formatting via a freshly built response.
fn solve_request_verbose(request: &SolveRequest) -> Result<SolveResponse> {
    let table = truth::parse_table(&request.table).map_err(|e| anyhow!("invalid truth table: {e}"))?;
    let max_complexity = request.complexity.unwrap_or(DEFAULT_COMPLEXITY);
    let forcer = minbool::Forcer::new(&table);
    let result = forcer.run_with(max_complexity as u32, |level, new_terms| {
        eprintln!("level {level}: {new_terms} new working-set terms");
    });

    Ok(SolveResponse {
        table: table.to_string(),
        complexity: result.complexity().unwrap_or(0) as usize,
        solutions: result.terms.iter().map(|t| t.render()).collect(),
        explored: result.explored,
    })
}

fn parse_input(input: &str) -> Result<SolveRequest> {
    if let Ok(content) = fs::read_to_string(input) {
        if let Ok(request) = serde_json::from_str::<SolveRequest>(&content) {
            return Ok(request);
        }
    }

    if let Ok(request) = serde_json::from_str::<SolveRequest>(input) {
        return Ok(request);
    }

    parse_natural_input(input)
}

fn parse_natural_input(input: &str) -> Result<SolveRequest> {
    let input = input.trim();

    let verbose_pattern = Regex::new(r"^table\s+([01x]+)(?:\s+complexity\s+(\d+))?$")
        .expect("static regex is valid");
    if let Some(caps) = verbose_pattern.captures(input) {
        let table = caps[1].to_string();
        let complexity = caps
            .get(2)
            .map(|m| m.as_str().parse::<usize>())
            .transpose()
            .context("failed to parse complexity")?;
        return Ok(SolveRequest { table, complexity });
    }

    if !input.is_empty() && input.chars().all(|c| matches!(c, '0' | '1' | 'x')) {
        return Ok(SolveRequest {
            table: input.to_string(),
            complexity: None,
        });
    }

    Err(anyhow!(
        "could not parse input format. Supported formats:\n\
         - JSON: {{\"table\": \"0110\", \"complexity\": 16}}\n\
         - Natural language: table 0110 complexity 16\n\
         - Bare table: 0110\n\
         - Path to a JSON file"
    ))
}

fn print_human(response: &SolveResponse) {
    println!("Table: {}", response.table);
    if response.solutions.is_empty() {
        println!("No solution found within complexity {}.", response.complexity);
        return;
    }
    println!(
        "Found {} minimal solution(s) with complexity {}:",
        response.solutions.len(),
        response.complexity
    );
    for (i, term) in response.solutions.iter().enumerate() {
        println!("  {:2}: {}", i + 1, term);
    }
    println!("(explored {} distinct terms)", response.explored);
}

fn print_table(response: &SolveResponse) -> Result<()> {
    let table = truth::parse_table(&response.table)?;
    println!("{}", table.format_table());
    print_human(response);
    Ok(())
}

fn handle_interactive() -> Result<()> {
    println!("minbool interactive mode");
    println!("Enter a table in any supported format, 'help' for options, 'quit' to exit.\n");

    loop {
        print!("minbool> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "quit" | "exit" => break,
            "help" => print_interactive_help(),
            "examples" => print_examples(),
            "" => continue,
            _ => match parse_input(line) {
                Ok(request) => match solve_request(&request) {
                    Ok(response) => {
                        println!();
                        print_human(&response);
                        println!();
                    }
                    Err(e) => eprintln!("Error: invalid truth table: {e}"),
                },
                Err(e) => eprintln!("Parse error: {e}"),
            },
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn print_interactive_help() {
    println!("\nCommands:");
    println!("  help      - show this help");
    println!("  examples  - show usage examples");
    println!("  quit/exit - exit interactive mode");
    println!("  anything else is parsed as a table to solve\n");
}

fn handle_examples() -> Result<()> {
    print_examples();
    Ok(())
}

fn print_examples() {
    println!("\nUsage examples:");
    println!("==================");
    println!("\n1. Bare table:");
    println!("   minbool solve -i 0110");
    println!("\n2. Natural language with an explicit budget:");
    println!("   minbool solve -i 'table 1110100010000000 complexity 12'");
    println!("\n3. Inline JSON:");
    println!("   minbool solve -i '{{\"table\": \"0110\", \"complexity\": 8}}'");
    println!("\n4. From a JSON file:");
    println!("   minbool solve -i request.json");
    println!("\n5. JSON output:");
    println!("   minbool solve -i 0110 -f json");
    println!("\n6. Verbose level trace:");
    println!("   minbool solve -i 0110 --verbose");
    println!("\n7. Interactive mode:");
    println!("   minbool interactive");
}
