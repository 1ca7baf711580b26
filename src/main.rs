use clap::{Parser as ClapParser, Subcommand};
use odata_mongo::cli::{self, CheckOptions, CheckResult, CliError, QueryOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "odata")]
#[command(about = "Compile OData query options into MongoDB predicate documents")]
#[command(version)]
struct Cli {
    /// Log parser and translator activity (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a $filter expression and print its predicate document
    Filter {
        /// The $filter expression
        filter: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't translate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Parse a full query string ($filter, $select, $orderby, $top, $skip)
    Query {
        /// The query string (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Filter {
            filter,
            pretty,
            syntax_only,
        } => run_filter(filter, pretty, syntax_only),
        Commands::Query { query, pretty } => run_query(query, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_filter(filter: String, pretty: bool, syntax_only: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        filter,
        pretty,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(json) => println!("{}", json),
    }
    Ok(())
}

fn run_query(query: Option<String>, pretty: bool) -> Result<(), CliError> {
    let query = match query {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = QueryOptions { query, pretty };
    println!("{}", cli::execute_query(&options)?);
    Ok(())
}
