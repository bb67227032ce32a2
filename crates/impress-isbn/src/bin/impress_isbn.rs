//! impress-isbn CLI - parse, validate, and normalize ISBNs.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use impress_isbn::{Isbn, IsbnConfig, IsbnReport, OutputConfig, OutputFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "impress-isbn")]
#[command(about = "Parse, validate, and normalize ISBN-10 and ISBN-13 numbers")]
struct Cli {
    /// Config file (default: <config dir>/impress-isbn/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Output format (overrides the config file)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
    /// Convert to ISBN-13 before printing
    #[arg(long, global = true)]
    normalize: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether each ISBN has a correct check digit
    Check {
        #[arg(required = true)]
        isbns: Vec<String>,
        /// Exit with error code if any ISBN is invalid
        #[arg(long)]
        strict: bool,
    },
    /// Print each ISBN converted to ISBN-13
    Normalize {
        #[arg(required = true)]
        isbns: Vec<String>,
    },
    /// Print each ISBN without separators
    Barcode {
        #[arg(required = true)]
        isbns: Vec<String>,
    },
    /// Show the parsed fields of each ISBN
    Inspect {
        #[arg(required = true)]
        isbns: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

type CliResult = Result<bool, Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut output = IsbnConfig::load_or_default(cli.config.as_deref()).output;
    if let Some(format) = cli.format {
        output.format = format;
    }
    output.normalize |= cli.normalize;

    let result = match cli.command {
        Commands::Check { isbns, strict } => check(&isbns, strict, &output),
        Commands::Normalize { isbns } => {
            output.normalize = true;
            print_all(&isbns, &output)
        }
        Commands::Barcode { isbns } => {
            output.format = OutputFormat::Barcode;
            print_all(&isbns, &output)
        }
        Commands::Inspect { isbns, json } => {
            if json {
                output.format = OutputFormat::Json;
            }
            inspect(&isbns, &output)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_with(input: &str, output: &OutputConfig) -> Isbn {
    let isbn = Isbn::parse(input);
    if output.normalize {
        isbn.normalized()
    } else {
        isbn
    }
}

fn render(input: &str, isbn: &Isbn, output: &OutputConfig) -> Result<String, serde_json::Error> {
    let rendered = match output.format {
        OutputFormat::Text => isbn.to_string(),
        OutputFormat::Barcode => isbn.barcode(),
        OutputFormat::Json => return serde_json::to_string(&IsbnReport::new(input, isbn)),
    };

    if output.uppercase_check {
        Ok(rendered.replace('x', "X"))
    } else {
        Ok(rendered)
    }
}

fn check(isbns: &[String], strict: bool, output: &OutputConfig) -> CliResult {
    let mut all_valid = true;

    for input in isbns {
        let (valid, line) = check_line(input, output)?;
        all_valid &= valid;
        println!("{}", line);
    }

    Ok(all_valid || !strict)
}

/// Validity is judged on the input as written; normalizing first would
/// replace a wrong check digit with a computed one.
fn check_line(input: &str, output: &OutputConfig) -> Result<(bool, String), serde_json::Error> {
    let isbn = Isbn::parse(input);
    let valid = isbn.is_valid();

    let line = match (output.format, isbn.error()) {
        (OutputFormat::Json, _) => serde_json::to_string(&IsbnReport::new(input, &isbn))?,
        (_, Some(err)) => format!("{}\tmalformed: {}", input, err),
        (_, None) if valid => format!("{}\tvalid", input),
        (_, None) => format!("{}\tinvalid", input),
    };

    Ok((valid, line))
}

fn print_all(isbns: &[String], output: &OutputConfig) -> CliResult {
    let mut all_parsed = true;

    for input in isbns {
        let isbn = parse_with(input, output);
        match isbn.error() {
            Some(err) if output.format != OutputFormat::Json => {
                eprintln!("{}: {}", input, err);
                all_parsed = false;
            }
            _ => println!("{}", render(input, &isbn, output)?),
        }
    }

    Ok(all_parsed)
}

fn inspect(isbns: &[String], output: &OutputConfig) -> CliResult {
    if output.format == OutputFormat::Json {
        let reports: Vec<IsbnReport> = isbns
            .iter()
            .map(|input| IsbnReport::new(input, &parse_with(input, output)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(true);
    }

    for (i, input) in isbns.iter().enumerate() {
        let isbn = parse_with(input, output);
        if i > 0 {
            println!();
        }
        println!("input:        {}", input);
        match isbn.error() {
            Some(err) => println!("error:        {}", err),
            None => {
                println!("version:      ISBN-{}", isbn.version());
                println!("prefix:       {}", isbn.prefix());
                println!("group:        {}", isbn.registration_group());
                println!("registrant:   {}", isbn.registrant());
                println!("publication:  {}", isbn.publication());
                println!("check digit:  {}", isbn.check_digit());
                println!("isbn:         {}", isbn);
                println!("barcode:      {}", isbn.barcode());
                println!("valid:        {}", isbn.is_valid());
            }
        }
    }

    Ok(true)
}
