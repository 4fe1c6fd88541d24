//! Command-line parsing.

use std::path::PathBuf;

use legis_consolidate::{DataPolicy, FactCategory, OutputOptions};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// One CLI invocation: which config file, which command.
#[derive(Debug, PartialEq)]
pub struct Cli {
    pub config_path: PathBuf,
    pub command: Command,
}

#[derive(Debug, PartialEq)]
pub enum Command {
    /// Chunk, extract and reconstruct in one go.
    Run,
    /// Chunk with optional overrides that are saved back to the config file.
    Chunk {
        strategy: Option<String>,
        max_chars: Option<String>,
    },
    Extract,
    Reconstruct(OutputOptions),
    Validate(DataPolicy),
    /// Print the effective configuration.
    Config,
    Help,
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<Cli, String> {
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut rest = args;

    if let Some(first) = rest.first() {
        if first == "--config" || first == "-c" {
            let path = rest.get(1).ok_or("--config needs a path")?;
            config_path = PathBuf::from(path);
            rest = &rest[2..];
        }
    }

    let Some((name, flags)) = rest.split_first() else {
        return Ok(Cli {
            config_path,
            command: Command::Help,
        });
    };

    let command = match name.as_str() {
        "run" => no_flags(flags, Command::Run)?,
        "chunk" => parse_chunk(flags)?,
        "extract" => no_flags(flags, Command::Extract)?,
        "reconstruct" => Command::Reconstruct(parse_output_options(flags)?),
        "validate" => Command::Validate(parse_policy(flags)?),
        "config" => no_flags(flags, Command::Config)?,
        "help" | "--help" | "-h" => Command::Help,
        other => return Err(format!("Unknown command: {}", other)),
    };

    Ok(Cli {
        config_path,
        command,
    })
}

fn no_flags(flags: &[String], command: Command) -> Result<Command, String> {
    match flags.first() {
        Some(flag) => Err(format!("Unexpected argument: {}", flag)),
        None => Ok(command),
    }
}

fn parse_chunk(flags: &[String]) -> Result<Command, String> {
    let mut strategy = None;
    let mut max_chars = None;
    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--strategy" => {
                strategy = Some(iter.next().ok_or("--strategy needs a value")?.clone());
            }
            "--max-chars" => {
                max_chars = Some(iter.next().ok_or("--max-chars needs a value")?.clone());
            }
            other => return Err(format!("Unexpected argument: {}", other)),
        }
    }
    Ok(Command::Chunk {
        strategy,
        max_chars,
    })
}

fn parse_output_options(flags: &[String]) -> Result<OutputOptions, String> {
    let mut options = OutputOptions::default();
    let mut text_only = false;
    let mut json_only = false;
    for flag in flags {
        match flag.as_str() {
            "--text-only" => text_only = true,
            "--json-only" => json_only = true,
            "--include-chunks" => options.include_chunks = true,
            "--include-text" => options.include_full_text = true,
            other => return Err(format!("Unexpected argument: {}", other)),
        }
    }
    if text_only && json_only {
        return Err("--text-only and --json-only are mutually exclusive".into());
    }
    options.create_json = !text_only;
    options.create_text = !json_only;
    Ok(options)
}

fn parse_policy(flags: &[String]) -> Result<DataPolicy, String> {
    let mut required = Vec::new();
    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--require" => {
                let value = iter.next().ok_or("--require needs a category")?;
                let category: FactCategory = value.parse().map_err(|e| format!("{}", e))?;
                if !required.contains(&category) {
                    required.push(category);
                }
            }
            "--no-require" => required.clear(),
            other => return Err(format!("Unexpected argument: {}", other)),
        }
    }
    if required.is_empty() && !flags.iter().any(|f| f == "--no-require") {
        return Ok(DataPolicy::default());
    }
    Ok(DataPolicy { required })
}

pub fn print_help() {
    println!("Legis — legislative document chunker and fact extractor");
    println!();
    println!("Usage: legis [--config <path>] <command>");
    println!();
    println!("Commands:");
    println!("  run                                  Chunk, extract and reconstruct");
    println!("  chunk [--strategy size|structure] [--max-chars N]");
    println!("                                       Chunk the cleaned text (options are saved)");
    println!("  extract                              Extract facts from every chunk");
    println!("  reconstruct [--text-only|--json-only] [--include-chunks] [--include-text]");
    println!("                                       Merge fact records into document outputs");
    println!("  validate [--require <category>]... [--no-require]");
    println!("                                       Check fact records against the schema");
    println!("  config                               Show the effective configuration");
    println!("  help                                 Show this help message");
    println!();
    println!("Categories: references, funding, dates, duties_and_requirements,");
    println!("            programs_and_entities, deadlines, other_facts");
    println!();
    println!("Environment: LEGIS_MAX_CHARS, LEGIS_CHUNKING_STRATEGY, RUST_LOG");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, String> {
        let owned: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args(&owned)
    }

    #[test]
    fn test_no_args_is_help() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.command, Command::Help);
        assert_eq!(cli.config_path, PathBuf::from("config.json"));
    }

    #[test]
    fn test_config_path_and_chunk_options() {
        let cli = parse(&["--config", "alt.json", "chunk", "--strategy", "structure", "--max-chars", "500"])
            .unwrap();
        assert_eq!(cli.config_path, PathBuf::from("alt.json"));
        assert_eq!(
            cli.command,
            Command::Chunk {
                strategy: Some("structure".into()),
                max_chars: Some("500".into()),
            }
        );
    }

    #[test]
    fn test_chunk_missing_value() {
        assert!(parse(&["chunk", "--max-chars"]).is_err());
    }

    #[test]
    fn test_reconstruct_flags() {
        let Command::Reconstruct(options) = parse(&["reconstruct"]).unwrap().command else {
            panic!("expected reconstruct");
        };
        assert_eq!(options, OutputOptions::default());

        let Command::Reconstruct(options) = parse(&["reconstruct", "--text-only", "--include-chunks"])
            .unwrap()
            .command
        else {
            panic!("expected reconstruct");
        };
        assert!(options.create_text);
        assert!(!options.create_json);
        assert!(options.include_chunks);
        assert!(!options.include_full_text);

        assert!(parse(&["reconstruct", "--text-only", "--json-only"]).is_err());
    }

    #[test]
    fn test_validate_policy() {
        let Command::Validate(policy) = parse(&["validate"]).unwrap().command else {
            panic!("expected validate");
        };
        assert_eq!(policy, DataPolicy::default());

        let Command::Validate(policy) = parse(&["validate", "--require", "funding", "--require", "dates"])
            .unwrap()
            .command
        else {
            panic!("expected validate");
        };
        assert_eq!(policy.required, vec![FactCategory::Funding, FactCategory::Dates]);

        let Command::Validate(policy) = parse(&["validate", "--no-require"]).unwrap().command else {
            panic!("expected validate");
        };
        assert!(policy.required.is_empty());

        assert!(parse(&["validate", "--require", "budgets"]).is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(parse(&["frobnicate"]).unwrap_err(), "Unknown command: frobnicate");
        assert!(parse(&["run", "--fast"]).is_err());
    }
}
