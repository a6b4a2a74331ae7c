use lipid_shorthand::config::runtime::{RenderPreferences, RuntimeConfig};
use lipid_shorthand::domain::LipidLevel;
use lipid_shorthand::grammar::Dialect;
use lipid_shorthand::{batch, logging, pipeline};
use std::env;
use std::path::PathBuf;
use std::process;

#[derive(Debug)]
struct CliOptions {
    dialect: Dialect,
    level: Option<LipidLevel>,
    render: RenderPreferences,
    json: bool,
    names: Vec<String>,
    file: Option<PathBuf>,
    batch: batch::BatchConfig,
}

enum Command {
    Help,
    Info,
    Run(CliOptions),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize global logging system
    logging::init_global_logging()?;

    // Validate pipeline configuration
    pipeline::validate_pipeline()?;

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("lipid_shorthand");

    match parse_args(&args[1..]) {
        Ok(Command::Help) => print_help(program),
        Ok(Command::Info) => println!("{}", pipeline::get_pipeline_info().report()),
        Ok(Command::Run(options)) => {
            let failed = run(&options)?;
            if failed {
                process::exit(1);
            }
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} [options] <name>... | --file <path>", program);
            eprintln!("       {} --help", program);
            process::exit(2);
        }
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("Lipid Shorthand Parser v{}", env!("CARGO_PKG_VERSION"));
    println!("Parses shorthand lipid names and renders them in canonical form");
    println!("Supports {}", pipeline::get_pipeline_info().summary());
    println!();
    println!("USAGE:");
    println!("    {} [options] <name>...            # Parse names given as arguments", program_name);
    println!("    {} [options] --file <path>        # Parse one name per line", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --info              Show supported dialects and limits");
    println!("    --dialect D         goslin, goslin-fragments, lipidmaps, swisslipids, hmdb (default: goslin)");
    println!("    --level L           species, molecular, structural or isomeric (default: as parsed)");
    println!("    --normalized        Render the class abbreviation instead of the written head group");
    println!("    --no-adduct         Omit the adduct from rendered names");
    println!("    --config PATH       Load runtime preferences from a TOML file");
    println!("    --json              Print one JSON object per name");
    println!("    --file PATH         Read names from a file; '#' starts a comment line");
    println!("    --threads N         Worker threads for many names (default: auto)");
    println!("    --sequential        Process names on the calling thread");
    println!("    --fail-fast         Stop at the first name that does not parse");
    println!("    --progress          Report progress on stderr");
    println!();
    println!("EXAMPLES:");
    println!("    {} 'PE 18:0/16:1(9Z)'", program_name);
    println!("    {} --dialect lipidmaps --level species 'PC(16:0/18:1)'", program_name);
    println!("    {} --dialect swisslipids --file names.txt --threads 4 --json", program_name);
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = CliOptions {
        dialect: Dialect::Goslin,
        level: None,
        render: RenderPreferences::default(),
        json: false,
        names: Vec::new(),
        file: None,
        batch: batch::BatchConfig::default(),
    };
    let mut config_path: Option<PathBuf> = None;
    let mut threads: Option<usize> = None;
    let mut normalized = false;
    let mut no_adduct = false;
    let mut fail_fast = false;
    let mut progress = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--info" => return Ok(Command::Info),
            "--dialect" => {
                let value = iter.next().ok_or("--dialect requires a value")?;
                options.dialect = pipeline::parse_dialect_name(value).map_err(|e| e.to_string())?;
            }
            "--level" => {
                let value = iter.next().ok_or("--level requires a value")?;
                options.level =
                    Some(LipidLevel::parse(value).ok_or_else(|| format!("Unknown level '{}'", value))?);
            }
            "--normalized" => normalized = true,
            "--no-adduct" => no_adduct = true,
            "--config" => {
                let value = iter.next().ok_or("--config requires a path")?;
                config_path = Some(PathBuf::from(value));
            }
            "--json" => options.json = true,
            "--file" => {
                let value = iter.next().ok_or("--file requires a path")?;
                options.file = Some(PathBuf::from(value));
            }
            "--threads" => {
                let value = iter.next().ok_or("--threads requires a number")?;
                let count = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid thread count '{}'", value))?;
                threads = Some(count.max(1));
            }
            "--sequential" => threads = Some(1),
            "--fail-fast" => fail_fast = true,
            "--progress" => progress = true,
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            name => options.names.push(name.to_string()),
        }
    }

    // Flags override the config file, which overrides the environment
    let mut config = match &config_path {
        Some(path) => RuntimeConfig::from_toml_file(path)?,
        None => RuntimeConfig::default(),
    };
    if let Some(count) = threads {
        config.batch.worker_threads = count;
    }
    config.batch.fail_fast |= fail_fast;
    config.batch.progress_reporting |= progress;
    config.render.normalized_head_group |= normalized;
    if no_adduct {
        config.render.include_adduct = false;
    }

    options.render = config.render;
    options.batch = batch::BatchConfig::from_preferences(options.dialect, &config.batch);

    match (&options.file, options.names.is_empty()) {
        (None, true) => Err("No lipid names given".to_string()),
        (Some(_), false) => Err("Give names either as arguments or with --file, not both".to_string()),
        _ => Ok(Command::Run(options)),
    }
}

/// Returns whether any name failed
fn run(options: &CliOptions) -> Result<bool, Box<dyn std::error::Error>> {
    let results = match &options.file {
        Some(path) => batch::process_names_file(path, &options.batch),
        None => batch::process_names(&options.names, &options.batch),
    };
    let results = match results {
        Ok(results) => results,
        Err(error) => {
            eprintln!("error[{}]: {}", error.error_code(), error);
            return Ok(true);
        }
    };

    let mut failed = results.failure_count() > 0;
    let mut failures = results.failures.iter().peekable();

    for (index, result) in &results.successes {
        while let Some(failure) = failures.next_if(|f| f.index < *index) {
            eprint!("{}", failure.error.format_report());
        }
        if !print_result(result, options)? {
            failed = true;
        }
    }
    for failure in failures {
        eprint!("{}", failure.error.format_report());
    }

    if results.names_submitted > 1 || options.batch.progress_reporting {
        eprintln!("{}", results.summary());
    }

    Ok(failed)
}

/// Prints one parsed name; `false` if it cannot be shown at the requested level
fn print_result(
    result: &pipeline::PipelineResult,
    options: &CliOptions,
) -> Result<bool, Box<dyn std::error::Error>> {
    if options.json {
        return match pipeline::PipelineOutput::from_result(result, options.level) {
            Ok(output) => {
                println!("{}", serde_json::to_string(&output)?);
                Ok(true)
            }
            Err(error) => {
                eprintln!("error[{}]: {}: {}", error.error_code(), result.input, error);
                Ok(false)
            }
        };
    }

    let level = options
        .level
        .or_else(|| result.lipid.lipid().map(|lipid| lipid.level()))
        .unwrap_or(LipidLevel::Species);
    let rendered = if options.render.include_adduct {
        result.lipid.render(level, options.render.normalized_head_group)
    } else {
        match result.lipid.lipid() {
            Some(lipid) if options.render.normalized_head_group => lipid_shorthand::render_normalized(lipid, level),
            Some(lipid) => lipid_shorthand::render(lipid, level),
            None => result.lipid.render(level, options.render.normalized_head_group),
        }
    };
    match rendered {
        Ok(text) => {
            println!("{}", text);
            Ok(true)
        }
        Err(error) => {
            eprintln!("error[{}]: {}: {}", error.error_code(), result.input, error);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn options(list: &[&str]) -> CliOptions {
        match parse_args(&args(list)) {
            Ok(Command::Run(options)) => options,
            Ok(_) => panic!("expected a run command"),
            Err(message) => panic!("{}", message),
        }
    }

    #[test]
    fn test_parse_args() {
        let options = options(&[
            "--dialect",
            "lipidmaps",
            "--level",
            "species",
            "--threads",
            "4",
            "--fail-fast",
            "PE(18:0/16:1)",
        ]);
        assert_eq!(options.dialect, Dialect::LipidMaps);
        assert_eq!(options.level, Some(LipidLevel::Species));
        assert_eq!(options.batch.dialect, Dialect::LipidMaps);
        assert_eq!(options.batch.max_threads, 4);
        assert!(options.batch.fail_fast);
        assert_eq!(options.names, vec!["PE(18:0/16:1)"]);
    }

    #[test]
    fn test_config_file_and_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"[batch]\nworker_threads = 2\nfail_fast = true\n\n[render]\ninclude_adduct = true\n",
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let from_file = options(&["--config", &path, "PE 18:0/16:1"]);
        assert_eq!(from_file.batch.max_threads, 2);
        assert!(from_file.batch.fail_fast);
        assert!(from_file.render.include_adduct);

        let overridden = options(&["--threads", "3", "--no-adduct", "--normalized", "--config", &path, "PE 18:0/16:1"]);
        assert_eq!(overridden.batch.max_threads, 3);
        assert!(!overridden.render.include_adduct);
        assert!(overridden.render.normalized_head_group);

        assert!(parse_args(&args(&["--config", "/nonexistent/lipid.toml", "PE 18:0/16:1"])).is_err());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--dialect", "lipidblast", "PE 18:0/16:1"])).is_err());
        assert!(parse_args(&args(&["--threads", "many", "PE 18:0/16:1"])).is_err());
        assert!(parse_args(&args(&["--file", "names.txt", "PE 18:0/16:1"])).is_err());
        assert!(parse_args(&args(&["--unknown-option", "PE 18:0/16:1"])).is_err());
    }

    #[test]
    fn test_help_and_info() {
        assert!(matches!(parse_args(&args(&["--help"])), Ok(Command::Help)));
        assert!(matches!(parse_args(&args(&["--info", "x"])), Ok(Command::Info)));
    }
}
