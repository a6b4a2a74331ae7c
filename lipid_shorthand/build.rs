// build.rs - TOML-driven constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    input: InputLimits,
    lexical: LexicalLimits,
    syntax: SyntaxLimits,
    resolution: ResolutionLimits,
    batch_processing: BatchProcessingLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct InputLimits {
    max_name_length: usize,
    max_names_file_size: u64,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_token_count: usize,
    max_word_length: usize,
    max_number_length: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_syntax_errors: usize,
    max_recovery_scan_tokens: usize,
    max_chain_count: usize,
}

#[derive(serde::Deserialize)]
struct ResolutionLimits {
    max_carbon_count: u32,
    max_hydroxy_count: u32,
    max_double_bond_positions: usize,
}

#[derive(serde::Deserialize)]
struct BatchProcessingLimits {
    max_worker_threads: usize,
    max_names_per_batch: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_error_collection: usize,
    max_log_message_length: usize,
    max_log_events_per_item: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LIPID_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=LIPID_CONFIG_DIR");

    let profile = env::var("LIPID_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("LIPID_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of lipid_shorthand directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_NAME_LENGTH: usize = 65_536;
    const ABSOLUTE_MAX_NAMES_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_CARBON_COUNT: u32 = 1_000;

    if config.input.max_name_length == 0 || config.input.max_name_length > ABSOLUTE_MAX_NAME_LENGTH {
        panic!("LIMITS: max_name_length must be between 1 and {}", ABSOLUTE_MAX_NAME_LENGTH);
    }

    if config.input.max_names_file_size > ABSOLUTE_MAX_NAMES_FILE_SIZE {
        panic!("LIMITS: max_names_file_size exceeds absolute maximum");
    }

    if config.lexical.max_token_count < 4 {
        panic!("LIMITS: max_token_count too low to tokenize any lipid name");
    }

    if config.syntax.max_syntax_errors == 0 {
        panic!("LIMITS: max_syntax_errors must allow at least one error");
    }

    // CL carries four chains, the largest class in the table
    if config.syntax.max_chain_count < 4 {
        panic!("LIMITS: max_chain_count must be at least 4");
    }

    if config.resolution.max_carbon_count < 2
        || config.resolution.max_carbon_count > ABSOLUTE_MAX_CARBON_COUNT
    {
        panic!("LIMITS: max_carbon_count out of range");
    }

    if config.batch_processing.max_worker_threads == 0 {
        panic!("LIMITS: max_worker_threads must be positive");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("LIMITS: security_min_log_level too high (max: 2)");
    }

    if profile == "production" {
        if config.input.max_name_length > 4_096 {
            panic!("PRODUCTION: max_name_length too high for production");
        }
        if config.batch_processing.max_names_per_batch > 10_000_000 {
            panic!("PRODUCTION: max_names_per_batch too high for production");
        }
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod input {{
        pub const MAX_NAME_LENGTH: usize = {};
        pub const MAX_NAMES_FILE_SIZE: u64 = {};
    }}

    pub mod lexical {{
        pub const MAX_TOKEN_COUNT: usize = {};
        pub const MAX_WORD_LENGTH: usize = {};
        pub const MAX_NUMBER_LENGTH: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_SYNTAX_ERRORS: usize = {};
        pub const MAX_RECOVERY_SCAN_TOKENS: usize = {};
        pub const MAX_CHAIN_COUNT: usize = {};
    }}

    pub mod resolution {{
        pub const MAX_CARBON_COUNT: u32 = {};
        pub const MAX_HYDROXY_COUNT: u32 = {};
        pub const MAX_DOUBLE_BOND_POSITIONS: usize = {};
    }}

    pub mod batch_processing {{
        pub const MAX_WORKER_THREADS: usize = {};
        pub const MAX_NAMES_PER_BATCH: usize = {};
    }}

    pub mod logging {{
        pub const MAX_ERROR_COLLECTION: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_ITEM: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        config.input.max_name_length,
        config.input.max_names_file_size,
        config.lexical.max_token_count,
        config.lexical.max_word_length,
        config.lexical.max_number_length,
        config.syntax.max_syntax_errors,
        config.syntax.max_recovery_scan_tokens,
        config.syntax.max_chain_count,
        config.resolution.max_carbon_count,
        config.resolution.max_hydroxy_count,
        config.resolution.max_double_bond_positions,
        config.batch_processing.max_worker_threads,
        config.batch_processing.max_names_per_batch,
        config.logging.max_error_collection,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_item,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
