use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use jsv::{
    ABSORBED_KEYWORDS, Category, FailurePolicy, Keyword, SchemaError, TypeRegistry,
    ValidatorConfig,
};
use jsv_cli::{CheckConfig, check_fs, load_schema, output};

use crate::logging;

/// Exit status: every document is valid.
pub const EXIT_OK: u8 = 0;
/// Exit status: violations found or files could not be checked.
pub const EXIT_INVALID: u8 = 1;
/// Exit status: the schema itself is malformed.
pub const EXIT_SCHEMA_ERROR: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "jsv", version, about = "Validate JSON and YAML documents against a schema")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check documents against a schema
    Check(CheckArgs),
    /// List the schema keywords and type names the validator understands
    Keywords,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Schema file (.json, .yaml or .yml)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Files or directories to check
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Glob patterns to skip (matched against path and file name)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Report every violation per document instead of the first one
    #[arg(long)]
    pub all_errors: bool,

    /// Categories accepted by the "number" type name
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [CategoryArg::Integer, CategoryArg::Float])]
    pub number_types: Vec<CategoryArg>,

    /// Categories accepted by the "string" type name
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [CategoryArg::Text])]
    pub string_types: Vec<CategoryArg>,

    /// Maximum size of a single file in bytes
    #[arg(long, default_value_t = 10_485_760)]
    pub max_file_size: u64,

    /// Follow symbolic links while walking directories
    #[arg(long)]
    pub follow_links: bool,
}

/// Command-line spelling of [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Null,
    Boolean,
    Integer,
    Float,
    Text,
    Sequence,
    Mapping,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Null => Self::Null,
            CategoryArg::Boolean => Self::Boolean,
            CategoryArg::Integer => Self::Integer,
            CategoryArg::Float => Self::Float,
            CategoryArg::Text => Self::Text,
            CategoryArg::Sequence => Self::Sequence,
            CategoryArg::Mapping => Self::Mapping,
        }
    }
}

impl CheckArgs {
    fn check_config(&self) -> CheckConfig {
        let mut config = CheckConfig::default();
        config.paths.clone_from(&self.paths);
        config.exclude.clone_from(&self.exclude);
        config.max_file_size = self.max_file_size;
        config.follow_links = self.follow_links;
        config
    }

    fn validator_config(&self) -> ValidatorConfig {
        let mut config = ValidatorConfig::default();
        config.number_types = self.number_types.iter().copied().map(Category::from).collect();
        config.string_types = self.string_types.iter().copied().map(Category::from).collect();
        if self.all_errors {
            config.failure_policy = FailurePolicy::CollectAll;
        }
        config
    }
}

/// Parse arguments, run the command and map the outcome to an exit status.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded, a path is missing, or the
/// report cannot be written.
pub fn run() -> anyhow::Result<u8> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if !io::stderr().is_terminal() {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Check(args) => run_check(&args),
        Commands::Keywords => {
            print_keywords();
            Ok(EXIT_OK)
        }
    }
}

fn run_check(args: &CheckArgs) -> anyhow::Result<u8> {
    let check_config = args.check_config();
    let schema = load_schema(&args.schema, check_config.max_file_size)?;
    tracing::info!(schema = %args.schema.display(), keys = schema.len(), "loaded schema");

    let report = match check_fs(&check_config, &schema, &args.validator_config()) {
        Ok(report) => report,
        Err(err) if err.downcast_ref::<SchemaError>().is_some() => {
            eprintln!("{} {err:#}", "schema error:".red().bold());
            return Ok(EXIT_SCHEMA_ERROR);
        }
        Err(err) => return Err(err),
    };

    let mut stdout = io::stdout().lock();
    if args.json {
        output::write_json(&report, &mut stdout)?;
    } else {
        output::write_human(&report, &mut stdout)?;
    }

    if report.ok {
        if !args.json {
            eprintln!("{}", "check passed".green().bold());
        }
        Ok(EXIT_OK)
    } else {
        if !args.json {
            eprintln!("{}", "check failed".red().bold());
        }
        Ok(EXIT_INVALID)
    }
}

fn print_keywords() {
    println!("Evaluated keywords:");
    for keyword in Keyword::ALL {
        println!("  {keyword}");
    }
    println!("Absorbed keywords (read by another keyword or descriptive):");
    for name in ABSORBED_KEYWORDS {
        println!("  {name}");
    }
    println!("Type names:");
    let registry = TypeRegistry::default();
    for name in registry.names() {
        let categories: Vec<&str> = registry
            .lookup(name)
            .unwrap_or_default()
            .iter()
            .copied()
            .map(Category::as_str)
            .collect();
        println!("  {name:<8} {}", categories.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_defaults() {
        let cli = Cli::try_parse_from(["jsv", "check", "--schema", "s.json"]).unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.paths, vec![PathBuf::from(".")]);
        assert!(!args.json);
        assert!(!args.all_errors);

        let config = args.validator_config();
        assert_eq!(config.number_types, vec![Category::Integer, Category::Float]);
        assert_eq!(config.string_types, vec![Category::Text]);
        assert_eq!(config.failure_policy, FailurePolicy::StopOnFirst);
    }

    #[test]
    fn test_parse_check_options() {
        let cli = Cli::try_parse_from([
            "jsv",
            "-vv",
            "check",
            "-s",
            "s.yaml",
            "data",
            "more",
            "--exclude",
            "*.tmp.json",
            "--number-types",
            "integer",
            "--all-errors",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.paths, vec![PathBuf::from("data"), PathBuf::from("more")]);

        let check_config = args.check_config();
        assert_eq!(check_config.exclude, vec!["*.tmp.json".to_owned()]);

        let config = args.validator_config();
        assert_eq!(config.number_types, vec![Category::Integer]);
        assert_eq!(config.failure_policy, FailurePolicy::CollectAll);
    }

    #[test]
    fn test_schema_is_required() {
        assert!(Cli::try_parse_from(["jsv", "check", "data"]).is_err());
    }

    #[test]
    fn test_parse_keywords() {
        let cli = Cli::try_parse_from(["jsv", "keywords"]).unwrap();
        assert!(matches!(cli.command, Commands::Keywords));
    }
}
