use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use artifact_guard::cli::{
    CheckArgs, Cli, ColorChoice, Commands, ConfigAction, ConfigArgs, InitArgs, RulesArgs,
};
use artifact_guard::config::{Config, ConfigLoader, FileConfigLoader};
use artifact_guard::engine::ValidatorEngine;
use artifact_guard::output::{
    ColorMode, JsonFormatter, OutputFormat, ReportFormatter, TextFormatter,
};
use artifact_guard::rules::{Presence, RuleRegistry};
use artifact_guard::scanner::RepoScanner;
use artifact_guard::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Rules(args) => run_rules(args),
        Commands::Init(args) => run_init(args),
        Commands::Config(args) => run_config(args),
    };

    std::process::exit(exit_code);
}

fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_check_impl(args: &CheckArgs, cli: &Cli) -> artifact_guard::Result<i32> {
    // 1. Load configuration
    let mut config = load_config(args.config.as_deref(), cli.no_config)?;

    // 2. Apply CLI argument overrides
    apply_cli_overrides(&mut config, args);

    // 3. Build the rule table and the scanner
    let registry = RuleRegistry::standard(&config)?;
    let scanner = RepoScanner::new(config.scanner.exclude.clone());

    // 4. Run validation
    let root = PathBuf::from(&config.scanner.root);
    let engine = ValidatorEngine::new(&registry);
    let report = engine.run(&root, &scanner)?;

    // 5. Format output
    let color_mode = color_choice_to_mode(cli.color);
    let output = match args.format {
        OutputFormat::Text => {
            TextFormatter::with_verbose(color_mode, cli.verbose).format(&report)?
        }
        OutputFormat::Json => JsonFormatter.format(&report)?,
    };

    // 6. Write output
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    // 7. Exit code reflects validation failures only
    Ok(report.exit_code())
}

fn load_config(config_path: Option<&Path>, no_config: bool) -> artifact_guard::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

fn apply_cli_overrides(config: &mut Config, args: &CheckArgs) {
    if let Some(root) = &args.root {
        config.scanner.root = root.display().to_string();
    }

    config.scanner.exclude.extend(args.exclude.iter().cloned());

    if let Some(limit) = args.max_file_size {
        config.scanner.max_file_size = limit;
    }

    if args.no_syntax_check {
        config.shell.syntax_check = false;
    }
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> artifact_guard::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

fn run_rules(args: &RulesArgs) -> i32 {
    match run_rules_impl(args) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_rules_impl(args: &RulesArgs) -> artifact_guard::Result<String> {
    use std::fmt::Write;

    let config = load_config(args.config.as_deref(), false)?;
    let registry = RuleRegistry::standard(&config)?;

    let mut output = String::new();
    for bundle in registry.bundles() {
        let presence = match bundle.presence() {
            Presence::AnyMatch => "any match".to_string(),
            Presence::Required(path) => format!("required: {}", path.display()),
            Presence::Optional(path) => format!("optional: {}", path.display()),
        };
        let _ = writeln!(output, "{} ({presence})", bundle.name());
        let _ = writeln!(output, "  patterns: {}", bundle.patterns().join(", "));

        let rule_names: Vec<&str> = bundle.rules().iter().map(|r| r.name()).collect();
        let _ = writeln!(output, "  rules: {}", rule_names.join(", "));
    }

    Ok(output)
}

fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_init_impl(args: &InitArgs) -> artifact_guard::Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(artifact_guard::ArtifactGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    let template = generate_config_template();
    fs::write(output_path, template)?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

fn generate_config_template() -> String {
    r#"# artifact-guard configuration file

[scanner]
# Repository root to validate
root = "."

# Path fragments that remove a file from consideration entirely.
# Matched as plain substrings of the repository-relative path.
exclude = ["node_modules", ".git"]

# Size ceiling per checked file, in bytes
max_file_size = 102400

[secrets]
# Key substrings that mark a value as potentially sensitive
keywords = ["password", "secret", "api_key", "apikey", "token"]

# Value substrings that mark a suspicious value as a placeholder
placeholder_markers = ["example", "your_", "todo", "changeme", "$("]

# Values at or below this length are treated as placeholders
min_value_length = 10

# Markdown documents to validate
# [[markdown.docs]]
# path = ".github/copilot-instructions.md"
# sections = ["Project Overview", "Examples"]
# phrases = ["flutter"]

[shell]
# Root-level shell scripts that must exist and pass the script rules
scripts = ["run_tests.sh", "run_validation_tests.sh"]

# Run `bash -n` against each script
syntax_check = true

# Wall-clock bound for one `bash -n` invocation, in seconds
timeout_secs = 5
"#
    .to_string()
}

fn run_config(args: &ConfigArgs) -> i32 {
    match &args.action {
        ConfigAction::Validate { config } => run_config_validate(config),
        ConfigAction::Show { config, format } => run_config_show(config.as_deref(), format),
    }
}

fn run_config_validate(config_path: &Path) -> i32 {
    match run_config_validate_impl(config_path) {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Configuration error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_config_validate_impl(config_path: &Path) -> artifact_guard::Result<()> {
    if !config_path.exists() {
        return Err(artifact_guard::ArtifactGuardError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let content = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&content)?;

    validate_config_semantics(&config)?;

    Ok(())
}

fn validate_config_semantics(config: &Config) -> artifact_guard::Result<()> {
    if config.scanner.max_file_size == 0 {
        return Err(artifact_guard::ArtifactGuardError::Config(
            "scanner.max_file_size must be greater than 0".to_string(),
        ));
    }

    if config.shell.timeout_secs == 0 {
        return Err(artifact_guard::ArtifactGuardError::Config(
            "shell.timeout_secs must be greater than 0".to_string(),
        ));
    }

    for (i, doc) in config.markdown.docs.iter().enumerate() {
        if doc.path.is_empty() {
            return Err(artifact_guard::ArtifactGuardError::Config(format!(
                "markdown.docs[{i}].path cannot be empty"
            )));
        }
    }

    for (i, script) in config.shell.scripts.iter().enumerate() {
        if script.is_empty() {
            return Err(artifact_guard::ArtifactGuardError::Config(format!(
                "shell.scripts[{i}] cannot be empty"
            )));
        }
    }

    Ok(())
}

fn run_config_show(config_path: Option<&Path>, format: &str) -> i32 {
    match run_config_show_impl(config_path, format) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_config_show_impl(
    config_path: Option<&Path>,
    format: &str,
) -> artifact_guard::Result<String> {
    let config = load_config(config_path, false)?;

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&config)?;
            Ok(format!("{json}\n"))
        }
        _ => Ok(format_config_text(&config)),
    }
}

fn format_config_text(config: &Config) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    output.push_str("=== Effective Configuration ===\n\n");

    output.push_str("[scanner]\n");
    let _ = writeln!(output, "  root = \"{}\"", config.scanner.root);
    let _ = writeln!(output, "  exclude = {:?}", config.scanner.exclude);
    let _ = writeln!(output, "  max_file_size = {}", config.scanner.max_file_size);

    output.push_str("\n[secrets]\n");
    let _ = writeln!(output, "  keywords = {:?}", config.secrets.keywords);
    let _ = writeln!(
        output,
        "  placeholder_markers = {:?}",
        config.secrets.placeholder_markers
    );
    let _ = writeln!(
        output,
        "  min_value_length = {}",
        config.secrets.min_value_length
    );

    for doc in &config.markdown.docs {
        output.push_str("\n[[markdown.docs]]\n");
        let _ = writeln!(output, "  path = \"{}\"", doc.path);
        if !doc.sections.is_empty() {
            let _ = writeln!(output, "  sections = {:?}", doc.sections);
        }
        if !doc.phrases.is_empty() {
            let _ = writeln!(output, "  phrases = {:?}", doc.phrases);
        }
    }

    output.push_str("\n[shell]\n");
    let _ = writeln!(output, "  scripts = {:?}", config.shell.scripts);
    let _ = writeln!(output, "  syntax_check = {}", config.shell.syntax_check);
    let _ = writeln!(output, "  timeout_secs = {}", config.shell.timeout_secs);

    output
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
