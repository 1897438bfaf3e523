use super::*;

#[test]
fn generated_template_parses_as_config() {
    let template = generate_config_template();
    let config: Config = toml::from_str(&template).unwrap();
    assert_eq!(config.scanner.max_file_size, 102_400);
    assert!(config.shell.syntax_check);
}

#[test]
fn semantics_rejects_zero_size_ceiling() {
    let mut config = Config::default();
    config.scanner.max_file_size = 0;
    assert!(validate_config_semantics(&config).is_err());
}

#[test]
fn semantics_rejects_zero_timeout() {
    let mut config = Config::default();
    config.shell.timeout_secs = 0;
    assert!(validate_config_semantics(&config).is_err());
}

#[test]
fn semantics_rejects_empty_doc_path() {
    let mut config = Config::default();
    config.markdown.docs.push(artifact_guard::config::MarkdownDoc::default());
    assert!(validate_config_semantics(&config).is_err());
}

#[test]
fn semantics_accepts_defaults() {
    assert!(validate_config_semantics(&Config::default()).is_ok());
}

#[test]
fn overrides_extend_exclusions_and_toggle_syntax_check() {
    let mut config = Config::default();
    let args = CheckArgs {
        root: Some(PathBuf::from("repo")),
        config: None,
        exclude: vec!["build".to_string()],
        max_file_size: Some(512),
        no_syntax_check: true,
        format: OutputFormat::Text,
        output: None,
    };

    apply_cli_overrides(&mut config, &args);

    assert_eq!(config.scanner.root, "repo");
    assert!(config.scanner.exclude.contains(&"build".to_string()));
    assert!(config.scanner.exclude.contains(&"node_modules".to_string()));
    assert_eq!(config.scanner.max_file_size, 512);
    assert!(!config.shell.syntax_check);
}

#[test]
fn color_choice_maps_to_mode() {
    assert_eq!(color_choice_to_mode(ColorChoice::Never), ColorMode::Never);
    assert_eq!(color_choice_to_mode(ColorChoice::Always), ColorMode::Always);
    assert_eq!(color_choice_to_mode(ColorChoice::Auto), ColorMode::Auto);
}

#[test]
fn effective_config_text_names_all_sections() {
    let text = format_config_text(&Config::default());
    assert!(text.contains("[scanner]"));
    assert!(text.contains("[secrets]"));
    assert!(text.contains("[[markdown.docs]]"));
    assert!(text.contains("[shell]"));
}
