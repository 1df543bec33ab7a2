use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("lr").chain(args.iter().copied()))
}

fn action_of(args: &[&str]) -> (Action, String) {
    let cli = parse(args).unwrap();
    let (action, argument) = cli.command.action().unwrap();
    (action, argument.to_string())
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_canonical_verbs_map_to_actions() {
    assert_eq!(action_of(&["ls-images"]), (Action::ListImages, String::new()));
    assert_eq!(
        action_of(&["ls-tags", "alpine"]),
        (Action::ListTags, "alpine".to_string())
    );
    assert_eq!(
        action_of(&["rm-image", "alpine"]),
        (Action::DeleteImage, "alpine".to_string())
    );
    assert_eq!(
        action_of(&["rm-tags", "alpine:a,b"]),
        (Action::DeleteTags, "alpine:a,b".to_string())
    );
    assert_eq!(action_of(&["help"]), (Action::Help, String::new()));
}

#[test]
fn test_aliases_map_to_same_actions() {
    assert_eq!(action_of(&["li"]).0, Action::ListImages);
    assert_eq!(action_of(&["lt", "x"]).0, Action::ListTags);
    assert_eq!(action_of(&["ri", "x"]).0, Action::DeleteImage);
    assert_eq!(action_of(&["rt", "x:y"]).0, Action::DeleteTags);
}

#[test]
fn test_subcommand_names_match_action_table() {
    let cmd = Cli::command();
    for action in Action::ALL {
        let sub = cmd
            .find_subcommand(action.canonical())
            .unwrap_or_else(|| panic!("missing subcommand {}", action));
        if action != Action::Help {
            assert!(sub.get_visible_aliases().any(|a| a == action.alias()));
        }
    }
}

#[test]
fn test_verbs_are_case_sensitive() {
    let err = parse(&["LI"]).unwrap_err();
    assert!(err.use_stderr());
}

#[test]
fn test_missing_action_is_an_error() {
    let err = parse(&[]).unwrap_err();
    assert!(err.use_stderr());
}

#[test]
fn test_help_flag_is_not_an_error_exit() {
    let err = parse(&["--help"]).unwrap_err();
    assert!(!err.use_stderr());
}

#[test]
fn test_version_and_completion_are_not_registry_actions() {
    assert!(parse(&["version"]).unwrap().command.action().is_none());
    assert!(
        parse(&["completion", "bash"])
            .unwrap()
            .command
            .action()
            .is_none()
    );
}

#[test]
fn test_global_flags() {
    let cli = parse(&[
        "-vv",
        "--format",
        "json",
        "--list-timeout",
        "30",
        "--delete-timeout",
        "2",
        "--config",
        "/tmp/lr.json",
        "li",
    ])
    .unwrap();

    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.format, "json");
    assert_eq!(cli.list_timeout, 30);
    assert_eq!(cli.delete_timeout, 2);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/lr.json")));
}
