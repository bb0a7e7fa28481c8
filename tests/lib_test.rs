//! Library integration tests.

use fsdd::FsddError;

#[test]
fn error_types_are_public() {
    let err = FsddError::MissingDependency {
        package: "torchaudio".into(),
        min_version: "0.8".into(),
        help_url: "https://github.com/pytorch/audio".into(),
    };
    assert!(err.to_string().contains("torchaudio"));
    assert!(err.is_gate_failure());
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> fsdd::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn requirement_constants_are_public() {
    assert_eq!(fsdd::requirements::MIN_TORCH_VERSION, "2.0");
    assert_eq!(fsdd::requirements::MIN_TORCHAUDIO_VERSION, "0.8");
    let names: Vec<_> = fsdd::REQUIREMENTS.iter().map(|r| r.package_name).collect();
    assert_eq!(names, ["torch", "torchaudio"]);
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use fsdd::cli::{Cli, Commands};

    let cli = Cli::parse_from(["fsdd", "requirements", "--json"]);
    if let Some(Commands::Requirements(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Requirements command");
    }
}

#[test]
fn dispatcher_runs_with_mock_ui() {
    use clap::Parser;
    use fsdd::cli::{Cli, CommandDispatcher};
    use fsdd::ui::MockUI;

    let cli = Cli::parse_from(["fsdd", "requirements"]);
    let dispatcher = CommandDispatcher::new(std::env::temp_dir(), cli.environment_args());
    let mut ui = MockUI::new();
    let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
    assert!(result.success);
    assert!(ui.has_hint("https://pytorch.org/"));
}
