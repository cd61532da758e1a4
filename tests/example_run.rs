//! Integration tests for the `example run` command.
use livestock_sim::cli::RunOpts;
use livestock_sim::cli::example::handle_example_run_command;
use livestock_sim::settings::Settings;
use tempfile::tempdir;

/// An integration test for the `example run` command.
#[test]
fn test_handle_example_run_command() {
    unsafe { std::env::set_var("LIVESTOCK_SIM_LOG_LEVEL", "off") };

    let tempdir = tempdir().unwrap();
    let opts = RunOpts {
        output_dir: Some(tempdir.path().to_path_buf()),
        ..Default::default()
    };
    handle_example_run_command("us_2022_slaughter_surge", &opts, Some(Settings::default()))
        .unwrap();

    let summary = std::fs::read_to_string(tempdir.path().join("summary.toml")).unwrap();
    let summary: toml::Table = toml::from_str(&summary).unwrap();
    assert_eq!(summary["months"].as_integer(), Some(36));
    assert!(!tempdir.path().join("debug_state.csv").exists());
}
