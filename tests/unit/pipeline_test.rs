//! Tests for the pipeline executor: ordering, short-circuit, reporting

use crate::common::git_repo::TempGitRepo;
use pygate::output::StepStatus;
use pygate::pipeline::{execute, Step, StepAction, StepKind};

fn command_step(name: &str, kind: StepKind, program: &str) -> Step {
    Step {
        name: name.to_string(),
        kind,
        action: StepAction::Command {
            program: program.to_string(),
            args: vec![],
        },
    }
}

#[test]
fn all_passing_steps_pass_the_run() {
    let repo = TempGitRepo::new();
    let steps = vec![
        command_step("first", StepKind::Setup, "true"),
        command_step("second", StepKind::Gate, "true"),
    ];

    let report = execute(&steps, repo.path(), 0);
    assert!(report.passed);
    assert!(report.steps.iter().all(|s| s.status == StepStatus::Passed));
    assert!(report.steps.iter().all(|s| s.exit_code == Some(0)));
}

#[test]
fn first_failure_short_circuits_the_rest() {
    let repo = TempGitRepo::new();
    let steps = vec![
        command_step("setup", StepKind::Setup, "true"),
        command_step("failing gate", StepKind::Gate, "false"),
        command_step("later gate", StepKind::Gate, "true"),
    ];

    let report = execute(&steps, repo.path(), 0);
    assert!(!report.passed);

    let statuses: Vec<StepStatus> = report.steps.iter().map(|s| s.status).collect();
    assert_eq!(
        statuses,
        vec![StepStatus::Passed, StepStatus::Failed, StepStatus::Skipped]
    );
    assert_eq!(report.steps[1].exit_code, Some(1));
    assert_eq!(report.steps[2].exit_code, None);
}

#[test]
fn every_step_is_reported_even_after_failure() {
    let repo = TempGitRepo::new();
    let steps = vec![
        command_step("a", StepKind::Setup, "false"),
        command_step("b", StepKind::Setup, "true"),
        command_step("c", StepKind::Gate, "true"),
    ];

    let report = execute(&steps, repo.path(), 0);
    assert_eq!(report.steps.len(), 3);
    assert_eq!(report.steps[0].status, StepStatus::Failed);
    assert_eq!(report.steps[1].status, StepStatus::Skipped);
    assert_eq!(report.steps[2].status, StepStatus::Skipped);
}

#[test]
fn unspawnable_command_fails_without_exit_code() {
    let repo = TempGitRepo::new();
    let steps = vec![command_step(
        "ghost",
        StepKind::Setup,
        "pygate-test-no-such-binary",
    )];

    let report = execute(&steps, repo.path(), 0);
    assert!(!report.passed);
    assert_eq!(report.steps[0].status, StepStatus::Failed);
    assert_eq!(report.steps[0].exit_code, None);
}

#[test]
fn workspace_step_passes_inside_a_repo() {
    let repo = TempGitRepo::new();
    let steps = vec![Step {
        name: "workspace check".to_string(),
        kind: StepKind::Setup,
        action: StepAction::Workspace,
    }];

    let report = execute(&steps, repo.path(), 0);
    assert!(report.passed);
}

#[test]
fn workspace_step_fails_outside_a_repo() {
    let plain = tempfile::TempDir::new().unwrap();
    let steps = vec![Step {
        name: "workspace check".to_string(),
        kind: StepKind::Setup,
        action: StepAction::Workspace,
    }];

    let report = execute(&steps, plain.path(), 0);
    assert!(!report.passed);
    assert_eq!(report.steps[0].status, StepStatus::Failed);
}

#[test]
fn command_line_renders_program_and_args() {
    let step = Step {
        name: "format check".to_string(),
        kind: StepKind::Gate,
        action: StepAction::Command {
            program: "black".to_string(),
            args: vec!["--diff".to_string(), "--check".to_string(), "a.py".to_string()],
        },
    };
    assert_eq!(step.command_line(), "black --diff --check a.py");
}

#[test]
fn step_kind_labels() {
    assert_eq!(StepKind::Setup.as_str(), "setup");
    assert_eq!(StepKind::Gate.as_str(), "gate");
}
