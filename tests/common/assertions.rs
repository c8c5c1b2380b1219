use task_params::{ConstraintKind, ViolationReport};

/// Paths of every violation, in report order.
pub fn violation_paths(report: &ViolationReport) -> Vec<&str> {
    report.iter().map(|v| v.path.as_str()).collect()
}

/// Assert exactly one violation of `kind` exists at `path`, return its message.
pub fn assert_single_violation<'a>(
    report: &'a ViolationReport,
    path: &str,
    kind: ConstraintKind,
) -> &'a str {
    let matching: Vec<_> = report
        .iter()
        .filter(|v| v.path == path && v.constraint == kind)
        .collect();
    assert_eq!(
        matching.len(),
        1,
        "expected one {:?} violation at '{}', report: {}",
        kind,
        path,
        report
    );
    &matching[0].message
}
