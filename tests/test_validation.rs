mod common;
use common::*;

use task_params::{
    ConstraintKind, MergeInput, OutputTarget, PdfPageTransition, PdfPageTransitionStyle,
    PdfSource, SetPagesTransitionParameters, TaskParameters, UnpackParameters, Validate, submit,
    validate,
};

#[test]
fn test_unpack_reports_every_violation() {
    init_logging();
    let params = UnpackParameters::new(OutputTarget::single_file("out.pdf", false));

    let report = params.validate();
    assert_eq!(report.len(), 2, "report: {}", report);
    assert_single_violation(&report, "sources", ConstraintKind::NotEmpty);
    let message = assert_single_violation(&report, "output", ConstraintKind::EnumMembership);
    assert!(message.contains("single_file"));
    assert!(message.contains("directory, stream"));
}

#[test]
fn test_unpack_single_file_output_is_one_enum_violation() {
    let mut params = unpack_params(&["a.pdf", "b.pdf"], false);
    params.set_output(OutputTarget::single_file("out.pdf", true));

    let report = params.validate();
    assert_eq!(report.of_kind(ConstraintKind::EnumMembership).count(), 1);
    assert_eq!(report.len(), 1);
}

#[test]
fn test_nested_paths_across_collections_of_collections() {
    let params = merge_params(&[
        ("a.pdf", &[(1, 2)]),
        ("b.pdf", &[(4, 6), (3, 1)]),
        ("c.pdf", &[(1, 4), (2, 3)]),
    ]);

    let report = params.validate();
    assert_eq!(
        violation_paths(&report),
        vec!["inputs[1].page_selection[1].end", "inputs[2].page_selection"]
    );
    assert!(report.iter().all(|v| v.constraint == ConstraintKind::CrossField));
}

#[test]
fn test_transition_map_paths_use_page_number() {
    let mut params = transition_params();
    params.put_transition(page(1), fade(1, 1));
    params.put_transition(
        page(12),
        PdfPageTransition::new(PdfPageTransitionStyle::BoxInward, 0, 3),
    );

    let report = params.validate();
    assert_eq!(
        violation_paths(&report),
        vec!["transitions[12].transition_duration"]
    );
    let message = assert_single_violation(
        &report,
        "transitions[12].transition_duration",
        ConstraintKind::Min,
    );
    assert_eq!(message, "must be greater than or equal to 1, got 0");
}

#[test]
fn test_validation_is_idempotent_and_pure() {
    let mut params = transition_params();
    params.put_transition(page(3), fade(0, 0));
    let before = params.clone();

    let first = params.validate();
    let second = params.validate();
    assert_eq!(first, second);
    assert_eq!(params, before);
}

#[test]
fn test_validation_through_the_enum() {
    let params = TaskParameters::from(SetPagesTransitionParameters::new());
    let report = validate(&params);
    assert_eq!(
        violation_paths(&report),
        vec!["source", "output", "transitions"]
    );
}

#[test]
fn test_stream_sources_and_targets_validate() {
    let mut params = UnpackParameters::new(OutputTarget::stream(task_params::OutputStream::writer(
        Vec::<u8>::new(),
    )));
    params.add_source(PdfSource::stream(
        "in.pdf",
        task_params::InputStream::reader(std::io::empty()),
    ));
    assert!(params.validate().is_valid());
}

#[test]
fn test_submit_rejects_with_full_report() {
    let mut params = merge_params(&[]);
    params.set_output(OutputTarget::directory(" ", false));
    params.add_input(MergeInput::new(PdfSource::bytes("", Vec::<u8>::new())));

    let report = submit(params).unwrap_err();
    assert_eq!(
        violation_paths(&report),
        vec![
            "output",
            "output.path",
            "inputs[0].source.name",
            "inputs[0].source.bytes"
        ]
    );
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json[0]["constraint"], "enum_membership");
    assert_eq!(json[1]["constraint"], "not_blank");
}
