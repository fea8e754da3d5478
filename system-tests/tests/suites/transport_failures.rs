// system-tests/tests/suites/transport_failures.rs
// ============================================================================
// Module: Transport Failure Suite
// Description: Conformance runs against broken or unreachable services.
// Purpose: Ensure transport problems surface as errored cases, never passes.
// Dependencies: system-tests helpers, slack-conformance-core
// ============================================================================

//! Transport failure tests for the conformance suite.

use std::net::TcpListener;

use slack_conformance_core::CaseId;
use slack_conformance_core::CaseStatus;

use crate::helpers;
use helpers::artifacts::TestReporter;
use helpers::harness::run_cases;
use helpers::harness::stub_config;
use helpers::harness::write_run_artifacts;
use helpers::slack_stub::StubMode;
use helpers::slack_stub::spawn_slack_stub;

#[tokio::test(flavor = "multi_thread")]
async fn gateway_error_marks_every_case_errored() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("gateway_error_marks_every_case_errored")?;
    let stub = spawn_slack_stub(StubMode::Gateway502)?;
    let config = stub_config(stub.base_url())?;

    let run = run_cases(&config, &CaseId::ALL).await?;
    let artifacts = write_run_artifacts(&reporter, &run)?;

    if run.report.summary.errored != CaseId::ALL.len() || run.report.is_success() {
        return Err(format!("expected every case errored, got {:?}", run.report.summary).into());
    }
    for case in &run.report.cases {
        let step = case.steps.last().ok_or("errored case has no recorded step")?;
        let raw = step.raw_body.as_deref().unwrap_or_default();
        if step.status != Some(502) || !raw.contains("502 Bad Gateway") {
            return Err(format!("{} did not keep the gateway body", case.case).into());
        }
    }

    reporter.finish(
        "pass",
        vec!["502 responses produced errored cases with raw bodies".to_string()],
        artifacts,
    )?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn non_json_body_marks_case_errored() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("non_json_body_marks_case_errored")?;
    let stub = spawn_slack_stub(StubMode::PlainText)?;
    let config = stub_config(stub.base_url())?;

    let run = run_cases(&config, &[CaseId::PostMessageSucceeds]).await?;
    let artifacts = write_run_artifacts(&reporter, &run)?;

    let case = run.report.case(CaseId::PostMessageSucceeds).ok_or("case missing from report")?;
    if case.status != CaseStatus::Error {
        return Err(format!("expected error status, got {:?}", case.status).into());
    }
    let step = case.steps.first().ok_or("no recorded step")?;
    if step.status != Some(200) || step.raw_body.as_deref() != Some("ok") {
        return Err(format!("unexpected step record {step:?}").into());
    }

    reporter.finish(
        "pass",
        vec!["non-JSON 200 response produced an errored case".to_string()],
        artifacts,
    )?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_service_marks_case_errored() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("unreachable_service_marks_case_errored")?;
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?
    };
    let config = stub_config(&format!("http://{addr}"))?;

    let run = run_cases(&config, &[CaseId::ScheduleMessageInPast]).await?;
    let artifacts = write_run_artifacts(&reporter, &run)?;

    let case = run.report.case(CaseId::ScheduleMessageInPast).ok_or("case missing from report")?;
    if case.status != CaseStatus::Error || case.error.is_none() {
        return Err(format!("expected errored case, got {case:?}").into());
    }
    if run.transcript.len() != 1 || run.transcript[0].error.is_none() {
        return Err("transcript should hold one failed exchange".into());
    }

    reporter.finish(
        "pass",
        vec![format!("connection refused at {addr} produced an errored case")],
        artifacts,
    )?;
    drop(reporter);
    Ok(())
}
