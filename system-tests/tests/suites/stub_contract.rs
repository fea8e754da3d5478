// system-tests/tests/suites/stub_contract.rs
// ============================================================================
// Module: Stub Contract Suite
// Description: Full conformance runs against the in-process Slack stub.
// Purpose: Prove pass, fail, and leak-free reporting end to end over HTTP.
// Dependencies: system-tests helpers, slack-conformance-core
// ============================================================================

//! Stub contract tests for the conformance suite.

use slack_conformance_core::CaseId;
use slack_conformance_core::CaseStatus;
use slack_conformance_core::Endpoint;
use slack_conformance_core::SuiteEvent;

use crate::helpers;
use helpers::artifacts::TestReporter;
use helpers::harness::rendered_outputs;
use helpers::harness::run_cases;
use helpers::harness::stub_config;
use helpers::harness::write_run_artifacts;
use helpers::slack_stub::STUB_TOKEN;
use helpers::slack_stub::StubMode;
use helpers::slack_stub::spawn_slack_stub;

#[tokio::test(flavor = "multi_thread")]
async fn conforming_stub_passes_every_case() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("conforming_stub_passes_every_case")?;
    let stub = spawn_slack_stub(StubMode::Conforming)?;
    let config = stub_config(stub.base_url())?;

    let run = run_cases(&config, &CaseId::ALL).await?;
    let artifacts = write_run_artifacts(&reporter, &run)?;

    if !run.report.is_success() {
        return Err(format!("suite failed against conforming stub:\n{}", run.report.to_markdown())
            .into());
    }
    if run.report.summary.passed != CaseId::ALL.len() {
        return Err(format!("expected every case to pass, got {:?}", run.report.summary).into());
    }
    // Two cases post a setup message before their check request.
    let requests = stub.requests();
    if requests.len() != CaseId::ALL.len() + 2 {
        return Err(format!("unexpected request count {}", requests.len()).into());
    }
    let unauthenticated: Vec<_> = requests.iter().filter(|request| !request.authorized).collect();
    if unauthenticated.len() != 1 || unauthenticated[0].endpoint != Endpoint::PostMessage {
        return Err("exactly one unauthenticated post expected".into());
    }
    // The update case leaves its message behind; the delete case removes its own.
    if stub.stored_messages() != 4 {
        return Err(format!("unexpected stored messages {}", stub.stored_messages()).into());
    }
    let finished = run
        .events
        .iter()
        .filter(|event| matches!(event, SuiteEvent::CaseFinished { .. }))
        .count();
    if finished != CaseId::ALL.len() {
        return Err(format!("expected one case_finished per case, got {finished}").into());
    }

    reporter.finish(
        "pass",
        vec![format!("{} cases passed against the conforming stub", run.report.summary.passed)],
        artifacts,
    )?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn auth_ignoring_stub_fails_only_auth_case() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("auth_ignoring_stub_fails_only_auth_case")?;
    let stub = spawn_slack_stub(StubMode::IgnoreAuth)?;
    let config = stub_config(stub.base_url())?;

    let run = run_cases(&config, &CaseId::ALL).await?;
    let artifacts = write_run_artifacts(&reporter, &run)?;

    let failed: Vec<CaseId> = run
        .report
        .cases
        .iter()
        .filter(|case| case.status != CaseStatus::Pass)
        .map(|case| case.case)
        .collect();
    if failed != vec![CaseId::PostMessageRequiresAuth] {
        return Err(format!("unexpected failing cases: {failed:?}").into());
    }
    let auth_case = run
        .report
        .case(CaseId::PostMessageRequiresAuth)
        .ok_or("auth case missing from report")?;
    if auth_case.status != CaseStatus::Fail
        || !auth_case.violations.iter().all(|violation| violation.path == "$.error")
        || auth_case.violations.len() != 2
    {
        return Err(format!("unexpected auth case violations: {:?}", auth_case.violations).into());
    }

    reporter.finish(
        "pass",
        vec!["unauthenticated post accepted by stub was reported as a failure".to_string()],
        artifacts,
    )?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_setup_ts_skips_dependent_requests() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("missing_setup_ts_skips_dependent_requests")?;
    let stub = spawn_slack_stub(StubMode::OmitTs)?;
    let config = stub_config(stub.base_url())?;

    let cases = [CaseId::DeleteMessageSucceeds, CaseId::UpdateMessageReplacesText];
    let run = run_cases(&config, &cases).await?;
    let artifacts = write_run_artifacts(&reporter, &run)?;

    for case in &run.report.cases {
        if case.status != CaseStatus::Fail || case.steps.len() != 1 {
            return Err(format!("{} should fail after its setup step", case.case).into());
        }
        if !case.violations.iter().any(|violation| violation.path == "$.ts") {
            return Err(format!("{} lacks a $.ts violation", case.case).into());
        }
    }
    let dependent = stub
        .requests()
        .iter()
        .filter(|request| request.endpoint != Endpoint::PostMessage)
        .count();
    if dependent != 0 {
        return Err(format!("{dependent} dependent requests reached the stub").into());
    }

    reporter.finish(
        "pass",
        vec!["dependent delete and update were not sent without a ts".to_string()],
        artifacts,
    )?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn persisted_outputs_never_contain_token() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("persisted_outputs_never_contain_token")?;
    let stub = spawn_slack_stub(StubMode::Conforming)?;
    let config = stub_config(stub.base_url())?;

    let run = run_cases(&config, &CaseId::ALL).await?;
    let artifacts = write_run_artifacts(&reporter, &run)?;
    let rendered = format!("{}\n{config:?}", rendered_outputs(&run)?);

    if rendered.contains(STUB_TOKEN) {
        return Err("bearer token leaked into persisted outputs".into());
    }
    if run.transcript.iter().filter(|entry| entry.authenticated).count()
        != run.transcript.len() - 1
    {
        return Err("transcript should mark exactly one request unauthenticated".into());
    }

    reporter.finish(
        "pass",
        vec!["report, transcript, events, and config debug output are token-free".to_string()],
        artifacts,
    )?;
    drop(reporter);
    Ok(())
}
