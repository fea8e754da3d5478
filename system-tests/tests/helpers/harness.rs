// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Suite Harness
// Description: Drives the conformance suite and persists its outputs.
// Purpose: Share config, run, and artifact plumbing across scenarios.
// Dependencies: slack-conformance-config, slack-conformance-core
// ============================================================================

use std::io;
use std::time::Duration;

use slack_conformance_config::BearerToken;
use slack_conformance_config::EnvOverrides;
use slack_conformance_config::FileConfig;
use slack_conformance_config::SuiteConfig;
use slack_conformance_core::CaseId;
use slack_conformance_core::MemorySink;
use slack_conformance_core::SuiteEvent;
use slack_conformance_core::SuiteReport;
use slack_conformance_core::TranscriptEntry;
use slack_conformance_core::run_suite;

use super::artifacts::TestReporter;
use super::slack_stub::STUB_CHANNEL;
use super::slack_stub::STUB_TOKEN;
use super::timeouts::resolve_timeout;

/// Default per-request timeout for scenario clients.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything one suite run produced.
pub struct SuiteRun {
    pub report: SuiteReport,
    pub transcript: Vec<TranscriptEntry>,
    pub events: Vec<SuiteEvent>,
}

/// Builds a validated config pointing at a stub base URL.
pub fn stub_config(base_url: &str) -> Result<SuiteConfig, String> {
    let file = FileConfig {
        base_url: Some(base_url.to_string()),
        timeout_seconds: Some(resolve_timeout(DEFAULT_TIMEOUT).as_secs()),
        ..FileConfig::default()
    };
    let env = EnvOverrides {
        token: Some(BearerToken::new(STUB_TOKEN)),
        channel: Some(STUB_CHANNEL.to_string()),
        base_url: None,
        timeout: None,
    };
    SuiteConfig::from_sources(file, env).map_err(|err| err.to_string())
}

/// Runs the given cases with an in-memory event sink.
pub async fn run_cases(config: &SuiteConfig, cases: &[CaseId]) -> Result<SuiteRun, String> {
    let client = config.build_client().map_err(|err| err.to_string())?;
    let sink = MemorySink::new();
    let report = run_suite(&client, &config.suite_params(), &sink, cases)
        .await
        .map_err(|err| err.to_string())?;
    Ok(SuiteRun {
        report,
        transcript: client.transcript(),
        events: sink.events(),
    })
}

/// Writes the report, transcript, and events, returning the artifact names.
pub fn write_run_artifacts(reporter: &TestReporter, run: &SuiteRun) -> io::Result<Vec<String>> {
    let artifacts = reporter.artifacts();
    let report_json = run.report.to_canonical_json().map_err(io::Error::other)?;
    artifacts.write_bytes("report.json", &report_json)?;
    artifacts.write_text("report.md", &run.report.to_markdown())?;
    artifacts.write_json("transcript.json", &run.transcript)?;
    artifacts.write_json("events.json", &run.events)?;
    Ok(vec![
        "report.json".to_string(),
        "report.md".to_string(),
        "transcript.json".to_string(),
        "events.json".to_string(),
        "summary.json".to_string(),
        "summary.md".to_string(),
    ])
}

/// Returns every persisted artifact of a run as one string for leak scans.
pub fn rendered_outputs(run: &SuiteRun) -> Result<String, String> {
    let report = run.report.to_canonical_json().map_err(|err| err.to_string())?;
    let transcript = serde_jcs::to_string(&run.transcript).map_err(|err| err.to_string())?;
    let events = serde_jcs::to_string(&run.events).map_err(|err| err.to_string())?;
    Ok(format!(
        "{}\n{}\n{transcript}\n{events}",
        String::from_utf8_lossy(&report),
        run.report.to_markdown()
    ))
}
