// system-tests/tests/helpers/timeouts.rs
// ============================================================================
// Module: System Test Timeouts
// Description: Client timeout resolution with an environment floor.
// Purpose: Keep scenario timeouts consistent and configurable across suites.
// ============================================================================

use std::time::Duration;

use system_tests::config::SystemTestConfig;
use system_tests::config::SystemTestEnv;

/// Returns the effective timeout for a scenario client.
///
/// `SLACK_CONFORMANCE_SYSTEM_TEST_TIMEOUT_SEC` acts as a minimum so it never
/// shortens an explicitly longer request.
#[must_use]
pub fn resolve_timeout(requested: Duration) -> Duration {
    let config = SystemTestConfig::load()
        .unwrap_or_else(|err| panic!("{} {err}", SystemTestEnv::TimeoutSeconds.as_str()));
    config.timeout.map_or(requested, |floor| requested.max(floor))
}
