use std::time::Duration;

use crate::models::session::Session;
use crate::privacy::detector;
use crate::privacy::probe::QuotaProbe;
use crate::privacy::Privacy;
use crate::session::SessionManager;
use crate::storage::KeyValueStore;

/// Runs the two startup operations and waits for both: the session load
/// (synchronous, same turn) and the privacy detection (async, bounded by
/// `probe_timeout` per sub-probe). Neither depends on the other; the shell
/// stays on the loading surface until this join resolves.
pub async fn run_startup(
    sessions: &SessionManager,
    storage: &dyn KeyValueStore,
    quota: Option<&dyn QuotaProbe>,
    probe_timeout: Duration,
) -> (Option<Session>, Privacy) {
    tokio::join!(
        async { sessions.load() },
        detector::detect(quota, storage, probe_timeout),
    )
}
