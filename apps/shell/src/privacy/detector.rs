//! Two-signal private-browsing heuristic, tuned against false positives:
//! a wrong `Private` verdict would lock an ordinary anonymous user out of
//! the main view, so absence of evidence never classifies as private.
//!
//! Signal order matters. The quota probe, where the capability exists, is
//! the stronger indicator and must not be skipped in favor of the cheaper
//! storage write probe.

use std::time::Duration;

use tracing::{debug, warn};

use crate::privacy::probe::{AllocationKind, QuotaProbe};
use crate::privacy::Privacy;
use crate::storage::KeyValueStore;

/// Throwaway key written and immediately removed by the storage probe.
pub const PROBE_KEY: &str = "__privacy_test__";

/// The quota probe asks for the smallest possible allocation; the answer,
/// not the space, is the point.
const PROBE_ALLOCATION_BYTES: u64 = 1;

/// Classifies the current environment. Runs each signal at most once and
/// always reaches a terminal verdict.
pub async fn detect(
    quota: Option<&dyn QuotaProbe>,
    storage: &dyn KeyValueStore,
    probe_timeout: Duration,
) -> Privacy {
    if let Some(classification) = signal_a(quota, probe_timeout).await {
        return classification;
    }
    signal_b(storage)
}

/// Signal A: transient quota allocation.
///
/// Returns `None` when inconclusive: the capability is absent, or the probe
/// did not answer within `probe_timeout`. Only an explicit denial counts as
/// a private-mode indicator.
async fn signal_a(quota: Option<&dyn QuotaProbe>, probe_timeout: Duration) -> Option<Privacy> {
    let probe = match quota {
        Some(probe) => probe,
        None => {
            debug!("Quota capability absent; falling through to storage probe");
            return None;
        }
    };

    let request = probe.request_allocation(AllocationKind::Transient, PROBE_ALLOCATION_BYTES);
    match tokio::time::timeout(probe_timeout, request).await {
        Ok(Ok(())) => {
            debug!("Quota allocation granted");
            Some(Privacy::Normal)
        }
        Ok(Err(e)) => {
            debug!("Quota allocation refused: {e}");
            Some(Privacy::Private)
        }
        Err(_) => {
            warn!(
                "Quota probe did not answer within {}ms; treating as inconclusive",
                probe_timeout.as_millis()
            );
            None
        }
    }
}

/// Signal B: write-and-remove a throwaway key.
///
/// Engines that refuse persistent writes in private sessions fail here;
/// everything else succeeds and classifies as normal.
fn signal_b(storage: &dyn KeyValueStore) -> Privacy {
    let outcome = storage
        .set(PROBE_KEY, "1")
        .and_then(|()| storage.remove(PROBE_KEY));
    match outcome {
        Ok(()) => Privacy::Normal,
        Err(e) => {
            debug!("Storage write probe failed: {e}");
            Privacy::Private
        }
    }
}
