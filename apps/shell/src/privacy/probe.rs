use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ProbeError;

/// What kind of quota the probe asks for. Only transient storage is ever
/// requested; the variant exists because the underlying browser API takes
/// the kind as a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationKind {
    Transient,
}

/// The transient quota-allocation capability, when the environment has one.
///
/// Chromium/WebKit-family engines expose this and deny the allocation in
/// private sessions; elsewhere the capability is simply absent, which the
/// detector models as `Option::None` rather than a probe failure.
#[async_trait]
pub trait QuotaProbe: Send + Sync {
    async fn request_allocation(
        &self,
        kind: AllocationKind,
        size_bytes: u64,
    ) -> Result<(), ProbeError>;
}

/// Probe that grants or denies unconditionally. Stands in for the real
/// browser capability on hosts that do not have one.
pub struct StaticQuotaProbe {
    grant: bool,
}

impl StaticQuotaProbe {
    pub fn granting() -> Self {
        Self { grant: true }
    }

    pub fn denying() -> Self {
        Self { grant: false }
    }
}

#[async_trait]
impl QuotaProbe for StaticQuotaProbe {
    async fn request_allocation(
        &self,
        _kind: AllocationKind,
        _size_bytes: u64,
    ) -> Result<(), ProbeError> {
        if self.grant {
            Ok(())
        } else {
            Err(ProbeError::Denied)
        }
    }
}

/// Startup selection of the quota capability, read from configuration the
/// same way the storage backend path is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMode {
    /// No capability in this environment (the common case off-browser).
    Absent,
    /// Capability present and granting.
    Grant,
    /// Capability present and denying, i.e. simulating a private session.
    Deny,
}

impl ProbeMode {
    pub fn into_probe(self) -> Option<Arc<dyn QuotaProbe>> {
        match self {
            ProbeMode::Absent => None,
            ProbeMode::Grant => Some(Arc::new(StaticQuotaProbe::granting())),
            ProbeMode::Deny => Some(Arc::new(StaticQuotaProbe::denying())),
        }
    }
}

impl FromStr for ProbeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absent" => Ok(ProbeMode::Absent),
            "grant" => Ok(ProbeMode::Grant),
            "deny" => Ok(ProbeMode::Deny),
            other => Err(format!(
                "unknown quota probe mode '{other}' (expected absent|grant|deny)"
            )),
        }
    }
}
