/// Usage-limit modal state. Ephemeral UI state, never persisted.
///
/// `is_upgrade_flow` keeps its last value after a close; only `open`
/// determines visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageModal {
    pub open: bool,
    pub is_upgrade_flow: bool,
}

impl UsageModal {
    pub fn open(&mut self, upgrade: bool) {
        self.open = true;
        self.is_upgrade_flow = upgrade;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}
