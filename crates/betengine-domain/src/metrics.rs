//! Affiliate performance metrics and the admin balance derivation rule.

/// Fields an administrator may supply when editing a user's metrics.
///
/// Every field is optional; an absent field leaves the stored value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsPatch {
    pub ftds: Option<i64>,
    pub cpa: Option<f64>,
    pub leads: Option<i64>,
    pub clicks: Option<i64>,
    pub balance: Option<f64>,
}

/// Column values to write after the derivation rule has been applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsChanges {
    pub ftds: Option<i64>,
    pub cpa: Option<f64>,
    pub leads: Option<i64>,
    pub clicks: Option<i64>,
    pub balance: Option<f64>,
}

impl MetricsChanges {
    pub fn is_empty(&self) -> bool {
        self.ftds.is_none()
            && self.cpa.is_none()
            && self.leads.is_none()
            && self.clicks.is_none()
            && self.balance.is_none()
    }
}

impl MetricsPatch {
    /// Resolve the patch against the stored `ftds` and `cpa`.
    ///
    /// When `ftds` or `cpa` is supplied the balance is recomputed as
    /// `effective_ftds * effective_cpa` and any supplied balance is ignored.
    /// Otherwise a supplied balance is taken as a manual override.
    pub fn resolve(&self, current_ftds: i64, current_cpa: f64) -> MetricsChanges {
        let balance = if self.ftds.is_some() || self.cpa.is_some() {
            let ftds = self.ftds.unwrap_or(current_ftds);
            let cpa = self.cpa.unwrap_or(current_cpa);
            Some(ftds as f64 * cpa)
        } else {
            self.balance
        };

        MetricsChanges {
            ftds: self.ftds,
            cpa: self.cpa,
            leads: self.leads,
            clicks: self.clicks,
            balance,
        }
    }
}
