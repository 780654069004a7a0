//! Milestone classification of the view counter.

/// Tier boundaries on the view counter, in increasing order.
pub const MILESTONES: [u64; 3] = [100_000, 1_000_000, 10_000_000];

/// Fraction of a tier's span, measured down from its upper boundary, in
/// which the next milestone counts as imminent.
const IMMINENT_DIVISOR: u64 = 10;

/// Where a view count sits relative to the next milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    /// The boundary the count is heading for.
    pub next_threshold: u64,
    /// Views still missing to reach `next_threshold`.
    pub remaining: u64,
    /// The count is within the top tenth of its tier.
    pub imminent: bool,
}

impl Milestone {
    /// Short label of the boundary (`100K`, `1M`, `10M`).
    pub fn label(&self) -> String {
        threshold_label(self.next_threshold)
    }

    /// Label of the tier the count is currently in.
    pub fn tier_label(&self) -> String {
        format!("below {}", self.label())
    }
}

fn threshold_label(threshold: u64) -> String {
    if threshold >= 1_000_000 && threshold % 1_000_000 == 0 {
        format!("{}M", threshold / 1_000_000)
    } else if threshold >= 1_000 && threshold % 1_000 == 0 {
        format!("{}K", threshold / 1_000)
    } else {
        threshold.to_string()
    }
}

/// Classify a view count.
///
/// Returns `None` once the count has passed the highest boundary.
pub fn classify(views: u64) -> Option<Milestone> {
    let mut lower = 0;
    for &upper in MILESTONES.iter() {
        if views < upper {
            let imminent_from = upper - (upper - lower) / IMMINENT_DIVISOR;
            return Some(Milestone {
                next_threshold: upper,
                remaining: upper - views,
                imminent: views >= imminent_from,
            });
        }
        lower = upper;
    }
    None
}
