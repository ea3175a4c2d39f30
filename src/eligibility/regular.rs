//! Tenure-tiered limits for Regular loans

/// One row of the Regular loan tenure table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TenureTier {
    /// First month of membership the tier applies to
    pub min_months: u32,

    /// Last month of membership the tier applies to (None = open-ended)
    pub max_months: Option<u32>,

    pub max_loanable: f64,
    pub max_term_years: u32,
}

impl TenureTier {
    const fn new(min_months: u32, max_months: Option<u32>, max_loanable: f64, max_term_years: u32) -> Self {
        Self { min_months, max_months, max_loanable, max_term_years }
    }

    pub fn contains(&self, tenure_months: u32) -> bool {
        tenure_months >= self.min_months && self.max_months.map_or(true, |max| tenure_months <= max)
    }

    pub fn max_term_months(&self) -> u32 {
        self.max_term_years * 12
    }
}

/// Ordered, contiguous tiers from 5 months of membership upward
pub const REGULAR_TENURE_TABLE: [TenureTier; 15] = [
    TenureTier::new(5, Some(9), 3_000.0, 1),
    TenureTier::new(10, Some(11), 6_000.0, 2),
    TenureTier::new(12, Some(23), 18_000.0, 3),
    TenureTier::new(24, Some(35), 36_000.0, 3),
    TenureTier::new(36, Some(47), 60_000.0, 4),
    TenureTier::new(48, Some(59), 90_000.0, 4),
    TenureTier::new(60, Some(71), 120_000.0, 4),
    TenureTier::new(72, Some(83), 150_000.0, 5),
    TenureTier::new(84, Some(95), 180_000.0, 5),
    TenureTier::new(96, Some(107), 210_000.0, 5),
    TenureTier::new(108, Some(119), 240_000.0, 5),
    TenureTier::new(120, Some(131), 300_000.0, 5),
    TenureTier::new(132, Some(179), 350_000.0, 5),
    TenureTier::new(180, Some(239), 500_000.0, 5),
    TenureTier::new(240, None, 600_000.0, 6),
];

/// Tier for a tenure, or None below the 5-month floor
pub fn regular_tier(tenure_months: u32) -> Option<&'static TenureTier> {
    REGULAR_TENURE_TABLE.iter().find(|tier| tier.contains(tenure_months))
}
