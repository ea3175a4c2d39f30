//! Loan products and engine-wide lending constants

mod catalog;
pub mod loader;

pub use catalog::{LoanProduct, ProductCatalog, ProductType};

use crate::error::Result;
use std::path::Path;

/// Container for the product catalogue and the fixed lending rules
#[derive(Debug, Clone)]
pub struct LoanPolicy {
    pub products: ProductCatalog,

    /// Requested amounts must be whole multiples of this
    pub denomination: f64,

    /// Flat fee withheld from Regular loan proceeds
    pub regular_service_fee: f64,

    /// Minimum net monthly pay for a Regular loan
    pub regular_min_net_pay: f64,

    /// Minimum tenure for a Regular loan, in months
    pub regular_min_tenure_months: u32,

    /// The only amount a Short-Term loan can be granted for
    pub short_term_amount: f64,
}

impl LoanPolicy {
    /// Built-in catalogue with the fund's standard lending rules
    pub fn default_policy() -> Self {
        Self {
            products: ProductCatalog::default_catalog(),
            denomination: 1_000.0,
            regular_service_fee: 200.0,
            regular_min_net_pay: 3_000.0,
            regular_min_tenure_months: 5,
            short_term_amount: 5_000.0,
        }
    }

    /// Replace the built-in catalogue with products.csv from a directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self {
            products: loader::load_products(path)?,
            ..Self::default_policy()
        })
    }

    pub fn product(&self, product_type: ProductType) -> Option<&LoanProduct> {
        self.products.get(product_type)
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self::default_policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_path_reads_products_csv_in_directory() {
        let dir = std::env::temp_dir().join(format!("benefits_engine_products_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("products.csv"),
            "Type,Name,Description,MinAmount,MaxAmount,MinEquity,MinTenureMonths,InterestRate,TermsMonths,Documents,Online\n\
             Emergency,Emergency Loan,,1000,30000,0,,0.01,12;24,,true\n",
        )
        .unwrap();

        let policy = LoanPolicy::from_csv_path(&dir).expect("Failed to load policy");
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(policy.products.len(), 1);
        assert_eq!(policy.product(ProductType::Emergency).unwrap().max_amount, 30_000.0);
        assert!(policy.product(ProductType::Regular).is_none());
        assert_eq!(policy.denomination, 1_000.0);
        assert_eq!(policy.short_term_amount, 5_000.0);
    }

    #[test]
    fn test_missing_products_csv_is_an_error() {
        let dir = std::env::temp_dir().join("benefits_engine_no_products_here");
        assert!(LoanPolicy::from_csv_path(&dir).is_err());
    }
}
