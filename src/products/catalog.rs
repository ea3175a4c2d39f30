//! Loan product definitions and the built-in product catalogue

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Loan product type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductType {
    Regular,
    Emergency,
    Special,
    ShortTerm,
    Car,
    Motorcycle,
}

impl ProductType {
    pub const ALL: [ProductType; 6] = [
        ProductType::Regular,
        ProductType::Emergency,
        ProductType::Special,
        ProductType::ShortTerm,
        ProductType::Car,
        ProductType::Motorcycle,
    ];

    /// Tag used in data files
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Regular => "Regular",
            ProductType::Emergency => "Emergency",
            ProductType::Special => "Special",
            ProductType::ShortTerm => "ShortTerm",
            ProductType::Car => "Car",
            ProductType::Motorcycle => "Motorcycle",
        }
    }

    /// Name shown to members
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::Regular => "Regular Loan",
            ProductType::Emergency => "Emergency Loan",
            ProductType::Special => "Special Loan",
            ProductType::ShortTerm => "Short Term Loan",
            ProductType::Car => "Car Loan",
            ProductType::Motorcycle => "Motorcycle Loan",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = EngineError;

    /// Accepts tags ("ShortTerm", "short-term") and display names ("Short Term Loan")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .trim_end_matches("loan")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "regular" => Ok(ProductType::Regular),
            "emergency" => Ok(ProductType::Emergency),
            "special" => Ok(ProductType::Special),
            "shortterm" => Ok(ProductType::ShortTerm),
            "car" => Ok(ProductType::Car),
            "motorcycle" => Ok(ProductType::Motorcycle),
            _ => Err(EngineError::InvalidRecord(format!("Unknown loan type: {}", s))),
        }
    }
}

/// Static configuration of one loan product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanProduct {
    pub product_type: ProductType,
    pub name: String,
    pub description: String,

    /// Amount bounds for a single application
    pub min_amount: f64,
    pub max_amount: f64,

    /// Minimum total equity before any application is considered
    pub min_equity_required: f64,

    /// Minimum membership tenure, if the product declares one
    pub min_tenure_months: Option<u32>,

    /// Monthly interest rate (0.012 = 1.2% per month)
    pub interest_rate: f64,

    /// Repayment terms offered, in months
    pub allowed_terms_months: Vec<u32>,

    /// Documents the member must attach
    pub required_documents: Vec<String>,

    /// Whether the loan can be completed through self-service
    pub online_application: bool,
}

impl LoanProduct {
    /// Eligible members must still complete the loan at the office
    pub fn requires_office_processing(&self) -> bool {
        !self.online_application
    }

    fn builtin(
        product_type: ProductType,
        description: &str,
        min_amount: f64,
        max_amount: f64,
        min_tenure_months: Option<u32>,
        interest_rate: f64,
        allowed_terms_months: Vec<u32>,
        required_documents: &[&str],
        online_application: bool,
    ) -> Self {
        Self {
            product_type,
            name: product_type.display_name().to_string(),
            description: description.to_string(),
            min_amount,
            max_amount,
            min_equity_required: 0.0,
            min_tenure_months,
            interest_rate,
            allowed_terms_months,
            required_documents: required_documents.iter().map(|d| d.to_string()).collect(),
            online_application,
        }
    }
}

/// Products keyed by type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    products: BTreeMap<ProductType, LoanProduct>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in catalogue of the six loan products
    pub fn default_catalog() -> Self {
        let mut catalog = Self::new();

        catalog.insert(LoanProduct::builtin(
            ProductType::Regular,
            "General purpose loan with standard terms.",
            1_000.0,
            600_000.0,
            Some(5),
            0.012,
            vec![12, 24, 36, 48, 60, 72],
            &["Payslip", "Valid ID"],
            true,
        ));
        catalog.insert(LoanProduct::builtin(
            ProductType::Emergency,
            "For unforeseen urgent financial needs.",
            1_000.0,
            50_000.0,
            None,
            0.010,
            vec![24],
            &["Valid ID", "Proof of emergency"],
            true,
        ));
        catalog.insert(LoanProduct::builtin(
            ProductType::Special,
            "Loan for specific occasions or needs.",
            1_000.0,
            100_000.0,
            None,
            0.010,
            vec![6],
            &["Valid ID", "Supporting document"],
            true,
        ));
        catalog.insert(LoanProduct::builtin(
            ProductType::ShortTerm,
            "Quick loan for immediate, short-duration financial gaps.",
            5_000.0,
            5_000.0,
            Some(36),
            0.010,
            vec![3],
            &["Valid ID"],
            true,
        ));
        catalog.insert(LoanProduct::builtin(
            ProductType::Car,
            "Finance a new or used car purchase.",
            50_000.0,
            1_000_000.0,
            Some(120),
            0.009,
            vec![72],
            &["Valid ID", "Payslip", "Vehicle quotation"],
            false,
        ));
        catalog.insert(LoanProduct::builtin(
            ProductType::Motorcycle,
            "Funding for a new motorcycle.",
            10_000.0,
            150_000.0,
            Some(120),
            0.009,
            vec![36],
            &["Valid ID", "Payslip", "Vehicle quotation"],
            false,
        ));

        catalog
    }

    /// Add or replace the product for its type
    pub fn insert(&mut self, product: LoanProduct) {
        self.products.insert(product.product_type, product);
    }

    pub fn get(&self, product_type: ProductType) -> Option<&LoanProduct> {
        self.products.get(&product_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoanProduct> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
