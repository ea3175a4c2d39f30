//! CSV-based product loader
//!
//! Loads the product catalogue from `products.csv` in a data directory.

use super::{LoanProduct, ProductCatalog, ProductType};
use crate::error::{EngineError, Result};
use std::path::Path;

/// Raw row of products.csv. Lists are `;`-separated.
#[derive(Debug, serde::Deserialize)]
struct ProductRow {
    #[serde(rename = "Type")]
    product_type: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "MinAmount")]
    min_amount: f64,
    #[serde(rename = "MaxAmount")]
    max_amount: f64,
    #[serde(rename = "MinEquity")]
    min_equity: f64,
    #[serde(rename = "MinTenureMonths")]
    min_tenure_months: Option<u32>,
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
    #[serde(rename = "TermsMonths")]
    terms_months: String,
    #[serde(rename = "Documents", default)]
    documents: String,
    #[serde(rename = "Online")]
    online: bool,
}

impl ProductRow {
    fn to_product(self) -> Result<LoanProduct> {
        let product_type: ProductType = self.product_type.parse()?;

        if self.min_amount > self.max_amount {
            return Err(EngineError::InvalidRecord(format!(
                "{}: min amount {} exceeds max amount {}",
                product_type, self.min_amount, self.max_amount
            )));
        }

        let allowed_terms_months = split_list(&self.terms_months)
            .map(|term| {
                term.parse::<u32>()
                    .map_err(|e| EngineError::InvalidRecord(format!("{}: bad term '{}': {}", product_type, term, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(LoanProduct {
            product_type,
            name: self.name,
            description: self.description,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            min_equity_required: self.min_equity,
            min_tenure_months: self.min_tenure_months,
            interest_rate: self.interest_rate,
            allowed_terms_months,
            required_documents: split_list(&self.documents).map(str::to_string).collect(),
            online_application: self.online,
        })
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(';').map(str::trim).filter(|s| !s.is_empty())
}

/// Load products from any reader into a catalogue
pub fn load_products_from_reader<R: std::io::Read>(reader: R) -> Result<ProductCatalog> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut catalog = ProductCatalog::new();

    for result in csv_reader.deserialize() {
        let row: ProductRow = result?;
        catalog.insert(row.to_product()?);
    }

    Ok(catalog)
}

/// Load products.csv from a directory
pub fn load_products(dir: &Path) -> Result<ProductCatalog> {
    let file = std::fs::File::open(dir.join("products.csv"))?;
    load_products_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCTS_CSV: &str = "\
Type,Name,Description,MinAmount,MaxAmount,MinEquity,MinTenureMonths,InterestRate,TermsMonths,Documents,Online
Regular,Regular Loan,General purpose,1000,600000,5000,5,0.012,12;24;36,Payslip; Valid ID,true
Car,Car Loan,,50000,800000,0,120,0.009,72,,false
";

    #[test]
    fn test_load_products() {
        let catalog = load_products_from_reader(PRODUCTS_CSV.as_bytes()).expect("Failed to load products");
        assert_eq!(catalog.len(), 2);

        let regular = catalog.get(ProductType::Regular).unwrap();
        assert_eq!(regular.min_equity_required, 5_000.0);
        assert_eq!(regular.allowed_terms_months, vec![12, 24, 36]);
        assert_eq!(regular.required_documents, vec!["Payslip", "Valid ID"]);

        let car = catalog.get(ProductType::Car).unwrap();
        assert_eq!(car.min_tenure_months, Some(120));
        assert!(car.required_documents.is_empty());
        assert!(!car.online_application);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let csv = "\
Type,Name,Description,MinAmount,MaxAmount,MinEquity,MinTenureMonths,InterestRate,TermsMonths,Documents,Online
Special,Special Loan,,9000,1000,0,,0.01,6,,true
";
        assert!(matches!(
            load_products_from_reader(csv.as_bytes()),
            Err(EngineError::InvalidRecord(_))
        ));
    }
}
