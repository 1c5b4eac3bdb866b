use std::fmt;

use crate::error::{CardError, Result};
use crate::model::PortfolioSnapshot;
use crate::theme::is_color_token;

const FULL_ALLOCATION: f64 = 100.0;
const ALLOCATION_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of [`validate`]. Errors block rendering; warnings describe
/// inputs that render fine but probably aren't what the author meant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<Violation>,
    pub warnings: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<ValidationReport> {
        if self.is_valid() {
            return Ok(self);
        }
        let joined = self
            .errors
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Err(CardError::Invalid(joined))
    }
}

pub fn validate(portfolio: &PortfolioSnapshot) -> ValidationReport {
    let mut report = ValidationReport::default();

    if portfolio.display_name.trim().is_empty() {
        report
            .warnings
            .push(Violation::new("username", "display name is empty"));
    }
    if !portfolio.return_rate_percent.is_finite() {
        report
            .errors
            .push(Violation::new("xirr", "return rate must be a finite number"));
    }
    if portfolio.categories.is_empty() {
        report
            .errors
            .push(Violation::new("schemes", "at least one scheme is required"));
    }

    for (idx, category) in portfolio.categories.iter().enumerate() {
        let field = |name: &str| format!("schemes[{idx}].{name}");
        if category.label.trim().is_empty() {
            report.errors.push(Violation::new(field("name"), "name is empty"));
        }
        if !category.weight_percent.is_finite() {
            report
                .errors
                .push(Violation::new(field("allocation"), "allocation must be a finite number"));
        } else if category.weight_percent < 0.0 {
            report.errors.push(Violation::new(
                field("allocation"),
                format!("allocation {} is negative", category.weight_percent),
            ));
        } else if category.weight_percent > FULL_ALLOCATION {
            report.errors.push(Violation::new(
                field("allocation"),
                format!("allocation {} exceeds 100", category.weight_percent),
            ));
        }
        if !is_color_token(&category.fill_color) {
            report.errors.push(Violation::new(
                field("color"),
                format!("'{}' is not a color", category.fill_color),
            ));
        }
    }

    let total = portfolio.total_weight();
    if !portfolio.categories.is_empty()
        && total.is_finite()
        && (total - FULL_ALLOCATION).abs() > ALLOCATION_TOLERANCE
    {
        report.warnings.push(Violation::new(
            "schemes",
            format!("allocations sum to {total}%, the chart will not close exactly"),
        ));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn portfolio(categories: Vec<Category>) -> PortfolioSnapshot {
        PortfolioSnapshot {
            display_name: "TestUser".to_string(),
            return_rate_percent: 9.5,
            period_years: 2,
            categories,
        }
    }

    #[test]
    fn clean_portfolio_has_no_findings() {
        let report = validate(&portfolio(vec![
            Category::new("Equity", 60.0, "#4285F4"),
            Category::new("Debt", 40.0, "green"),
        ]));
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn unbalanced_sum_is_only_a_warning() {
        let report = validate(&portfolio(vec![
            Category::new("A", 70.0, "#FF0000"),
            Category::new("B", 70.0, "#0000FF"),
        ]));
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("140"));
    }

    #[test]
    fn zero_weight_is_allowed() {
        let report = validate(&portfolio(vec![
            Category::new("A", 0.0, "#FF0000"),
            Category::new("B", 100.0, "#0000FF"),
        ]));
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn single_allocation_above_hundred_is_an_error() {
        let report = validate(&portfolio(vec![
            Category::new("A", 1.0e7, "#FF0000"),
            Category::new("B", 100.0, "#0000FF"),
        ]));
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, "schemes[0].allocation");
        assert!(report.errors[0].message.contains("exceeds 100"));

        let report = validate(&portfolio(vec![Category::new("A", 100.5, "#FF0000")]));
        assert!(!report.is_valid());
        assert!(validate(&portfolio(vec![Category::new("A", 99.99, "#FF0000")])).is_valid());
    }

    #[test]
    fn collects_every_error() {
        let mut input = portfolio(vec![
            Category::new("", -5.0, "#12"),
            Category::new("Gold", f64::NAN, "gold"),
        ]);
        input.return_rate_percent = f64::INFINITY;
        let report = validate(&input);
        let fields: Vec<&str> = report.errors.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "xirr",
                "schemes[0].name",
                "schemes[0].allocation",
                "schemes[0].color",
                "schemes[1].allocation",
            ]
        );
        let err = report.into_result().unwrap_err();
        assert!(err.to_string().contains("schemes[0].allocation: allocation -5 is negative"));
    }

    #[test]
    fn empty_schemes_is_an_error() {
        let report = validate(&portfolio(Vec::new()));
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].field, "schemes");
    }
}
