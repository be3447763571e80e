// Financial analysis tools over mock supplier data

use super::{Tool, ToolError};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Deserialize)]
struct TcoArgs {
    supplier_id: String,
    annual_volume: f64,
    unit_price: f64,
    #[serde(default)]
    transportation_cost: f64,
    #[serde(default)]
    quality_cost: f64,
    #[serde(default)]
    risk_cost: f64,
}

/// Calculates Total Cost of Ownership for a supplier
pub struct TcoTool;

impl TcoTool {
    pub fn calculate(
        supplier_id: &str,
        annual_volume: f64,
        unit_price: f64,
        transportation_cost: f64,
        quality_cost: f64,
        risk_cost: f64,
    ) -> String {
        if annual_volume <= 0.0 {
            return "Error: annual_volume must be greater than zero.".to_string();
        }

        let base_cost = annual_volume * unit_price;
        let total_cost = base_cost + transportation_cost + quality_cost + risk_cost;

        if total_cost <= 0.0 {
            return "Error: total cost must be greater than zero.".to_string();
        }

        let mut report = format!(
            "Total Cost of Ownership Analysis for Supplier {}\n",
            supplier_id
        );
        report.push_str(&format!(
            "Analysis Date: {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        ));

        report.push_str("Cost Breakdown:\n");
        report.push_str(&format!(
            "- Base Purchase Cost: ${:.2} ({:.1}%)\n",
            base_cost,
            base_cost / total_cost * 100.0
        ));
        report.push_str(&format!(
            "- Transportation Cost: ${:.2} ({:.1}%)\n",
            transportation_cost,
            transportation_cost / total_cost * 100.0
        ));
        report.push_str(&format!(
            "- Quality Cost: ${:.2} ({:.1}%)\n",
            quality_cost,
            quality_cost / total_cost * 100.0
        ));
        report.push_str(&format!(
            "- Risk Cost: ${:.2} ({:.1}%)\n",
            risk_cost,
            risk_cost / total_cost * 100.0
        ));
        report.push_str(&format!("\nTotal Annual Cost: ${:.2}\n", total_cost));
        report.push_str(&format!(
            "Cost per Unit (including all factors): ${:.2}\n",
            total_cost / annual_volume
        ));

        report
    }
}

#[async_trait]
impl Tool for TcoTool {
    fn name(&self) -> &str {
        "calculate_tco"
    }

    fn description(&self) -> &str {
        "Calculate Total Cost of Ownership for a supplier with a breakdown by cost category"
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "supplier_id": {"type": "string", "description": "Unique identifier for the supplier"},
                "annual_volume": {"type": "number", "description": "Expected annual purchase volume"},
                "unit_price": {"type": "number", "description": "Price per unit"},
                "transportation_cost": {"type": "number", "description": "Annual transportation costs"},
                "quality_cost": {"type": "number", "description": "Annual quality-related costs (defects, returns)"},
                "risk_cost": {"type": "number", "description": "Annual risk-related costs (disruptions, delays)"}
            },
            "required": ["supplier_id", "annual_volume", "unit_price"]
        })
    }

    async fn invoke(&self, args: &serde_json::Value) -> Result<String, ToolError> {
        let args: TcoArgs = serde_json::from_value(args.clone())
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        Ok(Self::calculate(
            &args.supplier_id,
            args.annual_volume,
            args.unit_price,
            args.transportation_cost,
            args.quality_cost,
            args.risk_cost,
        ))
    }
}

struct FinancialRecord {
    name: &'static str,
    credit_rating: &'static str,
    debt_to_equity: f64,
    current_ratio: f64,
    revenue_growth: f64,
    profit_margin: f64,
    days_sales_outstanding: u32,
}

// Would connect to financial APIs in production
fn financial_record(supplier_id: &str) -> Option<FinancialRecord> {
    match supplier_id {
        "SUP001" => Some(FinancialRecord {
            name: "Acme Manufacturing",
            credit_rating: "BBB+",
            debt_to_equity: 0.45,
            current_ratio: 2.1,
            revenue_growth: 0.08,
            profit_margin: 0.12,
            days_sales_outstanding: 45,
        }),
        "SUP002" => Some(FinancialRecord {
            name: "Global Parts Inc.",
            credit_rating: "BB-",
            debt_to_equity: 0.78,
            current_ratio: 1.3,
            revenue_growth: -0.02,
            profit_margin: 0.05,
            days_sales_outstanding: 62,
        }),
        _ => None,
    }
}

#[derive(Deserialize)]
struct FinancialRiskArgs {
    supplier_id: String,
}

/// Analyzes the financial health and stability of a supplier
pub struct FinancialRiskTool;

impl FinancialRiskTool {
    pub fn analyze(supplier_id: &str) -> String {
        let Some(supplier) = financial_record(supplier_id) else {
            return format!("Financial data for supplier {} not available.", supplier_id);
        };

        let mut report = format!(
            "Financial Risk Analysis for {} (ID: {})\n",
            supplier.name, supplier_id
        );
        report.push_str(&format!(
            "Analysis Date: {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        ));

        let credit_risk = if supplier.credit_rating.starts_with('A') {
            "Low"
        } else if supplier.credit_rating.starts_with("BB") {
            "Medium"
        } else {
            "High"
        };
        report.push_str(&format!(
            "Credit Rating: {} ({} Risk)\n\n",
            supplier.credit_rating, credit_risk
        ));

        let liquidity_health = if supplier.current_ratio >= 2.0 {
            "Strong"
        } else if supplier.current_ratio >= 1.5 {
            "Adequate"
        } else {
            "Weak"
        };
        report.push_str("Liquidity Analysis:\n");
        report.push_str(&format!(
            "- Current Ratio: {:.2} ({})\n",
            supplier.current_ratio, liquidity_health
        ));
        report.push_str(&format!(
            "- Days Sales Outstanding: {} days\n\n",
            supplier.days_sales_outstanding
        ));

        report.push_str("Financial Performance:\n");
        report.push_str(&format!(
            "- Revenue Growth: {:+.1}%\n",
            supplier.revenue_growth * 100.0
        ));
        report.push_str(&format!(
            "- Profit Margin: {:.1}%\n",
            supplier.profit_margin * 100.0
        ));
        report.push_str(&format!(
            "- Debt-to-Equity Ratio: {:.2}\n\n",
            supplier.debt_to_equity
        ));

        let mut risk_factors = Vec::new();
        if credit_risk == "High" {
            risk_factors.push("Poor credit rating");
        }
        if supplier.current_ratio < 1.5 {
            risk_factors.push("Weak liquidity position");
        }
        if supplier.revenue_growth < 0.0 {
            risk_factors.push("Declining revenue");
        }
        if supplier.debt_to_equity > 0.6 {
            risk_factors.push("High leverage");
        }

        if risk_factors.is_empty() {
            report.push_str("Overall Assessment: Low financial risk\n");
        } else {
            report.push_str("Key Risk Factors:\n");
            for factor in risk_factors {
                report.push_str(&format!("- {}\n", factor));
            }
        }

        report
    }
}

#[async_trait]
impl Tool for FinancialRiskTool {
    fn name(&self) -> &str {
        "analyze_financial_risk"
    }

    fn description(&self) -> &str {
        "Analyze a supplier's financial health: credit rating, liquidity, and stability metrics"
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "supplier_id": {
                    "type": "string",
                    "description": "Unique identifier for the supplier"
                }
            },
            "required": ["supplier_id"]
        })
    }

    async fn invoke(&self, args: &serde_json::Value) -> Result<String, ToolError> {
        let args: FinancialRiskArgs = serde_json::from_value(args.clone())
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        Ok(Self::analyze(&args.supplier_id))
    }
}

#[derive(Deserialize)]
struct CostComparisonArgs {
    supplier_ids: Vec<String>,
    #[serde(default)]
    scenario_data: serde_json::Value,
}

/// Compares total costs across multiple suppliers under different scenarios
pub struct CostComparisonTool;

impl CostComparisonTool {
    pub fn compare(supplier_ids: &[String], scenario_data: &serde_json::Value) -> String {
        let mut report = String::from("Supplier Cost Comparison Analysis\n");
        report.push_str(&format!(
            "Analysis Date: {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        ));

        if supplier_ids.is_empty() {
            report.push_str("No suppliers provided for comparison.\n");
            return report;
        }

        report.push_str(&format!("Suppliers Compared: {}\n", supplier_ids.join(", ")));
        if let Some(scenarios) = scenario_data.as_object() {
            if !scenarios.is_empty() {
                report.push_str("Scenario Assumptions:\n");
                for (supplier, assumptions) in scenarios {
                    report.push_str(&format!("- {}: {}\n", supplier, assumptions));
                }
            }
        }

        report.push_str("\nComparative analysis would be performed here with:\n");
        report.push_str("- Base costs vs. total costs\n");
        report.push_str("- Risk-adjusted costs\n");
        report.push_str("- Scenario modeling (best case, worst case, most likely)\n");
        report.push_str("- Sensitivity analysis\n");

        report
    }
}

#[async_trait]
impl Tool for CostComparisonTool {
    fn name(&self) -> &str {
        "compare_supplier_costs"
    }

    fn description(&self) -> &str {
        "Compare total costs across multiple suppliers under different scenarios"
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "supplier_ids": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "List of supplier IDs to compare"
                },
                "scenario_data": {
                    "type": "object",
                    "description": "Cost assumptions for each supplier"
                }
            },
            "required": ["supplier_ids"]
        })
    }

    async fn invoke(&self, args: &serde_json::Value) -> Result<String, ToolError> {
        let args: CostComparisonArgs = serde_json::from_value(args.clone())
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        Ok(Self::compare(&args.supplier_ids, &args.scenario_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tco_breakdown_sums() {
        let report = TcoTool::calculate("SUP001", 10_000.0, 0.5, 1_000.0, 500.0, 250.0);
        assert!(report.contains("Base Purchase Cost: $5000.00"));
        assert!(report.contains("Total Annual Cost: $6750.00"));
        assert!(report.contains("Cost per Unit (including all factors): $0.68"));
    }

    #[test]
    fn test_tco_rejects_zero_volume() {
        let report = TcoTool::calculate("SUP001", 0.0, 0.5, 0.0, 0.0, 0.0);
        assert!(report.starts_with("Error:"));
    }

    #[test]
    fn test_financial_risk_known_supplier() {
        let report = FinancialRiskTool::analyze("SUP002");
        assert!(report.contains("Global Parts Inc."));
        assert!(report.contains("Credit Rating: BB- (Medium Risk)"));
        assert!(report.contains("Weak liquidity position"));
        assert!(report.contains("Declining revenue"));
        assert!(report.contains("High leverage"));
    }

    #[test]
    fn test_financial_risk_unknown_supplier() {
        let report = FinancialRiskTool::analyze("SUP777");
        assert_eq!(report, "Financial data for supplier SUP777 not available.");
    }

    #[test]
    fn test_cost_comparison_lists_suppliers() {
        let report = CostComparisonTool::compare(
            &["SUP001".to_string(), "SUP002".to_string()],
            &serde_json::json!({}),
        );
        assert!(report.contains("Suppliers Compared: SUP001, SUP002"));
        assert!(report.contains("Risk-adjusted costs"));
    }
}
