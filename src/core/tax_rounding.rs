use crate::domain::model::{RoundingDetail, TaxRow};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoundingSummary {
    pub details: Vec<RoundingDetail>,
}

impl RoundingSummary {
    /// Dialog title shown by hosts alongside [`render`](Self::render).
    pub fn title(&self) -> &'static str {
        "Impuestos Redondeados"
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    pub fn total_adjustment(&self) -> f64 {
        self.details.iter().map(|d| d.difference).sum()
    }

    /// Localized summary for the user; empty when nothing was rounded.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut lines = vec!["Redondeo de Impuestos Aplicado:".to_string()];
        for detail in &self.details {
            lines.push(format!(
                "• {}: {:.2} → {:.2} (+{:.2})",
                detail.tax_name, detail.original, detail.rounded, detail.difference
            ));
        }
        lines.push(format!("Ajuste Total: +{:.2}", self.total_adjustment()));
        lines.join("\n")
    }
}

/// Rounds up the amount of every row flagged `round_up`.
///
/// Rows with a zero, negative or non-finite amount, and rows already on a
/// whole number, are left alone. The host recalculates document totals when
/// the summary is not empty.
pub fn apply_row_level_tax_rounding(rows: &mut [TaxRow]) -> RoundingSummary {
    let mut summary = RoundingSummary::default();

    for row in rows.iter_mut() {
        if !row.round_up || !row.tax_amount.is_finite() || row.tax_amount <= 0.0 {
            continue;
        }

        let original = row.tax_amount;
        let rounded = original.ceil();
        if rounded == original {
            continue;
        }

        row.tax_amount = rounded;
        let tax_name = row
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| row.account_head.clone());
        tracing::debug!("Rounded {} from {:.2} to {:.2}", tax_name, original, rounded);

        summary.details.push(RoundingDetail {
            tax_name,
            original,
            rounded,
            difference: rounded - original,
        });
    }

    summary
}
