use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::country::Country;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Inflation,
    EconomicGrowth,
    TaxRevenue,
    ImportDutyRevenue,
    TotalRevenue,
    CitizenHappiness,
    LocalManufacturingBoost,
    MoneySupply,
    InterestRate,
    CentralBankPolicy,
    GovernmentSpending,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::Inflation,
        Metric::EconomicGrowth,
        Metric::TaxRevenue,
        Metric::ImportDutyRevenue,
        Metric::TotalRevenue,
        Metric::CitizenHappiness,
        Metric::LocalManufacturingBoost,
        Metric::MoneySupply,
        Metric::InterestRate,
        Metric::CentralBankPolicy,
        Metric::GovernmentSpending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Inflation => "inflation",
            Metric::EconomicGrowth => "economic_growth",
            Metric::TaxRevenue => "tax_revenue",
            Metric::ImportDutyRevenue => "import_duty_revenue",
            Metric::TotalRevenue => "total_revenue",
            Metric::CitizenHappiness => "citizen_happiness",
            Metric::LocalManufacturingBoost => "local_manufacturing_boost",
            Metric::MoneySupply => "money_supply",
            Metric::InterestRate => "interest_rate",
            Metric::CentralBankPolicy => "central_bank_policy",
            Metric::GovernmentSpending => "government_spending",
        }
    }

    pub fn read(&self, country: &Country) -> f64 {
        match self {
            Metric::Inflation => country.inflation,
            Metric::EconomicGrowth => country.economic_growth,
            Metric::TaxRevenue => country.tax_revenue,
            Metric::ImportDutyRevenue => country.import_duty_revenue,
            Metric::TotalRevenue => country.total_revenue,
            Metric::CitizenHappiness => country.citizen_happiness,
            Metric::LocalManufacturingBoost => country.local_manufacturing_boost,
            Metric::MoneySupply => country.money_supply,
            Metric::InterestRate => country.interest_rate,
            Metric::CentralBankPolicy => country.central_bank_policy,
            Metric::GovernmentSpending => country.government_spending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountrySeries {
    pub country_name: String,
    pub series: HashMap<Metric, Vec<f64>>,
}

/// Append-only per-country, per-metric series, one value per step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsStore {
    pub started: DateTime<Utc>,
    pub countries: Vec<CountrySeries>,
}

impl MetricsStore {
    pub fn new(country_names: Vec<String>) -> Self {
        let countries = country_names
            .into_iter()
            .map(|country_name| CountrySeries {
                country_name,
                series: Metric::ALL.iter().map(|m| (*m, Vec::new())).collect(),
            })
            .collect();
        Self {
            started: Utc::now(),
            countries,
        }
    }

    pub fn record(&mut self, country_index: usize, country: &Country) {
        let entry = &mut self.countries[country_index];
        for metric in Metric::ALL {
            entry
                .series
                .entry(metric)
                .or_default()
                .push(metric.read(country));
        }
    }

    pub fn get(&self, country_index: usize, metric: Metric) -> &[f64] {
        self.countries
            .get(country_index)
            .and_then(|c| c.series.get(&metric))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn steps(&self) -> usize {
        self.countries
            .first()
            .and_then(|c| c.series.get(&Metric::Inflation))
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Mean of the trailing `window` samples of one series (or of the
    /// whole series when shorter). A zero window is treated as 1. NaN
    /// when nothing is recorded.
    pub fn mean_of_last(&self, country_index: usize, metric: Metric, window: usize) -> f64 {
        let series = self.get(country_index, metric);
        if series.is_empty() {
            return f64::NAN;
        }
        let tail = &series[series.len().saturating_sub(window.max(1))..];
        tail.iter().sum::<f64>() / tail.len() as f64
    }

    pub fn save_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Trailing-window means per country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: usize,
    pub window: usize,
    pub countries: Vec<CountrySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country_name: String,
    pub means: Vec<(Metric, f64)>,
}

impl RunSummary {
    pub fn from_store(store: &MetricsStore, window: usize) -> Self {
        let countries = store
            .countries
            .iter()
            .enumerate()
            .map(|(i, entry)| CountrySummary {
                country_name: entry.country_name.clone(),
                means: Metric::ALL
                    .iter()
                    .map(|m| (*m, store.mean_of_last(i, *m, window)))
                    .collect(),
            })
            .collect();
        Self {
            steps: store.steps(),
            window,
            countries,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Run Summary ({} steps, mean of last {}):",
            self.steps,
            self.window.min(self.steps)
        )?;
        for country in &self.countries {
            writeln!(f, "\n  {}:", country.country_name)?;
            for (metric, mean) in &country.means {
                writeln!(f, "    {}: {:.4}", metric.as_str(), mean)?;
            }
        }
        Ok(())
    }
}
