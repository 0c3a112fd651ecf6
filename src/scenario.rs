//! Out-of-range numeric inputs are absorbed by the clamps in the step
//! update; `validate` only catches structurally unusable scenarios.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Thresholded from a country's development_level; selects which parameter
/// records apply to its generated agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentTier {
    Low,
    Medium,
    High,
}

impl DevelopmentTier {
    pub fn from_level(development_level: f64) -> Self {
        if development_level > 0.7 {
            DevelopmentTier::High
        } else if development_level > 0.4 {
            DevelopmentTier::Medium
        } else {
            DevelopmentTier::Low
        }
    }
}

/// An absent tier falls back to the built-in default ranges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierParams<T> {
    pub low: Option<T>,
    pub medium: Option<T>,
    pub high: Option<T>,
}

impl<T> TierParams<T> {
    pub fn get(&self, tier: DevelopmentTier) -> Option<&T> {
        match tier {
            DevelopmentTier::Low => self.low.as_ref(),
            DevelopmentTier::Medium => self.medium.as_ref(),
            DevelopmentTier::High => self.high.as_ref(),
        }
    }
}

/// Ranges are (min, max); `expertise_weights` is ordered low, medium,
/// high, expert and need not be normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitizenParams {
    pub salary: (f64, f64),
    pub expertise_weights: [f64; 4],
    pub savings: (f64, f64),
    pub values_social_services: (f64, f64),
    pub values_economic_freedom: (f64, f64),
    pub trust_in_government: (f64, f64),
    pub import_goods_preference: (f64, f64),
    pub import_price_sensitivity: (f64, f64),
    pub inflation_sensitivity: (f64, f64),
    pub initial_employment_rate: f64,
}

/// `type_weights` is in `BusinessType::ALL` order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessParams {
    pub type_weights: [f64; 6],
    pub automation_level: (f64, f64),
    pub size_factor: (f64, f64),
    pub investment_rate: (f64, f64),
    pub interest_rate_sensitivity: (f64, f64),
}

/// An absent field falls back to a built-in uniform-random default at
/// construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryConfig {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub development_level: Option<f64>,
    pub wealth_level: Option<f64>,
    pub homogeneity: Option<f64>,
    pub tax_rate: Option<f64>,
    pub interest_rate: Option<f64>,
    pub social_services_spending: Option<f64>,
    pub immigration_incentives: Option<f64>,
    pub import_duty_rate: Option<f64>,
    pub external_influences: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub steps: usize,
    pub citizens_per_country: usize,
    pub businesses_per_country: usize,
    pub countries: Vec<CountryConfig>,
    pub citizen_params: TierParams<CitizenParams>,
    pub business_params: TierParams<BusinessParams>,
    pub random_seed: Option<u64>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "developed_country".to_string(),
            description: "One developed economy with default tier parameters".to_string(),
            steps: 20,
            citizens_per_country: 100,
            businesses_per_country: 10,
            countries: vec![developed_country_config(1, "Developed Country")],
            citizen_params: default_citizen_params(),
            business_params: default_business_params(),
            random_seed: None,
        }
    }
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn developed_and_developing() -> Self {
        let mut scenario = Self::new("developed_and_developing");
        scenario.description =
            "A developed and a developing economy with contrasting policy levers".to_string();
        scenario.countries = vec![
            developed_country_config(1, "Developed Country"),
            CountryConfig {
                id: Some(3),
                name: Some("Developing Country".to_string()),
                development_level: Some(0.3),
                wealth_level: Some(0.2),
                homogeneity: Some(0.9),
                tax_rate: Some(0.15),
                interest_rate: Some(0.08),
                social_services_spending: Some(0.25),
                immigration_incentives: Some(0.08),
                import_duty_rate: Some(0.25),
                external_influences: Some(-30),
            },
        ];
        scenario
    }

    pub fn save_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let scenario: Self = serde_json::from_str(&json)?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.countries.is_empty() {
            return Err("Scenario must have at least one country".to_string());
        }
        if self.steps == 0 {
            return Err("Scenario must simulate at least one step".to_string());
        }

        for (tier, params) in [
            ("low", &self.citizen_params.low),
            ("medium", &self.citizen_params.medium),
            ("high", &self.citizen_params.high),
        ] {
            if let Some(p) = params {
                if p.expertise_weights.iter().all(|w| *w <= 0.0) {
                    return Err(format!(
                        "Citizen params for tier {} have no positive expertise weight",
                        tier
                    ));
                }
            }
        }
        for (tier, params) in [
            ("low", &self.business_params.low),
            ("medium", &self.business_params.medium),
            ("high", &self.business_params.high),
        ] {
            if let Some(p) = params {
                if p.type_weights.iter().all(|w| *w <= 0.0) {
                    return Err(format!(
                        "Business params for tier {} have no positive type weight",
                        tier
                    ));
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scenario: {}", self.name)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(
            f,
            "Population per country: {} citizens, {} businesses",
            self.citizens_per_country, self.businesses_per_country
        )?;
        if let Some(seed) = self.random_seed {
            writeln!(f, "Random seed: {}", seed)?;
        }
        writeln!(f, "\nCountries:")?;
        for country in &self.countries {
            writeln!(
                f,
                "  {} (development {}, wealth {})",
                country.name.as_deref().unwrap_or("<random>"),
                country
                    .development_level
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| "random".to_string()),
                country
                    .wealth_level
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| "random".to_string()),
            )?;
        }
        Ok(())
    }
}

fn developed_country_config(id: u32, name: &str) -> CountryConfig {
    CountryConfig {
        id: Some(id),
        name: Some(name.to_string()),
        development_level: Some(0.9),
        wealth_level: Some(0.85),
        homogeneity: Some(0.7),
        tax_rate: Some(0.35),
        interest_rate: Some(0.02),
        social_services_spending: Some(0.4),
        immigration_incentives: Some(0.05),
        import_duty_rate: Some(0.1),
        external_influences: Some(50),
    }
}

/// The medium tier is deliberately absent: medium-development countries
/// generate citizens from the default ranges.
pub fn default_citizen_params() -> TierParams<CitizenParams> {
    TierParams {
        low: Some(CitizenParams {
            salary: (20.0, 60.0),
            expertise_weights: [0.4, 0.4, 0.15, 0.05],
            savings: (5.0, 50.0),
            values_social_services: (0.5, 1.0),
            values_economic_freedom: (0.2, 0.6),
            trust_in_government: (0.1, 0.5),
            import_goods_preference: (0.5, 0.9),
            import_price_sensitivity: (0.6, 1.0),
            inflation_sensitivity: (0.7, 1.0),
            initial_employment_rate: 0.6,
        }),
        medium: None,
        high: Some(CitizenParams {
            salary: (60.0, 120.0),
            expertise_weights: [0.1, 0.3, 0.4, 0.2],
            savings: (50.0, 200.0),
            values_social_services: (0.3, 0.8),
            values_economic_freedom: (0.4, 0.9),
            trust_in_government: (0.4, 0.8),
            import_goods_preference: (0.3, 0.7),
            import_price_sensitivity: (0.2, 0.6),
            inflation_sensitivity: (0.4, 0.8),
            initial_employment_rate: 0.95,
        }),
    }
}

/// Low-tier economies have no AI businesses.
pub fn default_business_params() -> TierParams<BusinessParams> {
    TierParams {
        low: Some(BusinessParams {
            type_weights: [0.3, 0.25, 0.15, 0.2, 0.1, 0.0],
            automation_level: (0.1, 0.5),
            size_factor: (0.4, 1.5),
            investment_rate: (0.1, 0.3),
            interest_rate_sensitivity: (0.9, 1.5),
        }),
        medium: None,
        high: Some(BusinessParams {
            type_weights: [0.2, 0.15, 0.25, 0.15, 0.1, 0.15],
            automation_level: (0.4, 0.9),
            size_factor: (0.8, 2.5),
            investment_rate: (0.2, 0.5),
            interest_rate_sensitivity: (0.7, 1.2),
        }),
    }
}

pub fn create_standard_scenarios() -> HashMap<String, Scenario> {
    let mut scenarios = HashMap::new();

    scenarios.insert("default".to_string(), Scenario::default());
    scenarios.insert(
        "two_economies".to_string(),
        Scenario::developed_and_developing(),
    );

    let mut protectionist = Scenario::new("protectionist");
    protectionist.description = "A developed economy with a steep import duty regime".to_string();
    protectionist.countries = vec![CountryConfig {
        import_duty_rate: Some(0.3),
        ..developed_country_config(2, "Protectionist Country")
    }];
    scenarios.insert("protectionist".to_string(), protectionist);

    scenarios
}
