use serde::{Deserialize, Serialize};

use crate::country::MacroState;
use crate::rng::RandomSource;
use crate::scenario::CitizenParams;

/// Fixed at creation. Determines the collar tier a citizen is hired into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expertise {
    Low,
    Medium,
    High,
    Expert,
}

impl Expertise {
    pub const ALL: [Expertise; 4] = [
        Expertise::Low,
        Expertise::Medium,
        Expertise::High,
        Expertise::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Expertise::Low => "low",
            Expertise::Medium => "medium",
            Expertise::High => "high",
            Expertise::Expert => "expert",
        }
    }
}

/// The employer link is an index into the owning country's business list.
#[derive(Debug, Clone)]
pub struct Citizen {
    pub salary: f64,
    pub happiness: f64,
    pub expertise: Expertise,
    pub values_social_services: f64,
    pub values_economic_freedom: f64,
    pub trust_in_government: f64,
    pub import_goods_preference: f64,
    pub import_price_sensitivity: f64,
    pub inflation_sensitivity: f64,
    pub savings: f64,
    pub employed: bool,
    pub employer: Option<usize>,
    pub employment_matches_expertise: bool,
}

impl Citizen {
    pub fn generate(params: Option<&CitizenParams>, rng: &mut RandomSource) -> Self {
        let (
            salary,
            expertise,
            values_social_services,
            values_economic_freedom,
            trust_in_government,
            import_goods_preference,
            import_price_sensitivity,
            inflation_sensitivity,
            savings,
            employed,
        ) = match params {
            Some(p) => {
                let expertise = rng
                    .weighted_index(&p.expertise_weights)
                    .map(|i| Expertise::ALL[i])
                    .unwrap_or(Expertise::Medium);
                (
                    rng.int_range(p.salary.0 as i64, p.salary.1 as i64) as f64,
                    expertise,
                    rng.uniform(p.values_social_services.0, p.values_social_services.1),
                    rng.uniform(p.values_economic_freedom.0, p.values_economic_freedom.1),
                    rng.uniform(p.trust_in_government.0, p.trust_in_government.1),
                    rng.uniform(p.import_goods_preference.0, p.import_goods_preference.1),
                    rng.uniform(p.import_price_sensitivity.0, p.import_price_sensitivity.1),
                    rng.uniform(p.inflation_sensitivity.0, p.inflation_sensitivity.1),
                    rng.uniform(p.savings.0, p.savings.1),
                    rng.chance(p.initial_employment_rate),
                )
            }
            None => {
                let expertise = Expertise::ALL[rng.pick_index(Expertise::ALL.len()).unwrap()];
                (
                    rng.int_range(40, 60) as f64,
                    expertise,
                    rng.uniform(0.0, 1.0),
                    rng.uniform(0.0, 1.0),
                    rng.uniform(0.0, 1.0),
                    rng.uniform(0.2, 0.8),
                    rng.uniform(0.3, 1.0),
                    rng.uniform(0.3, 1.0),
                    rng.uniform(10.0, 100.0),
                    rng.chance(0.8),
                )
            }
        };

        Self {
            salary,
            happiness: rng.int_range(40, 60) as f64,
            expertise,
            values_social_services,
            values_economic_freedom,
            trust_in_government,
            import_goods_preference,
            import_price_sensitivity,
            inflation_sensitivity,
            savings,
            employed,
            // Initially-employed citizens hold jobs outside the modeled
            // rosters.
            employer: None,
            employment_matches_expertise: false,
        }
    }

    /// Weighted sum of policy-driven factors, smoothed 0.7 old + 0.3 new,
    /// then rolls savings forward.
    pub fn update_happiness(&mut self, m: &MacroState, rng: &mut RandomSource) {
        let economic_factor = if self.employed {
            (self.salary * (1.0 - m.tax_rate)).min(100.0)
        } else {
            (m.social_services_spending * 100.0).min(50.0)
        };

        let social_services_satisfaction =
            self.values_social_services * m.social_services_spending * 100.0;
        let economic_freedom_satisfaction =
            self.values_economic_freedom * (1.0 - m.tax_rate) * 100.0;
        let trust_factor = self.trust_in_government * 20.0;
        let import_price_impact = -self.import_goods_preference
            * self.import_price_sensitivity
            * m.import_duty_rate
            * 100.0;
        // Duty-driven manufacturing demand matters most to job seekers.
        let employment_opportunity_impact = if self.employed {
            m.local_manufacturing_boost * 5.0
        } else {
            m.local_manufacturing_boost * 20.0
        };
        let inflation_impact = -self.inflation_sensitivity * m.inflation * 200.0;
        let interest_impact = m.interest_rate * self.savings * 0.2;

        let new_happiness = 0.30 * economic_factor
            + 0.15 * social_services_satisfaction
            + 0.15 * economic_freedom_satisfaction
            + 0.08 * trust_factor
            + 0.08 * import_price_impact
            + 0.08 * employment_opportunity_impact
            + 0.08 * inflation_impact
            + 0.05 * interest_impact
            + 0.03 * rng.uniform(-10.0, 10.0);

        self.happiness = (0.7 * self.happiness + 0.3 * new_happiness).clamp(0.0, 100.0);

        if self.employed {
            let savings_change = self.salary * 0.1 + self.savings * m.interest_rate
                - self.savings * m.inflation;
            self.savings = (self.savings + savings_change).max(0.0);
        } else {
            self.savings = (self.savings * (1.0 - m.inflation - 0.05)).max(0.0);
        }
    }
}
