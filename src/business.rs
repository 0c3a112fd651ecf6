use serde::{Deserialize, Serialize};

use crate::citizen::Expertise;
use crate::country::MacroState;
use crate::rng::RandomSource;
use crate::scenario::BusinessParams;

/// Fixed at creation; drives the revenue sensitivities in `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    ManufacturingLocalConsumers,
    ManufacturingLocalBusinesses,
    ManufacturingExport,
    ImportCitizensConsumers,
    ImportBusinessCustomers,
    Ai,
}

impl BusinessType {
    pub const ALL: [BusinessType; 6] = [
        BusinessType::ManufacturingLocalConsumers,
        BusinessType::ManufacturingLocalBusinesses,
        BusinessType::ManufacturingExport,
        BusinessType::ImportCitizensConsumers,
        BusinessType::ImportBusinessCustomers,
        BusinessType::Ai,
    ];

    pub fn is_manufacturing(&self) -> bool {
        matches!(
            self,
            BusinessType::ManufacturingLocalConsumers
                | BusinessType::ManufacturingLocalBusinesses
                | BusinessType::ManufacturingExport
        )
    }

    pub fn is_import(&self) -> bool {
        matches!(
            self,
            BusinessType::ImportCitizensConsumers | BusinessType::ImportBusinessCustomers
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::ManufacturingLocalConsumers => "manufacturing_local_consumers",
            BusinessType::ManufacturingLocalBusinesses => "manufacturing_local_businesses",
            BusinessType::ManufacturingExport => "manufacturing_export",
            BusinessType::ImportCitizensConsumers => "import_citizens_consumers",
            BusinessType::ImportBusinessCustomers => "import_business_customers",
            BusinessType::Ai => "ai",
        }
    }
}

/// Derived from expertise, determines the salary band on hire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollarTier {
    Blue,
    White,
    Expert,
}

impl CollarTier {
    pub fn for_expertise(expertise: Expertise) -> Self {
        match expertise {
            Expertise::Expert => CollarTier::Expert,
            Expertise::High => CollarTier::White,
            Expertise::Medium | Expertise::Low => CollarTier::Blue,
        }
    }
}

/// Outcome of a successful hire.
#[derive(Debug, Clone, Copy)]
pub struct HirePlacement {
    pub salary: f64,
    pub matches_expertise: bool,
}

/// Employees are indices into the owning country's citizen list.
#[derive(Debug, Clone)]
pub struct Business {
    pub business_type: BusinessType,
    pub automation_level: f64,
    pub size_factor: f64,
    pub investment_rate: f64,
    pub interest_rate_sensitivity: f64,
    pub blue_collar_employees: usize,
    pub white_collar_employees: usize,
    pub expert_employees: usize,
    pub revenue: f64,
    pub costs: f64,
    pub profit: f64,
    pub tax_payable: f64,
    pub import_duty_payable: f64,
    pub borrowing: f64,
    pub employees: Vec<usize>,
    pub max_employees: usize,
}

impl Business {
    pub fn generate(params: Option<&BusinessParams>, rng: &mut RandomSource) -> Self {
        let (business_type, automation_level, size_factor, investment_rate, sensitivity) =
            match params {
                Some(p) => {
                    let business_type = rng
                        .weighted_index(&p.type_weights)
                        .map(|i| BusinessType::ALL[i])
                        .unwrap_or(BusinessType::ManufacturingLocalConsumers);
                    (
                        business_type,
                        rng.uniform(p.automation_level.0, p.automation_level.1),
                        rng.uniform(p.size_factor.0, p.size_factor.1),
                        rng.uniform(p.investment_rate.0, p.investment_rate.1),
                        rng.uniform(p.interest_rate_sensitivity.0, p.interest_rate_sensitivity.1),
                    )
                }
                None => (
                    BusinessType::ALL[rng.pick_index(BusinessType::ALL.len()).unwrap()],
                    rng.uniform(0.1, 0.9),
                    rng.uniform(0.5, 2.0),
                    rng.uniform(0.1, 0.4),
                    rng.uniform(0.5, 1.5),
                ),
            };

        // AI businesses run lean rosters.
        let base_headcount = if business_type == BusinessType::Ai {
            2.0
        } else {
            10.0
        };
        let max_employees = ((base_headcount * size_factor) as usize).max(1);

        Self {
            business_type,
            automation_level,
            size_factor,
            investment_rate,
            interest_rate_sensitivity: sensitivity,
            blue_collar_employees: 0,
            white_collar_employees: 0,
            expert_employees: 0,
            revenue: 0.0,
            costs: 0.0,
            profit: 0.0,
            tax_payable: 0.0,
            import_duty_payable: 0.0,
            borrowing: 0.0,
            employees: Vec::new(),
            max_employees,
        }
    }

    pub fn has_openings(&self) -> bool {
        self.employees.len() < self.max_employees
    }

    /// Returns `None` without mutation when the roster is full, a normal
    /// outcome rather than an error.
    pub fn hire(
        &mut self,
        citizen_index: usize,
        expertise: Expertise,
        rng: &mut RandomSource,
    ) -> Option<HirePlacement> {
        if !self.has_openings() {
            return None;
        }
        self.employees.push(citizen_index);

        let tier = CollarTier::for_expertise(expertise);
        let salary = match tier {
            CollarTier::Expert => {
                self.expert_employees += 1;
                rng.int_range(80, 100) as f64
            }
            CollarTier::White => {
                self.white_collar_employees += 1;
                rng.int_range(60, 80) as f64
            }
            CollarTier::Blue => {
                self.blue_collar_employees += 1;
                rng.int_range(40, 60) as f64
            }
        };

        let staffed = match tier {
            CollarTier::Expert => self.expert_employees,
            CollarTier::White => self.white_collar_employees,
            CollarTier::Blue => self.blue_collar_employees,
        };

        Some(HirePlacement {
            salary,
            matches_expertise: staffed > 0,
        })
    }

    /// Recompute this step's financials and capacity. Returns the citizen
    /// indices laid off; the caller clears their employment links.
    pub fn update(&mut self, m: &MacroState, payroll: f64, rng: &mut RandomSource) -> Vec<usize> {
        let mut base_revenue_factor = 1.0;
        if self.business_type.is_manufacturing() {
            base_revenue_factor += m.economic_growth * 2.0;
            // Import duties redirect demand toward local manufacturers.
            base_revenue_factor += m.local_manufacturing_boost;
            if self.business_type == BusinessType::ManufacturingExport {
                base_revenue_factor += m.external_influences as f64 / 200.0;
            }
        } else if self.business_type.is_import() {
            base_revenue_factor += m.economic_growth;
            base_revenue_factor -= m.import_duty_rate * 2.0;
            base_revenue_factor -= m.external_influences as f64 / 300.0;
        } else {
            base_revenue_factor += m.economic_growth * 3.0;
            base_revenue_factor += m.development_level * 0.5;
        }

        base_revenue_factor += (m.money_supply / 1000.0) * 0.2;
        base_revenue_factor += (0.05 - m.interest_rate) * self.interest_rate_sensitivity;

        let employee_factor = self.employees.len() as f64 / self.max_employees.max(1) as f64;
        self.revenue = 100.0 * self.size_factor * base_revenue_factor * (0.5 + 0.5 * employee_factor);

        let operating_costs = 20.0 * self.size_factor * (1.0 - 0.5 * self.automation_level);
        let interest_costs = self.borrowing * m.interest_rate;
        let import_duty_costs = if self.business_type.is_import() {
            self.revenue * m.import_duty_rate
        } else {
            0.0
        };
        self.import_duty_payable = import_duty_costs;
        let inflation_cost_increase = operating_costs * m.inflation * 2.0;

        self.costs =
            payroll + operating_costs + import_duty_costs + interest_costs + inflation_cost_increase;
        self.profit = self.revenue - self.costs;
        self.tax_payable = if self.profit > 0.0 {
            self.profit * m.tax_rate
        } else {
            0.0
        };

        // Cheap credit funds expansion; otherwise debt decays toward zero.
        if m.interest_rate < 0.04 && self.profit > 0.0 {
            self.borrowing += self.revenue * 0.1 * (1.0 - m.interest_rate * 10.0);
        } else {
            self.borrowing = (self.borrowing * 0.95).max(0.0);
        }

        let mut size_change_factor = 0.0;
        if self.profit > 50.0 * self.size_factor
            && self.employees.len() as f64 >= self.max_employees as f64 * 0.9
        {
            size_change_factor = 0.1;
        } else if self.profit < -20.0 * self.size_factor {
            size_change_factor = -0.1;
        }
        size_change_factor += (0.05 - m.interest_rate) * self.interest_rate_sensitivity * 0.5;

        if size_change_factor > 0.0 {
            self.max_employees =
                ((self.max_employees as f64 * (1.0 + size_change_factor)) as usize).min(100);
        } else if size_change_factor < 0.0 {
            self.max_employees =
                ((self.max_employees as f64 * (1.0 + size_change_factor)) as usize).max(1);
        }

        let mut laid_off = Vec::new();
        while self.employees.len() > self.max_employees {
            let slot = rng.pick_index(self.employees.len()).unwrap();
            let citizen = self.employees.remove(slot);
            laid_off.push(citizen);
        }
        laid_off
    }
}
