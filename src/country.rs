use std::fmt;

use crate::business::Business;
use crate::citizen::Citizen;
use crate::rng::RandomSource;
use crate::scenario::{BusinessParams, CitizenParams, CountryConfig, DevelopmentTier, TierParams};

/// Country-level fields agents read during a pass. No sub-pass mutates
/// country state, so one copy per pass observes what live reads would.
#[derive(Debug, Clone, Copy)]
pub struct MacroState {
    pub economic_growth: f64,
    pub import_duty_rate: f64,
    pub external_influences: i32,
    pub money_supply: f64,
    pub interest_rate: f64,
    pub development_level: f64,
    pub inflation: f64,
    pub tax_rate: f64,
    pub social_services_spending: f64,
    pub local_manufacturing_boost: f64,
}

/// One simulated economy. Cross-agent links are indices into the owned
/// citizen and business vectors.
pub struct Country {
    pub id: u32,
    pub name: String,

    // Fixed traits.
    pub homogeneity: f64,
    pub development_level: f64,
    pub wealth_level: f64,

    // Policy levers.
    pub tax_rate: f64,
    pub interest_rate: f64,
    pub social_services_spending: f64,
    pub immigration_incentives: f64,
    pub import_duty_rate: f64,
    pub bonds_issued: f64,

    // Random-walks within [-100, 100].
    pub external_influences: i32,

    // Emergent state.
    pub inflation: f64,
    pub economic_growth: f64,
    pub money_supply: f64,
    pub money_velocity: f64,
    pub central_bank_policy: f64,
    pub government_spending: f64,
    pub tax_revenue: f64,
    pub import_duty_revenue: f64,
    pub total_revenue: f64,
    pub bond_interest_rate: f64,
    pub interest_payments: f64,
    pub citizen_happiness: f64,
    pub local_manufacturing_boost: f64,

    pub citizens: Vec<Citizen>,
    pub businesses: Vec<Business>,
}

impl Country {
    /// Absent config fields fall back to built-in uniform-random ranges.
    /// Out-of-range values are absorbed by the step-update clamps.
    pub fn new(config: Option<&CountryConfig>, rng: &mut RandomSource) -> Self {
        let id = config
            .and_then(|c| c.id)
            .unwrap_or_else(|| rng.int_range(1, 1000) as u32);
        let name = config
            .and_then(|c| c.name.clone())
            .unwrap_or_else(|| format!("Country {}", id));
        let homogeneity = config
            .and_then(|c| c.homogeneity)
            .unwrap_or_else(|| rng.uniform(0.0, 1.0));
        let development_level = config
            .and_then(|c| c.development_level)
            .unwrap_or_else(|| rng.uniform(0.3, 1.0));
        let wealth_level = config
            .and_then(|c| c.wealth_level)
            .unwrap_or_else(|| rng.uniform(0.2, 1.0));
        let tax_rate = config
            .and_then(|c| c.tax_rate)
            .unwrap_or_else(|| rng.uniform(0.1, 0.4));
        let interest_rate = config
            .and_then(|c| c.interest_rate)
            .unwrap_or_else(|| rng.uniform(0.01, 0.05));
        let social_services_spending = config
            .and_then(|c| c.social_services_spending)
            .unwrap_or_else(|| rng.uniform(0.2, 0.5));
        let immigration_incentives = config
            .and_then(|c| c.immigration_incentives)
            .unwrap_or_else(|| rng.uniform(0.0, 0.1));
        let import_duty_rate = config
            .and_then(|c| c.import_duty_rate)
            .unwrap_or_else(|| rng.uniform(0.05, 0.25));
        let external_influences = config
            .and_then(|c| c.external_influences)
            .unwrap_or_else(|| rng.int_range(-100, 100) as i32);

        Self {
            id,
            name,
            homogeneity,
            development_level,
            wealth_level,
            tax_rate,
            interest_rate,
            social_services_spending,
            immigration_incentives,
            import_duty_rate,
            bonds_issued: 0.0,
            external_influences,
            inflation: rng.uniform(0.01, 0.05),
            economic_growth: rng.uniform(0.01, 0.03),
            money_supply: rng.uniform(800.0, 1200.0) * wealth_level * development_level,
            money_velocity: rng.uniform(1.5, 2.5),
            central_bank_policy: rng.uniform(-0.1, 0.1),
            government_spending: 0.0,
            tax_revenue: 0.0,
            import_duty_revenue: 0.0,
            total_revenue: 0.0,
            bond_interest_rate: interest_rate + 0.01,
            interest_payments: 0.0,
            citizen_happiness: 0.0,
            local_manufacturing_boost: 0.0,
            citizens: Vec::new(),
            businesses: Vec::new(),
        }
    }

    pub fn populate(
        &mut self,
        num_citizens: usize,
        num_businesses: usize,
        citizen_params: &TierParams<CitizenParams>,
        business_params: &TierParams<BusinessParams>,
        rng: &mut RandomSource,
    ) {
        let tier = DevelopmentTier::from_level(self.development_level);
        let cp = citizen_params.get(tier);
        let bp = business_params.get(tier);
        self.citizens.reserve(num_citizens);
        for _ in 0..num_citizens {
            self.citizens.push(Citizen::generate(cp, rng));
        }
        self.businesses.reserve(num_businesses);
        for _ in 0..num_businesses {
            self.businesses.push(Business::generate(bp, rng));
        }
    }

    pub fn macro_state(&self) -> MacroState {
        MacroState {
            economic_growth: self.economic_growth,
            import_duty_rate: self.import_duty_rate,
            external_influences: self.external_influences,
            money_supply: self.money_supply,
            interest_rate: self.interest_rate,
            development_level: self.development_level,
            inflation: self.inflation,
            tax_rate: self.tax_rate,
            social_services_spending: self.social_services_spending,
            local_manufacturing_boost: self.local_manufacturing_boost,
        }
    }

    /// First pass of a step. Layoffs take effect immediately so later
    /// passes observe them.
    pub fn business_pass(&mut self, rng: &mut RandomSource) {
        let m = self.macro_state();
        for bi in 0..self.businesses.len() {
            let payroll: f64 = self.businesses[bi]
                .employees
                .iter()
                .map(|&ci| self.citizens[ci].salary)
                .sum();
            let laid_off = self.businesses[bi].update(&m, payroll, rng);
            for ci in laid_off {
                let citizen = &mut self.citizens[ci];
                citizen.employed = false;
                citizen.employer = None;
            }
        }
    }

    /// Second pass of a step. Hires earlier in the pass can fill a roster
    /// before later citizens apply.
    pub fn citizen_pass(&mut self, rng: &mut RandomSource) {
        let m = self.macro_state();
        for ci in 0..self.citizens.len() {
            self.seek_employment(ci, rng);
            self.citizens[ci].update_happiness(&m, rng);
        }
    }

    fn seek_employment(&mut self, ci: usize, rng: &mut RandomSource) {
        if self.citizens[ci].employed {
            return;
        }

        let mut candidates: Vec<usize> = (0..self.businesses.len())
            .filter(|&bi| self.businesses[bi].has_openings())
            .collect();
        if candidates.is_empty() {
            return;
        }

        // A manufacturing boom steers job seekers toward manufacturers
        // when any are hiring.
        if self.local_manufacturing_boost > 0.1 {
            let manufacturing: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&bi| self.businesses[bi].business_type.is_manufacturing())
                .collect();
            if !manufacturing.is_empty() {
                candidates = manufacturing;
            }
        }

        let bi = candidates[rng.pick_index(candidates.len()).unwrap()];
        let expertise = self.citizens[ci].expertise;
        if let Some(placement) = self.businesses[bi].hire(ci, expertise, rng) {
            let citizen = &mut self.citizens[ci];
            citizen.employed = true;
            citizen.employer = Some(bi);
            citizen.salary = placement.salary;
            citizen.employment_matches_expertise = placement.matches_expertise;
        }
    }

    /// Third pass of a step. The computations feed each other; the order
    /// must not change or runs stop being comparable across policy sweeps.
    pub fn update_external_factors(&mut self, rng: &mut RandomSource) {
        self.external_influences =
            (self.external_influences + rng.int_range(-10, 10) as i32).clamp(-100, 100);

        // Reserve 10% of last step's revenue; spend a slice of the bonds.
        self.government_spending = self.total_revenue * 0.9 + self.bonds_issued * 0.2;

        let money_supply_change = (0.03 - self.interest_rate) * 100.0
            + self.government_spending / 1000.0
            + self.central_bank_policy * self.money_supply * 0.1
            + self.economic_growth * self.money_supply * 0.5;
        // Bound order flips when money_supply is negative, which an
        // out-of-range config can produce.
        let lo = self.money_supply * 0.9;
        let hi = self.money_supply * 1.1;
        self.money_supply =
            (self.money_supply + money_supply_change).clamp(lo.min(hi), lo.max(hi));

        let policy_adjustment = (0.02 - self.inflation) * 0.1 + rng.uniform(-0.03, 0.03);
        self.central_bank_policy = (self.central_bank_policy + policy_adjustment).clamp(-0.2, 0.2);

        let interest_rate_change = self.central_bank_policy * -0.1
            + (self.inflation - 0.02) * 0.2
            + rng.uniform(-0.002, 0.002);
        self.interest_rate = (self.interest_rate + interest_rate_change).clamp(0.005, 0.12);

        // Quantity theory of money: MV = PQ, solved for the price shift.
        let theoretical_inflation = (self.money_supply * self.money_velocity)
            / (self.wealth_level * 1000.0 * (1.0 + self.economic_growth))
            - 1.0;
        let inflation_change = (theoretical_inflation - self.inflation) * 0.2
            + 0.005 * (self.social_services_spending - 0.3)
            + 0.01 * (self.interest_rate - 0.03)
            + 0.002 * (self.external_influences as f64 / 100.0)
            + 0.003 * self.import_duty_rate;
        self.inflation = (self.inflation + inflation_change).clamp(0.0, 0.2);

        self.local_manufacturing_boost = self.import_duty_rate * 2.0;

        let growth_change = 0.005 * (0.03 - self.interest_rate)
            + 0.002 * (self.external_influences as f64 / 100.0)
            + 0.003 * (0.3 - self.tax_rate)
            + 0.004 * self.local_manufacturing_boost
            - 0.006 * self.import_duty_rate
            + 0.003 * (self.money_supply / 1000.0 - 1.0)
            - 0.01 * (self.inflation - 0.03).max(0.0);
        self.economic_growth = (self.economic_growth + growth_change).clamp(-0.05, 0.1);

        self.tax_revenue = 0.0;
        self.import_duty_revenue = 0.0;
        for citizen in &self.citizens {
            if citizen.employed {
                self.tax_revenue += citizen.salary * self.tax_rate;
            }
        }
        for business in &self.businesses {
            self.tax_revenue += business.tax_payable;
            if business.business_type.is_import() {
                self.import_duty_revenue += business.revenue * self.import_duty_rate;
            }
        }
        self.total_revenue = self.tax_revenue + self.import_duty_revenue;

        self.bond_interest_rate = self.interest_rate + (self.inflation * 0.5).max(0.01);
        self.interest_payments = self.bonds_issued * self.bond_interest_rate;

        self.citizen_happiness = if self.citizens.is_empty() {
            // Sentinel midpoint for an empty population.
            50.0
        } else {
            self.citizens.iter().map(|c| c.happiness).sum::<f64>() / self.citizens.len() as f64
        };

        let velocity_change = self.economic_growth * 0.5
            + (self.interest_rate - 0.03) * 0.2
            + rng.uniform(-0.05, 0.05);
        self.money_velocity = (self.money_velocity + velocity_change).clamp(1.2, 3.0);
    }

    pub fn employed_count(&self) -> usize {
        self.citizens.iter().filter(|c| c.employed).count()
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Country {} ({}):", self.name, self.id)?;
        writeln!(f, "  Tax rate: {:.2}", self.tax_rate)?;
        writeln!(f, "  Import duty rate: {:.2}", self.import_duty_rate)?;
        writeln!(f, "  Interest rate: {:.3}", self.interest_rate)?;
        writeln!(f, "  Inflation: {:.3}", self.inflation)?;
        writeln!(f, "  Economic growth: {:.3}", self.economic_growth)?;
        writeln!(f, "  Tax revenue: {:.2}", self.tax_revenue)?;
        writeln!(f, "  Import duty revenue: {:.2}", self.import_duty_revenue)?;
        writeln!(f, "  Total government revenue: {:.2}", self.total_revenue)?;
        writeln!(
            f,
            "  Local manufacturing boost: {:.2}",
            self.local_manufacturing_boost
        )?;
        writeln!(f, "  Money supply: {:.2}", self.money_supply)?;
        writeln!(f, "  Money velocity: {:.2}", self.money_velocity)?;
        writeln!(f, "  Government spending: {:.2}", self.government_spending)?;
        writeln!(f, "  Central bank policy: {:.3}", self.central_bank_policy)?;
        writeln!(f, "  Citizen happiness: {:.2}", self.citizen_happiness)?;
        writeln!(
            f,
            "  Population: {} citizens, {} businesses ({} employed)",
            self.citizens.len(),
            self.businesses.len(),
            self.employed_count()
        )?;
        Ok(())
    }
}
