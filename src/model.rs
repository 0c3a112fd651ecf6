//! A step is three sequential passes (businesses, citizens, countries),
//! each in population order. Later agents in a pass observe mutations made
//! earlier in the same pass, so nothing here may be reordered. Whole model
//! instances are independent and can run on separate threads.

use log::{debug, info};

use crate::country::Country;
use crate::metrics::{MetricsStore, RunSummary};
use crate::rng::RandomSource;
use crate::scenario::Scenario;

pub struct EconomicModel {
    pub countries: Vec<Country>,
    pub metrics: MetricsStore,
    pub tick: usize,
    rng: RandomSource,
}

impl EconomicModel {
    /// All randomness draws from one source seeded by
    /// `scenario.random_seed`, so a fixed seed reproduces the run bit for
    /// bit.
    pub fn new(scenario: &Scenario) -> Self {
        let mut rng = match scenario.random_seed {
            Some(seed) => RandomSource::seeded(seed),
            None => RandomSource::from_entropy(),
        };

        let mut countries = Vec::with_capacity(scenario.countries.len());
        for config in &scenario.countries {
            let mut country = Country::new(Some(config), &mut rng);
            country.populate(
                scenario.citizens_per_country,
                scenario.businesses_per_country,
                &scenario.citizen_params,
                &scenario.business_params,
                &mut rng,
            );
            countries.push(country);
        }

        info!(
            "initialized {} countries with {} citizens and {} businesses each",
            countries.len(),
            scenario.citizens_per_country,
            scenario.businesses_per_country
        );

        let metrics = MetricsStore::new(countries.iter().map(|c| c.name.clone()).collect());

        Self {
            countries,
            metrics,
            tick: 0,
            rng,
        }
    }

    /// Advance by exactly one tick, appending to the metrics store.
    pub fn step(&mut self) {
        for country in &mut self.countries {
            country.business_pass(&mut self.rng);
        }
        for country in &mut self.countries {
            country.citizen_pass(&mut self.rng);
        }
        for (i, country) in self.countries.iter_mut().enumerate() {
            country.update_external_factors(&mut self.rng);
            self.metrics.record(i, country);
        }
        self.tick += 1;
        debug!("completed step {}", self.tick);
    }

    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    pub fn summary(&self, window: usize) -> RunSummary {
        RunSummary::from_store(&self.metrics, window)
    }
}
