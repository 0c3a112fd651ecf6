#[cfg(test)]
mod tests {
    use super::super::scenario::*;

    #[test]
    fn test_development_tier_thresholds() {
        assert_eq!(DevelopmentTier::from_level(0.9), DevelopmentTier::High);
        assert_eq!(DevelopmentTier::from_level(0.71), DevelopmentTier::High);
        // Exactly 0.7 is not "above 0.7".
        assert_eq!(DevelopmentTier::from_level(0.7), DevelopmentTier::Medium);
        assert_eq!(DevelopmentTier::from_level(0.41), DevelopmentTier::Medium);
        assert_eq!(DevelopmentTier::from_level(0.4), DevelopmentTier::Low);
        assert_eq!(DevelopmentTier::from_level(0.0), DevelopmentTier::Low);
    }

    #[test]
    fn test_tier_params_lookup() {
        let params = default_citizen_params();
        assert!(params.get(DevelopmentTier::High).is_some());
        assert!(params.get(DevelopmentTier::Low).is_some());
        // Medium-tier countries fall back to built-in default ranges.
        assert!(params.get(DevelopmentTier::Medium).is_none());

        let high = params.get(DevelopmentTier::High).unwrap();
        assert_eq!(high.salary, (60.0, 120.0));
        assert_eq!(high.initial_employment_rate, 0.95);
    }

    #[test]
    fn test_default_business_params() {
        let params = default_business_params();
        let low = params.get(DevelopmentTier::Low).unwrap();
        // Low-tier economies generate no AI businesses.
        assert_eq!(low.type_weights[5], 0.0);
        assert!(low.type_weights.iter().sum::<f64>() > 0.0);
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Scenario::default();
        assert_eq!(scenario.countries.len(), 1);
        assert_eq!(scenario.citizens_per_country, 100);
        assert_eq!(scenario.businesses_per_country, 10);
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_scenario_validation() {
        let mut scenario = Scenario::default();
        scenario.countries.clear();
        assert!(scenario.validate().is_err());

        let mut scenario = Scenario::default();
        scenario.steps = 0;
        assert!(scenario.validate().is_err());

        let mut scenario = Scenario::default();
        if let Some(ref mut p) = scenario.citizen_params.high {
            p.expertise_weights = [0.0; 4];
        }
        assert!(scenario.validate().is_err());

        let mut scenario = Scenario::default();
        if let Some(ref mut p) = scenario.business_params.low {
            p.type_weights = [0.0; 6];
        }
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_scenario_serialization_round_trip() {
        let scenario = Scenario::developed_and_developing();

        let json = serde_json::to_string_pretty(&scenario).unwrap();
        let deserialized: Scenario = serde_json::from_str(&json).unwrap();

        assert_eq!(scenario.name, deserialized.name);
        assert_eq!(scenario.countries.len(), deserialized.countries.len());
        assert_eq!(
            scenario.countries[1].tax_rate,
            deserialized.countries[1].tax_rate
        );
        assert!(deserialized.citizen_params.medium.is_none());
    }

    #[test]
    fn test_country_config_partial_record() {
        // Absent fields deserialize as None and fall back to random
        // defaults at construction time.
        let json = r#"{ "name": "Sparse Country", "tax_rate": 0.25 }"#;
        let config: CountryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.name.as_deref(), Some("Sparse Country"));
        assert_eq!(config.tax_rate, Some(0.25));
        assert!(config.development_level.is_none());
        assert!(config.external_influences.is_none());
    }

    #[test]
    fn test_standard_scenarios() {
        let scenarios = create_standard_scenarios();
        assert!(scenarios.contains_key("default"));
        assert!(scenarios.contains_key("two_economies"));
        assert!(scenarios.contains_key("protectionist"));

        for scenario in scenarios.values() {
            assert!(scenario.validate().is_ok(), "scenario {}", scenario.name);
        }

        let protectionist = &scenarios["protectionist"];
        assert_eq!(protectionist.countries[0].import_duty_rate, Some(0.3));
    }

    #[test]
    fn test_scenario_display() {
        let scenario = Scenario::developed_and_developing();
        let display = format!("{}", scenario);

        assert!(display.contains("Scenario: developed_and_developing"));
        assert!(display.contains("Developed Country"));
        assert!(display.contains("Developing Country"));
    }
}
