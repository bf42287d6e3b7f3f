use proptest::prelude::*;
use serde_json::json;

use signifier_core::config::ValidationConfig;
use signifier_core::models::EnvironmentSnapshot;
use signifier_core::traits::IConstraintValidator;
use signifier_validation::StructuralValidator;

proptest! {
    #[test]
    fn range_check_matches_arithmetic(value in -50.0f64..50.0, lo in -20.0f64..0.0, hi in 0.0f64..20.0) {
        let shapes = json!({ "shapes": [{ "target": "s", "properties": [
            { "path": "v", "minInclusive": lo, "maxInclusive": hi }
        ] }] });
        let snapshot = EnvironmentSnapshot::new().with_value("s", "v", value);
        let report = StructuralValidator::default().validate(&shapes, &snapshot).unwrap();
        prop_assert_eq!(report.conforms, lo <= value && value <= hi);
    }

    #[test]
    fn cached_and_uncached_reports_agree(value in -50.0f64..50.0) {
        let shapes = json!({ "shapes": [{ "target": "s", "properties": [
            { "path": "v", "minCount": 1, "maxExclusive": 0 }
        ] }] });
        let snapshot = EnvironmentSnapshot::new().with_value("s", "v", value);
        let cached = StructuralValidator::new(ValidationConfig { enable_caching: true, ..ValidationConfig::default() });
        let plain = StructuralValidator::default();
        let first = cached.validate(&shapes, &snapshot).unwrap();
        let second = cached.validate(&shapes, &snapshot).unwrap();
        let reference = plain.validate(&shapes, &snapshot).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &reference);
    }
}
