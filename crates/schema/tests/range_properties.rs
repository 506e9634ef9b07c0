use pathconf_schema::{Expect, Schema};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn prop_int_range_accepts_exactly_the_bounds(min in -1000i64..1000, span in 0i64..500, n in -2000i64..2000) {
        let max = min + span;
        let schema = Expect::int().min(min as f64).max(max as f64);
        let result = schema.validate("n", Some(&json!(n)));

        prop_assert_eq!(result.is_ok(), (min..=max).contains(&n));
    }

    #[test]
    fn prop_string_length_counts_chars(s in "\\PC{0,20}", max in 0usize..20) {
        let schema = Expect::string().max(max as f64);
        let result = schema.validate("s", Some(&json!(s)));

        prop_assert_eq!(result.is_ok(), s.chars().count() <= max);
    }

    #[test]
    fn prop_list_items_report_each_failure(items in prop::collection::vec(any::<bool>(), 0..8)) {
        let values: Vec<_> = items
            .iter()
            .map(|&numeric| if numeric { json!(1) } else { json!("x") })
            .collect();
        let schema = Expect::list_of(Expect::int());

        let failures = items.iter().filter(|&&numeric| !numeric).count();
        match schema.validate("list", Some(&json!(values))) {
            Ok(normalized) => {
                prop_assert_eq!(failures, 0);
                prop_assert_eq!(normalized.value, json!(values));
            }
            Err(messages) => prop_assert_eq!(messages.len(), failures),
        }
    }
}
