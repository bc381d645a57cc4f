use super::*;
use serde_json::json;

mod common {
    use super::*;

    pub(super) fn tagged_bool(value: i64) -> RawValue {
        RawValue::Number {
            value: RawNumber::Integer(value),
            boolean_tagged: true,
        }
    }

    pub(super) fn int(value: i64) -> RawValue {
        RawValue::Number {
            value: RawNumber::Integer(value),
            boolean_tagged: false,
        }
    }

    pub(super) fn text(s: &str) -> RawValue {
        RawValue::String(s.to_string())
    }
}

mod from_raw {
    use super::common::{int, tagged_bool, text};
    use super::*;

    #[test]
    fn test_boolean_tagged_numbers_become_bools() {
        assert_eq!(PropertyValue::from_raw(tagged_bool(1)), PropertyValue::Bool(true));
        assert_eq!(PropertyValue::from_raw(tagged_bool(0)), PropertyValue::Bool(false));
    }

    #[test]
    fn test_plain_numbers_stay_numbers() {
        assert_eq!(
            PropertyValue::from_raw(int(42)),
            PropertyValue::Number(42.into())
        );

        let float = RawValue::Number {
            value: RawNumber::Float(1.5),
            boolean_tagged: false,
        };
        assert_eq!(PropertyValue::from_raw(float).display_value(), "1.5");
    }

    #[test]
    fn test_non_finite_float_degrades_to_string() {
        let nan = RawValue::Number {
            value: RawNumber::Float(f64::NAN),
            boolean_tagged: false,
        };
        assert_eq!(
            PropertyValue::from_raw(nan),
            PropertyValue::String("NaN".to_string())
        );
    }

    #[test]
    fn test_dictionary_keys_sorted_and_last_duplicate_wins() {
        let raw = RawValue::Dictionary(vec![
            (text("b"), int(1)),
            (text("a"), int(2)),
            (text("b"), int(3)),
        ]);

        let PropertyValue::Mapping(mapping) = PropertyValue::from_raw(raw) else {
            panic!("expected mapping");
        };
        let keys: Vec<_> = mapping.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(mapping["b"], PropertyValue::Number(3.into()));
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        let raw = RawValue::Dictionary(vec![(int(7), text("seven")), (tagged_bool(1), text("yes"))]);

        let PropertyValue::Mapping(mapping) = PropertyValue::from_raw(raw) else {
            panic!("expected mapping");
        };
        assert!(mapping.contains_key("7"));
        assert!(mapping.contains_key("true"));
    }

    #[test]
    fn test_unsupported_values_degrade_to_strings() {
        let raw = RawValue::Array(vec![
            RawValue::Data(vec![0xDE, 0xAD]),
            RawValue::Date(UNIX_EPOCH + std::time::Duration::from_secs(60)),
            RawValue::Opaque("<SecTask 0x1>".to_string()),
        ]);

        assert_eq!(
            PropertyValue::from_raw(raw),
            PropertyValue::Sequence(vec![
                PropertyValue::String("<2 bytes>".to_string()),
                PropertyValue::String("@60".to_string()),
                PropertyValue::String("<SecTask 0x1>".to_string()),
            ])
        );
    }

    #[test]
    fn test_from_json_maps_one_to_one() {
        let value = PropertyValue::from(json!({
            "flag": true,
            "none": null,
            "list": [1, "two"],
        }));

        let expected = PropertyValue::Mapping(BTreeMap::from([
            ("flag".to_string(), PropertyValue::Bool(true)),
            ("none".to_string(), PropertyValue::Null),
            (
                "list".to_string(),
                PropertyValue::Sequence(vec![
                    PropertyValue::Number(1.into()),
                    PropertyValue::String("two".to_string()),
                ]),
            ),
        ]));
        assert_eq!(value, expected);
    }
}

mod display_value {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(PropertyValue::Null.display_value(), "null");
        assert_eq!(PropertyValue::Bool(true).display_value(), "true");
        assert_eq!(PropertyValue::Bool(false).display_value(), "false");
        assert_eq!(PropertyValue::Number((-3).into()).display_value(), "-3");
        assert_eq!(
            PropertyValue::String("group.a".to_string()).display_value(),
            "\"group.a\""
        );
    }

    #[test]
    fn test_containers_report_direct_item_count() {
        let mapping = PropertyValue::from(json!({"a": 1, "b": {"c": [1, 2]}}));
        let sequence = PropertyValue::from(json!([1, 2, 3]));

        assert_eq!(mapping.display_value(), "Dictionary (2 items)");
        assert_eq!(sequence.display_value(), "Array (3 items)");
    }
}

mod structure {
    use super::*;

    #[test]
    fn test_child_count() {
        assert_eq!(PropertyValue::Null.child_count(), 0);
        assert_eq!(PropertyValue::Bool(true).child_count(), 0);
        assert_eq!(PropertyValue::from(json!([])).child_count(), 0);
        assert_eq!(PropertyValue::from(json!({"a": [1, 2]})).child_count(), 1);
    }

    #[test]
    fn test_children_yield_segments_in_order() {
        let value = PropertyValue::from(json!({"b": 1, "a": [true, false]}));

        let segments: Vec<_> = value.children().map(|(segment, _)| segment).collect();
        assert_eq!(
            segments,
            vec![
                PathSegment::Key("a".to_string()),
                PathSegment::Key("b".to_string())
            ]
        );

        let array = value.child(&PathSegment::Key("a".to_string())).unwrap();
        let indices: Vec<_> = array.children().map(|(segment, _)| segment).collect();
        assert_eq!(indices, vec![PathSegment::Index(0), PathSegment::Index(1)]);
    }

    #[test]
    fn test_resolve_follows_mixed_segments() {
        let value = PropertyValue::from(json!({"foo": [0, 1, {"bar": "x"}]}));
        let segments = [
            PathSegment::Key("foo".to_string()),
            PathSegment::Index(2),
            PathSegment::Key("bar".to_string()),
        ];

        assert_eq!(
            value.resolve(&segments),
            Some(&PropertyValue::String("x".to_string()))
        );
        assert_eq!(value.resolve(&[PathSegment::Index(0)]), None);
    }
}
