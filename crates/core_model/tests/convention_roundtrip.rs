//! Round-trip properties of the path/identifier convention
//!
//! For any well-formed spec file path, deriving the identifier and mapping
//! it back must land on the path of the spec's fixture-unit counterpart.

use std::path::PathBuf;

use core_model::{Convention, FixtureId};
use proptest::prelude::*;

/// Strategy for well-formed snake_case path segments
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}(_[a-z][a-z0-9]{0,6}){0,2}".prop_map(|s| s.to_string())
}

/// Strategy for spec-relative directory/file segment lists
fn segments_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment_strategy(), 1..4)
}

proptest! {
    #[test]
    fn test_identifier_round_trips_to_unit_path(segments in segments_strategy()) {
        let convention = Convention::default();
        let spec_path: PathBuf = {
            let mut path = convention.spec_root().to_path_buf();
            let (file, dirs) = segments.split_last().unwrap();
            for dir in dirs {
                path.push(dir);
            }
            path.push(format!("{file}_spec.rs"));
            path
        };

        let identifier = convention.path_to_identifier(&spec_path).unwrap();
        prop_assert_eq!(
            convention.identifier_to_path(&identifier),
            convention.unit_path_for_spec(&spec_path)
        );
    }

    #[test]
    fn test_derived_identifiers_are_always_rooted(segments in segments_strategy()) {
        let convention = Convention::default();
        let mut path = convention.spec_root().to_path_buf();
        let (file, dirs) = segments.split_last().unwrap();
        for dir in dirs {
            path.push(dir);
        }
        path.push(format!("{file}_spec.rs"));

        let identifier = convention.path_to_identifier(&path).unwrap();
        prop_assert!(identifier.is_rooted());
    }

    #[test]
    fn test_identifier_parse_accepts_derived_form(segments in segments_strategy()) {
        let convention = Convention::default();
        let mut path = convention.spec_root().to_path_buf();
        let (file, dirs) = segments.split_last().unwrap();
        for dir in dirs {
            path.push(dir);
        }
        path.push(format!("{file}_spec.rs"));

        let identifier = convention.path_to_identifier(&path).unwrap();
        prop_assert_eq!(
            FixtureId::parse(identifier.as_str()).unwrap(),
            identifier
        );
    }
}
