//! Property-based tests for version ordering and option matching

use corefile_schemas::{match_option, CoreDnsVersion, OptionDescriptor, OptionPattern, PluginSchema};
use proptest::prelude::*;

fn version_strategy() -> impl Strategy<Value = (u32, u32, u32)> {
    (0u32..5, 0u32..30, 0u32..30)
}

proptest! {
    #[test]
    fn prop_ordering_is_numeric(a in version_strategy(), b in version_strategy()) {
        let va = CoreDnsVersion::new(a.0, a.1, a.2);
        let vb = CoreDnsVersion::new(b.0, b.1, b.2);
        prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
    }

    #[test]
    fn prop_display_parses_back(v in version_strategy()) {
        let version = CoreDnsVersion::new(v.0, v.1, v.2);
        let parsed = CoreDnsVersion::parse(&version.to_string()).unwrap();
        prop_assert_eq!(parsed, version);
    }

    #[test]
    fn prop_junk_never_parses(s in "[a-z]{1,10}") {
        prop_assert!(CoreDnsVersion::parse(&s).is_err());
    }

    #[test]
    fn prop_pattern_requires_whole_name(prefix in "[a-z]{1,5}", digits in "[0-9]{1,4}") {
        let schema = PluginSchema::new()
            .pattern(OptionPattern::new("[0-9]+").unwrap(), OptionDescriptor::current());

        prop_assert!(match_option(&digits, &schema).is_some());
        let prefixed = format!("{prefix}{digits}");
        prop_assert!(match_option(&prefixed, &schema).is_none());
    }
}
