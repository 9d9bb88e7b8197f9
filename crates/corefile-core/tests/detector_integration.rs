//! Default Corefile detection and rendering

mod test_support;

use corefile_core::{is_default, valid_versions, DefaultDetector};
use test_support::with_line_after;

const DEFAULT_1_3: &str = ".:53 {
    errors
    health
    kubernetes cluster.local in-addr.arpa ip6.arpa {
        pods insecure
        upstream
        fallthrough in-addr.arpa ip6.arpa
        ttl 30
    }
    prometheus :9153
    forward . /etc/resolv.conf
    cache 30
    loop
    reload
    loadbalance
}
";

const DEFAULT_1_6_2: &str = ".:53 {
    errors
    health
    ready
    kubernetes cluster.local in-addr.arpa ip6.arpa {
        pods insecure
        fallthrough in-addr.arpa ip6.arpa
        ttl 30
    }
    prometheus :9153
    forward . /etc/resolv.conf
    cache 30
    loop
    reload
    loadbalance
}
";

#[test]
fn test_known_defaults() {
    assert!(is_default("", DEFAULT_1_3));
    assert!(is_default("", &DEFAULT_1_3.replace("cluster.local", "myzone.org")));
    assert!(is_default("", DEFAULT_1_6_2));
    assert!(is_default("1.16", DEFAULT_1_6_2));
    assert!(!is_default("", test_support::READY_ERA));
}

#[test]
fn test_customized_configs_are_not_defaults() {
    let rewritten = with_line_after(
        DEFAULT_1_3,
        "    health",
        "    rewrite name suffix myzone.org cluster.local",
    );
    assert!(!is_default("", &rewritten));

    let stub = format!("{}stubzone.org:53 {{\n    forward . 1.2.3.4\n}}\n", DEFAULT_1_3);
    assert!(!is_default("", &stub));

    assert!(!is_default("", &DEFAULT_1_3.replace("        ttl 30\n", "")));
}

#[test]
fn test_wrong_kubernetes_release() {
    assert!(!is_default("1.11", DEFAULT_1_6_2));
    assert!(!is_default("0.9", DEFAULT_1_6_2));
}

#[test]
fn test_every_rendered_default_is_detected() {
    let detector = DefaultDetector::builtin();

    for version in valid_versions() {
        let text = detector
            .render_default(&version, "cluster.local", "/etc/resolv.conf")
            .unwrap();
        assert!(detector.is_default("", &text), "default of {} not detected", version);

        let customized = with_line_after(&text, "    errors", "    rewrite name suffix a.example b.example");
        assert_ne!(customized, text, "{} default has no errors plugin", version);
        assert!(!detector.is_default("", &customized), "{} with rewrite detected", version);
    }
}
