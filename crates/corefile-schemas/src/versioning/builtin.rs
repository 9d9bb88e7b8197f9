//! Built-in CoreDNS release table
//!
//! Each entry lists only the schema revisions that change relative to the
//! previous release; `None` drops a plugin from the recognized set.
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use super::manifest::{PluginTemplate, PostProcess, Release, VersionManifest};
use super::version::CoreDnsVersion;
use std::collections::BTreeMap;

struct ReleaseEntry {
    version: CoreDnsVersion,
    k8s: &'static [&'static str],
    digest: Option<&'static str>,
    template: &'static str,
    revisions: &'static [(&'static str, Option<&'static str>)],
    post_process: &'static [PostProcess],
}

const fn entry(
    version: CoreDnsVersion,
    template: &'static str,
    revisions: &'static [(&'static str, Option<&'static str>)],
) -> ReleaseEntry {
    ReleaseEntry {
        version,
        k8s: &[],
        digest: None,
        template,
        revisions,
        post_process: &[],
    }
}

impl ReleaseEntry {
    const fn k8s(mut self, k8s: &'static [&'static str]) -> Self {
        self.k8s = k8s;
        self
    }

    const fn digest(mut self, digest: &'static str) -> Self {
        self.digest = Some(digest);
        self
    }

    const fn post_process(mut self, post_process: &'static [PostProcess]) -> Self {
        self.post_process = post_process;
        self
    }
}

const DEFAULT_PROXY: &str = ".:53 {
    errors
    health
    kubernetes * *** {
        pods insecure
        upstream
        fallthrough in-addr.arpa ip6.arpa
    }
    prometheus :9153
    proxy . *
    cache 30
    reload
    loadbalance
}
";

const DEFAULT_PROXY_LOOP: &str = ".:53 {
    errors
    health
    kubernetes * *** {
        pods insecure
        upstream
        fallthrough in-addr.arpa ip6.arpa
    }
    prometheus :9153
    proxy . *
    cache 30
    loop
    reload
    loadbalance
}
";

const DEFAULT_FORWARD: &str = ".:53 {
    errors
    health
    kubernetes * *** {
        pods insecure
        upstream
        fallthrough in-addr.arpa ip6.arpa
        ttl 30
    }
    prometheus :9153
    forward . *
    cache 30
    loop
    reload
    loadbalance
}
";

const DEFAULT_READY: &str = ".:53 {
    errors
    health
    ready
    kubernetes * *** {
        pods insecure
        fallthrough in-addr.arpa ip6.arpa
        ttl 30
    }
    prometheus :9153
    forward . *
    cache 30
    loop
    reload
    loadbalance
}
";

const DEFAULT_LAMEDUCK: &str = ".:53 {
    errors
    health {
        lameduck 5s
    }
    ready
    kubernetes * *** {
        pods insecure
        fallthrough in-addr.arpa ip6.arpa
        ttl 30
    }
    prometheus :9153
    forward . *
    cache 30
    loop
    reload
    loadbalance
}
";

const SPLIT: &[PostProcess] = &[PostProcess::SplitStubForwards];

const RELEASES: &[ReleaseEntry] = &[
    entry(
        CoreDnsVersion::new(1, 1, 3),
        DEFAULT_PROXY,
        &[
            ("errors", Some("v1")),
            ("health", Some("v1")),
            ("kubernetes", Some("v1")),
            ("proxy", Some("v1")),
            ("forward", Some("v1")),
            ("cache", Some("v1")),
            ("loop", Some("v1")),
            ("log", Some("v1")),
            ("hosts", Some("v1")),
            ("rewrite", Some("v1")),
            ("autopath", Some("v1")),
            ("federation", Some("v1")),
            ("prometheus", Some("v1")),
            ("reload", Some("v1")),
            ("loadbalance", Some("v1")),
        ],
    )
    .k8s(&["1.11"])
    .digest("db2bf53126ed1c761d5a41f24a1b82a461c85f736ff6e90542e9522be4757848"),
    entry(CoreDnsVersion::new(1, 1, 4), DEFAULT_PROXY, &[]),
    entry(
        CoreDnsVersion::new(1, 2, 0),
        DEFAULT_PROXY,
        &[("kubernetes", Some("v2")), ("proxy", Some("v2"))],
    ),
    entry(CoreDnsVersion::new(1, 2, 1), DEFAULT_PROXY_LOOP, &[("loop", Some("v1 add"))]),
    entry(CoreDnsVersion::new(1, 2, 2), DEFAULT_PROXY_LOOP, &[("loop", Some("v1"))])
        .k8s(&["1.12"])
        .digest("3e2be1cec87aca0b74b7668bbe8c02964a95a402e45ceb51b2252629d608d03a"),
    entry(CoreDnsVersion::new(1, 2, 3), DEFAULT_PROXY_LOOP, &[]),
    entry(CoreDnsVersion::new(1, 2, 4), DEFAULT_PROXY_LOOP, &[]),
    entry(CoreDnsVersion::new(1, 2, 5), DEFAULT_PROXY_LOOP, &[]),
    entry(CoreDnsVersion::new(1, 2, 6), DEFAULT_PROXY_LOOP, &[])
        .k8s(&["1.13"])
        .digest("81936728011c0df9404cb70b95c17bbc8af922ec9a70d0561a5d01fefa6ffa51"),
    entry(
        CoreDnsVersion::new(1, 3, 0),
        DEFAULT_FORWARD,
        &[("kubernetes", Some("v3")), ("errors", Some("v2"))],
    ),
    entry(CoreDnsVersion::new(1, 3, 1), DEFAULT_FORWARD, &[])
        .k8s(&["1.14", "1.15"])
        .digest("02382353821b12c21b062c59184e227e001079bb13ebd01f9d3270ba0fcbf1e4"),
    entry(
        CoreDnsVersion::new(1, 4, 0),
        DEFAULT_FORWARD,
        &[("kubernetes", Some("v4")), ("proxy", Some("deprecation"))],
    )
    .digest("70a92e9f6fc604f9b629ca331b6135287244a86612f550941193ec7e12759417")
    .post_process(SPLIT),
    entry(
        CoreDnsVersion::new(1, 5, 0),
        DEFAULT_READY,
        &[
            ("kubernetes", Some("v5")),
            ("proxy", Some("removal")),
            ("ready", Some("v1 add")),
            ("k8s_external", Some("v1")),
        ],
    )
    .digest("e83beb5e43f8513fa735e77ffc5859640baea30a882a11cc75c4c3244a737d3c")
    .post_process(SPLIT),
    entry(
        CoreDnsVersion::new(1, 5, 1),
        DEFAULT_READY,
        &[("ready", Some("v1")), ("proxy", None)],
    ),
    entry(CoreDnsVersion::new(1, 5, 2), DEFAULT_READY, &[("kubernetes", Some("v6"))]),
    entry(
        CoreDnsVersion::new(1, 6, 0),
        DEFAULT_READY,
        &[
            ("kubernetes", Some("v7")),
            ("cache", Some("v2")),
            ("forward", Some("v2")),
        ],
    ),
    entry(CoreDnsVersion::new(1, 6, 1), DEFAULT_READY, &[]),
    entry(CoreDnsVersion::new(1, 6, 2), DEFAULT_READY, &[])
        .k8s(&["1.16"])
        .digest("12eb885b8685b1b13a04ecf5c23bc809c2e57917252fd7b0be9e9c00644e8ee5"),
    entry(CoreDnsVersion::new(1, 6, 3), DEFAULT_READY, &[]),
    entry(CoreDnsVersion::new(1, 6, 4), DEFAULT_READY, &[]),
    entry(
        CoreDnsVersion::new(1, 6, 5),
        DEFAULT_LAMEDUCK,
        &[("health", Some("v1 add lameduck"))],
    )
    .k8s(&["1.17"])
    .digest("7ec975f167d815311a7136c32e70735f0d00b73781365df1befd46ed35bd4fe7"),
    entry(CoreDnsVersion::new(1, 6, 6), DEFAULT_LAMEDUCK, &[("health", Some("v1"))])
        .digest("41bee6992c2ed0f4628fcef75751048927bcd6b1cee89c79f6acb63ca5474d5a"),
    entry(CoreDnsVersion::new(1, 6, 7), DEFAULT_LAMEDUCK, &[])
        .k8s(&["1.18"])
        .digest("2c8d61c46f484d881db43b34d13ca47a269336e576c81cf007ca740fa9ec0800"),
    entry(CoreDnsVersion::new(1, 6, 9), DEFAULT_LAMEDUCK, &[])
        .digest("40ee1b708e20e3a6b8e04ccd8b6b3dd8fd25343eab27c37154946f232649ae21"),
    entry(
        CoreDnsVersion::new(1, 7, 0),
        DEFAULT_LAMEDUCK,
        &[("kubernetes", Some("v8")), ("federation", Some("removal"))],
    )
    .k8s(&["1.19", "1.20"])
    .digest("73ca82b4ce829766d4f1f10947c3a338888f876fbed0540dc849c89ff256e90c"),
    entry(CoreDnsVersion::new(1, 7, 1), DEFAULT_LAMEDUCK, &[("federation", None)])
        .digest("4a6e0769130686518325b21b0c1d0688b54e7c79244d48e1b15634e98e40c6ef"),
    entry(
        CoreDnsVersion::new(1, 8, 0),
        DEFAULT_LAMEDUCK,
        &[("kubernetes", Some("v9")), ("transfer", Some("v1 promoted"))],
    )
    .k8s(&["1.21"])
    .digest("cc8fb77bc2a0541949d1d9320a641b82fd392b0d3d8145469ca4709ae769980e"),
    entry(CoreDnsVersion::new(1, 8, 3), DEFAULT_LAMEDUCK, &[("transfer", Some("v1"))])
        .digest("642ff9910da6ea9a8624b0234eef52af9ca75ecbec474c5507cb096bdfbae4e5"),
    entry(CoreDnsVersion::new(1, 8, 4), DEFAULT_LAMEDUCK, &[])
        .k8s(&["1.22"])
        .digest("6e5a02c21641597998b4be7cb5eb1e7b02c0d8d23cce4dd09f4682d463798890"),
];

/// Fold the delta table into fully populated releases
fn builtin_releases() -> Vec<Release> {
    let mut plugins: BTreeMap<String, String> = BTreeMap::new();
    let mut releases = Vec::with_capacity(RELEASES.len());

    for entry in RELEASES {
        for (plugin, revision) in entry.revisions {
            match revision {
                Some(revision) => {
                    plugins.insert(plugin.to_string(), revision.to_string());
                }
                None => {
                    plugins.remove(*plugin);
                }
            }
        }

        releases.push(Release {
            version: entry.version,
            k8s_releases: entry.k8s.iter().map(|k| k.to_string()).collect(),
            image_digest: entry.digest.map(str::to_string),
            default_corefile: entry.template.to_string(),
            plugins: plugins.clone(),
            post_process: entry.post_process.to_vec(),
        });
    }

    releases
}

/// The built-in manifest
///
/// The table is ascending by construction; `Catalog::validate` re-checks it
/// in tests.
pub fn builtin_manifest() -> VersionManifest {
    VersionManifest::from_parts(
        builtin_releases(),
        "kubernetes",
        vec![
            PluginTemplate::new("loop", &[]),
            PluginTemplate::new("errors", &[]),
            PluginTemplate::new("cache", &["30"]),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_count_and_bounds() {
        let manifest = builtin_manifest();
        let versions = manifest.versions();
        assert_eq!(versions.len(), 29);
        assert_eq!(versions.first().map(String::as_str), Some("1.1.3"));
        assert_eq!(versions.last().map(String::as_str), Some("1.8.4"));
        assert!(manifest.check_order().is_ok());
    }

    #[test]
    fn test_revision_deltas_carry_forward() {
        let manifest = builtin_manifest();
        assert_eq!(manifest.release("1.2.0").unwrap().revision("loop"), Some("v1"));
        assert_eq!(manifest.release("1.2.1").unwrap().revision("loop"), Some("v1 add"));
        assert_eq!(manifest.release("1.2.6").unwrap().revision("loop"), Some("v1"));
        assert_eq!(manifest.release("1.4.0").unwrap().revision("ready"), None);
        assert_eq!(manifest.release("1.5.0").unwrap().revision("proxy"), Some("removal"));
        assert_eq!(manifest.release("1.5.1").unwrap().revision("proxy"), None);
        assert_eq!(manifest.release("1.6.9").unwrap().revision("kubernetes"), Some("v7"));
    }

    #[test]
    fn test_stub_split_releases() {
        let manifest = builtin_manifest();
        let splitting: Vec<String> = manifest
            .releases()
            .iter()
            .filter(|r| r.post_process.contains(&PostProcess::SplitStubForwards))
            .map(|r| r.version.to_string())
            .collect();
        assert_eq!(splitting, vec!["1.4.0", "1.5.0"]);
    }
}
