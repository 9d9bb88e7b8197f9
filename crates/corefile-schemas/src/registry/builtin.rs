//! Built-in plugin schema revisions
//!
//! Revisions are identified by short names (`v1`, `v2`, ...). A revision
//! used only by the release that introduces a change carries a suffix
//! (`v1 add`, `v1 add lameduck`, `v1 promoted`) so the following release can
//! fall back to the plain revision and stop re-applying the change.
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use super::types::{
    OptionAction, OptionDescriptor, OptionPattern, PluginAction, PluginSchema, Status,
};
use super::PluginRegistry;

const KUBERNETES_OPTIONS: &[&str] = &[
    "resyncperiod",
    "endpoint",
    "tls",
    "namespaces",
    "labels",
    "pods",
    "endpoint_pod_names",
    "upstream",
    "ttl",
    "noendpoints",
    "transfer",
    "fallthrough",
    "ignore",
];

const PROXY_OPTIONS: &[&str] = &[
    "policy",
    "fail_timeout",
    "max_fails",
    "health_check",
    "except",
    "spray",
    "protocol",
];

const FORWARD_OPTIONS: &[&str] = &[
    "except",
    "force_tcp",
    "expire",
    "max_fails",
    "tls",
    "tls_servername",
    "policy",
    "health_check",
];

const IPV4_PATTERN: &str = r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}";
const IPV6_PATTERN: &str = r"[0-9A-Fa-f]{1,4}:[:0-9A-Fa-f]+:[0-9A-Fa-f]{1,4}";

fn literal_pattern(pattern: &str) -> OptionPattern {
    OptionPattern::new(pattern).expect("built-in option pattern compiles")
}

fn status(status: Status) -> OptionDescriptor {
    OptionDescriptor::with_status(status)
}

/// Build the registry of every schema revision referenced by the built-in releases
pub fn builtin_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();

    for (revision, schema) in kubernetes_revisions() {
        registry.insert("kubernetes", revision, schema);
    }
    for (revision, schema) in proxy_revisions() {
        registry.insert("proxy", revision, schema);
    }

    registry.insert("errors", "v1", PluginSchema::new());
    registry.insert("errors", "v2", PluginSchema::with_options(&["consolidate"]));

    let health = PluginSchema::with_options(&["lameduck"]);
    registry.insert(
        "health",
        "v1 add lameduck",
        health.clone().option(
            "lameduck",
            OptionDescriptor::new_default(&["5s"]).down_action(OptionAction::Remove),
        ),
    );
    registry.insert("health", "v1", health);

    registry.insert("ready", "v1", PluginSchema::new());
    registry.insert(
        "ready",
        "v1 add",
        PluginSchema::new()
            .new_default()
            .down_action(PluginAction::Remove),
    );

    registry.insert("loop", "v1", PluginSchema::new());
    registry.insert(
        "loop",
        "v1 add",
        PluginSchema::new()
            .new_default()
            .down_action(PluginAction::Remove),
    );

    let forward = PluginSchema::with_options(FORWARD_OPTIONS);
    registry.insert("forward", "v2", forward.clone().option("prefer_udp", OptionDescriptor::current()));
    registry.insert("forward", "v1", forward);

    let cache = PluginSchema::with_options(&["success", "denial", "prefetch"]);
    registry.insert("cache", "v2", cache.clone().option("serve_stale", OptionDescriptor::current()));
    registry.insert("cache", "v1", cache);

    registry.insert(
        "hosts",
        "v1",
        PluginSchema::with_options(&["ttl", "no_reverse", "reload", "fallthrough"])
            .pattern(literal_pattern(IPV4_PATTERN), OptionDescriptor::current())
            .pattern(literal_pattern(IPV6_PATTERN), OptionDescriptor::current()),
    );

    registry.insert("log", "v1", PluginSchema::with_options(&["class"]));
    registry.insert("k8s_external", "v1", PluginSchema::with_options(&["apex", "ttl"]));
    registry.insert(
        "rewrite",
        "v1",
        PluginSchema::with_options(&["name", "answer", "type", "class", "edns0", "ttl"]),
    );

    let federation = PluginSchema::with_options(&["upstream"])
        .pattern(literal_pattern("[a-z0-9-]+"), OptionDescriptor::current());
    registry.insert(
        "federation",
        "removal",
        federation
            .clone()
            .status(Status::Removed)
            .action(PluginAction::Remove),
    );
    registry.insert("federation", "v1", federation);

    let transfer = PluginSchema::with_options(&["to"]);
    registry.insert(
        "transfer",
        "v1 promoted",
        transfer.clone().down_action(PluginAction::DemoteToOption {
            plugin: "kubernetes".to_string(),
            option: "transfer".to_string(),
        }),
    );
    registry.insert("transfer", "v1", transfer);

    for plugin in ["prometheus", "reload", "loadbalance", "autopath"] {
        registry.insert(plugin, "v1", PluginSchema::new());
    }

    registry
}

fn kubernetes_revisions() -> Vec<(&'static str, PluginSchema)> {
    let v1 = PluginSchema::with_options(KUBERNETES_OPTIONS);
    let v2 = v1.clone().option("kubeconfig", OptionDescriptor::current());
    let v3 = v2.clone().option(
        "endpoint",
        status(Status::Deprecated).action(OptionAction::UseFirstArgumentOnly),
    );
    let v4 = v3
        .clone()
        .option(
            "endpoint",
            status(Status::Ignored).action(OptionAction::UseFirstArgumentOnly),
        )
        .option(
            "upstream",
            status(Status::Deprecated).action(OptionAction::Remove),
        );
    let v5 = v4
        .clone()
        .option("upstream", status(Status::Ignored).action(OptionAction::Remove))
        .option(
            "resyncperiod",
            status(Status::Deprecated).action(OptionAction::Remove),
        );
    let v6 = v5.clone().option(
        "resyncperiod",
        status(Status::Removed).action(OptionAction::Remove),
    );
    let v7 = v6.clone().without("resyncperiod");
    let v8 = v7
        .clone()
        .option("upstream", status(Status::Removed).action(OptionAction::Remove))
        .option(
            "transfer",
            status(Status::Deprecated).replaced_by("transfer"),
        )
        .option("namespace_labels", OptionDescriptor::current());
    let v9 = v8.clone().option(
        "transfer",
        status(Status::Removed)
            .replaced_by("transfer")
            .action(OptionAction::PromoteToPlugin {
                plugin: "transfer".to_string(),
            }),
    );

    vec![
        ("v1", v1),
        ("v2", v2),
        ("v3", v3),
        ("v4", v4),
        ("v5", v5),
        ("v6", v6),
        ("v7", v7),
        ("v8", v8),
        ("v9", v9),
    ]
}

fn proxy_revisions() -> Vec<(&'static str, PluginSchema)> {
    let v1 = PluginSchema::with_options(PROXY_OPTIONS);
    let v2 = v1.clone().option(
        "protocol",
        status(Status::Ignored).action(OptionAction::RemoveWhenFirstArgument {
            value: "https_google".to_string(),
        }),
    );

    // options forward has no equivalent for are dropped during the rename
    let to_forward = v2
        .clone()
        .option("fail_timeout", OptionDescriptor::current().action(OptionAction::Remove))
        .option("spray", OptionDescriptor::current().action(OptionAction::Remove))
        .option("protocol", OptionDescriptor::current().action(OptionAction::Remove))
        .replaced_by("forward")
        .action(PluginAction::ReplaceWith {
            plugin: "forward".to_string(),
        });

    let deprecation = to_forward.clone().status(Status::Deprecated);
    let removal = to_forward.status(Status::Removed);

    vec![
        ("v1", v1),
        ("v2", v2),
        ("deprecation", deprecation),
        ("removal", removal),
    ]
}
