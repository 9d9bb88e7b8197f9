//! Shared Corefile fixtures for integration tests

#![allow(dead_code)]

/// Corefile shaped like the 1.6 defaults, without a kubernetes ttl
pub const READY_ERA: &str = ".:53 {
    errors
    health
    ready
    kubernetes cluster.local in-addr.arpa ip6.arpa {
        pods insecure
        fallthrough in-addr.arpa ip6.arpa
    }
    prometheus :9153
    forward . /etc/resolv.conf
    cache 30
    loop
    reload
    loadbalance
}
";

/// 1.3.1-era Corefile still using proxy and the kubernetes upstream option
pub const PROXY_ERA: &str = ".:53 {
    errors
    health
    kubernetes cluster.local in-addr.arpa ip6.arpa {
        pods insecure
        upstream
        fallthrough in-addr.arpa ip6.arpa
    }
    prometheus :9153
    proxy . /etc/resolv.conf
    cache 30
    loop
    reload
    loadbalance
}
";

/// Forward-based Corefile with both ready and loop in place
pub const FORWARD_ERA: &str = ".:53 {
    errors
    health
    ready
    kubernetes cluster.local in-addr.arpa ip6.arpa {
        pods insecure
        upstream
        fallthrough in-addr.arpa ip6.arpa
    }
    prometheus :9153
    forward . /etc/resolv.conf
    cache 30
    loop
    reload
    loadbalance
}
";

/// Remove every line equal to `line` from `text`
pub fn without_line(text: &str, line: &str) -> String {
    text.lines()
        .filter(|l| *l != line)
        .map(|l| format!("{}\n", l))
        .collect()
}

/// Insert `line` after the first line equal to `after`
pub fn with_line_after(text: &str, after: &str, line: &str) -> String {
    let mut out = String::new();
    let mut inserted = false;
    for l in text.lines() {
        out.push_str(l);
        out.push('\n');
        if !inserted && l == after {
            out.push_str(line);
            out.push('\n');
            inserted = true;
        }
    }
    out
}
