use std::fmt;
use std::path::Path;

use crate::error::{HbbError, Result};

/// Names that can never be published, whatever their casing.
const BLACKLISTED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Node.js core module names. A package with one of these names would shadow the builtin.
const CORE_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

const MAX_NAME_LENGTH: usize = 214;

/// Dependencies of the generated project. Naming the project after one of them
/// breaks `npm install`.
pub const DEFAULT_RESERVED_NAMES: &[&str] = &["react", "react-dom"];

/// A project name that passed [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the name to validate from a project directory argument.
///
/// `hbb ../work/my-app` creates a project named `my-app`.
pub fn name_from_arg(arg: &str) -> String {
    Path::new(arg)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| arg.to_string())
}

/// Check `name` against the reserved set and then against npm's naming rules for new packages.
pub fn validate(name: &str, reserved: &[String]) -> Result<ProjectName> {
    if reserved.iter().any(|r| r == name) {
        return Err(HbbError::ReservedName {
            name: name.to_string(),
        });
    }

    let problems = naming_problems(name);
    if !problems.is_empty() {
        return Err(HbbError::InvalidName {
            name: name.to_string(),
            problems,
        });
    }

    Ok(ProjectName(name.to_string()))
}

/// Every npm naming rule `name` violates, in rule order. Empty means valid.
pub fn naming_problems(name: &str) -> Vec<String> {
    let mut problems = Vec::new();

    if name.is_empty() {
        problems.push("name length must be greater than zero".to_string());
    }
    if name.starts_with('.') {
        problems.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        problems.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        problems.push("name cannot contain leading or trailing spaces".to_string());
    }

    let lower = name.to_lowercase();
    for blacklisted in BLACKLISTED_NAMES {
        if lower == *blacklisted {
            problems.push(format!("{blacklisted} is a blacklisted name"));
        }
    }

    if CORE_MODULES.contains(&lower.as_str()) {
        problems.push(format!("{name} is a core module name"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        problems.push(format!(
            "name can no longer contain more than {MAX_NAME_LENGTH} characters"
        ));
    }
    if lower != name {
        problems.push("name can no longer contain capital letters".to_string());
    }

    let last_segment = name.rsplit('/').next().unwrap_or(name);
    if last_segment.chars().any(|c| "~'!()*".contains(c)) {
        problems.push(
            "name can no longer contain special characters (\"~'!()*\")".to_string(),
        );
    }

    if !is_url_friendly(name) && !is_url_friendly_scoped(name) {
        problems.push("name can only contain URL-friendly characters".to_string());
    }

    problems
}

/// Characters `encodeURIComponent` leaves untouched.
fn is_url_friendly(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_.!~*'()".contains(c))
}

/// `@scope/pkg` where both halves are URL-friendly and non-empty.
fn is_url_friendly_scoped(name: &str) -> bool {
    let Some(rest) = name.strip_prefix('@') else {
        return false;
    };
    match rest.split_once('/') {
        Some((scope, pkg)) => {
            !scope.is_empty()
                && !pkg.is_empty()
                && !pkg.contains('/')
                && is_url_friendly(scope)
                && is_url_friendly(pkg)
        }
        None => false,
    }
}
