use crate::error::{HbbError, Result};

/// The template every run uses unless configured otherwise.
pub const DEFAULT_TEMPLATE: &str = "gh:qiaohe12/react-cli-tpl#master";

/// A resolved remote template: a clonable git URL and an optional branch or tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLocator {
    pub url: String,
    pub git_ref: Option<String>,
}

/// Built-in abbreviation prefixes and their expansion targets.
const ABBREVIATIONS: &[(&str, &str, &str)] = &[
    ("gh:", "https://github.com/", ".git"),
    ("github:", "https://github.com/", ".git"),
    ("gl:", "https://gitlab.com/", ".git"),
    ("gitlab:", "https://gitlab.com/", ".git"),
    ("bb:", "https://bitbucket.org/", ".git"),
    ("bitbucket:", "https://bitbucket.org/", ".git"),
    ("sr:", "https://git.sr.ht/", ""),
];

/// Expand a shorthand abbreviation (e.g. `gh:user/repo`) into a full git URL.
///
/// Returns `Ok(None)` when `input` has no known prefix.
fn expand_abbreviation(input: &str) -> Result<Option<String>> {
    for &(prefix, base_url, suffix) in ABBREVIATIONS {
        if let Some(rest) = input.strip_prefix(prefix) {
            if rest.is_empty() {
                return Err(HbbError::InvalidLocator {
                    input: input.to_string(),
                });
            }
            return Ok(Some(format!("{base_url}{rest}{suffix}")));
        }
    }
    Ok(None)
}

/// Returns `true` when the argument looks like an explicit git URL.
fn is_git_url(input: &str) -> bool {
    input.starts_with("https://")
        || input.starts_with("http://")
        || input.starts_with("file://")
        || input.starts_with("git@")
        || input.ends_with(".git")
}

/// `owner/repo` with nothing else: a GitHub repository.
fn is_bare_repo(input: &str) -> bool {
    match input.split_once('/') {
        Some((owner, repo)) => {
            !owner.is_empty()
                && !repo.is_empty()
                && !repo.contains('/')
                && !input.contains(':')
                && !owner.starts_with('.')
        }
        None => false,
    }
}

/// Resolve a template locator.
///
/// Detection order:
/// 1. Known abbreviation prefix (`gh:`, `gl:`, `bb:`, `sr:`, or the long forms) -> expand
/// 2. Explicit git URL (`https://`, `git@`, or `.git` suffix) -> as is
/// 3. Bare `owner/repo` -> GitHub
///
/// A trailing `#ref` selects a branch or tag in every form.
pub fn resolve_locator(input: &str) -> Result<TemplateLocator> {
    let invalid = || HbbError::InvalidLocator {
        input: input.to_string(),
    };

    let (base, git_ref) = match input.rsplit_once('#') {
        Some((_, r)) if r.is_empty() => return Err(invalid()),
        Some((base, r)) => (base, Some(r.to_string())),
        None => (input, None),
    };
    let base = base.trim();
    if base.is_empty() {
        return Err(invalid());
    }

    if let Some(url) = expand_abbreviation(base)? {
        return Ok(TemplateLocator { url, git_ref });
    }

    if is_git_url(base) {
        return Ok(TemplateLocator {
            url: base.to_string(),
            git_ref,
        });
    }

    if is_bare_repo(base) {
        return Ok(TemplateLocator {
            url: format!("https://github.com/{base}.git"),
            git_ref,
        });
    }

    Err(invalid())
}
