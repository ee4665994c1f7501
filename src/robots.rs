//! robots.txt exclusion rules.
//!
//! Only directory rules of the form `Disallow: /prefix/` carve out a
//! disallowed path prefix; bare paths and wildcard patterns are ignored.
//! Prefixes are matched against the raw, domain-relative hrefs found on a
//! page, before any URL resolution.

/// Parsed exclusion rules for one site.
#[derive(Debug, Clone, Default)]
pub struct RobotsPolicy {
    rules: Vec<String>,
}

impl RobotsPolicy {
    /// Parses raw robots.txt content into a set of disallowed path prefixes.
    pub fn from_content(content: &str) -> RobotsPolicy {
        let mut rules = Vec::new();
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some((key, value)) = trimmed.split_once(':') else {
                continue;
            };
            if !key.trim().eq_ignore_ascii_case("disallow") {
                continue;
            }
            let value = value.trim();
            if let Some(prefix) = value
                .strip_prefix('/')
                .and_then(|v| v.strip_suffix('/'))
                .filter(|p| !p.is_empty())
            {
                rules.push(prefix.to_string());
            }
        }
        RobotsPolicy { rules }
    }

    /// The permissive policy used when robots.txt cannot be fetched.
    pub fn allow_all() -> RobotsPolicy {
        RobotsPolicy::default()
    }

    /// Checks a raw, domain-relative href against the disallowed prefixes.
    pub fn is_disallowed(&self, href: &str) -> bool {
        self.rules.iter().any(|rule| href.starts_with(rule.as_str()))
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }
}
