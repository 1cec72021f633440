//! Path patterns with named parameter segments (`/goods_detail/:id`).
//!
//! Matching follows the browser router defaults the storefront was built
//! against: static segments compare ASCII case-insensitively, a trailing
//! slash is tolerated, and a parameter consumes exactly one non-empty
//! segment. Parameter values are percent-encoded when a path is built and
//! decoded when one is matched.

#[cfg(test)]
#[path = "pattern_test.rs"]
mod pattern_test;

use std::collections::BTreeMap;

use super::RouteError;

/// Parameters extracted from a matched path, keyed by name.
pub type Params = BTreeMap<String, String>;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern such as `/`, `/about` or `/goods_detail/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidPattern`] if the pattern does not start
    /// with `/`, has an unnamed parameter, or repeats a parameter name.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern { pattern: raw.to_owned(), reason: reason.to_owned() };

        if !raw.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }

        let mut segments = Vec::new();
        for part in split_segments(raw) {
            if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(invalid("parameter segment needs a name"));
                }
                if segments.iter().any(|s| matches!(s, Segment::Param(existing) if existing == name)) {
                    return Err(invalid("duplicate parameter name"));
                }
                segments.push(Segment::Param(name.to_owned()));
            } else {
                segments.push(Segment::Static(part.to_owned()));
            }
        }

        Ok(Self { raw: raw.to_owned(), segments })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the parameter segments, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Match a path (without query or fragment) and extract its parameters.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) => {
                    if !expected.eq_ignore_ascii_case(part) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), decode_segment(part));
                }
            }
        }
        Some(params)
    }

    /// Build a concrete path by substituting `params` into the pattern.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MissingParam`] if a parameter has no value.
    pub fn interpolate(&self, route: &str, params: &Params) -> Result<String, RouteError> {
        if self.segments.is_empty() {
            return Ok("/".to_owned());
        }

        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Static(text) => out.push_str(text),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => out.push_str(&urlencoding::encode(value)),
                    _ => {
                        return Err(RouteError::MissingParam { route: route.to_owned(), param: name.clone() });
                    }
                },
            }
        }
        Ok(out)
    }
}

/// Percent-decode a parameter segment. Malformed escapes and non-UTF-8
/// results keep the raw text.
fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), std::borrow::Cow::into_owned)
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
