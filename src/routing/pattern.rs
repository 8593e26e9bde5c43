//! Path pattern compilation and segment matching.
//!
//! # Segment Kinds
//! - `users`: static, compared literally (case-sensitive)
//! - `:id`: captures exactly one non-empty segment
//! - `*rest` or bare `*`: captures everything that remains, must be last
//!
//! # Design Decisions
//! - Empty segments are dropped, so `/a//b/` and `/a/b` are the same path
//! - Patterns hold decoded text; concrete paths are percent-decoded per
//!   segment before matching and percent-encoded per segment when rendered
//! - No regex: a pattern is a flat list of segments matched left to right
//! - Matching is prefix-based; the caller decides whether leftovers are allowed

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Parameter name used for a bare `*` catch-all.
pub const DEFAULT_CATCH_ALL: &str = "pathMatch";

/// Path parameters captured while matching, keyed by parameter name.
pub type PathParams = BTreeMap<String, String>;

/// One compiled segment of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

impl Segment {
    /// Two segments have the same shape when they accept the same inputs,
    /// regardless of parameter names.
    fn same_shape(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Static(a), Segment::Static(b)) => a == b,
            (Segment::Param(_), Segment::Param(_)) => true,
            (Segment::CatchAll(_), Segment::CatchAll(_)) => true,
            _ => false,
        }
    }
}

/// Errors raised while compiling a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("empty parameter name in `{0}`")]
    EmptyParam(String),

    #[error("catch-all must be the last segment in `{0}`")]
    CatchAllNotLast(String),

    #[error("parameter `{param}` declared twice in `{pattern}`")]
    DuplicateParam { pattern: String, param: String },
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

/// Characters escaped inside a single path segment. `/` is included so a
/// parameter value never splits into two segments.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Split a concrete path into its non-empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Split a concrete path and percent-decode every segment.
///
/// Invalid UTF-8 after decoding is replaced rather than rejected, so a
/// malformed URL ends in `NotFound` instead of an error.
pub fn decode_path(path: &str) -> Vec<String> {
    split_path(path)
        .into_iter()
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect()
}

/// Percent-encode one decoded segment.
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    utf8_percent_encode(segment, SEGMENT).into()
}

/// Canonical, percent-encoded form of decoded segments.
pub fn encode_path<S: AsRef<str>>(segments: &[S]) -> String {
    let encoded: Vec<Cow<'_, str>> = segments.iter().map(|s| encode_segment(s.as_ref())).collect();
    format!("/{}", encoded.join("/"))
}

impl PathPattern {
    /// Compile a pattern string. Leading and trailing slashes are ignored.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let raw = split_path(pattern);
        let mut segments = Vec::with_capacity(raw.len());

        for (i, part) in raw.iter().enumerate() {
            let segment = if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(PatternError::EmptyParam(pattern.to_string()));
                }
                Segment::Param(name.to_string())
            } else if let Some(name) = part.strip_prefix('*') {
                if i + 1 != raw.len() {
                    return Err(PatternError::CatchAllNotLast(pattern.to_string()));
                }
                let name = if name.is_empty() { DEFAULT_CATCH_ALL } else { name };
                Segment::CatchAll(name.to_string())
            } else {
                Segment::Static(part.to_string())
            };
            segments.push(segment);
        }

        let compiled = Self { segments };
        compiled.check_params(pattern)?;
        Ok(compiled)
    }

    fn check_params(&self, pattern: &str) -> Result<(), PatternError> {
        let mut seen = Vec::new();
        for name in self.param_names() {
            if seen.contains(&name) {
                return Err(PatternError::DuplicateParam {
                    pattern: pattern.to_string(),
                    param: name.to_string(),
                });
            }
            seen.push(name);
        }
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True for the root pattern (`/` or the empty string).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when the pattern contains no parameter or catch-all segment.
    pub fn is_static(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Static(_)))
    }

    /// Append `child` to this pattern, checking the combined parameter set.
    pub fn join(&self, child: &PathPattern) -> Result<PathPattern, PatternError> {
        if matches!(self.segments.last(), Some(Segment::CatchAll(_))) && !child.is_root() {
            return Err(PatternError::CatchAllNotLast(format!("{}/{}", self, child)));
        }
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());
        let joined = PathPattern { segments };
        joined.check_params(&joined.to_string())?;
        Ok(joined)
    }

    /// Names of all parameters, catch-all included, in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) | Segment::CatchAll(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Whether both patterns accept exactly the same paths.
    pub fn same_shape(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.same_shape(b))
    }

    /// Match this pattern against the front of `path`.
    ///
    /// Returns the number of segments consumed; captured parameters are
    /// written to `params` only on success.
    pub fn match_prefix(&self, path: &[&str], params: &mut PathParams) -> Option<usize> {
        let mut captured = Vec::new();
        let mut consumed = 0;

        for segment in &self.segments {
            match segment {
                Segment::Static(literal) => {
                    if path.get(consumed) != Some(&literal.as_str()) {
                        return None;
                    }
                    consumed += 1;
                }
                Segment::Param(name) => {
                    let value = path.get(consumed)?;
                    captured.push((name.clone(), (*value).to_string()));
                    consumed += 1;
                }
                Segment::CatchAll(name) => {
                    let rest = path[consumed.min(path.len())..].join("/");
                    captured.push((name.clone(), rest));
                    consumed = path.len();
                }
            }
        }

        params.extend(captured);
        Some(consumed)
    }

    /// Build a concrete, percent-encoded path by substituting parameters.
    ///
    /// A parameter value always stays one segment; a catch-all value keeps
    /// its `/` separators. Returns the name of the first missing parameter
    /// on failure.
    pub fn render(&self, params: &PathParams) -> Result<String, String> {
        let mut parts: Vec<&str> = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Static(literal) => parts.push(literal),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => parts.push(value),
                    _ => return Err(name.clone()),
                },
                Segment::CatchAll(name) => {
                    if let Some(value) = params.get(name) {
                        parts.extend(split_path(value));
                    }
                }
            }
        }
        Ok(encode_path(&parts))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/")?;
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            match segment {
                Segment::Static(literal) => write!(f, "{}", literal)?,
                Segment::Param(name) => write!(f, ":{}", name)?,
                Segment::CatchAll(name) => write!(f, "*{}", name)?,
            }
        }
        Ok(())
    }
}
