//! Inline-template scanning over wikitext row fragments.
//!
//! The source document embeds its values in templates of the form
//! `{{tag|arg|arg|...}}`. This module is a small dedicated scanner for that
//! one construct: it splits a document into row fragments and locates
//! templates inside a fragment by name or by name prefix. Which prefixes
//! count as name-bearing is the caller's data (see
//! [`ExtractorConfig`](crate::extract::ExtractorConfig)), so template-name
//! drift in the source is a configuration change, not a code change.
//!
//! This is deliberately not a general wikitext parser. It understands
//! exactly enough structure to walk balanced `{{ }}` pairs and to avoid
//! splitting arguments on pipes that belong to nested templates or
//! `[[target|display]]` links.

/// A single inline template found in a row fragment.
///
/// Borrowed from the fragment it was scanned from; the name and arguments
/// are trimmed but otherwise untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    name: &'a str,
    args: Vec<&'a str>,
}

impl<'a> Template<'a> {
    /// The template name, trimmed.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// All arguments in order, trimmed.
    #[must_use]
    pub fn args(&self) -> &[&'a str] {
        &self.args
    }

    /// The first positional (unnamed, non-empty) argument, if any.
    ///
    /// Named arguments such as `sigfig=2` are skipped.
    #[must_use]
    pub fn first_positional(&self) -> Option<&'a str> {
        self.args
            .iter()
            .copied()
            .find(|arg| !arg.is_empty() && !arg.contains('='))
    }

    /// The first argument consisting entirely of ASCII digits, if any.
    #[must_use]
    pub fn first_numeric(&self) -> Option<&'a str> {
        self.args
            .iter()
            .copied()
            .find(|arg| !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()))
    }

    /// Returns true if the template name equals `name`, ignoring ASCII case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns true if the lowercased template name starts with any of the
    /// given prefixes. Prefixes are expected to be lowercase already.
    #[must_use]
    pub fn name_has_prefix(&self, prefixes: &[String]) -> bool {
        let lowered = self.name.to_ascii_lowercase();
        prefixes.iter().any(|p| lowered.starts_with(p.as_str()))
    }
}

/// Splits a document into row fragments on the given row marker.
///
/// The fragment before the first marker (table header, preamble) is
/// included; callers filter fragments by their entity marker anyway.
#[must_use]
pub fn split_rows<'a>(document: &'a str, marker: &str) -> Vec<&'a str> {
    document.split(marker).collect()
}

/// Scans a fragment for inline templates, in order of their opening braces.
///
/// Nested templates are yielded after their parent opens, e.g. in
/// `{{n+p|5|{{worldpop}}}}` the outer `n+p` comes first. Unterminated
/// templates are ignored.
#[must_use]
pub fn scan_templates(fragment: &str) -> Vec<Template<'_>> {
    let bytes = fragment.as_bytes();
    let mut templates = Vec::new();
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] == b'{' && bytes[i + 1] == b'{' {
            if let Some(template) = parse_template_at(fragment, i) {
                templates.push(template);
            }
        }
        i += 1;
    }

    templates
}

/// Returns the first template whose name matches `name` (ASCII
/// case-insensitive), if any.
#[must_use]
pub fn first_template_named<'a>(fragment: &'a str, name: &str) -> Option<Template<'a>> {
    scan_templates(fragment).into_iter().find(|t| t.is_named(name))
}

/// Returns true if the fragment contains a template named `name`.
#[must_use]
pub fn contains_template(fragment: &str, name: &str) -> bool {
    first_template_named(fragment, name).is_some()
}

/// Parses the template whose `{{` starts at byte offset `start`.
///
/// Returns `None` when the braces never balance before the fragment ends.
fn parse_template_at(fragment: &str, start: usize) -> Option<Template<'_>> {
    let bytes = fragment.as_bytes();
    let body_start = start + 2;
    let mut depth = 1usize;
    let mut i = body_start;

    let body_end = loop {
        if i + 1 >= bytes.len() {
            // Ran off the end with unbalanced braces
            return None;
        }
        if bytes[i] == b'{' && bytes[i + 1] == b'{' {
            depth += 1;
            i += 2;
        } else if bytes[i] == b'}' && bytes[i + 1] == b'}' {
            depth -= 1;
            if depth == 0 {
                break i;
            }
            i += 2;
        } else {
            i += 1;
        }
    };

    let body = &fragment[body_start..body_end];
    let mut segments = split_top_level(body);
    if segments.is_empty() {
        return None;
    }
    let name = segments.remove(0);
    if name.is_empty() {
        return None;
    }

    Some(Template {
        name,
        args: segments,
    })
}

/// Splits a template body on `|`, ignoring pipes nested inside `{{ }}`
/// templates or `[[ ]]` links. Segments are trimmed.
fn split_top_level(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut segments = Vec::new();
    let mut brace_depth = 0usize;
    let mut bracket_depth = 0usize;
    let mut segment_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if i + 1 < bytes.len() && bytes[i] == b'{' && bytes[i + 1] == b'{' {
            brace_depth += 1;
            i += 2;
        } else if i + 1 < bytes.len() && bytes[i] == b'}' && bytes[i + 1] == b'}' {
            brace_depth = brace_depth.saturating_sub(1);
            i += 2;
        } else if i + 1 < bytes.len() && bytes[i] == b'[' && bytes[i + 1] == b'[' {
            bracket_depth += 1;
            i += 2;
        } else if i + 1 < bytes.len() && bytes[i] == b']' && bytes[i + 1] == b']' {
            bracket_depth = bracket_depth.saturating_sub(1);
            i += 2;
        } else if bytes[i] == b'|' && brace_depth == 0 && bracket_depth == 0 {
            segments.push(body[segment_start..i].trim());
            segment_start = i + 1;
            i += 1;
        } else {
            i += 1;
        }
    }
    segments.push(body[segment_start..].trim());

    segments
}
