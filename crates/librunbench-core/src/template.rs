//! Run directory templates
//!
//! A template is a path string with `{name}` and `{timestamp}` placeholders,
//! e.g. `runs/{name}-{timestamp}`. `{{` and `}}` produce literal braces.
//! Templates are checked only when they are formatted, so a config holding a
//! bad template still loads.

use thiserror::Error;

/// Placeholder replaced by the run name
pub const NAME_KEY: &str = "name";
/// Placeholder replaced by the formatted run timestamp
pub const TIMESTAMP_KEY: &str = "timestamp";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),
    #[error("unbalanced brace at byte {position}")]
    UnbalancedBrace { position: usize },
}

/// A piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Brace(char),
    Key(&'a str),
}

fn parse(template: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let mut segments = Vec::new();
    let bytes = template.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' | b'}' if bytes.get(i + 1) == Some(&bytes[i]) => {
                if literal_start < i {
                    segments.push(Segment::Literal(&template[literal_start..i]));
                }
                segments.push(Segment::Brace(bytes[i] as char));
                i += 2;
                literal_start = i;
            }
            b'{' => {
                if literal_start < i {
                    segments.push(Segment::Literal(&template[literal_start..i]));
                }
                let close = template[i + 1..]
                    .find(|c| c == '}' || c == '{')
                    .map(|offset| i + 1 + offset)
                    .filter(|&end| bytes[end] == b'}')
                    .ok_or(TemplateError::UnbalancedBrace { position: i })?;
                segments.push(Segment::Key(&template[i + 1..close]));
                i = close + 1;
                literal_start = i;
            }
            b'}' => return Err(TemplateError::UnbalancedBrace { position: i }),
            _ => i += 1,
        }
    }

    if literal_start < bytes.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }
    Ok(segments)
}

/// List the placeholder keys a template references, in order of appearance
pub fn placeholders(template: &str) -> Result<Vec<String>, TemplateError> {
    Ok(parse(template)?
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Key(key) => Some(key.to_string()),
            _ => None,
        })
        .collect())
}

/// Check that a template only references known placeholders
pub fn check(template: &str) -> Result<(), TemplateError> {
    for key in placeholders(template)? {
        if key != NAME_KEY && key != TIMESTAMP_KEY {
            return Err(TemplateError::UnknownPlaceholder(key));
        }
    }
    Ok(())
}

/// Substitute `name` and an already formatted `timestamp` into a template
pub fn format_run_dir(template: &str, name: &str, timestamp: &str) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + name.len() + timestamp.len());
    for segment in parse(template)? {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Brace(c) => out.push(c),
            Segment::Key(NAME_KEY) => out.push_str(name),
            Segment::Key(TIMESTAMP_KEY) => out.push_str(timestamp),
            Segment::Key(other) => return Err(TemplateError::UnknownPlaceholder(other.to_string())),
        }
    }
    Ok(out)
}
