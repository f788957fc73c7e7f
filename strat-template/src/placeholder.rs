//! Placeholder grammar.

use std::ops::Range;

use tracing::trace;

use crate::{Result, TemplateSource};

/// What a placeholder refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// A field argument, e.g. `$ctx.args.version` or `${args.version}`.
    Argument { name: String },
    /// A utility function, e.g. `$util.autoId()`.
    Utility { function: String },
    /// The backend result, e.g. `$ctx.result` followed by `[1][0]`.
    Result { path: Vec<String>, indices: Vec<usize> },
}

/// A placeholder found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    /// Byte span in the template, including any trailing result indices.
    pub span: Range<usize>,
}

impl Placeholder {
    /// The statement a result placeholder reads, if it indexes one.
    pub fn statement_index(&self) -> Option<usize> {
        match &self.kind {
            PlaceholderKind::Result { indices, .. } => indices.first().copied(),
            _ => None,
        }
    }
}

/// A raw path before classification.
struct Path {
    segments: Vec<String>,
    indices: Vec<usize>,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Read `segment ('.' segment | '[' digits ']')*` starting at `pos`.
///
/// Returns the path and the offset just past it.
fn read_path(bytes: &[u8], mut pos: usize) -> (Path, usize) {
    let mut path = Path {
        segments: Vec::new(),
        indices: Vec::new(),
    };

    let start = pos;
    while pos < bytes.len() && is_ident_char(bytes[pos]) {
        pos += 1;
    }
    path.segments.push(String::from_utf8_lossy(&bytes[start..pos]).into_owned());

    loop {
        match bytes.get(pos) {
            Some(b'.') if bytes.get(pos + 1).is_some_and(|b| is_ident_start(*b)) => {
                let start = pos + 1;
                pos = start;
                while pos < bytes.len() && is_ident_char(bytes[pos]) {
                    pos += 1;
                }
                path.segments
                    .push(String::from_utf8_lossy(&bytes[start..pos]).into_owned());
            }
            Some(b'[') => match read_index(bytes, pos) {
                Some((index, end)) => {
                    path.indices.push(index);
                    pos = end;
                }
                None => break,
            },
            _ => break,
        }
    }

    (path, pos)
}

/// Read `[digits]` at `pos`, returning the index and the offset past `]`.
fn read_index(bytes: &[u8], pos: usize) -> Option<(usize, usize)> {
    if bytes.get(pos) != Some(&b'[') {
        return None;
    }
    let start = pos + 1;
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == start || bytes.get(end) != Some(&b']') {
        return None;
    }
    let digits = std::str::from_utf8(&bytes[start..end]).ok()?;
    // Only digits were read, so parsing fails on overflow alone. Saturate
    // so an out-of-range index still reaches the statement check.
    let index = digits.parse().unwrap_or(usize::MAX);
    Some((index, end + 1))
}

/// Collect an index chain that follows closing call parentheses.
///
/// In `toJsonObject($ctx.result)[1][0]` the indices apply to the call that
/// wraps the result, which is the only way to index a converted result.
fn read_trailing_indices(bytes: &[u8], mut pos: usize) -> (Vec<usize>, usize) {
    let mut probe = pos;
    while bytes.get(probe) == Some(&b')') {
        probe += 1;
    }
    let mut indices = Vec::new();
    while let Some((index, end)) = read_index(bytes, probe) {
        indices.push(index);
        probe = end;
        pos = end;
    }
    (indices, pos)
}

fn classify(path: Path) -> std::result::Result<PlaceholderKind, String> {
    let Path { segments, indices } = path;
    let display = segments.join(".");

    let rest: &[String] = match segments.first().map(String::as_str) {
        Some("ctx" | "context") => &segments[1..],
        _ => &segments,
    };

    match rest.first().map(String::as_str) {
        Some("args" | "arguments") if rest.len() >= 2 => Ok(PlaceholderKind::Argument {
            name: rest[1].clone(),
        }),
        Some("util" | "utils") if rest.len() >= 2 && rest.len() == segments.len() => {
            Ok(PlaceholderKind::Utility {
                function: rest[1..].join("."),
            })
        }
        Some("result") => Ok(PlaceholderKind::Result {
            path: rest[1..].to_vec(),
            indices,
        }),
        _ => Err(display),
    }
}

/// Scan a template for placeholders.
///
/// A `$` that is not followed by `{` or an identifier is literal text.
pub fn scan_placeholders(source: &TemplateSource) -> Result<Vec<Placeholder>> {
    let bytes = source.text().as_bytes();
    let mut placeholders = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'$' {
            pos += 1;
            continue;
        }
        let start = pos;

        let (kind, end) = match bytes.get(pos + 1) {
            Some(b'{') => {
                let inner = pos + 2;
                let Some(close) = bytes[inner..].iter().position(|b| *b == b'}') else {
                    return Err(source.malformed(
                        "unterminated placeholder",
                        Some(start..bytes.len()),
                    ));
                };
                let close = inner + close;
                if !bytes.get(inner).is_some_and(|b| is_ident_start(*b)) {
                    return Err(source.malformed("empty placeholder", Some(start..close + 1)));
                }
                let (path, path_end) = read_path(bytes, inner);
                if path_end != close {
                    return Err(source.malformed(
                        "unexpected character in placeholder",
                        Some(path_end..path_end + 1),
                    ));
                }
                let kind = classify(path)
                    .map_err(|p| source.unknown_placeholder(p, start..close + 1))?;
                (kind, close + 1)
            }
            Some(b) if is_ident_start(*b) => {
                let (path, path_end) = read_path(bytes, pos + 1);
                let mut kind = classify(path)
                    .map_err(|p| source.unknown_placeholder(p, start..path_end))?;
                let mut span_end = path_end;
                if let PlaceholderKind::Result { indices, .. } = &mut kind
                    && indices.is_empty()
                {
                    let (trailing, end) = read_trailing_indices(bytes, path_end);
                    *indices = trailing;
                    span_end = end;
                }
                placeholders.push(Placeholder {
                    kind,
                    span: start..span_end,
                });
                pos = path_end;
                continue;
            }
            _ => {
                pos += 1;
                continue;
            }
        };

        placeholders.push(Placeholder {
            kind,
            span: start..end,
        });
        pos = end;
    }

    trace!(
        template = source.name(),
        count = placeholders.len(),
        "scanned placeholders"
    );
    Ok(placeholders)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<PlaceholderKind> {
        scan_placeholders(&TemplateSource::new("test", text))
            .unwrap()
            .into_iter()
            .map(|p| p.kind)
            .collect()
    }

    #[test]
    fn test_argument_forms() {
        let kinds = scan("${args.id} $ctx.args.version $context.arguments.name");
        assert_eq!(
            kinds,
            vec![
                PlaceholderKind::Argument { name: "id".into() },
                PlaceholderKind::Argument {
                    name: "version".into()
                },
                PlaceholderKind::Argument {
                    name: "name".into()
                },
            ]
        );
    }

    #[test]
    fn test_nested_utility_calls() {
        let kinds = scan("$util.toJson($util.autoId())");
        assert_eq!(
            kinds,
            vec![
                PlaceholderKind::Utility {
                    function: "toJson".into()
                },
                PlaceholderKind::Utility {
                    function: "autoId".into()
                },
            ]
        );
    }

    #[test]
    fn test_result_index_after_call() {
        let kinds = scan("$utils.toJson($utils.rds.toJsonObject($ctx.result)[1][0])");
        assert_eq!(
            kinds[2],
            PlaceholderKind::Result {
                path: vec![],
                indices: vec![1, 0],
            }
        );
        assert_eq!(
            kinds[1],
            PlaceholderKind::Utility {
                function: "rds.toJsonObject".into()
            }
        );
    }

    #[test]
    fn test_braced_result_index() {
        let placeholders =
            scan_placeholders(&TemplateSource::new("test", "${result[2][0]}")).unwrap();
        assert_eq!(placeholders[0].statement_index(), Some(2));
        assert_eq!(placeholders[0].span, 0..15);
    }

    #[test]
    fn test_result_span_covers_indices() {
        let text = "toJsonObject($ctx.result)[1]";
        let placeholders = scan_placeholders(&TemplateSource::new("test", text)).unwrap();
        assert_eq!(&text[placeholders[0].span.clone()], "$ctx.result)[1]");
    }

    #[test]
    fn test_overflowing_index_saturates() {
        let placeholders = scan_placeholders(&TemplateSource::new(
            "test",
            "toJsonObject($ctx.result)[99999999999999999999][0]",
        ))
        .unwrap();
        assert_eq!(placeholders[0].statement_index(), Some(usize::MAX));
    }

    #[test]
    fn test_literal_dollar() {
        assert!(scan("costs $5 or $ 6").is_empty());
    }

    #[test]
    fn test_unknown_placeholder() {
        let err = scan_placeholders(&TemplateSource::new("test", "$ctx.identity.sub")).unwrap_err();
        assert!(err.to_string().contains("ctx.identity.sub"));
    }

    #[test]
    fn test_bare_args_is_unknown() {
        assert!(scan_placeholders(&TemplateSource::new("test", "$ctx.args")).is_err());
    }

    #[test]
    fn test_unterminated_braced_placeholder() {
        let err = scan_placeholders(&TemplateSource::new("test", "${args.id")).unwrap_err();
        assert!(err.to_string().contains("unterminated placeholder"));
    }
}
