//! Splitting the generator's `db.js` into its bindings.
//!
//! The documentation generator ships its index as a small script:
//!
//! ```text
//! 'use strict'
//! const globalIndex={classes:["A",],methods:{"run":{o:true,c:"A"},},fields:{}
//! };const globalQuoteList=["...",]
//! ```
//!
//! Only the statement structure is read here: top-level `const`/`let`/`var`
//! declarations and the `;` that ends them. Directive strings and other
//! statements are skipped. Each initializer is a JSON5 value and is decoded
//! by the loader with `serde_json5`.

use crate::error::{OdocError, Result};
use std::borrow::Cow;

/// Deepest bracket nesting accepted in a script.
pub const MAX_DEPTH: usize = 64;

/// One `name = initializer` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'a> {
    pub name: &'a str,

    /// Initializer text, trimmed
    pub initializer: &'a str,

    /// Byte offset of the initializer in the script
    pub offset: usize,
}

/// Top-level declarations of a script, in source order.
pub fn split_bindings(source: &str) -> Result<Vec<Binding<'_>>> {
    let marks = scan(source)?;

    let mut bindings = Vec::with_capacity(marks.declarations.len());
    for (n, &start) in marks.declarations.iter().enumerate() {
        let next_declaration = marks.declarations.get(n + 1).copied();
        let terminator = marks.semicolons.iter().copied().find(|&s| s > start);
        let end = [next_declaration, terminator]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(source.len());
        bindings.push(declaration(source, start, end)?);
    }
    Ok(bindings)
}

/// Rewrite `\u{X..}` escapes, which JSON5 lacks, as `\uXXXX`. Code points
/// above U+FFFF are written out as the character itself.
pub fn normalize_escapes(text: &str) -> Cow<'_, str> {
    if !text.contains("\\u{") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let escape = &rest[pos..];
        match braced_code_point(escape) {
            Some((c, len)) => {
                if c.len_utf16() == 1 {
                    out.push_str(&format!("\\u{:04x}", u32::from(c)));
                } else {
                    out.push(c);
                }
                rest = &escape[len..];
            }
            None => {
                // Copy the escape pair untouched so `\\u{` stays literal.
                let len = escape[1..].chars().next().map_or(1, |c| 1 + c.len_utf8());
                out.push_str(&escape[..len]);
                rest = &escape[len..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn braced_code_point(escape: &str) -> Option<(char, usize)> {
    let body = escape.strip_prefix("\\u{")?;
    let close = body.find('}')?;
    let digits = &body[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let c = u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)?;
    Some((c, "\\u{".len() + close + 1))
}

/// Positions of top-level `;` and declaration keywords.
#[derive(Debug, Default)]
struct Marks {
    semicolons: Vec<usize>,
    declarations: Vec<usize>,
}

fn scan(source: &str) -> Result<Marks> {
    let bytes = source.as_bytes();
    let mut marks = Marks::default();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        i = match bytes[i] {
            b'"' | b'\'' | b'`' => skip_string(bytes, i)?,
            b'/' if bytes.get(i + 1) == Some(&b'/') => bytes[i..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |p| i + p),
            b'/' if bytes.get(i + 1) == Some(&b'*') => match source[i + 2..].find("*/") {
                Some(p) => i + 2 + p + 2,
                None => return Err(OdocError::parse("unterminated comment", i)),
            },
            b'{' | b'[' | b'(' => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(OdocError::parse(
                        format!("nesting deeper than {} levels", MAX_DEPTH),
                        i,
                    ));
                }
                i + 1
            }
            b'}' | b']' | b')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| OdocError::parse("unbalanced closing bracket", i))?;
                i + 1
            }
            b';' if depth == 0 => {
                marks.semicolons.push(i);
                i + 1
            }
            b if depth == 0 && is_ident_start(b) => {
                let end = ident_end(bytes, i);
                if matches!(&source[i..end], "const" | "let" | "var") {
                    marks.declarations.push(i);
                }
                end
            }
            _ => i + 1,
        };
    }

    if depth != 0 {
        return Err(OdocError::parse("unclosed bracket", bytes.len()));
    }
    Ok(marks)
}

/// Index just past the closing quote of the string starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> Result<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Ok(i + 1),
            b'\n' if quote != b'`' => break,
            _ => i += 1,
        }
    }
    Err(OdocError::parse("unterminated string", start))
}

fn declaration(source: &str, start: usize, end: usize) -> Result<Binding<'_>> {
    let text = &source[start..end];
    let after_keyword = text[ident_end(text.as_bytes(), 0)..].trim_start();

    if !after_keyword.bytes().next().is_some_and(is_ident_start) {
        return Err(OdocError::parse("expected a binding name", start));
    }
    let name_len = ident_end(after_keyword.as_bytes(), 0);
    let name = &after_keyword[..name_len];

    let Some(value) = after_keyword[name_len..].trim_start().strip_prefix('=') else {
        return Err(OdocError::parse(format!("expected '=' after '{}'", name), start));
    };
    let initializer = value.trim();
    if initializer.is_empty() {
        return Err(OdocError::parse(format!("'{}' has no initializer", name), start));
    }

    Ok(Binding {
        name,
        initializer,
        offset: end - value.trim_start().len(),
    })
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn ident_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80))
        .map_or(bytes.len(), |p| start + p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_generator_output() {
        let source = concat!(
            "'use strict'\n",
            "const globalIndex={classes:[\"A\",],methods:{},fields:{}\n",
            "};const globalQuoteList=[\"x\",]",
        );
        let bindings = split_bindings(source).unwrap();

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].name, "globalIndex");
        assert_eq!(
            bindings[0].initializer,
            "{classes:[\"A\",],methods:{},fields:{}\n}"
        );
        assert_eq!(bindings[1].name, "globalQuoteList");
        assert_eq!(bindings[1].initializer, "[\"x\",]");
        assert_eq!(&source[bindings[1].offset..], "[\"x\",]");
    }

    #[test]
    fn test_split_ignores_text_inside_strings_and_comments() {
        let source = concat!(
            "// const hidden = 1;\n",
            "let a = [\"; const b = 2\", '}]'] /* var c = 3; */\n",
            "var d = 4",
        );
        let bindings = split_bindings(source).unwrap();

        let names: Vec<&str> = bindings.iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["a", "d"]);
        assert!(bindings[0].initializer.starts_with("[\"; const b = 2\", '}]']"));
        assert_eq!(bindings[1].initializer, "4");
    }

    #[test]
    fn test_keyword_prefix_is_not_a_declaration() {
        let bindings = split_bindings("constant; const x = 1").unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].name, "x");
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let source = format!("const globalIndex={}", "[".repeat(200_000));
        let err = split_bindings(&source).unwrap_err();
        assert!(err.to_string().contains("nesting deeper than"));
    }

    #[test]
    fn test_malformed_scripts() {
        assert!(split_bindings("const x = \"open").is_err());
        assert!(split_bindings("const x = {").is_err());
        assert!(split_bindings("const x = }").is_err());
        assert!(split_bindings("const = 1").is_err());
        assert!(split_bindings("const x 1").is_err());
        assert!(split_bindings("const x =;").is_err());
        assert!(split_bindings("/* open").is_err());
    }

    #[test]
    fn test_normalize_braced_escapes() {
        assert_eq!(normalize_escapes(r#""plain\n""#), r#""plain\n""#);
        assert_eq!(normalize_escapes(r#""esc\u{1b}""#), r#""esc\u001b""#);
        assert_eq!(normalize_escapes(r#""\u{1f600}""#), r#""😀""#);
        assert_eq!(normalize_escapes(r#""\\u{41}""#), r#""\\u{41}""#);
        assert_eq!(normalize_escapes(r#""ü\u{e9}""#), r#""ü\u00e9""#);
    }
}
