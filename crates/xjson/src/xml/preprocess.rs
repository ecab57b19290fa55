//! Prologue and comment removal ahead of tag matching

use std::borrow::Cow;

const DECLARATION_OPEN: &str = "<?xml";
const DECLARATION_CLOSE: &str = "?>";
const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Remove the first `<?xml ... ?>` declaration and every `<!-- ... -->`
/// comment, then trim surrounding whitespace.
///
/// A declaration is only recognised when it closes on the line it opens on.
/// An unterminated comment is kept, along with everything after it.
pub fn preprocess(input: &str) -> Cow<'_, str> {
    let stripped = match strip_declaration(input) {
        Some(rest) => Cow::Owned(strip_comments(&rest).unwrap_or(rest)),
        None => strip_comments(input).map_or(Cow::Borrowed(input), Cow::Owned),
    };

    match stripped {
        Cow::Borrowed(text) => Cow::Borrowed(text.trim()),
        Cow::Owned(text) => Cow::Owned(text.trim().to_owned()),
    }
}

fn strip_declaration(input: &str) -> Option<String> {
    let (start, end) = find_declaration(input)?;
    let mut out = String::with_capacity(input.len());
    out.push_str(input.get(..start)?);
    out.push_str(input.get(end..)?);
    Some(out)
}

fn find_declaration(input: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(found) = input.get(from..)?.find(DECLARATION_OPEN) {
        let start = from + found;
        let body_start = start + DECLARATION_OPEN.len();
        let body = input.get(body_start..)?;
        let eol = body.find(|c: char| c == '\n' || c == '\r');
        let line = eol.and_then(|eol| body.get(..eol)).unwrap_or(body);
        if let Some(close) = line.find(DECLARATION_CLOSE) {
            return Some((start, body_start + close + DECLARATION_CLOSE.len()));
        }
        // no later opener on this line can close on it either
        from = body_start + eol?;
    }
    None
}

fn strip_comments(input: &str) -> Option<String> {
    let mut out: Option<String> = None;
    let mut rest = input;

    while let Some(open) = rest.find(COMMENT_OPEN) {
        let after = open + COMMENT_OPEN.len();
        let Some(close) = rest.get(after..).and_then(|s| s.find(COMMENT_CLOSE)) else {
            break;
        };
        let buf = out.get_or_insert_with(|| String::with_capacity(input.len()));
        buf.push_str(rest.get(..open).unwrap_or_default());
        rest = rest
            .get(after + close + COMMENT_CLOSE.len()..)
            .unwrap_or_default();
    }

    let mut buf = out?;
    buf.push_str(rest);
    Some(buf)
}
