use crate::utils::cursor::Cursor;
use smallvec::SmallVec;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Bool,
    Null,
    Object,
    Array,
}

/// Byte range of one JSON value within the input, including delimiters.
/// Only the currently relevant span ever exists; no tree is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub kind: ValueKind,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    UnexpectedEof,
    UnterminatedString,
    MismatchedBracket,
    BadToken,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::UnexpectedEof => write!(f, "unexpected end of input"),
            ScanError::UnterminatedString => write!(f, "unterminated string"),
            ScanError::MismatchedBracket => write!(f, "mismatched bracket"),
            ScanError::BadToken => write!(f, "unrecognized token"),
        }
    }
}

impl std::error::Error for ScanError {}

/// 跳过游标所在的一个 JSON 值，返回其字节范围。
/// The cursor must already sit on the first byte of the value
/// (whitespace skipped by the caller).
pub fn skip_value(cursor: &mut Cursor<'_>) -> Result<Span, ScanError> {
    let start = cursor.pos;
    let kind = match cursor.peek().ok_or(ScanError::UnexpectedEof)? {
        b'"' => {
            skip_string(cursor)?;
            ValueKind::String
        }
        b'{' | b'[' => skip_container(cursor)?,
        b'0'..=b'9' | b'-' => {
            skip_number(cursor)?;
            ValueKind::Number
        }
        b't' => {
            expect_literal(cursor, b"true")?;
            ValueKind::Bool
        }
        b'f' => {
            expect_literal(cursor, b"false")?;
            ValueKind::Bool
        }
        b'n' => {
            expect_literal(cursor, b"null")?;
            ValueKind::Null
        }
        _ => return Err(ScanError::BadToken),
    };
    Ok(Span {
        kind,
        start,
        end: cursor.pos,
    })
}

/// 跳过带引号的字符串：进入时游标在开引号上，返回时在闭引号之后。
/// A backslash consumes the following byte unconditionally, so `\"`
/// never terminates; escape sequences are not decoded.
pub(crate) fn skip_string(cursor: &mut Cursor<'_>) -> Result<(), ScanError> {
    cursor.advance(1);
    loop {
        let rest = cursor.remaining();
        match memchr::memchr2(b'"', b'\\', rest) {
            Some(i) if rest[i] == b'\\' => {
                if i + 1 >= rest.len() {
                    return Err(ScanError::UnterminatedString);
                }
                cursor.advance(i + 2);
            }
            Some(i) => {
                cursor.advance(i + 1);
                return Ok(());
            }
            None => return Err(ScanError::UnterminatedString),
        }
    }
}

/// 用显式栈平衡括号跳过对象或数组，绝不走原生调用栈，
/// 病态的嵌套深度也打不爆栈。Every closer must match the opener on
/// top of the stack; strings are skipped whole so brackets inside them
/// don't count toward nesting.
fn skip_container(cursor: &mut Cursor<'_>) -> Result<ValueKind, ScanError> {
    let kind = match cursor.peek() {
        Some(b'{') => ValueKind::Object,
        Some(b'[') => ValueKind::Array,
        _ => return Err(ScanError::BadToken),
    };
    let mut stack: SmallVec<[u8; 32]> = SmallVec::new();
    loop {
        match cursor.peek().ok_or(ScanError::UnexpectedEof)? {
            b'"' => skip_string(cursor)?,
            opener @ (b'{' | b'[') => {
                stack.push(opener);
                cursor.advance(1);
            }
            b'}' => {
                if stack.pop() != Some(b'{') {
                    return Err(ScanError::MismatchedBracket);
                }
                cursor.advance(1);
                if stack.is_empty() {
                    return Ok(kind);
                }
            }
            b']' => {
                if stack.pop() != Some(b'[') {
                    return Err(ScanError::MismatchedBracket);
                }
                cursor.advance(1);
                if stack.is_empty() {
                    return Ok(kind);
                }
            }
            _ => cursor.advance(1),
        }
    }
}

/// 贪婪扫出数字字符的连续一段，再整体按词法校验。
/// A run that is cut off only by the end of input has no delimiter, so
/// the token cannot be complete yet; that is an error, not a value.
fn skip_number(cursor: &mut Cursor<'_>) -> Result<(), ScanError> {
    let input = cursor.remaining();
    let mut len = 0;
    while len < input.len() {
        match input[len] {
            b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E' => len += 1,
            _ => break,
        }
    }
    if !is_number_token(&input[..len]) {
        return Err(ScanError::BadToken);
    }
    if len == input.len() {
        return Err(ScanError::UnexpectedEof);
    }
    cursor.advance(len);
    Ok(())
}

/// One optional leading `-`, an integer part, optional fraction, optional
/// exponent; the whole run must be consumed by that grammar.
fn is_number_token(token: &[u8]) -> bool {
    let mut i = 0;
    if token.first() == Some(&b'-') {
        i = 1;
    }
    let int_start = i;
    while i < token.len() && token[i].is_ascii_digit() {
        i += 1;
    }
    if i == int_start {
        return false;
    }
    if i < token.len() && token[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < token.len() && token[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return false;
        }
    }
    if i < token.len() && (token[i] == b'e' || token[i] == b'E') {
        i += 1;
        if i < token.len() && (token[i] == b'+' || token[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < token.len() && token[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == token.len()
}

fn expect_literal(cursor: &mut Cursor<'_>, literal: &[u8]) -> Result<(), ScanError> {
    if cursor.matches(literal) {
        cursor.advance(literal.len());
        Ok(())
    } else {
        Err(ScanError::BadToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skip(input: &str) -> Result<Span, ScanError> {
        let mut cursor = Cursor::new(input.as_bytes());
        skip_value(&mut cursor)
    }

    #[test]
    fn spans_cover_each_value_kind() {
        let cases: &[(&str, ValueKind, usize)] = &[
            (r#""foo""#, ValueKind::String, 5),
            ("42.356,", ValueKind::Number, 6),
            ("-1.5e10}", ValueKind::Number, 7),
            ("6e+10 ", ValueKind::Number, 5),
            ("true", ValueKind::Bool, 4),
            ("false", ValueKind::Bool, 5),
            ("null", ValueKind::Null, 4),
            (r#"{"b":1}"#, ValueKind::Object, 7),
            ("[1,2,3]", ValueKind::Array, 7),
        ];
        for (input, kind, end) in cases {
            let span = skip(input).unwrap();
            assert_eq!(span.kind, *kind, "input {input:?}");
            assert_eq!((span.start, span.end), (0, *end), "input {input:?}");
        }
    }

    #[test]
    fn trailing_bytes_are_untouched() {
        let mut cursor = Cursor::new(b"[null,2,{\"a\":1}],\"z\"");
        let span = skip_value(&mut cursor).unwrap();
        assert_eq!(span.end, 16);
        assert_eq!(cursor.peek(), Some(b','));
    }

    #[test]
    fn escaped_quotes_do_not_terminate() {
        let span = skip(r#""x\"y""#).unwrap();
        assert_eq!(span.end, 6);
    }

    #[test]
    fn brackets_inside_strings_do_not_nest() {
        let span = skip(r#"{"a":"}]"}"#).unwrap();
        assert_eq!(span.kind, ValueKind::Object);
        assert_eq!(span.end, 10);
    }

    #[test]
    fn mismatched_closers_fail() {
        assert_eq!(skip("[1,2}"), Err(ScanError::MismatchedBracket));
        assert_eq!(skip(r#"{"a":1]"#), Err(ScanError::MismatchedBracket));
    }

    #[test]
    fn unterminated_inputs_fail() {
        assert_eq!(skip(r#""abc"#), Err(ScanError::UnterminatedString));
        assert_eq!(skip(r#""abc\"#), Err(ScanError::UnterminatedString));
        assert_eq!(skip("[1,2"), Err(ScanError::UnexpectedEof));
        assert_eq!(skip(""), Err(ScanError::UnexpectedEof));
    }

    #[test]
    fn bad_tokens_fail() {
        assert_eq!(skip("tru"), Err(ScanError::BadToken));
        assert_eq!(skip("nul"), Err(ScanError::BadToken));
        assert_eq!(skip("-"), Err(ScanError::BadToken));
        assert_eq!(skip(":1"), Err(ScanError::BadToken));
        assert_eq!(skip("_"), Err(ScanError::BadToken));
    }

    #[test]
    fn malformed_number_runs_fail() {
        // The whole contiguous run is the token; a valid prefix with
        // number-ish garbage after it is not a shorter number.
        assert_eq!(skip("1e}"), Err(ScanError::BadToken));
        assert_eq!(skip("1e+}"), Err(ScanError::BadToken));
        assert_eq!(skip("1-2}"), Err(ScanError::BadToken));
        assert_eq!(skip("1..2}"), Err(ScanError::BadToken));
        assert_eq!(skip("1.e3}"), Err(ScanError::BadToken));
        assert_eq!(skip("1.}"), Err(ScanError::BadToken));
        assert_eq!(skip("--1}"), Err(ScanError::BadToken));
        assert_eq!(skip("-.5}"), Err(ScanError::BadToken));
    }

    #[test]
    fn numbers_need_a_delimiter_to_finish() {
        // An undelimited number at end of input is still incomplete, the
        // way a streaming lexer would hold the token open.
        assert_eq!(skip("42"), Err(ScanError::UnexpectedEof));
        assert_eq!(skip("-1.5e10"), Err(ScanError::UnexpectedEof));
        assert_eq!(skip("42,").unwrap().end, 2);
        assert_eq!(skip("42 ").unwrap().end, 2);
        assert_eq!(skip("42}").unwrap().end, 2);
    }

    #[test]
    fn deep_nesting_uses_no_call_stack() {
        let mut input = String::new();
        for _ in 0..10_000 {
            input.push('[');
        }
        for _ in 0..10_000 {
            input.push(']');
        }
        let span = skip(&input).unwrap();
        assert_eq!(span.kind, ValueKind::Array);
        assert_eq!(span.end, 20_000);
    }
}
