use super::scanner::{Span, ValueKind};

/// 匹配到的叶子的文本表示：for strings, the bytes between the quotes
/// (escapes passed through, not decoded); for every other kind, the
/// token or serialized container verbatim.
pub fn rendered<'a>(input: &'a [u8], span: &Span) -> &'a [u8] {
    match span.kind {
        ValueKind::String => &input[span.start + 1..span.end - 1],
        _ => &input[span.start..span.end],
    }
}

/// Copies at most `dst.len()` bytes from `src` and reports how many were
/// written. Truncation keeps the leading bytes and is silent.
pub fn write_bounded(src: &[u8], dst: &mut [u8]) -> usize {
    let n = src.len().min(dst.len());
    dst[..n].copy_from_slice(&src[..n]);
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_lose_their_quotes_only() {
        let input = br#""x\"y""#;
        let span = Span {
            kind: ValueKind::String,
            start: 0,
            end: input.len(),
        };
        assert_eq!(rendered(input, &span), br#"x\"y"#);
    }

    #[test]
    fn containers_keep_their_delimiters() {
        let input = br#"{"b":1}"#;
        let span = Span {
            kind: ValueKind::Object,
            start: 0,
            end: input.len(),
        };
        assert_eq!(rendered(input, &span), input);
    }

    #[test]
    fn write_bounded_truncates_silently() {
        let mut buf = [0u8; 4];
        assert_eq!(write_bounded(b"abcdef", &mut buf), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(write_bounded(b"ab", &mut buf), 2);
        assert_eq!(write_bounded(b"", &mut buf), 0);
        assert_eq!(write_bounded(b"abc", &mut []), 0);
    }
}
