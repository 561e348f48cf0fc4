use super::path::Path;
use super::scanner::{self, Span};
use crate::utils::cursor::Cursor;

/// 每个路径组件走一层对象，返回叶子值的字节范围。
/// `None` covers every way the path can fail to resolve: a
/// top level that is not an object, a missing key, descending through a
/// non-object value, or malformed syntax anywhere along the traversal.
///
/// Keys are compared byte-exact against the raw key content between the
/// quotes (escapes are not decoded). Within an object, the first matching
/// key wins; later duplicates are never visited.
pub fn find_value(path: &Path, input: &[u8]) -> Option<Span> {
    let mut cursor = Cursor::new(input);
    let components = path.components();
    for (idx, component) in components.iter().enumerate() {
        cursor.skip_whitespace();
        if cursor.peek() != Some(b'{') {
            return None;
        }
        cursor.advance(1);
        let mut descended = false;
        while !descended {
            cursor.skip_whitespace();
            if cursor.peek() != Some(b'"') {
                return None;
            }
            let key = read_key(&mut cursor)?;
            cursor.skip_whitespace();
            if cursor.peek() != Some(b':') {
                return None;
            }
            cursor.advance(1);
            cursor.skip_whitespace();
            if key == component.as_slice() {
                if idx + 1 == components.len() {
                    return scanner::skip_value(&mut cursor).ok();
                }
                // The outer loop re-checks that the matched value is an
                // object before consuming the next component.
                descended = true;
            } else {
                scanner::skip_value(&mut cursor).ok()?;
                cursor.skip_whitespace();
                match cursor.peek() {
                    Some(b',') => cursor.advance(1),
                    // `}` ends the object without a match; anything else
                    // is malformed. Same outcome either way.
                    _ => return None,
                }
            }
        }
    }
    None
}

/// Reads a quoted key, returning the raw content between the quotes.
fn read_key<'a>(cursor: &mut Cursor<'a>) -> Option<&'a [u8]> {
    let start = cursor.pos + 1;
    scanner::skip_string(cursor).ok()?;
    Some(&cursor.input()[start..cursor.pos - 1])
}
