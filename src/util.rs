/// The tail of `lines` that fits in `max_height` rows.
pub fn visible_lines<T>(lines: &[T], max_height: usize) -> &[T] {
    &lines[lines.len().saturating_sub(max_height)..]
}

/// Byte offset of the char at `char_idx`, or the string length past the end.
pub fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map(|(ix, _)| ix).unwrap_or(s.len())
}

/// Longest prefix shared by all `words`.
pub fn common_prefix<S: AsRef<str>>(words: &[S]) -> &str {
    let Some((first, rest)) = words.split_first() else {
        return "";
    };
    let first = first.as_ref();
    let mut end = first.len();
    for word in rest {
        end = first
            .char_indices()
            .zip(word.as_ref().chars())
            .find(|((_, a), b)| a != b)
            .map(|((ix, _), _)| ix)
            .unwrap_or_else(|| end.min(word.as_ref().len()))
            .min(end);
    }
    &first[..end]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn visible_tail() {
        let lines = [1, 2, 3, 4];
        assert_eq!(visible_lines(&lines, 2), &[3, 4]);
        assert_eq!(visible_lines(&lines, 10), &lines);
        assert!(visible_lines(&lines, 0).is_empty());
    }

    #[test]
    fn offsets() {
        assert_eq!(byte_offset("héllo", 2), 3);
        assert_eq!(byte_offset("abc", 5), 3);
    }

    #[test]
    fn prefixes() {
        assert_eq!(common_prefix(&["contact", "contributions"]), "cont");
        assert_eq!(common_prefix(&["help", "helpful"]), "help");
        assert_eq!(common_prefix(&["a", "b"]), "");
        assert_eq!(common_prefix::<&str>(&[]), "");
        assert_eq!(common_prefix(&["éa", "éb"]), "é");
    }
}
