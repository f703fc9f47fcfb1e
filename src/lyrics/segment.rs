//! Splitting raw lyric input into line segments.

use crate::constants::lyrics::SEGMENT_BREAKS;

/// Split lyric text into lines on full-width punctuation.
///
/// Whitespace (including a byte order mark) is removed before splitting and
/// never separates lines. The
/// punctuation marks themselves are dropped, as are empty segments, so runs
/// of punctuation never produce blank lines.
///
/// ```
/// use chordsbox::lyrics::segment;
///
/// assert_eq!(segment("你好，世界。再见"), vec!["你好", "世界", "再见"]);
/// ```
pub fn segment(text: &str) -> Vec<String> {
    let compact: String = text.chars().filter(|&c| !is_ignored_space(c)).collect();

    compact
        .split(is_segment_break)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Whether `c` is dropped from lyric input: Unicode whitespace and U+FEFF.
pub fn is_ignored_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Whether `c` ends a lyric segment.
pub fn is_segment_break(c: char) -> bool {
    SEGMENT_BREAKS.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_full_width_punctuation() {
        assert_eq!(segment("你好，世界。再见"), vec!["你好", "世界", "再见"]);
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(segment("   ").is_empty());
        assert!(segment("").is_empty());
        assert!(segment("\n\t ").is_empty());
    }

    #[test]
    fn whitespace_is_removed_not_a_separator() {
        assert_eq!(segment("你 好\n世界"), vec!["你好世界"]);
        assert_eq!(segment("hello world"), vec!["helloworld"]);
    }

    #[test]
    fn byte_order_mark_is_dropped() {
        assert_eq!(segment("\u{feff}你好，世界"), vec!["你好", "世界"]);
        assert_eq!(segment("[C]a\u{feff}b"), vec!["[C]ab"]);
    }

    #[test]
    fn runs_of_punctuation_produce_no_empty_lines() {
        assert_eq!(segment("，，你好！？；世界、"), vec!["你好", "世界"]);
        assert!(segment("，。、；：！？").is_empty());
    }

    #[test]
    fn every_mark_in_the_set_splits() {
        assert_eq!(
            segment("一，二。三、四；五：六！七？八"),
            vec!["一", "二", "三", "四", "五", "六", "七", "八"]
        );
    }

    #[test]
    fn ascii_punctuation_is_kept() {
        assert_eq!(segment("Hi, there."), vec!["Hi,there."]);
    }

    #[test]
    fn markers_survive_segmentation() {
        assert_eq!(segment("[Am]你好，[G]世界"), vec!["[Am]你好", "[G]世界"]);
    }

    #[test]
    fn output_is_clean_and_ordered() {
        let input = " 春 眠，不觉晓 。 处处闻啼鸟 ";
        let out = segment(input);
        assert_eq!(out, vec!["春眠", "不觉晓", "处处闻啼鸟"]);
        for seg in &out {
            assert!(!seg.is_empty());
            assert!(!seg.chars().any(|c| c.is_whitespace() || is_segment_break(c)));
        }
    }

    #[test]
    fn resegmenting_joined_output_is_stable() {
        let first = segment("你好，世界。再见");
        let joined = first.concat();
        assert_eq!(segment(&joined), vec![joined.clone()]);
        assert_eq!(segment(&segment(&joined).concat()), vec![joined]);
    }
}
