//! Splits long text into segments small enough for one QR symbol each.
//!
//! Text is viewed as alternating runs of whitespace and non-whitespace. Segments are filled
//! greedily with whole runs; a run longer than the budget is cut at character boundaries. Nothing
//! is normalized, so concatenating the segments in order reproduces the input byte for byte.

/// One bounded slice of a document, paired one-to-one with a QR artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    index: usize,
    total: usize,
    text: String,
}

impl Segment {
    /// Segments `text` and numbers the pieces `0..total`.
    pub fn collect(text: &str, max_chars: usize) -> Vec<Segment> {
        let pieces = segment(text, max_chars);
        let total = pieces.len();
        pieces
            .into_iter()
            .enumerate()
            .map(|(index, text)| Segment { index, total, text })
            .collect()
    }

    /// Zero-based position in the document.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters, the unit the segment budget is measured in.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Length of the UTF-8 payload written into the symbol.
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }
}

/// Splits `text` into ordered pieces of at most `max_chars` characters.
///
/// Breaks fall between a whitespace run and a non-whitespace run whenever possible. A single run
/// longer than `max_chars` is split into `max_chars`-sized pieces, never inside a character. An
/// empty `text` yields no pieces. A `max_chars` of zero is treated as one.
///
/// ```rust
/// use longqr::segmenter::segment;
///
/// let pieces = segment("alpha beta gamma", 11);
/// assert_eq!(pieces, ["alpha beta ", "gamma"]);
/// assert_eq!(pieces.concat(), "alpha beta gamma");
/// ```
pub fn segment(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if text.is_empty() {
        return Vec::new();
    }
    if text.chars().count() <= max_chars {
        return vec![text.to_owned()];
    }

    let mut segments = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (offset, run) in Runs::new(text) {
        let n = run.chars().count();
        if used + n <= max_chars {
            used += n;
            continue;
        }
        if used > 0 {
            segments.push(text[start..offset].to_owned());
            start = offset;
        }
        if n <= max_chars {
            used = n;
            continue;
        }

        // Oversized run: emit full pieces, the tail stays open for the following runs
        let mut chunk = 0;
        for (i, _) in run.char_indices() {
            if chunk == max_chars {
                segments.push(text[start..offset + i].to_owned());
                start = offset + i;
                chunk = 0;
            }
            chunk += 1;
        }
        used = chunk;
    }
    if used > 0 {
        segments.push(text[start..].to_owned());
    }
    segments
}

/// Maximal runs of all-whitespace or all-non-whitespace characters, with their byte offsets.
struct Runs<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Runs<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let whitespace = rest.chars().next()?.is_whitespace();
        let len = rest
            .find(|c: char| c.is_whitespace() != whitespace)
            .unwrap_or(rest.len());
        let start = self.pos;
        self.pos += len;
        Some((start, &rest[..len]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lens(pieces: &[String]) -> Vec<usize> {
        pieces.iter().map(|p| p.chars().count()).collect()
    }

    #[test]
    fn test_short_text_is_one_segment() {
        let s = "a".repeat(10);
        assert_eq!(segment(&s, 800), vec![s]);
    }

    #[test]
    fn test_exact_budget_is_one_segment() {
        let s = "b".repeat(800);
        assert_eq!(segment(&s, 800).len(), 1);
    }

    #[test]
    fn test_words_split_at_whitespace() {
        let s = "word ".repeat(200).trim().to_owned();
        let pieces = segment(&s, 800);
        assert_eq!(lens(&pieces), vec![800, 199]);
        assert!(pieces[0].ends_with(' '));
        assert!(pieces[1].starts_with("word"));
        assert_eq!(pieces.concat(), s);
    }

    #[test]
    fn test_every_break_is_between_runs() {
        let s = "lorem ipsum dolor sit amet, consectetur adipiscing elit ".repeat(40);
        let pieces = segment(&s, 73);
        for pair in pieces.windows(2) {
            let before = pair[0].chars().last().unwrap().is_whitespace();
            let after = pair[1].chars().next().unwrap().is_whitespace();
            assert_ne!(before, after, "break inside a run: {:?} | {:?}", pair[0], pair[1]);
        }
        assert_eq!(pieces.concat(), s);
    }

    #[test]
    fn test_unbroken_text_splits_by_characters() {
        let s = "x".repeat(2000);
        let pieces = segment(&s, 800);
        assert_eq!(lens(&pieces), vec![800, 800, 400]);
    }

    #[test]
    fn test_long_word_chunks() {
        let s = "w".repeat(5000);
        let pieces = segment(&s, 800);
        assert_eq!(lens(&pieces), vec![800, 800, 800, 800, 800, 800, 200]);
        assert!(pieces.iter().all(|p| !p.contains(char::is_whitespace)));
        assert_eq!(lens(&pieces).iter().sum::<usize>(), 5000);
    }

    #[test]
    fn test_long_word_between_words() {
        let s = format!("intro {} outro", "w".repeat(25));
        let pieces = segment(&s, 10);
        assert_eq!(pieces, ["intro ", "wwwwwwwwww", "wwwwwwwwww", "wwwww ", "outro"]);
    }

    #[test]
    fn test_multibyte_characters_stay_whole() {
        let s = "二维码".repeat(300);
        let pieces = segment(&s, 128);
        assert_eq!(lens(&pieces), vec![128, 128, 128, 128, 128, 128, 128, 4]);
        assert_eq!(pieces.concat(), s);

        let emoji = "🦀".repeat(7);
        assert_eq!(segment(&emoji, 3), ["🦀🦀🦀", "🦀🦀🦀", "🦀"]);
    }

    #[test]
    fn test_whitespace_preserved_verbatim() {
        let s = "one\t\ttwo\n\n\nthree   four \r\n".repeat(30);
        let pieces = segment(&s, 16);
        assert!(pieces.iter().all(|p| p.chars().count() <= 16));
        assert_eq!(pieces.concat(), s);
    }

    #[test]
    fn test_long_whitespace_run_is_cut() {
        let s = format!("a{}b", " ".repeat(10));
        let pieces = segment(&s, 3);
        assert_eq!(pieces, ["a", "   ", "   ", "   ", " b"]);
    }

    #[test]
    fn test_unit_budget() {
        assert_eq!(segment("ab c", 1), ["a", "b", " ", "c"]);
        assert_eq!(segment("ab c", 0), segment("ab c", 1));
    }

    #[test]
    fn test_empty_text_has_no_segments() {
        assert!(segment("", 800).is_empty());
        assert!(Segment::collect("", 800).is_empty());
    }

    #[test]
    fn test_no_empty_segments() {
        let s = "  lead and trail  ".repeat(9);
        for budget in 1..20 {
            assert!(segment(&s, budget).iter().all(|p| !p.is_empty()));
        }
    }

    #[test]
    fn test_deterministic() {
        let s = "repeatable output, ".repeat(100);
        assert_eq!(segment(&s, 97), segment(&s, 97));
    }

    #[test]
    fn test_collect_numbers_segments() {
        let segments = Segment::collect(&"x".repeat(2000), 800);
        assert_eq!(segments.len(), 3);
        for (i, seg) in segments.iter().enumerate() {
            assert_eq!(seg.index(), i);
            assert_eq!(seg.total(), 3);
        }
        assert_eq!(segments[2].char_count(), 400);
        assert_eq!(segments[2].byte_len(), 400);
    }

    #[test]
    fn test_round_trip_over_budgets() {
        let s = "Ünïcödé wörds,\tsome\u{3000}ideographic 空白 and    gaps.\n".repeat(25);
        for budget in [1, 2, 5, 13, 64, 255, 800, 5000] {
            let pieces = segment(&s, budget);
            assert_eq!(pieces.concat(), s, "budget {}", budget);
            assert!(pieces.iter().all(|p| p.chars().count() <= budget));
        }
    }
}
