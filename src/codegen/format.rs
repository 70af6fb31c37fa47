//! Conversion-marker lookup for `printf` / `scanf` format strings
//!
//! Format strings are split into literal text, `%%` escapes and conversion
//! markers. Text is kept exactly as written in the source (escape sequences
//! included), since both targets re-emit it inside a double-quoted literal.
//!
//! | Marker                         | Conversion |
//! |--------------------------------|------------|
//! | `%d %i %u %ld %lld`            | integer    |
//! | `%f %lf %e %g` (+ width/prec.) | float      |
//! | `%s`                           | string     |
//! | `%c`                           | character  |
//!
//! Any other marker letter is kept but carries no conversion; I/O mapping
//! treats it as an integer.

/// Value category selected by a conversion marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Integer,
    Float,
    String,
    Char,
}

impl Conversion {
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'd' | 'i' | 'u' => Some(Conversion::Integer),
            'f' | 'F' | 'e' | 'E' | 'g' | 'G' => Some(Conversion::Float),
            's' => Some(Conversion::String),
            'c' => Some(Conversion::Char),
            _ => None,
        }
    }
}

/// One `%...` conversion marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Flags and field width, e.g. `-8` or `05`
    pub flags: String,
    pub precision: Option<usize>,
    /// Conversion letter as written, length modifiers removed
    pub letter: char,
    pub conversion: Option<Conversion>,
    /// Original marker text including `%`
    pub raw: String,
}

impl Marker {
    /// Conversion used for I/O mapping; unrecognized letters read as integers
    pub fn conversion_or_default(&self) -> Conversion {
        self.conversion.unwrap_or(Conversion::Integer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// `%%`
    Percent,
    Marker(Marker),
}

/// Split a raw format string into segments. Adjacent text is merged.
pub fn parse_format(format: &str) -> Vec<Segment> {
    let chars: Vec<char> = format.chars().collect();
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch == '\\' && i + 1 < chars.len() {
            text.push(ch);
            text.push(chars[i + 1]);
            i += 2;
            continue;
        }

        if ch != '%' {
            text.push(ch);
            i += 1;
            continue;
        }

        if chars.get(i + 1) == Some(&'%') {
            flush_text(&mut text, &mut segments);
            segments.push(Segment::Percent);
            i += 2;
            continue;
        }

        match scan_marker(&chars, i) {
            Some((marker, next)) => {
                flush_text(&mut text, &mut segments);
                segments.push(Segment::Marker(marker));
                i = next;
            }
            None => {
                text.push(ch);
                i += 1;
            }
        }
    }

    flush_text(&mut text, &mut segments);
    segments
}

/// Conversions of every marker, in order
pub fn conversions(format: &str) -> Vec<Conversion> {
    parse_format(format)
        .iter()
        .filter_map(|segment| match segment {
            Segment::Marker(marker) => Some(marker.conversion_or_default()),
            _ => None,
        })
        .collect()
}

/// Text as C would print it with no arguments: `%%` collapses to `%` and
/// markers are kept verbatim
pub fn plain_text(format: &str) -> String {
    parse_format(format)
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => text.as_str(),
            Segment::Percent => "%",
            Segment::Marker(marker) => marker.raw.as_str(),
        })
        .collect()
}

fn flush_text(text: &mut String, segments: &mut Vec<Segment>) {
    if !text.is_empty() {
        segments.push(Segment::Text(std::mem::take(text)));
    }
}

/// Scan `%[flags][width][.precision][length]letter` starting at `start`.
/// Returns the marker and the index just past it.
fn scan_marker(chars: &[char], start: usize) -> Option<(Marker, usize)> {
    let mut i = start + 1;
    let mut flags = String::new();

    while let Some(&c) = chars.get(i).filter(|c| matches!(c, '-' | '+' | ' ' | '#' | '0')) {
        flags.push(c);
        i += 1;
    }
    while let Some(&c) = chars.get(i).filter(|c| c.is_ascii_digit()) {
        flags.push(c);
        i += 1;
    }

    let mut precision = None;
    if chars.get(i) == Some(&'.') {
        i += 1;
        let mut digits = String::new();
        while let Some(&c) = chars.get(i).filter(|c| c.is_ascii_digit()) {
            digits.push(c);
            i += 1;
        }
        precision = Some(digits.parse().unwrap_or(0));
    }

    while matches!(chars.get(i), Some('h' | 'l' | 'L' | 'q' | 'j' | 'z' | 't')) {
        i += 1;
    }

    let letter = *chars.get(i).filter(|c| c.is_ascii_alphabetic())?;
    let raw: String = chars[start..=i].iter().collect();

    Some((
        Marker {
            flags,
            precision,
            letter,
            conversion: Conversion::from_letter(letter),
            raw,
        },
        i + 1,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(segment: &Segment) -> &Marker {
        match segment {
            Segment::Marker(marker) => marker,
            other => panic!("Expected marker, got {:?}", other),
        }
    }

    #[test]
    fn test_marker_table() {
        assert_eq!(
            conversions("%d %i %u %ld %lld"),
            vec![Conversion::Integer; 5]
        );
        assert_eq!(conversions("%f %lf %e %g"), vec![Conversion::Float; 4]);
        assert_eq!(
            conversions("%s and %c"),
            vec![Conversion::String, Conversion::Char]
        );
    }

    #[test]
    fn test_width_and_precision() {
        let segments = parse_format("%8.2lf");
        let m = marker(&segments[0]);
        assert_eq!(m.flags, "8");
        assert_eq!(m.precision, Some(2));
        assert_eq!(m.letter, 'f');
        assert_eq!(m.raw, "%8.2lf");
        assert_eq!(m.conversion, Some(Conversion::Float));
    }

    #[test]
    fn test_text_percent_and_escapes() {
        let segments = parse_format("Total: %d%%\\n");
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0], Segment::Text("Total: ".to_string()));
        assert_eq!(marker(&segments[1]).letter, 'd');
        assert_eq!(segments[2], Segment::Percent);
        assert_eq!(segments[3], Segment::Text("\\n".to_string()));
    }

    #[test]
    fn test_unrecognized_marker_defaults_to_integer() {
        let segments = parse_format("%x");
        let m = marker(&segments[0]);
        assert_eq!(m.conversion, None);
        assert_eq!(m.conversion_or_default(), Conversion::Integer);
    }

    #[test]
    fn test_dangling_percent_is_text() {
        assert_eq!(
            parse_format("100% "),
            vec![Segment::Text("100% ".to_string())]
        );
        assert!(conversions("no markers").is_empty());
    }

    #[test]
    fn test_plain_text_collapses_percent() {
        assert_eq!(plain_text("100%% done\\n"), "100% done\\n");
        assert_eq!(plain_text("%5d left"), "%5d left");
    }
}
