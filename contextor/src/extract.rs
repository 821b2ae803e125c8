//! Trims the raw model output down to the answer span.

/// Beginning of the answer span; always matched case-sensitively.
pub const START_MARKER: &str = "Question:";
/// End of the answer span; included in the result.
pub const END_MARKER: &str = "Thanks for asking!";

/// How [`END_MARKER`] is matched.
///
/// The prompt asks for a lowercase "thanks for asking!" while the marker is
/// capitalized, so a literal match misses the usual phrasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkerCase {
    #[default]
    Sensitive,
    /// ASCII case-insensitive.
    Insensitive,
}

impl std::str::FromStr for MarkerCase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sensitive" => Ok(Self::Sensitive),
            "insensitive" => Ok(Self::Insensitive),
            other => Err(format!(
                "expected `sensitive` or `insensitive`, got {other:?}"
            )),
        }
    }
}

/// Returns the slice of `raw` from the start marker through the end marker.
///
/// | start | end (after start) | result |
/// |-------|-------------------|--------|
/// | at `s` | at `e` | `raw[s..e + END_MARKER.len()]` |
/// | at `s` | none | `raw[s..]` |
/// | none | at `e` | `raw[..e + END_MARKER.len()]` |
/// | none | none | `raw` |
///
/// ```
/// use contextor::extract::{extract_answer, MarkerCase};
/// let raw = "noise Question: q? A. Thanks for asking! trailing";
/// assert_eq!(
///     extract_answer(raw, MarkerCase::Sensitive),
///     "Question: q? A. Thanks for asking!"
/// );
/// ```
pub fn extract_answer(raw: &str, case: MarkerCase) -> &str {
    let start = raw.find(START_MARKER).unwrap_or(0);
    let tail = &raw[start..];

    let end = match case {
        MarkerCase::Sensitive => tail.find(END_MARKER),
        MarkerCase::Insensitive => find_ascii_ci(tail, END_MARKER),
    };

    match end {
        Some(e) => &tail[..e + END_MARKER.len()],
        None => tail,
    }
}

/// ASCII lowercasing keeps byte offsets, so indices map back onto `haystack`.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_markers_present() {
        let raw = "junk\nQuestion: What is CV?\nAnswer text. Thanks for asking! extra";
        assert_eq!(
            extract_answer(raw, MarkerCase::Sensitive),
            "Question: What is CV?\nAnswer text. Thanks for asking!"
        );
    }

    #[test]
    fn only_start_marker_keeps_the_tail() {
        let raw = "junk Question: What is CV? It is a field of AI.";
        assert_eq!(
            extract_answer(raw, MarkerCase::Sensitive),
            "Question: What is CV? It is a field of AI."
        );
    }

    #[test]
    fn only_end_marker_keeps_the_head() {
        let raw = "Computer vision lets machines see. Thanks for asking! bye";
        assert_eq!(
            extract_answer(raw, MarkerCase::Sensitive),
            "Computer vision lets machines see. Thanks for asking!"
        );
    }

    #[test]
    fn no_markers_returns_input_unchanged() {
        let raw = "  Computer vision lets machines see.  ";
        assert_eq!(extract_answer(raw, MarkerCase::Sensitive), raw);
        assert_eq!(extract_answer(raw, MarkerCase::Insensitive), raw);
        assert_eq!(extract_answer("", MarkerCase::Sensitive), "");
    }

    #[test]
    fn lowercase_end_marker_depends_on_case_mode() {
        let raw = "Question: q? CV is vision. thanks for asking! more";
        assert_eq!(
            extract_answer(raw, MarkerCase::Sensitive),
            "Question: q? CV is vision. thanks for asking! more"
        );
        assert_eq!(
            extract_answer(raw, MarkerCase::Insensitive),
            "Question: q? CV is vision. thanks for asking!"
        );
    }

    #[test]
    fn end_marker_before_start_is_ignored() {
        let raw = "Thanks for asking! Question: q? answer";
        assert_eq!(
            extract_answer(raw, MarkerCase::Sensitive),
            "Question: q? answer"
        );
    }

    #[test]
    fn start_marker_is_always_case_sensitive() {
        let raw = "question: q? answer. Thanks for asking!";
        assert_eq!(extract_answer(raw, MarkerCase::Insensitive), raw);
    }

    #[test]
    fn insensitive_match_keeps_multibyte_offsets() {
        let raw = "Qüestion é Question: ñ THANKS FOR ASKING! z";
        assert_eq!(
            extract_answer(raw, MarkerCase::Insensitive),
            "Question: ñ THANKS FOR ASKING!"
        );
    }

    #[test]
    fn case_mode_parses_from_text() {
        assert_eq!("Insensitive".parse::<MarkerCase>(), Ok(MarkerCase::Insensitive));
        assert_eq!(" sensitive ".parse::<MarkerCase>(), Ok(MarkerCase::Sensitive));
        assert!("loose".parse::<MarkerCase>().is_err());
    }
}
