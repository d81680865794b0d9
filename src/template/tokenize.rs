use super::{CompiledTemplate, error::TemplateError};

const OPEN_MARKER: &str = "{{";
const CLOSE_MARKER: &str = "}}";

/// Tokenize raw template text into a [`CompiledTemplate`].
///
/// Scans left to right for `{{`; the text since the previous marker becomes a
/// literal, the text up to the matching `}}` becomes a placeholder name, taken
/// verbatim (no trimming, no character-set validation). The trailing literal
/// is always emitted, even when empty, so the literal sequence is exactly one
/// longer than the placeholder sequence.
pub fn tokenize(source: &str) -> Result<CompiledTemplate, TemplateError> {
    let mut literals = Vec::new();
    let mut variables = Vec::new();
    let mut cursor = 0;

    loop {
        let Some(relative) = source[cursor..].find(OPEN_MARKER) else {
            literals.push(source[cursor..].to_string());
            break;
        };
        let open = cursor + relative;
        literals.push(source[cursor..open].to_string());

        let name_start = open + OPEN_MARKER.len();
        let Some(relative) = source[name_start..].find(CLOSE_MARKER) else {
            return Err(TemplateError::UnclosedTag { offset: open });
        };
        let close = name_start + relative;
        variables.push(source[name_start..close].to_string());
        cursor = close + CLOSE_MARKER.len();
    }

    Ok(CompiledTemplate { literals, variables })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_yields_single_literal() {
        let compiled = tokenize("no vars here").expect("compiles");
        assert_eq!(compiled.literals(), ["no vars here"]);
        assert!(compiled.variables().is_empty());
    }

    #[test]
    fn empty_input_yields_single_empty_literal() {
        let compiled = tokenize("").expect("compiles");
        assert_eq!(compiled.literals(), [""]);
        assert_eq!(compiled.placeholder_count(), 0);
    }

    #[test]
    fn interleaving_invariant_holds() {
        let compiled = tokenize("<p>{{GREETING}}, {{NAME}}!</p>").expect("compiles");
        assert_eq!(compiled.literals(), ["<p>", ", ", "!</p>"]);
        assert_eq!(compiled.variables(), ["GREETING", "NAME"]);
    }

    #[test]
    fn adjacent_placeholders_keep_empty_literal_between() {
        let compiled = tokenize("{{a}}{{b}}").expect("compiles");
        assert_eq!(compiled.literals(), ["", "", ""]);
        assert_eq!(compiled.variables(), ["a", "b"]);
    }

    #[test]
    fn placeholder_names_are_taken_verbatim() {
        let compiled = tokenize("{{ spaced name }}").expect("compiles");
        assert_eq!(compiled.variables(), [" spaced name "]);
    }

    #[test]
    fn duplicate_names_are_independent_occurrences() {
        let compiled = tokenize("{{x}}-{{x}}").expect("compiles");
        assert_eq!(compiled.variables(), ["x", "x"]);
    }

    #[test]
    fn unclosed_marker_reports_its_offset() {
        let err = tokenize("Hello {{name").expect_err("must fail");
        match err {
            TemplateError::UnclosedTag { offset } => assert_eq!(offset, 6),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn later_unclosed_marker_after_valid_placeholder() {
        let err = tokenize("{{ok}} and {{broken").expect_err("must fail");
        match err {
            TemplateError::UnclosedTag { offset } => assert_eq!(offset, 11),
            other => panic!("unexpected error: {other}"),
        }
    }
}
