use std::collections::HashMap;

use super::CompiledTemplate;

/// Render a compiled template against a variable mapping.
///
/// Values found in the mapping are HTML-entity escaped before insertion.
/// Names absent from the mapping are echoed back as their own `{{name}}`
/// marker, unescaped, so callers can detect unrendered placeholders by
/// inspecting the output. Rendering never fails.
pub fn render(template: &CompiledTemplate, variables: Option<&HashMap<String, String>>) -> String {
    let mut output = String::with_capacity(
        template
            .literals()
            .iter()
            .map(String::len)
            .sum::<usize>()
            + template.placeholder_count() * 16,
    );

    for (index, literal) in template.literals().iter().enumerate() {
        output.push_str(literal);

        if let Some(name) = template.variables().get(index) {
            match variables.and_then(|mapping| mapping.get(name)) {
                Some(value) => escape_into(&mut output, value),
                None => {
                    output.push_str("{{");
                    output.push_str(name);
                    output.push_str("}}");
                }
            }
        }
    }

    output
}

/// HTML-entity escape `value` into `output`.
///
/// Entity choices match `WebUtility.HtmlEncode`: the apostrophe becomes
/// `&#39;` rather than `&apos;`.
fn escape_into(output: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            other => output.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tokenize;
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_in_source_order() {
        let compiled = tokenize("<p>{{GREETING}}, {{NAME}}!</p>").expect("compiles");
        let vars = mapping(&[("GREETING", "Hi"), ("NAME", "<script>")]);
        assert_eq!(
            render(&compiled, Some(&vars)),
            "<p>Hi, &lt;script&gt;!</p>"
        );
    }

    #[test]
    fn escapes_all_sensitive_characters() {
        let compiled = tokenize("{{v}}").expect("compiles");
        let vars = mapping(&[("v", r#"&<>"'"#)]);
        assert_eq!(render(&compiled, Some(&vars)), "&amp;&lt;&gt;&quot;&#39;");
    }

    #[test]
    fn missing_variable_echoes_marker_unescaped() {
        let compiled = tokenize("hello {{WHO}}").expect("compiles");
        assert_eq!(render(&compiled, None), "hello {{WHO}}");
        assert_eq!(render(&compiled, Some(&mapping(&[]))), "hello {{WHO}}");
    }

    #[test]
    fn literal_only_template_is_unchanged() {
        let compiled = tokenize("no vars here").expect("compiles");
        let vars = mapping(&[("unused", "value")]);
        assert_eq!(render(&compiled, Some(&vars)), "no vars here");
        assert_eq!(render(&compiled, None), "no vars here");
    }

    #[test]
    fn duplicate_occurrences_resolve_from_the_same_entry() {
        let compiled = tokenize("{{x}} and {{x}}").expect("compiles");
        let vars = mapping(&[("x", "1")]);
        assert_eq!(render(&compiled, Some(&vars)), "1 and 1");
    }

    #[test]
    fn round_trip_preserves_literal_bytes() {
        let source = "a {{one}} b {{two}} c";
        let compiled = tokenize(source).expect("compiles");
        let vars = mapping(&[("one", "{{one}}"), ("two", "{{two}}")]);
        // Supplied values pass through escaping, so feed marker-free text.
        let plain = mapping(&[("one", "ONE"), ("two", "TWO")]);
        assert_eq!(render(&compiled, Some(&plain)), "a ONE b TWO c");
        // Braces are not escaped characters, so the markers survive verbatim.
        assert_eq!(render(&compiled, Some(&vars)), source);
    }
}
