use std::sync::OnceLock;

use regex::Regex;

/// Placeholder pattern: `{{ env.VAR }}` or `{{ env.VAR | default("x") }}`
fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// A `default("...")` fallback is used when the variable is unset; without
/// one a missing variable is an error. Comment lines are passed through
/// unchanged so commented-out secrets do not have to resolve.
pub fn expand_placeholders(input: &str) -> Result<String, String> {
    let mut output = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut last_end = 0;
        for captures in placeholder_re().captures_iter(line) {
            let overall = captures.get(0).expect("capture 0 always present");
            let var_name = &captures[1];

            output.push_str(&line[last_end..overall.start()]);

            match std::env::var(var_name) {
                Ok(value) => output.push_str(&value),
                Err(_) => match captures.get(2) {
                    Some(default) => output.push_str(default.as_str()),
                    None => return Err(format!("environment variable not found: `{var_name}`")),
                },
            }

            last_end = overall.end();
        }
        output.push_str(&line[last_end..]);
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
