use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Replace `{{ env.VAR }}` placeholders in raw TOML with environment values
///
/// `{{ env.VAR | default("x") }}` falls back to `x` when `VAR` is unset.
/// Comment lines are copied as-is so commented-out settings never need
/// their variables defined.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut lines = Vec::new();
    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_owned());
        } else {
            lines.push(expand_line(line)?);
        }
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 1: scoped key, 2: optional default
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

fn expand_line(line: &str) -> Result<String, String> {
    let mut expanded = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in placeholder().captures_iter(line) {
        let Some(whole) = captures.get(0) else { continue };
        expanded.push_str(&line[cursor..whole.start()]);
        expanded.push_str(&lookup(&captures)?);
        cursor = whole.end();
    }

    expanded.push_str(&line[cursor..]);
    Ok(expanded)
}

fn lookup(captures: &Captures<'_>) -> Result<String, String> {
    let key = captures.get(1).map_or("", |m| m.as_str());
    let fallback = captures.get(2).map(|m| m.as_str());

    let Some(name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(name), fallback) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{name}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_unchanged() {
        let input = "[api]\nfail_status = 422\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn replaces_variable() {
        temp_env::with_var("ENVELOPE_TEST_STATUS", Some("400"), || {
            let result = expand_env("fail_status = {{ env.ENVELOPE_TEST_STATUS }}").unwrap();
            assert_eq!(result, "fail_status = 400");
        });
    }

    #[test]
    fn replaces_several_on_one_line() {
        let vars = [("ENVELOPE_HOST", Some("127.0.0.1")), ("ENVELOPE_PORT", Some("8080"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("listen_address = \"{{ env.ENVELOPE_HOST }}:{{env.ENVELOPE_PORT}}\"").unwrap();
            assert_eq!(result, "listen_address = \"127.0.0.1:8080\"");
        });
    }

    #[test]
    fn missing_variable_errors() {
        temp_env::with_var_unset("ENVELOPE_MISSING", || {
            let err = expand_env("fail_code = {{ env.ENVELOPE_MISSING }}").unwrap_err();
            assert!(err.contains("ENVELOPE_MISSING"));
        });
    }

    #[test]
    fn default_used_when_unset() {
        temp_env::with_var_unset("ENVELOPE_MISSING", || {
            let result = expand_env("fail_status = {{ env.ENVELOPE_MISSING | default(\"422\") }}").unwrap();
            assert_eq!(result, "fail_status = 422");
        });
    }

    #[test]
    fn default_ignored_when_set() {
        temp_env::with_var("ENVELOPE_SET", Some("409"), || {
            let result = expand_env("fail_status = {{ env.ENVELOPE_SET | default(\"422\") }}").unwrap();
            assert_eq!(result, "fail_status = 409");
        });
    }

    #[test]
    fn unscoped_key_rejected() {
        let err = expand_env("x = \"{{ vault.SECRET }}\"").unwrap_err();
        assert!(err.contains("only variables scoped with 'env.'"));
    }

    #[test]
    fn comments_are_not_expanded() {
        temp_env::with_var_unset("ENVELOPE_MISSING", || {
            let input = "  # fail_code = {{ env.ENVELOPE_MISSING }}\ndiagnostics = false";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
