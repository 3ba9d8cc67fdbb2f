//! Prometheus text format helpers shared by every metric kind.

use std::fmt::Write;

/// Escape a label value (`\`, `"` and newline).
pub(crate) fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape HELP text (`\` and newline).
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

pub(crate) fn write_preamble(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, escape_help(help));
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

/// `{k1="v1",k2="v2"}`, or the empty string when there are no labels.
pub(crate) fn label_set(names: &[String], values: &[String]) -> String {
    if names.is_empty() {
        return String::new();
    }
    let pairs = names
        .iter()
        .zip(values)
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{}}}", pairs)
}

pub(crate) fn format_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_values_are_escaped() {
        assert_eq!(escape_label(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_label("x\ny"), "x\\ny");
    }

    #[test]
    fn empty_label_set_renders_nothing() {
        assert_eq!(label_set(&[], &[]), "");
        let names = vec!["method".to_string(), "code".to_string()];
        let values = vec!["GET".to_string(), "200".to_string()];
        assert_eq!(label_set(&names, &values), r#"{method="GET",code="200"}"#);
    }

    #[test]
    fn floats_use_prometheus_spelling() {
        assert_eq!(format_float(0.005), "0.005");
        assert_eq!(format_float(10.24), "10.24");
        assert_eq!(format_float(f64::INFINITY), "+Inf");
        assert_eq!(format_float(3.0), "3");
    }
}
