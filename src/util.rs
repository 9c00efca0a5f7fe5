//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Log-safe truncation for large strings, respecting char boundaries.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) { end -= 1; }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_fills_known_keys_only() {
    assert_eq!(fill_template("{a}-{b}-{c}", &[("a", "1"), ("b", "2")]), "1-2-{c}");
  }

  #[test]
  fn truncation() {
    assert_eq!(trunc_for_log("short", 10), "short");
    assert_eq!(trunc_for_log("abcdef", 3), "abc… (6 bytes total)");
    assert!(trunc_for_log("ééé", 3).starts_with("é…"));
  }
}
