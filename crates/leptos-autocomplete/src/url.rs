//! Query string building

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Append `params` to `base`, continuing an existing query string if any
pub fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a b&c"), "a%20b%26c");
        assert_eq!(encode_component("it's-ok_(1)"), "it's-ok_(1)");
        assert_eq!(encode_component("Иван"), "%D0%98%D0%B2%D0%B0%D0%BD");
    }

    #[test]
    fn test_with_query() {
        assert_eq!(
            with_query("/sklad/autocomplete/", &[("q", "фил"), ("field", "name")]),
            "/sklad/autocomplete/?q=%D1%84%D0%B8%D0%BB&field=name"
        );
        assert_eq!(with_query("/x/?page=1", &[("unit", "бр")]), "/x/?page=1&unit=%D0%B1%D1%80");
        assert_eq!(with_query("/x/", &[]), "/x/");
    }
}
