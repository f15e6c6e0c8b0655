/// Reduces user input such as `https://www.example.com/pricing` to the bare host `example.com`.
///
/// Only the scheme, a leading `www.` and everything from the first `/` are removed; the rest
/// passes through untouched, so the result may be empty.
pub fn normalize_domain(raw: &str) -> String {
    let without_scheme = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);

    match without_www.split_once('/') {
        Some((host, _)) => host.to_string(),
        None => without_www.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_domain;

    #[test]
    fn normalize_domain_strips_scheme_www_and_path() {
        let inputs = [
            "https://www.example.com/page",
            "http://www.example.com/page/nested?q=1",
            "https://example.com/",
            "www.example.com",
            "example.com",
            "http://example.com",
        ];

        for input in inputs {
            assert_eq!(normalize_domain(input), "example.com", "input: {}", input);
        }
    }

    #[test]
    fn normalize_domain_keeps_subdomains() {
        assert_eq!(
            normalize_domain("https://app.salesforce.com/login"),
            "app.salesforce.com"
        );
        assert_eq!(normalize_domain("www.www.example.com"), "www.example.com");
    }

    #[test]
    fn normalize_domain_passes_malformed_input_through() {
        assert_eq!(normalize_domain(""), "");
        assert_eq!(normalize_domain("https://"), "");
        assert_eq!(normalize_domain("/just/a/path"), "");
        assert_eq!(normalize_domain("ftp://example.com"), "ftp:");
        assert_eq!(normalize_domain("not a domain"), "not a domain");
    }

    #[test]
    fn normalize_domain_is_case_sensitive_on_prefixes() {
        assert_eq!(
            normalize_domain("HTTPS://WWW.Example.com"),
            "HTTPS:"
        );
    }
}
