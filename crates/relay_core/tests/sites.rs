use relay_core::{normalize_site_pattern, SiteEntry, SiteList};

#[test]
fn normalization_strips_scheme_www_and_trailing_slashes() {
    assert_eq!(normalize_site_pattern("https://www.Example.com/"), "example.com");
    assert_eq!(normalize_site_pattern("HTTP://EXAMPLE.COM///"), "example.com");
    assert_eq!(
        normalize_site_pattern("example.com/blog/"),
        "example.com/blog"
    );
    assert_eq!(normalize_site_pattern("  www.foo.com  "), "foo.com");
}

#[test]
fn add_is_idempotent_under_normalization() {
    let mut sites = SiteList::new();
    sites.add("HTTPS://WWW.Foo.com/");
    sites.add("foo.com");

    assert_eq!(sites.len(), 1);
    assert_eq!(sites.entries()[0].pattern, "foo.com");
    assert!(sites.entries()[0].enabled);
}

#[test]
fn add_stores_the_normalized_form() {
    let mut sites = SiteList::new();
    sites.add("https://www.Example.com/Blog/");
    assert_eq!(sites.entries()[0].pattern, "example.com/blog");
}

#[test]
fn add_ignores_input_that_normalizes_to_nothing() {
    let mut sites = SiteList::new();
    sites.add("https:///");
    sites.add("");
    assert!(sites.is_empty());
}

#[test]
fn matcher_accepts_prefix_and_substring() {
    let mut sites = SiteList::new();
    sites.add("example.com");

    assert!(sites.should_auto_scrape("https://example.com/page?x=1"));
    assert!(!sites.should_auto_scrape("https://other.com"));
}

#[test]
fn matcher_accepts_path_prefix_patterns() {
    let mut sites = SiteList::new();
    sites.add("example.com/blog");

    assert!(sites.should_auto_scrape("https://example.com/blog/post-1"));
    assert!(!sites.should_auto_scrape("https://example.com/shop"));
}

#[test]
fn matcher_accepts_pattern_embedded_in_query_string() {
    let mut sites = SiteList::new();
    sites.add("example.com");

    assert!(sites.should_auto_scrape("https://redirect.io/?target=example.com"));
}

#[test]
fn matcher_rejects_empty_url_regardless_of_list() {
    let mut sites = SiteList::new();
    sites.add("example.com");
    assert!(!sites.should_auto_scrape(""));
}

#[test]
fn empty_list_matches_nothing() {
    let sites = SiteList::new();
    assert!(!sites.should_auto_scrape("https://example.com"));
}

#[test]
fn removed_entry_no_longer_matches() {
    let mut sites = SiteList::new();
    sites.add("example.com");
    sites.remove("http://www.example.com/");

    assert!(sites.is_empty());
    assert!(!sites.should_auto_scrape("https://example.com/page"));
}

#[test]
fn remove_of_unknown_entry_is_a_noop() {
    let mut sites = SiteList::new();
    sites.add("example.com");
    sites.remove("other.com");
    assert_eq!(sites.len(), 1);
}

#[test]
fn disabled_entry_stays_listed_but_never_matches() {
    let mut sites = SiteList::new();
    sites.add("example.com");
    sites.set_enabled("example.com", false);

    assert_eq!(sites.len(), 1);
    assert!(!sites.entries()[0].enabled);
    assert!(!sites.should_auto_scrape("https://example.com/page"));

    sites.set_enabled("example.com", true);
    assert!(sites.should_auto_scrape("https://example.com/page"));
}

#[test]
fn set_enabled_on_unknown_entry_is_a_noop() {
    let mut sites = SiteList::new();
    sites.set_enabled("example.com", true);
    assert!(sites.is_empty());
}

#[test]
fn from_entries_renormalizes_and_dedupes_persisted_state() {
    let sites = SiteList::from_entries(vec![
        SiteEntry {
            pattern: "HTTPS://WWW.Foo.com/".to_string(),
            enabled: false,
        },
        SiteEntry {
            pattern: "foo.com".to_string(),
            enabled: true,
        },
        SiteEntry {
            pattern: "bar.org".to_string(),
            enabled: true,
        },
    ]);

    assert_eq!(sites.len(), 2);
    assert_eq!(sites.entries()[0].pattern, "foo.com");
    // First occurrence wins, including its enabled flag.
    assert!(!sites.entries()[0].enabled);
}
