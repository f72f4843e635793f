//! Marker substitution for text files.
//!
//! Templates carry HTML comment sentinels where shared content goes. Each
//! marker maps to one literal replacement, and every occurrence of a marker is
//! replaced. Markers never overlap, so the whole table is applied in one
//! left-to-right pass and the order of entries does not matter.
//!
//! | Marker | Replacement |
//! |--------|-------------|
//! | `<!-- BJ_TMPL_NAV_BAR -->` | [`NAV_BAR`] |
//! | `<!-- BJ_TMPL_VERSION -->` | version string resolved at startup |
//! | `<!-- GOOGLE_SHIT -->` | [`ANALYTICS`] (unless disabled) |

pub const NAV_BAR_MARKER: &str = "<!-- BJ_TMPL_NAV_BAR -->";
pub const VERSION_MARKER: &str = "<!-- BJ_TMPL_VERSION -->";
pub const ANALYTICS_MARKER: &str = "<!-- GOOGLE_SHIT -->";

pub const NAV_BAR: &str = r#"
<nav>
<a href='index.html'><img alt="BJ logo" id=logo src="static/logo.png" /></a>
<ul>
<li><a href='index.html'>Game</a></li>
<li><a href='custom-card.html'>Customize</a></li>
</ul>
</nav>
"#;

pub const ANALYTICS: &str = r#"
  <!-- Global site tag (gtag.js) - Google Analytics -->
  <script async src="https://www.googletagmanager.com/gtag/js?id=UA-160379782-1"></script>
  <script>
    window.dataLayer = window.dataLayer || [];
    function gtag(){dataLayer.push(arguments);}
    gtag('js', new Date());

    gtag('config', 'UA-160379782-1');
  </script>
  <script data-ad-client="ca-pub-3834375319956666" async src="https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js"></script>
"#;

/// Marker → replacement table for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitutions {
    entries: Vec<(&'static str, String)>,
}

/// Result of running the table over one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
    pub text: String,
    /// Total marker occurrences replaced, across all markers.
    pub replacements: usize,
}

impl Substitutions {
    /// Build the table for a run.
    ///
    /// With `analytics` off the analytics marker is not in the table and is
    /// left in the output as written.
    pub fn new(version: impl Into<String>, analytics: bool) -> Self {
        let mut entries = vec![
            (NAV_BAR_MARKER, NAV_BAR.to_string()),
            (VERSION_MARKER, version.into()),
        ];
        if analytics {
            entries.push((ANALYTICS_MARKER, ANALYTICS.to_string()));
        }
        Self { entries }
    }

    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(m, _)| *m)
    }

    pub fn replacement(&self, marker: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(m, _)| *m == marker)
            .map(|(_, r)| r.as_str())
    }

    /// Replace every marker occurrence in one left-to-right pass.
    ///
    /// Inserted content is never scanned again, so a replacement that happens
    /// to contain a marker is written out literally.
    pub fn apply(&self, text: &str) -> Substituted {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        let mut replacements = 0;
        while let Some((pos, marker, replacement)) = self.next_marker(rest) {
            out.push_str(&rest[..pos]);
            out.push_str(replacement);
            rest = &rest[pos + marker.len()..];
            replacements += 1;
        }
        out.push_str(rest);
        Substituted {
            text: out,
            replacements,
        }
    }

    fn next_marker(&self, text: &str) -> Option<(usize, &'static str, &str)> {
        self.entries
            .iter()
            .filter_map(|(m, r)| text.find(m).map(|pos| (pos, *m, r.as_str())))
            .min_by_key(|(pos, _, _)| *pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION: &str = "2024-01-01 (abc1234)";

    #[test]
    fn replaces_nav_and_version() {
        let subs = Substitutions::new(VERSION, true);
        let out = subs.apply("Hi <!-- BJ_TMPL_NAV_BAR --> v<!-- BJ_TMPL_VERSION -->");
        assert_eq!(out.text, format!("Hi {NAV_BAR} v2024-01-01 (abc1234)"));
        assert_eq!(out.replacements, 2);
    }

    #[test]
    fn replaces_every_occurrence() {
        let subs = Substitutions::new(VERSION, true);
        let out = subs.apply(&[VERSION_MARKER; 3].join("|"));
        assert_eq!(out.text, [VERSION; 3].join("|"));
        assert_eq!(out.replacements, 3);
    }

    #[test]
    fn analytics_inserted_when_enabled() {
        let subs = Substitutions::new(VERSION, true);
        let out = subs.apply("<head><!-- GOOGLE_SHIT --></head>");
        assert_eq!(out.text, format!("<head>{ANALYTICS}</head>"));
        assert!(out.text.contains("googletagmanager.com"));
    }

    #[test]
    fn analytics_marker_left_alone_when_disabled() {
        let subs = Substitutions::new(VERSION, false);
        let input = "<head><!-- GOOGLE_SHIT --></head>";
        let out = subs.apply(input);
        assert_eq!(out.text, input);
        assert_eq!(out.replacements, 0);
        assert!(subs.replacement(ANALYTICS_MARKER).is_none());
    }

    #[test]
    fn text_without_markers_is_unchanged() {
        let subs = Substitutions::new(VERSION, true);
        let input = "body { color: red; } <!-- other comment -->";
        let out = subs.apply(input);
        assert_eq!(out.text, input);
        assert_eq!(out.replacements, 0);
    }

    #[test]
    fn empty_version_removes_marker() {
        let subs = Substitutions::new("", true);
        assert_eq!(subs.apply("v<!-- BJ_TMPL_VERSION -->.").text, "v.");
    }

    #[test]
    fn replacement_content_is_not_rescanned() {
        // a version string that happens to look like a marker stays literal
        let subs = Substitutions::new(ANALYTICS_MARKER, true);
        let out = subs.apply("<!-- BJ_TMPL_VERSION --><!-- BJ_TMPL_NAV_BAR -->");
        assert_eq!(out.text, format!("{ANALYTICS_MARKER}{NAV_BAR}"));
        assert_eq!(out.replacements, 2);
    }

    #[test]
    fn table_lists_markers() {
        let subs = Substitutions::new(VERSION, true);
        assert_eq!(
            subs.markers().collect::<Vec<_>>(),
            vec![NAV_BAR_MARKER, VERSION_MARKER, ANALYTICS_MARKER]
        );
        assert_eq!(subs.replacement(VERSION_MARKER), Some(VERSION));
    }
}
