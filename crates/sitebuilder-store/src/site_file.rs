//! The canonical file set and its default content.

use std::fmt;
use std::str::FromStr;

use strum::EnumString;

use crate::error::{StoreError, StoreResult};

/// One of the three files that make up a website project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString)]
pub enum SiteFile {
    #[strum(serialize = "index.html")]
    Html,
    #[strum(serialize = "styles.css")]
    Css,
    #[strum(serialize = "script.js")]
    Script,
}

impl SiteFile {
    /// Canonical order, also the lock acquisition order.
    pub const ALL: [SiteFile; 3] = [SiteFile::Html, SiteFile::Css, SiteFile::Script];

    /// Resolve a caller-supplied name. Anything outside the canonical set
    /// is `NotFound`.
    pub fn parse(name: &str) -> StoreResult<Self> {
        <Self as FromStr>::from_str(name).map_err(|_| {
            StoreError::NotFound(format!(
                "'{}' is not a project file (choose from: {})",
                name,
                Self::names().join(", ")
            ))
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteFile::Html => "index.html",
            SiteFile::Css => "styles.css",
            SiteFile::Script => "script.js",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(SiteFile::as_str).collect()
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            SiteFile::Html => "text/html",
            SiteFile::Css => "text/css",
            SiteFile::Script => "text/javascript",
        }
    }
}

impl fmt::Display for SiteFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Content written into files that `ensure` creates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Scaffold {
    /// Empty files.
    #[default]
    Empty,
    /// A minimal page that links the stylesheet and script.
    #[strum(serialize = "starter", serialize = "template")]
    Starter,
}

impl Scaffold {
    pub fn content(&self, file: SiteFile) -> &'static str {
        match (self, file) {
            (Scaffold::Empty, _) => "",
            (Scaffold::Starter, SiteFile::Html) => STARTER_HTML,
            (Scaffold::Starter, SiteFile::Css) => STARTER_CSS,
            (Scaffold::Starter, SiteFile::Script) => STARTER_JS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scaffold::Empty => "empty",
            Scaffold::Starter => "starter",
        }
    }
}

impl fmt::Display for Scaffold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const STARTER_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Website</title>
  <link rel="stylesheet" href="styles.css">
</head>
<body>
  <main id="app"></main>
  <script src="script.js"></script>
</body>
</html>
"#;

const STARTER_CSS: &str = r#"body {
  margin: 0;
  font-family: system-ui, sans-serif;
}
"#;

const STARTER_JS: &str = r#"document.addEventListener("DOMContentLoaded", () => {
});
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!(SiteFile::parse("index.html").unwrap(), SiteFile::Html);
        assert_eq!(SiteFile::parse("styles.css").unwrap(), SiteFile::Css);
        assert_eq!(SiteFile::parse("script.js").unwrap(), SiteFile::Script);
        for file in SiteFile::ALL {
            assert_eq!(SiteFile::parse(file.as_str()).unwrap(), file);
        }
    }

    #[test]
    fn test_parse_unknown_is_not_found() {
        let err = SiteFile::parse("about.html").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        let msg = err.to_string();
        assert!(msg.contains("about.html"));
        assert!(msg.contains("index.html, styles.css, script.js"));
    }

    #[test]
    fn test_index_matches_canonical_order() {
        for (i, file) in SiteFile::ALL.iter().enumerate() {
            assert_eq!(file.index(), i);
        }
    }

    #[test]
    fn test_scaffold_parse() {
        assert_eq!("empty".parse::<Scaffold>().unwrap(), Scaffold::Empty);
        assert_eq!("Starter".parse::<Scaffold>().unwrap(), Scaffold::Starter);
        assert!("fancy".parse::<Scaffold>().is_err());
    }

    #[test]
    fn test_starter_links_assets() {
        let html = Scaffold::Starter.content(SiteFile::Html);
        assert!(html.contains(r#"href="styles.css""#));
        assert!(html.contains(r#"src="script.js""#));
        assert_eq!(Scaffold::Empty.content(SiteFile::Css), "");
    }
}
