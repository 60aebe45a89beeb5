//! Static-asset dependencies surfaced to the page shell.

use std::path::Path;

use crate::error::{Result, UiError};
use crate::html::escape;

/// What kind of tag an extension asset needs in the document head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    Stylesheet,
    Script,
}

impl ExtensionKind {
    /// Classify an asset by its file suffix.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("css") => Ok(Self::Stylesheet),
            Some(ext) if ext.eq_ignore_ascii_case("js") => Ok(Self::Script),
            _ => Err(UiError::UnsupportedExtension(path.display().to_string())),
        }
    }
}

/// An extension asset registered with a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// URL the asset is served under.
    pub endpoint: String,
    pub kind: ExtensionKind,
}

impl Extension {
    /// The `<link>` or `<script>` tag that loads the asset.
    pub fn tag(&self) -> String {
        let url = escape(&self.endpoint);
        match self.kind {
            ExtensionKind::Stylesheet => format!(r#"<link href="{url}" rel="stylesheet">"#),
            ExtensionKind::Script => format!(r#"<script src="{url}"></script>"#),
        }
    }
}

/// Render extension tags, returning `(scripts, stylesheets)`.
///
/// Scripts keep registration order; stylesheets come out newest first.
pub fn render_extensions(extensions: &[Extension]) -> (String, String) {
    let mut js = String::new();
    let mut css = Vec::new();
    for extension in extensions {
        match extension.kind {
            ExtensionKind::Stylesheet => css.insert(0, extension.tag()),
            ExtensionKind::Script => js.push_str(&extension.tag()),
        }
    }
    (js, css.concat())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify() {
        assert_eq!(
            ExtensionKind::from_path(Path::new("x/dict.js")).unwrap(),
            ExtensionKind::Script
        );
        assert_eq!(
            ExtensionKind::from_path(Path::new("theme.CSS")).unwrap(),
            ExtensionKind::Stylesheet
        );
        assert!(matches!(
            ExtensionKind::from_path(Path::new("font.woff2")),
            Err(UiError::UnsupportedExtension(_))
        ));
        assert!(ExtensionKind::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn split_by_kind() {
        let extensions = [
            Extension {
                endpoint: "/a.js".into(),
                kind: ExtensionKind::Script,
            },
            Extension {
                endpoint: "/a.css".into(),
                kind: ExtensionKind::Stylesheet,
            },
        ];
        let (js, css) = render_extensions(&extensions);
        assert_eq!(js, r#"<script src="/a.js"></script>"#);
        assert_eq!(css, r#"<link href="/a.css" rel="stylesheet">"#);
    }

    #[test]
    fn stylesheets_prepend_scripts_append() {
        let ext = |endpoint: &str, kind| Extension {
            endpoint: endpoint.into(),
            kind,
        };
        let extensions = [
            ext("/one.css", ExtensionKind::Stylesheet),
            ext("/one.js", ExtensionKind::Script),
            ext("/two.css", ExtensionKind::Stylesheet),
            ext("/two.js", ExtensionKind::Script),
        ];
        let (js, css) = render_extensions(&extensions);
        assert_eq!(
            js,
            r#"<script src="/one.js"></script><script src="/two.js"></script>"#
        );
        assert_eq!(
            css,
            r#"<link href="/two.css" rel="stylesheet"><link href="/one.css" rel="stylesheet">"#
        );
    }
}
