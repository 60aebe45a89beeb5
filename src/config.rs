//! Process-level configuration shared by every frame.

/// Configuration for the rendering core and the page shell.
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Prefix for generated element ids (`a` gives `a-0`, `a-1`, ...).
    pub id_prefix: String,
    /// DOM id of the out-of-band side channel (the toast host).
    pub oob_target: String,
    /// Path prefix for self-registered handler routes.
    pub hash_route_prefix: String,
    /// URL prefix under which static assets are served.
    pub static_prefix: String,
    /// Version segment of static asset URLs.
    pub version: String,
    /// Client extension used to encode request bodies when an event sets none.
    pub default_extension: String,
    /// Default document title.
    pub title: String,
    /// Optional `data-theme` on the document root.
    pub theme: Option<String>,
    /// How long toasts stay visible, in milliseconds.
    pub toast_delay_ms: u64,
    /// `lang` attribute of the document root.
    pub lang: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            id_prefix: "a".to_owned(),
            oob_target: "toast".to_owned(),
            hash_route_prefix: "/_swapframe/hash/".to_owned(),
            static_prefix: "/_static".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            default_extension: "json-enc".to_owned(),
            title: "swapframe".to_owned(),
            theme: None,
            toast_delay_ms: 2500,
            lang: "en".to_owned(),
        }
    }
}

impl UiConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element id prefix (builder).
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Set the out-of-band container id (builder).
    pub fn with_oob_target(mut self, target: impl Into<String>) -> Self {
        self.oob_target = target.into();
        self
    }

    /// Set the prefix for self-registered routes (builder).
    pub fn with_hash_route_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.hash_route_prefix = prefix.into();
        self
    }

    /// Set the static asset prefix (builder).
    pub fn with_static_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.static_prefix = prefix.into();
        self
    }

    /// Set the asset version segment (builder).
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the default document title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the document theme (builder).
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Set the toast delay in milliseconds (builder).
    pub fn with_toast_delay(mut self, delay_ms: u64) -> Self {
        self.toast_delay_ms = delay_ms;
        self
    }

    /// Set the document language (builder).
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// URL of a file shipped under the versioned static prefix.
    pub fn static_url(&self, file: &str) -> String {
        format!("{}/{}/{}", self.static_prefix, self.version, file)
    }
}
