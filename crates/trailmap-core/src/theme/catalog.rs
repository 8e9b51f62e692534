use std::sync::LazyLock;

use indexmap::IndexMap;
use log::{debug, warn};

use super::{ThemeConfig, presets};

static FALLBACK_THEME: LazyLock<ThemeConfig> = LazyLock::new(presets::cyber_neon);

/// Registry of themes keyed by id.
///
/// Lookups of unknown ids resolve to the default theme instead of failing.
///
/// ```
/// use trailmap_core::theme::ThemeCatalog;
///
/// let mut catalog = ThemeCatalog::with_builtin();
/// assert_eq!(catalog.len(), 5);
///
/// catalog.set_default("ocean-depths");
/// assert_eq!(catalog.resolve("missing").id(), "ocean-depths");
/// ```
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: IndexMap<String, ThemeConfig>,
    default_id: String,
}

impl ThemeCatalog {
    /// Catalog holding the built-in themes with `cyber-neon` as default.
    pub fn with_builtin() -> Self {
        let mut catalog = Self {
            themes: IndexMap::new(),
            default_id: presets::DEFAULT_THEME_ID.to_string(),
        };
        for theme in presets::builtin() {
            catalog.register(theme);
        }
        catalog
    }

    /// Adds or replaces a theme. Returns the theme previously registered
    /// under the same id.
    pub fn register(&mut self, theme: ThemeConfig) -> Option<ThemeConfig> {
        debug!(theme_id = theme.id(), layout = theme.layout().name(); "Registering theme");
        self.themes.insert(theme.id().to_string(), theme)
    }

    /// Makes `id` the fallback theme. Returns false, leaving the default
    /// unchanged, when no theme with that id is registered.
    pub fn set_default(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            warn!(theme_id = id; "Cannot use unregistered theme as default");
            return false;
        }
        self.default_id = id.to_string();
        true
    }

    pub fn get(&self, id: &str) -> Option<&ThemeConfig> {
        self.themes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.themes.contains_key(id)
    }

    /// The fallback theme.
    pub fn default_theme(&self) -> &ThemeConfig {
        self.themes
            .get(&self.default_id)
            .unwrap_or(&FALLBACK_THEME)
    }

    /// Theme registered under `id`, or the default theme.
    pub fn resolve(&self, id: &str) -> &ThemeConfig {
        match self.get(id) {
            Some(theme) => theme,
            None => {
                let fallback = self.default_theme();
                warn!(requested = id, fallback = fallback.id(); "Unknown theme, using default");
                fallback
            }
        }
    }

    /// Registered theme ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::with_builtin()
    }
}
