//! Artifact generation.
//!
//! Pure functions from a [`SiteConfig`] to the three published artifacts:
//!
//! - **`manifest.json`**: [`generate_manifest`] re-shapes the PWA-relevant
//!   fields into a [`PwaManifest`] (snake_case keys on the wire).
//! - **`browserconfig.xml`**: [`generate_browser_config`] fills a fixed
//!   Windows tile template with four CDN icon URLs and the tile colour.
//! - **Meta tags**: [`generate_meta_tags`] renders the `<head>` block
//!   (title, theme colours, favicons, Apple/Microsoft tags, Open Graph,
//!   Twitter card, splash screens) in a fixed order.
//!
//! None of these check their input; run [`crate::validate::validate`]
//! first. Missing values render as empty strings.
//!
//! ## Versioned URLs
//!
//! Asset URLs built here carry the site version as a cache-busting query:
//!
//! ```text
//! {cdn_base}/icons/icon-square-70x70.png?vx=1.0.5
//! ```
//!
//! With no version the query is dropped entirely (no dangling `?vx=`).
//!
//! ## Manifest Colours
//!
//! `theme_color` and `background_color` in the manifest are always
//! `#000000` and `#ffffff`. The light/dark values from the config are only
//! used by the meta tags, which can express a colour per scheme.

use crate::config::{ManifestIcon, Shortcut, SiteConfig};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::PathBuf;

pub const MANIFEST_THEME_COLOR: &str = "#000000";
pub const MANIFEST_BACKGROUND_COLOR: &str = "#ffffff";

/// Where and how artifacts are generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub output_dir: PathBuf,
    pub manifest_file_name: String,
    pub browser_config_file_name: String,
    /// Prefix for generated asset URLs, without a trailing slash.
    pub cdn_base: String,
    /// Replaces `site.version` when set.
    pub version: Option<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./public"),
            manifest_file_name: "manifest.json".to_string(),
            browser_config_file_name: "browserconfig.xml".to_string(),
            cdn_base: String::new(),
            version: None,
        }
    }
}

impl GeneratorOptions {
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(&self.manifest_file_name)
    }

    pub fn browser_config_path(&self) -> PathBuf {
        self.output_dir.join(&self.browser_config_file_name)
    }

    /// Apply the version override, borrowing the config when there is none.
    pub fn apply<'a>(&self, config: &'a SiteConfig) -> Cow<'a, SiteConfig> {
        match &self.version {
            Some(version) => {
                let mut config = config.clone();
                config.site.version = version.clone();
                Cow::Owned(config)
            }
            None => Cow::Borrowed(config),
        }
    }
}

/// Web app manifest as written to `manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PwaManifest {
    pub manifest_version: u32,
    pub version: String,
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub scope: String,
    pub start_url: String,
    pub display: String,
    pub orientation: String,
    pub theme_color: String,
    pub background_color: String,
    pub categories: Vec<String>,
    pub icons: Vec<ManifestIcon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<ManifestScreenshot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Copied from the config as-is, keys included (`shortName`).
    pub shortcuts: Option<Vec<Shortcut>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestScreenshot {
    pub src: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub sizes: String,
}

/// Lowercase the name and replace each whitespace run with one `-`.
///
/// Other characters pass through untouched: `"Café & Co"` → `"café-&-co"`.
pub fn manifest_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                id.push('-');
            }
            in_space = true;
        } else {
            id.push(c);
            in_space = false;
        }
    }
    id
}

/// `?vx=<version>`, or nothing when there is no version.
fn version_query(version: &str) -> String {
    if version.is_empty() {
        String::new()
    } else {
        format!("?vx={version}")
    }
}

pub fn generate_manifest(config: &SiteConfig, options: &GeneratorOptions) -> PwaManifest {
    let site = &config.site;
    let pwa = &config.pwa;

    let screenshots = (!site.version.is_empty()).then(|| {
        vec![ManifestScreenshot {
            src: format!(
                "{}/screenshots/home-512x512.png{}",
                options.cdn_base,
                version_query(&site.version)
            ),
            mime_type: "image/png".to_string(),
            sizes: "512x512".to_string(),
        }]
    });

    let shortcuts = (!config.shortcuts.is_empty()).then(|| config.shortcuts.clone());

    PwaManifest {
        manifest_version: 1,
        version: site.version.clone(),
        id: manifest_id(&site.name),
        name: site.name.clone(),
        short_name: site.short_name.clone(),
        description: site.description.clone(),
        scope: pwa.scope.clone(),
        start_url: pwa.start_url.clone(),
        display: pwa.display.clone(),
        orientation: pwa.orientation.clone(),
        theme_color: MANIFEST_THEME_COLOR.to_string(),
        background_color: MANIFEST_BACKGROUND_COLOR.to_string(),
        categories: pwa.categories.clone(),
        icons: config.icons.manifest.clone(),
        screenshots,
        shortcuts,
    }
}

pub fn generate_browser_config(config: &SiteConfig, options: &GeneratorOptions) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<browserconfig>
  <msapplication>
    <tile>
      <square70x70logo
        src="{cdn}/icons/icon-square-70x70.png{query}" />
      <square150x150logo
        src="{cdn}/icons/icon-square-150x150.png{query}" />
      <wide310x150logo
        src="{cdn}/icons/icon-square-310x150.png{query}" />
      <square310x310logo
        src="{cdn}/icons/icon-square-310x310.png{query}" />
      <tilecolor>{tile_color}</tilecolor>
    </tile>
  </msapplication>
</browserconfig>"#,
        cdn = options.cdn_base,
        query = version_query(&config.site.version),
        tile_color = config.browser.ms_application.tile_color,
    )
}

/// Render the `<head>` tag block, one tag per line.
///
/// Tag order is fixed; splash screens come last, light before dark, each
/// list in config order.
///
/// Tags are rendered by maud: void elements close as `<meta ...>` rather
/// than `<meta ... />`, and attribute values are HTML-escaped (`&` becomes
/// `&amp;`, `"` becomes `&quot;`).
pub fn generate_meta_tags(config: &SiteConfig, _options: &GeneratorOptions) -> String {
    let site = &config.site;
    let pwa = &config.pwa;
    let icons = &config.icons;
    let apple = &config.browser.apple;
    let ms = &config.browser.ms_application;
    let og = &config.seo.open_graph;
    let twitter = &config.seo.twitter;

    let capable = if apple.mobile_web_app_capable { "yes" } else { "no" };

    let mut tags: Vec<Markup> = vec![
        html! { title { (site.title) } },
        html! { meta name="description" content=(site.description); },
        html! { meta name="keywords" content=(site.keywords.join(", ")); },
        html! { meta name="author" content=(site.author); },
        html! { meta name="theme-color" media="(prefers-color-scheme: light)" content=(pwa.theme_color.light); },
        html! { meta name="theme-color" media="(prefers-color-scheme: dark)" content=(pwa.theme_color.dark); },
        html! { link rel="icon" type="image/x-icon" media="(prefers-color-scheme: light)" href=(icons.favicon.light); },
        html! { link rel="icon" type="image/x-icon" media="(prefers-color-scheme: dark)" href=(icons.favicon.dark); },
        html! { link rel="apple-touch-icon" href=(icons.apple_touch_icon); },
        html! { meta name="apple-mobile-web-app-title" content=(apple.mobile_web_app_title); },
        html! { meta name="apple-mobile-web-app-capable" content=(capable); },
        html! { meta name="apple-mobile-web-app-status-bar-style" content=(apple.mobile_web_app_status_bar_style); },
        html! { meta name="application-name" content=(ms.name); },
        html! { meta name="msapplication-starturl" content=(ms.start_url); },
        html! { meta property="og:type" content=(og.kind); },
        html! { meta property="og:title" content=(og.title); },
        html! { meta property="og:description" content=(og.description); },
        html! { meta property="og:image" content=(og.image); },
        html! { meta property="twitter:card" content=(twitter.card); },
        html! { meta property="twitter:site" content=(twitter.site); },
        html! { meta property="twitter:creator" content=(twitter.creator); },
        html! { meta property="twitter:title" content=(twitter.title); },
        html! { meta property="twitter:description" content=(twitter.description); },
        html! { meta property="twitter:image" content=(twitter.image); },
    ];

    let splashes = config
        .splash_screens
        .light
        .iter()
        .chain(&config.splash_screens.dark);
    for splash in splashes {
        tags.push(html! {
            link rel="apple-touch-startup-image" media=(splash.media) href=(splash.href);
        });
    }

    tags.into_iter()
        .map(Markup::into_string)
        .collect::<Vec<_>>()
        .join("\n    ")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn cdn_options() -> GeneratorOptions {
        GeneratorOptions {
            cdn_base: "https://cdn.x.com".to_string(),
            ..Default::default()
        }
    }

    // =========================================================================
    // Manifest
    // =========================================================================

    #[test]
    fn manifest_id_from_site_name() {
        let manifest = generate_manifest(&sample_config(), &GeneratorOptions::default());
        assert_eq!(manifest.id, "vezham-playground");
    }

    #[test]
    fn manifest_id_collapses_whitespace_runs_only() {
        assert_eq!(manifest_id("My  Big\tApp"), "my-big-app");
        assert_eq!(manifest_id(" Edge "), "-edge-");
        assert_eq!(manifest_id("Café & Co."), "café-&-co.");
    }

    #[test]
    fn manifest_colors_ignore_config() {
        let mut config = sample_config();
        config.pwa.theme_color.light = "#123456".to_string();
        config.pwa.background_color.dark = "#654321".to_string();

        let manifest = generate_manifest(&config, &GeneratorOptions::default());
        assert_eq!(manifest.theme_color, "#000000");
        assert_eq!(manifest.background_color, "#ffffff");
    }

    #[test]
    fn manifest_maps_site_and_pwa_fields() {
        let config = sample_config();
        let manifest = generate_manifest(&config, &GeneratorOptions::default());

        assert_eq!(manifest.manifest_version, 1);
        assert_eq!(manifest.version, "1.0.5");
        assert_eq!(manifest.name, "Vezham Playground");
        assert_eq!(manifest.short_name, config.site.short_name);
        assert_eq!(manifest.start_url, config.pwa.start_url);
        assert_eq!(manifest.scope, ".");
        assert_eq!(manifest.display, "standalone");
        assert_eq!(manifest.categories, config.pwa.categories);
        assert_eq!(manifest.icons, config.icons.manifest);
    }

    #[test]
    fn manifest_is_deterministic() {
        let config = sample_config();
        let options = cdn_options();
        assert_eq!(
            generate_manifest(&config, &options),
            generate_manifest(&config, &options)
        );
    }

    #[test]
    fn manifest_screenshot_uses_cdn_and_version() {
        let manifest = generate_manifest(&sample_config(), &cdn_options());
        let screenshots = manifest.screenshots.unwrap();
        assert_eq!(screenshots.len(), 1);
        assert_eq!(
            screenshots[0].src,
            "https://cdn.x.com/screenshots/home-512x512.png?vx=1.0.5"
        );
        assert_eq!(screenshots[0].sizes, "512x512");
    }

    #[test]
    fn manifest_without_version_has_no_screenshots() {
        let mut config = sample_config();
        config.site.version.clear();
        let manifest = generate_manifest(&config, &cdn_options());
        assert!(manifest.screenshots.is_none());
    }

    #[test]
    fn manifest_shortcuts_only_when_present() {
        let manifest = generate_manifest(&sample_config(), &GeneratorOptions::default());
        assert_eq!(manifest.shortcuts.as_ref(), Some(&sample_config().shortcuts));

        let mut config = sample_config();
        config.shortcuts.clear();
        let manifest = generate_manifest(&config, &GeneratorOptions::default());
        assert!(manifest.shortcuts.is_none());
    }

    #[test]
    fn manifest_shortcuts_keep_config_keys() {
        let json = serde_json::to_value(generate_manifest(
            &sample_config(),
            &GeneratorOptions::default(),
        ))
        .unwrap();
        let shortcut = &json["shortcuts"][0];
        assert_eq!(shortcut["shortName"], "Home");
        assert!(shortcut.get("short_name").is_none());
    }

    #[test]
    fn manifest_serializes_snake_case_keys() {
        let mut config = sample_config();
        config.shortcuts.clear();
        config.site.version.clear();
        let json = serde_json::to_value(generate_manifest(&config, &GeneratorOptions::default()))
            .unwrap();

        for key in ["manifest_version", "short_name", "start_url", "theme_color", "background_color"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json.get("screenshots").is_none());
        assert!(json.get("shortcuts").is_none());
    }

    #[test]
    fn options_apply_version_override() {
        let config = sample_config();
        let options = GeneratorOptions {
            version: Some("9.9.9".to_string()),
            ..Default::default()
        };
        assert_eq!(options.apply(&config).site.version, "9.9.9");
        assert!(matches!(
            GeneratorOptions::default().apply(&config),
            Cow::Borrowed(_)
        ));
    }

    // =========================================================================
    // Browser config
    // =========================================================================

    #[test]
    fn browser_config_embeds_versioned_logos_and_tile_color() {
        let mut config = sample_config();
        config.site.version = "1.0.0".to_string();
        config.browser.ms_application.tile_color = "#6366f1".to_string();

        let xml = generate_browser_config(&config, &cdn_options());

        let logos: Vec<&str> = xml
            .lines()
            .filter(|l| l.trim_start().starts_with("src="))
            .collect();
        assert_eq!(logos.len(), 4);
        for line in &logos {
            assert!(line.contains("https://cdn.x.com/icons/icon-square-"));
            assert!(line.ends_with("?vx=1.0.0\" />"), "unexpected line: {line}");
        }
        assert_eq!(xml.matches("<tilecolor>#6366f1</tilecolor>").count(), 1);
    }

    #[test]
    fn browser_config_without_version_has_no_query() {
        let mut config = sample_config();
        config.site.version.clear();
        let xml = generate_browser_config(&config, &cdn_options());
        assert!(!xml.contains("?vx="));
        assert!(xml.contains(r#"src="https://cdn.x.com/icons/icon-square-70x70.png" />"#));
    }

    #[test]
    fn browser_config_matches_template() {
        let mut config = SiteConfig::default();
        config.site.version = "2".to_string();
        config.browser.ms_application.tile_color = "transparent".to_string();

        let expected = r#"<?xml version="1.0" encoding="utf-8" ?>
<browserconfig>
  <msapplication>
    <tile>
      <square70x70logo
        src="/icons/icon-square-70x70.png?vx=2" />
      <square150x150logo
        src="/icons/icon-square-150x150.png?vx=2" />
      <wide310x150logo
        src="/icons/icon-square-310x150.png?vx=2" />
      <square310x310logo
        src="/icons/icon-square-310x310.png?vx=2" />
      <tilecolor>transparent</tilecolor>
    </tile>
  </msapplication>
</browserconfig>"#;
        assert_eq!(
            generate_browser_config(&config, &GeneratorOptions::default()),
            expected
        );
    }

    // =========================================================================
    // Meta tags
    // =========================================================================

    #[test]
    fn meta_tags_follow_fixed_order() {
        let tags = generate_meta_tags(&sample_config(), &GeneratorOptions::default());
        let lines: Vec<&str> = tags.split("\n    ").collect();

        // 24 fixed tags + 2 light + 1 dark splash screens
        assert_eq!(lines.len(), 27);
        assert_eq!(lines[0], "<title>Home | Vezham Playground</title>");
        assert!(lines[1].starts_with(r#"<meta name="description""#));
        assert_eq!(
            lines[2],
            r#"<meta name="keywords" content="Vezham Playground, playground, development, tools">"#
        );
        assert!(lines[4].contains("(prefers-color-scheme: light)"));
        assert!(lines[5].contains("(prefers-color-scheme: dark)"));
        assert!(lines[8].starts_with(r#"<link rel="apple-touch-icon""#));
        assert_eq!(
            lines[10],
            r#"<meta name="apple-mobile-web-app-capable" content="yes">"#
        );
        assert!(lines[14].contains(r#"property="og:type""#));
        assert!(lines[23].contains(r#"property="twitter:image""#));
        assert!(lines[24].contains("splashscreens/light/splash-iphone5"));
        assert!(lines[25].contains("splashscreens/light/splash-iphone6"));
        assert!(lines[26].contains("splashscreens/dark/splash-iphone5"));
    }

    #[test]
    fn meta_tags_without_splash_screens() {
        let mut config = sample_config();
        config.splash_screens.light.clear();
        config.splash_screens.dark.clear();
        config.browser.apple.mobile_web_app_capable = false;

        let tags = generate_meta_tags(&config, &GeneratorOptions::default());
        assert_eq!(tags.split("\n    ").count(), 24);
        assert!(!tags.contains("apple-touch-startup-image"));
        assert!(tags.contains(r#"<meta name="apple-mobile-web-app-capable" content="no">"#));
    }

    #[test]
    fn meta_tags_escape_attribute_values() {
        let mut config = sample_config();
        config.site.description = r#"Fast "and" <safe>"#.to_string();
        let tags = generate_meta_tags(&config, &GeneratorOptions::default());
        assert!(tags.contains("Fast &quot;and&quot; &lt;safe&gt;"));
    }
}
