use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

/// Id of the optional `<script type="application/json">` block that overrides defaults.
pub const CONFIG_ELEMENT_ID: &str = "landing-fx-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    /// Widths at or below this count as a small screen (px).
    pub small_screen_max_width: u32,
    pub reduced_motion_query: String,
    /// `requestIdleCallback` timeout for the idle tier (ms).
    pub idle_timeout_ms: u32,
    pub fade_in: FadeInConfig,
    pub header: HeaderConfig,
    pub parallax: ParallaxConfig,
    pub indicator: IndicatorConfig,
    pub float_button: FloatButtonConfig,
    pub counter: CounterConfig,
    pub anchor: AnchorConfig,
    pub accordion: AccordionConfig,
    pub tracking: TrackingConfig,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            small_screen_max_width: 1024,
            reduced_motion_query: "(prefers-reduced-motion: reduce)".to_string(),
            idle_timeout_ms: 2500,
            fade_in: FadeInConfig::default(),
            header: HeaderConfig::default(),
            parallax: ParallaxConfig::default(),
            indicator: IndicatorConfig::default(),
            float_button: FloatButtonConfig::default(),
            counter: CounterConfig::default(),
            anchor: AnchorConfig::default(),
            accordion: AccordionConfig::default(),
            tracking: TrackingConfig::default(),
        }
    }
}

impl FxConfig {
    pub fn small_screen_query(&self) -> String {
        format!("(max-width: {}px)", self.small_screen_max_width)
    }

    /// Parses a JSON override. Keys that are absent keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the override block from the page, falling back to defaults.
    pub fn load(document: &Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
            .filter(|raw| !raw.trim().is_empty());

        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|err| {
                warn!("Ignoring #{CONFIG_ELEMENT_ID}: {err}");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FadeInConfig {
    pub selectors: Vec<String>,
    pub threshold: f64,
    pub root_margin: String,
    pub stagger_steps: usize,
}

impl Default for FadeInConfig {
    fn default() -> Self {
        let selectors = [
            ".section-header",
            ".queixa-card",
            ".step",
            ".feature",
            ".tratamento-card",
            ".medico-card",
            ".resultado-item",
            ".faq-item",
            ".clinica-stat",
            ".google-rating",
        ];
        Self {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            threshold: 0.1,
            root_margin: "0px 0px -10% 0px".to_string(),
            stagger_steps: 5,
        }
    }
}

impl FadeInConfig {
    pub fn selector(&self) -> String {
        self.selectors.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub selector: String,
    pub threshold: f64,
    pub shadow: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            selector: ".header".to_string(),
            threshold: 100.0,
            shadow: "0 2px 20px rgba(106, 26, 29, 0.1)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub selector: String,
    pub factor: f64,
    /// No transform is written once the page is scrolled this far.
    pub ceiling: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            selector: ".hero-image-wrapper img".to_string(),
            factor: 0.1,
            ceiling: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub selector: String,
    pub threshold: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            selector: ".hero-scroll-indicator".to_string(),
            threshold: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FloatButtonConfig {
    pub button_selector: String,
    pub section_selector: String,
    pub threshold: f64,
}

impl Default for FloatButtonConfig {
    fn default() -> Self {
        Self {
            button_selector: ".whatsapp-float".to_string(),
            section_selector: ".hero".to_string(),
            threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub selector: String,
    pub target: u32,
    pub duration_ms: f64,
    pub threshold: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            selector: ".stat-number".to_string(),
            target: 13,
            duration_ms: 1500.0,
            threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    pub selector: String,
    pub header_selector: String,
    /// Gap left between the sticky header and the scrolled-to element (px).
    pub spacing: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            selector: "a[href^=\"#\"]".to_string(),
            header_selector: ".header".to_string(),
            spacing: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AccordionConfig {
    pub selector: String,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            selector: ".faq-item".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub enabled: bool,
    /// Substrings of `href` that mark an outbound messaging link.
    pub link_patterns: Vec<String>,
    pub event: String,
    pub category: String,
    pub label: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            link_patterns: vec!["wa.me".to_string(), "wa.link".to_string()],
            event: "whatsapp_click".to_string(),
            category: "engagement".to_string(),
            label: "WhatsApp Lead".to_string(),
        }
    }
}
