//! Stylesheet asset
//!
//! The file is kept verbatim. Class rules are indexed so the sidebar can take
//! its colors and sizes from the same stylesheet the page was designed with.
//! Only plain `selector { property: value; }` rules are understood; rules
//! nested in `@media` blocks are read as if they were top level.

use std::path::Path;

use ahash::AHashMap;
use egui::Color32;

use crate::StyleError;

/// Pixels per `rem`/`em`
const ROOT_FONT_SIZE: f32 = 16.0;

/// A parsed stylesheet
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    source: String,
    rules: AHashMap<String, AHashMap<String, String>>,
}

impl Stylesheet {
    /// Read a stylesheet file
    pub fn load(path: &Path) -> Result<Self, StyleError> {
        let source = std::fs::read_to_string(path).map_err(|source| StyleError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let sheet = Self::parse(source);
        tracing::info!("Loaded stylesheet {} ({} selectors)", path.display(), sheet.rules.len());
        Ok(sheet)
    }
    
    /// Parse stylesheet text. Later declarations win, as in a browser.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut rules: AHashMap<String, AHashMap<String, String>> = AHashMap::new();
        
        for block in strip_comments(&source).split('}') {
            let Some((head, body)) = block.rsplit_once('{') else {
                continue;
            };
            // Drop an enclosing at-rule header
            let head = head.rsplit('{').next().unwrap_or(head);
            
            for selector in head.split(',').map(str::trim) {
                if selector.is_empty() || selector.starts_with('@') {
                    continue;
                }
                let declarations = rules.entry(selector.to_string()).or_default();
                for declaration in body.split(';') {
                    if let Some((property, value)) = declaration.split_once(':') {
                        let value = value.trim().trim_end_matches("!important").trim();
                        declarations.insert(property.trim().to_ascii_lowercase(), value.to_string());
                    }
                }
            }
        }
        
        Self { source, rules }
    }
    
    /// The stylesheet text exactly as read
    pub fn source(&self) -> &str {
        &self.source
    }
    
    /// Raw value of `property` in the rule for `selector`
    pub fn property(&self, selector: &str, property: &str) -> Option<&str> {
        self.rules.get(selector)?.get(property).map(String::as_str)
    }
    
    /// `color` of `selector`
    pub fn color(&self, selector: &str) -> Option<Color32> {
        self.property(selector, "color").and_then(parse_color)
    }
    
    /// `font-size` of `selector`, in points
    pub fn font_size(&self, selector: &str) -> Option<f32> {
        self.property(selector, "font-size").and_then(parse_length)
    }
    
    /// `width` of `selector`, in points
    pub fn width(&self, selector: &str) -> Option<f32> {
        self.property(selector, "width").and_then(parse_length)
    }
}

fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

/// `#rgb`, `#rrggbb` or `rgb(r, g, b)`
pub fn parse_color(value: &str) -> Option<Color32> {
    let value = value.trim();
    
    if let Some(hex) = value.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            3 => {
                let mut rgb = hex.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
                Some(Color32::from_rgb(rgb.next()??, rgb.next()??, rgb.next()??))
            }
            6 => Some(Color32::from_rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        };
    }
    
    let inner = value.strip_prefix("rgb(")?.strip_suffix(')')?;
    let parts: Vec<u8> = inner
        .split(',')
        .map(|p| p.trim().parse::<u8>().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [r, g, b] => Some(Color32::from_rgb(*r, *g, *b)),
        _ => None,
    }
}

/// `12px`, `1.5rem`, `2em` or a bare number
pub fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    if let Some(px) = value.strip_suffix("px") {
        px.trim().parse().ok()
    } else if let Some(rem) = value.strip_suffix("rem") {
        rem.trim().parse::<f32>().ok().map(|v| v * ROOT_FONT_SIZE)
    } else if let Some(em) = value.strip_suffix("em") {
        em.trim().parse::<f32>().ok().map(|v| v * ROOT_FONT_SIZE)
    } else {
        value.parse().ok()
    }
}
