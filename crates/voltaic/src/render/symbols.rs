//! Component glyphs: the type-to-symbol map and the glyph sheet.
//!
//! Components are drawn as `<use href="#fragment">` references. The
//! [`SymbolMap`] decides which fragment each component type points at; the
//! [`SymbolSheet`] carries the `<defs>` that define those fragments. The two
//! are independent: references are resolved by the SVG viewer, so a sheet can
//! be attached before or after anything is drawn.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, error, info};
use svg::{
    Node,
    node::{
        Text,
        element::{Element, tag::Type},
    },
    parser::Event,
};
use thiserror::Error;

use voltaic_core::netlist::ComponentKind;

/// The sheet shipped with the library.
const BUNDLED_SHEET: &str = include_str!("../../assets/symbol-sheet.svg");

/// Errors raised while loading a glyph sheet.
#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("failed to read symbol sheet `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed symbol sheet: {0}")]
    Parse(String),
}

/// Maps component kinds to glyph fragment ids such as `#resistor`.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolMap {
    fragments: IndexMap<ComponentKind, String>,
}

impl Default for SymbolMap {
    fn default() -> Self {
        let fragments = [
            (ComponentKind::Resistor, "#resistor"),
            (ComponentKind::VoltageSource, "#voltage-source"),
            (ComponentKind::Diode, "#diode"),
            (ComponentKind::Inductor, "#inductor"),
            (ComponentKind::Capacitor, "#capacitor"),
            (ComponentKind::CurrentSource, "#current-source"),
            (ComponentKind::Ground, "#ground"),
        ]
        .into_iter()
        .map(|(kind, fragment)| (kind, fragment.to_string()))
        .collect();

        Self { fragments }
    }
}

impl SymbolMap {
    /// Creates the default map with the given overrides applied.
    ///
    /// Overrides are keyed by type name and may add types the defaults lack.
    pub fn with_overrides(overrides: &IndexMap<String, String>) -> Self {
        let mut map = Self::default();
        for (kind, fragment) in overrides {
            debug!(kind = kind.as_str(), fragment = fragment.as_str(); "Symbol override");
            map.fragments
                .insert(ComponentKind::from(kind.clone()), fragment.clone());
        }
        map
    }

    /// Returns the fragment for a kind, if one is mapped.
    pub fn fragment(&self, kind: &ComponentKind) -> Option<&str> {
        self.fragments.get(kind).map(String::as_str)
    }

    /// Returns the `href` to draw for a kind: its fragment, or empty when unmapped.
    pub fn href(&self, kind: &ComponentKind) -> &str {
        self.fragment(kind).unwrap_or_default()
    }

    /// Iterates over the mapped kinds and their fragments.
    pub fn iter(&self) -> impl Iterator<Item = (&ComponentKind, &str)> {
        self.fragments
            .iter()
            .map(|(kind, fragment)| (kind, fragment.as_str()))
    }
}

/// The `<defs>` section of a glyph sheet.
#[derive(Debug, Clone)]
pub struct SymbolSheet {
    defs: Element,
    ids: Vec<String>,
}

impl Default for SymbolSheet {
    fn default() -> Self {
        Self {
            defs: Element::new("defs"),
            ids: Vec::new(),
        }
    }
}

impl SymbolSheet {
    /// Returns the sheet shipped with the library.
    pub fn bundled() -> Self {
        Self::from_svg(BUNDLED_SHEET).unwrap_or_else(|err| {
            error!(err:%; "Bundled symbol sheet is unusable");
            Self::default()
        })
    }

    /// Reads a glyph sheet from an SVG file.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Io`] if the file cannot be read and
    /// [`SymbolError::Parse`] if it is not well-formed SVG.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SymbolError> {
        let path = path.as_ref();
        info!(path:? = path; "Loading symbol sheet");

        let content = fs::read_to_string(path).map_err(|source| SymbolError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_svg(&content)
    }

    /// Extracts the first `<defs>` section of an SVG document.
    ///
    /// A document without `<defs>` yields an empty sheet.
    ///
    /// # Examples
    ///
    /// ```
    /// # use voltaic::render::SymbolSheet;
    /// let sheet = SymbolSheet::from_svg(
    ///     r#"<svg><defs><symbol id="resistor"><path d="M 0 0 L 10 0"/></symbol></defs></svg>"#,
    /// ).unwrap();
    /// assert!(sheet.contains("#resistor"));
    /// ```
    pub fn from_svg(content: &str) -> Result<Self, SymbolError> {
        let parser = svg::read(content).map_err(|err| SymbolError::Parse(err.to_string()))?;

        // Open elements inside <defs>; the first entry is <defs> itself
        let mut stack: Vec<Element> = Vec::new();
        let mut ids = Vec::new();

        for event in parser {
            match event {
                Event::Error(err) => return Err(SymbolError::Parse(err.to_string())),
                Event::Tag(name, kind, attributes) => {
                    if stack.is_empty() && name != "defs" {
                        continue;
                    }

                    if stack.len() == 1 && matches!(kind, Type::Start | Type::Empty) {
                        if let Some(id) = attributes.get("id") {
                            ids.push(id.to_string());
                        }
                    }

                    match kind {
                        Type::Start => {
                            let mut element = Element::new(name);
                            for (key, value) in attributes {
                                element.assign(key, value);
                            }
                            stack.push(element);
                        }
                        Type::Empty => {
                            let mut element = Element::new(name);
                            for (key, value) in attributes {
                                element.assign(key, value);
                            }
                            match stack.last_mut() {
                                Some(parent) => parent.append(element),
                                // A self-closing <defs/>
                                None => return Ok(Self { defs: element, ids }),
                            }
                        }
                        Type::End => {
                            let Some(element) = stack.pop() else {
                                continue;
                            };
                            match stack.last_mut() {
                                Some(parent) => parent.append(element),
                                None => {
                                    debug!(symbols = ids.len(); "Symbol sheet parsed");
                                    return Ok(Self { defs: element, ids });
                                }
                            }
                        }
                    }
                }
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        if !text.trim().is_empty() {
                            parent.append(Text::new(text));
                        }
                    }
                }
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(SymbolError::Parse("unterminated <defs> section".to_string()));
        }

        debug!("Symbol sheet has no <defs> section");
        Ok(Self::default())
    }

    /// Returns the ids defined directly inside `<defs>`, in document order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns true if the sheet defines the fragment, with or without the leading `#`.
    pub fn contains(&self, fragment: &str) -> bool {
        let id = fragment.strip_prefix('#').unwrap_or(fragment);
        self.ids.iter().any(|defined| defined == id)
    }

    /// Returns a copy of the `<defs>` element, ready to add to a document.
    pub fn to_definitions(&self) -> Element {
        self.defs.clone()
    }
}
