//! Definition registry
//!
//! `Highlighter` owns the loaded definitions and the selected output
//! format. Definitions are published as an immutable `DefinitionSet`
//! snapshot; adding or reloading definitions swaps in a new snapshot, so
//! callers holding the old one are unaffected.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use super::builtin;
use super::language::Definition;
use super::loader;
use crate::config::Config;
use crate::engine;
use crate::error::{HighlightError, Result};
use crate::render::{HtmlRenderer, OutputFormat, Renderer};

/// An immutable set of definitions, looked up by name ignoring case
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    definitions: Vec<Arc<Definition>>,
}

impl DefinitionSet {
    /// Build a set; names must be unique ignoring case
    pub fn new(definitions: Vec<Definition>) -> Result<Self> {
        let mut set = Self::default();
        for definition in definitions {
            if set.get(definition.name()).is_some() {
                return Err(HighlightError::DuplicateDefinition(definition.name().to_string()));
            }
            set.definitions.push(Arc::new(definition));
        }
        Ok(set)
    }

    /// A copy of this set with `definitions` added. Same-named entries
    /// are replaced in place.
    pub fn merged(&self, definitions: Vec<Definition>) -> Self {
        let mut set = self.clone();
        for definition in definitions {
            let definition = Arc::new(definition);
            match set
                .definitions
                .iter_mut()
                .find(|d| d.name().eq_ignore_ascii_case(definition.name()))
            {
                Some(slot) => {
                    debug!("Overriding definition {}", slot.name());
                    *slot = definition;
                }
                None => set.definitions.push(definition),
            }
        }
        set
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Definition>> {
        self.definitions.iter().find(|d| d.name().eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Entry point: highlight input by definition name
#[derive(Debug, Clone)]
pub struct Highlighter {
    definitions: Arc<DefinitionSet>,
    format: OutputFormat,
}

impl Highlighter {
    /// A highlighter with the built-in definitions and HTML output
    pub fn new() -> Result<Self> {
        Ok(Self::with_definitions(DefinitionSet::new(builtin::all_definitions()?)?))
    }

    pub fn with_definitions(definitions: DefinitionSet) -> Self {
        Self {
            definitions: Arc::new(definitions),
            format: OutputFormat::default(),
        }
    }

    /// Build from application settings: built-ins (unless disabled), then
    /// the configured definitions file on top.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut highlighter = Self::with_definitions(DefinitionSet::default());
        highlighter.reload(config)?;
        Ok(highlighter)
    }

    /// Rebuild the definitions from `config` and publish them.
    ///
    /// On error the current snapshot stays in place.
    pub fn reload(&mut self, config: &Config) -> Result<()> {
        let base = if config.builtin {
            DefinitionSet::new(builtin::all_definitions()?)?
        } else {
            DefinitionSet::default()
        };
        let set = match &config.definitions {
            Some(path) => base.merged(loader::load_definitions_file(path)?),
            None => base,
        };

        info!("{} definitions available", set.len());
        self.definitions = Arc::new(set);
        self.format = config.format;
        Ok(())
    }

    /// Add definitions, replacing any with the same name
    pub fn add_definitions(&mut self, definitions: Vec<Definition>) {
        self.definitions = Arc::new(self.definitions.merged(definitions));
    }

    /// Load a definitions file on top of the current set
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let definitions = loader::load_definitions_file(path)?;
        self.add_definitions(definitions);
        Ok(())
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    /// The current definitions. Later changes publish a new snapshot and
    /// leave this one untouched.
    pub fn snapshot(&self) -> Arc<DefinitionSet> {
        Arc::clone(&self.definitions)
    }

    pub fn definition(&self, name: &str) -> Result<Arc<Definition>> {
        self.definitions
            .get(name)
            .cloned()
            .ok_or_else(|| HighlightError::UnknownDefinition(name.to_string()))
    }

    pub fn definition_names(&self) -> Vec<String> {
        self.definitions.names().map(str::to_string).collect()
    }

    /// Highlight `input` with the named definition in the selected format
    pub fn highlight(&self, definition: &str, input: &str) -> Result<String> {
        let mut renderer = self.format.renderer();
        self.highlight_with(definition, renderer.as_mut(), input)
    }

    /// Highlight with a caller-supplied renderer
    pub fn highlight_with(
        &self,
        definition: &str,
        renderer: &mut dyn Renderer,
        input: &str,
    ) -> Result<String> {
        let definition = self.definition(definition)?;
        engine::highlight(&definition, renderer, input)
    }

    /// CSS rules for the class names the HTML-CSS format emits
    pub fn stylesheet(&self, definition: &str) -> Result<String> {
        let definition = self.definition(definition)?;
        Ok(HtmlRenderer::stylesheet(&definition))
    }
}
