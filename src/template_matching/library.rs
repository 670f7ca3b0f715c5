/// Named template storage, loaded once at startup
use super::types::Template;
use crate::error::{BotError, BotResult};
use std::path::Path;

/// Ordered set of templates looked up by name
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `(name, file name)` pair from `directory`.
    ///
    /// All files are required: the first missing or unreadable one aborts the load.
    pub fn load_from_directory(directory: &Path, files: &[(&str, &str)]) -> BotResult<Self> {
        let mut library = Self::new();
        for (name, file_name) in files {
            let template = Template::load(*name, &directory.join(file_name))?;
            log::debug!(
                "🖼️ Loaded template '{}' ({}x{})",
                template.name(),
                template.width(),
                template.height()
            );
            library.insert(template);
        }
        Ok(library)
    }

    /// Add a template, replacing any existing one with the same name
    pub fn insert(&mut self, template: Template) {
        match self.templates.iter_mut().find(|t| t.name() == template.name()) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    pub fn get(&self, name: &str) -> BotResult<&Template> {
        self.templates
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| BotError::UnknownTemplate {
                name: name.to_string(),
            })
    }

    /// Clone out the named templates, keeping the requested order
    pub fn select(&self, names: &[&str]) -> BotResult<Vec<Template>> {
        names.iter().map(|name| self.get(name).cloned()).collect()
    }

    pub fn count(&self) -> usize {
        self.templates.len()
    }
}
