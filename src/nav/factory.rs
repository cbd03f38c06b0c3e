//! Named screen constructors, run on first visit

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

use crate::nav::controller::NavigationController;
use crate::nav::screen::Screen;

/// Builds one screen on first visit.
///
/// The controller is passed in so a factory can look up or rewire screens it
/// collaborates with. Building may navigate again; the session lock allows it.
pub trait ScreenFactory {
    fn create(&self, nav: &mut NavigationController) -> Result<Box<dyn Screen>>;
}

impl<F> ScreenFactory for F
where
    F: Fn(&mut NavigationController) -> Result<Box<dyn Screen>>,
{
    fn create(&self, nav: &mut NavigationController) -> Result<Box<dyn Screen>> {
        self(nav)
    }
}

/// Screen name to factory
#[derive(Default, Clone)]
pub struct FactoryRegistry {
    factories: HashMap<String, Arc<dyn ScreenFactory>>,
}

impl std::fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryRegistry").field("names", &self.names()).finish()
    }
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&mut NavigationController) -> Result<Box<dyn Screen>> + 'static,
    {
        self.register_factory(name, factory);
    }

    pub fn register_factory(&mut self, name: impl Into<String>, factory: impl ScreenFactory + 'static) {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Shared handle, so the caller can release its borrow of the registry
    /// before building
    pub fn get(&self, name: &str) -> Option<Arc<dyn ScreenFactory>> {
        self.factories.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|k| k.as_str()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
