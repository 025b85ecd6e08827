//! Name-keyed lookup of tile components.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock, RwLock};

use super::{
    ComponentRenderer, OrganizerRenderer, ResourceCirclesRenderer, ResourceListRenderer,
    TimeRenderer, TitleRenderer,
};
use crate::error::RegistryError;

/// Maps component names to renderers.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    renderers: HashMap<String, Arc<dyn ComponentRenderer>>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in components.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins: [Arc<dyn ComponentRenderer>; 5] = [
            Arc::new(TimeRenderer),
            Arc::new(TitleRenderer),
            Arc::new(OrganizerRenderer),
            Arc::new(ResourceCirclesRenderer),
            Arc::new(ResourceListRenderer),
        ];
        for renderer in builtins {
            let name = renderer.name().to_string();
            registry.renderers.insert(name, renderer);
        }
        registry
    }

    /// Registers a renderer under its own name. A later registration with the
    /// same name replaces the earlier one.
    pub fn register<R: ComponentRenderer + 'static>(
        &mut self,
        renderer: R,
    ) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(renderer))
    }

    pub fn register_arc(
        &mut self,
        renderer: Arc<dyn ComponentRenderer>,
    ) -> Result<(), RegistryError> {
        let name = renderer.name().to_string();
        validate_name(&name)?;
        if self.renderers.insert(name.clone(), renderer).is_some() {
            log::debug!("Component '{}' replaced by a new registration", name);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ComponentRenderer>> {
        self.renderers.get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.renderers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl Debug for ComponentRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("names", &self.names())
            .finish()
    }
}

fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() {
        log::warn!("Rejected component registration with an empty name");
        return Err(RegistryError::EmptyName);
    }
    if name.chars().any(|c| c.is_whitespace() || c == '+') {
        log::warn!("Rejected component registration '{}'", name);
        return Err(RegistryError::InvalidName(name.to_string()));
    }
    Ok(())
}

static GLOBAL_REGISTRY: OnceLock<RwLock<ComponentRegistry>> = OnceLock::new();

fn global() -> &'static RwLock<ComponentRegistry> {
    GLOBAL_REGISTRY.get_or_init(|| RwLock::new(ComponentRegistry::with_builtins()))
}

/// Registers a renderer in the process-wide registry.
pub fn register_component<R: ComponentRenderer + 'static>(
    renderer: R,
) -> Result<(), RegistryError> {
    match global().write() {
        Ok(mut guard) => guard.register(renderer),
        Err(poisoned) => poisoned.into_inner().register(renderer),
    }
}

/// Snapshot of the process-wide registry.
pub fn global_registry() -> ComponentRegistry {
    match global().read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentProps, RenderResult, TileContext};
    use crate::error::RenderError;
    use crate::layout::BUILTIN_COMPONENTS;
    use crate::render::Rect;

    struct Named(&'static str);

    impl ComponentRenderer for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn render(
            &self,
            _ctx: &mut TileContext<'_>,
            _props: &ComponentProps<'_>,
            _region: Rect,
        ) -> Result<RenderResult, RenderError> {
            Ok(RenderResult::EMPTY)
        }
    }

    #[test]
    fn builtins_are_registered() {
        let registry = ComponentRegistry::with_builtins();
        assert_eq!(registry.len(), BUILTIN_COMPONENTS.len());
        for name in BUILTIN_COMPONENTS {
            assert!(registry.has(name), "missing {}", name);
        }
        assert!(!registry.has("badge"));
    }

    #[test]
    fn rejects_bad_names() {
        let mut registry = ComponentRegistry::new();
        assert_eq!(registry.register(Named("")), Err(RegistryError::EmptyName));
        assert_eq!(
            registry.register(Named("my component")),
            Err(RegistryError::InvalidName("my component".to_string()))
        );
        assert!(registry.register(Named("+2")).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = ComponentRegistry::with_builtins();
        let before = registry.len();
        registry.register(Named("time")).unwrap();
        assert_eq!(registry.len(), before);
        assert!(registry.register(Named("weather")).is_ok());
        assert_eq!(registry.names().first().map(String::as_str), Some("organizer"));
        assert!(registry.has("weather"));
    }

    #[test]
    fn global_registry_accepts_new_components() {
        register_component(Named("roomCapacity")).unwrap();
        let registry = global_registry();
        assert!(registry.has("roomCapacity"));
        assert!(registry.has("title"));
    }

    #[test]
    fn badge_is_added_through_registration() {
        use crate::components::{BadgeRenderer, BADGE};

        register_component(BadgeRenderer).unwrap();
        assert!(global_registry().has(BADGE));
        assert!(!ComponentRegistry::with_builtins().has(BADGE));
    }
}
