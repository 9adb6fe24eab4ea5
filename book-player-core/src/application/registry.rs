use crate::activities::{DragToDestinationActivity, SimpleChoiceActivity};
use crate::domain::{ActivityInstanceId, ActivityRequirements, PageElement};
use crate::traits::{Activity, ActivityDefinition, ActivityMountError};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

type ConstructFn =
    fn(PageElement, ActivityInstanceId) -> Result<Box<dyn Activity>, ActivityMountError>;

/// Constructor and static requirements for one activity type
#[derive(Clone, Copy)]
pub struct ActivityFactory {
    id: &'static str,
    requirements: fn() -> ActivityRequirements,
    construct: ConstructFn,
}

impl ActivityFactory {
    /// Factory for a type implementing [`ActivityDefinition`]
    pub fn of<A: ActivityDefinition>() -> Self {
        Self {
            id: A::ID,
            requirements: A::activity_requirements,
            construct: construct_boxed::<A>,
        }
    }

    /// Factory from plain functions (for activities without a definition type)
    pub fn new(
        id: &'static str,
        requirements: fn() -> ActivityRequirements,
        construct: ConstructFn,
    ) -> Self {
        Self {
            id,
            requirements,
            construct,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn requirements(&self) -> ActivityRequirements {
        (self.requirements)()
    }

    pub fn construct(
        &self,
        page: PageElement,
        instance_id: ActivityInstanceId,
    ) -> Result<Box<dyn Activity>, ActivityMountError> {
        (self.construct)(page, instance_id)
    }
}

impl fmt::Debug for ActivityFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityFactory")
            .field("id", &self.id)
            .field("requirements", &self.requirements())
            .finish()
    }
}

fn construct_boxed<A: ActivityDefinition>(
    page: PageElement,
    instance_id: ActivityInstanceId,
) -> Result<Box<dyn Activity>, ActivityMountError> {
    Ok(Box::new(A::construct(page, instance_id)?))
}

/// Explicit mapping from `data-activity` identifiers to factories
#[derive(Debug, Clone, Default)]
pub struct ActivityRegistry {
    factories: BTreeMap<&'static str, ActivityFactory>,
}

impl ActivityRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the activities shipped in this crate
    pub fn with_builtin() -> Self {
        Self::new()
            .with::<SimpleChoiceActivity>()
            .with::<DragToDestinationActivity>()
    }

    pub fn with<A: ActivityDefinition>(mut self) -> Self {
        self.register(ActivityFactory::of::<A>());
        self
    }

    /// Register a factory, replacing any previous one with the same id
    pub fn register(&mut self, factory: ActivityFactory) {
        if self.factories.insert(factory.id(), factory).is_some() {
            tracing::debug!("Replaced activity factory {}", factory.id());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    pub fn requirements_for(&self, id: &str) -> Option<ActivityRequirements> {
        self.factories.get(id).map(ActivityFactory::requirements)
    }

    /// Factory for the activity `page` declares
    pub fn resolve(&self, page: &PageElement) -> Result<&ActivityFactory, ActivityMountError> {
        let id = page
            .activity_id()
            .ok_or(ActivityMountError::NoActivityDeclared)?;

        self.factories
            .get(id)
            .ok_or_else(|| ActivityMountError::UnknownActivity(id.to_string()))
    }

    /// Construct a new instance bound to `page`
    pub fn construct(&self, page: PageElement) -> Result<Box<dyn Activity>, ActivityMountError> {
        let factory = self.resolve(&page)?;
        factory.construct(page, Uuid::new_v4())
    }
}
