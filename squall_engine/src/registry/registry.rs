/// Registry — entity lifecycle plus type-erased component storage.
///
/// Entity slots are generation-tagged and recycled through a free list,
/// so destroyed handles are detected instead of silently aliasing new
/// entities. Component storages are one [`SparseSet`] per component
/// type, created on first use and keyed by `TypeId`.
///
/// The registry is mutated only by the thread driving the frame. Views
/// borrow the registry for their whole iteration, so component
/// membership cannot change mid-enumeration (the borrow checker rejects
/// it); that restriction is part of the contract, not a runtime check.

use std::any::{type_name, Any, TypeId};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use super::{Entity, SparseSet};

/// Default entity capacity of a registry
pub const MAX_ENTITY_COUNT: u32 = 10_000;

/// Type-erased view of a component storage, enough for entity teardown.
trait ComponentStorage {
    fn remove_entity(&mut self, entity: Entity);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> ComponentStorage for SparseSet<T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub struct Registry {
    capacity: u32,
    generations: Vec<u32>,
    alive: Vec<bool>,
    free_indices: Vec<u32>,
    live_count: u32,
    storages: FxHashMap<TypeId, Box<dyn ComponentStorage>>,
}

impl Registry {
    /// Create a registry with an explicit entity capacity
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            generations: Vec::new(),
            alive: Vec::new(),
            free_indices: Vec::new(),
            live_count: 0,
            storages: FxHashMap::default(),
        }
    }

    /// Allocate a new entity.
    ///
    /// Slot indices are recycled from destroyed entities before fresh
    /// ones are handed out. Fails with `CapacityExceeded` once the live
    /// entity count reaches the capacity.
    pub fn create(&mut self) -> Result<Entity> {
        if self.live_count >= self.capacity {
            return Err(Error::CapacityExceeded(self.capacity));
        }

        let index = match self.free_indices.pop() {
            Some(index) => index,
            None => {
                let index = self.generations.len() as u32;
                self.generations.push(0);
                self.alive.push(false);
                index
            }
        };

        self.alive[index as usize] = true;
        self.live_count += 1;
        Ok(Entity::new(index, self.generations[index as usize]))
    }

    /// Destroy an entity and every component attached to it.
    ///
    /// A stale or already-destroyed handle fails with `InvalidEntity`.
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        if !self.is_alive(entity) {
            return Err(Error::InvalidEntity);
        }

        for storage in self.storages.values_mut() {
            storage.remove_entity(entity);
        }

        let index = entity.index() as usize;
        self.alive[index] = false;
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.free_indices.push(entity.index());
        self.live_count -= 1;
        Ok(())
    }

    /// Whether `entity` refers to a live slot of the matching generation
    pub fn is_alive(&self, entity: Entity) -> bool {
        let index = entity.index() as usize;
        self.alive.get(index).copied().unwrap_or(false)
            && self.generations[index] == entity.generation()
    }

    /// Number of live entities
    pub fn len(&self) -> u32 {
        self.live_count
    }

    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Entity capacity this registry was created with
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Attach a component to an entity.
    ///
    /// Fails with `DuplicateComponent` if the entity already has a `T`,
    /// or `InvalidEntity` for a dead handle.
    pub fn add_component<T: 'static>(&mut self, entity: Entity, component: T) -> Result<()> {
        if !self.is_alive(entity) {
            return Err(Error::InvalidEntity);
        }

        let storage = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SparseSet::<T>::new()))
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()
            .expect("storage type matches its TypeId key");

        if storage.insert(entity, component) {
            Ok(())
        } else {
            Err(Error::DuplicateComponent(type_name::<T>()))
        }
    }

    /// Detach and return a component from an entity.
    pub fn remove_component<T: 'static>(&mut self, entity: Entity) -> Result<T> {
        if !self.is_alive(entity) {
            return Err(Error::InvalidEntity);
        }

        self.storage_mut::<T>()
            .and_then(|storage| storage.remove(entity))
            .ok_or(Error::ComponentNotFound(type_name::<T>()))
    }

    /// Shared access to a required component.
    ///
    /// A destroyed entity has no components, so a stale handle fails
    /// with `ComponentNotFound` like any other missing component.
    pub fn get_component<T: 'static>(&self, entity: Entity) -> Result<&T> {
        self.storage::<T>()
            .and_then(|storage| storage.get(entity))
            .ok_or(Error::ComponentNotFound(type_name::<T>()))
    }

    /// In-place mutable access to a required component.
    pub fn get_component_mut<T: 'static>(&mut self, entity: Entity) -> Result<&mut T> {
        self.storage_mut::<T>()
            .and_then(|storage| storage.get_mut(entity))
            .ok_or(Error::ComponentNotFound(type_name::<T>()))
    }

    /// Non-failing probe for an optional component.
    pub fn try_get_component<T: 'static>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    /// Non-failing mutable probe for an optional component.
    pub fn try_get_component_mut<T: 'static>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(entity)
    }

    /// Whether the entity currently holds a `T`
    pub fn has_component<T: 'static>(&self, entity: Entity) -> bool {
        self.storage::<T>().is_some_and(|storage| storage.contains(entity))
    }

    /// Lazily enumerate every entity holding all of the queried types.
    ///
    /// Produced fresh per invocation; iteration follows the dense
    /// (insertion) order of the first queried type's storage, filtered by
    /// the rest. An empty result is not an error.
    ///
    /// ```
    /// # use squall_engine::registry::Registry;
    /// # let mut registry = Registry::default();
    /// # struct Position(f32);
    /// # struct Velocity(f32);
    /// # let e = registry.create().unwrap();
    /// # registry.add_component(e, Position(0.0)).unwrap();
    /// # registry.add_component(e, Velocity(1.0)).unwrap();
    /// for entity in registry.view::<(Position, Velocity)>() {
    ///     // entity has both components
    /// #   let _ = entity;
    /// }
    /// ```
    pub fn view<Q: ViewQuery>(&self) -> impl Iterator<Item = Entity> + '_ {
        Q::entities(self)
    }

    fn storage<T: 'static>(&self) -> Option<&SparseSet<T>> {
        self.storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref::<SparseSet<T>>())
    }

    fn storage_mut<T: 'static>(&mut self) -> Option<&mut SparseSet<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<SparseSet<T>>())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(MAX_ENTITY_COUNT)
    }
}

// ============================================================================
// View queries
// ============================================================================

/// Component-set predicate for [`Registry::view`].
///
/// Implemented for tuples of 1 to 4 component types.
pub trait ViewQuery {
    fn entities<'r>(registry: &'r Registry) -> Box<dyn Iterator<Item = Entity> + 'r>;
}

macro_rules! impl_view_query {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: 'static $(, $rest: 'static)*> ViewQuery for ($first, $($rest,)*) {
            fn entities<'r>(registry: &'r Registry) -> Box<dyn Iterator<Item = Entity> + 'r> {
                match registry.storage::<$first>() {
                    Some(storage) => Box::new(
                        storage
                            .entities()
                            .iter()
                            .copied()
                            .filter(move |&entity| {
                                true $(&& registry.has_component::<$rest>(entity))*
                            }),
                    ),
                    None => Box::new(std::iter::empty()),
                }
            }
        }
    };
}

impl_view_query!(A);
impl_view_query!(A, B);
impl_view_query!(A, B, C);
impl_view_query!(A, B, C, D);

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
