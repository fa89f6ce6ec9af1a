use super::{EntityId, EntityType, MappingStrategy, Navigation, Property, PropertyId};

use crate::{Error, Result};
use indexmap::IndexMap;
use std::collections::HashMap;

/// The application-level model: every entity type, arranged in hierarchies.
///
/// Hierarchy traversal is structural recursion over parent links. The
/// constructor rejects forests that are not trees, so the traversal helpers
/// can assume every parent chain ends at a root.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Schema {
    pub entities: IndexMap<EntityId, EntityType>,
}

impl Schema {
    /// Validates the type hierarchies and creates the schema.
    pub fn new(entities: Vec<EntityType>) -> Result<Schema> {
        let mut map = IndexMap::new();

        for (index, entity) in entities.into_iter().enumerate() {
            if entity.id != EntityId(index) {
                crate::bail!(
                    "entity `{}` has id {:?}, expected {:?}",
                    entity.name,
                    entity.id,
                    EntityId(index)
                );
            }

            if map.values().any(|other: &EntityType| other.name == entity.name) {
                return Err(Error::configuration(format!(
                    "entity type `{}` is declared more than once",
                    entity.name
                )));
            }

            map.insert(entity.id, entity);
        }

        let schema = Schema { entities: map };
        schema.verify_tree()?;
        schema.verify_hierarchies()?;
        Ok(schema)
    }

    /// Get an entity type by ID
    pub fn entity(&self, id: impl Into<EntityId>) -> &EntityType {
        self.entities.get(&id.into()).expect("invalid entity ID")
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.entities.values()
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&EntityType> {
        let name = crate::schema::Name::new(name);
        self.entities().find(|entity| entity.name == name)
    }

    /// Get a property by ID
    pub fn property(&self, id: PropertyId) -> &Property {
        self.entity(id.entity)
            .properties
            .get(id.index)
            .expect("invalid property ID")
    }

    /// Finds a property declared on `id` or inherited from an ancestor.
    pub fn find_property(&self, id: impl Into<EntityId>, name: &str) -> Option<&Property> {
        self.all_properties(id)
            .into_iter()
            .find(|property| property.name == name)
    }

    /// Finds a navigation declared on `id` or inherited from an ancestor,
    /// returning it with the entity that declares it.
    pub fn find_navigation(
        &self,
        id: impl Into<EntityId>,
        name: &str,
    ) -> Option<(EntityId, &Navigation)> {
        let id = id.into();
        self.ancestors(id)
            .into_iter()
            .chain([id])
            .find_map(|entity| {
                self.entity(entity)
                    .navigation(name)
                    .map(|navigation| (entity, navigation))
            })
    }

    pub fn root_of(&self, id: impl Into<EntityId>) -> EntityId {
        let mut id = id.into();
        while let Some(parent) = self.entity(id).parent {
            id = parent;
        }
        id
    }

    /// Strict ancestors of `id`, root first.
    pub fn ancestors(&self, id: impl Into<EntityId>) -> Vec<EntityId> {
        let mut ret = vec![];
        let mut current = self.entity(id).parent;
        while let Some(id) = current {
            ret.push(id);
            current = self.entity(id).parent;
        }
        ret.reverse();
        ret
    }

    /// Direct children of `id`, in declaration order.
    pub fn children(&self, id: impl Into<EntityId>) -> impl Iterator<Item = &EntityType> + '_ {
        let id = id.into();
        self.entities()
            .filter(move |entity| entity.parent == Some(id))
    }

    /// Strict descendants of `id`, in pre-order.
    pub fn descendants(&self, id: impl Into<EntityId>) -> Vec<EntityId> {
        let mut ret = vec![];
        self.collect_descendants(id.into(), &mut ret);
        ret
    }

    fn collect_descendants(&self, id: EntityId, dst: &mut Vec<EntityId>) {
        for child in self.children(id) {
            dst.push(child.id);
            self.collect_descendants(child.id, dst);
        }
    }

    /// `id` followed by its strict descendants, in pre-order.
    pub fn self_and_descendants(&self, id: impl Into<EntityId>) -> Vec<EntityId> {
        let id = id.into();
        let mut ret = vec![id];
        self.collect_descendants(id, &mut ret);
        ret
    }

    /// Concrete, table-mapped types reachable from `id` (itself included), in
    /// pre-order. Keyless types are excluded; they bypass strategy
    /// resolution.
    pub fn concrete_types(&self, id: impl Into<EntityId>) -> Vec<EntityId> {
        self.self_and_descendants(id)
            .into_iter()
            .filter(|id| {
                let entity = self.entity(*id);
                !entity.is_abstract && !entity.is_keyless()
            })
            .collect()
    }

    /// Properties of `id` including inherited ones, ancestors first.
    pub fn all_properties(&self, id: impl Into<EntityId>) -> Vec<&Property> {
        let id = id.into();
        self.ancestors(id)
            .into_iter()
            .chain([id])
            .flat_map(|entity| self.entity(entity).properties.iter())
            .collect()
    }

    /// Primary key properties, declared on the hierarchy root.
    pub fn primary_key(&self, id: impl Into<EntityId>) -> Vec<PropertyId> {
        self.entity(self.root_of(id)).primary_key().collect()
    }

    pub fn strategy_of(&self, id: impl Into<EntityId>) -> MappingStrategy {
        self.entity(self.root_of(id))
            .strategy
            .unwrap_or_default()
    }

    /// Hierarchy roots, in declaration order.
    pub fn roots(&self) -> impl Iterator<Item = &EntityType> {
        self.entities().filter(|entity| entity.is_root())
    }

    fn verify_tree(&self) -> Result<()> {
        for entity in self.entities() {
            let mut steps = 0;
            let mut current = entity.parent;

            while let Some(parent) = current {
                let Some(parent) = self.entities.get(&parent) else {
                    return Err(Error::configuration(format!(
                        "entity type `{}` has an unknown parent type",
                        entity.name
                    )));
                };

                steps += 1;
                if steps > self.entities.len() {
                    return Err(Error::configuration(format!(
                        "the inheritance chain of `{}` contains a cycle",
                        entity.name
                    )));
                }

                current = parent.parent;
            }
        }

        Ok(())
    }

    fn verify_hierarchies(&self) -> Result<()> {
        for root in self.roots() {
            let strategy = root.strategy.unwrap_or_default();
            let mut names = HashMap::<&str, &EntityType>::new();

            if !root.is_keyless() && root.primary_key().next().is_none() {
                return Err(Error::configuration(format!(
                    "entity type `{}` does not declare a primary key",
                    root.name
                )));
            }

            for id in self.self_and_descendants(root.id) {
                let entity = self.entity(id);

                if !entity.is_root() {
                    if entity.primary_key().next().is_some() {
                        return Err(Error::configuration(format!(
                            "entity type `{}` declares a primary key but derives from `{}`; \
                             keys are declared on the hierarchy root",
                            entity.name, root.name
                        )));
                    }

                    if let Some(declared) = entity.strategy {
                        if declared != strategy {
                            return Err(Error::configuration(format!(
                                "entity type `{}` is mapped with {declared} but its hierarchy \
                                 root `{}` is mapped with {strategy}; the mapping strategy is \
                                 set on the hierarchy root",
                                entity.name, root.name
                            )));
                        }
                    }

                    if entity.discriminator.is_some() {
                        return Err(Error::configuration(format!(
                            "entity type `{}` configures a discriminator; discriminators are \
                             configured on the hierarchy root `{}`",
                            entity.name, root.name
                        )));
                    }
                }

                if entity.is_keyless() {
                    if entity.is_abstract {
                        return Err(Error::configuration(format!(
                            "keyless entity type `{}` cannot be abstract",
                            entity.name
                        )));
                    }

                    if self.children(id).next().is_some() {
                        return Err(Error::configuration(format!(
                            "keyless entity type `{}` cannot have derived types",
                            entity.name
                        )));
                    }
                }

                for property in &entity.properties {
                    if let Some(other) = names.insert(&property.name, entity) {
                        return Err(Error::configuration(format!(
                            "property `{}` is declared on both `{}` and `{}` in the `{}` hierarchy",
                            property.name, other.name, entity.name, root.name
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
