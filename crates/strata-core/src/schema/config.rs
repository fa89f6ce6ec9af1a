//! Declarative model configuration.
//!
//! A [`ModelConfig`] lists entity types by name. It is either deserialized
//! from JSON or assembled with the fluent methods on [`EntityConfig`], then
//! converted into a validated [`app::Schema`].

use super::app::{
    self, DiscriminatorConfig, EntityId, EntityType, MappingStrategy, Navigation, NavigationKind,
    Property, PropertyId,
};
use crate::{stmt, Error, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub entities: Vec<EntityConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityConfig {
    pub name: String,

    #[serde(default)]
    pub parent: Option<String>,

    #[serde(rename = "abstract", default)]
    pub is_abstract: bool,

    #[serde(default)]
    pub properties: Vec<PropertyConfig>,

    #[serde(default)]
    pub navigations: Vec<NavigationConfig>,

    #[serde(default)]
    pub table: Option<String>,

    #[serde(default)]
    pub strategy: Option<MappingStrategy>,

    #[serde(default)]
    pub discriminator_value: Option<String>,

    #[serde(default)]
    pub discriminator: Option<DiscriminatorSettings>,

    #[serde(default)]
    pub defining_query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: stmt::Type,

    #[serde(default)]
    pub nullable: bool,

    /// Part of the primary key
    #[serde(default)]
    pub key: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NavigationConfig {
    pub name: String,

    pub target: String,

    pub kind: NavigationKindConfig,

    /// Names of the foreign key properties. They live on the target for
    /// collections and on the declaring entity for references.
    pub foreign_key: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationKindConfig {
    Collection,
    Reference,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscriminatorSettings {
    #[serde(default = "default_discriminator_column")]
    pub column: String,

    #[serde(default = "default_complete")]
    pub complete: bool,
}

fn default_discriminator_column() -> String {
    DiscriminatorConfig::DEFAULT_COLUMN.to_string()
}

fn default_complete() -> bool {
    true
}

impl ModelConfig {
    pub fn new() -> ModelConfig {
        ModelConfig::default()
    }

    pub fn from_json(src: &str) -> Result<ModelConfig> {
        serde_json::from_str(src)
            .map_err(|err| Error::from(err).context(Error::configuration("malformed model JSON")))
    }

    pub fn entity(mut self, entity: EntityConfig) -> ModelConfig {
        self.entities.push(entity);
        self
    }

    /// Resolves names and validates the hierarchies.
    pub fn into_app(self) -> Result<app::Schema> {
        let ids = |name: &str| {
            self.entities
                .iter()
                .position(|entity| entity.name == name)
                .map(EntityId)
        };

        let mut entities = vec![];

        for (index, config) in self.entities.iter().enumerate() {
            let id = EntityId(index);
            let mut entity = EntityType::new(id, &config.name);

            if entity.name.is_empty() {
                return Err(Error::configuration(format!(
                    "entity type name `{}` is not a valid identifier",
                    config.name
                )));
            }

            entity.parent = match &config.parent {
                Some(parent) => Some(ids(parent).ok_or_else(|| {
                    Error::configuration(format!(
                        "entity type `{}` derives from unknown type `{parent}`",
                        config.name
                    ))
                })?),
                None => None,
            };

            entity.is_abstract = config.is_abstract;
            entity.table_name = config.table.clone();
            entity.strategy = config.strategy;
            entity.discriminator_value = config.discriminator_value.clone();
            entity.defining_query = config.defining_query.clone();
            entity.discriminator = config
                .discriminator
                .as_ref()
                .map(|settings| DiscriminatorConfig {
                    column: settings.column.clone(),
                    complete: settings.complete,
                });

            entity.properties = config
                .properties
                .iter()
                .enumerate()
                .map(|(index, property)| Property {
                    id: id.property(index),
                    name: property.name.clone(),
                    ty: property.ty,
                    nullable: property.nullable,
                    primary_key: property.key,
                })
                .collect();

            entities.push(entity);
        }

        // Navigations need the validated hierarchy to look up inherited
        // foreign key properties.
        let mut schema = app::Schema::new(entities)?;
        let mut navigations = vec![];

        for (index, config) in self.entities.iter().enumerate() {
            let declaring = EntityId(index);

            for navigation in &config.navigations {
                let target = ids(&navigation.target).ok_or_else(|| {
                    Error::configuration(format!(
                        "navigation `{}.{}` targets unknown type `{}`",
                        config.name, navigation.name, navigation.target
                    ))
                })?;

                let dependent = match navigation.kind {
                    NavigationKindConfig::Collection => target,
                    NavigationKindConfig::Reference => declaring,
                };

                let foreign_key = navigation
                    .foreign_key
                    .iter()
                    .map(|name| {
                        schema
                            .find_property(dependent, name)
                            .map(PropertyId::from)
                            .ok_or_else(|| {
                                Error::configuration(format!(
                                    "foreign key property `{name}` of `{}.{}` is not declared \
                                     on `{}`",
                                    config.name,
                                    navigation.name,
                                    schema.entity(dependent).name
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>>>()?;

                let kind = match navigation.kind {
                    NavigationKindConfig::Collection => NavigationKind::Collection { foreign_key },
                    NavigationKindConfig::Reference => NavigationKind::Reference { foreign_key },
                };

                navigations.push((
                    declaring,
                    Navigation {
                        name: navigation.name.clone(),
                        target,
                        kind,
                    },
                ));
            }
        }

        for (declaring, navigation) in navigations {
            let entity = &mut schema.entities[&declaring];

            if entity.navigation(&navigation.name).is_some() {
                return Err(Error::configuration(format!(
                    "navigation `{}.{}` is declared more than once",
                    entity.name, navigation.name
                )));
            }

            entity.navigations.push(navigation);
        }

        Ok(schema)
    }
}

impl EntityConfig {
    pub fn new(name: impl Into<String>) -> EntityConfig {
        EntityConfig {
            name: name.into(),
            parent: None,
            is_abstract: false,
            properties: vec![],
            navigations: vec![],
            table: None,
            strategy: None,
            discriminator_value: None,
            discriminator: None,
            defining_query: None,
        }
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn is_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Adds a primary key property.
    pub fn key(mut self, name: impl Into<String>, ty: stmt::Type) -> Self {
        self.properties.push(PropertyConfig {
            name: name.into(),
            ty,
            nullable: false,
            key: true,
        });
        self
    }

    pub fn property(mut self, name: impl Into<String>, ty: stmt::Type) -> Self {
        self.properties.push(PropertyConfig {
            name: name.into(),
            ty,
            nullable: false,
            key: false,
        });
        self
    }

    pub fn nullable(mut self, name: impl Into<String>, ty: stmt::Type) -> Self {
        self.properties.push(PropertyConfig {
            name: name.into(),
            ty,
            nullable: true,
            key: false,
        });
        self
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn strategy(mut self, strategy: MappingStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn discriminator_value(mut self, value: impl Into<String>) -> Self {
        self.discriminator_value = Some(value.into());
        self
    }

    pub fn discriminator(mut self, column: impl Into<String>, complete: bool) -> Self {
        self.discriminator = Some(DiscriminatorSettings {
            column: column.into(),
            complete,
        });
        self
    }

    pub fn has_many(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        foreign_key: &[&str],
    ) -> Self {
        self.navigations.push(NavigationConfig {
            name: name.into(),
            target: target.into(),
            kind: NavigationKindConfig::Collection,
            foreign_key: foreign_key.iter().map(|name| name.to_string()).collect(),
        });
        self
    }

    pub fn belongs_to(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        foreign_key: &[&str],
    ) -> Self {
        self.navigations.push(NavigationConfig {
            name: name.into(),
            target: target.into(),
            kind: NavigationKindConfig::Reference,
            foreign_key: foreign_key.iter().map(|name| name.to_string()).collect(),
        });
        self
    }

    pub fn defining_query(mut self, sql: impl Into<String>) -> Self {
        self.defining_query = Some(sql.into());
        self
    }
}
