use super::BuildSchema;
use crate::schema::{
    app::{DiscriminatorConfig, EntityId, EntityType},
    db::ColumnId,
    mapping::{DiscriminatorSpec, DiscriminatorValue},
};
use crate::{Error, Result};
use indexmap::IndexMap;
use std::collections::HashMap;

impl BuildSchema<'_> {
    /// Assigns a discriminator value to every concrete type of the hierarchy.
    ///
    /// With a complete mapping, types without a configured value use their
    /// type name. Otherwise they stay `Unknown`.
    pub(super) fn build_discriminator(
        &self,
        root: &EntityType,
        config: &DiscriminatorConfig,
        stored: Option<ColumnId>,
    ) -> Result<DiscriminatorSpec> {
        let mut values = IndexMap::new();
        let mut seen = HashMap::<String, EntityId>::new();

        for entity in self.hierarchy(root.id) {
            if entity.is_abstract {
                if entity.discriminator_value.is_some() {
                    return Err(Error::configuration(format!(
                        "abstract entity type `{}` cannot have a discriminator value",
                        entity.name
                    )));
                }
                continue;
            }

            let value = match &entity.discriminator_value {
                Some(value) => DiscriminatorValue::Known(value.clone()),
                None if config.complete => DiscriminatorValue::Known(entity.name.to_string()),
                None => DiscriminatorValue::Unknown,
            };

            if let DiscriminatorValue::Known(value) = &value {
                if let Some(other) = seen.insert(value.clone(), entity.id) {
                    return Err(Error::configuration(format!(
                        "entity types `{}` and `{}` share the discriminator value `{value}`",
                        self.app.entity(other).name,
                        entity.name
                    )));
                }
            }

            values.insert(entity.id, value);
        }

        let complete = config.complete
            && values
                .values()
                .all(|value| matches!(value, DiscriminatorValue::Known(_)));

        Ok(DiscriminatorSpec {
            column: config.column.clone(),
            stored,
            values,
            complete,
        })
    }
}
