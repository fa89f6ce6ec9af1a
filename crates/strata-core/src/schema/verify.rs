use super::{app::MappingStrategy, Schema};
use crate::{Error, Result};

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    /// Verifies relationships once every hierarchy is resolved.
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        let app = &self.schema.app;

        for entity in app.entities() {
            for navigation in &entity.navigations {
                let relationship = format!("{}.{}", entity.name, navigation.name);
                let principal = app.entity(navigation.principal(entity.id));
                let dependent = if navigation.is_collection() {
                    navigation.target
                } else {
                    entity.id
                };

                if principal.is_keyless() {
                    return Err(Error::configuration(format!(
                        "relationship `{relationship}` references keyless entity type `{}`",
                        principal.name
                    )));
                }

                if principal.is_abstract && app.strategy_of(principal.id) == MappingStrategy::Tpc {
                    return Err(Error::configuration(format!(
                        "relationship `{relationship}` references `{}`, an abstract type mapped \
                         table-per-concrete-type; foreign keys must reference a concrete type",
                        principal.name
                    )));
                }

                let primary_key = app.primary_key(principal.id);
                let foreign_key = navigation.foreign_key();

                if primary_key.len() != foreign_key.len() {
                    return Err(Error::configuration(format!(
                        "relationship `{relationship}` has {} foreign key properties but the key \
                         of `{}` has {}",
                        foreign_key.len(),
                        principal.name,
                        primary_key.len()
                    )));
                }

                let dependent_properties = app.all_properties(dependent);

                for (fk, pk) in foreign_key.iter().zip(&primary_key) {
                    let Some(fk) = dependent_properties.iter().find(|property| property.id == *fk)
                    else {
                        return Err(Error::configuration(format!(
                            "a foreign key property of relationship `{relationship}` does not \
                             belong to `{}`",
                            app.entity(dependent).name
                        )));
                    };

                    let pk = app.property(*pk);
                    if fk.ty != pk.ty {
                        return Err(Error::configuration(format!(
                            "foreign key property `{}` of relationship `{relationship}` is {} but \
                             `{}` is {}",
                            fk.name, fk.ty, pk.name, pk.ty
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
