//! Models shared by the integration tests.

use strata::{
    schema::app::{EntityId, MappingStrategy, PropertyId},
    stmt::Type,
    Db, EntityConfig, ModelConfig,
};

/// An abstract `Animal` with two concrete types, `Eagle` and `Kiwi`,
/// mapped with `strategy`.
pub fn zoo(strategy: MappingStrategy) -> ModelConfig {
    ModelConfig::new()
        .entity(
            EntityConfig::new("Animal")
                .is_abstract()
                .strategy(strategy)
                .key("Id", Type::I64)
                .property("Name", Type::String),
        )
        .entity(
            EntityConfig::new("Eagle")
                .parent("Animal")
                .property("Wingspan", Type::F64),
        )
        .entity(
            EntityConfig::new("Kiwi")
                .parent("Animal")
                .property("FoundOn", Type::String),
        )
}

/// Customers with orders, order lines, and reviews.
pub fn store() -> ModelConfig {
    ModelConfig::new()
        .entity(
            EntityConfig::new("Customer")
                .key("Id", Type::I64)
                .property("Name", Type::String)
                .has_many("Orders", "Order", &["CustomerId"])
                .has_many("Reviews", "Review", &["CustomerId"]),
        )
        .entity(
            EntityConfig::new("Order")
                .key("Id", Type::I64)
                .property("CustomerId", Type::I64)
                .property("Total", Type::F64)
                .has_many("Lines", "Line", &["OrderId"]),
        )
        .entity(
            EntityConfig::new("Line")
                .key("Id", Type::I64)
                .property("OrderId", Type::I64)
                .property("Product", Type::String)
                .property("Quantity", Type::I64),
        )
        .entity(
            EntityConfig::new("Review")
                .key("Id", Type::I64)
                .property("CustomerId", Type::I64)
                .property("Stars", Type::I64),
        )
}

/// Inserts three customers, four orders, five lines, and two reviews.
///
/// Customer 3 has no orders.
pub async fn seed_store(db: &Db) {
    let statements = [
        r#"INSERT INTO "Customers" ("Id", "Name") VALUES (1, 'Ada'), (2, 'Grace'), (3, 'Edsger')"#,
        r#"INSERT INTO "Orders" ("Id", "CustomerId", "Total")
           VALUES (10, 1, 12.5), (11, 1, 3.0), (12, 2, 40.0), (13, 2, 7.25)"#,
        r#"INSERT INTO "Lines" ("Id", "OrderId", "Product", "Quantity")
           VALUES (100, 10, 'Tea', 2), (101, 10, 'Cups', 4), (102, 11, 'Honey', 1),
                  (103, 12, 'Kettle', 1), (104, 13, 'Spoons', 6)"#,
        r#"INSERT INTO "Reviews" ("Id", "CustomerId", "Stars") VALUES (1000, 1, 5), (1001, 2, 3)"#,
    ];

    for sql in statements {
        db.execute(sql, vec![]).await.unwrap();
    }
}

pub fn entity(db: &Db, name: &str) -> EntityId {
    db.schema()
        .app
        .entity_by_name(name)
        .unwrap_or_else(|| panic!("no entity type named `{name}`"))
        .id
}

pub fn prop(db: &Db, entity_name: &str, name: &str) -> PropertyId {
    let app = &db.schema().app;
    let entity = entity(db, entity_name);

    app.find_property(entity, name)
        .unwrap_or_else(|| panic!("`{entity_name}` has no property named `{name}`"))
        .id
}
