use strata::{stmt::Type, EntityConfig, ModelConfig};
use tests::prelude::*;

async fn seed(db: &strata::Db) {
    db.execute(
        r#"INSERT INTO "Animals" ("Id", "Name", "Wingspan", "FoundOn", "Discriminator")
           VALUES (1, 'Aquila', 2.1, NULL, 'Eagle'),
                  (2, 'Pip', NULL, 'Stewart Island', 'Kiwi')"#,
        vec![],
    )
    .await
    .unwrap();
}

async fn root_query_reads_the_shared_table(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tph)))
        .await;

    let records = db.query(&Query::new(entity(&db, "Animal"))).await.unwrap();
    assert!(records.is_empty());

    test.log().assert_baseline(&[r#"
SELECT "a"."Id", "a"."Name", "a"."Wingspan", "a"."FoundOn", "a"."Discriminator"
FROM "Animals" AS "a"
"#]);
}

async fn derived_query_filters_on_the_discriminator(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tph)))
        .await;

    db.query(&Query::new(entity(&db, "Eagle"))).await.unwrap();

    test.log().assert_baseline(&[r#"
SELECT "a"."Id", "a"."Name", "a"."Wingspan", "a"."Discriminator"
FROM "Animals" AS "a"
WHERE "a"."Discriminator" = 'Eagle'
"#]);
}

async fn rows_materialize_as_their_dynamic_type(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tph)))
        .await;
    seed(&db).await;

    let query = Query::new(entity(&db, "Animal"))
        .order_by(OrderByExpr::asc(Expr::property(prop(&db, "Animal", "Id"))));
    let records = db.query(&query).await.unwrap();

    assert_eq!(records.len(), 2);

    let eagle = &records[0];
    assert_eq!(eagle.ty, Some(entity(&db, "Eagle")));
    assert_eq!(eagle.get("Name"), Some(&Value::from("Aquila")));
    assert_eq!(eagle.get("Wingspan"), Some(&Value::from(2.1)));
    assert!(eagle.get("FoundOn").is_none());

    let kiwi = &records[1];
    assert_eq!(kiwi.ty, Some(entity(&db, "Kiwi")));
    assert_eq!(kiwi.get("FoundOn"), Some(&Value::from("Stewart Island")));
    assert!(kiwi.get("Wingspan").is_none());
}

async fn unknown_discriminator_values_lose_their_type(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tph)))
        .await;
    seed(&db).await;

    db.execute(
        r#"INSERT INTO "Animals" ("Id", "Name", "Discriminator") VALUES (3, 'Dodo', 'Dodo')"#,
        vec![],
    )
    .await
    .unwrap();

    let query = Query::new(entity(&db, "Animal"))
        .order_by(OrderByExpr::asc(Expr::property(prop(&db, "Animal", "Id"))));
    let records = db.query(&query).await.unwrap();

    let names: Vec<_> = records
        .iter()
        .map(|record| record.get("Name").and_then(Value::as_str).unwrap())
        .collect();
    assert_eq!(names, ["Aquila", "Pip", "Dodo"]);

    let dodo = &records[2];
    assert_eq!(dodo.ty, None);
    assert_eq!(dodo.get("Id"), Some(&Value::from(3_i64)));
    assert_eq!(dodo.get("Wingspan"), Some(&Value::Null));
}

/// The zoo with explicit values for every type, declared incomplete: the
/// table may hold rows of types the model does not know about.
fn open_zoo() -> ModelConfig {
    let mut zoo = fixtures::zoo(MappingStrategy::Tph);
    zoo.entities[0] = zoo.entities[0]
        .clone()
        .discriminator("Discriminator", false);
    zoo.entities[1] = zoo.entities[1].clone().discriminator_value("Eagle");
    zoo.entities[2] = zoo.entities[2].clone().discriminator_value("Kiwi");
    zoo
}

async fn incomplete_mapping_filters_the_root_query(test: &mut DbTest) {
    let db = test.setup_db(models!(open_zoo())).await;
    seed(&db).await;

    db.execute(
        r#"INSERT INTO "Animals" ("Id", "Name", "Discriminator") VALUES (3, 'Dodo', 'Dodo')"#,
        vec![],
    )
    .await
    .unwrap();
    test.log().clear();

    let query = Query::new(entity(&db, "Animal"))
        .order_by(OrderByExpr::desc(Expr::property(prop(&db, "Animal", "Id"))))
        .limit(1);
    let records = db.query(&query).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ty, Some(entity(&db, "Kiwi")));

    test.log().assert_baseline(&[r#"
SELECT "a"."Id", "a"."Name", "a"."Wingspan", "a"."FoundOn", "a"."Discriminator"
FROM "Animals" AS "a"
WHERE "a"."Discriminator" IN ('Eagle', 'Kiwi')
ORDER BY "a"."Id" DESC
LIMIT 1
"#]);
}

/// `Animal` with an abstract `Bird` between it and `Eagle` and `Owl`.
fn aviary() -> ModelConfig {
    ModelConfig::new()
        .entity(
            EntityConfig::new("Animal")
                .is_abstract()
                .strategy(MappingStrategy::Tph)
                .key("Id", Type::I64)
                .property("Name", Type::String),
        )
        .entity(
            EntityConfig::new("Bird")
                .is_abstract()
                .parent("Animal")
                .property("Wingspan", Type::F64),
        )
        .entity(EntityConfig::new("Eagle").parent("Bird"))
        .entity(
            EntityConfig::new("Owl")
                .parent("Bird")
                .property("Hoots", Type::I64),
        )
        .entity(
            EntityConfig::new("Kiwi")
                .parent("Animal")
                .property("FoundOn", Type::String),
        )
}

async fn intermediate_type_filters_on_every_reachable_value(test: &mut DbTest) {
    let db = test.setup_db(models!(aviary())).await;

    db.execute(
        r#"INSERT INTO "Animals" ("Id", "Name", "Wingspan", "Hoots", "FoundOn", "Discriminator")
           VALUES (1, 'Aquila', 2.1, NULL, NULL, 'Eagle'),
                  (2, 'Hedwig', 1.2, 3, NULL, 'Owl'),
                  (3, 'Pip', NULL, NULL, 'Stewart Island', 'Kiwi')"#,
        vec![],
    )
    .await
    .unwrap();
    test.log().clear();

    let records = db.query(&Query::new(entity(&db, "Bird"))).await.unwrap();

    let types: Vec<_> = records.iter().map(|record| record.ty).collect();
    assert_eq!(types.len(), 2);
    assert!(types.contains(&Some(entity(&db, "Eagle"))));
    assert!(types.contains(&Some(entity(&db, "Owl"))));

    test.log().assert_baseline(&[r#"
SELECT "a"."Id", "a"."Name", "a"."Wingspan", "a"."Hoots", "a"."Discriminator"
FROM "Animals" AS "a"
WHERE "a"."Discriminator" IN ('Eagle', 'Owl')
"#]);
}

async fn filters_combine_with_the_discriminator(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tph)))
        .await;
    seed(&db).await;
    test.log().clear();

    let query = Query::new(entity(&db, "Kiwi")).filter(Expr::eq(
        Expr::property(prop(&db, "Kiwi", "FoundOn")),
        Value::from("Stewart Island"),
    ));
    let records = db.query(&query).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("Name"), Some(&Value::from("Pip")));

    test.log().assert_baseline(&[r#"
SELECT "a"."Id", "a"."Name", "a"."FoundOn", "a"."Discriminator"
FROM "Animals" AS "a"
WHERE "a"."Discriminator" = 'Kiwi' AND "a"."FoundOn" = $1
"#]);
    assert_eq!(test.log().params(0), [Value::from("Stewart Island")]);
}

tests!(
    root_query_reads_the_shared_table,
    derived_query_filters_on_the_discriminator,
    rows_materialize_as_their_dynamic_type,
    unknown_discriminator_values_lose_their_type,
    incomplete_mapping_filters_the_root_query,
    intermediate_type_filters_on_every_reachable_value,
    filters_combine_with_the_discriminator,
);
