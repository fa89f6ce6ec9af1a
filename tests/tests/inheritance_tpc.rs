use tests::prelude::*;

async fn seed(db: &strata::Db) {
    let statements = [
        r#"INSERT INTO "Eagles" ("Id", "Name", "Wingspan") VALUES (1, 'Aquila', 2.1)"#,
        r#"INSERT INTO "Kiwis" ("Id", "Name", "FoundOn") VALUES (2, 'Pip', 'Stewart Island')"#,
    ];

    for sql in statements {
        db.execute(sql, vec![]).await.unwrap();
    }
}

async fn root_query_unions_the_concrete_tables(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tpc)))
        .await;

    db.query(&Query::new(entity(&db, "Animal"))).await.unwrap();

    test.log().assert_baseline(&[r#"
SELECT "u"."Id", "u"."Name", "u"."Wingspan", "u"."FoundOn", "u"."Discriminator"
FROM (
    SELECT "e"."Id", "e"."Name", "e"."Wingspan", NULL AS "FoundOn", 'Eagle' AS "Discriminator"
    FROM "Eagles" AS "e"
    UNION ALL
    SELECT "k"."Id", "k"."Name", NULL AS "Wingspan", "k"."FoundOn", 'Kiwi' AS "Discriminator"
    FROM "Kiwis" AS "k"
) AS "u"
"#]);
}

async fn single_concrete_type_scans_its_table(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tpc)))
        .await;

    db.query(&Query::new(entity(&db, "Eagle"))).await.unwrap();

    test.log().assert_baseline(&[r#"
SELECT "e"."Id", "e"."Name", "e"."Wingspan"
FROM "Eagles" AS "e"
"#]);
}

async fn union_rows_materialize_as_their_branch_type(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tpc)))
        .await;
    seed(&db).await;

    let query = Query::new(entity(&db, "Animal"))
        .order_by(OrderByExpr::desc(Expr::property(prop(&db, "Animal", "Id"))));
    let records = db.query(&query).await.unwrap();

    let types: Vec<_> = records.iter().map(|record| record.ty).collect();
    assert_eq!(
        types,
        [Some(entity(&db, "Kiwi")), Some(entity(&db, "Eagle"))]
    );

    assert_eq!(records[1].get("Name"), Some(&Value::from("Aquila")));
    assert!(records[1].get("FoundOn").is_none());
}

async fn sibling_tables_may_share_key_values(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tpc)))
        .await;

    let statements = [
        r#"INSERT INTO "Eagles" ("Id", "Name", "Wingspan") VALUES (1, 'Aquila', 2.1)"#,
        r#"INSERT INTO "Kiwis" ("Id", "Name", "FoundOn") VALUES (1, 'Pip', 'Stewart Island')"#,
    ];
    for sql in statements {
        db.execute(sql, vec![]).await.unwrap();
    }

    let query = Query::new(entity(&db, "Animal"))
        .order_by(OrderByExpr::asc(Expr::property(prop(&db, "Animal", "Name"))));
    let records = db.query(&query).await.unwrap();

    let found: Vec<_> = records
        .iter()
        .map(|record| (record.ty, record.get("Name").and_then(Value::as_str)))
        .collect();
    assert_eq!(
        found,
        [
            (Some(entity(&db, "Eagle")), Some("Aquila")),
            (Some(entity(&db, "Kiwi")), Some("Pip")),
        ]
    );
}

#[test]
fn abstract_principal_cannot_be_referenced() {
    let mut zoo = fixtures::zoo(MappingStrategy::Tpc);
    zoo.entities[0] = zoo.entities[0]
        .clone()
        .has_many("Toys", "Toy", &["AnimalId"]);

    let zoo = zoo.entity(
        strata::EntityConfig::new("Toy")
            .key("Id", strata::stmt::Type::I64)
            .property("AnimalId", strata::stmt::Type::I64),
    );

    let err = assert_err!(models!(zoo).build_schema(), is_configuration);
    assert!(err.to_string().contains("Animal.Toys"), "{err}");
}

tests!(
    root_query_unions_the_concrete_tables,
    single_concrete_type_scans_its_table,
    union_rows_materialize_as_their_branch_type,
    sibling_tables_may_share_key_values,
);
