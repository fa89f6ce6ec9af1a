use tests::prelude::*;

async fn seed(db: &strata::Db) {
    let statements = [
        r#"INSERT INTO "Animals" ("Id", "Name") VALUES (1, 'Aquila'), (2, 'Pip')"#,
        r#"INSERT INTO "Eagles" ("Id", "Wingspan") VALUES (1, 2.1)"#,
        r#"INSERT INTO "Kiwis" ("Id", "FoundOn") VALUES (2, 'Stewart Island')"#,
    ];

    for sql in statements {
        db.execute(sql, vec![]).await.unwrap();
    }
}

async fn root_query_left_joins_every_derived_table(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tpt)))
        .await;

    db.query(&Query::new(entity(&db, "Animal"))).await.unwrap();

    test.log().assert_baseline(&[r#"
SELECT "a"."Id", "a"."Name", "e"."Wingspan", "k"."FoundOn", CASE WHEN "k"."Id" IS NOT NULL THEN 'Kiwi' WHEN "e"."Id" IS NOT NULL THEN 'Eagle' ELSE NULL END AS "Discriminator"
FROM "Animals" AS "a"
LEFT JOIN "Eagles" AS "e" ON "a"."Id" = "e"."Id"
LEFT JOIN "Kiwis" AS "k" ON "a"."Id" = "k"."Id"
"#]);
}

async fn derived_query_inner_joins_its_ancestors(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tpt)))
        .await;

    let query = Query::new(entity(&db, "Eagle"))
        .order_by(OrderByExpr::asc(Expr::property(prop(&db, "Eagle", "Id"))));
    db.query(&query).await.unwrap();

    test.log().assert_baseline(&[r#"
SELECT "a"."Id", "a"."Name", "e"."Wingspan"
FROM "Animals" AS "a"
INNER JOIN "Eagles" AS "e" ON "a"."Id" = "e"."Id"
ORDER BY "a"."Id"
"#]);
}

async fn rows_materialize_as_their_dynamic_type(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tpt)))
        .await;
    seed(&db).await;

    let query = Query::new(entity(&db, "Animal"))
        .order_by(OrderByExpr::asc(Expr::property(prop(&db, "Animal", "Id"))));
    let records = db.query(&query).await.unwrap();

    assert_eq!(records.len(), 2);

    assert_eq!(records[0].ty, Some(entity(&db, "Eagle")));
    assert_eq!(records[0].get("Wingspan"), Some(&Value::from(2.1)));
    assert!(records[0].get("FoundOn").is_none());

    assert_eq!(records[1].ty, Some(entity(&db, "Kiwi")));
    assert_eq!(
        records[1].get("FoundOn"),
        Some(&Value::from("Stewart Island"))
    );
    assert!(records[1].get("Wingspan").is_none());
}

async fn derived_query_returns_only_that_type(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tpt)))
        .await;
    seed(&db).await;

    let records = db.query(&Query::new(entity(&db, "Kiwi"))).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ty, Some(entity(&db, "Kiwi")));
    assert_eq!(
        records[0].fields.keys().collect::<Vec<_>>(),
        ["Id", "Name", "FoundOn"]
    );
}

tests!(
    root_query_left_joins_every_derived_table,
    derived_query_inner_joins_its_ancestors,
    rows_materialize_as_their_dynamic_type,
    derived_query_returns_only_that_type,
);
