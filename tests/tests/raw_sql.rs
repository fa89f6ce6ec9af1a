use tests::prelude::*;

async fn tph_derived_type_over_raw_sql(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tph)))
        .await;

    db.execute(
        r#"INSERT INTO "Animals" ("Id", "Name", "Wingspan", "Discriminator")
           VALUES (1, 'Aquila', 2.1, 'Eagle'), (2, 'Harpy', 2.0, 'Eagle')"#,
        vec![],
    )
    .await
    .unwrap();
    test.log().clear();

    let query = Query::new(entity(&db, "Eagle"))
        .from_sql(r#"SELECT * FROM "Animals" WHERE "Wingspan" > 2.05"#);
    let records = db.query(&query).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("Name"), Some(&Value::from("Aquila")));

    test.log().assert_baseline(&[r#"
SELECT "m"."Id", "m"."Name", "m"."Wingspan", "m"."Discriminator"
FROM (
    SELECT * FROM "Animals" WHERE "Wingspan" > 2.05
) AS "m"
WHERE "m"."Discriminator" = 'Eagle'
"#]);
}

async fn tpt_root_over_raw_sql(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tpt)))
        .await;

    let query = Query::new(entity(&db, "Animal")).from_sql(
        r#"SELECT 7 AS "Id", 'Kea' AS "Name", NULL AS "Wingspan", 'Arthur''s Pass' AS "FoundOn", 'Kiwi' AS "Discriminator""#,
    );
    let records = db.query(&query).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ty, Some(entity(&db, "Kiwi")));
    assert_eq!(records[0].get("Id"), Some(&Value::from(7_i64)));
    assert_eq!(
        records[0].get("FoundOn"),
        Some(&Value::from("Arthur's Pass"))
    );
}

async fn tpt_derived_type_rejects_raw_sql(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tpt)))
        .await;

    let query = Query::new(entity(&db, "Eagle")).from_sql(r#"SELECT * FROM "Eagles""#);

    assert_err!(db.query(&query).await, is_unsupported_operation);
    assert!(test.log().is_empty());
}

async fn tpc_derived_type_rejects_raw_sql(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tpc)))
        .await;

    let query = Query::new(entity(&db, "Kiwi")).from_sql(r#"SELECT * FROM "Kiwis""#);

    assert_err!(db.plan(&query), is_unsupported_operation);
}

tests!(
    tph_derived_type_over_raw_sql,
    tpt_root_over_raw_sql,
    tpt_derived_type_rejects_raw_sql,
    tpc_derived_type_rejects_raw_sql,
);
