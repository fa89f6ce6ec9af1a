use tests::prelude::*;

async fn baseline_ignores_dialect_spelling(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;

    let query = Query::new(entity(&db, "Customer")).filter(Expr::eq(
        Expr::property(prop(&db, "Customer", "Id")),
        Value::from(1_i64),
    ));
    db.query(&query).await.unwrap();

    // Bracket delimiters, named placeholders, and CRLF line endings all
    // normalize to the same text as the emitted SQLite command.
    test.log().assert_baseline(&[
        "\r\nSELECT [c].[Id], [c].[Name]\r\nFROM [Customers] AS [c]\r\nWHERE [c].[Id] = @p0\r\n",
    ]);
}

async fn baseline_mismatch_panics(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    db.query(&Query::new(entity(&db, "Customer"))).await.unwrap();

    test.log().assert_baseline(&[r#"
SELECT "c"."Id"
FROM "Customers" AS "c"
"#]);
}

async fn baseline_counts_commands(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    db.query(&Query::new(entity(&db, "Customer"))).await.unwrap();

    let log = test.log().clone();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        log.assert_baseline::<&str>(&[]);
    }));
    assert!(result.is_err());
}

tests!(
    baseline_ignores_dialect_spelling,
    #[should_panic(expected = "emitted SQL does not match the baseline")]
    baseline_mismatch_panics,
    baseline_counts_commands,
);
