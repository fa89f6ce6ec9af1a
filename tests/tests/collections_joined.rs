use tests::prelude::*;

async fn collection_is_left_joined_and_ordered_by_keys(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    fixtures::seed_store(&db).await;
    test.log().clear();

    let customer = entity(&db, "Customer");
    let orders = CollectionAccess::navigation(&db.schema().app, customer, "Orders").unwrap();
    let records = db
        .query(&Query::new(customer).include(orders))
        .await
        .unwrap();

    test.log().assert_baseline(&[r#"
SELECT "c"."Id", "c"."Name", "o"."Id", "o"."CustomerId", "o"."Total"
FROM "Customers" AS "c"
LEFT JOIN "Orders" AS "o" ON "c"."Id" = "o"."CustomerId"
ORDER BY "c"."Id", "o"."Id"
"#]);

    let shape: Vec<(i64, Vec<i64>)> = records
        .iter()
        .map(|customer| {
            let orders = customer
                .collection("Orders")
                .iter()
                .map(|order| order.get("Id").and_then(Value::as_i64).unwrap())
                .collect();
            (customer.get("Id").and_then(Value::as_i64).unwrap(), orders)
        })
        .collect();

    assert_eq!(
        shape,
        [(1, vec![10, 11]), (2, vec![12, 13]), (3, vec![])]
    );

    // A parent without children still reports the collection as loaded
    assert!(records[2].collections.contains_key("Orders"));
}

async fn nested_collections_join_through_a_derived_table(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    fixtures::seed_store(&db).await;
    test.log().clear();

    let app = &db.schema().app;
    let customer = entity(&db, "Customer");
    let lines = CollectionAccess::navigation(app, entity(&db, "Order"), "Lines").unwrap();
    let orders = CollectionAccess::navigation(app, customer, "Orders")
        .unwrap()
        .include(lines);

    let records = db
        .query(&Query::new(customer).include(orders))
        .await
        .unwrap();

    test.log().assert_baseline(&[r#"
SELECT "c"."Id", "c"."Name", "t"."Id", "t"."CustomerId", "t"."Total", "t"."Id0", "t"."OrderId", "t"."Product", "t"."Quantity"
FROM "Customers" AS "c"
LEFT JOIN (
    SELECT "o"."Id", "o"."CustomerId", "o"."Total", "l"."Id" AS "Id0", "l"."OrderId", "l"."Product", "l"."Quantity"
    FROM "Orders" AS "o"
    LEFT JOIN "Lines" AS "l" ON "o"."Id" = "l"."OrderId"
) AS "t" ON "c"."Id" = "t"."CustomerId"
ORDER BY "c"."Id", "t"."Id", "t"."Id0"
"#]);

    let first = &records[0].collection("Orders")[0];
    assert_eq!(first.get("Id"), Some(&Value::from(10_i64)));

    let products: Vec<_> = first
        .collection("Lines")
        .iter()
        .map(|line| line.get("Product").and_then(Value::as_str).unwrap())
        .collect();
    assert_eq!(products, ["Tea", "Cups"]);

    // Line fields are read from their own columns, not the order's
    assert_eq!(
        first.collection("Lines")[0].get("Id"),
        Some(&Value::from(100_i64))
    );
}

async fn distinct_parent_is_pushed_into_a_derived_table(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    fixtures::seed_store(&db).await;
    test.log().clear();

    let customer = entity(&db, "Customer");
    let orders = CollectionAccess::navigation(&db.schema().app, customer, "Orders").unwrap();
    let records = db
        .query(&Query::new(customer).distinct().include(orders))
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[1].collection("Orders").len(), 2);

    test.log().assert_baseline(&[r#"
SELECT "s"."Id", "s"."Name", "o"."Id", "o"."CustomerId", "o"."Total"
FROM (
    SELECT DISTINCT "c"."Id", "c"."Name"
    FROM "Customers" AS "c"
) AS "s"
LEFT JOIN "Orders" AS "o" ON "s"."Id" = "o"."CustomerId"
ORDER BY "s"."Id", "o"."Id"
"#]);
}

async fn limited_parent_keeps_its_rows(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    fixtures::seed_store(&db).await;

    let customer = entity(&db, "Customer");
    let orders = CollectionAccess::navigation(&db.schema().app, customer, "Orders").unwrap();
    let query = Query::new(customer)
        .order_by(OrderByExpr::desc(Expr::property(prop(&db, "Customer", "Id"))))
        .limit(2)
        .include(orders);

    let records = db.query(&query).await.unwrap();

    let ids: Vec<_> = records
        .iter()
        .map(|record| record.get("Id").and_then(Value::as_i64).unwrap())
        .collect();
    assert_eq!(ids, [3, 2]);
    assert_eq!(records[1].collection("Orders").len(), 2);
}

async fn collection_filter_applies_to_the_join(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    fixtures::seed_store(&db).await;

    let customer = entity(&db, "Customer");
    let orders = CollectionAccess::navigation(&db.schema().app, customer, "Orders")
        .unwrap()
        .filter(Expr::gt(
            Expr::property(prop(&db, "Order", "Total")),
            Value::from(10.0),
        ));

    let records = db
        .query(&Query::new(customer).include(orders))
        .await
        .unwrap();

    // The filter drops orders, never their parent
    assert_eq!(records.len(), 3);

    let totals: Vec<usize> = records
        .iter()
        .map(|record| record.collection("Orders").len())
        .collect();
    assert_eq!(totals, [1, 1, 0]);
}

async fn grouped_parent_with_projected_key_loads_collections(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    fixtures::seed_store(&db).await;

    let customer_id = prop(&db, "Order", "CustomerId");
    let reviews = CollectionAccess::new("Reviews", entity(&db, "Review"))
        .correlate(customer_id, prop(&db, "Review", "CustomerId"));

    let query = Query::new(entity(&db, "Order"))
        .group_by([customer_id], [strata::Aggregate::count("Count")], true)
        .include(reviews);

    let records = db.query(&query).await.unwrap();

    let groups: Vec<_> = records
        .iter()
        .map(|record| {
            (
                record.get("CustomerId").and_then(Value::as_i64).unwrap(),
                record.get("Count").and_then(Value::as_i64).unwrap(),
                record.collection("Reviews").len(),
            )
        })
        .collect();

    assert_eq!(groups, [(1, 2, 1), (2, 2, 1)]);
}

tests!(
    collection_is_left_joined_and_ordered_by_keys,
    nested_collections_join_through_a_derived_table,
    distinct_parent_is_pushed_into_a_derived_table,
    limited_parent_keeps_its_rows,
    collection_filter_applies_to_the_join,
    grouped_parent_with_projected_key_loads_collections,
);
