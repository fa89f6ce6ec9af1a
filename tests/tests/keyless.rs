use tests::prelude::*;

use strata::{stmt::Type, EntityConfig, ModelConfig};

fn customer_totals() -> ModelConfig {
    ModelConfig::new().entity(
        EntityConfig::new("CustomerTotal")
            .defining_query(
                r#"SELECT "CustomerId", SUM("Total") AS "Total" FROM "Orders" GROUP BY "CustomerId""#,
            )
            .property("CustomerId", Type::I64)
            .property("Total", Type::F64),
    )
}

async fn keyless_type_reads_its_defining_query(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::store(), customer_totals()))
        .await;
    fixtures::seed_store(&db).await;
    test.log().clear();

    let customer_id = prop(&db, "CustomerTotal", "CustomerId");
    let query = Query::new(entity(&db, "CustomerTotal"))
        .order_by(OrderByExpr::asc(Expr::property(customer_id)));
    let records = db.query(&query).await.unwrap();

    let totals: Vec<_> = records
        .iter()
        .map(|record| (record.get("CustomerId"), record.get("Total")))
        .collect();

    assert_eq!(
        totals,
        [
            (Some(&Value::from(1_i64)), Some(&Value::from(15.5))),
            (Some(&Value::from(2_i64)), Some(&Value::from(47.25))),
        ]
    );

    test.log().assert_baseline(&[r#"
SELECT "m"."CustomerId", "m"."Total"
FROM (
    SELECT "CustomerId", SUM("Total") AS "Total" FROM "Orders" GROUP BY "CustomerId"
) AS "m"
ORDER BY "m"."CustomerId"
"#]);
}

async fn keyless_rows_cannot_own_collections(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::store(), customer_totals()))
        .await;

    let orders = strata::CollectionAccess::new("Orders", entity(&db, "Order")).correlate(
        prop(&db, "CustomerTotal", "CustomerId"),
        prop(&db, "Order", "CustomerId"),
    );

    let query = Query::new(entity(&db, "CustomerTotal")).include(orders);

    let err = assert_err!(db.query(&query).await, is_insufficient_key_information);
    assert!(err.to_string().contains("CustomerTotal.Orders"), "{err}");
    assert!(test.log().is_empty());
}

tests!(
    keyless_type_reads_its_defining_query,
    keyless_rows_cannot_own_collections,
);
