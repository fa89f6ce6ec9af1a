use tests::prelude::*;

async fn client_expressions_fail_translation(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;

    let query = Query::new(entity(&db, "Customer")).filter(Expr::eq(
        Expr::client("format_name"),
        Value::from("Ada"),
    ));

    assert_err!(db.query(&query).await, is_translation_failure);
    assert!(test.log().is_empty());
}

async fn properties_of_other_types_fail_translation(test: &mut DbTest) {
    let db = test
        .setup_db(models!(fixtures::zoo(MappingStrategy::Tph)))
        .await;

    // `Wingspan` belongs to `Eagle`, not `Kiwi`
    let query = Query::new(entity(&db, "Kiwi")).filter(Expr::gt(
        Expr::property(prop(&db, "Eagle", "Wingspan")),
        Value::from(1.0),
    ));

    assert_err!(db.plan(&query), is_translation_failure);
}

async fn set_operation_operands_must_match(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;

    let customer = entity(&db, "Customer");
    let query = Query::new(customer)
        .select([prop(&db, "Customer", "Name")])
        .union_all(Query::new(customer).select([
            prop(&db, "Customer", "Id"),
            prop(&db, "Customer", "Name"),
        ]));

    assert_err!(db.plan(&query), is_translation_failure);
}

async fn set_operation_over_properties(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    fixtures::seed_store(&db).await;

    let customer = entity(&db, "Customer");
    let id = prop(&db, "Customer", "Id");
    let name = prop(&db, "Customer", "Name");

    let query = Query::new(customer)
        .select([name])
        .filter(Expr::eq(Expr::property(id), Value::from(1_i64)))
        .union_all(
            Query::new(customer)
                .select([name])
                .filter(Expr::gt(Expr::property(id), Value::from(1_i64))),
        )
        .order_by(OrderByExpr::desc(Expr::property(name)));

    let records = db.query(&query).await.unwrap();

    let names: Vec<_> = records
        .iter()
        .map(|record| record.get("Name").and_then(Value::as_str).unwrap())
        .collect();
    assert_eq!(names, ["Grace", "Edsger", "Ada"]);
    assert!(records.iter().all(|record| record.ty.is_none()));
}

tests!(
    client_expressions_fail_translation,
    properties_of_other_types_fail_translation,
    set_operation_operands_must_match,
    set_operation_over_properties,
);
