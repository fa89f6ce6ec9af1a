use tests::prelude::*;

use strata::Aggregate;

async fn grouping_without_key_rejects_collections(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;

    let order = entity(&db, "Order");
    let lines = CollectionAccess::navigation(&db.schema().app, order, "Lines").unwrap();

    let query = Query::new(order)
        .group_by(
            [prop(&db, "Order", "CustomerId")],
            [Aggregate::count("Count")],
            false,
        )
        .include(lines);

    let err = assert_err!(db.query(&query).await, is_insufficient_key_information);
    assert!(err.to_string().contains("`Order.Lines`"), "{err}");

    // Planning fails before anything is sent
    assert!(test.log().is_empty());
}

async fn distinct_projection_without_key_rejects_collections(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;

    let customer = entity(&db, "Customer");
    let orders = CollectionAccess::navigation(&db.schema().app, customer, "Orders").unwrap();

    let query = Query::new(customer)
        .select([prop(&db, "Customer", "Name")])
        .distinct()
        .include(orders);

    let err = assert_err!(db.plan(&query), is_insufficient_key_information);
    assert!(err.to_string().contains("`Customer.Orders`"), "{err}");
}

async fn split_loading_does_not_relax_the_key_check(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;

    let customer = entity(&db, "Customer");
    let orders = CollectionAccess::navigation(&db.schema().app, customer, "Orders").unwrap();

    let query = Query::new(customer)
        .select([prop(&db, "Customer", "Name")])
        .distinct()
        .include(orders)
        .split();

    assert_err!(db.plan(&query), is_insufficient_key_information);
}

async fn set_operation_over_properties_rejects_collections(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;

    let customer = entity(&db, "Customer");
    let name = prop(&db, "Customer", "Name");
    let orders = CollectionAccess::navigation(&db.schema().app, customer, "Orders").unwrap();

    let query = Query::new(customer)
        .select([name])
        .union(Query::new(customer).select([name]))
        .include(orders);

    assert_err!(db.plan(&query), is_insufficient_key_information);
}

async fn distinct_projection_keeping_the_key_loads_collections(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    fixtures::seed_store(&db).await;

    let customer = entity(&db, "Customer");
    let orders = CollectionAccess::navigation(&db.schema().app, customer, "Orders").unwrap();

    let query = Query::new(customer)
        .select([prop(&db, "Customer", "Id"), prop(&db, "Customer", "Name")])
        .distinct()
        .include(orders);

    let records = assert_ok!(db.query(&query).await);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].collection("Orders").len(), 2);
}

tests!(
    grouping_without_key_rejects_collections,
    distinct_projection_without_key_rejects_collections,
    split_loading_does_not_relax_the_key_check,
    set_operation_over_properties_rejects_collections,
    distinct_projection_keeping_the_key_loads_collections,
);
