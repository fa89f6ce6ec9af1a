use tests::prelude::*;

use strata::Db;

fn nested_query(db: &Db) -> Query {
    let app = &db.schema().app;
    let customer = entity(db, "Customer");
    let lines = CollectionAccess::navigation(app, entity(db, "Order"), "Lines").unwrap();

    Query::new(customer)
        .distinct()
        .order_by(OrderByExpr::asc(Expr::property(prop(db, "Customer", "Id"))))
        .include(
            CollectionAccess::navigation(app, customer, "Orders")
                .unwrap()
                .include(lines),
        )
        .include(CollectionAccess::navigation(app, customer, "Reviews").unwrap())
}

async fn planning_is_repeatable(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    let query = nested_query(&db);

    let first = db.plan(&query).unwrap();
    for _ in 0..10 {
        assert_eq!(db.plan(&query).unwrap(), first);
    }
}

async fn concurrent_planning_matches_sequential_planning(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    let query = nested_query(&db);
    let expected = db.plan(&query).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| db.plan(&query).unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

async fn concurrent_queries_share_one_handle(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;
    fixtures::seed_store(&db).await;

    let query = nested_query(&db);
    let split = query.clone().split();

    let (joined, split) = tokio::join!(db.query(&query), db.query(&split));
    assert_eq!(joined.unwrap(), split.unwrap());
}

#[test]
fn schema_resolution_is_repeatable() {
    let first = models!(fixtures::store()).build_schema().unwrap();
    let second = models!(fixtures::store()).build_schema().unwrap();

    assert_eq!(first.db, second.db);
    assert_eq!(first.mapping, second.mapping);
}

tests!(
    planning_is_repeatable,
    concurrent_planning_matches_sequential_planning,
    concurrent_queries_share_one_handle,
);
