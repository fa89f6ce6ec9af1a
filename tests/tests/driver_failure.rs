use tests::prelude::*;

use std::time::Duration;
use strata::{
    driver::{Capability, Driver, Operation, Response},
    schema::db::Schema,
    Db,
};

/// Wraps a driver and misbehaves on queries reading the `Reviews` table.
#[derive(Debug)]
struct ScriptedDriver {
    inner: Box<dyn Driver>,
    behavior: Behavior,
}

#[derive(Debug, Clone, Copy)]
enum Behavior {
    Fail,
    Stall,
}

#[async_trait::async_trait]
impl Driver for ScriptedDriver {
    fn capability(&self) -> &Capability {
        self.inner.capability()
    }

    async fn register_schema(&mut self, schema: &Schema) -> strata::Result<()> {
        self.inner.register_schema(schema).await
    }

    async fn exec(&self, op: Operation) -> strata::Result<Response> {
        if matches!(op, Operation::QuerySql(_)) && op.sql().contains(r#""Reviews""#) {
            match self.behavior {
                Behavior::Fail => {
                    return Err(strata::Error::driver_operation_failed(
                        std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
                    ))
                }
                Behavior::Stall => std::future::pending::<()>().await,
            }
        }

        self.inner.exec(op).await
    }
}

async fn setup(test: &mut DbTest, behavior: Behavior) -> Db {
    let driver = ScriptedDriver {
        inner: test.connect().await,
        behavior,
    };

    let db = models!(fixtures::store()).build(driver).await.unwrap();
    fixtures::seed_store(&db).await;
    db
}

fn customers_with_orders_and_reviews(db: &Db) -> Query {
    let app = &db.schema().app;
    let customer = entity(db, "Customer");

    Query::new(customer)
        .include(CollectionAccess::navigation(app, customer, "Orders").unwrap())
        .include(CollectionAccess::navigation(app, customer, "Reviews").unwrap())
        .split()
}

async fn failed_collection_command_fails_the_query(test: &mut DbTest) {
    let db = setup(test, Behavior::Fail).await;

    let err = assert_err!(
        db.query(&customers_with_orders_and_reviews(&db)).await,
        is_driver_operation_failed
    );
    assert_eq!(err.to_string(), "connection reset");
}

async fn failed_root_command_fails_the_query(test: &mut DbTest) {
    let db = setup(test, Behavior::Fail).await;

    let query = Query::new(entity(&db, "Review"));

    assert_err!(db.query(&query).await, is_driver_operation_failed);
}

async fn stalled_query_can_be_cancelled(test: &mut DbTest) {
    let db = setup(test, Behavior::Stall).await;
    let query = customers_with_orders_and_reviews(&db);

    let ret = tokio::time::timeout(Duration::from_millis(50), db.query(&query)).await;
    assert!(ret.is_err(), "query finished while a command was stalled");

    // Abandoning the query leaves the handle usable
    let customers = db
        .query(&Query::new(entity(&db, "Customer")))
        .await
        .unwrap();
    assert_eq!(customers.len(), 3);
}

async fn sqlite_errors_surface_as_driver_failures(test: &mut DbTest) {
    let db = test.setup_db(models!(fixtures::store())).await;

    let query = Query::new(entity(&db, "Customer")).from_sql(r#"SELECT * FROM "Missing""#);

    assert_err!(db.query(&query).await, is_driver_operation_failed);
}

tests!(
    failed_collection_command_fails_the_query,
    failed_root_command_fails_the_query,
    stalled_query_can_be_cancelled,
    sqlite_errors_surface_as_driver_failures,
);
