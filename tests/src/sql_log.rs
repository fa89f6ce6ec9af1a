use pretty_assertions::StrComparison;
use std::sync::{Arc, Mutex};
use strata::{driver::Operation, stmt::Value};

/// The SQL sent to the database during one test.
///
/// Each test owns its log. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct SqlLog {
    entries: Arc<Mutex<Vec<Entry>>>,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub sql: String,
    pub params: Vec<Value>,
}

impl SqlLog {
    pub fn new() -> SqlLog {
        SqlLog::default()
    }

    pub(crate) fn push(&self, operation: &Operation) {
        self.entries.lock().unwrap().push(Entry {
            sql: operation.sql().to_string(),
            params: operation.params().to_vec(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    /// Parameters of the command at `index`.
    pub fn params(&self, index: usize) -> Vec<Value> {
        self.entries.lock().unwrap()[index].params.clone()
    }

    /// Forgets every command logged so far.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Asserts that exactly the `expected` commands were logged, in order.
    ///
    /// Both sides are normalized first, so delimiters, placeholder styles,
    /// line endings, and surrounding blank lines do not matter. A mismatch
    /// panics with a diff; the baseline is never rewritten.
    pub fn assert_baseline<S: AsRef<str>>(&self, expected: &[S]) {
        let actual: Vec<String> = self
            .entries()
            .iter()
            .map(|entry| strata_sql::normalize(&entry.sql))
            .collect();

        let expected: Vec<String> = expected
            .iter()
            .map(|sql| strata_sql::normalize(sql.as_ref()))
            .collect();

        if actual != expected {
            let expected = expected.join("\n\n");
            let actual = actual.join("\n\n");

            panic!(
                "emitted SQL does not match the baseline\n\n{}",
                StrComparison::new(&expected, &actual)
            );
        }
    }
}
