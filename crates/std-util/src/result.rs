/// Unwraps the error of a `Result`, panicking with the `Ok` value otherwise.
///
/// With a second argument, the error must also satisfy the named predicate
/// method, e.g. `assert_err!(res, is_configuration)`.
#[macro_export]
macro_rules! assert_err {
    ($e:expr) => {
        match $e {
            Err(e) => e,
            Ok(v) => panic!("expected `Err`; actual=Ok({:?})", v),
        }
    };
    ($e:expr, $pred:ident) => {{
        let err = $crate::assert_err!($e);
        assert!(
            err.$pred(),
            "expected an error satisfying `{}`; actual={}",
            stringify!($pred),
            err
        );
        err
    }};
}

/// Unwraps the value of a `Result`, panicking with the error's message
/// otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(e) => panic!("expected `Ok`; actual=Err({})", e),
        }
    };
}
