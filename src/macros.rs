/*!
Macro helpers for the matchers.

These macros only do anything in tests or when the `checked` cfg is enabled,
so hot loops can assert invariants without paying for them in regular builds.
*/

macro_rules! test_assert {
    ($($tokens:tt)*) => {{
        #[cfg(any(test, checked))]
        {
            assert!($($tokens)*);
        }
    }};
}

macro_rules! test_assert_eq {
    ($($tokens:tt)*) => {{
        #[cfg(any(test, checked))]
        {
            assert_eq!($($tokens)*);
        }
    }};
}
