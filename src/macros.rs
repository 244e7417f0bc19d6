/// Build a [`crate::table::MortTableSet`] from inline columns.
///
/// Usage:
/// ```rust
/// # use commuta::prelude::*;
/// use commuta::mtdf;
/// let set = mtdf! {
///     "table" => vec!["DEMO"; 3],
///     "gender" => vec!["male"; 3],
///     "age" => [0u32, 1, 2],
///     "lx" => [100.0, 60.0, 0.0],
///     "dx" => [40.0, 60.0, 0.0],
/// }?;
/// # CommutaResult::Ok(())
/// ```
#[macro_export]
macro_rules! mtdf {
    ($($name:expr => $val:expr),+ $(,)?) => {{
        use $crate::table::MortTableSet;
        use polars::prelude::df;
        match df! { $($name => $val),+ } {
            Ok(df) => MortTableSet::from_df(df),
            Err(e) => Err($crate::error::CommutaError::from(e)),
        }
    }};
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use crate::table::Gender;

    #[test]
    fn test_mtdf_macro_builds_a_table_set() {
        let set = mtdf! {
            "table" => vec!["DEMO"; 3],
            "gender" => vec!["male"; 3],
            "age" => [0u32, 1, 2],
            "lx" => [100.0, 60.0, 0.0],
            "dx" => [40.0, 60.0, 0.0],
        }
        .expect("failed to build MortTableSet from macro");

        let series = set.select("DEMO", Gender::Male).unwrap();
        assert_eq!(series.max_age(), 2);
    }

    #[test]
    fn test_mtdf_macro_surfaces_schema_errors() {
        let result = mtdf! {
            "table" => ["DEMO"],
            "gender" => ["male"],
            "age" => [0u32],
        };
        assert!(result.is_err());
    }
}
