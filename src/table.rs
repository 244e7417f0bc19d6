//! # Mortality Table Index
//!
//! Holds the full mortality-table dataset and selects one age/lx/dx series
//! per (table name, gender) pair.
//!
//! The dataset arrives fully loaded as a polars [`DataFrame`] with the
//! columns `table`, `gender`, `age`, `lx`, `dx`, one row per integer age.
//! Loading files or URLs is the caller's concern; this module only indexes
//! what it is given.
//!
//! ## Quick Start
//! ```rust
//! # use commuta::prelude::*;
//! use polars::prelude::df;
//!
//! let df = df! {
//!     "table" => vec!["DEMO"; 4],
//!     "gender" => vec!["male"; 4],
//!     "age" => [0u32, 1, 2, 3],
//!     "lx" => [1000.0, 900.0, 500.0, 0.0],
//!     "dx" => [100.0, 400.0, 500.0, 0.0],
//! }?;
//! let set = MortTableSet::from_df(df)?;
//! let series = set.select("DEMO", Gender::Male)?;
//! assert_eq!(series.max_age(), 3);
//! # CommutaResult::Ok(())
//! ```

use crate::CommutaResult;
use crate::error::CommutaError;
use polars::prelude::*;
use std::fmt;
use std::str::FromStr;

// ===============================================
// GENDER
// ===============================================

/// Gender key of a mortality series.
///
/// Display names shown to end users are configuration supplied by the
/// caller; the engine only carries the string codes used in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CommutaError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        if code.eq_ignore_ascii_case("male") || code.eq_ignore_ascii_case("m") {
            Ok(Gender::Male)
        } else if code.eq_ignore_ascii_case("female") || code.eq_ignore_ascii_case("f") {
            Ok(Gender::Female)
        } else {
            Err(CommutaError::UnknownGender(code.to_string()))
        }
    }
}

// ===============================================
// TABLE SET
// ===============================================

/// The full mortality-table dataset, one row per (table, gender, age).
#[derive(Debug, Clone)]
pub struct MortTableSet {
    dataframe: DataFrame,
}

impl MortTableSet {
    /// Wrap a loaded DataFrame after checking its schema.
    ///
    /// Required columns: `table` (str), `gender` (str), `age`, `lx`, `dx`.
    /// Numeric columns are cast to the working dtypes.
    pub fn from_df(dataframe: DataFrame) -> CommutaResult<Self> {
        for required in ["table", "gender", "age", "lx", "dx"] {
            if !dataframe.get_column_names().contains(&&required.into()) {
                return Err(CommutaError::Schema(format!(
                    "missing column {required:?}"
                )));
            }
        }

        if dataframe.height() == 0 {
            return Err(CommutaError::Schema("table set is empty".into()));
        }

        let dataframe = dataframe
            .lazy()
            .with_columns([
                col("age").cast(DataType::UInt32),
                col("lx").cast(DataType::Float64),
                col("dx").cast(DataType::Float64),
            ])
            .collect()?;

        Ok(Self { dataframe })
    }

    /// Unique table names present in the dataset.
    pub fn tables(&self) -> CommutaResult<Vec<String>> {
        let names = self.dataframe.column("table")?.str()?.unique()?;
        Ok(names.into_iter().flatten().map(str::to_string).collect())
    }

    /// Select the series for one (table name, gender) pair.
    ///
    /// Fails with [`CommutaError::TableNotFound`] when the filter yields no
    /// rows. The result is reset-indexed from age 0.
    pub fn select(&self, table: &str, gender: Gender) -> CommutaResult<MortalitySeries> {
        let filtered = self
            .dataframe
            .clone()
            .lazy()
            .filter(
                col("table")
                    .eq(lit(table))
                    .and(col("gender").eq(lit(gender.as_str()))),
            )
            .sort(["age"], Default::default())
            .collect()?;

        if filtered.height() == 0 {
            return Err(CommutaError::TableNotFound {
                table: table.to_string(),
                gender,
            });
        }

        let ages: Vec<u32> = filtered.column("age")?.u32()?.into_no_null_iter().collect();
        let lx: Vec<f64> = filtered.column("lx")?.f64()?.into_no_null_iter().collect();
        let dx: Vec<f64> = filtered.column("dx")?.f64()?.into_no_null_iter().collect();

        for (row, age) in ages.iter().enumerate() {
            if *age as usize != row {
                return Err(CommutaError::Schema(format!(
                    "ages must be contiguous from 0, found age {age} at row {row}"
                )));
            }
        }

        Ok(MortalitySeries {
            table: table.to_string(),
            gender,
            lx,
            dx,
        })
    }
}

// ===============================================
// MORTALITY SERIES
// ===============================================

/// One selected mortality series, indexed densely by age from 0.
///
/// The `dx[age] = lx[age] - lx[age + 1]` identity is assumed to hold in the
/// supplied data; the engine does not enforce it.
#[derive(Debug, Clone, PartialEq)]
pub struct MortalitySeries {
    table: String,
    gender: Gender,
    lx: Vec<f64>,
    dx: Vec<f64>,
}

impl MortalitySeries {
    /// Build a series from survivor counts alone, deriving the deaths
    /// column. At the terminal age everyone still alive is assumed to die
    /// within the year.
    pub fn from_lx(
        table: impl Into<String>,
        gender: Gender,
        lx: Vec<f64>,
    ) -> CommutaResult<Self> {
        if lx.is_empty() {
            return Err(CommutaError::Schema("lx series is empty".into()));
        }

        let mut dx: Vec<f64> = lx.windows(2).map(|pair| pair[0] - pair[1]).collect();
        dx.push(lx[lx.len() - 1]);

        Ok(Self {
            table: table.into(),
            gender,
            lx,
            dx,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Highest age available in the series. Every downstream boundary check
    /// runs against this value.
    pub fn max_age(&self) -> u32 {
        (self.lx.len() - 1) as u32
    }

    pub fn lives(&self) -> &[f64] {
        &self.lx
    }

    pub fn deaths(&self) -> &[f64] {
        &self.dx
    }
}
