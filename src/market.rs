//! Risk-free-rate series, used to derive a default pricing rate.
//!
//! The series arrives loaded as a DataFrame with a sortable `period`
//! column and an `annual_rate_pct` column holding the annualized rate in
//! percent. The default rate is the most recent period's rate as a
//! decimal.

use crate::CommutaResult;
use crate::error::CommutaError;
use polars::prelude::*;

#[derive(Debug, Clone)]
pub struct RiskFreeSeries {
    dataframe: DataFrame,
}

impl RiskFreeSeries {
    pub fn from_df(dataframe: DataFrame) -> CommutaResult<Self> {
        for required in ["period", "annual_rate_pct"] {
            if !dataframe.get_column_names().contains(&&required.into()) {
                return Err(CommutaError::Schema(format!(
                    "missing column {required:?}"
                )));
            }
        }

        if dataframe.height() == 0 {
            return Err(CommutaError::Schema("risk-free series is empty".into()));
        }

        let dataframe = dataframe
            .lazy()
            .with_columns([
                col("period").cast(DataType::Int64),
                col("annual_rate_pct").cast(DataType::Float64),
            ])
            .collect()?;

        Ok(Self { dataframe })
    }

    /// Annualized rate of the most recent period, as a decimal.
    ///
    /// # Example
    /// ```rust
    /// # use commuta::prelude::*;
    /// use polars::prelude::df;
    /// let series = RiskFreeSeries::from_df(df! {
    ///     "period" => [202401i64, 202402, 202403],
    ///     "annual_rate_pct" => [10.50, 10.75, 10.25],
    /// }?)?;
    /// assert_eq!(series.latest_annual_rate()?, 0.1025);
    /// # CommutaResult::Ok(())
    /// ```
    pub fn latest_annual_rate(&self) -> CommutaResult<f64> {
        let periods = self.dataframe.column("period")?.i64()?;
        let latest = periods
            .max()
            .ok_or_else(|| CommutaError::Schema("risk-free series has no periods".into()))?;

        let filtered = self
            .dataframe
            .clone()
            .lazy()
            .filter(col("period").eq(lit(latest)))
            .collect()?;

        let rate = filtered
            .column("annual_rate_pct")?
            .f64()?
            .get(0)
            .ok_or_else(|| {
                CommutaError::Schema(format!("no rate recorded for period {latest}"))
            })?;

        Ok(rate / 100.0)
    }
}
