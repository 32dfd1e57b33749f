use crate::error::AppError;
use serde::{Deserialize, Serialize};
use types::history::{DateRange, HistoricalBar};

pub const DEFAULT_TOP_LIMIT: i64 = 10;
pub const MAX_TOP_LIMIT: i64 = 50;

/// `{count, data}` envelope of every listing route
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoricalResponse {
    pub ticker: String,
    pub count: usize,
    pub data: Vec<HistoricalBar>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub endpoints: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopQuery {
    pub limit: Option<i64>,
}

impl TopQuery {
    /// Requested list length, 1 to 50, default 10.
    pub fn limit(&self) -> Result<usize, AppError> {
        let limit = self.limit.unwrap_or(DEFAULT_TOP_LIMIT);
        if !(1..=MAX_TOP_LIMIT).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit doit etre compris entre 1 et {} (recu {})",
                MAX_TOP_LIMIT, limit
            )));
        }
        Ok(limit as usize)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalQuery {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl HistoricalQuery {
    pub fn date_range(&self) -> Result<DateRange, AppError> {
        let from = required("from_date", self.from_date.as_deref())?;
        let to = required("to_date", self.to_date.as_deref())?;
        Ok(DateRange::parse(from, to)?)
    }
}

fn required<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!(
            "Parametre requis: {} (YYYY-MM-DD)",
            name
        ))),
    }
}
