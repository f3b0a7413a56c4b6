//! Aggregate views of the cleaned table.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use polars::prelude::{AnyValue, DataFrame, IntoLazy, col};
use ventas_common::{any_to_date, any_to_f64, any_to_i64, any_to_string_non_empty, has_column};
use ventas_model::columns::{CANTIDAD, CIUDAD, DESCRIPCION_PRODUCTO, FECHA, INGRESOS};

use crate::error::Result;

/// A named total (revenue per city, quantity per product).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal<T> {
    pub name: String,
    pub total: T,
}

/// Revenue of one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub revenue: f64,
}

impl MonthlyRevenue {
    /// `YYYY-MM` label.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Headline metrics and breakdowns of a cleaned table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    pub transactions: usize,
    pub total_revenue: f64,
    /// Total revenue divided by transactions; zero for an empty table.
    pub average_transaction: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Descending by revenue, ties by name.
    pub revenue_by_city: Vec<CategoryTotal<f64>>,
    /// Descending by quantity, ties by name.
    pub quantity_by_product: Vec<CategoryTotal<i64>>,
    /// Every month from the first to the last date, ascending.
    pub revenue_by_month: Vec<MonthlyRevenue>,
}

fn f64_values(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<f64>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_f64(column.get(idx)?));
    }
    Ok(Some(values))
}

fn date_values(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<NaiveDate>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_date(column.get(idx)?));
    }
    Ok(Some(values))
}

/// Sum of `value` per `label` through a lazy `group_by`. Null or blank labels
/// are left out; a label whose values are all null totals zero.
fn grouped_totals<T>(
    df: &DataFrame,
    label: &str,
    value: &str,
    convert: fn(AnyValue<'_>) -> Option<T>,
) -> Result<Option<BTreeMap<String, T>>>
where
    T: Default,
{
    if !has_column(df, label) || !has_column(df, value) {
        return Ok(None);
    }
    let grouped = df
        .clone()
        .lazy()
        .group_by([col(label)])
        .agg([col(value).sum()])
        .collect()?;

    let labels = grouped.column(label)?;
    let sums = grouped.column(value)?;
    let mut totals = BTreeMap::new();
    for idx in 0..grouped.height() {
        if let Some(name) = any_to_string_non_empty(labels.get(idx)?) {
            totals.insert(name, convert(sums.get(idx)?).unwrap_or_default());
        }
    }
    Ok(Some(totals))
}

fn ranked<T, F>(totals: BTreeMap<String, T>, compare: F) -> Vec<CategoryTotal<T>>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut ranked: Vec<CategoryTotal<T>> = totals
        .into_iter()
        .map(|(name, total)| CategoryTotal { name, total })
        .collect();
    // BTreeMap order is by name; a stable sort keeps it for equal totals.
    ranked.sort_by(|a, b| compare(&b.total, &a.total));
    ranked
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn monthly_revenue(dates: &[Option<NaiveDate>], revenue: &[Option<f64>]) -> Vec<MonthlyRevenue> {
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for (date, value) in dates.iter().zip(revenue) {
        if let Some(date) = date {
            *by_month.entry((date.year(), date.month())).or_insert(0.0) += value.unwrap_or(0.0);
        }
    }
    let (Some(&first), Some(&last)) = (by_month.keys().next(), by_month.keys().next_back())
    else {
        return Vec::new();
    };

    let mut months = Vec::new();
    let mut current = first;
    while current <= last {
        months.push(MonthlyRevenue {
            year: current.0,
            month: current.1,
            revenue: by_month.get(&current).copied().unwrap_or(0.0),
        });
        current = next_month(current.0, current.1);
    }
    months
}

/// Computes the dashboard metrics. Expects `ingresos` from [`crate::derive_revenue`];
/// without it revenue totals are zero and there is no per-city breakdown.
pub fn summarize(df: &DataFrame) -> Result<DashboardSummary> {
    let transactions = df.height();
    let revenue = f64_values(df, INGRESOS)?.unwrap_or_else(|| vec![None; transactions]);
    let total_revenue: f64 = revenue.iter().flatten().sum();
    let average_transaction = if transactions > 0 {
        total_revenue / transactions as f64
    } else {
        0.0
    };

    let dates = date_values(df, FECHA)?.unwrap_or_else(|| vec![None; transactions]);
    let first_date = dates.iter().flatten().min().copied();
    let last_date = dates.iter().flatten().max().copied();

    let revenue_by_city = match grouped_totals(df, CIUDAD, INGRESOS, any_to_f64)? {
        Some(totals) => ranked(totals, |a, b| a.total_cmp(b)),
        None => Vec::new(),
    };

    let quantity_by_product = match grouped_totals(df, DESCRIPCION_PRODUCTO, CANTIDAD, any_to_i64)?
    {
        Some(totals) => ranked(totals, Ord::cmp),
        None => Vec::new(),
    };

    Ok(DashboardSummary {
        transactions,
        total_revenue,
        average_transaction,
        first_date,
        last_date,
        revenue_by_city,
        quantity_by_product,
        revenue_by_month: monthly_revenue(&dates, &revenue),
    })
}
