//! Formatted workbook sink.

use std::path::Path;

use chrono::Datelike;
use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{
    Color, ExcelDateTime, Format, FormatAlign, FormatBorder, Workbook, XlsxError,
};
use ventas_common::{any_to_date, any_to_f64, any_to_string};

use crate::common::{ColumnKind, column_kinds, display_header, ensure_parent_dir};
use crate::error::{Result, SinkError};

const HEADER_FILL: u32 = 0xDDEBF7;
const CURRENCY_FORMAT: &str = "#,##0.00 €";
const DATE_FORMAT: &str = "yyyy-mm-dd";
const INTEGER_FORMAT: &str = "0";
const MIN_COLUMN_WIDTH: usize = 12;
const COLUMN_PADDING: usize = 3;

struct Formats {
    header: Format,
    date: Format,
    currency: Format,
    integer: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_background_color(Color::RGB(HEADER_FILL))
                .set_border(FormatBorder::Thin),
            date: Format::new().set_num_format(DATE_FORMAT),
            currency: Format::new().set_num_format(CURRENCY_FORMAT),
            integer: Format::new().set_num_format(INTEGER_FORMAT),
        }
    }
}

/// Column width: longest rendered value or header, padded, never below the minimum.
pub fn column_width(header: &str, values: impl Iterator<Item = String>) -> usize {
    let longest = values
        .map(|value| value.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0);
    (longest + COLUMN_PADDING).max(MIN_COLUMN_WIDTH)
}

/// Writes the frame to a single-sheet workbook at `path`.
///
/// The header row is display-cased and styled; date, currency and integer
/// columns get their number formats. Returns the number of data rows.
pub fn write_excel(df: &DataFrame, path: &Path, sheet_name: &str) -> Result<usize> {
    let xlsx_error = |source: XlsxError| SinkError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };
    ensure_parent_dir(path)?;

    let formats = Formats::new();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(xlsx_error)?;

    for (col_idx, (name, kind)) in column_kinds(df).into_iter().enumerate() {
        let col = u16::try_from(col_idx).unwrap_or(u16::MAX);
        let column = df.column(&name)?;
        let header = display_header(&name);
        worksheet
            .write_string_with_format(0, col, &header, &formats.header)
            .map_err(xlsx_error)?;

        for idx in 0..df.height() {
            let row = u32::try_from(idx + 1).unwrap_or(u32::MAX);
            let value = column.get(idx)?;
            if matches!(value, AnyValue::Null) {
                continue;
            }
            match kind {
                ColumnKind::Date => {
                    if let Some(date) = any_to_date(value) {
                        let datetime = ExcelDateTime::from_ymd(
                            u16::try_from(date.year()).unwrap_or_default(),
                            u8::try_from(date.month()).unwrap_or_default(),
                            u8::try_from(date.day()).unwrap_or_default(),
                        )
                        .map_err(xlsx_error)?;
                        worksheet
                            .write_datetime_with_format(row, col, &datetime, &formats.date)
                            .map_err(xlsx_error)?;
                    }
                }
                ColumnKind::Currency | ColumnKind::Integer | ColumnKind::Decimal => {
                    if let Some(number) = any_to_f64(value) {
                        let result = match kind {
                            ColumnKind::Currency => worksheet.write_number_with_format(
                                row,
                                col,
                                number,
                                &formats.currency,
                            ),
                            ColumnKind::Integer => worksheet.write_number_with_format(
                                row,
                                col,
                                number,
                                &formats.integer,
                            ),
                            _ => worksheet.write_number(row, col, number),
                        };
                        result.map_err(xlsx_error)?;
                    }
                }
                ColumnKind::Boolean => {
                    worksheet
                        .write_boolean(row, col, matches!(value, AnyValue::Boolean(true)))
                        .map_err(xlsx_error)?;
                }
                ColumnKind::Text => {
                    worksheet
                        .write_string(row, col, any_to_string(value))
                        .map_err(xlsx_error)?;
                }
            }
        }

        let width = column_width(
            &header,
            (0..df.height()).map(|idx| column.get(idx).map(any_to_string).unwrap_or_default()),
        );
        worksheet
            .set_column_width(col, width as f64)
            .map_err(xlsx_error)?;
    }

    workbook.save(path).map_err(xlsx_error)?;
    Ok(df.height())
}
