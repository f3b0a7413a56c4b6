//! Document store sink (MongoDB).

use polars::prelude::DataFrame;

use crate::common::validate_identifier;
use crate::error::{Result, SinkError};

#[cfg(feature = "mongo")]
const MILLIS_PER_DAY: i64 = 86_400_000;

#[cfg(feature = "mongo")]
fn bson_value(value: polars::prelude::AnyValue<'_>) -> mongodb::bson::Bson {
    use mongodb::bson::{Bson, DateTime};
    use polars::prelude::AnyValue;
    use ventas_common::{any_to_f64, any_to_i64, any_to_string};

    match value {
        AnyValue::Null => Bson::Null,
        AnyValue::Boolean(b) => Bson::Boolean(b),
        AnyValue::Date(days) => Bson::DateTime(DateTime::from_millis(
            i64::from(days) * MILLIS_PER_DAY,
        )),
        AnyValue::Float32(_) | AnyValue::Float64(_) => {
            any_to_f64(value).map_or(Bson::Null, Bson::Double)
        }
        AnyValue::Int8(_)
        | AnyValue::Int16(_)
        | AnyValue::Int32(_)
        | AnyValue::Int64(_)
        | AnyValue::UInt8(_)
        | AnyValue::UInt16(_)
        | AnyValue::UInt32(_)
        | AnyValue::UInt64(_) => any_to_i64(value).map_or(Bson::Null, Bson::Int64),
        other => Bson::String(any_to_string(other)),
    }
}

/// One document per row, fields in column order.
#[cfg(feature = "mongo")]
pub fn frame_documents(df: &DataFrame) -> Result<Vec<mongodb::bson::Document>> {
    let columns = df.get_columns();
    let mut documents = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut document = mongodb::bson::Document::new();
        for column in columns {
            document.insert(column.name().to_string(), bson_value(column.get(idx)?));
        }
        documents.push(document);
    }
    Ok(documents)
}

/// Replaces `database.collection` with one document per row.
///
/// The server is pinged first so that an unreachable store fails before the
/// collection is dropped.
#[cfg(feature = "mongo")]
pub fn write_mongo(
    df: &DataFrame,
    connection: &str,
    database: &str,
    collection: &str,
) -> Result<usize> {
    use mongodb::bson::{Document, doc};
    use mongodb::sync::Client;

    validate_identifier("collection", collection)?;
    let namespace = format!("{database}.{collection}");
    let mongo_error = |source: mongodb::error::Error| SinkError::Document {
        namespace: namespace.clone(),
        source,
    };

    let documents = frame_documents(df)?;
    let client = Client::with_uri_str(connection).map_err(mongo_error)?;
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .run()
        .map_err(mongo_error)?;

    let target = client.database(database).collection::<Document>(collection);
    target.drop().run().map_err(mongo_error)?;
    let inserted = target.insert_many(documents).run().map_err(mongo_error)?;
    Ok(inserted.inserted_ids.len())
}

#[cfg(not(feature = "mongo"))]
pub fn write_mongo(
    _df: &DataFrame,
    _connection: &str,
    _database: &str,
    collection: &str,
) -> Result<usize> {
    validate_identifier("collection", collection)?;
    Err(SinkError::Unavailable {
        sink: "mongo",
        feature: "mongo",
    })
}

#[cfg(all(test, feature = "mongo"))]
mod tests {
    use super::*;
    use mongodb::bson::{Bson, DateTime};
    use polars::prelude::{Column, DataType, NamedFrom};

    #[test]
    fn test_frame_documents() {
        let fecha = Column::new("fecha".into(), vec![Some(19797i32), None])
            .cast(&DataType::Date)
            .unwrap();
        let df = DataFrame::new(vec![
            Column::new("id_transaccion".into(), vec!["T1", "T2"]),
            fecha,
            Column::new("cantidad".into(), vec![Some(2i64), Some(1)]),
            Column::new("precio_unitario".into(), vec![10.5f64, 3.0]),
        ])
        .unwrap();

        let documents = frame_documents(&df).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].get_str("id_transaccion").unwrap(), "T1");
        assert_eq!(
            documents[0].get("fecha"),
            Some(&Bson::DateTime(DateTime::from_millis(19797 * 86_400_000)))
        );
        assert_eq!(documents[1].get("fecha"), Some(&Bson::Null));
        assert_eq!(documents[0].get_i64("cantidad").unwrap(), 2);
        assert_eq!(documents[0].get_f64("precio_unitario").unwrap(), 10.5);
    }
}
