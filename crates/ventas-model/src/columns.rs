//! Canonical column names of the sales transaction schema.
//!
//! Names are the output of the schema normalizer applied to the raw export
//! headers (`ID Transaccion`, `Precio Unitario`, ...).

/// Unique business key of a transaction.
pub const ID_TRANSACCION: &str = "id_transaccion";
pub const FECHA: &str = "fecha";
pub const CANTIDAD: &str = "cantidad";
pub const PRECIO_UNITARIO: &str = "precio_unitario";
pub const PRODUCTO_ID: &str = "producto_id";
pub const DESCRIPCION_PRODUCTO: &str = "descripcion_producto";
pub const CIUDAD: &str = "ciudad";
pub const NOMBRE_CLIENTE: &str = "nombre_cliente";
pub const REGION: &str = "region";
pub const NOTAS: &str = "notas";

/// Derived revenue column (`cantidad * precio_unitario`).
pub const INGRESOS: &str = "ingresos";

/// Columns rendered with a currency format by spreadsheet sinks.
pub const CURRENCY_COLUMNS: [&str; 2] = [PRECIO_UNITARIO, INGRESOS];

/// Columns that may hold personal data and are redacted in logs.
pub const PERSONAL_COLUMNS: [&str; 1] = [NOMBRE_CLIENTE];
