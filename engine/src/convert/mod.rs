//! Scalar and structural conversion between domain and editable values

mod currency;
mod scalars;
mod structural;

pub use currency::{CURRENCY_MULTIPLIER, CurrencyFormat, format_minor, parse_minor};
pub use scalars::{ConverterEntry, ConvertFn, ScalarConverters, ValidateFn, default_converters};
pub use structural::{Direction, convert_value};
