//! CSV fixtures for import, export and statement tests.
//!
//! ## Available Fixtures
//!
//! - [`PAYMENTS_CSV`] - Two rows with a currency cell and an empty cell
//! - [`MIXED_TYPES_CSV`] - One row per inferred cell type
//! - [`CITIES_CSV`] - 25 rows, enough to overflow a result preview
//!
//! ## Usage
//!
//! ```ignore
//! use db::fixtures;
//! use db::test_utils::setup_test_db;
//!
//! let db = setup_test_db(fixtures::CITIES_CSV, "cities");
//! ```

/// Header `Name,Amount` with a currency-prefixed integer and a missing amount.
pub const PAYMENTS_CSV: &str = "\
Name,Amount
Ann,$50
Bo,
";

/// One `value` cell per coercion outcome: integer, float, out-of-range
/// integer, currency-prefixed text, empty, plain text.
pub const MIXED_TYPES_CSV: &str = "\
label,value
integer,7
float,3.14
overflow,9223372036854775808
currency text,$abc
empty,
text,hello
";

/// 25 cities with populations; the population of the last one is unknown.
pub const CITIES_CSV: &str = "\
City,Country,Population
Tokyo,Japan,37400068
Delhi,India,28514000
Shanghai,China,25582000
Sao Paulo,Brazil,21650000
Mexico City,Mexico,21581000
Cairo,Egypt,20076000
Mumbai,India,19980000
Beijing,China,19618000
Dhaka,Bangladesh,19578000
Osaka,Japan,19281000
New York,USA,18819000
Karachi,Pakistan,15400000
Buenos Aires,Argentina,14967000
Chongqing,China,14838000
Istanbul,Turkey,14751000
Kolkata,India,14681000
Manila,Philippines,13482000
Lagos,Nigeria,13463000
Rio de Janeiro,Brazil,13293000
Tianjin,China,13215000
Kinshasa,DR Congo,13171000
Guangzhou,China,12638000
Los Angeles,USA,12458000
Moscow,Russia,12410000
Shenzhen,China,
";
