use rust_decimal::Decimal;

// The dataset tree, immutable once loaded. Countries keep their document
// order; every menu and report walks them in that order.
#[derive(Debug)]
pub struct Dataset {
    pub year: String,
    pub units: String,
    pub countries: Vec<Country>,
}

#[derive(Debug)]
pub struct Country {
    pub name: String,
    pub sources: Vec<SourceRecord>,
    pub totals: Totals,
}

// One renewable generation category for one country. Numeric fields are
// None when the source document omitted them or they failed to parse;
// the formatter renders those as empty cells.
#[derive(Debug)]
pub struct SourceRecord {
    pub kind: String,
    pub amount: Option<Decimal>,
    pub percent_of_all: Option<Decimal>,
    pub percent_of_renewables: Option<Decimal>,
}

#[derive(Debug, Default)]
pub struct Totals {
    pub all_sources: Option<Decimal>,
    pub all_renewables: Option<Decimal>,
    pub renewable_percent: Option<Decimal>,
}

// A fully-formed query, validated at the input boundary before it
// reaches the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryDescriptor {
    ByCountry { country: String },
    BySourceType { source_type: String },
    ByPercentRange {
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
}

// Which column layout the formatter should use for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    CountrySources,
    SourceOwners,
    CountryTotals,
}

// The computed report: raw cell values plus the metadata the formatter
// needs. Cells carry unformatted decimal text; grouping and truncation
// happen at render time.
#[derive(Debug)]
pub struct Report {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub match_count: usize,
    pub layout: Layout,
}
