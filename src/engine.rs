use rust_decimal::Decimal;

use crate::error::ReportError;
use crate::format;
use crate::types::{Country, Dataset, Layout, QueryDescriptor, Report};

// Run one query against the dataset. Pure function of its inputs: the
// dataset is never mutated and the same descriptor always yields the
// same report.
pub fn run_query(dataset: &Dataset, query: &QueryDescriptor) -> Result<Report, ReportError> {
    match query {
        QueryDescriptor::ByCountry { country } => by_country(dataset, country),
        QueryDescriptor::BySourceType { source_type } => by_source_type(dataset, source_type),
        QueryDescriptor::ByPercentRange { min, max } => by_percent_range(dataset, *min, *max),
    }
}

// Every distinct source type, in first-seen dataset order. Drives the
// numbered source-type menu.
pub fn unique_source_types(dataset: &Dataset) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for country in &dataset.countries {
        for source in &country.sources {
            if !types.iter().any(|t| t == &source.kind) {
                types.push(source.kind.clone());
            }
        }
    }
    types
}

// Range bounds are checked at the input boundary; the engine assumes a
// descriptor that reaches it is already range-valid.
pub fn validate_range(min: Option<Decimal>, max: Option<Decimal>) -> Result<(), ReportError> {
    let hundred = Decimal::ONE_HUNDRED;
    if let Some(min) = min {
        if min < Decimal::ZERO || min > hundred {
            return Err(ReportError::InvalidRange(
                "The minimum value must be between 0 and 100...".into(),
            ));
        }
    }
    if let Some(max) = max {
        if max < Decimal::ZERO || max > hundred {
            return Err(ReportError::InvalidRange(
                "The maximum value must be between 0 and 100...".into(),
            ));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(ReportError::InvalidRange(
                "The minimum value cannot be greater than the maximum value...".into(),
            ));
        }
    }
    Ok(())
}

fn by_country(dataset: &Dataset, name: &str) -> Result<Report, ReportError> {
    let country = dataset
        .countries
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| ReportError::NotFound(name.to_string()))?;

    let rows: Vec<Vec<String>> = country
        .sources
        .iter()
        .map(|s| {
            vec![
                s.kind.clone(),
                cell(s.amount),
                cell(s.percent_of_all),
                cell(s.percent_of_renewables),
            ]
        })
        .collect();

    Ok(Report {
        title: format!(
            "Renewable Electricity Production in {}",
            format::truncate_name(&country.name, 30)
        ),
        columns: vec![
            "Renewable Type".into(),
            format!("Amount ({})", dataset.units),
            "% of Total".into(),
            "% of Renewables".into(),
        ],
        match_count: rows.len(),
        rows,
        layout: Layout::CountrySources,
    })
}

fn by_source_type(dataset: &Dataset, source_type: &str) -> Result<Report, ReportError> {
    // A dataset with no source records at all is distinct from a type
    // that simply matches nothing.
    if dataset.countries.iter().all(|c| c.sources.is_empty()) {
        return Err(ReportError::NoSourceTypesAvailable);
    }

    let mut rows = Vec::new();
    for country in &dataset.countries {
        for source in country.sources.iter().filter(|s| s.kind == source_type) {
            rows.push(vec![
                country.name.clone(),
                cell(source.amount),
                cell(source.percent_of_all),
                cell(source.percent_of_renewables),
            ]);
        }
    }

    Ok(Report {
        title: format!("{} Electricity Production", capitalize_first(source_type)),
        columns: vec![
            "Country".into(),
            format!("Amount ({})", dataset.units),
            "% of Total".into(),
            "% of Renewables".into(),
        ],
        match_count: rows.len(),
        rows,
        layout: Layout::SourceOwners,
    })
}

fn by_percent_range(
    dataset: &Dataset,
    min: Option<Decimal>,
    max: Option<Decimal>,
) -> Result<Report, ReportError> {
    let title = match (min, max) {
        (Some(min), Some(max)) => format!(
            "Countries Where Renewables Account for {min:.2}% to {max:.2}% of All Generation"
        ),
        (Some(min), None) => format!(
            "Countries Where Renewables Account for At Least {min:.2}% of All Generation"
        ),
        (None, Some(max)) => format!(
            "Countries Where Renewables Account for Up To {max:.2}% of All Generation"
        ),
        (None, None) => "Combined Renewables for All Countries".to_string(),
    };

    let rows: Vec<Vec<String>> = dataset
        .countries
        .iter()
        .filter(|c| within_range(c, min, max))
        .map(|c| {
            vec![
                c.name.clone(),
                cell(c.totals.all_sources),
                cell(c.totals.all_renewables),
                cell(c.totals.renewable_percent),
            ]
        })
        .collect();

    Ok(Report {
        title,
        columns: vec![
            "Country".into(),
            format!("All Elec. ({})", dataset.units),
            format!("Renewable ({})", dataset.units),
            "% Renewable".into(),
        ],
        match_count: rows.len(),
        rows,
        layout: Layout::CountryTotals,
    })
}

// Bounds are inclusive. A country without a usable renewable-percent
// total can never satisfy a bound, but passes the unbounded query.
fn within_range(country: &Country, min: Option<Decimal>, max: Option<Decimal>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(percent) = country.totals.renewable_percent else {
        return false;
    };
    min.map_or(true, |m| percent >= m) && max.map_or(true, |m| percent <= m)
}

fn cell(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
