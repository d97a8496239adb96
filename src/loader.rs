use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ReportError;
use crate::types::{Country, Dataset, SourceRecord, Totals};

// Raw document shapes as quick-xml sees them. Numeric attributes stay
// strings here so one bad value degrades to an empty cell instead of
// failing the whole load.
#[derive(Debug, Deserialize)]
struct DatasetDoc {
    #[serde(rename = "@year", default)]
    year: String,
    #[serde(rename = "@units", default)]
    units: String,
    #[serde(rename = "country", default)]
    countries: Vec<CountryDoc>,
}

#[derive(Debug, Deserialize)]
struct CountryDoc {
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "source", default)]
    sources: Vec<SourceDoc>,
    #[serde(default)]
    totals: TotalsDoc,
}

#[derive(Debug, Default, Deserialize)]
struct SourceDoc {
    #[serde(rename = "@type", default)]
    kind: String,
    #[serde(rename = "@amount", default)]
    amount: Option<String>,
    #[serde(rename = "@percent-of-all", default)]
    percent_of_all: Option<String>,
    #[serde(rename = "@percent-of-renewables", default)]
    percent_of_renewables: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TotalsDoc {
    #[serde(rename = "@all-sources", default)]
    all_sources: Option<String>,
    #[serde(rename = "@all-renewables", default)]
    all_renewables: Option<String>,
    #[serde(rename = "@renewable-percent", default)]
    renewable_percent: Option<String>,
}

pub fn load_dataset(path: &Path) -> Result<Dataset, ReportError> {
    let text =
        fs::read_to_string(path).map_err(|e| ReportError::DataUnavailable(e.to_string()))?;
    parse_dataset(&text)
}

pub fn parse_dataset(text: &str) -> Result<Dataset, ReportError> {
    let doc: DatasetDoc =
        quick_xml::de::from_str(text).map_err(|e| ReportError::DataUnavailable(e.to_string()))?;

    Ok(Dataset {
        year: doc.year,
        units: doc.units,
        countries: doc.countries.into_iter().map(into_country).collect(),
    })
}

fn into_country(doc: CountryDoc) -> Country {
    Country {
        name: doc.name,
        sources: doc
            .sources
            .into_iter()
            .map(|s| SourceRecord {
                kind: s.kind,
                amount: parse_decimal(s.amount),
                percent_of_all: parse_decimal(s.percent_of_all),
                percent_of_renewables: parse_decimal(s.percent_of_renewables),
            })
            .collect(),
        totals: Totals {
            all_sources: parse_decimal(doc.totals.all_sources),
            all_renewables: parse_decimal(doc.totals.all_renewables),
            renewable_percent: parse_decimal(doc.totals.renewable_percent),
        },
    }
}

fn parse_decimal(raw: Option<String>) -> Option<Decimal> {
    raw.as_deref().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<renewable-electricity year="2021" units="GWh">
  <country name="Iceland">
    <source type="hydro" amount="13761" percent-of-all="70.0" percent-of-renewables="70.0"/>
    <source type="geothermal" amount="5900" percent-of-all="30.0" percent-of-renewables="30.0"/>
    <totals all-sources="19661" all-renewables="19661" renewable-percent="100"/>
  </country>
  <country name="Poland">
    <source type="wind" amount="16455" percent-of-all="9.1" percent-of-renewables="60.9"/>
    <totals all-sources="179390" all-renewables="26908" renewable-percent="15"/>
  </country>
</renewable-electricity>"#;

    #[test]
    fn parses_root_attributes_and_document_order() {
        let dataset = parse_dataset(SAMPLE).unwrap();
        assert_eq!(dataset.year, "2021");
        assert_eq!(dataset.units, "GWh");
        let names: Vec<&str> = dataset.countries.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Iceland", "Poland"]);
    }

    #[test]
    fn parses_sources_and_totals() {
        let dataset = parse_dataset(SAMPLE).unwrap();
        let iceland = &dataset.countries[0];
        assert_eq!(iceland.sources.len(), 2);
        assert_eq!(iceland.sources[0].kind, "hydro");
        assert_eq!(iceland.sources[0].amount, Some(dec!(13761)));
        assert_eq!(iceland.totals.renewable_percent, Some(dec!(100)));
    }

    #[test]
    fn missing_or_malformed_numbers_become_empty_fields() {
        let text = r#"<renewable-electricity year="2021" units="GWh">
  <country name="Atlantis">
    <source type="wave" percent-of-all="n/a"/>
  </country>
</renewable-electricity>"#;
        let dataset = parse_dataset(text).unwrap();
        let atlantis = &dataset.countries[0];
        assert_eq!(atlantis.sources[0].amount, None);
        assert_eq!(atlantis.sources[0].percent_of_all, None);
        // no totals element at all
        assert_eq!(atlantis.totals.all_sources, None);
        assert_eq!(atlantis.totals.renewable_percent, None);
    }

    #[test]
    fn country_without_sources_loads_empty() {
        let text = r#"<renewable-electricity year="2021" units="GWh">
  <country name="Nowhere">
    <totals all-sources="5" all-renewables="0" renewable-percent="0"/>
  </country>
</renewable-electricity>"#;
        let dataset = parse_dataset(text).unwrap();
        assert!(dataset.countries[0].sources.is_empty());
    }

    #[test]
    fn unparsable_document_is_data_unavailable() {
        let result = parse_dataset("this is not xml <<<");
        assert!(matches!(result, Err(ReportError::DataUnavailable(_))));
    }
}
