//! Output sinks for canonical records
//!
//! CSV output has a fixed, product-specific column list; nested fields are
//! flattened to dotted paths with numeric segments for array elements and
//! anything not in the list is dropped. JSON output is a pretty-printed
//! array of sparse records.

use crate::error::{ProcessorError, Result};
use crate::models::{OutputFormat, Product};
use crate::transform::remove_empty;
use serde_json::Value;
use std::io::Write;
use tracing::debug;

const PREVIOUS_NAME_SLOTS: usize = 10;
const SIC_SLOTS: usize = 4;

const COMPANY_COLUMNS: &[&str] = &[
    "company_number",
    "company_name",
    "type",
    "subtype",
    "company_status",
    "company_status_detail",
    "jurisdiction",
    "date_of_creation",
    "date_of_cessation",
    "accounts.accounting_reference_date.day",
    "accounts.accounting_reference_date.month",
    "accounts.last_accounts.made_up_to",
    "accounts.last_accounts.type",
    "accounts.next_made_up_to",
    "accounts.next_due",
    "confirmation_statement.last_made_up_to",
    "confirmation_statement.next_made_up_to",
    "confirmation_statement.next_due",
    "last_full_members_list_date",
    "registered_office_address.care_of",
    "registered_office_address.po_box",
    "registered_office_address.premises",
    "registered_office_address.address_line_1",
    "registered_office_address.address_line_2",
    "registered_office_address.locality",
    "registered_office_address.region",
    "registered_office_address.country",
    "registered_office_address.postal_code",
];

const TRANSACTION_COLUMNS: &[&str] = &[
    "transactionType",
    "companyNumber",
    "receivedDate",
    "transactionId",
    "jurisdiction",
    "correctionMarker",
    "inspectMarker",
    "dissolvedMarker",
    "companyStatus",
    "companyName",
    "suppliedCompanyName",
    "dateOfIncorporation",
    "dateOfCessation",
    "accountingReferenceDay",
    "accountingReferenceMonth",
    "accountsMadeUpDate",
    "accountsType",
    "accountsNextDueDate",
    "confirmationStatementDate",
    "confirmationStatementNextDueDate",
];

const TRANSACTION_ADDRESS_COLUMNS: &[&str] = &[
    "postcodeStatus",
    "registeredOfficeAddress.careOf",
    "registeredOfficeAddress.poBox",
    "registeredOfficeAddress.houseNameOrNumber",
    "registeredOfficeAddress.street",
    "registeredOfficeAddress.area",
    "registeredOfficeAddress.postTown",
    "registeredOfficeAddress.region",
    "registeredOfficeAddress.country",
    "registeredOfficeAddress.postcode",
];

const OFFICER_COLUMNS: &[&str] = &[
    "person_number",
    "is_corporate_officer",
    "name",
    "name_elements.title",
    "name_elements.forename",
    "name_elements.other_forenames",
    "name_elements.surname",
    "name_elements.honours",
    "officer_role",
    "appointment_date_origin",
    "appointed_on",
    "resigned_on",
    "date_of_birth.year",
    "date_of_birth.month",
    "date_of_birth.day",
    "nationality",
    "occupation",
    "country_of_residence",
    "address.care_of",
    "address.po_box",
    "address.address_line_1",
    "address.address_line_2",
    "address.locality",
    "address.region",
    "address.country",
    "address.postal_code",
    "appointed_to.company_number",
    "appointed_to.company_name",
    "appointed_to.company_status",
];

fn to_strings(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|column| column.to_string()).collect()
}

fn company_columns() -> Vec<String> {
    let mut columns = to_strings(COMPANY_COLUMNS);
    columns.extend((0..SIC_SLOTS).map(|i| format!("sic_codes.{}", i)));
    columns.push("links.self".to_string());
    columns
}

/// Output columns for a product, in output order
pub fn columns_for(product: Product) -> Vec<String> {
    match product {
        Product::Prod183 => company_columns(),
        Product::Prod217 => {
            let mut columns = company_columns();
            for i in 0..PREVIOUS_NAME_SLOTS {
                columns.push(format!("previous_company_names.{}.name", i));
                columns.push(format!("previous_company_names.{}.ceased_on", i));
                columns.push(format!("previous_company_names.{}.effective_from", i));
            }
            columns
        }
        Product::Prod100 | Product::Prod101 => {
            let mut columns = to_strings(TRANSACTION_COLUMNS);
            columns.extend((0..SIC_SLOTS).map(|i| format!("sicCodes.{}", i)));
            columns.extend(to_strings(TRANSACTION_ADDRESS_COLUMNS));
            columns
        }
        Product::Prod216 => to_strings(OFFICER_COLUMNS),
    }
}

/// Resolve a dotted path against a JSON value
pub fn lookup<'v>(record: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(record, |value, segment| match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Render a leaf value as a CSV cell
pub fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Consumer of canonical records
pub trait RecordSink {
    /// Write one record
    fn write_record(&mut self, record: &Value) -> Result<()>;

    /// Complete the output and flush
    fn finish(&mut self) -> Result<()>;

    /// Records written so far
    fn records_written(&self) -> usize;
}

/// CSV sink with a fixed column list
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    columns: Vec<String>,
    written: usize,
}

impl<W: Write> CsvSink<W> {
    /// Create the sink and emit the header row
    pub fn new(output: W, columns: Vec<String>) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(output);
        writer.write_record(&columns)?;
        Ok(Self {
            writer,
            columns,
            written: 0,
        })
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|error| ProcessorError::Io(error.into_error()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &Value) -> Result<()> {
        let record = remove_empty(record.clone());
        let row = self
            .columns
            .iter()
            .map(|column| cell(lookup(&record, column)));
        self.writer.write_record(row)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        debug!("CSV sink finished after {} record(s)", self.written);
        Ok(())
    }

    fn records_written(&self) -> usize {
        self.written
    }
}

/// JSON array sink
pub struct JsonSink<W: Write> {
    output: W,
    written: usize,
}

impl<W: Write> JsonSink<W> {
    pub fn new(mut output: W) -> Result<Self> {
        output.write_all(b"[\n")?;
        Ok(Self { output, written: 0 })
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> RecordSink for JsonSink<W> {
    fn write_record(&mut self, record: &Value) -> Result<()> {
        let record = remove_empty(record.clone());
        let pretty = serde_json::to_string_pretty(&record)?;

        if self.written > 0 {
            self.output.write_all(b",\n")?;
        }
        let indented: Vec<String> = pretty.lines().map(|line| format!("  {}", line)).collect();
        self.output.write_all(indented.join("\n").as_bytes())?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.written > 0 {
            self.output.write_all(b"\n")?;
        }
        self.output.write_all(b"]\n\n")?;
        self.output.flush()?;
        debug!("JSON sink finished after {} record(s)", self.written);
        Ok(())
    }

    fn records_written(&self) -> usize {
        self.written
    }
}

/// Build the sink for a product and format
pub fn create_sink<W>(
    format: OutputFormat,
    product: Product,
    output: W,
) -> Result<Box<dyn RecordSink + Send>>
where
    W: Write + Send + 'static,
{
    Ok(match format {
        OutputFormat::Csv => Box::new(CsvSink::new(output, columns_for(product))?),
        OutputFormat::Json => Box::new(JsonSink::new(output)?),
    })
}

/// In-memory sink collecting records
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub records: Vec<Value>,
    pub finished: bool,
}

impl RecordSink for CollectingSink {
    fn write_record(&mut self, record: &Value) -> Result<()> {
        self.records.push(remove_empty(record.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }

    fn records_written(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn company() -> Value {
        json!({
            "company_number": "00000118",
            "company_name": "ACME LIMITED",
            "accounts": { "accounting_reference_date": { "day": 31, "month": 3 } },
            "sic_codes": ["62012", "70100"],
            "links": { "self": "/company/00000118" },
            "unlisted": "dropped"
        })
    }

    #[test]
    fn test_column_lists() {
        let company = columns_for(Product::Prod183);
        assert_eq!(company.len(), 33);
        assert_eq!(company.first().map(String::as_str), Some("company_number"));
        assert_eq!(company.last().map(String::as_str), Some("links.self"));
        assert_eq!(columns_for(Product::Prod217).len(), 63);
        assert_eq!(columns_for(Product::Prod101).len(), 34);
        assert_eq!(columns_for(Product::Prod100), columns_for(Product::Prod101));
        assert_eq!(columns_for(Product::Prod216).len(), 29);
    }

    #[test]
    fn test_lookup_dotted_paths() {
        let record = company();
        assert_eq!(
            cell(lookup(&record, "accounts.accounting_reference_date.day")),
            "31"
        );
        assert_eq!(cell(lookup(&record, "sic_codes.1")), "70100");
        assert_eq!(cell(lookup(&record, "sic_codes.2")), "");
        assert_eq!(cell(lookup(&record, "links.self")), "/company/00000118");
        assert_eq!(cell(lookup(&json!({ "flag": false }), "flag")), "false");
    }

    #[test]
    fn test_csv_has_fixed_shape() {
        let mut sink = CsvSink::new(Vec::new(), columns_for(Product::Prod183)).unwrap();
        sink.write_record(&company()).unwrap();
        sink.write_record(&json!({ "company_number": "SC000001" })).unwrap();
        sink.finish().unwrap();

        let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert_eq!(line.split(',').count(), 33);
        }
        assert!(lines[0].starts_with("company_number,company_name,type,"));
        assert!(lines[1].starts_with("00000118,ACME LIMITED,,"));
        assert!(lines[1].ends_with(",62012,70100,,,/company/00000118"));
        assert!(!output.contains("dropped"));
    }

    #[test]
    fn test_csv_header_without_records() {
        let mut sink = CsvSink::new(Vec::new(), vec!["a".to_string(), "b".to_string()]).unwrap();
        sink.finish().unwrap();
        let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(output, "a,b\n");
    }

    #[test]
    fn test_json_array_format() {
        let mut sink = JsonSink::new(Vec::new()).unwrap();
        sink.write_record(&json!({ "a": "1", "b": "" })).unwrap();
        sink.write_record(&json!({ "c": { "d": 2 } })).unwrap();
        sink.finish().unwrap();

        let output = String::from_utf8(sink.output).unwrap();
        assert_eq!(
            output,
            "[\n  {\n    \"a\": \"1\"\n  },\n  {\n    \"c\": {\n      \"d\": 2\n    }\n  }\n]\n\n"
        );
    }

    #[test]
    fn test_empty_json_array() {
        let mut sink = JsonSink::new(Vec::new()).unwrap();
        sink.finish().unwrap();
        assert_eq!(String::from_utf8(sink.output).unwrap(), "[\n]\n\n");
    }
}
