//! Builders for fixed-width and CSV test lines
//!
//! Each builder writes fields at their published offsets over a space
//! filled buffer, so tests only name the fields they care about.

use std::sync::LazyLock;

/// Space-padded byte buffer with positional writes
#[derive(Debug, Clone, Default)]
pub struct LineBuilder {
    bytes: Vec<u8>,
}

impl LineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `value` at `offset`, padding any gap with spaces
    pub fn put(&mut self, offset: usize, value: &str) -> &mut Self {
        let end = offset + value.len();
        if self.bytes.len() < end {
            self.bytes.resize(end, b' ');
        }
        self.bytes[offset..end].copy_from_slice(value.as_bytes());
        self
    }

    /// Pad the line with spaces up to `len`
    pub fn pad_to(&mut self, len: usize) -> &mut Self {
        if self.bytes.len() < len {
            self.bytes.resize(len, b' ');
        }
        self
    }

    pub fn append(&mut self, value: &str) -> &mut Self {
        self.bytes.extend_from_slice(value.as_bytes());
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

fn put_sic(builder: &mut LineBuilder, start: usize, codes: &[&str]) {
    for (index, code) in codes.iter().take(4).enumerate() {
        builder.put(start + index * 5, code);
    }
}

/// Product 183 company line
#[derive(Debug, Clone)]
pub struct Prod183Line {
    line: LineBuilder,
    tail: String,
}

impl Prod183Line {
    pub fn new(company_number: &str) -> Self {
        let mut line = LineBuilder::new();
        line.put(0, company_number).put(8, "1");
        Self {
            line,
            tail: String::new(),
        }
    }

    pub fn status(mut self, code: &str) -> Self {
        self.line.put(9, code);
        self
    }

    pub fn accounts_type(mut self, code: &str) -> Self {
        self.line.put(10, code);
        self
    }

    pub fn incorporated(mut self, date: &str) -> Self {
        self.line.put(12, date);
        self
    }

    pub fn ceased(mut self, date: &str) -> Self {
        self.line.put(20, date);
        self
    }

    pub fn reference_date(mut self, day: &str, month: &str) -> Self {
        self.line.put(28, day).put(30, month);
        self
    }

    pub fn accounts_made_up(mut self, date: &str) -> Self {
        self.line.put(32, date);
        self
    }

    pub fn accounts_next_due(mut self, date: &str) -> Self {
        self.line.put(40, date);
        self
    }

    pub fn confirmation_statement(mut self, last: &str, next_due: &str) -> Self {
        self.line.put(48, last).put(56, next_due);
        self
    }

    pub fn sic(mut self, codes: &[&str]) -> Self {
        put_sic(&mut self.line, 64, codes);
        self
    }

    pub fn markers(mut self, inspect: &str, postcode_status: &str) -> Self {
        self.line.put(84, inspect).put(85, postcode_status);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.line.put(90, name);
        self
    }

    pub fn alpha_key(mut self, key: &str) -> Self {
        self.line.put(250, key);
        self
    }

    pub fn jurisdiction(mut self, code: &str) -> Self {
        self.line.put(310, code);
        self
    }

    pub fn tail(mut self, tail: &str) -> Self {
        self.tail = tail.to_string();
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.line.pad_to(311).append(&self.tail);
        self.line.into_bytes()
    }
}

/// Product 100 gazette transaction line
#[derive(Debug, Clone)]
pub struct Prod100Line {
    line: LineBuilder,
    tail: String,
}

impl Prod100Line {
    pub fn new(company_number: &str, transaction_type: &str) -> Self {
        let mut line = LineBuilder::new();
        line.put(0, company_number).put(8, transaction_type);
        Self {
            line,
            tail: String::new(),
        }
    }

    pub fn received(mut self, date: &str) -> Self {
        self.line.put(11, date);
        self
    }

    pub fn transaction_id(mut self, id: &str) -> Self {
        self.line.put(19, id);
        self
    }

    pub fn correction(mut self, marker: &str) -> Self {
        self.line.put(29, marker);
        self
    }

    pub fn status(mut self, code: &str) -> Self {
        self.line.put(30, code);
        self
    }

    pub fn jurisdiction(mut self, code: &str) -> Self {
        self.line.put(31, code);
        self
    }

    pub fn effective(mut self, date: &str) -> Self {
        self.line.put(32, date);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.line.put(40, name);
        self
    }

    pub fn tail(mut self, tail: &str) -> Self {
        self.tail = tail.to_string();
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.line.pad_to(200).append(&self.tail);
        self.line.into_bytes()
    }
}

/// Product 101 update transaction line
#[derive(Debug, Clone)]
pub struct Prod101Line {
    line: LineBuilder,
    tail: String,
}

impl Prod101Line {
    pub fn new(company_number: &str, transaction_type: &str) -> Self {
        let mut line = LineBuilder::new();
        line.put(0, company_number).put(8, transaction_type);
        Self {
            line,
            tail: String::new(),
        }
    }

    pub fn received(mut self, date: &str) -> Self {
        self.line.put(10, date);
        self
    }

    pub fn transaction_id(mut self, id: &str) -> Self {
        self.line.put(18, id);
        self
    }

    pub fn markers(mut self, correction: &str, inspect: &str) -> Self {
        self.line.put(28, correction).put(29, inspect);
        self
    }

    pub fn status(mut self, code: &str) -> Self {
        self.line.put(30, code);
        self
    }

    pub fn jurisdiction(mut self, code: &str) -> Self {
        self.line.put(31, code);
        self
    }

    pub fn postcode_status(mut self, code: &str) -> Self {
        self.line.put(32, code);
        self
    }

    pub fn accounts_type(mut self, code: &str) -> Self {
        self.line.put(33, code);
        self
    }

    pub fn incorporated(mut self, date: &str) -> Self {
        self.line.put(35, date);
        self
    }

    pub fn ceased(mut self, date: &str) -> Self {
        self.line.put(43, date);
        self
    }

    pub fn reference_date(mut self, day: &str, month: &str) -> Self {
        self.line.put(51, day).put(53, month);
        self
    }

    pub fn accounts_made_up(mut self, date: &str) -> Self {
        self.line.put(55, date);
        self
    }

    pub fn accounts_next_due(mut self, date: &str) -> Self {
        self.line.put(63, date);
        self
    }

    pub fn confirmation_statement(mut self, last: &str, next_due: &str) -> Self {
        self.line.put(71, last).put(79, next_due);
        self
    }

    pub fn sic(mut self, codes: &[&str]) -> Self {
        put_sic(&mut self.line, 87, codes);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.line.put(107, name);
        self
    }

    pub fn tail(mut self, tail: &str) -> Self {
        self.tail = tail.to_string();
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.line.pad_to(267).append(&self.tail);
        self.line.into_bytes()
    }
}

/// Product 216 company line
#[derive(Debug, Clone)]
pub struct Prod216CompanyLine {
    line: LineBuilder,
    name: String,
}

impl Prod216CompanyLine {
    pub fn new(company_number: &str, status: &str, officers: usize, name: &str) -> Self {
        let mut line = LineBuilder::new();
        line.put(0, company_number)
            .put(8, "1")
            .put(9, status)
            .put(32, &format!("{:04}", officers))
            .put(36, &format!("{:04}", name.len()));
        Self {
            line,
            name: name.to_string(),
        }
    }

    pub fn build(mut self) -> Vec<u8> {
        self.line.pad_to(40).append(&self.name).append("<");
        self.line.into_bytes()
    }
}

/// Product 216 person line
#[derive(Debug, Clone)]
pub struct Prod216PersonLine {
    line: LineBuilder,
    tail: String,
}

impl Prod216PersonLine {
    pub fn new(company_number: &str, appointment_type: &str, person_number: &str) -> Self {
        let mut line = LineBuilder::new();
        line.put(0, company_number)
            .put(8, "2")
            .put(10, appointment_type)
            .put(12, person_number);
        Self {
            line,
            tail: String::new(),
        }
    }

    pub fn origin(mut self, code: &str) -> Self {
        self.line.put(9, code);
        self
    }

    pub fn corporate(mut self) -> Self {
        self.line.put(24, "Y");
        self
    }

    pub fn appointed(mut self, date: &str) -> Self {
        self.line.put(32, date);
        self
    }

    pub fn resigned(mut self, date: &str) -> Self {
        self.line.put(40, date);
        self
    }

    pub fn postcode(mut self, postcode: &str) -> Self {
        self.line.put(48, postcode);
        self
    }

    pub fn date_of_birth(mut self, partial: &str, full: &str) -> Self {
        self.line.put(56, partial).put(64, full);
        self
    }

    pub fn tail(mut self, tail: &str) -> Self {
        self.tail = tail.to_string();
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        let length = format!("{:04}", self.tail.len());
        self.line.put(72, &length).pad_to(76).append(&self.tail);
        self.line.into_bytes()
    }
}

/// Product 217 header columns in published order
pub const PROD217_COLUMNS: &[&str] = &[
    "CompanyName",
    "CompanyNumber",
    "RegAddress.CareOf",
    "RegAddress.POBox",
    "RegAddress.AddressLine1",
    "RegAddress.AddressLine2",
    "RegAddress.PostTown",
    "RegAddress.County",
    "RegAddress.Country",
    "RegAddress.PostCode",
    "CompanyCategory",
    "CompanyStatus",
    "CountryOfOrigin",
    "DissolutionDate",
    "IncorporationDate",
    "Accounts.AccountRefDay",
    "Accounts.AccountRefMonth",
    "Accounts.NextDueDate",
    "Accounts.LastMadeUpDate",
    "Accounts.AccountCategory",
    "Returns.NextDueDate",
    "Returns.LastMadeUpDate",
    "Mortgages.NumMortCharges",
    "Mortgages.NumMortOutstanding",
    "Mortgages.NumMortPartSatisfied",
    "Mortgages.NumMortSatisfied",
    "SICCode.SicText_1",
    "SICCode.SicText_2",
    "SICCode.SicText_3",
    "SICCode.SicText_4",
    "LimitedPartnerships.NumGenPartners",
    "LimitedPartnerships.NumLimPartners",
    "URI",
    "PreviousName_1.CONDATE",
    "PreviousName_1.CompanyName",
    "PreviousName_2.CONDATE",
    "PreviousName_2.CompanyName",
    "PreviousName_3.CONDATE",
    "PreviousName_3.CompanyName",
    "PreviousName_4.CONDATE",
    "PreviousName_4.CompanyName",
    "PreviousName_5.CONDATE",
    "PreviousName_5.CompanyName",
    "PreviousName_6.CONDATE",
    "PreviousName_6.CompanyName",
    "PreviousName_7.CONDATE",
    "PreviousName_7.CompanyName",
    "PreviousName_8.CONDATE",
    "PreviousName_8.CompanyName",
    "PreviousName_9.CONDATE",
    "PreviousName_9.CompanyName",
    "PreviousName_10.CONDATE",
    "PreviousName_10.CompanyName",
    "ConfStmtNextDueDate",
    "ConfStmtLastMadeUpDate",
];

/// Header row as published, with the stray leading spaces after commas
pub static PROD217_HEADER: LazyLock<String> = LazyLock::new(|| PROD217_COLUMNS.join(", "));

/// Build a quoted CSV row, leaving unnamed columns empty
pub fn prod217_row(values: &[(&str, &str)]) -> String {
    PROD217_COLUMNS
        .iter()
        .map(|column| {
            let value = values
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| *value)
                .unwrap_or_default();
            format!("\"{}\"", value.replace('"', "\"\""))
        })
        .collect::<Vec<_>>()
        .join(",")
}
