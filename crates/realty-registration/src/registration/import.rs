//! Batch import of registration forms from a CSV export.

use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::domain::{AccessLevel, ExperienceBand, ProfileType, RegistrationForm};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
    },
}

/// Read every row of `reader` into a form. Cells are trimmed and empty
/// cells become absent values; the profile column defaults to broker.
pub fn parse_forms<R: Read>(reader: R) -> Result<Vec<RegistrationForm>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut forms = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        // Line the record starts on; quoted cells may span several.
        let line = record
            .position()
            .map_or(0, |position| position.line() as usize);
        let row: FormRow = record.deserialize(Some(&headers))?;
        forms.push(row.into_form(line)?);
    }

    Ok(forms)
}

#[derive(Debug, Deserialize)]
struct FormRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    profile_type: Option<String>,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    license_code: String,
    #[serde(default)]
    company_tax_id: String,
    #[serde(default)]
    individual_tax_id: String,
    #[serde(default)]
    company_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    accepted_terms: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    experience: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    access_level: Option<String>,
}

impl FormRow {
    fn into_form(self, line: usize) -> Result<RegistrationForm, ImportError> {
        let profile_type = match self.profile_type {
            Some(code) => parse_column::<ProfileType>(line, "profile_type", code)?,
            None => ProfileType::default(),
        };
        let accepted_terms = self
            .accepted_terms
            .map(|value| parse_flag(line, value))
            .transpose()?;
        let experience = self
            .experience
            .map(|value| parse_column::<ExperienceBand>(line, "experience", value))
            .transpose()?;
        let access_level = self
            .access_level
            .map(|value| parse_column::<AccessLevel>(line, "access_level", value))
            .transpose()?;

        Ok(RegistrationForm {
            name: self.name,
            email: self.email,
            password: self.password,
            confirm_password: self.confirm_password,
            profile_type,
            phone: self.phone,
            license_code: self.license_code,
            company_tax_id: self.company_tax_id,
            individual_tax_id: self.individual_tax_id,
            company_name: self.company_name,
            accepted_terms,
            experience,
            access_level,
        })
    }
}

fn parse_column<T: FromStr>(
    line: usize,
    column: &'static str,
    value: String,
) -> Result<T, ImportError> {
    value
        .parse()
        .map_err(|_| ImportError::InvalidValue { line, column, value })
}

fn parse_flag(line: usize, value: String) -> Result<bool, ImportError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "sim" | "s" | "yes" | "y" => Ok(true),
        "false" | "0" | "não" | "nao" | "n" | "no" => Ok(false),
        _ => Err(ImportError::InvalidValue {
            line,
            column: "accepted_terms",
            value,
        }),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
name,email,password,confirm_password,profile_type,phone,license_code,company_tax_id,individual_tax_id,company_name,accepted_terms,experience,access_level
Ana Souza,ana@example.com,segredo1,segredo1,corretor,11999999999,SP123456,,,,sim,3-5,
Imobiliaria Central,contato@central.com.br,abcdef,abcdef,imobiliaria,,,12.345.678/0001-95,,Central Ltda,true,,
";

    #[test]
    fn parses_rows_with_empty_cells_as_absent() {
        let forms = parse_forms(EXPORT.as_bytes()).expect("export parses");

        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].profile_type, ProfileType::Broker);
        assert_eq!(forms[0].license_code, "SP123456");
        assert_eq!(forms[0].accepted_terms, Some(true));
        assert_eq!(forms[0].experience, Some(ExperienceBand::ThreeToFiveYears));
        assert!(forms[0].company_tax_id.is_empty());

        assert_eq!(forms[1].profile_type, ProfileType::Agency);
        assert_eq!(forms[1].company_tax_id, "12.345.678/0001-95");
        assert_eq!(forms[1].access_level, None);
    }

    #[test]
    fn reports_line_of_unknown_profile() {
        let csv = "name,email,profile_type\nAna,ana@example.com,corretor\nBia,bia@example.com,gerente\n";

        match parse_forms(csv.as_bytes()) {
            Err(ImportError::InvalidValue {
                line: 3,
                column: "profile_type",
                value,
            }) => assert_eq!(value, "gerente"),
            other => panic!("expected invalid profile on line 3, got {other:?}"),
        }
    }

    #[test]
    fn line_numbers_follow_multiline_cells() {
        let first = "name,email,profile_type,company_name\n\
Central,contato@central.com.br,imobiliaria,\"Central\nLtda\"\n";
        let forms = parse_forms(first.as_bytes()).expect("quoted cell parses");
        assert_eq!(forms[0].company_name, "Central\nLtda");

        let csv = format!("{first}Bia,bia@example.com,gerente,\n");
        match parse_forms(csv.as_bytes()) {
            Err(ImportError::InvalidValue {
                line: 4,
                column: "profile_type",
                ..
            }) => {}
            other => panic!("expected invalid profile on line 4, got {other:?}"),
        }
    }
}
