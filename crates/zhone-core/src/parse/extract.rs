// ── Payload extraction and record layouts ──
//
// The gateway's pages carry their data as JavaScript string literals
// (`var wlClients = '...';`) holding `#`, `|` and `/` delimited text.
// This module finds those literals and gives positional fields names, so
// each page format is described by one `RecordLayout` table.

use regex::Regex;

use crate::error::ParseError;
use crate::model::MacAddress;

// ── Payload markers ─────────────────────────────────────────────────

/// Locates `var <name> = '<payload>'` inside page text.
#[derive(Debug)]
pub struct PayloadMarker {
    name: &'static str,
    pattern: Regex,
}

impl PayloadMarker {
    pub fn new(name: &'static str) -> Self {
        let pattern = Regex::new(&format!(r"var\s+{}\s*=\s*'([^']+)'", regex::escape(name)))
            .expect("escaped payload marker is a valid regex");
        Self { name, pattern }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Return the payload of the first match. An empty literal counts as
    /// absent.
    pub fn find<'a>(&self, text: &'a str) -> Result<&'a str, ParseError> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| ParseError::not_found(format!("var {}", self.name)))
    }
}

// ── Field conversion ────────────────────────────────────────────────

/// Strict numeric conversion; surrounding whitespace is the only leniency.
pub fn parse_number(field: &str, value: &str) -> Result<f64, ParseError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::MalformedField {
            field: field.into(),
            value: value.into(),
        })
}

// ── Record layouts ──────────────────────────────────────────────────

/// Positional field-order contract for one kind of delimited record.
#[derive(Debug)]
pub struct RecordLayout {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    /// Reject records with values beyond the named fields.
    pub exact: bool,
}

impl RecordLayout {
    /// Split `record` on `separator` and bind it to this layout.
    pub fn bind<'a>(
        &'static self,
        index: usize,
        record: &'a str,
        separator: char,
    ) -> Result<BoundRecord<'a>, ParseError> {
        self.bind_fields(index, record.split(separator).collect())
    }

    /// Bind already-split values to this layout.
    ///
    /// Fewer values than the layout names is a shape mismatch. Trailing
    /// values beyond the layout are ignored unless the layout is `exact`.
    pub fn bind_fields<'a>(
        &'static self,
        index: usize,
        values: Vec<&'a str>,
    ) -> Result<BoundRecord<'a>, ParseError> {
        if values.len() < self.fields.len() || (self.exact && values.len() > self.fields.len()) {
            return Err(ParseError::shape(
                format!("{}[{index}] field count", self.name),
                self.fields.len(),
                values.len(),
            ));
        }
        Ok(BoundRecord {
            layout: self,
            index,
            values,
        })
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }
}

/// A record whose values can be read by field name.
#[derive(Debug)]
pub struct BoundRecord<'a> {
    layout: &'static RecordLayout,
    index: usize,
    values: Vec<&'a str>,
}

impl<'a> BoundRecord<'a> {
    /// `layout[index].field`, used in error messages.
    fn qualified(&self, field: &str) -> String {
        format!("{}[{}].{field}", self.layout.name, self.index)
    }

    pub fn text(&self, field: &str) -> Result<&'a str, ParseError> {
        self.layout
            .position(field)
            .and_then(|pos| self.values.get(pos).copied())
            .ok_or_else(|| ParseError::not_found(self.qualified(field)))
    }

    pub fn number(&self, field: &str) -> Result<f64, ParseError> {
        parse_number(&self.qualified(field), self.text(field)?)
    }

    pub fn mac(&self, field: &str) -> Result<MacAddress, ParseError> {
        let raw = self.text(field)?;
        MacAddress::parse(raw).map_err(|_| ParseError::InvalidAddress {
            field: self.qualified(field),
            value: raw.into(),
        })
    }
}

/// Split a payload into non-empty records.
///
/// Pages end their lists with a separator, which would otherwise yield a
/// trailing empty record.
pub fn records(payload: &str, separator: char) -> impl Iterator<Item = &str> {
    payload.split(separator).filter(|r| !r.trim().is_empty())
}
