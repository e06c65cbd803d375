use crate::error::Malformed;
use serde_derive::{Deserialize, Serialize};

/// A `##key=value` meta-information line.
///
/// Structured values (`<ID=DP,Number=1,...>`) are additionally split into
/// their fields. Quotes around field values are removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetaLine {
    key: String,
    value: String,
    fields: Option<Vec<(String, String)>>,
}

impl MetaLine {
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        let value = value.into();
        MetaLine {
            key: key.into(),
            fields: parse_structured(&value),
            value,
        }
    }

    /// Parses a line, which must start with `##`. A terminating newline
    /// must already be removed.
    pub fn parse(line: &[u8]) -> Result<Self, Malformed> {
        let line = line.strip_prefix(b"##").ok_or(Malformed::InvalidMetaLine)?;
        let eq = memchr::memchr(b'=', line).ok_or(Malformed::InvalidMetaLine)?;
        Ok(MetaLine::new(
            String::from_utf8_lossy(&line[..eq]),
            String::from_utf8_lossy(&line[eq + 1..]),
        ))
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw value (everything after the first `=`)
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Fields of a structured value in the order of their appearance
    #[inline]
    pub fn fields(&self) -> Option<&[(String, String)]> {
        self.fields.as_deref()
    }

    /// Returns the value of a field of a structured line
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields()?
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_str())
    }

    /// Shortcut for `get("ID")`
    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.get("ID")
    }
}

// <K=V,K="quoted, value",...>
fn parse_structured(value: &str) -> Option<Vec<(String, String)>> {
    let inner = value.strip_prefix('<')?.strip_suffix('>')?;
    let mut fields = vec![];
    let mut key = String::new();
    let mut current = String::new();
    let mut in_key = true;
    let mut quoted = false;
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => quoted = !quoted,
            '\\' if quoted => current.extend(chars.next()),
            '=' if in_key && !quoted => {
                key = std::mem::take(&mut current);
                in_key = false;
            }
            ',' if !quoted => {
                push_field(&mut fields, &mut key, &mut current, in_key);
                in_key = true;
            }
            c => current.push(c),
        }
    }
    if !inner.is_empty() {
        push_field(&mut fields, &mut key, &mut current, in_key);
    }
    Some(fields)
}

fn push_field(fields: &mut Vec<(String, String)>, key: &mut String, value: &mut String, in_key: bool) {
    if in_key {
        // field without '='
        fields.push((std::mem::take(value), String::new()));
    } else {
        fields.push((std::mem::take(key), std::mem::take(value)));
    }
}

/// VCF header, consisting of meta-information lines and the sample names
/// found in the column header line.
///
/// Headers are immutable. They are obtained from
/// [`vcf::Reader::header()`](super::Reader::header) or created using
/// [`HeaderBuilder`](HeaderBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Header {
    meta: Vec<MetaLine>,
    samples: Vec<String>,
    format_column: bool,
}

impl Header {
    pub(crate) fn new(meta: Vec<MetaLine>, samples: Vec<String>, format_column: bool) -> Self {
        Header {
            meta,
            format_column: format_column || !samples.is_empty(),
            samples,
        }
    }

    /// All meta-information lines in the order of their appearance
    #[inline]
    pub fn meta(&self) -> &[MetaLine] {
        &self.meta
    }

    /// Value of the `##fileformat` line
    pub fn fileformat(&self) -> Option<&str> {
        self.meta_values("fileformat").next().map(MetaLine::value)
    }

    /// Returns all meta lines with the given key
    pub fn meta_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a MetaLine> + 'a {
        self.meta.iter().filter(move |m| m.key == key)
    }

    pub fn infos(&self) -> impl Iterator<Item = &MetaLine> {
        self.meta_values("INFO")
    }

    pub fn formats(&self) -> impl Iterator<Item = &MetaLine> {
        self.meta_values("FORMAT")
    }

    pub fn filters(&self) -> impl Iterator<Item = &MetaLine> {
        self.meta_values("FILTER")
    }

    pub fn contigs(&self) -> impl Iterator<Item = &MetaLine> {
        self.meta_values("contig")
    }

    /// The `##INFO` declaration with the given ID
    pub fn info(&self, id: &str) -> Option<&MetaLine> {
        self.infos().find(|m| m.id() == Some(id))
    }

    /// The `##FORMAT` declaration with the given ID
    pub fn format(&self, id: &str) -> Option<&MetaLine> {
        self.formats().find(|m| m.id() == Some(id))
    }

    /// The `##FILTER` declaration with the given ID
    pub fn filter(&self, id: &str) -> Option<&MetaLine> {
        self.filters().find(|m| m.id() == Some(id))
    }

    /// Length of a contig as declared in the header
    pub fn contig_length(&self, id: &str) -> Option<u64> {
        self.contigs()
            .find(|m| m.id() == Some(id))
            .and_then(|m| m.get("length"))
            .and_then(|l| l.parse().ok())
    }

    #[inline]
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn sample_index(&self, name: &str) -> Option<usize> {
        self.samples.iter().position(|s| s == name)
    }

    /// Returns `true` if the column header line has a `FORMAT` column,
    /// which is always the case if there are samples.
    #[inline]
    pub fn has_format_column(&self) -> bool {
        self.format_column
    }
}

/// Creates a [`Header`](Header).
///
/// ```
/// use seqvar_io::vcf::HeaderBuilder;
///
/// let header = HeaderBuilder::new()
///     .contig("1", Some(248956422))
///     .info("DP", "1", "Integer", "Total depth")
///     .sample("NA001")
///     .build();
///
/// assert_eq!(header.fileformat(), Some("VCFv4.3"));
/// assert_eq!(header.contig_length("1"), Some(248956422));
/// assert_eq!(header.info("DP").unwrap().get("Description"), Some("Total depth"));
/// assert_eq!(header.samples(), ["NA001"]);
/// ```
#[derive(Debug, Clone)]
pub struct HeaderBuilder {
    meta: Vec<MetaLine>,
    samples: Vec<String>,
    format_column: bool,
}

impl Default for HeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderBuilder {
    /// Starts a header with `##fileformat=VCFv4.3`
    pub fn new() -> Self {
        HeaderBuilder {
            meta: vec![MetaLine::new("fileformat", "VCFv4.3")],
            samples: vec![],
            format_column: false,
        }
    }

    /// Replaces the `##fileformat` line
    pub fn fileformat<V: Into<String>>(mut self, version: V) -> Self {
        let line = MetaLine::new("fileformat", version);
        match self.meta.iter_mut().find(|m| m.key == "fileformat") {
            Some(m) => *m = line,
            None => self.meta.insert(0, line),
        }
        self
    }

    /// Appends an arbitrary meta-information line
    pub fn meta<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.meta.push(MetaLine::new(key, value));
        self
    }

    pub fn info(self, id: &str, number: &str, ty: &str, description: &str) -> Self {
        let value = format!(
            "<ID={},Number={},Type={},Description=\"{}\">",
            id,
            number,
            ty,
            escape(description)
        );
        self.meta("INFO", value)
    }

    pub fn format(self, id: &str, number: &str, ty: &str, description: &str) -> Self {
        let value = format!(
            "<ID={},Number={},Type={},Description=\"{}\">",
            id,
            number,
            ty,
            escape(description)
        );
        self.meta("FORMAT", value)
    }

    pub fn filter(self, id: &str, description: &str) -> Self {
        let value = format!("<ID={},Description=\"{}\">", id, escape(description));
        self.meta("FILTER", value)
    }

    pub fn contig(self, id: &str, length: Option<u64>) -> Self {
        let value = match length {
            Some(l) => format!("<ID={},length={}>", id, l),
            None => format!("<ID={}>", id),
        };
        self.meta("contig", value)
    }

    pub fn sample<S: Into<String>>(mut self, name: S) -> Self {
        self.samples.push(name.into());
        self
    }

    /// Adds a `FORMAT` column even if there are no samples
    pub fn format_column(mut self, yes: bool) -> Self {
        self.format_column = yes;
        self
    }

    pub fn build(self) -> Header {
        Header::new(self.meta, self.samples, self.format_column)
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured() {
        let line = MetaLine::parse(
            br#"##INFO=<ID=DP,Number=1,Type=Integer,Description="Depth, \"raw\"">"#,
        )
        .unwrap();
        assert_eq!(line.key(), "INFO");
        assert_eq!(line.id(), Some("DP"));
        assert_eq!(line.get("Type"), Some("Integer"));
        assert_eq!(line.get("Description"), Some("Depth, \"raw\""));
        assert_eq!(line.fields().unwrap().len(), 4);
    }

    #[test]
    fn unstructured() {
        let line = MetaLine::parse(b"##source=a=b").unwrap();
        assert_eq!(line.key(), "source");
        assert_eq!(line.value(), "a=b");
        assert_eq!(line.fields(), None);
        assert_eq!(MetaLine::parse(b"##novalue"), Err(Malformed::InvalidMetaLine));
    }

    #[test]
    fn builder() {
        let header = HeaderBuilder::new()
            .fileformat("VCFv4.2")
            .filter("q10", "Quality \"below\" 10")
            .contig("chr2", None)
            .format_column(true)
            .build();
        assert_eq!(header.fileformat(), Some("VCFv4.2"));
        assert_eq!(header.meta().len(), 3);
        assert_eq!(
            header.filter("q10").unwrap().get("Description"),
            Some("Quality \"below\" 10")
        );
        assert_eq!(header.contig_length("chr2"), None);
        assert!(header.has_format_column());
        assert_eq!(header.sample_index("x"), None);
    }
}
