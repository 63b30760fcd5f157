//! Diagnostic listings of the literal store.

use std::io;

use serde_json::{json, Value};

use ember_util::MagicTable;

use super::LiteralStorage;
use crate::number::{NumberFormat, MAX_NUMBER_STRING_SIZE};
use crate::record::{Literal, LiteralId};

impl<F: NumberFormat> LiteralStorage<F> {
    /// Write a human-readable listing, newest literal first
    ///
    /// ```text
    /// LITERALS: 2 records
    ///   cp:1     number          3
    ///   cp:0     charset         "bar" (size 3, length 3, hash 0x1f2e)
    /// ```
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "LITERALS: {} records", self.len())?;

        for (id, literal) in self.iter() {
            write!(out, "  {:<8} {:<15} ", self.to_compressed(id).to_string(), literal.kind())?;
            match literal {
                Literal::Charset {
                    hash,
                    length,
                    bytes,
                } => writeln!(
                    out,
                    "{:?} (size {}, length {}, hash {:#06x})",
                    String::from_utf8_lossy(bytes),
                    bytes.len(),
                    length,
                    hash
                )?,
                Literal::MagicString(magic) => writeln!(
                    out,
                    "#{} {:?}",
                    magic.0,
                    String::from_utf8_lossy(self.builtin.bytes_of(*magic))
                )?,
                Literal::MagicStringExt(magic) => writeln!(
                    out,
                    "#{} {:?}",
                    magic.0,
                    String::from_utf8_lossy(self.extended.bytes_of(*magic))
                )?,
                Literal::Number(num) => writeln!(out, "{}", self.number_text(*num))?,
                Literal::Free { size } => writeln!(out, "({} bytes)", size)?,
            }
        }

        writeln!(out, "{}", self.pool_stats())
    }

    /// Listing as JSON: `{ "count", "literals": [...], "pools": {...} }`
    pub fn dump_json(&self) -> Value {
        let literals: Vec<Value> = self
            .iter()
            .map(|(id, literal)| self.literal_json(id, literal))
            .collect();

        json!({
            "count": self.len(),
            "literals": literals,
            "pools": serde_json::to_value(self.pool_stats()).unwrap_or(Value::Null),
        })
    }

    fn literal_json(&self, id: LiteralId, literal: &Literal) -> Value {
        let cp = self.to_compressed(id).to_raw();
        let kind = literal.kind();
        match literal {
            Literal::Charset {
                hash,
                length,
                bytes,
            } => json!({
                "cp": cp,
                "kind": kind,
                "text": String::from_utf8_lossy(bytes),
                "size": bytes.len(),
                "length": length,
                "hash": hash,
            }),
            Literal::MagicString(magic) => json!({
                "cp": cp,
                "kind": kind,
                "id": magic.0,
                "text": String::from_utf8_lossy(self.builtin.bytes_of(*magic)),
            }),
            Literal::MagicStringExt(magic) => json!({
                "cp": cp,
                "kind": kind,
                "id": magic.0,
                "text": String::from_utf8_lossy(self.extended.bytes_of(*magic)),
            }),
            Literal::Number(num) => json!({
                "cp": cp,
                "kind": kind,
                "text": self.number_text(*num),
            }),
            Literal::Free { size } => json!({
                "cp": cp,
                "kind": kind,
                "size": size,
            }),
        }
    }

    fn number_text(&self, num: f64) -> String {
        let mut buf = [0u8; MAX_NUMBER_STRING_SIZE];
        String::from_utf8_lossy(self.format_number(num, &mut buf)).into_owned()
    }

    pub(super) fn log_dump(&self) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        let mut listing = Vec::new();
        if self.dump(&mut listing).is_ok() {
            log::debug!("{}", String::from_utf8_lossy(&listing));
        }
    }
}
