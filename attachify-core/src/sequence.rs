//! Per-record sequence numbering.

/// Sequence token for the attachment at `index` (zero-based position within
/// its record's attachment list): `start + index`, left-padded with zeros to
/// `pad` characters. No padding or truncation when the natural width already
/// reaches `pad`. The sequence restarts independently for every record.
pub fn sequence_for(start: u64, index: usize, pad: usize) -> String {
    let value = start + index as u64;
    let raw = value.to_string();
    if pad <= raw.len() {
        return raw;
    }
    format!("{:0>width$}", raw, width = pad)
}
